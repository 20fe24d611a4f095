use std::io::{self, Write};
use simdb::SimilarityIndex;
use simdb::config::DEFAULT_TOP_K;

#[derive(Debug, PartialEq)]
pub enum Command {
    Add { id: i64, vec: Vec<f32> },
    Search { vec: Vec<f32>, top_k: usize },
    Count,
    Dim,
}

/// Parse a command from whitespace-split REPL input
pub fn parse_command(args: &[&str]) -> Result<Command, String> {
    let Some(command) = args.first() else {
        return Err("No command provided. Use: add, search, count, dim".to_string());
    };

    match *command {
        "add" => parse_add(args),
        "search" => parse_search(args),
        "count" => Ok(Command::Count),
        "dim" => Ok(Command::Dim),
        _ => Err(format!("Unknown command: {}. Available: add, search, count, dim", command)),
    }
}

/// Usage: add <id> <v1> <v2> ...
fn parse_add(args: &[&str]) -> Result<Command, String> {
    if args.len() < 3 {
        return Err("'add' command requires an ID and a vector. Usage: add <id> <v1> <v2> ...".to_string());
    }

    let id = args[1].parse::<i64>()
        .map_err(|_| format!("Invalid ID: '{}'. Must be an integer.", args[1]))?;
    let vec = parse_components(&args[2..])?;

    Ok(Command::Add { id, vec })
}

/// Usage: search <v1> <v2> ... [--top_k <number>]
fn parse_search(args: &[&str]) -> Result<Command, String> {
    if args.len() < 2 {
        return Err("'search' command requires at least one vector component. Usage: search <v1> <v2> ... [--top_k <number>]".to_string());
    }

    let mut top_k = DEFAULT_TOP_K as usize;
    let mut vector_end = args.len();

    if args.len() >= 3 && args[args.len() - 2] == "--top_k" {
        let raw = args[args.len() - 1];
        top_k = raw.parse::<usize>()
            .map_err(|_| format!("Invalid --top_k value: '{}'. Must be a non-negative integer.", raw))?;
        vector_end = args.len() - 2;
    }

    let vec = parse_components(&args[1..vector_end])?;
    if vec.is_empty() {
        return Err("Search vector cannot be empty".to_string());
    }

    Ok(Command::Search { vec, top_k })
}

fn parse_components(raw: &[&str]) -> Result<Vec<f32>, String> {
    raw.iter()
        .map(|s| s.parse::<f32>())
        .collect::<Result<Vec<f32>, _>>()
        .map_err(|_| "Failed to parse vector components as numbers".to_string())
}

/// REPL mode - interactive session against an in-memory index
pub fn run_repl(index: &SimilarityIndex) {
    println!("simdb - Similarity Index (dim = {})", index.dim());
    println!("Type 'help' for commands, 'exit' or 'quit' to quit\n");

    loop {
        print!("simdb> ");
        if let Err(error) = io::stdout().flush() {
            eprintln!("Error writing prompt: {}", error);
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(error) => {
                eprintln!("Error reading input: {}", error);
                continue;
            }
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        if input == "exit" || input == "quit" {
            println!("Goodbye!");
            break;
        }

        if input == "help" {
            print_help();
            continue;
        }

        let args: Vec<&str> = input.split_whitespace().collect();
        match parse_command(&args) {
            Ok(command) => execute_command(index, command),
            Err(error) => eprintln!("Error: {}", error),
        }
    }
}

fn execute_command(index: &SimilarityIndex, command: Command) {
    match command {
        Command::Add { id, vec } => {
            match index.add(vec![(id, vec)]) {
                Ok(added) => println!("Added {} vector with id: {}", added, id),
                Err(error) => eprintln!("Error: {}", error),
            }
        }

        Command::Search { vec, top_k } => {
            match index.search(vec, top_k) {
                Ok(hits) => {
                    if hits.is_empty() {
                        println!("No results found");
                    } else {
                        println!("Top {} results:", hits.len());
                        for (rank, hit) in hits.iter().enumerate() {
                            println!("{}. ID: {}, Score: {:.4}", rank + 1, hit.identifier, hit.score);
                        }
                    }
                }
                Err(error) => eprintln!("Error: {}", error),
            }
        }

        Command::Count => println!("{}", index.len()),

        Command::Dim => println!("{}", index.dim()),
    }
}

fn print_help() {
    println!("Available commands:");
    println!("  add <id> <v1> <v2> ...           - Add a vector (id is an integer)");
    println!("  search <v1> <v2> ... [--top_k N] - Search for similar vectors (default k=5)");
    println!("  count                            - Show vector count");
    println!("  dim                              - Show index dimension");
    println!("  help                             - Show this help");
    println!("  exit, quit                       - Exit the program");
}

#[cfg(test)]
mod cli_test {
    use super::*;

    #[test]
    fn test_parse_add() {
        let cmd = parse_command(&["add", "-3", "1.0", "0.5"]).unwrap();
        assert_eq!(cmd, Command::Add { id: -3, vec: vec![1.0, 0.5] });
    }

    #[test]
    fn test_parse_add_bad_id() {
        assert!(parse_command(&["add", "abc", "1.0"]).is_err());
    }

    #[test]
    fn test_parse_search_default_top_k() {
        let cmd = parse_command(&["search", "1", "0"]).unwrap();
        assert_eq!(cmd, Command::Search { vec: vec![1.0, 0.0], top_k: 5 });
    }

    #[test]
    fn test_parse_search_with_top_k() {
        let cmd = parse_command(&["search", "1", "0", "--top_k", "2"]).unwrap();
        assert_eq!(cmd, Command::Search { vec: vec![1.0, 0.0], top_k: 2 });
    }

    #[test]
    fn test_parse_search_only_flag() {
        assert!(parse_command(&["search", "--top_k", "2"]).is_err());
    }

    #[test]
    fn test_parse_unknown() {
        assert!(parse_command(&["delete", "1"]).is_err());
        assert!(parse_command(&[]).is_err());
    }
}
