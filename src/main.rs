mod cli;

use actix_web::{web, App, HttpServer};
use clap::Parser;
use simdb::SimilarityIndex;
use simdb::config::{Cli, Command, ServeConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> Result<(), std::io::Error> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Serve(cfg)) => serve(cfg).await?,
        Some(Command::Repl(cfg)) => cli::run_repl(&SimilarityIndex::new(cfg.dim)),
        None => cli::run_repl(&SimilarityIndex::new(cli.repl.dim)),
    }

    Ok(())
}

async fn serve(cfg: ServeConfig) -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let index = web::Data::new(SimilarityIndex::new(cfg.dim));
    let max_body_bytes = cfg.max_body_bytes;

    info!(dim = cfg.dim, bind = %cfg.bind, "starting simdb");

    HttpServer::new(move || {
        App::new()
            .app_data(index.clone())
            .app_data(simdb::server::json_config(max_body_bytes))
            .configure(simdb::server::config)
    })
    .bind(&cfg.bind)?
    .run()
    .await
}
