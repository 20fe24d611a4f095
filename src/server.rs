//! REST API for simdb.
//!
//! Exposes one shared [`SimilarityIndex`] over JSON endpoints. The index is
//! owned by the caller and registered as app data, so every worker sees the
//! same in-memory state. Nothing is persisted.
//!
//! ## Endpoints
//!
//! - `POST /add` - Append `(id, vector)` items
//! - `POST /search` - Top-k cosine similarity search
//! - `GET /stats` - Entry count and dimension
//!
//! ## Usage
//!
//! ```rust,no_run
//! use actix_web::{web, App, HttpServer};
//! use simdb::SimilarityIndex;
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     let index = web::Data::new(SimilarityIndex::new(768));
//!     HttpServer::new(move || App::new().app_data(index.clone()).configure(simdb::server::config))
//!         .bind("0.0.0.0:7878")?
//!         .run()
//!         .await
//! }
//! ```

use actix_web::{web, HttpResponse, Responder};
use serde::{Serialize, Deserialize};
use tracing::warn;

use crate::config::DEFAULT_TOP_K;
use crate::error::IndexError;
use crate::index::{Hit, SimilarityIndex};


// --- Request structs ---

#[derive(Deserialize)]
struct AddItem {
    id: i64,
    vector: Vec<f32>,
}

#[derive(Deserialize)]
struct AddRequest {
    items: Vec<AddItem>,
}

fn default_top_k() -> i64 {
    DEFAULT_TOP_K
}

#[derive(Deserialize)]
struct SearchRequest {
    vector: Vec<f32>,
    #[serde(default = "default_top_k")]
    top_k: i64,
}

// --- Response structs ---

#[derive(Serialize)]
struct AddResponse {
    added: usize,
}

#[derive(Serialize)]
struct SearchResponse {
    results: Vec<Hit>,
}

#[derive(Serialize)]
struct StatsResponse {
    count: usize,
    dim: usize,
}

/// Maps a core failure to an HTTP error response
fn error_response(e: IndexError) -> HttpResponse {
    let body = serde_json::json!({"error": e.to_string()});
    match e {
        IndexError::DimensionMismatch { .. } => HttpResponse::BadRequest().json(body),
        IndexError::LengthMismatch { .. } => HttpResponse::InternalServerError().json(body),
    }
}

// --- Handlers ---

async fn add_handler(index: web::Data<SimilarityIndex>, body: web::Json<AddRequest>) -> impl Responder {
    let items = body.into_inner().items
        .into_iter()
        .map(|item| (item.id, item.vector))
        .collect();

    match index.add(items) {
        Ok(added) => HttpResponse::Ok().json(AddResponse { added }),
        Err(e) => {
            warn!(error = %e, "add rejected");
            error_response(e)
        }
    }
}

async fn search_handler(index: web::Data<SimilarityIndex>, body: web::Json<SearchRequest>) -> impl Responder {
    let SearchRequest { vector, top_k } = body.into_inner();
    // Non-positive top_k yields no results
    let top_k = usize::try_from(top_k).unwrap_or(0);

    match index.search(vector, top_k) {
        Ok(results) => HttpResponse::Ok().json(SearchResponse { results }),
        Err(e) => {
            warn!(error = %e, "search rejected");
            error_response(e)
        }
    }
}

async fn stats_handler(index: web::Data<SimilarityIndex>) -> impl Responder {
    HttpResponse::Ok().json(StatsResponse { count: index.len(), dim: index.dim() })
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/add").route(web::post().to(add_handler)))
       .service(web::resource("/search").route(web::post().to(search_handler)))
       .service(web::resource("/stats").route(web::get().to(stats_handler)));
}

/// JSON extractor settings: body size limit and a JSON error body for
/// payloads that fail to parse.
pub fn json_config(max_body_bytes: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(max_body_bytes)
        .error_handler(|err, _req| {
            warn!(error = %err, "malformed request");
            let response = HttpResponse::BadRequest().json(serde_json::json!({"error": err.to_string()}));
            actix_web::error::InternalError::from_response(err, response).into()
        })
}
