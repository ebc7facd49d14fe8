use axum::response::Json;
use serde_json::{Value, json};

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "vkbackup-oauth-callback",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
