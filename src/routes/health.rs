use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

use crate::store::UserStore;

/// API banner.
#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "ServiceHub API is running",
        "timestamp": Utc::now()
    }))
}

/// Health check endpoint
///
/// Returns the API status, the current timestamp and whether the user store is reachable.
#[get("/health")]
pub async fn health(store: web::Data<dyn UserStore>) -> impl Responder {
    let database = if store.ping().await {
        "Connected"
    } else {
        "Disconnected"
    };

    HttpResponse::Ok().json(json!({
        "status": "OK",
        "timestamp": Utc::now(),
        "database": database
    }))
}
