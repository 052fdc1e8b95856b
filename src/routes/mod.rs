pub mod health;
pub mod users;

use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;

/// Routes mounted under `/api`. Every one of them expects `AuthMiddleware`
/// on the enclosing scope.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .service(users::get_profile)
            .service(users::update_profile),
    );
}

/// Fallback for requests that match no route.
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    HttpResponse::NotFound().json(json!({
        "success": false,
        "message": format!("Route not found: {} {}", req.method(), req.uri())
    }))
}
