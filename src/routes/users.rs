use crate::{
    auth::CurrentUser,
    error::AppError,
    models::ProfileUpdate,
    store::UserStore,
};
use actix_web::{get, put, web, HttpResponse, Responder};
use serde_json::json;
use validator::Validate;

/// Returns the authenticated user's profile.
///
/// The profile is the principal resolved by `AuthMiddleware`; no extra lookup is made.
///
/// ## Responses:
/// - `200 OK`: `{ "success": true, "user": <principal> }`.
/// - `401 Unauthorized`: missing, invalid or expired token.
#[get("/profile")]
pub async fn get_profile(user: CurrentUser) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "success": true,
        "user": user.0
    }))
}

/// Updates the authenticated user's editable profile fields.
///
/// ## Request Body:
/// A JSON object matching `ProfileUpdate`; every field is optional:
/// - `name`: 1 to 100 characters.
/// - `phone`: digits, spaces, parentheses, hyphens and a leading `+`.
/// - `location`: at most 200 characters.
///
/// Email, role and password cannot be changed here.
///
/// ## Responses:
/// - `200 OK`: `{ "success": true, "message": ..., "user": <principal> }`.
/// - `401 Unauthorized`: missing, invalid or expired token.
/// - `404 Not Found`: the user was removed after authentication.
/// - `422 Unprocessable Entity`: validation failed.
#[put("/profile")]
pub async fn update_profile(
    store: web::Data<dyn UserStore>,
    user: CurrentUser,
    update: web::Json<ProfileUpdate>,
) -> Result<impl Responder, AppError> {
    update.validate()?;

    let updated = store
        .update_profile(user.0.id, &update)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    log::info!("Profile updated for {}", updated.email);

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Profile updated successfully",
        "user": updated
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Principal, Role, UserRecord};
    use crate::store::MemoryUserStore;
    use actix_web::dev::Service;
    use actix_web::http::StatusCode;
    use actix_web::{test, App, HttpMessage};
    use std::sync::Arc;

    async fn call_update(
        store: Arc<MemoryUserStore>,
        principal: Principal,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let store: Arc<dyn UserStore> = store;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(store))
                .wrap_fn(move |req, srv| {
                    req.extensions_mut().insert(principal.clone());
                    srv.call(req)
                })
                .service(update_profile),
        )
        .await;

        let req = test::TestRequest::put()
            .uri("/profile")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        (status, test::read_body_json(resp).await)
    }

    #[actix_rt::test]
    async fn test_update_profile_applies_changes() {
        let store = Arc::new(MemoryUserStore::new());
        let record = UserRecord::new("Akosua", "akosua@example.com", "hash", Role::Client);
        store.insert(record.clone()).await;

        let (status, json) = call_update(
            store.clone(),
            record.to_principal(),
            json!({ "name": "Akosua Owusu", "role": "provider" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["user"]["name"], "Akosua Owusu");
        assert_eq!(json["user"]["role"], "client");
    }

    #[actix_rt::test]
    async fn test_update_profile_for_vanished_user_is_404() {
        let store = Arc::new(MemoryUserStore::new());
        let principal =
            UserRecord::new("Esi", "esi@example.com", "hash", Role::Provider).to_principal();

        let (status, json) =
            call_update(store, principal, json!({ "location": "Kumasi" })).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "User not found");
    }
}
