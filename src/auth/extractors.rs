use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::error::AppError;
use crate::models::Principal;

/// The authenticated principal of the current request.
///
/// Intended for routes wrapped by `AuthMiddleware`, which inserts the resolved
/// `Principal` into the request extensions. Missing principal means the route
/// is not behind the middleware and yields `AppError::Unauthorized`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Principal);

impl FromRequest for CurrentUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Principal>().cloned() {
            Some(principal) => ready(Ok(CurrentUser(principal))),
            None => {
                let err = AppError::Unauthorized("No token provided, authorization denied".into());
                ready(Err(err.into()))
            }
        }
    }
}
