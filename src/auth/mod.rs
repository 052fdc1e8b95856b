//! Bearer-token authentication.
//!
//! `AuthMiddleware` runs in front of protected routes and delegates to the
//! `Authenticator`, which verifies the token with `TokenService` and resolves
//! the principal through the `UserStore`. Handlers read the result with the
//! `CurrentUser` extractor.

pub mod authenticator;
pub mod errors;
pub mod extractors;
pub mod middleware;
pub mod token;

pub use authenticator::{extract_bearer, Authenticator};
pub use errors::AuthError;
pub use extractors::CurrentUser;
pub use middleware::AuthMiddleware;
pub use token::{Claims, TokenService};
