#![doc = "The `servicehub` library crate."]
#![doc = ""]
#![doc = "Contains the bearer-token authenticator and its actix middleware, the user"]
#![doc = "store abstraction, domain models, routing configuration and error handling"]
#![doc = "for the ServiceHub marketplace API. The binary (`main.rs`) wires them together."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;

pub use crate::error::AppError;
pub use crate::models::Principal;
