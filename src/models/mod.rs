pub mod user;

pub use user::{Principal, ProfileUpdate, Role, UserRecord};
