use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

lazy_static! {
    // Digits, spaces, parentheses, hyphens and a leading plus.
    static ref PHONE_REGEX: regex::Regex = regex::Regex::new(r"^[+0-9 ()-]{6,20}$").unwrap();
}

/// Which side of the marketplace an account acts on.
/// Corresponds to the `user_role` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Posts tasks.
    Client,
    /// Offers services.
    Provider,
}

/// The authenticated identity attached to a request.
///
/// Carries every profile field downstream handlers need and nothing secret.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, FromRow)]
pub struct Principal {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A full user row as the store keeps it, password hash included.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Creates a record with a fresh id and no optional profile fields.
    pub fn new(name: &str, email: &str, password_hash: &str, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            role,
            phone: None,
            location: None,
            profile_image: None,
            created_at: Utc::now(),
        }
    }

    /// Projects the record onto its non-secret fields.
    pub fn to_principal(&self) -> Principal {
        Principal {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            phone: self.phone.clone(),
            location: self.location.clone(),
            profile_image: self.profile_image.clone(),
            created_at: self.created_at,
        }
    }

    /// Applies the fields present in `update`, leaving the others untouched.
    pub fn apply(&mut self, update: &ProfileUpdate) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(phone) = &update.phone {
            self.phone = Some(phone.clone());
        }
        if let Some(location) = &update.location {
            self.location = Some(location.clone());
        }
    }
}

/// Editable profile fields. Absent fields keep their stored value.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct ProfileUpdate {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(regex(
        path = "PHONE_REGEX",
        message = "Phone may contain digits, spaces, parentheses, hyphens and a leading +"
    ))]
    pub phone: Option<String>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
}
