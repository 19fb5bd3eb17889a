use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Registered player details. Only its presence matters to the game rules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl UserProfile {
    /// Builds a profile from raw form fields, trimming each one.
    pub fn from_form(name: &str, phone: &str, email: &str) -> Result<Self, GameError> {
        let (name, phone, email) = (name.trim(), phone.trim(), email.trim());
        if name.is_empty() || phone.is_empty() || email.is_empty() {
            return Err(GameError::IncompleteRegistration);
        }
        Ok(Self {
            name: name.to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
        })
    }
}
