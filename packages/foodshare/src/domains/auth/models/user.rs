use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::common::MemberId;
use crate::error::{FoodShareError, Result};

/// What a member does on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Publishes surplus food
    Donor,
    /// Shelter or NGO that reserves and collects food
    Shelter,
    Admin,
}

impl UserRole {
    fn as_str(&self) -> &'static str {
        match self {
            UserRole::Donor => "donor",
            UserRole::Shelter => "shelter",
            UserRole::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = FoodShareError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "donor" => Ok(UserRole::Donor),
            "shelter" => Ok(UserRole::Shelter),
            "admin" => Ok(UserRole::Admin),
            other => Err(FoodShareError::Validation(format!("unknown role: {}", other))),
        }
    }
}

/// A signed-in member. This is also the persisted session record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: MemberId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Free-text home area, e.g. "São Paulo, SP"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// About the donor, or about the shelter's work
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl User {
    pub fn new(
        id: MemberId,
        name: impl Into<String>,
        email: impl Into<String>,
        role: UserRole,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            role,
            avatar: None,
            location: None,
            phone: None,
            bio: None,
        }
    }

    pub fn is_donor(&self) -> bool {
        self.role == UserRole::Donor
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// First word of the display name, for greetings.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

/// Sign-up form.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

impl Registration {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        role: UserRole,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            role,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(FoodShareError::Validation("name is required".to_string()));
        }
        validate_credentials(&self.email, &self.password)
    }
}

/// Profile page edits. `None` keeps the current value; a blank optional
/// field (location, phone, bio) clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
}

impl ProfileUpdate {
    pub fn apply_to(&self, user: &User) -> Result<User> {
        let mut updated = user.clone();

        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(FoodShareError::Validation("name is required".to_string()));
            }
            updated.name = name.trim().to_string();
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
            updated.email = email.trim().to_string();
        }
        if let Some(location) = &self.location {
            updated.location = non_blank(location);
        }
        if let Some(phone) = &self.phone {
            updated.phone = non_blank(phone);
        }
        if let Some(bio) = &self.bio {
            updated.bio = non_blank(bio);
        }

        Ok(updated)
    }
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Shape checks only; there is no real credential verification.
pub fn validate_credentials(email: &str, password: &str) -> Result<()> {
    validate_email(email)?;
    if password.is_empty() {
        return Err(FoodShareError::Validation("password is required".to_string()));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<()> {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(FoodShareError::Validation(format!("invalid email: {}", email))),
    }
}
