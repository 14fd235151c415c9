// ── Session user ──
//
// Record returned by `POST /admins/login`. Not a cached collection: it
// lives in the auth sub-state only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub gender: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Greeting name: the display name when set, "admin" otherwise.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("admin")
    }

    /// Merge a local profile edit onto this user.
    pub fn apply(&mut self, patch: UserPatch) {
        let UserPatch {
            name,
            gender,
            phone,
            bio,
            avatar_url,
            city,
            country,
            address,
        } = patch;

        if name.is_some() {
            self.name = name;
        }
        if let Some(gender) = gender {
            self.gender = gender;
        }
        if phone.is_some() {
            self.phone = phone;
        }
        if bio.is_some() {
            self.bio = bio;
        }
        if avatar_url.is_some() {
            self.avatar_url = avatar_url;
        }
        if city.is_some() {
            self.city = city;
        }
        if country.is_some() {
            self.country = country;
        }
        if address.is_some() {
            self.address = address;
        }
    }
}

/// Local profile edit. Identity, email, role, and timestamps are not editable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub address: Option<String>,
}
