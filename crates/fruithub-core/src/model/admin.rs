// ── Admin account types ──
//
// Dashboard operators. The backend may echo a password hash on reads;
// it is not part of the model and never reaches the snapshot cache.

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};

use super::Record;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Admin {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAdmin {
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "expose_password"
    )]
    pub password: Option<SecretString>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "expose_password"
    )]
    pub password: Option<SecretString>,
}

/// Request bodies are the only place a password leaves its `SecretString`.
#[allow(clippy::ref_option)]
fn expose_password<S: Serializer>(
    password: &Option<SecretString>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match password {
        Some(secret) => serializer.serialize_str(secret.expose_secret()),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn password_echo_is_dropped_on_read() {
        let admin: Admin = serde_json::from_value(json!({
            "id": "a1",
            "name": "Ops",
            "email": "ops@fruithub.io",
            "role": "admin",
            "status": "active",
            "password": "$2b$10$hash",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        }))
        .unwrap();

        let round = serde_json::to_value(&admin).unwrap();
        assert!(round.get("password").is_none());
    }

    #[test]
    fn new_admin_sends_password_in_body_only() {
        let draft = NewAdmin {
            name: "Ops".into(),
            email: "ops@fruithub.io".into(),
            role: "admin".into(),
            status: None,
            phone: None,
            password: Some(SecretString::from("s3cret".to_string())),
        };

        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            json!({
                "name": "Ops",
                "email": "ops@fruithub.io",
                "role": "admin",
                "password": "s3cret"
            })
        );
        assert!(!format!("{draft:?}").contains("s3cret"));
    }
}
