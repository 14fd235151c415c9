// Admin authentication
//
// Email/password login against `POST /admins/login`. The backend answers
// with the admin's user record; there is no session token to keep, so
// logout is purely client-side state.

use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use crate::client::{ApiClient, error_message};
use crate::error::Error;

/// Path of the login endpoint, relative to the API root.
pub const LOGIN_PATH: &str = "admins/login";

impl ApiClient {
    /// Authenticate an admin by email and password.
    ///
    /// Returns the decoded user record. A rejected login carries the
    /// backend's `message` when present, `"Login failed"` otherwise. A
    /// success response without an `id` is treated as a rejected login.
    pub async fn login<T: DeserializeOwned>(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<T, Error> {
        let url = self.resource_url(LOGIN_PATH)?;
        debug!("logging in at {}", url);

        let body = json!({
            "email": email,
            "password": password.expose_secret(),
        });

        let resp = self.send(self.http().post(url).json(&body)).await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                message: error_message(&body).unwrap_or_else(|| "Login failed".into()),
            });
        }

        let value: serde_json::Value = self.parse_json(resp).await?;
        let has_id = value
            .get("id")
            .is_some_and(|id| !id.is_null() && id.as_str() != Some(""));
        if !has_id {
            return Err(Error::Authentication {
                message: "Invalid login response".into(),
            });
        }

        let user = serde_json::from_value(value.clone()).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: value.to_string(),
        })?;

        debug!("login successful");
        Ok(user)
    }
}
