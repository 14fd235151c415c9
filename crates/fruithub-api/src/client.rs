// Backend HTTP client
//
// Wraps `reqwest::Client` with resource URL construction, status-code
// translation, and JSON decoding. Endpoint groups that need extra handling
// (login) live in sibling modules as inherent methods.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Error payload shape returned by the backend on rejected requests.
#[derive(serde::Deserialize)]
struct ErrorPayload {
    message: Option<String>,
    error: Option<String>,
}

/// Raw HTTP client for the Fruithub backend.
///
/// Every resource is addressed as `{base_url}/{resource}` and
/// `{base_url}/{resource}/{id}`. Non-success statuses are mapped into
/// [`Error`] before the caller sees the body.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    timeout_secs: u64,
}

impl ApiClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// `base_url` is the API root, e.g. `https://cms.example.com/api`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            timeout_secs: transport.timeout.as_secs(),
        })
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            timeout_secs: TransportConfig::default().timeout.as_secs(),
        }
    }

    /// The API root URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/{resource}`.
    pub(crate) fn resource_url(&self, resource: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let resource = resource.trim_matches('/');
        Ok(Url::parse(&format!("{base}/{resource}"))?)
    }

    /// Build `{base}/{resource}/{id}` with the id percent-encoded as one segment.
    pub(crate) fn item_url(&self, resource: &str, id: &str) -> Result<Url, Error> {
        let mut url = self.resource_url(resource)?;
        url.path_segments_mut()
            .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .push(id);
        Ok(url)
    }

    // ── Resource operations ──────────────────────────────────────────

    /// `GET /{resource}`: fetch a full collection or aggregate object.
    pub async fn fetch<T: DeserializeOwned>(&self, resource: &str) -> Result<T, Error> {
        let url = self.resource_url(resource)?;
        debug!("GET {}", url);

        let resp = self.send(self.http.get(url)).await?;
        self.parse_json(resp).await
    }

    /// `POST /{resource}`: create a record, returning the canonical copy.
    pub async fn create<B, T>(&self, resource: &str, body: &B) -> Result<T, Error>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.resource_url(resource)?;
        debug!("POST {}", url);

        let resp = self.send(self.http.post(url).json(body)).await?;
        self.parse_json(resp).await
    }

    /// `PUT /{resource}/{id}`: apply a partial patch, returning the canonical copy.
    pub async fn update<B, T>(&self, resource: &str, id: &str, body: &B) -> Result<T, Error>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.item_url(resource, id)?;
        debug!("PUT {}", url);

        let resp = self.send(self.http.put(url).json(body)).await?;
        self.parse_json(resp).await
    }

    /// `DELETE /{resource}/{id}`. Any success status counts; the body is ignored.
    pub async fn delete(&self, resource: &str, id: &str) -> Result<(), Error> {
        let url = self.item_url(resource, id)?;
        debug!("DELETE {}", url);

        let resp = self.send(self.http.delete(url)).await?;
        let _ = self.check_status(resp).await?;
        Ok(())
    }

    // ── Response handling ────────────────────────────────────────────

    /// Send a request, folding reqwest timeouts into [`Error::Timeout`].
    pub(crate) async fn send(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, Error> {
        builder.send().await.map_err(|e| self.transport_error(e))
    }

    pub(crate) fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            Error::Transport(err)
        }
    }

    /// Map non-success statuses into errors, returning the response otherwise.
    async fn check_status(&self, resp: reqwest::Response) -> Result<reqwest::Response, Error> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let path = resp.url().path().to_owned();
        let body = resp.text().await.unwrap_or_default();
        trace!(%status, body = %preview(&body), "rejected response");

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::NotFound { path });
        }

        let message = error_message(&body).unwrap_or_else(|| preview(&body).to_owned());

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(Error::Authentication { message });
        }

        Err(Error::Api {
            status: status.as_u16(),
            message: if message.is_empty() {
                format!("HTTP {status}")
            } else {
                message
            },
        })
    }

    /// Check the status, then decode the JSON body into `T`.
    pub(crate) async fn parse_json<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let resp = self.check_status(resp).await?;
        let body = resp.text().await.map_err(|e| self.transport_error(e))?;

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(&body)),
            body,
        })
    }
}

/// Extract the human-readable message from a backend error payload.
pub(crate) fn error_message(body: &str) -> Option<String> {
    let payload: ErrorPayload = serde_json::from_str(body).ok()?;
    payload.message.or(payload.error).filter(|m| !m.is_empty())
}

fn preview(body: &str) -> &str {
    let mut end = body.len().min(200);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::with_client(reqwest::Client::new(), Url::parse(base).unwrap())
    }

    #[test]
    fn resource_url_joins_without_double_slash() {
        let c = client("http://localhost:4000/api/");
        assert_eq!(
            c.resource_url("/products").unwrap().as_str(),
            "http://localhost:4000/api/products"
        );
    }

    #[test]
    fn item_url_encodes_id_as_single_segment() {
        let c = client("http://localhost:4000");
        assert_eq!(
            c.item_url("categories", "a/b c").unwrap().as_str(),
            "http://localhost:4000/categories/a%2Fb%20c"
        );
    }

    #[test]
    fn error_message_prefers_message_field() {
        assert_eq!(
            error_message(r#"{"message":"Slug already taken","error":"Conflict"}"#).as_deref(),
            Some("Slug already taken")
        );
        assert_eq!(error_message(r#"{"error":"Bad Request"}"#).as_deref(), Some("Bad Request"));
        assert_eq!(error_message("<html>oops</html>"), None);
    }

    #[test]
    fn preview_respects_char_boundaries() {
        let body = "é".repeat(150);
        assert!(preview(&body).len() <= 200);
    }
}
