// Book server HTTP client
//
// Wraps `reqwest::Client` with URL construction against the fixed
// `/api/libros` resource path and shared response parsing. One HTTP
// call per logical operation; no retries, no envelope, plain JSON.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::book::Book;
use crate::error::Error;

/// Resource base path on the server, relative to the base URL.
const RESOURCE_PATH: &str = "api/libros";

/// Max bytes of a response body quoted in error messages.
const PREVIEW_LEN: usize = 200;

/// HTTP client for the book server's REST API.
///
/// Each method maps one logical operation onto one request and resolves
/// with the deserialized entity (or `()` for delete). Transport failures
/// and non-2xx responses surface as [`Error`]; nothing is retried.
pub struct BooksClient {
    http: reqwest::Client,
    base_url: Url,
}

impl BooksClient {
    /// Create a new client for the given server base URL.
    ///
    /// `base_url` is the server root (e.g. `http://localhost:8080`); the
    /// `/api/libros` path is appended per request.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("librero/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::Transport)?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The server base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// `{base}/api/libros`
    fn collection_url(&self) -> Url {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}/{RESOURCE_PATH}")).expect("invalid API URL")
    }

    /// `{base}/api/libros/{id}`
    fn item_url(&self, id: i64) -> Url {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}/{RESOURCE_PATH}/{id}")).expect("invalid API URL")
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Fetch all books, in server order. No pagination.
    pub async fn list(&self) -> Result<Vec<Book>, Error> {
        let url = self.collection_url();
        debug!("GET {url}");
        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        parse_response(resp, None).await
    }

    /// Fetch a single book by id. Fails with [`Error::NotFound`] if the
    /// server reports no such id.
    pub async fn get(&self, id: i64) -> Result<Book, Error> {
        let url = self.item_url(id);
        debug!("GET {url}");
        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        parse_response(resp, Some(id)).await
    }

    /// Create a book from a draft (no id in the payload). Resolves with
    /// the server-assigned copy, id included.
    pub async fn create(&self, draft: &Book) -> Result<Book, Error> {
        let url = self.collection_url();
        debug!("POST {url}");
        let resp = self
            .http
            .post(url)
            .json(draft)
            .send()
            .await
            .map_err(Error::Transport)?;
        parse_response(resp, None).await
    }

    /// Update the book at `id`. Resolves with the updated entity as
    /// echoed by the server.
    pub async fn update(&self, id: i64, draft: &Book) -> Result<Book, Error> {
        let url = self.item_url(id);
        debug!("PUT {url}");
        let resp = self
            .http
            .put(url)
            .json(draft)
            .send()
            .await
            .map_err(Error::Transport)?;
        parse_response(resp, Some(id)).await
    }

    /// Delete the book at `id`. Resolves with no payload on success.
    pub async fn delete(&self, id: i64) -> Result<(), Error> {
        let url = self.item_url(id);
        debug!("DELETE {url}");
        let resp = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::NotFound { id });
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(api_error(status, &body));
        }
        Ok(())
    }
}

/// Check the status and deserialize the JSON body.
///
/// `id` is the entity id targeted by the request, used to map a 404 onto
/// [`Error::NotFound`]; collection-level requests pass `None`.
async fn parse_response<T: DeserializeOwned>(
    resp: reqwest::Response,
    id: Option<i64>,
) -> Result<T, Error> {
    let status = resp.status();

    if status == reqwest::StatusCode::NOT_FOUND {
        if let Some(id) = id {
            return Err(Error::NotFound { id });
        }
    }

    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(api_error(status, &body));
    }

    let body = resp.text().await.map_err(Error::Transport)?;
    serde_json::from_str(&body).map_err(|e| {
        let preview = truncate_preview(&body, PREVIEW_LEN);
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body: body.clone(),
        }
    })
}

fn api_error(status: reqwest::StatusCode, body: &str) -> Error {
    Error::Api {
        status: status.as_u16(),
        message: truncate_preview(body, PREVIEW_LEN).to_owned(),
    }
}

/// Truncate to at most `max` bytes without splitting a UTF-8 character.
fn truncate_preview(body: &str, max: usize) -> &str {
    if body.len() <= max {
        return body;
    }
    let mut end = max;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
