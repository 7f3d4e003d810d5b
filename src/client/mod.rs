pub mod auth;

use std::sync::Arc;

use bytes::Bytes;
use reqwest::{header, multipart::Form, Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{Error, Result, GENERIC_ERROR_MESSAGE};
use auth::{bearer_value, should_force_logout, TokenStore};

/// `{ success, data, message }` wrapper most backend endpoints answer with.
#[derive(Debug, Clone)]
pub struct Envelope<T> {
    pub data: T,
    pub message: Option<String>,
    pub raw: JsonValue,
}

/// Blob pulled from a download endpoint.
#[derive(Debug, Clone)]
pub struct Download {
    pub bytes: Bytes,
    pub content_type: Option<String>,
    pub filename: Option<String>,
}

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: url::Url,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(config: &Config, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        let http = Client::builder().timeout(config.http_timeout).build()?;
        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
            tokens,
        })
    }

    pub fn base_url(&self) -> &url::Url {
        &self.base_url
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    pub fn endpoint(&self, path: &str) -> Result<url::Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Absolute URL for a backend-served file, with the session token appended
    /// so it can be opened outside of an authenticated request.
    pub fn signed_file_url(&self, reference: &str) -> Result<url::Url> {
        let mut url = match url::Url::parse(reference) {
            Ok(url) => url,
            Err(_) => {
                let mut origin = self.base_url.clone();
                origin.set_path("/");
                origin.join(reference.trim_start_matches('/'))?
            }
        };
        if let Some(token) = self.tokens.token() {
            url.query_pairs_mut().append_pair("token", &token);
        }
        Ok(url)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let req = self.request(Method::GET, path)?;
        Ok(self.send(req, path).await?.data)
    }

    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let req = self.request(Method::GET, path)?.query(query);
        Ok(self.send(req, path).await?.data)
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        Ok(self.post_envelope(path, body).await?.data)
    }

    pub async fn post_envelope<T, B>(&self, path: &str, body: &B) -> Result<Envelope<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let req = self.request(Method::POST, path)?.json(body);
        self.send(req, path).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        Ok(self.put_envelope(path, body).await?.data)
    }

    pub async fn put_envelope<T, B>(&self, path: &str, body: &B) -> Result<Envelope<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let req = self.request(Method::PUT, path)?.json(body);
        self.send(req, path).await
    }

    pub async fn patch<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let req = self.request(Method::PATCH, path)?.json(body);
        Ok(self.send(req, path).await?.data)
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let req = self.request(Method::DELETE, path)?;
        Ok(self.send(req, path).await?.data)
    }

    pub async fn delete_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let req = self.request(Method::DELETE, path)?.query(query);
        Ok(self.send(req, path).await?.data)
    }

    pub async fn post_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T> {
        let req = self.request(Method::POST, path)?.multipart(form);
        Ok(self.send(req, path).await?.data)
    }

    pub async fn download(&self, path: &str) -> Result<Download> {
        let req = self.request(Method::GET, path)?;
        let response = self.execute(req, path).await?;
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let filename = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(filename_from_disposition);
        let bytes = response.bytes().await?;
        debug!(path, size = bytes.len(), "download finished");
        Ok(Download {
            bytes,
            content_type,
            filename,
        })
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.endpoint(path)?;
        debug!(method = method.as_str(), url = url.as_str(), "api request");
        let mut builder = self.http.request(method, url);
        if let Some(token) = self.tokens.token() {
            builder = builder.header(header::AUTHORIZATION, bearer_value(&token));
        }
        Ok(builder)
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder, path: &str) -> Result<Envelope<T>> {
        let response = self.execute(req, path).await?;
        let text = response.text().await?;
        let raw: JsonValue = if text.trim().is_empty() {
            JsonValue::Null
        } else {
            serde_json::from_str(&text)?
        };
        unwrap_envelope(raw)
    }

    async fn execute(&self, req: RequestBuilder, path: &str) -> Result<Response> {
        let had_token = self.tokens.token().is_some();
        let response = req.send().await.map_err(|err| {
            warn!(path, error = %err, "request failed to complete");
            Error::Http(err)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let details: JsonValue = serde_json::from_str(&body).unwrap_or(JsonValue::Null);
        let backend_message = extract_message(&details);
        let message = backend_message
            .clone()
            .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());

        if status == StatusCode::UNAUTHORIZED {
            if should_force_logout(path, had_token) {
                warn!(path, "unauthorized response, clearing stored credentials");
                self.tokens.clear()?;
                return Err(Error::SessionExpired(backend_message));
            }
            warn!(path, "unauthorized response on non-auth endpoint, keeping session");
            return Err(Error::Unauthorized(message));
        }

        warn!(path, status = status.as_u16(), %message, "api error");
        Err(Error::api_with_details(status, message, details))
    }
}

fn unwrap_envelope<T: DeserializeOwned>(raw: JsonValue) -> Result<Envelope<T>> {
    let message = raw
        .get("message")
        .and_then(JsonValue::as_str)
        .map(str::to_string);
    let payload = match &raw {
        JsonValue::Object(map) if map.contains_key("data") => map["data"].clone(),
        JsonValue::Object(map) if map.contains_key("success") => JsonValue::Null,
        other => other.clone(),
    };
    let data = serde_json::from_value(payload)?;
    Ok(Envelope { data, message, raw })
}

/// Backend error text: `message`, then `error`, nested under `data` if needed.
pub fn extract_message(body: &JsonValue) -> Option<String> {
    let direct = ["message", "error"]
        .iter()
        .find_map(|key| body.get(*key).and_then(JsonValue::as_str));
    direct
        .or_else(|| body.get("data").and_then(|d| d.get("message")).and_then(JsonValue::as_str))
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

fn filename_from_disposition(value: &str) -> Option<String> {
    value.split(';').map(str::trim).find_map(|part| {
        part.strip_prefix("filename=")
            .map(|name| name.trim_matches('"').to_string())
            .filter(|name| !name.is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_accepts_wrapped_and_bare_payloads() {
        let wrapped: Envelope<Vec<u32>> =
            unwrap_envelope(json!({"success": true, "data": [1, 2], "message": "ok"})).unwrap();
        assert_eq!(wrapped.data, vec![1, 2]);
        assert_eq!(wrapped.message.as_deref(), Some("ok"));

        let bare: Envelope<Vec<u32>> = unwrap_envelope(json!([3])).unwrap();
        assert_eq!(bare.data, vec![3]);

        let ack: Envelope<()> = unwrap_envelope(json!({"success": true, "message": "Deleted"})).unwrap();
        assert_eq!(ack.message.as_deref(), Some("Deleted"));
    }

    #[test]
    fn error_message_prefers_message_then_error() {
        assert_eq!(
            extract_message(&json!({"message": "Position not found"})).as_deref(),
            Some("Position not found")
        );
        assert_eq!(extract_message(&json!({"error": "bad"})).as_deref(), Some("bad"));
        assert_eq!(extract_message(&json!({"message": ""})), None);
        assert_eq!(extract_message(&JsonValue::Null), None);
    }

    #[test]
    fn disposition_filename_is_extracted() {
        assert_eq!(
            filename_from_disposition("attachment; filename=\"resume.pdf\"").as_deref(),
            Some("resume.pdf")
        );
        assert_eq!(filename_from_disposition("inline"), None);
    }
}
