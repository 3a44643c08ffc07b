//! Request/response envelope exchanged with the invoking HTTP gateway.
//!
//! The gateway hands over one [`GatewayRequest`] per call and expects one
//! [`GatewayResponse`] back. Field names follow the gateway's camelCase wire
//! format (`httpMethod`, `queryStringParameters`, `statusCode`,
//! `isBase64Encoded`).

use std::collections::{BTreeMap, HashMap};

use axum::body::Body;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Methods advertised to browsers in the preflight response.
pub const CORS_ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";

/// Request headers advertised to browsers in the preflight response.
pub const CORS_ALLOW_HEADERS: &str = "Content-Type, X-User-Id, X-Auth-Token";

/// Preflight cache lifetime, in seconds.
pub const CORS_MAX_AGE: &str = "86400";

/// Request body as delivered by the gateway: raw text still to be parsed,
/// or an already-structured JSON value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GatewayBody {
    Text(String),
    Json(serde_json::Value),
}

/// One inbound request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayRequest {
    #[serde(default = "default_method")]
    pub http_method: String,
    #[serde(default)]
    pub headers: Option<HashMap<String, String>>,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub body: Option<GatewayBody>,
}

fn default_method() -> String {
    "GET".to_string()
}

impl GatewayRequest {
    /// An empty request for `method`.
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            http_method: method.into(),
            headers: None,
            query_string_parameters: None,
            body: None,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_string_parameters
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: GatewayBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.as_ref().and_then(|headers| {
            headers
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.as_str())
        })
    }

    /// Query parameter lookup (exact key match).
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_string_parameters
            .as_ref()
            .and_then(|params| params.get(name))
            .map(String::as_str)
    }

    /// Deserialize the body into `T`.
    ///
    /// A missing or blank body is read as `{}`; malformed JSON or a shape
    /// mismatch is a bad request.
    pub fn json_body<T: DeserializeOwned>(&self) -> AppResult<T> {
        let parsed = match &self.body {
            None => serde_json::from_str("{}"),
            Some(GatewayBody::Text(raw)) if raw.trim().is_empty() => serde_json::from_str("{}"),
            Some(GatewayBody::Text(raw)) => serde_json::from_str(raw),
            Some(GatewayBody::Json(value)) => serde_json::from_value(value.clone()),
        };
        parsed.map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {e}")))
    }
}

/// One outbound response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl GatewayResponse {
    /// A JSON response with the standard content-type and CORS headers.
    pub fn json<T: Serialize>(status: StatusCode, payload: &T) -> Self {
        let (status, body) = match serde_json::to_string(payload) {
            Ok(body) => (status, body),
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize response body");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({ "error": e.to_string() }).to_string(),
                )
            }
        };

        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Access-Control-Allow-Origin".to_string(), "*".to_string());

        Self {
            status_code: status.as_u16(),
            headers,
            body,
            is_base64_encoded: false,
        }
    }

    /// The fixed, body-less answer to a CORS preflight.
    pub fn preflight() -> Self {
        let headers = BTreeMap::from([
            ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
            ("Access-Control-Allow-Methods".to_string(), CORS_ALLOW_METHODS.to_string()),
            ("Access-Control-Allow-Headers".to_string(), CORS_ALLOW_HEADERS.to_string()),
            ("Access-Control-Max-Age".to_string(), CORS_MAX_AGE.to_string()),
        ]);

        Self {
            status_code: StatusCode::OK.as_u16(),
            headers,
            body: String::new(),
            is_base64_encoded: false,
        }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for GatewayResponse {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = status;

        let headers = response.headers_mut();
        for (name, value) in &self.headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => tracing::warn!(header = %name, "Dropping unrepresentable response header"),
            }
        }

        response
    }
}
