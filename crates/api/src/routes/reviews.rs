//! Axum adapter in front of the review handler.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, Method};

use crate::error::AppError;
use crate::gateway::{GatewayBody, GatewayRequest, GatewayResponse};
use crate::handlers::reviews::handle;
use crate::state::AppState;

/// ANY /api/v1/reviews
///
/// Repackages the HTTP request as a [`GatewayRequest`] and returns the
/// handler's [`GatewayResponse`] unchanged. A body that is not UTF-8 is
/// decoded lossily and left for the handler's JSON parsing to reject.
pub async fn reviews(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
    body: Bytes,
) -> GatewayResponse {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            return AppError::BadRequest(rejection.body_text()).into();
        }
    };

    let body = String::from_utf8_lossy(&body).into_owned();
    let request = to_gateway_request(&method, &headers, query, body);
    handle(&state, request).await
}

fn to_gateway_request(
    method: &Method,
    headers: &HeaderMap,
    query: HashMap<String, String>,
    body: String,
) -> GatewayRequest {
    let headers: HashMap<String, String> = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();

    GatewayRequest {
        http_method: method.as_str().to_string(),
        headers: (!headers.is_empty()).then_some(headers),
        query_string_parameters: (!query.is_empty()).then_some(query),
        body: (!body.is_empty()).then_some(GatewayBody::Text(body)),
    }
}
