//! Remote API Clients
//!
//! HTTP bindings to the todo and auth endpoints, organized by domain.

mod auth;
mod todos;

use gloo_net::http::{RequestBuilder, Response};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::de::DeserializeOwned;

use crate::error::{ApiError, ApiResult};

// Re-export all public items
pub use auth::*;
pub use todos::*;

/// Characters that cannot appear raw inside one URL path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

pub fn encode_path_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// Attach the bearer token, if any
fn authorized(builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

/// Fail on any non-2xx status
fn ensure_success(response: Response) -> ApiResult<Response> {
    if response.ok() {
        Ok(response)
    } else {
        Err(ApiError::Status(response.status()))
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    Ok(ensure_success(response)?.json::<T>().await?)
}

/// Like [`read_json`], but an empty body is `None`
async fn read_optional_json<T: DeserializeOwned>(response: Response) -> ApiResult<Option<T>> {
    let body = ensure_success(response)?.text().await?;
    parse_optional_body(&body)
}

fn parse_optional_body<T: DeserializeOwned>(body: &str) -> ApiResult<Option<T>> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(body)?))
}
