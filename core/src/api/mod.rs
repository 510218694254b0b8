//! Transport-free `/api/*` request handling
//!
//! ## Routes
//!
//! - `GET /api/bosses` - Roster with effective enablement
//! - `POST /api/toggle/{boss}` - Flip a boss's enablement override
//! - `GET /api/generate` - New pending challenge, 400 if no boss is enabled
//! - `POST /api/complete` - Record `{boss, kills}` as completed
//! - `GET /api/history` - Most recent entries, oldest first
//! - `DELETE /api/history/{index}` - Delete by position in the `GET /api/history` list
//! - `DELETE /api/history/entry/{seq}` - Delete by sequence number
//!
//! A server front-end only needs to turn its HTTP request into an
//! [`ApiRequest`] and write back the [`ApiResponse`] status and JSON body.

mod routes;

pub use routes::{ApiRoute, dispatch, status_for};

use bosskill_types::ErrorResponse;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Option<String>) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body,
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            path: path.into(),
            body: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    /// 200 with `data` serialized as JSON
    pub fn ok<T: Serialize>(data: &T) -> Self {
        match serde_json::to_value(data) {
            Ok(body) => Self { status: 200, body },
            Err(e) => Self::error(500, &e.to_string()),
        }
    }

    /// Non-2xx status with an `{error}` body
    pub fn error(status: u16, message: &str) -> Self {
        let body = serde_json::to_value(ErrorResponse {
            error: message.to_string(),
        })
        .unwrap_or(Value::Null);
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
