use bosskill_types::{Challenge, CompleteRequest, SuccessResponse};

use super::{ApiRequest, ApiResponse, Method};
use crate::challenge::ChallengeError;
use crate::context::{Tracker, TrackerError};

/// Parsed `/api/*` route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRoute {
    Bosses,
    Toggle { boss: String },
    Generate,
    Complete,
    History,
    DeleteAt { index: String },
    DeleteEntry { seq: String },
}

impl ApiRoute {
    /// Match a method and path. Query strings are ignored and path segments
    /// are percent-decoded.
    pub fn parse(method: Method, path: &str) -> Option<Self> {
        let path = path.split('?').next().unwrap_or_default();
        let stripped = path.strip_prefix("/api/")?.trim_end_matches('/');
        let parts: Vec<&str> = stripped.split('/').collect();

        let route = match (method, parts.as_slice()) {
            (Method::Get, ["bosses"]) => Self::Bosses,
            (Method::Post, ["toggle", boss]) => Self::Toggle {
                boss: decode(boss)?,
            },
            (Method::Get, ["generate"]) => Self::Generate,
            (Method::Post, ["complete"]) => Self::Complete,
            (Method::Get, ["history"]) => Self::History,
            (Method::Delete, ["history", "entry", seq]) => Self::DeleteEntry {
                seq: decode(seq)?,
            },
            (Method::Delete, ["history", index]) => Self::DeleteAt {
                index: decode(index)?,
            },
            _ => return None,
        };
        Some(route)
    }
}

fn decode(segment: &str) -> Option<String> {
    if segment.is_empty() {
        return None;
    }
    urlencoding::decode(segment).ok().map(|s| s.into_owned())
}

/// HTTP status for a tracker failure
pub fn status_for(error: &TrackerError) -> u16 {
    if let Some(history) = error.history() {
        return if history.is_not_found() { 404 } else { 500 };
    }
    match error {
        TrackerError::Challenge(ChallengeError::NoEligibleBosses) => 400,
        TrackerError::InvalidChallenge { .. } => 400,
        _ => 500,
    }
}

fn failure(error: TrackerError) -> ApiResponse {
    let status = status_for(&error);
    if status >= 500 {
        tracing::error!(error = ?error, "API request failed");
    } else {
        tracing::debug!(%error, status, "API request rejected");
    }
    ApiResponse::error(status, &error.to_string())
}

fn success(enabled: Option<bool>) -> ApiResponse {
    ApiResponse::ok(&SuccessResponse {
        success: true,
        enabled,
    })
}

/// Handle one request against `tracker`
pub async fn dispatch(tracker: &mut Tracker, request: &ApiRequest) -> ApiResponse {
    let Some(route) = ApiRoute::parse(request.method, &request.path) else {
        tracing::debug!(method = ?request.method, path = %request.path, "No matching route");
        return ApiResponse::error(404, "not found");
    };

    match route {
        ApiRoute::Bosses => match tracker.bosses() {
            Ok(bosses) => ApiResponse::ok(&bosses),
            Err(e) => failure(e),
        },
        ApiRoute::Toggle { boss } => match tracker.toggle(&boss) {
            Ok(enabled) => success(Some(enabled)),
            Err(e) => failure(e),
        },
        ApiRoute::Generate => match tracker.generate() {
            Ok(challenge) => ApiResponse::ok(&challenge),
            Err(e) => failure(e),
        },
        ApiRoute::Complete => {
            let body = request.body.as_deref().unwrap_or_default();
            let parsed: CompleteRequest = match serde_json::from_str(body) {
                Ok(parsed) => parsed,
                Err(e) => return ApiResponse::error(400, &format!("invalid body: {e}")),
            };
            let challenge = Challenge {
                boss: parsed.boss,
                kills: parsed.kills,
            };
            match tracker.record(challenge).await {
                Ok(_) => success(None),
                Err(e) => failure(e),
            }
        }
        ApiRoute::History => match tracker.recent_history().await {
            Ok(entries) => ApiResponse::ok(&entries),
            Err(e) => failure(e),
        },
        ApiRoute::DeleteAt { index } => {
            let Ok(index) = index.parse::<usize>() else {
                return ApiResponse::error(400, &format!("invalid history index '{index}'"));
            };
            match tracker.delete_recent_at(index).await {
                Ok(_) => success(None),
                Err(e) => failure(e),
            }
        }
        ApiRoute::DeleteEntry { seq } => {
            let Ok(seq) = seq.parse::<u64>() else {
                return ApiResponse::error(400, &format!("invalid sequence number '{seq}'"));
            };
            match tracker.delete_entry(seq).await {
                Ok(_) => success(None),
                Err(e) => failure(e),
            }
        }
    }
}
