use crate::entities::Lifecycle;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Standard success response
pub fn success_response<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

/// 404 with no body, used whenever an id does not resolve.
pub fn not_found_response() -> Response {
    StatusCode::NOT_FOUND.into_response()
}

/// Body returned by deactivate/reactivate/delete endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBody {
    pub message: String,
    pub id: i32,
    pub status: String,
}

impl StatusBody {
    pub fn new(message: impl Into<String>, id: i32, status: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            id,
            status: status.into(),
        }
    }

    pub fn lifecycle(message: impl Into<String>, id: i32, lifecycle: Lifecycle) -> Self {
        Self::new(message, id, lifecycle.status_label())
    }
}

/// Either the entity as JSON or an empty 404.
pub fn found_or_404<T: Serialize>(value: Option<T>) -> Response {
    match value {
        Some(value) => success_response(value),
        None => not_found_response(),
    }
}

/// An id that clients may send either as a JSON number or as a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FlexibleId {
    Number(i64),
    Text(String),
}

impl FlexibleId {
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            FlexibleId::Number(n) => i32::try_from(*n).ok(),
            FlexibleId::Text(s) => s.trim().parse().ok(),
        }
    }
}
