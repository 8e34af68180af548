use std::fmt;
use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type RequestId = u64;

/// Echoed back with a list fetch so callers can drop superseded replies.
pub type ListGeneration = u64;

/// A contact as the server returns it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub emails: Vec<EmailRecord>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EmailRecord {
    /// Server-side row id; not used by the client.
    #[serde(default)]
    pub id: Option<u64>,
    pub email: String,
}

/// Request body for create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub first_name: String,
    pub last_name: String,
    pub emails: Vec<EmailBody>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailBody {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ContactsFetched {
        generation: ListGeneration,
        result: Result<Vec<ContactRecord>, ApiError>,
    },
    ContactFetched {
        id: u64,
        result: Result<ContactRecord, ApiError>,
    },
    ContactSaved {
        request: RequestId,
        result: Result<ContactRecord, ApiError>,
    },
    ContactDeleted {
        request: RequestId,
        result: Result<(), ApiError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
    /// The `error` field of a structured rejection body.
    pub server_message: Option<String>,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            server_message: None,
        }
    }

    pub(crate) fn rejected(status: u16, message: impl Into<String>, server: Option<String>) -> Self {
        Self {
            kind: FailureKind::ServerRejection { status },
            message: message.into(),
            server_message: server,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    /// Transport failure: unreachable host, refused connection, timeout.
    Network,
    /// Non-2xx answer.
    ServerRejection { status: u16 },
    /// 2xx answer whose body is not the expected JSON.
    Decode,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::ServerRejection { status } => write!(f, "server rejected request ({status})"),
            FailureKind::Decode => write!(f, "unexpected response body"),
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("could not start async runtime: {0}")]
    Runtime(#[from] io::Error),
    #[error("could not build api client: {0}")]
    Client(#[from] ApiError),
}
