//! Shared types for the knowledge-base backend and its HTTP clients.
//!
//! Field names follow the JSON wire format (`employeeId`, `isAuthenticated`)
//! so the same structs serve the store files and the REST API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// =====================================================
// Domain Types
// =====================================================

/// Subject area of a knowledge entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    Technical,
    Process,
    Hr,
    Tools,
}

impl Topic {
    pub const ALL: [Topic; 4] = [Topic::Technical, Topic::Process, Topic::Hr, Topic::Tools];

    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Technical => "technical",
            Topic::Process => "process",
            Topic::Hr => "hr",
            Topic::Tools => "tools",
        }
    }

    /// Exact, case-sensitive parse of the wire name
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "technical" => Some(Topic::Technical),
            "process" => Some(Topic::Process),
            "hr" => Some(Topic::Hr),
            "tools" => Some(Topic::Tools),
            _ => None,
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An employee login account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,
    pub employee_id: String,
    pub password: String,
}

/// Fields needed to register a new account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub employee_id: String,
    pub password: String,
}

/// A question/answer knowledge entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    pub id: i64,
    pub title: String,
    pub details: String,
    pub answer: String,
    pub topic: Topic,
    /// Author, matches `Account::employee_id`
    pub employee_id: String,
    /// Set once by the server at creation
    pub date: DateTime<Utc>,
}

/// A validated entry ready to be stored (id and date are assigned by the store)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuery {
    pub title: String,
    pub details: String,
    pub answer: String,
    pub topic: Topic,
    pub employee_id: String,
}

// =====================================================
// Request Types
// =====================================================

/// Body of `POST /api/login`
///
/// Missing fields deserialize as empty strings so they surface as
/// validation messages rather than JSON errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginRequest {
    pub employee_id: String,
    pub password: String,
    /// Entered by the user in the login form; checked client side only
    pub captcha: Option<String>,
}

/// Body of `POST /api/queries`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewQueryRequest {
    pub title: String,
    pub details: String,
    pub answer: String,
    pub topic: String,
    /// Ignored by the server; the author is always the session identity
    pub employee_id: Option<String>,
}

/// Query string of `GET /api/queries`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryListParams {
    pub search: Option<String>,
    pub topic: Option<String>,
    pub employee: Option<String>,
    pub date: Option<String>,
}

// =====================================================
// Response Types
// =====================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub employee_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthCheckResponse {
    pub is_authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
}

/// Envelope used for errors and plain acknowledgements
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
