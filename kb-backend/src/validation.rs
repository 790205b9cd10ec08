//! Request validation — one function per endpoint body.
//!
//! Rules are checked in field order and the first failure wins, so clients
//! always get a single, stable message.

use kb_types::{LoginRequest, NewQuery, NewQueryRequest, Topic};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

pub const MAX_TITLE_CHARS: usize = 100;
pub const MAX_DETAILS_CHARS: usize = 500;
pub const MAX_ANSWER_CHARS: usize = 1000;

static EMPLOYEE_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^EMP\d{5}$").expect("employee id pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    fn new(msg: &str) -> Self {
        Self(msg.to_string())
    }
}

/// Login input that passed structural checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub employee_id: String,
    pub password: String,
}

pub fn is_valid_employee_id(employee_id: &str) -> bool {
    EMPLOYEE_ID_RE.is_match(employee_id)
}

pub fn validate_login(req: &LoginRequest) -> Result<Credentials, ValidationError> {
    if req.employee_id.is_empty() {
        return Err(ValidationError::new("Employee ID is required"));
    }
    if !is_valid_employee_id(&req.employee_id) {
        return Err(ValidationError::new(
            "Employee ID must be in format EMP followed by 5 digits",
        ));
    }
    if req.password.is_empty() {
        return Err(ValidationError::new("Password is required"));
    }

    Ok(Credentials {
        employee_id: req.employee_id.clone(),
        password: req.password.clone(),
    })
}

fn check_text(
    value: &str,
    max_chars: usize,
    required_msg: &str,
    too_long_msg: &str,
) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new(required_msg));
    }
    if value.chars().count() > max_chars {
        return Err(ValidationError::new(too_long_msg));
    }
    Ok(())
}

/// Validate a new entry. `author` comes from the session; any
/// `employeeId` in the body is discarded.
pub fn validate_new_query(req: &NewQueryRequest, author: &str) -> Result<NewQuery, ValidationError> {
    check_text(&req.title, MAX_TITLE_CHARS, "Title is required", "Title is too long")?;
    check_text(
        &req.details,
        MAX_DETAILS_CHARS,
        "Details are required",
        "Details are too long",
    )?;
    check_text(
        &req.answer,
        MAX_ANSWER_CHARS,
        "Answer is required",
        "Answer is too long",
    )?;
    let topic =
        Topic::from_str(&req.topic).ok_or_else(|| ValidationError::new("Please select a topic"))?;

    Ok(NewQuery {
        title: req.title.clone(),
        details: req.details.clone(),
        answer: req.answer.clone(),
        topic,
        employee_id: author.to_string(),
    })
}
