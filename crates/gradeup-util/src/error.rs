//! Error types for gradeup

use chrono::NaiveDate;
use thiserror::Error;

use crate::SessionId;

/// Core error type for gradeup operations
#[derive(Debug, Error)]
pub enum GradeUpError {
    #[error("No study plan for {0}")]
    PlanNotFound(NaiveDate),

    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Store error: {0}")]
    StoreError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl GradeUpError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::StoreError(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, GradeUpError>;
