//! Errors for renderer-agnostic scene parameters.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("Invalid frustum: {0}")]
    InvalidFrustum(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
