//! Result type alias shared across the workspace.
//!
//! This module defines a convenient alias that defaults the error type to the
//! common `FetchError`, so fetch paths can simply return `Result<T>`.
use crate::error::FetchError;

/// Workspace-wide `Result` alias with `FetchError` as the default error.
pub type Result<T, E = FetchError> = std::result::Result<T, E>;
