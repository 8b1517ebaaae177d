//! Unified application error type.
//! Every pipeline stage returns `AppResult<T>`; producer boundaries decide
//! which of these degrade to an empty report.

use crate::models::report_kind::ReportKind;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / encoding
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Extraction / classification
    // ---------------------------
    #[error("Extraction failed for {kind} report: {reason}")]
    Extraction { kind: ReportKind, reason: String },

    #[error("No usable hour columns in {0} report")]
    NoUsableColumns(ReportKind),

    #[error("Missing column {index} in {kind} report")]
    MissingColumn { kind: ReportKind, index: usize },

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date/time: {0}")]
    InvalidDateTime(String),

    // ---------------------------
    // Presence registry
    // ---------------------------
    #[error("Presence lock error: {0}")]
    Lock(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
