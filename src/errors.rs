// src/errors.rs
//! Failure taxonomy for one analysis run.
//!
//! Every variant ends up as the single message shown in the error banner, so
//! `Display` is written for the user. `category()` is only used for logging.

use thiserror::Error;

/// Shown when the server fails without telling us why.
pub const SERVER_FALLBACK_MESSAGE: &str = "Error en el servidor";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Http,
    Network,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorCategory::Input => "input",
            ErrorCategory::Http => "http",
            ErrorCategory::Network => "network",
        };
        f.write_str(s)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    // ------------------------ Input / Validation ----------------------------
    #[error("No se seleccionó ningún archivo")]
    NoFileSelected,

    #[error("El archivo {file_name} está vacío")]
    EmptyFile { file_name: String },

    #[error("No se pudo leer {path}: {reason}")]
    FileRead { path: String, reason: String },

    // ------------------------ Server ----------------------------------------
    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("{message}")]
    MalformedResponse { message: String },

    // ------------------------ Transport -------------------------------------
    #[error("{message}")]
    Network { message: String },
}

impl AnalysisError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AnalysisError::NoFileSelected
            | AnalysisError::EmptyFile { .. }
            | AnalysisError::FileRead { .. } => ErrorCategory::Input,
            AnalysisError::Http { .. } | AnalysisError::MalformedResponse { .. } => {
                ErrorCategory::Http
            }
            AnalysisError::Network { .. } => ErrorCategory::Network,
        }
    }

    pub fn http(status: u16, message: Option<String>) -> Self {
        AnalysisError::Http {
            status,
            message: message.unwrap_or_else(|| SERVER_FALLBACK_MESSAGE.to_string()),
        }
    }
}

impl From<reqwest::Error> for AnalysisError {
    fn from(err: reqwest::Error) -> Self {
        AnalysisError::Network { message: err.to_string() }
    }
}
