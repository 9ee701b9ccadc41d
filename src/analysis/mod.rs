// src/analysis/mod.rs
pub mod submit;

// Re-export commonly used types
pub use submit::{Submitter, HttpTransport};
