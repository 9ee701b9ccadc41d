// src/file/request.rs
use std::fs;
use std::path::Path;

use crate::errors::AnalysisError;

/// The file the user picked, read into memory ready for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl AnalysisRequest {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, AnalysisError> {
        let file_name = file_name.into();
        if bytes.is_empty() {
            return Err(AnalysisError::EmptyFile { file_name });
        }
        Ok(Self { file_name, bytes })
    }

    /// Reads the current selection. Nothing selected is an error, never an
    /// empty upload.
    pub fn from_selection(selection: Option<&Path>) -> Result<Self, AnalysisError> {
        let path = selection.ok_or(AnalysisError::NoFileSelected)?;

        let bytes = fs::read(path).map_err(|e| AnalysisError::FileRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.log".to_string());

        Self::new(file_name, bytes)
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_no_selection() {
        assert_eq!(
            AnalysisRequest::from_selection(None),
            Err(AnalysisError::NoFileSelected)
        );
    }

    #[test]
    fn test_reads_selected_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Failed password for root from 10.0.0.1 port 22 ssh2").unwrap();

        let request = AnalysisRequest::from_selection(Some(file.path())).unwrap();
        assert_eq!(request.size(), request.bytes.len());
        assert!(request.size() > 0);
        assert!(request.bytes.starts_with(b"Failed password"));
        assert_eq!(
            request.file_name,
            file.path().file_name().unwrap().to_string_lossy()
        );
    }

    #[test]
    fn test_empty_file_is_rejected() {
        let file = NamedTempFile::new().unwrap();
        let err = AnalysisRequest::from_selection(Some(file.path())).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyFile { .. }));
    }

    #[test]
    fn test_missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("auth.log");
        let err = AnalysisRequest::from_selection(Some(&missing)).unwrap_err();
        assert!(matches!(err, AnalysisError::FileRead { .. }));
    }
}
