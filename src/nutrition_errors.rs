//! # Nutrition Error Types Module
//!
//! This module defines the error types used around nutrition parsing.
//! The parsing pipeline itself never fails; these errors describe why a single
//! record was rejected, or why a caller could not obtain the nutrition text.

/// Reasons a candidate nutrient record is rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// The name is empty after trimming
    EmptyName,
    /// The name is the column header token "ingredient"
    HeaderName,
    /// The name contains table decoration such as a run of dashes
    DividerArtifact,
    /// The value does not parse as an integer or decimal number
    NonNumericValue(String),
}

impl std::fmt::Display for RecordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordError::EmptyName => write!(f, "Nutrient name is empty"),
            RecordError::HeaderName => write!(f, "Nutrient name is a column header"),
            RecordError::DividerArtifact => write!(f, "Nutrient name contains a divider"),
            RecordError::NonNumericValue(value) => write!(f, "Value is not numeric: {value}"),
        }
    }
}

impl std::error::Error for RecordError {}

/// Errors raised while loading an analysis payload
#[derive(Debug)]
pub enum AnalysisError {
    /// The payload could not be read
    Io(std::io::Error),
    /// The payload is not valid analysis JSON
    Decode(serde_json::Error),
    /// A field required to parse nutrition is missing
    MissingField(&'static str),
}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisError::Io(err) => write!(f, "Failed to read analysis payload: {err}"),
            AnalysisError::Decode(err) => write!(f, "Failed to decode analysis payload: {err}"),
            AnalysisError::MissingField(field) => write!(f, "Analysis payload is missing `{field}`"),
        }
    }
}

impl std::error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnalysisError::Io(err) => Some(err),
            AnalysisError::Decode(err) => Some(err),
            AnalysisError::MissingField(_) => None,
        }
    }
}

impl From<std::io::Error> for AnalysisError {
    fn from(err: std::io::Error) -> Self {
        AnalysisError::Io(err)
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        AnalysisError::Decode(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_record_error_display() {
        assert_eq!(RecordError::EmptyName.to_string(), "Nutrient name is empty");
        assert_eq!(
            RecordError::NonNumericValue("lots".to_string()).to_string(),
            "Value is not numeric: lots"
        );
    }

    #[test]
    fn test_analysis_error_conversions() {
        let decode: AnalysisError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(decode, AnalysisError::Decode(_)));
        assert!(decode.source().is_some());

        let io: AnalysisError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(io.to_string().contains("gone"));

        let missing = AnalysisError::MissingField("nutrition_info");
        assert_eq!(missing.to_string(), "Analysis payload is missing `nutrition_info`");
        assert!(missing.source().is_none());
    }
}
