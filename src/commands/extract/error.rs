use thiserror::Error;

// Either variant aborts the whole extraction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("unsupported reference format: {reference}")]
    MalformedReference { reference: String },

    #[error("failed to resolve {reference} at segment '{segment}': {reason}")]
    StructuralLookup {
        reference: String,
        segment: String,
        reason: String,
    },
}

impl ExtractError {
    pub(super) fn lookup(reference: &str, segment: &str, reason: impl Into<String>) -> Self {
        Self::StructuralLookup {
            reference: reference.to_string(),
            segment: segment.to_string(),
            reason: reason.into(),
        }
    }
}
