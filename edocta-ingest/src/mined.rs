//! Best-effort enrichments mined from the free-text description.

/// Sub-fields recovered from a description by a bank's pattern set.
///
/// Everything defaults to absent: mining is enrichment, not validation,
/// and an unmatched description is a normal outcome, never an error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MinedFields {
    pub beneficiary: Option<String>,
    /// SPEI clave de rastreo.
    pub tracking_key: Option<String>,
    pub rfc: Option<String>,
    pub concept: Option<String>,
    /// Settlement time, `HH:MM` or `HH:MM:SS`.
    pub time: Option<String>,
    /// Operation date embedded in the description (already ISO); when
    /// present it supersedes the posting date on the output record.
    pub transaction_date: Option<String>,
    /// Cleaned/rewritten description preferred over the raw field.
    pub actual_description: Option<String>,
}

impl MinedFields {
    /// Fallback result for descriptions no grammar recognized.
    pub fn unmatched(description: &str) -> Self {
        Self {
            actual_description: Some(description.trim().to_string()),
            ..Self::default()
        }
    }
}
