use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::core::types::{ReferenceSource, ReferenceType};

/// A digit, a colon and a digit: `chr17:50198002C>A` style descriptions
static EST_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d:\d").unwrap());

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassificationError {
    #[error("Unable to identify reference source from {text}")]
    UnknownSource { text: String },

    #[error("Unable to identity reference type from {text}")]
    UnknownType { text: String },
}

impl ClassificationError {
    /// The description that could not be classified
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::UnknownSource { text } | Self::UnknownType { text } => text,
        }
    }
}

/// Reference source and type derived together from one description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub source: ReferenceSource,
    pub reference_type: ReferenceType,
}

/// Identify the naming authority from the accession prefix.
///
/// `LRG` and `ENS` are tested before the catch-all `N` prefix, so any other
/// `N`-prefixed string is accepted as RefSeq.
///
/// # Errors
///
/// Returns `ClassificationError::UnknownSource` if no prefix matches.
pub fn classify_source(text: &str) -> Result<ReferenceSource, ClassificationError> {
    if text.starts_with("LRG") {
        Ok(ReferenceSource::Lrg)
    } else if text.starts_with("ENS") {
        Ok(ReferenceSource::Ensembl)
    } else if text.starts_with('N') {
        Ok(ReferenceSource::RefSeq)
    } else {
        Err(ClassificationError::UnknownSource {
            text: text.to_string(),
        })
    }
}

/// Identify the coordinate type from the first matching marker.
///
/// Markers are tested in the order `:g.`, `:r.`, `:n.`, `:c.`, `:p.`, `:m.`,
/// then the bare `digit:digit` pattern.
///
/// # Errors
///
/// Returns `ClassificationError::UnknownType` if nothing matches.
pub fn classify_type(text: &str) -> Result<ReferenceType, ClassificationError> {
    ReferenceType::MARKERS
        .iter()
        .find(|(marker, _)| text.contains(marker))
        .map(|(_, reference_type)| *reference_type)
        .or_else(|| EST_PATTERN.is_match(text).then_some(ReferenceType::Est))
        .ok_or_else(|| ClassificationError::UnknownType {
            text: text.to_string(),
        })
}

/// Classify source then type; fails on the first check that fails.
///
/// # Errors
///
/// Returns the `ClassificationError` of whichever check failed first.
pub fn classify(text: &str) -> Result<Classification, ClassificationError> {
    let source = classify_source(text)?;
    let reference_type = classify_type(text)?;
    Ok(Classification {
        source,
        reference_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_source() {
        assert_eq!(
            classify_source("LRG_1:g.1A>T").unwrap(),
            ReferenceSource::Lrg
        );
        assert_eq!(
            classify_source("ENST00000:c.1A>T").unwrap(),
            ReferenceSource::Ensembl
        );
        assert_eq!(
            classify_source("NM_000000.1:c.1A>T").unwrap(),
            ReferenceSource::RefSeq
        );
        // Catch-all N prefix
        assert_eq!(
            classify_source("Nonsense").unwrap(),
            ReferenceSource::RefSeq
        );
    }

    #[test]
    fn test_classify_source_failure_carries_text() {
        let err = classify_source("XM_000000.1:c.1A>T").unwrap_err();
        assert_eq!(
            err,
            ClassificationError::UnknownSource {
                text: "XM_000000.1:c.1A>T".to_string()
            }
        );
        assert_eq!(err.text(), "XM_000000.1:c.1A>T");
        assert_eq!(
            err.to_string(),
            "Unable to identify reference source from XM_000000.1:c.1A>T"
        );
    }

    #[test]
    fn test_classify_type_markers() {
        let cases = [
            ("NC_000017.10:g.50198002C>A", ReferenceType::Genomic),
            ("NM_000088.3:r.589g>u", ReferenceType::Rna),
            ("NR_002196.2:n.601G>T", ReferenceType::NonCoding),
            ("NM_000088.3:c.589G>T", ReferenceType::Coding),
            ("NP_000079.2:p.(G197C)", ReferenceType::Protein),
            ("NC_012920.1:m.1555A>G", ReferenceType::Mitochondrial),
            ("17:50198002C>A", ReferenceType::Est),
        ];
        for (text, expected) in cases {
            assert_eq!(classify_type(text).unwrap(), expected, "{text}");
        }
    }

    #[test]
    fn test_classify_type_priority() {
        // Both :g. and :c. present; genomic is tested first
        assert_eq!(
            classify_type("NM_000088.3:c.589G>T:g.1").unwrap(),
            ReferenceType::Genomic
        );
        // :c. beats :p.
        assert_eq!(
            classify_type("NM_000088.3:p.1:c.589G>T").unwrap(),
            ReferenceType::Coding
        );
        // A marker beats the bare digit pattern
        assert_eq!(
            classify_type("1:1:c.589G>T").unwrap(),
            ReferenceType::Coding
        );
    }

    #[test]
    fn test_classify_type_failure() {
        let err = classify_type("NM_000088.3c589G>T").unwrap_err();
        assert!(matches!(err, ClassificationError::UnknownType { .. }));
        assert_eq!(
            err.to_string(),
            "Unable to identity reference type from NM_000088.3c589G>T"
        );
    }

    #[test]
    fn test_classify_stops_at_source() {
        let err = classify("chr17:50198002C>A").unwrap_err();
        assert!(matches!(err, ClassificationError::UnknownSource { .. }));

        let ok = classify("NC_000017.10:g.50198002C>A").unwrap();
        assert_eq!(ok.source, ReferenceSource::RefSeq);
        assert_eq!(ok.reference_type, ReferenceType::Genomic);
    }
}
