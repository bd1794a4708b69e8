use serde::{Deserialize, Serialize};

/// Naming authority that issued the accession of a variant description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceSource {
    /// Locus Reference Genomic record (`LRG_1`, `LRG_1t1`)
    #[serde(rename = "LRG")]
    Lrg,
    /// Ensembl stable identifier (`ENST...`, `ENSG...`)
    #[serde(rename = "ENS")]
    Ensembl,
    /// RefSeq accession (`NM_`, `NC_`, `NG_`, `NP_`, ...)
    #[serde(rename = "RefSeq")]
    RefSeq,
}

impl ReferenceSource {
    /// Short code used in reports
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lrg => "LRG",
            Self::Ensembl => "ENS",
            Self::RefSeq => "RefSeq",
        }
    }
}

impl std::fmt::Display for ReferenceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Coordinate system named by the type marker of a variant description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceType {
    /// Linear genomic coordinates (`:g.`)
    #[serde(rename = ":g.")]
    Genomic,
    /// RNA coordinates (`:r.`)
    #[serde(rename = ":r.")]
    Rna,
    /// Non-coding transcript coordinates (`:n.`)
    #[serde(rename = ":n.")]
    NonCoding,
    /// Coding DNA coordinates (`:c.`)
    #[serde(rename = ":c.")]
    Coding,
    /// Protein coordinates (`:p.`)
    #[serde(rename = ":p.")]
    Protein,
    /// Mitochondrial genomic coordinates (`:m.`)
    #[serde(rename = ":m.")]
    Mitochondrial,
    /// Bare `chr:pos` style description, no type marker
    #[serde(rename = "est")]
    Est,
}

impl ReferenceType {
    /// Type markers in the order they are tested; the first hit wins
    pub const MARKERS: [(&'static str, ReferenceType); 6] = [
        (":g.", ReferenceType::Genomic),
        (":r.", ReferenceType::Rna),
        (":n.", ReferenceType::NonCoding),
        (":c.", ReferenceType::Coding),
        (":p.", ReferenceType::Protein),
        (":m.", ReferenceType::Mitochondrial),
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Genomic => ":g.",
            Self::Rna => ":r.",
            Self::NonCoding => ":n.",
            Self::Coding => ":c.",
            Self::Protein => ":p.",
            Self::Mitochondrial => ":m.",
            Self::Est => "est",
        }
    }
}

impl std::fmt::Display for ReferenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Severity category of the final validation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputTypeFlag {
    /// Validation produced warnings (initial state)
    #[default]
    Warning,
    /// Validation failed
    Error,
    /// Variant mapped to a gene
    Gene,
    /// Variant validated but lies outside any gene
    Intergenic,
}

impl OutputTypeFlag {
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }
}

impl std::fmt::Display for OutputTypeFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
            Self::Gene => write!(f, "gene"),
            Self::Intergenic => write!(f, "intergenic"),
        }
    }
}

/// Predicted protein consequence in three-letter and single-letter notation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProteinConsequence {
    /// Three-letter amino acid form, e.g. `NP_000079.2:p.(Gly197Cys)`
    pub tlr: String,
    /// Single-letter amino acid form, e.g. `NP_000079.2:p.(G197C)`
    pub slr: String,
    /// LRG protein form, three-letter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lrg_tlr: Option<String>,
    /// LRG protein form, single-letter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lrg_slr: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_order() {
        let order: Vec<_> = ReferenceType::MARKERS.iter().map(|(m, _)| *m).collect();
        assert_eq!(order, vec![":g.", ":r.", ":n.", ":c.", ":p.", ":m."]);
    }

    #[test]
    fn test_serde_codes() {
        assert_eq!(
            serde_json::to_string(&ReferenceSource::RefSeq).unwrap(),
            "\"RefSeq\""
        );
        assert_eq!(
            serde_json::to_string(&ReferenceType::Est).unwrap(),
            "\"est\""
        );
        assert_eq!(
            serde_json::to_string(&OutputTypeFlag::Warning).unwrap(),
            "\"warning\""
        );
    }

    #[test]
    fn test_output_type_flag_default() {
        assert_eq!(OutputTypeFlag::default(), OutputTypeFlag::Warning);
        assert!(!OutputTypeFlag::Gene.is_error());
        assert!(OutputTypeFlag::Error.is_error());
    }
}
