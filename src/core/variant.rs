use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::core::classify::{classify, Classification, ClassificationError};
use crate::core::slots::StageSlots;
use crate::core::types::{OutputTypeFlag, ProteinConsequence, ReferenceSource, ReferenceType};

/// A parenthesized run such as a gene symbol: `NM_000088.3(COL1A1):c.589G>T`
static PARENTHESIZED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(.+?\)").unwrap());

/// Unicode whitespace plus the file, group, record and unit separators
fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("Validation warnings have not been populated for {0}")]
    ValidationWarningsUnset(String),
}

/// One submitted variant description and everything the pipeline learns about it.
///
/// The record is created from the raw input, normalized and classified here,
/// then handed by `&mut` to each downstream stage, which fills in the result
/// fields. `original` never changes; `warnings` only grows; source and type
/// are set together or not at all.
#[derive(Debug)]
pub struct VariantState {
    original: String,
    quibble: String,
    classification: Option<Classification>,
    warnings: Vec<String>,

    /// Include this variant in the final output
    pub write: bool,
    /// Restrict genomic mapping to this assembly; `None` accepts all
    pub primary_assembly: Option<String>,
    /// Position among the variants of one submission
    pub order: Option<usize>,
    /// Set once the pipeline has fully validated the variant
    pub validated: bool,
    pub output_type_flag: OutputTypeFlag,

    // === Working representations written between stages ===
    pub hgvs_formatted: Option<String>,
    pub hgvs_genomic: Option<String>,
    pub hgvs_coding: Option<String>,
    pub stashed: Option<String>,
    pub pre_rna_conversion: Option<String>,
    pub input_parses: Option<String>,
    pub test_stash_tx_left: Option<String>,
    pub test_stash_tx_right: Option<String>,

    /// Transcript description from the gene record
    pub description: String,
    pub coding: String,
    pub coding_g: String,
    pub genomic_r: String,
    pub genomic_g: String,
    pub protein: String,

    // === Exported results ===
    pub gene_symbol: Option<String>,
    pub hgvs_transcript_variant: Option<String>,
    pub genome_context_intronic_sequence: Option<String>,
    pub refseqgene_context_intronic_sequence: Option<String>,
    pub hgvs_refseqgene_variant: Option<String>,
    pub hgvs_predicted_protein_consequence: Option<ProteinConsequence>,
    pub validation_warnings: Option<Vec<String>>,
    pub hgvs_lrg_transcript_variant: Option<String>,
    pub hgvs_lrg_variant: Option<String>,
    pub alt_genomic_loci: Option<Vec<serde_json::Value>>,
    pub primary_assembly_loci: Option<BTreeMap<String, serde_json::Value>>,
    pub reference_sequence_records: Option<BTreeMap<String, String>>,

    timing: BTreeMap<String, Duration>,
    slots: StageSlots,
}

/// Fixed-shape view of a `VariantState` handed to the reporting layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRecord {
    pub submitted_variant: String,
    pub gene_symbol: Option<String>,
    pub transcript_description: String,
    pub hgvs_transcript_variant: Option<String>,
    pub genome_context_intronic_sequence: Option<String>,
    pub refseqgene_context_intronic_sequence: Option<String>,
    pub hgvs_refseqgene_variant: Option<String>,
    pub hgvs_predicted_protein_consequence: Option<ProteinConsequence>,
    pub validation_warnings: Option<Vec<String>>,
    pub hgvs_lrg_transcript_variant: Option<String>,
    pub hgvs_lrg_variant: Option<String>,
    pub alt_genomic_loci: Option<Vec<serde_json::Value>>,
    pub primary_assembly_loci: Option<BTreeMap<String, serde_json::Value>>,
    pub reference_sequence_records: Option<BTreeMap<String, String>>,
}

impl VariantState {
    /// Create a record for `original`; the working copy starts as the same text
    pub fn new(original: impl Into<String>) -> Self {
        let original = original.into();
        Self {
            quibble: original.clone(),
            original,
            classification: None,
            warnings: Vec::new(),
            write: true,
            primary_assembly: None,
            order: None,
            validated: false,
            output_type_flag: OutputTypeFlag::Warning,
            hgvs_formatted: None,
            hgvs_genomic: None,
            hgvs_coding: None,
            stashed: None,
            pre_rna_conversion: None,
            input_parses: None,
            test_stash_tx_left: None,
            test_stash_tx_right: None,
            description: String::new(),
            coding: String::new(),
            coding_g: String::new(),
            genomic_r: String::new(),
            genomic_g: String::new(),
            protein: String::new(),
            gene_symbol: None,
            hgvs_transcript_variant: None,
            genome_context_intronic_sequence: None,
            refseqgene_context_intronic_sequence: None,
            hgvs_refseqgene_variant: None,
            hgvs_predicted_protein_consequence: None,
            validation_warnings: None,
            hgvs_lrg_transcript_variant: None,
            hgvs_lrg_variant: None,
            alt_genomic_loci: None,
            primary_assembly_loci: None,
            reference_sequence_records: None,
            timing: BTreeMap::new(),
            slots: StageSlots::new(),
        }
    }

    /// Start from a pre-processed working copy instead of the original text
    #[must_use]
    pub fn with_quibble(mut self, quibble: impl Into<String>) -> Self {
        self.quibble = quibble.into();
        self
    }

    /// Append warnings carried over from an earlier submission step
    #[must_use]
    pub fn with_warnings<I, S>(mut self, warnings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extend_warnings(warnings);
        self
    }

    #[must_use]
    pub fn with_write(mut self, write: bool) -> Self {
        self.write = write;
        self
    }

    #[must_use]
    pub fn with_primary_assembly(mut self, assembly: impl Into<String>) -> Self {
        self.primary_assembly = Some(assembly.into());
        self
    }

    #[must_use]
    pub fn with_order(mut self, order: usize) -> Self {
        self.order = Some(order);
        self
    }

    /// The description exactly as submitted
    #[must_use]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// The current working copy
    #[must_use]
    pub fn quibble(&self) -> &str {
        &self.quibble
    }

    /// Rewrite the working copy in place without reclassifying it.
    ///
    /// Use [`VariantState::set_reference`] when the new text must be classified.
    pub fn quibble_mut(&mut self) -> &mut String {
        &mut self.quibble
    }

    #[must_use]
    pub fn reference_source(&self) -> Option<ReferenceSource> {
        self.classification.map(|c| c.source)
    }

    #[must_use]
    pub fn reference_type(&self) -> Option<ReferenceType> {
        self.classification.map(|c| c.reference_type)
    }

    #[must_use]
    pub fn is_classified(&self) -> bool {
        self.classification.is_some()
    }

    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    pub fn extend_warnings<I, S>(&mut self, warnings: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.warnings.extend(warnings.into_iter().map(Into::into));
    }

    /// Record how long a named pipeline stage took; repeated stages accumulate
    pub fn record_timing(&mut self, stage: impl Into<String>, elapsed: Duration) {
        *self.timing.entry(stage.into()).or_default() += elapsed;
    }

    #[must_use]
    pub fn timing(&self) -> &BTreeMap<String, Duration> {
        &self.timing
    }

    #[must_use]
    pub fn slots(&self) -> &StageSlots {
        &self.slots
    }

    pub fn slots_mut(&mut self) -> &mut StageSlots {
        &mut self.slots
    }

    /// True if every character of the working copy is 7-bit ASCII
    #[must_use]
    pub fn is_ascii(&self) -> bool {
        self.quibble.is_ascii()
    }

    /// Non-ASCII characters of the working copy and their 1-based character positions
    #[must_use]
    pub fn locate_non_ascii(&self) -> (Vec<char>, Vec<usize>) {
        self.quibble
            .chars()
            .enumerate()
            .filter(|(_, c)| !c.is_ascii())
            .map(|(i, c)| (c, i + 1))
            .unzip()
    }

    /// Remove every whitespace character, not just the ends.
    ///
    /// The ASCII information separators U+001C..U+001F count as whitespace too.
    pub fn strip_whitespace(&mut self) {
        self.quibble.retain(|c| !is_separator(c));
    }

    /// Drop the leftmost parenthesized run, then classify the working copy.
    ///
    /// Returns `true` when classification failed and the variant should not be
    /// processed further. The error itself is not returned; the state is left
    /// unclassified.
    #[must_use = "a true result means the variant could not be classified"]
    pub fn normalize_quibble(&mut self) -> bool {
        let bracketed = PARENTHESIZED.find(&self.quibble).map(|m| m.range());
        if let Some(range) = bracketed {
            self.quibble.replace_range(range, "");
        }

        match classify(&self.quibble) {
            Ok(classification) => {
                self.classification = Some(classification);
                false
            }
            Err(e) => {
                debug!(original = %self.original, error = %e, "Variant could not be classified");
                self.classification = None;
                true
            }
        }
    }

    /// Replace the working copy and classify it.
    ///
    /// # Errors
    ///
    /// Returns the `ClassificationError` if the new text has no recognised
    /// source or type; the state is then left unclassified.
    pub fn set_reference(
        &mut self,
        newval: impl Into<String>,
    ) -> Result<Classification, ClassificationError> {
        self.quibble = newval.into();
        match classify(&self.quibble) {
            Ok(classification) => {
                self.classification = Some(classification);
                Ok(classification)
            }
            Err(e) => {
                self.classification = None;
                Err(e)
            }
        }
    }

    /// Snapshot of the exported fields
    #[must_use]
    pub fn output_dict(&self) -> ExportRecord {
        ExportRecord {
            submitted_variant: self.original.clone(),
            gene_symbol: self.gene_symbol.clone(),
            transcript_description: self.description.clone(),
            hgvs_transcript_variant: self.hgvs_transcript_variant.clone(),
            genome_context_intronic_sequence: self.genome_context_intronic_sequence.clone(),
            refseqgene_context_intronic_sequence: self.refseqgene_context_intronic_sequence.clone(),
            hgvs_refseqgene_variant: self.hgvs_refseqgene_variant.clone(),
            hgvs_predicted_protein_consequence: self.hgvs_predicted_protein_consequence.clone(),
            validation_warnings: self.validation_warnings.clone(),
            hgvs_lrg_transcript_variant: self.hgvs_lrg_transcript_variant.clone(),
            hgvs_lrg_variant: self.hgvs_lrg_variant.clone(),
            alt_genomic_loci: self.alt_genomic_loci.clone(),
            primary_assembly_loci: self.primary_assembly_loci.clone(),
            reference_sequence_records: self.reference_sequence_records.clone(),
        }
    }

    /// Export record as pretty JSON
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.output_dict())
    }

    /// True if any validation warning mentions "obsolete"
    ///
    /// # Errors
    ///
    /// Returns `StateError::ValidationWarningsUnset` if no stage has populated
    /// `validation_warnings` yet.
    pub fn is_obsolete(&self) -> Result<bool, StateError> {
        let warnings = self
            .validation_warnings
            .as_ref()
            .ok_or_else(|| StateError::ValidationWarningsUnset(self.original.clone()))?;
        Ok(warnings.iter().any(|w| w.contains("obsolete")))
    }
}
