//! # variant-state
//!
//! Per-request state and reference classification for a genomic variant
//! description validator.
//!
//! A submitted description such as `NM_000088.3(COL1A1):c.589G>T` is wrapped in
//! a [`VariantState`], normalized, and classified by reference source (LRG,
//! Ensembl, RefSeq) and coordinate type (`g.`, `r.`, `n.`, `c.`, `p.`, `m.`).
//! Downstream mapping stages then fill in the result fields, and the record is
//! exported as a fixed-shape [`ExportRecord`].
//!
//! Stages that need the reference database share a [`ConnectionPool`].
//!
//! ## Example
//!
//! ```rust
//! use variant_state::{ReferenceSource, ReferenceType, VariantState};
//!
//! let mut variant = VariantState::new("NM_000088.3(COL1A1): c.589G>T");
//! variant.strip_whitespace();
//!
//! // `true` means the description could not be classified
//! assert!(!variant.normalize_quibble());
//! assert_eq!(variant.quibble(), "NM_000088.3:c.589G>T");
//! assert_eq!(variant.reference_source(), Some(ReferenceSource::RefSeq));
//! assert_eq!(variant.reference_type(), Some(ReferenceType::Coding));
//!
//! let record = variant.output_dict();
//! assert_eq!(record.submitted_variant, "NM_000088.3(COL1A1): c.589G>T");
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Variant state, classification, and result types
//! - [`db`]: Connection pool and database settings
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod db;

// Re-export commonly used types for convenience
pub use core::classify::{classify, classify_source, classify_type, Classification, ClassificationError};
pub use core::slots::StageSlots;
pub use core::types::*;
pub use core::variant::{ExportRecord, StateError, VariantState};
pub use db::{ConnectionPool, DbConfig, PoolError};
