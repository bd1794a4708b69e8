//! Core types for variant descriptions moving through the validation pipeline.
//!
//! - [`VariantState`]: the mutable record owned by one pipeline invocation
//! - [`classify_source`], [`classify_type`]: reference classification
//! - [`ReferenceSource`], [`ReferenceType`], [`OutputTypeFlag`]: classification and result types
//! - [`StageSlots`]: scratch storage for handles owned by external stages
//!
//! ## Classification
//!
//! | Prefix | Source  |   | Marker | Type          |
//! |--------|---------|---|--------|---------------|
//! | `LRG`  | LRG     |   | `:g.`  | genomic       |
//! | `ENS`  | Ensembl |   | `:r.`  | RNA           |
//! | `N`    | RefSeq  |   | `:n.`  | non-coding    |
//! |        |         |   | `:c.`  | coding        |
//! |        |         |   | `:p.`  | protein       |
//! |        |         |   | `:m.`  | mitochondrial |
//! |        |         |   | `1:2`  | EST-style     |
//!
//! Rows are tested top to bottom and the first match wins.
//!
//! [`VariantState`]: variant::VariantState
//! [`classify_source`]: classify::classify_source
//! [`classify_type`]: classify::classify_type
//! [`ReferenceSource`]: types::ReferenceSource
//! [`ReferenceType`]: types::ReferenceType
//! [`OutputTypeFlag`]: types::OutputTypeFlag
//! [`StageSlots`]: slots::StageSlots

pub mod classify;
pub mod slots;
pub mod types;
pub mod variant;
