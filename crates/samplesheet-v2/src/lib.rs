//! Semantic validation and normalization for Illumina SampleSheet v2
//! documents.
//!
//! The input is a [`SectionedSheet`](samplesheet_core::SectionedSheet)
//! produced by an external reader. Validation runs as an ordered list of
//! [`SheetCheck`]s (structural checks delegate to an external
//! [`SchemaEngine`]; semantic checks live here), and a passing sheet is
//! grouped into a [`SampleSheetV2`] keyed by application name, which can be
//! rendered back to sectioned text.

pub mod checks;
pub mod cycles;
pub mod schemas;
pub mod sheet;

pub use checks::{
    CheckError, CloudConsistency, ConvertRules, Predicate, SchemaCheck, SchemaEngine, SheetCheck,
};
pub use cycles::{expand, CycleError, ReadSegment};
pub use sheet::{cycle_counts, Application, SampleSheetV2};
