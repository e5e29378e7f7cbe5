//! Ordered sectioned-document model and text rendering primitives
//! for SampleSheet-style run configuration files.

pub mod error;
pub mod render;
pub mod section;

pub use error::SectionError;
pub use section::{Data, Section, SectionedSheet, Settings};
