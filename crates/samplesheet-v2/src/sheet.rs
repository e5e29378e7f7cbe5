//! The grouped sample sheet aggregate.
//!
//! A validated [`SectionedSheet`] is normalized into a [`SampleSheetV2`]:
//! Header and Reads become dedicated fields, and every `<App>_Settings` /
//! `<App>_Data` pair is folded into an [`Application`] keyed by the name
//! before the suffix, in first-seen order. Construction either fully
//! succeeds or returns the first check failure; there is no partially-built
//! sheet.

use std::fmt;

use indexmap::IndexMap;
use samplesheet_core::{render, Data, SectionedSheet, Settings};
use serde::Serialize;
use serde_json::Value;

use crate::checks::{CheckError, ConvertRules, SheetCheck};
use crate::cycles::ReadSegment;

/// A named feature area: the content of its `_Settings` and `_Data` sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Application {
    pub settings: Option<Settings>,
    pub data: Option<Data>,
}

/// A validated, normalized SampleSheet v2 document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SampleSheetV2 {
    pub header: Option<Settings>,
    pub reads: Option<Settings>,
    pub applications: IndexMap<String, Application>,
}

impl SampleSheetV2 {
    /// Run `checks` in order against the full sheet, then group it.
    ///
    /// The first failing check aborts construction. Sections matching
    /// neither Header, Reads nor a recognized suffix are skipped; structural
    /// validation is expected to have rejected unknown shapes already.
    pub fn build(sheet: &SectionedSheet, checks: &[&dyn SheetCheck]) -> Result<Self, CheckError> {
        for check in checks {
            check.check(sheet)?;
        }

        let mut built = SampleSheetV2::default();
        for (name, section) in sheet.iter() {
            if name == "Header" {
                built.header = section.as_settings().cloned();
            } else if name == "Reads" {
                built.reads = section.as_settings().cloned();
            } else if let Some(app) = name.strip_suffix("_Settings") {
                if let Some(settings) = section.as_settings() {
                    built.application_mut(app).settings = Some(settings.clone());
                }
            } else if let Some(app) = name.strip_suffix("_Data") {
                if let Some(rows) = section.as_data() {
                    built.application_mut(app).data = Some(rows.clone());
                }
            } else {
                tracing::debug!(section = name, "section matches no known shape, skipping");
            }
        }
        tracing::debug!(applications = built.applications.len(), "sheet grouped");
        Ok(built)
    }

    /// Build with the default semantic rule set.
    ///
    /// Callers wanting structural validation prepend a
    /// [`SchemaCheck`](crate::checks::SchemaCheck) wired to their engine.
    pub fn validated(sheet: &SectionedSheet) -> Result<Self, CheckError> {
        Self::build(sheet, &[&ConvertRules::new()])
    }

    pub fn application(&self, name: &str) -> Option<&Application> {
        self.applications.get(name)
    }

    fn application_mut(&mut self, name: &str) -> &mut Application {
        self.applications.entry(name.to_string()).or_default()
    }
}

/// Parse Reads settings into per-segment cycle counts.
///
/// Non-integer and non-positive values are skipped; structural validation
/// owns rejecting those.
pub fn cycle_counts(reads: &Settings) -> IndexMap<ReadSegment, u64> {
    ReadSegment::ALL
        .iter()
        .filter_map(|segment| {
            reads
                .get(segment.key())
                .and_then(Value::as_u64)
                .filter(|count| *count > 0)
                .map(|count| (*segment, count))
        })
        .collect()
}

impl fmt::Display for SampleSheetV2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(header) = &self.header {
            f.write_str(&render::settings_block("Header", header))?;
        }
        if let Some(reads) = &self.reads {
            f.write_str(&render::settings_block("Reads", reads))?;
        }
        for (name, app) in &self.applications {
            if let Some(settings) = &app.settings {
                f.write_str(&render::settings_block(&format!("{}_Settings", name), settings))?;
            }
            if let Some(rows) = &app.data {
                f.write_str(&render::data_block(&format!("{}_Data", name), rows))?;
            }
        }
        Ok(())
    }
}
