//! Validation checks over a sectioned sheet.
//!
//! Every check implements [`SheetCheck`], one operation over the full
//! document. Structural checks ([`SchemaCheck`]) hand a constant schema
//! document to an external [`SchemaEngine`]; semantic checks
//! ([`ConvertRules`], [`CloudConsistency`]) evaluate the cross-field rules
//! directly. Checks run in caller order and the first failure wins.

use std::collections::HashSet;

use samplesheet_core::{SectionedSheet, Settings};
use serde_json::Value;
use thiserror::Error;

use crate::cycles::{self, CycleError, ReadSegment};

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("Structural violation: {0}")]
    Structural(String),

    #[error("Semantic violation: {0}")]
    Semantic(String),

    #[error("Cross-section violation: {0}")]
    CrossSection(String),

    #[error(transparent)]
    Grammar(#[from] CycleError),
}

/// A single validation pass over a full sheet.
pub trait SheetCheck {
    fn check(&self, sheet: &SectionedSheet) -> Result<(), CheckError>;
}

/// Adapter turning an ad-hoc predicate into a check.
pub struct Predicate<F>(pub F);

impl<F> SheetCheck for Predicate<F>
where
    F: Fn(&SectionedSheet) -> Result<(), CheckError>,
{
    fn check(&self, sheet: &SectionedSheet) -> Result<(), CheckError> {
        (self.0)(sheet)
    }
}

/// Boundary to an external structural validation engine.
///
/// The engine receives a schema document (required keys, types, patterns,
/// bounds, enums) and the sheet lowered to JSON, and reports pass or fail
/// with detail. This crate never evaluates schemas itself.
pub trait SchemaEngine {
    fn validate(&self, schema: &Value, instance: &Value) -> Result<(), String>;
}

/// Declarative structural check: a schema document plus the engine to run it.
pub struct SchemaCheck<E> {
    schema: Value,
    engine: E,
}

impl<E: SchemaEngine> SchemaCheck<E> {
    pub fn new(schema: Value, engine: E) -> Self {
        Self { schema, engine }
    }
}

impl<E: SchemaEngine> SheetCheck for SchemaCheck<E> {
    fn check(&self, sheet: &SectionedSheet) -> Result<(), CheckError> {
        self.engine
            .validate(&self.schema, &sheet.to_value())
            .map_err(CheckError::Structural)
    }
}

/// Cross-field rules relating Reads, BCLConvert_Settings and BCLConvert_Data.
///
/// Rules run in a fixed order and stop at the first failure: OverrideCycles
/// against the declared cycle counts, adapter lengths, barcode-mismatch
/// preconditions, then index uniqueness over the data rows.
#[derive(Debug, Clone, Default)]
pub struct ConvertRules {
    unique_sample_ids: bool,
}

impl ConvertRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also require Sample_ID values to be unique across BCLConvert_Data.
    ///
    /// The vendor notes leave Sample_ID uniqueness open, so this is off by
    /// default; rows sharing an ID then share demultiplexed output.
    pub fn unique_sample_ids(mut self, enabled: bool) -> Self {
        self.unique_sample_ids = enabled;
        self
    }

    fn check_settings(&self, sheet: &SectionedSheet, settings: &Settings) -> Result<(), CheckError> {
        if let Some(spec) = settings.get("OverrideCycles") {
            let spec = text(spec, "BCLConvert_Settings.OverrideCycles")?;
            let expansion = cycles::expand(spec)?;
            let reads = reads_section(sheet)?;
            for (segment, letters) in &expansion {
                let Some(declared) = cycle_count(reads, *segment) else {
                    return Err(CheckError::Semantic(format!(
                        "BCLConvert_Settings.OverrideCycles defines {}, but it is not specified in the Reads section",
                        segment
                    )));
                };
                if declared != letters.len() as u64 {
                    return Err(CheckError::Semantic(format!(
                        "Reads.{} is {}, but BCLConvert_Settings.OverrideCycles specifies a length of {}",
                        segment,
                        declared,
                        letters.len()
                    )));
                }
            }
            for segment in ReadSegment::ALL {
                if reads.contains_key(segment.key()) && !expansion.contains_key(&segment) {
                    return Err(CheckError::Semantic(format!(
                        "Reads defines {}, but BCLConvert_Settings.OverrideCycles is incompatible with it",
                        segment
                    )));
                }
            }
        }

        if let Some(adapter) = settings.get("AdapterRead1") {
            let adapter = text(adapter, "BCLConvert_Settings.AdapterRead1")?;
            let reads = reads_section(sheet)?;
            let declared = cycle_count(reads, ReadSegment::Read1).ok_or_else(|| {
                CheckError::Semantic(
                    "AdapterRead1 defined in BCLConvert_Settings, but no Read1Cycles entry in Reads"
                        .to_string(),
                )
            })?;
            if adapter.len() as u64 > declared {
                return Err(CheckError::Semantic(format!(
                    "BCLConvert_Settings.AdapterRead1 is {} cycles, longer than Reads.Read1Cycles ({})",
                    adapter.len(),
                    declared
                )));
            }
        }

        if let Some(adapter) = settings.get("AdapterRead2") {
            let adapter = text(adapter, "BCLConvert_Settings.AdapterRead2")?;
            let reads = reads_section(sheet)?;
            let declared = cycle_count(reads, ReadSegment::Read2).ok_or_else(|| {
                CheckError::Semantic(
                    "AdapterRead2 defined in BCLConvert_Settings, but no Read2Cycles entry in Reads"
                        .to_string(),
                )
            })?;
            if adapter.len() as u64 > declared {
                return Err(CheckError::Semantic(format!(
                    "BCLConvert_Settings.AdapterRead2 is {} cycles, longer than Reads.Read2Cycles ({})",
                    adapter.len(),
                    declared
                )));
            }
        }

        // The vendor notes say BarcodeMismatchesIndexN is "only required if
        // IndexNCycles is specified", which conflicts with it carrying a
        // default value. Interpreted here as: declaring mismatches requires
        // the matching index read to exist.
        if settings.contains_key("BarcodeMismatchesIndex1")
            && cycle_count(reads_section(sheet)?, ReadSegment::Index1).is_none()
        {
            return Err(CheckError::Semantic(
                "BCLConvert_Settings defines BarcodeMismatchesIndex1, but no Index1Cycles defined in Reads"
                    .to_string(),
            ));
        }
        if settings.contains_key("BarcodeMismatchesIndex2")
            && cycle_count(reads_section(sheet)?, ReadSegment::Index2).is_none()
        {
            return Err(CheckError::Semantic(
                "BCLConvert_Settings defines BarcodeMismatchesIndex2, but no Index2Cycles defined in Reads"
                    .to_string(),
            ));
        }
        Ok(())
    }

    fn check_data(&self, rows: &[Settings]) -> Result<(), CheckError> {
        if rows.len() > 1 {
            if !rows[0].contains_key("Index") {
                return Err(CheckError::Semantic(
                    "No Index found in BCLConvert_Data, although it contains more than one sample"
                        .to_string(),
                ));
            }
            // Index2 participates in the composite key iff the first row has it.
            let with_index2 = rows[0].contains_key("Index2");
            let mut seen = HashSet::new();
            for row in rows {
                let mut key = field(row, "Index").to_string();
                if with_index2 {
                    key.push_str(field(row, "Index2"));
                }
                if !seen.insert(key.clone()) {
                    return Err(CheckError::Semantic(format!(
                        "BCLConvert_Data indices are not unique: {:?} occurs more than once",
                        key
                    )));
                }
            }
        }

        if self.unique_sample_ids {
            let mut seen = HashSet::new();
            for row in rows {
                let id = field(row, "Sample_ID");
                if !id.is_empty() && !seen.insert(id) {
                    return Err(CheckError::Semantic(format!(
                        "BCLConvert_Data.Sample_ID {:?} occurs more than once",
                        id
                    )));
                }
            }
        }
        Ok(())
    }
}

impl SheetCheck for ConvertRules {
    fn check(&self, sheet: &SectionedSheet) -> Result<(), CheckError> {
        if let Ok(settings) = sheet.settings("BCLConvert_Settings") {
            tracing::debug!("checking BCLConvert_Settings against Reads");
            self.check_settings(sheet, settings)?;
        }
        if let Ok(rows) = sheet.data("BCLConvert_Data") {
            tracing::debug!(rows = rows.len(), "checking BCLConvert_Data rows");
            self.check_data(rows)?;
        }
        Ok(())
    }
}

/// Requires every BCLConvert_Data sample to be declared in Cloud_Data.
///
/// The check is directional: Cloud_Data samples without a BCLConvert_Data
/// row are left alone, since the cloud platform may track samples the
/// converter never sees.
#[derive(Debug, Clone, Copy, Default)]
pub struct CloudConsistency;

impl SheetCheck for CloudConsistency {
    fn check(&self, sheet: &SectionedSheet) -> Result<(), CheckError> {
        let cloud = sheet
            .data("Cloud_Data")
            .map_err(|_| CheckError::CrossSection("no Cloud_Data section".to_string()))?;
        let convert = sheet
            .data("BCLConvert_Data")
            .map_err(|_| CheckError::CrossSection("no BCLConvert_Data section".to_string()))?;

        let cloud_ids: HashSet<&str> = cloud
            .iter()
            .filter_map(|row| row.get("Sample_ID").and_then(Value::as_str))
            .collect();
        for row in convert {
            if let Some(id) = row.get("Sample_ID").and_then(Value::as_str) {
                if !cloud_ids.contains(id) {
                    return Err(CheckError::CrossSection(format!(
                        "Sample_ID {:?} is defined in the BCLConvert_Data section, but not in the Cloud_Data section",
                        id
                    )));
                }
            }
        }
        Ok(())
    }
}

fn reads_section(sheet: &SectionedSheet) -> Result<&Settings, CheckError> {
    sheet
        .settings("Reads")
        .map_err(|err| CheckError::Semantic(err.to_string()))
}

fn cycle_count(reads: &Settings, segment: ReadSegment) -> Option<u64> {
    reads.get(segment.key()).and_then(Value::as_u64)
}

fn text<'a>(value: &'a Value, field: &str) -> Result<&'a str, CheckError> {
    value
        .as_str()
        .ok_or_else(|| CheckError::Semantic(format!("{} is not a string", field)))
}

fn field<'a>(row: &'a Settings, name: &str) -> &'a str {
    row.get(name).and_then(Value::as_str).unwrap_or_default()
}
