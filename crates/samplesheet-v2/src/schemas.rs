//! Constant structural schema documents.
//!
//! These are data, not behavior: callers hand them to their
//! [`SchemaEngine`](crate::checks::SchemaEngine) together with
//! [`SectionedSheet::to_value`](samplesheet_core::SectionedSheet::to_value).
//! The shapes follow the NextSeq 1000/2000 SampleSheet v2 validation notes,
//! which are close to but not a formal specification; descriptions paraphrase
//! the vendor wording. Built once, never mutated.

use std::sync::OnceLock;

use serde_json::{json, Value};

/// Structural schema for a SampleSheet v2 document.
pub fn sample_sheet_v2_schema() -> &'static Value {
    static SCHEMA: OnceLock<Value> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        json!({
            "type": "object",
            "required": ["Header", "Reads", "Sequencing_Settings"],
            "properties": {
                "Header": {
                    "type": "object",
                    "required": ["FileFormatVersion"],
                    "properties": {
                        "FileFormatVersion": {
                            "type": "integer",
                            "const": 2
                        },
                        "RunName": {
                            "type": "string",
                            "pattern": "^[a-zA-Z0-9_\\-\\.]*$",
                            "description": "Unique run name; alphanumerics, underscores, dashes and periods only. Spaces or special characters fail analysis."
                        },
                        "RunDescription": {
                            "type": "string",
                            "description": "Description of the run"
                        },
                        "InstrumentPlatform": {
                            "type": "string",
                            "description": "The instrument platform name",
                            "examples": ["NextSeq 1000", "NextSeq 2000"]
                        },
                        "InstrumentType": {
                            "type": "string",
                            "description": "The instrument name",
                            "examples": ["NextSeq 1000", "NextSeq 2000"]
                        }
                    }
                },
                "Reads": {
                    "type": "object",
                    "required": ["Read1Cycles"],
                    "properties": {
                        "Read1Cycles": {
                            "type": "integer",
                            "minimum": 1,
                            "description": "Number of cycles in the first read. Must be consistent with the Read 1 segment of OverrideCycles when present."
                        },
                        "Read2Cycles": {
                            "type": "integer",
                            "minimum": 1,
                            "description": "Number of cycles in the second read; required for paired-end runs. Must be consistent with the Read 2 segment of OverrideCycles when present."
                        },
                        "Index1Cycles": {
                            "type": "integer",
                            "minimum": 1,
                            "description": "Number of cycles in the first index read; required when sequencing more than one sample."
                        },
                        "Index2Cycles": {
                            "type": "integer",
                            "minimum": 1,
                            "description": "Number of cycles in the second index read; required when sequencing more than one sample."
                        }
                    }
                },
                "Sequencing_Settings": {
                    "type": "object",
                    "required": [],
                    "properties": {
                        "LibraryPrepKits": {
                            "type": "string",
                            "description": "Your library prep kit. Only one library prep kit is allowed."
                        }
                    }
                },
                "BCLConvert_Settings": {
                    "type": "object",
                    "required": ["SoftwareVersion"],
                    "properties": {
                        "SoftwareVersion": {
                            "type": "string",
                            "pattern": "^[0-9]+\\.[0-9]+\\.[0-9]+.*"
                        },
                        "AdapterRead1": {
                            "type": "string",
                            "pattern": "^[ACGT]+",
                            "description": "Sequence to trim or mask from the end of Read 1; length must not exceed Read1Cycles."
                        },
                        "AdapterRead2": {
                            "type": "string",
                            "pattern": "^[ACGT]+",
                            "description": "Sequence to trim or mask from the end of Read 2; length must not exceed Read2Cycles."
                        },
                        "BarcodeMismatchesIndex1": {
                            "type": "integer",
                            "minimum": 0,
                            "maximum": 2,
                            "default": 1,
                            "description": "Allowed mismatches between the first index read and the index sequence."
                        },
                        "BarcodeMismatchesIndex2": {
                            "type": "integer",
                            "minimum": 0,
                            "maximum": 2,
                            "default": 1,
                            "description": "Allowed mismatches between the second index read and the index sequence."
                        },
                        "FastqCompressionFormat": {
                            "type": "string",
                            "enum": ["dragen", "gzip"]
                        },
                        "OverrideCycles": {
                            "type": "string",
                            "pattern": "^([NYIU][0-9]+;?){1,}$"
                        }
                    }
                },
                "BCLConvert_Data": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "required": ["Sample_ID"],
                        "properties": {
                            "Sample_ID": {
                                "type": "string",
                                "pattern": "^[a-zA-Z0-9\\-_]+$",
                                "maxLength": 20,
                                "description": "The ID of the sample; separate identifier parts with a dash or underscore.",
                                "examples": ["Sample1-DQB1-022515"]
                            },
                            "Index": {
                                "type": "string",
                                "pattern": "^[ACTG]+$",
                                "description": "Index sequence associated with the sample; required when sequencing more than one sample."
                            },
                            "Index2": {
                                "type": "string",
                                "pattern": "^[ACTG]+$",
                                "description": "Second index sequence, in forward orientation; i5 is reverse-complemented downstream."
                            },
                            "Lane": {
                                "type": "integer",
                                "minimum": 0,
                                "description": "Flow cell lane, one integer value."
                            },
                            "Sample_Project": {
                                "type": "string",
                                "pattern": "^[a-zA-Z0-9\\-_]+$",
                                "maxLength": 20
                            }
                        }
                    }
                }
            }
        })
    })
}

/// Platform overlay for NextSeq 1000/2000 runs: index reads cap at 10 cycles.
pub fn nextseq_1k2k_schema() -> &'static Value {
    static SCHEMA: OnceLock<Value> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        json!({
            "type": "object",
            "required": ["Header", "Reads"],
            "properties": {
                "Reads": {
                    "type": "object",
                    "properties": {
                        "Index1Cycles": {
                            "maximum": 10
                        },
                        "Index2Cycles": {
                            "maximum": 10
                        }
                    }
                }
            }
        })
    })
}
