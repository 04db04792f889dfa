//! Decoding of the dot-delimited file naming convention of variant call files.
//!
//! Variant calling outputs are named like
//! `{study}.{donor}.{sample}.{strategy}.{date}.{workflow}.{calling}.{variant_type}.vcf.gz`
//! where the first five fields are passed through opaquely, field 5 names the originating
//! workflow and field 7 the variant type.

use std::path::Path;

use crate::err::Error;

/// Number of leading fields of the original name that are kept in the canonical name.
pub const NUM_FIELDS: usize = 8;

/// Index of the originating workflow field.
const FIELD_WORKFLOW: usize = 5;
/// Index of the variant type field.
const FIELD_VARIANT_TYPE: usize = 7;

/// The kind of a source file, as far as its data type is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Primary variant call file (`.vcf.gz`).
    Vcf,
    /// Tabix index of a variant call file (`.vcf.gz.tbi`).
    VcfIndex,
    /// Anything else.
    Other,
}

/// Metadata decoded from a file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFilename {
    /// The first `NUM_FIELDS` dot-delimited fields.
    pub fields: Vec<String>,
    /// Whether the source path carries a `.tbi` suffix.
    pub is_index: bool,
    pub kind: SourceKind,
}

impl DecodedFilename {
    /// Short name of the workflow that produced the file.
    pub fn input_workflow(&self) -> &str {
        &self.fields[FIELD_WORKFLOW]
    }

    /// The variant type token, e.g. `snv`.
    pub fn variant_type(&self) -> &str {
        &self.fields[FIELD_VARIANT_TYPE]
    }

    /// Derive the canonical output name for a file processed by workflow `wf_short_name`.
    pub fn canonical_name(&self, wf_short_name: &str) -> String {
        let mut parts: Vec<&str> = self.fields.iter().map(String::as_str).collect();
        parts.push(wf_short_name);
        parts.push("vcf.gz");
        if self.is_index {
            parts.push("tbi");
        }
        parts.join(".")
    }
}

/// Derive the file type from a canonical file name.
pub fn file_type(canonical_name: &str) -> String {
    if canonical_name.ends_with(".vcf.gz") {
        "VCF".to_string()
    } else {
        canonical_name
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_uppercase()
    }
}

/// Interface for decoding file names into workflow metadata.
pub trait FilenameDecoder {
    fn decode(&self, path: &Path) -> Result<DecodedFilename, Error>;
}

/// Decoder for the positional, dot-delimited naming convention.
#[derive(Debug, Clone, Copy, Default)]
pub struct DotDelimitedDecoder;

impl FilenameDecoder for DotDelimitedDecoder {
    fn decode(&self, path: &Path) -> Result<DecodedFilename, Error> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| Error::NamingConvention {
                path: path.to_path_buf(),
                reason: "no valid UTF-8 file name".to_string(),
            })?;

        let fields: Vec<&str> = file_name.split('.').collect();
        if fields.len() < NUM_FIELDS {
            return Err(Error::NamingConvention {
                path: path.to_path_buf(),
                reason: format!(
                    "expected at least {} dot-delimited fields, found {}",
                    NUM_FIELDS,
                    fields.len()
                ),
            });
        }

        let kind = if file_name.ends_with(".vcf.gz") {
            SourceKind::Vcf
        } else if file_name.ends_with(".vcf.gz.tbi") {
            SourceKind::VcfIndex
        } else {
            SourceKind::Other
        };

        Ok(DecodedFilename {
            fields: fields[..NUM_FIELDS].iter().map(|f| f.to_string()).collect(),
            is_index: file_name.ends_with(".tbi"),
            kind,
        })
    }
}
