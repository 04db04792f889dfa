//! Data structures of the variant processing payload and their assembly.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    analysis::SourceAnalysis,
    catalog::{VariantMetadataCatalog, WorkflowFamily, DATA_TYPE_VCF_INDEX, GENOME_BUILD},
    filename::{self, FilenameDecoder, SourceKind},
    redact::SampleRedactor,
    staging::StagingWriter,
};
use crate::{common::digest, err::Error};

/// Analysis type of the generated payload.
pub const ANALYSIS_TYPE: &str = "variant_processing";

/// Access level of the uploaded files.
#[derive(
    Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, Default, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FileAccess {
    Open,
    #[default]
    Controlled,
}

impl From<bool> for FileAccess {
    fn from(open: bool) -> Self {
        if open {
            FileAccess::Open
        } else {
            FileAccess::Controlled
        }
    }
}

/// Workflow run metadata supplied by the caller.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
pub struct WorkflowConfig {
    /// Key into the workflow full name table.
    pub name: String,
    pub short_name: String,
    pub version: String,
    pub run_id: String,
    pub session_id: String,
    pub file_access: FileAccess,
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug)]
pub struct AnalysisTypeName {
    pub name: String,
}

/// Per-file `info` record.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug)]
pub struct FileInfo {
    pub data_category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_tools: Option<Vec<String>>,
}

/// One entry of the payload's `files` list.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub file_name: String,
    pub file_type: String,
    pub file_size: u64,
    pub file_md5sum: String,
    pub file_access: FileAccess,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    pub info: FileInfo,
}

/// Upstream analysis that the workflow consumed.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug)]
pub struct WorkflowInput {
    pub input_analysis_id: String,
    pub analysis_type: String,
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug)]
pub struct WorkflowDescriptor {
    pub workflow_name: Option<String>,
    pub workflow_short_name: String,
    pub workflow_version: String,
    pub run_id: String,
    pub session_id: String,
    pub inputs: Vec<WorkflowInput>,
    pub genome_build: String,
}

/// The submission payload.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Payload {
    pub analysis_type: AnalysisTypeName,
    pub study_id: String,
    pub experiment: Option<Value>,
    pub samples: Vec<Value>,
    pub files: Vec<FileRecord>,
    pub workflow: WorkflowDescriptor,
    #[serde(rename = "variant_class")]
    pub variant_class: Option<String>,
}

/// A file record together with the staging information of its source.
#[derive(Debug, Clone)]
struct PendingFile {
    source: PathBuf,
    record: FileRecord,
}

/// Combines file metadata, catalog lookups and the upstream analysis into a `Payload`.
pub struct PayloadAssembler<'a, D: FilenameDecoder> {
    pub catalog: &'a VariantMetadataCatalog,
    pub decoder: D,
    pub redactor: SampleRedactor<'a>,
    pub config: &'a WorkflowConfig,
}

impl<'a, D: FilenameDecoder> PayloadAssembler<'a, D> {
    /// Build the record for the file at `path`, without touching the staging directory.
    fn file_record(&self, path: &Path) -> Result<PendingFile, Error> {
        let decoded = self.decoder.decode(path)?;
        let entry = self
            .catalog
            .lookup(decoded.variant_type())
            .map_err(|e| Error::NamingConvention {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let file_name = decoded.canonical_name(&self.config.short_name);
        let data_type = match decoded.kind {
            SourceKind::Vcf => Some(entry.data_type.clone()),
            SourceKind::VcfIndex => Some(DATA_TYPE_VCF_INDEX.to_string()),
            SourceKind::Other => None,
        };
        let analysis_tools = WorkflowFamily::from_token(decoded.input_workflow())
            .map(|family| entry.analysis_tools(family).to_vec());
        if analysis_tools.is_none() {
            tracing::debug!(
                "no analysis tools for originating workflow {:?} of {:?}",
                decoded.input_workflow(),
                path
            );
        }

        let digest = digest::digest(path)?;
        tracing::debug!(
            "{:?} -> {} ({} bytes, MD5 {})",
            path,
            &file_name,
            digest.size,
            &digest.md5
        );

        Ok(PendingFile {
            source: path.to_path_buf(),
            record: FileRecord {
                file_type: filename::file_type(&file_name),
                file_name,
                file_size: digest.size,
                file_md5sum: digest.md5,
                file_access: self.config.file_access,
                data_type,
                info: FileInfo {
                    data_category: entry.data_category.clone(),
                    analysis_tools,
                },
            },
        })
    }

    /// Assemble the payload for `paths`, linking every file into `staging_dir`.
    ///
    /// All files are decoded and digested before the staging directory is created, so that
    /// a bad input leaves no output behind.
    pub fn assemble<P: AsRef<Path>>(
        &self,
        analysis: &SourceAnalysis,
        paths: &[P],
        staging_dir: &Path,
    ) -> Result<Payload, Error> {
        let samples = self.redactor.redact(&analysis.samples);

        let pending = paths
            .iter()
            .map(|path| self.file_record(path.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        let staging = StagingWriter::create(staging_dir)?;
        tracing::info!("Staging {} file(s) in {:?}", pending.len(), staging.dir());
        let mut files = Vec::with_capacity(pending.len());
        for PendingFile { source, record } in pending {
            staging.link(&record.file_name, &source)?;
            files.push(record);
        }

        Ok(Payload {
            analysis_type: AnalysisTypeName {
                name: ANALYSIS_TYPE.to_string(),
            },
            study_id: analysis.study_id.clone(),
            experiment: analysis.experiment.clone(),
            samples,
            files,
            workflow: self.workflow_descriptor(analysis),
            variant_class: analysis.variant_class.clone(),
        })
    }

    fn workflow_descriptor(&self, analysis: &SourceAnalysis) -> WorkflowDescriptor {
        let workflow_name = self.catalog.workflow_name(&self.config.name);
        if workflow_name.is_none() {
            tracing::warn!("unknown workflow name key {:?}", &self.config.name);
        }
        WorkflowDescriptor {
            workflow_name: workflow_name.map(str::to_string),
            workflow_short_name: self.config.short_name.clone(),
            workflow_version: self.config.version.clone(),
            run_id: self.config.run_id.clone(),
            session_id: self.config.session_id.clone(),
            inputs: vec![WorkflowInput {
                input_analysis_id: analysis.analysis_id.clone(),
                analysis_type: analysis.analysis_type.name.clone(),
            }],
            genome_build: GENOME_BUILD.to_string(),
        }
    }
}
