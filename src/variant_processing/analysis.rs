//! The upstream analysis record that the variant processing outputs were derived from.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::err::Error;

/// Analysis type name record.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct AnalysisType {
    pub name: String,
}

/// The upstream analysis, only the parts used for building the payload.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SourceAnalysis {
    pub study_id: String,
    pub analysis_id: String,
    pub analysis_type: AnalysisType,
    /// Passed through verbatim.
    #[serde(default)]
    pub experiment: Option<Value>,
    /// Sample records, kept untyped so that all fields survive.
    pub samples: Vec<Value>,
    #[serde(rename = "variant_class", default)]
    pub variant_class: Option<String>,
}

impl SourceAnalysis {
    /// Read the analysis from the JSON file at `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        tracing::debug!("Reading analysis from {:?}", path);
        let contents = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json(&contents).map_err(|e| Error::Configuration {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Parse the analysis from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::SourceAnalysis;
    use crate::err::Error;

    #[test]
    fn from_path() -> Result<(), anyhow::Error> {
        let analysis = SourceAnalysis::from_path("tests/variant_processing/analysis.json")?;

        assert_eq!(analysis.study_id, "TEST-PR");
        assert_eq!(analysis.analysis_id, "9d1ac3f8-2fd1-4f6c-9ac3-f82fd1af6c2e");
        assert_eq!(analysis.analysis_type.name, "variant_calling");
        assert_eq!(analysis.variant_class.as_deref(), Some("Somatic"));
        assert_eq!(analysis.samples.len(), 1);
        assert_eq!(
            analysis.experiment.as_ref().map(|e| e["experimental_strategy"].clone()),
            Some(serde_json::json!("WGS"))
        );

        Ok(())
    }

    #[test]
    fn optional_fields() -> Result<(), anyhow::Error> {
        let analysis = SourceAnalysis::from_json(
            r#"{
                "studyId": "TEST-PR",
                "analysisId": "A1",
                "analysisType": {"name": "variant_calling"},
                "samples": []
            }"#,
        )?;

        assert_eq!(analysis.experiment, None);
        assert_eq!(analysis.variant_class, None);

        Ok(())
    }

    #[test]
    fn missing_required_field() -> Result<(), anyhow::Error> {
        let tmp_dir = temp_testdir::TempDir::default();
        let path = tmp_dir.join("analysis.json");
        std::fs::write(
            &path,
            r#"{"studyId": "TEST-PR", "analysisType": {"name": "variant_calling"}, "samples": []}"#,
        )?;

        let err = SourceAnalysis::from_path(&path).unwrap_err();

        match err {
            Error::Configuration { path: p, message } => {
                assert_eq!(p, path);
                assert!(message.contains("analysisId"), "{}", message);
            }
            _ => panic!("unexpected error: {:?}", err),
        }

        Ok(())
    }

    #[test]
    fn malformed_json() -> Result<(), anyhow::Error> {
        let tmp_dir = temp_testdir::TempDir::default();
        let path = tmp_dir.join("analysis.json");
        std::fs::write(&path, "{\"studyId\": ")?;

        let err = SourceAnalysis::from_path(&path).unwrap_err();

        assert!(matches!(err, Error::Configuration { .. }));

        Ok(())
    }

    #[test]
    fn missing_file() {
        let err = SourceAnalysis::from_path("tests/variant_processing/missing.json").unwrap_err();

        assert!(matches!(err, Error::Io { .. }));
    }
}
