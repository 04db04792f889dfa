//! Registry of variant types and workflows known to the payload generator.

use indexmap::IndexMap;
use strum_macros::EnumString;

use crate::err::Error;

/// Genome build that all variant processing outputs are called against.
pub const GENOME_BUILD: &str = "GRCh38_hla_decoy_ebv";

/// Data type for tabix indices of variant call files.
pub const DATA_TYPE_VCF_INDEX: &str = "VCF Index";

/// Family of the workflow that produced a variant call file.
///
/// Only these families carry analysis tool information in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, strum::Display)]
pub enum WorkflowFamily {
    /// Sanger WGS/WXS pipelines (CaVEMan, Pindel)
    #[strum(serialize = "sanger-wgs", serialize = "sanger-wxs")]
    Sanger,
    /// GATK Mutect2
    #[strum(serialize = "gatk-mutect2")]
    GatkMutect2,
}

impl WorkflowFamily {
    /// Resolve an originating workflow token from a file name, `None` if unrecognized.
    pub fn from_token(token: &str) -> Option<Self> {
        token.parse().ok()
    }
}

/// Classification metadata for one variant type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantTypeEntry {
    pub data_category: String,
    /// Data type of the primary variant call files.
    pub data_type: String,
    pub sanger_tools: Vec<String>,
    pub gatk_mutect2_tools: Vec<String>,
}

impl VariantTypeEntry {
    fn new(data_category: &str, data_type: &str, sanger: &[&str], gatk_mutect2: &[&str]) -> Self {
        Self {
            data_category: data_category.to_string(),
            data_type: data_type.to_string(),
            sanger_tools: sanger.iter().map(|t| t.to_string()).collect(),
            gatk_mutect2_tools: gatk_mutect2.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Analysis tools used by the given workflow family for this variant type.
    pub fn analysis_tools(&self, family: WorkflowFamily) -> &[String] {
        match family {
            WorkflowFamily::Sanger => &self.sanger_tools,
            WorkflowFamily::GatkMutect2 => &self.gatk_mutect2_tools,
        }
    }
}

/// Immutable lookup tables for variant types and workflow names.
///
/// Built once at startup and passed to the payload assembly explicitly.
#[derive(Debug, Clone)]
pub struct VariantMetadataCatalog {
    variant_types: IndexMap<String, VariantTypeEntry>,
    workflow_names: IndexMap<String, String>,
}

impl Default for VariantMetadataCatalog {
    fn default() -> Self {
        let mut variant_types = IndexMap::new();
        variant_types.insert(
            "snv".to_string(),
            VariantTypeEntry::new(
                "Simple Nucleotide Variation",
                "Raw SNV Calls",
                &["CaVEMan", "bcftools"],
                &["GATK-Mutect2", "bcftools"],
            ),
        );
        variant_types.insert(
            "indel".to_string(),
            VariantTypeEntry::new(
                "Simple Nucleotide Variation",
                "Raw InDel Calls",
                &["Pindel", "bcftools"],
                &["GATK-Mutect2", "bcftools"],
            ),
        );

        let mut workflow_names = IndexMap::new();
        workflow_names.insert(
            "open-access-variant-filtering".to_string(),
            "Open Access Variant Filtering".to_string(),
        );

        Self {
            variant_types,
            workflow_names,
        }
    }
}

impl VariantMetadataCatalog {
    /// Look up the entry for `variant_type`.
    pub fn lookup(&self, variant_type: &str) -> Result<&VariantTypeEntry, Error> {
        self.variant_types
            .get(variant_type)
            .ok_or_else(|| Error::UnknownVariantType(variant_type.to_string()))
    }

    /// Resolve the full workflow name for a short key.
    pub fn workflow_name(&self, key: &str) -> Option<&str> {
        self.workflow_names.get(key).map(String::as_str)
    }

    /// Registered variant type tokens, in registration order.
    pub fn variant_types(&self) -> impl Iterator<Item = &str> {
        self.variant_types.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::{VariantMetadataCatalog, WorkflowFamily};
    use crate::err::Error;

    #[rstest]
    #[case("snv", WorkflowFamily::Sanger, "Raw SNV Calls", &["CaVEMan", "bcftools"])]
    #[case("snv", WorkflowFamily::GatkMutect2, "Raw SNV Calls", &["GATK-Mutect2", "bcftools"])]
    #[case("indel", WorkflowFamily::Sanger, "Raw InDel Calls", &["Pindel", "bcftools"])]
    #[case("indel", WorkflowFamily::GatkMutect2, "Raw InDel Calls", &["GATK-Mutect2", "bcftools"])]
    fn lookup(
        #[case] variant_type: &str,
        #[case] family: WorkflowFamily,
        #[case] data_type: &str,
        #[case] tools: &[&str],
    ) -> Result<(), anyhow::Error> {
        let catalog = VariantMetadataCatalog::default();

        let entry = catalog.lookup(variant_type)?;

        assert_eq!(entry.data_category, "Simple Nucleotide Variation");
        assert_eq!(entry.data_type, data_type);
        assert_eq!(entry.analysis_tools(family), tools);

        Ok(())
    }

    #[test]
    fn lookup_unknown() {
        let catalog = VariantMetadataCatalog::default();

        let err = catalog.lookup("cnv").unwrap_err();

        assert!(matches!(err, Error::UnknownVariantType(t) if t == "cnv"));
    }

    #[test]
    fn variant_types_in_order() {
        let catalog = VariantMetadataCatalog::default();

        assert_eq!(catalog.variant_types().collect::<Vec<_>>(), vec!["snv", "indel"]);
    }

    #[rstest]
    #[case("sanger-wgs", Some(WorkflowFamily::Sanger))]
    #[case("sanger-wxs", Some(WorkflowFamily::Sanger))]
    #[case("gatk-mutect2", Some(WorkflowFamily::GatkMutect2))]
    #[case("Sanger-WGS", None)]
    #[case("strelka2", None)]
    fn workflow_family(#[case] token: &str, #[case] expected: Option<WorkflowFamily>) {
        assert_eq!(WorkflowFamily::from_token(token), expected);
    }

    #[test]
    fn workflow_name() {
        let catalog = VariantMetadataCatalog::default();

        assert_eq!(
            catalog.workflow_name("open-access-variant-filtering"),
            Some("Open Access Variant Filtering")
        );
        assert_eq!(catalog.workflow_name("variant-filtering"), None);
    }
}
