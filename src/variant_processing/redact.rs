//! Removal of internal identifiers from sample records of the upstream analysis.

use serde_json::Value;

/// Identifier fields that must not be carried over into the new payload.
pub const REDACTED_FIELDS: &[&str] = &["info", "sampleId", "specimenId", "donorId", "studyId"];

/// Nested records of a sample that carry their own copies of the identifiers.
pub const NESTED_RECORDS: &[&str] = &["specimen", "donor"];

/// Strips a fixed set of field names from a record and from selected nested records.
#[derive(Debug, Clone, Copy)]
pub struct SampleRedactor<'a> {
    forbidden: &'a [&'a str],
    nested: &'a [&'a str],
}

impl Default for SampleRedactor<'static> {
    fn default() -> Self {
        Self::new(REDACTED_FIELDS, NESTED_RECORDS)
    }
}

impl<'a> SampleRedactor<'a> {
    pub fn new(forbidden: &'a [&'a str], nested: &'a [&'a str]) -> Self {
        Self { forbidden, nested }
    }

    /// Return redacted copies of `samples`; the input is left untouched.
    pub fn redact(&self, samples: &[Value]) -> Vec<Value> {
        samples
            .iter()
            .cloned()
            .map(|mut sample| {
                self.strip(&mut sample, self.nested);
                sample
            })
            .collect()
    }

    /// Remove forbidden fields from `record` and recurse into the `nested` records.
    ///
    /// Missing fields, missing nested records and non-object values are left alone.
    fn strip(&self, record: &mut Value, nested: &[&str]) {
        if let Some(map) = record.as_object_mut() {
            for key in self.forbidden {
                map.shift_remove(*key);
            }
            for key in nested {
                if let Some(child) = map.get_mut(*key) {
                    self.strip(child, &[]);
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    use super::{SampleRedactor, NESTED_RECORDS, REDACTED_FIELDS};

    fn sample() -> Value {
        json!({
            "sampleId": "SA610228",
            "submitterSampleId": "HCC1143_BAM_INPUT",
            "sampleType": "Total DNA",
            "matchedNormalSubmitterSampleId": "HCC1143_BLOOD_BAM_INPUT",
            "specimenId": "SP224893",
            "specimen": {
                "specimenId": "SP224893",
                "donorId": "DO250122",
                "submitterSpecimenId": "HCC1143_BAM_INPUT",
                "tumourNormalDesignation": "Tumour",
                "specimenTissueSource": "Solid tissue",
                "specimenType": "Primary tumour",
                "info": {"internal": true}
            },
            "donor": {
                "donorId": "DO250122",
                "studyId": "TEST-PR",
                "gender": "Female",
                "submitterDonorId": "HCC1143"
            },
            "info": {"internal": true}
        })
    }

    #[test]
    fn redact_all_levels() {
        let redacted = SampleRedactor::default().redact(&[sample()]);

        assert_eq!(
            redacted,
            vec![json!({
                "submitterSampleId": "HCC1143_BAM_INPUT",
                "sampleType": "Total DNA",
                "matchedNormalSubmitterSampleId": "HCC1143_BLOOD_BAM_INPUT",
                "specimen": {
                    "submitterSpecimenId": "HCC1143_BAM_INPUT",
                    "tumourNormalDesignation": "Tumour",
                    "specimenTissueSource": "Solid tissue",
                    "specimenType": "Primary tumour"
                },
                "donor": {
                    "gender": "Female",
                    "submitterDonorId": "HCC1143"
                }
            })]
        );
    }

    #[test]
    fn redact_is_exhaustive_and_keeps_other_fields() {
        let input = vec![sample(), sample()];

        let redacted = SampleRedactor::default().redact(&input);

        assert_eq!(redacted.len(), input.len());
        for (before, after) in input.iter().zip(redacted.iter()) {
            let levels = std::iter::once(("", before, after)).chain(
                NESTED_RECORDS
                    .iter()
                    .map(|key| (*key, &before[*key], &after[*key])),
            );
            for (level, before, after) in levels {
                let before = before.as_object().unwrap();
                let after = after.as_object().unwrap();
                for field in REDACTED_FIELDS {
                    assert!(!after.contains_key(*field), "{} left in {:?}", field, level);
                }
                for (key, value) in before {
                    if REDACTED_FIELDS.contains(&key.as_str()) {
                        continue;
                    }
                    if level.is_empty() && NESTED_RECORDS.contains(&key.as_str()) {
                        continue;
                    }
                    assert_eq!(after.get(key), Some(value));
                }
            }
        }
    }

    #[test]
    fn redact_does_not_mutate_input() {
        let input = vec![sample()];
        let snapshot = input.clone();

        let _ = SampleRedactor::default().redact(&input);

        assert_eq!(input, snapshot);
    }

    #[test]
    fn redact_tolerates_missing_fields() {
        let input = vec![
            json!({"submitterSampleId": "S1"}),
            json!({"sampleId": "SA1", "specimen": {}, "donor": null}),
        ];

        let redacted = SampleRedactor::default().redact(&input);

        assert_eq!(
            redacted,
            vec![
                json!({"submitterSampleId": "S1"}),
                json!({"specimen": {}, "donor": null}),
            ]
        );
    }

    #[test]
    fn redact_preserves_order() {
        let input: Vec<Value> = (0..5)
            .map(|i| json!({"sampleId": format!("SA{}", i), "submitterSampleId": i}))
            .collect();

        let redacted = SampleRedactor::default().redact(&input);

        let ids: Vec<_> = redacted
            .iter()
            .map(|s| s["submitterSampleId"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn redact_custom_fields() {
        let redactor = SampleRedactor::new(&["secret"], &["child"]);

        let redacted = redactor.redact(&[json!({
            "secret": 1,
            "keep": 2,
            "child": {"secret": 3, "keep": 4, "grandchild": {"secret": 5}}
        })]);

        assert_eq!(
            redacted,
            vec![json!({"keep": 2, "child": {"keep": 4, "grandchild": {"secret": 5}}})]
        );
    }
}
