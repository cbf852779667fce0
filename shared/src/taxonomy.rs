//! Disease taxonomy table: per-class symptoms, treatment and prevention advice

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::LookupError;
use crate::models::DiseaseClass;

/// Advisory content for one disease class
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiseaseAdvice {
    pub symptoms: Vec<String>,
    pub treatment: Vec<String>,
    pub prevention: Vec<String>,
}

/// Errors when loading a taxonomy table from JSON
#[derive(Error, Debug)]
pub enum TaxonomyError {
    #[error("Invalid taxonomy JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Taxonomy has no entry for {0}")]
    MissingClass(DiseaseClass),
}

/// Mapping from disease class to its advisory content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiseaseTaxonomy {
    entries: BTreeMap<DiseaseClass, DiseaseAdvice>,
}

impl DiseaseTaxonomy {
    /// Build a taxonomy from arbitrary entries. Classes without an entry
    /// fail at lookup time.
    pub fn new(entries: BTreeMap<DiseaseClass, DiseaseAdvice>) -> Self {
        Self { entries }
    }

    /// Parse a JSON object keyed by class id, e.g.
    /// `{"rice_blast": {"symptoms": [...], "treatment": [...], "prevention": [...]}}`.
    ///
    /// Every known class must be present.
    pub fn from_json_str(json: &str) -> Result<Self, TaxonomyError> {
        let entries: BTreeMap<DiseaseClass, DiseaseAdvice> = serde_json::from_str(json)?;
        if let Some(missing) = DiseaseClass::ALL
            .iter()
            .find(|class| !entries.contains_key(*class))
        {
            return Err(TaxonomyError::MissingClass(*missing));
        }
        Ok(Self { entries })
    }

    /// Advice for the given class
    pub fn advice(&self, class: DiseaseClass) -> Result<&DiseaseAdvice, LookupError> {
        self.entries
            .get(&class)
            .ok_or_else(|| LookupError::UnknownDisease(class.id().to_string()))
    }

    /// General extension-style guidance shipped with the application.
    /// Deployments with agronomist-reviewed content load it from JSON instead.
    pub fn builtin() -> Self {
        let mut entries = BTreeMap::new();

        entries.insert(
            DiseaseClass::TomatoLateBlight,
            advice(
                &[
                    "Dark, water-soaked lesions on leaves that spread quickly",
                    "White mould on the underside of leaves in humid weather",
                    "Firm, greasy brown patches on fruit",
                ],
                &[
                    "Remove and destroy infected plants and fruit",
                    "Apply a fungicide registered for late blight",
                    "Stop overhead irrigation to keep foliage dry",
                ],
                &[
                    "Plant tolerant varieties",
                    "Space and stake plants for good air movement",
                    "Rotate away from tomato and potato",
                    "Scout often during cool, wet weather",
                ],
            ),
        );

        entries.insert(
            DiseaseClass::RiceBlast,
            advice(
                &[
                    "Spindle-shaped leaf lesions with grey centres and brown margins",
                    "Dark lesions at the panicle neck that cause it to break",
                    "Empty or partly filled grains",
                ],
                &[
                    "Apply a registered fungicide when lesions first appear",
                    "Hold back nitrogen top-dressing while the disease is active",
                    "Keep field flooding steady",
                ],
                &[
                    "Use blast-resistant varieties",
                    "Treat seed before sowing",
                    "Avoid excess nitrogen fertiliser",
                    "Destroy infected straw and stubble",
                ],
            ),
        );

        entries.insert(
            DiseaseClass::WheatRust,
            advice(
                &[
                    "Orange to reddish-brown pustules on leaves and stems",
                    "Powdery spores that rub off on the fingers",
                    "Yellowing and early drying of leaves",
                ],
                &[
                    "Apply a registered fungicide when pustules first appear",
                    "Prioritise fields at the flag-leaf stage",
                    "Remove volunteer wheat that carries the disease",
                ],
                &[
                    "Grow rust-resistant varieties",
                    "Sow at the recommended time",
                    "Avoid dense stands and excess nitrogen",
                    "Check fields weekly from tillering onwards",
                ],
            ),
        );

        Self { entries }
    }
}

impl Default for DiseaseTaxonomy {
    fn default() -> Self {
        Self::builtin()
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn advice(symptoms: &[&str], treatment: &[&str], prevention: &[&str]) -> DiseaseAdvice {
    DiseaseAdvice {
        symptoms: owned(symptoms),
        treatment: owned(treatment),
        prevention: owned(prevention),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_every_class() {
        let taxonomy = DiseaseTaxonomy::builtin();
        for class in DiseaseClass::ALL {
            assert!(taxonomy.advice(class).is_ok(), "missing {}", class);
        }
    }

    #[test]
    fn builtin_content_is_per_class() {
        let taxonomy = DiseaseTaxonomy::builtin();
        let blight = taxonomy.advice(DiseaseClass::TomatoLateBlight).unwrap();
        let blast = taxonomy.advice(DiseaseClass::RiceBlast).unwrap();
        let rust = taxonomy.advice(DiseaseClass::WheatRust).unwrap();

        assert_ne!(blight.symptoms, blast.symptoms);
        assert_ne!(blast.symptoms, rust.symptoms);
        assert_ne!(blight.treatment, rust.treatment);
    }

    #[test]
    fn missing_entry_is_lookup_error() {
        let taxonomy = DiseaseTaxonomy::new(BTreeMap::new());
        assert_eq!(
            taxonomy.advice(DiseaseClass::WheatRust),
            Err(LookupError::UnknownDisease("wheat_rust".to_string()))
        );
    }

    #[test]
    fn json_requires_every_class() {
        let json = r#"{
            "rice_blast": {"symptoms": ["a"], "treatment": ["b"], "prevention": ["c"]}
        }"#;
        let err = DiseaseTaxonomy::from_json_str(json).unwrap_err();
        assert!(matches!(
            err,
            TaxonomyError::MissingClass(DiseaseClass::TomatoLateBlight)
        ));
    }

    #[test]
    fn json_round_trip_of_full_table() {
        let json = r#"{
            "tomato_late_blight": {"symptoms": ["s1"], "treatment": ["t1"], "prevention": ["p1"]},
            "rice_blast": {"symptoms": ["s2"], "treatment": ["t2"], "prevention": ["p2"]},
            "wheat_rust": {"symptoms": ["s3"], "treatment": ["t3"], "prevention": ["p3"]}
        }"#;
        let taxonomy = DiseaseTaxonomy::from_json_str(json).unwrap();
        assert_eq!(
            taxonomy.advice(DiseaseClass::RiceBlast).unwrap().treatment,
            vec!["t2".to_string()]
        );
    }

    #[test]
    fn json_rejects_unknown_class_ids() {
        let json = r#"{"leaf_curl": {"symptoms": [], "treatment": [], "prevention": []}}"#;
        assert!(matches!(
            DiseaseTaxonomy::from_json_str(json),
            Err(TaxonomyError::Parse(_))
        ));
    }
}
