//! Diagnostic composer: turns a detected class into a disease report

use std::sync::Arc;

use shared::{ClassificationReport, DiseaseClass, DiseaseDetails, DiseaseTaxonomy, LookupError};

/// Builds classification reports from the disease taxonomy table
#[derive(Clone)]
pub struct DiagnosticService {
    taxonomy: Arc<DiseaseTaxonomy>,
}

impl DiagnosticService {
    pub fn new(taxonomy: Arc<DiseaseTaxonomy>) -> Self {
        Self { taxonomy }
    }

    /// Compose the report for a detected class and its confidence (0-100)
    pub fn compose(
        &self,
        detected: DiseaseClass,
        confidence: u8,
    ) -> Result<ClassificationReport, LookupError> {
        let advice = self.taxonomy.advice(detected)?;

        Ok(ClassificationReport {
            disease: detected,
            confidence: confidence.min(100),
            details: DiseaseDetails {
                name: detected.display_name(),
                symptoms: advice.symptoms.clone(),
                treatment: advice.treatment.clone(),
                prevention: advice.prevention.clone(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn composes_named_report() {
        let service = DiagnosticService::new(Arc::new(DiseaseTaxonomy::builtin()));
        let report = service.compose(DiseaseClass::RiceBlast, 70).unwrap();

        assert_eq!(report.disease, DiseaseClass::RiceBlast);
        assert_eq!(report.confidence, 70);
        assert_eq!(report.details.name, "Rice Blast");
        assert!(!report.details.symptoms.is_empty());
        assert!(!report.details.treatment.is_empty());
        assert!(!report.details.prevention.is_empty());
    }

    #[test]
    fn reports_differ_per_class() {
        let service = DiagnosticService::new(Arc::new(DiseaseTaxonomy::builtin()));
        let blight = service.compose(DiseaseClass::TomatoLateBlight, 90).unwrap();
        let rust = service.compose(DiseaseClass::WheatRust, 90).unwrap();

        assert_eq!(blight.details.name, "Tomato Late Blight");
        assert_eq!(rust.details.name, "Wheat Rust");
        assert_ne!(blight.details.symptoms, rust.details.symptoms);
    }

    #[test]
    fn missing_taxonomy_entry_is_lookup_error() {
        let service = DiagnosticService::new(Arc::new(DiseaseTaxonomy::new(BTreeMap::new())));
        assert_eq!(
            service.compose(DiseaseClass::WheatRust, 50),
            Err(LookupError::UnknownDisease("wheat_rust".to_string()))
        );
    }

    #[test]
    fn report_wire_format() {
        let service = DiagnosticService::new(Arc::new(DiseaseTaxonomy::builtin()));
        let report = service.compose(DiseaseClass::TomatoLateBlight, 81).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["disease"], "tomato_late_blight");
        assert_eq!(json["confidence"], 81);
        assert_eq!(json["details"]["name"], "Tomato Late Blight");
        assert!(json["details"]["symptoms"].is_array());
        assert!(json["details"]["treatment"].is_array());
        assert!(json["details"]["prevention"].is_array());
    }
}
