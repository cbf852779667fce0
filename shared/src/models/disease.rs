//! Leaf disease classification models

use serde::{Deserialize, Serialize};

use crate::error::LookupError;

/// Disease classes the leaf classifier can detect.
///
/// The order of [`DiseaseClass::ALL`] matches the order of the model's
/// output probabilities.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DiseaseClass {
    TomatoLateBlight,
    RiceBlast,
    WheatRust,
}

impl DiseaseClass {
    /// All classes, index-aligned with the model output
    pub const ALL: [DiseaseClass; 3] = [
        DiseaseClass::TomatoLateBlight,
        DiseaseClass::RiceBlast,
        DiseaseClass::WheatRust,
    ];

    /// Number of classes in the taxonomy
    pub const COUNT: usize = Self::ALL.len();

    /// Snake-case class id as used on the wire
    pub fn id(&self) -> &'static str {
        match self {
            DiseaseClass::TomatoLateBlight => "tomato_late_blight",
            DiseaseClass::RiceBlast => "rice_blast",
            DiseaseClass::WheatRust => "wheat_rust",
        }
    }

    /// Class at the given model output index
    pub fn from_index(index: usize) -> Option<DiseaseClass> {
        Self::ALL.get(index).copied()
    }

    /// Human-readable name, e.g. "Tomato Late Blight"
    pub fn display_name(&self) -> String {
        display_name_from_id(self.id())
    }
}

impl std::str::FromStr for DiseaseClass {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|c| c.id() == s)
            .copied()
            .ok_or_else(|| LookupError::UnknownDisease(s.to_string()))
    }
}

impl std::fmt::Display for DiseaseClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Turn a snake_case id into a title-cased name: underscores become spaces
/// and the first letter of every word is upper-cased.
pub fn display_name_from_id(id: &str) -> String {
    id.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Human-readable details for a detected disease
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiseaseDetails {
    pub name: String,
    pub symptoms: Vec<String>,
    pub treatment: Vec<String>,
    pub prevention: Vec<String>,
}

/// Result of classifying a leaf photograph
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassificationReport {
    pub disease: DiseaseClass,
    /// Probability of the detected class as a percentage, 0-100
    pub confidence: u8,
    pub details: DiseaseDetails,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_title_cases_each_word() {
        assert_eq!(display_name_from_id("tomato_late_blight"), "Tomato Late Blight");
        assert_eq!(display_name_from_id("rice_blast"), "Rice Blast");
        assert_eq!(display_name_from_id("wheat_rust"), "Wheat Rust");
    }

    #[test]
    fn display_name_keeps_rest_of_word() {
        assert_eq!(display_name_from_id("xYz_abc"), "XYz Abc");
    }

    #[test]
    fn class_index_alignment() {
        assert_eq!(DiseaseClass::from_index(0), Some(DiseaseClass::TomatoLateBlight));
        assert_eq!(DiseaseClass::from_index(1), Some(DiseaseClass::RiceBlast));
        assert_eq!(DiseaseClass::from_index(2), Some(DiseaseClass::WheatRust));
        assert_eq!(DiseaseClass::from_index(3), None);
    }

    #[test]
    fn parse_class_id() {
        assert_eq!("rice_blast".parse::<DiseaseClass>(), Ok(DiseaseClass::RiceBlast));
        assert_eq!(
            "leaf_curl".parse::<DiseaseClass>(),
            Err(LookupError::UnknownDisease("leaf_curl".to_string()))
        );
    }

    #[test]
    fn class_serializes_as_id() {
        let json = serde_json::to_string(&DiseaseClass::TomatoLateBlight).unwrap();
        assert_eq!(json, "\"tomato_late_blight\"");
    }
}
