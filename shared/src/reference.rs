//! Static reference tables: monthly climate, crop catalog and soil catalog
//!
//! The tables are read-only for the lifetime of the process. Consumers go
//! through [`ReferenceTables`] so tests and alternative data sets can plug
//! in their own tables.

use crate::models::{ClimateRecord, Crop, SoilType};
use crate::types::{Month, Season};

/// Read-only lookup service over the climate, crop and soil tables
pub trait ReferenceTables: Send + Sync {
    /// One record per month, in calendar order
    fn climate(&self) -> &[ClimateRecord];

    fn crops(&self) -> &[Crop];

    fn soils(&self) -> &[SoilType];

    fn crop(&self, id: &str) -> Option<&Crop> {
        self.crops().iter().find(|c| c.id == id)
    }

    fn soil(&self, id: &str) -> Option<&SoilType> {
        self.soils().iter().find(|s| s.id == id)
    }

    /// Months whose climate record lists the crop as suitable, in calendar order
    fn suitable_months(&self, crop_id: &str) -> Vec<Month> {
        self.climate()
            .iter()
            .filter(|record| record.is_suitable_for(crop_id))
            .map(|record| record.month)
            .collect()
    }
}

/// In-memory reference tables
#[derive(Debug, Clone)]
pub struct StaticReferenceTables {
    climate: Vec<ClimateRecord>,
    crops: Vec<Crop>,
    soils: Vec<SoilType>,
}

impl StaticReferenceTables {
    /// Build tables from arbitrary data. Climate records are sorted into
    /// calendar order.
    pub fn new(mut climate: Vec<ClimateRecord>, crops: Vec<Crop>, soils: Vec<SoilType>) -> Self {
        climate.sort_by_key(|record| record.month);
        Self {
            climate,
            crops,
            soils,
        }
    }

    /// The tables shipped with the application
    pub fn builtin() -> Self {
        Self::new(builtin_climate(), builtin_crops(), builtin_soils())
    }
}

impl ReferenceTables for StaticReferenceTables {
    fn climate(&self) -> &[ClimateRecord] {
        &self.climate
    }

    fn crops(&self) -> &[Crop] {
        &self.crops
    }

    fn soils(&self) -> &[SoilType] {
        &self.soils
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn month(
    month: Month,
    temperature: f64,
    rainfall: f64,
    humidity: f64,
    suitable_crops: &[&str],
    season: Season,
) -> ClimateRecord {
    ClimateRecord {
        month,
        temperature,
        rainfall,
        humidity,
        suitable_crops: strings(suitable_crops),
        season,
    }
}

fn builtin_climate() -> Vec<ClimateRecord> {
    use Month::*;
    use Season::*;

    vec![
        month(January, 17.0, 18.0, 62.0, &["sugarcane", "tomato"], Rabi),
        month(February, 20.0, 20.0, 55.0, &["maize", "sugarcane", "tomato"], Rabi),
        month(March, 25.0, 15.0, 45.0, &["maize", "sugarcane"], Zaid),
        month(April, 30.0, 12.0, 40.0, &["cotton"], Zaid),
        month(May, 33.0, 25.0, 45.0, &["cotton"], Zaid),
        month(June, 31.0, 150.0, 70.0, &["rice", "maize", "cotton", "tomato"], Kharif),
        month(July, 29.0, 280.0, 82.0, &["rice", "maize", "tomato"], Kharif),
        month(August, 28.0, 260.0, 84.0, &["rice"], Kharif),
        month(September, 28.0, 170.0, 78.0, &["mustard"], Kharif),
        month(
            October,
            26.0,
            60.0,
            68.0,
            &["wheat", "mustard", "chickpea", "sugarcane"],
            Rabi,
        ),
        month(November, 22.0, 15.0, 62.0, &["wheat", "chickpea", "tomato"], Rabi),
        month(December, 18.0, 10.0, 63.0, &["wheat", "tomato"], Rabi),
    ]
}

fn crop(
    id: &str,
    name: &str,
    season: Season,
    growth_duration: &str,
    ideal_temperature: &str,
    water_requirement: &str,
    soil_preference: &[&str],
) -> Crop {
    Crop {
        id: id.to_string(),
        name: name.to_string(),
        season,
        growth_duration: growth_duration.to_string(),
        ideal_temperature: ideal_temperature.to_string(),
        water_requirement: water_requirement.to_string(),
        soil_preference: strings(soil_preference),
    }
}

fn builtin_crops() -> Vec<Crop> {
    use Season::*;

    vec![
        crop("rice", "Rice", Kharif, "120-150 days", "20-35°C", "High", &["clay", "alluvial"]),
        crop("wheat", "Wheat", Rabi, "110-130 days", "10-25°C", "Medium", &["alluvial", "black"]),
        crop("maize", "Maize", Kharif, "90-110 days", "18-27°C", "Medium", &["alluvial", "red"]),
        crop("cotton", "Cotton", Kharif, "150-180 days", "21-30°C", "Medium", &["black"]),
        crop(
            "sugarcane",
            "Sugarcane",
            Perennial,
            "10-18 months",
            "20-35°C",
            "High",
            &["alluvial", "black"],
        ),
        crop("mustard", "Mustard", Rabi, "110-140 days", "10-25°C", "Low", &["alluvial", "sandy"]),
        crop("chickpea", "Chickpea", Rabi, "90-120 days", "15-25°C", "Low", &["black", "sandy"]),
        crop(
            "tomato",
            "Tomato",
            Zaid,
            "60-90 days",
            "20-27°C",
            "Medium",
            &["red", "sandy", "alluvial"],
        ),
    ]
}

fn soil(id: &str, name: &str, description: &str, characteristics: &[&str]) -> SoilType {
    SoilType {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        characteristics: strings(characteristics),
    }
}

fn builtin_soils() -> Vec<SoilType> {
    vec![
        soil(
            "alluvial",
            "Alluvial Soil",
            "Deposited by rivers, found across the northern plains",
            &["high natural fertility", "good water retention", "rich potash content"],
        ),
        soil(
            "black",
            "Black Soil",
            "Clay-rich soil formed from volcanic rock",
            &["high moisture retention", "rich calcium and magnesium", "self-ploughing cracks"],
        ),
        soil(
            "red",
            "Red Soil",
            "Iron-rich soil formed from crystalline rock",
            &["good drainage", "iron oxide content"],
        ),
        soil(
            "laterite",
            "Laterite Soil",
            "Leached soil of high-rainfall regions",
            &["good drainage", "suitability for plantation crops"],
        ),
        soil(
            "sandy",
            "Sandy Soil",
            "Light, loose soil with large particles",
            &["fast warming in spring", "easy tillage", "good aeration"],
        ),
        soil(
            "clay",
            "Clay Soil",
            "Heavy soil with fine particles",
            &["high water holding capacity", "high nutrient retention"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_climate_covers_every_month_once() {
        let tables = StaticReferenceTables::builtin();
        let months: Vec<Month> = tables.climate().iter().map(|r| r.month).collect();
        assert_eq!(months, Month::ALL.to_vec());
    }

    #[test]
    fn builtin_crop_ids_are_referenced_by_climate() {
        let tables = StaticReferenceTables::builtin();
        for crop in tables.crops() {
            assert!(
                !tables.suitable_months(&crop.id).is_empty(),
                "crop {} has no planting month",
                crop.id
            );
        }
    }

    #[test]
    fn builtin_soil_preferences_exist() {
        let tables = StaticReferenceTables::builtin();
        for crop in tables.crops() {
            for soil_id in &crop.soil_preference {
                assert!(tables.soil(soil_id).is_some(), "unknown soil {}", soil_id);
            }
        }
    }

    #[test]
    fn suitable_months_in_calendar_order() {
        let tables = StaticReferenceTables::builtin();
        assert_eq!(
            tables.suitable_months("tomato"),
            vec![
                Month::January,
                Month::February,
                Month::June,
                Month::July,
                Month::November,
                Month::December
            ]
        );
    }

    #[test]
    fn new_sorts_climate_records() {
        let records = builtin_climate().into_iter().rev().collect();
        let tables = StaticReferenceTables::new(records, vec![], vec![]);
        assert_eq!(tables.climate()[0].month, Month::January);
        assert_eq!(tables.climate()[11].month, Month::December);
    }

    #[test]
    fn unknown_ids_are_absent() {
        let tables = StaticReferenceTables::builtin();
        assert!(tables.crop("quinoa").is_none());
        assert!(tables.soil("peat").is_none());
        assert!(tables.suitable_months("quinoa").is_empty());
    }
}
