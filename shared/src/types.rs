//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Calendar month
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    /// All twelve months in calendar order
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// English month name
    pub fn name(&self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }

    /// 1-based month number
    pub fn number(&self) -> u8 {
        *self as u8 + 1
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Cropping season on the Indian agricultural calendar
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    /// Monsoon season, sown June to October
    Kharif,
    /// Winter season, sown October to March
    Rabi,
    /// Short summer season between Rabi and Kharif
    Zaid,
    /// Crops occupying the field across seasons
    Perennial,
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Season::Kharif => write!(f, "Kharif"),
            Season::Rabi => write!(f, "Rabi"),
            Season::Zaid => write!(f, "Zaid"),
            Season::Perennial => write!(f, "Perennial"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn months_are_in_calendar_order() {
        let numbers: Vec<u8> = Month::ALL.iter().map(Month::number).collect();
        assert_eq!(numbers, (1..=12).collect::<Vec<u8>>());
    }

    #[test]
    fn month_serializes_as_english_name() {
        let json = serde_json::to_string(&Month::September).unwrap();
        assert_eq!(json, "\"September\"");
        assert_eq!(Month::September.to_string(), "September");
    }

    #[test]
    fn season_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Season::Kharif).unwrap(), "\"kharif\"");
    }
}
