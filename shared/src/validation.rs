//! Validation utilities for Crop Advisor requests

use crate::error::InputError;

/// Validate a scoring request before it reaches the scorer.
///
/// Both ids must be non-blank and the desired yield must be a finite,
/// positive number.
pub fn validate_scoring_input(
    crop_id: &str,
    soil_id: &str,
    desired_yield: f64,
) -> Result<(), InputError> {
    if crop_id.trim().is_empty() {
        return Err(InputError::MissingCrop);
    }
    if soil_id.trim().is_empty() {
        return Err(InputError::MissingSoil);
    }
    validate_desired_yield(desired_yield)
}

/// Desired yield must be finite and greater than zero
pub fn validate_desired_yield(desired_yield: f64) -> Result<(), InputError> {
    if !desired_yield.is_finite() || desired_yield <= 0.0 {
        return Err(InputError::InvalidYield(desired_yield));
    }
    Ok(())
}

/// An uploaded image field must carry at least one byte
pub fn validate_image_upload(bytes: &[u8]) -> Result<(), InputError> {
    if bytes.is_empty() {
        return Err(InputError::MissingImage);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_request() {
        assert_eq!(validate_scoring_input("rice", "clay", 10.0), Ok(()));
    }

    #[test]
    fn rejects_blank_ids() {
        assert_eq!(
            validate_scoring_input("", "clay", 10.0),
            Err(InputError::MissingCrop)
        );
        assert_eq!(
            validate_scoring_input("rice", "  ", 10.0),
            Err(InputError::MissingSoil)
        );
    }

    #[test]
    fn rejects_non_positive_yield() {
        assert_eq!(
            validate_scoring_input("rice", "clay", 0.0),
            Err(InputError::InvalidYield(0.0))
        );
        assert_eq!(
            validate_scoring_input("rice", "clay", -2.5),
            Err(InputError::InvalidYield(-2.5))
        );
        assert!(validate_desired_yield(f64::INFINITY).is_err());
        assert!(validate_desired_yield(f64::NAN).is_err());
    }

    #[test]
    fn rejects_empty_upload() {
        assert_eq!(validate_image_upload(&[]), Err(InputError::MissingImage));
        assert_eq!(validate_image_upload(&[0x89, 0x50]), Ok(()));
    }
}
