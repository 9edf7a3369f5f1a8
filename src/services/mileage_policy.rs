//! Política de kilometraje
//!
//! Los odómetros son monotónicos: cualquier lectura que no aumente
//! se rechaza antes de mutar el estado.
//!
//! Las lecturas están acotadas por `MAX_MILEAGE_KM`, así una sola
//! actualización genera como máximo unas pocas centenas de alertas.

use thiserror::Error;

/// Lectura máxima aceptada de un odómetro
pub const MAX_MILEAGE_KM: i64 = 2_000_000;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MileageError {
    #[error("New mileage {proposed} must be greater than current mileage {current}")]
    NonIncreasing { current: i64, proposed: i64 },

    #[error("Mileage cannot be negative: {0}")]
    Negative(i64),

    #[error("Mileage {value} exceeds the maximum of {max} km")]
    OutOfRange { value: i64, max: i64 },
}

/// Validación pura de lecturas de odómetro
pub struct MileagePolicy;

impl MileagePolicy {
    /// Validar una nueva lectura contra la actual.
    ///
    /// La lectura se valida primero (`Negative`, `OutOfRange`) y luego
    /// contra la actual (`NonIncreasing`).
    pub fn validate(current: i64, proposed: i64) -> Result<(), MileageError> {
        Self::validate_reading(proposed)?;
        if proposed <= current {
            return Err(MileageError::NonIncreasing { current, proposed });
        }
        Ok(())
    }

    /// Validar un kilometraje absoluto (p. ej. el inicial al registrar)
    pub fn validate_reading(mileage: i64) -> Result<(), MileageError> {
        if mileage < 0 {
            return Err(MileageError::Negative(mileage));
        }
        if mileage > MAX_MILEAGE_KM {
            return Err(MileageError::OutOfRange {
                value: mileage,
                max: MAX_MILEAGE_KM,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increasing_mileage_is_valid() {
        assert_eq!(MileagePolicy::validate(0, 1), Ok(()));
        assert_eq!(MileagePolicy::validate(9_500, 31_200), Ok(()));
    }

    #[test]
    fn test_equal_or_lower_mileage_is_rejected() {
        assert_eq!(
            MileagePolicy::validate(10_000, 10_000),
            Err(MileageError::NonIncreasing { current: 10_000, proposed: 10_000 })
        );
        assert_eq!(
            MileagePolicy::validate(10_000, 9_999),
            Err(MileageError::NonIncreasing { current: 10_000, proposed: 9_999 })
        );
    }

    #[test]
    fn test_negative_mileage_is_rejected_first() {
        assert_eq!(MileagePolicy::validate(100, -1), Err(MileageError::Negative(-1)));
        assert_eq!(MileagePolicy::validate(-10, -5), Err(MileageError::Negative(-5)));
    }

    #[test]
    fn test_validate_reading() {
        assert!(MileagePolicy::validate_reading(0).is_ok());
        assert_eq!(MileagePolicy::validate_reading(-20), Err(MileageError::Negative(-20)));
    }

    #[test]
    fn test_maximum_mileage_boundary() {
        assert!(MileagePolicy::validate_reading(MAX_MILEAGE_KM).is_ok());
        assert_eq!(
            MileagePolicy::validate_reading(MAX_MILEAGE_KM + 1),
            Err(MileageError::OutOfRange { value: MAX_MILEAGE_KM + 1, max: MAX_MILEAGE_KM })
        );
        assert!(MileagePolicy::validate(MAX_MILEAGE_KM - 1, MAX_MILEAGE_KM).is_ok());
        assert_eq!(
            MileagePolicy::validate(0, i64::MAX),
            Err(MileageError::OutOfRange { value: i64::MAX, max: MAX_MILEAGE_KM })
        );
    }
}
