//! Error types for the reveal core.
//!
//! The algorithms themselves never fail — every degenerate input has a
//! clamped fallback.  Only configuration can be rejected, and only at
//! construction time.

use thiserror::Error;

/// Reasons an [`AnimationConfig`](super::progress::AnimationConfig) can be
/// rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be within [0, 1], got {value}")]
    OutOfRange { field: &'static str, value: f64 },

    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("min_threshold ({min}) must not exceed max_threshold ({max})")]
    InvertedThresholds { min: f64, max: f64 },
}

/// Check that `value` is a finite fraction in `[0, 1]`.
pub(crate) fn unit_fraction(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite { field });
    }
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::OutOfRange { field, value });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bounds() {
        assert_eq!(unit_fraction("x", 0.0), Ok(0.0));
        assert_eq!(unit_fraction("x", 1.0), Ok(1.0));
    }

    #[test]
    fn rejects_nan_and_out_of_range() {
        assert_eq!(
            unit_fraction("start_offset", f64::NAN),
            Err(ConfigError::NotFinite { field: "start_offset" })
        );
        assert!(matches!(
            unit_fraction("end_offset", 1.5),
            Err(ConfigError::OutOfRange { field: "end_offset", .. })
        ));
    }

    #[test]
    fn message_names_the_field() {
        let err = ConfigError::OutOfRange { field: "start_offset", value: -0.5 };
        assert_eq!(err.to_string(), "start_offset must be within [0, 1], got -0.5");
    }
}
