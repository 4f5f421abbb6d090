//! Generation error types.

/// Invalid generation parameters, reported before any body is generated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerationError {
    /// A `min..max` pair is inverted or not a number.
    #[error("invalid range for {field}: min {min} is greater than max {max}")]
    InvalidRange {
        /// Config path of the offending range.
        field: &'static str,
        /// Configured minimum.
        min: f64,
        /// Configured maximum.
        max: f64,
    },

    /// A probability lies outside `[0, 1]`.
    #[error("{field} must be within [0, 1], got {value}")]
    InvalidProbability {
        /// Config path of the offending value.
        field: &'static str,
        /// Configured value.
        value: f64,
    },

    /// A size or distance that must be strictly positive is not.
    #[error("{field} must be positive, got {value}")]
    NonPositive {
        /// Config path of the offending value.
        field: &'static str,
        /// Configured value.
        value: f64,
    },
}
