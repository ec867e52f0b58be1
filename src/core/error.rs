//! Everything that can go wrong during an integration.
use thiserror::Error;

/// Error type returned by the integrators of this crate.
///
/// None of these errors is fatal: the integrators log them and hand them back to the caller, who
/// may fall back to a zero estimate with the `*_or_zero` functions.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum IntegrationError {
    /// The sample size is zero, the bound vectors have a rank different from one, differ in length
    /// or are empty.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The upper bound is below the lower bound, or one of the bounds is not finite.
    #[error("invalid bounds in dimension {dimension}: upper bound below lower bound or not finite")]
    InvalidBounds {
        /// Zero-based index of the first offending dimension.
        dimension: usize,
    },

    /// The volume of the integration box is zero or negative.
    #[error("integration volume is zero or negative")]
    DegenerateVolume,

    /// The integrand returned an empty value batch or one that does not match the samples.
    #[error("integrand failure: {0}")]
    IntegrandFailure(String),

    /// Anything else, including errors and panics raised inside the integrand.
    #[error("internal failure: {0}")]
    InternalFailure(String),
}
