//! One-dimensional integration with scalar bounds.
//!
//! The functions in this module wrap the bounds into arrays of length one and hand them to
//! [`plain::integrate`](super::plain::integrate). The integrand therefore still receives a batch
//! of shape `samples` x 1.
use super::log_outcome;
use super::plain;
use crate::core::error::IntegrationError;
use crate::core::{ExecutionContext, Integrand};

use ndarray::arr1;
use num_traits::{Float, FromPrimitive};
use rand::distributions::{Distribution, Standard};
use rand::Rng;
use std::fmt::Debug;

/// Integrate `integrand` from `lower` to `upper` using `samples` points.
///
/// With the same generator state, this returns exactly what
/// [`plain::integrate`](super::plain::integrate) returns for the bounds `[lower]` and `[upper]`.
///
/// # Errors
///
/// See [`plain::integrate`](super::plain::integrate).
pub fn integrate<T, I, R>(
    integrand: &I,
    lower: T,
    upper: T,
    samples: usize,
    context: ExecutionContext,
    rng: &mut R,
) -> Result<T, IntegrationError>
where
    T: Debug + Float + FromPrimitive + Send + Sync,
    I: Integrand<T>,
    R: Clone + Rng + Send,
    Standard: Distribution<T>,
{
    let result = if samples == 0 {
        Err(IntegrationError::InvalidArgument(
            "number of samples must be greater than 0".to_string(),
        ))
    } else {
        plain::integrate_box(
            integrand,
            &arr1(&[lower]),
            &arr1(&[upper]),
            samples,
            context,
            rng,
        )
    };

    log_outcome("scalar::integrate", &result);
    result
}

/// Same as [`integrate`], but returns zero instead of an error. The error is still logged.
pub fn integrate_or_zero<T, I, R>(
    integrand: &I,
    lower: T,
    upper: T,
    samples: usize,
    context: ExecutionContext,
    rng: &mut R,
) -> T
where
    T: Debug + Float + FromPrimitive + Send + Sync,
    I: Integrand<T>,
    R: Clone + Rng + Send,
    Standard: Distribution<T>,
{
    integrate(integrand, lower, upper, samples, context, rng).unwrap_or_else(|_| T::zero())
}
