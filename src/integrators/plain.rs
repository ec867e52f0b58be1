//! Plain Monte Carlo integration over an axis-aligned box.
//!
//! Given a box $[a_1, b_1) \times \ldots \times [a_d, b_d)$ with volume $V$, the integral of $f$ is
//! approximated by
//!
//! $$ I \approx \frac{V}{N} \sum_{j=1}^N f \left( x^{(j)} \right) $$
//!
//! where every coordinate $x_i^{(j)} = a_i + u_i^{(j)} (b_i - a_i)$ is obtained from a number
//! $u_i^{(j)}$ drawn uniformly from $[0, 1)$.
use super::log_outcome;
use crate::backend;
use crate::core::error::IntegrationError;
use crate::core::{ExecutionContext, Integrand};

use log::{debug, warn};
use ndarray::{Array1, ArrayBase, Data, Dimension};
use num_traits::{Float, FromPrimitive};
use rand::distributions::{Distribution, Standard};
use rand::Rng;
use std::fmt::Debug;
use std::panic::{self, AssertUnwindSafe};

/// Integrate `integrand` over the box spanned by `lower` and `upper` using `samples` points.
///
/// The bounds must be one-dimensional arrays of the same, non-zero length $d$; the integrand is
/// then called once with a `samples` x $d$ array of points inside the box. Random numbers are
/// taken from `rng`, which advances by `samples * d` draws on success. All array operations run
/// as selected by `context`.
///
/// # Errors
///
/// - [`IntegrationError::InvalidArgument`] if `samples` is zero, or the bounds are not
///   one-dimensional, differ in length or are empty,
/// - [`IntegrationError::InvalidBounds`] if in any dimension the upper bound is below the lower
///   bound, or a bound is not finite,
/// - [`IntegrationError::DegenerateVolume`] if the volume of the box is not positive, which is the
///   case if any dimension has zero width,
/// - [`IntegrationError::IntegrandFailure`] if the integrand returns no values or a number of
///   values different from `samples`,
/// - [`IntegrationError::InternalFailure`] if the integrand returns an error or panics, or a worker
///   thread fails.
///
/// Every error is logged before it is returned.
pub fn integrate<T, S1, D1, S2, D2, I, R>(
    integrand: &I,
    lower: &ArrayBase<S1, D1>,
    upper: &ArrayBase<S2, D2>,
    samples: usize,
    context: ExecutionContext,
    rng: &mut R,
) -> Result<T, IntegrationError>
where
    T: Debug + Float + FromPrimitive + Send + Sync,
    S1: Data<Elem = T>,
    S2: Data<Elem = T>,
    D1: Dimension,
    D2: Dimension,
    I: Integrand<T>,
    R: Clone + Rng + Send,
    Standard: Distribution<T>,
{
    let result = integrate_box(integrand, lower, upper, samples, context, rng);
    log_outcome("plain::integrate", &result);
    result
}

/// Same as [`integrate`], but returns zero instead of an error. The error is still logged.
pub fn integrate_or_zero<T, S1, D1, S2, D2, I, R>(
    integrand: &I,
    lower: &ArrayBase<S1, D1>,
    upper: &ArrayBase<S2, D2>,
    samples: usize,
    context: ExecutionContext,
    rng: &mut R,
) -> T
where
    T: Debug + Float + FromPrimitive + Send + Sync,
    S1: Data<Elem = T>,
    S2: Data<Elem = T>,
    D1: Dimension,
    D2: Dimension,
    I: Integrand<T>,
    R: Clone + Rng + Send,
    Standard: Distribution<T>,
{
    integrate(integrand, lower, upper, samples, context, rng).unwrap_or_else(|_| T::zero())
}

/// Does the actual work of [`integrate`] without logging.
pub(crate) fn integrate_box<T, S1, D1, S2, D2, I, R>(
    integrand: &I,
    lower: &ArrayBase<S1, D1>,
    upper: &ArrayBase<S2, D2>,
    samples: usize,
    context: ExecutionContext,
    rng: &mut R,
) -> Result<T, IntegrationError>
where
    T: Debug + Float + FromPrimitive + Send + Sync,
    S1: Data<Elem = T>,
    S2: Data<Elem = T>,
    D1: Dimension,
    D2: Dimension,
    I: Integrand<T>,
    R: Clone + Rng + Send,
    Standard: Distribution<T>,
{
    if samples == 0 {
        return Err(IntegrationError::InvalidArgument(
            "number of samples must be greater than 0".to_string(),
        ));
    }

    if lower.ndim() != 1 || upper.ndim() != 1 || lower.len() != upper.len() {
        return Err(IntegrationError::InvalidArgument(format!(
            "bounds must be one-dimensional arrays of the same size, got shapes {:?} and {:?}",
            lower.shape(),
            upper.shape()
        )));
    }

    let dim = lower.len();

    if dim == 0 {
        return Err(IntegrationError::InvalidArgument(
            "zero dimensionality".to_string(),
        ));
    }

    let lower: Array1<T> = lower.iter().copied().collect();
    let upper: Array1<T> = upper.iter().copied().collect();
    let ranges = &upper - &lower;

    // NaN and infinite bounds lead to a non-finite range
    if let Some(dimension) = ranges
        .iter()
        .position(|&r| !(r.is_finite() && r >= T::zero()))
    {
        return Err(IntegrationError::InvalidBounds { dimension });
    }

    let volume = ranges.iter().fold(T::one(), |acc, &r| acc * r);

    if volume <= T::zero() {
        return Err(IntegrationError::DegenerateVolume);
    }

    debug!(
        "sampling {} points in {} dimensions, volume {:?}",
        samples, dim, volume
    );

    let mut points = backend::uniform(context, rng, samples, dim)?;
    backend::affine_map(context, &mut points, lower.view(), ranges.view())?;

    let values = panic::catch_unwind(AssertUnwindSafe(|| integrand.call(points.view())))
        .map_err(|payload| {
            IntegrationError::InternalFailure(format!(
                "integrand panicked: {}",
                backend::panic_message(&*payload)
            ))
        })?
        .map_err(|err| {
            IntegrationError::InternalFailure(format!("integrand returned an error: {}", err))
        })?;

    if values.is_empty() {
        return Err(IntegrationError::IntegrandFailure(
            "integrand returned an empty value batch".to_string(),
        ));
    }

    if values.len() != samples {
        return Err(IntegrationError::IntegrandFailure(format!(
            "integrand returned {} values for {} samples",
            values.len(),
            samples
        )));
    }

    let estimate = backend::mean(context, &values)? * volume;

    if !estimate.is_finite() {
        warn!("integrand produced non-finite values, estimate is {:?}", estimate);
    }

    Ok(estimate)
}
