//! The core module: the integrand interface and the execution context.
pub mod error;

use ndarray::{Array, ArrayD, ArrayView2, Dimension};
use serde::{Deserialize, Serialize};
use std::error::Error;

/// Error an integrand may return when it cannot evaluate a batch.
pub type IntegrandError = Box<dyn Error + Send + Sync>;

/// Integrand trait
///
/// An integrand is evaluated once per integration, on the whole batch of sample points. The
/// batch has one row per sample and one column per dimension of the integration box; the returned
/// array must contain exactly one value per row. Its shape does not matter, it is flattened before
/// the values are averaged.
pub trait Integrand<T> {
    /// Evaluate the integrand on every row of `samples`.
    fn call(&self, samples: ArrayView2<'_, T>) -> Result<ArrayD<T>, IntegrandError>;
}

/// Integrand created from an infallible closure, see [`batch_fn`].
#[derive(Clone, Copy, Debug)]
pub struct BatchFn<F>(F);

/// Integrand created from a fallible closure, see [`try_batch_fn`].
#[derive(Clone, Copy, Debug)]
pub struct TryBatchFn<F>(F);

/// Turn the closure `f`, mapping a batch of points to an array of values, into an [`Integrand`].
///
/// ```
/// use boxmc::batch_fn;
/// use ndarray::ArrayView2;
///
/// // f(x, y) = x * y
/// let integrand = batch_fn(|x: ArrayView2<f64>| &x.column(0) * &x.column(1));
/// # let _ = integrand;
/// ```
pub fn batch_fn<T, D, F>(f: F) -> BatchFn<F>
where
    D: Dimension,
    F: Fn(ArrayView2<'_, T>) -> Array<T, D>,
{
    BatchFn(f)
}

/// Like [`batch_fn`], but for closures that can fail. An `Err` aborts the integration with
/// [`IntegrationError::InternalFailure`](crate::IntegrationError::InternalFailure).
pub fn try_batch_fn<T, D, E, F>(f: F) -> TryBatchFn<F>
where
    D: Dimension,
    E: Into<IntegrandError>,
    F: Fn(ArrayView2<'_, T>) -> Result<Array<T, D>, E>,
{
    TryBatchFn(f)
}

impl<T, D, F> Integrand<T> for BatchFn<F>
where
    D: Dimension,
    F: Fn(ArrayView2<'_, T>) -> Array<T, D>,
{
    fn call(&self, samples: ArrayView2<'_, T>) -> Result<ArrayD<T>, IntegrandError> {
        Ok((self.0)(samples).into_dyn())
    }
}

impl<T, D, E, F> Integrand<T> for TryBatchFn<F>
where
    D: Dimension,
    E: Into<IntegrandError>,
    F: Fn(ArrayView2<'_, T>) -> Result<Array<T, D>, E>,
{
    fn call(&self, samples: ArrayView2<'_, T>) -> Result<ArrayD<T>, IntegrandError> {
        (self.0)(samples).map(Array::into_dyn).map_err(Into::into)
    }
}

/// Selects where the array operations of an integration run.
///
/// The integrators never look at this value, they only hand it to the array backend. Results do
/// not depend on it beyond rounding: the sample points are identical for every context, only the
/// order in which the function values are summed changes.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionContext {
    /// Everything runs on the calling thread.
    Sequential,
    /// Sample generation, mapping and reduction are split across `threads` scoped threads.
    Parallel {
        /// Number of worker threads. Zero is treated as one.
        threads: usize,
    },
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self::Sequential
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array1};

    #[test]
    fn batch_fn_flattens_to_dyn() {
        let integrand = batch_fn(|x: ArrayView2<f64>| x.mapv(|v| 2.0 * v));
        let samples = array![[1.0, 2.0], [3.0, 4.0]];
        let values = integrand.call(samples.view()).unwrap();

        assert_eq!(values.shape(), &[2, 2]);
        assert_eq!(values.iter().copied().collect::<Vec<_>>(), vec![2.0, 4.0, 6.0, 8.0]);
    }

    #[test]
    fn try_batch_fn_forwards_errors() {
        let integrand = try_batch_fn(|_: ArrayView2<f64>| -> Result<Array1<f64>, String> {
            Err("singular point".to_string())
        });
        let samples = array![[0.0]];
        let err = integrand.call(samples.view()).unwrap_err();

        assert_eq!(err.to_string(), "singular point");
    }

    #[test]
    fn execution_context_serialization() {
        let parallel = ExecutionContext::Parallel { threads: 4 };
        let json = serde_json::to_string(&parallel).unwrap();

        assert_eq!(json, r#"{"parallel":{"threads":4}}"#);
        assert_eq!(
            serde_json::from_str::<ExecutionContext>(&json).unwrap(),
            parallel
        );
        assert_eq!(
            serde_json::from_str::<ExecutionContext>(r#""sequential""#).unwrap(),
            ExecutionContext::default()
        );
    }
}
