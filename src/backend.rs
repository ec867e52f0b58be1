//! Array operations the integrators are built from: drawing uniform samples, mapping them into the
//! integration box and averaging function values.
//!
//! Every operation either runs on the calling thread or splits its rows evenly across scoped
//! threads, depending on the [`ExecutionContext`]. The random numbers a row receives never depend
//! on the number of threads: each worker starts from a copy of the caller's generator and skips
//! the numbers that belong to the rows of the workers before it.
use crate::core::error::IntegrationError;
use crate::core::ExecutionContext;

use crossbeam as cb;
use log::trace;
use ndarray::{Array2, ArrayD, ArrayView1, ArrayViewMut2, Axis, Zip};
use num_traits::{Float, FromPrimitive};
use rand::distributions::{Distribution, Standard};
use rand::Rng;
use std::any::Any;
use std::borrow::Cow;

/// Number of threads to use for `rows` rows.
fn n_cores(context: ExecutionContext, rows: usize) -> usize {
    match context {
        ExecutionContext::Sequential => 1,
        ExecutionContext::Parallel { threads } => threads.max(1).min(rows.max(1)),
    }
}

/// Number of rows every core processes when `total_rows` rows are distributed over `n_cores`
/// cores. The last core may get fewer.
pub(crate) fn rows_per_core(n_cores: usize, total_rows: usize) -> usize {
    debug_assert!(n_cores > 0);
    ((total_rows + n_cores - 1) / n_cores).max(1)
}

/// Extract a readable message from the payload of a panic.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

fn worker_panicked(payload: &(dyn Any + Send)) -> IntegrationError {
    IntegrationError::InternalFailure(format!("worker thread panicked: {}", panic_message(payload)))
}

/// Draw a `rows` x `cols` array of numbers uniformly distributed in `[0, 1)`.
///
/// Afterwards `rng` has advanced by exactly `rows * cols` draws, whatever the context.
pub(crate) fn uniform<T, R>(
    context: ExecutionContext,
    rng: &mut R,
    rows: usize,
    cols: usize,
) -> Result<Array2<T>, IntegrationError>
where
    T: Float + Send,
    R: Clone + Rng + Send,
    Standard: Distribution<T>,
{
    let len = rows.checked_mul(cols).ok_or_else(|| {
        IntegrationError::InternalFailure(format!(
            "sample batch of {} x {} elements is too large",
            rows, cols
        ))
    })?;
    let n_cores = n_cores(context, rows);

    let buffer = if n_cores == 1 {
        (0..len).map(|_| rng.gen()).collect::<Vec<T>>()
    } else {
        let block = rows_per_core(n_cores, rows) * cols;
        trace!(
            "drawing {} rows on {} cores, {} numbers per core",
            rows,
            n_cores,
            block
        );

        let mut buffer = vec![T::zero(); len];
        let rng_start: &R = rng;

        let rngs = cb::thread::scope(|s| {
            let handles = buffer
                .chunks_mut(block)
                .enumerate()
                .map(|(core, chunk)| {
                    // needs to be defined before spawning the thread
                    let mut rng_local = rng_start.clone();

                    s.spawn(move |_| {
                        // skip the random numbers of the previous cores
                        for _ in 0..core * block {
                            let _: T = rng_local.gen();
                        }

                        chunk.iter_mut().for_each(|v| *v = rng_local.gen());
                        rng_local
                    })
                })
                .collect::<Vec<_>>();

            handles
                .into_iter()
                .map(|handle| handle.join())
                .collect::<Result<Vec<_>, _>>()
        })
        .map_err(|payload| worker_panicked(&*payload))?
        .map_err(|payload| worker_panicked(&*payload))?;

        // the generator of the last core has consumed the whole batch
        if let Some(rng_after) = rngs.into_iter().last() {
            *rng = rng_after;
        }

        buffer
    };

    Array2::from_shape_vec((rows, cols), buffer)
        .map_err(|err| IntegrationError::InternalFailure(err.to_string()))
}

/// Map every row `x` of `samples` from the unit hypercube into the box, `lower + x * ranges`.
pub(crate) fn affine_map<T>(
    context: ExecutionContext,
    samples: &mut Array2<T>,
    lower: ArrayView1<'_, T>,
    ranges: ArrayView1<'_, T>,
) -> Result<(), IntegrationError>
where
    T: Float + Send + Sync,
{
    let map_block = move |mut block: ArrayViewMut2<'_, T>| {
        for row in block.rows_mut() {
            Zip::from(row)
                .and(lower)
                .and(ranges)
                .for_each(|x, &l, &r| *x = l + *x * r);
        }
    };

    let rows = samples.nrows();
    let n_cores = n_cores(context, rows);

    if n_cores == 1 {
        map_block(samples.view_mut());
        return Ok(());
    }

    cb::thread::scope(|s| {
        for block in samples.axis_chunks_iter_mut(Axis(0), rows_per_core(n_cores, rows)) {
            s.spawn(move |_| map_block(block));
        }
    })
    .map_err(|payload| worker_panicked(&*payload))
}

fn sum<T: Float>(values: &[T]) -> T {
    values.iter().fold(T::zero(), |acc, &v| acc + v)
}

/// Average all elements of `values`, whatever its shape.
pub(crate) fn mean<T>(context: ExecutionContext, values: &ArrayD<T>) -> Result<T, IntegrationError>
where
    T: Float + FromPrimitive + Send + Sync,
{
    // the order of the elements does not matter for the mean
    let flat: Cow<'_, [T]> = match values.as_slice_memory_order() {
        Some(slice) => Cow::Borrowed(slice),
        None => Cow::Owned(values.iter().copied().collect()),
    };

    let count = T::from_usize(flat.len()).ok_or_else(|| {
        IntegrationError::InternalFailure(format!(
            "cannot represent {} values as a floating point number",
            flat.len()
        ))
    })?;

    let n_cores = n_cores(context, flat.len());

    let total = if n_cores == 1 {
        sum(&flat)
    } else {
        let block = rows_per_core(n_cores, flat.len());

        cb::thread::scope(|s| {
            let handles = flat
                .chunks(block)
                .map(|chunk| s.spawn(move |_| sum(chunk)))
                .collect::<Vec<_>>();

            handles
                .into_iter()
                .map(|handle| handle.join())
                .collect::<Result<Vec<_>, _>>()
        })
        .map_err(|payload| worker_panicked(&*payload))?
        .map_err(|payload| worker_panicked(&*payload))?
        .into_iter()
        .fold(T::zero(), |acc, partial| acc + partial)
    };

    Ok(total / count)
}
