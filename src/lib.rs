#![warn(clippy::all, clippy::cargo, clippy::nursery, clippy::pedantic)]
#![warn(missing_docs)]

//! The crate `boxmc` provides plain [Monte Carlo integration] over axis-aligned boxes of any
//! dimension, for integrands that evaluate a whole batch of points at once.
//!
//! Given the box $[a_1, b_1) \times \ldots \times [a_d, b_d)$ with volume
//! $V = \prod_{i=1}^d (b_i - a_i)$ the integral
//!
//! $$ I = \int_{a_1}^{b_1} \mathrm{d} x_1 \cdots \int_{a_d}^{b_d} \mathrm{d} x_d \, f(x_1, \ldots, x_d) $$
//!
//! is approximated by
//!
//! $$ I \approx \frac{V}{N} \sum_{j=1}^N f \left( x_1^{(j)}, \ldots, x_d^{(j)} \right) $$
//!
//! where the $N$ points are uniformly distributed inside the box.
//!
//! # Features
//!
//! - **Batched integrands**. The integrand is called once per integration with an $N \times d$
//! [`ndarray`] of points and returns one value per point, which lets it use vectorized array
//! arithmetic. Closures are turned into integrands with [`batch_fn`] and [`try_batch_fn`].
//! - **Generic numeric type**. Every float type implementing the `Float` trait from `num-traits`
//! can be used, in particular `f32` and `f64`.
//! - **Explicit random number generator**. Each call takes the generator it draws from, any
//! generator implementing `Rng` from the `rand` crate. Results only depend on the generator and
//! its seed.
//! - **Execution contexts**. Sample generation, mapping and reduction run either on the calling
//! thread or on several threads, see [`ExecutionContext`]. The sample points do not depend on the
//! number of threads.
//! - **Errors instead of crashes**. Invalid input, failing integrands and even panicking integrands
//! never abort the caller; every problem is logged with the `log` crate and returned as an
//! [`IntegrationError`]. Callers that prefer a plain zero use the `*_or_zero` functions.
//!
//! # How do I get started?
//!
//! ```
//! use boxmc::integrators::{plain, scalar};
//! use boxmc::{batch_fn, ExecutionContext};
//! use ndarray::{arr1, ArrayView2};
//! use rand_pcg::Pcg64;
//!
//! let mut rng = Pcg64::new(0xcafef00dd15ea5e5, 0xa02bdbf7bb3c0a7ac28fa16a64abf96);
//!
//! // f(x) = x^2 from 0 to 1 is 1/3
//! let square = batch_fn(|x: ArrayView2<f64>| x.mapv(|v| v * v));
//! let result =
//!     scalar::integrate(&square, 0.0, 1.0, 100_000, ExecutionContext::Sequential, &mut rng)
//!         .unwrap();
//! assert!((result - 1.0 / 3.0).abs() < 0.01);
//!
//! // f(x, y) = x * y over [0,1]x[0,2] is 1
//! let product = batch_fn(|x: ArrayView2<f64>| &x.column(0) * &x.column(1));
//! let result = plain::integrate(
//!     &product,
//!     &arr1(&[0.0, 0.0]),
//!     &arr1(&[1.0, 2.0]),
//!     100_000,
//!     ExecutionContext::Parallel { threads: 2 },
//!     &mut rng,
//! )
//! .unwrap();
//! assert!((result - 1.0).abs() < 0.02);
//! ```
//!
//! [Monte Carlo integration]: https://en.wikipedia.org/wiki/Monte_Carlo_integration

mod backend;
pub mod config;
pub mod core;
pub mod integrators;

pub use crate::core::error::IntegrationError;
pub use crate::core::*;
