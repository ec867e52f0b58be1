use boxmc::integrators::{plain, scalar};
use boxmc::{batch_fn, ExecutionContext, Integrand};

use assert_approx_eq::assert_approx_eq;
use ndarray::{arr1, ArrayView2};
use rand_pcg::Pcg64;
use std::f64::consts::{E, FRAC_PI_2, FRAC_PI_4, LN_2, PI};

// The number of calls per integration
const CALLS: usize = 1_000_000;
// Monte Carlo estimates are random, allow for a tolerance
const TOLERANCE: f64 = 0.01;

fn rng() -> Pcg64 {
    Pcg64::new(0xcafef00dd15ea5e5, 0xa02bdbf7bb3c0a7ac28fa16a64abf96)
}

fn estimate<I: Integrand<f64>>(integrand: &I, lower: f64, upper: f64) -> f64 {
    scalar::integrate(
        integrand,
        lower,
        upper,
        CALLS,
        ExecutionContext::Sequential,
        &mut rng(),
    )
    .unwrap()
}

#[test]
fn linear() {
    // f(x) = x, integral from 0 to 1 is 0.5
    let integrand = batch_fn(|x: ArrayView2<f64>| x.to_owned());
    assert_approx_eq!(estimate(&integrand, 0.0, 1.0), 0.5, TOLERANCE);
}

#[test]
fn quadratic() {
    // f(x) = x^2, integral from 0 to 1 is 1/3
    let integrand = batch_fn(|x: ArrayView2<f64>| x.mapv(|v| v.powi(2)));
    assert_approx_eq!(estimate(&integrand, 0.0, 1.0), 1.0 / 3.0, TOLERANCE);
}

#[test]
fn sine() {
    // f(x) = sin(x), integral from 0 to pi is 2
    let integrand = batch_fn(|x: ArrayView2<f64>| x.mapv(f64::sin));
    assert_approx_eq!(estimate(&integrand, 0.0, PI), 2.0, TOLERANCE);
}

#[test]
fn cosine() {
    // f(x) = cos(x), integral from 0 to pi/2 is 1
    let integrand = batch_fn(|x: ArrayView2<f64>| x.column(0).mapv(f64::cos));
    assert_approx_eq!(estimate(&integrand, 0.0, FRAC_PI_2), 1.0, TOLERANCE);
}

#[test]
fn constant() {
    // f(x) = 5, integral from 0 to 3 is 15
    let integrand = batch_fn(|x: ArrayView2<f64>| ndarray::Array1::from_elem(x.nrows(), 5.0));
    assert_approx_eq!(estimate(&integrand, 0.0, 3.0), 15.0, 1e-9);
}

#[test]
fn negative_linear() {
    // f(x) = -x + 2, integral from 0 to 2 is 2
    let integrand = batch_fn(|x: ArrayView2<f64>| x.mapv(|v| -v + 2.0));
    assert_approx_eq!(estimate(&integrand, 0.0, 2.0), 2.0, TOLERANCE);
}

#[test]
fn two_x_squared_plus_x() {
    // f(x) = 2x^2 + x, integral from 0 to 1 is 7/6
    let integrand = batch_fn(|x: ArrayView2<f64>| x.mapv(|v| 2.0 * v * v + v));
    assert_approx_eq!(estimate(&integrand, 0.0, 1.0), 7.0 / 6.0, TOLERANCE);
}

#[test]
fn exponential() {
    // f(x) = e^x, integral from 0 to 1 is e - 1
    let integrand = batch_fn(|x: ArrayView2<f64>| x.mapv(f64::exp));
    assert_approx_eq!(estimate(&integrand, 0.0, 1.0), E - 1.0, TOLERANCE);
}

#[test]
fn exponential_decay() {
    // f(x) = e^(-x), integral from 0 to 1 is 1 - 1/e
    let integrand = batch_fn(|x: ArrayView2<f64>| x.mapv(|v| (-v).exp()));
    assert_approx_eq!(estimate(&integrand, 0.0, 1.0), 1.0 - 1.0 / E, TOLERANCE);
}

#[test]
fn two_to_the_x() {
    // f(x) = 2^x, integral from 0 to 1 is 1/ln(2)
    let integrand = batch_fn(|x: ArrayView2<f64>| x.mapv(|v| 2.0_f64.powf(v)));
    assert_approx_eq!(estimate(&integrand, 0.0, 1.0), 1.0 / LN_2, TOLERANCE);
}

#[test]
fn inverse() {
    // f(x) = 1/x, integral from 1 to 2 is ln(2)
    let integrand = batch_fn(|x: ArrayView2<f64>| x.mapv(f64::recip));
    assert_approx_eq!(estimate(&integrand, 1.0, 2.0), LN_2, TOLERANCE);
}

#[test]
fn reciprocal_x_squared() {
    // f(x) = 1/x^2, integral from 1 to 2 is 0.5
    let integrand = batch_fn(|x: ArrayView2<f64>| x.mapv(|v| v.powi(-2)));
    assert_approx_eq!(estimate(&integrand, 1.0, 2.0), 0.5, TOLERANCE);
}

#[test]
fn arctan_base() {
    // f(x) = 1/(1+x^2), integral from 0 to 1 is pi/4
    let integrand = batch_fn(|x: ArrayView2<f64>| x.mapv(|v| 1.0 / (1.0 + v * v)));
    assert_approx_eq!(estimate(&integrand, 0.0, 1.0), FRAC_PI_4, TOLERANCE);
}

#[test]
fn logarithm() {
    // f(x) = ln(x), integral from 1 to e^2 is e^2 + 1; the variance of this estimate is larger
    let integrand = batch_fn(|x: ArrayView2<f64>| x.mapv(f64::ln));
    assert_approx_eq!(estimate(&integrand, 1.0, E * E), E * E + 1.0, 0.02);
}

#[test]
fn logarithm_over_x() {
    // f(x) = ln(x)/x, integral from 1 to e is 0.5
    let integrand = batch_fn(|x: ArrayView2<f64>| x.mapv(|v| v.ln() / v));
    assert_approx_eq!(estimate(&integrand, 1.0, E), 0.5, TOLERANCE);
}

#[test]
fn cube_root() {
    // f(x) = x^(1/3), integral from 0 to 8 is 12; the variance of this estimate is larger
    let integrand = batch_fn(|x: ArrayView2<f64>| x.mapv(f64::cbrt));
    assert_approx_eq!(estimate(&integrand, 0.0, 8.0), 12.0, 0.02);
}

#[test]
fn hyperbolic_cosine() {
    // f(x) = cosh(x), integral from 0 to 1 is sinh(1)
    let integrand = batch_fn(|x: ArrayView2<f64>| x.mapv(f64::cosh));
    assert_approx_eq!(estimate(&integrand, 0.0, 1.0), 1.0_f64.sinh(), TOLERANCE);
}

#[test]
fn hyperbolic_sine_squared() {
    // f(x) = sinh^2(x), integral from 0 to 1 is sinh(2)/4 - 1/2
    let integrand = batch_fn(|x: ArrayView2<f64>| x.mapv(|v| v.sinh().powi(2)));
    assert_approx_eq!(
        estimate(&integrand, 0.0, 1.0),
        2.0_f64.sinh() / 4.0 - 0.5,
        TOLERANCE
    );
}

#[test]
fn sine_squared() {
    // f(x) = sin^2(x), integral from 0 to pi is pi/2
    let integrand = batch_fn(|x: ArrayView2<f64>| x.mapv(|v| v.sin().powi(2)));
    assert_approx_eq!(estimate(&integrand, 0.0, PI), FRAC_PI_2, TOLERANCE);
}

#[test]
fn secant_squared() {
    // f(x) = 1/cos^2(x), integral from 0 to pi/4 is 1
    let integrand = batch_fn(|x: ArrayView2<f64>| x.mapv(|v| v.cos().powi(-2)));
    assert_approx_eq!(estimate(&integrand, 0.0, FRAC_PI_4), 1.0, TOLERANCE);
}

#[test]
fn parallel_sine() {
    // f(x) = sin(x), integral from 0 to pi is 2
    let integrand = batch_fn(|x: ArrayView2<f64>| x.mapv(f64::sin));
    let result = scalar::integrate(
        &integrand,
        0.0,
        PI,
        CALLS,
        ExecutionContext::Parallel { threads: 4 },
        &mut rng(),
    )
    .unwrap();

    assert_approx_eq!(result, 2.0, TOLERANCE);
}

#[test]
fn scalar_and_vector_bounds_agree() {
    let integrand = batch_fn(|x: ArrayView2<f64>| x.mapv(|v| v.sin() * v));

    for &context in &[
        ExecutionContext::Sequential,
        ExecutionContext::Parallel { threads: 3 },
    ] {
        let from_scalars =
            scalar::integrate(&integrand, -1.0, 2.5, 10_000, context, &mut rng()).unwrap();
        let from_vectors = plain::integrate(
            &integrand,
            &arr1(&[-1.0]),
            &arr1(&[2.5]),
            10_000,
            context,
            &mut rng(),
        )
        .unwrap();

        assert_eq!(from_scalars, from_vectors);
    }
}

#[test]
fn contexts_agree_up_to_rounding() {
    // the sample points are identical, only the summation order differs
    let integrand = batch_fn(|x: ArrayView2<f64>| x.mapv(f64::exp));

    let sequential =
        scalar::integrate(&integrand, 0.0, 1.0, 100_000, ExecutionContext::Sequential, &mut rng())
            .unwrap();
    let parallel = scalar::integrate(
        &integrand,
        0.0,
        1.0,
        100_000,
        ExecutionContext::Parallel { threads: 7 },
        &mut rng(),
    )
    .unwrap();

    assert_approx_eq!(sequential, parallel, 1e-12);
}
