use boxmc::config::{Integrator, Settings};
use boxmc::integrators::scalar;
use boxmc::{batch_fn, try_batch_fn, ExecutionContext};

use ndarray::{arr1, ArrayView2, Axis};
use rand_pcg::Pcg64;

fn main() {
    // Initialize the random number generator.
    let mut rng = Pcg64::new(0xcafef00dd15ea5e5, 0xa02bdbf7bb3c0a7ac28fa16a64abf96);

    // Integrating the function x^2 from x=1 to x=3, which gives the result 26/3. The integrand
    // receives all points at once, as a column of a `samples` x 1 array.
    let square = batch_fn(|x: ArrayView2<f64>| x.mapv(|v| v * v));
    let result = scalar::integrate_or_zero(
        &square,
        1.0,
        3.0,
        1_000_000,
        ExecutionContext::Parallel { threads: 4 },
        &mut rng,
    );

    println!("x^2 from 1 to 3: {:?} (exact {:?})", result, 26.0 / 3.0);

    // An integrator keeps its settings and continues its random stream from call to call.
    let settings = Settings::new(2_000_000)
        .with_context(ExecutionContext::Parallel { threads: 4 })
        .with_seed(2024);
    let mut integrator = Integrator::new(settings);

    // f(x, y, z) = x + y + z over [0,1]^3 is 3/2
    let sum = batch_fn(|x: ArrayView2<f64>| x.sum_axis(Axis(1)));

    match integrator.integrate(&sum, &arr1(&[0.0; 3]), &arr1(&[1.0; 3])) {
        Ok(result) => println!("x + y + z over [0,1]^3: {:?} (exact 1.5)", result),
        Err(err) => println!("integration failed: {}", err),
    }

    // An integrand that cannot be evaluated reports an error instead of a number.
    let log = try_batch_fn(|x: ArrayView2<f64>| {
        if x.iter().any(|&v| v <= 0.0) {
            Err("logarithm of a non-positive number")
        } else {
            Ok(x.mapv(f64::ln).sum_axis(Axis(1)))
        }
    });

    match integrator.integrate(&log, &arr1(&[-1.0, 1.0]), &arr1(&[1.0, 2.0])) {
        Ok(result) => println!("ln(x) + ln(y): {:?}", result),
        Err(err) => println!("integration failed: {}", err),
    }
}
