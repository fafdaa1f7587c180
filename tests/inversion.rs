//! End-to-end inversion tests.
//!
//! Exercises the full fit/predict pipeline through [`LinearInversion`]:
//! - Analytical L2 and L1 recovery on a line with a single outlier
//! - SGD agreement with the analytical solution
//! - Polynomial kernels beyond order 1
//! - Weighted L1 fits and configuration override isolation

use approx::assert_abs_diff_eq;
use linear_inversion::{
    metrics, ErrorNorm, FitOptions, InversionConfig, InversionError, LinearInversion,
};
use ndarray::{array, Array1};

// =============================================================================
// Shared Fixtures
// =============================================================================

/// Line `y = πx + e` over x = 0..12, with the last sample knocked 20 up.
///
/// The outlier pulls the least-squares slope well above π while the L1
/// fit shrugs it off.
fn outlier_line() -> (Array1<f64>, Array1<f64>) {
    let x = Array1::from_iter((0..12).map(|i| i as f64));
    let mut y = x.mapv(|v| std::f64::consts::PI * v + std::f64::consts::E);
    y[11] += 20.0;
    (x, y)
}

// =============================================================================
// Analytical Solvers
// =============================================================================

#[test]
fn l2_fit_is_skewed_by_the_outlier() {
    let (x, y) = outlier_line();

    let mut model = LinearInversion::with_defaults();
    let w = model.fit(&x, y.view()).unwrap();

    assert_abs_diff_eq!(w[0], 3.91082342282056, epsilon = 1e-9);
    assert_abs_diff_eq!(w[1], 0.15417926435649928, epsilon = 1e-9);
}

#[test]
fn l1_fit_recovers_the_line_despite_the_outlier() {
    let (x, y) = outlier_line();

    let config = InversionConfig::builder()
        .error_type(ErrorNorm::L1)
        .build()
        .unwrap();
    let mut model = LinearInversion::new(config);
    let w = model.fit(&x, y.view()).unwrap();

    // 11 of 12 points sit exactly on y = πx + e; the L1 optimum
    // interpolates them and assigns the whole residual to the outlier.
    assert_abs_diff_eq!(w[0], std::f64::consts::PI, epsilon = 1e-8);
    assert_abs_diff_eq!(w[1], std::f64::consts::E, epsilon = 1e-8);
}

#[test]
fn l1_is_closer_to_the_clean_line_than_l2() {
    let (x, y) = outlier_line();
    let truth = [std::f64::consts::PI, std::f64::consts::E];

    let mut l2 = LinearInversion::with_defaults();
    let w2 = l2.fit(&x, y.view()).unwrap().clone();

    let config = InversionConfig::builder()
        .error_type(ErrorNorm::L1)
        .build()
        .unwrap();
    let mut l1 = LinearInversion::new(config);
    let w1 = l1.fit(&x, y.view()).unwrap();

    let dist = |w: &Array1<f64>| {
        ((w[0] - truth[0]).powi(2) + (w[1] - truth[1]).powi(2)).sqrt()
    };
    assert!(dist(w1) < dist(&w2));
}

#[test]
fn quadratic_data_needs_an_order_two_kernel() {
    let x = Array1::from_iter((0..10).map(|i| i as f64 / 3.0));
    let y = x.mapv(|v| 1.5 * v * v - 2.0 * v + 0.5);

    let config = InversionConfig::builder()
        .polynomial_order(2)
        .build()
        .unwrap();
    let mut model = LinearInversion::new(config);
    let w = model.fit(&x, y.view()).unwrap();

    assert_abs_diff_eq!(w[0], 1.5, epsilon = 1e-9);
    assert_abs_diff_eq!(w[1], -2.0, epsilon = 1e-9);
    assert_abs_diff_eq!(w[2], 0.5, epsilon = 1e-9);

    let predictions = model.predict(&x).unwrap();
    assert!(metrics::r2(y.view(), predictions.view()).unwrap() > 1.0 - 1e-12);
}

#[test]
fn sd_weights_pull_the_l1_fit_toward_trusted_samples() {
    // Two contradictory clusters; tight sd on the first decides the fit.
    let x = array![0.0, 1.0, 2.0, 0.0, 1.0, 2.0];
    let y = array![0.0, 1.0, 2.0, 1.0, 3.0, 5.0];

    let config = InversionConfig::builder()
        .error_type(ErrorNorm::L1)
        .build()
        .unwrap();
    let mut model = LinearInversion::new(config);

    let sd = array![0.01, 0.01, 0.01, 10.0, 10.0, 10.0];
    let options = FitOptions {
        sd: Some(sd.view()),
        ..Default::default()
    };
    let w = model.fit_with(&x, y.view(), options).unwrap();

    assert_abs_diff_eq!(w[0], 1.0, epsilon = 1e-8);
    assert_abs_diff_eq!(w[1], 0.0, epsilon = 1e-8);
}

// =============================================================================
// SGD Solvers
// =============================================================================

#[test]
fn sgd_l2_matches_the_analytical_solution() {
    // Unit-interval features keep the gradient well conditioned.
    let n = 20;
    let x = Array1::from_iter((0..n).map(|i| i as f64 / (n - 1) as f64));
    let y = x.mapv(|v| 3.0 * v + 2.0);

    let mut analytical = LinearInversion::with_defaults();
    let w_exact = analytical.fit(&x, y.view()).unwrap().clone();

    let config = InversionConfig::builder()
        .use_sgd(true)
        .sgd_lr(0.5)
        .sgd_iter(20_000)
        .build()
        .unwrap();
    let mut sgd = LinearInversion::new(config);
    let w_sgd = sgd.fit(&x, y.view()).unwrap();

    assert_abs_diff_eq!(w_sgd[0], w_exact[0], epsilon = 1e-2);
    assert_abs_diff_eq!(w_sgd[1], w_exact[1], epsilon = 1e-2);
}

#[test]
fn sgd_l1_resists_the_outlier_better_than_l2() {
    let (x, y) = outlier_line();
    let truth = [std::f64::consts::PI, std::f64::consts::E];

    let mut l2 = LinearInversion::with_defaults();
    let w2 = l2.fit(&x, y.view()).unwrap().clone();

    let config = InversionConfig::builder()
        .error_type(ErrorNorm::L1)
        .use_sgd(true)
        .sgd_lr(0.01)
        .sgd_iter(50_000)
        .build()
        .unwrap();
    let mut sgd = LinearInversion::new(config);
    let w1 = sgd.fit(&x, y.view()).unwrap();

    let dist = |w: &Array1<f64>| {
        ((w[0] - truth[0]).powi(2) + (w[1] - truth[1]).powi(2)).sqrt()
    };
    assert!(dist(w1) < dist(&w2));
}

// =============================================================================
// Configuration and State
// =============================================================================

#[test]
fn overrides_never_leak_into_the_stored_config() {
    let x = Array1::from_iter((0..8).map(|i| i as f64));
    let y = x.mapv(|v| v * v + 1.0);

    let mut model = LinearInversion::with_defaults();
    let options = FitOptions {
        polynomial_order: Some(2),
        ..Default::default()
    };
    let w = model.fit_with(&x, y.view(), options).unwrap();
    assert_eq!(w.len(), 3);

    // A plain fit afterwards is back to the stored order-1 kernel.
    let w = model.fit(&x, y.view()).unwrap();
    assert_eq!(w.len(), 2);
    assert_eq!(model.config().polynomial_order, 1);
}

#[test]
fn unfitted_model_refuses_to_predict() {
    let model = LinearInversion::with_defaults();
    let x = array![1.0, 2.0, 3.0];
    assert!(matches!(
        model.predict(&x),
        Err(InversionError::NotFitted)
    ));
}

#[test]
fn matrix_kernel_bypasses_polynomial_expansion() {
    // Caller-supplied design matrix with two independent columns.
    let kernel = array![
        [1.0, 2.0],
        [2.0, 1.0],
        [3.0, 3.0],
        [4.0, 0.0],
    ];
    let w_true = array![0.5, -1.5];
    let y = kernel.dot(&w_true);

    let mut model = LinearInversion::with_defaults();
    let w = model.fit(&kernel, y.view()).unwrap();

    assert_abs_diff_eq!(w[0], 0.5, epsilon = 1e-10);
    assert_abs_diff_eq!(w[1], -1.5, epsilon = 1e-10);

    let predictions = model.predict(&kernel).unwrap();
    assert!(metrics::rmse(y.view(), predictions.view()).unwrap() < 1e-10);
}
