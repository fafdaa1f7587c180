//! Line fitting example.
//!
//! Fits a noisy line with an outlier using both the L2 and L1 solvers and
//! compares the recovered coefficients.
//!
//! Run with:
//! ```bash
//! cargo run --example fit_line
//! ```

use linear_inversion::{metrics, ErrorNorm, InversionConfig, LinearInversion};
use ndarray::Array1;

fn main() {
    // =========================================================================
    // Generate data: y = πx + e, with one sample knocked far off the line
    // =========================================================================
    let slope = std::f64::consts::PI;
    let intercept = std::f64::consts::E;

    let x = Array1::from_iter((0..12).map(|i| i as f64));
    let mut y = x.mapv(|v| slope * v + intercept);
    y[11] += 20.0;

    println!("True line: y = {:.4}x + {:.4} (one outlier)\n", slope, intercept);

    // =========================================================================
    // Least-squares fit
    // =========================================================================
    let mut l2_model = LinearInversion::with_defaults();
    let w = l2_model.fit(&x, y.view()).expect("L2 fit failed");
    println!("L2 fit:  slope {:.4}, intercept {:.4}", w[0], w[1]);

    // =========================================================================
    // Robust L1 fit via linear programming
    // =========================================================================
    let config = InversionConfig::builder()
        .error_type(ErrorNorm::L1)
        .build()
        .expect("valid config");
    let mut l1_model = LinearInversion::new(config);
    let w = l1_model.fit(&x, y.view()).expect("L1 fit failed");
    println!("L1 fit:  slope {:.4}, intercept {:.4}\n", w[0], w[1]);

    // =========================================================================
    // Evaluate both fits on the clean line
    // =========================================================================
    let clean = x.mapv(|v| slope * v + intercept);
    let l2_pred = l2_model.predict(&x).expect("predict");
    let l1_pred = l1_model.predict(&x).expect("predict");

    println!("=== RMSE against the clean line ===");
    let l2_rmse = metrics::rmse(clean.view(), l2_pred.view()).expect("aligned");
    let l1_rmse = metrics::rmse(clean.view(), l1_pred.view()).expect("aligned");
    println!("L2: {:.4}", l2_rmse);
    println!("L1: {:.4}", l1_rmse);
}
