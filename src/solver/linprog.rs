//! L1-norm inversion via linear programming.
//!
//! Splitting each residual `r_i = p_i - n_i` into non-negative parts
//! turns `min Σ |y - Aw|_i` into the linear program
//!
//! ```text
//! min  Σ (p_i + n_i) / sd_i
//! s.t. A w + p - n = y,   p, n >= 0
//! ```
//!
//! with `w` free in sign (split into `w⁺ - w⁻`). The program is solved
//! by a dense two-phase simplex using Bland's rule, which cannot cycle.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::error::{ConfigError, InversionError};

/// Entries smaller than this are treated as zero during pivoting.
const PIVOT_TOL: f64 = 1e-9;
/// Phase-1 objective above this means the program is infeasible.
const FEASIBILITY_TOL: f64 = 1e-7;

/// L1-norm (absolute error) inversion of `A w ≈ y`.
///
/// `sd` holds per-sample standard deviations of the targets; residuals
/// are weighted by `1 / sd_i` in the objective. Uniform weighting is
/// used when `sd` is absent.
///
/// # Errors
///
/// - `SingularInput` if the kernel is degenerate or the LP infeasible
/// - `Convergence` if the simplex hits its internal pivot limit
/// - `Shape` / `Config` for misaligned or non-positive `sd`
pub fn l1_inversion(
    kernel: ArrayView2<'_, f64>,
    targets: ArrayView1<'_, f64>,
    sd: Option<ArrayView1<'_, f64>>,
) -> Result<Array1<f64>, InversionError> {
    let (n_samples, n_features) = kernel.dim();
    if n_features == 0 {
        return Err(InversionError::SingularInput("kernel has no columns"));
    }
    if n_samples == 0 {
        return Err(InversionError::SingularInput("kernel has no rows"));
    }
    if targets.len() != n_samples {
        return Err(InversionError::Shape {
            reason: "targets must align with kernel rows",
            expected: n_samples,
            actual: targets.len(),
        });
    }
    if let Some(sd) = sd {
        if sd.len() != n_samples {
            return Err(InversionError::Shape {
                reason: "sd must align with targets",
                expected: n_samples,
                actual: sd.len(),
            });
        }
        if let Some((index, &value)) = sd.iter().enumerate().find(|(_, &v)| v <= 0.0) {
            return Err(ConfigError::InvalidStdDev { index, value }.into());
        }
    }

    // Variable layout: [w⁺ (m), w⁻ (m), p (n), n (n)]
    let n_vars = 2 * n_features + 2 * n_samples;
    let mut objective = vec![0.0; n_vars];
    for i in 0..n_samples {
        let weight = sd.map_or(1.0, |sd| 1.0 / sd[i]);
        objective[2 * n_features + i] = weight;
        objective[2 * n_features + n_samples + i] = weight;
    }

    let mut constraints = Array2::zeros((n_samples, n_vars));
    for i in 0..n_samples {
        for j in 0..n_features {
            constraints[[i, j]] = kernel[[i, j]];
            constraints[[i, n_features + j]] = -kernel[[i, j]];
        }
        constraints[[i, 2 * n_features + i]] = 1.0;
        constraints[[i, 2 * n_features + n_samples + i]] = -1.0;
    }

    let solution = Simplex::new(constraints, targets.to_owned()).solve(&objective)?;

    Ok(Array1::from_shape_fn(n_features, |j| {
        solution[j] - solution[n_features + j]
    }))
}

// =============================================================================
// Two-phase simplex
// =============================================================================

/// Dense tableau simplex for `min c'x, Ax = b, x >= 0`.
///
/// Phase 1 minimizes the sum of artificial variables to find a feasible
/// basis; phase 2 minimizes the caller's objective over structural
/// columns only. Bland's smallest-index rule guarantees termination, and
/// a pivot budget bounds runtime on pathological inputs.
struct Simplex {
    /// `[n_rows, n_structural + n_rows + 1]`; last column is the RHS.
    tableau: Array2<f64>,
    /// Basic variable (column index) of each row.
    basis: Vec<usize>,
    in_basis: Vec<bool>,
    n_structural: usize,
}

enum Phase {
    Feasibility,
    Objective,
}

impl Simplex {
    fn new(constraints: Array2<f64>, rhs: Array1<f64>) -> Self {
        let (n_rows, n_structural) = constraints.dim();
        let n_total = n_structural + n_rows;

        let mut tableau = Array2::zeros((n_rows, n_total + 1));
        for i in 0..n_rows {
            // flip rows so the RHS is non-negative
            let sign = if rhs[i] < 0.0 { -1.0 } else { 1.0 };
            for j in 0..n_structural {
                tableau[[i, j]] = sign * constraints[[i, j]];
            }
            tableau[[i, n_structural + i]] = 1.0;
            tableau[[i, n_total]] = sign * rhs[i];
        }

        let basis: Vec<usize> = (0..n_rows).map(|i| n_structural + i).collect();
        let mut in_basis = vec![false; n_total];
        for &b in &basis {
            in_basis[b] = true;
        }

        Self {
            tableau,
            basis,
            in_basis,
            n_structural,
        }
    }

    fn solve(mut self, objective: &[f64]) -> Result<Array1<f64>, InversionError> {
        let n_rows = self.tableau.nrows();
        let n_total = self.n_structural + n_rows;
        let rhs_col = n_total;

        // Phase 1: drive the artificial variables to zero.
        let mut phase1_cost = vec![0.0; n_total];
        phase1_cost[self.n_structural..].fill(1.0);
        self.run_phase(&phase1_cost, n_total, Phase::Feasibility)?;

        let residual: f64 = (0..n_rows)
            .map(|i| phase1_cost[self.basis[i]] * self.tableau[[i, rhs_col]])
            .sum();
        if residual > FEASIBILITY_TOL {
            return Err(InversionError::SingularInput("linear program is infeasible"));
        }

        // Pivot leftover artificials out of the basis; a row where no
        // structural pivot exists is redundant and its artificial stays
        // basic at zero.
        for row in 0..n_rows {
            if self.basis[row] >= self.n_structural {
                let pivot_col = (0..self.n_structural)
                    .find(|&j| !self.in_basis[j] && self.tableau[[row, j]].abs() > PIVOT_TOL);
                if let Some(col) = pivot_col {
                    self.pivot(row, col);
                }
            }
        }

        // Phase 2: minimize the real objective over structural columns.
        let mut phase2_cost = vec![0.0; n_total];
        phase2_cost[..self.n_structural].copy_from_slice(objective);
        self.run_phase(&phase2_cost, self.n_structural, Phase::Objective)?;

        let mut solution = Array1::zeros(self.n_structural);
        for (row, &basic) in self.basis.iter().enumerate() {
            if basic < self.n_structural {
                solution[basic] = self.tableau[[row, rhs_col]];
            }
        }
        Ok(solution)
    }

    /// Run simplex pivots until no entering column improves `cost`.
    ///
    /// `allowed` bounds the entering-column search, which keeps
    /// artificial columns out of phase 2.
    fn run_phase(
        &mut self,
        cost: &[f64],
        allowed: usize,
        phase: Phase,
    ) -> Result<(), InversionError> {
        let n_rows = self.tableau.nrows();
        let rhs_col = self.tableau.ncols() - 1;
        let pivot_budget = 100 * (self.tableau.ncols() + n_rows);

        for _ in 0..pivot_budget {
            let duals: Vec<f64> = self.basis.iter().map(|&b| cost[b]).collect();

            // Bland's rule: smallest improving column index.
            let entering = (0..allowed).filter(|&j| !self.in_basis[j]).find(|&j| {
                let reduced: f64 = cost[j]
                    - (0..n_rows)
                        .map(|i| duals[i] * self.tableau[[i, j]])
                        .sum::<f64>();
                reduced < -PIVOT_TOL
            });
            let Some(entering) = entering else {
                return Ok(());
            };

            // Ratio test, smallest basic index on ties.
            let mut leaving: Option<usize> = None;
            let mut best_ratio = f64::INFINITY;
            for i in 0..n_rows {
                let coefficient = self.tableau[[i, entering]];
                if coefficient > PIVOT_TOL {
                    let ratio = self.tableau[[i, rhs_col]] / coefficient;
                    let better = match leaving {
                        None => true,
                        Some(l) => {
                            ratio < best_ratio - PIVOT_TOL
                                || ((ratio - best_ratio).abs() <= PIVOT_TOL
                                    && self.basis[i] < self.basis[l])
                        }
                    };
                    if better {
                        best_ratio = ratio;
                        leaving = Some(i);
                    }
                }
            }
            let Some(leaving) = leaving else {
                // An improving column with no positive entry means the
                // program is unbounded below. The L1 objective is bounded,
                // so this only occurs on numerically degenerate input.
                return match phase {
                    Phase::Feasibility => Err(InversionError::SingularInput(
                        "degenerate feasibility subproblem",
                    )),
                    Phase::Objective => {
                        Err(InversionError::Convergence("unbounded pivot column"))
                    }
                };
            };

            self.pivot(leaving, entering);
        }

        Err(InversionError::Convergence("simplex pivot limit reached"))
    }

    fn pivot(&mut self, pivot_row: usize, pivot_col: usize) {
        let pivot_value = self.tableau[[pivot_row, pivot_col]];
        self.tableau
            .row_mut(pivot_row)
            .mapv_inplace(|v| v / pivot_value);

        let pivot_row_values = self.tableau.row(pivot_row).to_owned();
        for row in 0..self.tableau.nrows() {
            if row == pivot_row {
                continue;
            }
            let factor = self.tableau[[row, pivot_col]];
            if factor != 0.0 {
                self.tableau
                    .row_mut(row)
                    .scaled_add(-factor, &pivot_row_values);
            }
        }

        self.in_basis[self.basis[pivot_row]] = false;
        self.basis[pivot_row] = pivot_col;
        self.in_basis[pivot_col] = true;
    }
}
