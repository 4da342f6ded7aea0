//! Ordinary least squares solver.
//!
//! Every regression in this project (the rent model, each VIF auxiliary fit,
//! the Breusch–Pagan auxiliary fit) is a small dense problem:
//!
//! ```text
//! minimize Σ (y_i - x_i^T β)^2
//! ```
//!
//! with an intercept in the first design column.
//!
//! Implementation choices:
//! - We solve via SVD, which stays stable for tall and near-collinear designs.
//! - The numerical rank is checked against the usual `σ_max · max(n, p) · ε`
//!   threshold before solving. An exactly collinear design is reported as
//!   `InsufficientData` rather than silently pseudo-inverted.
//! - `(XᵀX)⁻¹` is rebuilt from the same decomposition as `V Σ⁻² Vᵀ` so the
//!   covariance never needs a separate inversion.

use nalgebra::{DMatrix, DVector};

use crate::error::AppError;

/// Raw output of one OLS fit.
#[derive(Debug, Clone)]
pub struct OlsFit {
    pub beta: DVector<f64>,
    pub residuals: DVector<f64>,
    /// `(XᵀX)⁻¹`, for coefficient covariance.
    pub xtx_inv: DMatrix<f64>,
    /// Residual sum of squares.
    pub rss: f64,
    /// Total (centered) sum of squares of `y`.
    pub tss: f64,
    pub n: usize,
    pub k: usize,
}

impl OlsFit {
    /// Coefficient of determination. `NaN` when `y` has no variance.
    pub fn r_squared(&self) -> f64 {
        if self.tss > 0.0 {
            (1.0 - self.rss / self.tss).clamp(0.0, 1.0)
        } else {
            f64::NAN
        }
    }

    /// Residual degrees of freedom `n - k` (always ≥ 1 for a successful fit).
    pub fn df_resid(&self) -> usize {
        self.n - self.k
    }

    /// Residual variance estimate `σ² = RSS / (n - k)`.
    pub fn sigma2(&self) -> f64 {
        self.rss / self.df_resid() as f64
    }
}

/// Fit `y ~ x` by least squares.
///
/// Fails with `InsufficientData` when `n <= k` or the design is rank-deficient.
pub fn fit_ols(x: &DMatrix<f64>, y: &DVector<f64>) -> Result<OlsFit, AppError> {
    let (n, k) = x.shape();
    if y.len() != n {
        return Err(AppError::insufficient_data(format!(
            "Design has {n} rows but response has {} values.",
            y.len()
        )));
    }
    if n <= k {
        return Err(AppError::insufficient_data(format!(
            "Need more observations than coefficients: n={n}, k={k}."
        )));
    }

    let svd = x.clone().svd(true, true);
    let max_sv = svd.singular_values.iter().copied().fold(0.0, f64::max);
    let tol = max_sv * n.max(k) as f64 * f64::EPSILON;
    let rank = svd.singular_values.iter().filter(|&&s| s > tol).count();
    if rank < k {
        return Err(AppError::insufficient_data(format!(
            "Design matrix is rank-deficient (rank {rank} < {k} columns)."
        )));
    }

    let beta = svd
        .solve(y, tol)
        .map_err(|e| AppError::insufficient_data(format!("Least-squares solve failed: {e}")))?;
    if !beta.iter().all(|v| v.is_finite()) {
        return Err(AppError::insufficient_data("Least-squares solve produced non-finite coefficients."));
    }

    let v_t = svd
        .v_t
        .as_ref()
        .ok_or_else(|| AppError::insufficient_data("SVD did not produce right singular vectors."))?;
    let inv_sq = DMatrix::from_diagonal(&svd.singular_values.map(|s| 1.0 / (s * s)));
    let xtx_inv = v_t.transpose() * inv_sq * v_t;

    let residuals = y - x * &beta;
    let rss = residuals.norm_squared();
    let mean = y.mean();
    let tss = y.iter().map(|v| (v - mean).powi(2)).sum();

    Ok(OlsFit {
        beta,
        residuals,
        xtx_inv,
        rss,
        tss,
        n,
        k,
    })
}

/// Prepend an intercept column to a covariate matrix.
pub fn with_intercept(columns: &DMatrix<f64>) -> DMatrix<f64> {
    columns.clone().insert_column(0, 1.0)
}
