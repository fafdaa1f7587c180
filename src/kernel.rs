//! Design-matrix (data-kernel) construction.
//!
//! A 1-D feature vector is expanded into a Vandermonde matrix of
//! descending powers; 2-D input is already a design matrix and passes
//! through unchanged. The kernel is the `A` in the linear model
//! `y ≈ A w`.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, ArrayViewD, CowArray, Ix1, Ix2};

use crate::error::InversionError;

/// Explanatory-feature input.
///
/// Either a raw 1-D feature vector (expanded into a polynomial kernel)
/// or an already-built 2-D design matrix (used as the kernel unchanged).
///
/// # Example
///
/// ```
/// use linear_inversion::kernel::{make_data_kernel, Features};
/// use ndarray::array;
///
/// let x = array![1.0, 2.0, 3.0];
/// let kernel = make_data_kernel(Features::from(&x), 2);
/// assert_eq!(kernel.shape(), &[3, 3]);
/// // Descending powers: x², x, 1
/// assert_eq!(kernel.row(1).to_vec(), vec![4.0, 2.0, 1.0]);
/// ```
#[derive(Debug, Clone, Copy)]
pub enum Features<'a> {
    /// 1-D feature vector; one kernel row of descending powers per entry.
    Vector(ArrayView1<'a, f64>),
    /// 2-D design matrix `(n_samples, n_features)`, taken as-is.
    Matrix(ArrayView2<'a, f64>),
}

impl<'a> Features<'a> {
    /// Build from a dynamic-dimension view.
    ///
    /// # Errors
    ///
    /// Returns a shape error if the view has more than 2 dimensions.
    pub fn from_dyn(view: ArrayViewD<'a, f64>) -> Result<Self, InversionError> {
        match view.ndim() {
            1 => Ok(Self::Vector(
                view.into_dimensionality::<Ix1>().expect("ndim checked"),
            )),
            2 => Ok(Self::Matrix(
                view.into_dimensionality::<Ix2>().expect("ndim checked"),
            )),
            n => Err(InversionError::Shape {
                reason: "features must be 1-D or 2-D",
                expected: 2,
                actual: n,
            }),
        }
    }

    /// Number of samples (rows) this input will produce in the kernel.
    pub fn n_samples(&self) -> usize {
        match self {
            Self::Vector(v) => v.len(),
            Self::Matrix(m) => m.nrows(),
        }
    }
}

impl<'a> From<ArrayView1<'a, f64>> for Features<'a> {
    fn from(view: ArrayView1<'a, f64>) -> Self {
        Self::Vector(view)
    }
}

impl<'a> From<&'a Array1<f64>> for Features<'a> {
    fn from(array: &'a Array1<f64>) -> Self {
        Self::Vector(array.view())
    }
}

impl<'a> From<&'a [f64]> for Features<'a> {
    fn from(slice: &'a [f64]) -> Self {
        Self::Vector(ArrayView1::from(slice))
    }
}

impl<'a> From<ArrayView2<'a, f64>> for Features<'a> {
    fn from(view: ArrayView2<'a, f64>) -> Self {
        Self::Matrix(view)
    }
}

impl<'a> From<&'a Array2<f64>> for Features<'a> {
    fn from(array: &'a Array2<f64>) -> Self {
        Self::Matrix(array.view())
    }
}

/// Build the design matrix for `features` at the given polynomial order.
///
/// 1-D input produces a Vandermonde matrix of width `polynomial_order + 1`
/// where column `k` holds `x^(polynomial_order - k)`; the last column is
/// all ones. 2-D input is returned unchanged. Order 0 yields a single
/// all-ones column.
pub fn make_data_kernel(features: Features<'_>, polynomial_order: usize) -> Array2<f64> {
    build(features, polynomial_order).into_owned()
}

/// Copy-avoiding variant of [`make_data_kernel`]: 2-D input is borrowed.
pub(crate) fn build(features: Features<'_>, polynomial_order: usize) -> CowArray<'_, f64, Ix2> {
    match features {
        Features::Vector(x) => CowArray::from(vander(x, polynomial_order + 1)),
        Features::Matrix(m) => CowArray::from(m),
    }
}

/// Vandermonde matrix with `width` columns of descending powers.
fn vander(x: ArrayView1<'_, f64>, width: usize) -> Array2<f64> {
    let mut kernel = Array2::ones((x.len(), width));
    for (mut row, &value) in kernel.rows_mut().into_iter().zip(x.iter()) {
        let mut power = 1.0;
        for k in (0..width).rev() {
            row[k] = power;
            power *= value;
        }
    }
    kernel
}
