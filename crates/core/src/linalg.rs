use nalgebra::{Const, DimMin, SMatrix, SVector};

/// A state or parameter vector of compile-time dimension `N`.
pub type Vector<const N: usize> = SVector<f64, N>;

/// A square matrix of compile-time dimension `N`.
pub type Matrix<const N: usize> = SMatrix<f64, N, N>;

/// Solves `matrix * x = rhs` in place using LU factorization with partial pivoting.
///
/// On success `rhs` holds `x` and the function returns `true`.
/// Returns `false` if the matrix is singular, in which case `rhs` is unspecified.
///
/// The factorization works on a stack copy of `matrix`, so nothing is allocated.
pub fn lu_solve_in_place<const N: usize>(matrix: Matrix<N>, rhs: &mut Vector<N>) -> bool
where
    Const<N>: DimMin<Const<N>, Output = Const<N>>,
{
    matrix.lu().solve_mut(rhs)
}
