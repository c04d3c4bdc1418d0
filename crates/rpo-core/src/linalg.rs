//! 3x3/4x4/2x2 inversions with the documented singularity threshold, plus
//! specialized mat-vec kernels (spec §4.A). These are hand-rolled rather
//! than delegated to `nalgebra::try_inverse` because the exact pivot
//! threshold and per-block error reporting (§4.D) are part of the spec.

use crate::constants::SINGULAR_THRESHOLD;
use crate::error::{KernelError, KernelResult};
use nalgebra::{SMatrix, SVector};

/// Analytic adjugate/determinant inverse of a 3x3 matrix.
pub fn invert3x3(m: &SMatrix<f64, 3, 3>) -> KernelResult<SMatrix<f64, 3, 3>> {
    let det = m.determinant();
    if det.abs() < SINGULAR_THRESHOLD {
        return Err(KernelError::Singular {
            which: "3x3",
            determinant: det,
        });
    }

    let cofactor = |r0: usize, r1: usize, c0: usize, c1: usize| {
        m[(r0, c0)] * m[(r1, c1)] - m[(r0, c1)] * m[(r1, c0)]
    };
    // adjugate = transpose of cofactor matrix
    let adj = SMatrix::<f64, 3, 3>::new(
        cofactor(1, 2, 1, 2),
        -cofactor(0, 2, 1, 2),
        cofactor(0, 1, 1, 2),
        -cofactor(1, 2, 0, 2),
        cofactor(0, 2, 0, 2),
        -cofactor(0, 1, 0, 2),
        cofactor(1, 2, 0, 1),
        -cofactor(0, 2, 0, 1),
        cofactor(0, 1, 0, 1),
    );
    Ok(adj / det)
}

/// Analytic inverse of a 2x2 matrix.
pub fn invert2x2(m: &SMatrix<f64, 2, 2>) -> KernelResult<SMatrix<f64, 2, 2>> {
    let det = m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)];
    if det.abs() < SINGULAR_THRESHOLD {
        return Err(KernelError::Singular {
            which: "2x2",
            determinant: det,
        });
    }
    Ok(SMatrix::<f64, 2, 2>::new(
        m[(1, 1)] / det,
        -m[(0, 1)] / det,
        -m[(1, 0)] / det,
        m[(0, 0)] / det,
    ))
}

/// Gauss-Jordan elimination with partial pivoting for a 4x4 matrix.
pub fn invert4x4(m: &SMatrix<f64, 4, 4>) -> KernelResult<SMatrix<f64, 4, 4>> {
    const N: usize = 4;
    let mut a = [[0.0_f64; N]; N];
    let mut inv = [[0.0_f64; N]; N];
    for i in 0..N {
        for j in 0..N {
            a[i][j] = m[(i, j)];
        }
        inv[i][i] = 1.0;
    }

    for col in 0..N {
        // partial pivot
        let mut pivot_row = col;
        let mut pivot_val = a[col][col].abs();
        for row in (col + 1)..N {
            if a[row][col].abs() > pivot_val {
                pivot_val = a[row][col].abs();
                pivot_row = row;
            }
        }
        if pivot_val < SINGULAR_THRESHOLD {
            return Err(KernelError::Singular {
                which: "4x4",
                determinant: pivot_val,
            });
        }
        if pivot_row != col {
            a.swap(col, pivot_row);
            inv.swap(col, pivot_row);
        }

        let pivot = a[col][col];
        for j in 0..N {
            a[col][j] /= pivot;
            inv[col][j] /= pivot;
        }
        for row in 0..N {
            if row == col {
                continue;
            }
            let factor = a[row][col];
            if factor == 0.0 {
                continue;
            }
            for j in 0..N {
                a[row][j] -= factor * a[col][j];
                inv[row][j] -= factor * inv[col][j];
            }
        }
    }

    let mut out = SMatrix::<f64, 4, 4>::zeros();
    for i in 0..N {
        for j in 0..N {
            out[(i, j)] = inv[i][j];
        }
    }
    Ok(out)
}

/// Dimension-generic mat-vec product, row-major evaluation order to keep
/// floating-point associativity deterministic across calls (spec §5).
pub fn mat_vec_mul<const N: usize>(
    m: &SMatrix<f64, N, N>,
    v: &SVector<f64, N>,
) -> SVector<f64, N> {
    let mut out = SVector::<f64, N>::zeros();
    for i in 0..N {
        let mut acc = 0.0;
        for j in 0..N {
            acc += m[(i, j)] * v[j];
        }
        out[i] = acc;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn invert3x3_round_trips_identity() {
        let m = SMatrix::<f64, 3, 3>::new(2.0, 0.0, 0.0, 0.0, 3.0, 0.0, 0.0, 0.0, 4.0);
        let inv = invert3x3(&m).unwrap();
        let prod = m * inv;
        assert_relative_eq!(prod, SMatrix::<f64, 3, 3>::identity(), epsilon = 1e-12);
    }

    #[test]
    fn invert3x3_rejects_singular() {
        let m = SMatrix::<f64, 3, 3>::new(1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 1.0, 1.0, 1.0);
        assert!(matches!(
            invert3x3(&m),
            Err(KernelError::Singular { which: "3x3", .. })
        ));
    }

    #[test]
    fn invert2x2_round_trips_identity() {
        let m = SMatrix::<f64, 2, 2>::new(4.0, 7.0, 2.0, 6.0);
        let inv = invert2x2(&m).unwrap();
        let prod = m * inv;
        assert_relative_eq!(prod, SMatrix::<f64, 2, 2>::identity(), epsilon = 1e-12);
    }

    #[test]
    fn invert4x4_round_trips_random_matrix() {
        let m = SMatrix::<f64, 4, 4>::new(
            5.0, 3.0, 2.0, 1.0, 3.0, 6.0, 1.0, 2.0, 2.0, 1.0, 7.0, 3.0, 1.0, 2.0, 3.0, 8.0,
        );
        let inv = invert4x4(&m).unwrap();
        let prod = m * inv;
        assert_relative_eq!(prod, SMatrix::<f64, 4, 4>::identity(), epsilon = 1e-9);
    }

    #[test]
    fn invert4x4_rejects_singular() {
        let m = SMatrix::<f64, 4, 4>::zeros();
        assert!(matches!(
            invert4x4(&m),
            Err(KernelError::Singular { which: "4x4", .. })
        ));
    }
}
