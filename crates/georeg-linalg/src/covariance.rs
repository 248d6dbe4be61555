use nalgebra::{RealField, SMatrix};

use crate::LinalgError;

/// Centroids of two corresponding point sets together with their cross-covariance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossCovariance<T, const D: usize> {
    /// Centroid of the source points.
    pub mean_src: [T; D],
    /// Centroid of the destination points.
    pub mean_dst: [T; D],
    /// Cross-covariance `Sigma[r][c] = mean(src_r * dst_c) - mean_src[r] * mean_dst[c]`.
    pub sigma: SMatrix<T, D, D>,
}

/// Cross-covariance of 2D correspondences.
pub type CrossCovariance2<T> = CrossCovariance<T, 2>;

/// Cross-covariance of 3D correspondences.
pub type CrossCovariance3<T> = CrossCovariance<T, 3>;

/// Compute the arithmetic mean of a point set.
///
/// # Errors
///
/// Returns [`LinalgError::EmptyPointSet`] when `points` is empty.
///
/// Example:
/// ```
/// use georeg_linalg::covariance::mean;
///
/// let centroid = mean(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
/// assert_eq!(centroid, [2.5, 3.5, 4.5]);
/// ```
pub fn mean<T: RealField + Copy, const D: usize>(points: &[[T; D]]) -> Result<[T; D], LinalgError> {
    if points.is_empty() {
        return Err(LinalgError::EmptyPointSet);
    }

    let mut acc = [T::zero(); D];
    for p in points {
        for (a, &v) in acc.iter_mut().zip(p.iter()) {
            *a += v;
        }
    }

    let n: T = nalgebra::convert(points.len() as f64);
    for a in acc.iter_mut() {
        *a /= n;
    }
    Ok(acc)
}

/// Compute the centroids and the cross-covariance matrix of two corresponding point sets.
///
/// `Sigma = (1/N) * Σ_i src_i * dst_i^T - mean_src * mean_dst^T`
///
/// # Arguments
///
/// * `src` - Source points.
/// * `dst` - Destination points, `dst[i]` corresponds to `src[i]`.
///
/// # Errors
///
/// The lengths are validated before any arithmetic: mismatched lengths yield
/// [`LinalgError::MismatchedLengths`] and empty sets [`LinalgError::EmptyPointSet`].
pub fn cross_covariance<T: RealField + Copy, const D: usize>(
    src: &[[T; D]],
    dst: &[[T; D]],
) -> Result<CrossCovariance<T, D>, LinalgError> {
    if src.len() != dst.len() {
        return Err(LinalgError::MismatchedLengths {
            src: src.len(),
            dst: dst.len(),
        });
    }

    let mean_src = mean(src)?;
    let mean_dst = mean(dst)?;

    // raw second moments first, the means are removed at the end
    let mut sigma = SMatrix::<T, D, D>::zeros();
    for (s, d) in src.iter().zip(dst.iter()) {
        for (r, &s_r) in s.iter().enumerate() {
            for (c, &d_c) in d.iter().enumerate() {
                sigma[(r, c)] += s_r * d_c;
            }
        }
    }

    let n: T = nalgebra::convert(src.len() as f64);
    for r in 0..D {
        for c in 0..D {
            sigma[(r, c)] = sigma[(r, c)] / n - mean_src[r] * mean_dst[c];
        }
    }

    Ok(CrossCovariance {
        mean_src,
        mean_dst,
        sigma,
    })
}
