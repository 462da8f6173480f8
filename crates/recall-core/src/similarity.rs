//! Pairwise overlap matrix between items.
//!
//! `sim = itemsᵀ · items` with the diagonal forced to zero, so an item is
//! never its own best match. The matrix is the only input the recall engine
//! needs.

use ndarray::{Array2, ArrayView1};
use rand::Rng;

use crate::config::RecallParams;
use crate::error::{ErrorCode, RecallError, RecallResult};
use crate::items::{ItemGenerator, ItemMatrix};

/// Validated L x L overlap matrix.
///
/// Invariants: square, at least 2 x 2, symmetric, zero diagonal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimilarityMatrix {
    inner: Array2<u32>,
}

impl SimilarityMatrix {
    /// Compute overlaps between all item pairs.
    ///
    /// Fails with `InvalidParameter` if the matrix holds fewer than 2 items.
    pub fn from_items(items: &ItemMatrix) -> RecallResult<Self> {
        let len = items.items();
        if len < 2 {
            return Err(RecallError::invalid_items(format!(
                "L = {} but at least 2 items are required",
                len
            )));
        }

        let mut inner = Array2::<u32>::zeros((len, len));
        for i in 0..len {
            for j in (i + 1)..len {
                let overlap = items.overlap(i, j);
                inner[[i, j]] = overlap;
                inner[[j, i]] = overlap;
            }
        }
        Ok(Self { inner })
    }

    /// Wrap an externally supplied matrix after checking its invariants.
    pub fn from_array(inner: Array2<u32>) -> RecallResult<Self> {
        let shape = inner.dim();
        let (rows, cols) = shape;
        if rows != cols {
            return Err(RecallError::malformed(
                ErrorCode::MatNotSquare,
                shape,
                "similarity matrix must be square",
            ));
        }
        if rows < 2 {
            return Err(RecallError::malformed(
                ErrorCode::MatTooSmall,
                shape,
                "at least 2 items are required",
            ));
        }
        for i in 0..rows {
            if inner[[i, i]] != 0 {
                return Err(RecallError::malformed(
                    ErrorCode::MatNonZeroDiagonal,
                    shape,
                    format!("diagonal entry ({i}, {i}) is {}", inner[[i, i]]),
                ));
            }
            for j in (i + 1)..rows {
                if inner[[i, j]] != inner[[j, i]] {
                    return Err(RecallError::malformed(
                        ErrorCode::MatAsymmetric,
                        shape,
                        format!("entries ({i}, {j}) and ({j}, {i}) differ"),
                    ));
                }
            }
        }
        Ok(Self { inner })
    }

    /// Number of items (L).
    pub fn len(&self) -> usize {
        self.inner.nrows()
    }

    /// Always false: a valid matrix holds at least 2 items.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Overlap between items `i` and `j`.
    pub fn get(&self, i: usize, j: usize) -> u32 {
        self.inner[[i, j]]
    }

    /// Overlaps of item `i` with every item.
    pub fn row(&self, i: usize) -> ArrayView1<'_, u32> {
        self.inner.row(i)
    }

    /// Borrow the underlying array.
    pub fn as_array(&self) -> &Array2<u32> {
        &self.inner
    }

    /// Take the underlying array.
    pub fn into_inner(self) -> Array2<u32> {
        self.inner
    }
}

/// Sample items for `params` and build their similarity matrix.
pub fn generate_similarity<R: Rng + ?Sized>(
    params: &RecallParams,
    rng: &mut R,
) -> RecallResult<SimilarityMatrix> {
    let items = params.generator.generate(rng, params)?;
    SimilarityMatrix::from_items(&items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::GeneratorKind;
    use ndarray::array;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_from_items_matches_dense_product() {
        let dense = array![[1u8, 1, 0], [0, 1, 1], [1, 1, 1], [0, 0, 1]];
        let items = ItemMatrix::from_dense(dense.view());
        let sim = SimilarityMatrix::from_items(&items).unwrap();

        let wide = dense.mapv(u32::from);
        let mut expected = wide.t().dot(&wide);
        expected.diag_mut().fill(0);
        assert_eq!(sim.as_array(), &expected);
        assert_eq!(sim.get(0, 1), 2);
        assert_eq!(sim.len(), 3);
    }

    #[test]
    fn test_generated_matrix_invariants() {
        let mut rng = StdRng::seed_from_u64(7);
        for kind in [GeneratorKind::Bernoulli, GeneratorKind::SparseFill] {
            let params = RecallParams::new(25, 800, 0.05).with_generator(kind);
            let sim = generate_similarity(&params, &mut rng).unwrap();
            let inner = sim.as_array();

            assert_eq!(inner.dim(), (25, 25));
            assert_eq!(inner, &inner.t());
            assert!(inner.diag().iter().all(|&d| d == 0));
            // Round trip through validation must accept it
            assert!(SimilarityMatrix::from_array(sim.into_inner()).is_ok());
        }
    }

    #[test]
    fn test_from_array_rejects_malformed() {
        let not_square = Array2::<u32>::zeros((2, 3));
        assert_eq!(
            SimilarityMatrix::from_array(not_square).unwrap_err().code(),
            ErrorCode::MatNotSquare
        );

        let too_small = Array2::<u32>::zeros((1, 1));
        assert_eq!(
            SimilarityMatrix::from_array(too_small).unwrap_err().code(),
            ErrorCode::MatTooSmall
        );

        let asymmetric = array![[0u32, 1, 2], [1, 0, 3], [2, 4, 0]];
        assert_eq!(
            SimilarityMatrix::from_array(asymmetric).unwrap_err().code(),
            ErrorCode::MatAsymmetric
        );

        let diagonal = array![[5u32, 1], [1, 0]];
        assert_eq!(
            SimilarityMatrix::from_array(diagonal).unwrap_err().code(),
            ErrorCode::MatNonZeroDiagonal
        );
    }

    #[test]
    fn test_single_item_rejected() {
        let items = ItemMatrix::zeros(10, 1);
        let err = SimilarityMatrix::from_items(&items).unwrap_err();
        assert!(err.is_invalid_parameter());
    }
}
