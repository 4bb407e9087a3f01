//! Tensor Operations for Neural Network Arithmetic
//!
//! This module provides the one array type every demo in the crate builds on.
//! A [`Tensor`] is either a vector (shape `[n]`) or a matrix (shape
//! `[rows, cols]`), stored flat in row-major order.
//!
//! ## Core Concepts
//!
//! - **Data**: Flat `Vec<f32>` storing all elements in row-major order
//! - **Shape**: `[n]` for a vector, `[rows, cols]` for a matrix
//!
//! ## Two Orientations
//!
//! Textbooks write `W @ x`: a stack of weight rows meets one input column.
//! Model code usually writes `x @ W`: one input row meets every weight column.
//! Both are the same dot products taken in a different order, and both are
//! here explicitly:
//!
//! ```text
//! W @ x   (matvec)   [rows, inner] @ [inner]        -> [rows]
//! x @ W   (vecmat)   [inner]       @ [inner, cols]  -> [cols]
//! A @ B   (matmul)   [m, k]        @ [k, n]         -> [m, n]
//! ```
//!
//! ## Example
//!
//! ```rust
//! use abacus::Tensor;
//!
//! let w = Tensor::from_rows(&[[1.0, 0.0], [0.0, 1.0], [1.0, 1.0]]);
//! let x = Tensor::vector(vec![10.0, 20.0]);
//! assert_eq!(w.matvec(&x).data, vec![10.0, 20.0, 30.0]);
//! ```
//!
//! ## Failure Mode
//!
//! Every operation checks shape conformance with an assertion. A mismatch is a
//! bug in the calling demo, so it panics with both shapes in the message
//! instead of returning an error.
//!
//! ## Performance
//!
//! The toy sizes in this crate rarely need it, but element-wise operations,
//! row softmax, and large matrix products run through Rayon. Products below
//! 1K multiply-adds take the plain triple loop.

use rayon::prelude::*;

/// A vector or matrix of `f32` values
///
/// # Memory Layout
///
/// For shape `[2, 3]`, data is stored as:
/// `[row0_col0, row0_col1, row0_col2, row1_col0, row1_col1, row1_col2]`
///
/// so element `(i, j)` lives at `data[i * cols + j]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Tensor {
    /// Flat storage of all tensor elements
    pub data: Vec<f32>,
    /// Shape of the tensor (dimensions)
    pub shape: Vec<usize>,
}

/// Dot product of two equal-length slices
///
/// Multiply the partners, add the results:
///
/// ```text
/// [10, 20] · [1, 2] = (10 * 1) + (20 * 2) = 50
/// ```
///
/// # Panics
///
/// Panics if the lengths differ.
///
/// # Example
///
/// ```rust
/// assert_eq!(abacus::dot(&[10.0, 20.0], &[1.0, 2.0]), 50.0);
/// ```
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(
        a.len(),
        b.len(),
        "Dot product needs equal lengths: {} vs {}",
        a.len(),
        b.len()
    );
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

impl Tensor {
    /// Create a new tensor with given data and shape
    ///
    /// # Panics
    ///
    /// Panics if the product of shape dimensions doesn't equal data length
    ///
    /// # Example
    ///
    /// ```rust
    /// # use abacus::Tensor;
    /// let tensor = Tensor::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
    /// assert_eq!(tensor.shape, vec![2, 2]);
    /// ```
    pub fn new(data: Vec<f32>, shape: Vec<usize>) -> Self {
        let expected_size: usize = shape.iter().product();
        assert_eq!(
            data.len(),
            expected_size,
            "Data length ({}) doesn't match shape {:?} (expected {})",
            data.len(),
            shape,
            expected_size
        );

        Self { data, shape }
    }

    /// Create a 1D tensor (a vector)
    pub fn vector(data: Vec<f32>) -> Self {
        let len = data.len();
        Self::new(data, vec![len])
    }

    /// Create a matrix from a list of equal-length rows
    ///
    /// # Panics
    ///
    /// Panics if `rows` is empty.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use abacus::Tensor;
    /// let m = Tensor::from_rows(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]);
    /// assert_eq!(m.shape, vec![3, 2]);
    /// ```
    pub fn from_rows<const N: usize>(rows: &[[f32; N]]) -> Self {
        assert!(!rows.is_empty(), "Matrix needs at least one row");
        let data = rows.iter().flatten().copied().collect();
        Self::new(data, vec![rows.len(), N])
    }

    /// Create a tensor filled with zeros
    ///
    /// ```rust
    /// # use abacus::Tensor;
    /// let tensor = Tensor::zeros(vec![3, 4]);
    /// assert_eq!(tensor.data.len(), 12);
    /// assert!(tensor.data.iter().all(|&x| x == 0.0));
    /// ```
    pub fn zeros(shape: Vec<usize>) -> Self {
        let size: usize = shape.iter().product();
        Self::new(vec![0.0; size], shape)
    }

    /// Identity matrix `[n, n]`: the matrix version of the number 1
    pub fn eye(n: usize) -> Self {
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            data[i * n + i] = 1.0;
        }
        Self::new(data, vec![n, n])
    }

    /// Causal attention mask
    ///
    /// Returns a `[seq_len, seq_len]` mask where 1 marks a key position that
    /// lies in the future of the query row:
    ///
    /// ```text
    /// [0 1 1]  position 0 can only see itself
    /// [0 0 1]  position 1 can see 0,1
    /// [0 0 0]  position 2 can see all
    /// ```
    pub fn causal_mask(seq_len: usize) -> Self {
        let mut data = vec![0.0; seq_len * seq_len];
        for i in 0..seq_len {
            for j in i + 1..seq_len {
                data[i * seq_len + j] = 1.0;
            }
        }
        Self::new(data, vec![seq_len, seq_len])
    }

    /// View this tensor as `(rows, cols)`; a vector counts as a single row
    fn as_rows(&self) -> (usize, usize) {
        match self.shape.len() {
            1 => (1, self.shape[0]),
            2 => (self.shape[0], self.shape[1]),
            _ => panic!("Expected a vector or matrix, got shape {:?}", self.shape),
        }
    }

    /// Number of rows (1 for a vector)
    pub fn rows(&self) -> usize {
        self.as_rows().0
    }

    /// Number of columns (the length of a vector)
    pub fn cols(&self) -> usize {
        self.as_rows().1
    }

    /// Borrow row `i` as a slice
    pub fn row_slice(&self, i: usize) -> &[f32] {
        let (rows, cols) = self.as_rows();
        assert!(i < rows, "Row {} out of range for shape {:?}", i, self.shape);
        &self.data[i * cols..(i + 1) * cols]
    }

    /// Mutably borrow row `i` as a slice
    pub fn row_slice_mut(&mut self, i: usize) -> &mut [f32] {
        let (rows, cols) = self.as_rows();
        assert!(i < rows, "Row {} out of range for shape {:?}", i, self.shape);
        &mut self.data[i * cols..(i + 1) * cols]
    }

    /// Copy row `i` out as a vector
    pub fn row(&self, i: usize) -> Tensor {
        Tensor::vector(self.row_slice(i).to_vec())
    }

    /// Copy column `j` out as a vector
    ///
    /// In `x @ W` each column of `W` is the weight vector of one output.
    pub fn column(&self, j: usize) -> Tensor {
        let (rows, cols) = self.as_rows();
        assert!(j < cols, "Column {} out of range for shape {:?}", j, self.shape);
        let data = (0..rows).map(|i| self.data[i * cols + j]).collect();
        Tensor::vector(data)
    }

    /// Inner loop of the blocked matmul: `result[j] += a_val * b[j]`
    ///
    /// Structured so LLVM can auto-vectorize it.
    #[inline(always)]
    fn axpy(a_val: f32, b: &[f32], result: &mut [f32]) {
        for (r, &b_val) in result.iter_mut().zip(b.iter()) {
            *r += a_val * b_val;
        }
    }

    /// Matrix multiplication `[m, k] @ [k, n] -> [m, n]`
    ///
    /// Each output element is the dot product of a left row and a right
    /// column: `C[i,j] = sum(A[i,l] * B[l,j])`.
    ///
    /// # Performance
    ///
    /// - **Small matrices** (< 1K multiply-adds): Sequential triple loop
    /// - **Large matrices** (≥ 1K multiply-adds): Parallel cache-blocked kernel
    ///
    /// # Panics
    ///
    /// Panics if either operand is not 2D or the inner dimensions differ.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use abacus::Tensor;
    /// let a = Tensor::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
    /// let b = Tensor::eye(2);
    /// assert_eq!(a.matmul(&b).data, a.data);
    /// ```
    pub fn matmul(&self, other: &Tensor) -> Tensor {
        assert!(
            self.shape.len() == 2 && other.shape.len() == 2,
            "matmul needs two matrices: {:?} @ {:?}",
            self.shape,
            other.shape
        );
        assert_eq!(
            self.shape[1], other.shape[0],
            "Matrix dimensions incompatible: [{}, {}] @ [{}, {}]",
            self.shape[0], self.shape[1], other.shape[0], other.shape[1]
        );

        let m = self.shape[0];
        let n = other.shape[1];
        let k = self.shape[1];

        if m * n * k >= 1_000 {
            return self.matmul_parallel_blocked(other, m, n, k);
        }

        let mut result = vec![0.0; m * n];
        for i in 0..m {
            for j in 0..n {
                let mut sum = 0.0;
                for l in 0..k {
                    sum += self.data[i * k + l] * other.data[l * n + j];
                }
                result[i * n + j] = sum;
            }
        }

        Tensor::new(result, vec![m, n])
    }

    /// Parallel cache-blocked matrix multiplication
    ///
    /// Processes 8×8 blocks so each inner loop walks memory sequentially, and
    /// distributes row blocks across cores with Rayon. Produces the same
    /// numbers as the sequential loop.
    fn matmul_parallel_blocked(&self, other: &Tensor, m: usize, n: usize, k: usize) -> Tensor {
        const BLOCK_SIZE: usize = 8;

        let mut result = vec![0.0; m * n];

        result
            .par_chunks_mut(BLOCK_SIZE * n)
            .enumerate()
            .for_each(|(block_i, result_block)| {
                let i_start = block_i * BLOCK_SIZE;
                let i_end = (i_start + BLOCK_SIZE).min(m);

                for j_start in (0..n).step_by(BLOCK_SIZE) {
                    let j_end = (j_start + BLOCK_SIZE).min(n);

                    for k_start in (0..k).step_by(BLOCK_SIZE) {
                        let k_end = (k_start + BLOCK_SIZE).min(k);

                        for i in i_start..i_end {
                            let row_offset = (i - i_start) * n;
                            for k_idx in k_start..k_end {
                                Self::axpy(
                                    self.data[i * k + k_idx],
                                    &other.data[k_idx * n + j_start..k_idx * n + j_end],
                                    &mut result_block[row_offset + j_start..row_offset + j_end],
                                );
                            }
                        }
                    }
                }
            });

        Tensor::new(result, vec![m, n])
    }

    /// Weights on the left: `W @ x`
    ///
    /// One dot product per row of `self`. This is how a stack of templates
    /// (or detectors) scores one input.
    ///
    /// ```text
    /// [1 0]              [10]
    /// [0 1]  @ [10, 20] = [20]
    /// [1 1]              [30]
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `self` is not a matrix or `x` does not match its width.
    pub fn matvec(&self, x: &Tensor) -> Tensor {
        assert_eq!(self.shape.len(), 2, "matvec needs a matrix, got {:?}", self.shape);
        assert_eq!(
            self.shape[1],
            x.data.len(),
            "Matrix {:?} cannot multiply vector of length {}",
            self.shape,
            x.data.len()
        );
        let data = (0..self.shape[0])
            .map(|i| dot(self.row_slice(i), &x.data))
            .collect();
        Tensor::vector(data)
    }

    /// Input row on the left: `x @ W`
    ///
    /// One dot product per column of `w`. This is the orientation model code
    /// uses, where each column of `w` belongs to one output (e.g. one word).
    ///
    /// # Panics
    ///
    /// Panics if `w` is not a matrix or its height differs from `self.len()`.
    pub fn vecmat(&self, w: &Tensor) -> Tensor {
        assert_eq!(w.shape.len(), 2, "vecmat needs a matrix, got {:?}", w.shape);
        assert_eq!(
            self.data.len(),
            w.shape[0],
            "Vector of length {} cannot multiply matrix {:?}",
            self.data.len(),
            w.shape
        );
        let cols = w.shape[1];
        let mut result = vec![0.0; cols];
        for (i, &x) in self.data.iter().enumerate() {
            Self::axpy(x, &w.data[i * cols..(i + 1) * cols], &mut result);
        }
        Tensor::vector(result)
    }

    /// Outer product `a ⊗ b -> [a.len(), b.len()]`
    pub fn outer(a: &Tensor, b: &Tensor) -> Tensor {
        let mut data = Vec::with_capacity(a.data.len() * b.data.len());
        for &x in &a.data {
            data.extend(b.data.iter().map(|&y| x * y));
        }
        Tensor::new(data, vec![a.data.len(), b.data.len()])
    }

    /// Softmax along the last axis
    ///
    /// A vector is normalized as a whole; a matrix is normalized row by row.
    ///
    /// # Numerical Stability
    ///
    /// ```text
    /// softmax(x)[i] = exp(x[i] - max(x)) / sum(exp(x[j] - max(x)))
    /// ```
    ///
    /// Subtracting the maximum prevents overflow in `exp()` while producing
    /// the same result (the factor `exp(-max)` cancels).
    ///
    /// # Example
    ///
    /// ```rust
    /// # use abacus::Tensor;
    /// let probs = Tensor::vector(vec![1.0, 2.0, 3.0]).softmax();
    /// assert!((probs.data.iter().sum::<f32>() - 1.0).abs() < 1e-6);
    /// ```
    pub fn softmax(&self) -> Tensor {
        let (rows, cols) = self.as_rows();

        let result: Vec<f32> = (0..rows)
            .into_par_iter()
            .flat_map_iter(|i| {
                let row = &self.data[i * cols..(i + 1) * cols];
                let max = row.iter().fold(f32::NEG_INFINITY, |a, &b| a.max(b));
                let exp_values: Vec<f32> = row.iter().map(|&x| (x - max).exp()).collect();
                let sum: f32 = exp_values.iter().sum();
                exp_values.into_iter().map(move |val| val / sum)
            })
            .collect();

        Tensor::new(result, self.shape.clone())
    }

    /// Apply a function to every element
    pub fn map(&self, f: impl Fn(f32) -> f32 + Sync + Send) -> Tensor {
        let result = self.data.par_iter().map(|&x| f(x)).collect();
        Tensor::new(result, self.shape.clone())
    }

    /// Element-wise combination with broadcasting support
    ///
    /// 1. **Exact match**: Same shape
    /// 2. **Broadcast last dim**: `[rows, n] (op) [n]` (e.g. adding a bias or
    ///    scaling by gamma)
    fn zip_with(&self, other: &Tensor, op: &str, f: impl Fn(f32, f32) -> f32 + Sync + Send) -> Tensor {
        if self.shape == other.shape {
            let result = self
                .data
                .par_iter()
                .zip(&other.data)
                .map(|(&a, &b)| f(a, b))
                .collect();
            return Tensor::new(result, self.shape.clone());
        }

        if self.shape.len() == 2 && other.shape.len() == 1 && other.shape[0] == self.shape[1] {
            let last_dim = self.shape[1];
            let result = self
                .data
                .par_iter()
                .enumerate()
                .map(|(i, &a)| f(a, other.data[i % last_dim]))
                .collect();
            return Tensor::new(result, self.shape.clone());
        }

        panic!(
            "Unsupported broadcast for {}: {:?} {} {:?}",
            op, self.shape, op, other.shape
        );
    }

    /// Element-wise addition (also used for residual connections)
    ///
    /// ```rust
    /// # use abacus::Tensor;
    /// let a = Tensor::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
    /// let b = Tensor::new(vec![1.0, 1.0, 1.0, 1.0], vec![2, 2]);
    /// assert_eq!(a.add(&b).data, vec![2.0, 3.0, 4.0, 5.0]);
    /// ```
    pub fn add(&self, other: &Tensor) -> Tensor {
        self.zip_with(other, "+", |a, b| a + b)
    }

    /// Element-wise subtraction
    pub fn sub(&self, other: &Tensor) -> Tensor {
        self.zip_with(other, "-", |a, b| a - b)
    }

    /// Element-wise multiplication
    pub fn mul(&self, other: &Tensor) -> Tensor {
        self.zip_with(other, "*", |a, b| a * b)
    }

    /// Add scalar to all elements
    pub fn add_scalar(&self, scalar: f32) -> Tensor {
        self.map(|x| x + scalar)
    }

    /// Multiply all elements by scalar
    pub fn mul_scalar(&self, scalar: f32) -> Tensor {
        self.map(|x| x * scalar)
    }

    /// Divide all elements by scalar
    pub fn div_scalar(&self, scalar: f32) -> Tensor {
        self.map(|x| x / scalar)
    }

    /// Transpose a matrix (rows ↔ columns)
    pub fn transpose(&self) -> Tensor {
        assert_eq!(self.shape.len(), 2, "transpose needs a matrix, got {:?}", self.shape);
        let rows = self.shape[0];
        let cols = self.shape[1];
        let mut result = vec![0.0; rows * cols];

        for i in 0..rows {
            for j in 0..cols {
                result[j * rows + i] = self.data[i * cols + j];
            }
        }

        Tensor::new(result, vec![cols, rows])
    }

    /// Replace values where mask is non-zero with `value`
    ///
    /// Used for causal masking in attention (future positions get a large
    /// negative score).
    pub fn masked_fill(&self, mask: &Tensor, value: f32) -> Tensor {
        assert_eq!(
            self.shape, mask.shape,
            "Mask shape must match tensor shape"
        );
        let result = self
            .data
            .par_iter()
            .zip(&mask.data)
            .map(|(&x, &m)| if m != 0.0 { value } else { x })
            .collect();
        Tensor::new(result, self.shape.clone())
    }

    /// Glue matrices side by side: `[seq, a] ++ [seq, b] -> [seq, a + b]`
    ///
    /// This is how multi-head attention joins its per-head outputs.
    ///
    /// # Panics
    ///
    /// Panics if `parts` is empty or the row counts differ.
    pub fn concat_cols(parts: &[Tensor]) -> Tensor {
        assert!(!parts.is_empty(), "Nothing to concatenate");
        let rows = parts[0].rows();
        for part in parts {
            assert_eq!(
                part.rows(),
                rows,
                "Cannot concatenate shape {:?} with {} rows",
                part.shape,
                rows
            );
        }
        let total_cols: usize = parts.iter().map(Tensor::cols).sum();
        let mut data = Vec::with_capacity(rows * total_cols);
        for i in 0..rows {
            for part in parts {
                data.extend_from_slice(part.row_slice(i));
            }
        }
        Tensor::new(data, vec![rows, total_cols])
    }

    /// Mean of all elements
    pub fn mean(&self) -> f32 {
        self.data.iter().sum::<f32>() / self.data.len() as f32
    }

    /// Population variance of all elements (divides by N, like `np.var`)
    pub fn variance(&self) -> f32 {
        let mean = self.mean();
        self.data
            .iter()
            .map(|&x| {
                let diff = x - mean;
                diff * diff
            })
            .sum::<f32>()
            / self.data.len() as f32
    }

    /// Euclidean length `sqrt(sum(x²))`
    pub fn norm(&self) -> f32 {
        dot(&self.data, &self.data).sqrt()
    }

    /// Index of the largest element (first one wins ties)
    pub fn argmax(&self) -> usize {
        let mut best = 0;
        for (i, &x) in self.data.iter().enumerate() {
            if x > self.data[best] {
                best = i;
            }
        }
        best
    }

    /// Argmax of each row of a matrix
    pub fn argmax_rows(&self) -> Vec<usize> {
        (0..self.rows()).map(|i| self.row(i).argmax()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: &[f32], b: &[f32], tol: f32) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).abs() < tol, "{:?} != {:?}", a, b);
        }
    }

    #[test]
    fn test_dot_product() {
        assert_eq!(dot(&[10.0, 20.0], &[1.0, 2.0]), 50.0);
        assert_eq!(dot(&[0.1, 0.8], &[10.0, 20.0]), 0.1 * 10.0 + 0.8 * 20.0);
    }

    #[test]
    #[should_panic(expected = "equal lengths")]
    fn test_dot_product_length_mismatch() {
        dot(&[1.0, 2.0, 3.0], &[1.0, 2.0]);
    }

    #[test]
    fn test_matvec_templates() {
        let w = Tensor::from_rows(&[[1.0, 0.0], [0.0, 1.0], [1.0, 1.0]]);
        let x = Tensor::vector(vec![10.0, 20.0]);
        assert_eq!(w.matvec(&x).data, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_vecmat_word_columns() {
        let hidden = Tensor::vector(vec![0.5, 1.2, 0.0, 2.1]);
        let w = Tensor::from_rows(&[[0.1, 0.9], [0.8, -0.1], [-0.5, 0.2], [0.4, 0.7]]);
        assert_close(&hidden.vecmat(&w).data, &[1.85, 1.80], 1e-5);
    }

    #[test]
    fn test_vecmat_matches_matmul_and_columns() {
        let x = Tensor::vector(vec![2.0, 5.0, 1.0]);
        let w = Tensor::from_rows(&[[1.0, -1.0], [0.5, 2.0], [0.0, 1.0]]);
        let y = x.vecmat(&w);
        assert_eq!(y.data, vec![4.5, 9.0]);

        let as_matrix = Tensor::new(x.data.clone(), vec![1, 3]).matmul(&w);
        assert_eq!(as_matrix.data, y.data);

        for j in 0..2 {
            assert_eq!(dot(&x.data, &w.column(j).data), y.data[j]);
        }
    }

    #[test]
    fn test_matvec_is_transposed_vecmat() {
        let w = Tensor::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let x = Tensor::vector(vec![1.0, -1.0, 2.0]);
        assert_eq!(w.matvec(&x).data, x.vecmat(&w.transpose()).data);
    }

    #[test]
    #[should_panic(expected = "Matrix dimensions incompatible")]
    fn test_matmul_shape_mismatch() {
        let a = Tensor::zeros(vec![2, 3]);
        let b = Tensor::zeros(vec![2, 3]);
        a.matmul(&b);
    }

    #[test]
    fn test_blocked_matmul_matches_naive() {
        let m = 17;
        let k = 13;
        let n = 11;
        let a = Tensor::new((0..m * k).map(|i| (i % 7) as f32 - 3.0).collect(), vec![m, k]);
        let b = Tensor::new((0..k * n).map(|i| (i % 5) as f32 * 0.5).collect(), vec![k, n]);

        let fast = a.matmul(&b);
        for i in 0..m {
            for j in 0..n {
                let expected = dot(a.row_slice(i), &b.column(j).data);
                assert!((fast.data[i * n + j] - expected).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_softmax_rows_sum_to_one() {
        let t = Tensor::from_rows(&[[1.0, 2.0, 3.0], [0.0, 0.0, 0.0], [-5.0, 10.0, 2.5]]);
        let p = t.softmax();
        for i in 0..3 {
            let row = p.row_slice(i);
            assert!(row.iter().all(|&x| x >= 0.0));
            assert!((row.iter().sum::<f32>() - 1.0).abs() < 1e-6);
        }
        assert_close(p.row_slice(1), &[1.0 / 3.0; 3], 1e-6);
    }

    #[test]
    fn test_softmax_shift_invariant() {
        let logits = Tensor::vector(vec![5.2, -1.2, 0.4]);
        let shifted = logits.add_scalar(100.0);
        assert_close(&logits.softmax().data, &shifted.softmax().data, 1e-6);
    }

    #[test]
    fn test_softmax_large_values_stable() {
        let p = Tensor::vector(vec![100.0, 200.0, 300.0]).softmax();
        assert!(p.data.iter().all(|x| x.is_finite()));
        assert!((p.data[2] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_transpose() {
        let m = Tensor::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]);
        let t = m.transpose();
        assert_eq!(t.shape, vec![3, 2]);
        assert_eq!(t.data, vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn test_row_major_indexing() {
        // Element (i, j) of a [2, 3] matrix sits at data[i * 3 + j]
        let mut m = Tensor::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]);
        assert_eq!(m.row_slice(1), &[4.0, 5.0, 6.0]);
        assert_eq!(m.column(2).data, vec![3.0, 6.0]);
        m.row_slice_mut(0)[1] = 9.0;
        assert_eq!(m.data[1], 9.0);

        // Same numbers, different shape: not the same tensor
        let flat = Tensor::vector(m.data.clone());
        assert_ne!(flat, m);
        assert_eq!(flat.row_slice(0), m.data.as_slice());
    }

    #[test]
    fn test_add_broadcast_last_dim() {
        let m = Tensor::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]);
        let bias = Tensor::vector(vec![0.5, 0.0, -1.0]);
        assert_eq!(m.add(&bias).data, vec![1.5, 2.0, 2.0, 4.5, 5.0, 5.0]);
        assert_eq!(m.add(&bias).sub(&bias), m);
    }

    #[test]
    fn test_causal_mask_and_fill() {
        let mask = Tensor::causal_mask(3);
        assert_eq!(mask.data, vec![0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0]);

        let scores = Tensor::new(vec![1.0; 9], vec![3, 3]);
        let masked = scores.masked_fill(&mask, -1e9);
        assert_eq!(masked.data[1], -1e9);
        assert_eq!(masked.data[3], 1.0);
    }

    #[test]
    fn test_concat_cols() {
        let a = Tensor::from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
        let b = Tensor::from_rows(&[[5.0], [6.0]]);
        let c = Tensor::concat_cols(&[a, b]);
        assert_eq!(c.shape, vec![2, 3]);
        assert_eq!(c.data, vec![1.0, 2.0, 5.0, 3.0, 4.0, 6.0]);
    }

    #[test]
    fn test_outer_and_stats() {
        let o = Tensor::outer(&Tensor::vector(vec![1.0, 2.0]), &Tensor::vector(vec![1.0, 0.0, 3.0]));
        assert_eq!(o.shape, vec![2, 3]);
        assert_eq!(o.data, vec![1.0, 0.0, 3.0, 2.0, 0.0, 6.0]);

        let v = Tensor::vector(vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(v.mean(), 2.5);
        assert_eq!(v.variance(), 1.25);
        assert_eq!(Tensor::vector(vec![3.0, 4.0]).norm(), 5.0);
    }

    #[test]
    fn test_argmax_first_wins_ties() {
        assert_eq!(Tensor::vector(vec![0.1, 0.9, 0.9, 0.2]).argmax(), 1);
        let m = Tensor::from_rows(&[[0.0, 1.0], [2.0, -1.0]]);
        assert_eq!(m.argmax_rows(), vec![1, 0]);
    }
}
