use serde::{Deserialize, Serialize};

/// A serialized matrix whose value count disagrees with its dimensions.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("{rows}x{cols} matrix needs {} values, got {actual}", rows * cols)]
pub struct MatrixSizeError {
    rows: usize,
    cols: usize,
    actual: usize,
}

/// Dense row-major `rows x cols` weight matrix.
///
/// Row `i` holds the outgoing weights of source neuron `i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MatrixParts")]
pub struct Matrix {
    rows: usize,
    cols: usize,
    values: Vec<f32>,
}

#[derive(Deserialize)]
struct MatrixParts {
    rows: usize,
    cols: usize,
    values: Vec<f32>,
}

impl TryFrom<MatrixParts> for Matrix {
    type Error = MatrixSizeError;

    fn try_from(MatrixParts { rows, cols, values }: MatrixParts) -> Result<Self, Self::Error> {
        let actual = values.len();
        Self::from_values(rows, cols, values).ok_or(MatrixSizeError { rows, cols, actual })
    }
}

impl Matrix {
    #[must_use]
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f32,
    {
        let mut values = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                values.push(f(r, c));
            }
        }
        Self { rows, cols, values }
    }

    /// Returns `None` when `values.len() != rows * cols`.
    #[must_use]
    pub fn from_values(rows: usize, cols: usize, values: Vec<f32>) -> Option<Self> {
        (values.len() == rows * cols).then_some(Self { rows, cols, values })
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut [f32] {
        &mut self.values
    }

    /// Computes `input · self` (a row vector times the matrix).
    ///
    /// # Panics
    ///
    /// Panics if `input.len() != self.rows()`.
    #[must_use]
    pub fn left_multiply(&self, input: &[f32]) -> Vec<f32> {
        assert_eq!(input.len(), self.rows, "input length must match matrix rows");
        (0..self.cols)
            .map(|c| {
                input
                    .iter()
                    .enumerate()
                    .map(|(r, x)| x * self.values[r * self.cols + c])
                    .sum()
            })
            .collect()
    }
}
