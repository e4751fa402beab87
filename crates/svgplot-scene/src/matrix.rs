//! Row-major matrices and 2D vectors in homogeneous form.
//!
//! Chart layout composes 3x3 affine transforms along the scene-graph parent
//! chain, so the kernel stays general over `rows x cols` but is only ever
//! exercised with 3x3 transforms and 3x1 homogeneous columns.

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    cells: Vec<f64>,
}

impl Matrix {
    /// A partial identity: zero-filled with 1.0 along the main diagonal.
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut cells = vec![0.0; rows * cols];
        for i in 0..rows.min(cols) {
            cells[i * cols + i] = 1.0;
        }
        Self { rows, cols, cells }
    }

    pub fn with_values(rows: usize, cols: usize, values: Vec<f64>) -> Result<Self> {
        if values.len() != rows * cols {
            return Err(Error::InvalidFormat {
                message: format!(
                    "matrix {rows}x{cols} requires {} values, got {}",
                    rows * cols,
                    values.len()
                ),
            });
        }
        Ok(Self {
            rows,
            cols,
            cells: values,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.cells[row * self.cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.cells[row * self.cols + col] = value;
    }

    pub fn neg(&self) -> Self {
        self.scale(-1.0)
    }

    pub fn scale(&self, factor: f64) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            cells: self.cells.iter().map(|c| c * factor).collect(),
        }
    }

    pub fn add(&self, other: &Matrix) -> Result<Matrix> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(self.mismatch(other));
        }
        let cells = self
            .cells
            .iter()
            .zip(other.cells.iter())
            .map(|(a, b)| a + b)
            .collect();
        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            cells,
        })
    }

    /// Allocates a fresh `(self.rows, other.cols)` result. There is no
    /// in-place variant: multiplication reshapes.
    pub fn mul(&self, other: &Matrix) -> Result<Matrix> {
        if self.cols != other.rows {
            return Err(self.mismatch(other));
        }
        let mut out = Matrix {
            rows: self.rows,
            cols: other.cols,
            cells: vec![0.0; self.rows * other.cols],
        };
        for i in 0..self.rows {
            for j in 0..other.cols {
                let mut acc = 0.0;
                for k in 0..self.cols {
                    acc += self.get(i, k) * other.get(k, j);
                }
                out.set(i, j, acc);
            }
        }
        Ok(out)
    }

    /// Applies a 3x3 transform to a point, dividing by w when it is nonzero.
    ///
    /// Transforms composed by the scene graph are always 3x3, so this is
    /// hand-unrolled rather than going through [`Matrix::mul`].
    pub fn apply_point(&self, v: Vector) -> Vector {
        let x = self.get(0, 0) * v.x + self.get(0, 1) * v.y + self.get(0, 2);
        let y = self.get(1, 0) * v.x + self.get(1, 1) * v.y + self.get(1, 2);
        let w = self.get(2, 0) * v.x + self.get(2, 1) * v.y + self.get(2, 2);
        if w != 0.0 && w != 1.0 {
            Vector::new(x / w, y / w)
        } else {
            Vector::new(x, y)
        }
    }

    pub fn translation(dx: f64, dy: f64) -> Self {
        let mut m = Matrix::new(3, 3);
        m.set(0, 2, dx);
        m.set(1, 2, dy);
        m
    }

    pub fn scaling(sx: f64, sy: f64) -> Self {
        let mut m = Matrix::new(3, 3);
        m.set(0, 0, sx);
        m.set(1, 1, sy);
        m
    }

    fn mismatch(&self, other: &Matrix) -> Error {
        Error::DimensionMismatch {
            left_rows: self.rows,
            left_cols: self.cols,
            right_rows: other.rows,
            right_cols: other.cols,
        }
    }
}

pub fn identity(n: usize) -> Matrix {
    Matrix::new(n, n)
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Homogeneous column form: `[x, y, 1]` for a point, `[x, y, 0]` for a
    /// direction.
    pub fn to_matrix(&self, point: bool) -> Matrix {
        let w = if point { 1.0 } else { 0.0 };
        Matrix {
            rows: 3,
            cols: 1,
            cells: vec![self.x, self.y, w],
        }
    }

    /// Back-conversion from a 3x1 homogeneous column, dividing by w when it
    /// is nonzero.
    pub fn from_matrix(m: &Matrix) -> Result<Self> {
        if m.rows != 3 || m.cols != 1 {
            return Err(Error::DimensionMismatch {
                left_rows: 3,
                left_cols: 1,
                right_rows: m.rows,
                right_cols: m.cols,
            });
        }
        let w = m.get(2, 0);
        if w != 0.0 {
            Ok(Self::new(m.get(0, 0) / w, m.get(1, 0) / w))
        } else {
            Ok(Self::new(m.get(0, 0), m.get(1, 0)))
        }
    }
}

impl std::ops::Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::AddAssign for Vector {
    fn add_assign(&mut self, rhs: Vector) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl std::ops::Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, factor: f64) -> Vector {
        Vector::new(self.x * factor, self.y * factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_partial_identity() {
        let m = Matrix::new(2, 3);
        assert_eq!(m.get(0, 0), 1.0);
        assert_eq!(m.get(1, 1), 1.0);
        assert_eq!(m.get(0, 1), 0.0);
        assert_eq!(m.get(1, 2), 0.0);
    }

    #[test]
    fn add_requires_equal_dimensions() {
        let a = Matrix::new(2, 2);
        let b = Matrix::new(3, 3);
        assert!(matches!(
            a.add(&b),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn mul_requires_inner_match() {
        let a = Matrix::new(2, 3);
        let b = Matrix::new(2, 3);
        assert!(a.mul(&b).is_err());
        let c = Matrix::new(3, 4);
        let prod = a.mul(&c).unwrap();
        assert_eq!(prod.rows(), 2);
        assert_eq!(prod.cols(), 4);
    }

    #[test]
    fn product_application_is_associative() {
        let a = Matrix::translation(3.0, -2.0);
        let b = Matrix::scaling(2.0, 0.5);
        let v = Vector::new(7.0, 11.0);

        let left = a.mul(&b).unwrap().apply_point(v);
        let right = a.apply_point(b.apply_point(v));
        assert!((left.x - right.x).abs() < 1e-9);
        assert!((left.y - right.y).abs() < 1e-9);
    }

    #[test]
    fn homogeneous_round_trip_divides_by_w() {
        let v = Vector::new(4.0, 6.0);
        let mut m = v.to_matrix(true);
        assert_eq!(m.get(2, 0), 1.0);
        m.set(0, 0, 8.0);
        m.set(1, 0, 12.0);
        m.set(2, 0, 2.0);
        let back = Vector::from_matrix(&m).unwrap();
        assert_eq!(back, Vector::new(4.0, 6.0));

        let dir = v.to_matrix(false);
        assert_eq!(dir.get(2, 0), 0.0);
        assert_eq!(Vector::from_matrix(&dir).unwrap(), v);
    }

    #[test]
    fn vector_ops() {
        let mut a = Vector::new(1.0, 2.0);
        let b = Vector::new(3.0, 4.0);
        assert_eq!(a + b, Vector::new(4.0, 6.0));
        assert_eq!(b - a, Vector::new(2.0, 2.0));
        assert_eq!(a * 2.0, Vector::new(2.0, 4.0));
        a += b;
        assert_eq!(a, Vector::new(4.0, 6.0));
    }
}
