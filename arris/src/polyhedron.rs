//! H- and V-representations of a convex polyhedron.
//!
//! Both representations share one matrix shape: `m` rows of `d + 1`
//! entries. An inequality row `[b | a]` encodes `b + a.x >= 0`; a generator
//! row is a vertex `[1 | x]` or an extreme ray `[0 | r]`.

use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::num::Rat;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RepresentationKind {
    Inequality,
    Generator,
}

#[derive(Clone, Debug)]
pub struct Polyhedron {
    kind: RepresentationKind,
    matrix: Matrix,
}

impl Polyhedron {
    pub fn inequality(matrix: Matrix) -> Self {
        Self {
            kind: RepresentationKind::Inequality,
            matrix,
        }
    }

    pub fn generator(matrix: Matrix) -> Self {
        Self {
            kind: RepresentationKind::Generator,
            matrix,
        }
    }

    #[inline(always)]
    pub fn kind(&self) -> RepresentationKind {
        self.kind
    }

    #[inline(always)]
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    pub fn into_matrix(self) -> Matrix {
        self.matrix
    }

    #[inline(always)]
    pub fn row_count(&self) -> usize {
        self.matrix.row_count()
    }

    #[inline(always)]
    pub fn col_count(&self) -> usize {
        self.matrix.col_count()
    }

    /// Geometric dimension `d`; the leading column is the constant or
    /// homogenizing entry.
    #[inline(always)]
    pub fn dim(&self) -> usize {
        self.matrix.col_count().saturating_sub(1)
    }

    /// Splits a generator matrix into lifted vertex rows `[1 | x]` and ray
    /// rows `[0 | r]`, preserving input order within each class. A positive
    /// leading entry is rescaled to 1; any other leading value is rejected.
    pub fn split_generators(&self) -> Result<(Vec<Vec<Rat>>, Vec<Vec<Rat>>)> {
        assert_eq!(
            self.kind,
            RepresentationKind::Generator,
            "split_generators requires a generator matrix"
        );
        let mut vertices = Vec::new();
        let mut rays = Vec::new();
        for (i, row) in self.matrix.rows().enumerate() {
            let lead = &row[0];
            match lead.signum() {
                0 => rays.push(row.to_vec()),
                1 => {
                    let scaled: Vec<Rat> = row.iter().map(|v| v / lead).collect();
                    vertices.push(scaled);
                }
                _ => return Err(Error::BadGeneratorRow { row: i }),
            }
        }
        Ok((vertices, rays))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rat(p: i64) -> Rat {
        Rat::from(p)
    }

    #[test]
    fn generators_split_and_rescale() {
        let m = Matrix::from_rows(vec![
            vec![rat(2), rat(4), rat(6)],
            vec![rat(0), rat(1), rat(1)],
            vec![rat(1), rat(0), rat(1)],
        ]);
        let poly = Polyhedron::generator(m);
        let (vertices, rays) = poly.split_generators().expect("well formed");
        assert_eq!(vertices.len(), 2);
        assert_eq!(rays.len(), 1);
        assert_eq!(vertices[0], vec![rat(1), rat(2), rat(3)]);
        assert_eq!(rays[0], vec![rat(0), rat(1), rat(1)]);
    }

    #[test]
    fn negative_lead_is_rejected() {
        let m = Matrix::from_rows(vec![vec![rat(-1), rat(0)]]);
        let poly = Polyhedron::generator(m);
        assert_eq!(
            poly.split_generators(),
            Err(Error::BadGeneratorRow { row: 0 })
        );
    }
}
