//! Simplex dictionaries over a fixed H-matrix.

use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::error::{Error, Result};
use crate::linalg;
use crate::matrix::Matrix;
use crate::num::Rat;

/// A sorted set of `d` tight inequality rows identifying a candidate
/// vertex. The derived ordering is lexicographic on the row indices and is
/// the only tie-break used anywhere in the traversal.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Basis(Vec<usize>);

impl Basis {
    pub fn new(mut rows: Vec<usize>) -> Self {
        rows.sort_unstable();
        debug_assert!(
            rows.windows(2).all(|w| w[0] < w[1]),
            "basis rows must be distinct"
        );
        Self(rows)
    }

    #[inline(always)]
    pub fn rows(&self) -> &[usize] {
        &self.0
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, row: usize) -> bool {
        self.0.binary_search(&row).is_ok()
    }

    /// The neighbour basis with the row at `position` swapped for
    /// `entering`.
    pub fn replace(&self, position: usize, entering: usize) -> Basis {
        let mut rows = self.0.clone();
        rows[position] = entering;
        Basis::new(rows)
    }
}

/// The dictionary for one basis: the exact inverse of the basis rows'
/// coefficient block and the vertex it determines. Rebuilt, never mutated,
/// when the basis changes.
pub struct Dictionary<'a> {
    matrix: &'a Matrix,
    basis: Basis,
    binv: Matrix,
    vertex: Vec<Rat>,
}

impl<'a> Dictionary<'a> {
    /// Refactors the basis: inverts the `d x d` coefficient block and
    /// solves for the vertex. Fails with [`Error::SingularBasis`] when the
    /// block is singular; callers skip such candidates.
    pub fn new(matrix: &'a Matrix, basis: Basis) -> Result<Self> {
        assert!(
            matrix.col_count() >= 2,
            "H-matrix needs a constant column and at least one variable"
        );
        let d = matrix.col_count() - 1;
        assert_eq!(basis.len(), d, "basis must pick exactly {d} rows");
        assert!(
            basis.rows().last().is_none_or(|&r| r < matrix.row_count()),
            "basis row out of range"
        );

        let mut block = Matrix::new(d, d);
        let mut neg_b = Vec::with_capacity(d);
        for (i, &row) in basis.rows().iter().enumerate() {
            neg_b.push(-matrix.get(row, 0));
            for j in 0..d {
                block.set(i, j, matrix.get(row, j + 1).clone());
            }
        }
        let binv = linalg::invert(&block).ok_or(Error::SingularBasis)?;
        let vertex = linalg::mat_vec(&binv, &neg_b);
        Ok(Self {
            matrix,
            basis,
            binv,
            vertex,
        })
    }

    #[inline(always)]
    pub fn basis(&self) -> &Basis {
        &self.basis
    }

    /// The vertex determined by the basis, as `d` coordinates.
    #[inline(always)]
    pub fn vertex(&self) -> &[Rat] {
        &self.vertex
    }

    /// `b_i + a_i.x`: zero on basis rows, nonnegative everywhere iff the
    /// dictionary is feasible.
    pub fn slack(&self, row: usize) -> Rat {
        self.matrix.get(row, 0) + &self.dot_row(row, &self.vertex)
    }

    #[inline(always)]
    fn row_coeffs(&self, row: usize) -> &[Rat] {
        &self.matrix.row(row)[1..]
    }

    fn dot_row(&self, row: usize, v: &[Rat]) -> Rat {
        linalg::dot(self.row_coeffs(row), v)
    }

    fn nonbasic(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.matrix.row_count()).filter(|&r| !self.basis.contains(r))
    }

    /// All bases reachable by one feasibility-preserving pivot, in
    /// ascending lex order.
    pub fn children_bases(&self) -> Vec<Basis> {
        let d = self.basis.len();
        let mut out = Vec::new();
        for e in self.nonbasic() {
            let entering_slack = self.slack(e);
            for position in 0..d {
                let u = self.binv.copy_col(position);
                let denom = self.dot_row(e, &u);
                if denom.signum() >= 0 {
                    continue;
                }
                // Step length is the entering slack; every other non-basic
                // slack must survive the move.
                let feasible = self.nonbasic().filter(|&j| j != e).all(|j| {
                    let rate = -&(&self.dot_row(j, &u) / &denom);
                    (&self.slack(j) + &(&entering_slack * &rate)).signum() >= 0
                });
                if feasible {
                    out.push(self.basis.replace(position, e));
                }
            }
        }
        out.sort();
        out.dedup();
        out
    }

    /// The lex-smallest neighbour strictly below this basis; `None` marks
    /// the root of the arborescence.
    pub fn parent_basis(&self) -> Option<Basis> {
        self.children_bases()
            .into_iter()
            .find(|neighbour| *neighbour < self.basis)
    }

    /// Lexicographic ratio test: the basis position leaving when `entering`
    /// comes in, minimizing `(slack / rate, row of the inverse)` with ties
    /// going to the smaller position.
    pub fn leaving_for(&self, entering: usize) -> Option<usize> {
        let neg_a: Vec<Rat> = self.row_coeffs(entering).iter().map(|v| -v).collect();
        let dx = linalg::mat_vec(&self.binv, &neg_a);
        let entering_slack = self.slack(entering);
        let mut best: Option<(Vec<Rat>, usize)> = None;
        for (position, &row) in self.basis.rows().iter().enumerate() {
            let delta = self.dot_row(row, &dx);
            if delta.signum() <= 0 {
                continue;
            }
            let mut key = Vec::with_capacity(self.basis.len() + 1);
            key.push(&entering_slack / &delta);
            key.extend_from_slice(self.binv.row(position));
            if best.as_ref().is_none_or(|(best_key, _)| key < *best_key) {
                best = Some((key, position));
            }
        }
        best.map(|(_, position)| position)
    }

    /// Canonical `[0 | r]` rows for the extreme rays incident to this
    /// vertex.
    ///
    /// Two kinds of unbounded edge are tested: relaxing one basic row
    /// (direction `u` = a column of the inverse, extreme when no row's
    /// slack decreases along it) and entering a non-basic row whose slack
    /// cannot improve (`a_e.dx = 0` with every other row nondecreasing).
    pub fn rays(&self) -> Vec<Vec<Rat>> {
        let m = self.matrix.row_count();
        let mut out = Vec::new();
        for position in 0..self.basis.len() {
            let u = self.binv.copy_col(position);
            if self.nonbasic().all(|j| self.dot_row(j, &u).signum() >= 0)
                && let Some(ray) = canonical_ray(&u)
            {
                // The positive-leading flip can point the canonical form
                // out of the recession cone; the relaxation direction is
                // feasible with its own sign.
                out.push(self.feasible_signed(ray));
            }
        }
        for e in self.nonbasic() {
            let neg_a: Vec<Rat> = self.row_coeffs(e).iter().map(|v| -v).collect();
            let dx = linalg::mat_vec(&self.binv, &neg_a);
            if !self.dot_row(e, &dx).is_zero() {
                continue;
            }
            if (0..m)
                .filter(|&j| j != e)
                .all(|j| self.dot_row(j, &dx).signum() >= 0)
                && let Some(ray) = canonical_ray(&dx)
            {
                out.push(ray);
            }
        }
        out.sort();
        out.dedup();
        out
    }

    /// Keeps a canonical ray when every row still admits it, otherwise
    /// negates the coordinates back to the feasible direction.
    fn feasible_signed(&self, ray: Vec<Rat>) -> Vec<Rat> {
        let admissible = (0..self.matrix.row_count())
            .all(|row| self.dot_row(row, &ray[1..]).signum() >= 0);
        if admissible {
            ray
        } else {
            ray.iter().map(|v| -v).collect()
        }
    }
}

/// Scales a direction to its primitive integer form `[0 | r]`: clear
/// denominators, divide out the numerator gcd, and make the first nonzero
/// coordinate positive. `None` for the zero direction.
fn canonical_ray(direction: &[Rat]) -> Option<Vec<Rat>> {
    let first = direction.iter().position(|v| !v.is_zero())?;
    let mut scale = BigInt::one();
    for v in direction {
        scale = scale.lcm(v.denom());
    }
    let cleared: Vec<BigInt> = direction
        .iter()
        .map(|v| v.numer() * (&scale / v.denom()))
        .collect();
    let mut divisor = BigInt::zero();
    for v in &cleared {
        divisor = divisor.gcd(v);
    }
    if cleared[first].sign() == Sign::Minus {
        divisor = -divisor;
    }
    let mut out = Vec::with_capacity(direction.len() + 1);
    out.push(Rat::zero());
    for v in cleared {
        out.push(Rat::from_integer(v / &divisor));
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rat(p: i64) -> Rat {
        Rat::from(p)
    }

    fn h_matrix(rows: &[&[i64]]) -> Matrix {
        Matrix::from_rows(
            rows.iter()
                .map(|row| row.iter().map(|&v| rat(v)).collect())
                .collect(),
        )
    }

    /// The unit square `0 <= x, y <= 1`.
    fn square() -> Matrix {
        h_matrix(&[&[0, 1, 0], &[0, 0, 1], &[1, -1, 0], &[1, 0, -1]])
    }

    #[test]
    fn origin_basis_of_the_square() {
        let h = square();
        let dict = Dictionary::new(&h, Basis::new(vec![0, 1])).expect("nonsingular");
        assert_eq!(dict.vertex(), &[rat(0), rat(0)]);
        assert!(dict.slack(0).is_zero());
        assert!(dict.slack(1).is_zero());
        assert_eq!(dict.slack(2), rat(1));
        assert_eq!(dict.slack(3), rat(1));
    }

    #[test]
    fn square_neighbours_and_parent() {
        let h = square();
        let root = Dictionary::new(&h, Basis::new(vec![0, 1])).expect("nonsingular");
        assert_eq!(
            root.children_bases(),
            vec![Basis::new(vec![0, 3]), Basis::new(vec![1, 2])]
        );
        assert_eq!(root.parent_basis(), None);

        let side = Dictionary::new(&h, Basis::new(vec![0, 3])).expect("nonsingular");
        assert_eq!(side.parent_basis(), Some(Basis::new(vec![0, 1])));

        let far = Dictionary::new(&h, Basis::new(vec![2, 3])).expect("nonsingular");
        assert_eq!(far.parent_basis(), Some(Basis::new(vec![0, 3])));
    }

    #[test]
    fn repeated_row_basis_is_singular() {
        let h = h_matrix(&[&[0, 1, 0], &[0, 0, 1], &[0, 1, 0]]);
        assert!(matches!(
            Dictionary::new(&h, Basis::new(vec![0, 2])),
            Err(Error::SingularBasis)
        ));
    }

    #[test]
    fn bounded_vertex_has_no_rays() {
        let h = square();
        let dict = Dictionary::new(&h, Basis::new(vec![0, 1])).expect("nonsingular");
        assert!(dict.rays().is_empty());
    }

    #[test]
    fn cone_apex_has_two_rays() {
        // y >= 0 and x - y >= 0: apex at the origin, rays along +x and x=y.
        let h = h_matrix(&[&[0, 0, 1], &[0, 1, -1]]);
        let dict = Dictionary::new(&h, Basis::new(vec![0, 1])).expect("nonsingular");
        let rays = dict.rays();
        assert_eq!(
            rays,
            vec![
                vec![rat(0), rat(1), rat(0)],
                vec![rat(0), rat(1), rat(1)],
            ]
        );
    }

    #[test]
    fn negative_axis_cone_rays_stay_feasible() {
        // -x >= 0 and y >= 0: apex at the origin, rays along -x and +y.
        // Every row is basic, so both rays come from relaxation
        // directions, one of which leads with a negative coordinate.
        let h = h_matrix(&[&[0, -1, 0], &[0, 0, 1]]);
        let dict = Dictionary::new(&h, Basis::new(vec![0, 1])).expect("nonsingular");
        let rays = dict.rays();
        assert_eq!(
            rays,
            vec![
                vec![rat(0), rat(-1), rat(0)],
                vec![rat(0), rat(0), rat(1)],
            ]
        );
        for ray in &rays {
            for row in 0..h.row_count() {
                assert!(
                    linalg::dot(&h.row(row)[1..], &ray[1..]).signum() >= 0,
                    "ray leaves the recession cone"
                );
            }
        }
    }

    #[test]
    fn canonical_ray_is_primitive_and_scale_invariant() {
        let a = canonical_ray(&["2/3".parse().unwrap(), "4/3".parse().unwrap()]).unwrap();
        let b = canonical_ray(&[rat(-1), rat(-2)]).unwrap();
        assert_eq!(a, vec![rat(0), rat(1), rat(2)]);
        assert_eq!(a, b);
        assert_eq!(canonical_ray(&[rat(0), rat(0)]), None);
    }

    #[test]
    fn lex_ratio_picks_the_blocking_row() {
        // At the origin of the square, entering row 2 (x <= 1) must drive
        // out the x >= 0 row.
        let h = square();
        let dict = Dictionary::new(&h, Basis::new(vec![0, 1])).expect("nonsingular");
        assert_eq!(dict.leaving_for(2), Some(0));
        assert_eq!(dict.leaving_for(3), Some(1));
    }
}
