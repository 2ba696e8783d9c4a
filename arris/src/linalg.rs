//! Exact Gauss-Jordan elimination: solve, invert, rank, one-dimensional
//! nullspaces.
//!
//! Pivots are chosen as the first nonzero entry in the remaining submatrix,
//! so every division is by a value already known to be nonzero.

use crate::matrix::Matrix;
use crate::num::Rat;

pub fn dot(a: &[Rat], b: &[Rat]) -> Rat {
    assert_eq!(a.len(), b.len(), "dot product length mismatch");
    let mut acc = Rat::zero();
    for (x, y) in a.iter().zip(b) {
        acc = &acc + &(x * y);
    }
    acc
}

pub fn mat_vec(m: &Matrix, v: &[Rat]) -> Vec<Rat> {
    (0..m.row_count()).map(|i| dot(m.row(i), v)).collect()
}

/// Reduces `m` to reduced row-echelon form, pivoting only within the first
/// `pivot_cols` columns (any further columns ride along as an augment).
/// Returns the lead column of each nonzero row, in row order.
fn reduce(m: &mut [Vec<Rat>], pivot_cols: usize) -> Vec<usize> {
    let rows = m.len();
    let mut leads = Vec::new();
    let mut r = 0;
    for col in 0..pivot_cols {
        if r == rows {
            break;
        }
        let Some(p) = (r..rows).find(|&i| !m[i][col].is_zero()) else {
            continue;
        };
        m.swap(r, p);
        let pivot = m[r][col].clone();
        for entry in m[r][col..].iter_mut() {
            *entry = &*entry / &pivot;
        }
        let pivot_row = m[r].clone();
        for (i, row) in m.iter_mut().enumerate() {
            if i == r || row[col].is_zero() {
                continue;
            }
            let factor = row[col].clone();
            for (entry, pivot_entry) in row[col..].iter_mut().zip(&pivot_row[col..]) {
                let scaled = &factor * pivot_entry;
                *entry = &*entry - &scaled;
            }
        }
        leads.push(col);
        r += 1;
    }
    leads
}

/// Solves the square system `A x = b`. `None` when `A` is singular or the
/// system is inconsistent.
pub fn solve(a: &Matrix, b: &[Rat]) -> Option<Vec<Rat>> {
    let n = a.row_count();
    assert_eq!(a.col_count(), n, "solve requires a square matrix");
    assert_eq!(b.len(), n, "right-hand side length mismatch");
    let mut work: Vec<Vec<Rat>> = (0..n)
        .map(|i| {
            let mut row = a.copy_row(i);
            row.push(b[i].clone());
            row
        })
        .collect();
    let leads = reduce(&mut work, n);
    if leads.len() != n {
        return None;
    }
    let mut x = vec![Rat::zero(); n];
    for (i, &lead) in leads.iter().enumerate() {
        x[lead] = work[i][n].clone();
    }
    Some(x)
}

/// Inverts a square matrix; `None` when singular.
pub fn invert(a: &Matrix) -> Option<Matrix> {
    let n = a.row_count();
    assert_eq!(a.col_count(), n, "invert requires a square matrix");
    let mut work: Vec<Vec<Rat>> = (0..n)
        .map(|i| {
            let mut row = a.copy_row(i);
            row.extend((0..n).map(|j| if i == j { Rat::one() } else { Rat::zero() }));
            row
        })
        .collect();
    let leads = reduce(&mut work, n);
    if leads.len() != n {
        return None;
    }
    // Full rank puts lead i in column i, so the right block is the inverse
    // row by row.
    let mut data = Vec::with_capacity(n * n);
    for row in &work {
        data.extend_from_slice(&row[n..]);
    }
    Some(Matrix::from_flat(n, n, data))
}

/// A nonzero vector spanning the nullspace of `a`, provided the nullspace
/// has dimension exactly 1; `None` otherwise.
pub fn nullspace_1d(a: &Matrix) -> Option<Vec<Rat>> {
    let cols = a.col_count();
    let mut work: Vec<Vec<Rat>> = (0..a.row_count()).map(|i| a.copy_row(i)).collect();
    let leads = reduce(&mut work, cols);
    if cols - leads.len() != 1 {
        return None;
    }
    let free = (0..cols).find(|c| !leads.contains(c))?;
    let mut v = vec![Rat::zero(); cols];
    v[free] = Rat::one();
    for (i, &lead) in leads.iter().enumerate() {
        v[lead] = -&work[i][free];
    }
    Some(v)
}

pub fn rank(a: &Matrix) -> usize {
    let cols = a.col_count();
    let mut work: Vec<Vec<Rat>> = (0..a.row_count()).map(|i| a.copy_row(i)).collect();
    reduce(&mut work, cols).len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rat(p: i64) -> Rat {
        Rat::from(p)
    }

    fn matrix(rows: &[&[i64]]) -> Matrix {
        Matrix::from_rows(
            rows.iter()
                .map(|row| row.iter().map(|&v| rat(v)).collect())
                .collect(),
        )
    }

    #[test]
    fn invert_times_original_is_identity() {
        let a = matrix(&[&[2, 1, 0], &[1, -1, 3], &[0, 4, 1]]);
        let inv = invert(&a).expect("nonsingular");
        let n = a.row_count();
        for i in 0..n {
            let col = a.copy_col(i);
            let e = mat_vec(&inv, &col);
            for (j, entry) in e.iter().enumerate() {
                assert_eq!(entry.is_zero(), i != j, "entry ({j}, {i})");
            }
        }
    }

    #[test]
    fn solve_recovers_known_solution() {
        let a = matrix(&[&[1, 2], &[3, -1]]);
        let x = vec![rat(5), rat(-7)];
        let b = mat_vec(&a, &x);
        assert_eq!(solve(&a, &b), Some(x));
    }

    #[test]
    fn solve_rejects_singular_systems() {
        let a = matrix(&[&[1, 2], &[2, 4]]);
        assert_eq!(solve(&a, &[rat(1), rat(3)]), None);
        assert_eq!(invert(&a), None);
    }

    #[test]
    fn rank_plus_nullity_is_column_count() {
        let a = matrix(&[&[1, 2, 3], &[2, 4, 6], &[0, 1, 1]]);
        assert_eq!(rank(&a), 2);
        let v = nullspace_1d(&a).expect("nullity one");
        for product in mat_vec(&a, &v) {
            assert!(product.is_zero());
        }
    }

    #[test]
    fn nullspace_rejects_wrong_dimension() {
        assert_eq!(nullspace_1d(&matrix(&[&[1, 0], &[0, 1]])), None);
        assert_eq!(nullspace_1d(&matrix(&[&[1, 0, 0]])), None);
    }

    #[test]
    fn rank_of_zero_and_identity() {
        assert_eq!(rank(&Matrix::new(2, 3)), 0);
        assert_eq!(rank(&Matrix::identity(4)), 4);
    }
}
