//! Phase-one search for a feasible starting basis.

use tracing::debug;

use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::num::Rat;

use super::dictionary::{Basis, Dictionary};

/// Finds a feasible basis of `b + A x >= 0`, or reports why none was
/// reached.
///
/// Three attempts, cheapest first: the trivial basis of the first `d`
/// rows; an artificial phase that augments the system with `d` rows
/// `[1 | e_i]` and pivots violated original rows in through the lex ratio
/// test; and an exhaustive lex-order scan of all `d`-subsets, which settles
/// feasibility outright when the pivoting stalls. The scan keeps the
/// returned basis lex-minimal among feasible ones whenever it runs.
pub fn feasible_basis(matrix: &Matrix) -> Result<Basis> {
    let m = matrix.row_count();
    let d = matrix.col_count() - 1;
    assert!(m >= d && d > 0, "need at least d rows and one variable");

    let trivial = Basis::new((0..d).collect());
    if let Ok(dictionary) = Dictionary::new(matrix, trivial.clone())
        && is_feasible(&dictionary, m)
    {
        return Ok(trivial);
    }

    match artificial_phase(matrix, m, d) {
        Ok(basis) => Ok(basis),
        Err(failure) => {
            // A singular pivot is a dead end of the search, not a verdict.
            let failure = match failure {
                Error::SingularBasis => Error::Infeasible,
                other => other,
            };
            scan_for_feasible_basis(matrix, m, d).ok_or(failure)
        }
    }
}

fn is_feasible(dictionary: &Dictionary<'_>, rows: usize) -> bool {
    (0..rows).all(|row| dictionary.slack(row).signum() >= 0)
}

fn artificial_phase(matrix: &Matrix, m: usize, d: usize) -> Result<Basis> {
    let mut rows: Vec<Vec<Rat>> = (0..m).map(|i| matrix.copy_row(i)).collect();
    for i in 0..d {
        let mut artificial = vec![Rat::zero(); d + 1];
        artificial[0] = Rat::one();
        artificial[i + 1] = Rat::one();
        rows.push(artificial);
    }
    let augmented = Matrix::from_rows(rows);

    // The artificial block is the identity, so this basis always refactors.
    let mut dictionary = Dictionary::new(&augmented, Basis::new((m..m + d).collect()))?;
    let mut budget = (m + d) * d + m;
    loop {
        let Some(entering) = (0..m).find(|&row| dictionary.slack(row).signum() < 0) else {
            break;
        };
        let Some(leaving) = dictionary.leaving_for(entering) else {
            return Err(Error::Infeasible);
        };
        if budget == 0 {
            return Err(Error::Infeasible);
        }
        budget -= 1;
        debug!(entering, leaving, "phase one pivot");
        let next = dictionary.basis().replace(leaving, entering);
        dictionary = Dictionary::new(&augmented, next)?;
    }

    let kept: Vec<usize> = dictionary
        .basis()
        .rows()
        .iter()
        .copied()
        .filter(|&row| row < m)
        .collect();
    if kept.len() != d {
        return Err(Error::DegenerateInfeasibility);
    }
    Ok(Basis::new(kept))
}

/// Lex-order scan over every `d`-subset of rows; the first candidate that
/// refactors and is feasible wins. Singular candidates are skipped.
fn scan_for_feasible_basis(matrix: &Matrix, m: usize, d: usize) -> Option<Basis> {
    let mut comb: Vec<usize> = (0..d).collect();
    loop {
        let candidate = Basis::new(comb.clone());
        if let Ok(dictionary) = Dictionary::new(matrix, candidate.clone())
            && is_feasible(&dictionary, m)
        {
            debug!(basis = ?candidate.rows(), "feasible basis found by scan");
            return Some(candidate);
        }
        // Advance to the next combination in lex order.
        let mut i = d;
        loop {
            if i == 0 {
                return None;
            }
            i -= 1;
            if comb[i] != m - d + i {
                break;
            }
        }
        comb[i] += 1;
        for j in i + 1..d {
            comb[j] = comb[j - 1] + 1;
        }
    }
}
