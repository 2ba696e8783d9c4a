//! Facet enumeration for V-representations.
//!
//! Every `d`-subset of the lifted generator rows is a candidate support:
//! when its nullspace is one-dimensional, the spanning normal is oriented
//! against the full generator set and kept if some orientation is valid.
//! Duplicate supports found through different subsets collapse under
//! canonical scaling.

use std::collections::HashSet;

use crate::error::Result;
use crate::linalg;
use crate::matrix::Matrix;
use crate::num::Rat;
use crate::polyhedron::Polyhedron;
use crate::stats::EnumStats;

/// The result of one V-to-H run.
#[derive(Clone, Debug)]
pub struct Hull {
    pub inequalities: Polyhedron,
    pub stats: EnumStats,
}

struct FacetRecord {
    row: Vec<Rat>,
    through_origin: bool,
    cobasis: Vec<usize>,
    key: String,
}

/// Enumerates the distinct supporting halfspaces of a generator matrix.
///
/// Facets are ordered with supports through the origin first, then by
/// ascending lex-min cobasis, then by canonical-row text.
pub fn facets(generators: &Polyhedron) -> Result<Hull> {
    let n = generators.col_count();
    let d = n.saturating_sub(1);
    let mut stats = EnumStats::default();
    if d == 0 {
        return Ok(Hull {
            inequalities: Polyhedron::inequality(Matrix::new(0, n)),
            stats,
        });
    }
    let (vertices, rays) = generators.split_generators()?;
    let lifted: Vec<&[Rat]> = vertices
        .iter()
        .map(Vec::as_slice)
        .chain(rays.iter().map(Vec::as_slice))
        .collect();
    if lifted.len() < d {
        return Ok(Hull {
            inequalities: Polyhedron::inequality(Matrix::new(0, n)),
            stats,
        });
    }

    let mut seen: HashSet<Vec<Rat>> = HashSet::new();
    let mut records: Vec<FacetRecord> = Vec::new();
    for subset in combinations(lifted.len(), d) {
        let candidate = Matrix::from_rows(subset.iter().map(|&i| lifted[i].to_vec()).collect());
        let Some(normal) = linalg::nullspace_1d(&candidate) else {
            continue;
        };
        stats.bases += 1;
        let Some(oriented) = orient(normal, &lifted) else {
            continue;
        };
        let canonical = canonicalize(oriented);
        if seen.insert(canonical.clone()) {
            let cobasis = lex_min_cobasis(&canonical, &vertices, d);
            records.push(FacetRecord {
                through_origin: canonical[0].is_zero(),
                cobasis,
                key: row_key(&canonical),
                row: canonical,
            });
        }
    }
    stats.facets = records.len();

    records.sort_by(|a, b| {
        (!a.through_origin, &a.cobasis, &a.key).cmp(&(!b.through_origin, &b.cobasis, &b.key))
    });

    let mut data = Vec::with_capacity(records.len() * n);
    let rows = records.len();
    for record in records {
        data.extend(record.row);
    }
    Ok(Hull {
        inequalities: Polyhedron::inequality(Matrix::from_flat(rows, n, data)),
        stats,
    })
}

/// Orients `normal` so every generator satisfies it, trying both signs.
fn orient(normal: Vec<Rat>, lifted: &[&[Rat]]) -> Option<Vec<Rat>> {
    if satisfied_by_all(&normal, lifted) {
        return Some(normal);
    }
    let negated: Vec<Rat> = normal.iter().map(|v| -v).collect();
    satisfied_by_all(&negated, lifted).then_some(negated)
}

fn satisfied_by_all(normal: &[Rat], lifted: &[&[Rat]]) -> bool {
    lifted
        .iter()
        .all(|row| linalg::dot(row, normal).signum() >= 0)
}

/// Divides by the magnitude of the first nonzero coordinate. Scaling by
/// the signed value would re-negate the orientation `orient` just chose,
/// so only the absolute value is divided out.
fn canonicalize(row: Vec<Rat>) -> Vec<Rat> {
    let Some(scale) = row.iter().find(|v| !v.is_zero()).map(Rat::abs) else {
        return row;
    };
    row.iter().map(|v| v / &scale).collect()
}

fn row_key(row: &[Rat]) -> String {
    let mut out = String::new();
    for value in row {
        out.push_str(&value.to_string());
        out.push(' ');
    }
    out
}

/// The lex-first `d`-subset of tight vertices (input order) whose lifted
/// rows are affinely independent. Fewer than `d` tight vertices means the
/// facet is unbounded; the available ones stand as the cobasis.
fn lex_min_cobasis(normal: &[Rat], vertices: &[Vec<Rat>], d: usize) -> Vec<usize> {
    let tight: Vec<usize> = (0..vertices.len())
        .filter(|&i| linalg::dot(&vertices[i], normal).is_zero())
        .collect();
    if tight.len() < d {
        return tight;
    }
    for subset in combinations(tight.len(), d) {
        let rows: Vec<Vec<Rat>> = subset.iter().map(|&k| vertices[tight[k]].clone()).collect();
        if linalg::rank(&Matrix::from_rows(rows)) == d {
            return subset.iter().map(|&k| tight[k]).collect();
        }
    }
    tight[..d].to_vec()
}

/// Lex-order iteration over all `k`-subsets of `0..n`.
fn combinations(n: usize, k: usize) -> Combinations {
    debug_assert!(k >= 1 && k <= n);
    Combinations {
        n,
        k,
        state: Some((0..k).collect()),
    }
}

struct Combinations {
    n: usize,
    k: usize,
    state: Option<Vec<usize>>,
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        let current = self.state.take()?;
        let mut next = current.clone();
        let mut i = self.k;
        loop {
            if i == 0 {
                return Some(current);
            }
            i -= 1;
            if next[i] != self.n - self.k + i {
                break;
            }
        }
        next[i] += 1;
        for j in i + 1..self.k {
            next[j] = next[j - 1] + 1;
        }
        self.state = Some(next);
        Some(current)
    }
}
