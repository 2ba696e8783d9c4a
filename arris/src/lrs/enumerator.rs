//! Depth-first traversal of the lex arborescence of feasible bases.

use std::collections::HashSet;

use tracing::debug;

use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::num::Rat;
use crate::polyhedron::Polyhedron;
use crate::stats::EnumStats;

use super::dictionary::{Basis, Dictionary};
use super::{ComputationStatus, Options};

/// The result of one H-to-V run: a generator matrix (vertex rows followed
/// by ray rows, each in first-emission order) plus counters.
#[derive(Clone, Debug)]
pub struct Enumeration {
    pub generators: Polyhedron,
    pub stats: EnumStats,
    pub status: ComputationStatus,
}

/// Reverse-search vertex and ray enumeration over `b + A x >= 0`.
pub struct Traversal<'a> {
    matrix: &'a Matrix,
    options: Options,
}

impl<'a> Traversal<'a> {
    pub fn new(matrix: &'a Matrix, options: Options) -> Self {
        Self { matrix, options }
    }

    pub fn run(&self) -> Result<Enumeration> {
        let m = self.matrix.row_count();
        let n = self.matrix.col_count();
        let d = n.saturating_sub(1);
        if d == 0 || m < d {
            return Ok(self.empty(ComputationStatus::AllFound));
        }

        let root = match super::phase1::feasible_basis(self.matrix) {
            Ok(basis) => basis,
            Err(Error::Infeasible) | Err(Error::DegenerateInfeasibility) => {
                return Ok(self.empty(ComputationStatus::RegionEmpty));
            }
            Err(other) => return Err(other),
        };

        // Normalize to the arborescence root: follow parents until there is
        // no lex-smaller neighbour. This makes the spanning tree complete
        // from whichever feasible basis phase one landed on.
        let mut root_dictionary = Dictionary::new(self.matrix, root)?;
        while let Some(parent) = root_dictionary.parent_basis() {
            root_dictionary = Dictionary::new(self.matrix, parent)?;
        }
        let root = root_dictionary.basis().clone();

        let mut stats = EnumStats::default();
        let mut vertex_rows: Vec<Vec<Rat>> = Vec::new();
        let mut ray_rows: Vec<Vec<Rat>> = Vec::new();
        let mut seen_vertices: HashSet<Vec<Rat>> = HashSet::new();
        let mut seen_rays: HashSet<Vec<Rat>> = HashSet::new();
        let mut seen: HashSet<Basis> = HashSet::new();
        let mut stack: Vec<(Basis, usize)> = vec![(root, 0)];

        while let Some((basis, depth)) = stack.pop() {
            if !seen.insert(basis.clone()) {
                continue;
            }
            let dictionary = match Dictionary::new(self.matrix, basis) {
                Ok(dictionary) => dictionary,
                Err(Error::SingularBasis) => continue,
                Err(other) => return Err(other),
            };

            stats.bases += 1;
            stats.max_depth = stats.max_depth.max(depth);
            stats.last_cobasis = Some(dictionary.basis().rows().to_vec());

            let mut row = Vec::with_capacity(n);
            row.push(Rat::one());
            row.extend_from_slice(dictionary.vertex());
            // Degenerate bases revisit a geometric vertex; emit it once.
            if seen_vertices.insert(row.clone()) {
                stats.vertices += 1;
                if row[1..].iter().all(Rat::is_integer) {
                    stats.integer_vertices += 1;
                }
                vertex_rows.push(row);
            }

            for ray in dictionary.rays() {
                if seen_rays.insert(ray.clone()) {
                    stats.rays += 1;
                    ray_rows.push(ray);
                }
            }

            if let Some(cap) = self.options.max_depth
                && depth >= cap
            {
                continue;
            }
            // Reverse lex push order so children pop in ascending order.
            for child in dictionary.children_bases().into_iter().rev() {
                if seen.contains(&child) {
                    continue;
                }
                let child_dictionary = match Dictionary::new(self.matrix, child.clone()) {
                    Ok(child_dictionary) => child_dictionary,
                    Err(Error::SingularBasis) => continue,
                    Err(other) => return Err(other),
                };
                if child_dictionary.parent_basis().as_ref() == Some(dictionary.basis()) {
                    stack.push((child, depth + 1));
                }
            }
        }

        debug!(
            bases = stats.bases,
            vertices = stats.vertices,
            rays = stats.rays,
            "reverse search complete"
        );

        let mut data = Vec::with_capacity((vertex_rows.len() + ray_rows.len()) * n);
        let rows = vertex_rows.len() + ray_rows.len();
        for row in vertex_rows.into_iter().chain(ray_rows) {
            data.extend(row);
        }
        Ok(Enumeration {
            generators: Polyhedron::generator(Matrix::from_flat(rows, n, data)),
            stats,
            status: ComputationStatus::AllFound,
        })
    }

    fn empty(&self, status: ComputationStatus) -> Enumeration {
        Enumeration {
            generators: Polyhedron::generator(Matrix::new(0, self.matrix.col_count())),
            stats: EnumStats::default(),
            status,
        }
    }
}
