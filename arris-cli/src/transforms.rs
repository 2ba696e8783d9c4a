//! Pre-enumeration transforms applied by the driver.
//!
//! The enumeration core handles pure inequality and generator systems;
//! equalities are split here, and the reserved passes are accepted but
//! leave the matrix unchanged.

use anyhow::{Result, bail};
use tracing::warn;

use arris::matrix::Matrix;
use arris::num::Rat;
use arris::polyhedron::{Polyhedron, RepresentationKind};

use crate::options::CliOptions;

pub fn apply(polyhedron: Polyhedron, options: &CliOptions) -> Result<Polyhedron> {
    let mut working = polyhedron;
    if !options.linearity.is_empty() {
        working = split_linearities(working, &options.linearity)?;
    }
    if !options.eliminate.is_empty() {
        warn!("column elimination is not implemented; keeping all columns");
    }
    if !options.project.is_empty() {
        working = project_columns(working, &options.project)?;
    }
    if options.minrep {
        warn!("minimal-representation pass is not implemented; keeping all rows");
    } else if options.redund {
        warn!("redundancy removal is not implemented; keeping all rows");
    }
    Ok(working)
}

/// Replaces each listed row (1-based) with the pair `row, -row`, so the
/// core only ever sees inequalities.
fn split_linearities(polyhedron: Polyhedron, rows: &[usize]) -> Result<Polyhedron> {
    if polyhedron.kind() != RepresentationKind::Inequality {
        bail!("linearity rows only apply to H-representations");
    }
    let m = polyhedron.row_count();
    for &row in rows {
        if row == 0 || row > m {
            bail!("linearity row {row} out of range 1..={m}");
        }
    }
    let mut out: Vec<Vec<Rat>> = (0..m).map(|i| polyhedron.matrix().copy_row(i)).collect();
    for &row in rows {
        let negated: Vec<Rat> = out[row - 1].iter().map(|v| -v).collect();
        out.push(negated);
    }
    Ok(Polyhedron::inequality(Matrix::from_rows(out)))
}

/// Keeps the constant column plus the listed variable columns (1-based).
fn project_columns(polyhedron: Polyhedron, columns: &[usize]) -> Result<Polyhedron> {
    let dim = polyhedron.dim();
    for &column in columns {
        if column == 0 || column > dim {
            bail!("projection column {column} out of range 1..={dim}");
        }
    }
    let mut keep = vec![0usize];
    keep.extend(columns.iter().copied());
    let mut rows: Vec<Vec<Rat>> = Vec::with_capacity(polyhedron.row_count());
    for row in polyhedron.matrix().rows() {
        rows.push(keep.iter().map(|&c| row[c].clone()).collect());
    }
    let matrix = if rows.is_empty() {
        Matrix::new(0, keep.len())
    } else {
        Matrix::from_rows(rows)
    };
    Ok(match polyhedron.kind() {
        RepresentationKind::Inequality => Polyhedron::inequality(matrix),
        RepresentationKind::Generator => Polyhedron::generator(matrix),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options;

    fn h_poly(rows: &[&[i64]]) -> Polyhedron {
        Polyhedron::inequality(Matrix::from_rows(
            rows.iter()
                .map(|row| row.iter().map(|&v| Rat::from(v)).collect())
                .collect(),
        ))
    }

    fn options_for(line: &str) -> CliOptions {
        options::parse(line.split_whitespace().map(str::to_string)).expect("parses")
    }

    #[test]
    fn linearity_rows_are_split() {
        let poly = h_poly(&[&[1, -1], &[0, 1]]);
        let out = apply(poly, &options_for("-linearity 1 in.ine")).expect("applies");
        assert_eq!(out.row_count(), 3);
        assert_eq!(out.matrix().copy_row(2), vec![Rat::from(-1), Rat::from(1)]);
    }

    #[test]
    fn projection_keeps_the_constant_column() {
        let poly = h_poly(&[&[1, 2, 3], &[4, 5, 6]]);
        let out = apply(poly, &options_for("-project 2 in.ine")).expect("applies");
        assert_eq!(out.col_count(), 2);
        assert_eq!(out.matrix().copy_row(0), vec![Rat::from(1), Rat::from(3)]);
    }

    #[test]
    fn out_of_range_rows_are_rejected() {
        let poly = h_poly(&[&[1, -1]]);
        assert!(apply(poly, &options_for("-linearity 5 in.ine")).is_err());
    }
}
