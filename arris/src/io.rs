//! Reading and writing the lrs-compatible text format.
//!
//! This is the only module that touches text; parse failures never reach
//! the enumeration core.

use std::fmt::Write as _;

use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::num::Rat;
use crate::polyhedron::{Polyhedron, RepresentationKind};

/// A parsed input file: the polyhedron plus the header's declared number
/// kind (metadata only; all arithmetic is rational regardless).
#[derive(Clone, Debug)]
pub struct ParsedInput {
    pub polyhedron: Polyhedron,
    pub integer_input: bool,
}

fn parse_error(line: usize, message: impl Into<String>) -> Error {
    Error::Parse {
        line,
        message: message.into(),
    }
}

fn is_comment(line: &str) -> bool {
    line.starts_with('*') || line.starts_with('#')
}

/// Parses an `.ine`/`.ext` style document.
///
/// An optional case-insensitive `H-representation` / `V-representation`
/// header selects the kind (H when absent). Name and option lines before
/// `begin` are ignored, as are blank lines and `*`/`#` comments. The size
/// line is `m n integer|rational`, with `*****` for a deferred row count
/// (rows are then read until `end`).
pub fn read_polyhedron(text: &str) -> Result<ParsedInput> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let mut kind = RepresentationKind::Inequality;
    let mut saw_begin = false;
    for (_, line) in lines.by_ref() {
        if is_comment(line) {
            continue;
        }
        let lower = line.to_ascii_lowercase();
        if lower.starts_with("h-representation") {
            kind = RepresentationKind::Inequality;
        } else if lower.starts_with("v-representation") {
            kind = RepresentationKind::Generator;
        } else if lower == "begin" {
            saw_begin = true;
            break;
        }
        // Any other pre-begin line is a name or option; ignored here.
    }
    if !saw_begin {
        return Err(parse_error(0, "no 'begin' line found"));
    }

    // The size line may itself start with the '*****' deferred-count
    // marker, so it is exempt from comment skipping.
    let (size_line_no, size_line) = lines
        .next()
        .ok_or_else(|| parse_error(0, "missing size line after 'begin'"))?;
    let fields: Vec<&str> = size_line.split_whitespace().collect();
    if fields.len() < 3 {
        return Err(parse_error(
            size_line_no,
            format!("expected 'm n integer|rational', got {size_line:?}"),
        ));
    }
    let deferred = fields[0] == "*****";
    let declared_rows = if deferred {
        None
    } else {
        Some(fields[0].parse::<usize>().map_err(|_| {
            parse_error(
                size_line_no,
                format!("row count must be a number or '*****', got {:?}", fields[0]),
            )
        })?)
    };
    let cols: usize = fields[1]
        .parse()
        .map_err(|_| parse_error(size_line_no, format!("bad column count {:?}", fields[1])))?;
    if cols == 0 {
        return Err(parse_error(size_line_no, "column count must be positive"));
    }
    let integer_input = match fields[2].to_ascii_lowercase().as_str() {
        "integer" => true,
        "rational" => false,
        other => {
            return Err(parse_error(
                size_line_no,
                format!("number kind must be 'integer' or 'rational', got {other:?}"),
            ));
        }
    };

    let mut rows: Vec<Vec<Rat>> = Vec::new();
    let mut saw_end = false;
    for (line_no, line) in lines.by_ref() {
        if is_comment(line) {
            continue;
        }
        if line.eq_ignore_ascii_case("end") {
            saw_end = true;
            break;
        }
        if let Some(expected) = declared_rows
            && rows.len() == expected
        {
            return Err(parse_error(
                line_no,
                format!("expected 'end' after {expected} rows, got {line:?}"),
            ));
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != cols {
            return Err(parse_error(
                line_no,
                format!("expected {cols} entries, got {}", tokens.len()),
            ));
        }
        let mut row = Vec::with_capacity(cols);
        for token in tokens {
            let value: Rat = token
                .parse()
                .map_err(|_| parse_error(line_no, format!("bad rational {token:?}")))?;
            row.push(value);
        }
        rows.push(row);
    }
    if !saw_end {
        return Err(parse_error(0, "missing 'end' line"));
    }
    if let Some(expected) = declared_rows
        && rows.len() != expected
    {
        return Err(parse_error(
            0,
            format!("declared {expected} rows but found {}", rows.len()),
        ));
    }

    let matrix = if rows.is_empty() {
        Matrix::new(0, cols)
    } else {
        Matrix::from_rows(rows)
    };
    let polyhedron = match kind {
        RepresentationKind::Inequality => Polyhedron::inequality(matrix),
        RepresentationKind::Generator => Polyhedron::generator(matrix),
    };
    Ok(ParsedInput {
        polyhedron,
        integer_input,
    })
}

/// Writes the mirror format with the lrs-style starred size line.
pub fn write_polyhedron(polyhedron: &Polyhedron) -> String {
    let mut out = String::new();
    match polyhedron.kind() {
        RepresentationKind::Inequality => out.push_str("H-representation\n"),
        RepresentationKind::Generator => out.push_str("V-representation\n"),
    }
    out.push_str("begin\n");
    let _ = writeln!(out, "***** {} rational", polyhedron.col_count());
    for row in polyhedron.matrix().rows() {
        let mut first = true;
        for value in row {
            if !first {
                out.push(' ');
            }
            let _ = write!(out, "{value}");
            first = false;
        }
        out.push('\n');
    }
    out.push_str("end\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_plain_h_file() {
        let text = "square\nH-representation\nbegin\n4 3 integer\n0 1 0\n0 0 1\n1 -1 0\n1 0 -1\nend\n";
        let parsed = read_polyhedron(text).expect("parses");
        assert_eq!(parsed.polyhedron.kind(), RepresentationKind::Inequality);
        assert_eq!(parsed.polyhedron.row_count(), 4);
        assert_eq!(parsed.polyhedron.col_count(), 3);
        assert!(parsed.integer_input);
    }

    #[test]
    fn header_defaults_to_h_and_ignores_noise() {
        let text = "* a comment\nsome option line\n# more\n\nbegin\n1 2 rational\n1/2 -3\nend\n";
        let parsed = read_polyhedron(text).expect("parses");
        assert_eq!(parsed.polyhedron.kind(), RepresentationKind::Inequality);
        assert!(!parsed.integer_input);
        assert_eq!(
            parsed.polyhedron.matrix().get(0, 0),
            &"1/2".parse::<Rat>().unwrap()
        );
    }

    #[test]
    fn starred_row_count_reads_until_end() {
        let text = "V-representation\nbegin\n***** 3 rational\n1 0 0\n1 1 0\n1 0 1\nend\n";
        let parsed = read_polyhedron(text).expect("parses");
        assert_eq!(parsed.polyhedron.kind(), RepresentationKind::Generator);
        assert_eq!(parsed.polyhedron.row_count(), 3);
    }

    #[test]
    fn malformed_documents_are_rejected() {
        assert!(read_polyhedron("no begin here\n").is_err());
        assert!(read_polyhedron("begin\n1 2\nend\n").is_err());
        assert!(read_polyhedron("begin\n1 2 integer\n1\nend\n").is_err());
        assert!(read_polyhedron("begin\n2 2 integer\n1 1\nend\n").is_err());
        assert!(read_polyhedron("begin\n1 2 integer\n1 x\nend\n").is_err());
        assert!(read_polyhedron("begin\n1 2 integer\n1 1\n").is_err());
    }

    #[test]
    fn writer_round_trips_through_the_reader() {
        let text = "V-representation\nbegin\n***** 3 rational\n1 0 0\n0 1 1/2\nend\n";
        let parsed = read_polyhedron(text).expect("parses");
        let written = write_polyhedron(&parsed.polyhedron);
        let reparsed = read_polyhedron(&written).expect("reparses");
        assert_eq!(
            reparsed.polyhedron.matrix(),
            parsed.polyhedron.matrix()
        );
        assert_eq!(reparsed.polyhedron.kind(), parsed.polyhedron.kind());
    }
}
