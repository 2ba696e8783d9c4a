//! Command-line driver: read an lrs-format file, apply the requested
//! transforms, run the enumeration, and print the dual representation with
//! totals.

mod options;
mod transforms;

use std::cmp::Ordering;
use std::fs;
use std::time::Instant;

use arris::io;
use arris::lrs::{ComputationStatus, Options as LrsOptions, Traversal};
use arris::matrix::Matrix;
use arris::num::Rat;
use arris::polyhedron::{Polyhedron, RepresentationKind};

use options::Mode;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    std::process::exit(run());
}

fn run() -> i32 {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match options::parse(args) {
        Ok(options) => options,
        Err(err) => {
            eprint!("{}", options::USAGE);
            eprintln!("argument error: {err}");
            return 2;
        }
    };
    if options.threads > 1 || options.seed != 1 {
        tracing::warn!("the threads and seed options are reserved and ignored");
    }

    let started = Instant::now();
    let text = match fs::read_to_string(&options.input) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("cannot read {}: {err}", options.input.display());
            return 1;
        }
    };
    let parsed = match io::read_polyhedron(&text) {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("{err}");
            return 1;
        }
    };
    let integral_input = options.integer_input || parsed.integer_input;
    let working = match transforms::apply(parsed.polyhedron, &options) {
        Ok(working) => working,
        Err(err) => {
            eprintln!("argument error: {err}");
            return 2;
        }
    };

    let mode = options.mode.unwrap_or(match working.kind() {
        RepresentationKind::Inequality => Mode::Vertex,
        RepresentationKind::Generator => Mode::Hull,
    });
    match (mode, working.kind()) {
        (Mode::Vertex, RepresentationKind::Generator)
        | (Mode::Hull, RepresentationKind::Inequality) => {
            eprintln!("argument error: mode does not match the input representation");
            return 2;
        }
        _ => {}
    }

    match mode {
        Mode::Vertex => {
            let lrs_options = LrsOptions {
                max_depth: (options.max_depth > 0).then_some(options.max_depth),
            };
            let enumeration = match Traversal::new(working.matrix(), lrs_options).run() {
                Ok(enumeration) => enumeration,
                Err(err) => {
                    eprintln!("*unrecoverable error: {err}");
                    return -1;
                }
            };
            print!(
                "{}",
                io::write_polyhedron(&sorted_for_display(enumeration.generators))
            );
            if enumeration.status == ComputationStatus::RegionEmpty {
                println!("*no feasible point");
            }
            let stats = &enumeration.stats;
            // The integral count is reported only for inputs declared
            // integral.
            let integer_vertices = if integral_input {
                stats.integer_vertices
            } else {
                0
            };
            println!(
                "*Totals: vertices={} rays={} bases={} integer_vertices={}",
                stats.vertices, stats.rays, stats.bases, integer_vertices
            );
            if options.print_cobasis
                && let Some(cobasis) = &stats.last_cobasis
            {
                let rendered: Vec<String> = cobasis.iter().map(ToString::to_string).collect();
                println!("*cobasis: {}", rendered.join(" "));
            }
        }
        Mode::Hull => {
            let hull = match arris::hull::facets(&working) {
                Ok(hull) => hull,
                Err(err) => {
                    eprintln!("*unrecoverable error: {err}");
                    return -1;
                }
            };
            print!("{}", io::write_polyhedron(&hull.inequalities));
            println!(
                "*Totals: facets={} bases={}",
                hull.stats.facets, hull.stats.bases
            );
        }
    }

    println!("*elapsed time: {:.3} seconds", started.elapsed().as_secs_f64());
    0
}

/// Display ordering for generator output: vertices before rays, each block
/// sorted lex-descending on the coordinates from last to first. The
/// enumerator itself emits discovery order; this is presentation only.
fn sorted_for_display(generators: Polyhedron) -> Polyhedron {
    let n = generators.col_count();
    let mut vertices: Vec<Vec<Rat>> = Vec::new();
    let mut rays: Vec<Vec<Rat>> = Vec::new();
    for row in generators.matrix().rows() {
        if row[0].is_zero() {
            rays.push(row.to_vec());
        } else {
            vertices.push(row.to_vec());
        }
    }
    let display_order = |a: &Vec<Rat>, b: &Vec<Rat>| {
        for j in (1..n).rev() {
            match b[j].cmp(&a[j]) {
                Ordering::Equal => continue,
                other => return other,
            }
        }
        Ordering::Equal
    };
    vertices.sort_by(display_order);
    rays.sort_by(display_order);

    let rows = vertices.len() + rays.len();
    let mut data = Vec::with_capacity(rows * n);
    for row in vertices.into_iter().chain(rays) {
        data.extend(row);
    }
    Polyhedron::generator(Matrix::from_flat(rows, n, data))
}
