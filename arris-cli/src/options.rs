//! Command-line option parsing.

use std::path::PathBuf;

use anyhow::{Result, anyhow, bail};

pub const USAGE: &str = "\
Usage: arris [options] <input-file>
Modes:
  -v            H->V vertex enumeration (default for H input)
  -h            V->H facet enumeration (default for V input)
Options:
  -redund           remove redundant rows (reserved)
  -minrep           minimize the representation (reserved)
  -printcobasis     print the final cobasis
  -integer          declare the input integral (metadata only)
  -seed <n>         tie-break seed (reserved)
  -maxdepth <d>     cap the reverse-search depth (0 = unlimited)
  -threads <t>      worker count (reserved)
  -eliminate i,j,k  eliminate the listed columns (reserved)
  -project i,j,k    keep only the listed columns
  -linearity i,j,k  treat the listed rows as equalities
";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Vertex,
    Hull,
}

#[derive(Clone, Debug)]
pub struct CliOptions {
    pub mode: Option<Mode>,
    pub redund: bool,
    pub minrep: bool,
    pub print_cobasis: bool,
    pub integer_input: bool,
    pub max_depth: usize,
    pub threads: usize,
    pub seed: u64,
    pub eliminate: Vec<usize>,
    pub project: Vec<usize>,
    pub linearity: Vec<usize>,
    pub input: PathBuf,
}

pub fn parse(args: impl IntoIterator<Item = String>) -> Result<CliOptions> {
    let mut args = args.into_iter();
    let mut mode = None;
    let mut redund = false;
    let mut minrep = false;
    let mut print_cobasis = false;
    let mut integer_input = false;
    let mut max_depth = 0usize;
    let mut threads = 1usize;
    let mut seed = 1u64;
    let mut eliminate = Vec::new();
    let mut project = Vec::new();
    let mut linearity = Vec::new();
    let mut input: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-v" => mode = Some(Mode::Vertex),
            "-h" => mode = Some(Mode::Hull),
            "-redund" => redund = true,
            "-minrep" => minrep = true,
            "-printcobasis" => print_cobasis = true,
            "-integer" => integer_input = true,
            "-seed" => seed = value(&mut args, "-seed")?.parse()?,
            "-maxdepth" => max_depth = value(&mut args, "-maxdepth")?.parse()?,
            "-threads" => threads = value(&mut args, "-threads")?.parse::<usize>()?.max(1),
            "-eliminate" => eliminate = csv(&value(&mut args, "-eliminate")?)?,
            "-project" => project = csv(&value(&mut args, "-project")?)?,
            "-linearity" | "-linset" => linearity = csv(&value(&mut args, "-linearity")?)?,
            other if other.starts_with('-') => bail!("unknown option {other}"),
            _ => {
                if input.is_some() {
                    bail!("multiple input files given ({arg})");
                }
                input = Some(PathBuf::from(arg));
            }
        }
    }

    Ok(CliOptions {
        mode,
        redund,
        minrep,
        print_cobasis,
        integer_input,
        max_depth,
        threads,
        seed,
        eliminate,
        project,
        linearity,
        input: input.ok_or_else(|| anyhow!("missing input file"))?,
    })
}

fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next().ok_or_else(|| anyhow!("{flag} needs a value"))
}

fn csv(list: &str) -> Result<Vec<usize>> {
    let mut out = Vec::new();
    for part in list.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        out.push(
            part.parse()
                .map_err(|_| anyhow!("bad index {part:?} in {list:?}"))?,
        );
    }
    out.sort_unstable();
    out.dedup();
    Ok(out)
}
