//! cmna - Compact modified nodal analysis
//!
//! Reads a netlist, prints the reduced system size and the DC solution.
//!
//! # Usage
//!
//! ```bash
//! cmna amplifier.net
//! cmna --no-title -vv divider.net
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use compact_mna::{
    error::Result,
    netlist::{self, ParseOptions},
    solver::{DEFAULT_MAX_ELEMENTS, DEFAULT_MAX_NODES, DEFAULT_PIVOT_TOLERANCE},
    Analysis, AnalysisConfig,
};

/// Compact modified nodal analysis of linear circuits
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the netlist file (prompted for when omitted)
    #[arg(value_name = "NETLIST")]
    netlist: Option<PathBuf>,

    /// The first line is an element, not a title
    #[arg(long)]
    no_title: bool,

    /// Maximum number of variables (nodes plus branch currents)
    #[arg(long, default_value_t = DEFAULT_MAX_NODES)]
    max_nodes: usize,

    /// Maximum number of elements
    #[arg(long, default_value_t = DEFAULT_MAX_ELEMENTS)]
    max_elements: usize,

    /// Smallest accepted pivot magnitude
    #[arg(long, default_value_t = DEFAULT_PIVOT_TOLERANCE)]
    tolerance: f64,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let path = match args.netlist {
        Some(path) => path,
        None => prompt_for_netlist()?,
    };

    let options = ParseOptions { title_line: !args.no_title };
    let ast = netlist::parse_file(&path, options)?;

    let config = AnalysisConfig::new()
        .with_max_nodes(args.max_nodes)
        .with_max_elements(args.max_elements)
        .with_pivot_tolerance(args.tolerance);
    let analysis = Analysis::from_ast(&ast, config)?;
    let solution = analysis.run()?;

    if let Some(title) = &solution.title {
        println!("Title: {}", title);
    }
    println!(
        "The circuit has {} nodes, {} variables, {} equations and {} elements",
        solution.num_nodes, solution.num_variables, solution.num_equations, solution.num_elements
    );
    print!("{}", solution);

    Ok(())
}

/// Ask on stdin until an existing file is named.
fn prompt_for_netlist() -> Result<PathBuf> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("Netlist file name (e.g. mna.net): ");
        io::stdout().flush().map_err(stdin_error)?;

        let Some(line) = lines.next() else {
            return Err(stdin_error(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "no file name given",
            )));
        };
        let path = PathBuf::from(line.map_err(stdin_error)?.trim());
        if path.is_file() {
            return Ok(path);
        }
        println!("File {} does not exist", path.display());
    }
}

fn stdin_error(source: io::Error) -> compact_mna::MnaError {
    compact_mna::MnaError::FileRead {
        path: "<stdin>".to_string(),
        source,
    }
}
