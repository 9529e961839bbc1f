use clap::Parser;
use harmony::{logger, read, ConstraintGraph, Method, Settings};
use log::{debug, info, trace, warn};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

/// Decides whether the vertices of a graph can be split into two groups, when
/// each edge requires its endpoints to be in the same group (tag 0), or in
/// opposite groups (tag 1). The instance is read as:
///
///   N M
///   u v tag     (M lines)
///
/// and a single line is printed: '1' if such a split exists, otherwise '0'.
///
/// For example, a triangle of "opposite" edges cannot be split, so this prints
/// '0':
///  printf '3 3\n0 1 1\n1 2 1\n2 0 1\n' | ./harmony
///
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Read the instance from this file, rather than from stdin
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// YAML settings file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Decision procedure
    #[arg(short, long, value_enum)]
    method: Option<Method>,

    /// Write the group of each vertex (YAML) to this file, when consistent
    #[arg(short, long, value_name = "FILE")]
    witness: Option<PathBuf>,

    /// Log level/spec (e.g., 'debug', or 'harmony::coloring=trace')
    #[arg(short, long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Duplicate all log records (not only warnings) to stderr, when logging
    /// to a directory; without one, every record at '--log-level' already
    /// goes to stderr
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn load_graph(input: Option<&Path>) -> Result<ConstraintGraph, Box<dyn std::error::Error>> {
    let graph = match input {
        Some(path) => {
            let file = File::open(path).map_err(|e| {
                format!("failed to open '{}': {}", path.display(), e)
            })?;
            read(BufReader::new(file))?
        }
        None => read(io::stdin().lock())?,
    };
    Ok(graph)
}

/**
 * Reads one instance, decides it, and prints the verdict.
 */
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();
    let settings = match args.config.as_ref() {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    }
    .with_log_level(args.log_level)
    .with_method(args.method)
    .with_verbose(args.verbose > 0);
    let _logger = logger::configure(
        settings.log_level.as_str(),
        settings.verbose,
        settings.log_directory.as_deref(),
    )?;
    debug!("{:?}", settings);

    let graph = load_graph(args.input.as_deref())?;
    info!(
        "instance: {} vertices, {} edges",
        graph.num_vertices(),
        graph.num_edges()
    );
    trace!("{}", graph);

    let verdict = settings.method.check(&graph);
    match (&verdict, args.witness.as_deref()) {
        (Ok(assignment), Some(path)) => {
            assignment.save(path)?;
            info!("witness written to '{}'", path.display());
        }
        (Err(_), Some(path)) => {
            warn!("inconsistent, so no witness written to '{}'", path.display())
        }
        _ => {}
    }

    Ok(println!("{}", if verdict.is_ok() { "1" } else { "0" }))
}
