use clap::Parser;
use harmony::vectors::{random_instance, write_instance};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::{self, BufWriter, Write};

/* Generates a random two-group constraint instance, in the same format that
 * 'harmony' reads, and writes it to a file (or stdout).
 *
 * With '--planted', the tags are derived from a hidden random grouping, so the
 * instance is always consistent; useful for checking large inputs, where the
 * expected verdict would otherwise be unknown.
 */

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Name of file to output (stdout if not given)
    #[arg(short, long)]
    fname: Option<String>,

    /// Number of vertices
    #[arg(short, long, default_value_t = 8)]
    vertices: usize,

    /// Number of edges
    #[arg(short, long, default_value_t = 12)]
    edges: usize,

    /// Probability that an edge is "opposite"
    #[arg(short, long, default_value_t = 0.5)]
    opposite: f64,

    /// Derive the tags from a hidden grouping, so the instance is consistent
    #[arg(short, long)]
    planted: bool,

    /// Seed for the random-number generator
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let graph = random_instance(
        &mut rng,
        args.vertices,
        args.edges,
        args.opposite,
        args.planted,
    )?;

    let mut writer: Box<dyn Write> = match args.fname {
        Some(fname) => {
            eprintln!("Output file {}", fname);
            Box::new(BufWriter::new(File::create(fname)?))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    write_instance(&mut writer, &graph)?;
    Ok(())
}
