//! Command-line tool to compress or decompress binary float dumps.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use hczip::driver::{compress_stream, decompress_stream, ChunkStats};
use hczip::{Extent, Profile};

#[derive(Parser)]
#[command(name = "hczip")]
#[command(about = "Compress or decompress binary float dumps", version)]
struct Cli {
    /// Decompress (default is compress)
    #[arg(short = 'd', long)]
    decompress: bool,

    /// Array size, one value per dimension, first-major
    #[arg(short = 'n', long = "array-size", required = true, num_args = 1..=3, value_name = "N")]
    array_size: Vec<usize>,

    /// Profile tuned for throughput
    #[arg(short = '1', long, conflicts_with = "strong")]
    fast: bool,

    /// Profile tuned for compression ratio (default)
    #[arg(short = '9', long)]
    strong: bool,

    /// Element type of the array
    #[arg(short = 't', long, value_enum, default_value = "float")]
    data_type: DataType,

    /// Input file ('-' is stdin)
    #[arg(short = 'i', long, default_value = "-")]
    input: String,

    /// Output file ('-' is stdout)
    #[arg(short = 'o', long, default_value = "-")]
    output: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DataType {
    /// 32-bit IEEE-754
    Float,
    /// 64-bit IEEE-754
    Double,
}

fn open_input(path: &str) -> Result<Box<dyn Read>> {
    if path == "-" {
        Ok(Box::new(io::stdin().lock()))
    } else {
        let file = File::open(path).with_context(|| format!("cannot open {path}"))?;
        Ok(Box::new(BufReader::new(file)))
    }
}

fn open_output(path: &str) -> Result<Box<dyn Write>> {
    if path == "-" {
        Ok(Box::new(io::stdout().lock()))
    } else {
        let file = File::create(path).with_context(|| format!("cannot create {path}"))?;
        Ok(Box::new(BufWriter::new(file)))
    }
}

fn report(stats: &ChunkStats) {
    if stats.chunks > 1 {
        eprintln!(
            "raw = {} bytes ({} chunks of {} bytes), compressed = {} bytes, ratio = {:.4}",
            stats.raw_bytes,
            stats.chunks,
            stats.raw_bytes / stats.chunks as u64,
            stats.compressed_bytes,
            stats.ratio()
        );
    } else {
        eprintln!(
            "raw = {} bytes, compressed = {} bytes, ratio = {:.4}",
            stats.raw_bytes,
            stats.compressed_bytes,
            stats.ratio()
        );
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let extent = Extent::new(&cli.array_size).context("invalid --array-size")?;
    let profile = if cli.fast {
        Profile::Fast
    } else {
        Profile::Strong
    };

    let input = open_input(&cli.input)?;
    let output = open_output(&cli.output)?;

    match (cli.decompress, cli.data_type) {
        (false, DataType::Float) => {
            let stats = compress_stream::<f32, _, _>(input, output, extent, profile)?;
            report(&stats);
        }
        (false, DataType::Double) => {
            let stats = compress_stream::<f64, _, _>(input, output, extent, profile)?;
            report(&stats);
        }
        (true, DataType::Float) => {
            decompress_stream::<f32, _, _>(input, output, extent)?;
        }
        (true, DataType::Double) => {
            decompress_stream::<f64, _, _>(input, output, extent)?;
        }
    }

    Ok(())
}
