use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use log::{debug, error, info};

use huffman_compressor::escape::{display_symbol, escape_special_characters};
use huffman_compressor::{Compressed, compress, entropy_from_freq};

/// Huffman-encodes a file into a stream of bits.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to the file to encode.
    input: PathBuf,

    /// Path to write the encoded output.
    #[arg(default_value = "output.huff")]
    output: PathBuf,

    /// Escape non-printable bytes as `[0x<octal>]` before encoding.
    #[arg(long)]
    escape: bool,

    /// Write packed bytes instead of literal '0'/'1' characters.
    #[arg(long)]
    packed: bool,

    /// Do not print the code table.
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Input,
    Output,
}

/// Reading the source or writing the destination failed.
#[derive(Debug)]
struct IoFailure {
    side: Side,
    path: PathBuf,
    source: std::io::Error,
}

impl IoFailure {
    fn status(&self) -> &'static str {
        match self.side {
            Side::Input => "Input File Error",
            Side::Output => "Output File Error",
        }
    }
}

impl fmt::Display for IoFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.source)
    }
}

impl std::error::Error for IoFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

fn read_input(path: &Path) -> Result<Vec<u8>, IoFailure> {
    info!("Reading input file: {}", path.display());
    fs::read(path).map_err(|source| IoFailure {
        side: Side::Input,
        path: path.to_path_buf(),
        source,
    })
}

fn write_output(path: &Path, data: &[u8]) -> Result<(), IoFailure> {
    info!("Writing encoded output to file: {}", path.display());
    fs::write(path, data).map_err(|source| IoFailure {
        side: Side::Output,
        path: path.to_path_buf(),
        source,
    })
}

fn print_code_table(compressed: &Compressed) {
    for (symbol, code) in &compressed.code_table {
        println!(
            "{}:{}:{}",
            display_symbol(*symbol),
            compressed.frequencies[symbol],
            code
        );
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let raw = read_input(&args.input)?;
    let symbols = if args.escape {
        let escaped = escape_special_characters(&raw);
        debug!("Escaped {} bytes into {} symbols.", raw.len(), escaped.len());
        escaped
    } else {
        raw
    };

    let compressed = compress(&symbols)
        .with_context(|| format!("could not encode {}", args.input.display()))?;

    if !args.quiet {
        print_code_table(&compressed);
    }

    let payload = if args.packed {
        compressed.encoded.to_packed_bytes()
    } else {
        compressed.encoded.bits.clone().into_bytes()
    };
    write_output(&args.output, &payload)?;

    println!("You saved {} space!", compressed.space_saved_bits());
    println!(
        "Entropy: {:.4} bits/symbol, average code length: {:.4} bits/symbol",
        entropy_from_freq(&compressed.frequencies),
        compressed.encoded.bits_after as f64 / compressed.encoded.symbol_count as f64
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    info!("--- Start Encoding ---");
    let status = match run(&args) {
        Ok(()) => {
            println!("Ok");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{:#}", e);
            match e.downcast_ref::<IoFailure>() {
                Some(failure) => println!("{}", failure.status()),
                None => println!("Encoding Error"),
            }
            ExitCode::FAILURE
        }
    };
    info!("--- End ---");
    status
}
