use clap::{Parser, Subcommand};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};

use huffpack::{Archive, EncodeSummary};

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file into a packed stream and a frequency file
    Encode {
        #[clap(value_name = "INPUT")]
        input: PathBuf,
        #[clap(long, default_value = "enc.txt")]
        packed: PathBuf,
        #[clap(long, default_value = "freqFile.txt")]
        trie_file: PathBuf,
    },
    /// Restore a file from a packed stream and its frequency file
    Decode {
        #[clap(value_name = "OUTPUT")]
        output: PathBuf,
        #[clap(long, default_value = "enc.txt")]
        packed: PathBuf,
        #[clap(long, default_value = "freqFile.txt")]
        trie_file: PathBuf,
    },
    /// Encode INPUT, then decode the result into OUTPUT
    Roundtrip {
        #[clap(value_name = "INPUT")]
        input: PathBuf,
        #[clap(value_name = "OUTPUT")]
        output: PathBuf,
        #[clap(long, default_value = "enc.txt")]
        packed: PathBuf,
        #[clap(long, default_value = "freqFile.txt")]
        trie_file: PathBuf,
    },
    /// Compress a file into a single archive
    Pack {
        #[clap(value_name = "INPUT")]
        input: PathBuf,
        #[clap(value_name = "ARCHIVE")]
        output: PathBuf,
    },
    /// Extract an archive written by `pack`
    Unpack {
        #[clap(value_name = "ARCHIVE")]
        input: PathBuf,
        #[clap(value_name = "OUTPUT")]
        output: PathBuf,
    },
}

/// Output files created by one operation, removed again if it fails.
#[derive(Default)]
struct Outputs {
    created: Vec<PathBuf>,
}

impl Outputs {
    fn create(&mut self, path: &Path) -> io::Result<File> {
        let file = File::create(path)?;
        self.created.push(path.to_path_buf());
        Ok(file)
    }

    /// Runs `op`; on failure deletes exactly the files `op` created.
    fn run<T>(op: impl FnOnce(&mut Self) -> huffpack::Result<T>) -> huffpack::Result<T> {
        let mut outputs = Self::default();
        let res = op(&mut outputs);
        if res.is_err() {
            for path in &outputs.created {
                let _ = fs::remove_file(path);
            }
        }
        res
    }
}

fn encode_files(input: &Path, packed: &Path, trie_file: &Path) -> huffpack::Result<EncodeSummary> {
    Outputs::run(|outputs| {
        let input = BufReader::new(File::open(input)?);
        let packed_out = BufWriter::new(outputs.create(packed)?);
        let trie_out = outputs.create(trie_file)?;
        huffpack::encode_reader(input, packed_out, trie_out)
    })
}

fn decode_files(output: &Path, packed: &Path, trie_file: &Path) -> huffpack::Result<u64> {
    Outputs::run(|outputs| {
        let trie_in = BufReader::new(File::open(trie_file)?);
        let packed_in = BufReader::new(File::open(packed)?);
        let out = outputs.create(output)?;
        huffpack::decode(packed_in, trie_in, out)
    })
}

fn pack_file(input: &Path, output: &Path) -> huffpack::Result<Archive> {
    Outputs::run(|outputs| {
        let archive = Archive::compress(&fs::read(input)?)?;
        let bytes = archive.to_vec()?;
        outputs.create(output)?.write_all(&bytes)?;
        Ok(archive)
    })
}

fn unpack_file(input: &Path, output: &Path) -> huffpack::Result<u64> {
    Outputs::run(|outputs| {
        let archive = Archive::from_slice(&fs::read(input)?)?;
        let data = archive.decompress()?;
        outputs.create(output)?.write_all(&data)?;
        Ok(data.len() as u64)
    })
}

fn report_encode(summary: &EncodeSummary) {
    info!(
        symbols = summary.total_symbols,
        distinct = summary.distinct_symbols,
        bits = summary.packed_bits,
        "encoded"
    );
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut ok = true;

    match &cli.command {
        Commands::Encode {
            input,
            packed,
            trie_file,
        } => match encode_files(input, packed, trie_file) {
            Ok(summary) => report_encode(&summary),
            Err(e) => {
                error!("encoding failed: {e}");
                ok = false;
            }
        },
        Commands::Decode {
            output,
            packed,
            trie_file,
        } => match decode_files(output, packed, trie_file) {
            Ok(n) => info!(bytes = n, "decoded"),
            Err(e) => {
                error!("decoding failed: {e}");
                ok = false;
            }
        },
        Commands::Roundtrip {
            input,
            output,
            packed,
            trie_file,
        } => {
            match encode_files(input, packed, trie_file) {
                Ok(summary) => report_encode(&summary),
                Err(e) => {
                    error!("encoding failed: {e}");
                    ok = false;
                }
            }
            if ok {
                match decode_files(output, packed, trie_file) {
                    Ok(n) => info!(bytes = n, "decoded"),
                    Err(e) => {
                        error!("decoding failed: {e}");
                        ok = false;
                    }
                }
            }
        }
        Commands::Pack { input, output } => match pack_file(input, output) {
            Ok(archive) => info!(
                symbols = archive.total_symbols(),
                bits = archive.bit_len(),
                "packed"
            ),
            Err(e) => {
                error!("pack failed: {e}");
                ok = false;
            }
        },
        Commands::Unpack { input, output } => match unpack_file(input, output) {
            Ok(n) => info!(bytes = n, "unpacked"),
            Err(e) => {
                error!("unpack failed: {e}");
                ok = false;
            }
        },
    }

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
