use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

mod commands;
mod progress;

#[derive(Parser, Debug)]
#[command(name = "cipher_cli", version, about = "Playfair and textbook RSA toolkit")]
struct Cli {
    /// Do not render progress on stderr
    #[arg(long, action = ArgAction::SetTrue, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Playfair digraph cipher
    #[command(subcommand)]
    Playfair(PlayfairCommand),
    /// Textbook RSA
    #[command(subcommand)]
    Rsa(RsaCommand),
    /// Report which cipher produced a file, if any
    Detect {
        path: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum PlayfairCommand {
    /// Print the 5x5 square for a key
    Matrix {
        #[arg(short, long)]
        key: String,
    },
    /// Encrypt text
    Encrypt {
        #[arg(short, long)]
        key: String,
        /// Print every substitution step before the result
        #[arg(long, action = ArgAction::SetTrue)]
        trace: bool,
        text: String,
    },
    /// Decrypt text
    Decrypt {
        #[arg(short, long)]
        key: String,
        #[arg(long, action = ArgAction::SetTrue)]
        trace: bool,
        text: String,
    },
    /// Encrypt a file into the Playfair container format
    EncryptFile {
        #[arg(short, long)]
        key: String,
        #[arg(short = 'i', long = "input")]
        input: PathBuf,
        #[arg(short = 'o', long = "output")]
        output: PathBuf,
    },
    /// Decrypt a Playfair container file
    DecryptFile {
        #[arg(short, long)]
        key: String,
        #[arg(short = 'i', long = "input")]
        input: PathBuf,
        #[arg(short = 'o', long = "output")]
        output: PathBuf,
    },
}

/// Key files written by `generate`/`manual` and read by everything else.
#[derive(clap::Args, Debug)]
pub struct KeyPaths {
    /// Public key file (`E` and `N`)
    #[arg(long = "public")]
    pub public: Option<PathBuf>,
    /// Private key file (`D` and `N`)
    #[arg(long = "private")]
    pub private: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum RsaCommand {
    /// Generate a key pair and optionally export it
    Generate {
        #[arg(short, long, default_value_t = rsa_cipher::DEFAULT_BIT_LENGTH)]
        bits: usize,
        /// Miller-Rabin rounds per prime candidate
        #[arg(short, long, default_value_t = rsa_cipher::primality::DEFAULT_ROUNDS)]
        rounds: u32,
        #[command(flatten)]
        keys: KeyPaths,
    },
    /// Build a key pair from chosen primes and exponent
    Manual {
        #[arg(short, long)]
        p: String,
        #[arg(short, long)]
        q: String,
        #[arg(short, long, default_value_t = rsa_cipher::DEFAULT_PUBLIC_EXPONENT.to_string())]
        e: String,
        #[command(flatten)]
        keys: KeyPaths,
    },
    /// Show the key material found in key files
    Info {
        #[command(flatten)]
        keys: KeyPaths,
    },
    /// Encrypt text byte by byte
    Encrypt {
        #[command(flatten)]
        keys: KeyPaths,
        #[arg(long, action = ArgAction::SetTrue)]
        trace: bool,
        text: String,
    },
    /// Decrypt space-separated ciphertext numbers
    Decrypt {
        #[command(flatten)]
        keys: KeyPaths,
        #[arg(long, action = ArgAction::SetTrue)]
        trace: bool,
        text: String,
    },
    /// Compute M^E mod N for one number
    EncryptNumber {
        #[command(flatten)]
        keys: KeyPaths,
        #[arg(long, action = ArgAction::SetTrue)]
        trace: bool,
        number: String,
    },
    /// Compute C^D mod N for one number
    DecryptNumber {
        #[command(flatten)]
        keys: KeyPaths,
        #[arg(long, action = ArgAction::SetTrue)]
        trace: bool,
        number: String,
    },
    /// Encrypt a file into the RSA container format
    EncryptFile {
        #[command(flatten)]
        keys: KeyPaths,
        #[arg(short = 'i', long = "input")]
        input: PathBuf,
        #[arg(short = 'o', long = "output")]
        output: PathBuf,
    },
    /// Decrypt an RSA container file
    DecryptFile {
        #[command(flatten)]
        keys: KeyPaths,
        #[arg(short = 'i', long = "input")]
        input: PathBuf,
        #[arg(short = 'o', long = "output")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Playfair(command) => commands::playfair(command, cli.quiet).await,
        Commands::Rsa(command) => commands::rsa(command, cli.quiet).await,
        Commands::Detect { path } => {
            commands::detect(&path);
            Ok(())
        }
    };

    if let Err(err) = result {
        log::debug!("command failed: {err:?}");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
