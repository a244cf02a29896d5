//! callback-crypto CLI — seal, open and sign callback envelopes
//!
//! Usage:
//!   callback-crypto seal --nonce <NONCE> [--timestamp <MS>] [--input <FILE>]
//!   callback-crypto open [--input <FILE>]
//!   callback-crypto sign --timestamp <TS> --nonce <NONCE> --encrypt <CIPHERTEXT>
//!
//! Credentials come from `--config <FILE>` or from
//! CALLBACK_TOKEN / CALLBACK_AES_KEY / CALLBACK_OWNER_KEY.

use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use callback_crypto::{signature, CallbackCrypto, Config, Envelope};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "callback-crypto")]
#[command(version)]
#[command(about = "Seal and open signed callback envelopes", long_about = None)]
struct Cli {
    /// JSON file with token, encoding_aes_key and owner_key
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt and sign a plaintext, print the envelope as JSON
    Seal {
        /// Anti-replay nonce included in the signature
        #[arg(long)]
        nonce: String,

        /// Timestamp to sign (defaults to now, in milliseconds)
        #[arg(long)]
        timestamp: Option<String>,

        /// Plaintext file (stdin if omitted)
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Verify and decrypt a JSON envelope, print the plaintext
    Open {
        /// Envelope JSON file (stdin if omitted)
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Print the signature for the given values
    Sign {
        #[arg(long)]
        timestamp: String,

        #[arg(long)]
        nonce: String,

        /// Base64 ciphertext
        #[arg(long)]
        encrypt: String,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = match &cli.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::from_env()?,
    };

    match cli.command {
        Commands::Seal {
            nonce,
            timestamp,
            input,
        } => {
            let crypto = config.build()?;
            let plaintext = read_input(input.as_ref())?;
            let timestamp = match timestamp {
                Some(ts) => ts,
                None => now_millis()?.to_string(),
            };
            let envelope = crypto.seal(&plaintext, timestamp, &nonce)?;
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }

        Commands::Open { input } => {
            let crypto = config.build()?;
            let envelope: Envelope = serde_json::from_str(&read_input(input.as_ref())?)?;
            print!("{}", open(&crypto, &envelope)?);
        }

        Commands::Sign {
            timestamp,
            nonce,
            encrypt,
        } => {
            println!(
                "{}",
                signature::sign(&config.token, &timestamp, &nonce, &encrypt)
            );
        }
    }

    Ok(())
}

fn open(crypto: &CallbackCrypto, envelope: &Envelope) -> Result<String, Box<dyn Error>> {
    crypto
        .open(envelope)
        .map_err(|e| format!("{} (code {})", e, e.code()).into())
}

fn read_input(path: Option<&PathBuf>) -> io::Result<String> {
    match path {
        Some(p) => fs::read_to_string(p),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn now_millis() -> Result<u128, Box<dyn Error>> {
    Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis())
}
