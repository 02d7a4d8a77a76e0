//! Command-line front end for issuing and checking tokens.
//!
//! ```bash
//! miller keygen
//! MILLER_SECRET=$(miller keygen) miller sign --tag password-reset '{"user": 42}'
//! miller verify --config miller.toml <TOKEN>
//! miller config example > miller.toml
//! ```

use clap::{Args, Parser, Subcommand};
use miller::utils::logging::init_logging;
use miller::{
    generate_key, MillerConfig, SerializationFormat, Signer, SignerOverrides, TokenError,
};
use serde_json::Value;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "miller",
    version,
    about = "Issue and verify tamper-evident tokens",
    long_about = "Miller signs JSON values into compact URL-safe tokens and verifies them.\n\n\
        Settings come from a TOML file, MILLER_* environment variables and\n\
        command-line flags, in increasing order of precedence."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a fresh 32-byte secret
    Keygen,

    /// Sign a JSON value and print the token
    Sign(SignArgs),

    /// Verify a token and print its payload as JSON
    Verify(VerifyArgs),

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Args, Debug)]
struct SignerArgs {
    /// Path to a TOML configuration file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Namespace tag
    #[arg(long)]
    tag: Option<String>,

    /// Secret, unpadded URL-safe base64
    #[arg(long)]
    secret: Option<String>,

    /// Payload format: json or messagepack (bincode cannot carry free-form JSON)
    #[arg(long)]
    format: Option<SerializationFormat>,
}

#[derive(Args, Debug)]
struct SignArgs {
    #[command(flatten)]
    signer: SignerArgs,

    /// JSON value to sign
    value: String,
}

#[derive(Args, Debug)]
struct VerifyArgs {
    #[command(flatten)]
    signer: SignerArgs,

    /// Token to verify
    token: String,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Print an example configuration with a fresh secret
    Example,

    /// Validate a configuration file
    Validate {
        /// Path to the TOML configuration file
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), TokenError> {
    match cli.command {
        Command::Keygen => {
            println!("{}", generate_key().to_encoded());
        }
        Command::Sign(args) => {
            let signer = build_signer(&args.signer)?;
            let value: Value = serde_json::from_str(&args.value)
                .map_err(|e| TokenError::Serialization(format!("Invalid JSON input: {e}")))?;
            println!("{}", signer.sign(&value)?);
        }
        Command::Verify(args) => {
            let signer = build_signer(&args.signer)?;
            let value: Value = signer.verify(args.token.trim())?;
            let rendered = serde_json::to_string_pretty(&value)
                .map_err(|e| TokenError::Serialization(e.to_string()))?;
            println!("{rendered}");
        }
        Command::Config(ConfigCommand::Example) => {
            print!("{}", MillerConfig::example_config());
        }
        Command::Config(ConfigCommand::Validate { file }) => {
            let config = MillerConfig::from_file(&file)?;
            let issues = config.validate();
            for issue in &issues {
                println!("  - {issue}");
            }
            config.validate_strict()?;
            println!("{}: ok", file.display());
        }
    }
    Ok(())
}

fn build_signer(args: &SignerArgs) -> Result<Signer<SerializationFormat>, TokenError> {
    let overrides = SignerOverrides {
        tag: args.tag.clone(),
        secret: args.secret.clone(),
        format: args.format,
    };
    let config = MillerConfig::load_layered(args.config.as_deref(), &overrides)?;

    // values are signed and printed as untyped JSON
    config.signer.ensure_self_describing()?;

    init_logging(&config.logging)?;
    debug!(tag = %config.signer.tag, format = %config.signer.format, "signer configured");

    Signer::from_config(&config.signer)
}
