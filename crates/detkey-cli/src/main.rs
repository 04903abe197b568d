//! detkey CLI — `detkey` command.
//!
//! Derives deterministic X25519 key pairs from a passphrase and salt,
//! exports public containers, computes shared secrets, and runs the
//! two-party demonstration exchange.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use zeroize::Zeroizing;

use detkey::exchange::{demo_parties, run_exchange};
use detkey::{
    DerivationInput, KdfConfig, KdfHash, KeyAgreement, KeyDeriver, PrivateKeyContainer,
    SoftwareProvider,
};

// ── Passphrase helper ─────────────────────────────────────────────────────────

/// Read one line from stdin as raw bytes, without the line terminator.
fn read_passphrase(prompt: &str) -> Result<Zeroizing<Vec<u8>>> {
    eprint!("{prompt}");
    let mut line = Zeroizing::new(Vec::new());
    std::io::stdin()
        .lock()
        .read_until(b'\n', &mut line)
        .context("failed to read passphrase")?;
    while matches!(line.last(), Some(b'\n') | Some(b'\r')) {
        line.pop();
    }
    Ok(line)
}

// ── Configuration helpers ─────────────────────────────────────────────────────

/// Defaults, overridden by the config file, overridden by flags.
fn load_kdf_config(
    path: Option<&Path>,
    iterations: Option<u32>,
    hash: Option<&str>,
) -> Result<KdfConfig> {
    let mut config = match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            log::debug!("loading KDF config from {}", path.display());
            KdfConfig::from_json(&json)
                .with_context(|| format!("invalid KDF config in {}", path.display()))?
        }
        None => KdfConfig::default(),
    };
    if let Some(iterations) = iterations {
        config = config.with_iterations(iterations);
    }
    if let Some(hash) = hash {
        config = config.with_hash(hash.parse::<KdfHash>()?);
    }
    config.validate()?;
    Ok(config)
}

// ── CLI structure ─────────────────────────────────────────────────────────────

/// detkey CLI — deterministic X25519 keys from a passphrase and salt.
#[derive(Parser, Debug)]
#[command(
    name = "detkey",
    about = "Deterministic X25519 key derivation and agreement",
    version,
    long_about = "detkey — deterministic X25519 keys\n\nDerive PKCS#8/SPKI key containers from a passphrase and salt with\nPBKDF2, and compute X25519 shared secrets between two parties."
)]
struct Cli {
    /// PBKDF2 iteration count (default: 100000)
    #[arg(long, global = true)]
    iterations: Option<u32>,

    /// PBKDF2 hash: SHA-256, SHA-384 or SHA-512 (default: SHA-256)
    #[arg(long, global = true)]
    hash: Option<String>,

    /// JSON file with KDF parameters
    #[arg(long, global = true)]
    kdf_config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Derive a key pair and print its PKCS#8 and SPKI containers as hex
    Derive {
        /// Passphrase (read from stdin when omitted)
        #[arg(long)]
        passphrase: Option<String>,

        /// Salt, unique per party or context
        #[arg(long)]
        salt: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the SPKI public container for a PKCS#8 private container
    Public {
        /// Hex-encoded PKCS#8 private container
        #[arg(long)]
        private: String,
    },

    /// Compute the shared secret between our private key and a peer's public key
    Agree {
        /// Hex-encoded PKCS#8 private container
        #[arg(long)]
        private: String,

        /// Hex-encoded SPKI public container of the peer
        #[arg(long)]
        peer: String,
    },

    /// Run the two-party demonstration exchange
    Demo {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let verbose = cli.verbose;

    let result = load_kdf_config(
        cli.kdf_config.as_deref(),
        cli.iterations,
        cli.hash.as_deref(),
    )
    .and_then(|config| {
        if verbose {
            eprintln!(
                "KDF: PBKDF2-{} x{} -> {} bits",
                config.hash, config.iterations, config.key_bits
            );
        }
        let deriver = KeyDeriver::new(SoftwareProvider, config);
        match cli.command {
            Commands::Derive {
                passphrase,
                salt,
                json,
            } => cmd_derive(&deriver, passphrase, &salt, json, verbose),
            Commands::Public { private } => cmd_public(&deriver, private.trim(), verbose),
            Commands::Agree { private, peer } => {
                cmd_agree(private.trim(), peer.trim(), verbose)
            }
            Commands::Demo { json } => cmd_demo(&deriver, json, verbose),
        }
    });

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

// ── Command implementations ───────────────────────────────────────────────────

/// `detkey derive [--passphrase P] --salt S [--json]`
fn cmd_derive(
    deriver: &KeyDeriver,
    passphrase: Option<String>,
    salt: &str,
    json: bool,
    verbose: bool,
) -> Result<()> {
    let passphrase = match passphrase {
        Some(p) => Zeroizing::new(p.into_bytes()),
        None => read_passphrase("Enter passphrase: ")?,
    };
    let input = DerivationInput::from_bytes(&passphrase, salt.as_bytes())?;

    if verbose {
        eprintln!("Deriving key pair...");
    }
    let pair = deriver.derive(&input).context("key derivation failed")?;

    if json {
        let out = serde_json::json!({
            "pkcs8": pair.private_container().to_hex(),
            "spki": pair.public_container().to_hex(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("PKCS#8: {}", pair.private_container().to_hex());
        println!("SPKI:   {}", pair.public_container().to_hex());
    }

    Ok(())
}

/// `detkey public --private HEX`
fn cmd_public(deriver: &KeyDeriver, private_hex: &str, verbose: bool) -> Result<()> {
    let private = PrivateKeyContainer::from_hex(private_hex).context("invalid private key")?;
    let public = deriver.public_from_private(&private)?;

    if verbose {
        eprintln!("Public container: {} bytes", public.as_bytes().len());
    }
    println!("{}", public.to_hex());

    Ok(())
}

/// `detkey agree --private HEX --peer HEX`
fn cmd_agree(private_hex: &str, peer_hex: &str, verbose: bool) -> Result<()> {
    let agreement = KeyAgreement::new(SoftwareProvider);
    let secret = agreement.agree_hex(private_hex, peer_hex).map_err(|e| {
        if e.is_peer_fault() {
            anyhow!("peer key rejected: {e}")
        } else {
            anyhow!(e)
        }
    })?;

    if verbose {
        eprintln!("Shared secret: {} bytes", secret.as_bytes().len());
    }
    println!("{}", secret.to_hex());

    Ok(())
}

/// `detkey demo [--json]`
fn cmd_demo(deriver: &KeyDeriver, json: bool, verbose: bool) -> Result<()> {
    let (a, b) = demo_parties();
    if verbose {
        eprintln!("Deriving key pairs for parties A and B...");
    }
    let report = run_exchange(deriver, &a, &b).context("exchange failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for party in [&report.a, &report.b] {
        println!("PKCS#8, {}: {}", party.name, party.pkcs8);
        println!("SPKI, {}: {}", party.name, party.spki);
    }
    for party in [&report.a, &report.b] {
        println!("Shared secret, {}: {}", party.name, party.shared_secret);
    }

    Ok(())
}
