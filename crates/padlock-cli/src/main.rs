//! padlock: Padlock password-manager CLI
//!
//! Commands:
//!   generate            - generate random passwords to a policy
//!   audit [PASSWORD]    - score a password against the strength heuristic
//!   export <ITEMS>      - write an optionally passphrase-protected vault backup
//!   import <BACKUP>     - read a backup and print its records as JSON

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use secrecy::SecretString;

use padlock_crypto::{analyze_password, generate_password, GeneratorPolicy};
use padlock_vault::{export_vault, import_vault, ClientConfig, VaultRecord};

#[derive(Parser, Debug)]
#[command(
    name = "padlock",
    version,
    about = "Padlock password manager client tools",
    long_about = "padlock: generate and audit passwords, and manage encrypted vault backups"
)]
struct Cli {
    /// Path to padlock.toml configuration file
    #[arg(long, short = 'c', env = "PADLOCK_CONFIG", default_value = "padlock.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "PADLOCK_LOG", default_value = "warn")]
    log: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate random passwords
    Generate {
        /// Password length (overrides config)
        #[arg(long, short = 'l')]
        length: Option<usize>,
        /// Exclude uppercase letters
        #[arg(long)]
        no_uppercase: bool,
        /// Exclude lowercase letters
        #[arg(long)]
        no_lowercase: bool,
        /// Exclude digits
        #[arg(long)]
        no_digits: bool,
        /// Exclude symbols
        #[arg(long)]
        no_symbols: bool,
        /// How many passwords to generate
        #[arg(long, short = 'n', default_value_t = 1)]
        count: usize,
        /// Print a strength line for each password
        #[arg(long)]
        audit: bool,
    },

    /// Score a password against the shared strength heuristic
    Audit {
        /// Password to score (prompted when omitted, keeping it out of
        /// shell history)
        password: Option<String>,
        /// Emit the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a vault backup from a JSON file of vault records
    Export {
        /// Path to a JSON array of vault records
        items: PathBuf,
        /// Output file (stdout when omitted)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
        /// Skip passphrase protection (records stay individually encrypted)
        #[arg(long)]
        plain: bool,
    },

    /// Read a vault backup and print its records as JSON
    Import {
        /// Backup file produced by `padlock export`
        backup: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log);

    let config = load_config(&cli.config).await?;

    match cli.command {
        Commands::Generate {
            length,
            no_uppercase,
            no_lowercase,
            no_digits,
            no_symbols,
            count,
            audit,
        } => {
            let policy = apply_flags(
                config.generator.clone(),
                length,
                no_uppercase,
                no_lowercase,
                no_digits,
                no_symbols,
            );
            cmd_generate(&policy, count, audit)
        }
        Commands::Audit { password, json } => cmd_audit(password, json),
        Commands::Export {
            items,
            output,
            plain,
        } => cmd_export(&items, output.as_deref(), plain).await,
        Commands::Import { backup } => cmd_import(&backup).await,
    }
}

fn init_logging(level: &str) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
}

async fn load_config(path: &Path) -> Result<ClientConfig> {
    if path.exists() {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| anyhow::anyhow!("reading config {}: {e}", path.display()))?;
        toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("parsing config {}: {e}", path.display()))
    } else {
        tracing::debug!("config file not found: {} (using defaults)", path.display());
        Ok(ClientConfig::default())
    }
}

fn apply_flags(
    mut policy: GeneratorPolicy,
    length: Option<usize>,
    no_uppercase: bool,
    no_lowercase: bool,
    no_digits: bool,
    no_symbols: bool,
) -> GeneratorPolicy {
    if let Some(length) = length {
        policy.length = length;
    }
    if no_uppercase {
        policy.uppercase = false;
    }
    if no_lowercase {
        policy.lowercase = false;
    }
    if no_digits {
        policy.digits = false;
    }
    if no_symbols {
        policy.symbols = false;
    }
    policy
}

fn cmd_generate(policy: &GeneratorPolicy, count: usize, audit: bool) -> Result<()> {
    for _ in 0..count {
        let password = generate_password(policy).context("generating password")?;
        if audit {
            let report = analyze_password(&password);
            println!("{password}  [{} {:.0}/100]", report.category, report.score);
        } else {
            println!("{password}");
        }
    }
    Ok(())
}

fn cmd_audit(password: Option<String>, json: bool) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => rpassword::prompt_password("Password to audit: ").context("reading password")?,
    };

    let report = analyze_password(&password);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("category:  {}", report.category);
    println!("score:     {:.1}/100", report.score);
    println!("length:    {}", report.length);
    println!(
        "classes:   upper={} lower={} digits={} symbols={}",
        report.has_uppercase, report.has_lowercase, report.has_digits, report.has_symbols
    );
    println!("entropy:   {:.1} bits", report.entropy_bits);
    if report.has_repeated_chars {
        println!("warning:   repeated characters");
    }
    if report.has_sequential_chars {
        println!("warning:   sequential characters");
    }
    Ok(())
}

async fn cmd_export(items: &Path, output: Option<&Path>, plain: bool) -> Result<()> {
    let json = tokio::fs::read_to_string(items)
        .await
        .map_err(|e| anyhow::anyhow!("reading {}: {e}", items.display()))?;
    let records: Vec<VaultRecord> =
        serde_json::from_str(&json).context("parsing vault records")?;

    let passphrase = if plain {
        None
    } else {
        let passphrase = rpassword::prompt_password("Backup passphrase: ")?;
        let confirm = rpassword::prompt_password("Confirm passphrase: ")?;
        anyhow::ensure!(passphrase == confirm, "passphrases do not match");
        Some(SecretString::from(passphrase))
    };

    let backup = export_vault(&records, passphrase.as_ref())?;

    match output {
        Some(path) => {
            tokio::fs::write(path, &backup)
                .await
                .map_err(|e| anyhow::anyhow!("writing {}: {e}", path.display()))?;
            eprintln!("wrote {} records to {}", records.len(), path.display());
        }
        None => println!("{backup}"),
    }
    Ok(())
}

async fn cmd_import(backup: &Path) -> Result<()> {
    let input = tokio::fs::read_to_string(backup)
        .await
        .map_err(|e| anyhow::anyhow!("reading {}: {e}", backup.display()))?;

    let is_protected = serde_json::from_str::<serde_json::Value>(&input)
        .ok()
        .and_then(|value| value.get("encrypted").and_then(serde_json::Value::as_bool))
        .unwrap_or(false);

    let passphrase = is_protected
        .then(|| rpassword::prompt_password("Backup passphrase: "))
        .transpose()?
        .map(SecretString::from);

    let records = import_vault(&input, passphrase.as_ref())?;
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_flags_overrides_policy() {
        let policy = apply_flags(GeneratorPolicy::default(), Some(24), false, false, false, true);

        assert_eq!(policy.length, 24);
        assert!(policy.uppercase);
        assert!(!policy.symbols);
    }

    #[test]
    fn test_apply_flags_keeps_config_defaults() {
        let base = GeneratorPolicy {
            length: 20,
            symbols: false,
            ..GeneratorPolicy::default()
        };

        let policy = apply_flags(base.clone(), None, false, false, false, false);

        assert_eq!(policy, base);
    }

    #[tokio::test]
    async fn test_load_config_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let config = load_config(&dir.path().join("nope.toml")).await.unwrap();

        assert_eq!(config.generator, GeneratorPolicy::default());
    }

    #[tokio::test]
    async fn test_load_config_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("padlock.toml");
        std::fs::write(&path, "[generator]\nlength = 32\n").unwrap();

        let config = load_config(&path).await.unwrap();

        assert_eq!(config.generator.length, 32);
    }
}
