use std::time::Duration;

use clap::{Parser, ValueEnum};
use mailvet_lib::{Provider, ValidationMode, ValidatorOptions};

#[derive(Parser)]
#[command(name = "mailvet-cli", version, about = "Validate email addresses")]
pub struct Cli {
    /// adresses à valider
    pub emails: Vec<String>,

    /// lit des adresses depuis stdin (une par ligne)
    #[arg(long)]
    pub stdin: bool,

    /// write report to file (JSON selon --format)
    #[arg(long)]
    pub out: Option<String>,

    /// format: human|json
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// motif strict au lieu du motif RFC 5322
    #[arg(long)]
    pub strict: bool,

    /// saute la vérification de format
    #[arg(long)]
    pub skip_format: bool,

    /// résout les enregistrements A et MX du domaine
    #[arg(long)]
    pub dns: bool,

    /// avertit quand le domaine n'a pas de MX
    #[arg(long)]
    pub mx: bool,

    /// interroge un fournisseur de délivrabilité
    #[arg(long)]
    pub deliverability: bool,

    /// fournisseur: zerobounce|mailgun|hunter
    #[arg(long, default_value = "zerobounce", value_parser = parse_provider)]
    pub provider: Provider,

    /// clé d'API du fournisseur
    #[arg(long, env = "MAILVET_API_KEY", hide_env_values = true, default_value = "")]
    pub api_key: String,

    /// timeout DNS / API (ms)
    #[arg(long = "timeout-ms", default_value_t = 5_000)]
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

fn parse_provider(s: &str) -> Result<Provider, String> {
    s.parse::<Provider>().map_err(|err| err.to_string())
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn clap_command() -> clap::Command {
        <Self as clap::CommandFactory>::command()
    }

    pub fn options(&self) -> ValidatorOptions {
        let mode = if self.strict {
            ValidationMode::Strict
        } else {
            ValidationMode::Relaxed
        };
        ValidatorOptions::new()
            .with_format(!self.skip_format)
            .with_format_mode(mode)
            .with_dns(self.dns)
            .with_mx(self.mx)
            .with_deliverability(self.deliverability)
            .with_provider(self.provider)
            .with_api_key(self.api_key.clone())
            .with_timeout(Duration::from_millis(self.timeout_ms))
    }
}
