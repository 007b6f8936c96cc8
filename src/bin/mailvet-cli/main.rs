mod args;
mod output;

use anyhow::{Context, Result};
use mailvet_lib::EmailValidator;
use tracing_subscriber::EnvFilter;

use args::Cli;

use tokio::io::{AsyncBufReadExt, BufReader};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn read_stdin() -> Result<Vec<String>> {
    let mut emails = Vec::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("read stdin")? {
        let email = line.trim();
        if !email.is_empty() {
            emails.push(email.to_string());
        }
    }
    Ok(emails)
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut emails = cli.emails.clone();
    if cli.stdin {
        emails.extend(read_stdin().await?);
    }
    if emails.is_empty() {
        Cli::clap_command().print_help()?;
        println!();
        return Ok(());
    }

    let validator = EmailValidator::new(cli.options()).context("invalid configuration")?;
    let batch = validator.validate_batch(&emails).await;
    output::emit(&batch, &cli)?;

    // codes de sortie : 0 OK, 2 invalids, 1 fatal
    if batch.summary.invalid > 0 {
        std::process::exit(2);
    }
    Ok(())
}
