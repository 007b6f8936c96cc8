use anyhow::{Context, Result};

use crate::args::{Cli, OutputFormat};
use mailvet_lib::{BatchValidationResult, ValidationResult};

pub fn emit(batch: &BatchValidationResult, cli: &Cli) -> Result<()> {
    match cli.format {
        OutputFormat::Human => {
            let mut text = String::new();
            for r in &batch.results {
                text.push_str(&human_line(r));
                text.push('\n');
            }
            let s = &batch.summary;
            text.push_str(&format!(
                "-- {} total, {} valid, {} invalid\n",
                s.total, s.valid, s.invalid
            ));
            write_or_print(cli.out.as_deref(), &text)
        }
        OutputFormat::Json => {
            let s = serde_json::to_string_pretty(batch).context("serialize report")?;
            write_or_print(cli.out.as_deref(), &format!("{s}\n"))
        }
    }
}

fn human_line(r: &ValidationResult) -> String {
    let mut line = if r.is_valid {
        format!("[OK]      {}", r.email)
    } else {
        format!("[INVALID] {} :: {}", r.email, r.errors.join("; "))
    };
    if let Some(dns) = &r.details.dns {
        if let Some(mx) = dns.mx_records.as_ref().filter(|mx| !mx.is_empty()) {
            line.push_str(&format!("\n          mx: {}", mx.join(", ")));
        }
    }
    if let Some(d) = &r.details.deliverability {
        if let (Some(provider), Some(confidence)) = (d.provider, d.confidence) {
            line.push_str(&format!("\n          {provider}: confidence {confidence}"));
        }
    }
    for warning in &r.warnings {
        line.push_str(&format!("\n          warning: {warning}"));
    }
    line
}

fn write_or_print(out: Option<&str>, text: &str) -> Result<()> {
    match out {
        Some(path) => write_all_atomically(path, text.as_bytes())
            .with_context(|| format!("write report to {path}")),
        None => {
            print!("{text}");
            Ok(())
        }
    }
}

fn write_all_atomically(path: &str, bytes: &[u8]) -> Result<()> {
    use std::io::Write;
    let tmp = format!("{path}.tmp");
    {
        let mut f = std::fs::File::create(&tmp).with_context(|| format!("create {tmp}"))?;
        f.write_all(bytes)?;
        f.sync_all()?;
    }
    std::fs::rename(&tmp, path).with_context(|| format!("rename {tmp} -> {path}"))?;
    Ok(())
}
