//! `httpoops probe` – fetch once and classify the outcome.

use anyhow::{bail, Result};
use httpoops_core::{cause, detect, fetch_async, Config, FetchOptions};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ProbeArgs {
    pub url: String,
    pub timeout_secs: u64,
    pub headers: Vec<String>,
    pub json: bool,
}

/// Split a `Name: value` header argument.
pub fn parse_header(raw: &str) -> Result<(String, String)> {
    match raw.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => bail!("invalid header {:?}, expected 'Name: value'", raw),
    }
}

pub async fn run_probe(cfg: &Config, args: ProbeArgs) -> Result<()> {
    let headers = args
        .headers
        .iter()
        .map(|h| parse_header(h))
        .collect::<Result<Vec<_>>>()?;
    let opts = FetchOptions {
        timeout: Duration::from_secs(args.timeout_secs),
        headers,
        ..FetchOptions::default()
    };

    tracing::info!("probing {}", args.url);
    let outcome = fetch_async(args.url.clone(), opts).await.map_err(cause);
    let oops = detect(cfg, outcome.as_ref());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&oops)?);
        return Ok(());
    }

    let status = if oops.status_code == 0 {
        "-".to_string()
    } else {
        oops.status_code.to_string()
    };
    println!(
        "{:<8} {:<6} {:<9} {:<8} {}",
        "KIND", "STATUS", "RETRYABLE", "WAIT", "URL"
    );
    println!(
        "{:<8} {:<6} {:<9} {:<8} {}",
        oops.kind,
        status,
        oops.retryable,
        format!("{}ms", oops.wait_time.as_millis()),
        args.url
    );
    if let Some(c) = &oops.cause {
        println!("cause: {}", c);
    }
    Ok(())
}
