//! Tests for `probe` argument parsing and header splitting.

use super::parse;
use crate::cli::commands::probe::parse_header;
use crate::cli::CliCommand;
use clap::Parser;

#[test]
fn cli_parse_probe_defaults() {
    match parse(&["httpoops", "probe", "https://example.com/api"]).command {
        CliCommand::Probe {
            url,
            timeout,
            headers,
            json,
        } => {
            assert_eq!(url, "https://example.com/api");
            assert_eq!(timeout, 30);
            assert!(headers.is_empty());
            assert!(!json);
        }
        _ => panic!("expected Probe"),
    }
}

#[test]
fn cli_parse_probe_with_options() {
    let cli = parse(&[
        "httpoops",
        "probe",
        "http://localhost:8080/",
        "--timeout",
        "5",
        "--header",
        "Accept: application/json",
        "--header",
        "X-Trace: 1",
        "--json",
    ]);
    match cli.command {
        CliCommand::Probe {
            timeout,
            headers,
            json,
            ..
        } => {
            assert_eq!(timeout, 5);
            assert_eq!(headers, vec!["Accept: application/json", "X-Trace: 1"]);
            assert!(json);
        }
        _ => panic!("expected Probe"),
    }
}

#[test]
fn cli_parse_probe_requires_url() {
    assert!(crate::cli::Cli::try_parse_from(["httpoops", "probe"]).is_err());
}

#[test]
fn header_split_trims_both_sides() {
    let (name, value) = parse_header(" Accept :  text/html ").unwrap();
    assert_eq!(name, "Accept");
    assert_eq!(value, "text/html");
}

#[test]
fn header_without_name_is_rejected() {
    assert!(parse_header("no-colon").is_err());
    assert!(parse_header(": value").is_err());
}
