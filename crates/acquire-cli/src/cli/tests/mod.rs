//! CLI parse tests.

use super::{Cli, CliCommand};
use clap::Parser;

fn parse(args: &[&str]) -> CliCommand {
    let cli = Cli::try_parse_from(args).unwrap();
    cli.command
}

#[test]
fn cli_parse_check() {
    match parse(&["oscap-acquire", "check", "http://example.com/a.xml"]) {
        CliCommand::Check { url } => assert_eq!(url, "http://example.com/a.xml"),
        _ => panic!("expected Check"),
    }
}

#[test]
fn cli_parse_encode() {
    match parse(&["oscap-acquire", "encode", "http://a.com/x y"]) {
        CliCommand::Encode { url } => assert_eq!(url, "http://a.com/x y"),
        _ => panic!("expected Encode"),
    }
}

#[test]
fn cli_parse_fetch_defaults() {
    match parse(&["oscap-acquire", "fetch", "http://example.com/oval.xml"]) {
        CliCommand::Fetch { url, keep } => {
            assert_eq!(url, "http://example.com/oval.xml");
            assert!(!keep);
        }
        _ => panic!("expected Fetch"),
    }
}

#[test]
fn cli_parse_fetch_keep() {
    match parse(&["oscap-acquire", "fetch", "--keep", "http://example.com/oval.xml"]) {
        CliCommand::Fetch { keep, .. } => assert!(keep),
        _ => panic!("expected Fetch --keep"),
    }
}

#[test]
fn cli_requires_subcommand() {
    assert!(Cli::try_parse_from(["oscap-acquire"]).is_err());
}

#[test]
fn cli_fetch_requires_url() {
    assert!(Cli::try_parse_from(["oscap-acquire", "fetch"]).is_err());
}
