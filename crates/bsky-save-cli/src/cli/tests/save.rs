//! Tests for list and save subcommands.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use std::path::Path;

#[test]
fn cli_parse_list() {
    match parse(&["bsky-save", "list", "feed.html"]) {
        CliCommand::List { snapshot } => assert_eq!(snapshot, Path::new("feed.html")),
        _ => panic!("expected List"),
    }
}

#[test]
fn cli_parse_save_defaults() {
    match parse(&["bsky-save", "save", "feed.html"]) {
        CliCommand::Save {
            snapshot,
            index,
            src,
            download_dir,
        } => {
            assert_eq!(snapshot, Path::new("feed.html"));
            assert!(index.is_none());
            assert!(src.is_none());
            assert!(download_dir.is_none());
        }
        _ => panic!("expected Save"),
    }
}

#[test]
fn cli_parse_save_index_and_dir() {
    match parse(&[
        "bsky-save",
        "save",
        "feed.html",
        "--index",
        "2",
        "--download-dir",
        "/tmp",
    ]) {
        CliCommand::Save {
            index, download_dir, ..
        } => {
            assert_eq!(index, Some(2));
            assert_eq!(download_dir.as_deref(), Some(Path::new("/tmp")));
        }
        _ => panic!("expected Save with --index"),
    }
}

#[test]
fn cli_parse_save_by_src() {
    let src = "https://cdn.bsky.app/img/feed_thumbnail/plain/did:plc:x/abc@jpeg";
    match parse(&["bsky-save", "save", "feed.html", "--src", src]) {
        CliCommand::Save { index, src: got, .. } => {
            assert!(index.is_none());
            assert_eq!(got.as_deref(), Some(src));
        }
        _ => panic!("expected Save with --src"),
    }
}

#[test]
fn cli_save_index_conflicts_with_src() {
    let res = Cli::try_parse_from([
        "bsky-save", "save", "feed.html", "--index", "1", "--src", "x",
    ]);
    assert!(res.is_err());
}

#[test]
fn cli_save_requires_snapshot() {
    assert!(Cli::try_parse_from(["bsky-save", "save"]).is_err());
}
