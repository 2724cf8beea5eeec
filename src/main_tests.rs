// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `main.rs` - command line parsing

use super::Cli;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;

#[test]
fn test_cli_is_well_formed() {
    Cli::command().debug_assert();
}

#[test]
fn test_cli_requires_file() {
    assert!(Cli::try_parse_from(["kafkagate"]).is_err());
}

#[test]
fn test_cli_all_flags() {
    let cli = Cli::try_parse_from([
        "kafkagate",
        "-f",
        "cluster.yaml",
        "--listener",
        "external",
        "--ingress-config",
        "az1",
        "-o",
        "out.yaml",
    ])
    .unwrap();

    assert_eq!(cli.file, PathBuf::from("cluster.yaml"));
    assert_eq!(cli.listener.as_deref(), Some("external"));
    assert_eq!(cli.ingress_config.as_deref(), Some("az1"));
    assert_eq!(cli.output, Some(PathBuf::from("out.yaml")));
}
