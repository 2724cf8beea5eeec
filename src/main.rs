// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use anyhow::{Context, Result};
use clap::Parser;
use kafkagate::render::{load_kafka_cluster, render_mesh_gateways, RenderOptions};
use std::path::PathBuf;
use tracing::{debug, info};

/// Render the istio `MeshGateway` resources that expose a Kafka cluster.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// `KafkaCluster` manifest to read.
    #[arg(short, long, value_name = "PATH")]
    file: PathBuf,

    /// Only render gateways of this external listener.
    #[arg(long, value_name = "NAME")]
    listener: Option<String>,

    /// Only render gateways of this ingress configuration (`globalConfig` for the implicit one).
    #[arg(long, value_name = "NAME")]
    ingress_config: Option<String>,

    /// Write the manifests to this file instead of stdout.
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    debug!(?cli, "Parsed command line");

    let cluster = load_kafka_cluster(&cli.file)?;

    let options = RenderOptions {
        listener: cli.listener,
        ingress_config: cli.ingress_config,
    };
    let manifests = render_mesh_gateways(&cluster, &options)?;

    match cli.output {
        Some(path) => {
            std::fs::write(&path, &manifests)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "Wrote MeshGateway manifests");
        }
        None => print!("{manifests}"),
    }

    Ok(())
}

/// Logs go to stderr so stdout carries nothing but manifests.
///
/// Respects `RUST_LOG` (default `info`) and `RUST_LOG_FORMAT` (`json` or `text`).
fn init_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let log_format = std::env::var("RUST_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    match log_format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .with_writer(std::io::stderr)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_ansi(true)
                .compact()
                .init();
        }
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod main_tests;
