// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for kafkagate.
//!
//! This module provides specialized error types for:
//! - Broker configuration lookups against a `KafkaCluster` spec
//! - Loading clusters from disk and rendering gateway manifests
//!
//! Broker lookup errors are never fatal: the port builder records them per
//! broker and keeps going, leaving it to the caller to log them.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while resolving the configuration of a single broker.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BrokerConfigError {
    /// Broker ID is live (e.g. still reported in status) but absent from `spec.brokers`
    ///
    /// Happens while a broker is being removed: the status still lists it after
    /// its spec entry is gone.
    #[error("broker {broker_id} is not declared in spec.brokers")]
    BrokerNotFound {
        /// The broker that could not be found
        broker_id: i32,
    },

    /// Broker references a `brokerConfigGroup` that does not exist
    #[error("broker {broker_id} references unknown broker config group '{group}'")]
    ConfigGroupNotFound {
        /// The broker carrying the dangling reference
        broker_id: i32,
        /// The missing group name
        group: String,
    },
}

impl BrokerConfigError {
    /// Broker ID the error relates to.
    #[must_use]
    pub fn broker_id(&self) -> i32 {
        match self {
            Self::BrokerNotFound { broker_id } | Self::ConfigGroupNotFound { broker_id, .. } => {
                *broker_id
            }
        }
    }
}

/// Errors returned while loading a `KafkaCluster` and rendering its gateways.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Reading the input file failed
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that could not be read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The input file is not a valid `KafkaCluster` document
    #[error("failed to parse KafkaCluster from {}: {source}", path.display())]
    Parse {
        /// File that could not be parsed
        path: PathBuf,
        /// Underlying YAML error
        #[source]
        source: serde_yaml::Error,
    },

    /// Serializing a generated `MeshGateway` failed
    #[error("failed to serialize MeshGateway: {0}")]
    Serialize(#[source] serde_yaml::Error),

    /// A listener filter named a listener the cluster does not define
    #[error("external listener '{listener}' not found in KafkaCluster '{cluster}'")]
    ListenerNotFound {
        /// Requested listener name
        listener: String,
        /// Cluster that was searched
        cluster: String,
    },

    /// An ingress config filter named a configuration no selected listener has
    #[error("ingress config '{ingress_config}' not found on any selected listener of KafkaCluster '{cluster}'")]
    IngressConfigNotFound {
        /// Requested ingress configuration name
        ingress_config: String,
        /// Cluster that was searched
        cluster: String,
    },
}

#[cfg(test)]
#[path = "errors_tests.rs"]
mod errors_tests;
