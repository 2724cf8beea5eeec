// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Loading `KafkaCluster` manifests and rendering their `MeshGateway`s as YAML.

use crate::crd::KafkaCluster;
use crate::errors::RenderError;
use crate::istio::MeshGateway;
use crate::istioingress::{desired_gateways, ingress_configs_for_listener};
use kube::ResourceExt;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Narrows which gateways are rendered.
#[derive(Clone, Debug, Default)]
pub struct RenderOptions {
    /// Only render gateways of this external listener.
    pub listener: Option<String>,
    /// Only render gateways of this ingress configuration.
    pub ingress_config: Option<String>,
}

/// Reads a single `KafkaCluster` YAML document from `path`.
///
/// # Errors
///
/// Returns [`RenderError::Io`] if the file cannot be read and
/// [`RenderError::Parse`] if it is not a valid `KafkaCluster`.
pub fn load_kafka_cluster(path: &Path) -> Result<KafkaCluster, RenderError> {
    let content = fs::read_to_string(path).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let cluster: KafkaCluster =
        serde_yaml::from_str(&content).map_err(|source| RenderError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(
        cluster = %cluster.name_any(),
        path = %path.display(),
        brokers = cluster.spec.brokers.len(),
        "Loaded KafkaCluster"
    );

    Ok(cluster)
}

/// Computes the desired gateways of `cluster`, filtered by `options`.
///
/// # Errors
///
/// Returns [`RenderError::ListenerNotFound`] if `options.listener` names a
/// listener the cluster does not define, and
/// [`RenderError::IngressConfigNotFound`] if `options.ingress_config` names a
/// configuration none of the selected listeners has.
pub fn selected_mesh_gateways(
    cluster: &KafkaCluster,
    options: &RenderOptions,
) -> Result<Vec<MeshGateway>, RenderError> {
    let cluster_name = cluster.name_any();
    let listener_matches =
        |name: &str| options.listener.as_deref().is_none_or(|wanted| wanted == name);
    let config_matches =
        |name: &str| options.ingress_config.as_deref().is_none_or(|wanted| wanted == name);

    let listeners: Vec<_> = cluster
        .spec
        .listeners_config
        .external_listeners
        .iter()
        .filter(|l| listener_matches(&l.name))
        .collect();

    if let Some(wanted) = options.listener.as_deref() {
        if listeners.is_empty() {
            return Err(RenderError::ListenerNotFound {
                listener: wanted.to_string(),
                cluster: cluster_name,
            });
        }
    }

    if let Some(wanted) = options.ingress_config.as_deref() {
        let known = listeners.iter().any(|listener| {
            ingress_configs_for_listener(&cluster.spec, listener)
                .iter()
                .any(|(name, _)| name == wanted)
        });
        if !known {
            return Err(RenderError::IngressConfigNotFound {
                ingress_config: wanted.to_string(),
                cluster: cluster_name,
            });
        }
    }

    let gateways = desired_gateways(cluster)
        .into_iter()
        .filter(|desired| {
            listener_matches(&desired.listener) && config_matches(&desired.ingress_config)
        })
        .map(|desired| desired.gateway)
        .collect();

    Ok(gateways)
}

/// Renders the selected gateways of `cluster` as a multi-document YAML stream.
///
/// Returns an empty string when no gateway is desired.
///
/// # Errors
///
/// Returns [`RenderError::ListenerNotFound`] or
/// [`RenderError::IngressConfigNotFound`] for an unknown filter and
/// [`RenderError::Serialize`] if a gateway cannot be serialized.
pub fn render_mesh_gateways(
    cluster: &KafkaCluster,
    options: &RenderOptions,
) -> Result<String, RenderError> {
    let documents = selected_mesh_gateways(cluster, options)?
        .iter()
        .map(|gateway| serde_yaml::to_string(gateway).map_err(RenderError::Serialize))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(documents
        .iter()
        .map(|doc| format!("---\n{doc}"))
        .collect::<String>())
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod render_tests;
