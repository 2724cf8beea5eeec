// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Istio ingress exposure of Kafka external listeners.
//!
//! For every external listener exposed through a load balancer, and every
//! ingress configuration of that listener, one `MeshGateway` is desired. Its
//! ports come from [`ports::generate_external_ports`] and the object itself from
//! [`meshgateway::build_mesh_gateway`].
//!
//! # Example
//!
//! ```rust,no_run
//! use kafkagate::crd::KafkaCluster;
//! use kafkagate::istioingress::desired_mesh_gateways;
//!
//! # fn example(cluster: KafkaCluster) {
//! for gateway in desired_mesh_gateways(&cluster) {
//!     println!("{:?}", gateway.metadata.name);
//! }
//! # }
//! ```

pub mod meshgateway;
pub mod ports;

pub use meshgateway::build_mesh_gateway;
pub use ports::{generate_external_ports, is_eligible, BrokerPortOutcome, ExternalPorts};

use crate::broker_config::broker_ids_from_status_and_spec;
use crate::constants::INGRESS_CONFIG_GLOBAL_NAME;
use crate::crd::{
    ExternalListenerConfig, IngressConfig, IngressController, KafkaCluster, KafkaClusterSpec,
    ServiceAccessMethod,
};
use crate::istio::MeshGateway;
use kube::ResourceExt;
use tracing::{debug, info, warn};

/// Ingress configurations a listener is exposed through, by name.
///
/// A listener without its own `config` uses the cluster-wide istio settings
/// under the name `globalConfig`. Otherwise every named configuration is
/// returned, ordered by name.
#[must_use]
pub fn ingress_configs_for_listener(
    spec: &KafkaClusterSpec,
    listener: &ExternalListenerConfig,
) -> Vec<(String, IngressConfig)> {
    match &listener.config {
        None => vec![(
            INGRESS_CONFIG_GLOBAL_NAME.to_string(),
            IngressConfig {
                istio_ingress_config: spec.istio_ingress_config.clone(),
                service_annotations: None,
            },
        )],
        Some(selection) => selection
            .ingress_config
            .iter()
            .map(|(name, config)| (name.clone(), config.clone()))
            .collect(),
    }
}

/// Whether `listener` is exposed through istio ingress gateways at all.
#[must_use]
pub fn uses_istio_ingress(spec: &KafkaClusterSpec, listener: &ExternalListenerConfig) -> bool {
    spec.ingress_controller == IngressController::IstioIngress
        && listener.access_method == ServiceAccessMethod::LoadBalancer
}

/// A desired `MeshGateway` together with the listener and ingress
/// configuration it was built for.
#[derive(Clone, Debug, PartialEq)]
pub struct DesiredGateway {
    /// External listener the gateway exposes
    pub listener: String,
    /// Ingress configuration name (`globalConfig` for the implicit one)
    pub ingress_config: String,
    /// The gateway itself
    pub gateway: MeshGateway,
}

/// Builds the gateways of a single listener, one per ingress configuration.
///
/// Brokers whose configuration cannot be resolved are logged and left out;
/// they never prevent the gateway from being built.
#[must_use]
pub fn mesh_gateways_for_listener(
    cluster: &KafkaCluster,
    listener: &ExternalListenerConfig,
    broker_ids: &[i32],
) -> Vec<DesiredGateway> {
    let cluster_name = cluster.name_any();

    ingress_configs_for_listener(&cluster.spec, listener)
        .into_iter()
        .map(|(ingress_config_name, ingress_config)| {
            let ports =
                generate_external_ports(&cluster.spec, broker_ids, listener, &ingress_config_name);
            log_port_outcomes(&cluster_name, &listener.name, &ingress_config_name, &ports);

            let gateway = build_mesh_gateway(
                cluster,
                listener,
                &ingress_config,
                &ingress_config_name,
                &ports,
            );

            DesiredGateway {
                listener: listener.name.clone(),
                ingress_config: ingress_config_name,
                gateway,
            }
        })
        .collect()
}

/// Computes every gateway the cluster should have, keyed by listener and
/// ingress configuration.
///
/// Returns nothing unless the cluster uses the istio ingress controller.
/// Broker membership is the union of spec and status, so brokers being added
/// or removed keep their ports.
#[must_use]
pub fn desired_gateways(cluster: &KafkaCluster) -> Vec<DesiredGateway> {
    let cluster_name = cluster.name_any();

    if cluster.spec.ingress_controller != IngressController::IstioIngress {
        debug!(
            cluster = %cluster_name,
            "Cluster does not use istio ingress, no MeshGateways desired"
        );
        return Vec::new();
    }

    let broker_ids = broker_ids_from_status_and_spec(cluster.status.as_ref(), &cluster.spec.brokers);

    let gateways: Vec<DesiredGateway> = cluster
        .spec
        .listeners_config
        .external_listeners
        .iter()
        .filter(|listener| {
            let exposed = uses_istio_ingress(&cluster.spec, listener);
            if !exposed {
                debug!(
                    cluster = %cluster_name,
                    listener = %listener.name,
                    "Listener is not exposed through a load balancer, skipping"
                );
            }
            exposed
        })
        .flat_map(|listener| mesh_gateways_for_listener(cluster, listener, &broker_ids))
        .collect();

    info!(
        cluster = %cluster_name,
        brokers = broker_ids.len(),
        gateways = gateways.len(),
        "Computed desired MeshGateways"
    );

    gateways
}

/// Computes every `MeshGateway` the cluster should have.
///
/// See [`desired_gateways`] for the listener and ingress config of each one.
#[must_use]
pub fn desired_mesh_gateways(cluster: &KafkaCluster) -> Vec<MeshGateway> {
    desired_gateways(cluster)
        .into_iter()
        .map(|desired| desired.gateway)
        .collect()
}

fn log_port_outcomes(
    cluster_name: &str,
    listener_name: &str,
    ingress_config_name: &str,
    ports: &ExternalPorts,
) {
    for error in ports.skipped() {
        warn!(
            cluster = %cluster_name,
            listener = %listener_name,
            ingress_config = %ingress_config_name,
            broker_id = error.broker_id(),
            error = %error,
            "Could not determine broker config, broker gets no port"
        );
    }
    for broker_id in ports.ineligible() {
        debug!(
            cluster = %cluster_name,
            listener = %listener_name,
            ingress_config = %ingress_config_name,
            broker_id,
            "Broker is bound to other ingress configs"
        );
    }
}
