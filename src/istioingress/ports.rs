// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! External port mapping for istio ingress gateways.
//!
//! Every eligible broker gets its own port, `externalStartingPort + brokerId`,
//! so clients can address it directly. One shared any-cast port follows, routing
//! to any eligible broker for bootstrap connections. Ports are derived from the
//! broker ID alone, so the same topology always yields the same port list.
//!
//! Nothing here logs. Per-broker results come back as [`BrokerPortOutcome`]s
//! and the caller decides what to report.

use crate::broker_config::resolve_broker_config;
use crate::constants::{ALL_BROKER_PORT_SUFFIX, GATEWAY_PORT_PROTOCOL};
use crate::crd::{BrokerConfig, ExternalListenerConfig, KafkaClusterSpec};
use crate::errors::BrokerConfigError;
use k8s_openapi::api::core::v1::ServicePort;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;

/// Result of mapping a single broker onto a listener.
#[derive(Clone, Debug, PartialEq)]
pub enum BrokerPortOutcome {
    /// Broker is eligible and exposed on this port.
    Exposed(ServicePort),
    /// Broker is bound to other ingress configurations.
    Ineligible {
        /// The excluded broker
        broker_id: i32,
    },
    /// Broker configuration could not be resolved; the broker gets no port this pass.
    Skipped {
        /// The skipped broker
        broker_id: i32,
        /// Why resolution failed
        error: BrokerConfigError,
    },
}

/// Ports computed for one listener under one ingress configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct ExternalPorts {
    /// One outcome per input broker ID, in input order.
    pub outcomes: Vec<BrokerPortOutcome>,
    /// The shared any-cast port.
    pub any_cast: ServicePort,
}

impl ExternalPorts {
    /// Port list for the gateway service: exposed brokers in input order,
    /// then the any-cast port.
    #[must_use]
    pub fn ports(&self) -> Vec<ServicePort> {
        self.outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                BrokerPortOutcome::Exposed(port) => Some(port.clone()),
                _ => None,
            })
            .chain(std::iter::once(self.any_cast.clone()))
            .collect()
    }

    /// Brokers whose configuration lookup failed.
    pub fn skipped(&self) -> impl Iterator<Item = &BrokerConfigError> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            BrokerPortOutcome::Skipped { error, .. } => Some(error),
            _ => None,
        })
    }

    /// IDs of brokers excluded by their ingress bindings.
    pub fn ineligible(&self) -> impl Iterator<Item = i32> + '_ {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            BrokerPortOutcome::Ineligible { broker_id } => Some(*broker_id),
            _ => None,
        })
    }
}

/// Whether a broker takes part in the ingress configuration `ingress_config_name`.
///
/// A broker without ingress bindings is exposed everywhere; otherwise only
/// through the configurations it lists.
#[must_use]
pub fn is_eligible(broker_config: &BrokerConfig, ingress_config_name: &str) -> bool {
    broker_config.broker_ingress_mapping.is_empty()
        || broker_config
            .broker_ingress_mapping
            .iter()
            .any(|name| name == ingress_config_name)
}

/// Name of the dedicated port of broker `broker_id` (`tcp-broker-<id>`).
#[must_use]
pub fn broker_port_name(broker_id: i32) -> String {
    format!("{GATEWAY_PORT_PROTOCOL}-broker-{broker_id}")
}

/// Name of the any-cast port for `protocol` (`<protocol>-all-broker`).
#[must_use]
pub fn all_broker_port_name(protocol: &str) -> String {
    format!("{protocol}-{ALL_BROKER_PORT_SUFFIX}")
}

/// Maps one broker onto `listener` under `ingress_config_name`.
#[must_use]
pub fn broker_port_outcome(
    spec: &KafkaClusterSpec,
    broker_id: i32,
    listener: &ExternalListenerConfig,
    ingress_config_name: &str,
) -> BrokerPortOutcome {
    let broker_config = match resolve_broker_config(spec, broker_id) {
        Ok(config) => config,
        Err(error) => return BrokerPortOutcome::Skipped { broker_id, error },
    };

    if !is_eligible(&broker_config, ingress_config_name) {
        return BrokerPortOutcome::Ineligible { broker_id };
    }

    // Out-of-range ports are left for the gateway consumer to reject
    let port = listener.external_starting_port.saturating_add(broker_id);
    BrokerPortOutcome::Exposed(service_port(broker_port_name(broker_id), port))
}

/// Computes the gateway ports of `listener` under `ingress_config_name`.
///
/// `broker_ids` is walked in the given order; it is neither sorted nor
/// deduplicated. A broker whose configuration cannot be resolved is recorded
/// as skipped and does not affect the others. The any-cast port is always
/// present, even when no broker is exposed.
#[must_use]
pub fn generate_external_ports(
    spec: &KafkaClusterSpec,
    broker_ids: &[i32],
    listener: &ExternalListenerConfig,
    ingress_config_name: &str,
) -> ExternalPorts {
    let outcomes = broker_ids
        .iter()
        .map(|&broker_id| broker_port_outcome(spec, broker_id, listener, ingress_config_name))
        .collect();

    ExternalPorts {
        outcomes,
        any_cast: service_port(
            all_broker_port_name(GATEWAY_PORT_PROTOCOL),
            listener.get_any_cast_port(),
        ),
    }
}

fn service_port(name: String, port: i32) -> ServicePort {
    ServicePort {
        name: Some(name),
        port,
        target_port: Some(IntOrString::Int(port)),
        ..Default::default()
    }
}

#[cfg(test)]
#[path = "ports_tests.rs"]
mod ports_tests;
