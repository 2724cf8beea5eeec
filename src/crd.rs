// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Custom Resource Definition types for Kafka clusters.
//!
//! This module mirrors the subset of the `kafka.banzaicloud.io/v1beta1`
//! `KafkaCluster` API that drives external exposure through istio ingress
//! gateways: broker topology, broker config groups, external listeners and
//! ingress configuration.
//!
//! # Example
//!
//! ```rust
//! use kafkagate::crd::{ExternalListenerConfig, ServiceAccessMethod};
//!
//! let listener = ExternalListenerConfig {
//!     name: "external".to_string(),
//!     external_starting_port: 19090,
//!     container_port: 9094,
//!     any_cast_port: None,
//!     access_method: ServiceAccessMethod::LoadBalancer,
//!     config: None,
//! };
//!
//! assert_eq!(listener.get_any_cast_port(), 29092);
//! ```

use crate::constants::{
    DEFAULT_ANY_CAST_PORT, DEFAULT_INGRESS_CPU_LIMIT, DEFAULT_INGRESS_CPU_REQUEST,
    DEFAULT_INGRESS_MEMORY_LIMIT, DEFAULT_INGRESS_MEMORY_REQUEST, DEFAULT_INGRESS_REPLICAS,
};
use k8s_openapi::api::core::v1::{ResourceRequirements, Toleration};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `KafkaCluster` describes a Kafka cluster managed by the Kafka operator.
///
/// # Example
///
/// ```yaml
/// apiVersion: kafka.banzaicloud.io/v1beta1
/// kind: KafkaCluster
/// metadata:
///   name: kafka
///   namespace: kafka
/// spec:
///   ingressController: istioingress
///   brokers:
///     - id: 0
///       brokerConfigGroup: default
///     - id: 1
///       brokerConfig:
///         brokerIngressMapping: ["az1"]
///   brokerConfigGroups:
///     default: {}
///   listenersConfig:
///     externalListeners:
///       - name: external
///         externalStartingPort: 19090
///         containerPort: 9094
/// ```
#[derive(CustomResource, Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "kafka.banzaicloud.io",
    version = "v1beta1",
    kind = "KafkaCluster",
    namespaced,
    shortname = "kc",
    doc = "KafkaCluster describes the brokers, listeners and ingress settings of a Kafka cluster."
)]
#[kube(status = "KafkaClusterStatus")]
#[serde(rename_all = "camelCase")]
pub struct KafkaClusterSpec {
    /// Brokers declared for this cluster.
    #[serde(default)]
    pub brokers: Vec<Broker>,

    /// Named broker configurations that brokers can inherit through `brokerConfigGroup`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub broker_config_groups: BTreeMap<String, BrokerConfig>,

    /// Listener configuration of the cluster.
    #[serde(default)]
    pub listeners_config: ListenersConfig,

    /// Ingress controller used to expose external listeners.
    #[serde(default)]
    pub ingress_controller: IngressController,

    /// Cluster-wide istio ingress settings, used when a listener has no per-listener config.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub istio_ingress_config: Option<IstioIngressConfig>,
}

/// A single broker of the cluster.
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Broker {
    /// Broker ID (`broker.id`), unique within the cluster.
    #[schemars(range(min = 0))]
    pub id: i32,

    /// Name of an entry in `brokerConfigGroups` this broker inherits from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub broker_config_group: Option<String>,

    /// Per-broker configuration, merged over the referenced config group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub broker_config: Option<BrokerConfig>,
}

/// Broker configuration, either per broker or as a named group.
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BrokerConfig {
    /// Ingress configuration names this broker is restricted to.
    ///
    /// Empty means the broker is exposed through every ingress configuration.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub broker_ingress_mapping: Vec<String>,

    /// Node selector for the broker pod.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_selector: Option<BTreeMap<String, String>>,

    /// Extra annotations for the broker pod.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub broker_annotations: Option<BTreeMap<String, String>>,
}

/// Listener configuration of a `KafkaCluster`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListenersConfig {
    /// Listeners reachable from outside the Kubernetes cluster.
    #[serde(default)]
    pub external_listeners: Vec<ExternalListenerConfig>,
}

/// How an external listener is exposed.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub enum ServiceAccessMethod {
    /// Exposed through an ingress gateway behind a `LoadBalancer` service.
    #[default]
    LoadBalancer,
    /// Exposed directly on node ports; no ingress gateway is involved.
    NodePort,
}

/// Ingress controller fronting the external listeners.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub enum IngressController {
    /// Envoy, managed by the Kafka operator itself.
    #[default]
    #[serde(rename = "envoy")]
    Envoy,
    /// Istio ingress gateways, declared through istio-operator `MeshGateway` resources.
    #[serde(rename = "istioingress")]
    IstioIngress,
}

/// An external listener.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExternalListenerConfig {
    /// Listener name, unique within the cluster.
    pub name: String,

    /// Base port: broker `N` is exposed on `externalStartingPort + N`.
    pub external_starting_port: i32,

    /// Port the broker listens on inside its container.
    pub container_port: i32,

    /// Shared port routing to any eligible broker. Defaults to 29092.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub any_cast_port: Option<i32>,

    /// How this listener is exposed.
    #[serde(default)]
    pub access_method: ServiceAccessMethod,

    /// Per-listener ingress configurations. When absent the cluster-wide
    /// `istioIngressConfig` applies under the name `globalConfig`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<IngressConfigSelection>,
}

impl ExternalListenerConfig {
    /// Any-cast port of this listener, falling back to the operator default.
    #[must_use]
    pub fn get_any_cast_port(&self) -> i32 {
        self.any_cast_port.unwrap_or(DEFAULT_ANY_CAST_PORT)
    }
}

/// Named ingress configurations attached to an external listener.
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IngressConfigSelection {
    /// Ingress configuration used for brokers that do not pick one.
    #[serde(default)]
    pub default_ingress_config: String,

    /// Ingress configurations by name.
    #[serde(default)]
    pub ingress_config: BTreeMap<String, IngressConfig>,
}

/// One ingress configuration: the gateway it produces and its service annotations.
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IngressConfig {
    /// Istio ingress gateway settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub istio_ingress_config: Option<IstioIngressConfig>,

    /// Annotations for the gateway `LoadBalancer` service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_annotations: Option<BTreeMap<String, String>>,
}

impl IngressConfig {
    /// Service annotations, or an empty map when none are set.
    #[must_use]
    pub fn get_service_annotations(&self) -> BTreeMap<String, String> {
        self.service_annotations.clone().unwrap_or_default()
    }
}

/// Istio ingress gateway workload settings.
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IstioIngressConfig {
    /// Resource requirements of the gateway pods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,

    /// Number of gateway replicas. Defaults to 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,

    /// Node selector of the gateway pods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_selector: Option<BTreeMap<String, String>>,

    /// Tolerations of the gateway pods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerations: Option<Vec<Toleration>>,

    /// Annotations of the gateway pods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,
}

impl IstioIngressConfig {
    /// Replica count, falling back to a single replica.
    #[must_use]
    pub fn get_replicas(&self) -> i32 {
        self.replicas.unwrap_or(DEFAULT_INGRESS_REPLICAS)
    }

    /// Resource requirements, falling back to the operator defaults.
    #[must_use]
    pub fn get_resources(&self) -> ResourceRequirements {
        self.resources.clone().unwrap_or_else(|| ResourceRequirements {
            limits: Some(BTreeMap::from([
                ("cpu".to_string(), Quantity(DEFAULT_INGRESS_CPU_LIMIT.to_string())),
                (
                    "memory".to_string(),
                    Quantity(DEFAULT_INGRESS_MEMORY_LIMIT.to_string()),
                ),
            ])),
            requests: Some(BTreeMap::from([
                (
                    "cpu".to_string(),
                    Quantity(DEFAULT_INGRESS_CPU_REQUEST.to_string()),
                ),
                (
                    "memory".to_string(),
                    Quantity(DEFAULT_INGRESS_MEMORY_REQUEST.to_string()),
                ),
            ])),
            ..Default::default()
        })
    }
}

/// `KafkaCluster` status
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KafkaClusterStatus {
    /// Observed broker state keyed by broker ID (as a string).
    #[serde(default)]
    pub brokers_state: BTreeMap<String, BrokerState>,
}

/// Observed state of a single broker.
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BrokerState {
    /// Configuration state reported by the operator (e.g. `ConfigInSync`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration_state: Option<String>,
}
