// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! istio-operator `MeshGateway` resource (`istio.banzaicloud.io/v1beta1`).
//!
//! Only the fields kafkagate renders are modelled. The nested configuration
//! structs are flattened into the spec exactly like the upstream Go API, so the
//! serialized object is accepted by istio-operator as-is.

use k8s_openapi::api::core::v1::{ResourceRequirements, ServicePort, Toleration};
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Desired state of an istio ingress or egress gateway.
#[derive(CustomResource, Clone, Debug, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[kube(
    group = "istio.banzaicloud.io",
    version = "v1beta1",
    kind = "MeshGateway",
    namespaced,
    shortname = "mgw",
    derive = "PartialEq",
    doc = "MeshGateway declares an istio gateway deployment and its service."
)]
#[serde(rename_all = "camelCase")]
pub struct MeshGatewaySpec {
    #[serde(flatten)]
    pub configuration: MeshGatewayConfiguration,

    /// Ports exposed on the gateway service.
    pub ports: Vec<ServicePort>,

    /// Gateway direction.
    #[serde(rename = "type")]
    pub gateway_type: GatewayType,
}

/// Gateway workload and service settings.
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MeshGatewayConfiguration {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub service_annotations: BTreeMap<String, String>,

    #[serde(flatten)]
    pub workload: BaseK8sResourceConfigurationWithHpaWithoutImage,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
}

/// Replica and autoscaling bounds of the gateway deployment.
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BaseK8sResourceConfigurationWithHpaWithoutImage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replica_count: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_replicas: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_replicas: Option<i32>,

    #[serde(flatten)]
    pub base: BaseK8sResourceConfiguration,
}

/// Pod-level settings of the gateway deployment.
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BaseK8sResourceConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_selector: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerations: Option<Vec<Toleration>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod_annotations: Option<BTreeMap<String, String>>,
}

/// Direction of a mesh gateway.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GatewayType {
    #[default]
    Ingress,
    Egress,
}
