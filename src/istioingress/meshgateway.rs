// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! `MeshGateway` builder for istio ingress exposure of external listeners.
//!
//! All functions are pure: they take a `KafkaCluster` snapshot and return the
//! desired object without touching the API server.

use super::ports::ExternalPorts;
use crate::constants::{
    INGRESS_CONFIG_GLOBAL_NAME, KAFKA_API_GROUP_VERSION, KIND_KAFKA_CLUSTER,
    MESH_GATEWAY_NAME_SUFFIX, MESH_GATEWAY_SERVICE_TYPE,
};
use crate::crd::{ExternalListenerConfig, IngressConfig, KafkaCluster};
use crate::istio::{
    BaseK8sResourceConfiguration, BaseK8sResourceConfigurationWithHpaWithoutImage, GatewayType,
    MeshGateway, MeshGatewayConfiguration, MeshGatewaySpec,
};
use crate::labels::{
    APP_ISTIO_INGRESS, APP_LABEL, EXTERNAL_LISTENER_LABEL, K8S_MANAGED_BY, KAFKA_CR_LABEL,
    MANAGED_BY_KAFKAGATE,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, OwnerReference};
use kube::ResourceExt;
use std::collections::BTreeMap;

/// Builds the labels of an istio ingress gateway for `listener_name` of `cluster_name`
/// under `ingress_config_name`.
///
/// The same labels go on the `MeshGateway` object, on the gateway pods and in the
/// gateway service selector. Named ingress configurations scope the listener label
/// to `<config>-<listener>` so each gateway service selects only its own pods.
#[must_use]
pub fn labels_for_istio_ingress(
    cluster_name: &str,
    listener_name: &str,
    ingress_config_name: &str,
) -> BTreeMap<String, String> {
    let listener_label = if ingress_config_name == INGRESS_CONFIG_GLOBAL_NAME {
        listener_name.to_string()
    } else {
        format!("{ingress_config_name}-{listener_name}")
    };

    let mut labels = BTreeMap::new();
    labels.insert(APP_LABEL.into(), APP_ISTIO_INGRESS.into());
    labels.insert(EXTERNAL_LISTENER_LABEL.into(), listener_label);
    labels.insert(KAFKA_CR_LABEL.into(), cluster_name.into());
    labels.insert(K8S_MANAGED_BY.into(), MANAGED_BY_KAFKAGATE.into());
    labels
}

/// Name of the `MeshGateway` for a listener under an ingress configuration.
///
/// The implicit global configuration keeps the short
/// `<listener>-<cluster>-meshgateway` form; named configurations insert their
/// name so that each one gets its own gateway.
#[must_use]
pub fn mesh_gateway_name(
    listener_name: &str,
    ingress_config_name: &str,
    cluster_name: &str,
) -> String {
    if ingress_config_name == INGRESS_CONFIG_GLOBAL_NAME {
        format!("{listener_name}-{cluster_name}-{MESH_GATEWAY_NAME_SUFFIX}")
    } else {
        format!("{listener_name}-{ingress_config_name}-{cluster_name}-{MESH_GATEWAY_NAME_SUFFIX}")
    }
}

/// Builds owner references for a resource owned by a `KafkaCluster`
///
/// Deleting the `KafkaCluster` garbage-collects its gateways.
#[must_use]
pub fn build_owner_references(cluster: &KafkaCluster) -> Vec<OwnerReference> {
    vec![OwnerReference {
        api_version: KAFKA_API_GROUP_VERSION.to_string(),
        kind: KIND_KAFKA_CLUSTER.to_string(),
        name: cluster.name_any(),
        uid: cluster.metadata.uid.clone().unwrap_or_default(),
        controller: Some(true),
        block_owner_deletion: Some(true),
    }]
}

/// Builds the `MeshGateway` exposing `listener` under `ingress_config_name`.
///
/// Workload settings (replicas, resources, placement, pod annotations) are
/// copied from the ingress configuration's istio settings; the replica count
/// pins min and max replicas too. The port list is taken as computed.
///
/// # Arguments
///
/// * `cluster` - The owning `KafkaCluster`
/// * `listener` - External listener being exposed
/// * `ingress_config` - Ingress configuration the gateway is built from
/// * `ingress_config_name` - Name of that configuration (`globalConfig` for the implicit one)
/// * `ports` - Ports computed for this listener and configuration
#[must_use]
pub fn build_mesh_gateway(
    cluster: &KafkaCluster,
    listener: &ExternalListenerConfig,
    ingress_config: &IngressConfig,
    ingress_config_name: &str,
    ports: &ExternalPorts,
) -> MeshGateway {
    let cluster_name = cluster.name_any();
    let labels = labels_for_istio_ingress(&cluster_name, &listener.name, ingress_config_name);
    let istio = ingress_config
        .istio_ingress_config
        .clone()
        .unwrap_or_default();
    let replicas = istio.get_replicas();

    let metadata = ObjectMeta {
        name: Some(mesh_gateway_name(
            &listener.name,
            ingress_config_name,
            &cluster_name,
        )),
        namespace: cluster.namespace(),
        labels: Some(labels.clone()),
        owner_references: Some(build_owner_references(cluster)),
        ..Default::default()
    };

    let spec = MeshGatewaySpec {
        configuration: MeshGatewayConfiguration {
            labels,
            service_annotations: ingress_config.get_service_annotations(),
            workload: BaseK8sResourceConfigurationWithHpaWithoutImage {
                replica_count: Some(replicas),
                min_replicas: Some(replicas),
                max_replicas: Some(replicas),
                base: BaseK8sResourceConfiguration {
                    resources: Some(istio.get_resources()),
                    node_selector: istio.node_selector,
                    tolerations: istio.tolerations,
                    pod_annotations: istio.annotations,
                },
            },
            service_type: Some(MESH_GATEWAY_SERVICE_TYPE.to_string()),
        },
        ports: ports.ports(),
        gateway_type: GatewayType::Ingress,
    };

    MeshGateway {
        metadata,
        spec,
    }
}

#[cfg(test)]
#[path = "meshgateway_tests.rs"]
mod meshgateway_tests;
