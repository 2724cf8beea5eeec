// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! # kafkagate - Istio ingress gateways for Kafka clusters
//!
//! kafkagate computes the istio-operator `MeshGateway` resources that expose a
//! Kafka cluster, described by a `KafkaCluster` custom resource, outside of
//! Kubernetes.
//!
//! ## Overview
//!
//! Each broker that an ingress configuration may expose gets a dedicated port,
//! `externalStartingPort + brokerId`, for direct-to-broker traffic. A shared
//! any-cast port follows for bootstrap connections. Brokers can be restricted to
//! specific ingress configurations through `brokerIngressMapping`.
//!
//! ## Modules
//!
//! - [`crd`] - `KafkaCluster` Custom Resource Definition types
//! - [`istio`] - istio-operator `MeshGateway` resource types
//! - [`broker_config`] - Broker configuration resolution and live broker IDs
//! - [`istioingress`] - Port mapping and `MeshGateway` assembly
//! - [`render`] - Loading clusters and rendering gateways as YAML
//!
//! ## Example
//!
//! ```rust
//! use kafkagate::crd::{
//!     Broker, ExternalListenerConfig, IngressController, KafkaClusterSpec, ListenersConfig,
//!     ServiceAccessMethod,
//! };
//! use kafkagate::istioingress::generate_external_ports;
//!
//! let listener = ExternalListenerConfig {
//!     name: "external".to_string(),
//!     external_starting_port: 9094,
//!     container_port: 9094,
//!     any_cast_port: Some(29092),
//!     access_method: ServiceAccessMethod::LoadBalancer,
//!     config: None,
//! };
//! let spec = KafkaClusterSpec {
//!     brokers: vec![Broker { id: 0, ..Default::default() }],
//!     broker_config_groups: Default::default(),
//!     listeners_config: ListenersConfig { external_listeners: vec![listener.clone()] },
//!     ingress_controller: IngressController::IstioIngress,
//!     istio_ingress_config: None,
//! };
//!
//! let ports = generate_external_ports(&spec, &[0], &listener, "globalConfig").ports();
//! assert_eq!(ports[0].port, 9094);
//! assert_eq!(ports[1].name.as_deref(), Some("tcp-all-broker"));
//! ```

pub mod broker_config;
pub mod constants;
pub mod crd;
pub mod errors;
pub mod istio;
pub mod istioingress;
pub mod labels;
pub mod render;
