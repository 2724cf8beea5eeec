// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for kafkagate.
//!
//! This module contains all numeric and string constants used throughout the codebase.
//! Constants are organized by category for easy maintenance.

// ============================================================================
// API Constants
// ============================================================================

/// API group of the `KafkaCluster` CRD
pub const KAFKA_API_GROUP: &str = "kafka.banzaicloud.io";

/// Fully qualified API version (group/version) of the `KafkaCluster` CRD
pub const KAFKA_API_GROUP_VERSION: &str = "kafka.banzaicloud.io/v1beta1";

/// Kind name for `KafkaCluster` resource
pub const KIND_KAFKA_CLUSTER: &str = "KafkaCluster";

/// API group of the istio-operator `MeshGateway` CRD
pub const ISTIO_API_GROUP: &str = "istio.banzaicloud.io";

/// Kind name for `MeshGateway` resource
pub const KIND_MESH_GATEWAY: &str = "MeshGateway";

// ============================================================================
// Listener Constants
// ============================================================================

/// Any-cast (bootstrap) port used when an external listener does not set one
pub const DEFAULT_ANY_CAST_PORT: i32 = 29092;

/// Protocol prefix used in generated gateway port names
pub const GATEWAY_PORT_PROTOCOL: &str = "tcp";

/// Suffix of the shared port that routes to any eligible broker (`<protocol>-all-broker`)
pub const ALL_BROKER_PORT_SUFFIX: &str = "all-broker";

/// Name of the implicit ingress configuration used when a listener has no per-listener config
pub const INGRESS_CONFIG_GLOBAL_NAME: &str = "globalConfig";

// ============================================================================
// Istio Ingress Gateway Defaults
// ============================================================================

/// Suffix of generated `MeshGateway` names
pub const MESH_GATEWAY_NAME_SUFFIX: &str = "meshgateway";

/// Service type of every generated `MeshGateway`
pub const MESH_GATEWAY_SERVICE_TYPE: &str = "LoadBalancer";

/// Default number of ingress gateway replicas
pub const DEFAULT_INGRESS_REPLICAS: i32 = 1;

/// Default CPU limit for ingress gateway pods
pub const DEFAULT_INGRESS_CPU_LIMIT: &str = "2000m";

/// Default memory limit for ingress gateway pods
pub const DEFAULT_INGRESS_MEMORY_LIMIT: &str = "1024Mi";

/// Default CPU request for ingress gateway pods
pub const DEFAULT_INGRESS_CPU_REQUEST: &str = "100m";

/// Default memory request for ingress gateway pods
pub const DEFAULT_INGRESS_MEMORY_REQUEST: &str = "128Mi";
