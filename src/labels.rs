// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Common label constants used for generated ingress gateway resources.
//!
//! The short keys (`app`, `eListenerName`, `kafka_cr`) are the selector labels the
//! Kafka operator puts on its istio ingress gateways, so existing gateways keep
//! matching the pods they select.

// ============================================================================
// Kubernetes Standard Labels
// https://kubernetes.io/docs/concepts/overview/working-with-objects/common-labels/
// ============================================================================

/// Standard label for the tool being used to manage the operation of an application
pub const K8S_MANAGED_BY: &str = "app.kubernetes.io/managed-by";

/// Value for `app.kubernetes.io/managed-by` on everything kafkagate renders
pub const MANAGED_BY_KAFKAGATE: &str = "kafkagate";

// ============================================================================
// Istio Ingress Selector Labels
// ============================================================================

/// Label naming the application of the gateway pods
pub const APP_LABEL: &str = "app";

/// Value of [`APP_LABEL`] for istio ingress gateways
pub const APP_ISTIO_INGRESS: &str = "istioingress";

/// Label carrying the external listener name, prefixed by the ingress config name for named configs
pub const EXTERNAL_LISTENER_LABEL: &str = "eListenerName";

/// Label carrying the owning `KafkaCluster` name
pub const KAFKA_CR_LABEL: &str = "kafka_cr";
