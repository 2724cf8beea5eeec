// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Integration tests for broker port mapping through the public API.
//!
//! Run with: cargo test --test port_mapping_integration

use k8s_openapi::api::core::v1::ServicePort;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use kafkagate::crd::{
    Broker, BrokerConfig, ExternalListenerConfig, IngressController, KafkaCluster,
    KafkaClusterSpec, ListenersConfig, ServiceAccessMethod,
};
use kafkagate::istioingress::{desired_mesh_gateways, generate_external_ports};
use kube::ResourceExt;
use std::collections::BTreeMap;

// ============================================================================
// Helper Functions
// ============================================================================

fn listener(starting_port: i32, any_cast_port: i32) -> ExternalListenerConfig {
    ExternalListenerConfig {
        name: "external".to_string(),
        external_starting_port: starting_port,
        container_port: 9094,
        any_cast_port: Some(any_cast_port),
        access_method: ServiceAccessMethod::LoadBalancer,
        config: None,
    }
}

fn broker(id: i32, bindings: &[&str]) -> Broker {
    Broker {
        id,
        broker_config_group: None,
        broker_config: Some(BrokerConfig {
            broker_ingress_mapping: bindings.iter().map(|b| (*b).to_string()).collect(),
            ..Default::default()
        }),
    }
}

fn spec(brokers: Vec<Broker>, listeners: Vec<ExternalListenerConfig>) -> KafkaClusterSpec {
    KafkaClusterSpec {
        brokers,
        broker_config_groups: BTreeMap::new(),
        listeners_config: ListenersConfig {
            external_listeners: listeners,
        },
        ingress_controller: IngressController::IstioIngress,
        istio_ingress_config: None,
    }
}

fn summarize(ports: &[ServicePort]) -> Vec<String> {
    ports
        .iter()
        .map(|p| {
            assert_eq!(p.target_port, Some(IntOrString::Int(p.port)));
            format!("{}:{}", p.name.clone().unwrap_or_default(), p.port)
        })
        .collect()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn unbound_brokers_get_consecutive_ports() {
    let spec = spec(vec![broker(0, &[]), broker(1, &[]), broker(2, &[])], vec![]);
    let ports = generate_external_ports(&spec, &[0, 1, 2], &listener(9094, 29092), "globalConfig");

    assert_eq!(
        summarize(&ports.ports()),
        vec![
            "tcp-broker-0:9094",
            "tcp-broker-1:9095",
            "tcp-broker-2:9096",
            "tcp-all-broker:29092",
        ]
    );
}

#[test]
fn broker_bound_elsewhere_is_excluded() {
    let spec = spec(vec![broker(0, &["external"]), broker(1, &[])], vec![]);
    let ports = generate_external_ports(&spec, &[0, 1], &listener(9094, 29092), "internal");

    assert_eq!(
        summarize(&ports.ports()),
        vec!["tcp-broker-1:9095", "tcp-all-broker:29092"]
    );
}

#[test]
fn no_brokers_yields_only_any_cast_port() {
    let spec = spec(vec![], vec![]);
    let ports = generate_external_ports(&spec, &[], &listener(9094, 29092), "globalConfig");

    assert_eq!(summarize(&ports.ports()), vec!["tcp-all-broker:29092"]);
}

#[test]
fn full_cluster_yields_owned_gateway() {
    let cluster = KafkaCluster::new(
        "kafka",
        spec(
            vec![broker(0, &[]), broker(1, &[])],
            vec![listener(19090, 29092)],
        ),
    );

    let gateways = desired_mesh_gateways(&cluster);
    assert_eq!(gateways.len(), 1);

    let gateway = &gateways[0];
    assert_eq!(gateway.name_any(), "external-kafka-meshgateway");
    assert_eq!(
        summarize(&gateway.spec.ports),
        vec![
            "tcp-broker-0:19090",
            "tcp-broker-1:19091",
            "tcp-all-broker:29092",
        ]
    );
    let owner = &gateway.owner_references()[0];
    assert_eq!(owner.kind, "KafkaCluster");
    assert_eq!(owner.name, "kafka");
}

#[test]
fn concurrent_generation_matches_sequential() {
    let spec = spec(
        (0..10)
            .map(|id| {
                let bindings: &[&str] = if id % 2 == 0 { &["az1"] } else { &[] };
                broker(id, bindings)
            })
            .collect(),
        vec![],
    );
    let ids: Vec<i32> = (0..10).collect();
    let expected = generate_external_ports(&spec, &ids, &listener(9094, 29092), "az1");

    std::thread::scope(|scope| {
        let handles: Vec<_> = ["az1", "az1", "az1", "az1"]
            .into_iter()
            .map(|name| {
                let spec = &spec;
                let ids = &ids;
                scope.spawn(move || generate_external_ports(spec, ids, &listener(9094, 29092), name))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
