// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `istioingress/ports.rs`

use super::*;
use crate::crd::{Broker, IngressController, ListenersConfig, ServiceAccessMethod};
use std::collections::BTreeMap;

fn listener(starting_port: i32, any_cast_port: i32) -> ExternalListenerConfig {
    ExternalListenerConfig {
        name: "external".into(),
        external_starting_port: starting_port,
        container_port: 9094,
        any_cast_port: Some(any_cast_port),
        access_method: ServiceAccessMethod::LoadBalancer,
        config: None,
    }
}

fn broker(id: i32, mappings: &[&str]) -> Broker {
    Broker {
        id,
        broker_config_group: None,
        broker_config: Some(BrokerConfig {
            broker_ingress_mapping: mappings.iter().map(|m| (*m).to_string()).collect(),
            ..Default::default()
        }),
    }
}

fn spec(brokers: Vec<Broker>) -> KafkaClusterSpec {
    KafkaClusterSpec {
        brokers,
        broker_config_groups: BTreeMap::new(),
        listeners_config: ListenersConfig::default(),
        ingress_controller: IngressController::IstioIngress,
        istio_ingress_config: None,
    }
}

/// `name:port` pairs, asserting `targetPort == port` on the way
fn summarize(ports: &[ServicePort]) -> Vec<String> {
    ports
        .iter()
        .map(|p| {
            assert_eq!(p.target_port, Some(IntOrString::Int(p.port)));
            format!("{}:{}", p.name.as_deref().unwrap_or_default(), p.port)
        })
        .collect()
}

#[test]
fn test_is_eligible_without_bindings() {
    let config = BrokerConfig::default();
    assert!(is_eligible(&config, "globalConfig"));
    assert!(is_eligible(&config, "az1"));
    assert!(is_eligible(&config, ""));
}

#[test]
fn test_is_eligible_with_single_binding() {
    let config = BrokerConfig {
        broker_ingress_mapping: vec!["A".into()],
        ..Default::default()
    };
    assert!(is_eligible(&config, "A"));
    assert!(!is_eligible(&config, "B"));
    assert!(!is_eligible(&config, "a"));
}

#[test]
fn test_is_eligible_with_multiple_bindings() {
    let config = BrokerConfig {
        broker_ingress_mapping: vec!["az1".into(), "az2".into()],
        ..Default::default()
    };
    assert!(is_eligible(&config, "az2"));
    assert!(!is_eligible(&config, "az3"));
}

#[test]
fn test_port_names() {
    assert_eq!(broker_port_name(0), "tcp-broker-0");
    assert_eq!(broker_port_name(12), "tcp-broker-12");
    assert_eq!(all_broker_port_name("tcp"), "tcp-all-broker");
}

#[test]
fn test_unbound_brokers_all_exposed() {
    let spec = spec(vec![broker(0, &[]), broker(1, &[]), broker(2, &[])]);
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
fn test_bound_broker_excluded_from_other_config() {
    let spec = spec(vec![broker(0, &["external"]), broker(1, &[])]);
    let ports = generate_external_ports(&spec, &[0, 1], &listener(9094, 29092), "internal");

    assert_eq!(
        summarize(&ports.ports()),
        vec!["tcp-broker-1:9095", "tcp-all-broker:29092"]
    );
    assert_eq!(ports.ineligible().collect::<Vec<_>>(), vec![0]);
}

#[test]
fn test_no_brokers_only_any_cast() {
    let spec = spec(vec![]);
    let ports = generate_external_ports(&spec, &[], &listener(9094, 29092), "globalConfig");

    assert!(ports.outcomes.is_empty());
    assert_eq!(summarize(&ports.ports()), vec!["tcp-all-broker:29092"]);
}

#[test]
fn test_all_ineligible_only_any_cast() {
    let spec = spec(vec![broker(0, &["az1"]), broker(1, &["az2"])]);
    let ports = generate_external_ports(&spec, &[0, 1], &listener(9094, 29092), "az3");

    assert_eq!(summarize(&ports.ports()), vec!["tcp-all-broker:29092"]);
    assert_eq!(ports.ineligible().count(), 2);
}

#[test]
fn test_port_is_starting_port_plus_broker_id() {
    let ids = [0, 3, 17, 250];
    let spec = spec(ids.iter().map(|&id| broker(id, &[])).collect());

    for starting_port in [0, 9094, 19090, 30000] {
        let ports = generate_external_ports(
            &spec,
            &ids,
            &listener(starting_port, 29092),
            "globalConfig",
        );
        for (outcome, id) in ports.outcomes.iter().zip(ids) {
            let BrokerPortOutcome::Exposed(port) = outcome else {
                panic!("broker {id} should be exposed");
            };
            assert_eq!(port.port, starting_port + id);
            assert_eq!(port.target_port, Some(IntOrString::Int(starting_port + id)));
        }
    }
}

#[test]
fn test_any_cast_port_always_last() {
    let spec = spec(vec![broker(0, &[]), broker(1, &["az1"])]);
    for ids in [vec![], vec![0], vec![1], vec![0, 1], vec![1, 0]] {
        let ports = generate_external_ports(&spec, &ids, &listener(9094, 29092), "az2").ports();
        let last = ports.last().unwrap();
        assert_eq!(last.name.as_deref(), Some("tcp-all-broker"));
        assert_eq!(last.port, 29092);
        assert_eq!(last.target_port, Some(IntOrString::Int(29092)));
    }
}

#[test]
fn test_any_cast_port_defaults_when_unset() {
    let mut listener = listener(9094, 0);
    listener.any_cast_port = None;
    let ports = generate_external_ports(&spec(vec![]), &[], &listener, "globalConfig");
    assert_eq!(ports.any_cast.port, 29092);
}

#[test]
fn test_input_order_preserved_and_not_deduplicated() {
    let spec = spec(vec![broker(0, &[]), broker(1, &[]), broker(2, &[])]);
    let ports = generate_external_ports(&spec, &[2, 0, 2], &listener(9094, 29092), "globalConfig");

    assert_eq!(
        summarize(&ports.ports()),
        vec![
            "tcp-broker-2:9096",
            "tcp-broker-0:9094",
            "tcp-broker-2:9096",
            "tcp-all-broker:29092",
        ]
    );
}

#[test]
fn test_lookup_failure_does_not_affect_other_brokers() {
    let spec_ok = spec(vec![broker(0, &[]), broker(2, &[])]);
    let baseline = generate_external_ports(&spec_ok, &[0, 2], &listener(9094, 29092), "globalConfig");

    // Broker 1 is live (e.g. from status) but missing from spec
    let with_missing =
        generate_external_ports(&spec_ok, &[0, 1, 2], &listener(9094, 29092), "globalConfig");

    assert_eq!(baseline.ports(), with_missing.ports());
    assert_eq!(
        with_missing.skipped().cloned().collect::<Vec<_>>(),
        vec![BrokerConfigError::BrokerNotFound { broker_id: 1 }]
    );
    assert_eq!(
        with_missing.outcomes[1],
        BrokerPortOutcome::Skipped {
            broker_id: 1,
            error: BrokerConfigError::BrokerNotFound { broker_id: 1 },
        }
    );
}

#[test]
fn test_missing_config_group_is_skipped() {
    let mut dangling = broker(1, &[]);
    dangling.broker_config_group = Some("gone".into());
    let spec = spec(vec![broker(0, &[]), dangling]);

    let ports = generate_external_ports(&spec, &[0, 1], &listener(9094, 29092), "globalConfig");

    assert_eq!(
        summarize(&ports.ports()),
        vec!["tcp-broker-0:9094", "tcp-all-broker:29092"]
    );
    assert_eq!(ports.skipped().count(), 1);
}

#[test]
fn test_generation_is_idempotent() {
    let spec = spec(vec![broker(0, &["az1"]), broker(1, &[]), broker(4, &["az2", "az1"])]);
    let listener = listener(19090, 29092);

    let first = generate_external_ports(&spec, &[4, 0, 1, 9], &listener, "az1");
    let second = generate_external_ports(&spec, &[4, 0, 1, 9], &listener, "az1");

    assert_eq!(first, second);
    assert_eq!(first.ports(), second.ports());
}

#[test]
fn test_port_overflow_saturates() {
    let spec = spec(vec![broker(5, &[])]);
    let ports = generate_external_ports(&spec, &[5], &listener(i32::MAX, 29092), "globalConfig");
    assert_eq!(ports.ports()[0].port, i32::MAX);
}
