// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Broker topology lookups on a `KafkaCluster`.
//!
//! Resolves the effective configuration of a broker (its own config merged over
//! its config group) and computes the set of live broker IDs from spec and
//! status. All functions are pure apart from diagnostic logging.

use crate::crd::{Broker, BrokerConfig, KafkaClusterSpec, KafkaClusterStatus};
use crate::errors::BrokerConfigError;
use std::collections::BTreeSet;
use tracing::warn;

/// Resolves the effective configuration of broker `broker_id`.
///
/// Without a `brokerConfigGroup` the broker's own config is returned (or an
/// empty one). With a group, the broker's config is merged over the group:
/// `Option` fields set on the broker win, and ingress mappings are the
/// broker's entries followed by the group's, without duplicates.
///
/// # Errors
///
/// Returns [`BrokerConfigError::BrokerNotFound`] if no broker with that ID is
/// declared, and [`BrokerConfigError::ConfigGroupNotFound`] if the broker
/// references a group missing from `brokerConfigGroups`.
pub fn resolve_broker_config(
    spec: &KafkaClusterSpec,
    broker_id: i32,
) -> Result<BrokerConfig, BrokerConfigError> {
    let broker = spec
        .brokers
        .iter()
        .find(|b| b.id == broker_id)
        .ok_or(BrokerConfigError::BrokerNotFound { broker_id })?;

    let own = broker.broker_config.clone().unwrap_or_default();

    let Some(group_name) = broker.broker_config_group.as_deref() else {
        return Ok(own);
    };

    let group = spec.broker_config_groups.get(group_name).ok_or_else(|| {
        BrokerConfigError::ConfigGroupNotFound {
            broker_id,
            group: group_name.to_string(),
        }
    })?;

    Ok(merge_broker_config(own, group))
}

fn merge_broker_config(mut own: BrokerConfig, group: &BrokerConfig) -> BrokerConfig {
    for mapping in &group.broker_ingress_mapping {
        if !own.broker_ingress_mapping.contains(mapping) {
            own.broker_ingress_mapping.push(mapping.clone());
        }
    }
    // Keep first-seen order while dropping duplicates the broker itself listed
    let mut seen = BTreeSet::new();
    own.broker_ingress_mapping
        .retain(|mapping| seen.insert(mapping.clone()));

    if own.node_selector.is_none() {
        own.node_selector.clone_from(&group.node_selector);
    }
    if own.broker_annotations.is_none() {
        own.broker_annotations.clone_from(&group.broker_annotations);
    }
    own
}

/// Returns the IDs of all live brokers: those declared in `spec.brokers` plus
/// those still reported in `status.brokersState`, sorted ascending.
///
/// Brokers being added appear only in spec, brokers being removed only in
/// status; both still need their ports. Status keys that are not non-negative
/// integers are logged and ignored.
#[must_use]
pub fn broker_ids_from_status_and_spec(
    status: Option<&KafkaClusterStatus>,
    brokers: &[Broker],
) -> Vec<i32> {
    let mut ids: BTreeSet<i32> = brokers.iter().map(|b| b.id).collect();

    if let Some(status) = status {
        for key in status.brokers_state.keys() {
            match key.parse::<i32>() {
                Ok(id) if id >= 0 => {
                    ids.insert(id);
                }
                Ok(id) => {
                    warn!(broker_key = %key, broker_id = id, "Ignoring negative broker ID in status");
                }
                Err(e) => {
                    warn!(broker_key = %key, error = %e, "Ignoring non-numeric broker ID in status");
                }
            }
        }
    }

    ids.into_iter().collect()
}

#[cfg(test)]
#[path = "broker_config_tests.rs"]
mod broker_config_tests;
