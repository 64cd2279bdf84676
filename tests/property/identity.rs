// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Identity Allocation

use cim_infrastructure_builder::{compute, InstanceId};
use proptest::prelude::*;
use std::collections::HashSet;

#[test]
fn test_ten_thousand_instance_ids_are_distinct() {
    let ids: HashSet<InstanceId> = (0..10_000).map(|_| InstanceId::new()).collect();
    assert_eq!(ids.len(), 10_000);
}

#[test]
fn test_instance_ids_are_ordered_by_allocation() {
    let first = InstanceId::new();
    let second = InstanceId::new();
    assert!(first < second);
}

proptest! {
    #[test]
    fn prop_same_label_distinct_identity(count in 2usize..50) {
        let ids: HashSet<InstanceId> = (0..count)
            .map(|_| compute("duplicate", "nodejs20.x").unwrap().metadata().instance_id())
            .collect();
        prop_assert_eq!(ids.len(), count);
    }
}
