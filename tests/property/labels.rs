// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for the Identifier Grammar and Resource Factory

use cim_infrastructure_builder::{compute, create_event, validate_id, BuilderError, ResourceKind};
use proptest::prelude::*;

/// Labels the default grammar accepts
fn valid_label() -> impl Strategy<Value = String> {
    "[A-Za-z]([A-Za-z0-9_-]{0,30}[A-Za-z0-9])?"
}

/// Labels containing whitespace somewhere after the first character
fn spaced_label() -> impl Strategy<Value = String> {
    ("[A-Za-z][A-Za-z0-9-]{0,10}", "[ \t]", "[A-Za-z0-9-]{0,10}")
        .prop_map(|(head, ws, tail)| format!("{}{}{}", head, ws, tail))
}

proptest! {
    #[test]
    fn prop_valid_labels_build_compute(label in valid_label(), runtime in "[a-z]{2,8}[0-9]{0,2}") {
        let r = compute(&label, &runtime).unwrap();
        prop_assert_eq!(r.id(), label.as_str());
        prop_assert_eq!(r.kind(), ResourceKind::Compute);
        let configured = r.config().runtime.clone();
        prop_assert_eq!(configured, runtime);
    }

    #[test]
    fn prop_valid_labels_build_events(label in valid_label()) {
        let e = create_event(&label).unwrap();
        prop_assert_eq!(e.name(), label.as_str());
        prop_assert_eq!(e.metadata().kind(), ResourceKind::InternalEvent);
    }

    #[test]
    fn prop_whitespace_is_rejected(label in spaced_label()) {
        let is_invalid = matches!(
            validate_id(&label),
            Err(BuilderError::InvalidIdentifier { .. })
        );
        prop_assert!(is_invalid);
        prop_assert!(create_event(&label).is_err());
    }

    #[test]
    fn prop_empty_runtime_is_missing(label in valid_label()) {
        prop_assert_eq!(
            compute(&label, "").unwrap_err(),
            BuilderError::MissingArgument { argument: "runtime" }
        );
    }

    #[test]
    fn prop_default_reference_name(source in valid_label(), target in valid_label()) {
        let s = compute(&source, "nodejs20.x").unwrap();
        let t = compute(&target, "nodejs20.x").unwrap();
        s.uses(&t, ["read"], None);
        let expected = format!("{}Ref", target);
        let refs = s.references();
        prop_assert_eq!(refs.len(), 1);
        prop_assert_eq!(refs[0].name(), expected.as_str());
    }
}
