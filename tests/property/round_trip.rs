// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for the Wire Codec
//!
//! For every parameter type `T` and valid `x`, `T::from_wire(&x.to_wire()) == x`,
//! in either wire variant, and collection order survives the trip.

use cim_wps_params::identity;
use cim_wps_params::{
    Crs, Dimension, Domain, Operation, Output, Variable, Variables, WireCodec, WireVariant,
};
use proptest::prelude::*;
use std::collections::HashSet;

// ============================================================================
// Property Test Strategies
// ============================================================================

fn crs() -> impl Strategy<Value = Crs> {
    prop_oneof![Just(Crs::Values), Just(Crs::Indices)]
}

/// Coordinates mixing integral and fractional values
fn coordinate() -> impl Strategy<Value = f64> {
    prop_oneof![
        (-1_000_000i64..1_000_000).prop_map(|v| v as f64),
        -1.0e6f64..1.0e6,
    ]
}

fn dimension() -> impl Strategy<Value = Dimension> {
    (coordinate(), coordinate(), 0.001f64..100.0, crs())
        .prop_map(|(start, end, step, crs)| {
            Dimension::new(start, end, crs)
                .and_then(|dim| dim.with_step(step))
                .expect("strategy only produces finite coordinates")
        })
}

fn dimension_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,7}".prop_filter("reserved domain key", |name| name != "id" && name != "mask")
}

fn domain() -> impl Strategy<Value = Domain> {
    (
        "[a-z0-9]{1,12}",
        prop::collection::vec((dimension_name(), dimension()), 0..5),
    )
        .prop_map(|(id, dimensions): (String, Vec<(String, Dimension)>)| {
            dimensions
                .into_iter()
                .fold(Domain::builder().id(id), |builder, (name, dim)| builder.dimension(name, dim))
                .build()
                .expect("strategy only produces valid domains")
        })
}

fn uri() -> impl Strategy<Value = String> {
    "http://[a-z]{1,10}\\.org/[a-z]{1,8}\\.nc"
}

fn variable() -> impl Strategy<Value = Variable> {
    (
        uri(),
        "[a-z][a-z0-9_]{0,7}",
        "[a-z0-9]{1,12}",
        proptest::option::of("[a-z0-9]{1,6}"),
    )
        .prop_map(|(uri, var_name, name, domain)| {
            let builder = Variable::builder()
                .uri(uri)
                .id(format!("{}|{}", var_name, name));
            match domain {
                Some(domain) => builder.domain(domain),
                None => builder,
            }
            .build()
            .expect("strategy only produces valid variables")
        })
}

fn operation() -> impl Strategy<Value = Operation> {
    (
        "[A-Za-z][A-Za-z0-9_.]{0,11}",
        proptest::option::of("[a-z0-9]{1,6}"),
        prop::collection::vec("[a-z0-9]{1,8}", 0..5),
        "[a-z0-9]{1,8}",
    )
        .prop_map(|(name, domain, inputs, result)| {
            let builder = Operation::builder().name(name).inputs(inputs).result(result);
            match domain {
                Some(domain) => builder.domain(domain),
                None => builder,
            }
            .build()
        })
}

fn output() -> impl Strategy<Value = Output> {
    (
        uri(),
        "[a-z0-9_]{1,12}",
        proptest::option::of("application/(x-netcdf|json)"),
    )
        .prop_map(|(uri, id, mimetype)| {
            let builder = Output::builder().uri(uri).id(id);
            match mimetype {
                Some(mimetype) => builder.mimetype(mimetype),
                None => builder,
            }
            .build()
            .expect("strategy only produces valid outputs")
        })
}

fn variant() -> impl Strategy<Value = WireVariant> {
    prop_oneof![Just(WireVariant::Flat), Just(WireVariant::ArrayWrapped)]
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: Dimensions survive a round trip in either variant
    #[test]
    fn prop_dimension_round_trip(dim in dimension(), variant in variant()) {
        let parsed = Dimension::from_wire_as(&dim.to_wire_as(variant), variant).unwrap();
        prop_assert_eq!(parsed, dim);
    }

    /// Property: A dimension is rejected at construction or parses back from its own tree
    #[test]
    fn prop_any_coordinates_rejected_or_round_trip(start in any::<f64>(), end in any::<f64>()) {
        match Dimension::values(start, end) {
            Ok(dim) => prop_assert_eq!(Dimension::from_wire(&dim.to_wire()).unwrap(), dim),
            Err(_) => prop_assert!(!start.is_finite() || !end.is_finite()),
        }
    }

    /// Property: Domains survive a round trip in either variant
    #[test]
    fn prop_domain_round_trip(d in domain(), variant in variant()) {
        let parsed = Domain::from_wire_as(&d.to_wire_as(variant), variant).unwrap();
        prop_assert_eq!(parsed, d);
    }

    /// Property: Both domain shapes of the same domain parse to equal domains
    #[test]
    fn prop_domain_shapes_agree(d in domain()) {
        let from_flat = Domain::from_wire(&d.to_wire()).unwrap();
        let from_legacy = Domain::from_wire(&d.to_wire_as(WireVariant::ArrayWrapped)).unwrap();
        prop_assert_eq!(from_flat, from_legacy);
    }

    /// Property: Dimension order survives the array-wrapped shape
    #[test]
    fn prop_domain_dimension_order_preserved(d in domain()) {
        let parsed = Domain::from_wire(&d.to_wire_as(WireVariant::ArrayWrapped)).unwrap();
        let expected: Vec<&String> = d.dimensions().keys().collect();
        let actual: Vec<&String> = parsed.dimensions().keys().collect();
        prop_assert_eq!(actual, expected);
    }

    /// Property: Domain trees hold exactly one key per dimension plus the id
    #[test]
    fn prop_domain_key_count(d in domain()) {
        let wire = d.to_wire();
        prop_assert_eq!(wire.as_object().unwrap().len(), d.dimensions().len() + 1);
    }

    /// Property: Variables survive a round trip and keep their id split
    #[test]
    fn prop_variable_round_trip(v in variable(), variant in variant()) {
        let parsed = Variable::from_wire_as(&v.to_wire_as(variant), variant).unwrap();
        prop_assert_eq!(parsed.var_name(), v.var_name());
        prop_assert_eq!(parsed.name(), v.name());
        prop_assert_eq!(parsed, v);
    }

    /// Property: Operations survive a round trip with inputs in order
    #[test]
    fn prop_operation_round_trip(op in operation(), variant in variant()) {
        let parsed = Operation::from_wire_as(&op.to_wire_as(variant), variant).unwrap();
        prop_assert_eq!(parsed.input_names(), op.input_names());
        prop_assert_eq!(parsed, op);
    }

    /// Property: Outputs survive a round trip in either variant
    #[test]
    fn prop_output_round_trip(out in output(), variant in variant()) {
        let parsed = Output::from_wire_as(&out.to_wire_as(variant), variant).unwrap();
        prop_assert_eq!(parsed, out);
    }

    /// Property: Collections keep member order and duplicates
    #[test]
    fn prop_collection_order_preserved(members in prop::collection::vec(variable(), 0..8)) {
        let mut with_duplicate = members.clone();
        if let Some(first) = members.first() {
            with_duplicate.push(first.clone());
        }
        let variables = Variables::new(with_duplicate);

        let parsed = Variables::from_wire(&variables.to_wire()).unwrap();
        prop_assert_eq!(parsed.keys(), variables.keys());
        prop_assert_eq!(parsed, variables);
    }
}

#[test]
fn test_ten_thousand_generated_identities_are_distinct() {
    let names: HashSet<String> = (0..10_000).map(|_| identity::generate()).collect();
    assert_eq!(names.len(), 10_000);
    assert!(names.iter().all(|name| identity::is_generated(name)));
}
