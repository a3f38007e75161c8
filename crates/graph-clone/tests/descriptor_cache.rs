// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Test/bench code readability over pedantic
#![allow(clippy::missing_panics_doc)] // Tests/examples panic on failure
#![allow(clippy::items_after_statements)] // Test helpers
#![allow(clippy::needless_pass_by_value)] // Test functions

//! Descriptor cache integration tests
//!
//! Classification, member filtering, error reporting and cache lifecycle
//! observed through the public API.

use graph_clone::{
    ClassBuilder, Classification, ClonePolicy, Cloner, ClonerConfig, DeclaredType,
    DescriptorCache, Error, HashMapTypeRegistry, MemberInfo, PrimitiveKind, TypeDef, TypeKey,
    Value,
};
use std::sync::Arc;

fn registry() -> HashMapTypeRegistry {
    HashMapTypeRegistry::new()
        .with_type(
            ClassBuilder::new("Account")
                .member("owner", PrimitiveKind::String)
                .read_only("id", PrimitiveKind::U64)
                .private("secret", PrimitiveKind::String)
                .member_info(
                    MemberInfo::new("audit", DeclaredType::Any).with_policy(ClonePolicy::Shallow),
                )
                .initial_value("id", 77u64)
                .build(),
        )
        .with_type(
            ClassBuilder::new("Shape")
                .member("name", PrimitiveKind::String)
                .without_default_constructor()
                .build(),
        )
        .with_type(
            ClassBuilder::new("Holder")
                .member("item", DeclaredType::Any)
                .build(),
        )
        .with_type(TypeDef::array("Sealed[]", DeclaredType::Any).without_constructor())
        .with_type(TypeDef::list("List<string>", PrimitiveKind::String))
}

fn config() -> ClonerConfig {
    ClonerConfig::default().with_unlimited_depth()
}

#[test]
fn test_descriptor_is_built_once() {
    let cloner = Cloner::with_config(registry(), config().with_prewarm(false));

    let first = cloner.descriptor("Account").expect("account");
    let second = cloner.descriptor("Account").expect("account");
    assert!(Arc::ptr_eq(&first, &second));

    let stats = cloner.cache().stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.failures, 0);
}

#[test]
fn test_classifications() {
    let cloner = Cloner::with_config(registry(), config());
    let cases = [
        ("i64", Classification::ShallowAtomic),
        ("string", Classification::ShallowAtomic),
        ("List<string>", Classification::Collection),
        ("Account", Classification::Record),
    ];
    for (name, expected) in cases {
        let descriptor = cloner.descriptor(name).expect("descriptor");
        assert_eq!(descriptor.classification(), expected, "{}", name);
        assert_eq!(descriptor.key().as_str(), name);
    }
}

#[test]
fn test_inaccessible_members_are_skipped() {
    let cloner = Cloner::with_config(registry(), config());
    let descriptor = cloner.descriptor("Account").expect("account");

    let names: Vec<&str> = descriptor.members().iter().map(|m| m.name()).collect();
    assert_eq!(names, ["owner", "audit"]);
    assert_eq!(
        descriptor.member("audit").map(|m| m.policy()),
        Some(ClonePolicy::Shallow)
    );

    let account = cloner.instantiate("Account").expect("account");
    account.set_field("owner", "bob").expect("owner");
    account.set_field("id", 5u64).expect("id");
    account.set_field("secret", "hunter2").expect("secret");

    let copy = cloner.deep_clone(&account).expect("clone");
    assert_eq!(copy.field("owner").expect("owner"), Value::from("bob"));
    assert_eq!(copy.field("id").expect("id"), Value::U64(77));
    assert_eq!(copy.field("secret").expect("secret"), Value::Null);
}

#[test]
fn test_missing_constructor_is_reported_and_not_cached() {
    let cloner = Cloner::with_config(registry(), config());
    let shape = TypeKey::new("Shape");

    for _ in 0..2 {
        let err = cloner.descriptor(&shape).unwrap_err();
        assert_eq!(
            err,
            Error::MissingConstructor {
                type_name: shape.clone(),
                classification: Classification::Record,
            }
        );
        assert!(err.to_string().contains("Shape"));
    }
    assert!(!cloner.cache().contains(&shape));
    assert_eq!(cloner.cache().stats().failures, 2);

    let err = cloner.new_array("Sealed[]", 1).unwrap_err();
    assert!(matches!(
        err,
        Error::MissingConstructor {
            classification: Classification::Array,
            ..
        }
    ));
}

#[test]
fn test_clone_fails_on_unknown_runtime_type() {
    let cloner = Cloner::with_config(registry(), config());

    // Objects of an unregistered type can still be built by hand.
    let stranger = graph_clone::ObjRef::new(graph_clone::Object::new(
        "Stranger",
        graph_clone::ObjectBody::Collection(Box::<Vec<Value>>::default()),
    ));
    let holder = cloner.instantiate("Holder").expect("holder");
    holder.set_field("item", &stranger).expect("item");

    for _ in 0..2 {
        let err = cloner.deep_clone(&holder).unwrap_err();
        assert_eq!(err, Error::UnknownType(TypeKey::new("Stranger")));
        assert_eq!(err.to_string(), "Unknown type: Stranger");
    }
    assert!(cloner.cache().contains(&TypeKey::new("Holder")));
    assert!(!cloner.cache().contains(&TypeKey::new("Stranger")));
}

#[test]
fn test_cache_shared_between_cloners() {
    let cache = Arc::new(DescriptorCache::new(registry()).with_prewarm(false));
    let a = Cloner::from_cache(Arc::clone(&cache), config());
    let b = Cloner::from_cache(Arc::clone(&cache), config());

    let list = a.instantiate("List<string>").expect("list");
    list.push("x").expect("push");
    let copy = b.deep_clone(&list).expect("clone");
    assert_eq!(copy.elements().expect("elements"), vec![Value::from("x")]);

    assert!(cache.contains(&TypeKey::new("List<string>")));
    assert!(cache.contains(&TypeKey::primitive(PrimitiveKind::String)));
    assert_eq!(cache.len(), 2);
}
