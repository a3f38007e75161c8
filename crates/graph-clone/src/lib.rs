// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # graph-clone - Deep copies of arbitrary object graphs
//!
//! Produces structurally independent copies of object graphs whose types are
//! only known at run time. Shared sub-objects stay shared in the copy, cycles
//! are reproduced, and each member can opt into deep copy, reference copy or
//! no copy at all.
//!
//! ## Quick Start
//!
//! ```rust
//! use graph_clone::{ClassBuilder, Cloner, HashMapTypeRegistry, PrimitiveKind, Result, Value};
//!
//! fn main() -> Result<()> {
//!     // Describe the types taking part in cloning
//!     let registry = HashMapTypeRegistry::new().with_type(
//!         ClassBuilder::new("Account")
//!             .member("owner", PrimitiveKind::String)
//!             .member("balance", PrimitiveKind::I64)
//!             .ignored("session", PrimitiveKind::String)
//!             .member("linked", "Account")
//!             .build(),
//!     );
//!     let cloner = Cloner::new(registry);
//!
//!     // Build a graph: two accounts linked to each other
//!     let a = cloner.instantiate("Account")?;
//!     let b = cloner.instantiate("Account")?;
//!     a.set_field("owner", "alice")?;
//!     a.set_field("session", "token")?;
//!     a.set_field("linked", &b)?;
//!     b.set_field("linked", &a)?;
//!
//!     let copy = cloner.deep_clone(&a)?;
//!     let linked = copy.field("linked")?;
//!     let linked = linked.as_object().expect("linked account");
//!     assert_eq!(linked.field("linked")?, Value::Ref(copy.clone()));
//!     assert_eq!(copy.field("session")?, Value::Null);
//!     # a.clear();
//!     # copy.clear();
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------------+
//! |                            Cloner                                   |
//! |   clone_value / deep_clone -> per-call visited map -> strategies    |
//! +---------------------------------------------------------------------+
//! |                        Descriptor Cache                             |
//! |   classification | constructor | member policies (built once)       |
//! +---------------------------------------------------------------------+
//! |                         Type Registry                               |
//! |   HashMapTypeRegistry | ClassBuilder | TypeDef (arrays, lists)      |
//! +---------------------------------------------------------------------+
//! |                          Object Graph                               |
//! |   Value (atomics, Ref) | ObjRef (shared handle) | Object bodies     |
//! +---------------------------------------------------------------------+
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Cloner`] | Entry point; deep-copies a graph rooted at a value |
//! | [`DescriptorCache`] | Per-registry cache of type descriptors |
//! | [`TypeRegistry`] | Reflection provider consulted on cache misses |
//! | [`ObjRef`] | Shared, identity-bearing handle to a heap object |
//! | [`ClonePolicy`] | Per-member `Deep`, `Shallow` or `Ignore` |
//!
//! ## Modules Overview
//!
//! - [`reflect`] - Type registration and runtime type information
//! - [`graph`] - Values, objects and handles
//! - [`descriptor`] - Type classification and the descriptor cache
//! - [`engine`] - The clone engine
//! - [`config`] - Cloner configuration

/// Cloner configuration (depth limit, visited-map sizing, warm-up).
pub mod config;
/// Type descriptors and the descriptor cache.
pub mod descriptor;
/// Recursive clone engine.
pub mod engine;
/// Error types.
pub mod error;
/// In-memory object graphs.
pub mod graph;
/// Reflection provider (type registry and builders).
pub mod reflect;

pub use config::{ClonerConfig, VisitedCapacity};
pub use descriptor::{Classification, DescriptorCache, LookupStats, MemberDescriptor, TypeDescriptor};
pub use engine::{Cloner, GraphValue};
pub use error::{Error, Result};
pub use graph::{Collection, ObjRef, Object, ObjectBody, RecordBody, Value};
pub use reflect::{
    Access, ClassBuilder, ClonePolicy, Constructor, DeclaredType, HashMapTypeRegistry, MemberInfo,
    PrimitiveKind, TypeDef, TypeInfo, TypeKey, TypeRegistry, Visibility,
};
