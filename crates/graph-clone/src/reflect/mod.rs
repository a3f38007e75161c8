// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Reflection provider.
//!
//! Rust has no runtime member introspection, so types taking part in cloning
//! are described explicitly and looked up through a [`TypeRegistry`]:
//!
//! - **TypeKey**: type identity
//! - **TypeInfo**: shape of one type (atomic, array, collection or record members)
//! - **ClonePolicy**: per-member policy annotation (`Deep` when absent)
//! - **Builder API**: [`ClassBuilder`] and [`TypeDef`] for declaring types

mod builder;
mod registry;
mod type_info;

pub use builder::{ClassBuilder, TypeDef};
pub use registry::{HashMapTypeRegistry, TypeRegistry};
pub use type_info::{
    Access, ClonePolicy, Constructor, DeclaredType, MemberInfo, PrimitiveKind, TypeInfo, TypeKey,
    Visibility,
};
