// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent builder API for type definitions.

use crate::graph::{ObjectBody, Value};
use crate::reflect::{ClonePolicy, Constructor, DeclaredType, MemberInfo, TypeKey};
use std::collections::VecDeque;

/// A type definition, ready to be registered.
#[derive(Debug, Clone)]
pub struct TypeDef {
    pub(crate) key: TypeKey,
    pub(crate) kind: TypeDefKind,
    pub(crate) constructible: bool,
}

#[derive(Debug, Clone)]
pub(crate) enum TypeDefKind {
    Class {
        base: Option<TypeKey>,
        members: Vec<MemberInfo>,
    },
    Array {
        element: DeclaredType,
    },
    Collection {
        element: DeclaredType,
        constructor: Constructor,
    },
}

impl TypeDef {
    /// Fixed-length array of `element`.
    pub fn array(name: impl Into<TypeKey>, element: impl Into<DeclaredType>) -> Self {
        Self {
            key: name.into(),
            kind: TypeDefKind::Array {
                element: element.into(),
            },
            constructible: true,
        }
    }

    /// Growable list of `element`, backed by `Vec`.
    pub fn list(name: impl Into<TypeKey>, element: impl Into<DeclaredType>) -> Self {
        Self::collection(
            name,
            element,
            Constructor::default_fn(|| ObjectBody::Collection(Box::<Vec<Value>>::default())),
        )
    }

    /// Double-ended queue of `element`, backed by `VecDeque`.
    pub fn deque(name: impl Into<TypeKey>, element: impl Into<DeclaredType>) -> Self {
        Self::collection(
            name,
            element,
            Constructor::default_fn(|| ObjectBody::Collection(Box::<VecDeque<Value>>::default())),
        )
    }

    /// Collection with a caller-supplied constructor.
    pub fn collection(
        name: impl Into<TypeKey>,
        element: impl Into<DeclaredType>,
        constructor: Constructor,
    ) -> Self {
        Self {
            key: name.into(),
            kind: TypeDefKind::Collection {
                element: element.into(),
                constructor,
            },
            constructible: true,
        }
    }

    /// Drop the constructor (abstract types, types with only parameterised constructors).
    pub fn without_constructor(mut self) -> Self {
        self.constructible = false;
        self
    }

    /// Type identity.
    pub fn key(&self) -> &TypeKey {
        &self.key
    }
}

/// Builder for record (class) types.
///
/// ```
/// use graph_clone::{ClassBuilder, DeclaredType, PrimitiveKind};
///
/// let node = ClassBuilder::new("Node")
///     .member("left", "Node")
///     .member("right", "Node")
///     .member("value", DeclaredType::Any)
///     .build();
/// assert_eq!(node.key().as_str(), "Node");
///
/// let simple = ClassBuilder::new("Simple")
///     .member("i", PrimitiveKind::I32)
///     .ignored("cache", PrimitiveKind::String)
///     .shallow("shared", DeclaredType::Any)
///     .build();
/// assert_eq!(simple.key().as_str(), "Simple");
/// ```
#[derive(Debug)]
pub struct ClassBuilder {
    key: TypeKey,
    base: Option<TypeKey>,
    members: Vec<MemberInfo>,
    constructible: bool,
}

impl ClassBuilder {
    /// Create a new builder for a record type.
    pub fn new(name: impl Into<TypeKey>) -> Self {
        Self {
            key: name.into(),
            base: None,
            members: Vec::new(),
            constructible: true,
        }
    }

    /// Inherit the members of `base` (laid out before this type's own).
    pub fn extends(mut self, base: impl Into<TypeKey>) -> Self {
        self.base = Some(base.into());
        self
    }

    /// Add an unannotated public read/write member.
    pub fn member(self, name: impl AsRef<str>, declared: impl Into<DeclaredType>) -> Self {
        self.member_info(MemberInfo::new(name, declared))
    }

    /// Add a member copied by reference.
    pub fn shallow(self, name: impl AsRef<str>, declared: impl Into<DeclaredType>) -> Self {
        self.member_info(MemberInfo::new(name, declared).with_policy(ClonePolicy::Shallow))
    }

    /// Add a member excluded from cloning.
    pub fn ignored(self, name: impl AsRef<str>, declared: impl Into<DeclaredType>) -> Self {
        self.member_info(MemberInfo::new(name, declared).with_policy(ClonePolicy::Ignore))
    }

    /// Add a getter-only member.
    pub fn read_only(self, name: impl AsRef<str>, declared: impl Into<DeclaredType>) -> Self {
        self.member_info(MemberInfo::new(name, declared).read_only())
    }

    /// Add a private member.
    pub fn private(self, name: impl AsRef<str>, declared: impl Into<DeclaredType>) -> Self {
        self.member_info(MemberInfo::new(name, declared).private())
    }

    /// Add a fully specified member.
    pub fn member_info(mut self, member: MemberInfo) -> Self {
        self.members.push(member);
        self
    }

    /// Value the default constructor assigns to the member `name`.
    ///
    /// Ignored if no such member was added yet.
    pub fn initial_value(mut self, name: &str, value: impl Into<Value>) -> Self {
        if let Some(member) = self.members.iter_mut().rev().find(|m| &*m.name == name) {
            member.initial = Some(value.into());
        }
        self
    }

    /// Declare the type without a parameterless constructor.
    pub fn without_default_constructor(mut self) -> Self {
        self.constructible = false;
        self
    }

    /// Build the definition.
    pub fn build(self) -> TypeDef {
        TypeDef {
            key: self.key,
            kind: TypeDefKind::Class {
                base: self.base,
                members: self.members,
            },
            constructible: self.constructible,
        }
    }
}
