// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type registries: the reflection provider consumed by the descriptor cache.

use crate::graph::{ObjectBody, RecordBody, Value};
use crate::reflect::builder::{TypeDef, TypeDefKind};
use crate::reflect::{Constructor, DeclaredType, MemberInfo, PrimitiveKind, TypeInfo, TypeKey};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Source of runtime type information.
///
/// Implementations answer, for any type key, how the type is shaped: atomic,
/// array, collection or record with members, and how to construct it.
/// Lookups may be expensive; the [`DescriptorCache`](crate::DescriptorCache)
/// calls this at most once per successfully described type.
///
/// # Example
///
/// ```
/// use graph_clone::{ClassBuilder, HashMapTypeRegistry, TypeKey, TypeRegistry};
///
/// let mut registry = HashMapTypeRegistry::new();
/// registry.register(ClassBuilder::new("Node").member("next", "Node").build());
///
/// let info = registry.type_info(&TypeKey::new("Node")).expect("registered");
/// assert_eq!(info.members.len(), 1);
/// assert!(registry.type_info(&TypeKey::new("Missing")).is_none());
/// ```
pub trait TypeRegistry: Send + Sync {
    /// Describe `key`, or `None` if the type is unknown.
    fn type_info(&self, key: &TypeKey) -> Option<TypeInfo>;
}

impl<R: TypeRegistry + ?Sized> TypeRegistry for Arc<R> {
    fn type_info(&self, key: &TypeKey) -> Option<TypeInfo> {
        (**self).type_info(key)
    }
}

/// Simple [`HashMap`]-backed [`TypeRegistry`].
///
/// Every [`PrimitiveKind`] is pre-registered under its [`PrimitiveKind::name`].
#[derive(Debug)]
pub struct HashMapTypeRegistry {
    primitives: HashMap<TypeKey, PrimitiveKind>,
    types: HashMap<TypeKey, TypeDef>,
}

impl Default for HashMapTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl HashMapTypeRegistry {
    /// Create a registry holding only the primitive types.
    #[must_use]
    pub fn new() -> Self {
        let primitives = PrimitiveKind::ALL
            .into_iter()
            .map(|kind| (TypeKey::primitive(kind), kind))
            .collect();
        Self {
            primitives,
            types: HashMap::new(),
        }
    }

    /// Register a definition, replacing any previous one with the same key.
    pub fn register(&mut self, def: TypeDef) {
        if self.primitives.contains_key(&def.key) {
            log::warn!(
                "[graph-clone] Ignoring definition shadowing primitive type {}",
                def.key
            );
            return;
        }
        if let Some(previous) = self.types.insert(def.key.clone(), def) {
            log::debug!("[graph-clone] Replaced definition of {}", previous.key);
        }
    }

    /// Chainable [`register`](Self::register).
    #[must_use]
    pub fn with_type(mut self, def: TypeDef) -> Self {
        self.register(def);
        self
    }

    /// Number of user-defined types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// True if no user-defined type is registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// True if `key` is a primitive or a registered definition.
    pub fn contains(&self, key: &TypeKey) -> bool {
        self.primitives.contains_key(key) || self.types.contains_key(key)
    }

    fn declared_default(&self, declared: &DeclaredType) -> Value {
        declared
            .key()
            .and_then(|key| self.primitives.get(key))
            .map_or(Value::Null, |kind| kind.default_value())
    }

    /// Members of `key` and all its bases, base-most first.
    fn flatten_members(&self, key: &TypeKey) -> Option<Vec<MemberInfo>> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut current = Some(key.clone());

        while let Some(next) = current {
            if !seen.insert(next.clone()) {
                log::warn!("[graph-clone] Inheritance cycle through {}", next);
                return None;
            }
            let TypeDefKind::Class { base, members } = &self.types.get(&next)?.kind else {
                log::warn!("[graph-clone] {} extends non-record type {}", key, next);
                return None;
            };
            chain.push(members);
            current = base.clone();
        }

        Some(chain.into_iter().rev().flatten().cloned().collect())
    }

    fn record_constructor(&self, members: &[MemberInfo]) -> Constructor {
        let names: Arc<[Arc<str>]> = members.iter().map(|m| Arc::clone(&m.name)).collect();
        let slots: Vec<Value> = members
            .iter()
            .map(|m| {
                m.initial
                    .clone()
                    .unwrap_or_else(|| self.declared_default(&m.declared))
            })
            .collect();

        Constructor::default_fn(move || {
            ObjectBody::Record(RecordBody::new(Arc::clone(&names), slots.clone()))
        })
    }

    fn array_constructor(&self, element: &DeclaredType) -> Constructor {
        let fill = self.declared_default(element);
        Constructor::with_length_fn(move |len| {
            ObjectBody::Array(vec![fill.clone(); len].into_boxed_slice())
        })
    }
}

impl TypeRegistry for HashMapTypeRegistry {
    fn type_info(&self, key: &TypeKey) -> Option<TypeInfo> {
        if let Some(kind) = self.primitives.get(key) {
            return Some(TypeInfo::primitive(*kind));
        }

        let def = self.types.get(key)?;
        let mut info = TypeInfo {
            key: key.clone(),
            primitive: None,
            array_element: None,
            collection_element: None,
            members: Vec::new(),
            constructor: None,
            base: None,
        };

        match &def.kind {
            TypeDefKind::Class { base, .. } => {
                info.members = self.flatten_members(key)?;
                info.base = base.clone();
                if def.constructible {
                    info.constructor = Some(self.record_constructor(&info.members));
                }
            }
            TypeDefKind::Array { element } => {
                if def.constructible {
                    info.constructor = Some(self.array_constructor(element));
                }
                info.array_element = Some(element.clone());
            }
            TypeDefKind::Collection {
                element,
                constructor,
            } => {
                info.collection_element = Some(element.clone());
                if def.constructible {
                    info.constructor = Some(constructor.clone());
                }
            }
        }

        Some(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::ClassBuilder;

    fn instantiate(info: &TypeInfo) -> ObjectBody {
        match info.constructor.as_ref() {
            Some(Constructor::Default(ctor)) => ctor(),
            other => panic!("Expected default constructor, got {:?}", other),
        }
    }

    #[test]
    fn test_primitives_preregistered() {
        let registry = HashMapTypeRegistry::new();
        assert!(registry.is_empty());
        for kind in PrimitiveKind::ALL {
            let info = registry
                .type_info(&TypeKey::primitive(kind))
                .expect("primitive");
            assert_eq!(info.primitive, Some(kind));
            assert!(info.constructor.is_none());
        }
    }

    #[test]
    fn test_primitive_cannot_be_shadowed() {
        let mut registry = HashMapTypeRegistry::new();
        registry.register(ClassBuilder::new("i32").member("x", PrimitiveKind::I32).build());
        assert!(registry.is_empty());
        let info = registry.type_info(&TypeKey::new("i32")).expect("primitive");
        assert_eq!(info.primitive, Some(PrimitiveKind::I32));
    }

    #[test]
    fn test_inherited_members_laid_out_first() {
        let registry = HashMapTypeRegistry::new()
            .with_type(
                ClassBuilder::new("Shape")
                    .member("name", PrimitiveKind::String)
                    .build(),
            )
            .with_type(
                ClassBuilder::new("Circle")
                    .extends("Shape")
                    .member("radius", PrimitiveKind::F64)
                    .build(),
            );

        let info = registry.type_info(&TypeKey::new("Circle")).expect("circle");
        let names: Vec<&str> = info.members.iter().map(|m| &*m.name).collect();
        assert_eq!(names, ["name", "radius"]);
        assert_eq!(info.base, Some(TypeKey::new("Shape")));

        match instantiate(&info) {
            ObjectBody::Record(record) => {
                assert_eq!(record.get("name"), Some(&Value::Null));
                assert_eq!(record.get("radius"), Some(&Value::F64(0.0)));
            }
            other => panic!("Expected record, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_or_cyclic_base_is_unknown() {
        let registry = HashMapTypeRegistry::new()
            .with_type(ClassBuilder::new("Orphan").extends("Nowhere").build())
            .with_type(ClassBuilder::new("A").extends("B").build())
            .with_type(ClassBuilder::new("B").extends("A").build());

        assert!(registry.type_info(&TypeKey::new("Orphan")).is_none());
        assert!(registry.type_info(&TypeKey::new("A")).is_none());
    }

    #[test]
    fn test_initial_values_applied_by_constructor() {
        let registry = HashMapTypeRegistry::new().with_type(
            ClassBuilder::new("Config")
                .member("retries", PrimitiveKind::U32)
                .initial_value("retries", 3u32)
                .build(),
        );
        let info = registry.type_info(&TypeKey::new("Config")).expect("config");
        match instantiate(&info) {
            ObjectBody::Record(record) => assert_eq!(record.get("retries"), Some(&Value::U32(3))),
            other => panic!("Expected record, got {:?}", other),
        }
    }

    #[test]
    fn test_array_constructor_fills_element_default() {
        let registry = HashMapTypeRegistry::new().with_type(TypeDef::array("i32[]", PrimitiveKind::I32));
        let info = registry.type_info(&TypeKey::new("i32[]")).expect("array");
        assert_eq!(info.array_element, Some(DeclaredType::from(PrimitiveKind::I32)));
        match info.constructor {
            Some(Constructor::WithLength(ctor)) => match ctor(3) {
                ObjectBody::Array(items) => assert_eq!(items.to_vec(), vec![Value::I32(0); 3]),
                other => panic!("Expected array, got {:?}", other),
            },
            other => panic!("Expected length constructor, got {:?}", other),
        }
    }

    #[test]
    fn test_without_constructor() {
        let registry = HashMapTypeRegistry::new()
            .with_type(ClassBuilder::new("Abstract").without_default_constructor().build());
        let info = registry.type_info(&TypeKey::new("Abstract")).expect("abstract");
        assert!(info.constructor.is_none());
    }
}
