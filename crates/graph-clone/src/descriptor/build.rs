// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Classification of registry type information into descriptors.

use super::{Classification, MemberDescriptor, TypeDescriptor};
use crate::error::{Error, Result};
use crate::reflect::{ClonePolicy, Constructor, TypeInfo};

impl TypeDescriptor {
    /// Classify `info` and validate that the type can be instantiated.
    ///
    /// Checked in order: atomic, array, collection, record.
    pub(crate) fn build(info: TypeInfo) -> Result<Self> {
        let TypeInfo {
            key,
            primitive,
            array_element,
            collection_element,
            members,
            constructor,
            base,
        } = info;

        if primitive.is_some() {
            return Ok(Self {
                key,
                classification: Classification::ShallowAtomic,
                members: Vec::new(),
                element: None,
                base: None,
                constructor: None,
            });
        }

        if let Some(element) = array_element {
            let Some(ctor @ Constructor::WithLength(_)) = constructor else {
                return Err(Error::MissingConstructor {
                    type_name: key,
                    classification: Classification::Array,
                });
            };
            return Ok(Self {
                key,
                classification: Classification::Array,
                members: Vec::new(),
                element: Some(element),
                base: None,
                constructor: Some(ctor),
            });
        }

        let classification = if collection_element.is_some() {
            Classification::Collection
        } else {
            Classification::Record
        };
        let Some(ctor @ Constructor::Default(_)) = constructor else {
            return Err(Error::MissingConstructor {
                type_name: key,
                classification,
            });
        };

        if classification == Classification::Collection {
            return Ok(Self {
                key,
                classification,
                members: Vec::new(),
                element: collection_element,
                base: None,
                constructor: Some(ctor),
            });
        }

        let mut cloneable = Vec::with_capacity(members.len());
        for (slot, member) in members.into_iter().enumerate() {
            if !member.is_accessible() {
                log::trace!(
                    "[graph-clone] {}.{} skipped ({:?}, {:?})",
                    key,
                    member.name,
                    member.visibility,
                    member.access
                );
                continue;
            }
            let policy = member.effective_policy();
            cloneable.push(MemberDescriptor::new(
                member.name,
                member.declared,
                policy,
                slot,
            ));
        }

        Ok(Self {
            key,
            classification,
            members: cloneable,
            element: None,
            base,
            constructor: Some(ctor),
        })
    }

    /// Number of members copied (not ignored).
    pub fn copied_member_count(&self) -> usize {
        self.members
            .iter()
            .filter(|m| m.policy() != ClonePolicy::Ignore)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Value;
    use crate::reflect::{
        ClassBuilder, DeclaredType, HashMapTypeRegistry, PrimitiveKind, TypeDef, TypeKey,
        TypeRegistry,
    };

    fn describe(registry: &HashMapTypeRegistry, name: &str) -> Result<TypeDescriptor> {
        let info = registry
            .type_info(&TypeKey::new(name))
            .ok_or_else(|| Error::UnknownType(TypeKey::new(name)))?;
        TypeDescriptor::build(info)
    }

    fn registry() -> HashMapTypeRegistry {
        HashMapTypeRegistry::new()
            .with_type(
                ClassBuilder::new("Simple")
                    .member("i", PrimitiveKind::I32)
                    .member("s", PrimitiveKind::String)
                    .ignored("ignored", PrimitiveKind::String)
                    .shallow("shallow", DeclaredType::Any)
                    .read_only("id", PrimitiveKind::U64)
                    .private("secret", PrimitiveKind::String)
                    .build(),
            )
            .with_type(TypeDef::array("i32[]", PrimitiveKind::I32))
            .with_type(TypeDef::list("List<i32>", PrimitiveKind::I32))
            .with_type(
                ClassBuilder::new("Shape")
                    .member("name", PrimitiveKind::String)
                    .without_default_constructor()
                    .build(),
            )
            .with_type(TypeDef::array("Sealed[]", DeclaredType::Any).without_constructor())
    }

    #[test]
    fn test_atomic_types() {
        let registry = registry();
        for kind in PrimitiveKind::ALL {
            let d = describe(&registry, kind.name()).expect("primitive");
            assert_eq!(d.classification(), Classification::ShallowAtomic);
            assert!(d.members().is_empty());
            assert!(matches!(
                d.instantiate(0),
                Err(Error::MissingConstructor { .. })
            ));
        }
    }

    #[test]
    fn test_record_members_and_policies() {
        let d = describe(&registry(), "Simple").expect("simple");
        assert_eq!(d.classification(), Classification::Record);

        let summary: Vec<(&str, ClonePolicy, usize)> = d
            .members()
            .iter()
            .map(|m| (m.name(), m.policy(), m.slot()))
            .collect();
        assert_eq!(
            summary,
            [
                ("i", ClonePolicy::Deep, 0),
                ("s", ClonePolicy::Deep, 1),
                ("ignored", ClonePolicy::Ignore, 2),
                ("shallow", ClonePolicy::Shallow, 3),
            ]
        );
        assert_eq!(d.copied_member_count(), 3);
    }

    #[test]
    fn test_member_accessors_resolve_slots() {
        let d = describe(&registry(), "Simple").expect("simple");
        let obj = d.instantiate(0).expect("instance");
        let member = d.member("s").expect("member s");

        assert_eq!(member.get(&obj).expect("get"), Value::Null);
        member.set(&obj, Value::from("hello")).expect("set");
        assert_eq!(obj.field("s").expect("field"), Value::from("hello"));
    }

    #[test]
    fn test_array_and_collection() {
        let registry = registry();

        let array = describe(&registry, "i32[]").expect("array");
        assert_eq!(array.classification(), Classification::Array);
        assert_eq!(array.element(), Some(&DeclaredType::from(PrimitiveKind::I32)));
        let obj = array.instantiate(4).expect("instance");
        assert_eq!(obj.len().expect("len"), 4);

        let list = describe(&registry, "List<i32>").expect("list");
        assert_eq!(list.classification(), Classification::Collection);
        let obj = list.instantiate(4).expect("instance");
        assert_eq!(obj.len().expect("len"), 0);
    }

    #[test]
    fn test_missing_constructors() {
        let registry = registry();
        assert_eq!(
            describe(&registry, "Shape").unwrap_err(),
            Error::MissingConstructor {
                type_name: TypeKey::new("Shape"),
                classification: Classification::Record,
            }
        );
        assert_eq!(
            describe(&registry, "Sealed[]").unwrap_err(),
            Error::MissingConstructor {
                type_name: TypeKey::new("Sealed[]"),
                classification: Classification::Array,
            }
        );
    }
}
