// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type descriptors: cached, immutable cloning metadata for one type.
//!
//! A [`TypeDescriptor`] is built once per type from the registry's
//! [`TypeInfo`](crate::TypeInfo) and published in the [`DescriptorCache`].
//! It carries the type's [`Classification`], its constructor and, for
//! records, one [`MemberDescriptor`] per cloneable member with its policy and
//! pre-resolved accessor.

mod build;
mod cache;

pub use cache::{DescriptorCache, LookupStats};

use crate::error::{Error, Result};
use crate::graph::{ObjRef, Object, ObjectBody, RecordBody, Value};
use crate::reflect::{ClonePolicy, Constructor, DeclaredType, TypeKey};
use std::fmt;
use std::sync::Arc;

/// How values of a type are copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Immutable primitive or string; the copy is the original.
    ShallowAtomic,
    /// Fixed-length array, copied slot by slot.
    Array,
    /// Countable, iterable, appendable collection, copied element by element.
    Collection,
    /// Plain record, copied member by member.
    Record,
}

impl Classification {
    /// Check if a body has the shape this classification expects.
    pub fn matches(self, body: &ObjectBody) -> bool {
        matches!(
            (self, body),
            (Self::Array, ObjectBody::Array(_))
                | (Self::Collection, ObjectBody::Collection(_))
                | (Self::Record, ObjectBody::Record(_))
        )
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ShallowAtomic => "atomic",
            Self::Array => "array",
            Self::Collection => "collection",
            Self::Record => "record",
        })
    }
}

/// One cloneable member of a record type.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberDescriptor {
    name: Arc<str>,
    declared: DeclaredType,
    policy: ClonePolicy,
    slot: usize,
}

impl MemberDescriptor {
    pub(crate) fn new(
        name: Arc<str>,
        declared: DeclaredType,
        policy: ClonePolicy,
        slot: usize,
    ) -> Self {
        Self {
            name,
            declared,
            policy,
            slot,
        }
    }

    /// Member name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type.
    pub fn declared(&self) -> &DeclaredType {
        &self.declared
    }

    /// Policy in effect.
    pub fn policy(&self) -> ClonePolicy {
        self.policy
    }

    /// Slot index in the type's record layout.
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Read this member from `object`.
    pub fn get(&self, object: &ObjRef) -> Result<Value> {
        let guard = object.read();
        let record = record_of(&guard)?;
        let slot = self.resolve(record, guard.type_key())?;
        Ok(record.get_slot(slot).cloned().unwrap_or_default())
    }

    /// Write this member on `object`.
    pub fn set(&self, object: &ObjRef, value: Value) -> Result<()> {
        let mut guard = object.write();
        let type_name = guard.type_key().clone();
        let shape = guard.body().shape_name();
        let ObjectBody::Record(record) = guard.body_mut() else {
            return Err(Error::NotARecord { type_name, shape });
        };
        let slot = self.resolve(record, &type_name)?;
        record.set_slot(slot, value);
        Ok(())
    }

    /// Slot holding this member in `record`. Objects built by the type's
    /// constructor hit the pre-resolved slot; others fall back to a name lookup.
    fn resolve(&self, record: &RecordBody, type_name: &TypeKey) -> Result<usize> {
        if record.name_at(self.slot) == Some(&*self.name) {
            return Ok(self.slot);
        }
        record
            .slot_of(&self.name)
            .ok_or_else(|| Error::MemberNotFound {
                type_name: type_name.clone(),
                member: self.name.to_string(),
            })
    }
}

fn record_of(object: &Object) -> Result<&RecordBody> {
    match object.body() {
        ObjectBody::Record(record) => Ok(record),
        other => Err(Error::NotARecord {
            type_name: object.type_key().clone(),
            shape: other.shape_name(),
        }),
    }
}

/// Cloning metadata for one type. Immutable once built.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    key: TypeKey,
    classification: Classification,
    members: Vec<MemberDescriptor>,
    element: Option<DeclaredType>,
    base: Option<TypeKey>,
    constructor: Option<Constructor>,
}

impl TypeDescriptor {
    /// Type identity.
    pub fn key(&self) -> &TypeKey {
        &self.key
    }

    /// Clonability classification.
    pub fn classification(&self) -> Classification {
        self.classification
    }

    /// Cloneable members in layout order (records only).
    pub fn members(&self) -> &[MemberDescriptor] {
        &self.members
    }

    /// Get member by name.
    pub fn member(&self, name: &str) -> Option<&MemberDescriptor> {
        self.members.iter().find(|m| m.name() == name)
    }

    /// Declared element type (arrays and collections).
    pub fn element(&self) -> Option<&DeclaredType> {
        self.element.as_ref()
    }

    /// Direct base type (records only).
    pub fn base(&self) -> Option<&TypeKey> {
        self.base.as_ref()
    }

    /// Produce a fresh, empty instance.
    ///
    /// `len` sizes arrays and is ignored otherwise.
    pub fn instantiate(&self, len: usize) -> Result<ObjRef> {
        let body = match (self.classification, &self.constructor) {
            (Classification::Array, Some(Constructor::WithLength(ctor))) => ctor(len),
            (
                Classification::Record | Classification::Collection,
                Some(Constructor::Default(ctor)),
            ) => ctor(),
            _ => {
                return Err(Error::MissingConstructor {
                    type_name: self.key.clone(),
                    classification: self.classification,
                })
            }
        };

        if !self.classification.matches(&body) {
            return Err(Error::ShapeMismatch {
                type_name: self.key.clone(),
                expected: self.classification,
                found: body.shape_name(),
            });
        }
        Ok(ObjRef::new(Object::new(self.key.clone(), body)))
    }

    /// Types named by member and element declarations.
    pub fn declared_dependencies(&self) -> impl Iterator<Item = &TypeKey> {
        self.members
            .iter()
            .filter(|m| m.policy != ClonePolicy::Ignore)
            .filter_map(|m| m.declared.key())
            .chain(self.element.as_ref().and_then(DeclaredType::key))
    }
}
