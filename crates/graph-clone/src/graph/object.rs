// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Heap objects and the shared handles that reference them.

use crate::error::{Error, Result};
use crate::graph::Value;
use crate::reflect::TypeKey;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

/// Homogeneous collection storage: countable, iterable and appendable.
pub trait Collection: fmt::Debug + Send + Sync {
    /// Number of elements.
    fn len(&self) -> usize;

    /// Check if the collection holds no element.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Elements in enumeration order.
    fn snapshot(&self) -> Vec<Value>;

    /// Append one element.
    fn add(&mut self, value: Value);

    /// Remove every element.
    fn clear(&mut self);
}

impl Collection for Vec<Value> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn snapshot(&self) -> Vec<Value> {
        self.clone()
    }

    fn add(&mut self, value: Value) {
        self.push(value);
    }

    fn clear(&mut self) {
        Vec::clear(self);
    }
}

impl Collection for VecDeque<Value> {
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn snapshot(&self) -> Vec<Value> {
        self.iter().cloned().collect()
    }

    fn add(&mut self, value: Value) {
        self.push_back(value);
    }

    fn clear(&mut self) {
        VecDeque::clear(self);
    }
}

/// Member slots of a record object.
#[derive(Debug, Clone)]
pub struct RecordBody {
    names: Arc<[Arc<str>]>,
    slots: Vec<Value>,
}

impl RecordBody {
    /// Create a record; `slots[i]` holds member `names[i]`.
    pub fn new(names: Arc<[Arc<str>]>, mut slots: Vec<Value>) -> Self {
        slots.resize(names.len(), Value::Null);
        Self { names, slots }
    }

    /// Slot index of `name`.
    pub fn slot_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| &**n == name)
    }

    /// Member name at `slot`.
    pub fn name_at(&self, slot: usize) -> Option<&str> {
        self.names.get(slot).map(|n| &**n)
    }

    /// Get a member by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.slot_of(name).and_then(|slot| self.slots.get(slot))
    }

    /// Get a member by slot index.
    pub fn get_slot(&self, slot: usize) -> Option<&Value> {
        self.slots.get(slot)
    }

    /// Set a member by slot index. Returns false if out of range.
    pub fn set_slot(&mut self, slot: usize, value: Value) -> bool {
        match self.slots.get_mut(slot) {
            Some(dst) => {
                *dst = value;
                true
            }
            None => false,
        }
    }

    /// Iterate over `(name, value)` pairs in layout order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.names.iter().map(|n| &**n).zip(self.slots.iter())
    }

    /// Number of member slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if the record has no member.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Contents of an object.
#[derive(Debug)]
pub enum ObjectBody {
    /// Named member slots.
    Record(RecordBody),
    /// Fixed-length element slots.
    Array(Box<[Value]>),
    /// Growable collection.
    Collection(Box<dyn Collection>),
}

impl ObjectBody {
    /// Short shape name, used in error messages.
    pub fn shape_name(&self) -> &'static str {
        match self {
            Self::Record(_) => "record",
            Self::Array(_) => "array",
            Self::Collection(_) => "collection",
        }
    }
}

/// A heap object: its runtime type and its contents.
#[derive(Debug)]
pub struct Object {
    type_key: TypeKey,
    body: ObjectBody,
}

impl Object {
    /// Create an object of runtime type `type_key`.
    pub fn new(type_key: impl Into<TypeKey>, body: ObjectBody) -> Self {
        Self {
            type_key: type_key.into(),
            body,
        }
    }

    /// Runtime type.
    pub fn type_key(&self) -> &TypeKey {
        &self.type_key
    }

    /// Contents.
    pub fn body(&self) -> &ObjectBody {
        &self.body
    }

    /// Mutable contents.
    pub fn body_mut(&mut self) -> &mut ObjectBody {
        &mut self.body
    }

    /// Drop every outgoing reference (records and arrays keep their shape).
    pub fn clear(&mut self) {
        match &mut self.body {
            ObjectBody::Record(record) => record.slots.fill(Value::Null),
            ObjectBody::Array(items) => items.fill(Value::Null),
            ObjectBody::Collection(items) => items.clear(),
        }
    }
}

/// Shared, identity-bearing handle to an [`Object`].
///
/// Cloning the handle aliases the object. Equality is identity.
#[derive(Clone)]
pub struct ObjRef(Arc<RwLock<Object>>);

impl ObjRef {
    /// Allocate a new object.
    pub fn new(object: Object) -> Self {
        Self(Arc::new(RwLock::new(object)))
    }

    /// True if both handles reference the same object.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Address of the object, stable for its lifetime.
    pub fn addr(&self) -> usize {
        Arc::as_ptr(&self.0) as usize
    }

    /// Runtime type of the object.
    pub fn type_key(&self) -> TypeKey {
        self.0.read().type_key.clone()
    }

    /// Shared access to the object.
    pub fn read(&self) -> RwLockReadGuard<'_, Object> {
        self.0.read()
    }

    /// Exclusive access to the object.
    pub fn write(&self) -> RwLockWriteGuard<'_, Object> {
        self.0.write()
    }

    /// Get a record member by name.
    pub fn field(&self, name: &str) -> Result<Value> {
        let object = self.read();
        match &object.body {
            ObjectBody::Record(record) => {
                record
                    .get(name)
                    .cloned()
                    .ok_or_else(|| Error::MemberNotFound {
                        type_name: object.type_key.clone(),
                        member: name.to_string(),
                    })
            }
            other => Err(Error::NotARecord {
                type_name: object.type_key.clone(),
                shape: other.shape_name(),
            }),
        }
    }

    /// Set a record member by name.
    pub fn set_field(&self, name: &str, value: impl Into<Value>) -> Result<()> {
        let mut object = self.write();
        let type_name = object.type_key.clone();
        match &mut object.body {
            ObjectBody::Record(record) => match record.slot_of(name) {
                Some(slot) => {
                    record.slots[slot] = value.into();
                    Ok(())
                }
                None => Err(Error::MemberNotFound {
                    type_name,
                    member: name.to_string(),
                }),
            },
            other => Err(Error::NotARecord {
                type_name,
                shape: other.shape_name(),
            }),
        }
    }

    /// Number of array or collection elements.
    pub fn len(&self) -> Result<usize> {
        let object = self.read();
        match &object.body {
            ObjectBody::Array(items) => Ok(items.len()),
            ObjectBody::Collection(items) => Ok(items.len()),
            ObjectBody::Record(_) => Err(Error::NotASequence {
                type_name: object.type_key.clone(),
            }),
        }
    }

    /// Check if an array or collection is empty.
    pub fn is_empty(&self) -> Result<bool> {
        self.len().map(|len| len == 0)
    }

    /// Array or collection elements in enumeration order.
    pub fn elements(&self) -> Result<Vec<Value>> {
        let object = self.read();
        match &object.body {
            ObjectBody::Array(items) => Ok(items.to_vec()),
            ObjectBody::Collection(items) => Ok(items.snapshot()),
            ObjectBody::Record(_) => Err(Error::NotASequence {
                type_name: object.type_key.clone(),
            }),
        }
    }

    /// Get an array element by index.
    pub fn element(&self, index: usize) -> Result<Value> {
        let object = self.read();
        match &object.body {
            ObjectBody::Array(items) => {
                items
                    .get(index)
                    .cloned()
                    .ok_or(Error::IndexOutOfBounds {
                        index,
                        length: items.len(),
                    })
            }
            ObjectBody::Collection(items) => {
                let length = items.len();
                items
                    .snapshot()
                    .into_iter()
                    .nth(index)
                    .ok_or(Error::IndexOutOfBounds { index, length })
            }
            ObjectBody::Record(_) => Err(Error::NotASequence {
                type_name: object.type_key.clone(),
            }),
        }
    }

    /// Set an array element by index.
    pub fn set_element(&self, index: usize, value: impl Into<Value>) -> Result<()> {
        let mut object = self.write();
        let type_name = object.type_key.clone();
        match &mut object.body {
            ObjectBody::Array(items) => {
                let length = items.len();
                let slot = items
                    .get_mut(index)
                    .ok_or(Error::IndexOutOfBounds { index, length })?;
                *slot = value.into();
                Ok(())
            }
            _ => Err(Error::NotAnArray { type_name }),
        }
    }

    /// Append an element to a collection.
    pub fn push(&self, value: impl Into<Value>) -> Result<()> {
        let mut object = self.write();
        let type_name = object.type_key.clone();
        match &mut object.body {
            ObjectBody::Collection(items) => {
                items.add(value.into());
                Ok(())
            }
            _ => Err(Error::NotACollection { type_name }),
        }
    }

    /// Drop every outgoing reference of the object.
    ///
    /// Breaks reference cycles so a cyclic graph can be freed.
    pub fn clear(&self) {
        self.write().clear();
    }
}

impl PartialEq for ObjRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for ObjRef {}

impl fmt::Debug for ObjRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never recurse into the body: graphs may be cyclic.
        match self.0.try_read() {
            Some(object) => write!(f, "ObjRef({}@{:#x})", object.type_key, self.addr()),
            None => write!(f, "ObjRef(<locked>@{:#x})", self.addr()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Arc<[Arc<str>]> {
        list.iter().map(|n| Arc::from(*n)).collect()
    }

    fn node() -> ObjRef {
        let body = RecordBody::new(names(&["left", "right"]), Vec::new());
        ObjRef::new(Object::new("Node", ObjectBody::Record(body)))
    }

    #[test]
    fn test_record_fields() {
        let n = node();
        assert_eq!(n.field("left").expect("left"), Value::Null);

        n.set_field("left", &n).expect("set left");
        assert_eq!(n.field("left").expect("left"), Value::Ref(n.clone()));
        assert!(matches!(
            n.set_field("middle", 1i32),
            Err(Error::MemberNotFound { .. })
        ));
        assert!(matches!(n.len(), Err(Error::NotASequence { .. })));
    }

    #[test]
    fn test_identity_equality() {
        let a = node();
        let b = node();
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert_ne!(a.addr(), b.addr());
    }

    #[test]
    fn test_debug_is_cycle_safe() {
        let n = node();
        n.set_field("left", &n).expect("set left");
        let rendered = format!("{:?}", Value::Ref(n.clone()));
        assert!(rendered.contains("ObjRef(Node@"));
        n.clear();
    }

    #[test]
    fn test_array_elements() {
        let array = ObjRef::new(Object::new(
            "i32[]",
            ObjectBody::Array(vec![Value::I32(0); 2].into_boxed_slice()),
        ));
        array.set_element(1, 5i32).expect("set");
        assert_eq!(array.elements().expect("elements"), vec![Value::I32(0), Value::I32(5)]);
        assert!(matches!(
            array.set_element(2, 1i32),
            Err(Error::IndexOutOfBounds {
                index: 2,
                length: 2
            })
        ));
        assert!(matches!(array.push(1i32), Err(Error::NotACollection { .. })));
    }

    #[test]
    fn test_collection_preserves_order() {
        let list = ObjRef::new(Object::new(
            "Queue<i32>",
            ObjectBody::Collection(Box::<VecDeque<Value>>::default()),
        ));
        for i in 1..=3i32 {
            list.push(i).expect("push");
        }
        assert_eq!(list.len().expect("len"), 3);
        assert_eq!(list.element(2).expect("element"), Value::I32(3));
        assert_eq!(
            list.elements().expect("elements"),
            vec![Value::I32(1), Value::I32(2), Value::I32(3)]
        );
    }

    #[test]
    fn test_clear_breaks_cycles() {
        let n = node();
        n.set_field("left", &n).expect("set left");
        n.clear();
        assert_eq!(n.field("left").expect("left"), Value::Null);
    }
}
