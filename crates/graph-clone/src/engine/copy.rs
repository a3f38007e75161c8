// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Recursive copy of one object graph.
//!
//! Source objects are read through short-lived guards: each strategy takes a
//! snapshot of the source's elements or members, releases the lock, then
//! recurses. No lock is held across a recursive call, so cycles never
//! re-enter a held guard.

use super::visited::VisitedMap;
use crate::descriptor::{Classification, DescriptorCache, TypeDescriptor};
use crate::error::{Error, Result};
use crate::graph::{ObjRef, ObjectBody, Value};
use crate::reflect::ClonePolicy;

/// State of one clone call.
pub(crate) struct CopyContext<'a> {
    cache: &'a DescriptorCache,
    visited: VisitedMap,
    depth: usize,
    max_depth: Option<usize>,
}

impl<'a> CopyContext<'a> {
    pub(crate) fn new(
        cache: &'a DescriptorCache,
        visited: VisitedMap,
        max_depth: Option<usize>,
    ) -> Self {
        Self {
            cache,
            visited,
            depth: 0,
            max_depth,
        }
    }

    pub(crate) fn into_visited(self) -> VisitedMap {
        self.visited
    }

    /// Copy `original`, dispatching on its runtime type.
    pub(crate) fn copy_dynamic(&mut self, original: &Value) -> Result<Value> {
        let Some(key) = original.runtime_type() else {
            return Ok(Value::Null);
        };
        let descriptor = self.cache.descriptor(&key)?;
        self.copy_value(&descriptor, original)
    }

    /// Copy `original` using an already resolved descriptor.
    pub(crate) fn copy_value(
        &mut self,
        descriptor: &TypeDescriptor,
        original: &Value,
    ) -> Result<Value> {
        if original.is_null() {
            return Ok(Value::Null);
        }
        if descriptor.classification() == Classification::ShallowAtomic {
            return Ok(original.clone());
        }
        let Value::Ref(source) = original else {
            return Err(Error::ShapeMismatch {
                type_name: descriptor.key().clone(),
                expected: descriptor.classification(),
                found: "atomic",
            });
        };

        if let Some(copy) = self.visited.get(source) {
            return Ok(Value::Ref(copy.clone()));
        }

        self.enter(descriptor)?;
        let copied = match descriptor.classification() {
            Classification::Array => self.copy_array(descriptor, source),
            Classification::Collection => self.copy_collection(descriptor, source),
            Classification::Record => self.copy_record(descriptor, source),
            Classification::ShallowAtomic => Ok(source.clone()),
        };
        self.depth -= 1;
        copied.map(Value::Ref)
    }

    fn enter(&mut self, descriptor: &TypeDescriptor) -> Result<()> {
        if let Some(limit) = self.max_depth {
            if self.depth >= limit {
                return Err(Error::DepthLimitExceeded {
                    limit,
                    type_name: descriptor.key().clone(),
                });
            }
        }
        self.depth += 1;
        Ok(())
    }

    fn copy_array(&mut self, descriptor: &TypeDescriptor, source: &ObjRef) -> Result<ObjRef> {
        let items = snapshot_elements(descriptor, source)?;
        let target = descriptor.instantiate(items.len())?;
        self.visited.insert(source, &target);

        for (index, item) in items.iter().enumerate() {
            let copy = self.copy_dynamic(item)?;
            target.set_element(index, copy)?;
        }
        Ok(target)
    }

    fn copy_collection(
        &mut self,
        descriptor: &TypeDescriptor,
        source: &ObjRef,
    ) -> Result<ObjRef> {
        let items = snapshot_elements(descriptor, source)?;
        let target = descriptor.instantiate(0)?;
        self.visited.insert(source, &target);

        for item in &items {
            let copy = self.copy_dynamic(item)?;
            target.push(copy)?;
        }
        Ok(target)
    }

    fn copy_record(&mut self, descriptor: &TypeDescriptor, source: &ObjRef) -> Result<ObjRef> {
        ensure_shape(descriptor, source)?;
        let target = descriptor.instantiate(0)?;
        self.visited.insert(source, &target);

        for member in descriptor.members() {
            let copy = match member.policy() {
                ClonePolicy::Ignore => continue,
                ClonePolicy::Shallow => member.get(source)?,
                ClonePolicy::Deep => {
                    let value = member.get(source)?;
                    self.copy_dynamic(&value)?
                }
            };
            // Absent values leave the constructed default in place.
            if copy.is_null() {
                continue;
            }
            member.set(&target, copy)?;
        }
        Ok(target)
    }
}

fn ensure_shape(descriptor: &TypeDescriptor, source: &ObjRef) -> Result<()> {
    let object = source.read();
    if descriptor.classification().matches(object.body()) {
        Ok(())
    } else {
        Err(Error::ShapeMismatch {
            type_name: descriptor.key().clone(),
            expected: descriptor.classification(),
            found: object.body().shape_name(),
        })
    }
}

fn snapshot_elements(descriptor: &TypeDescriptor, source: &ObjRef) -> Result<Vec<Value>> {
    let object = source.read();
    match (descriptor.classification(), object.body()) {
        (Classification::Array, ObjectBody::Array(items)) => Ok(items.to_vec()),
        (Classification::Collection, ObjectBody::Collection(items)) => Ok(items.snapshot()),
        (expected, body) => Err(Error::ShapeMismatch {
            type_name: descriptor.key().clone(),
            expected,
            found: body.shape_name(),
        }),
    }
}
