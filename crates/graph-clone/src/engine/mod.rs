// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Clone engine.
//!
//! [`Cloner`] copies an object graph rooted at a [`Value`]:
//!
//! - atomic values (primitives, strings) are returned as-is
//! - arrays, collections and records get a fresh instance whose slots are
//!   copied according to the type's descriptor and member policies
//! - every source object is copied at most once per call, so shared
//!   sub-objects stay shared and cycles are reproduced in the copy
//!
//! Descriptors are resolved from each value's runtime type, so a slot
//! declared with a base type (or `Any`) is copied as the derived type it
//! actually holds.

mod copy;
mod visited;

use crate::config::ClonerConfig;
use crate::descriptor::{DescriptorCache, TypeDescriptor};
use crate::error::{Error, Result};
use crate::graph::{ObjRef, Value};
use crate::reflect::{TypeKey, TypeRegistry};
use copy::CopyContext;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use visited::VisitedMap;

/// Rust types a clone can start from and return.
///
/// The root of a clone comes back as the same Rust type it was passed as.
pub trait GraphValue: Sized {
    /// Graph value of `self`.
    fn to_value(&self) -> Value;

    /// Convert a cloned value back, failing if its shape does not fit.
    fn from_value(value: Value) -> Result<Self>;
}

impl GraphValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }

    fn from_value(value: Value) -> Result<Self> {
        Ok(value)
    }
}

impl GraphValue for ObjRef {
    fn to_value(&self) -> Value {
        Value::Ref(self.clone())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Ref(object) => Ok(object),
            other => Err(Error::RootTypeMismatch {
                expected: "ObjRef",
                found: format!("{:?}", other),
            }),
        }
    }
}

/// Deep-copies object graphs.
///
/// Cheap to clone; all handles share one [`DescriptorCache`], so a type is
/// introspected once no matter how many handles or threads clone it.
///
/// # Example
///
/// ```
/// use graph_clone::{ClassBuilder, Cloner, DeclaredType, HashMapTypeRegistry, Value};
///
/// let registry = HashMapTypeRegistry::new().with_type(
///     ClassBuilder::new("Node")
///         .member("left", "Node")
///         .member("right", "Node")
///         .member("value", DeclaredType::Any)
///         .build(),
/// );
/// let cloner = Cloner::new(registry);
///
/// let node = cloner.instantiate("Node")?;
/// node.set_field("left", &node)?;
/// node.set_field("value", 42i32)?;
///
/// let copy = cloner.deep_clone(&node)?;
/// assert!(!copy.ptr_eq(&node));
/// assert_eq!(copy.field("left")?, Value::Ref(copy.clone()));
/// assert_eq!(copy.field("value")?.as_i32(), Some(42));
/// # node.clear();
/// # copy.clear();
/// # Ok::<(), graph_clone::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Cloner {
    cache: Arc<DescriptorCache>,
    config: ClonerConfig,
    last_visited: Arc<AtomicUsize>,
}

impl Cloner {
    /// Create a cloner with the default configuration.
    pub fn new(registry: impl TypeRegistry + 'static) -> Self {
        Self::with_config(registry, ClonerConfig::default())
    }

    /// Create a cloner with an explicit configuration.
    pub fn with_config(registry: impl TypeRegistry + 'static, config: ClonerConfig) -> Self {
        let cache = DescriptorCache::new(registry).with_prewarm(config.prewarm);
        Self::from_cache(Arc::new(cache), config)
    }

    /// Create a cloner over an existing descriptor cache.
    pub fn from_cache(cache: Arc<DescriptorCache>, config: ClonerConfig) -> Self {
        Self {
            cache,
            config,
            last_visited: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn config(&self) -> &ClonerConfig {
        &self.config
    }

    /// Shared descriptor cache.
    pub fn cache(&self) -> &Arc<DescriptorCache> {
        &self.cache
    }

    /// Descriptor for `key`, built on first use.
    pub fn descriptor(&self, key: impl Into<TypeKey>) -> Result<Arc<TypeDescriptor>> {
        self.cache.descriptor(&key.into())
    }

    /// Fresh instance of a record or collection type.
    pub fn instantiate(&self, key: impl Into<TypeKey>) -> Result<ObjRef> {
        self.descriptor(key)?.instantiate(0)
    }

    /// Fresh array of `len` default elements.
    pub fn new_array(&self, key: impl Into<TypeKey>, len: usize) -> Result<ObjRef> {
        self.descriptor(key)?.instantiate(len)
    }

    /// Deep-copy the graph rooted at `original`.
    ///
    /// Atomic and absent roots come back unchanged. On error, nothing
    /// partially copied is returned.
    pub fn clone_value(&self, original: &Value) -> Result<Value> {
        let capacity = self
            .config
            .visited_capacity
            .initial(self.last_visited.load(Ordering::Relaxed));
        let mut context = CopyContext::new(
            &self.cache,
            VisitedMap::with_capacity(capacity),
            self.config.max_depth,
        );

        let result = context.copy_dynamic(original);
        let visited = context.into_visited();
        match result {
            Ok(copy) => {
                self.last_visited.store(visited.len(), Ordering::Relaxed);
                Ok(copy)
            }
            Err(err) => {
                log::debug!(
                    "[graph-clone] Clone aborted after {} objects: {}",
                    visited.len(),
                    err
                );
                visited.abandon();
                Err(err)
            }
        }
    }

    /// Deep-copy `original`, returning the same Rust type.
    pub fn deep_clone<T: GraphValue>(&self, original: &T) -> Result<T> {
        T::from_value(self.clone_value(&original.to_value())?)
    }

    /// Objects copied by the last successful call on this cloner (or any
    /// handle cloned from it).
    pub fn last_visited(&self) -> usize {
        self.last_visited.load(Ordering::Relaxed)
    }
}
