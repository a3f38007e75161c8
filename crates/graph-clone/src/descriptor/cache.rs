// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Concurrent cache of type descriptors.
//!
//! The DescriptorCache ensures that registry introspection happens once per
//! type. Lookups are served from a read-locked map; misses build the
//! descriptor outside any lock and publish it under a short write lock, so
//! two threads racing on the same type may both build but all callers end up
//! sharing the first published descriptor. Failed builds are never cached.

use super::TypeDescriptor;
use crate::error::{Error, Result};
use crate::reflect::{TypeKey, TypeRegistry};
use parking_lot::RwLock;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// Cache hit/miss statistics.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LookupStats {
    /// Lookups served from the cache.
    pub hits: u64,
    /// Lookups that built and published a descriptor.
    pub misses: u64,
    /// Lookups whose build failed.
    pub failures: u64,
    /// Duration of the last successful build.
    pub last_miss_ns: u64,
}

/// Per-registry cache of [`TypeDescriptor`]s, shared by every
/// [`Cloner`](crate::Cloner) created from it.
pub struct DescriptorCache {
    registry: Arc<dyn TypeRegistry>,
    entries: RwLock<HashMap<TypeKey, Arc<TypeDescriptor>>>,
    stats: RwLock<LookupStats>,
    prewarm: bool,
}

impl DescriptorCache {
    /// Create an empty cache over `registry`.
    #[must_use]
    pub fn new(registry: impl TypeRegistry + 'static) -> Self {
        Self::from_shared(Arc::new(registry))
    }

    /// Create an empty cache over an already shared registry.
    #[must_use]
    pub fn from_shared(registry: Arc<dyn TypeRegistry>) -> Self {
        Self {
            registry,
            entries: RwLock::new(HashMap::new()),
            stats: RwLock::new(LookupStats::default()),
            prewarm: true,
        }
    }

    /// Enable or disable warming the declared member and element types of
    /// each newly published descriptor.
    #[must_use]
    pub fn with_prewarm(mut self, prewarm: bool) -> Self {
        self.prewarm = prewarm;
        self
    }

    /// Descriptor for `key`, building and publishing it on first use.
    ///
    /// Every successful call for the same key returns the same `Arc`.
    pub fn descriptor(&self, key: &TypeKey) -> Result<Arc<TypeDescriptor>> {
        if let Some(hit) = self.try_peek(key) {
            self.record_hit();
            return Ok(hit);
        }

        let start = Instant::now();
        let built = match self.build(key) {
            Ok(built) => Arc::new(built),
            Err(err) => {
                self.record_failure();
                log::debug!("[graph-clone] Cannot describe {}: {}", key, err);
                return Err(err);
            }
        };

        let (published, fresh) = match self.entries.write().entry(key.clone()) {
            Entry::Occupied(existing) => (Arc::clone(existing.get()), false),
            Entry::Vacant(slot) => (Arc::clone(slot.insert(built)), true),
        };

        if !fresh {
            // Lost the race; another thread published first.
            self.record_hit();
            return Ok(published);
        }

        self.record_miss(start);
        log::debug!(
            "[graph-clone] Described {} as {} ({} members)",
            key,
            published.classification(),
            published.members().len()
        );
        if self.prewarm {
            self.warm_dependencies(&published);
        }
        Ok(published)
    }

    /// Check if `key` has a published descriptor.
    pub fn contains(&self, key: &TypeKey) -> bool {
        self.entries.read().contains_key(key)
    }

    /// Number of published descriptors.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if nothing was published yet.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> LookupStats {
        *self.stats.read()
    }

    /// Registry backing this cache.
    pub fn registry(&self) -> &Arc<dyn TypeRegistry> {
        &self.registry
    }

    fn build(&self, key: &TypeKey) -> Result<TypeDescriptor> {
        let info = self
            .registry
            .type_info(key)
            .ok_or_else(|| Error::UnknownType(key.clone()))?;
        debug_assert_eq!(&info.key, key, "TypeInfo key must match lookup key");
        TypeDescriptor::build(info)
    }

    // Best effort: declared types may be abstract while the runtime values
    // stored in them are not.
    fn warm_dependencies(&self, descriptor: &TypeDescriptor) {
        for dependency in descriptor.declared_dependencies() {
            if self.contains(dependency) {
                continue;
            }
            if let Err(err) = self.descriptor(dependency) {
                log::trace!(
                    "[graph-clone] Skipped warming {} for {}: {}",
                    dependency,
                    descriptor.key(),
                    err
                );
            }
        }
    }

    fn try_peek(&self, key: &TypeKey) -> Option<Arc<TypeDescriptor>> {
        self.entries.read().get(key).map(Arc::clone)
    }

    fn record_hit(&self) {
        let mut stats = self.stats.write();
        stats.hits = stats.hits.saturating_add(1);
    }

    fn record_miss(&self, start: Instant) {
        let mut stats = self.stats.write();
        stats.misses = stats.misses.saturating_add(1);
        stats.last_miss_ns = start.elapsed().as_nanos() as u64;
    }

    fn record_failure(&self) {
        let mut stats = self.stats.write();
        stats.failures = stats.failures.saturating_add(1);
    }
}

impl fmt::Debug for DescriptorCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DescriptorCache")
            .field("len", &self.len())
            .field("stats", &self.stats())
            .field("prewarm", &self.prewarm)
            .finish_non_exhaustive()
    }
}
