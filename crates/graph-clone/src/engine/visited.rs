// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-call mapping from source objects to their copies.

use crate::graph::ObjRef;
use std::collections::HashMap;

/// Identity-keyed map of the objects copied so far in one clone call.
///
/// Holds a handle to each source so no source address is recycled while the
/// map is alive.
#[derive(Debug, Default)]
pub(crate) struct VisitedMap {
    copies: HashMap<usize, (ObjRef, ObjRef)>,
}

impl VisitedMap {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            copies: HashMap::with_capacity(capacity),
        }
    }

    /// Copy already made for `source`.
    pub(crate) fn get(&self, source: &ObjRef) -> Option<&ObjRef> {
        self.copies.get(&source.addr()).map(|(_, copy)| copy)
    }

    /// Record `copy` as the copy of `source`. Must happen before the copy is
    /// populated so cycles back to `source` resolve to it.
    pub(crate) fn insert(&mut self, source: &ObjRef, copy: &ObjRef) {
        let previous = self
            .copies
            .insert(source.addr(), (source.clone(), copy.clone()));
        debug_assert!(previous.is_none(), "source copied twice in one call");
    }

    pub(crate) fn len(&self) -> usize {
        self.copies.len()
    }

    /// Discard a failed clone: empties every partially built copy so cycles
    /// among them do not keep them alive.
    pub(crate) fn abandon(self) {
        for (_, copy) in self.copies.into_values() {
            copy.clear();
        }
    }
}
