// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Cloner configuration.
//!
//! # Environment Variables
//!
//! - `GRAPH_CLONE_MAX_DEPTH`: Maximum object nesting depth per clone
//!   (default: unlimited, `0` also means unlimited)
//! - `GRAPH_CLONE_VISITED_CAPACITY`: Initial visited-map capacity, a number
//!   or `adaptive` (default: adaptive)
//! - `GRAPH_CLONE_PREWARM`: Warm declared member and element types when a
//!   descriptor is first built, `1`/`true` or `0`/`false` (default: true)

/// Initial capacity of the per-call visited map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisitedCapacity {
    /// Twice the number of objects copied by the previous call on the same
    /// cloner.
    #[default]
    Adaptive,
    /// Always this many entries.
    Fixed(usize),
}

impl VisitedCapacity {
    /// Capacity to reserve given the object count of the previous clone.
    pub fn initial(self, last_visited: usize) -> usize {
        match self {
            Self::Adaptive => last_visited.saturating_mul(2),
            Self::Fixed(capacity) => capacity,
        }
    }

    fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("adaptive") {
            return Some(Self::Adaptive);
        }
        value.parse().ok().map(Self::Fixed)
    }
}

/// Configuration for a [`Cloner`](crate::Cloner).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClonerConfig {
    /// Visited-map sizing strategy.
    pub visited_capacity: VisitedCapacity,

    /// Nesting depth at which a clone fails with
    /// [`Error::DepthLimitExceeded`](crate::Error::DepthLimitExceeded).
    pub max_depth: Option<usize>,

    /// Warm declared member and element types of new descriptors.
    pub prewarm: bool,
}

impl Default for ClonerConfig {
    fn default() -> Self {
        Self {
            visited_capacity: std::env::var("GRAPH_CLONE_VISITED_CAPACITY")
                .ok()
                .and_then(|s| VisitedCapacity::parse(&s))
                .unwrap_or_default(),
            max_depth: std::env::var("GRAPH_CLONE_MAX_DEPTH")
                .ok()
                .and_then(|s| parse_depth(&s))
                .unwrap_or(None),
            prewarm: std::env::var("GRAPH_CLONE_PREWARM")
                .ok()
                .and_then(|s| parse_flag(&s))
                .unwrap_or(true),
        }
    }
}

impl ClonerConfig {
    /// Set the maximum nesting depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Remove the depth limit.
    pub fn with_unlimited_depth(mut self) -> Self {
        self.max_depth = None;
        self
    }

    /// Set the visited-map sizing strategy.
    pub fn with_visited_capacity(mut self, capacity: VisitedCapacity) -> Self {
        self.visited_capacity = capacity;
        self
    }

    /// Enable or disable descriptor warm-up.
    pub fn with_prewarm(mut self, prewarm: bool) -> Self {
        self.prewarm = prewarm;
        self
    }
}

// `Some(None)` is an explicit "unlimited".
fn parse_depth(value: &str) -> Option<Option<usize>> {
    match value.trim().parse::<usize>().ok()? {
        0 => Some(None),
        depth => Some(Some(depth)),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
