// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! In-memory object graphs.
//!
//! Atomic values are stored inline in [`Value`]; everything else lives in a
//! heap [`Object`] reached through an [`ObjRef`]. Several slots may hold the
//! same `ObjRef`, and an object may reach itself, so graphs can share
//! sub-objects and contain cycles.

mod object;
mod value;

pub use object::{Collection, ObjRef, Object, ObjectBody, RecordBody};
pub use value::Value;
