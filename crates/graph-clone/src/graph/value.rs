// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Dynamic value types.

use crate::graph::ObjRef;
use crate::reflect::{PrimitiveKind, TypeKey};
use std::sync::Arc;

/// A value stored in a member, array slot or collection.
///
/// Atomic variants are immutable; `Str` shares its buffer. `Ref` points to a
/// heap object and compares by identity.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absence of a value.
    #[default]
    Null,

    // Atomics
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Char(char),
    Str(Arc<str>),

    /// Reference to an object.
    Ref(ObjRef),
}

impl Value {
    /// Check if value is absent.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Atomic kind of this value, if it is atomic.
    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        let kind = match self {
            Self::Null | Self::Ref(_) => return None,
            Self::Bool(_) => PrimitiveKind::Bool,
            Self::U8(_) => PrimitiveKind::U8,
            Self::U16(_) => PrimitiveKind::U16,
            Self::U32(_) => PrimitiveKind::U32,
            Self::U64(_) => PrimitiveKind::U64,
            Self::I8(_) => PrimitiveKind::I8,
            Self::I16(_) => PrimitiveKind::I16,
            Self::I32(_) => PrimitiveKind::I32,
            Self::I64(_) => PrimitiveKind::I64,
            Self::F32(_) => PrimitiveKind::F32,
            Self::F64(_) => PrimitiveKind::F64,
            Self::Char(_) => PrimitiveKind::Char,
            Self::Str(_) => PrimitiveKind::String,
        };
        Some(kind)
    }

    /// Runtime type of the value (`None` when absent).
    ///
    /// For references this is the referenced object's own type, not the
    /// declared type of the slot holding it.
    pub fn runtime_type(&self) -> Option<TypeKey> {
        match self {
            Self::Null => None,
            Self::Ref(object) => Some(object.type_key()),
            atomic => atomic.primitive_kind().map(TypeKey::primitive),
        }
    }

    /// Try to get as object reference.
    pub fn as_object(&self) -> Option<&ObjRef> {
        match self {
            Self::Ref(object) => Some(object),
            _ => None,
        }
    }

    /// Try to get as bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as i32.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::I32(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::F64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v),
            _ => None,
        }
    }

    /// Widen any integer value to i64 (u64 values above `i64::MAX` excluded).
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::U8(v) => Some(i64::from(*v)),
            Self::U16(v) => Some(i64::from(*v)),
            Self::U32(v) => Some(i64::from(*v)),
            Self::U64(v) => i64::try_from(*v).ok(),
            Self::I8(v) => Some(i64::from(*v)),
            Self::I16(v) => Some(i64::from(*v)),
            Self::I32(v) => Some(i64::from(*v)),
            Self::I64(v) => Some(*v),
            _ => None,
        }
    }
}

// Conversion traits
macro_rules! impl_from_atomic {
    ($ty:ty, $variant:ident) => {
        impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Self::$variant(v)
            }
        }
    };
}

impl_from_atomic!(bool, Bool);
impl_from_atomic!(u8, U8);
impl_from_atomic!(u16, U16);
impl_from_atomic!(u32, U32);
impl_from_atomic!(u64, U64);
impl_from_atomic!(i8, I8);
impl_from_atomic!(i16, I16);
impl_from_atomic!(i32, I32);
impl_from_atomic!(i64, I64);
impl_from_atomic!(f32, F32);
impl_from_atomic!(f64, F64);
impl_from_atomic!(char, Char);
impl_from_atomic!(Arc<str>, Str);
impl_from_atomic!(ObjRef, Ref);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(Arc::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(Arc::from(v))
    }
}

impl From<&ObjRef> for Value {
    fn from(v: &ObjRef) -> Self {
        Self::Ref(v.clone())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}
