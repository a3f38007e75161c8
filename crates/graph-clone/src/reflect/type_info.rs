// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Runtime type information reported by a [`TypeRegistry`](super::TypeRegistry).

use crate::graph::{ObjectBody, Value};
use std::fmt;
use std::sync::Arc;

/// Identity of a registered type.
///
/// Cheap to clone (`Arc<str>`), hashed by name.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeKey(Arc<str>);

impl TypeKey {
    /// Create a key from a type name.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// Type name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key of a builtin primitive type.
    pub fn primitive(kind: PrimitiveKind) -> Self {
        Self::new(kind.name())
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({})", self.0)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TypeKey {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl From<&TypeKey> for TypeKey {
    fn from(key: &TypeKey) -> Self {
        key.clone()
    }
}

/// Atomic kinds. Values of these kinds are immutable and shared between
/// original and copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Bool,
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Char,
    String,
}

impl PrimitiveKind {
    /// Every primitive kind, in registration order.
    pub const ALL: [PrimitiveKind; 13] = [
        Self::Bool,
        Self::U8,
        Self::U16,
        Self::U32,
        Self::U64,
        Self::I8,
        Self::I16,
        Self::I32,
        Self::I64,
        Self::F32,
        Self::F64,
        Self::Char,
        Self::String,
    ];

    /// Registered type name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Char => "char",
            Self::String => "string",
        }
    }

    /// Value a freshly constructed member of this kind holds.
    ///
    /// Strings are references, so they start absent.
    pub fn default_value(self) -> Value {
        match self {
            Self::Bool => Value::Bool(false),
            Self::U8 => Value::U8(0),
            Self::U16 => Value::U16(0),
            Self::U32 => Value::U32(0),
            Self::U64 => Value::U64(0),
            Self::I8 => Value::I8(0),
            Self::I16 => Value::I16(0),
            Self::I32 => Value::I32(0),
            Self::I64 => Value::I64(0),
            Self::F32 => Value::F32(0.0),
            Self::F64 => Value::F64(0.0),
            Self::Char => Value::Char('\0'),
            Self::String => Value::Null,
        }
    }
}

/// Static type of a member or element slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeclaredType {
    /// Polymorphic slot; any value may be stored.
    Any,
    /// Slot declared with a registered type (or one of its derived types).
    Named(TypeKey),
}

impl DeclaredType {
    /// Named key, if any.
    pub fn key(&self) -> Option<&TypeKey> {
        match self {
            Self::Any => None,
            Self::Named(key) => Some(key),
        }
    }
}

impl From<&str> for DeclaredType {
    fn from(name: &str) -> Self {
        Self::Named(TypeKey::new(name))
    }
}

impl From<TypeKey> for DeclaredType {
    fn from(key: TypeKey) -> Self {
        Self::Named(key)
    }
}

impl From<PrimitiveKind> for DeclaredType {
    fn from(kind: PrimitiveKind) -> Self {
        Self::Named(TypeKey::primitive(kind))
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::Named(key) => write!(f, "{key}"),
        }
    }
}

/// Per-member cloning policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClonePolicy {
    /// Recursively cloned into an independent copy.
    #[default]
    Deep,
    /// Reference copied verbatim.
    Shallow,
    /// Never read nor written; the copy keeps its constructed value.
    Ignore,
}

/// Member visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

/// Member accessors available to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Access {
    #[default]
    ReadWrite,
    ReadOnly,
}

/// One field or property of a record type.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberInfo {
    /// Member name.
    pub name: Arc<str>,
    /// Declared (static) type.
    pub declared: DeclaredType,
    /// Visibility.
    pub visibility: Visibility,
    /// Accessors.
    pub access: Access,
    /// Policy annotation; `None` means unannotated.
    pub policy: Option<ClonePolicy>,
    /// Value assigned by the default constructor (overrides the declared type's default).
    pub initial: Option<Value>,
}

impl MemberInfo {
    /// Public read/write member without annotation.
    pub fn new(name: impl AsRef<str>, declared: impl Into<DeclaredType>) -> Self {
        Self {
            name: Arc::from(name.as_ref()),
            declared: declared.into(),
            visibility: Visibility::Public,
            access: Access::ReadWrite,
            policy: None,
            initial: None,
        }
    }

    /// Annotate with an explicit policy.
    pub fn with_policy(mut self, policy: ClonePolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Mark as read-only (no setter).
    pub fn read_only(mut self) -> Self {
        self.access = Access::ReadOnly;
        self
    }

    /// Mark as private.
    pub fn private(mut self) -> Self {
        self.visibility = Visibility::Private;
        self
    }

    /// Value the default constructor assigns.
    pub fn with_initial(mut self, value: impl Into<Value>) -> Self {
        self.initial = Some(value.into());
        self
    }

    /// Public with both getter and setter.
    pub fn is_accessible(&self) -> bool {
        self.visibility == Visibility::Public && self.access == Access::ReadWrite
    }

    /// Policy in effect (unannotated members are deep-copied).
    pub fn effective_policy(&self) -> ClonePolicy {
        self.policy.unwrap_or_default()
    }
}

/// Constructs an empty object body.
#[derive(Clone)]
pub enum Constructor {
    /// Parameterless constructor (records and collections).
    Default(Arc<dyn Fn() -> ObjectBody + Send + Sync>),
    /// Length-taking constructor (arrays).
    WithLength(Arc<dyn Fn(usize) -> ObjectBody + Send + Sync>),
}

impl Constructor {
    /// Wrap a parameterless constructor.
    pub fn default_fn(f: impl Fn() -> ObjectBody + Send + Sync + 'static) -> Self {
        Self::Default(Arc::new(f))
    }

    /// Wrap a length-taking constructor.
    pub fn with_length_fn(f: impl Fn(usize) -> ObjectBody + Send + Sync + 'static) -> Self {
        Self::WithLength(Arc::new(f))
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default(_) => f.write_str("Constructor::Default"),
            Self::WithLength(_) => f.write_str("Constructor::WithLength"),
        }
    }
}

/// Everything the registry knows about one type.
#[derive(Debug, Clone)]
pub struct TypeInfo {
    /// Type identity.
    pub key: TypeKey,
    /// Set for atomic types.
    pub primitive: Option<PrimitiveKind>,
    /// Element type, set for array types.
    pub array_element: Option<DeclaredType>,
    /// Element type, set for types that can be counted, iterated and appended to.
    pub collection_element: Option<DeclaredType>,
    /// Members in layout order (base members first).
    pub members: Vec<MemberInfo>,
    /// Constructor, if the type has an accessible one.
    pub constructor: Option<Constructor>,
    /// Direct base type.
    pub base: Option<TypeKey>,
}

impl TypeInfo {
    /// Info for an atomic type.
    pub fn primitive(kind: PrimitiveKind) -> Self {
        Self {
            key: TypeKey::primitive(kind),
            primitive: Some(kind),
            array_element: None,
            collection_element: None,
            members: Vec::new(),
            constructor: None,
            base: None,
        }
    }
}
