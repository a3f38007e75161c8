// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for descriptor construction, graph access and cloning.

use crate::descriptor::Classification;
use crate::reflect::TypeKey;
use std::fmt;

/// Errors returned by this crate.
///
/// Every variant names the offending type and, where relevant, the member.
/// None of them is transient: retrying the same operation on the same
/// registry fails the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // ========================================================================
    // Descriptor Errors
    // ========================================================================
    /// The registry cannot describe this type (unregistered, missing base,
    /// inheritance cycle).
    UnknownType(TypeKey),
    /// The type needs a constructor it does not have (parameterless for
    /// records and collections, length-taking for arrays).
    MissingConstructor {
        type_name: TypeKey,
        classification: Classification,
    },

    // ========================================================================
    // Graph Errors
    // ========================================================================
    /// An object's body does not have the shape its type descriptor expects.
    ShapeMismatch {
        type_name: TypeKey,
        expected: Classification,
        found: &'static str,
    },
    /// A record has no member with this name.
    MemberNotFound { type_name: TypeKey, member: String },
    /// Record access on an object that is not a record.
    NotARecord {
        type_name: TypeKey,
        shape: &'static str,
    },
    /// Element access on a record.
    NotASequence { type_name: TypeKey },
    /// Indexed store on an object that is not an array.
    NotAnArray { type_name: TypeKey },
    /// Append on an object that is not a collection.
    NotACollection { type_name: TypeKey },
    /// Array or collection index out of range.
    IndexOutOfBounds { index: usize, length: usize },

    // ========================================================================
    // Clone Errors
    // ========================================================================
    /// The root value cannot be returned as the requested Rust type
    /// (e.g. an absent root requested as an [`ObjRef`](crate::ObjRef)).
    RootTypeMismatch {
        expected: &'static str,
        found: String,
    },
    /// The configured recursion depth limit was reached.
    DepthLimitExceeded { limit: usize, type_name: TypeKey },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownType(type_name) => write!(f, "Unknown type: {}", type_name),
            Self::MissingConstructor {
                type_name,
                classification,
            } => write!(
                f,
                "Type {} ({}) has no accessible {} constructor",
                type_name,
                classification,
                if *classification == Classification::Array {
                    "length-taking"
                } else {
                    "parameterless"
                }
            ),
            Self::ShapeMismatch {
                type_name,
                expected,
                found,
            } => write!(
                f,
                "Shape mismatch for {}: descriptor expects {}, object holds {}",
                type_name, expected, found
            ),
            Self::MemberNotFound { type_name, member } => {
                write!(f, "Member not found: {}.{}", type_name, member)
            }
            Self::NotARecord { type_name, shape } => {
                write!(f, "{} is a {}, not a record", type_name, shape)
            }
            Self::NotASequence { type_name } => {
                write!(f, "{} is a record, not an array or collection", type_name)
            }
            Self::NotAnArray { type_name } => write!(f, "{} is not an array", type_name),
            Self::NotACollection { type_name } => {
                write!(f, "{} is not a collection", type_name)
            }
            Self::IndexOutOfBounds { index, length } => {
                write!(f, "Index out of bounds: {} >= {}", index, length)
            }
            Self::RootTypeMismatch { expected, found } => {
                write!(f, "Root type mismatch: expected {}, got {}", expected, found)
            }
            Self::DepthLimitExceeded { limit, type_name } => write!(
                f,
                "Clone depth limit {} exceeded while copying {}",
                limit, type_name
            ),
        }
    }
}

impl std::error::Error for Error {}

/// Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
