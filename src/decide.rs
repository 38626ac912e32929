//! Decision procedures for column-type and schema equality.
//!
//! [`decide_column_type`] compares two tags by exhaustive case analysis over
//! the closed [`ColumnType`] set. [`decide_schema`] walks two schemas
//! position by position on top of it and either hands back a
//! [`SchemaWitness`] (the only way to reach the raw concatenation path in
//! [`crate::merge`]) or a [`Divergence`] naming the leftmost point where the
//! schemas stop lining up.

use std::fmt;

use serde::Serialize;

use crate::schema::{ColumnMeta, ColumnType, Schema};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Match,
    Mismatch,
}

impl Decision {
    pub fn is_match(self) -> bool {
        matches!(self, Decision::Match)
    }
}

/// Decides whether two column tags are the same tag.
///
/// Both arms spell out every ordered pair with no wildcard, so a new
/// [`ColumnType`] variant leaves this match non-exhaustive until each of its
/// pairings has been placed by hand.
pub fn decide_column_type(left: ColumnType, right: ColumnType) -> Decision {
    match (left, right) {
        (ColumnType::String, ColumnType::String)
        | (ColumnType::Integer, ColumnType::Integer)
        | (ColumnType::Float, ColumnType::Float)
        | (ColumnType::Boolean, ColumnType::Boolean)
        | (ColumnType::Date, ColumnType::Date)
        | (ColumnType::DateTime, ColumnType::DateTime)
        | (ColumnType::Guid, ColumnType::Guid) => Decision::Match,
        (
            ColumnType::String,
            ColumnType::Integer
            | ColumnType::Float
            | ColumnType::Boolean
            | ColumnType::Date
            | ColumnType::DateTime
            | ColumnType::Guid,
        )
        | (
            ColumnType::Integer,
            ColumnType::String
            | ColumnType::Float
            | ColumnType::Boolean
            | ColumnType::Date
            | ColumnType::DateTime
            | ColumnType::Guid,
        )
        | (
            ColumnType::Float,
            ColumnType::String
            | ColumnType::Integer
            | ColumnType::Boolean
            | ColumnType::Date
            | ColumnType::DateTime
            | ColumnType::Guid,
        )
        | (
            ColumnType::Boolean,
            ColumnType::String
            | ColumnType::Integer
            | ColumnType::Float
            | ColumnType::Date
            | ColumnType::DateTime
            | ColumnType::Guid,
        )
        | (
            ColumnType::Date,
            ColumnType::String
            | ColumnType::Integer
            | ColumnType::Float
            | ColumnType::Boolean
            | ColumnType::DateTime
            | ColumnType::Guid,
        )
        | (
            ColumnType::DateTime,
            ColumnType::String
            | ColumnType::Integer
            | ColumnType::Float
            | ColumnType::Boolean
            | ColumnType::Date
            | ColumnType::Guid,
        )
        | (
            ColumnType::Guid,
            ColumnType::String
            | ColumnType::Integer
            | ColumnType::Float
            | ColumnType::Boolean
            | ColumnType::Date
            | ColumnType::DateTime,
        ) => Decision::Mismatch,
    }
}

/// First point at which two schemas diverge.
///
/// Positions are zero-based column indexes into the original schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Divergence {
    /// Both schemas have a column at `position` but the tags differ.
    Tag {
        position: usize,
        left: ColumnType,
        right: ColumnType,
    },
    /// One schema ran out of columns at `position`.
    Length {
        position: usize,
        left_len: usize,
        right_len: usize,
    },
}

impl Divergence {
    pub fn position(&self) -> usize {
        match self {
            Divergence::Tag { position, .. } | Divergence::Length { position, .. } => *position,
        }
    }

    pub fn left_tag(&self) -> Option<ColumnType> {
        match self {
            Divergence::Tag { left, .. } => Some(*left),
            Divergence::Length { .. } => None,
        }
    }

    pub fn right_tag(&self) -> Option<ColumnType> {
        match self {
            Divergence::Tag { right, .. } => Some(*right),
            Divergence::Length { .. } => None,
        }
    }

    pub fn is_length_mismatch(&self) -> bool {
        matches!(self, Divergence::Length { .. })
    }
}

impl fmt::Display for Divergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Divergence::Tag {
                position,
                left,
                right,
            } => write!(
                f,
                "column {position} differs: left is {left}, right is {right}"
            ),
            Divergence::Length {
                position,
                left_len,
                right_len,
            } => write!(
                f,
                "column count differs at column {position}: left has {left_len}, right has {right_len}"
            ),
        }
    }
}

/// Proof that two schemas are structurally identical.
///
/// Only [`decide_schema`] can build one. It borrows both schemas so it
/// cannot outlive them.
#[derive(Debug, Clone, Copy)]
pub struct SchemaWitness<'a> {
    left: &'a Schema,
    right: &'a Schema,
}

impl<'a> SchemaWitness<'a> {
    /// The shared schema, taken from the left operand.
    pub fn schema(&self) -> &'a Schema {
        self.left
    }

    pub fn width(&self) -> usize {
        self.left.len()
    }

    pub(crate) fn covers(&self, left: &Schema, right: &Schema) -> bool {
        std::ptr::eq(self.left, left) && std::ptr::eq(self.right, right)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum SchemaDecision<'a> {
    Match(SchemaWitness<'a>),
    Mismatch(Divergence),
}

impl<'a> SchemaDecision<'a> {
    pub fn is_match(&self) -> bool {
        matches!(self, SchemaDecision::Match(_))
    }

    pub fn divergence(&self) -> Option<Divergence> {
        match self {
            SchemaDecision::Match(_) => None,
            SchemaDecision::Mismatch(divergence) => Some(*divergence),
        }
    }

    pub fn into_result(self) -> Result<SchemaWitness<'a>, Divergence> {
        match self {
            SchemaDecision::Match(witness) => Ok(witness),
            SchemaDecision::Mismatch(divergence) => Err(divergence),
        }
    }
}

/// Anything that carries a single column tag.
pub trait Tagged {
    fn tag(&self) -> ColumnType;
}

impl Tagged for ColumnType {
    fn tag(&self) -> ColumnType {
        *self
    }
}

impl Tagged for ColumnMeta {
    fn tag(&self) -> ColumnType {
        self.datatype
    }
}

pub fn decide_schema<'a>(left: &'a Schema, right: &'a Schema) -> SchemaDecision<'a> {
    match decide_sequence(&left.columns, &right.columns) {
        Ok(()) => SchemaDecision::Match(SchemaWitness { left, right }),
        Err(divergence) => SchemaDecision::Mismatch(divergence),
    }
}

/// Same walk as [`decide_schema`] over bare tag sequences.
pub fn decide_column_types(left: &[ColumnType], right: &[ColumnType]) -> Result<(), Divergence> {
    decide_sequence(left, right)
}

fn decide_sequence<T: Tagged>(left: &[T], right: &[T]) -> Result<(), Divergence> {
    for (position, (left_col, right_col)) in left.iter().zip(right).enumerate() {
        let (left_tag, right_tag) = (left_col.tag(), right_col.tag());
        if let Decision::Mismatch = decide_column_type(left_tag, right_tag) {
            return Err(Divergence::Tag {
                position,
                left: left_tag,
                right: right_tag,
            });
        }
    }
    if left.len() != right.len() {
        return Err(Divergence::Length {
            position: left.len().min(right.len()),
            left_len: left.len(),
            right_len: right.len(),
        });
    }
    Ok(())
}
