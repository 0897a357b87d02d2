use crate::ids::LineNumber;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Dotted hierarchical index of a token (`9.1`, `9.1.2`).
///
/// Kept as text: equality is plain string equality, so `9.10` and `9.1`
/// never collide and malformed indices still act as lookup keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct Position(String);

impl Position {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Leading component (`9` for `9.1.2`).
    pub fn prefix(&self) -> &str {
        self.0.split('.').next().unwrap_or_default()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for Position {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl From<&str> for Position {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// One parsed `label[,target]` chunk of a relation field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct RoleAssignment {
    pub role: String,
    pub target: Option<Position>,
}

impl RoleAssignment {
    pub fn new(role: impl Into<String>, target: Option<Position>) -> Self {
        Self {
            role: role.into(),
            target,
        }
    }

    pub fn role_only(role: impl Into<String>) -> Self {
        Self::new(role, None)
    }

    pub fn targets(&self, position: &Position) -> bool {
        self.target.as_ref() == Some(position)
    }
}

impl fmt::Display for RoleAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.target {
            Some(target) => write!(f, "{},{}", self.role, target),
            None => f.write_str(&self.role),
        }
    }
}

/// A raw `(column name, value)` pair, kept in header order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct Field {
    pub name: String,
    pub value: String,
}

/// One annotated token of a sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct Row {
    pub line: LineNumber,
    pub word: String,
    pub position: Position,
    pub morph: String,
    pub color: String,
    pub role_assignment: String,
    pub allowed_roles: String,
    /// Every column of the source record, including the ones above.
    pub fields: Vec<Field>,
}

impl Row {
    /// Builds a row with only the checked columns populated; `fields`
    /// mirrors them under the standard column names.
    pub fn new(
        line: u32,
        word: &str,
        position: &str,
        morph: &str,
        color: &str,
        role_assignment: &str,
        allowed_roles: &str,
    ) -> Self {
        let fields = [
            (crate::columns::WORD, word),
            (crate::columns::POSITION, position),
            (crate::columns::MORPH, morph),
            (crate::columns::COLOR, color),
            (crate::columns::ROLE_ASSIGNMENT, role_assignment),
            (crate::columns::ALLOWED_ROLES, allowed_roles),
        ]
        .into_iter()
        .map(|(name, value)| Field {
            name: name.into(),
            value: value.into(),
        })
        .collect();

        Self {
            line: LineNumber(line),
            word: word.into(),
            position: Position::new(position),
            morph: morph.into(),
            color: color.into(),
            role_assignment: role_assignment.into(),
            allowed_roles: allowed_roles.into(),
            fields,
        }
    }
}
