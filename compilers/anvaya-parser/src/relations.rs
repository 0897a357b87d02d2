use anvaya_protocol::{Position, RoleAssignment, Row, Vocabulary};

/// Both relation fields of a row, split on the delimiter chosen for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowRelations {
    pub delimiter: char,
    pub assignments: Vec<RoleAssignment>,
    pub allowed: Vec<RoleAssignment>,
}

impl RowRelations {
    pub fn parse(row: &Row, vocab: &Vocabulary) -> Self {
        let delimiter = select_delimiter(&row.allowed_roles, vocab);
        Self {
            delimiter,
            assignments: parse_relations(&row.role_assignment, delimiter),
            allowed: parse_relations(&row.allowed_roles, delimiter),
        }
    }

    /// Assignments carrying a target, paired with it.
    pub fn targeted(&self) -> impl Iterator<Item = (&RoleAssignment, &Position)> {
        self.assignments
            .iter()
            .filter_map(|a| a.target.as_ref().map(|t| (a, t)))
    }

    /// Targeted assignments whose label is exactly `role`.
    pub fn with_role<'a>(
        &'a self,
        role: &'a str,
    ) -> impl Iterator<Item = (&'a RoleAssignment, &'a Position)> + 'a {
        self.targeted().filter(move |(a, _)| a.role == role)
    }
}

/// The allowed-roles field decides the delimiter for the whole row: the
/// reserved delimiter if it appears there, else the default one.
pub fn select_delimiter(allowed_roles: &str, vocab: &Vocabulary) -> char {
    if allowed_roles.contains(vocab.reserved_delimiter) {
        vocab.reserved_delimiter
    } else {
        vocab.default_delimiter
    }
}

/// Splits a relation field into `label[,target]` chunks.
///
/// A chunk that is not exactly `label,target` is kept whole as a bare label,
/// so joining the result with the same delimiter gives back the input.
pub fn parse_relations(field: &str, delimiter: char) -> Vec<RoleAssignment> {
    field.split(delimiter).map(parse_chunk).collect()
}

fn parse_chunk(chunk: &str) -> RoleAssignment {
    match chunk.split_once(',') {
        Some((role, target)) if !target.contains(',') => {
            RoleAssignment::new(role, Some(Position::new(target)))
        }
        _ => RoleAssignment::role_only(chunk),
    }
}

pub fn join_relations(assignments: &[RoleAssignment], delimiter: char) -> String {
    let mut out = String::new();
    for (i, assignment) in assignments.iter().enumerate() {
        if i > 0 {
            out.push(delimiter);
        }
        out.push_str(&assignment.to_string());
    }
    out
}

/// A tag bundle may not contain the alternative separator.
pub fn morph_is_malformed(morph: &str, vocab: &Vocabulary) -> bool {
    morph.contains(vocab.malformed_morph_marker.as_str())
}

/// The reserved delimiter belongs to the allowed-roles field only.
pub fn misuses_reserved_delimiter(role_assignment: &str, vocab: &Vocabulary) -> bool {
    role_assignment.contains(vocab.reserved_delimiter)
}
