use std::collections::HashMap;

use anvaya_protocol::{Position, Row};
use tracing::debug;

/// All rows of one annotation file, with a position index built on load.
///
/// The table is read-only once built; every rule gets it by shared reference.
#[derive(Debug, Clone, Default)]
pub struct RecordTable {
    rows: Vec<Row>,
    index: HashMap<Position, usize>,
}

impl RecordTable {
    pub fn new(rows: Vec<Row>) -> Self {
        let mut index = HashMap::with_capacity(rows.len());
        let mut duplicates = 0usize;

        for (i, row) in rows.iter().enumerate() {
            // First occurrence wins, same as a front-to-back scan
            if index.contains_key(&row.position) {
                duplicates += 1;
            } else {
                index.insert(row.position.clone(), i);
            }
        }

        debug!(rows = rows.len(), duplicates, "record table indexed");
        Self { rows, index }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Finds the row whose position equals `target`.
    pub fn resolve(&self, target: &Position) -> Option<&Row> {
        self.index.get(target).map(|&i| &self.rows[i])
    }

    /// Unindexed lookup; `resolve` must always agree with it.
    pub fn resolve_linear(&self, target: &Position) -> Option<&Row> {
        self.rows.iter().find(|row| &row.position == target)
    }

    /// Rows whose position was already taken by an earlier row.
    pub fn shadowed_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(i, row)| self.index.get(&row.position) != Some(i))
            .map(|(_, row)| row)
    }
}

impl From<Vec<Row>> for RecordTable {
    fn from(rows: Vec<Row>) -> Self {
        Self::new(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(line: u32, word: &str, position: &str) -> Row {
        Row::new(line, word, position, "", "", "-", "-")
    }

    #[test]
    fn test_resolve_uses_index() {
        let table = RecordTable::new(vec![row(2, "रामः", "1.1"), row(3, "गच्छति", "1.2")]);

        let found = table.resolve(&Position::new("1.2")).expect("1.2 should resolve");
        assert_eq!(found.word, "गच्छति");
        assert!(table.resolve(&Position::new("1.3")).is_none());
    }

    #[test]
    fn test_duplicate_positions_first_match_wins() {
        let table = RecordTable::new(vec![
            row(2, "first", "4.1"),
            row(3, "second", "4.1"),
            row(4, "other", "4.2"),
        ]);

        let target = Position::new("4.1");
        let indexed = table.resolve(&target).map(|r| r.line);
        let scanned = table.resolve_linear(&target).map(|r| r.line);

        assert_eq!(indexed, scanned);
        assert_eq!(indexed.map(u32::from), Some(2));

        let shadowed: Vec<_> = table.shadowed_rows().map(|r| r.word.as_str()).collect();
        assert_eq!(shadowed, vec!["second"]);
    }

    #[test]
    fn test_position_lookup_is_exact_text() {
        let table = RecordTable::new(vec![row(2, "a", "9.10")]);
        assert!(table.resolve(&Position::new("9.1")).is_none());
        assert!(table.resolve(&Position::new("9.10")).is_some());
    }
}
