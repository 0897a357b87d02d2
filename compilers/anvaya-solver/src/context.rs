use anvaya_parser::{normalize, NormalizedRow, RowRelations};
use anvaya_protocol::{CaseMarks, Row, Vocabulary};
use anvaya_table::RecordTable;
use regex::Regex;

/// Read-only state shared by every rule invocation for one table.
pub struct RuleContext<'a> {
    pub table: &'a RecordTable,
    pub vocab: &'a Vocabulary,
    pub valid_strings: &'a [String],
    pub gender_pattern: Option<&'a Regex>,
}

/// A row together with everything derived from it before the rules run.
pub struct RowView<'a> {
    /// Position of the row in table order.
    pub index: usize,
    pub row: &'a Row,
    pub relations: RowRelations,
    pub normalized: NormalizedRow<'a>,
    pub cases: CaseMarks,
}

impl<'a> RowView<'a> {
    pub fn new(index: usize, row: &'a Row, vocab: &'a Vocabulary) -> Self {
        Self {
            index,
            row,
            relations: RowRelations::parse(row, vocab),
            normalized: normalize(row, vocab),
            cases: CaseMarks::scan(&row.morph),
        }
    }

    pub fn is_sentinel(&self, vocab: &Vocabulary) -> bool {
        vocab.is_sentinel(&self.row.word)
    }

    /// The assignment is expressed by another mechanism; agreement rules do not apply.
    pub fn is_passive(&self, vocab: &Vocabulary) -> bool {
        self.row.role_assignment.contains(vocab.passive_marker.as_str())
    }
}
