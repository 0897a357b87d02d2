use anvaya_protocol::{Field, Row, Vocabulary};

/// What the field normalizer derives from a row before any rule runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRow<'a> {
    /// Canonical color value, or the raw text when it is not a known color.
    pub color: &'a str,
    /// Columns carrying stray or doubled whitespace, in header order.
    pub whitespace_faults: Vec<&'a Field>,
}

pub fn normalize<'a>(row: &'a Row, vocab: &'a Vocabulary) -> NormalizedRow<'a> {
    NormalizedRow {
        color: vocab.canonical_color(&row.color),
        whitespace_faults: row
            .fields
            .iter()
            .filter(|f| has_whitespace_fault(&f.value))
            .collect(),
    }
}

/// Leading/trailing whitespace, or a run of two or more whitespace characters.
pub fn has_whitespace_fault(value: &str) -> bool {
    if value.trim() != value {
        return true;
    }

    let mut previous_blank = false;
    for c in value.chars() {
        let blank = c.is_whitespace();
        if blank && previous_blank {
            return true;
        }
        previous_blank = blank;
    }
    false
}
