use anvaya_protocol::Vocabulary;
use anvaya_table::RecordTable;
use regex::Regex;
use thiserror::Error;
use tracing::{debug, trace};

use crate::context::{RowView, RuleContext};
use crate::diagnostics::{Diagnostic, Reporter};
use crate::rules::{self, Rule, Scope};

#[derive(Debug, Error)]
pub enum SolverError {
    #[error("invalid gender marker pattern: {0}")]
    GenderPattern(#[from] regex::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckOptions {
    /// Also report rows whose position repeats an earlier row's.
    pub report_duplicate_positions: bool,
}

/// Runs the rule battery over record tables.
#[derive(Debug)]
pub struct Checker {
    vocab: Vocabulary,
    valid_strings: Vec<String>,
    gender_pattern: Option<Regex>,
    rules: Vec<Rule>,
}

impl Checker {
    pub fn new(vocab: Vocabulary, valid_strings: Vec<String>) -> Result<Self, SolverError> {
        Self::with_options(vocab, valid_strings, CheckOptions::default())
    }

    pub fn with_options(
        vocab: Vocabulary,
        valid_strings: Vec<String>,
        options: CheckOptions,
    ) -> Result<Self, SolverError> {
        let gender_pattern = gender_pattern(&vocab.gender_markers)?;

        let mut rules = rules::battery();
        if options.report_duplicate_positions {
            rules.push(rules::duplicate_position_rule());
        }

        Ok(Self {
            vocab,
            valid_strings,
            gender_pattern,
            rules,
        })
    }

    /// Keeps only the named rules, for running checks in isolation.
    pub fn only(mut self, names: &[&str]) -> Self {
        self.rules.retain(|r| names.contains(&r.name));
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Checks every row in table order. The table is never modified.
    pub fn check(&self, table: &RecordTable) -> Vec<Diagnostic> {
        let ctx = self.context(table);
        let mut reporter = Reporter::new();

        for index in 0..table.len() {
            self.check_row_into(&ctx, index, &mut reporter);
        }

        debug!(rows = table.len(), violations = reporter.len(), "table checked");
        reporter.into_diagnostics()
    }

    /// Diagnostics for a single row, still resolving against the whole table.
    pub fn check_row(&self, table: &RecordTable, index: usize) -> Vec<Diagnostic> {
        let ctx = self.context(table);
        let mut reporter = Reporter::new();
        if index < table.len() {
            self.check_row_into(&ctx, index, &mut reporter);
        }
        reporter.into_diagnostics()
    }

    fn context<'a>(&'a self, table: &'a RecordTable) -> RuleContext<'a> {
        RuleContext {
            table,
            vocab: &self.vocab,
            valid_strings: &self.valid_strings,
            gender_pattern: self.gender_pattern.as_ref(),
        }
    }

    fn check_row_into(&self, ctx: &RuleContext, index: usize, reporter: &mut Reporter) {
        let row = &ctx.table.rows()[index];
        let view = RowView::new(index, row, &self.vocab);
        let sentinel = view.is_sentinel(&self.vocab);
        let passive = view.is_passive(&self.vocab);

        for rule in &self.rules {
            let applies = match rule.scope {
                Scope::AllRows => true,
                Scope::Annotated => !sentinel,
                Scope::Active => !sentinel && !passive,
            };
            if applies {
                trace!(line = %row.line, rule = rule.name, "applying rule");
                (rule.check)(ctx, &view, reporter);
            }
        }
    }
}

/// `(?:पुं;|स्त्री;|नपुं;)(\d+);` for the default markers.
fn gender_pattern(markers: &[String]) -> Result<Option<Regex>, SolverError> {
    if markers.is_empty() {
        return Ok(None);
    }
    let alternatives: Vec<String> = markers.iter().map(|m| regex::escape(m)).collect();
    let pattern = format!(r"(?:{})(\d+);", alternatives.join("|"));
    Ok(Some(Regex::new(&pattern)?))
}
