use anvaya_parser::position;
use anvaya_parser::relations::{misuses_reserved_delimiter, morph_is_malformed};
use anvaya_protocol::{contains_any, RoleAssignment};

use crate::context::{RowView, RuleContext};
use crate::diagnostics::Reporter;
use crate::requirements;

pub type RuleFn = fn(&RuleContext, &RowView, &mut Reporter);

/// Which rows a rule looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Every row, sentinel words included.
    AllRows,
    /// Rows with a real word.
    Annotated,
    /// Rows with a real word and no passively-expressed marker.
    Active,
}

#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub scope: Scope,
    pub check: RuleFn,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("scope", &self.scope)
            .finish()
    }
}

pub const WHITESPACE: &str = "whitespace";
pub const PREFIX_CONSISTENCY: &str = "prefix-consistency";
pub const AGENT_AGREEMENT: &str = "agent-agreement";
pub const HANGING_NODE: &str = "hanging-node";
pub const MALFORMED_MORPH: &str = "malformed-morph";
pub const RESERVED_DELIMITER: &str = "reserved-delimiter";
pub const SELF_LOOP: &str = "self-loop";
pub const INDECLINABLE_COLOR: &str = "indeclinable-color";
pub const ACTIVE_VOICE_COLOR: &str = "active-voice-color";
pub const ALLOWED_ROLE: &str = "allowed-role-correspondence";
pub const VALID_STRING: &str = "valid-string";
pub const ROLE_CASE: &str = requirements::RULE;
pub const CAUSATIVE: &str = "causative";
pub const GENDER_COLOR: &str = "gender-color";
pub const DUPLICATE_POSITION: &str = "duplicate-position";

/// The default battery, in reporting order.
pub fn battery() -> Vec<Rule> {
    vec![
        Rule { name: WHITESPACE, scope: Scope::AllRows, check: whitespace },
        Rule { name: PREFIX_CONSISTENCY, scope: Scope::Annotated, check: prefix_consistency },
        Rule { name: AGENT_AGREEMENT, scope: Scope::Active, check: agent_agreement },
        Rule { name: HANGING_NODE, scope: Scope::Active, check: hanging_node },
        Rule { name: MALFORMED_MORPH, scope: Scope::Active, check: malformed_morph },
        Rule { name: RESERVED_DELIMITER, scope: Scope::Active, check: reserved_delimiter },
        Rule { name: SELF_LOOP, scope: Scope::Active, check: self_loop },
        Rule { name: INDECLINABLE_COLOR, scope: Scope::Active, check: indeclinable_color },
        Rule { name: ACTIVE_VOICE_COLOR, scope: Scope::Active, check: active_voice_color },
        Rule { name: ALLOWED_ROLE, scope: Scope::Active, check: allowed_role_correspondence },
        Rule { name: VALID_STRING, scope: Scope::Active, check: valid_string },
        Rule { name: ROLE_CASE, scope: Scope::Active, check: requirements::check },
        Rule { name: CAUSATIVE, scope: Scope::Active, check: causative },
        Rule { name: GENDER_COLOR, scope: Scope::Active, check: gender_color },
    ]
}

/// Opt-in: positions are lookup keys, so a repeated one shadows later rows.
pub fn duplicate_position_rule() -> Rule {
    Rule {
        name: DUPLICATE_POSITION,
        scope: Scope::Annotated,
        check: duplicate_position,
    }
}

fn whitespace(_ctx: &RuleContext, view: &RowView, reporter: &mut Reporter) {
    for field in &view.normalized.whitespace_faults {
        reporter.report(
            view.row.line,
            WHITESPACE,
            format!("Extra spaces detected in field '{}'.", field.name),
        );
    }
}

/// A bound compound member (`word-` at `X.Y`) must attach somewhere under `X`.
fn prefix_consistency(ctx: &RuleContext, view: &RowView, reporter: &mut Reporter) {
    let row = view.row;
    if !position::is_nested(row.position.as_str())
        || !row.word.ends_with(ctx.vocab.bound_form_suffix.as_str())
    {
        return;
    }

    let prefix = row.position.prefix();
    let expected = format!("{prefix}.");
    let attached = view
        .relations
        .targeted()
        .any(|(_, target)| target.as_str().starts_with(&expected));

    if !attached {
        reporter.report(
            row.line,
            PREFIX_CONSISTENCY,
            format!("kaaraka_sambandha should contain {prefix}.any_number"),
        );
    }
}

fn agent_agreement(ctx: &RuleContext, view: &RowView, reporter: &mut Reporter) {
    let agent = &ctx.vocab.agent;
    for (_, target) in view.relations.with_role(&agent.role) {
        let Some(target_row) = ctx.table.resolve(target) else {
            continue;
        };
        // The first case whose tags the target lacks is reported; a satisfied
        // case falls through to the next one
        let violated = agent.by_case.iter().find(|r| {
            view.cases.has_digit(r.case) && !contains_any(&target_row.morph, &r.target_tags)
        });

        if let Some(requirement) = violated {
            reporter.report(
                view.row.line,
                AGENT_AGREEMENT,
                format!(
                    "{} in case {} needs {} on line {}",
                    agent.role,
                    requirement.case,
                    requirement.target_tags.join(" or "),
                    target_row.line
                ),
            );
        }
    }
}

fn hanging_node(ctx: &RuleContext, view: &RowView, reporter: &mut Reporter) {
    let row = view.row;
    if !ctx.vocab.is_placeholder(&row.role_assignment) {
        return;
    }

    let needle = row.position.as_str();
    let referenced = ctx
        .table
        .iter()
        .enumerate()
        .any(|(i, other)| i != view.index && other.role_assignment.contains(needle));

    if !referenced {
        reporter.report(row.line, HANGING_NODE, "Hanging node detected");
    }
}

fn malformed_morph(ctx: &RuleContext, view: &RowView, reporter: &mut Reporter) {
    if morph_is_malformed(&view.row.morph, ctx.vocab) {
        reporter.report(
            view.row.line,
            MALFORMED_MORPH,
            format!(
                "morph_in_context contains a \"{}\"",
                ctx.vocab.malformed_morph_marker
            ),
        );
    }
}

fn reserved_delimiter(ctx: &RuleContext, view: &RowView, reporter: &mut Reporter) {
    if misuses_reserved_delimiter(&view.row.role_assignment, ctx.vocab) {
        reporter.report(
            view.row.line,
            RESERVED_DELIMITER,
            format!(
                "kaaraka_sambandha contains a \"{}\"",
                ctx.vocab.reserved_delimiter
            ),
        );
    }
}

fn self_loop(_ctx: &RuleContext, view: &RowView, reporter: &mut Reporter) {
    let row = view.row;
    for _ in view
        .relations
        .assignments
        .iter()
        .filter(|a| a.targets(&row.position))
    {
        reporter.report(row.line, SELF_LOOP, "Self Loop Detected");
    }
}

fn color_mismatch(
    ctx: &RuleContext,
    view: &RowView,
    reporter: &mut Reporter,
    rule: &'static str,
    tag: &str,
    expected: &str,
) {
    if view.row.morph.contains(tag) && view.normalized.color != ctx.vocab.canonical_color(expected) {
        reporter.report(
            view.row.line,
            rule,
            format!("check Morph Analysis and Color Code ({tag} requires {expected})"),
        );
    }
}

fn indeclinable_color(ctx: &RuleContext, view: &RowView, reporter: &mut Reporter) {
    color_mismatch(
        ctx,
        view,
        reporter,
        INDECLINABLE_COLOR,
        &ctx.vocab.indeclinable_tag,
        &ctx.vocab.indeclinable_color,
    );
}

fn active_voice_color(ctx: &RuleContext, view: &RowView, reporter: &mut Reporter) {
    color_mismatch(
        ctx,
        view,
        reporter,
        ACTIVE_VOICE_COLOR,
        &ctx.vocab.active_voice_tag,
        &ctx.vocab.active_voice_color,
    );
}

/// Does `candidate` (an allowed-roles chunk) license `assignment`?
///
/// Accepted shapes for `role,target`: any candidate starting with `role`,
/// the `सुप्_role` variant, or a numbered `roleN,target`; in every case the
/// candidate must end with the target.
pub fn licenses(candidate: &str, assignment: &RoleAssignment, sup_prefix: &str) -> bool {
    let Some(target) = &assignment.target else {
        return false;
    };
    let role = assignment.role.as_str();
    let target = target.as_str();

    if !candidate.ends_with(target) {
        return false;
    }

    let numbered = candidate
        .strip_prefix(role)
        .and_then(|rest| rest.strip_suffix(target))
        .and_then(|rest| rest.strip_suffix(','))
        .is_some_and(|digits| digits.bytes().all(|b| b.is_ascii_digit()));

    candidate.starts_with(role) || candidate.starts_with(&format!("{sup_prefix}{role}")) || numbered
}

fn allowed_role_correspondence(ctx: &RuleContext, view: &RowView, reporter: &mut Reporter) {
    let row = view.row;
    let vocab = ctx.vocab;
    if vocab.is_placeholder(&row.role_assignment) {
        return;
    }

    let candidates: Vec<String> = view.relations.allowed.iter().map(|a| a.to_string()).collect();
    let unmatched = view.relations.assignments.iter().find(|assignment| {
        !candidates
            .iter()
            .any(|c| licenses(c, assignment, &vocab.sup_prefix))
    });

    let Some(unmatched) = unmatched else {
        return;
    };

    let passive_only = view.normalized.color == vocab.canonical_color(&vocab.active_voice_color)
        && row.allowed_roles == "-"
        && view
            .relations
            .assignments
            .iter()
            .any(|a| a.target.is_none() && a.role == vocab.passive_marker);
    if passive_only {
        return;
    }

    reporter.report(
        row.line,
        ALLOWED_ROLE,
        format!("kaaraka_sambandha not found in possible_relations ({unmatched})"),
    );
}

fn valid_string(ctx: &RuleContext, view: &RowView, reporter: &mut Reporter) {
    let row = view.row;
    if row.role_assignment == "-" && row.allowed_roles == "-" {
        return;
    }

    let shared = ctx
        .valid_strings
        .iter()
        .any(|v| row.role_assignment.contains(v.as_str()) && row.allowed_roles.contains(v.as_str()));

    if !shared {
        reporter.report(
            row.line,
            VALID_STRING,
            "No valid string found in kaaraka_sambandha or in possible_relations",
        );
    }
}

fn causative(ctx: &RuleContext, view: &RowView, reporter: &mut Reporter) {
    let row = view.row;
    for rule in &ctx.vocab.causatives {
        let mut present = false;

        for (_, target) in view.relations.with_role(&rule.role) {
            present = true;
            if !view.cases.has_digit(rule.target_check_case) {
                continue;
            }
            if let Some(target_row) = ctx.table.resolve(target) {
                if !target_row.morph.contains(rule.target_tag.as_str()) {
                    reporter.report(
                        row.line,
                        CAUSATIVE,
                        format!(
                            "{} needs {} on line {}",
                            rule.role, rule.target_tag, target_row.line
                        ),
                    );
                }
            }
        }

        if present && !rule.allowed_cases.iter().any(|&c| view.cases.has_digit(c)) {
            let cases: Vec<String> = rule.allowed_cases.iter().map(u8::to_string).collect();
            reporter.report(
                row.line,
                CAUSATIVE,
                format!(
                    "check kaaraka_sambandha and morph_in_context ({} needs case {})",
                    rule.role,
                    cases.join(" or ")
                ),
            );
        }
    }
}

/// Case digits following a gender marker must show up in the color value,
/// or be the case the value stands for.
fn gender_color(ctx: &RuleContext, view: &RowView, reporter: &mut Reporter) {
    let Some(pattern) = ctx.gender_pattern else {
        return;
    };
    let row = view.row;
    let color = view.normalized.color;
    let numeral = ctx.vocab.color_numeral(color);

    let mut digits = pattern
        .captures_iter(&row.morph)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .peekable();
    if digits.peek().is_none() {
        return;
    }

    let agrees = digits.any(|d| {
        color.contains(d) || numeral.is_some_and(|n| d.chars().eq(std::iter::once(n)))
    });

    if !agrees {
        reporter.report_with_details(
            row.line,
            GENDER_COLOR,
            "check the following details:",
            vec![
                format!("Morph Analysis: {}", row.morph),
                format!("bgcolor: {color}"),
            ],
        );
    }
}

fn duplicate_position(ctx: &RuleContext, view: &RowView, reporter: &mut Reporter) {
    let row = view.row;
    if let Some(first) = ctx.table.resolve(&row.position) {
        if first.line != row.line {
            reporter.report(
                row.line,
                DUPLICATE_POSITION,
                format!(
                    "anvaya_no {} already used on line {}",
                    row.position, first.line
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anvaya_protocol::Position;

    const SUP: &str = "सुप्_";

    fn assignment(role: &str, target: &str) -> RoleAssignment {
        RoleAssignment::new(role, Some(Position::new(target)))
    }

    #[test]
    fn test_licenses_exact_and_variants() {
        let a = assignment("हेतुः", "3.2");

        assert!(licenses("हेतुः,3.2", &a, SUP));
        assert!(licenses("हेतुः3,3.2", &a, SUP));
        assert!(licenses("सुप्_हेतुः,3.2", &a, SUP));
        assert!(!licenses("हेतुः,3.3", &a, SUP));
        assert!(!licenses("कर्म,3.2", &a, SUP));
    }

    #[test]
    fn test_role_only_assignment_never_licensed() {
        let a = RoleAssignment::role_only("अभिहित");
        assert!(!licenses("अभिहित", &a, SUP));
    }

    #[test]
    fn test_battery_order_is_stable() {
        let names: Vec<_> = battery().iter().map(|r| r.name).collect();
        assert_eq!(names.first(), Some(&WHITESPACE));
        assert_eq!(names.last(), Some(&GENDER_COLOR));
        assert_eq!(names.len(), 14);
    }
}
