//! Data-driven "role X requires morph feature Y" checks.
//!
//! Each [`RoleRequirement`] of the vocabulary is evaluated the same way:
//! if any trigger occurs in the role-assignment text, the morph analysis
//! must contain at least one of the listed features.

use anvaya_protocol::{contains_any, RoleRequirement};

use crate::context::{RowView, RuleContext};
use crate::diagnostics::Reporter;

pub const RULE: &str = "role-case";

/// True when the row triggers the requirement but shows none of its features.
pub fn violated(requirement: &RoleRequirement, role_assignment: &str, morph: &str) -> bool {
    contains_any(role_assignment, &requirement.triggers)
        && !contains_any(morph, &requirement.morph_any_of)
}

pub fn check(ctx: &RuleContext, view: &RowView, reporter: &mut Reporter) {
    let row = view.row;
    for requirement in &ctx.vocab.requirements {
        if violated(requirement, &row.role_assignment, &row.morph) {
            reporter.report(
                row.line,
                RULE,
                format!(
                    "check kaaraka_sambandha and morph_in_context ({} needs {})",
                    requirement.name,
                    requirement.morph_any_of.join(" or ")
                ),
            );
        }
    }
}
