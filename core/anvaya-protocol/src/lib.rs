#![no_std]

extern crate alloc;

// Enable std if the feature is active (for tests/tools)
#[cfg(feature = "std")]
extern crate std;

pub mod ids;
pub mod morphology;

// Re-export core types for convenience
pub use ids::LineNumber;
pub use morphology::*;

pub mod model;
pub use model::*;

pub mod vocabulary;
pub use vocabulary::*;

/// Column names of the annotation table.
pub mod columns {
    pub const WORD: &str = "word";
    pub const POSITION: &str = "anvaya_no";
    pub const MORPH: &str = "morph_in_context";
    pub const COLOR: &str = "bgcolor";
    pub const ROLE_ASSIGNMENT: &str = "kaaraka_sambandha";
    pub const ALLOWED_ROLES: &str = "possible_relations";

    pub const REQUIRED: [&str; 6] = [
        WORD,
        POSITION,
        MORPH,
        COLOR,
        ROLE_ASSIGNMENT,
        ALLOWED_ROLES,
    ];
}
