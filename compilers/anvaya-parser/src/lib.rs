pub mod error;
pub mod normalize;
pub mod position;
pub mod relations;
pub mod table;
pub mod valid_strings;

pub use error::LoadError;
pub use normalize::{normalize, NormalizedRow};
pub use relations::{parse_relations, select_delimiter, RowRelations};
pub use table::{load_table, parse_table};
pub use valid_strings::{load_valid_strings, parse_valid_strings};
