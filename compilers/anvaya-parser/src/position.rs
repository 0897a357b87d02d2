use nom::{
    character::complete::{char, digit1},
    combinator::all_consuming,
    multi::separated_list1,
    IResult,
};

fn dotted(input: &str) -> IResult<&str, Vec<&str>> {
    all_consuming(separated_list1(char('.'), digit1))(input)
}

/// Numeric components of a dotted index, or `None` if it is not one.
pub fn components(position: &str) -> Option<Vec<&str>> {
    dotted(position).ok().map(|(_, parts)| parts)
}

/// `X.Y` or `X.Y.Z`: a member nested under sentence-level index `X`.
pub fn is_nested(position: &str) -> bool {
    matches!(components(position), Some(parts) if (2..=3).contains(&parts.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_components() {
        assert_eq!(components("9.1.2"), Some(vec!["9", "1", "2"]));
        assert_eq!(components("12"), Some(vec!["12"]));
        assert_eq!(components("9..1"), None);
        assert_eq!(components("9.1a"), None);
        assert_eq!(components(""), None);
    }

    #[test]
    fn test_nested_depth() {
        assert!(is_nested("3.1"));
        assert!(is_nested("3.1.4"));
        assert!(!is_nested("3"));
        assert!(!is_nested("3.1.4.1"));
        assert!(!is_nested("-"));
    }
}
