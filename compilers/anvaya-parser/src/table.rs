use std::fs;
use std::path::Path;

use anvaya_protocol::{columns, Field, LineNumber, Position, Row};
use nom::{
    branch::alt,
    bytes::complete::{is_not, tag, take_till},
    character::complete::char,
    combinator::{map, value},
    multi::{fold_many0, separated_list0},
    sequence::delimited,
    IResult,
};
use tracing::{debug, trace};

use crate::error::LoadError;

/// Tab if the header has one, else comma if it has one, else decided by
/// the file extension.
pub fn sniff_delimiter(header: &str, path: Option<&Path>) -> char {
    if header.contains('\t') {
        '\t'
    } else if header.contains(',') {
        ','
    } else {
        let is_tsv = path
            .and_then(|p| p.extension())
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("tsv"));
        if is_tsv {
            '\t'
        } else {
            ','
        }
    }
}

fn quoted_field(input: &str) -> IResult<&str, String> {
    delimited(
        char('"'),
        fold_many0(
            alt((value("\"", tag("\"\"")), is_not("\""))),
            String::new,
            |mut acc, piece: &str| {
                acc.push_str(piece);
                acc
            },
        ),
        char('"'),
    )(input)
}

fn field(delimiter: char) -> impl FnMut(&str) -> IResult<&str, String> {
    move |input| {
        alt((
            quoted_field,
            map(take_till(move |c| c == delimiter), String::from),
        ))(input)
    }
}

fn record(delimiter: char) -> impl FnMut(&str) -> IResult<&str, Vec<String>> {
    move |input| separated_list0(char(delimiter), field(delimiter))(input)
}

/// Splits one physical line into fields.
pub fn parse_record(line: &str, delimiter: char, line_number: usize) -> Result<Vec<String>, LoadError> {
    match record(delimiter)(line) {
        Ok(("", fields)) => Ok(fields),
        Ok((rest, _)) => Err(LoadError::MalformedRecord {
            line: line_number,
            reason: format!("unexpected text after field: {rest:?}"),
        }),
        Err(e) => Err(LoadError::MalformedRecord {
            line: line_number,
            reason: e.to_string(),
        }),
    }
}

/// Parses a whole delimited table. The first non-empty line is the header.
///
/// Only empty lines are skipped; a whitespace-only line is still a record.
pub fn parse_table(text: &str, path: Option<&Path>) -> Result<Vec<Row>, LoadError> {
    let mut lines = text.lines().enumerate().filter(|(_, l)| !l.is_empty());

    let (header_idx, header_line) = lines.next().ok_or(LoadError::MissingHeader)?;
    let header_line = header_line.trim_start_matches('\u{feff}');
    let delimiter = sniff_delimiter(header_line, path);
    let header = parse_record(header_line, delimiter, header_idx + 1)?;

    let mut indices = [0usize; columns::REQUIRED.len()];
    for (slot, name) in indices.iter_mut().zip(columns::REQUIRED) {
        *slot = header
            .iter()
            .position(|h| h == name)
            .ok_or(LoadError::MissingColumn(name))?;
    }
    let [word, position, morph, color, role_assignment, allowed_roles] = indices;

    debug!(?delimiter, columns = header.len(), "table header parsed");

    let mut rows = Vec::new();
    for (record_idx, (line_idx, line)) in lines.enumerate() {
        let mut values = parse_record(line, delimiter, line_idx + 1)?;
        values.resize(header.len(), String::new());

        let get = |i: usize| values[i].clone();
        let row = Row {
            line: LineNumber::new(2 + record_idx as u32),
            word: get(word),
            position: Position::new(get(position)),
            morph: get(morph),
            color: get(color),
            role_assignment: get(role_assignment),
            allowed_roles: get(allowed_roles),
            fields: header
                .iter()
                .zip(&values)
                .map(|(name, value)| Field {
                    name: name.clone(),
                    value: value.clone(),
                })
                .collect(),
        };
        trace!(line = %row.line, position = %row.position, "row loaded");
        rows.push(row);
    }

    debug!(rows = rows.len(), "table loaded");
    Ok(rows)
}

pub fn load_table(path: &Path) -> Result<Vec<Row>, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_table(&text, Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "word\tanvaya_no\tmorph_in_context\tbgcolor\tkaaraka_sambandha\tpossible_relations";

    #[test]
    fn test_sniff_delimiter() {
        assert_eq!(sniff_delimiter(HEADER, None), '\t');
        assert_eq!(sniff_delimiter("a,b", None), ',');
        assert_eq!(sniff_delimiter("word", Some(Path::new("x.tsv"))), '\t');
        assert_eq!(sniff_delimiter("word", Some(Path::new("x.csv"))), ',');
    }

    #[test]
    fn test_quoted_fields() {
        let fields = parse_record(r#"a,"b,c","say ""hi""",,"#, ',', 1).unwrap();
        assert_eq!(fields, vec!["a", "b,c", r#"say "hi""#, "", ""]);
    }

    #[test]
    fn test_malformed_record() {
        let err = parse_record(r#""abc"def,x"#, ',', 4).unwrap_err();
        assert!(matches!(err, LoadError::MalformedRecord { line: 4, .. }));
    }

    #[test]
    fn test_parse_table_tsv() {
        let text = format!(
            "{HEADER}\textra\nरामः\t1.1\t{{पुं;1;एक}}\tN1\tकर्ता,1.2\tकर्ता,1.2\tnote\n\nगच्छति\t1.2\tकर्तरि;\tKP\t-\n"
        );
        let rows = parse_table(&text, None).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].line, LineNumber::new(2));
        assert_eq!(rows[0].word, "रामः");
        assert_eq!(rows[0].position, Position::new("1.1"));
        assert_eq!(rows[0].fields.len(), 7);
        assert_eq!(rows[0].fields[6].value, "note");

        // Blank lines do not count; short records are padded
        assert_eq!(rows[1].line, LineNumber::new(3));
        assert_eq!(rows[1].role_assignment, "-");
        assert_eq!(rows[1].allowed_roles, "");
    }

    #[test]
    fn test_whitespace_only_line_is_a_record() {
        let text = format!("{HEADER}\n   \nवनम्\t1.2\t{{नपुं;2;एक}}\tN2\t-\t-\n");
        let rows = parse_table(&text, None).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].line, LineNumber::new(2));
        assert_eq!(rows[0].word, "   ");
        assert_eq!(rows[1].line, LineNumber::new(3));
        assert_eq!(rows[1].word, "वनम्");
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let err = parse_table("word,anvaya_no\nक,1.1\n", None).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("morph_in_context")));
    }

    #[test]
    fn test_empty_table_is_fatal() {
        assert!(matches!(parse_table("\n\n", None), Err(LoadError::MissingHeader)));
    }

    #[test]
    fn test_load_table_from_disk() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "\u{feff}word,anvaya_no,morph_in_context,bgcolor,kaaraka_sambandha,possible_relations").unwrap();
        writeln!(file, "रामः,1.1,\"{{पुं;1;एक}}\",N1,\"कर्ता,1.2\",\"कर्ता,1.2\"").unwrap();

        let rows = load_table(file.path()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].role_assignment, "कर्ता,1.2");
        assert_eq!(rows[0].fields[0].name, "word");
    }

    #[test]
    fn test_unreadable_file() {
        let err = load_table(Path::new("/nonexistent/table.tsv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
