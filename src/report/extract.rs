//! Field extraction and normalisation helpers shared by the report grammars.

use std::{ops::Range, str::FromStr, sync::LazyLock};

use regex::{Captures, Regex};

use super::{Error, Line, ReportKind};

static FIELD_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("valid separator pattern"));

/// Capitalises every whitespace-separated word and collapses runs of
/// whitespace to a single space.
///
/// The first letter of each word is upper-cased and the rest lower-cased, so
/// `"ALGORITMOS E PROGRAMAÇÃO"` becomes `"Algoritmos E Programação"`.
#[must_use]
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Splits a line into fields separated by two or more whitespace
/// characters.
///
/// Each field is returned with the character column it starts at, so callers
/// can tell apart fields that share a line but belong to different printed
/// columns.
#[must_use]
pub fn columns(text: &str) -> Vec<(usize, &str)> {
    let mut fields = Vec::new();
    let mut start = 0;
    let mut push = |from: usize, to: usize| {
        let field = &text[from..to];
        let trimmed = field.trim_start();
        let offset = from + (field.len() - trimmed.len());
        let trimmed = trimmed.trim_end();
        if !trimmed.is_empty() {
            fields.push((text[..offset].chars().count(), trimmed));
        }
    };

    for separator in FIELD_SEPARATOR.find_iter(text) {
        push(start, separator.start());
        start = separator.end();
    }
    push(start, text.len());
    fields
}

/// The characters of a line between two character offsets, trimmed.
///
/// Offsets beyond the end of the line are clamped, so a short line yields an
/// empty slice rather than an error.
#[must_use]
pub fn slice(text: &str, columns: Range<usize>) -> &str {
    let byte_at = |column: usize| {
        text.char_indices()
            .nth(column)
            .map_or(text.len(), |(byte, _)| byte)
    };
    let start = byte_at(columns.start);
    let end = byte_at(columns.end).max(start);
    text[start..end].trim()
}

/// Matches a line against the pattern of its role.
///
/// # Errors
///
/// Returns [`Error::FieldExtraction`] if the pattern does not match.
pub fn captures<'t>(
    kind: ReportKind,
    line: &Line<'t>,
    pattern: &Regex,
    expected: &'static str,
) -> Result<Captures<'t>, Error> {
    pattern
        .captures(line.text)
        .ok_or_else(|| Error::field(kind, line.index, expected, line.text.trim()))
}

/// The text of a capture group, trimmed, or an empty string if the group did
/// not participate in the match.
#[must_use]
pub fn group<'t>(captures: &Captures<'t>, index: usize) -> &'t str {
    captures.get(index).map_or("", |m| m.as_str().trim())
}

/// Parses a field into a number or other value type.
///
/// # Errors
///
/// Returns [`Error::FieldExtraction`] if the text does not parse.
pub fn parse_field<T: FromStr>(
    kind: ReportKind,
    line: &Line<'_>,
    text: &str,
    expected: &'static str,
) -> Result<T, Error> {
    text.trim()
        .parse()
        .map_err(|_| Error::field(kind, line.index, expected, text.trim()))
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("ALGORITMOS E PROGRAMAÇÃO", "Algoritmos E Programação")]
    #[test_case("  cálculo   1 ", "Cálculo 1")]
    #[test_case("ÉTICA", "Ética")]
    #[test_case("", "")]
    fn title_case_capitalises_each_word(input: &str, expected: &str) {
        assert_eq!(title_case(input), expected);
    }

    #[test]
    fn columns_report_start_positions() {
        let fields = columns("  A  PARA CALOUROS   40  Diurno");
        assert_eq!(
            fields,
            vec![(2, "A"), (5, "PARA CALOUROS"), (21, "40"), (25, "Diurno")]
        );
    }

    #[test]
    fn columns_count_characters_not_bytes() {
        let fields = columns("Período  2016/1");
        assert_eq!(fields, vec![(0, "Período"), (9, "2016/1")]);
    }

    #[test]
    fn columns_of_blank_line_is_empty() {
        assert!(columns("     ").is_empty());
    }

    #[test_case("0123456789", 2..5, "234")]
    #[test_case("0123", 2..10, "23"; "end beyond line")]
    #[test_case("0123", 6..10, ""; "start beyond line")]
    #[test_case("àéíõú", 1..3, "éí"; "multibyte")]
    fn slice_by_character_offsets(text: &str, range: Range<usize>, expected: &str) {
        assert_eq!(slice(text, range), expected);
    }

    #[test]
    fn parse_field_reports_the_offending_text() {
        let line = Line::new(3, "  A  TURMA  quarenta  Diurno");
        let error = parse_field::<u32>(ReportKind::Offering, &line, " quarenta ", "seat count")
            .unwrap_err();
        assert_eq!(
            error,
            Error::FieldExtraction {
                kind: ReportKind::Offering,
                line: 3,
                expected: "seat count",
                found: "quarenta".to_string(),
            }
        );
    }
}
