//! CSV rendering for data exports.
//!
//! Output is UTF-8 with a BOM so spreadsheet tools detect the encoding, and
//! fields containing commas, quotes, or newlines are quoted with doubled
//! inner quotes.

/// UTF-8 byte order mark prepended to every export.
pub const UTF8_BOM: &str = "\u{feff}";

/// Escapes a single CSV field.
pub fn escape_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}

/// Renders a header row plus data rows into a complete CSV document.
pub fn render(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut out = String::from(UTF8_BOM);
    out.push_str(
        &headers
            .iter()
            .map(|h| escape_field(h))
            .collect::<Vec<_>>()
            .join(","),
    );
    out.push('\n');
    for row in rows {
        out.push_str(
            &row.iter()
                .map(|field| escape_field(field))
                .collect::<Vec<_>>()
                .join(","),
        );
        out.push('\n');
    }
    out
}

/// Builds the export filename, e.g. `users_2025-03-01.csv`.
pub fn filename(kind: &str, date: chrono::NaiveDate) -> String {
    format!("{kind}_{}.csv", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_field_is_untouched() {
        assert_eq!(escape_field("hello"), "hello");
    }

    #[test]
    fn test_comma_field_is_quoted() {
        assert_eq!(escape_field("a,b"), "\"a,b\"");
    }

    #[test]
    fn test_quote_field_is_doubled_and_quoted() {
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_newline_field_is_quoted() {
        assert_eq!(escape_field("line1\nline2"), "\"line1\nline2\"");
    }

    #[test]
    fn test_render_starts_with_bom() {
        let doc = render(&["a", "b"], &[]);
        assert!(doc.starts_with(UTF8_BOM));
        assert_eq!(&doc[UTF8_BOM.len()..], "a,b\n");
    }

    #[test]
    fn test_render_rows() {
        let doc = render(
            &["name", "note"],
            &[vec!["kim".to_owned(), "a,b".to_owned()]],
        );
        assert!(doc.ends_with("name,note\nkim,\"a,b\"\n"));
    }

    #[test]
    fn test_filename_format() {
        let date = chrono::NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(filename("users", date), "users_2025-03-01.csv");
    }
}
