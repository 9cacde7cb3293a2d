//! Keeping the results table inside a README up to date.

use super::table::is_header;
use super::{ReportError, Row, Table};

/// Replaces the first results table in `document` with `table`, or appends
/// it when the document has none. Everything outside the table is kept.
pub fn splice(document: &str, table: &Table) -> String {
    let lines: Vec<&str> = document.lines().collect();
    let rendered = table.to_markdown();

    let Some(start) = lines.iter().position(|line| is_header(line)) else {
        let mut out = document.to_owned();
        if !out.is_empty() && !out.ends_with("\n\n") {
            out.push_str(if out.ends_with('\n') { "\n" } else { "\n\n" });
        }
        out.push_str(&rendered);
        return out;
    };
    let end = lines[start..]
        .iter()
        .position(|line| !line.trim_start().starts_with('|'))
        .map_or(lines.len(), |len| start + len);

    let mut out = String::with_capacity(document.len() + rendered.len());
    for line in &lines[..start] {
        out.push_str(line);
        out.push('\n');
    }
    out.push_str(&rendered);
    for line in &lines[end..] {
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// The table already in `document` (empty if there is none) with `rows`
/// appended after it.
pub fn append(document: &str, rows: impl IntoIterator<Item = Row>) -> Result<Table, ReportError> {
    let mut table = match Table::from_markdown(document) {
        Ok(table) => table,
        Err(ReportError::MissingTable) => Table::new(),
        Err(e) => return Err(e),
    };
    for row in rows {
        table.push(row)?;
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::report::Timings;

    fn row(day: u8) -> Row {
        let ns = Duration::from_nanos(day as u64 * 100);
        Row {
            day,
            name: format!("Day {day}"),
            part1: "1".to_owned(),
            part2: "2".to_owned(),
            timings: Timings { parse: ns, part1: ns, part2: ns },
        }
    }

    #[test]
    fn splice_keeps_surrounding_text() {
        let first = append("", [row(1)]).unwrap();
        let doc = format!("# Intro\n\n{}\n## Notes\nkeep me\n", first.to_markdown());

        let grown = append(&doc, [row(2)]).unwrap();
        let updated = splice(&doc, &grown);

        assert!(updated.starts_with("# Intro\n\n| Day |"));
        assert!(updated.ends_with("\n## Notes\nkeep me\n"));
        assert_eq!(Table::from_markdown(&updated).unwrap().rows().len(), 2);
        assert!(updated.contains("| Total | | | | 300ns | 300ns | 300ns | 900ns |"));
    }

    #[test]
    fn splice_appends_when_absent() {
        let table = append("", [row(1)]).unwrap();
        let updated = splice("# Results", &table);
        assert!(updated.starts_with("# Results\n\n| Day |"));
    }

    #[test]
    fn append_never_rewrites_history() {
        let doc = splice("", &append("", [row(1), row(2)]).unwrap());
        assert_eq!(
            append(&doc, [row(2)]),
            Err(ReportError::OutOfOrder { previous: Some(2), found: 2 })
        );
    }
}
