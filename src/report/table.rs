use std::iter::Sum;
use std::ops::Add;
use std::time::Duration;

use itertools::Itertools;

use super::{format_duration, parse_duration, ReportError};

pub const HEADER: &str =
    "| Day | Name | P1 result | P2 result | Parse time | P1 time | P2 time | Total time |";
const SEPARATOR: &str =
    "|-----|------|-----------|-----------|------------|---------|---------|------------|";
const TOTAL_LABEL: &str = "Total";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Timings {
    pub parse: Duration,
    pub part1: Duration,
    pub part2: Duration,
}

impl Timings {
    pub fn total(&self) -> Duration {
        self.parse + self.part1 + self.part2
    }

    /// Stage-wise minimum, used to keep the best of several runs.
    pub fn fastest(self, other: Self) -> Self {
        Self {
            parse: self.parse.min(other.parse),
            part1: self.part1.min(other.part1),
            part2: self.part2.min(other.part2),
        }
    }
}

impl Add for Timings {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            parse: self.parse + rhs.parse,
            part1: self.part1 + rhs.part1,
            part2: self.part2 + rhs.part2,
        }
    }
}

impl Sum for Timings {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    pub day: u8,
    pub name: String,
    pub part1: String,
    pub part2: String,
    pub timings: Timings,
}

impl Row {
    fn to_markdown(&self) -> String {
        let t = &self.timings;
        format!(
            "| {} | {} | {} | {} | {} | {} | {} | {} |",
            self.day,
            self.name,
            self.part1,
            self.part2,
            format_duration(t.parse),
            format_duration(t.part1),
            format_duration(t.part2),
            format_duration(t.total()),
        )
    }
}

/// Rows ordered by day, consecutive and without duplicates. The Total row is
/// never stored; it is derived from the rows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn last_day(&self) -> Option<u8> {
        self.rows.last().map(|row| row.day)
    }

    /// Appends a row. The first row may be any day; later rows must continue
    /// from the previous day without a gap.
    pub fn push(&mut self, row: Row) -> Result<(), ReportError> {
        let previous = self.last_day();
        if previous.is_some_and(|prev| prev.checked_add(1) != Some(row.day)) {
            return Err(ReportError::OutOfOrder { previous, found: row.day });
        }
        for answer in [&row.part1, &row.part2] {
            if answer.parse::<i128>().is_err() {
                return Err(ReportError::NonNumericAnswer { day: row.day, answer: answer.clone() });
            }
        }
        if row.name.contains('|') {
            return Err(ReportError::MalformedRow {
                line: row.to_markdown(),
                reason: "puzzle name contains '|'",
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn total(&self) -> Timings {
        self.rows.iter().map(|row| row.timings).sum()
    }

    pub fn to_markdown(&self) -> String {
        let total = self.total();
        let total_row = format!(
            "| {TOTAL_LABEL} | | | | {} | {} | {} | {} |",
            format_duration(total.parse),
            format_duration(total.part1),
            format_duration(total.part2),
            format_duration(total.total()),
        );
        [HEADER.to_owned(), SEPARATOR.to_owned()]
            .into_iter()
            .chain(self.rows.iter().map(Row::to_markdown))
            .chain([total_row])
            .join("\n")
            + "\n"
    }

    /// Finds the first results table in `document` and validates it: numeric
    /// answers, well-formed durations, consecutive days, per-row totals and
    /// a Total row matching the column sums.
    pub fn from_markdown(document: &str) -> Result<Self, ReportError> {
        let mut lines = document
            .lines()
            .map(str::trim)
            .skip_while(|line| !is_header(line));
        if lines.next().is_none() {
            return Err(ReportError::MissingTable);
        }
        match lines.next() {
            Some(line) if is_separator(line) => (),
            Some(line) => return Err(malformed(line, "expected a separator after the header")),
            None => return Err(ReportError::MissingTotal),
        }

        let mut table = Table::new();
        for line in lines.take_while(|line| line.starts_with('|')) {
            let cells = split_cells(line);
            let [day, name, part1, part2, parse, p1, p2, total] = cells[..] else {
                return Err(malformed(line, "expected 8 cells"));
            };
            let durations = [parse, p1, p2, total].map(parse_duration);
            let [parse, part1_time, part2_time, total] = durations;
            let timings = Timings { parse: parse?, part1: part1_time?, part2: part2_time? };
            let total = total?;

            if day == TOTAL_LABEL {
                verify_total(&table, timings, total)?;
                return Ok(table);
            }

            let day = day.parse().map_err(|_| malformed(line, "day is not a number"))?;
            if timings.total() != total {
                return Err(ReportError::RowTotalMismatch { day, expected: timings.total(), found: total });
            }
            table.push(Row {
                day,
                name: name.to_owned(),
                part1: part1.to_owned(),
                part2: part2.to_owned(),
                timings,
            })?;
        }
        Err(ReportError::MissingTotal)
    }
}

fn verify_total(table: &Table, found: Timings, found_total: Duration) -> Result<(), ReportError> {
    let expected = table.total();
    let columns = [
        ("parse time", expected.parse, found.parse),
        ("P1 time", expected.part1, found.part1),
        ("P2 time", expected.part2, found.part2),
        ("total time", expected.total(), found_total),
    ];
    match columns.into_iter().find(|(_, expected, found)| expected != found) {
        Some((column, expected, found)) => Err(ReportError::TotalMismatch { column, expected, found }),
        None => Ok(()),
    }
}

pub(super) fn is_header(line: &str) -> bool {
    split_cells(line.trim()).first() == Some(&"Day")
}

fn is_separator(line: &str) -> bool {
    line.starts_with('|') && line.chars().all(|c| matches!(c, '|' | '-' | ':' | ' '))
}

fn split_cells(line: &str) -> Vec<&str> {
    let inner = line.strip_prefix('|').unwrap_or(line);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner.split('|').map(str::trim).collect_vec()
}

fn malformed(line: &str, reason: &'static str) -> ReportError {
    ReportError::MalformedRow { line: line.to_owned(), reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn row(day: u8, parse: u64, p1: u64, p2: u64) -> Row {
        Row {
            day,
            name: format!("Puzzle {day}"),
            part1: (day as u64 * 7).to_string(),
            part2: "-3".to_owned(),
            timings: Timings {
                parse: Duration::from_nanos(parse),
                part1: Duration::from_nanos(p1),
                part2: Duration::from_nanos(p2),
            },
        }
    }

    #[test]
    fn total_parse_time_matches_known_sum() {
        let parse_times = [63_334, 102_500, 79_000, 141_917, 26_958, 125];
        let mut table = Table::new();
        for (i, parse) in parse_times.into_iter().enumerate() {
            table.push(row(i as u8 + 1, parse, 1, 1)).unwrap();
        }
        assert_eq!(format_duration(table.total().parse), "413.834µs");
        assert!(table.to_markdown().contains("| Total | | | | 413.834µs | 6ns | 6ns | 413.846µs |"));
    }

    #[test]
    fn markdown_has_one_line_per_row() {
        let mut table = Table::new();
        assert_eq!(table.to_markdown(), format!("{HEADER}\n{SEPARATOR}\n| Total | | | | 0ns | 0ns | 0ns | 0ns |\n"));
        table.push(row(1, 1, 2, 3)).unwrap();
        table.push(row(2, 4, 5, 6)).unwrap();
        let rendered = table.to_markdown();
        let lines = rendered.lines().collect_vec();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[2], "| 1 | Puzzle 1 | 7 | -3 | 1ns | 2ns | 3ns | 6ns |");
        assert_eq!(lines[4], "| Total | | | | 5ns | 7ns | 9ns | 21ns |");
        assert!(rendered.ends_with("|\n"));
    }

    #[test]
    fn push_rejects_gaps_duplicates_and_words() {
        let mut table = Table::new();
        table.push(row(3, 1, 1, 1)).unwrap();
        assert_eq!(
            table.push(row(3, 1, 1, 1)),
            Err(ReportError::OutOfOrder { previous: Some(3), found: 3 })
        );
        assert_eq!(
            table.push(row(5, 1, 1, 1)),
            Err(ReportError::OutOfOrder { previous: Some(3), found: 5 })
        );
        let mut wordy = row(4, 1, 1, 1);
        wordy.part2 = "twelve".to_owned();
        assert!(matches!(table.push(wordy), Err(ReportError::NonNumericAnswer { day: 4, .. })));
        table.push(row(4, 1, 1, 1)).unwrap();
        assert_eq!(table.last_day(), Some(4));
    }

    #[test]
    fn parses_table_embedded_in_document() {
        let mut table = Table::new();
        table.push(row(1, 1_500, 20, 300_000)).unwrap();
        table.push(row(2, 2, 3, 4)).unwrap();
        let doc = format!("# Results\n\nSome prose.\n\n{}\nMore prose.\n", table.to_markdown());
        assert_eq!(Table::from_markdown(&doc), Ok(table));
    }

    #[test]
    fn detects_tampered_total() {
        let mut table = Table::new();
        table.push(row(1, 10, 10, 10)).unwrap();
        let doc = table.to_markdown().replace("| Total | | | | 10ns |", "| Total | | | | 11ns |");
        assert_eq!(
            Table::from_markdown(&doc),
            Err(ReportError::TotalMismatch {
                column: "parse time",
                expected: Duration::from_nanos(10),
                found: Duration::from_nanos(11),
            })
        );
    }

    #[test]
    fn detects_bad_rows() {
        let doc = format!("{HEADER}\n{SEPARATOR}\n| 1 | A | 1 | 2 | 1ns | 1ns | 1ns | 4ns |\n| Total | | | | 1ns | 1ns | 1ns | 3ns |\n");
        assert!(matches!(Table::from_markdown(&doc), Err(ReportError::RowTotalMismatch { day: 1, .. })));

        let doc = format!("{HEADER}\n{SEPARATOR}\n| 1 | A | 1 | 2 | 1ns | 1ns | 1 parsec | 3ns |\n");
        assert!(matches!(Table::from_markdown(&doc), Err(ReportError::InvalidDuration(_))));

        let doc = format!("{HEADER}\n{SEPARATOR}\n| 1 | A | 1 | 2 | 1ns | 1ns | 1ns | 3ns |\n");
        assert_eq!(Table::from_markdown(&doc), Err(ReportError::MissingTotal));

        assert_eq!(Table::from_markdown("no table here"), Err(ReportError::MissingTable));
    }

    proptest! {
        #[test]
        fn total_row_is_the_column_sum(
            start in 1u8..20,
            stages in prop::collection::vec((0u64..5_000_000_000, 0u64..5_000_000_000, 0u64..5_000_000_000), 1..6),
        ) {
            let mut table = Table::new();
            for (i, (parse, p1, p2)) in stages.iter().copied().enumerate() {
                table.push(row(start + i as u8, parse, p1, p2)).unwrap();
            }
            let total = table.total();
            prop_assert_eq!(total.parse, table.rows().iter().map(|r| r.timings.parse).sum::<Duration>());
            prop_assert_eq!(total.part1, table.rows().iter().map(|r| r.timings.part1).sum::<Duration>());
            prop_assert_eq!(total.part2, table.rows().iter().map(|r| r.timings.part2).sum::<Duration>());
            prop_assert_eq!(Table::from_markdown(&table.to_markdown()), Ok(table));
        }
    }
}
