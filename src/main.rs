use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context};
use clap::{ArgAction, Parser, Subcommand};
use tracing::info;

use aoc2023::config::{Config, DEFAULT_INPUT_DIR};
use aoc2023::report::{format_duration, readme, Table};
use aoc2023::runner::{self, Part};

#[derive(Parser, Debug)]
#[command(name = "aoc2023")]
#[command(version)]
#[command(about = "Advent of Code 2023 solutions with a timed results table", long_about = None)]
struct Cli {
    /// Directory holding dayN.in and dayNtestT.in files
    #[arg(long, value_name = "DIR", env = "AOC_INPUTS", default_value = DEFAULT_INPUT_DIR, global = true)]
    inputs: PathBuf,

    /// More logging on stderr (-v for info, -vv for debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print one answer: DAY [TEST] PART
    Solve {
        day: u8,
        /// Optional example number followed by the part (1/2 or a/b)
        #[arg(num_args = 1..=2, required = true, value_names = ["TEST", "PART"])]
        args: Vec<String>,
    },
    /// Time a range of days and print the results table
    Bench {
        #[arg(long, default_value_t = 1)]
        from: u8,
        #[arg(long, default_value_t = 25)]
        to: u8,
        /// Keep the fastest of this many runs per stage
        #[arg(long, default_value_t = 1)]
        runs: u32,
        /// Append the new rows to the table in this markdown file
        #[arg(long, value_name = "FILE")]
        readme: Option<PathBuf>,
    },
    /// Validate the results table in a markdown file
    Check { file: PathBuf },
}

fn solve(config: &Config, day: u8, args: &[String]) -> anyhow::Result<()> {
    let (test, part) = match args {
        [part] => (None, part),
        [test, part] => (Some(test.parse().with_context(|| format!("bad test number {test:?}"))?), part),
        _ => bail!("expected [TEST] PART after the day"),
    };
    let part: Part = part.parse().map_err(anyhow::Error::msg)?;
    let entry = runner::lookup(day)?;
    let input = config.read_input(day, test)?;

    let start = Instant::now();
    let answer = (entry.solve)(&input, part)?;
    println!("{answer}");
    info!(elapsed = ?start.elapsed(), "{} part {}", entry.name, part.number());
    Ok(())
}

fn read_document(path: &Path) -> anyhow::Result<String> {
    match fs::read_to_string(path) {
        Ok(doc) => Ok(doc),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
    }
}

fn bench(config: &Config, from: u8, to: u8, runs: u32, readme_path: Option<&Path>) -> anyhow::Result<()> {
    if from > to {bail!("--from {from} is after --to {to}")}
    let document = readme_path.map(read_document).transpose()?;
    if let Some(doc) = &document {
        // surfaces a broken or out-of-sequence table before any day runs
        let existing = readme::append(doc, std::iter::empty())?;
        if let Some(last) = existing.last_day() {
            if last.checked_add(1) != Some(from) {
                bail!("the table ends at day {last}, so the bench has to start at day {}", last.saturating_add(1));
            }
        }
    }

    let entries = (from..=to).map(runner::lookup).collect::<Result<Vec<_>, _>>()?;
    let mut rows = vec![];
    for entry in entries {
        let input = config.read_input(entry.number, None)?;
        rows.push((entry.measure)(&input, runs)?);
    }

    let table = match (&document, readme_path) {
        (Some(doc), Some(path)) => {
            let table = readme::append(doc, rows)?;
            fs::write(path, readme::splice(doc, &table)).with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), days = table.rows().len(), "results table updated");
            table
        }
        _ => {
            let mut table = Table::new();
            for row in rows {
                table.push(row)?;
            }
            table
        }
    };
    print!("{}", table.to_markdown());
    Ok(())
}

fn check(path: &Path) -> anyhow::Result<()> {
    let doc = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let table = Table::from_markdown(&doc).with_context(|| format!("checking {}", path.display()))?;
    let total = table.total();
    let days = match (table.rows().first(), table.rows().last()) {
        (Some(first), Some(last)) => format!("days {}-{}", first.day, last.day),
        _ => "no days".to_owned(),
    };
    println!("{}: {days} consistent, total {}", path.display(), format_duration(total.total()));
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    aoc2023::telemetry::init(cli.verbose);
    let config = Config::new(cli.inputs);

    match cli.command {
        Command::Solve { day, args } => solve(&config, day, &args),
        Command::Bench { from, to, runs, readme } => bench(&config, from, to, runs, readme.as_deref()),
        Command::Check { file } => check(&file),
    }
}
