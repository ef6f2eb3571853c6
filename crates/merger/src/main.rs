mod output;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use followsync_merger::{canonical_path, merge_into_file, MergeOutcome};
use output::{print_json, print_line, print_usage, Line, OutputMode};

#[derive(Parser)]
#[command(
    name = "followsync-merge",
    version,
    about = "Merge a follow-records backup into the canonical posts.json"
)]
pub struct Opts {
    #[arg(help = "Backup JSON file (array of records keyed by authorHandle)")]
    backup: Option<PathBuf>,

    #[arg(long, help = "Canonical dataset path (defaults to <root>/build/release/data/posts.json)")]
    data_file: Option<PathBuf>,

    #[arg(long, help = "Output as JSON")]
    json: bool,
}

impl Opts {
    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .json()
        .init();

    let opts = Opts::parse();
    let mode = opts.output_mode();

    let Some(backup) = opts.backup else {
        print_usage();
        std::process::exit(1);
    };

    let data_file = match opts.data_file {
        Some(path) => path,
        None => canonical_path().context("resolving canonical data path")?,
    };

    let outcome = merge_into_file(&backup, &data_file)
        .with_context(|| format!("merging {} into {}", backup.display(), data_file.display()))?;

    match mode {
        OutputMode::Json => print_json(&outcome)?,
        OutputMode::Human => report_lines(&outcome).iter().for_each(print_line),
    }

    Ok(())
}

fn report_lines(outcome: &MergeOutcome) -> Vec<Line> {
    let r = &outcome.report;
    let mut lines = Vec::with_capacity(6);
    if outcome.existing_found {
        lines.push(Line::Info(format!("existing records: {}", r.existing_count)));
    }
    lines.push(Line::Info(format!("backup records: {}", r.backup_count)));
    lines.push(Line::Info(format!("added: {}", r.added_count)));
    lines.push(Line::Info(format!("total after merge: {}", r.total_count)));
    lines.push(Line::Info(format!("followed accounts: {}", r.followed_count)));
    lines.push(Line::Success(format!(
        "data saved to: {}",
        outcome.data_file.display()
    )));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use followsync_merger::MergeReport;

    fn outcome(existing_found: bool) -> MergeOutcome {
        MergeOutcome {
            data_file: PathBuf::from("/srv/build/release/data/posts.json"),
            existing_found,
            report: MergeReport {
                existing_count: 2,
                backup_count: 3,
                added_count: 1,
                total_count: 3,
                followed_count: 2,
            },
        }
    }

    fn rendered(outcome: &MergeOutcome) -> Vec<String> {
        report_lines(outcome).iter().map(ToString::to_string).collect()
    }

    #[test]
    fn report_lines_in_order() {
        assert_eq!(
            rendered(&outcome(true)),
            vec![
                "[INFO] existing records: 2",
                "[INFO] backup records: 3",
                "[INFO] added: 1",
                "[INFO] total after merge: 3",
                "[INFO] followed accounts: 2",
                "[SUCCESS] data saved to: /srv/build/release/data/posts.json",
            ]
        );
    }

    #[test]
    fn existing_line_omitted_without_canonical_file() {
        let lines = rendered(&outcome(false));
        assert_eq!(lines.len(), 5);
        assert!(lines.iter().all(|l| !l.contains("existing records")));
        assert_eq!(lines[0], "[INFO] backup records: 3");
    }

    fn parse(args: &[&str]) -> Opts {
        let mut full = vec!["followsync-merge"];
        full.extend_from_slice(args);
        Opts::parse_from(full)
    }

    #[test]
    fn parse_backup_positional() {
        let opts = parse(&["following_backup.json"]);
        assert_eq!(opts.backup, Some(PathBuf::from("following_backup.json")));
        assert_eq!(opts.output_mode(), OutputMode::Human);
    }

    #[test]
    fn parse_without_backup() {
        let opts = parse(&[]);
        assert!(opts.backup.is_none());
    }

    #[test]
    fn parse_data_file_and_json() {
        let opts = parse(&["--json", "--data-file", "/tmp/posts.json", "b.json"]);
        assert_eq!(opts.output_mode(), OutputMode::Json);
        assert_eq!(opts.data_file, Some(PathBuf::from("/tmp/posts.json")));
    }
}
