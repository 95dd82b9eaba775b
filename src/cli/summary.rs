use std::path::PathBuf;

use clap::Parser;
use sigra::{Config, ParsedReport, ReportKind};
use tracing::instrument;

use super::{
    OutputFormat, ParseSettings,
    terminal::{Palette, Tone},
};

#[derive(Debug, Parser)]
pub struct Summary {
    /// Report kind, by export code (OFELST, DISLST, FLULST, ALUREL, ALUTEL,
    /// HEDIS, CUREGEP)
    kind: ReportKind,

    /// Report files, or directories of them
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,

    #[command(flatten)]
    settings: ParseSettings,
}

impl Summary {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let parsed = self.settings.parse(config, self.kind, &self.files)?;
        let contents = contents(&parsed);

        match self.output {
            OutputFormat::Json => Self::output_json(&parsed, &contents)?,
            OutputFormat::Table => Self::output_table(&parsed, &contents),
        }
        Ok(())
    }

    fn output_json(parsed: &ParsedReport, contents: &[(&str, usize)]) -> anyhow::Result<()> {
        use serde_json::json;

        let contents: serde_json::Map<_, _> = contents
            .iter()
            .map(|(name, count)| ((*name).to_string(), json!(count)))
            .collect();

        let output = json!({
            "kind": parsed.kind(),
            "summary": parsed.summary(),
            "contents": contents,
        });

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    fn output_table(parsed: &ParsedReport, contents: &[(&str, usize)]) {
        let summary = parsed.summary();
        let palette = Palette::detect();

        println!("{}", palette.paint(&format!("{} report", parsed.kind()), Tone::Heading));
        println!("{}", palette.paint("─────────────", Tone::Muted));

        for (name, count) in contents {
            println!("{name:<18} {count}");
        }
        println!();
        println!("{:<18} {}", "Records", summary.records);
        println!("{:<18} {}", "Sub-records", summary.sub_records);
        println!(
            "{:<18} {}",
            "Ignored lines",
            palette.paint(&summary.ignored_lines.to_string(), Tone::Muted)
        );
        println!(
            "{:<18} {}",
            "Skipped sections",
            palette.skipped_sections(summary.skipped_sub_records)
        );
        if summary.skipped_sub_records > 0 {
            println!(
                "{}",
                palette.paint("Run with -v to see which sections were skipped.", Tone::Muted)
            );
        }
    }
}

/// Counts of what a parsed report holds, by the names its records go by.
fn contents(parsed: &ParsedReport) -> Vec<(&'static str, usize)> {
    match parsed {
        ParsedReport::Offering(parsed) => vec![
            ("Courses", parsed.records.courses.len()),
            ("Sections", parsed.records.section_count()),
        ],
        ParsedReport::Catalog(parsed) => vec![("Courses", parsed.records.courses.len())],
        ParsedReport::Flow(parsed) => vec![
            ("Periods", parsed.records.periods.len()),
            ("Courses", parsed.records.course_count()),
        ],
        ParsedReport::Roster(parsed) => vec![
            ("Degree tracks", parsed.records.tracks.len()),
            ("Students", parsed.records.student_count()),
        ],
        ParsedReport::Contacts(parsed) => vec![("Contacts", parsed.records.contacts.len())],
        ParsedReport::GradeHistory(parsed) => vec![
            ("Classes", parsed.records.classes.len()),
            ("Grades", parsed.records.grade_count()),
        ],
        ParsedReport::EntryStatistics(parsed) => {
            vec![("Periods", parsed.records.periods.len())]
        }
    }
}
