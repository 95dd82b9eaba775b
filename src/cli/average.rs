use std::{collections::BTreeMap, path::PathBuf};

use clap::Parser;
use sigra::{
    Config,
    analysis::{PeriodFilter, enrollment_by_period, mean_enrollment},
    batch,
    domain::Period,
    report::{history, roster},
};
use tracing::instrument;

use super::{OutputFormat, ParseSettings, expand, terminal::{Palette, Tone}};

#[derive(Debug, Parser)]
pub struct Average {
    /// Grade history files (HEDIS) of the course
    #[arg(long = "history", value_name = "FILE", required = true, num_args = 1..)]
    history: Vec<PathBuf>,

    /// Roster files (ALUREL) listing the students to count
    #[arg(long = "roster", value_name = "FILE", num_args = 1..)]
    roster: Vec<PathBuf>,

    /// Degree track codes whose students are counted (all tracks of the
    /// roster if none)
    #[arg(long = "track", value_name = "CODE", requires = "roster")]
    tracks: Vec<String>,

    /// Only count periods matching a filter, such as
    /// '2014/2 <= {periodo} < 2016/2'
    #[arg(long)]
    filter: Option<PeriodFilter>,

    /// Count summer terms, whatever the configuration says
    #[arg(long)]
    include_summer: bool,

    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,

    #[command(flatten)]
    settings: ParseSettings,
}

impl Average {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let encoding = self.settings.encoding(config);
        let options = self.settings.options(config);

        let history =
            batch::parse_files(&expand(&self.history), encoding, &options, history::parse)?.records;
        let roster = if self.roster.is_empty() {
            None
        } else {
            Some(batch::parse_files(&expand(&self.roster), encoding, &options, roster::parse)?.records)
        };

        let counts = enrollment_by_period(&history, roster.as_ref(), &self.tracks);
        let ignore_summer = config.ignore_summer && !self.include_summer;
        let mean = mean_enrollment(&counts, ignore_summer, self.filter.as_ref());

        match self.output {
            OutputFormat::Json => Self::output_json(&counts, mean)?,
            OutputFormat::Table => self.output_table(&counts, ignore_summer, mean),
        }
        Ok(())
    }

    fn output_json(counts: &BTreeMap<Period, u32>, mean: f64) -> anyhow::Result<()> {
        use serde_json::json;

        let periods: serde_json::Map<_, _> = counts
            .iter()
            .map(|(period, count)| (period.to_string(), json!(count)))
            .collect();

        let output = json!({
            "periods": periods,
            "average": mean,
        });

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    fn output_table(&self, counts: &BTreeMap<Period, u32>, ignore_summer: bool, mean: f64) {
        let palette = Palette::detect();
        println!("{}", palette.paint("Enrollment per period", Tone::Heading));
        println!("{}", palette.paint("─────────────────────", Tone::Muted));

        for (period, count) in counts {
            let excluded = if *count == 0 {
                Some("no one enrolled")
            } else if ignore_summer && period.is_summer() {
                Some("summer term")
            } else if self.filter.as_ref().is_some_and(|filter| !filter.matches(*period)) {
                Some("filtered out")
            } else {
                None
            };

            let label = period.to_string();
            match excluded {
                Some(reason) => {
                    println!("{label:<8} {count:>4}  {}", palette.paint(reason, Tone::Muted));
                }
                None => println!("{label:<8} {count:>4}"),
            }
        }

        println!();
        println!("Average: {}", palette.paint(&format!("{mean:.2}"), Tone::Clean));
    }
}
