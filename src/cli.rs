use std::path::PathBuf;

mod average;
mod parse;
mod summary;
mod terminal;

use average::Average;
use clap::ArgAction;
use parse::Parse;
use sigra::{
    Config, Encoding, ParseOptions, ParsedReport, ReportKind, batch,
    report::{ExtractionMode, MalformedSectionPolicy},
};
use summary::Summary;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path to the configuration file
    #[arg(short, long, default_value = "sigra.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config = Config::load_or_default(&self.config)?;
        self.command.run(&config)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Parse report files and print their records as JSON
    Parse(Parse),

    /// Parse report files and print record counts
    Summary(Summary),

    /// Average enrollment per period of a course
    ///
    /// Enrollment is read from the grade history (HEDIS) of the course,
    /// optionally restricted to the students of some degree tracks of a
    /// roster (ALUREL).
    Average(Average),
}

impl Command {
    fn run(self, config: &Config) -> anyhow::Result<()> {
        match self {
            Self::Parse(command) => command.run(config)?,
            Self::Summary(command) => command.run(config)?,
            Self::Average(command) => command.run(config)?,
        }
        Ok(())
    }
}

/// Overrides of the configured parser settings.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ParseSettings {
    /// Encoding of the report files (utf-16, latin-1)
    #[arg(long)]
    encoding: Option<Encoding>,

    /// What to do with a section whose fields cannot be extracted
    #[arg(long, value_name = "POLICY")]
    on_malformed_section: Option<PolicyArg>,

    /// How continuation lines of offering reports are split
    #[arg(long, value_name = "MODE")]
    extraction: Option<ExtractionArg>,
}

impl ParseSettings {
    fn encoding(&self, config: &Config) -> Encoding {
        self.encoding.unwrap_or(config.encoding)
    }

    fn options(&self, config: &Config) -> ParseOptions {
        let mut options = config.parse_options();
        if let Some(policy) = self.on_malformed_section {
            options.on_malformed_section = policy.into();
        }
        if let Some(extraction) = self.extraction {
            options.extraction = extraction.into();
        }
        options
    }

    fn parse(
        &self,
        config: &Config,
        kind: ReportKind,
        inputs: &[PathBuf],
    ) -> anyhow::Result<ParsedReport> {
        let paths = expand(inputs);
        if paths.is_empty() {
            anyhow::bail!("no report files found in {}", display(inputs));
        }
        tracing::info!("parsing {} {kind} files", paths.len());
        Ok(batch::parse_kind(
            kind,
            &paths,
            self.encoding(config),
            &self.options(config),
        )?)
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum PolicyArg {
    Fail,
    Skip,
}

impl From<PolicyArg> for MalformedSectionPolicy {
    fn from(value: PolicyArg) -> Self {
        match value {
            PolicyArg::Fail => Self::Fail,
            PolicyArg::Skip => Self::Skip,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum ExtractionArg {
    Pattern,
    Offset,
}

impl From<ExtractionArg> for ExtractionMode {
    fn from(value: ExtractionArg) -> Self {
        match value {
            ExtractionArg::Pattern => Self::Pattern,
            ExtractionArg::Offset => Self::Offset,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Replaces every directory among the inputs by the report files under it.
fn expand(inputs: &[PathBuf]) -> Vec<PathBuf> {
    inputs
        .iter()
        .flat_map(|input| {
            if input.is_dir() {
                batch::collect_reports(input)
            } else {
                vec![input.clone()]
            }
        })
        .collect()
}

fn display(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
