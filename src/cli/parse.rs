use std::path::PathBuf;

use clap::Parser;
use sigra::{Config, ReportKind};
use tracing::instrument;

use super::ParseSettings;

#[derive(Debug, Parser)]
pub struct Parse {
    /// Report kind, by export code (OFELST, DISLST, FLULST, ALUREL, ALUTEL,
    /// HEDIS, CUREGEP)
    kind: ReportKind,

    /// Report files, or directories of them. Later files take precedence
    /// where records overlap.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Print the record counts alongside the records
    #[arg(long)]
    with_summary: bool,

    /// Print compact rather than indented JSON
    #[arg(long)]
    compact: bool,

    #[command(flatten)]
    settings: ParseSettings,
}

impl Parse {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let parsed = self.settings.parse(config, self.kind, &self.files)?;

        let mut value = serde_json::to_value(&parsed)?;
        if !self.with_summary {
            value = value["records"].take();
        }

        let output = if self.compact {
            serde_json::to_string(&value)?
        } else {
            serde_json::to_string_pretty(&value)?
        };
        println!("{output}");
        Ok(())
    }
}
