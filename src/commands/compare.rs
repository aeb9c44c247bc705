use crate::areas::session::Session;
use crate::artifacts::compare::{Comparison, ComparisonRecord, Summary};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Serialize)]
struct Report<'c> {
    summary: &'c Summary,
    records: Vec<&'c ComparisonRecord>,
}

impl Session {
    pub async fn compare(&self, format: OutputFormat) -> anyhow::Result<()> {
        let comparison = self.run_comparison().await?;

        match format {
            OutputFormat::Text => self.print_listing(&comparison),
            OutputFormat::Json => self.print_report(&comparison),
        }
    }

    fn print_listing(&self, comparison: &Comparison) -> anyhow::Result<()> {
        writeln!(self.writer(), "{}", comparison.summary())?;

        for record in comparison.visible(self.options().hide_matches) {
            writeln!(self.writer(), "{}", record)?;
        }

        Ok(())
    }

    fn print_report(&self, comparison: &Comparison) -> anyhow::Result<()> {
        let report = Report {
            summary: comparison.summary(),
            records: comparison.visible(self.options().hide_matches).collect(),
        };

        let mut writer = self.writer();
        serde_json::to_writer_pretty(&mut *writer, &report)?;
        writeln!(writer)?;

        Ok(())
    }
}
