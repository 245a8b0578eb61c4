use crate::{
    Result, Settings,
    error::error::{AnalyticsSnafu, IoSnafu, JsonSnafu, RecordsSnafu},
};
use analytics::{AnalysisOutput, AnalyticsEngine};
use chrono::{DateTime, Utc};
use fleet_core::{Diagnostics, FleetSummary, RecordStore};
use integrator::{CsvRecordStore, Integrator};
use serde::Serialize;
use snafu::ResultExt;
use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};
use tracing::{info, instrument, warn};

pub static VESSEL_METRICS_FILE: &str = "vessel_metrics.json";
pub static FLEET_SUMMARY_FILE: &str = "fleet_summary.json";

pub struct App {
    store: CsvRecordStore,
    integrator: Integrator,
    engine: AnalyticsEngine,
    output_dir: PathBuf,
    num_workers: usize,
}

#[derive(Serialize)]
struct SummaryDocument<'a> {
    as_of: Option<DateTime<Utc>>,
    summary: &'a FleetSummary,
    diagnostics: &'a Diagnostics,
}

impl App {
    /// Fails on an invalid analytics configuration before any file is read.
    pub fn build(settings: &Settings) -> Result<Self> {
        Ok(Self {
            store: CsvRecordStore::new(&settings.data_dir),
            integrator: Integrator::new(&settings.integration),
            engine: AnalyticsEngine::new(settings.analytics.clone()).context(AnalyticsSnafu)?,
            output_dir: settings.output_dir.clone(),
            num_workers: settings.num_workers,
        })
    }

    #[instrument(skip_all, fields(data_dir = %self.store.dir().display()))]
    pub async fn run(self) -> Result<AnalysisOutput> {
        let records = self.store.record_set().context(RecordsSnafu)?;

        let integrated = self.integrator.integrate(records);
        if integrated.unmatched_fuel_records > 0 {
            warn!(
                "{} fuel records matched no navigation event",
                integrated.unmatched_fuel_records
            );
        }
        let integration_diagnostics = integrated.diagnostics.clone();

        let mut output = self
            .engine
            .run_parallel(&integrated.into_input(), self.num_workers)
            .await
            .context(AnalyticsSnafu)?;
        output.diagnostics += integration_diagnostics;

        self.write(&output)?;

        Ok(output)
    }

    fn write(&self, output: &AnalysisOutput) -> Result<()> {
        std::fs::create_dir_all(&self.output_dir).context(IoSnafu {
            path: self.output_dir.clone(),
        })?;

        write_json(&self.output_dir.join(VESSEL_METRICS_FILE), &output.vessels)?;
        write_json(
            &self.output_dir.join(FLEET_SUMMARY_FILE),
            &SummaryDocument {
                as_of: output.as_of,
                summary: &output.summary,
                diagnostics: &output.diagnostics,
            },
        )?;

        info!(
            "wrote results for {} vessels to '{}'",
            output.vessels.len(),
            self.output_dir.display()
        );

        Ok(())
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).context(IoSnafu { path })?;
    serde_json::to_writer_pretty(BufWriter::new(file), value).context(JsonSnafu { path })
}
