use crate::{
    FleetBaseline, MetricsCalculator, Partitioned, Result, RiskAssessor, VesselOutcome,
    VesselPartition,
    error::error::{ConfigSnafu, JoinSnafu, WorkerChannelSnafu},
    partition, summarize,
};
use chrono::{DateTime, Utc};
use fleet_core::{AnalysisInput, AnalyticsConfig, Diagnostics, FleetSummary, VesselMetrics};
use serde::Serialize;
use snafu::ResultExt;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{info, instrument};

/// Complete result of an analysis run, handed out by value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisOutput {
    pub as_of: Option<DateTime<Utc>>,
    /// One entry per vessel record, ordered by vessel id.
    pub vessels: Vec<VesselMetrics>,
    pub summary: FleetSummary,
    pub diagnostics: Diagnostics,
}

/// Runs the metrics calculator, the fleet baseline barrier, the risk assessor
/// and the insight aggregator over a fully materialized input.
pub struct AnalyticsEngine {
    calculator: MetricsCalculator,
    assessor: RiskAssessor,
}

struct Worker {
    calculator: MetricsCalculator,
    receiver: async_channel::Receiver<VesselPartition>,
    as_of: Option<DateTime<Utc>>,
}

impl AnalyticsEngine {
    /// Fails if the configuration is invalid, before any data is looked at.
    pub fn new(config: AnalyticsConfig) -> Result<Self> {
        config.validate().context(ConfigSnafu)?;

        let config = Arc::new(config);
        Ok(Self {
            calculator: MetricsCalculator::new(config.clone()),
            assessor: RiskAssessor::new(config),
        })
    }

    #[instrument(skip_all, fields(vessels = input.vessels.len(), rows = input.rows.len()))]
    pub fn run(&self, input: &AnalysisInput) -> AnalysisOutput {
        let Partitioned {
            partitions,
            as_of,
            diagnostics,
        } = partition(input);

        let outcomes = partitions
            .into_iter()
            .map(|p| {
                let outcome = self.calculator.calculate(&p, as_of);
                (p, outcome)
            })
            .collect();

        self.finish(outcomes, as_of, diagnostics)
    }

    /// Same as [`AnalyticsEngine::run`] with the per-vessel metrics computed by
    /// `num_workers` concurrent workers. Produces output identical to `run`.
    #[instrument(skip_all, fields(vessels = input.vessels.len(), rows = input.rows.len()))]
    pub async fn run_parallel(
        &self,
        input: &AnalysisInput,
        num_workers: usize,
    ) -> Result<AnalysisOutput> {
        let Partitioned {
            partitions,
            as_of,
            diagnostics,
        } = partition(input);

        let num_workers = num_workers.clamp(1, partitions.len().max(1));
        let (sender, receiver) = async_channel::bounded(num_workers * 2);

        let mut set = JoinSet::new();
        for _ in 0..num_workers {
            let worker = Worker {
                calculator: self.calculator.clone(),
                receiver: receiver.clone(),
                as_of,
            };
            set.spawn(worker.run());
        }
        drop(receiver);

        let num_partitions = partitions.len();
        for p in partitions {
            if sender.send(p).await.is_err() {
                return WorkerChannelSnafu.fail();
            }
        }
        drop(sender);

        let mut outcomes = Vec::with_capacity(num_partitions);
        while let Some(res) = set.join_next().await {
            outcomes.extend(res.context(JoinSnafu)?);
        }
        outcomes.sort_unstable_by(|(a, _), (b, _)| a.vessel_id().cmp(b.vessel_id()));

        Ok(self.finish(outcomes, as_of, diagnostics))
    }

    fn finish(
        &self,
        outcomes: Vec<(VesselPartition, VesselOutcome)>,
        as_of: Option<DateTime<Utc>>,
        mut diagnostics: Diagnostics,
    ) -> AnalysisOutput {
        let (partitions, metrics): (Vec<_>, Vec<_>) = outcomes
            .into_iter()
            .map(|(p, outcome)| {
                diagnostics += outcome.diagnostics;
                (p, outcome.metrics)
            })
            .unzip();

        // Every vessel's base metrics must be known before scoring starts.
        let baseline = FleetBaseline::new(&metrics);

        let vessels = metrics
            .into_iter()
            .zip(&partitions)
            .map(|(m, p)| self.assessor.assess(m, p, &baseline, as_of))
            .collect::<Vec<_>>();

        let summary = summarize(&vessels);

        info!(
            "analysed {} vessels, flagged: {}, unscored: {}, excluded_rows: {}, implausible_speeds: {}",
            summary.total_vessels,
            summary.flagged.len(),
            summary.category_counts.unscored,
            diagnostics.unresolved_vessel_rows,
            diagnostics.implausible_speed_samples,
        );

        AnalysisOutput {
            as_of,
            vessels,
            summary,
            diagnostics,
        }
    }
}

impl Worker {
    async fn run(self) -> Vec<(VesselPartition, VesselOutcome)> {
        let mut outcomes = Vec::new();
        while let Ok(partition) = self.receiver.recv().await {
            let outcome = self.calculator.calculate(&partition, self.as_of);
            outcomes.push((partition, outcome));
        }
        outcomes
    }
}
