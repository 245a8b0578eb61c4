use super::cmp_opt_f64;
use crate::{Mean, VesselId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelRecord {
    pub vessel_id: VesselId,
    pub timestamp: DateTime<Utc>,
    pub consumed_liters: f64,
    pub rate_liters_per_hour: f64,
    pub engine_load_percent: Option<f64>,
    pub load_weight_percent: Option<f64>,
    pub cost_usd: Option<f64>,
}

impl FuelRecord {
    /// Combines several records attributed to the same navigation event into one.
    ///
    /// Volumes and costs are summed, rates and loads are averaged over the records
    /// carrying them and the timestamp of the first record is kept.
    pub fn combine(records: &[FuelRecord]) -> Option<FuelRecord> {
        let (first, rest) = records.split_first()?;
        if rest.is_empty() {
            return Some(first.clone());
        }

        let cost_usd = records
            .iter()
            .filter_map(|r| r.cost_usd)
            .fold(None, |acc: Option<f64>, v| Some(acc.unwrap_or(0.0) + v));

        Some(FuelRecord {
            vessel_id: first.vessel_id.clone(),
            timestamp: first.timestamp,
            consumed_liters: records.iter().map(|r| r.consumed_liters).sum(),
            rate_liters_per_hour: records
                .iter()
                .map(|r| r.rate_liters_per_hour)
                .mean()
                .unwrap_or_default(),
            engine_load_percent: records.iter().filter_map(|r| r.engine_load_percent).mean(),
            load_weight_percent: records.iter().filter_map(|r| r.load_weight_percent).mean(),
            cost_usd,
        })
    }

    /// Total order over every field.
    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        self.timestamp
            .cmp(&other.timestamp)
            .then_with(|| self.consumed_liters.total_cmp(&other.consumed_liters))
            .then_with(|| self.rate_liters_per_hour.total_cmp(&other.rate_liters_per_hour))
            .then_with(|| cmp_opt_f64(self.engine_load_percent, other.engine_load_percent))
            .then_with(|| cmp_opt_f64(self.load_weight_percent, other.load_weight_percent))
            .then_with(|| cmp_opt_f64(self.cost_usd, other.cost_usd))
            .then_with(|| self.vessel_id.cmp(&other.vessel_id))
    }
}
