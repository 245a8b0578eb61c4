use crate::sorted_median;
use fleet_core::{
    CategoryCounts, FlaggedVessel, FleetSummary, Mean, MetricId, MetricStatistics, RiskCategory,
    VesselMetrics,
};
use strum::IntoEnumIterator;

/// Builds the fleet summary from the complete metrics table.
pub fn summarize(vessels: &[VesselMetrics]) -> FleetSummary {
    let mut category_counts = CategoryCounts::default();
    for v in vessels {
        category_counts.increment(v.risk_category());
    }

    let metrics = MetricId::iter()
        .map(|id| (id, statistics(vessels.iter().map(|v| id.value(v)))))
        .collect();

    FleetSummary {
        total_vessels: vessels.len(),
        category_counts,
        metrics,
        flagged: flagged(vessels),
    }
}

/// Vessels categorized High or above, highest score first and ties broken by
/// ascending vessel id.
pub fn flagged(vessels: &[VesselMetrics]) -> Vec<FlaggedVessel> {
    let mut flagged = vessels
        .iter()
        .filter_map(|v| {
            let risk = v.risk.as_ref()?;
            (risk.category >= RiskCategory::High).then(|| FlaggedVessel {
                vessel_id: v.vessel_id.clone(),
                score: risk.score,
                category: risk.category,
            })
        })
        .collect::<Vec<_>>();

    flagged.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.vessel_id.cmp(&b.vessel_id))
    });

    flagged
}

fn statistics(values: impl Iterator<Item = Option<f64>>) -> MetricStatistics {
    let mut excluded = 0;
    let mut defined = Vec::new();
    for v in values {
        match v {
            Some(v) if !v.is_nan() => defined.push(v),
            _ => excluded += 1,
        }
    }
    defined.sort_unstable_by(f64::total_cmp);

    MetricStatistics {
        count: defined.len(),
        excluded,
        mean: defined.iter().copied().mean(),
        median: sorted_median(&defined),
    }
}
