use super::cmp_opt_f64;
use crate::{EnvironmentSample, FuelRecord, MaintenanceIncident, NavigationEvent, VesselId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A navigation event enriched with the nearest-in-time context of each other
/// record kind, `None` when nothing matched within the join tolerance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegratedRow {
    pub navigation: NavigationEvent,
    pub environment: Option<EnvironmentSample>,
    pub fuel: Option<FuelRecord>,
    pub maintenance: Option<MaintenanceIncident>,
}

impl IntegratedRow {
    pub fn new(navigation: NavigationEvent) -> Self {
        Self {
            navigation,
            environment: None,
            fuel: None,
            maintenance: None,
        }
    }

    pub fn vessel_id(&self) -> &VesselId {
        &self.navigation.vessel_id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.navigation.timestamp
    }

    /// Total order over every value that takes part in an aggregation.
    pub(crate) fn canonical_cmp(&self, other: &Self) -> Ordering {
        let a = &self.navigation;
        let b = &other.navigation;

        a.timestamp
            .cmp(&b.timestamp)
            .then_with(|| a.speed_knots.total_cmp(&b.speed_knots))
            .then_with(|| a.distance_nm.total_cmp(&b.distance_nm))
            .then_with(|| a.latitude.total_cmp(&b.latitude))
            .then_with(|| a.longitude.total_cmp(&b.longitude))
            .then_with(|| {
                a.course_deviation_degrees
                    .total_cmp(&b.course_deviation_degrees)
            })
            .then_with(|| cmp_opt_f64(a.engine_rpm, b.engine_rpm))
            .then_with(|| cmp_opt_f64(a.depth_meters, b.depth_meters))
            .then_with(|| {
                cmp_opt(
                    &self.environment,
                    &other.environment,
                    EnvironmentSample::canonical_cmp,
                )
            })
            .then_with(|| cmp_opt(&self.fuel, &other.fuel, FuelRecord::canonical_cmp))
            .then_with(|| {
                cmp_opt(
                    &self.maintenance,
                    &other.maintenance,
                    MaintenanceIncident::canonical_cmp,
                )
            })
    }
}

fn cmp_opt<T>(a: &Option<T>, b: &Option<T>, cmp: impl Fn(&T, &T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => cmp(a, b),
        (a, b) => a.is_some().cmp(&b.is_some()),
    }
}

/// Puts rows in a canonical order so that floating point reductions over them
/// yield bit-identical results regardless of input order.
pub fn sort_rows(rows: &mut [IntegratedRow]) {
    rows.sort_unstable_by(|a, b| a.canonical_cmp(b));
}
