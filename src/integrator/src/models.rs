use crate::{Result, deserialize_utils::*, error::error::MissingSeveritySnafu};
use chrono::{DateTime, Utc};
use fleet_core::{
    EnvironmentSample, FuelRecord, FuelType, IncidentType, MaintenanceIncident, NavigationEvent,
    RiskCategory, VesselClass, VesselId, VesselRecord,
};
use serde::Deserialize;

/// Hours covered by a single fuel log entry when no consumed volume is given.
static FUEL_LOG_INTERVAL_HOURS: f64 = 1.0;

/// Conversion of a decoded CSV row into its domain record.
pub trait IntoRecord {
    type Record;

    fn into_record(self) -> Result<Self::Record>;
}

#[derive(Deserialize, Debug, Clone)]
pub struct VesselRow {
    #[serde(rename = "Vessel_ID")]
    pub vessel_id: String,
    #[serde(rename = "Type", default, deserialize_with = "enum_or_default")]
    pub vessel_class: VesselClass,
    #[serde(rename = "Fuel_Type", default, deserialize_with = "enum_or_default")]
    pub fuel_type: FuelType,
    #[serde(rename = "Engine_Power_kW", default)]
    pub engine_power_kw: Option<f64>,
    #[serde(rename = "Load_Capacity_tons", default)]
    pub load_capacity_tons: Option<f64>,
    #[serde(rename = "Length_meters", default)]
    pub length_meters: Option<f64>,
    #[serde(rename = "Max_Depth_meters", default)]
    pub max_depth_meters: Option<f64>,
    #[serde(rename = "Year_Built", default)]
    pub build_year: Option<u32>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct NavigationRow {
    #[serde(rename = "Vessel_ID")]
    pub vessel_id: String,
    #[serde(rename = "Timestamp", deserialize_with = "timestamp_from_str")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    #[serde(rename = "Speed_knots")]
    pub speed_knots: f64,
    #[serde(rename = "Course_Deviation_degrees", default)]
    pub course_deviation_degrees: Option<f64>,
    #[serde(rename = "Distance_covered_nm")]
    pub distance_nm: f64,
    #[serde(rename = "Engine_RPM", default)]
    pub engine_rpm: Option<f64>,
    #[serde(rename = "Depth_meters", default)]
    pub depth_meters: Option<f64>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct EnvironmentRow {
    #[serde(rename = "Vessel_ID", default, deserialize_with = "opt_non_empty_string")]
    pub vessel_id: Option<String>,
    #[serde(rename = "Timestamp", deserialize_with = "timestamp_from_str")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "Wave_Height_meters")]
    pub wave_height_meters: f64,
    #[serde(rename = "Wind_Speed_knots")]
    pub wind_speed_knots: f64,
    #[serde(rename = "Visibility_km", default)]
    pub visibility_km: Option<f64>,
    #[serde(rename = "Storm_Probability_percent")]
    pub storm_probability_percent: f64,
    #[serde(rename = "Sea_Temperature_C", default)]
    pub sea_temperature_celsius: Option<f64>,
    #[serde(rename = "Ocean_Current_knots", default)]
    pub ocean_current_knots: Option<f64>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct FuelRow {
    #[serde(rename = "Vessel_ID")]
    pub vessel_id: String,
    #[serde(rename = "Timestamp", deserialize_with = "timestamp_from_str")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "Fuel_Consumed_liters", default)]
    pub consumed_liters: Option<f64>,
    #[serde(rename = "Fuel_Used_per_Hour_liters")]
    pub rate_liters_per_hour: f64,
    #[serde(rename = "Engine_Load_percent", default)]
    pub engine_load_percent: Option<f64>,
    #[serde(rename = "Load_Weight_percent", default)]
    pub load_weight_percent: Option<f64>,
    #[serde(rename = "Fuel_Cost_USD", default)]
    pub cost_usd: Option<f64>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct MaintenanceRow {
    #[serde(rename = "Vessel_ID")]
    pub vessel_id: String,
    #[serde(rename = "Timestamp", deserialize_with = "timestamp_from_str")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "Incident_Type", deserialize_with = "enum_from_str")]
    pub incident_type: IncidentType,
    #[serde(
        rename = "Maintenance_Type",
        default,
        deserialize_with = "opt_non_empty_string"
    )]
    pub maintenance_type: Option<String>,
    #[serde(rename = "Severity", default)]
    pub severity: Option<f64>,
    #[serde(rename = "Risk_Category", default, deserialize_with = "opt_enum_from_str")]
    pub risk_category: Option<RiskCategory>,
    #[serde(rename = "Repair_Time_hours")]
    pub downtime_hours: f64,
    #[serde(rename = "Maintenance_Cost_USD")]
    pub cost_usd: f64,
}

impl IntoRecord for VesselRow {
    type Record = VesselRecord;

    fn into_record(self) -> Result<VesselRecord> {
        Ok(VesselRecord {
            vessel_id: VesselId::new(self.vessel_id),
            vessel_class: self.vessel_class,
            fuel_type: self.fuel_type,
            engine_power_kw: self.engine_power_kw,
            load_capacity_tons: self.load_capacity_tons,
            length_meters: self.length_meters,
            max_depth_meters: self.max_depth_meters,
            build_year: self.build_year,
        })
    }
}

impl IntoRecord for NavigationRow {
    type Record = NavigationEvent;

    fn into_record(self) -> Result<NavigationEvent> {
        Ok(NavigationEvent {
            vessel_id: VesselId::new(self.vessel_id),
            timestamp: self.timestamp,
            latitude: self.latitude,
            longitude: self.longitude,
            speed_knots: self.speed_knots,
            course_deviation_degrees: self.course_deviation_degrees.unwrap_or_default(),
            distance_nm: self.distance_nm,
            engine_rpm: self.engine_rpm,
            depth_meters: self.depth_meters,
        })
    }
}

impl IntoRecord for EnvironmentRow {
    type Record = EnvironmentSample;

    fn into_record(self) -> Result<EnvironmentSample> {
        Ok(EnvironmentSample {
            vessel_id: self.vessel_id.map(VesselId::new),
            timestamp: self.timestamp,
            wave_height_meters: self.wave_height_meters,
            wind_speed_knots: self.wind_speed_knots,
            visibility_km: self.visibility_km,
            storm_probability_percent: self.storm_probability_percent,
            sea_temperature_celsius: self.sea_temperature_celsius,
            ocean_current_knots: self.ocean_current_knots,
        })
    }
}

impl IntoRecord for FuelRow {
    type Record = FuelRecord;

    fn into_record(self) -> Result<FuelRecord> {
        Ok(FuelRecord {
            vessel_id: VesselId::new(self.vessel_id),
            timestamp: self.timestamp,
            consumed_liters: self
                .consumed_liters
                .unwrap_or(self.rate_liters_per_hour * FUEL_LOG_INTERVAL_HOURS),
            rate_liters_per_hour: self.rate_liters_per_hour,
            engine_load_percent: self.engine_load_percent,
            load_weight_percent: self.load_weight_percent,
            cost_usd: self.cost_usd,
        })
    }
}

impl IntoRecord for MaintenanceRow {
    type Record = MaintenanceIncident;

    fn into_record(self) -> Result<MaintenanceIncident> {
        let vessel_id = VesselId::new(self.vessel_id);
        let severity = match (self.severity, self.risk_category) {
            (Some(severity), _) => severity,
            (None, Some(category)) => category_severity(category),
            (None, None) => {
                return MissingSeveritySnafu {
                    vessel_id,
                    timestamp: self.timestamp,
                }
                .fail();
            }
        };

        Ok(MaintenanceIncident {
            vessel_id,
            timestamp: self.timestamp,
            incident_type: self.incident_type,
            maintenance_type: self.maintenance_type,
            severity,
            cost_usd: self.cost_usd,
            downtime_hours: self.downtime_hours,
        })
    }
}

/// Upper bound of the category's quarter of the 0-10 severity scale.
fn category_severity(category: RiskCategory) -> f64 {
    match category {
        RiskCategory::Low => 2.5,
        RiskCategory::Medium => 5.0,
        RiskCategory::High => 7.5,
        RiskCategory::Critical => 10.0,
    }
}
