use serde::{Deserialize, Serialize};
use std::fmt::Display;
use strum::{AsRefStr, EnumIter, EnumString};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VesselId(String);

impl VesselId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Builds the conventional `V###` identifier for the given sequence number.
    pub fn from_sequence(num: u32) -> Self {
        Self(format!("V{num:03}"))
    }
}

impl Display for VesselId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VesselId {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    AsRefStr,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum VesselClass {
    Cargo,
    Naval,
    Submarine,
    Tanker,
    Passenger,
    #[default]
    Other,
}

#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    AsRefStr,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum FuelType {
    #[strum(serialize = "Heavy Fuel Oil")]
    HeavyFuelOil,
    #[strum(serialize = "Marine Diesel")]
    MarineDiesel,
    #[strum(serialize = "LNG")]
    Lng,
    Nuclear,
    #[default]
    Unknown,
}

/// Static specification of a single vessel, one per vessel in the fleet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselRecord {
    pub vessel_id: VesselId,
    pub vessel_class: VesselClass,
    pub fuel_type: FuelType,
    pub engine_power_kw: Option<f64>,
    pub load_capacity_tons: Option<f64>,
    pub length_meters: Option<f64>,
    pub max_depth_meters: Option<f64>,
    pub build_year: Option<u32>,
}

impl VesselRecord {
    pub fn new(vessel_id: VesselId, vessel_class: VesselClass) -> Self {
        Self {
            vessel_id,
            vessel_class,
            fuel_type: FuelType::Unknown,
            engine_power_kw: None,
            load_capacity_tons: None,
            length_meters: None,
            max_depth_meters: None,
            build_year: None,
        }
    }
}
