use crate::{
    EnvironmentSample, FuelRecord, MaintenanceIncident, NavigationEvent, VesselRecord,
};

/// The five raw record collections as loaded from a [`RecordStore`].
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    pub vessels: Vec<VesselRecord>,
    pub navigation: Vec<NavigationEvent>,
    pub environment: Vec<EnvironmentSample>,
    pub fuel: Vec<FuelRecord>,
    pub maintenance: Vec<MaintenanceIncident>,
}

pub trait RecordStore {
    type Error: std::error::Error + Send + Sync + 'static;

    fn vessels(&self) -> Result<Vec<VesselRecord>, Self::Error>;
    fn navigation(&self) -> Result<Vec<NavigationEvent>, Self::Error>;
    fn environment(&self) -> Result<Vec<EnvironmentSample>, Self::Error>;
    fn fuel(&self) -> Result<Vec<FuelRecord>, Self::Error>;
    fn maintenance(&self) -> Result<Vec<MaintenanceIncident>, Self::Error>;

    fn record_set(&self) -> Result<RecordSet, Self::Error> {
        Ok(RecordSet {
            vessels: self.vessels()?,
            navigation: self.navigation()?,
            environment: self.environment()?,
            fuel: self.fuel()?,
            maintenance: self.maintenance()?,
        })
    }
}
