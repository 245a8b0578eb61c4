use crate::helper::data_dir;
use fleet_core::{IncidentType, IntegrationConfig, RecordStore, VesselClass, VesselId};
use integrator::{CsvRecordStore, Error, Integrator};

#[test]
fn test_loads_every_record_collection() {
    let store = CsvRecordStore::new(data_dir("complete"));

    let records = store.record_set().unwrap();

    assert_eq!(records.vessels.len(), 3);
    assert_eq!(records.vessels[1].vessel_class, VesselClass::Tanker);
    assert_eq!(records.navigation.len(), 6);
    assert_eq!(records.environment.len(), 3);
    assert_eq!(records.fuel.len(), 4);
    assert_eq!(records.maintenance.len(), 3);
    assert_eq!(
        records.maintenance[0].incident_type,
        IncidentType::MechanicalFailure
    );
}

#[test]
fn test_missing_optional_files_are_empty_collections() {
    let store = CsvRecordStore::new(data_dir("vessels_only"));

    let records = store.record_set().unwrap();

    assert_eq!(records.vessels.len(), 3);
    assert!(records.navigation.is_empty());
    assert!(records.environment.is_empty());
    assert!(records.fuel.is_empty());
    assert!(records.maintenance.is_empty());
}

#[test]
fn test_missing_vessel_file_is_fatal() {
    let store = CsvRecordStore::new(data_dir("does_not_exist"));

    let err = store.record_set().unwrap_err();

    assert!(matches!(err, Error::MissingFile { .. }));
}

#[test]
fn test_integrates_loaded_records() {
    let records = CsvRecordStore::new(data_dir("complete"))
        .record_set()
        .unwrap();

    let integrated = Integrator::new(&IntegrationConfig::default()).integrate(records);

    assert_eq!(integrated.rows.len(), 5);
    assert_eq!(integrated.diagnostics.unresolved_vessel_rows, 1);
    assert!(
        integrated
            .diagnostics
            .unresolved_vessel_ids
            .contains(&VesselId::new("V009"))
    );

    let v001 = integrated
        .rows
        .iter()
        .filter(|r| r.vessel_id().as_str() == "V001")
        .collect::<Vec<_>>();

    assert!(v001.iter().all(|r| r.fuel.is_some()));
    assert!(v001.iter().all(|r| r.environment.is_some()));
    assert_eq!(
        v001[2].environment.as_ref().unwrap().wave_height_meters,
        4.5
    );
    assert_eq!(v001[2].maintenance.as_ref().unwrap().severity, 7.5);
    assert_eq!(integrated.incidents.len(), 3);
}

#[test]
fn test_fleet_wide_environment_file_is_joined_to_every_vessel() {
    let records = CsvRecordStore::new(data_dir("original_layout"))
        .record_set()
        .unwrap();

    assert_eq!(records.environment.len(), 2);
    assert!(records.environment.iter().all(|e| e.vessel_id.is_none()));

    let integrated = Integrator::new(&IntegrationConfig::default()).integrate(records);

    let waves = integrated
        .rows
        .iter()
        .map(|r| {
            (
                r.vessel_id().as_str(),
                r.environment.as_ref().map(|e| e.wave_height_meters),
            )
        })
        .collect::<Vec<_>>();

    assert_eq!(
        waves,
        vec![
            ("V001", Some(1.2)),
            ("V001", Some(1.2)),
            ("V001", None),
            ("V002", Some(1.2)),
            ("V002", Some(1.2)),
        ]
    );
}
