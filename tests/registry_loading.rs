//! Registry Loading Tests
//!
//! Hospital CSV parsing against files on disk and the fixed base registry.

use std::path::PathBuf;

use ems_dispatch::registry::{load_hospitals_csv, marikina_ems_bases, RegistryError};
use tempfile::TempDir;

fn write_csv(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hospitals.csv");
    std::fs::write(&path, contents).unwrap();
    (dir, path)
}

#[test]
fn loads_dataset_with_misspelled_longitude_header() {
    let (_dir, path) = write_csv(
        "ID,Name,Level,Latitude,Longtitude\n\
         1,Amang Rodriguez Memorial Medical Center,3,14.6361025,121.0984445\n\
         2,\"Garcia General Hospital, Marikina\",2,14.6512,121.1146\n",
    );
    let hospitals = load_hospitals_csv(&path).unwrap();

    assert_eq!(hospitals.len(), 2);
    assert_eq!(hospitals[0].id, 1);
    assert_eq!(hospitals[0].name, "Amang Rodriguez Memorial Medical Center");
    assert_eq!(hospitals[0].level, "3");
    assert_eq!(hospitals[0].coords.latitude, 14.636_102_5);
    assert_eq!(hospitals[0].coords.longitude, 121.098_444_5);
    assert_eq!(hospitals[1].name, "Garcia General Hospital, Marikina");
}

#[test]
fn column_order_and_case_do_not_matter() {
    let (_dir, path) = write_csv("lon,LAT,name,id\n121.1,14.65,Clinic,7\n");
    let hospitals = load_hospitals_csv(&path).unwrap();

    assert_eq!(hospitals[0].id, 7);
    assert_eq!(hospitals[0].level, "Unknown");
    assert_eq!(hospitals[0].coords.latitude, 14.65);
}

#[test]
fn bad_rows_are_skipped() {
    let (_dir, path) = write_csv(
        "ID,Name,Level,Latitude,Longitude\n\
         1,Good,1,14.63,121.09\n\
         x,Bad id,1,14.63,121.09\n\
         3,Bad lat,1,north,121.09\n\
         \n\
         4.0,Float id,2,14.64,121.10\n",
    );
    let hospitals = load_hospitals_csv(&path).unwrap();
    let ids: Vec<u32> = hospitals.iter().map(|h| h.id).collect();
    assert_eq!(ids, vec![1, 4]);
}

#[test]
fn missing_column_is_reported() {
    let (_dir, path) = write_csv("ID,Name,Latitude\n1,A,14.6\n");
    match load_hospitals_csv(&path) {
        Err(RegistryError::MissingColumn(_, col)) => assert_eq!(col, "Longitude"),
        other => panic!("expected MissingColumn, got {other:?}"),
    }
}

#[test]
fn file_without_valid_rows_fails() {
    let (_dir, path) = write_csv("ID,Name,Level,Latitude,Longitude\n\nx,Bad,1,a,b\n");
    match load_hospitals_csv(&path) {
        Err(RegistryError::NoRows { errors, blank, .. }) => {
            assert_eq!(errors, 1);
            assert_eq!(blank, 1);
        }
        other => panic!("expected NoRows, got {other:?}"),
    }
}

#[test]
fn duplicate_ids_fail_the_load() {
    let (_dir, path) = write_csv(
        "ID,Name,Level,Latitude,Longitude\n1,A,1,14.63,121.09\n1,B,2,14.64,121.10\n",
    );
    assert!(matches!(
        load_hospitals_csv(&path),
        Err(RegistryError::DuplicateHospitalId(1))
    ));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        load_hospitals_csv(dir.path().join("nope.csv")),
        Err(RegistryError::Io(..))
    ));
}

#[test]
fn bundled_dataset_loads() {
    let hospitals = load_hospitals_csv("data/hospitals.csv").unwrap();
    assert!(!hospitals.is_empty());
    assert_eq!(hospitals[0].id, 1);
    assert_eq!(hospitals[0].name, "Amang Rodriguez Memorial Medical Center");
}

#[test]
fn base_registry_is_fixed() {
    let ids: Vec<u32> = marikina_ems_bases().iter().map(|b| b.base_id).collect();
    assert_eq!(ids, vec![163, 166, 167, 164, 165, 169]);
}
