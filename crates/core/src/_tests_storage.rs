#![cfg(test)]

use std::env;
use std::fs;

use serde_json::Value;

use super::error::SdosError;
use super::parity::Parity;
use super::storage::{spectrum_filename, DatasetSink, JsonContainer};

#[test]
fn filename_without_parity_has_no_suffix() {
    assert_eq!(spectrum_filename("run1", 0, Parity::None), "run1-sdos.k0");
    assert_eq!(spectrum_filename("", 12, Parity::None), "-sdos.k12");
}

#[test]
fn filename_appends_parity_suffix() {
    assert_eq!(spectrum_filename("run1", 3, Parity::Te), "run1-sdos.k3.te");
    assert_eq!(
        spectrum_filename("out/job", 0, Parity::ZOdd),
        "out/job-sdos.k0.zodd"
    );
}

#[test]
fn container_round_trips_datasets() {
    let path = env::temp_dir().join(format!("sdos3d-container-{}.json", std::process::id()));
    let mut container = JsonContainer::create(&path).unwrap();
    container
        .write_real("sdos", "row-major (freq, G)", &[2, 3], &[1.0; 6])
        .unwrap();
    container
        .write_real("freqspan", "freq_min, freq_max, freq_num", &[3], &[0.0, 1.0, 2.0])
        .unwrap();
    let written = container.close().unwrap();
    assert_eq!(written, path);

    let doc: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let datasets = doc["datasets"].as_array().unwrap();
    assert_eq!(datasets.len(), 2);
    assert_eq!(datasets[0]["name"], "sdos");
    assert_eq!(datasets[0]["dims"], serde_json::json!([2, 3]));
    assert_eq!(datasets[1]["description"], "freq_min, freq_max, freq_num");
    fs::remove_file(&path).unwrap();
}

#[test]
fn container_creates_missing_parent_directories() {
    let dir = env::temp_dir().join(format!("sdos3d-nested-{}", std::process::id()));
    let path = dir.join("deep/run-sdos.k0.json");
    let container = JsonContainer::create(&path).unwrap();
    container.close().unwrap();
    assert!(path.exists());
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn mismatched_dims_are_rejected() {
    let path = env::temp_dir().join(format!("sdos3d-shape-{}.json", std::process::id()));
    let mut container = JsonContainer::create(&path).unwrap();
    let err = container
        .write_real("sdos", "bad shape", &[4], &[0.0; 3])
        .unwrap_err();
    assert!(matches!(
        err,
        SdosError::ShapeMismatch {
            expected: 4,
            got: 3,
            ..
        }
    ));
}
