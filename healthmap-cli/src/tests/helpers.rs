//! Test helpers writing datasets and boundary files to temporary directories.

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

pub(super) const DATASET: &str = r#"{
    "United Kingdom": {
        "England": {"name": "England", "hospitals": 1250, "doctors": 120000, "climate": "Temperate",
                    "healthAlerts": [], "healthcareIndex": 74, "lat": 52.36, "lng": -1.17},
        "Scotland": {"name": "Scotland", "hospitals": 300, "doctors": 15000, "climate": "Oceanic",
                     "healthAlerts": ["Flu season"], "healthcareIndex": 71, "lat": 56.49, "lng": -4.2},
        "Wales": {"name": "Wales", "hospitals": 220, "doctors": 9000, "climate": "Oceanic",
                  "healthAlerts": ["Flu season", "Norovirus"], "healthcareIndex": 68, "lat": 52.13, "lng": -3.78}
    },
    "India": {
        "Odisha": {"name": "Odisha", "hospitals": 1650, "doctors": 21000, "climate": "Tropical",
                   "healthAlerts": ["Heatwave"], "healthcareIndex": 55, "lat": 20.95, "lng": 85.1},
        "Kerala": {"name": "Kerala", "hospitals": 1280, "doctors": 45000, "climate": "Tropical monsoon",
                   "healthAlerts": [], "healthcareIndex": 82, "lat": 10.85, "lng": 76.27}
    }
}"#;

pub(super) const INDIA_BOUNDARIES: &str = r#"{"type": "FeatureCollection", "features": [
    {"type": "Feature", "properties": {"st_nm": "Orissa"}, "geometry": null},
    {"type": "Feature", "properties": {"st_nm": "KERALA"}, "geometry": null},
    {"type": "Feature", "properties": {"st_nm": "Lakshadweep"}, "geometry": null}
]}"#;

/// Temporary workspace holding a dataset and boundary files.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 tempdir");
        write_utf8(&root.join("regions.json"), DATASET.as_bytes());
        std::fs::create_dir(root.join("geojson")).expect("create geojson dir");
        write_utf8(
            &root.join("geojson/india-states.json"),
            INDIA_BOUNDARIES.as_bytes(),
        );
        Self { _dir: dir, root }
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn dataset(&self) -> Utf8PathBuf {
        self.root.join("regions.json")
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).unwrap_or_else(|err| panic!("failed to write {path}: {err}"));
}
