//! Integration test: load a small CV directory laid out like the CMIP6_CVs
//! repository and interpret each document.

use cmip6_cv_core::{CvDirectory, CvError, CvPayload, CvSource};
use std::path::Path;

fn write_cv(dir: &Path, key: &str, body: &str) {
    std::fs::write(dir.join(format!("CMIP6_{key}.json")), body).unwrap();
}

#[test]
fn test_interpret_cv_shapes() {
    let dir = tempfile::tempdir().unwrap();
    write_cv(
        dir.path(),
        "required_global_attributes",
        r#"{
            "required_global_attributes": ["activity_id", "source_id", "table_id"],
            "version_metadata": {"author": "Paul J. Durack"}
        }"#,
    );
    write_cv(
        dir.path(),
        "source_id",
        r#"{
            "source_id": {
                "ACCESS-CM2": {"label": "ACCESS-CM2", "institution_id": ["CSIRO-ARCCSS"]}
            },
            "version_metadata": {}
        }"#,
    );
    write_cv(
        dir.path(),
        "table_id",
        r#"{"table_id": ["3hr", "Amon"], "version_metadata": {}}"#,
    );

    let cvs = CvDirectory::new(dir.path());

    let required = cvs
        .read_document("required_global_attributes")
        .unwrap()
        .string_list()
        .unwrap();
    assert_eq!(required, vec!["activity_id", "source_id", "table_id"]);

    let source = cvs.read_document("source_id").unwrap();
    match &source.payload {
        CvPayload::Mapping(map) => assert_eq!(map["ACCESS-CM2"]["label"], "ACCESS-CM2"),
        other => panic!("expected mapping payload, got {other:?}"),
    }

    let tables = cvs.read_document("table_id").unwrap();
    assert!(matches!(tables.payload, CvPayload::List(ref items) if items.len() == 2));

    // activity_id is listed but has no file.
    assert!(matches!(
        cvs.read_document("activity_id"),
        Err(CvError::NotFound { .. })
    ));
}

#[test]
fn test_directory_in_place_of_cv_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    // A directory where the file should be: reading it is an I/O error.
    std::fs::create_dir(dir.path().join("CMIP6_realm.json")).unwrap();
    let err = CvDirectory::new(dir.path()).read_cv("realm").unwrap_err();
    assert!(
        matches!(err, CvError::Io { .. }),
        "expected Io error, got {err}"
    );
}
