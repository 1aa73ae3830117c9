use std::fs;

use placematch_ingest::{IngestError, read_dataset, read_name_set, write_dataset};
use placematch_model::CellValue;

const COUNTIES: &str = "\
NAME_1,NAME_2,population
Tehran,Rey,350000
Tehran,Tehran,8700000
Khorasan-e Razavi,Mashhad,3000000
Kohgiluyeh and Boyer-Ahmad,Yasooj,100000
,Null,
";

#[test]
fn reads_county_names_with_provinces() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("counties.csv");
    fs::write(&path, COUNTIES).unwrap();

    let names = read_name_set(&path, "NAME_2", Some("NAME_1")).unwrap();
    assert_eq!(names.len(), 4);
    assert_eq!(names.parent_of("Mashhad"), Some("Khorasan-e Razavi"));
    assert!(!names.contains("Null"));
    assert_eq!(names.scoped_to("tehran").len(), 2);
}

#[test]
fn missing_column_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("counties.csv");
    fs::write(&path, COUNTIES).unwrap();

    let err = read_name_set(&path, "shahrestan", None).unwrap_err();
    assert!(matches!(err, IngestError::MissingColumn { ref column, .. } if column == "shahrestan"));
    assert!(err.to_string().contains("counties.csv"));
}

#[test]
fn relabeled_dataset_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("cases.csv");
    let output = dir.path().join("cases_relabeled.csv");
    fs::write(&input, "county,cases\nRay,12\nIzeh,\n").unwrap();

    let mut dataset = read_dataset(&input).unwrap();
    dataset.rows[0][0] = CellValue::Text("Rey".to_string());
    write_dataset(&dataset, &output).unwrap();

    assert_eq!(fs::read_to_string(&output).unwrap(), "county,cases\nRey,12\nIzeh,\n");
}
