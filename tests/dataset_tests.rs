use linechart_rs::core::{Dataset, Series};
use linechart_rs::error::ChartError;
use linechart_rs::render::Color;

const KEYED: &str = r##"{
    "columns": {
        "x": [1542412800000, 1542499200000, 1542585600000],
        "y0": [37, 20, 32],
        "y1": [22, 12, 30]
    },
    "types": { "x": "x", "y0": "line", "y1": "line" },
    "names": { "y0": "Joined", "y1": "Left" },
    "colors": { "y0": "#3DC23F", "y1": "#F34C44" }
}"##;

#[test]
fn keyed_columns_load_in_type_order() {
    let dataset = Dataset::from_json_str(KEYED).expect("valid dataset");

    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.series_count(), 2);
    assert_eq!(dataset.x_values()[0], 1_542_412_800_000.0);
    let first = dataset.series_at(0).expect("series 0");
    assert_eq!(first.id, "y0");
    assert_eq!(first.name, "Joined");
    assert_eq!(first.values, vec![37.0, 20.0, 32.0]);
    assert_eq!(first.color, Color::from_hex("#3DC23F").expect("hex"));
}

#[test]
fn labelled_columns_match_keyed_columns() {
    let labelled = r##"{
        "columns": [
            ["x", 1542412800000, 1542499200000, 1542585600000],
            ["y0", 37, 20, 32],
            ["y1", 22, 12, 30]
        ],
        "types": { "x": "x", "y0": "line", "y1": "line" },
        "names": { "y0": "Joined", "y1": "Left" },
        "colors": { "y0": "#3DC23F", "y1": "#F34C44" }
    }"##;

    let a = Dataset::from_json_str(labelled).expect("labelled");
    let b = Dataset::from_json_str(KEYED).expect("keyed");
    assert_eq!(a, b);
}

#[test]
fn missing_x_role_is_rejected() {
    let json = r##"{
        "columns": { "y0": [1, 2] },
        "types": { "y0": "line" },
        "names": { "y0": "A" },
        "colors": { "y0": "#000" }
    }"##;

    let err = Dataset::from_json_str(json).expect_err("no x column");
    assert!(matches!(err, ChartError::MissingXColumn));
}

#[test]
fn missing_series_color_is_rejected() {
    let json = r##"{
        "columns": { "x": [1, 2], "y0": [1, 2] },
        "types": { "x": "x", "y0": "line" },
        "names": { "y0": "A" },
        "colors": {}
    }"##;

    let err = Dataset::from_json_str(json).expect_err("no color");
    assert!(matches!(
        err,
        ChartError::MissingSeriesMetadata { field: "color", .. }
    ));
}

#[test]
fn non_numeric_values_are_rejected() {
    let json = r##"{
        "columns": { "x": [1, 2], "y0": [1, "two"] },
        "types": { "x": "x", "y0": "line" },
        "names": { "y0": "A" },
        "colors": { "y0": "#000" }
    }"##;

    let err = Dataset::from_json_str(json).expect_err("string value");
    assert!(matches!(err, ChartError::NonNumericValue { index: 1, .. }));
}

#[test]
fn length_mismatch_and_empty_inputs_are_rejected() {
    let black = Color::rgb(0.0, 0.0, 0.0);

    let err = Dataset::new(
        vec![0.0, 1.0],
        vec![Series::new("a", "A", black, vec![1.0])],
    )
    .expect_err("short series");
    assert!(matches!(
        err,
        ChartError::ColumnLengthMismatch {
            expected: 2,
            actual: 1,
            ..
        }
    ));

    assert!(matches!(
        Dataset::new(Vec::new(), vec![Series::new("a", "A", black, Vec::new())]),
        Err(ChartError::EmptyDataset)
    ));
    assert!(matches!(
        Dataset::new(vec![0.0], Vec::new()),
        Err(ChartError::NoSeries)
    ));
}

#[test]
fn series_lookup_out_of_range_is_an_error() {
    let dataset = Dataset::from_json_str(KEYED).expect("valid dataset");

    assert!(matches!(
        dataset.series_at(2),
        Err(ChartError::SeriesIndexOutOfRange { index: 2, len: 2 })
    ));
}
