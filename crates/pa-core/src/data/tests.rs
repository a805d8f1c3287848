//! Tests for data module

use super::*;

fn reg(points: &[(f64, f64)]) -> Vec<RegressionDataPoint> {
    points.iter().copied().map(RegressionDataPoint::from).collect()
}

#[test]
fn test_label_keys() {
    assert_eq!(Label::from("A").key(), "A");
    assert_eq!(Label::from(1.0).key(), "1");
    assert_eq!(Label::from(2.5).key(), "2.5");
    assert!(Label::from(1).same_class(&Label::from(1.0)));
    assert!(Label::from(1.0).same_class(&Label::from("1")));
    assert!(!Label::from("a").same_class(&Label::from("A")));
}

#[test]
fn test_label_deserializes_untagged() {
    let labels: Vec<Label> = serde_json::from_str(r#"["spam", 3, 0.5]"#).unwrap();
    assert_eq!(labels[0], Label::Text("spam".to_string()));
    assert_eq!(labels[1], Label::Number(3.0));
    assert_eq!(labels[2], Label::Number(0.5));
}

#[test]
fn test_classification_point_without_label() {
    let point: ClassificationDataPoint = serde_json::from_str(r#"{"features":[1.0,2.0]}"#).unwrap();
    assert_eq!(point.features, vec![1.0, 2.0]);
    assert!(point.label.is_none());
}

#[test]
fn test_validate_regression() {
    let data = reg(&[(1.0, 2.0), (2.0, 4.0)]);
    assert!(validate_regression(&data, 2, "linear regression").is_ok());

    let err = validate_regression(&data[..1], 2, "linear regression").unwrap_err();
    assert_eq!(
        err,
        ValidationError::InsufficientData {
            context: "linear regression",
            required: 2,
            actual: 1
        }
    );

    let bad = reg(&[(1.0, 2.0), (f64::NAN, 4.0)]);
    assert_eq!(
        validate_regression(&bad, 2, "linear regression").unwrap_err(),
        ValidationError::NonFinite {
            set: "data",
            field: "x",
            index: 1
        }
    );

    let bad = reg(&[(1.0, f64::INFINITY), (2.0, 4.0)]);
    assert!(matches!(
        validate_regression(&bad, 2, "linear regression"),
        Err(ValidationError::NonFinite {
            set: "data",
            field: "y",
            index: 0
        })
    ));
}

#[test]
fn test_validate_classification_shapes() {
    let train = vec![
        ClassificationDataPoint::labeled(vec![0.0, 0.0], "A"),
        ClassificationDataPoint::labeled(vec![1.0, 1.0], "B"),
    ];
    let test = vec![ClassificationDataPoint::unlabeled(vec![0.5, 0.5])];
    assert_eq!(validate_classification(&train, &test).unwrap(), 2);

    assert_eq!(
        validate_classification(&[], &test).unwrap_err(),
        ValidationError::Empty { set: "training" }
    );
    assert_eq!(
        validate_classification(&train, &[]).unwrap_err(),
        ValidationError::Empty { set: "test" }
    );

    let ragged = vec![ClassificationDataPoint::unlabeled(vec![0.5])];
    assert_eq!(
        validate_classification(&train, &ragged).unwrap_err(),
        ValidationError::DimensionMismatch {
            set: "test",
            index: 0,
            expected: 2,
            actual: 1
        }
    );

    let unlabeled_train = vec![
        ClassificationDataPoint::labeled(vec![0.0, 0.0], "A"),
        ClassificationDataPoint::unlabeled(vec![1.0, 1.0]),
    ];
    assert_eq!(
        validate_classification(&unlabeled_train, &test).unwrap_err(),
        ValidationError::MissingLabel { index: 1 }
    );

    let empty_features = vec![ClassificationDataPoint::labeled(Vec::new(), "A")];
    assert_eq!(
        validate_classification(&empty_features, &test).unwrap_err(),
        ValidationError::EmptyFeatures
    );
}

#[test]
fn test_non_finite_features_name_their_set() {
    let train = vec![
        ClassificationDataPoint::labeled(vec![0.0, 0.0], "A"),
        ClassificationDataPoint::labeled(vec![1.0, f64::INFINITY], "B"),
    ];
    let test = vec![ClassificationDataPoint::unlabeled(vec![0.5, 0.5])];
    let err = validate_classification(&train, &test).unwrap_err();
    assert_eq!(
        err,
        ValidationError::NonFinite {
            set: "training",
            field: "features",
            index: 1
        }
    );

    let test = vec![
        ClassificationDataPoint::unlabeled(vec![0.5, 0.5]),
        ClassificationDataPoint::unlabeled(vec![f64::NAN, 0.5]),
    ];
    let err = validate_classification(&train[..1], &test).unwrap_err();
    assert_eq!(
        err,
        ValidationError::NonFinite {
            set: "test",
            field: "features",
            index: 1
        }
    );
    assert_eq!(
        err.to_string(),
        "Non-finite value in field 'features' of test set at index 1"
    );
}

#[test]
fn test_validate_series() {
    let series = vec![
        TimeSeriesData::new("2024-01-01", 10.0),
        TimeSeriesData::new("2024-01-02T12:00:00", 11.0),
        TimeSeriesData::new("2024-01-03T00:00:00+02:00", 12.0),
    ];
    assert!(validate_series(&series).is_ok());

    assert!(matches!(
        validate_series(&series[..1]),
        Err(ValidationError::InsufficientData { required: 2, actual: 1, .. })
    ));

    let bad_date = vec![
        TimeSeriesData::new("2024-01-01", 10.0),
        TimeSeriesData::new("yesterday", 11.0),
    ];
    assert_eq!(
        validate_series(&bad_date).unwrap_err(),
        ValidationError::InvalidDate {
            index: 1,
            value: "yesterday".to_string()
        }
    );
}

#[test]
fn test_parse_date_normalizes_offsets() {
    let date = parse_date("2024-03-01T01:00:00+02:00").unwrap();
    assert_eq!(date.to_string(), "2024-02-29 23:00:00");
    assert!(parse_date("2024-02-30").is_none());
}

#[test]
fn test_check_range() {
    assert!(check_range("y", 0, 0.5, 0.0, 1.0).is_ok());
    assert!(check_range("y", 0, 1.0, 0.0, 1.0).is_ok());
    assert!(matches!(
        check_range("y", 3, 1.5, 0.0, 1.0),
        Err(ValidationError::OutOfRange { index: 3, .. })
    ));
}
