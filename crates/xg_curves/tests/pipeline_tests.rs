use xg_curves::prelude::*;

fn sample_dict() -> FunctionsDict {
    let mut dict = FunctionsDict::new();
    dict.update("f", 0.0, 1.0);
    dict.update("f", 2.0, 3.0);
    dict.update("g", 2.0, 5.0);
    dict.update("g", 0.0, f64::NAN);
    dict
}

#[test]
fn nan_fill_scenario_matches_the_worked_example() {
    let dict = sample_dict();
    let pipeline = Pipeline::new().with_stage(Box::new(ReplaceNaNWithStops { first_value: 10.0 })).with_stage(Box::new(CheckNoNaN::default()));
    let (result, status) = pipeline.run(dict).unwrap();
    assert_eq!(result.get_function_y("g", 0.0), Some(10.0));
    assert_eq!(result.get_function_y("g", 2.0), Some(5.0));
    assert_eq!(status, AbscissaStatus::SameX);
}

#[test]
fn same_xaxis_requiring_stage_rejects_an_unnormalized_dict() {
    let dict = sample_dict();
    let pipeline = Pipeline::new().with_stage(Box::new(StatisticsOfFunctionsPerX {
        source: vec!["f".to_string(), "g".to_string()],
        output_name: "mean".to_string(),
        aggregator: Box::new(Mean),
    }));
    let err = pipeline.run(dict).unwrap_err();
    assert!(matches!(err, CurveError::NotNormalized { changer: "StatisticsOfFunctionsPerX" }));
}

#[test]
fn statistics_stage_runs_once_the_axis_is_normalized() {
    let dict = sample_dict();
    let pipeline = Pipeline::new()
        .with_stage(Box::new(ReplaceNaNWithStops { first_value: 0.0 }))
        .with_stage(Box::new(CheckSameXAxis::default()))
        .with_stage(Box::new(StatisticsOfFunctionsPerX {
            source: vec!["f".to_string(), "g".to_string()],
            output_name: "mean".to_string(),
            aggregator: Box::new(Mean),
        }));
    let (result, _) = pipeline.run(dict).unwrap();
    assert_eq!(result.get_function_y("mean", 0.0), Some(0.5));
    assert_eq!(result.get_function_y("mean", 2.0), Some(4.0));
}

#[test]
fn check_no_invalid_numbers_catches_infinity_but_not_plain_nan() {
    let mut dict = FunctionsDict::new();
    dict.update("f", 0.0, f64::INFINITY);
    let pipeline = Pipeline::new().with_stage(Box::new(CheckNoInvalidNumbers::default()));
    let err = pipeline.run(dict).unwrap_err();
    assert!(matches!(err, CurveError::InvalidNumber { value, .. } if value.is_infinite()));
}

#[test]
fn quantize_xaxis_matches_the_worked_scenario() {
    let mut dict = FunctionsDict::new();
    for (x, y) in [(0.10, 3.0), (1.10, 5.0), (1.80, 7.0), (2.30, 9.0)] {
        dict.update("f", x, y);
    }
    let pipeline = Pipeline::new().with_stage(Box::new(QuantizeXAxis::new(vec![0.0, 1.0, 2.0, 3.0], Box::new(Max))));
    let (result, status) = pipeline.run(dict).unwrap();
    assert_eq!(result.xaxis_ordered(), &[1.0, 2.0, 3.0]);
    assert_eq!(result.get_function_y("f", 1.0), Some(3.0));
    assert_eq!(result.get_function_y("f", 2.0), Some(7.0));
    assert_eq!(result.get_function_y("f", 3.0), Some(9.0));
    assert_eq!(status, AbscissaStatus::Unknown);
}

#[test]
fn quantize_xaxis_drops_points_past_every_level() {
    let mut dict = FunctionsDict::new();
    dict.update("f", 0.5, 1.0);
    dict.update("f", 5.0, 2.0);
    let pipeline = Pipeline::new().with_stage(Box::new(QuantizeXAxis::new(vec![0.0, 1.0], Box::new(Max))));
    let (result, _) = pipeline.run(dict).unwrap();
    assert_eq!(result.xaxis_ordered(), &[1.0]);
    assert_eq!(result.get_function_y("f", 1.0), Some(1.0));
}

#[test]
fn remove_small_function_drops_sparse_series() {
    let mut dict = FunctionsDict::new();
    dict.update("dense", 0.0, 1.0);
    dict.update("dense", 1.0, 2.0);
    dict.update("dense", 2.0, 3.0);
    dict.update("sparse", 0.0, 1.0);
    let pipeline = Pipeline::new().with_stage(Box::new(RemoveSmallFunction { min_points: 2 }));
    let (result, _) = pipeline.run(dict).unwrap();
    let names: Vec<&str> = result.function_names().collect();
    assert_eq!(names, vec!["dense"]);
}

#[test]
fn replace_nan_with_previous_errors_when_the_leading_cell_is_undefined() {
    let mut dict = FunctionsDict::new();
    dict.update("f", 0.0, f64::NAN);
    dict.update("f", 1.0, 2.0);
    let pipeline = Pipeline::new().with_stage(Box::new(ReplaceNaNWithPrevious));
    let err = pipeline.run(dict).unwrap_err();
    assert!(matches!(err, CurveError::NoPreviousValue(name) if name == "f"));
}

#[test]
fn save_on_csv_writes_a_readable_file() {
    let mut dict = FunctionsDict::new();
    dict.update("f", 0.0, 1.5);
    dict.update("f", 1.0, f64::NAN);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    let pipeline = Pipeline::new().with_stage(Box::new(SaveOnCsv { path: path.clone() }));
    pipeline.run(dict).unwrap();
    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents, "x,f\n0,1.5\n1,\n");
}
