use super::*;

#[test]
fn default_profile_is_pal() {
    let p = Profile::default();
    assert_eq!((p.width, p.height), (720, 576));
    assert_eq!(p.fps, Fps::new(25, 1).unwrap());
    assert!((p.sample_aspect_ratio() - 16.0 / 15.0).abs() < 1e-12);
    p.validate().unwrap();
}

#[test]
fn json_fills_missing_fields_with_defaults() {
    let p = Profile::from_json_str(
        r#"{"width": 1920, "height": 1080, "fps": {"num": 30000, "den": 1001}}"#,
    )
    .unwrap();
    assert_eq!(p.width, 1920);
    assert_eq!(p.fps, Fps::new(30_000, 1001).unwrap());
    assert_eq!(p.frequency, 48_000);
    assert_eq!(p.channels, 2);
}

#[test]
fn json_rejects_unusable_values() {
    let err = Profile::from_json_str(r#"{"width": 0}"#).unwrap_err();
    assert!(matches!(err, FrameError::Validation(_)));

    let err = Profile::from_json_str(r#"{"fps": {"num": 25, "den": 0}}"#).unwrap_err();
    assert!(matches!(err, FrameError::Validation(_)));

    let err = Profile::from_json_str("{not json").unwrap_err();
    assert!(matches!(err, FrameError::Serde(_)));
}

#[test]
fn missing_profile_file_is_a_validation_error() {
    let err = Profile::from_path("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("failed to read profile"));
}
