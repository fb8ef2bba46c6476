use super::*;

#[test]
fn names_are_stable() {
    let names: Vec<&str> = ImageFormat::ALL.iter().map(|f| f.name()).collect();
    assert_eq!(names, vec!["none", "rgb24", "rgb24a", "yuv422", "yuv420p"]);
}

#[test]
fn name_lookup_is_total_over_codes() {
    assert_eq!(image_format_name(3), "yuv422");
    assert_eq!(image_format_name(-1), "invalid");
    assert_eq!(image_format_name(99), "invalid");
}

#[test]
fn codes_round_trip() {
    for f in ImageFormat::ALL {
        assert_eq!(ImageFormat::try_from(f.code()).unwrap(), f);
        assert_eq!(f.name().parse::<ImageFormat>().unwrap(), f);
    }
    assert!("bgr".parse::<ImageFormat>().is_err());
}

#[test]
fn buffer_sizes_follow_layout() {
    assert_eq!(ImageFormat::None.buffer_size(4, 4), 0);
    assert_eq!(ImageFormat::Rgb24.buffer_size(4, 2), 24);
    assert_eq!(ImageFormat::Rgb24a.buffer_size(4, 2), 32);
    assert_eq!(ImageFormat::Yuv422.buffer_size(4, 2), 16);
    assert_eq!(ImageFormat::Yuv420p.buffer_size(4, 2), 12);
    // Odd sizes round chroma up.
    assert_eq!(ImageFormat::Yuv422.buffer_size(3, 1), 8);
    assert_eq!(ImageFormat::Yuv420p.buffer_size(3, 3), 9 + 2 * 4);
}
