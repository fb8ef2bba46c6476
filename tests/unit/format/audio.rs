use super::*;

#[test]
fn names_are_stable() {
    let names: Vec<&str> = AudioFormat::ALL.iter().map(|f| f.name()).collect();
    assert_eq!(
        names,
        vec!["none", "s16", "s32", "float", "s32le", "f32le", "u8"]
    );
}

#[test]
fn name_lookup_is_total_over_codes() {
    assert_eq!(audio_format_name(1), "s16");
    assert_eq!(audio_format_name(7), "invalid");
    assert_eq!(audio_format_name(i32::MIN), "invalid");
}

#[test]
fn layout_queries() {
    assert!(AudioFormat::S32.is_planar());
    assert!(AudioFormat::Float.is_planar());
    assert!(!AudioFormat::F32le.is_planar());
    assert!(AudioFormat::F32le.is_float());
    assert_eq!(AudioFormat::S16.buffer_size(1920, 2), 7680);
    assert_eq!(AudioFormat::U8.buffer_size(10, 1), 10);
    assert_eq!(AudioFormat::None.buffer_size(10, 2), 0);
}
