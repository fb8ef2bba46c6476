use super::*;

fn s16(samples: &[i16], channels: u16) -> Audio {
    let data: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
    let n = samples.len() as u32 / u32::from(channels);
    Audio::new(AudioFormat::S16, 48_000, channels, n, data).unwrap()
}

fn f32s(audio: &Audio) -> Vec<f32> {
    audio
        .data()
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect()
}

#[test]
fn s16_to_planar_float_deinterleaves() {
    let src = s16(&[16_384, -16_384, 0, 32_767], 2);
    let planar = convert(&src, AudioFormat::Float).unwrap();
    let v = f32s(&planar);
    // Channel 0 first, then channel 1.
    assert!((v[0] - 0.5).abs() < 1e-4);
    assert!(v[1].abs() < 1e-4);
    assert!((v[2] + 0.5).abs() < 1e-4);
    assert!((v[3] - 1.0).abs() < 1e-3);
}

#[test]
fn s16_round_trips_through_every_wider_encoding() {
    let src = s16(&[1, -2, 300, -32_768, 32_767, 0], 2);
    for via in [
        AudioFormat::S32,
        AudioFormat::S32le,
        AudioFormat::Float,
        AudioFormat::F32le,
    ] {
        let mid = convert(&src, via).unwrap();
        assert_eq!(mid.format, via);
        let back = convert(&mid, AudioFormat::S16).unwrap();
        assert_eq!(back.s16_samples().unwrap(), src.s16_samples().unwrap(), "via {via}");
    }
}

#[test]
fn u8_keeps_the_high_byte() {
    let src = s16(&[0, 0x7f00, -0x8000], 1);
    let u8s = convert(&src, AudioFormat::U8).unwrap();
    assert_eq!(u8s.data(), &[128, 255, 0]);
}

#[test]
fn float_to_float_is_lossless() {
    let data: Vec<u8> = [0.123_456_7f32, -0.75, 0.5, 0.25]
        .iter()
        .flat_map(|f| f.to_le_bytes())
        .collect();
    let planar = Audio::new(AudioFormat::Float, 44_100, 2, 2, data).unwrap();
    let interleaved = convert(&planar, AudioFormat::F32le).unwrap();
    assert_eq!(f32s(&interleaved), vec![0.123_456_7, 0.5, -0.75, 0.25]);
    let back = convert(&interleaved, AudioFormat::Float).unwrap();
    assert_eq!(back, planar);
}

#[test]
fn none_has_no_conversion_path() {
    let src = s16(&[1, 2], 2);
    assert!(matches!(
        convert(&src, AudioFormat::None),
        Err(FrameError::UnsupportedFormat(_))
    ));
}

#[test]
fn gain_scales_and_saturates() {
    let mut a = s16(&[1000, -1000, 30_000], 1);
    apply_gain(&mut a, 0.5);
    assert_eq!(a.s16_samples().unwrap(), vec![500, -500, 15_000]);

    apply_gain(&mut a, 4.0);
    assert_eq!(a.s16_samples().unwrap(), vec![2000, -2000, 32_767]);

    apply_gain(&mut a, 0.0);
    assert_eq!(a.s16_samples().unwrap(), vec![0, 0, 0]);
}

#[test]
fn converting_twice_equals_converting_once() {
    let src = s16(&[1200, -1200, 32_767, -32_768], 2);
    for target in [AudioFormat::F32le, AudioFormat::Float, AudioFormat::U8, AudioFormat::S32] {
        let once = convert(&src, target).unwrap();
        let twice = convert(&once, target).unwrap();
        assert_eq!(once, twice, "{target}");
    }
}
