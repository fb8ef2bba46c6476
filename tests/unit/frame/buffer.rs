use super::*;

#[test]
fn new_rejects_short_buffers() {
    assert!(Image::new(ImageFormat::Rgb24, 2, 2, vec![0; 11]).is_err());
    assert!(Image::new(ImageFormat::Rgb24, 2, 2, vec![0; 12]).is_ok());
    assert!(Audio::new(AudioFormat::S16, 48_000, 2, 4, vec![0; 15]).is_err());
    assert!(Audio::new(AudioFormat::S16, 48_000, 0, 4, vec![]).is_err());
}

#[test]
fn data_mut_copies_shared_bytes() {
    let a = Image::solid_rgba(2, 1, [1, 2, 3, 4]);
    let mut b = a.clone();
    assert!(a.shares_buffer_with(&b));

    b.data_mut()[0] = 9;
    assert!(!a.shares_buffer_with(&b));
    assert_eq!(a.data()[0], 1);
    assert_eq!(b.data()[0], 9);
}

#[test]
fn white_placeholders_fill_every_layout() {
    let rgb = Image::white(ImageFormat::Rgb24, 2, 2);
    assert!(rgb.data().iter().all(|&b| b == 255));

    let yuyv = Image::white(ImageFormat::Yuv422, 2, 1);
    assert_eq!(yuyv.data(), &[235, 128, 235, 128]);

    let planar = Image::white(ImageFormat::Yuv420p, 2, 2);
    assert_eq!(planar.data(), &[235, 235, 235, 235, 128, 128]);

    assert!(Image::white(ImageFormat::None, 4, 4).data().is_empty());
}

#[test]
fn silence_uses_format_midpoint() {
    let s16 = Audio::silence(AudioFormat::S16, 48_000, 2, 3);
    assert_eq!(s16.data().len(), 12);
    assert!(s16.data().iter().all(|&b| b == 0));

    let u8s = Audio::silence(AudioFormat::U8, 8_000, 1, 4);
    assert_eq!(u8s.data(), &[128, 128, 128, 128]);
}

#[test]
fn s16_view_decodes_little_endian() {
    let audio = Audio::new(AudioFormat::S16, 8_000, 1, 2, vec![0x01, 0x00, 0xff, 0xff]).unwrap();
    assert_eq!(audio.s16_samples().unwrap(), vec![1, -1]);

    let f = Audio::silence(AudioFormat::F32le, 8_000, 1, 2);
    assert!(f.s16_samples().is_err());
}

#[test]
fn s16_view_rejects_a_layout_larger_than_its_bytes() {
    let mut audio = Audio::new(AudioFormat::S16, 48_000, 2, 1, vec![0; 4]).unwrap();
    assert_eq!(audio.s16_samples().unwrap(), vec![0, 0]);

    audio.samples = 10;
    assert!(matches!(
        audio.s16_samples(),
        Err(FrameError::InvalidState(_))
    ));
}
