use super::*;
use crate::format::image::ImageFormat;

#[test]
fn frames_resolve_colour_at_profile_size() {
    let producer = Arc::new(ColourProducer::new(Profile::default(), [10, 20, 30, 255]));
    let mut frame = producer.get_frame(3);
    assert_eq!(frame.position(), 3);

    let image = frame.get_image(&ImageRequest::new(ImageFormat::Rgb24)).unwrap();
    assert_eq!((image.width, image.height), (720, 576));
    assert_eq!(&image.data()[..3], &[10, 20, 30]);
    assert_eq!(frame.original_producer().name(), "colour");
}

#[test]
fn tone_is_phase_continuous_across_frames() {
    let profile = Profile::default();
    let producer = Arc::new(ColourProducer::new(profile.clone(), [0; 4]).with_tone(440.0, 0.5));

    let a = producer
        .get_frame(0)
        .get_audio(&AudioRequest::default())
        .unwrap();
    let b = producer
        .get_frame(1)
        .get_audio(&AudioRequest::default())
        .unwrap();
    assert_eq!(a.samples, 1920);
    assert_eq!(b.samples, 1920);

    // Rendering two frames' worth in one go must equal the concatenation.
    let both = producer
        .tone(0, &AudioRequest::new(AudioFormat::S16, 48_000, 2, 3840))
        .unwrap();
    let mut joined = a.s16_samples().unwrap();
    joined.extend(b.s16_samples().unwrap());
    assert_eq!(both.s16_samples().unwrap(), joined);
}

#[test]
fn silent_producer_yields_zero_samples() {
    let producer = Arc::new(ColourProducer::new(Profile::default(), [0; 4]));
    let audio = producer
        .get_frame(5)
        .get_audio(&AudioRequest::default())
        .unwrap();
    assert!(audio.s16_samples().unwrap().iter().all(|&s| s == 0));
}
