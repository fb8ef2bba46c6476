use super::*;
use crate::convert::NullConverter;
use crate::format::image::ImageFormat;
use crate::frame::ImageRequest;
use crate::service::Service;
use std::sync::atomic::{AtomicUsize, Ordering};

struct Source(Profile);

impl Service for Source {
    fn name(&self) -> &str {
        "source"
    }

    fn profile(&self) -> &Profile {
        &self.0
    }
}

struct DropCounter(Arc<AtomicUsize>);

impl Drop for DropCounter {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

fn frame() -> Frame {
    Frame::new(Arc::new(Source(Profile::default())))
}

#[test]
fn new_frame_takes_defaults_from_the_profile() {
    let f = frame();
    assert_eq!(f.position(), 0);
    assert_eq!(f.properties().get_int("width"), 720);
    assert_eq!(f.properties().get_int("normalised_height"), 576);
    assert!((f.aspect_ratio() - 16.0 / 15.0).abs() < 1e-12);
    assert_eq!(f.speed(), 1.0);
    assert_eq!(f.image_stack_len(), 0);
    assert_eq!(f.audio_stack_len(), 0);
    assert_eq!(f.service_stack_len(), 0);
    assert!(f.image().is_none());
    assert!(f.audio().is_none());
}

#[test]
fn aspect_ratio_falls_back_when_unusable() {
    let mut f = frame();
    f.set_aspect_ratio(1.5);
    assert_eq!(f.aspect_ratio(), 1.5);
    f.set_aspect_ratio(0.0);
    assert!((f.aspect_ratio() - 16.0 / 15.0).abs() < 1e-12);
    f.properties_mut().remove(ASPECT_RATIO);
    assert!((f.aspect_ratio() - 16.0 / 15.0).abs() < 1e-12);
}

#[test]
fn flags_read_their_properties() {
    let mut f = frame();
    assert!(!f.is_test_card());
    assert!(!f.is_video_hidden());
    assert!(!f.is_audio_muted());
    assert!(!f.is_last_track());

    f.set(HIDE, 3);
    assert!(f.is_video_hidden());
    assert!(f.is_audio_muted());
    f.set(HIDE, 2);
    assert!(!f.is_video_hidden());
    assert!(f.is_audio_muted());

    f.set(TEST_IMAGE, 1);
    f.set(TEST_AUDIO, true);
    assert!(f.is_test_card());
    assert!(f.is_test_audio());

    f.set_last_track(true);
    assert!(f.is_last_track());
    f.set_last_track(false);
    assert!(!f.is_last_track());

    f.set_speed(-2.0);
    assert_eq!(f.speed(), -2.0);
}

#[test]
fn metadata_lists_prefixed_entries_only() {
    let mut f = frame();
    f.set_meta("title", "Intro");
    f.set_meta("volume", 0.8);
    f.set("title", "not metadata");

    let mut meta: Vec<(String, String)> = f
        .metadata()
        .map(|(k, v)| (k.to_owned(), v.as_string().unwrap_or_default()))
        .collect();
    meta.sort();
    assert_eq!(
        meta,
        vec![
            ("title".to_owned(), "Intro".to_owned()),
            ("volume".to_owned(), "0.8".to_owned()),
        ]
    );
}

#[test]
fn original_producer_survives_service_stack_traffic() {
    let source: ServiceRef = Arc::new(Source(Profile::default()));
    let mut f = Frame::new(Arc::clone(&source));
    f.push_service(Arc::new(Source(Profile::default())));
    assert!(Arc::ptr_eq(f.original_producer(), &source));
    assert_eq!(f.profile().width, 720);
}

#[test]
fn close_releases_every_stack_item_once() {
    let drops = Arc::new(AtomicUsize::new(0));
    let mut f = frame();

    let guard = DropCounter(Arc::clone(&drops));
    f.push_get_image(move |_: &mut Frame, _: &ImageRequest| -> FrameResult<Image> {
        let _keep = &guard;
        Ok(Image::solid_rgba(1, 1, [0; 4]))
    });
    f.push_image_data(DropCounter(Arc::clone(&drops)));
    f.push_audio_data(DropCounter(Arc::clone(&drops)));
    f.push_service_data(Arc::new(DropCounter(Arc::clone(&drops))));

    let mut inner = frame();
    inner.push_image_data(DropCounter(Arc::clone(&drops)));
    f.push_frame(inner);

    f.close();
    assert_eq!(drops.load(Ordering::SeqCst), 5);
}

#[test]
fn dropping_is_equivalent_to_closing() {
    let drops = Arc::new(AtomicUsize::new(0));
    {
        let mut f = frame();
        f.push_audio_data(DropCounter(Arc::clone(&drops)));
        f.push_service_data(Arc::new(DropCounter(Arc::clone(&drops))));
    }
    assert_eq!(drops.load(Ordering::SeqCst), 2);
}

#[test]
fn shared_service_data_outlives_the_frame() {
    let drops = Arc::new(AtomicUsize::new(0));
    let shared = Arc::new(DropCounter(Arc::clone(&drops)));
    let mut f = frame();
    f.push_service_data(Arc::clone(&shared));
    f.close();
    assert_eq!(drops.load(Ordering::SeqCst), 0);
    drop(shared);
    assert_eq!(drops.load(Ordering::SeqCst), 1);
}

#[test]
fn explicit_converter_is_used() {
    let mut f = Frame::with_converter(
        Arc::new(Source(Profile::default())),
        Arc::new(NullConverter),
    );
    f.replace_image(Image::white(ImageFormat::Rgb24, 2, 2)).unwrap();
    assert!(f.get_image(&ImageRequest::new(ImageFormat::Yuv420p)).is_err());
    assert!(f.get_image(&ImageRequest::new(ImageFormat::Rgb24)).is_ok());
}

#[test]
fn debug_summarises_without_buffers() {
    let mut f = frame();
    f.set_position(4);
    let text = format!("{f:?}");
    assert!(text.contains("source"));
    assert!(text.contains("position: 4"));
}
