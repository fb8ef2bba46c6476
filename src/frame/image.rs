use crate::format::image::ImageFormat;
use crate::foundation::error::{FrameError, FrameResult};
use crate::frame::buffer::Image;
use crate::frame::entity::{Frame, TEST_IMAGE};
use crate::frame::stack::StackItem;
use std::any::Any;

/// What a consumer asks of [`Frame::get_image`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImageRequest {
    /// Desired pixel layout; [`ImageFormat::None`] accepts whatever the pipeline produces.
    pub format: ImageFormat,
    /// Desired width; `0` means no preference.
    pub width: u32,
    /// Desired height; `0` means no preference.
    pub height: u32,
    /// The caller intends to mutate the returned buffer.
    ///
    /// When set, the returned image never shares its bytes with the frame's cache or any other
    /// holder.
    pub writable: bool,
}

impl ImageRequest {
    /// Request `format` with no size preference.
    pub fn new(format: ImageFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    /// Set the preferred size.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Ask for a private, mutable buffer.
    pub fn writable(mut self) -> Self {
        self.writable = true;
        self
    }
}

/// One link of a frame's image pipeline.
///
/// A step is popped and invoked once. It may call [`Frame::get_image`] itself to resolve
/// everything pushed before it, transform the result, and return it. The format it returns need
/// not match the request; the frame converts on the way out.
pub trait ImageStep: Send {
    /// Produce an image for `frame`.
    fn get_image(self: Box<Self>, frame: &mut Frame, request: &ImageRequest) -> FrameResult<Image>;
}

impl<F> ImageStep for F
where
    F: FnOnce(&mut Frame, &ImageRequest) -> FrameResult<Image> + Send,
{
    fn get_image(self: Box<Self>, frame: &mut Frame, request: &ImageRequest) -> FrameResult<Image> {
        (*self)(frame, request)
    }
}

impl Frame {
    /// Push an image-processing step. The most recently pushed step runs first.
    pub fn push_get_image(&mut self, step: impl ImageStep + 'static) {
        self.image_stack.push(StackItem::Step(Box::new(step)));
    }

    /// Pop the most recently pushed image step.
    ///
    /// `Ok(None)` when the stack is empty; an error, with the stack untouched, when stage data
    /// is on top.
    pub fn pop_get_image(&mut self) -> FrameResult<Option<Box<dyn ImageStep>>> {
        self.image_stack.pop_step("image")
    }

    /// Push stage-local data onto the image stack for a step to pop later.
    pub fn push_image_data<T: Any + Send>(&mut self, data: T) {
        self.image_stack.push(StackItem::Data(Box::new(data)));
    }

    /// Pop stage-local data of type `T` from the image stack.
    pub fn pop_image_data<T: Any + Send>(&mut self) -> FrameResult<Option<T>> {
        Ok(self.image_stack.pop_data::<T>("image")?.map(|data| *data))
    }

    /// Resolve the frame's image.
    ///
    /// Pops and runs the top step; with an empty stack, returns the image already attached to the
    /// frame; with neither, fails with [`FrameError::EmptyPipeline`]. The alpha plane of an
    /// alpha-carrying result is kept for [`Frame::get_alpha_mask`], then the result is converted to
    /// `request.format`, recorded (`width`, `height`, `format` properties) and cached on the frame.
    #[tracing::instrument(level = "debug", skip(self), fields(position = self.position()))]
    pub fn get_image(&mut self, request: &ImageRequest) -> FrameResult<Image> {
        let mut image = match self.pop_get_image()? {
            Some(step) => self.run_step("image", |frame| step.get_image(frame, request))?,
            None => match &self.image {
                Some(image) => image.clone(),
                None => {
                    return Err(FrameError::empty_pipeline(
                        "image stack is empty and no image is attached",
                    ));
                }
            },
        };
        image.ensure_consistent()?;

        if image.format.has_alpha()
            && let Some(mask) = self.converter.alpha_mask(&image)
        {
            self.alpha = Some(mask);
        }
        self.convert_image(&mut image, request.format)?;

        self.attach_image(image.clone());
        if request.writable {
            image.make_private();
        }
        Ok(image)
    }

    /// Resolve the image, substituting a white test card when resolution fails or video is hidden.
    ///
    /// The placeholder uses the requested format (`yuv422` when none is requested) at the
    /// requested size, falling back to the frame's normalised size. Any alpha mask kept from a
    /// partial resolution is discarded, so the card is fully opaque.
    pub fn get_image_or_test_card(&mut self, request: &ImageRequest) -> Image {
        if !self.is_video_hidden() {
            match self.get_image(request) {
                Ok(image) => return image,
                Err(err) => tracing::warn!(
                    position = self.position(),
                    error = %err,
                    "image resolution failed; substituting test card"
                ),
            }
        }

        let format = match request.format {
            ImageFormat::None => ImageFormat::Yuv422,
            format => format,
        };
        let width = match request.width {
            0 => self.dimension("normalised_width", self.profile().width),
            w => w,
        };
        let height = match request.height {
            0 => self.dimension("normalised_height", self.profile().height),
            h => h,
        };
        let image = Image::white(format, width, height);
        self.alpha = None;
        self.attach_image(image.clone());
        self.props.set_int(TEST_IMAGE, 1);
        image
    }

    /// Attach a fully resolved image directly, bypassing the stack.
    ///
    /// Discards any previously attached image and alpha mask and clears the test-card flag.
    pub fn replace_image(&mut self, image: Image) -> FrameResult<()> {
        image.ensure_consistent()?;
        self.alpha = None;
        self.attach_image(image);
        self.props.remove(TEST_IMAGE);
        Ok(())
    }

    /// The image attached to the frame, if any, without resolving anything.
    pub fn image(&self) -> Option<&Image> {
        self.image.as_ref()
    }

    /// Convert `image` to `target` with the frame's converter.
    ///
    /// A no-op when `image` is already in `target` or `target` is [`ImageFormat::None`].
    pub fn convert_image(&self, image: &mut Image, target: ImageFormat) -> FrameResult<()> {
        if target == ImageFormat::None || image.format == target {
            return Ok(());
        }
        let converted = self.converter.convert_image(image, target)?;
        if converted.format != target {
            return Err(FrameError::unsupported_format(format!(
                "converter returned {} when asked for {}",
                converted.format, target
            )));
        }
        converted.ensure_consistent()?;
        *image = converted;
        Ok(())
    }

    /// 8-bit alpha mask sized to the last resolved image.
    ///
    /// The mask may come from an earlier stage: [`Frame::get_image`] keeps the alpha plane of any
    /// alpha-carrying intermediate, and it survives later steps that return a non-alpha image of
    /// the same size. Otherwise it is computed on first use from the attached image through the
    /// converter, or fully opaque (`255`) when no alpha information exists. Never empty unless the
    /// image is.
    pub fn get_alpha_mask(&mut self) -> &[u8] {
        let len = self.dimension("width", 0) as usize * self.dimension("height", 0) as usize;
        if self.alpha.as_ref().is_none_or(|mask| mask.len() != len) {
            let mask = self
                .image
                .as_ref()
                .filter(|image| image.pixel_count() == len)
                .and_then(|image| self.converter.alpha_mask(image))
                .filter(|mask| mask.len() == len)
                .unwrap_or_else(|| vec![u8::MAX; len]);
            self.alpha = Some(mask);
        }
        self.alpha.as_deref().unwrap_or_default()
    }

    /// The cached alpha mask, if one has been computed or extracted.
    pub fn alpha_mask_cached(&self) -> Option<&[u8]> {
        self.alpha.as_deref()
    }

    fn attach_image(&mut self, image: Image) {
        self.props.set_int("width", i64::from(image.width));
        self.props.set_int("height", i64::from(image.height));
        self.props.set_int("format", i64::from(image.format.code()));
        if self
            .alpha
            .as_ref()
            .is_some_and(|mask| mask.len() != image.pixel_count())
        {
            self.alpha = None;
        }
        self.image = Some(image);
    }

    fn dimension(&self, name: &str, fallback: u32) -> u32 {
        u32::try_from(self.props.get_int(name))
            .ok()
            .filter(|&v| v > 0)
            .unwrap_or(fallback)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frame/image.rs"]
mod tests;
