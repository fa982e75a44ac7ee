//! Rotate/flip through the `image` crate.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat};
use photofilter_core::{EditError, ImageRef, TransformOp};

pub trait Transformer {
    fn transform(&self, image: &ImageRef, op: TransformOp) -> Result<ImageRef, EditError>;
}

impl<T: Transformer + ?Sized> Transformer for &T {
    fn transform(&self, image: &ImageRef, op: TransformOp) -> Result<ImageRef, EditError> {
        (**self).transform(image, op)
    }
}

/// Decodes the payload, applies the op, and re-encodes as PNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageTransformer;

// Lossless, so repeated rotations do not degrade the image.
const OUTPUT_FORMAT: ImageFormat = ImageFormat::Png;

impl Transformer for ImageTransformer {
    fn transform(&self, image: &ImageRef, op: TransformOp) -> Result<ImageRef, EditError> {
        let bytes = image.decode()?;
        let decoded = image::load_from_memory(&bytes)
            .map_err(|e| EditError::InvalidImage(e.to_string()))?;

        let transformed = apply_op(&decoded, op);

        let mut out = Cursor::new(Vec::new());
        transformed
            .write_to(&mut out, OUTPUT_FORMAT)
            .map_err(|e| EditError::Transform(e.to_string()))?;

        tracing::debug!(
            op = %op,
            width = transformed.width(),
            height = transformed.height(),
            "transform applied"
        );
        Ok(ImageRef::from_bytes(out.get_ref()))
    }
}

fn apply_op(img: &DynamicImage, op: TransformOp) -> DynamicImage {
    match op {
        TransformOp::RotateCw => img.rotate90(),
        TransformOp::RotateCcw => img.rotate270(),
        TransformOp::FlipHorizontal => img.fliph(),
        TransformOp::FlipVertical => img.flipv(),
    }
}
