// Writing the current image to disk ("download"). Always PNG on disk.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::Context;
use image::ImageFormat;
use photofilter_core::ImageRef;

/// File name used when saving into a directory.
pub const DOWNLOAD_FILE_NAME: &str = "download.png";

/// Save `image` as `<dir>/download.png`, creating `dir` if needed.
pub fn save_to_dir(dir: impl AsRef<Path>, image: &ImageRef) -> anyhow::Result<PathBuf> {
    let path = dir.as_ref().join(DOWNLOAD_FILE_NAME);
    save_as(&path, image)?;
    Ok(path)
}

/// Save `image` to exactly `path`.
pub fn save_as(path: impl AsRef<Path>, image: &ImageRef) -> anyhow::Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create parent dir: {}", parent.display()))?;
    }

    let bytes = image.decode().context("decode current image")?;
    let bytes = to_png(bytes).context("encode current image as PNG")?;
    fs::write(path, &bytes).with_context(|| format!("write image file: {}", path.display()))?;

    tracing::info!(path = %path.display(), bytes = bytes.len(), "image saved");
    Ok(())
}

// Uploads can be JPEG; filter and transform output is already PNG and is written as is.
fn to_png(bytes: Vec<u8>) -> image::ImageResult<Vec<u8>> {
    let format = image::guess_format(&bytes)?;
    if format == ImageFormat::Png {
        return Ok(bytes);
    }

    let decoded = image::load_from_memory_with_format(&bytes, format)?;
    let mut out = Cursor::new(Vec::new());
    decoded.write_to(&mut out, ImageFormat::Png)?;
    tracing::debug!(from = ?format, "re-encoded image as PNG");
    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgb, RgbImage};

    fn encoded(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([200, 40, 40]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img).write_to(&mut out, format).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_save_to_missing_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("cache").join("nested");
        let png = encoded(2, 2, ImageFormat::Png);

        let path = save_to_dir(&dir, &ImageRef::from_bytes(&png)).unwrap();
        assert_eq!(path.file_name().unwrap(), DOWNLOAD_FILE_NAME);
        assert_eq!(fs::read(&path).unwrap(), png);
    }

    #[test]
    fn test_jpeg_upload_is_written_as_png() {
        let tmp = tempfile::tempdir().unwrap();
        let jpeg = encoded(4, 3, ImageFormat::Jpeg);

        let path = save_to_dir(tmp.path(), &ImageRef::from_bytes(&jpeg)).unwrap();
        let written = fs::read(&path).unwrap();
        assert_eq!(image::guess_format(&written).unwrap(), ImageFormat::Png);
        let decoded = image::load_from_memory(&written).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (4, 3));
    }

    #[test]
    fn test_unknown_format_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = save_as(tmp.path().join("x.png"), &ImageRef::from_bytes(b"not an image"))
            .unwrap_err();
        assert!(format!("{:#}", err).contains("encode current image as PNG"));
        assert!(!tmp.path().join("x.png").exists());
    }

    #[test]
    fn test_undecodable_payload_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = save_as(tmp.path().join("x.png"), &ImageRef::from_base64("%%%")).unwrap_err();
        assert!(format!("{:#}", err).contains("decode current image"));
    }
}
