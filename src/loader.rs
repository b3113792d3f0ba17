// Loads the source image the session will edit.

use std::path::Path;

use image::{ImageReader, RgbImage};

use crate::error::{Error, Result};

/// Load and validate the image at `path` as 8-bit RGB.
///
/// Fails with [`Error::PathNotFound`] when nothing exists at `path`, and with
/// [`Error::ImageDecode`] when the file exists but is not a decodable image.
pub fn load_image(path: &Path) -> Result<RgbImage> {
    if !path.exists() {
        return Err(Error::PathNotFound(path.to_path_buf()));
    }

    let decode_err = |source| Error::ImageDecode {
        path: path.to_path_buf(),
        source,
    };

    // Sniff the content rather than trusting the extension.
    let image = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| decode_err(image::ImageError::IoError(e)))?
        .decode()
        .map_err(decode_err)?;

    Ok(image.into_rgb8())
}
