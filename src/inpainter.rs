// Runs the selected inpainting algorithm over an RGB image and a brush mask.

use image::{GrayImage, RgbImage};
use inpaint::prelude::*;
use ndarray::{Array2, Array3};

use crate::error::{Error, Result};
use crate::mask::MASK_KEEP;
use crate::method::InpaintMethod;
use crate::ns::navier_stokes_inpaint;

impl InpaintMethod {
    /// Fill the pixels of `image` marked in `mask`, looking at most `radius`
    /// pixels away for known neighbours.
    ///
    /// On error `image` may be partially written; callers that need the
    /// original should work on a copy.
    pub fn inpaint(self, image: &mut RgbImage, mask: &GrayImage, radius: u32) -> Result<()> {
        if image.dimensions() != mask.dimensions() {
            return Err(Error::Inpaint(format!(
                "mask is {}x{} but image is {}x{}",
                mask.width(),
                mask.height(),
                image.width(),
                image.height()
            )));
        }
        // Clicks far outside the image clip the brush away entirely.
        if mask.as_raw().iter().all(|&v| v == MASK_KEEP) {
            return Ok(());
        }
        if !mask.as_raw().contains(&MASK_KEEP) {
            return Err(Error::Inpaint(
                "the mask covers the whole image, nothing is left to fill from".to_string(),
            ));
        }
        // No neighbourhood needs to reach further than across the image.
        let reach = image.width().saturating_add(image.height());
        let radius = i32::try_from(radius.min(reach)).unwrap_or(i32::MAX);

        match self {
            Self::Telea => image
                .telea_inpaint(mask, radius)
                .map_err(|e| Error::Inpaint(e.to_string())),
            Self::NavierStokes => ns_inpaint_rgb(image, mask, radius),
        }
    }
}

fn ns_inpaint_rgb(image: &mut RgbImage, mask: &GrayImage, radius: i32) -> Result<()> {
    let (width, height) = (image.width() as usize, image.height() as usize);

    let mut work = Array3::from_shape_vec(
        (height, width, 3),
        image.as_raw().iter().map(|&v| v as f32).collect(),
    )
    .map_err(|e| Error::Inpaint(e.to_string()))?;
    let hole = Array2::from_shape_vec(
        (height, width),
        mask.as_raw().iter().map(|&v| v != MASK_KEEP).collect(),
    )
    .map_err(|e| Error::Inpaint(e.to_string()))?;

    navier_stokes_inpaint(&mut work, &hole, radius)?;

    for (dst, src) in image.iter_mut().zip(work.iter()) {
        *dst = src.round().clamp(0.0, 255.0) as u8;
    }
    Ok(())
}
