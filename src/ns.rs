//! PDE-based inpainting in the spirit of Bertalmio et al. ("Navier-Stokes,
//! fluid dynamics, and image and video inpainting").
//!
//! The hole is first seeded by peeling it from the outside in, each pixel
//! taking the distance-weighted mean of known pixels within `radius`. The
//! seed is then refined by alternating two explicit steps restricted to the
//! hole: transport of the image smoothness (its Laplacian) along isophotes,
//! and a short isotropic diffusion that keeps the transport stable.

use ndarray::{Array2, Array3};

use crate::error::{Error, Result};

/// Total refinement iterations.
const ITERATIONS: usize = 600;
/// Run `DIFFUSION_STEPS` diffusion steps after every `DIFFUSION_EVERY` transport steps.
const DIFFUSION_EVERY: usize = 15;
const DIFFUSION_STEPS: usize = 2;
const TRANSPORT_DT: f32 = 0.1;
const DIFFUSION_DT: f32 = 0.2;
const EPS: f32 = 1e-6;

/// Inpaint `image` (height x width x channels, values in 0..=255) where
/// `mask` is true. Pixels outside the mask are never written.
pub fn navier_stokes_inpaint(image: &mut Array3<f32>, mask: &Array2<bool>, radius: i32) -> Result<()> {
    let (height, width, _) = image.dim();
    if mask.dim() != (height, width) {
        return Err(Error::Inpaint(format!(
            "mask is {}x{} but image is {}x{}",
            mask.dim().1,
            mask.dim().0,
            width,
            height
        )));
    }

    let hole: Vec<(usize, usize)> = mask
        .indexed_iter()
        .filter_map(|(idx, &m)| m.then_some(idx))
        .collect();
    if hole.is_empty() {
        return Ok(());
    }

    seed_hole(image, mask, radius.max(1) as usize);

    let mut next = vec![0.0f32; hole.len()];
    for iteration in 0..ITERATIONS {
        transport_step(image, &hole, &mut next);
        if (iteration + 1) % DIFFUSION_EVERY == 0 {
            for _ in 0..DIFFUSION_STEPS {
                diffusion_step(image, &hole, &mut next);
            }
        }
    }

    Ok(())
}

/// Fill the hole ring by ring with weighted means of already-known pixels.
fn seed_hole(image: &mut Array3<f32>, mask: &Array2<bool>, radius: usize) {
    let (height, width, channels) = image.dim();
    let mut known = mask.mapv(|m| !m);
    let mut pending: Vec<(usize, usize)> = mask
        .indexed_iter()
        .filter_map(|(idx, &m)| m.then_some(idx))
        .collect();
    let mut sums = vec![0.0f32; channels];
    // Diagonal neighbours always count, even for radius 1.
    let reach = (radius * radius).max(2) as f32;

    while !pending.is_empty() {
        let (front, rest): (Vec<_>, Vec<_>) = pending
            .into_iter()
            .partition(|&(y, x)| touches_known(&known, y, x));

        if front.is_empty() {
            // Nothing known to grow from: the whole image is masked.
            for &(y, x) in &rest {
                for c in 0..channels {
                    image[[y, x, c]] = 0.0;
                }
            }
            return;
        }

        let mut values = Vec::with_capacity(front.len() * channels);
        for &(y, x) in &front {
            sums.iter_mut().for_each(|s| *s = 0.0);
            let mut total = 0.0f32;
            let y0 = y.saturating_sub(radius);
            let y1 = (y + radius).min(height - 1);
            let x0 = x.saturating_sub(radius);
            let x1 = (x + radius).min(width - 1);
            for ny in y0..=y1 {
                for nx in x0..=x1 {
                    if !known[[ny, nx]] {
                        continue;
                    }
                    let dy = ny as f32 - y as f32;
                    let dx = nx as f32 - x as f32;
                    let d2 = dx * dx + dy * dy;
                    if d2 > reach {
                        continue;
                    }
                    let w = 1.0 / d2.max(1.0);
                    total += w;
                    for (c, s) in sums.iter_mut().enumerate() {
                        *s += w * image[[ny, nx, c]];
                    }
                }
            }
            values.extend(sums.iter().map(|s| s / total.max(EPS)));
        }

        for (i, &(y, x)) in front.iter().enumerate() {
            for c in 0..channels {
                image[[y, x, c]] = values[i * channels + c];
            }
            known[[y, x]] = true;
        }
        pending = rest;
    }
}

fn touches_known(known: &Array2<bool>, y: usize, x: usize) -> bool {
    let (height, width) = known.dim();
    for ny in y.saturating_sub(1)..=(y + 1).min(height - 1) {
        for nx in x.saturating_sub(1)..=(x + 1).min(width - 1) {
            if known[[ny, nx]] {
                return true;
            }
        }
    }
    false
}

/// Sample with edge clamping.
#[inline]
fn at(image: &Array3<f32>, y: isize, x: isize, c: usize) -> f32 {
    let (height, width, _) = image.dim();
    let y = y.clamp(0, height as isize - 1) as usize;
    let x = x.clamp(0, width as isize - 1) as usize;
    image[[y, x, c]]
}

#[inline]
fn laplacian(image: &Array3<f32>, y: isize, x: isize, c: usize) -> f32 {
    at(image, y, x + 1, c) + at(image, y, x - 1, c) + at(image, y + 1, x, c) + at(image, y - 1, x, c)
        - 4.0 * at(image, y, x, c)
}

/// One step of I_t = grad(L) . N * |grad I|, with N the isophote direction.
///
/// Each new value is limited to the range of its 4-neighbourhood, so the
/// fill never leaves the range of the values around the hole.
fn transport_step(image: &mut Array3<f32>, hole: &[(usize, usize)], next: &mut [f32]) {
    let channels = image.dim().2;
    for c in 0..channels {
        for (slot, &(y, x)) in next.iter_mut().zip(hole) {
            let (y, x) = (y as isize, x as isize);

            let center = at(image, y, x, c);
            let right = at(image, y, x + 1, c);
            let left = at(image, y, x - 1, c);
            let down = at(image, y + 1, x, c);
            let up = at(image, y - 1, x, c);

            let fx = right - center;
            let bx = center - left;
            let fy = down - center;
            let by = center - up;

            // Isophote direction: the gradient rotated by 90 degrees.
            let gx = 0.5 * (fx + bx);
            let gy = 0.5 * (fy + by);
            let norm = (gx * gx + gy * gy).sqrt();
            if norm < EPS {
                *slot = center;
                continue;
            }

            let dl_x = laplacian(image, y, x + 1, c) - laplacian(image, y, x - 1, c);
            let dl_y = laplacian(image, y + 1, x, c) - laplacian(image, y - 1, x, c);
            let beta = (dl_x * -gy + dl_y * gx) / norm;

            // Slope-limited gradient magnitude keeps the upwind scheme stable.
            let grad = if beta > 0.0 {
                (bx.min(0.0).powi(2) + fx.max(0.0).powi(2) + by.min(0.0).powi(2) + fy.max(0.0).powi(2)).sqrt()
            } else {
                (bx.max(0.0).powi(2) + fx.min(0.0).powi(2) + by.max(0.0).powi(2) + fy.min(0.0).powi(2)).sqrt()
            };

            // beta * grad is quadratic in intensity; rescale to unit range.
            let delta = TRANSPORT_DT * beta * grad / 255.0;
            let lo = center.min(right).min(left).min(down).min(up);
            let hi = center.max(right).max(left).max(down).max(up);
            *slot = (center + delta).clamp(lo, hi);
        }
        apply(image, hole, next, c);
    }
}

fn diffusion_step(image: &mut Array3<f32>, hole: &[(usize, usize)], next: &mut [f32]) {
    let channels = image.dim().2;
    for c in 0..channels {
        for (slot, &(y, x)) in next.iter_mut().zip(hole) {
            let (y, x) = (y as isize, x as isize);
            *slot = at(image, y, x, c) + DIFFUSION_DT * laplacian(image, y, x, c);
        }
        apply(image, hole, next, c);
    }
}

fn apply(image: &mut Array3<f32>, hole: &[(usize, usize)], next: &[f32], c: usize) {
    for (&value, &(y, x)) in next.iter().zip(hole) {
        image[[y, x, c]] = value.clamp(0.0, 255.0);
    }
}
