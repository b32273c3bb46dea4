use crate::border::{BorderMode, map_index};
use crate::image::ImageView;

/// Samples the pixel nearest to `(x, y)`.
///
/// Returns `None` when the image is empty, the coordinate is not finite, or
/// the rounded coordinate is outside the image under [`BorderMode::Skip`].
pub fn sample_nearest<T: Copy>(
    img: &ImageView<'_, T>,
    x: f64,
    y: f64,
    border: BorderMode,
) -> Option<T> {
    if !x.is_finite() || !y.is_finite() {
        return None;
    }
    sample_nearest_at(img, x.round() as isize, y.round() as isize, border)
}

/// Samples an already-rounded pixel coordinate.
pub fn sample_nearest_at<T: Copy>(
    img: &ImageView<'_, T>,
    xi: isize,
    yi: isize,
    border: BorderMode,
) -> Option<T> {
    let mx = map_index(xi, img.width(), border)?;
    let my = map_index(yi, img.height(), border)?;
    // SAFETY: `map_index` returns indices in `[0, len)` for non-empty axes.
    Some(unsafe { *img.get_unchecked(mx, my) })
}
