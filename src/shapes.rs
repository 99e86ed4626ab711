//! Shape rasterization primitives for the sprite painter.
//!
//! Every function returns the set of integer pixel coordinates covered by the
//! shape. Boxes are given as inclusive corners `(x0, y0)`-`(x1, y1)`, so a
//! 16 pixel wide box spans `0..=15`.

use image::{Rgba, RgbaImage};
use std::collections::HashSet;

/// Rasterize a filled box with inclusive corners.
///
/// # Examples
///
/// ```
/// use mazecast::shapes::rasterize_box;
///
/// let pixels = rasterize_box(0, 0, 2, 1);
/// assert_eq!(pixels.len(), 6);
/// assert!(pixels.contains(&(2, 1)));
/// ```
pub fn rasterize_box(x0: i32, y0: i32, x1: i32, y1: i32) -> HashSet<(i32, i32)> {
    let mut pixels = HashSet::new();

    if x1 < x0 || y1 < y0 {
        return pixels;
    }

    for y in y0..=y1 {
        for x in x0..=x1 {
            pixels.insert((x, y));
        }
    }

    pixels
}

/// Rasterize a filled ellipse using the midpoint algorithm.
///
/// Returns all pixels within an ellipse centered at (cx, cy) with radii (rx, ry).
///
/// # Examples
///
/// ```
/// use mazecast::shapes::rasterize_ellipse;
///
/// let pixels = rasterize_ellipse(5, 5, 3, 2);
/// assert!(pixels.contains(&(5, 5)));
/// assert!(!pixels.contains(&(5, 8)));
/// ```
pub fn rasterize_ellipse(cx: i32, cy: i32, rx: i32, ry: i32) -> HashSet<(i32, i32)> {
    let mut pixels = HashSet::new();

    if rx <= 0 || ry <= 0 {
        return pixels;
    }

    // i64 keeps the decision parameters from overflowing
    let (rx, ry, cx, cy) = (rx as i64, ry as i64, cx as i64, cy as i64);
    let rx_sq = rx * rx;
    let ry_sq = ry * ry;

    let mut x = 0i64;
    let mut y = ry;
    let mut dx = 0i64;
    let mut dy = 2 * rx_sq * y;
    let mut p1 = ry_sq - (rx_sq * ry) + (rx_sq / 4);

    while dx < dy {
        fill_ellipse_span(cx, cy, x, y, &mut pixels);
        x += 1;
        dx += 2 * ry_sq;
        if p1 < 0 {
            p1 += dx + ry_sq;
        } else {
            y -= 1;
            dy -= 2 * rx_sq;
            p1 += dx - dy + ry_sq;
        }
    }

    let mut p2 = ry_sq * (x + 1) * (x + 1) / 4 + rx_sq * (y - 1) * (y - 1) - rx_sq * ry_sq;

    while y >= 0 {
        fill_ellipse_span(cx, cy, x, y, &mut pixels);
        y -= 1;
        dy -= 2 * rx_sq;
        if p2 > 0 {
            p2 += rx_sq - dy;
        } else {
            x += 1;
            dx += 2 * ry_sq;
            p2 += dx - dy + rx_sq;
        }
    }

    pixels
}

/// Fill the two horizontal spans of an ellipse at +y and -y.
fn fill_ellipse_span(cx: i64, cy: i64, x: i64, y: i64, pixels: &mut HashSet<(i32, i32)>) {
    for scan_x in -x..=x {
        pixels.insert(((cx + scan_x) as i32, (cy + y) as i32));
        pixels.insert(((cx + scan_x) as i32, (cy - y) as i32));
    }
}

/// Rasterize the ellipse inscribed in an inclusive box.
///
/// A pixel is inside when its centre lies within the ellipse, which handles
/// even-sized boxes whose centre falls between pixels.
pub fn rasterize_oval(x0: i32, y0: i32, x1: i32, y1: i32) -> HashSet<(i32, i32)> {
    rasterize_oval_where(x0, y0, x1, y1, |_, _| true)
}

/// Rasterize an oval with a wedge removed, like a pie with one slice taken.
///
/// `facing` points from the centre into the missing wedge (screen coordinates,
/// y grows downwards) and `half_angle_deg` is half the wedge's opening angle.
pub fn rasterize_pie(
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    facing: (f64, f64),
    half_angle_deg: f64,
) -> HashSet<(i32, i32)> {
    let half_angle = half_angle_deg.to_radians();
    rasterize_oval_where(x0, y0, x1, y1, |dx, dy| {
        if dx == 0.0 && dy == 0.0 {
            return true;
        }
        let cross = facing.0 * dy - facing.1 * dx;
        let dot = facing.0 * dx + facing.1 * dy;
        cross.atan2(dot).abs() > half_angle
    })
}

fn rasterize_oval_where(
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    keep: impl Fn(f64, f64) -> bool,
) -> HashSet<(i32, i32)> {
    let mut pixels = HashSet::new();

    if x1 < x0 || y1 < y0 {
        return pixels;
    }

    let cx = (x0 + x1 + 1) as f64 / 2.0;
    let cy = (y0 + y1 + 1) as f64 / 2.0;
    let rx = (x1 - x0 + 1) as f64 / 2.0;
    let ry = (y1 - y0 + 1) as f64 / 2.0;

    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = x as f64 + 0.5 - cx;
            let dy = y as f64 + 0.5 - cy;
            let norm = (dx / rx).powi(2) + (dy / ry).powi(2);
            if norm <= 1.0 && keep(dx, dy) {
                pixels.insert((x, y));
            }
        }
    }

    pixels
}

/// Rasterize a filled box with rounded corners of the given radius.
pub fn rasterize_rounded_box(
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    radius: i32,
) -> HashSet<(i32, i32)> {
    if x1 < x0 || y1 < y0 {
        return HashSet::new();
    }

    let radius = radius.max(0).min((x1 - x0 + 1) / 2).min((y1 - y0 + 1) / 2);
    if radius == 0 {
        return rasterize_box(x0, y0, x1, y1);
    }

    // Cross of two boxes plus a quarter circle in each corner
    let mut pixels = rasterize_box(x0 + radius, y0, x1 - radius, y1);
    pixels.extend(rasterize_box(x0, y0 + radius, x1, y1 - radius));

    let d = 2 * radius - 1;
    for (cx0, cy0) in [(x0, y0), (x1 - d, y0), (x0, y1 - d), (x1 - d, y1 - d)] {
        pixels.extend(rasterize_oval(cx0, cy0, cx0 + d, cy0 + d));
    }

    pixels
}

/// Paint a pixel set onto an image, skipping pixels outside it.
pub fn paint(canvas: &mut RgbaImage, pixels: &HashSet<(i32, i32)>, color: Rgba<u8>) {
    let (width, height) = canvas.dimensions();
    for &(x, y) in pixels {
        if x >= 0 && y >= 0 && (x as u32) < width && (y as u32) < height {
            canvas.put_pixel(x as u32, y as u32, color);
        }
    }
}
