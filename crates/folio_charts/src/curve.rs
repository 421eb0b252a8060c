//! Line and area path construction.

use folio_paint::{Path, PathBuilder};

use crate::mapper::PixelPoint;

/// Line through `points`, straight or Catmull-Rom smoothed.
///
/// Smoothing needs at least three points; fewer than two points yield an
/// empty path.
pub fn build_line_path(points: &[PixelPoint], smooth: bool) -> Path {
    if points.len() < 2 {
        return Path::new();
    }
    trace_line(PathBuilder::new(), points, smooth).build()
}

/// The line path closed down to `baseline_y`, for area fills.
pub fn build_area_path(points: &[PixelPoint], smooth: bool, baseline_y: f32) -> Path {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return Path::new();
    };
    if points.len() < 2 {
        return Path::new();
    }
    trace_line(PathBuilder::new(), points, smooth)
        .line_to(last.x, baseline_y)
        .line_to(first.x, baseline_y)
        .close()
        .build()
}

fn trace_line(builder: PathBuilder, points: &[PixelPoint], smooth: bool) -> PathBuilder {
    let mut b = builder.move_to(points[0].x, points[0].y);
    if !smooth || points.len() < 3 {
        for p in &points[1..] {
            b = b.line_to(p.x, p.y);
        }
        return b;
    }

    // Uniform Catmull-Rom as cubic beziers; the end tangents reuse the
    // nearest real point instead of a phantom neighbour.
    let last = points.len() - 1;
    for i in 0..last {
        let p0 = points[i.saturating_sub(1)];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points[(i + 2).min(last)];
        let c1x = p1.x + (p2.x - p0.x) / 6.0;
        let c1y = p1.y + (p2.y - p0.y) / 6.0;
        let c2x = p2.x - (p3.x - p1.x) / 6.0;
        let c2y = p2.y - (p3.y - p1.y) / 6.0;
        b = b.cubic_to(c1x, c1y, c2x, c2y, p2.x, p2.y);
    }
    b
}
