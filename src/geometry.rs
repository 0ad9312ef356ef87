//! Small helpers over [`kurbo::Rect`], the rectangle type used for every
//! start space and generated bound.

pub use kurbo::{Point, Rect};

/// Absolute slack allowed when comparing edges that were produced by
/// accumulating lengths.
const EDGE_TOLERANCE: f64 = 1e-9;

/// Extent of `rect` along one axis: height when `vertical`, width otherwise.
///
/// For a vertical split this is the distance every child spans in full, so
/// it doubles as the "across" measurement of the layout pass.
pub fn size_along(rect: Rect, vertical: bool) -> f64 {
    if vertical {
        rect.height()
    } else {
        rect.width()
    }
}

/// Whether `inner` lies entirely inside `outer` (edges inclusive), allowing a
/// tiny amount of floating error proportional to the rectangle's scale.
pub fn contains_rect(outer: Rect, inner: Rect) -> bool {
    let scale = outer.width().abs().max(outer.height().abs()).max(1.0);
    let eps = EDGE_TOLERANCE * scale;
    inner.x0 >= outer.x0 - eps
        && inner.y0 >= outer.y0 - eps
        && inner.x1 <= outer.x1 + eps
        && inner.y1 <= outer.y1 + eps
}

/// Corners in winding order, starting at the minimum corner.
pub fn corners(rect: Rect) -> [Point; 4] {
    [
        Point::new(rect.x0, rect.y0),
        Point::new(rect.x1, rect.y0),
        Point::new(rect.x1, rect.y1),
        Point::new(rect.x0, rect.y1),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_along_picks_axis() {
        let r = Rect::new(1.0, 2.0, 4.0, 10.0);
        assert_eq!(size_along(r, true), 8.0);
        assert_eq!(size_along(r, false), 3.0);
    }

    #[test]
    fn containment_is_edge_inclusive() {
        let outer = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(contains_rect(outer, outer));
        assert!(contains_rect(outer, Rect::new(0.0, 0.0, 4.0, 10.0)));
        assert!(contains_rect(outer, Rect::new(4.0, 0.0, 10.0 + 1e-12, 10.0)));
        assert!(!contains_rect(outer, Rect::new(4.0, 0.0, 10.5, 10.0)));
        assert!(!contains_rect(outer, Rect::new(-1.0, 0.0, 1.0, 1.0)));
    }

    #[test]
    fn corners_wind_from_min() {
        let c = corners(Rect::new(0.0, 0.0, 3.0, 2.0));
        assert_eq!(c[0], Point::new(0.0, 0.0));
        assert_eq!(c[1], Point::new(3.0, 0.0));
        assert_eq!(c[2], Point::new(3.0, 2.0));
        assert_eq!(c[3], Point::new(0.0, 2.0));
    }
}
