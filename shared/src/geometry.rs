use crate::Point;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    pub fn inflate(&self, amount: f64) -> Self {
        Self {
            min_x: self.min_x - amount,
            min_y: self.min_y - amount,
            max_x: self.max_x + amount,
            max_y: self.max_y + amount,
        }
    }

    pub fn union(&self, other: &Bounds) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScaleAxis {
    Both,
    X,
    Y,
}

/// A resize handle on the selection bounds. `anchor` is the opposite
/// handle, which stays fixed while this one is dragged.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Handle {
    pub axis: ScaleAxis,
    pub position: Point,
    pub anchor: Point,
}

pub fn handles(bounds: &Bounds) -> [Handle; 8] {
    let left = bounds.min_x;
    let right = bounds.max_x;
    let top = bounds.min_y;
    let bottom = bounds.max_y;
    let mid_x = (left + right) / 2.0;
    let mid_y = (top + bottom) / 2.0;
    let handle = |axis, x, y, ax, ay| Handle {
        axis,
        position: Point::new(x, y),
        anchor: Point::new(ax, ay),
    };
    [
        handle(ScaleAxis::Both, left, top, right, bottom),
        handle(ScaleAxis::Both, right, top, left, bottom),
        handle(ScaleAxis::Both, left, bottom, right, top),
        handle(ScaleAxis::Both, right, bottom, left, top),
        handle(ScaleAxis::Y, mid_x, top, mid_x, bottom),
        handle(ScaleAxis::Y, mid_x, bottom, mid_x, top),
        handle(ScaleAxis::X, left, mid_y, right, mid_y),
        handle(ScaleAxis::X, right, mid_y, left, mid_y),
    ]
}

pub fn handle_at(bounds: &Bounds, point: Point, size: f64) -> Option<Handle> {
    handles(bounds)
        .into_iter()
        .find(|handle| hit_rect(point, handle.position, size))
}

pub fn hit_rect(point: Point, center: Point, size: f64) -> bool {
    let half = size / 2.0;
    point.x >= center.x - half
        && point.x <= center.x + half
        && point.y >= center.y - half
        && point.y <= center.y + half
}

pub fn normalize_point(point: Point) -> Option<Point> {
    if !point.is_finite() {
        return None;
    }
    Some(point)
}

pub fn distance(a: Point, b: Point) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

pub fn angle_degrees(from: Point, to: Point) -> f64 {
    (to.y - from.y).atan2(to.x - from.x).to_degrees()
}

pub fn distance_to_segment(point: Point, start: Point, end: Point) -> f64 {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    if dx.abs() < f64::EPSILON && dy.abs() < f64::EPSILON {
        return distance(point, start);
    }
    let t = ((point.x - start.x) * dx + (point.y - start.y) * dy) / (dx * dx + dy * dy);
    let t = t.clamp(0.0, 1.0);
    distance(point, Point::new(start.x + t * dx, start.y + t * dy))
}

pub fn scale_factor(anchor: f64, start: f64, current: f64, min_scale: f64) -> f64 {
    let base = start - anchor;
    if base.abs() < f64::EPSILON {
        return 1.0;
    }
    let value = (current - anchor) / base;
    if !value.is_finite() {
        return 1.0;
    }
    value.max(min_scale)
}

pub fn scale_about(point: Point, anchor: Point, sx: f64, sy: f64) -> Point {
    Point::new(
        anchor.x + (point.x - anchor.x) * sx,
        anchor.y + (point.y - anchor.y) * sy,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn corners_in_any_order_give_same_bounds() {
        let a = Point::new(40.0, 10.0);
        let b = Point::new(5.0, 80.0);
        assert_eq!(Bounds::from_corners(a, b), Bounds::from_corners(b, a));
        let bounds = Bounds::from_corners(a, b);
        assert_eq!(bounds.min_x, 5.0);
        assert_eq!(bounds.max_y, 80.0);
    }

    #[test]
    fn intersection_needs_both_axes() {
        let a = Bounds::from_corners(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        let overlapping = Bounds::from_corners(Point::new(5.0, 5.0), Point::new(20.0, 20.0));
        let x_only = Bounds::from_corners(Point::new(5.0, 30.0), Point::new(20.0, 40.0));
        let touching = Bounds::from_corners(Point::new(10.0, 0.0), Point::new(12.0, 3.0));
        assert!(a.intersects(&overlapping));
        assert!(overlapping.intersects(&a));
        assert!(!a.intersects(&x_only));
        assert!(a.intersects(&touching));
    }

    #[test]
    fn arrow_math_matches_pythagoras_and_atan2() {
        let from = Point::new(10.0, 10.0);
        let to = Point::new(13.0, 14.0);
        assert!(approx(distance(from, to), 5.0));
        assert!(approx(angle_degrees(from, to), (4.0f64).atan2(3.0).to_degrees()));
        assert!(approx(angle_degrees(from, Point::new(10.0, 20.0)), 90.0));
        assert!(approx(angle_degrees(from, Point::new(0.0, 10.0)), 180.0));
    }

    #[test]
    fn handles_anchor_on_the_opposite_side() {
        let bounds = Bounds::from_corners(Point::new(0.0, 0.0), Point::new(100.0, 50.0));
        let top_left = handle_at(&bounds, Point::new(1.0, -2.0), 10.0).unwrap();
        assert_eq!(top_left.axis, ScaleAxis::Both);
        assert_eq!(top_left.anchor, Point::new(100.0, 50.0));
        let right = handle_at(&bounds, Point::new(100.0, 25.0), 10.0).unwrap();
        assert_eq!(right.axis, ScaleAxis::X);
        assert_eq!(right.anchor, Point::new(0.0, 25.0));
        assert!(handle_at(&bounds, Point::new(50.0, 25.0), 10.0).is_none());
    }

    #[test]
    fn scale_factor_is_clamped_and_never_flips() {
        assert!(approx(scale_factor(0.0, 10.0, 20.0, 0.01), 2.0));
        assert!(approx(scale_factor(0.0, 10.0, -5.0, 0.01), 0.01));
        assert!(approx(scale_factor(3.0, 3.0, 50.0, 0.01), 1.0));
    }

    #[test]
    fn segment_distance_clamps_to_endpoints() {
        let start = Point::new(0.0, 0.0);
        let end = Point::new(10.0, 0.0);
        assert!(approx(distance_to_segment(Point::new(5.0, 3.0), start, end), 3.0));
        assert!(approx(distance_to_segment(Point::new(13.0, 4.0), start, end), 5.0));
    }
}
