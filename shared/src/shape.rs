use serde::Serialize;

use crate::geometry::{angle_degrees, distance, distance_to_segment, scale_about, Bounds};
use crate::tools::StrokeColor;
use crate::Point;

const HIT_SLOP: f64 = 6.0;

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub u64);

#[derive(Clone, Debug, PartialEq)]
pub struct RectangleShape {
    pub origin: Point,
    pub width: f64,
    pub height: f64,
    pub color: StrokeColor,
    pub stroke_width: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArrowShape {
    pub origin: Point,
    pub length: f64,
    pub angle_degrees: f64,
    pub pointer_length: f64,
    pub pointer_width: f64,
    pub color: StrokeColor,
    pub stroke_width: f64,
}

/// A window onto the pixelated background. The pixelated copy is placed at
/// `source_offset` relative to `origin`, which is kept at `-origin` so the
/// pixels under the patch always line up with the image beneath it.
#[derive(Clone, Debug, PartialEq)]
pub struct MosaicPatch {
    pub origin: Point,
    pub width: f64,
    pub height: f64,
    pub source_offset: Point,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Rectangle(RectangleShape),
    Arrow(ArrowShape),
    Mosaic(MosaicPatch),
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnnotationShape {
    pub id: ShapeId,
    pub geometry: Geometry,
}

impl RectangleShape {
    pub fn new(origin: Point, color: StrokeColor, stroke_width: f64) -> Self {
        Self {
            origin,
            width: 0.0,
            height: 0.0,
            color,
            stroke_width,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }

    pub fn keep_stroke_width(&mut self) {
        self.width = (self.width * self.scale_x).max(self.stroke_width);
        self.height = (self.height * self.scale_y).max(self.stroke_width);
        self.scale_x = 1.0;
        self.scale_y = 1.0;
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_corners(
            self.origin,
            self.origin
                .offset(self.width * self.scale_x, self.height * self.scale_y),
        )
    }
}

impl ArrowShape {
    pub fn new(origin: Point, color: StrokeColor, stroke_width: f64, pointer: f64) -> Self {
        Self {
            origin,
            length: 0.0,
            angle_degrees: 0.0,
            pointer_length: pointer,
            pointer_width: pointer,
            color,
            stroke_width,
        }
    }

    pub fn tip(&self) -> Point {
        let radians = self.angle_degrees.to_radians();
        self.origin
            .offset(self.length * radians.cos(), self.length * radians.sin())
    }

    pub fn point_to(&mut self, target: Point) {
        self.length = distance(self.origin, target);
        self.angle_degrees = angle_degrees(self.origin, target);
    }

    pub fn bounds(&self) -> Bounds {
        let pad = self.pointer_width.max(self.stroke_width) / 2.0;
        Bounds::from_corners(self.origin, self.tip()).inflate(pad)
    }
}

impl MosaicPatch {
    pub fn new(origin: Point) -> Self {
        Self {
            origin,
            width: 0.0,
            height: 0.0,
            source_offset: Point::new(-origin.x, -origin.y),
        }
    }

    pub fn move_to(&mut self, origin: Point) {
        self.origin = origin;
        self.source_offset = Point::new(-origin.x, -origin.y);
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_corners(self.origin, self.origin.offset(self.width, self.height))
    }
}

impl AnnotationShape {
    pub fn bounds(&self) -> Bounds {
        match &self.geometry {
            Geometry::Rectangle(rect) => rect.bounds(),
            Geometry::Arrow(arrow) => arrow.bounds(),
            Geometry::Mosaic(mosaic) => mosaic.bounds(),
        }
    }

    pub fn origin(&self) -> Point {
        match &self.geometry {
            Geometry::Rectangle(rect) => rect.origin,
            Geometry::Arrow(arrow) => arrow.origin,
            Geometry::Mosaic(mosaic) => mosaic.origin,
        }
    }

    // Nothing visible is drawn, so there is nothing to pick either.
    pub fn is_empty(&self) -> bool {
        match &self.geometry {
            Geometry::Rectangle(rect) => {
                rect.width * rect.scale_x == 0.0 && rect.height * rect.scale_y == 0.0
            }
            Geometry::Arrow(arrow) => arrow.length == 0.0,
            Geometry::Mosaic(mosaic) => mosaic.width == 0.0 || mosaic.height == 0.0,
        }
    }

    pub fn drag_to(&mut self, pointer: Point) {
        match &mut self.geometry {
            Geometry::Rectangle(rect) => {
                rect.width = pointer.x - rect.origin.x;
                rect.height = pointer.y - rect.origin.y;
            }
            Geometry::Arrow(arrow) => arrow.point_to(pointer),
            Geometry::Mosaic(mosaic) => {
                mosaic.width = pointer.x - mosaic.origin.x;
                mosaic.height = pointer.y - mosaic.origin.y;
            }
        }
    }

    pub fn normalize(&mut self) {
        match &mut self.geometry {
            Geometry::Rectangle(rect) => {
                let bounds = rect.bounds();
                rect.origin = Point::new(bounds.min_x, bounds.min_y);
                rect.width = bounds.width();
                rect.height = bounds.height();
                rect.scale_x = 1.0;
                rect.scale_y = 1.0;
            }
            Geometry::Mosaic(mosaic) => {
                let bounds = mosaic.bounds();
                mosaic.move_to(Point::new(bounds.min_x, bounds.min_y));
                mosaic.width = bounds.width();
                mosaic.height = bounds.height();
            }
            Geometry::Arrow(_) => {}
        }
    }

    pub fn hit(&self, point: Point) -> bool {
        if self.is_empty() {
            return false;
        }
        match &self.geometry {
            Geometry::Rectangle(rect) => {
                let slop = (rect.stroke_width / 2.0).max(HIT_SLOP / 2.0);
                let bounds = rect.bounds();
                if !bounds.inflate(slop).contains(point) {
                    return false;
                }
                let inner = bounds.inflate(-slop);
                if inner.width() <= 0.0 || inner.height() <= 0.0 {
                    return true;
                }
                !inner.contains(point)
            }
            Geometry::Arrow(arrow) => {
                let tip = arrow.tip();
                let slop = (arrow.stroke_width / 2.0).max(HIT_SLOP);
                distance_to_segment(point, arrow.origin, tip) <= slop
                    || distance(point, tip) <= arrow.pointer_length
            }
            Geometry::Mosaic(mosaic) => mosaic.bounds().contains(point),
        }
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        let mut shape = self.clone();
        match &mut shape.geometry {
            Geometry::Rectangle(rect) => rect.origin = rect.origin.offset(dx, dy),
            Geometry::Arrow(arrow) => arrow.origin = arrow.origin.offset(dx, dy),
            Geometry::Mosaic(mosaic) => mosaic.move_to(mosaic.origin.offset(dx, dy)),
        }
        shape
    }

    pub fn scaled_about(&self, anchor: Point, sx: f64, sy: f64) -> Self {
        let mut shape = self.clone();
        match &mut shape.geometry {
            Geometry::Rectangle(rect) => {
                rect.origin = scale_about(rect.origin, anchor, sx, sy);
                rect.scale_x = sx;
                rect.scale_y = sy;
                rect.keep_stroke_width();
            }
            Geometry::Arrow(arrow) => {
                let tip = scale_about(arrow.tip(), anchor, sx, sy);
                arrow.origin = scale_about(arrow.origin, anchor, sx, sy);
                arrow.point_to(tip);
            }
            Geometry::Mosaic(mosaic) => {
                mosaic.move_to(scale_about(mosaic.origin, anchor, sx, sy));
                mosaic.width *= sx;
                mosaic.height *= sy;
            }
        }
        shape
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f64, y: f64, w: f64, h: f64, stroke: f64) -> AnnotationShape {
        let mut shape = RectangleShape::new(Point::new(x, y), StrokeColor::Red, stroke);
        shape.width = w;
        shape.height = h;
        AnnotationShape {
            id: ShapeId(1),
            geometry: Geometry::Rectangle(shape),
        }
    }

    #[test]
    fn keep_stroke_width_folds_scale_into_size() {
        let mut shape = RectangleShape::new(Point::ORIGIN, StrokeColor::Blue, 10.0);
        shape.width = 40.0;
        shape.height = 25.0;
        shape.scale_x = 2.0;
        shape.scale_y = 2.0;
        shape.keep_stroke_width();
        assert_eq!((shape.width, shape.height), (80.0, 50.0));
        assert_eq!((shape.scale_x, shape.scale_y), (1.0, 1.0));
        assert_eq!(shape.stroke_width, 10.0);
    }

    #[test]
    fn keep_stroke_width_never_shrinks_below_stroke() {
        let mut shape = RectangleShape::new(Point::ORIGIN, StrokeColor::Blue, 10.0);
        shape.width = 40.0;
        shape.height = 40.0;
        shape.scale_x = 0.1;
        shape.scale_y = 0.5;
        shape.keep_stroke_width();
        assert_eq!((shape.width, shape.height), (10.0, 20.0));
    }

    #[test]
    fn normalize_moves_origin_to_top_left() {
        let mut shape = rect(50.0, 60.0, -20.0, -30.0, 3.0);
        shape.normalize();
        let Geometry::Rectangle(rect) = &shape.geometry else {
            panic!("expected rectangle");
        };
        assert_eq!(rect.origin, Point::new(30.0, 30.0));
        assert_eq!((rect.width, rect.height), (20.0, 30.0));
    }

    #[test]
    fn mosaic_keeps_source_aligned_when_moved() {
        let mut patch = MosaicPatch::new(Point::new(12.0, 7.0));
        assert_eq!(patch.source_offset, Point::new(-12.0, -7.0));
        let shape = AnnotationShape {
            id: ShapeId(2),
            geometry: Geometry::Mosaic(patch.clone()),
        };
        let moved = shape.translated(8.0, 3.0);
        let Geometry::Mosaic(moved) = moved.geometry else {
            panic!("expected mosaic");
        };
        assert_eq!(moved.origin, Point::new(20.0, 10.0));
        assert_eq!(moved.source_offset, Point::new(-20.0, -10.0));
        patch.move_to(Point::new(1.0, 2.0));
        assert_eq!(patch.source_offset, Point::new(-1.0, -2.0));
    }

    #[test]
    fn rectangle_hits_only_near_its_outline() {
        let shape = rect(0.0, 0.0, 100.0, 100.0, 3.0);
        assert!(shape.hit(Point::new(1.0, 50.0)));
        assert!(shape.hit(Point::new(100.0, 100.0)));
        assert!(!shape.hit(Point::new(50.0, 50.0)));
        assert!(!shape.hit(Point::new(120.0, 50.0)));
    }

    #[test]
    fn arrow_hits_near_shaft_or_tip() {
        let mut arrow = ArrowShape::new(Point::new(0.0, 0.0), StrokeColor::Red, 3.0, 15.0);
        arrow.point_to(Point::new(100.0, 0.0));
        let thin = AnnotationShape {
            id: ShapeId(4),
            geometry: Geometry::Arrow(arrow.clone()),
        };
        assert!(thin.hit(Point::new(50.0, 6.0)));
        assert!(!thin.hit(Point::new(50.0, 7.0)));
        assert!(thin.hit(Point::new(110.0, 10.0)));
        assert!(!thin.hit(Point::new(120.0, 0.0)));

        arrow.stroke_width = 20.0;
        let thick = AnnotationShape {
            id: ShapeId(5),
            geometry: Geometry::Arrow(arrow),
        };
        assert!(thick.hit(Point::new(50.0, 9.5)));
        assert!(!thick.hit(Point::new(50.0, 10.5)));
    }

    #[test]
    fn empty_shapes_are_never_hit() {
        let dot = rect(40.0, 40.0, 0.0, 0.0, 3.0);
        assert!(dot.is_empty());
        assert!(!dot.hit(Point::new(40.0, 40.0)));

        let line = rect(40.0, 40.0, 0.0, 30.0, 3.0);
        assert!(!line.is_empty());
        assert!(line.hit(Point::new(40.0, 50.0)));

        let patch = AnnotationShape {
            id: ShapeId(6),
            geometry: Geometry::Mosaic(MosaicPatch::new(Point::new(5.0, 5.0))),
        };
        assert!(!patch.hit(Point::new(5.0, 5.0)));

        let arrow = AnnotationShape {
            id: ShapeId(7),
            geometry: Geometry::Arrow(ArrowShape::new(
                Point::new(5.0, 5.0),
                StrokeColor::Red,
                3.0,
                15.0,
            )),
        };
        assert!(!arrow.hit(Point::new(5.0, 5.0)));
    }

    #[test]
    fn arrow_scales_its_tip_about_anchor() {
        let mut arrow = ArrowShape::new(Point::new(10.0, 10.0), StrokeColor::Green, 3.0, 15.0);
        arrow.point_to(Point::new(20.0, 10.0));
        let shape = AnnotationShape {
            id: ShapeId(3),
            geometry: Geometry::Arrow(arrow),
        };
        let scaled = shape.scaled_about(Point::new(10.0, 10.0), 3.0, 1.0);
        let Geometry::Arrow(arrow) = scaled.geometry else {
            panic!("expected arrow");
        };
        assert!((arrow.length - 30.0).abs() < 1e-9);
        assert!(arrow.angle_degrees.abs() < 1e-9);
    }
}
