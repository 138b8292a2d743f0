pub mod config;
pub mod geometry;
pub mod image;
pub mod pixelate;
pub mod scene;
pub mod selection;
pub mod shape;
pub mod tools;

pub use config::{ConfigError, SurfaceConfig};
pub use geometry::{Bounds, Handle, ScaleAxis};
pub use image::{DecodeTicket, DecodeTickets, DisplaySize};
pub use scene::{Gesture, Modifiers, Scene};
pub use selection::SelectionSet;
pub use shape::{AnnotationShape, Geometry, ShapeId};
pub use tools::{PointerMode, ShapeKind, StrokeColor, StrokeWidth, ToolState, ToolbarAction};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}
