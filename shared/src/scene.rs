use crate::config::SurfaceConfig;
use crate::geometry::{handle_at, scale_factor, Bounds, Handle, ScaleAxis};
use crate::selection::SelectionSet;
use crate::shape::{AnnotationShape, ArrowShape, Geometry, MosaicPatch, RectangleShape, ShapeId};
use crate::tools::{PointerMode, ShapeKind, ToolState};
use crate::Point;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        meta: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
        meta: false,
    };

    pub fn any(self) -> bool {
        self.shift || self.ctrl || self.meta
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Gesture {
    Idle,
    Drawing {
        id: ShapeId,
        anchor: Point,
    },
    Selecting {
        anchor: Point,
        current: Point,
    },
    Moving {
        start: Point,
        snapshot: Vec<AnnotationShape>,
    },
    Scaling {
        handle: Handle,
        start: Point,
        snapshot: Vec<AnnotationShape>,
    },
}

#[derive(Clone, Debug)]
pub struct Scene {
    width: f64,
    height: f64,
    config: SurfaceConfig,
    shapes: Vec<AnnotationShape>,
    selection: SelectionSet,
    gesture: Gesture,
    next_id: u64,
}

impl Scene {
    pub fn new(width: f64, height: f64, config: SurfaceConfig) -> Self {
        Self {
            width,
            height,
            config,
            shapes: Vec::new(),
            selection: SelectionSet::new(),
            gesture: Gesture::Idle,
            next_id: 1,
        }
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    pub fn shapes(&self) -> &[AnnotationShape] {
        &self.shapes
    }

    pub fn shape(&self, id: ShapeId) -> Option<&AnnotationShape> {
        self.shapes.iter().find(|shape| shape.id == id)
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn in_progress(&self) -> Option<ShapeId> {
        match self.gesture {
            Gesture::Drawing { id, .. } => Some(id),
            _ => None,
        }
    }

    pub fn marquee(&self) -> Option<Bounds> {
        match self.gesture {
            Gesture::Selecting { anchor, current } => Some(Bounds::from_corners(anchor, current)),
            _ => None,
        }
    }

    pub fn selection_bounds(&self) -> Option<Bounds> {
        self.shapes
            .iter()
            .filter(|shape| self.selection.contains(shape.id))
            .map(AnnotationShape::bounds)
            .reduce(|acc, bounds| acc.union(&bounds))
    }

    pub fn shape_at(&self, point: Point) -> Option<ShapeId> {
        self.shapes
            .iter()
            .rev()
            .find(|shape| shape.hit(point))
            .map(|shape| shape.id)
    }

    pub fn handle_at(&self, point: Point) -> Option<Handle> {
        let bounds = self.selection_bounds()?;
        handle_at(&bounds, point, self.config.handle_size)
    }

    pub fn shapes_in(&self, area: &Bounds) -> Vec<ShapeId> {
        self.shapes
            .iter()
            .filter(|shape| !shape.is_empty() && shape.bounds().intersects(area))
            .map(|shape| shape.id)
            .collect()
    }

    pub fn clear_selection(&mut self) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        self.selection.clear();
        true
    }

    pub fn remove_selected(&mut self) -> Vec<ShapeId> {
        let removed = self.selection.ids().to_vec();
        self.shapes.retain(|shape| !removed.contains(&shape.id));
        self.selection.clear();
        removed
    }

    pub fn pointer_down(
        &mut self,
        point: Point,
        modifiers: Modifiers,
        tools: &ToolState,
        mode: PointerMode,
    ) -> bool {
        if !matches!(self.gesture, Gesture::Idle) {
            self.pointer_up();
        }

        if let Some(handle) = self.handle_at(point) {
            self.gesture = Gesture::Scaling {
                handle,
                start: point,
                snapshot: self.selected_shapes(),
            };
            return true;
        }

        if let Some(id) = self.shape_at(point) {
            self.selection.click(id, modifiers.any());
            if self.selection.contains(id) {
                self.gesture = Gesture::Moving {
                    start: point,
                    snapshot: self.selected_shapes(),
                };
            }
            return true;
        }

        self.selection.clear();
        if mode == PointerMode::Select || modifiers.any() {
            self.gesture = Gesture::Selecting {
                anchor: point,
                current: point,
            };
            return true;
        }

        let id = self.add_shape(tools, point);
        self.gesture = Gesture::Drawing { id, anchor: point };
        true
    }

    pub fn pointer_move(&mut self, point: Point) -> bool {
        let inside = self.clamp(point);
        match &mut self.gesture {
            Gesture::Idle => false,
            Gesture::Drawing { id, .. } => {
                let id = *id;
                match self.shapes.iter_mut().find(|shape| shape.id == id) {
                    Some(shape) => {
                        shape.drag_to(inside);
                        true
                    }
                    None => false,
                }
            }
            Gesture::Selecting { current, .. } => {
                *current = inside;
                true
            }
            Gesture::Moving { start, snapshot } => {
                let dx = point.x - start.x;
                let dy = point.y - start.y;
                let updated = snapshot
                    .iter()
                    .map(|shape| shape.translated(dx, dy))
                    .collect::<Vec<_>>();
                self.replace_shapes(updated);
                true
            }
            Gesture::Scaling {
                handle,
                start,
                snapshot,
            } => {
                let min_scale = self.config.min_scale;
                let anchor = handle.anchor;
                let sx = match handle.axis {
                    ScaleAxis::Both | ScaleAxis::X => {
                        scale_factor(anchor.x, start.x, point.x, min_scale)
                    }
                    ScaleAxis::Y => 1.0,
                };
                let sy = match handle.axis {
                    ScaleAxis::Both | ScaleAxis::Y => {
                        scale_factor(anchor.y, start.y, point.y, min_scale)
                    }
                    ScaleAxis::X => 1.0,
                };
                let updated = snapshot
                    .iter()
                    .map(|shape| shape.scaled_about(anchor, sx, sy))
                    .collect::<Vec<_>>();
                self.replace_shapes(updated);
                true
            }
        }
    }

    pub fn pointer_up(&mut self) -> bool {
        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Idle => false,
            Gesture::Drawing { id, .. } => {
                if let Some(shape) = self.shapes.iter_mut().find(|shape| shape.id == id) {
                    shape.normalize();
                }
                true
            }
            Gesture::Selecting { anchor, current } => {
                let area = Bounds::from_corners(anchor, current);
                if area.width() > 0.0 || area.height() > 0.0 {
                    let hits = self.shapes_in(&area);
                    self.selection.replace(hits);
                }
                true
            }
            Gesture::Moving { .. } | Gesture::Scaling { .. } => true,
        }
    }

    // Captured pointers keep reporting outside the canvas.
    fn clamp(&self, point: Point) -> Point {
        Point::new(point.x.clamp(0.0, self.width), point.y.clamp(0.0, self.height))
    }

    fn selected_shapes(&self) -> Vec<AnnotationShape> {
        self.shapes
            .iter()
            .filter(|shape| self.selection.contains(shape.id))
            .cloned()
            .collect()
    }

    fn replace_shapes(&mut self, updated: Vec<AnnotationShape>) {
        for shape in updated {
            if let Some(slot) = self.shapes.iter_mut().find(|item| item.id == shape.id) {
                *slot = shape;
            }
        }
    }

    fn add_shape(&mut self, tools: &ToolState, point: Point) -> ShapeId {
        let id = ShapeId(self.next_id);
        self.next_id += 1;
        let color = tools.color;
        let stroke_width = tools.stroke_width.px();
        let geometry = match tools.shape {
            ShapeKind::Rectangle => {
                Geometry::Rectangle(RectangleShape::new(point, color, stroke_width))
            }
            ShapeKind::Arrow => Geometry::Arrow(ArrowShape::new(
                point,
                color,
                stroke_width,
                self.config.arrow_pointer,
            )),
            ShapeKind::Mosaic => Geometry::Mosaic(MosaicPatch::new(point)),
        };
        self.shapes.push(AnnotationShape { id, geometry });
        id
    }
}
