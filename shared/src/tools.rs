use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Arrow,
    Mosaic,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StrokeColor {
    #[default]
    Red,
    Blue,
    Green,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StrokeWidth {
    #[default]
    Thin,
    Thick,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Rectangle, ShapeKind::Arrow, ShapeKind::Mosaic];

    pub fn key(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rect",
            ShapeKind::Arrow => "arrow",
            ShapeKind::Mosaic => "mosaic",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }

    pub fn label(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "□",
            ShapeKind::Arrow => "→",
            ShapeKind::Mosaic => "Mosaic",
        }
    }
}

impl StrokeColor {
    pub const ALL: [StrokeColor; 3] = [StrokeColor::Red, StrokeColor::Blue, StrokeColor::Green];

    pub fn css(self) -> &'static str {
        match self {
            StrokeColor::Red => "red",
            StrokeColor::Blue => "blue",
            StrokeColor::Green => "green",
        }
    }

    pub fn from_css(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|color| color.css() == value)
    }
}

impl StrokeWidth {
    pub const ALL: [StrokeWidth; 2] = [StrokeWidth::Thin, StrokeWidth::Thick];

    pub fn px(self) -> f64 {
        match self {
            StrokeWidth::Thin => 3.0,
            StrokeWidth::Thick => 10.0,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            StrokeWidth::Thin => "thin",
            StrokeWidth::Thick => "thick",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|width| width.key() == key)
    }

    pub fn label(self) -> &'static str {
        match self {
            StrokeWidth::Thin => "Thin",
            StrokeWidth::Thick => "Thick",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ToolState {
    pub shape: ShapeKind,
    pub color: StrokeColor,
    pub stroke_width: StrokeWidth,
}

impl ToolState {
    pub fn set_shape(&mut self, shape: ShapeKind) {
        self.shape = shape;
    }

    pub fn set_color(&mut self, color: StrokeColor) {
        self.color = color;
    }

    pub fn set_stroke_width(&mut self, stroke_width: StrokeWidth) {
        self.stroke_width = stroke_width;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerMode {
    #[default]
    Draw,
    Select,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolbarAction {
    Shape(ShapeKind),
    Color(StrokeColor),
    Width(StrokeWidth),
    Mode(PointerMode),
}

impl ToolbarAction {
    // Picking a shape always goes back to drawing.
    pub fn apply(self, tools: &mut ToolState, mode: &mut PointerMode) -> bool {
        let before = (*tools, *mode);
        match self {
            ToolbarAction::Shape(shape) => {
                tools.set_shape(shape);
                *mode = PointerMode::Draw;
            }
            ToolbarAction::Color(color) => tools.set_color(color),
            ToolbarAction::Width(width) => tools.set_stroke_width(width),
            ToolbarAction::Mode(next) => *mode = next,
        }
        before != (*tools, *mode)
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "r" | "R" => Some(ToolbarAction::Shape(ShapeKind::Rectangle)),
            "a" | "A" => Some(ToolbarAction::Shape(ShapeKind::Arrow)),
            "m" | "M" => Some(ToolbarAction::Shape(ShapeKind::Mosaic)),
            "v" | "V" => Some(ToolbarAction::Mode(PointerMode::Select)),
            _ => None,
        }
    }
}
