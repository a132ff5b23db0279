use serde::Serialize;

/// A position in data space: x along the spectrum, y in chart units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Viewport {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Viewport {
    pub const SPECTRUM: Viewport = Viewport {
        x_min: -5.5,
        x_max: 5.5,
        y_min: -1.5,
        y_max: 1.8,
    };

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn contains(&self, p: Point) -> bool {
        (self.x_min..=self.x_max).contains(&p.x) && (self.y_min..=self.y_max).contains(&p.y)
    }

    /// Maps a data point onto a `width` x `height` pixel surface whose origin
    /// is the top-left corner.
    pub fn to_pixels(&self, p: Point, width: f64, height: f64) -> (f64, f64) {
        let px = (p.x - self.x_min) / self.width() * width;
        let py = (self.y_max - p.y) / self.height() * height;
        (px, py)
    }

    /// Horizontal scale factor from data units to pixels.
    pub fn x_scale(&self, width: f64) -> f64 {
        width / self.width()
    }

    pub fn y_scale(&self, height: f64) -> f64 {
        height / self.height()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VAlign {
    Top,
    Center,
    Bottom,
    Baseline,
}

/// Which point of a text's bounding box sits on its position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Anchor {
    pub h: HAlign,
    pub v: VAlign,
}

impl Anchor {
    pub const fn new(h: HAlign, v: VAlign) -> Self {
        Self { h, v }
    }
}
