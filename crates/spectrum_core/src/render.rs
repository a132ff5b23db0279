use log::debug;
use serde::Serialize;

use crate::geometry::{Anchor, HAlign, Point, VAlign, Viewport};
use crate::palette::{Rgba, band_color, label_offset, trait_color};
use crate::{Polarity, TraitSet};

pub const TITLE: &str = "Gender-Coded Spectrum of Traits";

const TICK_MIN: i32 = -5;
const TICK_MAX: i32 = 5;
const BAND_BOTTOM: f64 = -0.3;
const BAND_HEIGHT: f64 = 0.6;
const TICK_LABEL_Y: f64 = -0.5;
const TICK_MARKER_SIZE: f64 = 4.0;
const MEAN_LABEL_Y: f64 = -1.1;
const BUBBLE_Y: f64 = 0.4;
const BUBBLE_SIZE: f64 = 12.0;
const BUBBLE_ALPHA: f64 = 0.95;
const LABEL_ROTATION_DEG: f64 = 30.0;
const TITLE_Y: f64 = 1.5;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FontStyle {
    /// Points.
    pub size: f64,
    pub bold: bool,
    pub italic: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TextLabel {
    pub text: String,
    pub position: Point,
    pub anchor: Anchor,
    pub font: FontStyle,
    /// Counter-clockwise, degrees.
    pub rotation_deg: f64,
    pub color: Rgba,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Band {
    pub tick: i32,
    /// Lower-left corner.
    pub origin: Point,
    pub width: f64,
    pub height: f64,
    pub fill: Rgba,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SpectrumLine {
    pub from: Point,
    pub to: Point,
    pub color: Rgba,
    pub width: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Tick {
    pub value: i32,
    pub marker: Point,
    pub marker_size: f64,
    pub marker_color: Rgba,
    pub label: TextLabel,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MeanIndicator {
    pub value: f64,
    pub from: Point,
    pub to: Point,
    pub label: TextLabel,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Bubble {
    pub index: usize,
    pub center: Point,
    /// Marker diameter in points.
    pub size: f64,
    pub fill: Rgba,
    pub label: TextLabel,
}

/// One drawable primitive. Sizes and widths are in points, positions in data
/// space.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Rect {
        origin: Point,
        width: f64,
        height: f64,
        fill: Rgba,
    },
    Line {
        from: Point,
        to: Point,
        color: Rgba,
        width: f64,
        dotted: bool,
    },
    Marker {
        center: Point,
        size: f64,
        fill: Rgba,
    },
    Text(TextLabel),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderedSpectrum {
    pub viewport: Viewport,
    /// Nominal figure size in inches.
    pub figure_size: (f64, f64),
    pub bands: Vec<Band>,
    pub spectrum_line: SpectrumLine,
    pub ticks: Vec<Tick>,
    pub mean: MeanIndicator,
    pub bubbles: Vec<Bubble>,
    pub title: TextLabel,
}

impl RenderedSpectrum {
    pub fn mean_value(&self) -> f64 {
        self.mean.value
    }

    /// Every primitive in painter's order: bands, spectrum line, ticks, mean
    /// indicator, bubbles, title.
    pub fn shapes(&self) -> Vec<Shape> {
        let mut shapes = Vec::with_capacity(
            self.bands.len() + 1 + 2 * self.ticks.len() + 2 + 2 * self.bubbles.len() + 1,
        );

        shapes.extend(self.bands.iter().map(|band| Shape::Rect {
            origin: band.origin,
            width: band.width,
            height: band.height,
            fill: band.fill,
        }));

        shapes.push(Shape::Line {
            from: self.spectrum_line.from,
            to: self.spectrum_line.to,
            color: self.spectrum_line.color,
            width: self.spectrum_line.width,
            dotted: false,
        });

        for tick in &self.ticks {
            shapes.push(Shape::Marker {
                center: tick.marker,
                size: tick.marker_size,
                fill: tick.marker_color,
            });
            shapes.push(Shape::Text(tick.label.clone()));
        }

        shapes.push(Shape::Line {
            from: self.mean.from,
            to: self.mean.to,
            color: Rgba::BLACK,
            width: 1.0,
            dotted: true,
        });
        shapes.push(Shape::Text(self.mean.label.clone()));

        for bubble in &self.bubbles {
            shapes.push(Shape::Marker {
                center: bubble.center,
                size: bubble.size,
                fill: bubble.fill,
            });
            shapes.push(Shape::Text(bubble.label.clone()));
        }

        shapes.push(Shape::Text(self.title.clone()));
        shapes
    }
}

/// Tick caption: magnitude plus `F`/`M`, bare `0` at the neutral point.
pub fn tick_label(value: i32) -> String {
    format!("{}{}", value.abs(), Polarity::of(f64::from(value)).suffix())
}

/// Lays out the full spectrum scene for `traits`. Pure; holds no state.
pub fn render(traits: &TraitSet) -> RenderedSpectrum {
    let viewport = Viewport::SPECTRUM;

    let bands = (TICK_MIN..=TICK_MAX)
        .map(|x| Band {
            tick: x,
            origin: Point::new(f64::from(x) - 0.5, BAND_BOTTOM),
            width: 1.0,
            height: BAND_HEIGHT,
            fill: band_color(x),
        })
        .collect();

    let spectrum_line = SpectrumLine {
        from: Point::new(f64::from(TICK_MIN), 0.0),
        to: Point::new(f64::from(TICK_MAX), 0.0),
        color: Rgba::BLACK,
        width: 1.0,
    };

    let ticks = (TICK_MIN..=TICK_MAX)
        .map(|x| Tick {
            value: x,
            marker: Point::new(f64::from(x), 0.0),
            marker_size: TICK_MARKER_SIZE,
            marker_color: if x == 0 { Rgba::BLACK } else { Rgba::GRAY },
            label: TextLabel {
                text: tick_label(x),
                position: Point::new(f64::from(x), TICK_LABEL_Y),
                anchor: Anchor::new(HAlign::Center, VAlign::Center),
                font: FontStyle {
                    size: 10.0,
                    bold: true,
                    italic: false,
                },
                rotation_deg: 0.0,
                color: Rgba::BLACK,
            },
        })
        .collect();

    let mean_value = traits.mean();
    let mean = MeanIndicator {
        value: mean_value,
        from: Point::new(mean_value, viewport.y_min),
        to: Point::new(mean_value, viewport.y_max),
        label: TextLabel {
            text: format!("Mean: {mean_value:.1}"),
            position: Point::new(mean_value, MEAN_LABEL_Y),
            anchor: Anchor::new(HAlign::Center, VAlign::Top),
            font: FontStyle {
                size: 10.0,
                bold: false,
                italic: true,
            },
            rotation_deg: 0.0,
            color: Rgba::BLACK,
        },
    };

    let bubbles: Vec<Bubble> = traits
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let x = entry.score().value();
            let color = trait_color(index);
            Bubble {
                index,
                center: Point::new(x, BUBBLE_Y),
                size: BUBBLE_SIZE,
                fill: color.with_alpha(BUBBLE_ALPHA),
                label: TextLabel {
                    text: entry.label().to_string(),
                    position: Point::new(x, label_offset(index)),
                    anchor: Anchor::new(HAlign::Center, VAlign::Bottom),
                    font: FontStyle {
                        size: 11.0,
                        bold: true,
                        italic: false,
                    },
                    rotation_deg: LABEL_ROTATION_DEG,
                    color,
                },
            }
        })
        .collect();

    let title = TextLabel {
        text: TITLE.to_string(),
        position: Point::new(0.0, TITLE_Y),
        anchor: Anchor::new(HAlign::Center, VAlign::Baseline),
        font: FontStyle {
            size: 18.0,
            bold: true,
            italic: true,
        },
        rotation_deg: 0.0,
        color: Rgba::BLACK,
    };

    debug!(
        "rendered spectrum: {} traits, mean {:.3}",
        bubbles.len(),
        mean_value
    );

    RenderedSpectrum {
        viewport,
        figure_size: (14.0, 6.0),
        bands,
        spectrum_line,
        ticks,
        mean,
        bubbles,
        title,
    }
}
