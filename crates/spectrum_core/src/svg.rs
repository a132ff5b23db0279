//! SVG export for a rendered spectrum.
//!
//! Produces a standalone document string through plotters' SVG backend;
//! writing it anywhere is the caller's job.

use plotters::backend::SVGBackend;
use plotters::chart::ChartBuilder;
use plotters::drawing::IntoDrawingArea;
use plotters::element::{Circle, DashedPathElement, PathElement, Rectangle, Text};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{
    Color, FontStyle as PlotFontStyle, FontTransform, IntoFont, RGBAColor, RGBColor, TextStyle,
};

use crate::error::SpectrumError;
use crate::geometry::{HAlign, VAlign};
use crate::palette::Rgba;
use crate::render::{RenderedSpectrum, Shape, TextLabel};

const POINTS_PER_INCH: f64 = 72.0;
const FONT_FAMILY: &str = "DejaVu Sans";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SvgOptions {
    pub width: u32,
    pub height: u32,
    /// `None` leaves the canvas transparent.
    pub background: Option<Rgba>,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            width: 1400,
            height: 600,
            background: Some(Rgba::WHITE),
        }
    }
}

fn export_error(err: impl std::fmt::Display) -> SpectrumError {
    SpectrumError::Export(err.to_string())
}

fn plot_color(color: Rgba) -> RGBAColor {
    RGBColor(color.r, color.g, color.b).mix(color.a)
}

/// Plotters only turns text by quarter turns; snap to the nearest one.
/// Scene angles are counter-clockwise, plotters' are clockwise.
fn quarter_turn(rotation_deg: f64) -> FontTransform {
    let quarters = (-rotation_deg / 90.0).round().rem_euclid(4.0) as u8;
    match quarters {
        1 => FontTransform::Rotate90,
        2 => FontTransform::Rotate180,
        3 => FontTransform::Rotate270,
        _ => FontTransform::None,
    }
}

fn text_style(label: &TextLabel, px_per_pt: f64) -> TextStyle<'static> {
    let style = if label.font.bold {
        PlotFontStyle::Bold
    } else if label.font.italic {
        PlotFontStyle::Italic
    } else {
        PlotFontStyle::Normal
    };
    let h = match label.anchor.h {
        HAlign::Left => HPos::Left,
        HAlign::Center => HPos::Center,
        HAlign::Right => HPos::Right,
    };
    let v = match label.anchor.v {
        VAlign::Top => VPos::Top,
        VAlign::Center => VPos::Center,
        VAlign::Bottom | VAlign::Baseline => VPos::Bottom,
    };
    (FONT_FAMILY, label.font.size * px_per_pt)
        .into_font()
        .style(style)
        .color(&plot_color(label.color))
        .pos(Pos::new(h, v))
        .transform(quarter_turn(label.rotation_deg))
}

pub fn to_svg(scene: &RenderedSpectrum, options: &SvgOptions) -> Result<String, SpectrumError> {
    let width = options.width.max(1);
    let height = options.height.max(1);
    let px_per_pt = f64::from(width) / (scene.figure_size.0 * POINTS_PER_INCH);
    let px = |points: f64| (points * px_per_pt).round().max(1.0) as u32;
    let viewport = scene.viewport;

    let mut out = String::new();
    {
        let root = SVGBackend::with_string(&mut out, (width, height)).into_drawing_area();
        if let Some(bg) = options.background {
            root.fill(&plot_color(bg)).map_err(export_error)?;
        }
        let mut chart = ChartBuilder::on(&root)
            .margin(0)
            .build_cartesian_2d(viewport.x_min..viewport.x_max, viewport.y_min..viewport.y_max)
            .map_err(export_error)?;

        for shape in scene.shapes() {
            match shape {
                Shape::Rect {
                    origin,
                    width,
                    height,
                    fill,
                } => {
                    let corners = [(origin.x, origin.y), (origin.x + width, origin.y + height)];
                    chart
                        .draw_series(std::iter::once(Rectangle::new(corners, plot_color(fill).filled())))
                        .map_err(export_error)?;
                }
                Shape::Line {
                    from,
                    to,
                    color,
                    width,
                    dotted,
                } => {
                    let points = vec![(from.x, from.y), (to.x, to.y)];
                    let stroke = plot_color(color).stroke_width(px(width));
                    if dotted {
                        let dash = px(width);
                        chart
                            .draw_series(std::iter::once(DashedPathElement::new(
                                points,
                                dash,
                                dash * 2,
                                stroke,
                            )))
                            .map_err(export_error)?;
                    } else {
                        chart
                            .draw_series(std::iter::once(PathElement::new(points, stroke)))
                            .map_err(export_error)?;
                    }
                }
                Shape::Marker { center, size, fill } => {
                    let radius = px(size / 2.0);
                    chart
                        .draw_series(std::iter::once(Circle::new(
                            (center.x, center.y),
                            radius,
                            plot_color(fill).filled(),
                        )))
                        .map_err(export_error)?;
                }
                Shape::Text(label) => {
                    let style = text_style(&label, px_per_pt);
                    chart
                        .draw_series(std::iter::once(Text::new(
                            label.text,
                            (label.position.x, label.position.y),
                            style,
                        )))
                        .map_err(export_error)?;
                }
            }
        }
        root.present().map_err(export_error)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TraitSet, render};

    fn scene() -> RenderedSpectrum {
        render(&TraitSet::from_pairs([("Nurturing", -4.5), ("Stoic", 4.5)]).unwrap())
    }

    #[test]
    fn document_has_one_element_per_primitive() {
        let svg = to_svg(&scene(), &SvgOptions::default()).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains(r#"width="1400""#));
        assert!(svg.trim_end().ends_with("</svg>"));
        // 11 bands plus the background
        assert_eq!(svg.matches("<rect").count(), 12);
        // 11 ticks plus 2 bubbles
        assert_eq!(svg.matches("<circle").count(), 13);
        // tick labels, mean, bubble labels, title
        assert_eq!(svg.matches("<text").count(), 11 + 1 + 2 + 1);
        assert!(svg.contains("Mean: 0.0"));
        assert!(svg.contains("Gender-Coded Spectrum of Traits"));
    }

    #[test]
    fn labels_are_escaped() {
        let set = TraitSet::from_pairs([("Bold & <Brave>", 2.0)]).unwrap();
        let svg = to_svg(&render(&set), &SvgOptions::default()).unwrap();
        assert!(svg.contains("&lt;Brave&gt;"));
        assert!(!svg.contains("<Brave>"));
    }

    #[test]
    fn transparent_background_omits_rect() {
        let options = SvgOptions {
            background: None,
            ..SvgOptions::default()
        };
        let svg = to_svg(&render(&TraitSet::new()), &options).unwrap();
        assert_eq!(svg.matches("<rect").count(), 11);
    }

    #[test]
    fn rotation_snaps_to_quarter_turns() {
        assert!(matches!(quarter_turn(0.0), FontTransform::None));
        assert!(matches!(quarter_turn(30.0), FontTransform::None));
        assert!(matches!(quarter_turn(90.0), FontTransform::Rotate270));
        assert!(matches!(quarter_turn(-90.0), FontTransform::Rotate90));
        assert!(matches!(quarter_turn(180.0), FontTransform::Rotate180));
    }

    #[test]
    fn export_is_deterministic() {
        let a = to_svg(&scene(), &SvgOptions::default()).unwrap();
        let b = to_svg(&scene(), &SvgOptions::default()).unwrap();
        assert_eq!(a, b);
    }
}
