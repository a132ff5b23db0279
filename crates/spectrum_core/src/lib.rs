//! Trait-to-spectrum rendering.
//!
//! A [`TraitSet`] of labeled scores on the fixed -5..=5 half-step scale is
//! turned into a [`RenderedSpectrum`] by [`render`]. The scene is a plain
//! value; presentation layers (SVG export, terminal canvas) walk
//! [`RenderedSpectrum::shapes`] and draw it.

mod collector;
mod error;
mod geometry;
mod model;
mod palette;
pub mod presets;
mod render;
mod score;
pub mod svg;

pub use collector::{MAX_FIXED_ROWS, RowPolicy, SubmitMode, TraitCollector, TraitRow};
pub use error::SpectrumError;
pub use geometry::{Anchor, HAlign, Point, VAlign, Viewport};
pub use model::{TraitEntry, TraitSet};
pub use palette::{Rgba, TAB10, band_color, label_offset, trait_color};
pub use render::{
    Band, Bubble, FontStyle, MeanIndicator, RenderedSpectrum, Shape, SpectrumLine, TextLabel,
    Tick, TITLE, render, tick_label,
};
pub use score::{Polarity, SCALE_MAX, SCALE_MIN, SCORE_STEPS, Score};
