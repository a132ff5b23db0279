use crate::app::App;
use crate::model::{AppState, Focus};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::canvas::{Canvas, Circle, Context, Line as CanvasLine, Points},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use spectrum_core::{HAlign, RenderedSpectrum, Rgba, Shape, SubmitMode, TextLabel, render as render_spectrum};

const BAND_FILL_LINES: u32 = 6;
const DOT_SEGMENTS: u32 = 40;
const BUBBLE_RADIUS: f64 = 0.12;
/// Markers at or below this size (points) are drawn as single dots.
const SMALL_MARKER: f64 = 4.0;

// --- Color Helpers ---

/// Maps scene colours onto a dark terminal: black ink becomes white and
/// translucent fills are darkened by their opacity.
fn ink(color: Rgba) -> Color {
    if (color.r, color.g, color.b) == (0, 0, 0) {
        return Color::White;
    }
    let blend = |c: u8| (f64::from(c) * color.a).round() as u8;
    Color::Rgb(blend(color.r), blend(color.g), blend(color.b))
}

fn focus_style(active: bool) -> Style {
    if active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

// --- HeaderView ---
pub struct HeaderView;

pub struct HeaderProps {
    pub mode: SubmitMode,
    pub pending_submit: bool,
}

impl HeaderView {
    pub fn render(frame: &mut Frame, area: Rect, props: &HeaderProps) {
        let mode = match props.mode {
            SubmitMode::Live => Span::styled(" LIVE ", Style::default().fg(Color::Green)),
            SubmitMode::OnSubmit => Span::styled(" ON SUBMIT ", Style::default().fg(Color::Cyan)),
        };
        let pending = if props.pending_submit {
            Span::styled(
                " unsubmitted changes (s) ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::raw("")
        };
        let content = Line::from(vec![
            Span::styled(" Gender-Coded Trait Mapper ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("| Render: "),
            mode,
            pending,
        ]);
        let paragraph = Paragraph::new(content).block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(paragraph, area);
    }
}

// --- TraitRowsView ---
pub struct TraitRowsView;

impl TraitRowsView {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
        let active = matches!(state.focus, Focus::Rows | Focus::EditLabel);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(focus_style(active))
            .title(" Traits ");

        let items: Vec<ListItem> = state
            .collector
            .rows()
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let editing = state.focus == Focus::EditLabel && i == state.selected_row;
                let label = if editing {
                    format!("{}█", row.label)
                } else if row.is_blank() {
                    "(blank)".to_string()
                } else {
                    row.label.clone()
                };
                let label_style = if row.is_blank() && !editing {
                    Style::default().fg(Color::DarkGray)
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(vec![
                    Span::raw(format!("Trait #{:<2} ", i + 1)),
                    Span::styled(format!("{label:<22}"), label_style),
                    Span::styled(format!("{:>5}", row.score.label()), Style::default().fg(Color::Cyan)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut list_state = ListState::default().with_selected(Some(state.selected_row));
        frame.render_stateful_widget(list, area, &mut list_state);
    }
}

// --- PresetPickerView ---
pub struct PresetPickerView;

impl PresetPickerView {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(focus_style(state.focus == Focus::Presets))
            .title(" Presets (space to toggle) ");

        let items: Vec<ListItem> = state
            .preset_items
            .iter()
            .map(|item| {
                let mark = if state.is_preset_selected(item) { "[x]" } else { "[ ]" };
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{mark} ")),
                    Span::raw(item.name),
                    Span::styled(format!("  {}", item.group), Style::default().fg(Color::DarkGray)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut list_state = ListState::default().with_selected(Some(state.preset_cursor));
        frame.render_stateful_widget(list, area, &mut list_state);
    }
}

// --- SpectrumChartView ---
pub struct SpectrumChartView;

pub struct SpectrumChartProps {
    pub scene: RenderedSpectrum,
}

impl SpectrumChartView {
    pub fn render(frame: &mut Frame, area: Rect, props: &SpectrumChartProps) {
        let block = Block::default().borders(Borders::ALL).title(" Spectrum ");
        let inner = block.inner(area);
        let viewport = props.scene.viewport;
        let column_width = viewport.width() / f64::from(inner.width.max(1));
        let shapes = props.scene.shapes();

        let canvas = Canvas::default()
            .block(block)
            .marker(Marker::Braille)
            .x_bounds([viewport.x_min, viewport.x_max])
            .y_bounds([viewport.y_min, viewport.y_max])
            .paint(|ctx| {
                for shape in &shapes {
                    paint_shape(ctx, shape, column_width);
                }
            });
        frame.render_widget(canvas, area);
    }
}

fn paint_shape(ctx: &mut Context, shape: &Shape, column_width: f64) {
    match shape {
        Shape::Rect {
            origin,
            width,
            height,
            fill,
        } => {
            // canvases cannot fill, so stripe the band
            for i in 0..=BAND_FILL_LINES {
                let y = origin.y + height * f64::from(i) / f64::from(BAND_FILL_LINES);
                ctx.draw(&CanvasLine {
                    x1: origin.x,
                    y1: y,
                    x2: origin.x + width,
                    y2: y,
                    color: ink(*fill),
                });
            }
            ctx.layer();
        }
        Shape::Line {
            from, to, color, dotted, ..
        } => {
            if *dotted {
                for i in (0..DOT_SEGMENTS).step_by(2) {
                    let t0 = f64::from(i) / f64::from(DOT_SEGMENTS);
                    let t1 = f64::from(i + 1) / f64::from(DOT_SEGMENTS);
                    ctx.draw(&CanvasLine {
                        x1: from.x + (to.x - from.x) * t0,
                        y1: from.y + (to.y - from.y) * t0,
                        x2: from.x + (to.x - from.x) * t1,
                        y2: from.y + (to.y - from.y) * t1,
                        color: ink(*color),
                    });
                }
            } else {
                ctx.draw(&CanvasLine {
                    x1: from.x,
                    y1: from.y,
                    x2: to.x,
                    y2: to.y,
                    color: ink(*color),
                });
            }
        }
        Shape::Marker { center, size, fill } => {
            if *size <= SMALL_MARKER {
                ctx.draw(&Points {
                    coords: &[(center.x, center.y)],
                    color: ink(*fill),
                });
            } else {
                ctx.draw(&Circle {
                    x: center.x,
                    y: center.y,
                    radius: BUBBLE_RADIUS,
                    color: ink(*fill),
                });
            }
        }
        Shape::Text(label) => print_label(ctx, label, column_width),
    }
}

/// Terminal text cannot rotate; labels are printed horizontally, aligned the
/// way the scene anchors them.
fn print_label(ctx: &mut Context, label: &TextLabel, column_width: f64) {
    let chars = label.text.chars().count() as f64;
    let shift = match label.anchor.h {
        HAlign::Left => 0.0,
        HAlign::Center => chars / 2.0,
        HAlign::Right => chars,
    };
    let mut style = Style::default().fg(ink(label.color));
    if label.font.bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    if label.font.italic {
        style = style.add_modifier(Modifier::ITALIC);
    }
    ctx.print(
        label.position.x - shift * column_width,
        label.position.y,
        Span::styled(label.text.clone(), style),
    );
}

// --- StatusView ---
pub struct StatusView;

pub struct StatusProps {
    pub mean_label: String,
    pub trait_count: usize,
    pub last_log: Option<String>,
}

impl StatusView {
    pub fn render(frame: &mut Frame, area: Rect, props: &StatusProps) {
        let mut lines = vec![Line::from(vec![
            Span::styled(format!(" {} ", props.mean_label), Style::default().add_modifier(Modifier::ITALIC)),
            Span::raw(format!("| {} traits plotted | ? for help", props.trait_count)),
        ])];
        if let Some(log) = &props.last_log {
            lines.push(Line::from(Span::styled(format!(" {log}"), Style::default().fg(Color::Gray))));
        }
        let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::TOP));
        frame.render_widget(paragraph, area);
    }
}

// --- HelpView ---
pub struct HelpView;

impl HelpView {
    const KEYS: &'static [(&'static str, &'static str)] = &[
        ("↑/↓ j/k", "select row"),
        ("←/→ h/l", "score -/+ 0.5"),
        ("e / Enter", "edit label (Esc/Enter to finish)"),
        ("d", "delete row"),
        ("+ / -", "more / fewer rows (fixed forms)"),
        ("p", "preset picker"),
        ("s", "submit (on-submit forms)"),
        ("q", "quit"),
    ];

    pub fn render(frame: &mut Frame, area: Rect) {
        let popup = centered_rect(60, 50, area);
        let lines: Vec<Line> = Self::KEYS
            .iter()
            .map(|(key, what)| {
                Line::from(vec![
                    Span::styled(format!("{key:<12}"), Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(*what),
                ])
            })
            .collect();
        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(" Help "))
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(Clear, popup);
        frame.render_widget(paragraph, popup);
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Main render entry point: lays out the panes and draws every view.
pub fn render(app: &App, frame: &mut Frame) {
    let state = &app.state;
    let chart_traits = app.chart_traits();
    let scene = render_spectrum(&chart_traits);

    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(10),   // Body
            Constraint::Length(3), // Status
        ])
        .split(frame.size());

    HeaderView::render(
        frame,
        outer[0],
        &HeaderProps {
            mode: state.collector.mode(),
            pending_submit: state.collector.mode() == SubmitMode::OnSubmit
                && chart_traits != state.collector.current_trait_set(),
        },
    );

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(outer[1]);

    if state.focus == Focus::Presets {
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(body[0]);
        TraitRowsView::render(frame, left[0], state);
        PresetPickerView::render(frame, left[1], state);
    } else {
        TraitRowsView::render(frame, body[0], state);
    }

    StatusView::render(
        frame,
        outer[2],
        &StatusProps {
            mean_label: scene.mean.label.text.clone(),
            trait_count: scene.bubbles.len(),
            last_log: state.logs.last().cloned(),
        },
    );

    SpectrumChartView::render(frame, body[1], &SpectrumChartProps { scene });

    if state.show_help {
        HelpView::render(frame, frame.size());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Action;
    use ratatui::{Terminal, backend::TestBackend};
    use spectrum_core::RowPolicy;

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 32)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content.iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn empty_form_shows_neutral_mean_and_scale() {
        let mut app = App::new(RowPolicy::Growable, SubmitMode::Live).unwrap();
        app.init().unwrap();
        let text = screen(&app);
        assert!(text.contains("Mean: 0.0"));
        assert!(text.contains("5F"));
        assert!(text.contains("5M"));
        assert!(text.contains("(blank)"));
    }

    #[test]
    fn typed_trait_appears_on_chart() {
        let mut app = App::new(RowPolicy::Growable, SubmitMode::Live).unwrap();
        app.dispatch(Action::EnterEdit).unwrap();
        for ch in "Stoic".chars() {
            app.dispatch(Action::InputChar(ch)).unwrap();
        }
        app.dispatch(Action::ExitEdit).unwrap();
        let text = screen(&app);
        assert!(text.contains("Stoic"));
        assert!(text.contains("1 traits plotted"));
    }

    #[test]
    fn help_popup_lists_keys() {
        let mut app = App::new(RowPolicy::Fixed(2), SubmitMode::OnSubmit).unwrap();
        app.dispatch(Action::ToggleHelp).unwrap();
        let text = screen(&app);
        assert!(text.contains("preset picker"));
        assert!(text.contains("ON SUBMIT"));
    }

    #[test]
    fn ink_inverts_black_for_dark_terminals() {
        assert_eq!(ink(Rgba::BLACK), Color::White);
        assert_eq!(ink(Rgba::rgb(10, 20, 30)), Color::Rgb(10, 20, 30));
    }
}
