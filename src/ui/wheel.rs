use ratatui::{
    Frame,
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use super::helpers::hex_to_color;
use super::layout::{
    BRIGHTNESS_CELLS, brightness_rect, hint_rect, lightness_cell, picker_popup, presets_rect,
    preview_rect, wheel_rect,
};
use super::theme::Theme;
use crate::app::{App, MAX_LIGHTNESS, MIN_LIGHTNESS, point_to_cell};
use crate::color::{Hsl, PRESET_COLORS, Rgb};
use crate::wheel::{CENTER, Point, WheelFrame};

// Halo cells are painted beside dots whose blur passes this.
const HALO_BLUR: f64 = 2.0;
const RING_MARKS: usize = 12;

fn rgb(color: Rgb) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

/// Terminal stand-in for the dot radius: bigger dots get heavier glyphs.
pub fn dot_glyph(size: f64) -> char {
    if size < 4.5 {
        '·'
    } else if size < 6.0 {
        '∙'
    } else if size < 7.5 {
        '•'
    } else {
        '●'
    }
}

fn put(buf: &mut Buffer, area: Rect, point: Point, glyph: char, style: Style) {
    let (dx, dy) = point_to_cell(point);
    let x = area.x as i32 + dx;
    let y = area.y as i32 + dy;
    if x < area.x as i32 || y < area.y as i32 || x >= area.right() as i32 || y >= area.bottom() as i32
    {
        return;
    }
    if let Some(cell) = buf.cell_mut((x as u16, y as u16)) {
        cell.set_char(glyph).set_style(style);
    }
}

fn draw_wheel(buf: &mut Buffer, area: Rect, wheel: &WheelFrame) {
    for sprite in &wheel.dots {
        let color = rgb(sprite.color);
        if sprite.blur > HALO_BLUR {
            let halo = Point::new(sprite.position.x + 5.0, sprite.position.y);
            put(buf, area, halo, '░', Style::default().fg(color));
        }
        put(
            buf,
            area,
            sprite.position,
            dot_glyph(sprite.size),
            Style::default().fg(color),
        );
    }

    // The hub stays empty; only the pulsing ring around it is drawn.
    let ring = Style::default().fg(rgb(wheel.ring_color));
    for mark in 0..RING_MARKS {
        let angle = mark as f64 / RING_MARKS as f64 * std::f64::consts::TAU;
        let point = Point::new(
            CENTER.x + angle.cos() * wheel.ring_radius,
            CENTER.y + angle.sin() * wheel.ring_radius,
        );
        put(buf, area, point, '∘', ring);
    }
}

fn brightness_line(app: &App) -> Line<'static> {
    let hsl = app.picker.hsl();
    let marker = lightness_cell(hsl.l);
    let mut spans = vec![Span::styled("Light   ", Style::default().fg(Theme::dim()))];
    for cell in 0..BRIGHTNESS_CELLS {
        let lightness = MIN_LIGHTNESS
            + cell as f64 / (BRIGHTNESS_CELLS - 1) as f64 * (MAX_LIGHTNESS - MIN_LIGHTNESS);
        let color = rgb(Hsl::new(hsl.h, hsl.s, lightness).to_rgb());
        let glyph = if cell == marker { "●" } else { "━" };
        spans.push(Span::styled(glyph, Style::default().fg(color)));
    }
    Line::from(spans)
}

fn preview_line(app: &App) -> Line<'static> {
    let theme = app.theme.theme();
    let accent = hex_to_color(&theme.hex).unwrap_or(Theme::primary());
    let hover = hex_to_color(&theme.hover).unwrap_or(Theme::primary());
    Line::from(vec![
        Span::styled("Color   ", Style::default().fg(Theme::dim())),
        Span::styled("██████", Style::default().fg(accent)),
        Span::raw(" "),
        Span::styled(
            theme.hex.clone(),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  hover ", Style::default().fg(Theme::dim())),
        Span::styled("██", Style::default().fg(hover)),
    ])
}

fn presets_line(app: &App) -> Line<'static> {
    let mut spans = Vec::new();
    for preset in PRESET_COLORS {
        let color = hex_to_color(preset).unwrap_or(Theme::text());
        let style = if preset.eq_ignore_ascii_case(app.theme.hex()) {
            Style::default().fg(color).add_modifier(Modifier::UNDERLINED)
        } else {
            Style::default().fg(color)
        };
        spans.push(Span::styled("██", style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

/// Draws the open color picker popover.
pub fn render_picker(frame: &mut Frame, app: &App) {
    let Some(popup) = picker_popup(frame.area()) else {
        return;
    };
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .style(Style::default().fg(Theme::secondary()))
            .title(" Accent "),
        popup,
    );

    let accent = Rgb::parse(app.theme.hex()).unwrap_or(Rgb { r: 255, g: 255, b: 255 });
    let wheel = wheel_rect(popup);
    let wheel_frame = app.picker.frame(accent);
    let buf = frame.buffer_mut();
    draw_wheel(buf, wheel, &wheel_frame);

    let selector = if app.picker.selector_pulse() { '◎' } else { '◉' };
    put(
        buf,
        wheel,
        app.picker.selector(),
        selector,
        Style::default()
            .fg(Theme::text())
            .add_modifier(Modifier::BOLD),
    );

    frame.render_widget(Paragraph::new(brightness_line(app)), brightness_rect(popup));
    frame.render_widget(Paragraph::new(preview_line(app)), preview_rect(popup));
    frame.render_widget(Paragraph::new(presets_line(app)), presets_rect(popup));
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "←/→ hue  ↑/↓ sat  +/- light  1-8 preset",
            Style::default().fg(Theme::dim()),
        ))),
        hint_rect(popup),
    );
}
