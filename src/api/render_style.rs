use crate::error::{TimelineError, TimelineResult};
use crate::render::Color;

/// Pixel layout and palette used when building a `RenderFrame`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineRenderStyle {
    pub axis_height_px: f64,
    pub group_header_height_px: f64,
    pub row_height_px: f64,
    pub label_column_width_px: f64,
    pub segment_vertical_padding_px: f64,
    pub min_segment_width_px: f64,
    pub event_marker_size_px: f64,
    pub font_size_px: f64,
    pub grid_line_width_px: f64,
    pub now_line_width_px: f64,
    pub text_color: Color,
    pub grid_line_color: Color,
    pub now_line_color: Color,
    pub group_header_fill_color: Color,
    pub default_segment_color: Color,
    pub event_marker_color: Color,
}

impl Default for TimelineRenderStyle {
    fn default() -> Self {
        Self {
            axis_height_px: 28.0,
            group_header_height_px: 26.0,
            row_height_px: 24.0,
            label_column_width_px: 220.0,
            segment_vertical_padding_px: 5.0,
            min_segment_width_px: 1.0,
            event_marker_size_px: 10.0,
            font_size_px: 12.0,
            grid_line_width_px: 1.0,
            now_line_width_px: 2.0,
            text_color: Color::rgb(0.13, 0.13, 0.13),
            grid_line_color: Color::rgba(0.0, 0.0, 0.0, 0.12),
            now_line_color: Color::rgb(0.827, 0.184, 0.184),
            group_header_fill_color: Color::rgb(0.94, 0.94, 0.94),
            default_segment_color: Color::rgb(0.459, 0.459, 0.459),
            event_marker_color: Color::rgb(0.13, 0.13, 0.13),
        }
    }
}

pub(super) fn validate_render_style(
    style: TimelineRenderStyle,
) -> TimelineResult<TimelineRenderStyle> {
    for (value, name) in [
        (style.axis_height_px, "axis_height_px"),
        (style.group_header_height_px, "group_header_height_px"),
        (style.row_height_px, "row_height_px"),
        (style.event_marker_size_px, "event_marker_size_px"),
        (style.font_size_px, "font_size_px"),
        (style.grid_line_width_px, "grid_line_width_px"),
        (style.now_line_width_px, "now_line_width_px"),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(TimelineError::InvalidConfig(format!(
                "render style `{name}` must be finite and > 0"
            )));
        }
    }
    for (value, name) in [
        (style.label_column_width_px, "label_column_width_px"),
        (style.segment_vertical_padding_px, "segment_vertical_padding_px"),
        (style.min_segment_width_px, "min_segment_width_px"),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(TimelineError::InvalidConfig(format!(
                "render style `{name}` must be finite and >= 0"
            )));
        }
    }
    if style.segment_vertical_padding_px * 2.0 >= style.row_height_px {
        return Err(TimelineError::InvalidConfig(
            "segment padding leaves no room inside a row".to_owned(),
        ));
    }
    for color in [
        style.text_color,
        style.grid_line_color,
        style.now_line_color,
        style.group_header_fill_color,
        style.default_segment_color,
        style.event_marker_color,
    ] {
        color.validate()?;
    }
    Ok(style)
}
