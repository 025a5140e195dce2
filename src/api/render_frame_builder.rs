use crate::core::{ProjectedRow, TimelineRow};
use crate::error::{TimelineError, TimelineResult};
use crate::render::{
    Color, HitRegion, HitTarget, LinePrimitive, RectPrimitive, RenderFrame, Renderer,
    TextHAlign, TextPrimitive,
};

use super::{TickKind, TimelineEngine, TimelineRenderStyle, TimelineView};

const COLUMN_SEPARATOR: &str = " · ";

impl<R: Renderer> TimelineEngine<R> {
    /// Materializes the current view into pixel-space primitives.
    ///
    /// Empty data yields an empty frame.
    pub fn build_render_frame(&self) -> TimelineResult<RenderFrame> {
        let Some(view) = self.view() else {
            return Ok(RenderFrame::new(self.viewport));
        };
        build_frame(&view, &self.rows, self.viewport, self.render_style)
    }
}

struct ChartArea {
    left: f64,
    width: f64,
}

impl ChartArea {
    fn x_at(&self, pct: f64) -> f64 {
        self.left + pct / 100.0 * self.width
    }
}

fn build_frame(
    view: &TimelineView,
    rows: &[TimelineRow],
    viewport: crate::core::Viewport,
    style: TimelineRenderStyle,
) -> TimelineResult<RenderFrame> {
    let total_width = f64::from(viewport.width);
    let chart = ChartArea {
        left: style.label_column_width_px,
        width: total_width - style.label_column_width_px,
    };
    if chart.width <= 0.0 {
        return Err(TimelineError::InvalidData(
            "label column leaves no room for the chart area".to_owned(),
        ));
    }

    let mut frame = RenderFrame::new(viewport);
    let mut y = style.axis_height_px;

    for group in &view.projection.groups {
        frame.rects.push(RectPrimitive::new(
            0.0,
            y,
            total_width,
            style.group_header_height_px,
            style.group_header_fill_color,
        ));
        let marker = if group.collapsed { "▸" } else { "▾" };
        frame.texts.push(TextPrimitive::new(
            format!("{marker} {} ({})", group_label(group), group.row_count),
            4.0,
            y + style.group_header_height_px / 2.0,
            style.font_size_px,
            style.text_color,
            TextHAlign::Left,
        ));
        frame.hit_regions.push(HitRegion {
            x: 0.0,
            y,
            width: total_width,
            height: style.group_header_height_px,
            target: HitTarget::GroupHeader {
                group_id: group.group_id.clone(),
            },
        });
        y += style.group_header_height_px;

        for row in &group.rows {
            push_row(&mut frame, row, rows, &chart, y, total_width, style);
            y += style.row_height_px;
        }
    }

    push_axis(&mut frame, view, &chart, y, style);
    Ok(frame)
}

fn group_label(group: &crate::core::ProjectedGroup) -> &str {
    if group.group_label.is_empty() {
        &group.group_id
    } else {
        &group.group_label
    }
}

fn push_row(
    frame: &mut RenderFrame,
    projected: &ProjectedRow,
    rows: &[TimelineRow],
    chart: &ChartArea,
    top: f64,
    total_width: f64,
    style: TimelineRenderStyle,
) {
    let row_index = projected.row_index;
    frame.hit_regions.push(HitRegion {
        x: 0.0,
        y: top,
        width: total_width,
        height: style.row_height_px,
        target: HitTarget::Row { row_index },
    });

    let columns = projected.columns.join(COLUMN_SEPARATOR);
    let label = if columns.is_empty() {
        projected.row_id.clone()
    } else {
        columns
    };
    if !label.is_empty() {
        frame.texts.push(TextPrimitive::new(
            label,
            12.0,
            top + style.row_height_px / 2.0,
            style.font_size_px,
            style.text_color,
            TextHAlign::Left,
        ));
    }

    let bar_top = top + style.segment_vertical_padding_px;
    let bar_height = style.row_height_px - 2.0 * style.segment_vertical_padding_px;
    for segment in &projected.segments {
        // Malformed segments (end before start) degrade to the minimum width.
        let width = (segment.width_pct.max(0.0) / 100.0 * chart.width)
            .max(style.min_segment_width_px);
        let x = chart.x_at(segment.left_pct);
        let fill = Color::from_token(&segment.color, style.default_segment_color);
        frame
            .rects
            .push(RectPrimitive::new(x, bar_top, width, bar_height, fill));
        frame.hit_regions.push(HitRegion {
            x,
            y: bar_top,
            width,
            height: bar_height,
            target: HitTarget::Segment {
                row_index,
                segment_index: segment.segment_index,
            },
        });
    }

    let marker = style.event_marker_size_px;
    let marker_top = top + (style.row_height_px - marker) / 2.0;
    for event in &projected.events {
        let x = chart.x_at(event.left_pct) - marker / 2.0;
        frame.rects.push(RectPrimitive::new(
            x,
            marker_top,
            marker,
            marker,
            style.event_marker_color,
        ));
        if let Some(icon) = rows
            .get(row_index)
            .and_then(|row| row.events.get(event.event_index))
            .map(|source| source.icon.as_str())
            .filter(|icon| !icon.is_empty())
        {
            frame.texts.push(TextPrimitive::new(
                icon,
                x + marker / 2.0,
                marker_top + marker / 2.0,
                style.font_size_px * 0.75,
                style.text_color,
                TextHAlign::Center,
            ));
        }
        frame.hit_regions.push(HitRegion {
            x,
            y: marker_top,
            width: marker,
            height: marker,
            target: HitTarget::Event {
                row_index,
                event_index: event.event_index,
            },
        });
    }
}

fn push_axis(
    frame: &mut RenderFrame,
    view: &TimelineView,
    chart: &ChartArea,
    content_bottom: f64,
    style: TimelineRenderStyle,
) {
    let duration = view.visible_range.duration() as f64;
    let bottom = content_bottom.max(f64::from(frame.viewport.height));
    for tick in &view.ticks {
        let pct = tick.value.saturating_sub(view.visible_range.start) as f64 / duration * 100.0;
        let x = chart.x_at(pct);
        let (color, width) = if tick.kind == TickKind::Now {
            (style.now_line_color, style.now_line_width_px)
        } else {
            (style.grid_line_color, style.grid_line_width_px)
        };
        frame.lines.push(LinePrimitive::new(
            x,
            style.axis_height_px,
            x,
            bottom,
            width,
            color,
        ));
        if !tick.label.is_empty() {
            frame.texts.push(TextPrimitive::new(
                tick.label.clone(),
                x,
                style.axis_height_px / 2.0,
                style.font_size_px,
                if tick.kind == TickKind::Now {
                    style.now_line_color
                } else {
                    style.text_color
                },
                TextHAlign::Center,
            ));
        }
    }
}
