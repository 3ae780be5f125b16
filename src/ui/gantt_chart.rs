use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use egui::{Color32, Id, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};
use uuid::Uuid;

use crate::model::timeline::{Scale, ScaleUnit};
use crate::model::{Link, Task, TaskAction, TaskPatch, TimelineViewport};
use crate::ui::theme;

const ROW_HEIGHT: f32 = theme::ROW_HEIGHT;
const ROW_PADDING: f32 = theme::ROW_GAP;
const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;
const HANDLE_WIDTH: f32 = theme::HANDLE_WIDTH;

#[derive(Debug, Clone)]
struct DragSnapshot {
    start: NaiveDate,
    end: NaiveDate,
    start_pointer_x: f32,
}

/// Everything the chart asks the controller to do this frame.
#[derive(Default)]
pub struct ChartInteraction {
    pub actions: Vec<TaskAction>,
}

/// Render the Gantt chart area: stacked timeline header, today line,
/// summary/task bars, dependency arrows. Bar drags come back as `Update`
/// actions, double-clicks as `OpenEditor`.
pub fn show_gantt_chart(
    tasks: &[Task],
    links: &[Link],
    viewport: &mut TimelineViewport,
    scales: &[Scale],
    selected_task: &mut Option<Uuid>,
    ui: &mut Ui,
) -> ChartInteraction {
    let mut interaction = ChartInteraction::default();
    let available = ui.available_size();
    let chart_width = viewport.total_width().max(available.x);
    let chart_height = HEADER_HEIGHT + (tasks.len() as f32 * (ROW_HEIGHT + ROW_PADDING)) + 40.0;

    // Ctrl+scroll zooms
    let scroll_delta = ui.input(|i| i.smooth_scroll_delta);
    if ui.rect_contains_pointer(ui.max_rect()) && ui.input(|i| i.modifiers.ctrl) {
        if scroll_delta.y > 0.0 {
            viewport.zoom_in();
        } else if scroll_delta.y < 0.0 {
            viewport.zoom_out();
        }
    }

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let (response, painter) = ui.allocate_painter(
                Vec2::new(chart_width, chart_height.max(available.y)),
                Sense::click(),
            );
            let origin = response.rect.min;
            let mut consumed_click = false;

            painter.rect_filled(response.rect, 0.0, theme::BG_DARK);

            // Alternating row backgrounds
            for i in 0..tasks.len() {
                let y = origin.y + HEADER_HEIGHT + i as f32 * (ROW_HEIGHT + ROW_PADDING);
                let row_bg = if i % 2 == 0 {
                    theme::BG_PANEL
                } else {
                    theme::BG_DARK
                };
                painter.rect_filled(
                    Rect::from_min_size(
                        Pos2::new(origin.x, y),
                        Vec2::new(chart_width, ROW_HEIGHT + ROW_PADDING),
                    ),
                    0.0,
                    row_bg,
                );
                painter.line_segment(
                    [
                        Pos2::new(origin.x, y + ROW_HEIGHT + ROW_PADDING),
                        Pos2::new(origin.x + chart_width, y + ROW_HEIGHT + ROW_PADDING),
                    ],
                    Stroke::new(0.5, theme::BORDER_SUBTLE),
                );
            }

            draw_timeline_header(&painter, origin, viewport, scales, chart_width, chart_height);
            draw_today_line(&painter, origin, viewport, chart_height);

            // Bar rects first, so links can be drawn underneath the bars'
            // interaction pass.
            let mut bar_rects: HashMap<Uuid, Rect> = HashMap::new();
            for (i, task) in tasks.iter().enumerate() {
                let y =
                    origin.y + HEADER_HEIGHT + i as f32 * (ROW_HEIGHT + ROW_PADDING) + ROW_PADDING;
                bar_rects.insert(task.id, bar_rect(origin, viewport, task, y));
            }

            for link in links {
                if let (Some(from), Some(to)) = (bar_rects.get(&link.source), bar_rects.get(&link.target)) {
                    draw_link_arrow(&painter, *from, *to);
                }
            }

            for task in tasks {
                let rect = bar_rects[&task.id];
                let is_selected = *selected_task == Some(task.id);

                if task.is_summary() {
                    draw_summary_bar(&painter, rect, task, is_selected);
                } else {
                    draw_task_bar(&painter, rect, task, is_selected);
                }

                let bar_response = ui.interact(
                    rect,
                    ui.make_persistent_id(("task-bar", task.id)),
                    Sense::click_and_drag(),
                );

                if bar_response.double_clicked() {
                    interaction.actions.push(TaskAction::OpenEditor(task.id));
                    consumed_click = true;
                } else if bar_response.clicked() {
                    *selected_task = Some(task.id);
                    consumed_click = true;
                }

                if bar_response.hovered() {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                    show_bar_tooltip(ui, task);
                }

                // Summaries track their children in the source data; only
                // leaf bars are draggable.
                if !task.is_summary() {
                    drag_leaf_bar(ui, viewport, task, rect, &bar_response, &mut interaction);
                    if bar_response.drag_started() {
                        *selected_task = Some(task.id);
                        consumed_click = true;
                    }
                }
            }

            // Empty click on the background clears selection
            if response.clicked() && !consumed_click {
                *selected_task = None;
            }
        });

    interaction
}

fn bar_rect(origin: Pos2, viewport: &TimelineViewport, task: &Task, y: f32) -> Rect {
    let x_start = origin.x + viewport.date_to_x(task.start);
    let x_end = origin.x + viewport.date_to_x(task.end);
    let width = (x_end - x_start).max(6.0);
    let inset = theme::BAR_INSET;
    Rect::from_min_size(
        Pos2::new(x_start, y + inset),
        Vec2::new(width, ROW_HEIGHT - inset * 2.0),
    )
}

/// Move / resize handling for one leaf bar. New dates go out as an `Update`
/// patch every frame of the drag; the controller applies it and the bar
/// follows on the next frame.
fn drag_leaf_bar(
    ui: &mut Ui,
    viewport: &TimelineViewport,
    task: &Task,
    rect: Rect,
    bar_response: &egui::Response,
    interaction: &mut ChartInteraction,
) {
    let left_handle = Rect::from_min_max(
        Pos2::new(rect.left() - HANDLE_WIDTH * 0.5, rect.top()),
        Pos2::new(rect.left() + HANDLE_WIDTH * 0.5, rect.bottom()),
    );
    let right_handle = Rect::from_min_max(
        Pos2::new(rect.right() - HANDLE_WIDTH * 0.5, rect.top()),
        Pos2::new(rect.right() + HANDLE_WIDTH * 0.5, rect.bottom()),
    );

    let left_response = ui.interact(
        left_handle.expand(4.0),
        ui.make_persistent_id(("task-resize-left", task.id)),
        Sense::drag(),
    );
    let right_response = ui.interact(
        right_handle.expand(4.0),
        ui.make_persistent_id(("task-resize-right", task.id)),
        Sense::drag(),
    );

    for (response, mode) in [
        (&left_response, "left"),
        (&right_response, "right"),
        (bar_response, "move"),
    ] {
        if response.drag_started() {
            let ptr_x = response.interact_pointer_pos().map(|p| p.x).unwrap_or(0.0);
            ui.ctx().data_mut(|data| {
                data.insert_persisted(
                    drag_id(task.id, mode),
                    DragSnapshot {
                        start: task.start,
                        end: task.end,
                        start_pointer_x: ptr_x,
                    },
                );
            });
        }
        if response.drag_stopped() {
            ui.ctx().data_mut(|data| {
                data.remove::<DragSnapshot>(drag_id(task.id, mode));
            });
        }
    }

    let dragged_mode = if left_response.dragged() {
        Some("left")
    } else if right_response.dragged() {
        Some("right")
    } else if bar_response.dragged() {
        Some("move")
    } else {
        None
    };

    if let Some(mode) = dragged_mode {
        let response = match mode {
            "left" => &left_response,
            "right" => &right_response,
            _ => bar_response,
        };
        ui.ctx().set_cursor_icon(if mode == "move" {
            egui::CursorIcon::Grab
        } else {
            egui::CursorIcon::ResizeHorizontal
        });

        let ptr_x = response.interact_pointer_pos().map(|p| p.x).unwrap_or(0.0);
        let snapshot = ui
            .ctx()
            .data_mut(|data| data.get_persisted::<DragSnapshot>(drag_id(task.id, mode)));
        if let Some(snapshot) = snapshot {
            let day_delta = drag_days(ptr_x - snapshot.start_pointer_x, viewport);
            let (start, end) = match mode {
                "left" => {
                    let new_start =
                        (snapshot.start + chrono::Duration::days(day_delta)).min(snapshot.end);
                    (new_start, snapshot.end)
                }
                "right" => {
                    let new_end =
                        (snapshot.end + chrono::Duration::days(day_delta)).max(snapshot.start);
                    (snapshot.start, new_end)
                }
                _ => (
                    snapshot.start + chrono::Duration::days(day_delta),
                    snapshot.end + chrono::Duration::days(day_delta),
                ),
            };
            if start != task.start || end != task.end {
                interaction.actions.push(TaskAction::Update {
                    id: task.id,
                    patch: TaskPatch::dates(start, end),
                });
            }
        }
    }

    // Handle affordances on the selected / hovered bar
    if left_response.hovered() || right_response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
    }
    if bar_response.hovered() || left_response.hovered() || right_response.hovered() {
        let painter = ui.painter();
        let handle_h = rect.height() * 0.55;
        let handle_y = rect.center().y - handle_h / 2.0;
        let lh = Rect::from_min_size(Pos2::new(rect.left() - 1.5, handle_y), Vec2::new(4.0, handle_h));
        let rh = Rect::from_min_size(Pos2::new(rect.right() - 2.5, handle_y), Vec2::new(4.0, handle_h));
        painter.rect_filled(lh, Rounding::same(2.0), theme::HANDLE_COLOR);
        painter.rect_filled(rh, Rounding::same(2.0), theme::HANDLE_COLOR);
    }
}

fn show_bar_tooltip(ui: &Ui, task: &Task) {
    egui::show_tooltip_at_pointer(
        ui.ctx(),
        ui.layer_id(),
        egui::Id::new(("task-tip", task.id)),
        |ui| {
            ui.strong(&task.name);
            ui.label(format!(
                "{} → {}",
                task.start.format("%Y-%m-%d"),
                task.end.format("%Y-%m-%d"),
            ));
            if let Some(progress) = task.progress {
                ui.label(format!("Progress: {}%", progress));
            }
            if let Some(manager) = &task.manager {
                ui.label(format!("Manager: {}", manager));
            }
            if let Some(location) = &task.location {
                ui.label(format!("Location: {}", location));
            }
        },
    );
}

fn drag_id(task_id: Uuid, mode: &str) -> Id {
    Id::new(("drag", task_id, mode))
}

fn drag_days(delta_x: f32, viewport: &TimelineViewport) -> i64 {
    (delta_x / viewport.pixels_per_day).round() as i64
}

/// Stacked header rows, one band per configured scale, finest at the bottom.
/// The finest scale also provides the vertical grid over the chart body.
fn draw_timeline_header(
    painter: &egui::Painter,
    origin: Pos2,
    viewport: &TimelineViewport,
    scales: &[Scale],
    width: f32,
    height: f32,
) {
    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(width, HEADER_HEIGHT)),
        0.0,
        theme::BG_HEADER,
    );
    painter.line_segment(
        [
            Pos2::new(origin.x, origin.y + HEADER_HEIGHT),
            Pos2::new(origin.x + width, origin.y + HEADER_HEIGHT),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    // Day cells get unreadable when zoomed far out; skip that band then.
    let drawable: Vec<&Scale> = scales
        .iter()
        .filter(|s| s.unit != ScaleUnit::Day || viewport.pixels_per_day >= 14.0)
        .collect();
    if drawable.is_empty() {
        return;
    }
    let band_h = HEADER_HEIGHT / drawable.len() as f32;

    for (row, scale) in drawable.iter().enumerate() {
        let band_top = origin.y + row as f32 * band_h;
        let is_finest = row == drawable.len() - 1;
        let mut date = align_to_unit(viewport.start, scale.unit);

        while date <= viewport.end {
            let x = origin.x + viewport.date_to_x(date);

            let tick_bottom = if is_finest {
                origin.y + height
            } else {
                band_top + band_h
            };
            painter.line_segment(
                [Pos2::new(x, band_top), Pos2::new(x, tick_bottom)],
                Stroke::new(0.5, theme::GRID_LINE),
            );

            let font = if row == 0 {
                theme::font_header()
            } else {
                theme::font_sub()
            };
            let color = if row == 0 {
                theme::TEXT_PRIMARY
            } else {
                theme::TEXT_SECONDARY
            };
            painter.text(
                Pos2::new(x + 4.0, band_top + band_h / 2.0),
                egui::Align2::LEFT_CENTER,
                date.format(scale.format).to_string(),
                font,
                color,
            );

            date = advance(date, scale.unit, scale.step);
        }

        if !is_finest {
            painter.line_segment(
                [
                    Pos2::new(origin.x, band_top + band_h),
                    Pos2::new(origin.x + width, band_top + band_h),
                ],
                Stroke::new(0.5, theme::GRID_LINE),
            );
        }
    }
}

/// Snap a date back to the beginning of its unit period.
fn align_to_unit(date: NaiveDate, unit: ScaleUnit) -> NaiveDate {
    match unit {
        ScaleUnit::Day => date,
        ScaleUnit::Week => {
            date - chrono::Duration::days(date.weekday().num_days_from_monday() as i64)
        }
        ScaleUnit::Month => NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date),
    }
}

fn advance(date: NaiveDate, unit: ScaleUnit, step: u32) -> NaiveDate {
    match unit {
        ScaleUnit::Day => date + chrono::Duration::days(step as i64),
        ScaleUnit::Week => date + chrono::Duration::days(7 * step as i64),
        ScaleUnit::Month => {
            let months = date.month0() + step;
            let (year, month0) = (date.year() + (months / 12) as i32, months % 12);
            NaiveDate::from_ymd_opt(year, month0 + 1, 1)
                .unwrap_or(date + chrono::Duration::days(30 * step as i64))
        }
    }
}

fn draw_today_line(
    painter: &egui::Painter,
    origin: Pos2,
    viewport: &TimelineViewport,
    height: f32,
) {
    let today = chrono::Local::now().date_naive();
    let x = origin.x + viewport.date_to_x(today);

    painter.line_segment(
        [
            Pos2::new(x, origin.y + HEADER_HEIGHT),
            Pos2::new(x, origin.y + height),
        ],
        Stroke::new(1.5, theme::TODAY_LINE),
    );

    let badge_w = 42.0;
    let badge_rect = Rect::from_min_size(
        Pos2::new(x - badge_w / 2.0, origin.y + HEADER_HEIGHT - 1.0),
        Vec2::new(badge_w, 14.0),
    );
    painter.rect_filled(badge_rect, Rounding::same(3.0), theme::TODAY_LINE);
    painter.text(
        badge_rect.center(),
        egui::Align2::CENTER_CENTER,
        "Today",
        theme::font_small(),
        Color32::WHITE,
    );
}

fn draw_task_bar(painter: &egui::Painter, bar_rect: Rect, task: &Task, is_selected: bool) {
    let rounding = Rounding::same(theme::BAR_ROUNDING);
    let color = theme::bar_color(task);

    let shadow_rect = bar_rect.translate(Vec2::new(1.0, 2.0));
    painter.rect_filled(shadow_rect, rounding, Color32::from_black_alpha(35));
    painter.rect_filled(bar_rect, rounding, color);

    // Lighter top highlight
    let highlight_rect = Rect::from_min_size(
        bar_rect.min,
        Vec2::new(bar_rect.width(), (bar_rect.height() * 0.45).max(4.0)),
    );
    painter.rect_filled(
        highlight_rect,
        Rounding {
            nw: theme::BAR_ROUNDING,
            ne: theme::BAR_ROUNDING,
            sw: 0.0,
            se: 0.0,
        },
        Color32::from_white_alpha(25),
    );

    // Progress fill (darkened overlay)
    let progress = task.progress.unwrap_or(0);
    if progress > 0 {
        let fraction = (progress as f32 / 100.0).clamp(0.0, 1.0);
        let progress_width = bar_rect.width() * fraction;
        painter.rect_filled(
            Rect::from_min_size(bar_rect.min, Vec2::new(progress_width, bar_rect.height())),
            rounding,
            theme::PROGRESS_OVERLAY,
        );
        if progress < 98 {
            let tick_x = bar_rect.left() + progress_width;
            painter.line_segment(
                [
                    Pos2::new(tick_x, bar_rect.top() + 2.0),
                    Pos2::new(tick_x, bar_rect.bottom() - 2.0),
                ],
                Stroke::new(1.0, Color32::from_white_alpha(60)),
            );
        }
    }

    if is_selected {
        painter.rect_stroke(
            bar_rect.expand(1.5),
            Rounding::same(theme::BAR_ROUNDING + 1.5),
            Stroke::new(2.0, theme::BORDER_ACCENT),
        );
    }

    if bar_rect.width() > 30.0 {
        let galley =
            painter.layout_no_wrap(task.name.clone(), theme::font_bar(), theme::TEXT_ON_BAR);
        let clipped = painter.with_clip_rect(bar_rect);
        let text_y = bar_rect.top() + (bar_rect.height() - galley.size().y) / 2.0;
        clipped.galley(
            Pos2::new(bar_rect.left() + 6.0, text_y),
            galley,
            Color32::TRANSPARENT,
        );
    }
}

/// Summary rows render as a slim bracket with downward end caps, the usual
/// project/phase shape.
fn draw_summary_bar(painter: &egui::Painter, bar_rect: Rect, task: &Task, is_selected: bool) {
    let color = theme::bar_color(task);
    let slim = Rect::from_min_size(
        bar_rect.min,
        Vec2::new(bar_rect.width(), bar_rect.height() * 0.45),
    );
    painter.rect_filled(slim, Rounding::same(2.0), color);

    let cap_w = 5.0_f32.min(bar_rect.width() / 2.0);
    let cap_h = bar_rect.height() * 0.8;
    for x in [bar_rect.left(), bar_rect.right() - cap_w] {
        painter.add(egui::Shape::convex_polygon(
            vec![
                Pos2::new(x, slim.top()),
                Pos2::new(x + cap_w, slim.top()),
                Pos2::new(x + cap_w / 2.0, slim.top() + cap_h),
            ],
            color,
            Stroke::NONE,
        ));
    }

    if is_selected {
        painter.rect_stroke(
            bar_rect.expand(1.5),
            Rounding::same(3.0),
            Stroke::new(2.0, theme::BORDER_ACCENT),
        );
    }

    // Name to the right of the bracket
    painter.text(
        Pos2::new(bar_rect.right() + 8.0, bar_rect.center().y),
        egui::Align2::LEFT_CENTER,
        &task.name,
        theme::font_bar(),
        theme::TEXT_SECONDARY,
    );
}

/// Elbow arrow from the source bar's end to the target bar's start.
fn draw_link_arrow(painter: &egui::Painter, from: Rect, to: Rect) {
    let stroke = Stroke::new(1.2, theme::LINK_LINE);
    let start = Pos2::new(from.right(), from.center().y);
    let end = Pos2::new(to.left(), to.center().y);
    let stub = 8.0;

    let elbow_x = (start.x + stub).max(end.x - stub);
    let points = [
        start,
        Pos2::new(elbow_x, start.y),
        Pos2::new(elbow_x, end.y),
        end,
    ];
    for pair in points.windows(2) {
        painter.line_segment([pair[0], pair[1]], stroke);
    }

    // Arrowhead
    let size = 4.0;
    painter.add(egui::Shape::convex_polygon(
        vec![
            end,
            Pos2::new(end.x - size, end.y - size),
            Pos2::new(end.x - size, end.y + size),
        ],
        theme::LINK_LINE,
        Stroke::NONE,
    ));
}
