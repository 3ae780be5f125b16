use egui::{Align, Color32, RichText, Ui};
use uuid::Uuid;

use crate::model::{Task, TaskAction};
use crate::ui::columns::Column;
use crate::ui::theme;

/// What the table asks the app to do this frame.
pub struct TableOutput {
    pub select: Option<Uuid>,
    pub action: Option<TaskAction>,
}

/// Render the left-side task table over the filtered rows.
///
/// `depths` carries each row's hierarchy depth for indentation, computed by
/// the controller so the table stays a dumb projection.
pub fn show_task_table(
    tasks: &[Task],
    depths: &[usize],
    columns: &[Column],
    selected_task: Option<Uuid>,
    ui: &mut Ui,
) -> TableOutput {
    let mut output = TableOutput {
        select: None,
        action: None,
    };

    ui.add_space(2.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Projects & Tasks")
                .strong()
                .size(15.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.add_space(4.0);
        ui.label(
            RichText::new(format!("({})", tasks.len()))
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
    });
    ui.add_space(4.0);
    ui.separator();
    ui.add_space(2.0);

    // Column headers
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 4.0;
        ui.add_space(12.0);
        for column in columns {
            ui.allocate_ui(egui::vec2(column.width * 0.55, 16.0), |ui| {
                ui.label(
                    RichText::new(column.header.to_uppercase())
                        .size(9.0)
                        .color(theme::TEXT_DIM)
                        .strong(),
                );
            });
        }
    });
    ui.add_space(2.0);

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for (i, task) in tasks.iter().enumerate() {
                let is_selected = selected_task == Some(task.id);
                let row_bg = if is_selected {
                    theme::BG_SELECTED
                } else if i % 2 == 0 {
                    theme::BG_PANEL
                } else {
                    theme::BG_DARK
                };

                let frame = egui::Frame {
                    fill: row_bg,
                    rounding: egui::Rounding::same(4.0),
                    inner_margin: egui::Margin::symmetric(6.0, 3.0),
                    outer_margin: egui::Margin::ZERO,
                    stroke: egui::Stroke::NONE,
                    shadow: egui::epaint::Shadow::NONE,
                };

                let frame_resp = frame.show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.spacing_mut().item_spacing.x = 4.0;

                        // Color dot
                        let (dot_rect, _) =
                            ui.allocate_exact_size(egui::vec2(6.0, 6.0), egui::Sense::hover());
                        ui.painter()
                            .circle_filled(dot_rect.center(), 3.0, theme::bar_color(task));

                        for column in columns {
                            let mut value = column.display(task);
                            if column.id == "name" {
                                // Indent child rows under their summary.
                                let depth = depths.get(i).copied().unwrap_or(0);
                                value = format!("{}{}", "    ".repeat(depth), value);
                            }
                            let width = column.width * 0.55;

                            let mut text = RichText::new(value).size(11.0).color(
                                if is_selected {
                                    Color32::WHITE
                                } else if task.is_summary() {
                                    theme::TEXT_PRIMARY
                                } else {
                                    theme::TEXT_SECONDARY
                                },
                            );
                            if task.is_summary() && column.id == "name" {
                                text = text.strong();
                            }

                            let layout = match column.align {
                                Align::Center => {
                                    egui::Layout::centered_and_justified(egui::Direction::LeftToRight)
                                }
                                _ => egui::Layout::left_to_right(egui::Align::Center),
                            };
                            ui.allocate_ui_with_layout(
                                egui::vec2(width, 16.0),
                                layout,
                                |ui| {
                                    ui.add(egui::Label::new(text).truncate());
                                },
                            );
                        }

                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui| {
                                let del_btn = ui.add(
                                    egui::Button::new(
                                        RichText::new(egui_phosphor::regular::X)
                                            .size(10.0)
                                            .color(theme::TEXT_DIM),
                                    )
                                    .frame(false),
                                );
                                if del_btn.on_hover_text("Delete task").clicked() {
                                    output.action = Some(TaskAction::Remove(task.id));
                                }
                            },
                        );
                    });
                });

                // Whole row is clickable; double-click opens the editor.
                let row_click = ui.interact(
                    frame_resp.response.rect,
                    egui::Id::new(("task-row", task.id)),
                    egui::Sense::click(),
                );
                if row_click.double_clicked() {
                    output.action = Some(TaskAction::OpenEditor(task.id));
                } else if row_click.clicked() {
                    output.select = Some(task.id);
                }

                ui.add_space(1.0);
            }
        });

    output
}
