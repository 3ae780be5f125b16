use egui::{Color32, Context, RichText, Window};

use crate::model::Task;
use crate::ui::theme;

/// What the modal decided this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorOutcome {
    Open,
    Save,
    Cancel,
}

/// Render the centered edit dialog over the controller's edit buffer.
/// All field edits land in the buffer only; the caller commits on Save and
/// discards on Cancel / Escape.
pub fn show_task_editor(
    task: &mut Task,
    managers: &[String],
    locations: &[String],
    ctx: &Context,
) -> EditorOutcome {
    let mut outcome = EditorOutcome::Open;

    Window::new(RichText::new("Edit Task").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([300.0, 0.0])
        .show(ctx, |ui| {
            ui.visuals_mut().extreme_bg_color = theme::BG_FIELD;
            ui.spacing_mut().item_spacing.y = 6.0;
            ui.add_space(4.0);

            egui::Grid::new("edit_task_grid")
                .num_columns(2)
                .striped(false)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Name").color(theme::TEXT_SECONDARY));
                    ui.add_sized(
                        [200.0, 24.0],
                        egui::TextEdit::singleline(&mut task.name)
                            .text_color(theme::TEXT_PRIMARY),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Start").color(theme::TEXT_SECONDARY));
                    ui.add(
                        egui_extras::DatePickerButton::new(&mut task.start)
                            .id_salt("edit_dp_start"),
                    );
                    ui.end_row();

                    ui.label(RichText::new("End").color(theme::TEXT_SECONDARY));
                    ui.add(
                        egui_extras::DatePickerButton::new(&mut task.end).id_salt("edit_dp_end"),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Progress").color(theme::TEXT_SECONDARY));
                    let mut progress = task.progress.unwrap_or(0);
                    let slider = egui::Slider::new(&mut progress, 0..=100)
                        .custom_formatter(|v, _| format!("{:.0}%", v))
                        // Unparseable input means 0, not "keep the old value".
                        .custom_parser(|s| {
                            let s = s.trim().trim_end_matches('%');
                            Some(s.parse::<f64>().unwrap_or(0.0))
                        });
                    if ui.add_sized([200.0, 20.0], slider).changed() {
                        task.progress = Some(progress);
                    }
                    ui.end_row();

                    ui.label(RichText::new("Manager").color(theme::TEXT_SECONDARY));
                    option_combo(ui, "edit_manager", managers, &mut task.manager);
                    ui.end_row();

                    ui.label(RichText::new("Location").color(theme::TEXT_SECONDARY));
                    option_combo(ui, "edit_location", locations, &mut task.location);
                    ui.end_row();
                });

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                let save_btn = egui::Button::new(RichText::new("Save").color(Color32::WHITE))
                    .fill(theme::ACCENT)
                    .rounding(egui::Rounding::same(4.0));
                if ui.add_sized([80.0, 28.0], save_btn).clicked() {
                    outcome = EditorOutcome::Save;
                }
                if ui
                    .add_sized([80.0, 28.0], egui::Button::new("Cancel"))
                    .clicked()
                {
                    outcome = EditorOutcome::Cancel;
                }
            });
            ui.add_space(2.0);
        });

    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        outcome = EditorOutcome::Cancel;
    }

    outcome
}

/// Dropdown over the derived options plus an unset entry.
fn option_combo(
    ui: &mut egui::Ui,
    id: &str,
    options: &[String],
    selection: &mut Option<String>,
) {
    let selected_label = selection.as_deref().unwrap_or("—").to_string();
    egui::ComboBox::from_id_salt(id.to_string())
        .selected_text(RichText::new(selected_label).size(11.0))
        .width(200.0)
        .show_ui(ui, |ui| {
            if ui.selectable_label(selection.is_none(), "—").clicked() {
                *selection = None;
            }
            for option in options {
                if ui
                    .selectable_label(selection.as_deref() == Some(option), option)
                    .clicked()
                {
                    *selection = Some(option.clone());
                }
            }
        });
}
