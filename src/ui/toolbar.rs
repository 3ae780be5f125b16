use egui::{RichText, Ui};

use crate::app::GanttApp;
use crate::ui::theme;

/// Render the top bar: title, manager/location filters, quick-add.
pub fn show_toolbar(app: &mut GanttApp, ui: &mut Ui) {
    ui.add_space(4.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Tank Fabrication & Installation Projects")
                .strong()
                .size(15.0)
                .color(theme::TEXT_PRIMARY),
        );

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let zoom_pct = app.viewport.pixels_per_day / 18.0 * 100.0;
            ui.label(
                RichText::new(format!("Zoom {:.0}%", zoom_pct))
                    .size(10.5)
                    .color(theme::TEXT_DIM),
            );
        });
    });
    ui.add_space(4.0);

    let managers = app.state.manager_options();
    let locations = app.state.location_options();

    ui.horizontal(|ui| {
        filter_combo(ui, "Manager", "manager_filter", &managers, &mut app.filter.manager);
        ui.add_space(8.0);
        filter_combo(ui, "Location", "location_filter", &locations, &mut app.filter.location);

        ui.add_space(16.0);

        let add_btn = egui::Button::new(
            RichText::new(format!("{}  Add Task", egui_phosphor::regular::PLUS))
                .color(egui::Color32::WHITE)
                .size(12.0),
        )
        .fill(theme::ACCENT)
        .rounding(egui::Rounding::same(5.0));
        if ui.add_sized([100.0, 24.0], add_btn).clicked() {
            app.quick_add_task();
        }
    });
    ui.add_space(4.0);
}

/// Dropdown over "All" plus the derived options. An option that no longer
/// exists in the dataset falls back to All.
fn filter_combo(
    ui: &mut Ui,
    label: &str,
    id: &str,
    options: &[String],
    selection: &mut Option<String>,
) {
    if let Some(current) = selection.as_deref() {
        if !options.iter().any(|o| o == current) {
            *selection = None;
        }
    }

    ui.label(RichText::new(label).size(11.0).color(theme::TEXT_SECONDARY));
    let selected_label = selection.as_deref().unwrap_or("All").to_string();
    egui::ComboBox::from_id_salt(id.to_string())
        .selected_text(RichText::new(selected_label).size(11.0))
        .width(120.0)
        .show_ui(ui, |ui| {
            if ui.selectable_label(selection.is_none(), "All").clicked() {
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
