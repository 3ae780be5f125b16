use uuid::Uuid;

use crate::model::timeline::Scale;
use crate::model::{Dataset, Link, ProjectState, Task, TaskAction, TaskFilter, TimelineViewport};
use crate::ui;
use crate::ui::columns::Column;

/// Main application state: the controller plus everything the widgets need
/// on every frame (filter, viewport, column/scale configuration, selection).
pub struct GanttApp {
    pub state: ProjectState,
    pub filter: TaskFilter,
    pub viewport: TimelineViewport,
    pub columns: Vec<Column>,
    pub scales: Vec<Scale>,
    pub selected_task: Option<Uuid>,
    pub status_message: String,
}

impl GanttApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        // The dataset is generated exactly once here; every later change
        // goes through ProjectState operations.
        let state = ProjectState::new(Dataset::random());

        let today = chrono::Local::now().date_naive();
        let start = state
            .tasks()
            .iter()
            .map(|t| t.start)
            .min()
            .unwrap_or(today)
            - chrono::Duration::days(7);
        let end = state.tasks().iter().map(|t| t.end).max().unwrap_or(today)
            + chrono::Duration::days(30);

        Self {
            state,
            filter: TaskFilter::default(),
            viewport: TimelineViewport::new(start, end),
            columns: ui::columns::default_columns(),
            scales: crate::model::timeline::default_scales(),
            selected_task: None,
            status_message: "Ready".to_string(),
        }
    }

    /// Toolbar quick-add: bare three-day task starting today.
    pub fn quick_add_task(&mut self) {
        let today = chrono::Local::now().date_naive();
        let id = self.state.quick_add(today);
        self.selected_task = Some(id);
        self.status_message = "Task added".to_string();
    }

    fn handle_action(&mut self, action: TaskAction) {
        match action {
            TaskAction::Update { id, patch } => {
                self.state.apply(TaskAction::Update { id, patch });
                if let Some(task) = self.state.tasks().iter().find(|t| t.id == id) {
                    self.status_message = format!(
                        "Updated '{}' ({} → {})",
                        task.name,
                        task.start.format("%Y-%m-%d"),
                        task.end.format("%Y-%m-%d")
                    );
                }
            }
            TaskAction::Add(task) => {
                self.status_message = format!("Added '{}'", task.name);
                self.state.apply(TaskAction::Add(task));
            }
            TaskAction::Remove(id) => {
                if self.selected_task == Some(id) {
                    self.selected_task = None;
                }
                self.state.apply(TaskAction::Remove(id));
                self.status_message = "Task deleted".to_string();
            }
            action @ TaskAction::OpenEditor(_) => {
                self.state.apply(action);
            }
        }
    }
}

impl eframe::App for GanttApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        // Filtered projection handed to the widgets this frame. Links only
        // survive when both endpoints do.
        let visible_refs = self.filter.tasks(self.state.tasks());
        let visible_links: Vec<Link> = self
            .filter
            .links(self.state.links(), &visible_refs)
            .into_iter()
            .cloned()
            .collect();
        let visible: Vec<Task> = visible_refs.into_iter().cloned().collect();
        let depths: Vec<usize> = visible.iter().map(|t| self.state.depth(t)).collect();

        let mut pending: Vec<TaskAction> = Vec::new();

        // Top panel: title, filters, quick-add
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(24.0)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .size(10.5)
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!(
                                "Tasks: {} of {}",
                                visible.len(),
                                self.state.tasks().len()
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        // Left panel: task table over the filtered rows
        egui::SidePanel::left("task_panel")
            .default_width(440.0)
            .min_width(280.0)
            .resizable(true)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_PANEL)
                    .inner_margin(egui::Margin::same(8.0))
                    .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
            )
            .show(ctx, |ui| {
                let output = ui::task_table::show_task_table(
                    &visible,
                    &depths,
                    &self.columns,
                    self.selected_task,
                    ui,
                );
                if let Some(id) = output.select {
                    self.selected_task = Some(id);
                }
                if let Some(action) = output.action {
                    pending.push(action);
                }
            });

        // Central panel: Gantt chart
        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        egui::CentralPanel::default()
            .frame(chart_frame)
            .show(ctx, |ui| {
                let interaction = ui::gantt_chart::show_gantt_chart(
                    &visible,
                    &visible_links,
                    &mut self.viewport,
                    &self.scales,
                    &mut self.selected_task,
                    ui,
                );
                pending.extend(interaction.actions);
            });

        for action in pending {
            self.handle_action(action);
        }

        // Edit modal over the controller's edit buffer
        let editor_outcome = if self.state.editing().is_some() {
            let managers = self.state.manager_options();
            let locations = self.state.location_options();
            self.state
                .editing_mut()
                .map(|buffer| ui::task_editor::show_task_editor(buffer, &managers, &locations, ctx))
        } else {
            None
        };
        match editor_outcome {
            Some(ui::task_editor::EditorOutcome::Save) => {
                self.state.commit_edit();
                self.status_message = "Task updated".to_string();
            }
            Some(ui::task_editor::EditorOutcome::Cancel) => {
                self.state.cancel_edit();
                self.status_message = "Edit discarded".to_string();
            }
            _ => {}
        }
    }
}
