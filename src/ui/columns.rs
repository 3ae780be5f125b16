use egui::Align;

use crate::model::Task;

/// One column of the task table: field id, header text, width, alignment
/// and an optional display-value formatter overriding the raw field value.
pub struct Column {
    pub id: &'static str,
    pub header: &'static str,
    pub width: f32,
    pub align: Align,
    pub template: Option<fn(&Task) -> String>,
}

/// Raw value for a field id, before any template runs.
fn field_value(task: &Task, id: &str) -> String {
    match id {
        "name" => task.name.clone(),
        "manager" => task.manager.clone().unwrap_or_default(),
        "location" => task.location.clone().unwrap_or_default(),
        "start" => task.start.format("%Y-%m-%d").to_string(),
        "end" => task.end.format("%Y-%m-%d").to_string(),
        "progress" => task.progress.map(|p| p.to_string()).unwrap_or_default(),
        _ => String::new(),
    }
}

impl Column {
    pub fn display(&self, task: &Task) -> String {
        match self.template {
            Some(template) => template(task),
            None => field_value(task, self.id),
        }
    }
}

/// The default table layout: name, manager, location, short dates, % done.
pub fn default_columns() -> Vec<Column> {
    vec![
        Column {
            id: "name",
            header: "Task / Phase / Project",
            width: 240.0,
            align: Align::LEFT,
            template: None,
        },
        Column {
            id: "manager",
            header: "Manager",
            width: 80.0,
            align: Align::LEFT,
            template: None,
        },
        Column {
            id: "location",
            header: "Location",
            width: 110.0,
            align: Align::LEFT,
            template: None,
        },
        Column {
            id: "start",
            header: "Start",
            width: 60.0,
            align: Align::Center,
            template: Some(|t| t.start.format("%b %-d").to_string()),
        },
        Column {
            id: "end",
            header: "End",
            width: 60.0,
            align: Align::Center,
            template: Some(|t| t.end.format("%b %-d").to_string()),
        },
        Column {
            id: "progress",
            header: "% Done",
            width: 50.0,
            align: Align::Center,
            template: Some(|t| format!("{}%", t.progress.unwrap_or(0))),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn templates_override_raw_values() {
        let start = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        let task = Task::new("Roof Plates", start, end);

        let columns = default_columns();
        let start_col = columns.iter().find(|c| c.id == "start").unwrap();
        assert_eq!(start_col.display(&task), "Mar 5");

        let progress_col = columns.iter().find(|c| c.id == "progress").unwrap();
        assert_eq!(progress_col.display(&task), "0%");
    }

    #[test]
    fn missing_attributes_render_empty() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let task = Task::new("Site Setup", start, start + chrono::Duration::days(2));
        let columns = default_columns();
        let manager_col = columns.iter().find(|c| c.id == "manager").unwrap();
        assert_eq!(manager_col.display(&task), "");
    }
}
