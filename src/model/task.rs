use chrono::NaiveDate;
use uuid::Uuid;

/// Whether a row is a leaf task or a grouping summary (project / phase).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Task,
    Summary,
}

/// Temporal relation carried by a dependency link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    EndToEnd,
    StartToStart,
    StartToEnd,
    EndToStart,
}

/// A single schedulable row: a project or phase (summary) or a leaf task.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: Uuid,
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub kind: TaskKind,
    /// Parent row: phases point at their project, tasks at their phase.
    pub parent: Option<Uuid>,
    /// Percent complete, 0–100.
    pub progress: Option<u8>,
    pub manager: Option<String>,
    pub location: Option<String>,
}

impl Task {
    /// Create a new leaf task with a fresh id.
    pub fn new(name: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            start,
            end,
            kind: TaskKind::Task,
            parent: None,
            progress: None,
            manager: None,
            location: None,
        }
    }

    /// Create a new summary row (project or phase).
    pub fn summary(name: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            kind: TaskKind::Summary,
            ..Self::new(name, start, end)
        }
    }

    pub fn is_summary(&self) -> bool {
        self.kind == TaskKind::Summary
    }

    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

/// A directed dependency between two tasks.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: Uuid,
    pub source: Uuid,
    pub target: Uuid,
    pub kind: LinkKind,
}

impl Link {
    /// The only kind the generator emits: source must finish before target starts.
    pub fn end_to_start(source: Uuid, target: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            source,
            target,
            kind: LinkKind::EndToStart,
        }
    }
}

/// A partial task used for shallow-merge updates coming back from the chart.
/// Fields left `None` keep the existing value.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub name: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub kind: Option<TaskKind>,
    pub parent: Option<Option<Uuid>>,
    pub progress: Option<u8>,
    pub manager: Option<String>,
    pub location: Option<String>,
}

impl TaskPatch {
    /// Patch carrying only new start/end dates (bar move / resize).
    pub fn dates(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            ..Self::default()
        }
    }

    pub fn apply_to(&self, task: &mut Task) {
        if let Some(name) = &self.name {
            task.name = name.clone();
        }
        if let Some(start) = self.start {
            task.start = start;
        }
        if let Some(end) = self.end {
            task.end = end;
        }
        if let Some(kind) = self.kind {
            task.kind = kind;
        }
        if let Some(parent) = self.parent {
            task.parent = parent;
        }
        if let Some(progress) = self.progress {
            task.progress = Some(progress);
        }
        if let Some(manager) = &self.manager {
            task.manager = Some(manager.clone());
        }
        if let Some(location) = &self.location {
            task.location = Some(location.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn patch_merges_only_present_fields() {
        let mut task = Task::new("Shell Seam Welds", date(2026, 3, 1), date(2026, 3, 5));
        task.manager = Some("Jeremy".to_string());

        let patch = TaskPatch::dates(date(2026, 3, 2), date(2026, 3, 6));
        patch.apply_to(&mut task);

        assert_eq!(task.start, date(2026, 3, 2));
        assert_eq!(task.end, date(2026, 3, 6));
        assert_eq!(task.name, "Shell Seam Welds");
        assert_eq!(task.manager.as_deref(), Some("Jeremy"));
    }

    #[test]
    fn patch_can_clear_parent() {
        let mut task = Task::new("Load-Out", date(2026, 1, 1), date(2026, 1, 3));
        task.parent = Some(Uuid::new_v4());

        let patch = TaskPatch {
            parent: Some(None),
            ..TaskPatch::default()
        };
        patch.apply_to(&mut task);

        assert_eq!(task.parent, None);
    }
}
