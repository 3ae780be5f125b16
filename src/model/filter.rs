use super::task::{Link, Task};

/// Manager / location filter axes. `None` means "All" on that axis.
///
/// Filtering is strictly per-task-attribute: a leaf task can survive while
/// its phase and project are filtered out, so no ancestor inclusion happens.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilter {
    pub manager: Option<String>,
    pub location: Option<String>,
}

impl TaskFilter {
    pub fn is_all(&self) -> bool {
        self.manager.is_none() && self.location.is_none()
    }

    pub fn matches(&self, task: &Task) -> bool {
        let by_manager = self
            .manager
            .as_deref()
            .map_or(true, |m| task.manager.as_deref() == Some(m));
        let by_location = self
            .location
            .as_deref()
            .map_or(true, |l| task.location.as_deref() == Some(l));
        by_manager && by_location
    }

    pub fn tasks<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|t| self.matches(t)).collect()
    }

    /// A link survives only when both its endpoints survived task filtering;
    /// the link's own attributes are never consulted.
    pub fn links<'a>(&self, links: &'a [Link], visible: &[&Task]) -> Vec<&'a Link> {
        links
            .iter()
            .filter(|l| {
                visible.iter().any(|t| t.id == l.source) && visible.iter().any(|t| t.id == l.target)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::Link;
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
    }

    fn task(name: &str, manager: Option<&str>, location: Option<&str>) -> Task {
        let mut t = Task::new(name, date(1), date(5));
        t.manager = manager.map(str::to_string);
        t.location = location.map(str::to_string);
        t
    }

    fn by_manager(m: &str) -> TaskFilter {
        TaskFilter {
            manager: Some(m.to_string()),
            location: None,
        }
    }

    #[test]
    fn all_all_is_identity() {
        let tasks = vec![
            task("a", Some("Jeremy"), Some("Mesa, AZ")),
            task("b", None, None),
        ];
        let filter = TaskFilter::default();
        assert!(filter.is_all());
        let visible = filter.tasks(&tasks);
        assert_eq!(visible.len(), tasks.len());
    }

    #[test]
    fn filtering_is_idempotent() {
        let tasks = vec![
            task("a", Some("Jeremy"), Some("Mesa, AZ")),
            task("b", Some("Jessica"), Some("Mesa, AZ")),
            task("c", Some("Jeremy"), Some("Reno, NV")),
        ];
        let filter = by_manager("Jeremy");

        let once: Vec<Task> = filter.tasks(&tasks).into_iter().cloned().collect();
        let twice: Vec<Task> = filter.tasks(&once).into_iter().cloned().collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn both_axes_must_match() {
        let tasks = vec![
            task("a", Some("Jeremy"), Some("Mesa, AZ")),
            task("b", Some("Jeremy"), Some("Reno, NV")),
        ];
        let filter = TaskFilter {
            manager: Some("Jeremy".to_string()),
            location: Some("Reno, NV".to_string()),
        };
        let visible = filter.tasks(&tasks);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "b");
    }

    #[test]
    fn no_ancestor_inclusion() {
        // Project and phase belong to Jessica; only the leaf is Jeremy's.
        let mut project = task("P", Some("Jessica"), None);
        project.kind = crate::model::task::TaskKind::Summary;
        let mut phase = task("H", Some("Jessica"), None);
        phase.kind = crate::model::task::TaskKind::Summary;
        phase.parent = Some(project.id);
        let mut t1 = task("T1", Some("Jeremy"), None);
        t1.parent = Some(phase.id);
        let mut t2 = task("T2", Some("Jessica"), None);
        t2.parent = Some(phase.id);

        let tasks = vec![project, phase, t1, t2];
        let visible = by_manager("Jeremy").tasks(&tasks);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "T1");
    }

    #[test]
    fn links_need_both_endpoints_visible() {
        let a = task("a", Some("Jeremy"), None);
        let b = task("b", Some("Jeremy"), None);
        let c = task("c", Some("Jessica"), None);
        let links = vec![Link::end_to_start(a.id, b.id), Link::end_to_start(b.id, c.id)];
        let tasks = vec![a, b, c];

        let filter = by_manager("Jeremy");
        let visible = filter.tasks(&tasks);
        let kept = filter.links(&links, &visible);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, links[0].id);
    }
}
