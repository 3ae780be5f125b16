use chrono::{Duration, NaiveDate};
use uuid::Uuid;

use super::mock::Dataset;
use super::task::{Link, Task, TaskPatch};

/// Mutation intents coming back from the chart and table widgets.
/// One case per inbound action kind, so each case's payload is statically
/// enforced.
#[derive(Debug, Clone)]
pub enum TaskAction {
    /// Shallow-merge the patch into the task with this id.
    Update { id: Uuid, patch: TaskPatch },
    /// Append the task verbatim.
    Add(Task),
    /// Delete the task and every link touching it.
    Remove(Uuid),
    /// Load a copy of the task into the edit buffer (double-click).
    OpenEditor(Uuid),
}

/// Single owner of the task/link collections and the modal edit buffer.
///
/// All mutation goes through the named operations below; lookups for ids
/// that are no longer present silently no-op.
pub struct ProjectState {
    tasks: Vec<Task>,
    links: Vec<Link>,
    editing: Option<Task>,
}

impl ProjectState {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            tasks: dataset.tasks,
            links: dataset.links,
            editing: None,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn apply(&mut self, action: TaskAction) {
        match action {
            TaskAction::Update { id, patch } => {
                if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
                    patch.apply_to(task);
                }
            }
            TaskAction::Add(task) => self.tasks.push(task),
            TaskAction::Remove(id) => self.remove(id),
            TaskAction::OpenEditor(id) => self.begin_edit(id),
        }
    }

    /// Delete a task and cascade to every link whose source or target is the
    /// deleted id. Children keep their dangling parent reference; the
    /// original behaves the same way and the chart tolerates orphans.
    fn remove(&mut self, id: Uuid) {
        self.tasks.retain(|t| t.id != id);
        self.links.retain(|l| l.source != id && l.target != id);
    }

    /// Append a bare task starting today, three days long.
    pub fn quick_add(&mut self, today: NaiveDate) -> Uuid {
        let mut task = Task::new("New Task", today, today + Duration::days(3));
        task.progress = Some(0);
        let id = task.id;
        self.tasks.push(task);
        id
    }

    // --- Edit buffer ---

    pub fn begin_edit(&mut self, id: Uuid) {
        if let Some(task) = self.tasks.iter().find(|t| t.id == id) {
            self.editing = Some(task.clone());
        }
    }

    pub fn editing(&self) -> Option<&Task> {
        self.editing.as_ref()
    }

    pub fn editing_mut(&mut self) -> Option<&mut Task> {
        self.editing.as_mut()
    }

    /// Replace the task matching the buffer's id with the buffer contents.
    pub fn commit_edit(&mut self) {
        if let Some(edited) = self.editing.take() {
            if let Some(task) = self.tasks.iter_mut().find(|t| t.id == edited.id) {
                *task = edited;
            }
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    // --- Filter dropdown options ---

    /// Distinct non-empty manager values in first-seen order.
    pub fn manager_options(&self) -> Vec<String> {
        distinct(self.tasks.iter().filter_map(|t| t.manager.as_deref()))
    }

    /// Distinct non-empty location values in first-seen order.
    pub fn location_options(&self) -> Vec<String> {
        distinct(self.tasks.iter().filter_map(|t| t.location.as_deref()))
    }

    /// Hierarchy depth of a task (project 0, phase 1, leaf 2), for indenting
    /// table rows. Orphans count from wherever their chain breaks off.
    pub fn depth(&self, task: &Task) -> usize {
        let mut depth = 0;
        let mut current = task.parent;
        while let Some(parent_id) = current {
            match self.tasks.iter().find(|t| t.id == parent_id) {
                Some(parent) => {
                    depth += 1;
                    current = parent.parent;
                }
                None => break,
            }
        }
        depth
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for value in values {
        if !value.is_empty() && !seen.iter().any(|s| s == value) {
            seen.push(value.to_string());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::TaskKind;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
    }

    fn small_state() -> ProjectState {
        let mut project = Task::summary("P", date(1), date(20));
        project.manager = Some("Jeremy".to_string());
        let mut phase = Task::summary("H", date(1), date(10));
        phase.parent = Some(project.id);
        phase.manager = Some("Jessica".to_string());
        let mut t1 = Task::new("T1", date(1), date(4));
        t1.parent = Some(phase.id);
        t1.manager = Some("Jeremy".to_string());
        let mut t2 = Task::new("T2", date(5), date(9));
        t2.parent = Some(phase.id);
        t2.manager = Some("Jessica".to_string());

        let links = vec![Link::end_to_start(t1.id, t2.id)];
        ProjectState::new(Dataset {
            tasks: vec![project, phase, t1, t2],
            links,
        })
    }

    fn id_of(state: &ProjectState, name: &str) -> Uuid {
        state.tasks().iter().find(|t| t.name == name).unwrap().id
    }

    #[test]
    fn update_merges_into_matching_task() {
        let mut state = small_state();
        let id = id_of(&state, "T1");
        state.apply(TaskAction::Update {
            id,
            patch: TaskPatch {
                progress: Some(75),
                ..TaskPatch::default()
            },
        });
        let t1 = state.tasks().iter().find(|t| t.id == id).unwrap();
        assert_eq!(t1.progress, Some(75));
        assert_eq!(t1.name, "T1");
    }

    #[test]
    fn update_with_unknown_id_is_a_no_op() {
        let mut state = small_state();
        let before: Vec<Task> = state.tasks().to_vec();
        state.apply(TaskAction::Update {
            id: Uuid::new_v4(),
            patch: TaskPatch::dates(date(2), date(3)),
        });
        assert_eq!(state.tasks(), &before[..]);
    }

    #[test]
    fn add_appends_the_task_verbatim() {
        let mut state = small_state();
        let before = state.tasks().len();
        let mut task = Task::new("Punchlist Walk", date(10), date(12));
        task.manager = Some("Toni".to_string());
        let expected = task.clone();

        state.apply(TaskAction::Add(task));
        assert_eq!(state.tasks().len(), before + 1);
        assert_eq!(state.tasks().last(), Some(&expected));
    }

    #[test]
    fn remove_cascades_to_touching_links_only() {
        let mut state = small_state();
        let t1 = id_of(&state, "T1");
        let phase = id_of(&state, "H");

        state.apply(TaskAction::Remove(t1));
        assert!(state.tasks().iter().all(|t| t.id != t1));
        assert!(state.links().is_empty());

        // Children of a removed summary are left orphaned on purpose.
        state.apply(TaskAction::Remove(phase));
        let t2 = state.tasks().iter().find(|t| t.name == "T2").unwrap();
        assert_eq!(t2.parent, Some(phase));
    }

    #[test]
    fn remove_keeps_unrelated_links() {
        let mut state = small_state();
        let project = id_of(&state, "P");
        state.apply(TaskAction::Remove(project));
        assert_eq!(state.links().len(), 1);
    }

    #[test]
    fn edit_buffer_commits_exactly_one_task() {
        let mut state = small_state();
        let id = id_of(&state, "T2");
        state.apply(TaskAction::OpenEditor(id));

        state.editing_mut().unwrap().name = "Hydro Soak".to_string();
        // Main collection untouched until commit.
        assert!(state.tasks().iter().any(|t| t.name == "T2"));

        state.commit_edit();
        assert!(state.editing().is_none());
        assert_eq!(
            state.tasks().iter().filter(|t| t.name == "Hydro Soak").count(),
            1
        );
        assert!(state.tasks().iter().all(|t| t.name != "T2"));
    }

    #[test]
    fn cancel_leaves_collection_unchanged() {
        let mut state = small_state();
        let before: Vec<Task> = state.tasks().to_vec();
        let id = id_of(&state, "T1");

        state.apply(TaskAction::OpenEditor(id));
        state.editing_mut().unwrap().progress = Some(99);
        state.cancel_edit();

        assert!(state.editing().is_none());
        assert_eq!(state.tasks(), &before[..]);
    }

    #[test]
    fn open_editor_with_unknown_id_is_a_no_op() {
        let mut state = small_state();
        state.apply(TaskAction::OpenEditor(Uuid::new_v4()));
        assert!(state.editing().is_none());
    }

    #[test]
    fn quick_add_appends_one_fresh_task() {
        let mut state = small_state();
        let before = state.tasks().len();
        let id = state.quick_add(date(26));

        assert_eq!(state.tasks().len(), before + 1);
        let added = state.tasks().iter().find(|t| t.id == id).unwrap();
        assert_eq!(added.name, "New Task");
        assert_eq!(added.kind, TaskKind::Task);
        assert_eq!(added.start, date(26));
        assert_eq!(added.end, date(29));
        assert_eq!(added.progress, Some(0));
        assert_eq!(added.parent, None);
        assert_eq!(
            state.tasks().iter().filter(|t| t.id == id).count(),
            1
        );
    }

    #[test]
    fn options_are_distinct_in_first_seen_order() {
        let state = small_state();
        assert_eq!(state.manager_options(), vec!["Jeremy", "Jessica"]);
    }

    #[test]
    fn depth_follows_the_parent_chain() {
        let state = small_state();
        let tasks = state.tasks();
        assert_eq!(state.depth(&tasks[0]), 0);
        assert_eq!(state.depth(&tasks[1]), 1);
        assert_eq!(state.depth(&tasks[2]), 2);
    }
}
