use chrono::{Duration, NaiveDate};
use rand::Rng;

use super::task::{Link, Task};

const PROJECT_NAMES: &[&str] = &[
    "BGST-120k Caldwell Tank, TX",
    "Welded Steel Tank #A13—Mesa, AZ",
    "Potable Water Tank—Fresno, CA",
    "Fire Protection Tank—Reno, NV",
    "Industrial Process Tank—Topeka, KS",
    "Reservoir Retrofit—Salem, OR",
    "Elevated Standpipe—Omaha, NE",
    "Desal Feed Tank—Carlsbad, CA",
    "Brine Storage—Lubbock, TX",
    "Irrigation Tank—Yuma, AZ",
    "Wastewater EQ Tank—Boise, ID",
    "Food-Grade Tank—Modesto, CA",
    "Mining Slurry Tank—Elko, NV",
    "Brewery CIP Tank—San Diego, CA",
    "RO Permeate Tank—Las Vegas, NV",
    "Thermal Energy Tank—Sacramento, CA",
    "Rainwater Harvest—Santa Rosa, CA",
    "Storm Surge Tank—Houston, TX",
    "Greywater Tank—Anaheim, CA",
    "Chemical Dosing Tank—Long Beach, CA",
];

const PHASES: &[&str] = &[
    "Engineering & Submittals",
    "Plate Cutting & Forming",
    "Shell & Floor Fabrication",
    "Surface Prep & Coatings",
    "Delivery & Site Mobilization",
    "Erection & Installation",
    "Hydrotest & Commissioning",
];

const MANAGERS: &[&str] = &["Jeremy", "Jessica", "Marlon", "Toni", "Brian"];

/// Fixed sub-task names per phase. A phase with no entry yields no tasks.
fn phase_tasks(phase: &str) -> &'static [&'static str] {
    match phase {
        "Engineering & Submittals" => &[
            "IFC Drawings",
            "PE Stamp & Calcs",
            "Anchor Bolt Plan",
            "Submittal Package",
            "Owner Review / Approval",
        ],
        "Plate Cutting & Forming" => &[
            "Material Receipt",
            "Plate Nesting & CNC",
            "Shell Plate Rolling",
            "Nozzle Cutouts",
            "QC Dimensional Check",
        ],
        "Shell & Floor Fabrication" => &[
            "Floor Layout & Weld",
            "Shell Seam Welds",
            "Stiffener Fit-Up",
            "Manway Assembly",
            "NDE / Visual Inspection",
        ],
        "Surface Prep & Coatings" => &[
            "Abrasive Blast SSPC-SP10",
            "Interior Linings",
            "Exterior Prime",
            "Final Topcoat",
        ],
        "Delivery & Site Mobilization" => &[
            "Trucking Permits",
            "Load-Out",
            "Site Setup",
            "Crane Scheduling",
            "Safety Plan & JHA",
        ],
        "Erection & Installation" => &[
            "Floor Plates Install",
            "Shell Rings Erection",
            "Roof Plates",
            "Ladders & Handrails",
        ],
        "Hydrotest & Commissioning" => &[
            "Filling & Soak",
            "Leak Repairs (if any)",
            "Disinfection",
            "Turnover & Punchlist",
        ],
        _ => &[],
    }
}

/// The full demo dataset produced in one shot at startup.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub tasks: Vec<Task>,
    pub links: Vec<Link>,
}

impl Dataset {
    /// One-shot generation with the thread RNG and the local date, as the
    /// app does at mount. Not reproducible between runs.
    pub fn random() -> Self {
        let today = chrono::Local::now().date_naive();
        generate(&mut rand::thread_rng(), today)
    }
}

/// Location is the trailing segment of the project name after the last
/// em-dash; the whole name when there is none, "USA" when that is empty.
fn project_location(name: &str) -> String {
    let segment = name.rsplit('—').next().unwrap_or("").trim();
    if segment.is_empty() {
        "USA".to_string()
    } else {
        segment.to_string()
    }
}

fn random_manager(rng: &mut impl Rng) -> String {
    MANAGERS[rng.gen_range(0..MANAGERS.len())].to_string()
}

/// Generate the project → phase → task hierarchy plus the end-to-start
/// chains connecting consecutive tasks inside each phase.
///
/// The random source is injected so tests can seed it; dates are laid out
/// relative to `today`.
pub fn generate(rng: &mut impl Rng, today: NaiveDate) -> Dataset {
    let mut tasks = Vec::new();
    let mut links = Vec::new();

    for name in PROJECT_NAMES {
        let start = today + Duration::days(rng.gen_range(-5..15));
        let end = start + Duration::days(rng.gen_range(90..130));
        let location = project_location(name);

        let mut project = Task::summary(*name, start, end);
        project.progress = Some(rng.gen_range(0..60));
        project.manager = Some(random_manager(rng));
        project.location = Some(location.clone());
        let project_id = project.id;
        tasks.push(project);

        // Phases are always a prefix of the fixed list, in order.
        let phase_count = rng.gen_range(3..6);
        let mut prev_phase_end = start;

        for phase_name in &PHASES[..phase_count] {
            let phase_start = prev_phase_end + Duration::days(rng.gen_range(0..3));
            let phase_end = phase_start + Duration::days(rng.gen_range(10..35));
            prev_phase_end = phase_end;

            let mut phase = Task::summary(*phase_name, phase_start, phase_end);
            phase.parent = Some(project_id);
            phase.progress = Some(rng.gen_range(0..80));
            phase.manager = Some(random_manager(rng));
            phase.location = Some(location.clone());
            let phase_id = phase.id;
            tasks.push(phase);

            let names = phase_tasks(phase_name);
            let take = rng.gen_range(3..7).min(names.len());
            let mut prev_task_id = None;
            let mut task_start = phase_start;

            for task_name in &names[..take] {
                let task_end = task_start + Duration::days(rng.gen_range(2..8));

                let mut task = Task::new(*task_name, task_start, task_end);
                task.parent = Some(phase_id);
                task.progress = Some(rng.gen_range(0..100));
                task.manager = Some(random_manager(rng));
                task.location = Some(location.clone());

                if let Some(prev) = prev_task_id {
                    links.push(Link::end_to_start(prev, task.id));
                }
                prev_task_id = Some(task.id);
                task_start = task_end + Duration::days(rng.gen_range(0..2));
                tasks.push(task);
            }
        }
    }

    Dataset { tasks, links }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::{LinkKind, TaskKind};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;
    use uuid::Uuid;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 26).unwrap()
    }

    fn dataset(seed: u64) -> Dataset {
        generate(&mut StdRng::seed_from_u64(seed), today())
    }

    #[test]
    fn every_parent_and_link_endpoint_exists() {
        for seed in 0..10 {
            let data = dataset(seed);
            let by_id: HashMap<Uuid, &Task> = data.tasks.iter().map(|t| (t.id, t)).collect();

            for task in &data.tasks {
                if let Some(parent) = task.parent {
                    let parent = by_id[&parent];
                    assert_eq!(parent.kind, TaskKind::Summary);
                    // Phases hang off projects, leaf tasks off phases.
                    match task.kind {
                        TaskKind::Summary => assert_eq!(parent.parent, None),
                        TaskKind::Task => assert!(parent.parent.is_some()),
                    }
                }
            }
            for link in &data.links {
                assert!(by_id.contains_key(&link.source));
                assert!(by_id.contains_key(&link.target));
            }
        }
    }

    #[test]
    fn twenty_projects_with_prefix_phases() {
        let data = dataset(7);
        let projects: Vec<&Task> = data.tasks.iter().filter(|t| t.parent.is_none()).collect();
        assert_eq!(projects.len(), 20);

        for project in &projects {
            let phases: Vec<&Task> = data
                .tasks
                .iter()
                .filter(|t| t.parent == Some(project.id))
                .collect();
            assert!((3..6).contains(&phases.len()));
            for (i, phase) in phases.iter().enumerate() {
                assert_eq!(phase.name, PHASES[i]);
            }
        }
    }

    #[test]
    fn chains_are_end_to_start_and_temporally_ordered() {
        let data = dataset(42);
        let by_id: HashMap<Uuid, &Task> = data.tasks.iter().map(|t| (t.id, t)).collect();

        assert!(!data.links.is_empty());
        for link in &data.links {
            assert_eq!(link.kind, LinkKind::EndToStart);
            let source = by_id[&link.source];
            let target = by_id[&link.target];
            assert!(source.end <= target.start);
            // Chains never cross phases.
            assert_eq!(source.parent, target.parent);
        }
    }

    #[test]
    fn task_dates_and_progress_are_in_range() {
        let data = dataset(3);
        for task in &data.tasks {
            assert!(task.end > task.start);
            assert!(task.progress.unwrap() <= 100);
            if task.kind == TaskKind::Task {
                assert!((2..8).contains(&task.duration_days()));
            }
        }
    }

    #[test]
    fn sibling_task_starts_are_non_decreasing() {
        let data = dataset(11);
        let phases: Vec<&Task> = data
            .tasks
            .iter()
            .filter(|t| t.is_summary() && t.parent.is_some())
            .collect();
        for phase in phases {
            let starts: Vec<NaiveDate> = data
                .tasks
                .iter()
                .filter(|t| t.parent == Some(phase.id))
                .map(|t| t.start)
                .collect();
            assert!(starts.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn location_comes_from_trailing_name_segment() {
        assert_eq!(project_location("Potable Water Tank—Fresno, CA"), "Fresno, CA");
        // No em-dash: the whole name stands in.
        assert_eq!(
            project_location("BGST-120k Caldwell Tank, TX"),
            "BGST-120k Caldwell Tank, TX"
        );
        assert_eq!(project_location("Spare Tank—"), "USA");
    }

    #[test]
    fn successive_datasets_differ() {
        let a = dataset(1);
        let b = dataset(2);
        let starts_a: Vec<NaiveDate> = a.tasks.iter().map(|t| t.start).collect();
        let starts_b: Vec<NaiveDate> = b.tasks.iter().map(|t| t.start).collect();
        assert_ne!(starts_a, starts_b);
    }
}
