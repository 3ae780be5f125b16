pub mod filter;
pub mod mock;
pub mod state;
pub mod task;
pub mod timeline;

pub use filter::TaskFilter;
pub use mock::Dataset;
pub use state::{ProjectState, TaskAction};
pub use task::{Link, Task, TaskPatch};
pub use timeline::{Scale, ScaleUnit, TimelineViewport};
