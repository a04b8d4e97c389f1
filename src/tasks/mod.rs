pub mod dates;
pub mod filter;
pub mod source;
pub mod summary;
pub mod types;

pub use filter::{open_tasks, prioritized_tasks, split_worklist, Worklist};
pub use source::{default_tasks_path, JsonFileSource, TaskSource};
pub use summary::{summarize_tasks, summarize_tasks_at, TaskSummary};
pub use types::{Revenue, Task, Timestamp};
