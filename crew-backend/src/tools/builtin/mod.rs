//! Built-in tools for the agents
//!
//! - `task_manager`: create a task (`TaskManagerTool('Title|Description')`)
//! - `list_tasks`: list tasks (`ListTasks()`)
//! - `write_file`: create or overwrite a file (`WriteFileTool('fileName|content')`)

mod list_tasks;
mod task_manager;
mod write_file;

pub use list_tasks::ListTasksTool;
pub use task_manager::TaskManagerTool;
pub use write_file::WriteFileTool;
