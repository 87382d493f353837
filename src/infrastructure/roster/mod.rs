pub mod fallback;
pub mod twse;
