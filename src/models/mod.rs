pub mod album;
pub mod task;
pub mod user;

pub use album::Album;
pub use task::{
    DeleteTaskQuery, EditTaskRequest, NewTaskRequest, Task, TaskActionRequest, TaskListQuery,
    TaskParty, TaskView,
};
pub use user::User;
