use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// A snapshot of a user embedded in a task: id plus the display name the
/// user had at the moment of creation or claiming. It is a copy, not a live
/// reference; a later username change does not update historical tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskParty {
    pub id: Uuid,
    pub name: String,
}

/// Represents a task entity as stored in the database.
///
/// Owner and claimer snapshots are flattened into columns; `claimer_id` and
/// `claimer_name` are null together until the task is claimed.
#[derive(Debug, Clone, FromRow)]
pub struct Task {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Priority level, 0 (low) through 3 (very high).
    pub priority: i16,
    /// Amount credited to the claimer's wallet on completion.
    pub payout: i64,
    pub completed: bool,
    pub creation_date: DateTime<Utc>,
    pub owner_id: Uuid,
    pub owner_name: String,
    pub claimer_id: Option<Uuid>,
    pub claimer_name: Option<String>,
}

impl Task {
    /// Creates a new open task owned by `owner`: not completed, unclaimed,
    /// stamped with the current time.
    pub fn new(input: &NewTaskRequest, owner: TaskParty) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name.clone(),
            description: input.description.clone(),
            priority: input.priority,
            payout: input.payout,
            completed: false,
            creation_date: Utc::now(),
            owner_id: owner.id,
            owner_name: owner.name,
            claimer_id: None,
            claimer_name: None,
        }
    }

    pub fn owner(&self) -> TaskParty {
        TaskParty {
            id: self.owner_id,
            name: self.owner_name.clone(),
        }
    }

    pub fn claimer(&self) -> Option<TaskParty> {
        match (self.claimer_id, &self.claimer_name) {
            (Some(id), Some(name)) => Some(TaskParty {
                id,
                name: name.clone(),
            }),
            _ => None,
        }
    }
}

/// Input payload for posting a new task.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewTaskRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(range(min = 0, max = 3))]
    pub priority: i16,
    #[validate(range(min = 1))]
    pub payout: i64,
    pub owner_id: Uuid,
}

/// Input payload for editing an open task's mutable fields.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EditTaskRequest {
    pub task_id: Uuid,
    pub owner_id: Uuid,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(range(min = 0, max = 3))]
    pub priority: i16,
    #[validate(range(min = 1))]
    pub payout: i64,
}

/// Payload for claim and complete requests.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskActionRequest {
    pub user_id: Uuid,
    pub task_id: Uuid,
}

/// Query parameters for the task listing endpoints (`?id=<userId>`).
#[derive(Debug, Deserialize)]
pub struct TaskListQuery {
    pub id: Uuid,
}

/// Query parameters for task deletion (`?userId=&taskId=`).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTaskQuery {
    pub user_id: Uuid,
    pub task_id: Uuid,
}

/// The display-safe projection of a task returned by the listing endpoints.
/// Owner and claimer snapshots are flattened to id+name pairs; claimer
/// fields are null while the task is unclaimed.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub priority: i16,
    pub payout: i64,
    pub completed: bool,
    pub creation_date: DateTime<Utc>,
    pub owner_id: Uuid,
    pub owner_name: String,
    pub claimer_id: Option<Uuid>,
    pub claimer_name: Option<String>,
}

impl From<Task> for TaskView {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            name: task.name,
            description: task.description,
            priority: task.priority,
            payout: task.payout,
            completed: task.completed,
            creation_date: task.creation_date,
            owner_id: task.owner_id,
            owner_name: task.owner_name,
            claimer_id: task.claimer_id,
            claimer_name: task.claimer_name,
        }
    }
}
