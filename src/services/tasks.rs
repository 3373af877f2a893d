//!
//! # Task Lifecycle Service
//!
//! Orchestrates the task state machine on top of the repositories:
//!
//! ```text
//! Open --claim--> Claimed --complete--> Completed
//! Open | Completed --delete--> (gone)
//! ```
//!
//! `edit` is a self-loop on `Open`. Every operation validates its payload
//! first, then requires the acting user to exist, then runs the conditional
//! repository call whose predicate is the transition guard. A guard that
//! does not match maps to the operation-specific denial error, so callers
//! can tell "bad input" from "not permitted" from "no such task".

use crate::{
    error::{AppError, TaskAction, TaskTransition},
    models::{EditTaskRequest, NewTaskRequest, Task, TaskParty, TaskView, User},
    repo::{TaskRepo, UserRepo},
};
use uuid::Uuid;
use validator::Validate;

#[derive(Clone)]
pub struct TaskService {
    users: UserRepo,
    tasks: TaskRepo,
}

impl TaskService {
    pub fn new(users: UserRepo, tasks: TaskRepo) -> Self {
        Self { users, tasks }
    }

    async fn require_user(&self, id: Uuid, action: TaskAction) -> Result<User, AppError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(AppError::UnknownUser(action))
    }

    /// Posts a new open task owned by `request.owner_id`, capturing the
    /// owner's current display name as a snapshot.
    pub async fn create(&self, request: NewTaskRequest) -> Result<(), AppError> {
        request.validate()?;

        let owner = self.require_user(request.owner_id, TaskAction::Create).await?;
        let task = Task::new(
            &request,
            TaskParty {
                id: owner.id,
                name: owner.username,
            },
        );
        self.tasks.insert(&task).await?;
        Ok(())
    }

    /// Overwrites a task's mutable fields. Only the owner may edit, and only
    /// while the task is not completed; lifecycle fields are untouched.
    pub async fn edit(&self, request: EditTaskRequest) -> Result<(), AppError> {
        request.validate()?;

        let owner = self.require_user(request.owner_id, TaskAction::Edit).await?;
        self.tasks
            .update_if_editable(owner.id, &request)
            .await?
            .ok_or(AppError::IneligibleTask(TaskTransition::Edit))?;
        Ok(())
    }

    /// Tasks `user_id` could claim: unclaimed and not their own.
    pub async fn list_available(&self, user_id: Uuid) -> Result<Vec<TaskView>, AppError> {
        let user = self.require_user(user_id, TaskAction::ListAvailable).await?;
        let tasks = self.tasks.find_available_for(user.id).await?;
        Ok(tasks.into_iter().map(TaskView::from).collect())
    }

    /// Tasks `user_id` owns or has claimed.
    pub async fn list_related(&self, user_id: Uuid) -> Result<Vec<TaskView>, AppError> {
        let user = self.require_user(user_id, TaskAction::ListRelated).await?;
        let tasks = self.tasks.find_related_to(user.id).await?;
        Ok(tasks.into_iter().map(TaskView::from).collect())
    }

    /// Claims an open task for `user_id`. A task can be claimed at most
    /// once, and never by its owner.
    pub async fn claim(&self, user_id: Uuid, task_id: Uuid) -> Result<(), AppError> {
        let claimer = self.require_user(user_id, TaskAction::Claim).await?;
        self.tasks
            .claim(
                task_id,
                &TaskParty {
                    id: claimer.id,
                    name: claimer.username,
                },
            )
            .await?
            .ok_or(AppError::IneligibleTask(TaskTransition::Claim))?;
        Ok(())
    }

    /// Completes a task claimed by `user_id` and credits the payout to
    /// their wallet, returning the new balance. Completion and credit
    /// commit together.
    pub async fn complete(&self, user_id: Uuid, task_id: Uuid) -> Result<i64, AppError> {
        let claimer = self.require_user(user_id, TaskAction::Complete).await?;
        self.tasks
            .complete_for(task_id, claimer.id)
            .await?
            .ok_or(AppError::IneligibleTask(TaskTransition::Complete))
    }

    /// Permanently removes a task. Only the owner may delete, and only when
    /// the task is unclaimed or claimed-and-completed.
    pub async fn delete(&self, user_id: Uuid, task_id: Uuid) -> Result<(), AppError> {
        let owner = self.require_user(user_id, TaskAction::Delete).await?;
        if self.tasks.delete_if_deletable(task_id, owner.id).await? {
            Ok(())
        } else {
            Err(AppError::IneligibleTask(TaskTransition::Delete))
        }
    }
}
