use crate::models::{EditTaskRequest, Task, TaskParty};
use sqlx::PgPool;
use uuid::Uuid;

const TASK_COLUMNS: &str = "id, name, description, priority, payout, completed, \
                            creation_date, owner_id, owner_name, claimer_id, claimer_name";

/// Persistence handle for task records.
///
/// Every lifecycle transition is a conditional statement whose `WHERE`
/// clause is the transition's guard. A caller that fails the guard gets
/// `None` (or `false`), never a row belonging to someone else.
#[derive(Clone)]
pub struct TaskRepo {
    pool: PgPool,
}

impl TaskRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, task: &Task) -> sqlx::Result<()> {
        sqlx::query(
            "INSERT INTO tasks (id, name, description, priority, payout, completed, \
                                creation_date, owner_id, owner_name, claimer_id, claimer_name) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(task.id)
        .bind(&task.name)
        .bind(&task.description)
        .bind(task.priority)
        .bind(task.payout)
        .bind(task.completed)
        .bind(task.creation_date)
        .bind(task.owner_id)
        .bind(&task.owner_name)
        .bind(task.claimer_id)
        .bind(&task.claimer_name)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Tasks open for claiming by `user_id`: unclaimed and owned by someone
    /// else. Unordered.
    pub async fn find_available_for(&self, user_id: Uuid) -> sqlx::Result<Vec<Task>> {
        sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks \
             WHERE claimer_id IS NULL AND owner_id <> $1"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Tasks related to `user_id`: owned or claimed by them.
    pub async fn find_related_to(&self, user_id: Uuid) -> sqlx::Result<Vec<Task>> {
        sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks \
             WHERE owner_id = $1 OR claimer_id = $1"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Overwrites the mutable fields of a task, provided it is still open
    /// and owned by `owner_id`. Lifecycle columns are left untouched.
    pub async fn update_if_editable(
        &self,
        owner_id: Uuid,
        changes: &EditTaskRequest,
    ) -> sqlx::Result<Option<Task>> {
        sqlx::query_as::<_, Task>(&format!(
            "UPDATE tasks SET name = $1, description = $2, priority = $3, payout = $4 \
             WHERE id = $5 AND completed = FALSE AND owner_id = $6 \
             RETURNING {TASK_COLUMNS}"
        ))
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(changes.priority)
        .bind(changes.payout)
        .bind(changes.task_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Claims a task for `claimer` if it is still open, unclaimed, and not
    /// their own. The single conditional update is what serializes racing
    /// claims: only one of them matches the `claimer_id IS NULL` predicate.
    pub async fn claim(&self, task_id: Uuid, claimer: &TaskParty) -> sqlx::Result<Option<Task>> {
        sqlx::query_as::<_, Task>(&format!(
            "UPDATE tasks SET claimer_id = $1, claimer_name = $2 \
             WHERE id = $3 AND completed = FALSE AND claimer_id IS NULL AND owner_id <> $1 \
             RETURNING {TASK_COLUMNS}"
        ))
        .bind(claimer.id)
        .bind(&claimer.name)
        .bind(task_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Marks a task completed and credits its payout to the claimer's
    /// wallet, returning the new balance.
    ///
    /// Both writes happen in one transaction: a completed task without its
    /// credited payout can never be observed, even if the process dies
    /// between the two statements.
    pub async fn complete_for(
        &self,
        task_id: Uuid,
        claimer_id: Uuid,
    ) -> sqlx::Result<Option<i64>> {
        let mut tx = self.pool.begin().await?;

        let payout: Option<(i64,)> = sqlx::query_as(
            "UPDATE tasks SET completed = TRUE \
             WHERE id = $1 AND completed = FALSE AND claimer_id = $2 \
             RETURNING payout",
        )
        .bind(task_id)
        .bind(claimer_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((payout,)) = payout else {
            // Guard not met; dropping the transaction rolls it back.
            return Ok(None);
        };

        let (balance,): (i64,) = sqlx::query_as(
            "UPDATE users SET wallet = wallet + $1 WHERE id = $2 RETURNING wallet",
        )
        .bind(payout)
        .bind(claimer_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(balance))
    }

    /// Deletes a task owned by `owner_id` if it is unclaimed, or claimed and
    /// completed. Returns whether a row was removed.
    pub async fn delete_if_deletable(
        &self,
        task_id: Uuid,
        owner_id: Uuid,
    ) -> sqlx::Result<bool> {
        let result = sqlx::query(
            "DELETE FROM tasks \
             WHERE id = $1 AND owner_id = $2 \
               AND (claimer_id IS NULL OR completed = TRUE)",
        )
        .bind(task_id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
