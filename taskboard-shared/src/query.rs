/// Task query service
///
/// Read-only listing on top of the task store: per-user visibility plus
/// the optional title-prefix search. This is the only place the search
/// semantics live, so the handlers stay thin.
///
/// One quirk is intentional: the incomplete-task count is taken over the
/// owner's FULL task set, before the search filter is applied. The count
/// badge shows total outstanding work; the filter narrows only the
/// visible list.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::task::Task;

/// Result of listing tasks for one user
#[derive(Debug, Clone)]
pub struct TaskListing {
    /// The (possibly filtered) tasks, incomplete first
    pub tasks: Vec<Task>,

    /// Number of incomplete tasks over the full owner set, independent of
    /// any active filter
    pub incomplete_count: usize,

    /// The search prefix as entered, echoed back for display
    pub search_input: String,
}

/// Lists tasks for `owner`, optionally filtered by title prefix
///
/// The filter is a case-sensitive exact prefix match with no
/// normalization; an empty or missing prefix means no filtering.
/// Read-only, no side effects.
pub async fn list_for_user(
    pool: &PgPool,
    owner: Uuid,
    search: Option<&str>,
) -> Result<TaskListing, sqlx::Error> {
    let tasks = Task::list_by_owner(pool, owner).await?;

    // Count before filtering: the badge reflects all outstanding work.
    let incomplete_count = count_incomplete(&tasks);

    let search_input = search.unwrap_or("").to_string();
    let tasks = if search_input.is_empty() {
        tasks
    } else {
        filter_by_title_prefix(tasks, &search_input)
    };

    Ok(TaskListing {
        tasks,
        incomplete_count,
        search_input,
    })
}

/// Counts tasks with `complete = false`
pub fn count_incomplete(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| !t.complete).count()
}

/// Retains only tasks whose title starts with `prefix`
///
/// Case-sensitive, byte-exact prefix test. Preserves the input order.
pub fn filter_by_title_prefix(tasks: Vec<Task>, prefix: &str) -> Vec<Task> {
    tasks
        .into_iter()
        .filter(|t| t.title.starts_with(prefix))
        .collect()
}
