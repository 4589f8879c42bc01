/// Task page handlers
///
/// Every handler here runs behind the session middleware, so it receives
/// a resolved `CurrentUser` and follows the same shape: authenticate
/// (done by the middleware) → authorize (ownership, enforced by the task
/// store) → invoke the store or query service → render or redirect.
///
/// # Routes
///
/// - `GET  /` — task list with `search-bar` prefix filter
/// - `GET/POST /task-create/` — creation form (fields: title, complete)
/// - `GET/POST /task-update/{id}/` — update form, owner only
/// - `GET/POST /task-delete/{id}/` — delete confirmation, owner only
///
/// All mutations redirect to `/` on success. The owner of a created task
/// is always the session user; nothing in the form can change that.

use crate::{
    app::{AppState, CurrentUser},
    error::PageResult,
    routes::form_errors,
    views::{self, TaskFormValues},
};
use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use serde::Deserialize;
use taskboard_shared::models::task::{CreateTask, Task, UpdateTask};
use taskboard_shared::query;
use uuid::Uuid;
use validator::Validate;

/// Query string for the list page
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// The search input, named after the form field
    #[serde(rename = "search-bar")]
    pub search_bar: Option<String>,
}

/// Form body for both the create and update pages
///
/// A checkbox is only present in the submission when checked, hence
/// `Option<String>` rather than `bool`.
#[derive(Debug, Deserialize, Validate)]
pub struct TaskForm {
    /// Task title
    #[validate(length(min = 1, max = 150, message = "Title is required"))]
    pub title: String,

    /// Checkbox: present when checked
    pub complete: Option<String>,
}

impl TaskForm {
    fn is_complete(&self) -> bool {
        self.complete.is_some()
    }

    fn values(&self) -> TaskFormValues {
        TaskFormValues {
            title: self.title.clone(),
            complete: self.is_complete(),
        }
    }
}

/// `GET /` — the task list
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(search): Query<SearchQuery>,
) -> PageResult<Html<String>> {
    let listing = query::list_for_user(&state.db, user.id, search.search_bar.as_deref()).await?;

    Ok(Html(views::home_page(&listing, &user.username)))
}

/// `GET /task-create/` — blank creation form
pub async fn create_form() -> Html<String> {
    Html(views::task_form_page(
        "Create Task",
        "/task-create/",
        &TaskFormValues::default(),
        &[],
    ))
}

/// `POST /task-create/` — submit the creation form
///
/// The owner is taken from the session; any owner value a client smuggles
/// into the body is simply not a field of [`TaskForm`] and is dropped by
/// deserialization.
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Form(form): Form<TaskForm>,
) -> PageResult<Response> {
    if let Err(errors) = form.validate() {
        let page =
            views::task_form_page("Create Task", "/task-create/", &form.values(), &form_errors(&errors));
        return Ok(Html(page).into_response());
    }

    Task::create(
        &state.db,
        user.id,
        CreateTask {
            title: form.title.clone(),
            complete: form.is_complete(),
            ..Default::default()
        },
    )
    .await?;

    Ok(Redirect::to("/").into_response())
}

/// `GET /task-update/{id}/` — prefilled update form
pub async fn update_form(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> PageResult<Html<String>> {
    let task = Task::find_owned(&state.db, id, user.id).await?;

    Ok(Html(views::task_form_page(
        "Update Task",
        &format!("/task-update/{}/", task.id),
        &TaskFormValues::from_task(&task),
        &[],
    )))
}

/// `POST /task-update/{id}/` — submit the update form
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Form(form): Form<TaskForm>,
) -> PageResult<Response> {
    if let Err(errors) = form.validate() {
        let page = views::task_form_page(
            "Update Task",
            &format!("/task-update/{}/", id),
            &form.values(),
            &form_errors(&errors),
        );
        return Ok(Html(page).into_response());
    }

    Task::update(
        &state.db,
        id,
        user.id,
        UpdateTask {
            title: Some(form.title.clone()),
            description: None,
            complete: Some(form.is_complete()),
        },
    )
    .await?;

    Ok(Redirect::to("/").into_response())
}

/// `GET /task-delete/{id}/` — delete confirmation page
pub async fn delete_form(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> PageResult<Html<String>> {
    let task = Task::find_owned(&state.db, id, user.id).await?;

    Ok(Html(views::delete_page(&task)))
}

/// `POST /task-delete/{id}/` — confirmed delete
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> PageResult<Response> {
    Task::delete(&state.db, id, user.id).await?;

    Ok(Redirect::to("/").into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkbox_semantics() {
        let checked = TaskForm {
            title: "x".to_string(),
            complete: Some("on".to_string()),
        };
        let unchecked = TaskForm {
            title: "x".to_string(),
            complete: None,
        };
        assert!(checked.is_complete());
        assert!(!unchecked.is_complete());
    }

    #[test]
    fn test_title_validation() {
        let empty = TaskForm {
            title: String::new(),
            complete: None,
        };
        assert!(empty.validate().is_err());

        let too_long = TaskForm {
            title: "x".repeat(151),
            complete: None,
        };
        assert!(too_long.validate().is_err());

        let ok = TaskForm {
            title: "x".repeat(150),
            complete: None,
        };
        assert!(ok.validate().is_ok());
    }
}
