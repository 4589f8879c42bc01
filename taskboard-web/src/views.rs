/// HTML rendering for the server-rendered pages
///
/// Pages are built as plain strings with a shared layout; no template
/// engine is involved. Everything user-supplied goes through [`escape`]
/// before it reaches markup. Styling is intentionally minimal, since the
/// presentation contract here is the inputs and outputs, not the looks.

use taskboard_shared::models::task::Task;
use taskboard_shared::query::TaskListing;

/// Escapes a string for safe inclusion in HTML text or attribute values
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wraps page content in the shared document shell
fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title} | Taskboard</title>\n\
         <style>body{{font-family:sans-serif;max-width:40rem;margin:2rem auto;padding:0 1rem}}\
         .complete{{text-decoration:line-through}}\
         .errors{{color:#b00020}}\
         .badge{{background:#eee;border-radius:1rem;padding:0 .5rem}}</style>\n\
         </head>\n\
         <body>\n{body}\n</body>\n\
         </html>\n",
        title = escape(title),
        body = body
    )
}

/// Renders a list of form error messages (empty string when no errors)
fn error_list(errors: &[String]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let items: String = errors
        .iter()
        .map(|e| format!("<li>{}</li>", escape(e)))
        .collect();
    format!("<ul class=\"errors\">{}</ul>", items)
}

fn task_row(task: &Task) -> String {
    let class = if task.complete { " class=\"complete\"" } else { "" };
    format!(
        "<li{class}><span>{title}</span> \
         <a href=\"/task-update/{id}/\">edit</a> \
         <a href=\"/task-delete/{id}/\">delete</a></li>",
        class = class,
        title = escape(&task.title),
        id = task.id
    )
}

/// The home page: task list, incomplete-count badge, search bar
pub fn home_page(listing: &TaskListing, username: &str) -> String {
    let rows: String = listing.tasks.iter().map(task_row).collect();
    let list = if listing.tasks.is_empty() {
        "<p>No tasks to show.</p>".to_string()
    } else {
        format!("<ul>{}</ul>", rows)
    };

    let body = format!(
        "<header>\n\
         <h1>My To Do List <span class=\"badge\">{count} left</span></h1>\n\
         <p>Hello, {username}. <a href=\"/logout/\">Logout</a></p>\n\
         </header>\n\
         <form method=\"get\" action=\"/\">\n\
         <input type=\"text\" name=\"search-bar\" value=\"{search}\" placeholder=\"Search by title\">\n\
         <button type=\"submit\">Search</button>\n\
         </form>\n\
         <p><a href=\"/task-create/\">Add task</a></p>\n\
         {list}",
        count = listing.incomplete_count,
        username = escape(username),
        search = escape(&listing.search_input),
        list = list
    );

    layout("Tasks", &body)
}

/// Values echoed back into the task form on render or re-render
#[derive(Debug, Clone, Default)]
pub struct TaskFormValues {
    pub title: String,
    pub complete: bool,
}

impl TaskFormValues {
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            complete: task.complete,
        }
    }
}

/// The create/update task form
pub fn task_form_page(
    heading: &str,
    action: &str,
    values: &TaskFormValues,
    errors: &[String],
) -> String {
    let checked = if values.complete { " checked" } else { "" };
    let body = format!(
        "<h1>{heading}</h1>\n\
         {errors}\
         <form method=\"post\" action=\"{action}\">\n\
         <p><label>Title <input type=\"text\" name=\"title\" value=\"{title}\" maxlength=\"150\"></label></p>\n\
         <p><label><input type=\"checkbox\" name=\"complete\"{checked}> Complete</label></p>\n\
         <button type=\"submit\">Save</button> <a href=\"/\">Cancel</a>\n\
         </form>",
        heading = escape(heading),
        errors = error_list(errors),
        action = escape(action),
        title = escape(&values.title),
        checked = checked
    );

    layout(heading, &body)
}

/// The delete confirmation page
pub fn delete_page(task: &Task) -> String {
    let body = format!(
        "<h1>Delete Task</h1>\n\
         <p>Are you sure you want to delete \"{title}\"?</p>\n\
         <form method=\"post\" action=\"/task-delete/{id}/\">\n\
         <button type=\"submit\">Delete</button> <a href=\"/\">Cancel</a>\n\
         </form>",
        title = escape(&task.title),
        id = task.id
    );

    layout("Delete Task", &body)
}

/// The login form
pub fn login_page(username: &str, errors: &[String]) -> String {
    let body = format!(
        "<h1>Login</h1>\n\
         {errors}\
         <form method=\"post\" action=\"/login/\">\n\
         <p><label>Username <input type=\"text\" name=\"username\" value=\"{username}\"></label></p>\n\
         <p><label>Password <input type=\"password\" name=\"password\"></label></p>\n\
         <button type=\"submit\">Login</button>\n\
         </form>\n\
         <p>No account? <a href=\"/register/\">Register</a></p>",
        errors = error_list(errors),
        username = escape(username)
    );

    layout("Login", &body)
}

/// The registration form
pub fn register_page(username: &str, errors: &[String]) -> String {
    let body = format!(
        "<h1>Register</h1>\n\
         {errors}\
         <form method=\"post\" action=\"/register/\">\n\
         <p><label>Username <input type=\"text\" name=\"username\" value=\"{username}\" maxlength=\"150\"></label></p>\n\
         <p><label>Password <input type=\"password\" name=\"password1\"></label></p>\n\
         <p><label>Confirm password <input type=\"password\" name=\"password2\"></label></p>\n\
         <button type=\"submit\">Register</button>\n\
         </form>\n\
         <p>Already have an account? <a href=\"/login/\">Login</a></p>",
        errors = error_list(errors),
        username = escape(username)
    );

    layout("Register", &body)
}

/// A bare error page for the 4xx/5xx responses
pub fn error_page(heading: &str, message: &str) -> String {
    let body = format!(
        "<h1>{heading}</h1>\n<p>{message}</p>\n<p><a href=\"/\">Back to your tasks</a></p>",
        heading = escape(heading),
        message = escape(message)
    );

    layout(heading, &body)
}
