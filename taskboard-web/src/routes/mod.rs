/// Page route handlers, organized by resource
///
/// - `health`: Health check endpoint
/// - `auth`: Login, logout, and registration pages
/// - `tasks`: The task list and its create/update/delete forms

pub mod auth;
pub mod health;
pub mod tasks;

/// Flattens validator output into displayable messages
pub(crate) fn form_errors(errors: &validator::ValidationErrors) -> Vec<String> {
    errors
        .field_errors()
        .iter()
        .flat_map(|(_, errs)| {
            errs.iter().map(|error| {
                error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Invalid value".to_string())
            })
        })
        .collect()
}
