/// API route handlers
///
/// Organized by resource:
///
/// - `health`: Health check endpoint
/// - `users`: Registration, login, and user lookups
/// - `tasks`: Per-user task CRUD (behind bearer-token auth)

pub mod health;
pub mod tasks;
pub mod users;
