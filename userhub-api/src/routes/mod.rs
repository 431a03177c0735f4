/// API route handlers
///
/// - `health`: Health check endpoint
/// - `users`: User resource (list, retrieve, create, update, delete)

pub mod health;
pub mod users;
