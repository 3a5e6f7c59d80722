//! API layer for the Tasks domain

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::TasksState;
pub use routes::routes;
