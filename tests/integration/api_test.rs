//! API endpoint integration tests
//!
//! `auth` runs without a database. `users` and `tasks` need Postgres at
//! `TEST_DATABASE_URL` and are `#[ignore]`d; run them with `cargo test -- --ignored`.

#![allow(dead_code)]

mod auth;
mod common;
mod tasks;
mod users;
