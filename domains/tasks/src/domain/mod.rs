//! Tasks domain layer

pub mod entities;
