//! Users domain layer

pub mod entities;
