//! Game implementations.

pub mod football;
