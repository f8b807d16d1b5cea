//! Sea-ORM entities for the ticketing schema
pub mod project;
pub mod task;
pub mod user;
