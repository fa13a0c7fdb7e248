//! Resource commands
//!
//! Each command takes a [`ResourceStore`](crate::store::ResourceStore) and a
//! [`Deadline`] and returns a plain value; printing is left to `cli`.

mod deadline;
mod get;
mod suspend;

pub use deadline::Deadline;
pub use get::{GetCommand, GetOutcome, StatusSelector};
pub use suspend::{BatchReport, Mutation, SuspendAction, SuspendCommand};
