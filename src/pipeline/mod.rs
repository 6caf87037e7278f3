//! Pipeline stages and orchestration
//!
//! `Pipeline` implements the three per-entity stages (extract,
//! transform, load); `DagRunner` wires them into the fixed task graph
//! with barriers between stage groups and per-task retry.

mod dag;
mod stages;

pub use dag::{DagReport, DagRunner};
pub use stages::{Pipeline, StageReport};
