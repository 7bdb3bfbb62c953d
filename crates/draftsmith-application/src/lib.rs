//! Application layer for Draftsmith.
//!
//! This crate provides the drafting service that coordinates between the
//! domain model and the generation backend to implement the drafting
//! workflow.

pub mod draft_service;

pub use draft_service::DraftService;
