//! Domain layer for the recyclable catalog
//!
//! Containers, captured images, deposit/size classification and the
//! capture-count allocator. Everything here is pure and synchronous; the
//! repository traits describe the persistence collaborators.

pub mod model;
pub mod repository;
pub mod service;

pub use model::*;
pub use repository::{ContainerRepository, ImageRepository};
