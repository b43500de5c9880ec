//! Filtered game-catalog view: populates platform/genre filter controls from
//! the catalog API, submits filter selections, and renders matching games as
//! a list of cards (or a loading/empty/error state).

pub mod catalog;
pub mod model;
pub mod view;
