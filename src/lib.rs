//! Core of a photo layout composer: an interactive crop editor over decoded
//! image buffers, a gallery of uploaded and cropped assets, and a page book
//! of printable layout sets. The rendering shell and print pipeline sit on
//! top of [`app::Composer`].

pub mod app;
pub mod asset;
mod config;
pub mod editor;
pub mod error;
pub mod gallery;
pub mod geometry;
pub mod layout;
pub mod logging;

pub use error::{AppError, AppResult};
