//! SIMPLE_STG: a side-scrolling shooter driven one frame at a time.
//!
//! The simulation core (`entities`, `compute`, `scene`, `driver`) knows
//! nothing about terminals.  It consumes an [`input::InputSnapshot`] per
//! frame and draws through the [`display::Canvas`] trait.  The crossterm
//! collaborators live in `display` and `terminal_input`.

pub mod compute;
pub mod config;
pub mod display;
pub mod driver;
pub mod entities;
pub mod input;
pub mod scene;
pub mod terminal_input;
