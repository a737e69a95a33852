//! sheetdock
//!
//! Adaptive bottom sheet controller: a draggable, spring-snapping panel that
//! hosts a text-entry dock and a message log, and keeps the dock clear of the
//! on-screen keyboard.
//!
//! Pure Core / Impure Shell: [`sheet`] and [`model`] do no I/O; [`view`]
//! drives the controller from a terminal.

pub mod config;
pub mod logging;
pub mod model;
pub mod sheet;
pub mod view;
