//! Mouse input forwarding.
//!
//! Window-system mouse events are reduced to [`PointerEvent`]s and forwarded
//! through a [`PointerState`] into whichever [`MouseController`] is installed.
//!
//! # Invariants
//! - Button events are reported at the last known cursor position.
//! - Only the left button drives the controller.
//! - Without a controller, events still update the tracked cursor.

pub mod pointer;

pub use pointer::{ButtonAction, MouseButton, MouseController, PointerEvent, PointerState};
