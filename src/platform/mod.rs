//! Platform abstraction layer
//!
//! Translates host keyboard events into the abstract [`InputState`] the
//! simulation reads at step boundaries.

pub mod input;

pub use input::{Axis, AxisBinding, ButtonAction, InputHandler, InputState, KeyBindings, KeyEvent};
