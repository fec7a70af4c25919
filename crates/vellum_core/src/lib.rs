//! Vellum Core Runtime
//!
//! This crate provides the foundational primitives for the Vellum book widget:
//!
//! - **Typed Event Emission**: subscribe/unsubscribe with disposer handles
//! - **Pointer Input Model**: touch and mouse samples normalized to one shape
//! - **Gesture Recognition**: taps, drags, and directional swipes with
//!   distance-threshold disambiguation
//!
//! # Example
//!
//! ```rust
//! use vellum_core::gesture::{GestureKind, GestureRecognizer};
//! use vellum_core::input::{PointerPoint, PointerSource};
//!
//! let mut recognizer = GestureRecognizer::new();
//!
//! let down = recognizer.begin(&[PointerPoint::new(10.0, 10.0)], PointerSource::Mouse, 0);
//! assert_eq!(down[0].kind, GestureKind::Touchdown);
//!
//! // A release without meaningful movement is a tap.
//! let up = recognizer.finish(PointerSource::Mouse, 120);
//! assert_eq!(up[0].kind, GestureKind::Tap);
//! ```

pub mod emitter;
pub mod gesture;
pub mod input;

pub use emitter::{Emitter, HandlerId};
pub use gesture::{GestureDirection, GestureEvent, GestureKind, GestureRecognizer};
pub use input::{KeyCode, PointerPoint, PointerSource};
