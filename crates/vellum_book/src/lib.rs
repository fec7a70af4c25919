//! Vellum Book Controller
//!
//! The interaction runtime for a pseudo-3D book widget: a container that
//! rotates freely while closed, opens into a page-turning view, and is
//! navigated by pointer gestures, buttons, pagination bullets, or keyboard.
//!
//! The controller owns all book state and emits a typed event stream; the
//! host renders from [`RenderState`] snapshots and pumps time into the
//! controller once per frame. There is no thread, no wall clock, and no
//! hidden timer inside this crate.
//!
//! # Example
//!
//! ```rust
//! use vellum_book::{BookController, BookOptions, Lifecycle};
//!
//! let mut book = BookController::new(BookOptions::default()).unwrap();
//!
//! book.open();
//! assert_eq!(book.lifecycle(), Lifecycle::Opening);
//!
//! // The host's frame loop supplies time; the open transition settles.
//! book.pump(1_000);
//! assert_eq!(book.lifecycle(), Lifecycle::Open);
//! ```

pub mod config;
pub mod controller;
pub mod events;
pub mod focus;
pub mod schedule;
pub mod sequencer;
pub mod state;
pub mod ui;

pub use config::{BookImages, BookOptions, BoundaryPolicy, OptionsError};
pub use controller::BookController;
pub use events::{BookEvent, BookEventKind};
pub use focus::BookId;
pub use sequencer::PageStep;
pub use state::{BookState, Lifecycle, RenderState};
pub use ui::{Bullet, UiModel};
