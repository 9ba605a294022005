//! Application layer coordinating listing state, events, and actions.
//!
//! This module sits between the terminal shim (`main.rs`) and the
//! catalog/storage/suggest layers. It implements the event-driven model behind
//! the browse, genres, and ranking pages.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └────────── Fetch Results ─────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transitions
//! - [`modes`]: Page, phase, source filter, and sort enums
//! - [`session`]: Driver that executes actions until the page settles
//! - [`state`]: Listing state container
//! - [`view`]: Pure filter and sort derivation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod session;
pub mod state;
pub mod view;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{ListingPhase, PageKind, SortKey, SourceFilter, GENRES};
pub use session::ListingSession;
pub use state::{ListingState, ViewState};
pub use view::derive_view;
