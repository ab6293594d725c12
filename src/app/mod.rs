//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the binary (main.rs) and the collaborators:
//! location, places search and the two renderers. It implements the
//! event-driven architecture behind the home screen.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └────── Collaborator Results ──────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`discovery`]: Permission → fix → search state machine
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`runtime`]: Tokio event loop executing actions
//! - [`selection`]: Map/list selection coupling
//! - [`state`]: Central application state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use foodiepal::app::{handle_event, AppState, Event};
//!
//! let mut state = AppState::new(None);
//! let (render, _actions) = handle_event(&mut state, &Event::Activate);
//! assert!(render);
//! assert!(state.sign_in_required);
//! ```

pub mod actions;
pub mod discovery;
pub mod handler;
pub mod runtime;
pub mod selection;
pub mod state;

pub use actions::Action;
pub use discovery::{DiscoveryFailure, DiscoveryOutcome, DiscoveryPhase, DiscoveryState};
pub use handler::{handle_event, Event};
pub use runtime::{Runtime, FIX_TIMEOUT};
pub use selection::SelectionSynchronizer;
pub use state::AppState;
