//! Voting view.
//!
//! # Data Flow
//! ```text
//! VotingContract reads ──▶ controller.rs ──▶ state.rs (VotingView)
//!                              │                   │
//! user action (add / vote) ────┘                   ▼
//!                                         render.rs (text / JSON)
//! countdown.rs ── tick ──▶ time_left
//! ```

pub mod controller;
pub mod countdown;
pub mod messages;
pub mod render;
pub mod state;

pub use controller::VotingSession;
pub use countdown::{format_time_left, Countdown};
pub use state::{CandidateView, VotingView};
