//! View state and controller for the SmartTransit companion screen: tabs,
//! toggles, green points, the timed SOS overlay and spoken announcements.

pub mod command;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod localization;
pub mod speech;
pub mod state;
pub mod static_data;
pub mod views;

pub use controller::{AppController, FeedbackReceipt, SOS_DURATION};
pub use error::{AppError, Result};
pub use events::{Transition, TransitionObserver};
pub use localization::Language;
pub use speech::{SpeechAnnouncer, SpeechBackend};
pub use state::{SessionState, Tab};
pub use static_data::SampleData;
