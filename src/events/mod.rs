//! # Events Module
//!
//! Event-driven architecture for GUI-ready progress reporting.
//!
//! ## Design
//! The core library emits events through channels, allowing any UI
//! (CLI, GUI, web) to subscribe and display progress. Status narration
//! ("Analyzing pixel patterns...") travels as events rather than through
//! any shared mutable string.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! // In a separate thread, listen for events
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         match event {
//!             Event::Analysis(AnalysisEvent::StatusChanged { message }) => {
//!                 println!("{}", message)
//!             }
//!             _ => {}
//!         }
//!     }
//! });
//!
//! // Run an analysis with the sender
//! session.analyze(&sender)?;
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
