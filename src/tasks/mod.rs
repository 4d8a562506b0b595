//! Background tasks module
//!
//! Tasks that run alongside the HTTP server.

pub mod display_ticker;

pub use display_ticker::display_ticker_task;
