//! # Utility Modules
//!
//! Supporting utilities that sit outside the token engine.
//!
//! ## Components
//! - **Logging**: structured logging setup driven by [`LoggingConfig`](crate::config::LoggingConfig)
//!
//! The library itself only emits `tracing` events; installing a subscriber is
//! left to the application (the `miller` binary calls [`logging::init_logging`]).

pub mod logging;
