//! # Push-Channel Listener
//!
//! Maintains one live WebSocket subscription per topic and delivers
//! parsed messages over a channel. Two topics exist: a per-board topic
//! carrying card events, and a global topic announcing board creation.
//!
//! ## Connection behavior
//!
//! - Reconnects after a fixed delay whenever the transport drops.
//! - Sends a keep-alive ping on a fixed interval and answers server
//!   pings; a connection with no inbound traffic for two heartbeat
//!   intervals is treated as half-open and re-dialed.
//! - A frame that fails to parse is logged and dropped; the
//!   subscription itself survives.
//! - Shutdown is deterministic: the signal is raced against connect,
//!   read and the reconnect sleep, so no retry outlives the owning
//!   view.

mod subscription;

pub use subscription::{BoardSubscription, ConnectionState, GlobalSubscription, SubscriptionHandle};
