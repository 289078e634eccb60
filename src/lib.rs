//! Kanban Client - Main Library
//!
//! Client-side synchronization engine for a collaborative Kanban board.
//! The engine keeps one board in memory, applies local mutations
//! optimistically before the server confirms them, and merges change
//! notifications pushed by the server from other clients.
//!
//! # Module Structure
//!
//! The library is organized into two main modules:
//!
//! - **`shared`** - Types matching the server's wire format
//!   - Board, list and card structures
//!   - Push-channel update messages
//!   - Error types and configuration
//!
//! - **`client`** - The synchronization engine
//!   - Board snapshot store with optimistic mutation and rollback
//!   - WebSocket push-channel listener with reconnect and keep-alives
//!   - Per-board page controller (the reconciler) and the dashboard
//!     controller for board-level announcements
//!   - Thin REST client used as the confirming persistence path
//!
//! # Data Flow
//!
//! A user action mutates the board snapshot synchronously, then the
//! confirming network call persists the change in the background. On
//! success nothing further happens (or the local placeholder is
//! normalized from the server response); on failure the board rolls
//! back to the pre-mutation snapshot. Concurrently the push channel
//! delivers events from other clients, which the page controller
//! applies through the same store operations, last writer wins.
//!
//! # Thread Safety
//!
//! The store is an owned, single-threaded resource: every mutation is a
//! synchronous `&mut self` call, so interleaving only happens between
//! `await` points. The push-channel listener runs as a background task
//! and hands frames over through a channel; it never touches the store
//! directly.

/// Types matching the server's wire format
pub mod shared;

/// The client-side synchronization engine
pub mod client;
