//! Reconciliation run: dispatcher, workers, and coordinator
//!
//! # Architecture
//!
//! ```text
//!                   ┌──────────────────────────┐
//!                   │       Reconciler          │
//!                   │  - owns the connection    │
//!                   │  - fetch / batch / flush  │
//!                   └──────┬─────────▲──────────┘
//!                 WorkItem │         │ ItemResult
//!        ┌─────────────────┼─────────┼────────────────┐
//!        │           ┌─────▼─────┐   │                │
//!        │           │ Worker 1..N│──┘                │
//!        │           │ filesystem │                   │
//!        │           │ resolution │                   │
//!        │           └────────────┘                   │
//!        └────────────────────────────────────────────┘
//! ```
//!
//! Workers only touch the filesystem; the coordinator alone touches the
//! database and the counters, so nothing here needs a lock beyond the
//! channels themselves.

pub mod coordinator;
pub mod dispatch;
pub mod worker;

pub use coordinator::{Reconciler, RunReport};
pub use dispatch::Dispatch;
pub use worker::Worker;
