//! chanrpc: in-process request/response sessions over typed channels.
//!
//! A client binding and a per-session handler loop share a bidirectional
//! channel pair; requests and responses cross it as JSON text in strict
//! alternation (one outstanding call per session). [`SessionServer::connect`]
//! opens a session and spawns its handler loop.

pub mod client;
pub mod protocol;
pub mod server;
pub mod transport;

pub use client::{CallError, Client};
pub use protocol::{ClientFrame, Request, Response};
pub use server::{Handler, SessionServer};
