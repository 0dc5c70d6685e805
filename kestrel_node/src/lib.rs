// kestrel_node/src/lib.rs

//! Runtime shell around `kestrel_core`: the single-threaded event loop,
//! the periodic pose publisher, config loading and logging. The transport
//! that feeds events in and carries poses out is deliberately not part of
//! this crate; it talks to the node through channel endpoints.

pub mod config;
pub mod node;
