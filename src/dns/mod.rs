//! Asynchronous PTR query engine: wire-format helpers, an IDNA decode
//! cache, and the concurrency-bounded batch runner.

mod idna_cache;
mod message;
mod ptr_batch;

pub use idna_cache::short_hostname;
pub use message::Reply;
pub use ptr_batch::{PTRBatch, PtrTransport, UdpPtrTransport};
