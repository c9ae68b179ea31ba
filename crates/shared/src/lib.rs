//! Shared types for the chirp client.
//!
//! Everything the backend microservices speak on the wire lives here:
//! REST models and request bodies, the response envelope, the realtime
//! chat event protocol, and the client-side error taxonomy.

pub mod error;
pub mod models;
pub mod realtime;

pub use error::*;
pub use models::*;
pub use realtime::*;
