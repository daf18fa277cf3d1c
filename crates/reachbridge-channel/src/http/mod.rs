//! HTTP surface of the command channel.

pub mod handlers;
pub mod routes;

pub use routes::create_router;
