//! HTTP gateway: health, translation and speech transcription endpoints.

mod error;
mod handlers;
mod router;
mod server;

pub use error::GatewayError;
pub use server::GatewayServer;
