// Network adapter for the reference relay socket.

pub mod relay;

pub use relay::{roster_serializer, ws_handler};
