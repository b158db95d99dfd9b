pub mod domain;
pub mod frameworks;
pub mod interface_adapters;
pub mod use_cases;

pub use frameworks::client::run as run_client;
pub use frameworks::config::relay_port;
pub use frameworks::relay::run as run_relay;
