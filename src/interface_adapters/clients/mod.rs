pub mod relay;
pub mod save;
