// Interface adapters: wire protocol, relay socket, backend clients and the
// console front end.

pub mod clients;
pub mod console;
pub mod net;
pub mod protocol;
pub mod state;
pub mod utils;
