/*
* Re-export submodules for logging, routing, and the server itself.
*/

pub mod logging;
pub mod routing;
pub mod server;
