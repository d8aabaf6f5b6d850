pub mod catch_panic;
pub mod request_log;

pub use catch_panic::panic_responder;
pub use request_log::request_logging_middleware;
