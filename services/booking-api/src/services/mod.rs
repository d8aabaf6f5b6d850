pub mod appointment_service;
pub mod identity_service;
pub mod token_cache;

pub use appointment_service::AppointmentService;
pub use identity_service::IdentityService;
pub use token_cache::TokenCache;
