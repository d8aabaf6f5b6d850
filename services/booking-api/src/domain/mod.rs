pub mod appointment;
pub mod directory;
pub mod user;

pub use appointment::*;
pub use directory::*;
pub use user::*;
