pub mod api_error;
pub mod directory_error;

pub use api_error::ApiError;
pub use directory_error::DirectoryError;
