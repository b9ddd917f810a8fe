pub mod claims;
pub mod errors;
pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use errors::AuthError;
