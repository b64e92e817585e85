pub mod claims;
pub mod errors;
pub mod service;

pub use claims::Claims;
pub use claims::TokenPayload;
pub use errors::InvalidTokenReason;
pub use errors::JwtError;
pub use service::TokenService;
