pub mod argon2;
pub mod errors;

pub use argon2::PasswordHasher;
pub use argon2::DEFAULT_WORK_FACTOR;
pub use errors::PasswordError;
