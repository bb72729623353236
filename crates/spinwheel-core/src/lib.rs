pub mod error;
pub mod resolve;
pub mod resolver;
pub mod scheduler;
pub mod session;
pub mod wheel;
