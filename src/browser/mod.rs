pub mod pool;
pub mod session;

// Re-export the main types for easy importing
pub use pool::{create_session_pool, pool_size, SessionManager, SessionPool};
