//! Bundled interceptors

pub mod thread_blocked;

pub use thread_blocked::{parse_blocked_thread, ThreadBlockedInterceptor};
