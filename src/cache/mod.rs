// Cache module for session-scoped caching.
// Stores the fetched project list under one key with a time-to-live.

pub mod clock;
pub mod paths;
pub mod projects;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use paths::{DEFAULT_SESSION, session_path};
pub use projects::{CacheEntry, ProjectsCache};
pub use store::{FileStore, MemoryStore, SessionStore};
