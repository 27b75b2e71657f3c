//! User storage: the `UserStore` seam, its PostgreSQL implementation, and an in-process one.

mod memory;
mod pool;
mod repositories;

pub use memory::MemoryUserStore;
pub use pool::{create_pool, run_migrations, DbPool};
pub use repositories::*;
