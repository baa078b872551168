// Storage adapters for the collaborator ports
//
// - memory: RwLock-guarded vectors, for tests and embedding callers
// - sqlite: WAL-mode SQLite file, used by the CLI

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
