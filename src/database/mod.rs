pub mod manager;
pub mod memory;
pub mod order;
pub mod postgres;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryPageStore;
pub use order::{PageColumn, PageOrder, SortDirection};
pub use postgres::PgPageStore;
pub use store::{PageStore, ReplaceOutcome};
