//! Process-local adapters.

mod user_store;

pub use user_store::InMemoryUserStore;
