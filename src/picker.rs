//! Weighted option list, sampling, pick history and the state file.
pub mod error;
pub mod history;
pub mod item;
pub mod sampler;
pub mod seed;
pub mod store;
pub mod weighted_random;

pub use error::{PickError, PickResult};
pub use history::{History, HistoryEntry, DEFAULT_SHOW_LIMIT};
pub use item::{Item, Outcome, Registry};
pub use seed::Seed;
pub use store::{PersistedState, Store, DEFAULT_STATE_FILE};
