pub mod scoreboard;
pub mod store;

pub use scoreboard::ScoreBoard;
pub use store::{FileRecordStore, MemoryRecordStore, RECORD_KEY, RecordStore};
