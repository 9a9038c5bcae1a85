use anyhow::Result;
use tracing::{info, warn};

use super::store::RecordStore;

/// Tracks the all-time best score and writes it through to a store
pub struct ScoreBoard<S: RecordStore> {
    store: S,
    record: u32,
    beat_record: bool,
    pub games_played: u32,
}

impl<S: RecordStore> ScoreBoard<S> {
    /// Read the stored record; anything missing or unreadable counts as zero
    pub fn open(store: S) -> Self {
        let record = match store.load() {
            Ok(record) => record.unwrap_or(0),
            Err(err) => {
                warn!(?err, "could not read the stored record, starting from zero");
                0
            }
        };

        Self {
            store,
            record,
            beat_record: false,
            games_played: 0,
        }
    }

    pub fn record(&self) -> u32 {
        self.record
    }

    /// Whether the most recent game set a new record
    pub fn beat_record(&self) -> bool {
        self.beat_record
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn on_game_start(&mut self) {
        self.beat_record = false;
    }

    /// Settle a finished game.
    ///
    /// The record only moves when `final_score` is strictly higher. The new
    /// value is kept in memory even if persisting it fails.
    pub fn on_game_over(&mut self, final_score: u32) -> Result<bool> {
        self.games_played += 1;

        if final_score <= self.record {
            self.beat_record = false;
            return Ok(false);
        }

        info!(previous = self.record, record = final_score, "new record");
        self.record = final_score;
        self.beat_record = true;
        self.store.save(final_score)?;
        Ok(true)
    }
}
