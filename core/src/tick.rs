use std::time::Duration;

use log::debug;
use rand_chacha::ChaCha8Rng;

use crate::{Event, ItemId, Money, RunStats, Typist, WordId, WordPool};

/// Currency credited for finished words.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RewardSchedule {
    per_character: Money,
}

impl RewardSchedule {
    /// Creates a schedule paying `per_character` for each character of a finished word.
    #[must_use]
    pub const fn new(per_character: Money) -> Self {
        Self { per_character }
    }

    /// Amount paid for each character of a finished word.
    #[must_use]
    pub const fn per_character(&self) -> Money {
        self.per_character
    }

    /// Reward for finishing a word of `total_chars` characters.
    #[must_use]
    pub fn reward_for(&self, total_chars: usize) -> Money {
        let chars = u64::try_from(total_chars).unwrap_or(u64::MAX);
        self.per_character.saturating_mul(chars)
    }
}

impl Default for RewardSchedule {
    fn default() -> Self {
        Self::new(Money::new(10))
    }
}

/// Outcome of typing one character into a word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    /// The word gained a character and still has more to type.
    Advanced,
    /// The word gained its final character.
    Completed,
    /// The word was already complete or does not exist; nothing changed.
    Overrun,
}

/// Types one character into `word` on behalf of `by`.
///
/// Completing the word credits the reward and records the completion.
pub fn progress_word(
    pool: &mut WordPool,
    stats: &mut RunStats,
    rewards: RewardSchedule,
    events: &mut Vec<Event>,
    word: WordId,
    by: Typist,
) -> Progress {
    let Some(entry) = pool.word_mut(word) else {
        debug!("{by:?} typed into unknown word {}", word.get());
        return Progress::Overrun;
    };

    if !entry.advance() {
        debug!("{by:?} typed into already complete word {}", word.get());
        return Progress::Overrun;
    }

    events.push(Event::WordAdvanced { word, by });
    if !entry.is_complete() {
        return Progress::Advanced;
    }

    let reward = rewards.reward_for(entry.total_chars());
    stats.credit(reward);
    stats.record_completion(by);
    events.push(Event::WordCompleted { word, by, reward });
    Progress::Completed
}

/// Everything an item may touch while it ticks.
#[derive(Debug)]
pub struct TickContext<'a> {
    now: Duration,
    pool: &'a mut WordPool,
    stats: &'a mut RunStats,
    rng: &'a mut ChaCha8Rng,
    rewards: RewardSchedule,
    events: &'a mut Vec<Event>,
}

impl<'a> TickContext<'a> {
    /// Bundles the level state lent to items for one tick pass.
    #[must_use]
    pub fn new(
        now: Duration,
        pool: &'a mut WordPool,
        stats: &'a mut RunStats,
        rng: &'a mut ChaCha8Rng,
        rewards: RewardSchedule,
        events: &'a mut Vec<Event>,
    ) -> Self {
        Self {
            now,
            pool,
            stats,
            rng,
            rewards,
            events,
        }
    }

    /// Simulated time of the current tick.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Read-only access to the word pool.
    #[must_use]
    pub fn pool(&self) -> &WordPool {
        self.pool
    }

    /// Read-only access to the run statistics.
    #[must_use]
    pub fn stats(&self) -> &RunStats {
        self.stats
    }

    /// Level random number generator shared by every item.
    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        self.rng
    }

    /// Claims `word` for `item`, reporting success.
    pub fn claim(&mut self, word: WordId, item: ItemId) -> bool {
        if !self.pool.try_claim(word, item) {
            return false;
        }
        self.events.push(Event::WordClaimed { word, item });
        true
    }

    /// Types one character into `word` on behalf of `by`.
    pub fn advance(&mut self, word: WordId, by: Typist) -> Progress {
        progress_word(self.pool, self.stats, self.rewards, self.events, word, by)
    }

    /// Counts characters typed by an item on a word it already held.
    pub fn add_garbage(&mut self, characters: u64) {
        self.stats.add_garbage(characters);
    }
}
