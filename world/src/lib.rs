#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game level state for the typer engine.
//!
//! The level owns the word pool, the human's active word, the owned items and
//! the run statistics. Every mutation goes through [`apply`]; the store uses
//! [`spend`] and [`apply_purchase`] to move purchased items into the level.

use std::time::Duration;

use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use typer_core::{
    progress_word, ActiveWordError, Command, Event, Item, ItemId, Money, Progress, PurchaseError,
    RewardSchedule, RunStats, RunView, TickContext, Typist, Word, WordId, WordPool,
};

/// What happens to claim markers when a round's words are recycled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerPolicy {
    /// Markers are wiped so recycled words can be claimed again.
    #[default]
    Clear,
    /// Markers survive, leaving previously claimed words out of reach of items.
    Retain,
}

/// Configuration parameters required to construct a game level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelConfig {
    seed: u64,
    starting_currency: Money,
    rewards: RewardSchedule,
    marker_policy: MarkerPolicy,
}

impl LevelConfig {
    /// Creates a configuration from its parts.
    #[must_use]
    pub const fn new(
        seed: u64,
        starting_currency: Money,
        rewards: RewardSchedule,
        marker_policy: MarkerPolicy,
    ) -> Self {
        Self {
            seed,
            starting_currency,
            rewards,
            marker_policy,
        }
    }

    /// Replaces the currency the run starts with.
    #[must_use]
    pub const fn with_starting_currency(mut self, starting_currency: Money) -> Self {
        self.starting_currency = starting_currency;
        self
    }

    /// Replaces the recycle policy for claim markers.
    #[must_use]
    pub const fn with_marker_policy(mut self, marker_policy: MarkerPolicy) -> Self {
        self.marker_policy = marker_policy;
        self
    }
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self::new(0, Money::ZERO, RewardSchedule::default(), MarkerPolicy::Clear)
    }
}

/// Represents the live round: words, owned items and run statistics.
#[derive(Debug)]
pub struct GameLevel {
    pool: WordPool,
    items: Vec<Box<dyn Item>>,
    stats: RunStats,
    rng: ChaCha8Rng,
    rewards: RewardSchedule,
    marker_policy: MarkerPolicy,
    now: Duration,
    next_item_id: u32,
    round: u32,
    round_cleared: bool,
}

impl GameLevel {
    /// Creates an empty level; call [`Command::StartRound`] to populate it.
    #[must_use]
    pub fn new(config: LevelConfig) -> Self {
        Self {
            pool: WordPool::default(),
            items: Vec::new(),
            stats: RunStats::new(config.starting_currency),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            rewards: config.rewards,
            marker_policy: config.marker_policy,
            now: Duration::ZERO,
            next_item_id: 1,
            round: 0,
            round_cleared: false,
        }
    }

    fn begin_round(&mut self, out_events: &mut Vec<Event>) {
        self.round = self.round.saturating_add(1);
        self.round_cleared = false;
        self.reset_items();
        info!(
            "round {} started with {} words",
            self.round,
            self.pool.len()
        );
        out_events.push(Event::RoundStarted {
            round: self.round,
            words: self.pool.len(),
        });

        let first = self.pool.first_available(None, &self.held_words());
        self.pool.set_active(first);
        out_events.push(Event::ActiveWordChanged { word: first });
    }

    fn reset_items(&mut self) {
        for index in 0..self.items.len() {
            let mut item = self.items.remove(index);
            item.reset(RunView::new(&self.stats, &self.items));
            self.items.insert(index, item);
        }
    }

    fn tick_items(&mut self, out_events: &mut Vec<Event>) {
        let mut ctx = TickContext::new(
            self.now,
            &mut self.pool,
            &mut self.stats,
            &mut self.rng,
            self.rewards,
            out_events,
        );
        for item in self.items.iter_mut() {
            item.tick(&mut ctx);
        }
    }

    fn held_words(&self) -> Vec<WordId> {
        self.items
            .iter()
            .filter_map(|item| item.claimed_word())
            .collect()
    }

    /// Picks the human's next word; `excluding` is only chosen when nothing else is free.
    fn select_next_active(&mut self, excluding: Option<WordId>, out_events: &mut Vec<Event>) {
        let held = self.held_words();
        let next = self.pool.first_available(excluding, &held).or_else(|| {
            excluding.filter(|word| {
                !held.contains(word)
                    && self
                        .pool
                        .word(*word)
                        .map_or(false, |entry| !entry.is_complete())
            })
        });
        if next != self.pool.active() {
            self.pool.set_active(next);
            out_events.push(Event::ActiveWordChanged { word: next });
        }
    }

    fn refresh_active_after_progress(&mut self, out_events: &mut Vec<Event>) {
        let needs_word = self.pool.active().map_or(true, |active| {
            self.pool.word(active).map_or(true, Word::is_complete)
        });
        if needs_word {
            self.select_next_active(None, out_events);
        }
    }

    fn detect_round_cleared(&mut self, out_events: &mut Vec<Event>) {
        if self.round_cleared || !self.pool.is_cleared() {
            return;
        }
        self.round_cleared = true;
        info!("round {} cleared", self.round);
        out_events.push(Event::RoundCleared { round: self.round });
    }

    fn type_character(&mut self, character: char, out_events: &mut Vec<Event>) {
        let active = self.pool.active();
        let expected = active
            .and_then(|word| self.pool.word(word))
            .and_then(Word::next_char);

        let (Some(word), Some(next)) = (active, expected) else {
            out_events.push(Event::Mistyped {
                expected: None,
                typed: character,
            });
            return;
        };

        if next != character {
            out_events.push(Event::Mistyped {
                expected: Some(next),
                typed: character,
            });
            return;
        }

        let progress = progress_word(
            &mut self.pool,
            &mut self.stats,
            self.rewards,
            out_events,
            word,
            Typist::Human,
        );
        if progress == Progress::Completed {
            self.select_next_active(None, out_events);
            self.detect_round_cleared(out_events);
        }
    }

    fn recycle_words(&mut self) {
        let clear_markers = self.marker_policy == MarkerPolicy::Clear;
        for word in self.pool.words_mut() {
            word.restart();
            if clear_markers {
                word.set_claimed_by(None);
            }
        }
        self.pool.set_active(None);
    }
}

/// Applies the provided command to the level, mutating state deterministically.
pub fn apply(level: &mut GameLevel, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => {
            level.now = level.now.saturating_add(dt);
            out_events.push(Event::TimeAdvanced { dt });
            level.tick_items(out_events);
            level.refresh_active_after_progress(out_events);
            level.detect_round_cleared(out_events);
        }
        Command::StartRound { words } => {
            level.pool = WordPool::new(words);
            level.begin_round(out_events);
        }
        Command::RecycleRound => {
            level.recycle_words();
            level.begin_round(out_events);
        }
        Command::SetActiveWord { word } => {
            let reason = match level.pool.word(word) {
                None => Some(ActiveWordError::UnknownWord),
                Some(entry) if entry.is_complete() => Some(ActiveWordError::AlreadyComplete),
                Some(_) => None,
            };
            if let Some(reason) = reason {
                debug!("rejected active word {}: {reason:?}", word.get());
                out_events.push(Event::ActiveWordRejected { word, reason });
            } else if level.pool.active() != Some(word) {
                level.pool.set_active(Some(word));
                out_events.push(Event::ActiveWordChanged { word: Some(word) });
            }
        }
        Command::AbandonActiveWord => {
            let abandoned = level.pool.active();
            level.select_next_active(abandoned, out_events);
        }
        Command::TypeCharacter { character } => level.type_character(character, out_events),
    }
}

/// Deducts `price` from the run's currency.
pub fn spend(level: &mut GameLevel, price: Money) -> Result<(), PurchaseError> {
    level.stats.spend(price)
}

/// Runs the purchase effect of a freshly duplicated item.
///
/// Items that ask to be kept receive the next sequential identifier and join
/// the end of the tick order; the identifier is returned. Items whose effect
/// was global are dropped and `None` is returned.
pub fn apply_purchase(level: &mut GameLevel, mut item: Box<dyn Item>) -> Option<ItemId> {
    if !item.purchase(&mut level.stats) {
        debug!("{} applied a global effect", item.name());
        return None;
    }

    let id = ItemId::new(level.next_item_id);
    level.next_item_id = level.next_item_id.saturating_add(1);
    item.set_id(id);
    level.items.push(item);
    Some(id)
}

/// Query functions that provide read-only access to the level state.
pub mod query {
    use std::time::Duration;

    use super::GameLevel;
    use typer_core::{Item, RunStats, RunView, Word, WordId, WordPool};

    /// Provides read-only access to the run statistics.
    #[must_use]
    pub fn stats(level: &GameLevel) -> &RunStats {
        &level.stats
    }

    /// Provides read-only access to the word pool.
    #[must_use]
    pub fn pool(level: &GameLevel) -> &WordPool {
        &level.pool
    }

    /// Words of the current round in pool order.
    #[must_use]
    pub fn words(level: &GameLevel) -> &[Word] {
        level.pool.words()
    }

    /// Word the human is typing, if any.
    #[must_use]
    pub fn active_word(level: &GameLevel) -> Option<WordId> {
        level.pool.active()
    }

    /// Owned items in tick order.
    #[must_use]
    pub fn items(level: &GameLevel) -> &[Box<dyn Item>] {
        &level.items
    }

    /// View used to reset catalog prototypes against the current run.
    #[must_use]
    pub fn run_view(level: &GameLevel) -> RunView<'_> {
        RunView::new(&level.stats, &level.items)
    }

    /// Simulated time elapsed since the level was created.
    #[must_use]
    pub fn now(level: &GameLevel) -> Duration {
        level.now
    }

    /// Sequential number of the current round; zero before the first round.
    #[must_use]
    pub fn round(level: &GameLevel) -> u32 {
        level.round
    }

    /// Reports whether every word of the current round is complete.
    #[must_use]
    pub fn is_round_cleared(level: &GameLevel) -> bool {
        level.round_cleared
    }
}
