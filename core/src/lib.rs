#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the typer engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative game level, and the item and store systems. Adapters submit
//! [`Command`] values describing desired mutations, the level executes those
//! commands via its `apply` entry point, and then reports [`Event`] values
//! describing what changed. Items plug into the level through the [`Item`]
//! contract and only ever touch the word pool through a [`TickContext`].

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

mod item;
mod stats;
mod tick;
mod word;

pub use item::{Item, RunView};
pub use stats::RunStats;
pub use tick::{progress_word, Progress, RewardSchedule, TickContext};
pub use word::{Word, WordPool};

/// Commands that express all permissible game level mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time and ticks every owned item.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Replaces the word pool with a fresh set of words and resets owned items.
    StartRound {
        /// Texts of the words that make up the new pool, in selection order.
        words: Vec<String>,
    },
    /// Restarts the current pool with progress zeroed and resets owned items.
    RecycleRound,
    /// Marks the provided word as the one the human is actively typing.
    SetActiveWord {
        /// Word the human started typing.
        word: WordId,
    },
    /// Gives up on the active word and selects the next available one.
    AbandonActiveWord,
    /// Reports a character typed by the human.
    TypeCharacter {
        /// Character produced by the keyboard.
        character: char,
    },
}

/// Events broadcast by the game level and store after processing requests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces that a new round began with a freshly populated pool.
    RoundStarted {
        /// Sequential number of the round, starting at one.
        round: u32,
        /// Number of words placed in the pool.
        words: usize,
    },
    /// Announces that every word of the current round has been completed.
    RoundCleared {
        /// Sequential number of the round that was cleared.
        round: u32,
    },
    /// Reports that the human's active word changed.
    ActiveWordChanged {
        /// Word that became active, if any remained available.
        word: Option<WordId>,
    },
    /// Reports that a request to change the active word was refused.
    ActiveWordRejected {
        /// Word named in the request.
        word: WordId,
        /// Specific reason the request failed.
        reason: ActiveWordError,
    },
    /// Confirms that an item claimed an unclaimed word.
    WordClaimed {
        /// Word that was claimed.
        word: WordId,
        /// Item now typing the word.
        item: ItemId,
    },
    /// Confirms that a word gained one completed character.
    WordAdvanced {
        /// Word that advanced.
        word: WordId,
        /// Typist responsible for the character.
        by: Typist,
    },
    /// Confirms that a word reached its full length.
    WordCompleted {
        /// Word that was completed.
        word: WordId,
        /// Typist that produced the final character.
        by: Typist,
        /// Currency credited for the completion.
        reward: Money,
    },
    /// Reports a typed character that did not match the active word.
    Mistyped {
        /// Character the active word expected, if a word was active.
        expected: Option<char>,
        /// Character that was typed.
        typed: char,
    },
    /// Confirms a completed purchase.
    ItemPurchased {
        /// Kind of item that was bought.
        kind: ItemKind,
        /// Identifier assigned to the retained instance, if one was kept.
        item: Option<ItemId>,
        /// Price deducted from the run's currency.
        price: Money,
    },
    /// Reports that a purchase request was refused.
    PurchaseRejected {
        /// Kind of item requested.
        kind: ItemKind,
        /// Specific reason the purchase failed.
        reason: PurchaseError,
    },
}

/// Unique identifier assigned to an owned item within a run.
///
/// Identifiers start at one and are stored on words as claim markers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(u32);

impl ItemId {
    /// Creates a new item identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Position of a word inside the pool of the current round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WordId(u32);

impl WordId {
    /// Creates a new word identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Index of the word inside its pool.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Who produced a character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Typist {
    /// The human at the keyboard.
    Human,
    /// An owned item identified by its id.
    Item(ItemId),
}

/// Item variants offered by the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemKind {
    /// Background worker that claims and types words on a wake timer.
    GoroutineWorker,
    /// Global upgrade that shortens every worker's wait.
    CpuUpgrade,
}

/// Amount of in-game currency.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Money(u64);

impl Money {
    /// No currency at all.
    pub const ZERO: Self = Self(0);

    /// Wraps a raw currency amount.
    #[must_use]
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// Retrieves the raw currency amount.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Adds two amounts, clamping at the numeric ceiling.
    #[must_use]
    pub const fn saturating_add(self, other: Money) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Scales the amount, clamping at the numeric ceiling.
    #[must_use]
    pub const fn saturating_mul(self, factor: u64) -> Self {
        Self(self.0.saturating_mul(factor))
    }

    /// Subtracts `other`, returning `None` when the result would be negative.
    #[must_use]
    pub fn checked_sub(self, other: Money) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

/// Reasons a purchase request may be refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error)]
pub enum PurchaseError {
    /// The run does not hold enough currency to cover the price.
    #[error("insufficient funds: price {price}, available {available}")]
    InsufficientFunds {
        /// Price of the requested item.
        price: Money,
        /// Currency available when the purchase was attempted.
        available: Money,
    },
    /// The store's catalog holds no prototype for the requested kind.
    #[error("no catalog entry for {kind:?}")]
    UnknownItem {
        /// Kind that was requested.
        kind: ItemKind,
    },
}

/// Reasons a request to change the active word may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActiveWordError {
    /// No word with the provided identifier exists in the current pool.
    UnknownWord,
    /// The word has already been completed.
    AlreadyComplete,
}
