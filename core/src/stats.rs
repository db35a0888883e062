use serde::{Deserialize, Serialize};

use crate::{Money, PurchaseError, Typist};

/// Counters that live for a whole run and feed pricing and display.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    currency: Money,
    earned: Money,
    spent: Money,
    garbage: u64,
    cpu_upgrades: u32,
    human_words: u32,
    item_words: u32,
}

impl RunStats {
    /// Creates statistics for a fresh run holding `starting_currency`.
    #[must_use]
    pub fn new(starting_currency: Money) -> Self {
        Self {
            currency: starting_currency,
            ..Self::default()
        }
    }

    /// Currency currently available for purchases.
    #[must_use]
    pub const fn currency(&self) -> Money {
        self.currency
    }

    /// Total currency credited by completed words.
    #[must_use]
    pub const fn earned(&self) -> Money {
        self.earned
    }

    /// Total currency spent in the store.
    #[must_use]
    pub const fn spent(&self) -> Money {
        self.spent
    }

    /// Characters typed by items while holding a claim.
    #[must_use]
    pub const fn garbage(&self) -> u64 {
        self.garbage
    }

    /// Number of CPU upgrades purchased.
    #[must_use]
    pub const fn cpu_upgrades(&self) -> u32 {
        self.cpu_upgrades
    }

    /// Divisor applied to worker waits: one plus the purchased upgrades.
    #[must_use]
    pub const fn cpu_multiplier(&self) -> u32 {
        self.cpu_upgrades.saturating_add(1)
    }

    /// Words finished by the human.
    #[must_use]
    pub const fn human_words(&self) -> u32 {
        self.human_words
    }

    /// Words finished by items.
    #[must_use]
    pub const fn item_words(&self) -> u32 {
        self.item_words
    }

    /// Deducts `price` from the balance, or reports the shortfall untouched.
    pub fn spend(&mut self, price: Money) -> Result<(), PurchaseError> {
        let remaining =
            self.currency
                .checked_sub(price)
                .ok_or(PurchaseError::InsufficientFunds {
                    price,
                    available: self.currency,
                })?;
        self.currency = remaining;
        self.spent = self.spent.saturating_add(price);
        Ok(())
    }

    /// Adds earned currency to the balance.
    pub fn credit(&mut self, amount: Money) {
        self.currency = self.currency.saturating_add(amount);
        self.earned = self.earned.saturating_add(amount);
    }

    /// Counts characters typed by items on claimed words.
    pub fn add_garbage(&mut self, characters: u64) {
        self.garbage = self.garbage.saturating_add(characters);
    }

    /// Records one more purchased CPU upgrade.
    pub fn add_cpu_upgrade(&mut self) {
        self.cpu_upgrades = self.cpu_upgrades.saturating_add(1);
    }

    /// Records a finished word against the typist that finished it.
    pub fn record_completion(&mut self, by: Typist) {
        match by {
            Typist::Human => self.human_words = self.human_words.saturating_add(1),
            Typist::Item(_) => self.item_words = self.item_words.saturating_add(1),
        }
    }
}
