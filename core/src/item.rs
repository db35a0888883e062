use std::fmt;

use crate::{ItemId, ItemKind, Money, RunStats, TickContext, WordId};

/// Purchasable agent that lives in the game level's item list.
///
/// The catalog keeps one prototype per variant. Purchasing resets the
/// prototype, duplicates it, runs [`Item::purchase`] on the duplicate, and
/// keeps the duplicate only when `purchase` returns `true`.
pub trait Item: fmt::Debug {
    /// Variant of the item.
    fn kind(&self) -> ItemKind;

    /// Display name.
    fn name(&self) -> &'static str;

    /// One-line display description.
    fn description(&self) -> &'static str;

    /// Price computed by the most recent [`Item::reset`].
    fn price(&self) -> Money;

    /// Price formatted for display.
    fn price_display(&self) -> String {
        self.price().to_string()
    }

    /// Identifier assigned when the item joined the level, if it has.
    fn id(&self) -> Option<ItemId>;

    /// Assigns the identifier used as a claim marker on words.
    fn set_id(&mut self, id: ItemId);

    /// Word the item currently holds a claim on.
    fn claimed_word(&self) -> Option<WordId> {
        None
    }

    /// Recomputes price and cached run-dependent fields.
    ///
    /// Calling it twice with an unchanged view yields the same state.
    fn reset(&mut self, run: RunView<'_>);

    /// Advances the item's state machine by one frame.
    fn tick(&mut self, ctx: &mut TickContext<'_>);

    /// Applies the purchase-time effect.
    ///
    /// Returns `true` when the purchased instance should be kept in the
    /// level's item list, `false` when the effect was global.
    fn purchase(&mut self, stats: &mut RunStats) -> bool;

    /// Produces an independent copy sharing no mutable state.
    fn duplicate(&self) -> Box<dyn Item>;
}

/// Read-only view of the run used by [`Item::reset`].
#[derive(Clone, Copy, Debug)]
pub struct RunView<'a> {
    stats: &'a RunStats,
    owned: &'a [Box<dyn Item>],
}

impl<'a> RunView<'a> {
    /// Captures statistics and the owned-item list.
    #[must_use]
    pub const fn new(stats: &'a RunStats, owned: &'a [Box<dyn Item>]) -> Self {
        Self { stats, owned }
    }

    /// Statistics of the current run.
    #[must_use]
    pub const fn stats(&self) -> &'a RunStats {
        self.stats
    }

    /// Items owned by the level, in tick order.
    #[must_use]
    pub const fn owned(&self) -> &'a [Box<dyn Item>] {
        self.owned
    }

    /// Number of owned items of the provided kind.
    #[must_use]
    pub fn owned_of(&self, kind: ItemKind) -> usize {
        self.owned.iter().filter(|item| item.kind() == kind).count()
    }
}
