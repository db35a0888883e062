#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Store system that prices catalog prototypes and moves purchases into the level.

use log::info;
use typer_core::{Event, Item, ItemId, ItemKind, Money, PurchaseError};
use typer_system_items::{catalog, WorkerTuning};
use typer_world::{self as world, query, GameLevel};

/// Display row describing one item for sale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Offer {
    /// Variant on offer.
    pub kind: ItemKind,
    /// Display name of the variant.
    pub name: &'static str,
    /// One-line description of the variant.
    pub description: &'static str,
    /// Current price.
    pub price: Money,
    /// Current price formatted for display.
    pub price_display: String,
    /// Indicates whether the run holds enough currency to buy it.
    pub affordable: bool,
}

/// Outcome of a successful purchase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Receipt {
    /// Variant that was bought.
    pub kind: ItemKind,
    /// Price that was deducted.
    pub price: Money,
    /// Identifier of the retained instance, if the purchase kept one.
    pub item: Option<ItemId>,
}

/// Purchase surface holding one long-lived prototype per item variant.
#[derive(Debug)]
pub struct Store {
    prototypes: Vec<Box<dyn Item>>,
}

impl Store {
    /// Creates a store selling the provided prototypes, in display order.
    #[must_use]
    pub fn new(prototypes: Vec<Box<dyn Item>>) -> Self {
        Self { prototypes }
    }

    /// Creates a store selling the standard catalog.
    #[must_use]
    pub fn with_catalog(tuning: WorkerTuning) -> Self {
        Self::new(catalog(tuning))
    }

    /// Refreshes every prototype against the level and lists it for sale.
    pub fn offers(&mut self, level: &GameLevel) -> Vec<Offer> {
        let run = query::run_view(level);
        let currency = run.stats().currency();
        self.prototypes
            .iter_mut()
            .map(|prototype| {
                prototype.reset(run);
                Offer {
                    kind: prototype.kind(),
                    name: prototype.name(),
                    description: prototype.description(),
                    price: prototype.price(),
                    price_display: prototype.price_display(),
                    affordable: currency >= prototype.price(),
                }
            })
            .collect()
    }

    /// Buys one item of `kind` for the level.
    ///
    /// On success the price is deducted, the purchase effect is applied, and a
    /// retained instance joins the level's item list. On failure nothing
    /// changes and a `PurchaseRejected` event is emitted.
    pub fn buy(
        &mut self,
        kind: ItemKind,
        level: &mut GameLevel,
        out_events: &mut Vec<Event>,
    ) -> Result<Receipt, PurchaseError> {
        let result = self.try_buy(kind, level);
        match &result {
            Ok(receipt) => {
                info!("bought {:?} for {}", receipt.kind, receipt.price);
                out_events.push(Event::ItemPurchased {
                    kind: receipt.kind,
                    item: receipt.item,
                    price: receipt.price,
                });
            }
            Err(reason) => {
                info!("purchase of {kind:?} rejected: {reason}");
                out_events.push(Event::PurchaseRejected {
                    kind,
                    reason: *reason,
                });
            }
        }
        result
    }

    fn try_buy(&mut self, kind: ItemKind, level: &mut GameLevel) -> Result<Receipt, PurchaseError> {
        let prototype = self
            .prototypes
            .iter_mut()
            .find(|prototype| prototype.kind() == kind)
            .ok_or(PurchaseError::UnknownItem { kind })?;

        prototype.reset(query::run_view(level));
        let price = prototype.price();
        world::spend(level, price)?;

        let item = world::apply_purchase(level, prototype.duplicate());
        Ok(Receipt { kind, price, item })
    }
}
