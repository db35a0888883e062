use typer_core::{Item, ItemId, ItemKind, Money, RunStats, RunView, TickContext};

const PRICE_STEP: Money = Money::new(2000);

/// Global upgrade that divides every worker's wait by the upgrade multiplier.
///
/// Buying one bumps the run's upgrade counter; no instance is kept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CpuUpgrade {
    id: Option<ItemId>,
    price: Money,
}

impl CpuUpgrade {
    /// Creates a prototype priced for a run without upgrades.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            id: None,
            price: PRICE_STEP,
        }
    }
}

impl Default for CpuUpgrade {
    fn default() -> Self {
        Self::new()
    }
}

impl Item for CpuUpgrade {
    fn kind(&self) -> ItemKind {
        ItemKind::CpuUpgrade
    }

    fn name(&self) -> &'static str {
        "CPU Upgrade"
    }

    fn description(&self) -> &'static str {
        "Make your goroutines go faster"
    }

    fn price(&self) -> Money {
        self.price
    }

    fn id(&self) -> Option<ItemId> {
        self.id
    }

    fn set_id(&mut self, id: ItemId) {
        self.id = Some(id);
    }

    fn reset(&mut self, run: RunView<'_>) {
        let level = u64::from(run.stats().cpu_upgrades());
        self.price = PRICE_STEP.saturating_mul(level.saturating_add(1));
    }

    fn tick(&mut self, _ctx: &mut TickContext<'_>) {}

    fn purchase(&mut self, stats: &mut RunStats) -> bool {
        stats.add_cpu_upgrade();
        false
    }

    fn duplicate(&self) -> Box<dyn Item> {
        Box::new(self.clone())
    }
}
