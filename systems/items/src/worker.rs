use std::time::Duration;

use log::{debug, trace};
use rand::Rng;
use typer_core::{
    Item, ItemId, ItemKind, Money, Progress, RunStats, RunView, TickContext, Typist, WordId,
};

use crate::WorkerTuning;

const BASE_PRICE: Money = Money::new(1000);

/// Background typist that wakes on a timer, claims a word, and types it one
/// character per wake.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GoroutineWorker {
    id: Option<ItemId>,
    price: Money,
    base_wait: Duration,
    jitter_range: Duration,
    cpu_multiplier: u32,
    wake_at: Option<Duration>,
    claimed: Option<WordId>,
}

impl GoroutineWorker {
    /// Creates an unpriced prototype that wakes on its first tick.
    #[must_use]
    pub fn new(tuning: WorkerTuning) -> Self {
        Self {
            id: None,
            price: BASE_PRICE,
            base_wait: tuning.base_wait(),
            jitter_range: tuning.jitter_range(),
            cpu_multiplier: 1,
            wake_at: None,
            claimed: None,
        }
    }

    /// Wait between wakes before jitter, with CPU upgrades applied.
    #[must_use]
    pub fn effective_wait(&self) -> Duration {
        self.base_wait / self.cpu_multiplier.max(1)
    }

    /// Simulated time of the next wake; `None` means the next tick.
    #[must_use]
    pub const fn wake_at(&self) -> Option<Duration> {
        self.wake_at
    }

    /// CPU multiplier cached by the last reset.
    #[must_use]
    pub const fn cpu_multiplier(&self) -> u32 {
        self.cpu_multiplier
    }

    fn is_sleeping(&self, now: Duration) -> bool {
        self.wake_at.map_or(false, |wake_at| now < wake_at)
    }

    fn sleep<R: Rng>(&mut self, now: Duration, rng: &mut R) {
        let jitter = jitter(self.jitter_range, rng);
        self.wake_at = Some(
            now.saturating_add(self.effective_wait())
                .saturating_add(jitter),
        );
    }

    fn claim_and_type(&mut self, id: ItemId, ctx: &mut TickContext<'_>) {
        let eligible = ctx.pool().eligible_for_claim();
        if eligible.is_empty() {
            trace!("worker {} found no word to claim", id.get());
            return;
        }

        let word = eligible[ctx.rng().gen_range(0..eligible.len())];
        if !ctx.claim(word, id) {
            return;
        }

        debug!("worker {} claimed word {}", id.get(), word.get());
        self.claimed = Some(word);
        if ctx.advance(word, Typist::Item(id)) != Progress::Advanced {
            self.claimed = None;
        }
    }

    fn keep_typing(&mut self, id: ItemId, word: WordId, ctx: &mut TickContext<'_>) {
        match ctx.advance(word, Typist::Item(id)) {
            Progress::Advanced => ctx.add_garbage(1),
            Progress::Completed => {
                ctx.add_garbage(1);
                self.claimed = None;
            }
            Progress::Overrun => {
                debug!(
                    "worker {} released stale claim on word {}",
                    id.get(),
                    word.get()
                );
                self.claimed = None;
            }
        }
    }
}

impl Item for GoroutineWorker {
    fn kind(&self) -> ItemKind {
        ItemKind::GoroutineWorker
    }

    fn name(&self) -> &'static str {
        "Goroutine"
    }

    fn description(&self) -> &'static str {
        "Add a goroutine to help type words for you"
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

    fn claimed_word(&self) -> Option<WordId> {
        self.claimed
    }

    fn reset(&mut self, run: RunView<'_>) {
        self.claimed = None;
        self.cpu_multiplier = run.stats().cpu_multiplier();
        let owned = u32::try_from(run.owned_of(ItemKind::GoroutineWorker)).unwrap_or(u32::MAX);
        let factor = 2u64.checked_pow(owned).unwrap_or(u64::MAX);
        self.price = BASE_PRICE.saturating_mul(factor);
    }

    fn tick(&mut self, ctx: &mut TickContext<'_>) {
        let Some(id) = self.id else {
            return;
        };
        let now = ctx.now();
        if self.is_sleeping(now) {
            return;
        }

        match self.claimed {
            None => self.claim_and_type(id, ctx),
            Some(word) => self.keep_typing(id, word, ctx),
        }

        self.sleep(now, ctx.rng());
    }

    fn purchase(&mut self, _stats: &mut RunStats) -> bool {
        true
    }

    fn duplicate(&self) -> Box<dyn Item> {
        Box::new(self.clone())
    }
}

/// Uniform delay in `[0, range)`; a zero range adds nothing.
fn jitter<R: Rng>(range: Duration, rng: &mut R) -> Duration {
    let nanos = u64::try_from(range.as_nanos()).unwrap_or(u64::MAX);
    if nanos == 0 {
        return Duration::ZERO;
    }
    Duration::from_nanos(rng.gen_range(0..nanos))
}
