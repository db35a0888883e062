//! Headless driver that plays the game with a scripted typist and shopper.

use std::time::Duration;

use log::{debug, info};
use serde::Serialize;
use typer_core::{Command, Event, ItemKind, RunStats, Word};
use typer_system_lexicon::Lexicon;
use typer_system_store::Store;
use typer_world::{self as world, query, GameLevel};

use crate::config::Config;

/// Final state of a headless run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct Summary {
    pub(crate) frames: u32,
    pub(crate) elapsed_ms: u64,
    pub(crate) rounds: u32,
    pub(crate) mistypes: u32,
    pub(crate) stats: RunStats,
    pub(crate) purchases: Vec<PurchaseRecord>,
    pub(crate) items: Vec<ItemRecord>,
    pub(crate) words: Vec<WordRecord>,
}

/// One completed purchase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct PurchaseRecord {
    pub(crate) frame: u32,
    pub(crate) kind: ItemKind,
    pub(crate) price: u64,
}

/// One owned item at the end of the run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct ItemRecord {
    pub(crate) id: Option<u32>,
    pub(crate) name: &'static str,
    pub(crate) claimed_word: Option<u32>,
}

/// One word of the final round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct WordRecord {
    pub(crate) text: String,
    pub(crate) percent: u8,
    pub(crate) claimed_by: Option<u32>,
    pub(crate) active: bool,
}

/// Plays `config.simulation.frames` frames and reports the outcome.
pub(crate) fn run(config: &Config) -> Summary {
    let mut level = GameLevel::new(config.level_config());
    let mut store = Store::with_catalog(config.worker_tuning());
    let mut lexicon = Lexicon::builtin(config.round.seed);
    let dt = config.frame_duration();
    let typing_interval = config.simulation.typing_interval_frames;

    let mut events = Vec::new();
    let mut purchases = Vec::new();
    let mut mistypes = 0u32;

    info!(
        "simulating {} frames with seed {:#x}",
        config.simulation.frames, config.round.seed
    );
    start_round(&mut level, &mut lexicon, config.round.pool_size, &mut events);

    for frame in 0..config.simulation.frames {
        events.clear();

        if typing_interval > 0 && frame % typing_interval == 0 {
            type_next_character(&mut level, &mut events);
        }

        if let Some(kind) = cheapest_affordable(&mut store, &level) {
            if let Ok(receipt) = store.buy(kind, &mut level, &mut events) {
                purchases.push(PurchaseRecord {
                    frame,
                    kind: receipt.kind,
                    price: receipt.price.get(),
                });
            }
        }

        world::apply(&mut level, Command::Tick { dt }, &mut events);

        mistypes += count_mistypes(&events);
        if events
            .iter()
            .any(|event| matches!(event, Event::RoundCleared { .. }))
        {
            start_round(&mut level, &mut lexicon, config.round.pool_size, &mut events);
        }
    }

    summarize(&level, config.simulation.frames, dt, mistypes, purchases)
}

fn start_round(
    level: &mut GameLevel,
    lexicon: &mut Lexicon,
    pool_size: usize,
    events: &mut Vec<Event>,
) {
    let words = lexicon.draw(pool_size);
    world::apply(level, Command::StartRound { words }, events);
}

fn type_next_character(level: &mut GameLevel, events: &mut Vec<Event>) {
    let next = query::active_word(level)
        .and_then(|word| query::pool(level).word(word))
        .and_then(Word::next_char);
    if let Some(character) = next {
        world::apply(level, Command::TypeCharacter { character }, events);
    } else {
        debug!("typist idle: no active word");
    }
}

fn cheapest_affordable(store: &mut Store, level: &GameLevel) -> Option<ItemKind> {
    store
        .offers(level)
        .into_iter()
        .filter(|offer| offer.affordable)
        .min_by_key(|offer| offer.price)
        .map(|offer| offer.kind)
}

fn count_mistypes(events: &[Event]) -> u32 {
    let count = events
        .iter()
        .filter(|event| matches!(event, Event::Mistyped { .. }))
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

fn summarize(
    level: &GameLevel,
    frames: u32,
    dt: Duration,
    mistypes: u32,
    purchases: Vec<PurchaseRecord>,
) -> Summary {
    let active = query::active_word(level);
    let words = query::pool(level)
        .ids()
        .zip(query::words(level))
        .map(|(id, word)| WordRecord {
            text: word.text().to_owned(),
            percent: word.progress_percent(),
            claimed_by: word.claimed_by().map(|item| item.get()),
            active: active == Some(id),
        })
        .collect();
    let items = query::items(level)
        .iter()
        .map(|item| ItemRecord {
            id: item.id().map(|id| id.get()),
            name: item.name(),
            claimed_word: item.claimed_word().map(|word| word.get()),
        })
        .collect();

    Summary {
        frames,
        elapsed_ms: u64::try_from(dt.saturating_mul(frames).as_millis()).unwrap_or(u64::MAX),
        rounds: query::round(level),
        mistypes,
        stats: query::stats(level).clone(),
        purchases,
        items,
        words,
    }
}
