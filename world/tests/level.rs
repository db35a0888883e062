use std::{collections::HashMap, time::Duration};

use typer_core::{
    ActiveWordError, Command, Event, Item, ItemId, Money, RewardSchedule, Typist, WordId,
};
use typer_system_items::{GoroutineWorker, WorkerTuning};
use typer_world::{self as world, query, GameLevel, LevelConfig, MarkerPolicy};

fn worker(base_wait_ms: u64, jitter_ms: u64) -> Box<dyn Item> {
    Box::new(GoroutineWorker::new(WorkerTuning::new(
        Duration::from_millis(base_wait_ms),
        Duration::from_millis(jitter_ms),
    )))
}

fn level(config: LevelConfig, words: &[&str]) -> GameLevel {
    let mut level = GameLevel::new(config);
    let mut events = Vec::new();
    world::apply(
        &mut level,
        Command::StartRound {
            words: words.iter().map(|word| (*word).to_owned()).collect(),
        },
        &mut events,
    );
    level
}

fn run(level: &mut GameLevel, command: Command) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(level, command, &mut events);
    events
}

fn tick(level: &mut GameLevel, ms: u64) -> Vec<Event> {
    run(
        level,
        Command::Tick {
            dt: Duration::from_millis(ms),
        },
    )
}

fn type_word(level: &mut GameLevel, text: &str) -> Vec<Event> {
    text.chars()
        .flat_map(|character| run(level, Command::TypeCharacter { character }))
        .collect()
}

#[test]
fn simultaneous_workers_never_share_a_word() {
    let mut level = level(
        LevelConfig::default(),
        &["alpha", "bravo", "charlie", "delta", "echo", "foxtrot"],
    );
    for _ in 0..8 {
        let _ = world::apply_purchase(&mut level, worker(100, 0));
    }

    for _ in 0..200 {
        let _ = tick(&mut level, 25);

        let mut holders: HashMap<WordId, ItemId> = HashMap::new();
        for item in query::items(&level) {
            if let Some(word) = item.claimed_word() {
                let id = item.id().expect("owned items have ids");
                assert!(
                    holders.insert(word, id).is_none(),
                    "word {word:?} claimed twice"
                );
                assert_eq!(query::words(&level)[word.index()].claimed_by(), Some(id));
            }
        }
        for word in query::words(&level) {
            assert!(word.completed_chars() <= word.total_chars());
        }
    }
}

#[test]
fn first_awake_worker_in_list_order_wins_last_word() {
    let mut level = level(LevelConfig::default(), &["human", "solo"]);
    let first = world::apply_purchase(&mut level, worker(1000, 0)).expect("kept");
    let second = world::apply_purchase(&mut level, worker(1000, 0)).expect("kept");

    let events = tick(&mut level, 1);

    assert!(events.contains(&Event::WordClaimed {
        word: WordId::new(1),
        item: first,
    }));
    assert!(!events.iter().any(|event| matches!(
        event,
        Event::WordClaimed { item, .. } if *item == second
    )));
}

#[test]
fn typing_the_active_word_earns_reward_and_moves_on() {
    let config = LevelConfig::new(
        1,
        Money::ZERO,
        RewardSchedule::new(Money::new(7)),
        MarkerPolicy::Clear,
    );
    let mut level = level(config, &["go", "chan"]);

    let events = type_word(&mut level, "go");

    assert!(events.contains(&Event::WordCompleted {
        word: WordId::new(0),
        by: Typist::Human,
        reward: Money::new(14),
    }));
    assert!(events.contains(&Event::ActiveWordChanged {
        word: Some(WordId::new(1)),
    }));
    assert_eq!(query::stats(&level).currency(), Money::new(14));
    assert_eq!(query::stats(&level).human_words(), 1);
}

#[test]
fn wrong_character_is_reported_and_ignored() {
    let mut level = level(LevelConfig::default(), &["map"]);

    let events = run(&mut level, Command::TypeCharacter { character: 'x' });

    assert_eq!(
        events,
        vec![Event::Mistyped {
            expected: Some('m'),
            typed: 'x',
        }]
    );
    assert_eq!(query::words(&level)[0].completed_chars(), 0);
}

#[test]
fn typing_without_active_word_is_a_mistype() {
    let mut level = GameLevel::new(LevelConfig::default());

    let events = run(&mut level, Command::TypeCharacter { character: 'a' });

    assert_eq!(
        events,
        vec![Event::Mistyped {
            expected: None,
            typed: 'a',
        }]
    );
}

#[test]
fn round_cleared_is_reported_once() {
    let mut level = level(LevelConfig::default(), &["a", "b"]);

    let mut events = type_word(&mut level, "ab");
    events.extend(tick(&mut level, 16));
    events.extend(tick(&mut level, 16));

    let cleared = events
        .iter()
        .filter(|event| matches!(event, Event::RoundCleared { round: 1 }))
        .count();
    assert_eq!(cleared, 1);
    assert!(query::is_round_cleared(&level));
    assert_eq!(query::active_word(&level), None);
}

#[test]
fn set_active_word_validates_target() {
    let mut level = level(LevelConfig::default(), &["x", "yz"]);
    let _ = type_word(&mut level, "x");

    assert_eq!(
        run(
            &mut level,
            Command::SetActiveWord {
                word: WordId::new(0)
            }
        ),
        vec![Event::ActiveWordRejected {
            word: WordId::new(0),
            reason: ActiveWordError::AlreadyComplete,
        }]
    );
    assert_eq!(
        run(
            &mut level,
            Command::SetActiveWord {
                word: WordId::new(5)
            }
        ),
        vec![Event::ActiveWordRejected {
            word: WordId::new(5),
            reason: ActiveWordError::UnknownWord,
        }]
    );
    assert!(run(
        &mut level,
        Command::SetActiveWord {
            word: WordId::new(1)
        }
    )
    .is_empty());
}

#[test]
fn abandoned_word_becomes_claimable() {
    let mut level = level(LevelConfig::default(), &["first", "second"]);

    let events = run(&mut level, Command::AbandonActiveWord);
    assert_eq!(
        events,
        vec![Event::ActiveWordChanged {
            word: Some(WordId::new(1)),
        }]
    );

    let _ = world::apply_purchase(&mut level, worker(1000, 0));
    let _ = tick(&mut level, 1);
    assert_eq!(
        query::words(&level)[0].claimed_by(),
        Some(ItemId::new(1)),
        "abandoned word is open to workers"
    );
}

#[test]
fn abandoning_the_last_free_word_keeps_it_active() {
    let mut level = level(LevelConfig::default(), &["solo"]);

    assert!(run(&mut level, Command::AbandonActiveWord).is_empty());
    for _ in 0..5 {
        let _ = tick(&mut level, 16);
    }
    assert_eq!(query::active_word(&level), Some(WordId::new(0)));

    let events = run(&mut level, Command::TypeCharacter { character: 's' });
    assert!(events.contains(&Event::WordAdvanced {
        word: WordId::new(0),
        by: Typist::Human,
    }));
    let _ = type_word(&mut level, "olo");
    assert!(query::is_round_cleared(&level));
}

#[test]
fn human_waits_while_a_worker_holds_the_last_word() {
    let mut level = level(LevelConfig::default(), &["ab", "cd"]);
    let _ = world::apply_purchase(&mut level, worker(10, 0));
    let _ = tick(&mut level, 1);
    assert_eq!(query::items(&level)[0].claimed_word(), Some(WordId::new(1)));

    let events = type_word(&mut level, "ab");
    assert!(events.contains(&Event::ActiveWordChanged { word: None }));

    let events = tick(&mut level, 10);
    assert!(events.contains(&Event::RoundCleared { round: 1 }));
    assert_eq!(query::active_word(&level), None);
}

#[test]
fn retained_markers_do_not_block_the_human() {
    let config = LevelConfig::default().with_marker_policy(MarkerPolicy::Retain);
    let mut level = level(config, &["me", "it"]);
    let _ = world::apply_purchase(&mut level, worker(10, 0));
    let _ = tick(&mut level, 1);
    let _ = tick(&mut level, 10);
    let _ = run(&mut level, Command::RecycleRound);

    let events = type_word(&mut level, "me");
    assert!(events.contains(&Event::ActiveWordChanged {
        word: Some(WordId::new(1)),
    }));
    assert_eq!(query::words(&level)[1].claimed_by(), Some(ItemId::new(1)));

    for _ in 0..5 {
        let _ = tick(&mut level, 10);
    }
    assert_eq!(query::words(&level)[1].completed_chars(), 0);

    let events = type_word(&mut level, "it");
    assert!(events.contains(&Event::RoundCleared { round: 2 }));
}

#[test]
fn worker_finishing_the_active_word_moves_the_human_on() {
    let mut level = level(LevelConfig::default(), &["ab", "cd", "ef"]);
    let _ = world::apply_purchase(&mut level, worker(10, 0));
    let _ = tick(&mut level, 1);
    let claimed = query::items(&level)[0]
        .claimed_word()
        .expect("worker claimed a word");

    let _ = run(&mut level, Command::SetActiveWord { word: claimed });
    let events = tick(&mut level, 10);

    assert!(query::words(&level)[claimed.index()].is_complete());
    assert_ne!(query::active_word(&level), Some(claimed));
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::ActiveWordChanged { .. })));
}

#[test]
fn retained_markers_keep_recycled_words_from_workers() {
    let config = LevelConfig::default().with_marker_policy(MarkerPolicy::Retain);
    let mut level = level(config, &["me", "it"]);
    let _ = world::apply_purchase(&mut level, worker(10, 0));
    let _ = tick(&mut level, 1);
    let _ = tick(&mut level, 10);
    assert!(query::words(&level)[1].is_complete());

    let events = run(&mut level, Command::RecycleRound);
    assert!(events.contains(&Event::RoundStarted { round: 2, words: 2 }));
    assert_eq!(query::words(&level)[1].completed_chars(), 0);
    assert_eq!(query::words(&level)[1].claimed_by(), Some(ItemId::new(1)));

    for _ in 0..10 {
        let _ = tick(&mut level, 10);
    }
    assert_eq!(
        query::words(&level)[1].completed_chars(),
        0,
        "retained marker keeps the word out of reach"
    );
}

#[test]
fn cleared_markers_let_workers_retype_recycled_words() {
    let mut level = level(LevelConfig::default(), &["me", "it"]);
    let _ = world::apply_purchase(&mut level, worker(10, 0));
    let _ = tick(&mut level, 1);
    let _ = tick(&mut level, 10);

    let _ = run(&mut level, Command::RecycleRound);
    assert_eq!(query::words(&level)[1].claimed_by(), None);

    let _ = tick(&mut level, 10);
    assert_eq!(query::words(&level)[1].completed_chars(), 1);
}

#[test]
fn replay_with_same_seed_is_identical() {
    let first = replay(0x1234);
    let second = replay(0x1234);
    assert_eq!(first, second, "replay diverged between runs");
}

fn replay(seed: u64) -> Vec<Event> {
    let config = LevelConfig::new(seed, Money::ZERO, RewardSchedule::default(), MarkerPolicy::Clear);
    let mut level = level(
        config,
        &["struct", "interface", "goroutine", "channel", "select", "range"],
    );
    for _ in 0..3 {
        let _ = world::apply_purchase(&mut level, worker(120, 80));
    }

    let mut log = Vec::new();
    for frame in 0..400u32 {
        if frame % 5 == 0 {
            let next = query::active_word(&level)
                .and_then(|word| query::words(&level)[word.index()].next_char());
            if let Some(character) = next {
                log.extend(run(&mut level, Command::TypeCharacter { character }));
            }
        }
        log.extend(tick(&mut level, 16));
    }
    log
}
