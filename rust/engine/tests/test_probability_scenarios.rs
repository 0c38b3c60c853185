//! End-to-end estimates over the standard 52-card deck.

use cardsim_engine::catalog::Catalog;
use cardsim_engine::deck::Deck;
use cardsim_engine::events::EventKind;
use cardsim_engine::pool::{IterationBudget, PoolConfig, SeedPolicy, WorkerPool};

#[test]
fn royal_flush_single_thread() {
    let catalog = Catalog::standard_52();
    let decks = vec![Deck::full(&catalog)];
    let config =
        PoolConfig::new(1, IterationBudget::Total(2_500_000)).with_seed(SeedPolicy::Fixed(52));
    let report = WorkerPool::new(config)
        .unwrap()
        .run(&EventKind::RoyalFlush, &decks)
        .unwrap();

    assert_eq!(report.total_iterations, 2_500_000);
    // 4 / 2,598,960 is about 3.85 hits in 2.5M trials.
    assert!(
        report.total_successes <= 20,
        "successes = {}",
        report.total_successes
    );
    let pct = report.percentage().unwrap();
    assert!(pct < 0.0008, "royal flush estimate {}% is far too high", pct);
}

#[test]
fn four_of_a_kind_four_threads() {
    let catalog = Catalog::standard_52();
    let decks = vec![Deck::full(&catalog)];
    let config =
        PoolConfig::new(4, IterationBudget::PerThread(625_000)).with_seed(SeedPolicy::Fixed(4));
    let report = WorkerPool::new(config)
        .unwrap()
        .run(&EventKind::FourOfAKind, &decks)
        .unwrap();

    assert_eq!(report.workers.len(), 4);
    assert_eq!(report.total_iterations, 2_500_000);
    assert!(report.workers.iter().all(|w| w.iterations == 625_000));
    // 624 / 2,598,960 = 0.024%
    let pct = report.percentage().unwrap();
    assert!((0.01..0.05).contains(&pct), "four of a kind estimate {}%", pct);
}

#[test]
fn evolution_pair_in_trading_card_deck() {
    // Lines 0..4 each with a basic (stage 0) and a stage 1 card, plus fillers.
    let mut values = Vec::new();
    for line in 0..4 {
        values.extend_from_slice(&[line, 10, -1, 0]);
        values.extend_from_slice(&[line, 10, -1, 1]);
    }
    values.extend_from_slice(&[9, 0, -1, 2]);
    let catalog = Catalog::from_raw(9, 4, values).unwrap();

    // Forty cards: two copies of each line's pair, the rest fillers.
    let mut cards = Vec::new();
    for card in 0..8 {
        cards.push(card);
        cards.push(card);
    }
    cards.resize(40, 8);
    let decks = vec![Deck::from_raw(&catalog, cards).unwrap()];

    let config =
        PoolConfig::new(2, IterationBudget::Total(20_000)).with_seed(SeedPolicy::Fixed(9));
    let report = WorkerPool::new(config)
        .unwrap()
        .run(&EventKind::EvolutionPair, &decks)
        .unwrap();
    let p = report.probability().unwrap();
    assert!(p > 0.05 && p < 0.6, "p = {}", p);
}

#[test]
fn super_effective_between_two_decks() {
    // Card 0: water, card 1: fire, card 2: grass.
    let catalog = Catalog::from_raw(
        3,
        4,
        vec![
            0, 10, -1, 0, //
            1, 9, -1, 0, //
            2, 11, -1, 0, //
        ],
    )
    .unwrap();
    let water = Deck::from_raw(&catalog, vec![0; 20]).unwrap();
    let fire = Deck::from_raw(&catalog, vec![1; 20]).unwrap();
    let grass = Deck::from_raw(&catalog, vec![2; 20]).unwrap();
    let decks = vec![water, fire, grass];

    let config =
        PoolConfig::new(3, IterationBudget::Total(30_000)).with_seed(SeedPolicy::Fixed(3));
    let report = WorkerPool::new(config)
        .unwrap()
        .run(&EventKind::SuperEffective, &decks)
        .unwrap();

    // Water>fire, fire>grass, grass>water: 3 of 9 ordered pairs.
    let p = report.probability().unwrap();
    assert!((0.28..0.39).contains(&p), "p = {}", p);
}
