use std::collections::HashSet;

use cardsim_engine::catalog::Catalog;
use cardsim_engine::deck::Deck;
use cardsim_engine::rng::MwcRng;
use proptest::prelude::*;

#[test]
fn full_deck_has_52_unique_cards() {
    let catalog = Catalog::standard_52();
    let deck = Deck::full(&catalog);
    let set: HashSet<_> = deck.cards().iter().copied().collect();
    assert_eq!(set.len(), 52);
}

#[test]
fn shuffle_is_deterministic_with_same_seed() {
    let catalog = Catalog::standard_52();
    let mut d1 = Deck::full(&catalog);
    let mut d2 = Deck::full(&catalog);
    d1.shuffle(&mut MwcRng::with_seed(12345, 678));
    d2.shuffle(&mut MwcRng::with_seed(12345, 678));
    assert_eq!(d1.cards(), d2.cards(), "same seed must yield identical order");
}

#[test]
fn shuffle_differs_with_different_seed() {
    let catalog = Catalog::standard_52();
    let mut d1 = Deck::full(&catalog);
    let mut d2 = Deck::full(&catalog);
    d1.shuffle(&mut MwcRng::with_seed(1, 1));
    d2.shuffle(&mut MwcRng::with_seed(2, 2));
    assert_ne!(
        d1.cards(),
        d2.cards(),
        "different seeds should produce different orders (high probability)"
    );
}

#[test]
fn clones_shuffle_concurrently_without_touching_original() {
    let catalog = Catalog::standard_52();
    let original = Deck::full(&catalog);

    let orders: Vec<Vec<usize>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4u32)
            .map(|t| {
                let mut mine = original.clone();
                scope.spawn(move || {
                    let mut rng = MwcRng::with_seed(t + 1, t + 100);
                    for _ in 0..50 {
                        mine.shuffle(&mut rng);
                    }
                    mine.cards().to_vec()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(original.cards(), (0..52).collect::<Vec<_>>().as_slice());
    for order in orders {
        let mut sorted = order.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..52).collect::<Vec<_>>());
    }
}

proptest! {
    #[test]
    fn shuffle_is_a_permutation(
        cards in prop::collection::vec(0usize..52, 1..80),
        s1 in any::<u32>(),
        s2 in any::<u32>(),
    ) {
        let catalog = Catalog::standard_52();
        let mut deck = Deck::from_raw(&catalog, cards.clone()).unwrap();
        deck.shuffle(&mut MwcRng::with_seed(s1, s2));

        let mut before = cards;
        let mut after = deck.cards().to_vec();
        before.sort_unstable();
        after.sort_unstable();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn mutating_a_clone_leaves_original(
        cards in prop::collection::vec(0usize..52, 1..60),
        seed in any::<u32>(),
    ) {
        let catalog = Catalog::standard_52();
        let original = Deck::from_raw(&catalog, cards.clone()).unwrap();
        let mut copy = original.clone();
        copy.shuffle(&mut MwcRng::with_seed(seed, seed.rotate_left(7)));
        prop_assert_eq!(original.cards(), cards.as_slice());
    }

    #[test]
    fn out_of_range_cards_are_rejected(
        mut cards in prop::collection::vec(0usize..52, 0..20),
        bad in 52usize..10_000,
        at in any::<prop::sample::Index>(),
    ) {
        let catalog = Catalog::standard_52();
        let position = at.index(cards.len() + 1);
        cards.insert(position, bad);
        prop_assert!(Deck::from_raw(&catalog, cards).is_err());
    }
}
