//! Poker-hand events over the standard 52-card layout.

use crate::catalog::playing::{SUIT, VALUE};
use crate::deck::Deck;

/// Cards dealt for a five-card hand.
pub const HAND_SIZE: usize = 5;

/// Ace, ten, jack, queen and king, all in the suit of the first card.
pub fn is_royal_flush(deck: &Deck<'_>) -> bool {
    if deck.len() < HAND_SIZE {
        return false;
    }
    let needed_suit = deck.attribute(0, SUIT);
    // found[0..4] = ten..king, found[4] = ace
    let mut found = [false; HAND_SIZE];

    for position in 0..HAND_SIZE {
        if deck.attribute(position, SUIT) != needed_suit {
            return false;
        }
        match deck.attribute(position, VALUE) {
            1 => found[4] = true,
            v @ 10..=13 => found[(v - 10) as usize] = true,
            _ => return false,
        }
    }

    found.iter().all(|&f| f)
}

/// Four cards of one value among the first five.
pub fn is_four_of_a_kind(deck: &Deck<'_>) -> bool {
    if deck.len() < HAND_SIZE {
        return false;
    }
    let values: [i32; HAND_SIZE] = std::array::from_fn(|p| deck.attribute(p, VALUE));
    values
        .iter()
        .any(|v| values.iter().filter(|&w| w == v).count() >= 4)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn card(suit: usize, value: usize) -> usize {
        suit * 13 + (value - 1)
    }

    #[test]
    fn royal_flush_in_any_order() {
        let catalog = Catalog::standard_52();
        let hand = vec![card(3, 12), card(3, 1), card(3, 10), card(3, 13), card(3, 11), 0];
        let deck = Deck::from_raw(&catalog, hand).unwrap();
        assert!(is_royal_flush(&deck));
    }

    #[test]
    fn straight_flush_is_not_royal() {
        let catalog = Catalog::standard_52();
        let hand = vec![card(0, 9), card(0, 10), card(0, 11), card(0, 12), card(0, 13)];
        let deck = Deck::from_raw(&catalog, hand).unwrap();
        assert!(!is_royal_flush(&deck));
    }

    #[test]
    fn mixed_suits_are_not_royal() {
        let catalog = Catalog::standard_52();
        let hand = vec![card(1, 1), card(1, 10), card(1, 11), card(2, 12), card(1, 13)];
        let deck = Deck::from_raw(&catalog, hand).unwrap();
        assert!(!is_royal_flush(&deck));
    }

    #[test]
    fn duplicate_face_is_not_royal() {
        let catalog = Catalog::standard_52();
        // Duplicated king leaves the queen slot empty.
        let hand = vec![card(2, 1), card(2, 10), card(2, 11), card(2, 13), card(2, 13)];
        let deck = Deck::from_raw(&catalog, hand).unwrap();
        assert!(!is_royal_flush(&deck));
    }

    #[test]
    fn four_of_a_kind_detected_only_in_first_five() {
        let catalog = Catalog::standard_52();
        let quads = vec![card(0, 7), card(1, 7), card(2, 2), card(2, 7), card(3, 7)];
        let deck = Deck::from_raw(&catalog, quads).unwrap();
        assert!(is_four_of_a_kind(&deck));

        let late = vec![card(0, 7), card(1, 7), card(2, 2), card(2, 7), card(3, 3), card(3, 7)];
        let deck = Deck::from_raw(&catalog, late).unwrap();
        assert!(!is_four_of_a_kind(&deck));
    }

    #[test]
    fn short_deck_never_matches() {
        let catalog = Catalog::standard_52();
        let deck = Deck::from_raw(&catalog, vec![card(0, 1), card(0, 10)]).unwrap();
        assert!(!is_royal_flush(&deck));
        assert!(!is_four_of_a_kind(&deck));
    }
}
