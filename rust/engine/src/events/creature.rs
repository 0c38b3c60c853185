//! Trading-card events: type matchups and evolution lines.
//!
//! Types are numbered 0..18 in the usual chart order (normal, fighting,
//! flying, poison, ground, rock, bug, ghost, steel, fire, water, grass,
//! electric, psychic, ice, dragon, dark, fairy). `-1` marks a missing
//! secondary type.

use crate::catalog::creature::{
    EVOLUTION_LINE, EVOLUTION_STAGE, NO_TYPE, TYPE_PRIMARY, TYPE_SECONDARY,
};
use crate::catalog::{Attribute, CardIndex, Catalog};
use crate::deck::Deck;
use crate::errors::EngineError;

pub const TYPE_COUNT: usize = 18;

/// Cards in an opening hand.
pub const OPENING_HAND: usize = 7;

/// Damage multiplier per chart code.
const MULTIPLIER: [f32; 4] = [1.0, 2.0, 0.5, 0.0];

/// `CHART[attacker][defender]` indexes [`MULTIPLIER`].
#[rustfmt::skip]
const CHART: [[u8; TYPE_COUNT]; TYPE_COUNT] = [
    [0, 0, 0, 0, 0, 2, 0, 3, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [1, 0, 2, 2, 0, 1, 2, 3, 1, 0, 0, 0, 0, 2, 1, 0, 1, 2],
    [0, 1, 0, 0, 0, 2, 1, 0, 2, 0, 0, 1, 2, 0, 0, 0, 0, 0],
    [0, 0, 0, 2, 2, 2, 0, 2, 3, 0, 0, 1, 0, 0, 0, 0, 0, 1],
    [0, 0, 3, 1, 0, 1, 2, 0, 1, 1, 0, 2, 1, 0, 0, 0, 0, 0],
    [0, 2, 1, 0, 2, 0, 1, 0, 2, 1, 0, 0, 0, 0, 1, 0, 0, 0],
    [0, 2, 2, 2, 0, 0, 0, 2, 2, 2, 0, 1, 0, 1, 0, 0, 1, 2],
    [3, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1, 0, 0, 2, 0],
    [0, 0, 0, 0, 0, 1, 0, 0, 2, 2, 2, 0, 2, 0, 1, 0, 0, 1],
    [0, 0, 0, 0, 0, 2, 1, 0, 1, 2, 2, 1, 0, 0, 1, 2, 0, 0],
    [0, 0, 0, 0, 1, 1, 0, 0, 0, 1, 2, 2, 0, 0, 0, 2, 0, 0],
    [0, 0, 2, 2, 1, 1, 2, 0, 2, 2, 1, 2, 0, 0, 0, 2, 0, 0],
    [0, 0, 1, 0, 3, 0, 0, 0, 0, 0, 1, 2, 2, 0, 0, 2, 0, 0],
    [0, 1, 0, 1, 0, 0, 0, 0, 2, 0, 0, 0, 0, 2, 0, 0, 3, 0],
    [0, 0, 1, 0, 1, 0, 0, 0, 2, 2, 2, 1, 0, 0, 2, 1, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 1, 0, 3],
    [0, 2, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1, 0, 0, 2, 2],
    [0, 1, 0, 2, 0, 0, 0, 0, 2, 2, 0, 0, 0, 0, 0, 1, 1, 0],
];

fn as_type(value: Attribute) -> Option<usize> {
    usize::try_from(value).ok().filter(|&t| t < TYPE_COUNT)
}

/// Every card's types must be chart indices or [`NO_TYPE`].
pub fn check_types(catalog: &Catalog) -> Result<(), EngineError> {
    for card in 0..catalog.total() {
        for slot in [TYPE_PRIMARY, TYPE_SECONDARY] {
            let value = catalog.value(card, slot);
            if value != NO_TYPE && as_type(value).is_none() {
                return Err(EngineError::MalformedInput(format!(
                    "card {} has type {} in attribute {}, expected {} or 0..{}",
                    card, value, slot, NO_TYPE, TYPE_COUNT
                )));
            }
        }
    }
    Ok(())
}

fn types_of(catalog: &Catalog, card: CardIndex) -> [Option<usize>; 2] {
    [
        as_type(catalog.value(card, TYPE_PRIMARY)),
        as_type(catalog.value(card, TYPE_SECONDARY)),
    ]
}

/// Multiplier of one attacking type against every defending type.
pub fn single_type_multiplier(attacker: usize, defender: &[Option<usize>]) -> f32 {
    defender
        .iter()
        .flatten()
        .map(|&d| MULTIPLIER[CHART[attacker][d] as usize])
        .product()
}

/// Best multiplier either attacking type achieves, `None` for a typeless
/// attacker.
pub fn best_multiplier(attacker: &[Option<usize>], defender: &[Option<usize>]) -> Option<f32> {
    attacker
        .iter()
        .flatten()
        .map(|&a| single_type_multiplier(a, defender))
        .reduce(f32::max)
}

/// Attacker card deals at least double damage to the defender card.
pub fn is_super_effective(catalog: &Catalog, attacker: CardIndex, defender: CardIndex) -> bool {
    let attacking = types_of(catalog, attacker);
    let defending = types_of(catalog, defender);
    best_multiplier(&attacking, &defending).is_some_and(|m| m >= 2.0)
}

/// The opening hand holds a basic and a stage-one card of the same line.
pub fn has_evolution_pair(deck: &Deck<'_>) -> bool {
    let hand = deck.top(OPENING_HAND);
    let catalog = deck.catalog();
    let line_and_stage = |card: CardIndex| {
        (
            catalog.value(card, EVOLUTION_LINE),
            catalog.value(card, EVOLUTION_STAGE),
        )
    };

    hand.iter().any(|&basic| {
        let (line, stage) = line_and_stage(basic);
        stage == 0
            && hand
                .iter()
                .any(|&evolved| line_and_stage(evolved) == (line, 1))
    })
}
