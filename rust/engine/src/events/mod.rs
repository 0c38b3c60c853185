//! Built-in events, selected by the legacy 1-based event number.
//!
//! ```
//! use cardsim_engine::catalog::Catalog;
//! use cardsim_engine::event::Event;
//! use cardsim_engine::events::EventKind;
//!
//! let event = EventKind::from_selector(1).unwrap();
//! assert_eq!(event, EventKind::RoyalFlush);
//! assert!(event.validate(&Catalog::standard_52()).is_ok());
//! ```

pub mod creature;
pub mod playing;

use serde::{Deserialize, Serialize};

use crate::catalog::{creature as creature_attrs, playing as playing_attrs};
use crate::errors::EngineError;
use crate::catalog::Catalog;
use crate::event::{check_attribute_width, Event, TrialContext};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    /// Five top cards form a royal flush.
    RoyalFlush,
    /// Four of a kind among the five top cards.
    FourOfAKind,
    /// A deck's top card hits a random card of another deck for double damage.
    SuperEffective,
    /// Opening hand of seven holds a basic and its first evolution.
    EvolutionPair,
}

impl EventKind {
    pub const ALL: [EventKind; 4] = [
        EventKind::RoyalFlush,
        EventKind::FourOfAKind,
        EventKind::SuperEffective,
        EventKind::EvolutionPair,
    ];

    pub fn from_selector(selector: u32) -> Result<Self, EngineError> {
        match selector {
            1 => Ok(EventKind::RoyalFlush),
            2 => Ok(EventKind::FourOfAKind),
            3 => Ok(EventKind::SuperEffective),
            4 => Ok(EventKind::EvolutionPair),
            other => Err(EngineError::UnknownEvent(other)),
        }
    }

    pub fn selector(self) -> u32 {
        match self {
            EventKind::RoyalFlush => 1,
            EventKind::FourOfAKind => 2,
            EventKind::SuperEffective => 3,
            EventKind::EvolutionPair => 4,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            EventKind::RoyalFlush => "royal flush in the top five cards",
            EventKind::FourOfAKind => "four of a kind in the top five cards",
            EventKind::SuperEffective => {
                "top card is super effective against a random opposing card"
            }
            EventKind::EvolutionPair => "basic and stage-one of one line in the opening hand",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Event for EventKind {
    fn name(&self) -> &str {
        match self {
            EventKind::RoyalFlush => "royal-flush",
            EventKind::FourOfAKind => "four-of-a-kind",
            EventKind::SuperEffective => "super-effective",
            EventKind::EvolutionPair => "evolution-pair",
        }
    }

    fn required_attributes(&self) -> usize {
        match self {
            EventKind::RoyalFlush | EventKind::FourOfAKind => playing_attrs::SUIT + 1,
            EventKind::SuperEffective | EventKind::EvolutionPair => creature_attrs::ATTRIBUTES,
        }
    }

    fn validate(&self, catalog: &Catalog) -> Result<(), EngineError> {
        check_attribute_width(self, catalog)?;
        match self {
            EventKind::SuperEffective => creature::check_types(catalog),
            _ => Ok(()),
        }
    }

    fn evaluate(&self, ctx: &mut TrialContext<'_, '_>) -> bool {
        match self {
            EventKind::RoyalFlush => playing::is_royal_flush(ctx.shuffled_deck()),
            EventKind::FourOfAKind => playing::is_four_of_a_kind(ctx.shuffled_deck()),
            EventKind::SuperEffective => {
                let attacker = ctx.shuffled_deck().cards()[0];
                let (defending, rng) = ctx.shuffled_deck_with_rng();
                let defender = defending.pull_random(rng);
                creature::is_super_effective(ctx.catalog(), attacker, defender)
            }
            EventKind::EvolutionPair => creature::has_evolution_pair(ctx.shuffled_deck()),
        }
    }
}
