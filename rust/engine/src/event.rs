//! The predicate interface evaluated once per trial.

use crate::catalog::Catalog;
use crate::deck::Deck;
use crate::errors::EngineError;
use crate::rng::MwcRng;

/// A success condition checked against freshly shuffled decks.
///
/// Implementations must depend only on the context they are handed: the
/// catalog is read-only, decks are the calling worker's private clones, and
/// the generator belongs to that worker alone.
pub trait Event: Sync {
    fn name(&self) -> &str;

    /// Minimum `attributes_per_card` the catalog must provide.
    fn required_attributes(&self) -> usize;

    fn evaluate(&self, ctx: &mut TrialContext<'_, '_>) -> bool;

    /// Reject catalogs this event cannot read.
    fn validate(&self, catalog: &Catalog) -> Result<(), EngineError> {
        check_attribute_width(self, catalog)
    }
}

/// `IncompatibleCatalog` unless `catalog` has the attributes `event` reads.
pub fn check_attribute_width<E>(event: &E, catalog: &Catalog) -> Result<(), EngineError>
where
    E: Event + ?Sized,
{
    let required = event.required_attributes();
    if catalog.attributes_per_card() < required {
        return Err(EngineError::IncompatibleCatalog {
            event: event.name().to_string(),
            required,
            available: catalog.attributes_per_card(),
        });
    }
    Ok(())
}

/// Per-worker view handed to [`Event::evaluate`].
pub struct TrialContext<'w, 'c> {
    catalog: &'c Catalog,
    decks: &'w mut [Deck<'c>],
    rng: &'w mut MwcRng,
}

impl<'w, 'c> TrialContext<'w, 'c> {
    /// `decks` must not be empty.
    pub fn new(catalog: &'c Catalog, decks: &'w mut [Deck<'c>], rng: &'w mut MwcRng) -> Self {
        debug_assert!(!decks.is_empty());
        Self { catalog, decks, rng }
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    pub fn rng(&mut self) -> &mut MwcRng {
        &mut *self.rng
    }

    pub fn deck_count(&self) -> usize {
        self.decks.len()
    }

    /// Pick a deck uniformly, shuffle it in place and return it.
    ///
    /// With a single deck no selection draw is made.
    pub fn shuffled_deck(&mut self) -> &Deck<'c> {
        let pick = if self.decks.len() == 1 {
            0
        } else {
            self.rng.index(self.decks.len())
        };
        let deck = &mut self.decks[pick];
        deck.shuffle(&mut *self.rng);
        deck
    }

    /// Split borrow for events that need a deck and the generator together.
    pub fn shuffled_deck_with_rng(&mut self) -> (&Deck<'c>, &mut MwcRng) {
        let pick = if self.decks.len() == 1 {
            0
        } else {
            self.rng.index(self.decks.len())
        };
        let deck = &mut self.decks[pick];
        deck.shuffle(&mut *self.rng);
        (&*deck, &mut *self.rng)
    }
}
