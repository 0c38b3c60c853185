use crate::catalog::{Attribute, CardIndex, Catalog};
use crate::errors::EngineError;
use crate::rng::MwcRng;

/// Ordered run of card indices into a borrowed [`Catalog`].
///
/// Cloning copies the card order and shares the catalog reference, so a
/// worker can shuffle its clone while other threads read the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck<'c> {
    catalog: &'c Catalog,
    cards: Vec<CardIndex>,
}

impl<'c> Deck<'c> {
    pub fn from_raw(catalog: &'c Catalog, cards: Vec<CardIndex>) -> Result<Self, EngineError> {
        if cards.is_empty() {
            return Err(EngineError::MalformedInput(
                "deck must hold at least one card".into(),
            ));
        }
        if cards.len() > i32::MAX as usize {
            return Err(EngineError::MalformedInput(format!(
                "deck of {} cards is too large",
                cards.len()
            )));
        }
        if let Some((position, &card)) = cards
            .iter()
            .enumerate()
            .find(|&(_, &card)| card >= catalog.total())
        {
            return Err(EngineError::MalformedInput(format!(
                "deck card {} at position {} is outside catalog of {} cards",
                card,
                position,
                catalog.total()
            )));
        }
        Ok(Self { catalog, cards })
    }

    /// One copy of every catalog card, in catalog order.
    pub fn full(catalog: &'c Catalog) -> Self {
        Self {
            catalog,
            cards: (0..catalog.total()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[CardIndex] {
        &self.cards
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    /// First `n` cards (fewer if the deck is shorter).
    pub fn top(&self, n: usize) -> &[CardIndex] {
        &self.cards[..n.min(self.cards.len())]
    }

    /// Attribute of the card at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` or `attribute` is out of range.
    #[inline]
    pub fn attribute(&self, position: usize, attribute: usize) -> Attribute {
        self.catalog.value(self.cards[position], attribute)
    }

    /// Shuffle in place.
    ///
    /// Every position `i` is swapped with a position drawn from the whole
    /// deck, not from `0..=i`. The resulting permutation distribution is not
    /// uniform; estimates are calibrated against this exact procedure.
    pub fn shuffle(&mut self, rng: &mut MwcRng) {
        let len = self.cards.len();
        for i in 0..len {
            let j = rng.index(len);
            self.cards.swap(i, j);
        }
    }

    /// A uniformly chosen card, left in place.
    pub fn pull_random(&self, rng: &mut MwcRng) -> CardIndex {
        self.cards[rng.index(self.cards.len())]
    }
}
