use crate::errors::EngineError;

/// Index of a card within a [`Catalog`].
pub type CardIndex = usize;

/// Attribute values are plain signed integers; `-1` is used by some layouts
/// to mean "absent".
pub type Attribute = i32;

/// Attribute slots of the standard 52-card catalog.
pub mod playing {
    pub const VALUE: usize = 0;
    pub const COLOR: usize = 1;
    pub const SUIT: usize = 2;
    pub const FACE: usize = 3;
    pub const ATTRIBUTES: usize = 4;
}

/// Attribute slots of a trading-card (creature) catalog.
pub mod creature {
    pub const EVOLUTION_LINE: usize = 0;
    pub const TYPE_PRIMARY: usize = 1;
    pub const TYPE_SECONDARY: usize = 2;
    pub const EVOLUTION_STAGE: usize = 3;
    pub const ATTRIBUTES: usize = 4;
    /// Marker for a missing type.
    pub const NO_TYPE: i32 = -1;
}

/// Immutable table of attribute values, one row per unique card.
///
/// Built once before the workers start and only ever read afterwards, so a
/// plain `&Catalog` is shared by every worker without locking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    total: usize,
    attributes_per_card: usize,
    values: Vec<Attribute>,
}

impl Catalog {
    /// Build from declared counts and a row-major list of values.
    pub fn from_raw(
        total: usize,
        attributes_per_card: usize,
        values: Vec<Attribute>,
    ) -> Result<Self, EngineError> {
        if total == 0 {
            return Err(EngineError::MalformedInput(
                "catalog must declare at least one card".into(),
            ));
        }
        if attributes_per_card == 0 {
            return Err(EngineError::MalformedInput(
                "catalog must declare at least one attribute per card".into(),
            ));
        }
        let expected = total.checked_mul(attributes_per_card).ok_or_else(|| {
            EngineError::MalformedInput(format!(
                "catalog size {} x {} overflows",
                total, attributes_per_card
            ))
        })?;
        if values.len() < expected {
            return Err(EngineError::MalformedInput(format!(
                "catalog declares {} values but only {} present",
                expected,
                values.len()
            )));
        }
        if values.len() > expected {
            return Err(EngineError::MalformedInput(format!(
                "catalog declares {} values but {} present",
                expected,
                values.len()
            )));
        }
        Ok(Self {
            total,
            attributes_per_card,
            values,
        })
    }

    /// The 52 playing cards: value 1..=13, color, suit 0..=3, face flag.
    ///
    /// Card index is `suit * 13 + (value - 1)`; suits 0 and 3 are black.
    pub fn standard_52() -> Self {
        let mut values = Vec::with_capacity(52 * playing::ATTRIBUTES);
        for suit in 0..4 {
            let color = if suit == 1 || suit == 2 { 1 } else { 0 };
            for value in 1..=13 {
                let face = if value >= 11 { 1 } else { 0 };
                values.extend_from_slice(&[value, color, suit, face]);
            }
        }
        Self {
            total: 52,
            attributes_per_card: playing::ATTRIBUTES,
            values,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn attributes_per_card(&self) -> usize {
        self.attributes_per_card
    }

    pub fn get_attribute(
        &self,
        card: CardIndex,
        attribute: usize,
    ) -> Result<Attribute, EngineError> {
        if card >= self.total || attribute >= self.attributes_per_card {
            return Err(EngineError::OutOfRange {
                card,
                attribute,
                total: self.total,
                attributes_per_card: self.attributes_per_card,
            });
        }
        Ok(self.values[card * self.attributes_per_card + attribute])
    }

    /// Attribute lookup for indices validated at construction time.
    ///
    /// # Panics
    ///
    /// Panics if `card` or `attribute` is out of range.
    #[inline]
    pub fn value(&self, card: CardIndex, attribute: usize) -> Attribute {
        assert!(attribute < self.attributes_per_card, "attribute index out of range");
        self.values[card * self.attributes_per_card + attribute]
    }

    /// All attributes of one card.
    pub fn card(&self, card: CardIndex) -> Option<&[Attribute]> {
        if card >= self.total {
            return None;
        }
        let start = card * self.attributes_per_card;
        Some(&self.values[start..start + self.attributes_per_card])
    }
}
