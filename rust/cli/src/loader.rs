//! Readers for the whitespace-separated integer files the tool consumes.
//!
//! - Catalog: `total attributes_per_card v0 v1 ...`
//! - Deck: `total idx0 idx1 ...`
//! - Setup: `event file_count thread_count catalog_path deck_path...`
//!
//! Parsing is split from reading so the text forms can be tested without
//! touching the filesystem. Everything returns owned values; if any file of
//! a setup fails, whatever was already loaded is simply dropped.

use std::path::{Path, PathBuf};

use cardsim_engine::{Attribute, CardIndex, Catalog, Deck, EngineError};

use crate::error::CliError;
use crate::io_utils;

/// A parsed setup file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setup {
    pub event: u32,
    pub threads: usize,
    pub catalog: PathBuf,
    pub decks: Vec<PathBuf>,
}

struct Tokens<'a> {
    source: &'a str,
    inner: std::str::SplitWhitespace<'a>,
    position: usize,
}

impl<'a> Tokens<'a> {
    fn new(source: &'a str, text: &'a str) -> Self {
        Self {
            source,
            inner: text.split_whitespace(),
            position: 0,
        }
    }

    fn next_raw(&mut self, what: &str) -> Result<&'a str, CliError> {
        self.position += 1;
        self.inner.next().ok_or_else(|| {
            CliError::InvalidInput(format!(
                "{}: expected {} at token {}, found end of input",
                self.source, what, self.position
            ))
        })
    }

    fn next<T: std::str::FromStr>(&mut self, what: &str) -> Result<T, CliError> {
        let raw = self.next_raw(what)?;
        raw.parse().map_err(|_| {
            CliError::InvalidInput(format!(
                "{}: expected {} at token {}, found '{}'",
                self.source, what, self.position, raw
            ))
        })
    }

    fn finish(mut self) -> Result<(), CliError> {
        match self.inner.next() {
            None => Ok(()),
            Some(extra) => Err(CliError::InvalidInput(format!(
                "{}: unexpected trailing token '{}' at token {}",
                self.source,
                extra,
                self.position + 1
            ))),
        }
    }
}

pub fn parse_catalog(source: &str, text: &str) -> Result<Catalog, CliError> {
    let mut tokens = Tokens::new(source, text);
    let total: usize = tokens.next("card count")?;
    let attributes: usize = tokens.next("attribute count")?;
    let len = total.checked_mul(attributes).ok_or_else(|| {
        CliError::InvalidInput(format!("{}: catalog dimensions overflow", source))
    })?;

    let mut values: Vec<Attribute> = Vec::with_capacity(len.min(1 << 20));
    for _ in 0..len {
        values.push(tokens.next("attribute value")?);
    }
    tokens.finish()?;

    Ok(Catalog::from_raw(total, attributes, values)?)
}

pub fn parse_deck<'c>(
    catalog: &'c Catalog,
    source: &str,
    text: &str,
) -> Result<Deck<'c>, CliError> {
    let mut tokens = Tokens::new(source, text);
    let total: usize = tokens.next("deck size")?;
    if total == 0 {
        return Err(EngineError::MalformedInput(format!("{}: deck is empty", source)).into());
    }

    let mut cards: Vec<CardIndex> = Vec::with_capacity(total.min(1 << 20));
    for _ in 0..total {
        cards.push(tokens.next("card index")?);
    }
    tokens.finish()?;

    Ok(Deck::from_raw(catalog, cards)?)
}

/// Parse a setup file. Relative paths are resolved against `base`.
pub fn parse_setup(source: &str, text: &str, base: &Path) -> Result<Setup, CliError> {
    let mut tokens = Tokens::new(source, text);
    let event: u32 = tokens.next("event selector")?;
    let file_count: usize = tokens.next("file count")?;
    let threads: usize = tokens.next("thread count")?;

    if file_count < 2 {
        return Err(CliError::InvalidInput(format!(
            "{}: file count must name a catalog and at least one deck, got {}",
            source, file_count
        )));
    }

    let mut paths = Vec::with_capacity(file_count);
    for _ in 0..file_count {
        let raw = tokens.next_raw("file path")?;
        let path = Path::new(raw);
        paths.push(if path.is_absolute() {
            path.to_path_buf()
        } else {
            base.join(path)
        });
    }
    tokens.finish()?;

    let catalog = paths.remove(0);
    Ok(Setup {
        event,
        threads,
        catalog,
        decks: paths,
    })
}

pub fn read_setup(path: &Path) -> Result<Setup, CliError> {
    let text = read(path)?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));
    parse_setup(&path.display().to_string(), &text, base)
}

pub fn load_catalog(path: &Path) -> Result<Catalog, CliError> {
    let text = read(path)?;
    let catalog = parse_catalog(&path.display().to_string(), &text)?;
    tracing::debug!(
        path = %path.display(),
        cards = catalog.total(),
        attributes = catalog.attributes_per_card(),
        "catalog loaded"
    );
    Ok(catalog)
}

/// Load every deck against `catalog`, failing on the first bad file.
pub fn load_decks<'c, P: AsRef<Path>>(
    catalog: &'c Catalog,
    paths: &[P],
) -> Result<Vec<Deck<'c>>, CliError> {
    paths
        .iter()
        .map(|p| -> Result<Deck<'c>, CliError> {
            let path = p.as_ref();
            let text = read(path)?;
            let deck = parse_deck(catalog, &path.display().to_string(), &text)?;
            tracing::debug!(path = %path.display(), cards = deck.len(), "deck loaded");
            Ok(deck)
        })
        .collect()
}

fn read(path: &Path) -> Result<String, CliError> {
    io_utils::read_text(path).map_err(|e| {
        CliError::InvalidInput(format!("cannot read {}: {}", path.display(), e))
    })
}
