//! Rotating dream quotes without immediate repeats

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Most recently shown quotes remembered per rotator
pub const HISTORY_CAPACITY: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub author: String,
}

impl Quote {
    pub fn new(text: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
        }
    }
}

pub static DREAM_QUOTES: &[(&str, &str)] = &[
    ("Dreams are the royal road to the unconscious.", "Sigmund Freud"),
    ("The dream is a little hidden door in the innermost and most secret recesses of the soul.", "Carl Jung"),
    ("All that we see or seem is but a dream within a dream.", "Edgar Allan Poe"),
    ("I dream my painting and I paint my dream.", "Vincent van Gogh"),
    ("Dreams are illustrations from the book your soul is writing about you.", "Marsha Norman"),
    ("A dream which is not interpreted is like a letter which is not read.", "The Talmud"),
    ("Who looks outside, dreams; who looks inside, awakes.", "Carl Jung"),
    ("We are such stuff as dreams are made on.", "William Shakespeare"),
    ("Dreams pass into the reality of action. From the actions stems the dream again.", "Anaïs Nin"),
    ("Dreams are today's answers to tomorrow's questions.", "Edgar Cayce"),
    ("The interpretation of dreams is the royal road to a knowledge of the unconscious activities of the mind.", "Sigmund Freud"),
    ("Your visions will become clear only when you can look into your own heart.", "Carl Jung"),
];

/// Picks quotes uniformly at random, skipping recently shown ones.
///
/// Each surface that rotates quotes owns its own instance.
#[derive(Debug)]
pub struct QuoteRotator {
    quotes: Vec<Quote>,
    history: VecDeque<usize>,
    rng: StdRng,
}

impl QuoteRotator {
    pub fn new(quotes: Vec<Quote>) -> Self {
        Self::with_rng(quotes, StdRng::from_entropy())
    }

    pub fn with_rng(quotes: Vec<Quote>, rng: StdRng) -> Self {
        Self {
            quotes,
            history: VecDeque::new(),
            rng,
        }
    }

    fn capacity(&self) -> usize {
        HISTORY_CAPACITY.min(self.quotes.len())
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Next quote, or `None` when the set is empty
    pub fn next(&mut self) -> Option<&Quote> {
        if self.quotes.is_empty() {
            return None;
        }

        if self.history.len() >= self.capacity() {
            // Keep the last pick excluded so the new cycle can't open with it
            let last = self.history.back().copied();
            self.history.clear();
            if let (Some(last), true) = (last, self.quotes.len() > 1) {
                self.history.push_back(last);
            }
        }

        let candidates: Vec<usize> = (0..self.quotes.len())
            .filter(|i| !self.history.contains(i))
            .collect();
        let index = *candidates.choose(&mut self.rng)?;

        self.history.push_back(index);
        Some(&self.quotes[index])
    }
}

impl Default for QuoteRotator {
    fn default() -> Self {
        Self::new(
            DREAM_QUOTES
                .iter()
                .map(|(text, author)| Quote::new(*text, *author))
                .collect(),
        )
    }
}
