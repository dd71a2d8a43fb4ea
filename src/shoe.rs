use crate::cards::{Card, Rank, Suit};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A single 52-card deck, built fresh for every round.
///
/// Cards are drawn from the end of the internal sequence (the "top").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shoe {
    cards: Vec<Card>,
}

impl Shoe {
    /// Unshuffled standard deck, one card per rank×suit.
    ///
    /// ```
    /// use blackjack_rs::shoe::Shoe;
    ///
    /// let shoe = Shoe::standard();
    /// assert_eq!(shoe.len(), 52);
    /// ```
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(52);
        for &s in &Suit::ALL {
            for &r in &Rank::ALL {
                cards.push(Card::new(r, s));
            }
        }
        Self { cards }
    }

    /// Standard deck shuffled with the thread RNG.
    pub fn new() -> Self {
        let mut shoe = Self::standard();
        shoe.shuffle_with(&mut rand::rng());
        shoe
    }

    /// Standard deck shuffled with a seeded RNG for reproducibility.
    pub fn shuffled_seeded(seed: u64) -> Self {
        let mut shoe = Self::standard();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        shoe.shuffle_with(&mut rng);
        shoe
    }

    /// A shoe that deals exactly `cards`, first element first. No shuffle.
    ///
    /// ```
    /// use blackjack_rs::cards::parse_cards;
    /// use blackjack_rs::shoe::Shoe;
    ///
    /// let mut shoe = Shoe::stacked(parse_cards("As Kd").unwrap());
    /// assert_eq!(shoe.draw().unwrap().to_string(), "As");
    /// assert_eq!(shoe.draw().unwrap().to_string(), "Kd");
    /// assert!(shoe.draw().is_none());
    /// ```
    pub fn stacked(cards: Vec<Card>) -> Self {
        let mut cards = cards;
        cards.reverse();
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Shuffle using the provided RNG implementing Rng.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Draw one card from the top of the shoe; `None` once exhausted.
    pub fn draw(&mut self) -> Option<Card> {
        let card = self.cards.pop();
        if let Some(c) = card {
            log::trace!("drew {c}, {} left", self.cards.len());
        }
        card
    }

    /// Draw `n` cards from the top of the shoe.
    pub fn draw_n(&mut self, n: usize) -> Vec<Card> {
        (0..n).filter_map(|_| self.draw()).collect()
    }
}

impl Default for Shoe {
    fn default() -> Self {
        Self::new()
    }
}
