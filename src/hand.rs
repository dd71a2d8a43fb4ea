use crate::cards::{parse_cards, Card, RankClass};
use std::fmt;
use std::str::FromStr;

/// Blackjack total of `cards` under the soft-ace rule.
///
/// Every Ace starts at 11; while the total is over 21 and an Ace is still
/// counted high, one Ace is demoted to 1.
///
/// ```
/// use blackjack_rs::cards::parse_cards;
/// use blackjack_rs::hand::hand_value;
///
/// assert_eq!(hand_value(&parse_cards("As 9c").unwrap()), 20);
/// assert_eq!(hand_value(&parse_cards("As Ah 9c").unwrap()), 21);
/// ```
pub fn hand_value(cards: &[Card]) -> u8 {
    evaluate(cards).0
}

/// Returns the total and whether an Ace is still counted as 11.
fn evaluate(cards: &[Card]) -> (u8, bool) {
    let mut total: u32 = 0;
    let mut soft_aces = 0u32;
    for card in cards {
        total += match card.rank().class() {
            RankClass::Pip(n) => u32::from(n),
            RankClass::Face => 10,
            RankClass::Ace => {
                soft_aces += 1;
                11
            }
        };
    }
    while total > 21 && soft_aces > 0 {
        total -= 10;
        soft_aces -= 1;
    }
    (u8::try_from(total).unwrap_or(u8::MAX), soft_aces > 0)
}

/// Two cards that total 21.
pub fn is_blackjack(cards: &[Card]) -> bool {
    cards.len() == 2 && hand_value(cards) == 21
}

/// Two cards of identical rank, or two cards from the ten-value group.
pub fn can_split_cards(a: Card, b: Card) -> bool {
    a.rank() == b.rank() || (a.rank().is_ten_value() && b.rank().is_ten_value())
}

/// An ordered sequence of dealt cards. The value is derived on every call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    pub fn value(&self) -> u8 {
        hand_value(&self.cards)
    }

    /// An Ace is still counted as 11.
    pub fn is_soft(&self) -> bool {
        evaluate(&self.cards).1
    }

    pub fn is_bust(&self) -> bool {
        self.value() > 21
    }

    /// Two-card 21. Whether it pays as a natural is the round's decision.
    pub fn is_blackjack(&self) -> bool {
        is_blackjack(&self.cards)
    }

    pub fn can_split(&self) -> bool {
        match self.cards.as_slice() {
            [a, b] => can_split_cards(*a, *b),
            _ => false,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.cards.clear();
    }

    /// Break a two-card hand into two one-card hands.
    pub(crate) fn split_pair(&self) -> Option<(Hand, Hand)> {
        match self.cards.as_slice() {
            [a, b] => Some((Hand::from_cards(vec![*a]), Hand::from_cards(vec![*b]))),
            _ => None,
        }
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cards: Vec<String> = self.cards.iter().map(|c| c.to_string()).collect();
        write!(f, "{} ({})", cards.join(" "), self.value())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error("card parse error: {0}")]
    CardParse(String),
}

impl FromStr for Hand {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))?;
        Ok(Hand::from_cards(cards))
    }
}
