use crate::cards::Card;
use crate::hand::Hand;
use crate::money::Money;
use crate::round::ActionError;
use crate::settlement::Outcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Role {
    Player,
    Dealer,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::Player => "Player",
            Role::Dealer => "Dealer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandStatus {
    /// Still taking decisions.
    Playing,
    Stood,
    /// Took the forced double-down card; no further decisions.
    Doubled,
    Bust,
    Surrendered,
}

/// One of the player's hands with the stake riding on it.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct PlayerHand {
    pub(crate) hand: Hand,
    pub(crate) stake: Money,
    pub(crate) doubled: bool,
    pub(crate) from_split: bool,
    pub(crate) acted: bool,
    pub(crate) status: HandStatus,
    pub(crate) outcome: Option<Outcome>,
    pub(crate) credit: Money,
}

impl PlayerHand {
    pub(crate) fn new(hand: Hand, stake: Money, from_split: bool) -> Self {
        Self {
            hand,
            stake,
            doubled: false,
            from_split,
            acted: false,
            status: HandStatus::Playing,
            outcome: None,
            credit: Money::ZERO,
        }
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn cards(&self) -> &[Card] {
        self.hand.as_slice()
    }

    pub fn value(&self) -> u8 {
        self.hand.value()
    }

    /// The original bet for this hand (before any double).
    pub fn stake(&self) -> Money {
        self.stake
    }

    /// Stake actually at risk: doubled hands carry twice the original bet.
    pub fn effective_stake(&self) -> Money {
        if self.doubled {
            self.stake.times(2)
        } else {
            self.stake
        }
    }

    pub fn doubled(&self) -> bool {
        self.doubled
    }

    pub fn from_split(&self) -> bool {
        self.from_split
    }

    /// Whether any decision beyond the initial deal has been taken on this hand.
    pub fn acted(&self) -> bool {
        self.acted
    }

    pub fn status(&self) -> HandStatus {
        self.status
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Amount returned to the bankroll when this hand settled.
    pub fn credit(&self) -> Money {
        self.credit
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.status, HandStatus::Playing)
    }
}

/// The human side: a persistent bankroll plus this round's hands.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Player {
    pub(crate) bankroll: Money,
    pub(crate) hands: Vec<PlayerHand>,
}

impl Player {
    pub fn new(bankroll: Money) -> Self {
        Self { bankroll, hands: Vec::new() }
    }

    pub fn bankroll(&self) -> Money {
        self.bankroll
    }

    pub fn hands(&self) -> &[PlayerHand] {
        &self.hands
    }

    pub fn can_afford(&self, amount: Money) -> bool {
        amount <= self.bankroll
    }

    /// Removes `amount` from the bankroll; never drives it negative.
    pub(crate) fn debit(&mut self, amount: Money) -> Result<(), ActionError> {
        if !self.can_afford(amount) {
            return Err(ActionError::InsufficientFunds { need: amount, have: self.bankroll });
        }
        self.bankroll -= amount;
        Ok(())
    }

    pub(crate) fn credit(&mut self, amount: Money) {
        self.bankroll += amount;
    }

    pub(crate) fn reset_hands(&mut self) {
        self.hands.clear();
    }
}

/// The house side: a single hand, first card face down.
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct Dealer {
    pub(crate) hand: Hand,
}

impl Dealer {
    pub fn new() -> Self {
        Self { hand: Hand::new() }
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    /// The face-down card (first dealt to the dealer).
    pub fn hole_card(&self) -> Option<Card> {
        self.hand.as_slice().first().copied()
    }

    /// The face-up card (second dealt to the dealer).
    pub fn up_card(&self) -> Option<Card> {
        self.hand.as_slice().get(1).copied()
    }

    /// Fixed house policy: draw below 17, stand on any 17 including soft 17.
    pub fn should_draw(&self) -> bool {
        self.hand.value() < 17
    }

    pub(crate) fn reset_hand(&mut self) {
        self.hand.clear();
    }
}
