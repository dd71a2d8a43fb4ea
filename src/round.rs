//! The round engine: one betting round at a time, driven by explicit phases.
//!
//! A round moves through
//! `AwaitingBet → InitialDeal → InsuranceOffer? → PlayerDecision → DealerPlay → Settlement → Done`.
//! Only `AwaitingBet`, `InsuranceOffer`, `PlayerDecision` and `Done` are ever
//! observed between calls; the others run to completion inside a single call.

use crate::cards::{Card, Rank};
use crate::config::{ConfigError, TableConfig};
use crate::hand::{hand_value, Hand};
use crate::money::{Money, MoneyParseError};
use crate::participant::{Dealer, HandStatus, Player, PlayerHand, Role};
use crate::settlement::{
    insurance_payout, natural_payout, settle, surrender_refund, Outcome, Settlement,
};
use crate::shoe::Shoe;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Phase {
    AwaitingBet,
    InitialDeal,
    InsuranceOffer,
    PlayerDecision,
    DealerPlay,
    Settlement,
    Done,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::AwaitingBet => "Place your bet",
            Phase::InitialDeal => "Dealing",
            Phase::InsuranceOffer => "Insurance?",
            Phase::PlayerDecision => "Your move",
            Phase::DealerPlay => "Dealer plays",
            Phase::Settlement => "Settling",
            Phase::Done => "Round over",
        }
    }

    /// A new bet may be placed.
    pub fn accepts_bet(self) -> bool {
        matches!(self, Phase::AwaitingBet | Phase::Done)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Decision {
    Hit,
    Stand,
    Double,
    Surrender,
    Split,
}

impl Decision {
    pub fn label(self) -> &'static str {
        match self {
            Decision::Hit => "Hit",
            Decision::Stand => "Stand",
            Decision::Double => "Double",
            Decision::Surrender => "Surrender",
            Decision::Split => "Split",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InsuranceOutcome {
    /// Insurance refused; play continues.
    Declined,
    /// Insured, dealer and player both hold 21: main bet refunded, insurance paid.
    DealerBlackjackPush,
    /// Insured against a dealer blackjack: main bet lost, insurance paid.
    DealerBlackjackLoss,
    /// Insured, dealer has no blackjack: insurance stake forfeited, play continues.
    Continue,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BetError {
    #[error("bet below table minimum: min {min}, got {got}")]
    BelowMinimum { min: Money, got: Money },
    #[error("bet exceeds bankroll: bankroll {bankroll}, got {got}")]
    ExceedsBankroll { bankroll: Money, got: Money },
    #[error("bet is not a number: {0}")]
    NotANumber(String),
    #[error("a round is already in progress")]
    RoundInProgress,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionError {
    #[error("action not available while {phase:?}")]
    WrongPhase { phase: Phase },
    #[error("{} is not allowed on this hand", .decision.label())]
    NotAllowed { decision: Decision },
    #[error("hand {got} is not the active hand (active: {expected})")]
    NotActiveHand { expected: usize, got: usize },
    #[error("insufficient funds: need {need}, have {have}")]
    InsufficientFunds { need: Money, have: Money },
    #[error("insurance is not on offer")]
    InsuranceNotOffered,
    #[error("bankroll {bankroll} still covers the minimum bet")]
    CashInNotNeeded { bankroll: Money },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RoundError {
    #[error("invalid bet: {0}")]
    InvalidBet(#[from] BetError),
    #[error("invalid action: {0}")]
    InvalidAction(#[from] ActionError),
    #[error("shoe exhausted; round voided and stakes refunded")]
    ShoeExhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DealSummary {
    pub insurance_offered: bool,
    pub round_over: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecisionResult {
    pub hand_total: u8,
    pub busted: bool,
    pub round_over: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum HistoryVerb {
    Bet,
    Deal,
    InsuranceTaken,
    InsuranceDeclined,
    InsuranceWin,
    InsuranceLoss,
    Hit,
    Stand,
    Double,
    Split,
    Reveal,
    DealerDraw,
    Win,
    Lose,
    Push,
    Bust,
    Blackjack,
    Surrender,
    Refund,
}

impl HistoryVerb {
    pub fn label(self) -> &'static str {
        match self {
            HistoryVerb::Bet => "Bet",
            HistoryVerb::Deal => "Deal",
            HistoryVerb::InsuranceTaken => "Insurance",
            HistoryVerb::InsuranceDeclined => "No insurance",
            HistoryVerb::InsuranceWin => "Insurance pays",
            HistoryVerb::InsuranceLoss => "Insurance lost",
            HistoryVerb::Hit => "Hit",
            HistoryVerb::Stand => "Stand",
            HistoryVerb::Double => "Double",
            HistoryVerb::Split => "Split",
            HistoryVerb::Reveal => "Reveal",
            HistoryVerb::DealerDraw => "Draw",
            HistoryVerb::Win => "Win",
            HistoryVerb::Lose => "Lose",
            HistoryVerb::Push => "Push",
            HistoryVerb::Bust => "Bust",
            HistoryVerb::Blackjack => "Blackjack",
            HistoryVerb::Surrender => "Surrender",
            HistoryVerb::Refund => "Refund",
        }
    }
}

impl From<Outcome> for HistoryVerb {
    fn from(o: Outcome) -> Self {
        match o {
            Outcome::Win => HistoryVerb::Win,
            Outcome::Lose => HistoryVerb::Lose,
            Outcome::Push => HistoryVerb::Push,
            Outcome::Bust => HistoryVerb::Bust,
            Outcome::Blackjack => HistoryVerb::Blackjack,
            Outcome::Surrender => HistoryVerb::Surrender,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct HistoryEntry {
    pub role: Role,
    pub verb: HistoryVerb,
    /// Player hand index, when the entry concerns one hand.
    pub hand: Option<usize>,
    pub card: Option<Card>,
    pub amount: Option<Money>,
}

/// A finished round, kept for display until the next bet.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct RoundSummary {
    pub hands: Vec<PlayerHand>,
    pub dealer_hand: Hand,
    pub bet: Money,
    pub insurance: Option<Money>,
    pub wagered: Money,
    pub returned: Money,
    pub aborted: bool,
}

impl RoundSummary {
    /// Net bankroll change over the round.
    pub fn net(&self) -> Money {
        self.returned - self.wagered
    }
}

/// Render-ready snapshot of the table.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct TableView {
    pub phase: Phase,
    pub player_hands: Vec<PlayerHand>,
    pub active_hand: Option<usize>,
    /// Dealer cards in deal order; `None` marks the face-down hole card.
    pub dealer_cards: Vec<Option<Card>>,
    /// Total of the dealer's visible cards.
    pub dealer_total: u8,
    pub dealer_hole_hidden: bool,
    pub bankroll: Money,
    pub current_bet: Money,
    pub insurance_bet: Option<Money>,
}

#[derive(Debug)]
#[non_exhaustive]
pub struct Table {
    pub(crate) config: TableConfig,
    rng: ChaCha8Rng,
    shoe: Shoe,
    pub(crate) player: Player,
    pub(crate) dealer: Dealer,
    pub(crate) phase: Phase,
    pub(crate) bet: Money,
    pub(crate) insurance: Option<Money>,
    pub(crate) split: bool,
    pub(crate) active: usize,
    hole_revealed: bool,
    wagered: Money,
    returned: Money,
    last_round: Option<RoundSummary>,
    rounds_played: u64,
    history: Vec<HistoryEntry>,
}

impl Table {
    pub fn new(config: TableConfig) -> Self {
        let seed: u64 = rand::rng().random();
        Self::with_seed(config, seed)
    }

    /// Like [`Table::new`] but rejects invalid stakes.
    pub fn try_new(config: TableConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Every round's shoe is shuffled from this seed's RNG stream.
    pub fn with_seed(config: TableConfig, seed: u64) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
            shoe: Shoe::stacked(Vec::new()),
            player: Player::new(config.starting_bankroll),
            dealer: Dealer::new(),
            phase: Phase::AwaitingBet,
            bet: Money::ZERO,
            insurance: None,
            split: false,
            active: 0,
            hole_revealed: false,
            wagered: Money::ZERO,
            returned: Money::ZERO,
            last_round: None,
            rounds_played: 0,
            history: Vec::new(),
        }
    }

    pub fn config(&self) -> TableConfig {
        self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn bankroll(&self) -> Money {
        self.player.bankroll
    }

    pub fn min_bet(&self) -> Money {
        self.config.min_bet
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn dealer(&self) -> &Dealer {
        &self.dealer
    }

    /// Index of the hand currently taking decisions.
    pub fn active_hand(&self) -> Option<usize> {
        matches!(self.phase, Phase::PlayerDecision).then_some(self.active)
    }

    pub fn is_split(&self) -> bool {
        self.split
    }

    pub fn rounds_played(&self) -> u64 {
        self.rounds_played
    }

    pub fn last_round(&self) -> Option<&RoundSummary> {
        self.last_round.as_ref()
    }

    pub fn round_over(&self) -> bool {
        matches!(self.phase, Phase::Done)
    }

    pub fn insurance_offered(&self) -> bool {
        matches!(self.phase, Phase::InsuranceOffer)
    }

    pub fn dealer_hole_hidden(&self) -> bool {
        matches!(self.phase, Phase::InitialDeal | Phase::InsuranceOffer | Phase::PlayerDecision)
    }

    pub fn history_recent(&self, n: usize) -> Vec<HistoryEntry> {
        if n == 0 {
            return Vec::new();
        }
        let len = self.history.len();
        let start = len.saturating_sub(n);
        self.history[start..].to_vec()
    }

    pub fn history_recent_offset(&self, n: usize, offset: usize) -> Vec<HistoryEntry> {
        if n == 0 {
            return Vec::new();
        }
        let len = self.history.len();
        if len == 0 {
            return Vec::new();
        }
        let max_offset = len.saturating_sub(n);
        let offset = offset.min(max_offset);
        let end = len.saturating_sub(offset);
        let start = end.saturating_sub(n);
        self.history[start..end].to_vec()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Hands of the round in progress, or of the last finished round.
    pub fn player_hands(&self) -> &[PlayerHand] {
        if self.player.hands.is_empty() {
            if let Some(last) = &self.last_round {
                return &last.hands;
            }
        }
        &self.player.hands
    }

    fn dealer_cards(&self) -> &[Card] {
        if self.dealer.hand.is_empty() {
            if let Some(last) = &self.last_round {
                return last.dealer_hand.as_slice();
            }
        }
        self.dealer.hand.as_slice()
    }

    pub fn state(&self) -> TableView {
        let hidden = self.dealer_hole_hidden();
        let cards = self.dealer_cards();
        let dealer_cards: Vec<Option<Card>> = cards
            .iter()
            .enumerate()
            .map(|(i, c)| if hidden && i == 0 { None } else { Some(*c) })
            .collect();
        let dealer_total = if hidden {
            hand_value(cards.get(1..).unwrap_or(&[]))
        } else {
            hand_value(cards)
        };
        let (current_bet, insurance_bet) = match (&self.last_round, self.phase) {
            (Some(last), Phase::Done) => (last.bet, last.insurance),
            _ => (self.bet, self.insurance),
        };
        TableView {
            phase: self.phase,
            player_hands: self.player_hands().to_vec(),
            active_hand: self.active_hand(),
            dealer_cards,
            dealer_total,
            dealer_hole_hidden: hidden,
            bankroll: self.player.bankroll,
            current_bet,
            insurance_bet,
        }
    }

    /// Decisions currently legal for the active hand. Funds are checked on use.
    pub fn legal_decisions(&self) -> Vec<Decision> {
        if !matches!(self.phase, Phase::PlayerDecision) {
            return Vec::new();
        }
        let Some(h) = self.player.hands.get(self.active) else {
            return Vec::new();
        };
        if !h.is_playing() {
            return Vec::new();
        }
        let mut out = vec![Decision::Hit, Decision::Stand];
        // Split branches only hit or stand.
        if self.split {
            return out;
        }
        out.push(Decision::Surrender);
        let fresh = !h.acted && h.hand.len() == 2;
        if fresh {
            out.push(Decision::Double);
            if h.hand.can_split() {
                out.push(Decision::Split);
            }
        }
        out
    }

    fn validate_bet(&self, bet: Money) -> Result<(), BetError> {
        if !self.phase.accepts_bet() {
            return Err(BetError::RoundInProgress);
        }
        if bet < self.config.min_bet {
            return Err(BetError::BelowMinimum { min: self.config.min_bet, got: bet });
        }
        if bet > self.player.bankroll {
            return Err(BetError::ExceedsBankroll { bankroll: self.player.bankroll, got: bet });
        }
        Ok(())
    }

    /// Place `bet` and deal a freshly shuffled shoe.
    pub fn start_round(&mut self, bet: Money) -> Result<DealSummary, RoundError> {
        self.validate_bet(bet)?;
        let mut shoe = Shoe::standard();
        shoe.shuffle_with(&mut self.rng);
        self.begin_round(bet, shoe)
    }

    /// Place `bet` and deal from `shoe` as given.
    pub fn start_round_with_shoe(&mut self, bet: Money, shoe: Shoe) -> Result<DealSummary, RoundError> {
        self.validate_bet(bet)?;
        self.begin_round(bet, shoe)
    }

    /// Parse a typed bet, then start the round.
    pub fn start_round_str(&mut self, input: &str) -> Result<DealSummary, RoundError> {
        let bet: Money = input.parse().map_err(|e: MoneyParseError| match e {
            MoneyParseError::Empty => BetError::NotANumber(String::new()),
            _ => BetError::NotANumber(input.trim().to_string()),
        })?;
        self.start_round(bet)
    }

    fn begin_round(&mut self, bet: Money, shoe: Shoe) -> Result<DealSummary, RoundError> {
        self.player.reset_hands();
        self.dealer.reset_hand();
        self.history.clear();
        self.last_round = None;
        self.shoe = shoe;
        self.bet = bet;
        self.insurance = None;
        self.split = false;
        self.active = 0;
        self.hole_revealed = false;
        self.wagered = Money::ZERO;
        self.returned = Money::ZERO;
        self.set_phase(Phase::InitialDeal);

        self.stake(bet)?;
        log::info!(
            "round {} started: bet {bet}, bankroll {}",
            self.rounds_played + 1,
            self.player.bankroll
        );
        self.record(Role::Player, HistoryVerb::Bet, Some(0), None, Some(bet));
        self.player.hands.push(PlayerHand::new(Hand::new(), bet, false));

        for i in 0..2 {
            let card = self.draw()?;
            self.player.hands[0].hand.push(card);
            self.record(Role::Player, HistoryVerb::Deal, Some(0), Some(card), None);
            let card = self.draw()?;
            self.dealer.hand.push(card);
            // First dealer card is the hole card; it is logged on reveal.
            let shown = (i == 1).then_some(card);
            self.record(Role::Dealer, HistoryVerb::Deal, None, shown, None);
        }

        if self.dealer.up_card().map(|c| c.rank()) == Some(Rank::Ace) {
            self.set_phase(Phase::InsuranceOffer);
            return Ok(DealSummary { insurance_offered: true, round_over: false });
        }
        let round_over = self.resolve_natural();
        Ok(DealSummary { insurance_offered: false, round_over })
    }

    /// Answer the insurance offer made when the dealer shows an Ace.
    pub fn take_insurance(&mut self, accept: bool) -> Result<InsuranceOutcome, RoundError> {
        if !matches!(self.phase, Phase::InsuranceOffer) {
            return Err(ActionError::InsuranceNotOffered.into());
        }
        if !accept {
            self.record(Role::Player, HistoryVerb::InsuranceDeclined, None, None, None);
            self.resolve_natural();
            return Ok(InsuranceOutcome::Declined);
        }

        let stake = self.bet.half();
        self.stake(stake)?;
        self.insurance = Some(stake);
        self.record(Role::Player, HistoryVerb::InsuranceTaken, None, None, Some(stake));

        if self.dealer.hand.is_blackjack() {
            let payout = insurance_payout(stake);
            self.pay(payout);
            self.record(Role::Player, HistoryVerb::InsuranceWin, None, None, Some(payout));
            self.reveal_hole();
            let outcome = if self.player.hands[0].hand.is_blackjack() {
                self.apply_settlement(0, Settlement { outcome: Outcome::Push, credit: self.bet });
                InsuranceOutcome::DealerBlackjackPush
            } else {
                self.apply_settlement(0, Settlement { outcome: Outcome::Lose, credit: Money::ZERO });
                InsuranceOutcome::DealerBlackjackLoss
            };
            self.finish_round(false);
            return Ok(outcome);
        }

        self.record(Role::Player, HistoryVerb::InsuranceLoss, None, None, Some(stake));
        self.resolve_natural();
        Ok(InsuranceOutcome::Continue)
    }

    /// Apply `decision` to the hand at `hand_index`, which must be the active hand.
    pub fn decide(&mut self, decision: Decision, hand_index: usize) -> Result<DecisionResult, RoundError> {
        if !matches!(self.phase, Phase::PlayerDecision) {
            return Err(ActionError::WrongPhase { phase: self.phase }.into());
        }
        if hand_index != self.active {
            return Err(ActionError::NotActiveHand { expected: self.active, got: hand_index }.into());
        }
        if !self.legal_decisions().contains(&decision) {
            return Err(ActionError::NotAllowed { decision }.into());
        }

        match decision {
            Decision::Hit => self.hit()?,
            Decision::Stand => self.stand()?,
            Decision::Double => self.double_down()?,
            Decision::Surrender => self.surrender(),
            Decision::Split => self.split_hand()?,
        }

        let (hand_total, busted) = self
            .player_hands()
            .get(hand_index)
            .map(|h| (h.value(), h.hand.is_bust()))
            .unwrap_or((0, false));
        Ok(DecisionResult { hand_total, busted, round_over: self.round_over() })
    }

    /// Reset a depleted bankroll to the starting amount between rounds.
    pub fn cash_in(&mut self) -> Result<Money, RoundError> {
        if !self.phase.accepts_bet() {
            return Err(ActionError::WrongPhase { phase: self.phase }.into());
        }
        if !self.needs_cash_in() {
            return Err(ActionError::CashInNotNeeded { bankroll: self.player.bankroll }.into());
        }
        log::info!(
            "cash-in: bankroll {} reset to {}",
            self.player.bankroll,
            self.config.starting_bankroll
        );
        self.player.bankroll = self.config.starting_bankroll;
        Ok(self.player.bankroll)
    }

    /// The bankroll can no longer cover the minimum bet.
    pub fn needs_cash_in(&self) -> bool {
        self.player.bankroll < self.config.min_bet
    }

    fn hit(&mut self) -> Result<(), RoundError> {
        let idx = self.active;
        let card = self.draw()?;
        let hand = &mut self.player.hands[idx];
        hand.hand.push(card);
        hand.acted = true;
        let busted = hand.hand.is_bust();
        log::debug!("hand {} hits {card}: {}", idx + 1, hand.hand.value());
        self.record(Role::Player, HistoryVerb::Hit, Some(idx), Some(card), None);
        if busted {
            self.player.hands[idx].status = HandStatus::Bust;
            self.apply_settlement(idx, Settlement { outcome: Outcome::Bust, credit: Money::ZERO });
            self.advance()?;
        }
        Ok(())
    }

    fn stand(&mut self) -> Result<(), RoundError> {
        let idx = self.active;
        let hand = &mut self.player.hands[idx];
        hand.status = HandStatus::Stood;
        hand.acted = true;
        self.record(Role::Player, HistoryVerb::Stand, Some(idx), None, None);
        self.advance()
    }

    fn double_down(&mut self) -> Result<(), RoundError> {
        let idx = self.active;
        let extra = self.player.hands[idx].stake;
        self.stake(extra)?;
        {
            let hand = &mut self.player.hands[idx];
            hand.doubled = true;
            hand.acted = true;
        }
        self.record(Role::Player, HistoryVerb::Double, Some(idx), None, Some(extra));
        let card = self.draw()?;
        let hand = &mut self.player.hands[idx];
        hand.hand.push(card);
        let busted = hand.hand.is_bust();
        hand.status = if busted { HandStatus::Bust } else { HandStatus::Doubled };
        self.record(Role::Player, HistoryVerb::Hit, Some(idx), Some(card), None);
        if busted {
            self.apply_settlement(idx, Settlement { outcome: Outcome::Bust, credit: Money::ZERO });
        }
        self.advance()
    }

    fn surrender(&mut self) {
        let idx = self.active;
        let hand = &mut self.player.hands[idx];
        hand.status = HandStatus::Surrendered;
        hand.acted = true;
        let refund = surrender_refund(hand.stake);
        self.apply_settlement(idx, refund);
        self.reveal_hole();
        self.finish_round(false);
    }

    fn split_hand(&mut self) -> Result<(), RoundError> {
        let Some((first, second)) = self.player.hands[0].hand.split_pair() else {
            return Err(ActionError::NotAllowed { decision: Decision::Split }.into());
        };
        let bet = self.player.hands[0].stake;
        self.stake(bet)?;
        self.player.hands =
            vec![PlayerHand::new(first, bet, true), PlayerHand::new(second, bet, true)];
        self.split = true;
        self.active = 0;
        self.record(Role::Player, HistoryVerb::Split, None, None, Some(bet));
        log::debug!("split into {} | {}", self.player.hands[0].hand, self.player.hands[1].hand);
        Ok(())
    }

    /// Move to the next undecided hand, or run the dealer and settle.
    fn advance(&mut self) -> Result<(), RoundError> {
        if let Some(next) = self.player.hands.iter().position(PlayerHand::is_playing) {
            self.active = next;
            return Ok(());
        }
        self.reveal_hole();
        // Busted hands are already lost; the dealer only plays against live ones.
        let any_live = self.player.hands.iter().any(|h| h.outcome.is_none());
        if any_live {
            self.dealer_play()?;
            self.settle_hands();
        }
        self.finish_round(false);
        Ok(())
    }

    fn dealer_play(&mut self) -> Result<(), RoundError> {
        self.set_phase(Phase::DealerPlay);
        while self.dealer.should_draw() {
            let card = self.draw()?;
            self.dealer.hand.push(card);
            self.record(Role::Dealer, HistoryVerb::DealerDraw, None, Some(card), None);
        }
        log::debug!("dealer stands on {}", self.dealer.hand.value());
        Ok(())
    }

    fn settle_hands(&mut self) {
        self.set_phase(Phase::Settlement);
        let dealer_total = self.dealer.hand.value();
        for idx in 0..self.player.hands.len() {
            let h = &self.player.hands[idx];
            if h.outcome.is_some() {
                continue;
            }
            let s = settle(h.value(), dealer_total, h.stake, h.doubled);
            self.apply_settlement(idx, s);
        }
    }

    /// Natural check right after the deal (and after any insurance decision).
    fn resolve_natural(&mut self) -> bool {
        if self.player.hands[0].hand.is_blackjack() {
            self.apply_settlement(0, natural_payout(self.bet));
            self.reveal_hole();
            self.finish_round(false);
            true
        } else {
            self.set_phase(Phase::PlayerDecision);
            false
        }
    }

    fn apply_settlement(&mut self, idx: usize, s: Settlement) {
        let hand = &mut self.player.hands[idx];
        hand.outcome = Some(s.outcome);
        hand.credit = s.credit;
        self.pay(s.credit);
        self.record(Role::Player, s.outcome.into(), Some(idx), None, Some(s.credit));
        log::info!("hand {} {}: credit {}", idx + 1, s.outcome.label(), s.credit);
    }

    fn reveal_hole(&mut self) {
        if self.hole_revealed {
            return;
        }
        self.hole_revealed = true;
        let hole = self.dealer.hole_card();
        self.record(Role::Dealer, HistoryVerb::Reveal, None, hole, None);
    }

    fn draw(&mut self) -> Result<Card, RoundError> {
        match self.shoe.draw() {
            Some(card) => Ok(card),
            None => {
                self.abort_round();
                Err(RoundError::ShoeExhausted)
            }
        }
    }

    /// Void the round: every unsettled stake goes back to the bankroll.
    fn abort_round(&mut self) {
        let refund: Money = self
            .player
            .hands
            .iter()
            .filter(|h| h.outcome.is_none())
            .map(PlayerHand::effective_stake)
            .sum();
        log::warn!("shoe exhausted mid-round; refunding {refund}");
        self.pay(refund);
        self.record(Role::Player, HistoryVerb::Refund, None, None, Some(refund));
        self.finish_round(true);
    }

    fn finish_round(&mut self, aborted: bool) {
        let hands = std::mem::take(&mut self.player.hands);
        let dealer_hand = std::mem::take(&mut self.dealer.hand);
        let summary = RoundSummary {
            hands,
            dealer_hand,
            bet: self.bet,
            insurance: self.insurance,
            wagered: self.wagered,
            returned: self.returned,
            aborted,
        };
        self.rounds_played += 1;
        log::info!(
            "round {} over: net {}, bankroll {}",
            self.rounds_played,
            summary.net(),
            self.player.bankroll
        );
        self.last_round = Some(summary);
        self.set_phase(Phase::Done);
    }

    fn stake(&mut self, amount: Money) -> Result<(), ActionError> {
        self.player.debit(amount)?;
        self.wagered += amount;
        Ok(())
    }

    fn pay(&mut self, amount: Money) {
        self.player.credit(amount);
        self.returned += amount;
    }

    fn set_phase(&mut self, next: Phase) {
        if self.phase != next {
            log::debug!("phase {:?} -> {:?}", self.phase, next);
        }
        self.phase = next;
    }

    fn record(
        &mut self,
        role: Role,
        verb: HistoryVerb,
        hand: Option<usize>,
        card: Option<Card>,
        amount: Option<Money>,
    ) {
        self.history.push(HistoryEntry { role, verb, hand, card, amount });
    }
}
