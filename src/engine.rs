// Minimal round engine API boundary. This trait exposes the player's moves
// and the table queries so UIs (TUI, scripted drivers) can run rounds without
// depending on engine internals. It is implemented for the core `Table` type.

use crate::money::Money;
use crate::round::{
    Decision, DealSummary, DecisionResult, HistoryEntry, InsuranceOutcome, Phase, RoundError,
    Table, TableView,
};

pub trait RoundEngine {
    // Round lifecycle
    fn start_round(&mut self, bet: Money) -> Result<DealSummary, RoundError>;
    fn start_round_str(&mut self, input: &str) -> Result<DealSummary, RoundError>;
    fn cash_in(&mut self) -> Result<Money, RoundError>;

    // Player moves
    fn take_insurance(&mut self, accept: bool) -> Result<InsuranceOutcome, RoundError>;
    fn decide(&mut self, decision: Decision, hand_index: usize) -> Result<DecisionResult, RoundError>;

    // Queries
    fn state(&self) -> TableView;
    fn phase(&self) -> Phase;
    fn bankroll(&self) -> Money;
    fn min_bet(&self) -> Money;
    fn active_hand(&self) -> Option<usize>;
    fn legal_decisions(&self) -> Vec<Decision>;
    fn insurance_offered(&self) -> bool;
    fn needs_cash_in(&self) -> bool;
    fn history_recent_offset(&self, n: usize, offset: usize) -> Vec<HistoryEntry>;
    fn history_len(&self) -> usize;
}

impl RoundEngine for Table {
    fn start_round(&mut self, bet: Money) -> Result<DealSummary, RoundError> {
        self.start_round(bet)
    }
    fn start_round_str(&mut self, input: &str) -> Result<DealSummary, RoundError> {
        self.start_round_str(input)
    }
    fn cash_in(&mut self) -> Result<Money, RoundError> {
        self.cash_in()
    }

    fn take_insurance(&mut self, accept: bool) -> Result<InsuranceOutcome, RoundError> {
        self.take_insurance(accept)
    }
    fn decide(&mut self, decision: Decision, hand_index: usize) -> Result<DecisionResult, RoundError> {
        self.decide(decision, hand_index)
    }

    fn state(&self) -> TableView {
        self.state()
    }
    fn phase(&self) -> Phase {
        self.phase
    }
    fn bankroll(&self) -> Money {
        self.player.bankroll
    }
    fn min_bet(&self) -> Money {
        self.config.min_bet
    }
    fn active_hand(&self) -> Option<usize> {
        self.active_hand()
    }
    fn legal_decisions(&self) -> Vec<Decision> {
        self.legal_decisions()
    }
    fn insurance_offered(&self) -> bool {
        self.insurance_offered()
    }
    fn needs_cash_in(&self) -> bool {
        self.needs_cash_in()
    }
    fn history_recent_offset(&self, n: usize, offset: usize) -> Vec<HistoryEntry> {
        self.history_recent_offset(n, offset)
    }
    fn history_len(&self) -> usize {
        self.history_len()
    }
}
