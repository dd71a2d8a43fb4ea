use crate::config::TableConfig;
use crate::engine::RoundEngine;
use crate::money::Money;
use crate::round::{Decision, InsuranceOutcome, Phase, RoundError, Table};
use crate::tui::logger::LogBuffer;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Scene {
    Menu,
    Table,
}

/// High-level input actions for the TUI controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputAction {
    MenuNext,
    MenuPrev,
    MenuInc,
    MenuDec,
    MenuApply,
    MenuCancel,
    ToggleMenu,
    ToggleHelp,
    ToggleHistory,
    ToggleLog,
    HistoryUp,
    HistoryDown,
    BetDigit(u8),
    BetDecimal,
    BetBackspace,
    BetSubmit,
    Hit,
    Stand,
    Double,
    Surrender,
    Split,
    InsuranceYes,
    InsuranceNo,
    CashIn,
}

#[derive(Debug)]
#[non_exhaustive]
pub struct AppState {
    pub scene: Scene,
    pub started: Instant,
    // Core round engine instance
    pub table: Table,
    // Menu config being edited
    pub menu_index: usize,
    pub cfg_starting_bankroll: Money,
    pub cfg_min_bet: Money,
    pub(crate) log_buffer: Option<LogBuffer>,
    help_open: bool,
    history_open: bool,
    history_offset: usize,
    log_open: bool,
    bet_entry: String,
    notice: Option<String>,
    action_error: Option<String>,
    action_error_at: Option<Instant>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(TableConfig::default())
    }
}

impl AppState {
    pub const HISTORY_PAGE_SIZE: usize = 20;
    pub const LOG_PAGE_SIZE: usize = 30;
    const ACTION_ERROR_TTL: Duration = Duration::from_secs(3);
    const BET_ENTRY_MAX: usize = 10;

    pub fn new(config: TableConfig) -> Self {
        Self {
            scene: Scene::Menu,
            started: Instant::now(),
            table: Table::new(config),
            menu_index: 0,
            cfg_starting_bankroll: config.starting_bankroll,
            cfg_min_bet: config.min_bet,
            log_buffer: None,
            help_open: false,
            history_open: false,
            history_offset: 0,
            log_open: false,
            bet_entry: config.min_bet.to_string(),
            notice: None,
            action_error: None,
            action_error_at: None,
        }
    }

    /// Attach the buffer filled by the installed logger.
    pub fn with_log_buffer(mut self, buffer: LogBuffer) -> Self {
        self.log_buffer = Some(buffer);
        self
    }

    fn engine(&mut self) -> &mut dyn RoundEngine {
        &mut self.table
    }

    pub fn bet_entry_text(&self) -> &str {
        &self.bet_entry
    }

    /// Bet entry is live only between rounds.
    pub fn bet_entry_active(&self) -> bool {
        self.scene == Scene::Table && self.table.phase().accepts_bet()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn action_error(&self) -> Option<&str> {
        self.action_error.as_deref()
    }

    fn clear_action_error(&mut self) {
        self.action_error = None;
        self.action_error_at = None;
    }

    fn set_action_error(&mut self, err: &RoundError) {
        self.action_error = Some(err.to_string());
        self.action_error_at = Some(Instant::now());
    }

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    pub fn history_open(&self) -> bool {
        self.history_open
    }

    pub fn history_offset(&self) -> usize {
        self.history_offset
    }

    pub fn log_open(&self) -> bool {
        self.log_open
    }

    pub fn log_lines(&self, n: usize) -> Vec<String> {
        self.log_buffer.as_ref().map(|b| crate::tui::logger::tail(b, n)).unwrap_or_default()
    }

    pub(crate) fn close_overlays(&mut self) {
        self.help_open = false;
        self.history_open = false;
        self.log_open = false;
    }

    fn bet_push_digit(&mut self, digit: u8) {
        if !self.bet_entry_active() || self.bet_entry.len() >= Self::BET_ENTRY_MAX {
            return;
        }
        // No third decimal place.
        if let Some(dot) = self.bet_entry.find('.') {
            if self.bet_entry.len() - dot > 2 {
                return;
            }
        }
        self.bet_entry.push(char::from(b'0' + digit));
        self.clear_action_error();
    }

    fn bet_push_decimal(&mut self) {
        if !self.bet_entry_active() || self.bet_entry.contains('.') {
            return;
        }
        if self.bet_entry.is_empty() {
            self.bet_entry.push('0');
        }
        self.bet_entry.push('.');
    }

    fn bet_backspace(&mut self) {
        if self.bet_entry_active() {
            self.bet_entry.pop();
            self.clear_action_error();
        }
    }

    /// Place the typed bet and deal. The entry is kept so Enter re-bets it.
    fn bet_submit(&mut self) -> bool {
        if !self.bet_entry_active() {
            return false;
        }
        self.clear_action_error();
        let input = self.bet_entry.clone();
        match self.engine().start_round_str(&input) {
            Ok(deal) => {
                self.history_offset = 0;
                self.notice = if deal.insurance_offered {
                    Some("Dealer shows an Ace. Insurance? [Y/N]".to_string())
                } else if deal.round_over {
                    self.round_notice()
                } else {
                    None
                };
                true
            }
            Err(err) => {
                self.set_action_error(&err);
                self.notice = self.round_notice();
                false
            }
        }
    }

    fn decide(&mut self, decision: Decision) -> bool {
        if self.scene != Scene::Table {
            return false;
        }
        let Some(active) = self.table.active_hand() else {
            return false;
        };
        self.clear_action_error();
        match self.engine().decide(decision, active) {
            Ok(result) => {
                self.notice = if result.round_over { self.round_notice() } else { None };
                true
            }
            Err(err) => {
                self.set_action_error(&err);
                false
            }
        }
    }

    fn insurance(&mut self, accept: bool) -> bool {
        if self.scene != Scene::Table {
            return false;
        }
        self.clear_action_error();
        match self.engine().take_insurance(accept) {
            Ok(outcome) => {
                self.notice = match outcome {
                    InsuranceOutcome::Continue => Some("No dealer blackjack. Insurance lost.".into()),
                    InsuranceOutcome::Declined if !self.table.round_over() => None,
                    _ => self.round_notice(),
                };
                true
            }
            Err(err) => {
                self.set_action_error(&err);
                false
            }
        }
    }

    fn cash_in(&mut self) -> bool {
        if self.scene != Scene::Table {
            return false;
        }
        self.clear_action_error();
        match self.engine().cash_in() {
            Ok(bankroll) => {
                self.notice = Some(format!("Cashed in. Bankroll {bankroll}"));
                true
            }
            Err(err) => {
                self.set_action_error(&err);
                false
            }
        }
    }

    /// Summary line for a finished round.
    fn round_notice(&self) -> Option<String> {
        if !matches!(self.table.phase(), Phase::Done) {
            return None;
        }
        let last = self.table.last_round()?;
        if last.aborted {
            return Some("Shoe ran out. Round voided, stakes refunded.".to_string());
        }
        let outcomes: Vec<&str> =
            last.hands.iter().filter_map(|h| h.outcome().map(|o| o.label())).collect();
        let mut line = format!("{}  Net {}", outcomes.join(" / "), last.net());
        if self.table.needs_cash_in() {
            line.push_str("  Bankroll below minimum, press C to cash in");
        }
        Some(line)
    }

    pub fn handle_input(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::ToggleMenu => {
                self.toggle_menu();
                false
            }
            InputAction::ToggleHelp => {
                if self.scene == Scene::Table {
                    let open = !self.help_open;
                    self.close_overlays();
                    self.help_open = open;
                }
                false
            }
            InputAction::ToggleHistory => {
                if self.scene == Scene::Table {
                    let open = !self.history_open;
                    self.close_overlays();
                    if open {
                        self.history_offset = 0;
                    }
                    self.history_open = open;
                }
                false
            }
            InputAction::ToggleLog => {
                if self.scene == Scene::Table {
                    let open = !self.log_open;
                    self.close_overlays();
                    self.log_open = open;
                }
                false
            }
            InputAction::HistoryUp => {
                if self.scene == Scene::Table && self.history_open {
                    let max_offset =
                        self.table.history_len().saturating_sub(Self::HISTORY_PAGE_SIZE);
                    self.history_offset = (self.history_offset + 1).min(max_offset);
                }
                false
            }
            InputAction::HistoryDown => {
                if self.scene == Scene::Table && self.history_open && self.history_offset > 0 {
                    self.history_offset -= 1;
                }
                false
            }
            InputAction::MenuNext => {
                if self.scene == Scene::Menu {
                    self.menu_next();
                }
                false
            }
            InputAction::MenuPrev => {
                if self.scene == Scene::Menu {
                    self.menu_prev();
                }
                false
            }
            InputAction::MenuInc => {
                if self.scene == Scene::Menu {
                    self.menu_inc();
                }
                false
            }
            InputAction::MenuDec => {
                if self.scene == Scene::Menu {
                    self.menu_dec();
                }
                false
            }
            InputAction::MenuApply => {
                if self.scene == Scene::Menu {
                    self.apply_menu();
                }
                false
            }
            InputAction::MenuCancel => {
                if self.scene == Scene::Menu {
                    self.cancel_menu();
                }
                false
            }
            InputAction::BetDigit(d) => {
                self.bet_push_digit(d);
                false
            }
            InputAction::BetDecimal => {
                self.bet_push_decimal();
                false
            }
            InputAction::BetBackspace => {
                self.bet_backspace();
                false
            }
            InputAction::BetSubmit => self.bet_submit(),
            InputAction::Hit => self.decide(Decision::Hit),
            InputAction::Stand => self.decide(Decision::Stand),
            InputAction::Double => self.decide(Decision::Double),
            InputAction::Surrender => self.decide(Decision::Surrender),
            InputAction::Split => self.decide(Decision::Split),
            InputAction::InsuranceYes => self.insurance(true),
            InputAction::InsuranceNo => self.insurance(false),
            InputAction::CashIn => self.cash_in(),
        }
    }

    /// Expire stale error messages.
    pub fn on_tick(&mut self) {
        if let Some(at) = self.action_error_at {
            if at.elapsed() >= Self::ACTION_ERROR_TTL {
                self.clear_action_error();
            }
        }
    }
}
