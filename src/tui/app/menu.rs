use crate::config::TableConfig;
use crate::money::Money;
use crate::round::Table;

use super::AppState;

#[derive(Debug, Clone, Copy)]
enum MenuItem {
    StartingBankroll,
    MinBet,
}

const MENU_ITEMS: [MenuItem; 2] = [MenuItem::StartingBankroll, MenuItem::MinBet];

const BANKROLL_STEP: Money = Money::from_units(100);
const MIN_BET_STEP: Money = Money::from_units(1);

impl MenuItem {
    fn display(self, app: &AppState) -> String {
        match self {
            MenuItem::StartingBankroll => {
                format!("Starting Bankroll: €{}", app.cfg_starting_bankroll)
            }
            MenuItem::MinBet => format!("Minimum Bet: €{}", app.cfg_min_bet),
        }
    }

    fn inc(self, app: &mut AppState) {
        match self {
            MenuItem::StartingBankroll => {
                app.cfg_starting_bankroll += BANKROLL_STEP;
            }
            MenuItem::MinBet => {
                if app.cfg_min_bet + MIN_BET_STEP <= app.cfg_starting_bankroll {
                    app.cfg_min_bet += MIN_BET_STEP;
                }
            }
        }
    }

    fn dec(self, app: &mut AppState) {
        match self {
            MenuItem::StartingBankroll => {
                let next = app.cfg_starting_bankroll.saturating_sub(BANKROLL_STEP);
                app.cfg_starting_bankroll = next.max(BANKROLL_STEP).max(app.cfg_min_bet);
            }
            MenuItem::MinBet => {
                app.cfg_min_bet = app.cfg_min_bet.saturating_sub(MIN_BET_STEP).max(MIN_BET_STEP);
            }
        }
    }
}

impl AppState {
    pub fn menu_items_display(&self) -> Vec<String> {
        MENU_ITEMS.iter().map(|item| item.display(self)).collect()
    }

    pub fn toggle_menu(&mut self) {
        self.close_overlays();
        self.scene = match self.scene {
            super::Scene::Menu => super::Scene::Table,
            _ => {
                self.open_menu();
                super::Scene::Menu
            }
        };
    }

    // --- Menu operations ---
    pub fn open_menu(&mut self) {
        self.close_overlays();
        self.menu_index = 0;
        let cfg = self.table.config();
        self.cfg_starting_bankroll = cfg.starting_bankroll;
        self.cfg_min_bet = cfg.min_bet;
        self.scene = super::Scene::Menu;
    }

    /// Rebuild the table with the edited stakes. Any round in progress is dropped.
    pub fn apply_menu(&mut self) {
        let config = TableConfig {
            starting_bankroll: self.cfg_starting_bankroll,
            min_bet: self.cfg_min_bet,
        };
        match Table::try_new(config) {
            Ok(table) => {
                log::info!(
                    "table configured: bankroll {}, min bet {}",
                    config.starting_bankroll,
                    config.min_bet
                );
                self.table = table;
                self.scene = super::Scene::Table;
            }
            Err(err) => log::warn!("menu rejected: {err}"),
        }
    }

    pub fn cancel_menu(&mut self) {
        self.scene = super::Scene::Table;
    }

    pub fn menu_next(&mut self) {
        self.menu_index = (self.menu_index + 1) % MENU_ITEMS.len();
    }
    pub fn menu_prev(&mut self) {
        self.menu_index = (self.menu_index + MENU_ITEMS.len() - 1) % MENU_ITEMS.len();
    }
    pub fn menu_inc(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.inc(self);
    }
    pub fn menu_dec(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.dec(self);
    }
}
