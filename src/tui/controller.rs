use crate::tui::app::{AppState, InputAction, Scene};
use crate::tui::ui;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

pub fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut AppState,
    tick_rate: Duration,
) -> io::Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_key(app, key.code) {
                    break;
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }
    }
    Ok(())
}

fn handle_key(app: &mut AppState, code: KeyCode) -> bool {
    let at_table = app.scene == Scene::Table;
    match code {
        KeyCode::Char('?') => {
            let _ = app.handle_input(InputAction::ToggleHelp);
            return false;
        }
        KeyCode::Char('t') | KeyCode::Char('T') if at_table => {
            let _ = app.handle_input(InputAction::ToggleHistory);
            return false;
        }
        KeyCode::Char('l') | KeyCode::Char('L') if at_table => {
            let _ = app.handle_input(InputAction::ToggleLog);
            return false;
        }
        _ => {}
    }
    if app.help_open() || app.log_open() {
        if matches!(code, KeyCode::Esc) {
            app.close_overlays();
        }
        return false;
    }
    if app.history_open() {
        match code {
            KeyCode::Up => {
                let _ = app.handle_input(InputAction::HistoryUp);
            }
            KeyCode::Down => {
                let _ = app.handle_input(InputAction::HistoryDown);
            }
            KeyCode::Esc => {
                let _ = app.handle_input(InputAction::ToggleHistory);
            }
            _ => {}
        }
        return false;
    }

    match app.scene {
        Scene::Menu => match code {
            KeyCode::Up => {
                let _ = app.handle_input(InputAction::MenuPrev);
            }
            KeyCode::Down => {
                let _ = app.handle_input(InputAction::MenuNext);
            }
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => {
                let _ = app.handle_input(InputAction::MenuInc);
            }
            KeyCode::Char('-') | KeyCode::Char('_') | KeyCode::Left => {
                let _ = app.handle_input(InputAction::MenuDec);
            }
            KeyCode::Enter => {
                let _ = app.handle_input(InputAction::MenuApply);
            }
            KeyCode::Esc => {
                let _ = app.handle_input(InputAction::MenuCancel);
            }
            KeyCode::Char('m') | KeyCode::Char('M') => {
                let _ = app.handle_input(InputAction::ToggleMenu);
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => return true,
            _ => {}
        },
        Scene::Table => {
            let action = match code {
                KeyCode::Char('m') | KeyCode::Char('M') => Some(InputAction::ToggleMenu),
                KeyCode::Char(c) if c.is_ascii_digit() => Some(InputAction::BetDigit(c as u8 - b'0')),
                KeyCode::Char('.') | KeyCode::Char(',') => Some(InputAction::BetDecimal),
                KeyCode::Backspace => Some(InputAction::BetBackspace),
                KeyCode::Enter => Some(InputAction::BetSubmit),
                KeyCode::Char('h') | KeyCode::Char('H') => Some(InputAction::Hit),
                KeyCode::Char('s') | KeyCode::Char('S') => Some(InputAction::Stand),
                KeyCode::Char('d') | KeyCode::Char('D') => Some(InputAction::Double),
                KeyCode::Char('r') | KeyCode::Char('R') => Some(InputAction::Surrender),
                KeyCode::Char('p') | KeyCode::Char('P') => Some(InputAction::Split),
                KeyCode::Char('y') | KeyCode::Char('Y') => Some(InputAction::InsuranceYes),
                KeyCode::Char('n') | KeyCode::Char('N') => Some(InputAction::InsuranceNo),
                KeyCode::Char('c') | KeyCode::Char('C') => Some(InputAction::CashIn),
                _ => None,
            };
            if let Some(action) = action {
                let _ = app.handle_input(action);
            }
        }
    }
    false
}
