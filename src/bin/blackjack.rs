use blackjack_rs::config::TableConfig;
use blackjack_rs::tui::{app::AppState, controller, logger};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::prelude::*;
use std::io::{self, IsTerminal, Stdout};
use std::time::Duration;

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), crossterm::terminal::LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn main() -> io::Result<()> {
    if !io::stdout().is_terminal() {
        println!(
            "blackjack-rs TUI requires a real terminal (TTY).\nRun in Terminal and press q in the menu to quit. Version: {}",
            blackjack_rs::VERSION
        );
        return Ok(());
    }
    let config = match TableConfig::from_env() {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("blackjack-rs: {err}");
            std::process::exit(2);
        }
    };
    let mut app = AppState::new(config);
    if let Ok(buffer) = logger::install(log::Level::Info) {
        app = app.with_log_buffer(buffer);
    }
    log::info!("blackjack-rs {} starting", blackjack_rs::VERSION);

    let mut terminal = setup_terminal()?;
    let tick_rate = Duration::from_millis(250);

    let res = controller::run(&mut terminal, &mut app, tick_rate);

    // Always attempt to restore terminal
    restore_terminal(terminal)?;
    res
}
