use crate::cards::{Card, Suit};
use crate::participant::{HandStatus, PlayerHand};
use crate::round::{Decision, Phase, TableView};
use crate::settlement::Outcome;
use crate::tui::app::AppState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{card_slots, centered_rect, inner};

const CARD_WIDTH: u16 = 7;

pub(super) fn draw_table(f: &mut Frame, app: &AppState) {
    let size = f.area();
    let view = app.table.state();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // header
            Constraint::Length(6), // dealer
            Constraint::Min(6),    // player hands
            Constraint::Length(5), // status bar
        ])
        .split(size);

    draw_header(f, chunks[0], app, &view);
    draw_dealer(f, chunks[1], &view);
    draw_player(f, chunks[2], &view);
    draw_status(f, chunks[3], app, &view);

    if app.help_open() {
        draw_help(f);
    } else if app.history_open() {
        draw_history(f, app);
    } else if app.log_open() {
        draw_log(f, app);
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &AppState, view: &TableView) {
    let insurance = view.insurance_bet.map(|v| format!("   Insurance: €{v}")).unwrap_or_default();
    let lines = vec![
        Line::from(format!(
            "Bankroll: €{}   Min bet: €{}   Round {}",
            view.bankroll,
            app.table.min_bet(),
            app.table.rounds_played() + u64::from(!view.phase.accepts_bet()),
        )),
        Line::from(format!("Bet: €{}{insurance}   {}", view.current_bet, view.phase.label())),
    ];
    let header = Paragraph::new(lines)
        .block(Block::default().title("blackjack-rs").borders(Borders::ALL));
    f.render_widget(header, area);
}

fn draw_dealer(f: &mut Frame, area: Rect, view: &TableView) {
    let title = if view.dealer_cards.is_empty() {
        "Dealer".to_string()
    } else if view.dealer_hole_hidden {
        format!("Dealer — showing {}", view.dealer_total)
    } else {
        format!("Dealer — {}", view.dealer_total)
    };
    let block = Block::default().title(title).borders(Borders::ALL);
    let body = inner(area);
    f.render_widget(block, area);
    let slots = card_slots(body, view.dealer_cards.len(), CARD_WIDTH);
    for (slot, card) in slots.iter().zip(&view.dealer_cards) {
        render_card_widget(f, *slot, *card, None);
    }
}

fn draw_player(f: &mut Frame, area: Rect, view: &TableView) {
    let hands = &view.player_hands;
    if hands.is_empty() {
        let block = Block::default().title("Player").borders(Borders::ALL);
        let para = Paragraph::new("Type a bet and press Enter to deal.")
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(para, area);
        return;
    }
    let constraints: Vec<Constraint> =
        hands.iter().map(|_| Constraint::Ratio(1, hands.len() as u32)).collect();
    let cols = Layout::default().direction(Direction::Horizontal).constraints(constraints).split(area);
    for (i, hand) in hands.iter().enumerate() {
        render_hand(f, cols[i], i, hand, view.active_hand == Some(i), hands.len() > 1);
    }
}

fn render_hand(f: &mut Frame, area: Rect, idx: usize, hand: &PlayerHand, active: bool, split: bool) {
    let mut title = if split { format!("Hand {}", idx + 1) } else { "Player".to_string() };
    title.push_str(&format!(" — {}", hand.value()));
    if hand.hand().is_soft() && hand.value() < 21 {
        title.push_str(" soft");
    }
    if hand.doubled() {
        title.push_str(" [x2]");
    }
    if active {
        title.push_str(" [Act]");
    }
    let mut block = Block::default().title(title).borders(Borders::ALL);
    block = match hand.outcome() {
        Some(Outcome::Win | Outcome::Blackjack) => {
            block.border_style(Style::default().fg(Color::Green))
        }
        Some(Outcome::Push) => block.border_style(Style::default().fg(Color::Yellow)),
        Some(_) => block.border_style(Style::default().fg(Color::DarkGray)),
        None if active => block.border_style(Style::default().fg(Color::Cyan)),
        None => block,
    };
    f.render_widget(block, area);

    let body = inner(area);
    let split_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(body);
    let slots = card_slots(split_rows[0], hand.cards().len(), CARD_WIDTH);
    for (slot, card) in slots.iter().zip(hand.cards()) {
        render_card_widget(f, *slot, Some(*card), active.then_some(Color::Cyan));
    }

    let status = match (hand.outcome(), hand.status()) {
        (Some(o), _) => format!("{}  returned €{}", o.label(), hand.credit()),
        (None, HandStatus::Stood) => "Stood".to_string(),
        (None, HandStatus::Doubled) => "Doubled".to_string(),
        (None, _) => String::new(),
    };
    let lines = vec![Line::from(format!("Stake: €{}", hand.effective_stake())), Line::from(status)];
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), split_rows[1]);
}

fn draw_status(f: &mut Frame, area: Rect, app: &AppState, view: &TableView) {
    f.render_widget(Block::default().borders(Borders::ALL).title("Status"), area);
    let status_inner = inner(area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(status_inner);

    let mut left: Vec<Line> = Vec::new();
    if app.bet_entry_active() {
        left.push(Line::from(vec![
            Span::raw("Bet: €"),
            Span::styled(
                format!("{}_", app.bet_entry_text()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Enter to deal", Style::default().add_modifier(Modifier::DIM)),
        ]));
    }
    if let Some(notice) = app.notice() {
        left.push(Line::from(notice.to_string()));
    }
    if let Some(err) = app.action_error() {
        left.push(Line::from(Span::styled(
            format!("Error: {err}"),
            Style::default().fg(Color::Red),
        )));
    }

    let action_style = |enabled: bool| {
        if enabled {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        }
    };
    match view.phase {
        Phase::PlayerDecision => {
            let legal = app.table.legal_decisions();
            let mut spans = vec![Span::raw("Actions: ")];
            let keys = [
                (Decision::Hit, "H hit"),
                (Decision::Stand, "S stand"),
                (Decision::Double, "D double"),
                (Decision::Split, "P split"),
                (Decision::Surrender, "R surrender"),
            ];
            for (i, (decision, label)) in keys.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::raw(" • "));
                }
                spans.push(Span::styled(*label, action_style(legal.contains(decision))));
            }
            left.push(Line::from(spans));
        }
        Phase::InsuranceOffer => {
            left.push(Line::from(vec![
                Span::raw("Insurance: "),
                Span::styled("Y take", action_style(true)),
                Span::raw(" • "),
                Span::styled("N decline", action_style(true)),
            ]));
        }
        _ if app.table.needs_cash_in() => {
            left.push(Line::from(Span::styled("C cash in", action_style(true))));
        }
        _ => {}
    }

    let right = vec![Line::from(""), Line::from("? help • T history • L log • M menu")];
    f.render_widget(Paragraph::new(left).wrap(Wrap { trim: true }), cols[0]);
    f.render_widget(
        Paragraph::new(right).wrap(Wrap { trim: true }).alignment(Alignment::Right),
        cols[1],
    );
}

fn draw_history(f: &mut Frame, app: &AppState) {
    let area = centered_rect(70, 80, f.area());
    let block = Block::default().title("Round history").borders(Borders::ALL);
    let mut lines: Vec<Line> = Vec::new();
    let entries =
        app.table.history_recent_offset(AppState::HISTORY_PAGE_SIZE, app.history_offset());
    if entries.is_empty() {
        lines.push(Line::from("No history yet."));
    } else {
        for entry in entries {
            let hand = entry.hand.map(|h| format!(" #{}", h + 1)).unwrap_or_default();
            let card = entry.card.map(|c| format!(" {}", c.pretty())).unwrap_or_default();
            let amount = entry.amount.map(|v| format!(" €{v}")).unwrap_or_default();
            lines.push(Line::from(format!(
                "{}{hand} {}{card}{amount}",
                entry.role.label(),
                entry.verb.label()
            )));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Up/Down scroll • Close: T or Esc",
        Style::default().add_modifier(Modifier::DIM),
    )));
    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(para, inner(area));
}

fn draw_log(f: &mut Frame, app: &AppState) {
    let area = centered_rect(80, 80, f.area());
    let block = Block::default().title("Log").borders(Borders::ALL);
    let body = inner(area);
    let rows = usize::from(body.height.saturating_sub(2)).min(AppState::LOG_PAGE_SIZE);
    let mut lines: Vec<Line> = app.log_lines(rows).into_iter().map(Line::from).collect();
    if lines.is_empty() {
        lines.push(Line::from("No log output."));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Close: L or Esc",
        Style::default().add_modifier(Modifier::DIM),
    )));
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines), body);
}

fn draw_help(f: &mut Frame) {
    let area = centered_rect(70, 80, f.area());
    let block = Block::default().title("Help").borders(Borders::ALL);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled("Betting:", bold)),
        Line::from("- 0-9 / . : edit bet"),
        Line::from("- Backspace: delete digit"),
        Line::from("- Enter: place bet and deal"),
        Line::from("- C: cash in (bankroll below minimum)"),
        Line::from(""),
        Line::from(Span::styled("Playing:", bold)),
        Line::from("- H: hit"),
        Line::from("- S: stand"),
        Line::from("- D: double down (first two cards)"),
        Line::from("- P: split a pair"),
        Line::from("- R: surrender (half the bet back)"),
        Line::from("- Y / N: take / decline insurance"),
        Line::from(""),
        Line::from(Span::styled("Views:", bold)),
        Line::from("- T: round history"),
        Line::from("- L: log"),
        Line::from("- M: open / close menu"),
        Line::from("- Q: quit (menu)"),
        Line::from(""),
        Line::from("Close help: ? or Esc"),
    ];
    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(para, inner(area));
}

fn suit_style(s: Suit) -> Style {
    if s.is_red() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::White)
    }
}

/// `None` draws a face-down card.
fn render_card_widget(f: &mut Frame, area: Rect, card: Option<Card>, border: Option<Color>) {
    let mut block = Block::default().borders(Borders::ALL).title_alignment(Alignment::Center);
    if let Some(color) = border {
        block = block.border_style(Style::default().fg(color));
    }
    let body = inner(area);
    f.render_widget(block, area);
    let content = match card {
        Some(c) => Line::from(Span::styled(c.pretty(), suit_style(c.suit()))),
        None => Line::from(Span::styled("░░", Style::default().fg(Color::Blue))),
    };
    f.render_widget(Paragraph::new(content).alignment(Alignment::Center), body);
}
