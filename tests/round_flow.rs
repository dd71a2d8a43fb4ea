use blackjack_rs::cards::parse_cards;
use blackjack_rs::config::TableConfig;
use blackjack_rs::money::Money;
use blackjack_rs::round::{
    ActionError, BetError, Decision, HistoryVerb, InsuranceOutcome, Phase, RoundError, Table,
};
use blackjack_rs::settlement::Outcome;
use blackjack_rs::shoe::Shoe;

fn units(n: i64) -> Money {
    Money::from_units(n)
}

fn table() -> Table {
    Table::with_seed(TableConfig::default(), 0)
}

/// Deal order is player, dealer hole, player, dealer up, then hits and dealer draws.
fn deal(t: &mut Table, bet: i64, cards: &str) {
    let shoe = Shoe::stacked(parse_cards(cards).unwrap());
    t.start_round_with_shoe(units(bet), shoe).unwrap();
}

fn outcomes(t: &Table) -> Vec<Outcome> {
    t.player_hands().iter().filter_map(|h| h.outcome()).collect()
}

#[test]
fn natural_after_declined_insurance_pays_three_to_two() {
    let mut t = table();
    deal(&mut t, 10, "10s 9c Ah Ad");
    assert_eq!(t.phase(), Phase::InsuranceOffer);
    assert!(t.insurance_offered());
    assert_eq!(t.bankroll(), units(990));

    let outcome = t.take_insurance(false).unwrap();
    assert_eq!(outcome, InsuranceOutcome::Declined);
    assert_eq!(t.phase(), Phase::Done);
    assert_eq!(t.bankroll(), units(1015));
    assert_eq!(outcomes(&t), vec![Outcome::Blackjack]);
    assert!(t.player().hands().is_empty());
    assert!(t.dealer().hand().is_empty());
}

#[test]
fn natural_without_ace_up_settles_on_the_deal() {
    let mut t = table();
    let summary = t
        .start_round_with_shoe(units(10), Shoe::stacked(parse_cards("As 9c Kd 7d").unwrap()))
        .unwrap();
    assert!(summary.round_over);
    assert!(!summary.insurance_offered);
    assert_eq!(t.bankroll(), units(1015));
    let view = t.state();
    assert!(!view.dealer_hole_hidden);
    assert_eq!(view.dealer_total, 16);
}

#[test]
fn bust_loses_and_dealer_does_not_draw() {
    let mut t = table();
    // The dealer would need a card on 14, but the shoe has none left.
    deal(&mut t, 10, "10s 9c 6h 5d Kc");
    let r = t.decide(Decision::Hit, 0).unwrap();
    assert!(r.busted);
    assert!(r.round_over);
    assert_eq!(r.hand_total, 26);
    assert_eq!(t.bankroll(), units(990));
    assert_eq!(outcomes(&t), vec![Outcome::Bust]);
    assert_eq!(t.state().dealer_cards.len(), 2);
}

#[test]
fn natural_on_a_bankroll_at_the_cap_pays_exactly() {
    let cfg = TableConfig { starting_bankroll: Money::MAX, min_bet: units(10) };
    let mut t = Table::try_new(cfg).unwrap();
    let shoe = Shoe::stacked(parse_cards("As 9c Kd 7d").unwrap());
    let summary = t.start_round_with_shoe(Money::MAX, shoe).unwrap();
    assert!(summary.round_over);
    assert_eq!(outcomes(&t), vec![Outcome::Blackjack]);
    assert_eq!(t.bankroll(), Money::from_cents(250_000_000_000_000));
    assert_eq!(t.last_round().unwrap().net(), Money::from_cents(150_000_000_000_000));
}

#[test]
fn stand_and_lose() {
    let mut t = table();
    deal(&mut t, 10, "10s 10c 7h 9d");
    t.decide(Decision::Stand, 0).unwrap();
    assert_eq!(outcomes(&t), vec![Outcome::Lose]);
    assert_eq!(t.bankroll(), units(990));
}

#[test]
fn equal_totals_push() {
    let mut t = table();
    deal(&mut t, 10, "10s 9c 9h Kd");
    t.decide(Decision::Stand, 0).unwrap();
    assert_eq!(outcomes(&t), vec![Outcome::Push]);
    assert_eq!(t.bankroll(), units(1000));
    assert_eq!(t.last_round().unwrap().net(), Money::ZERO);
}

#[test]
fn dealer_bust_pays_a_stiff_hand() {
    let mut t = table();
    deal(&mut t, 10, "10s 10c 2h 6d 9h");
    t.decide(Decision::Stand, 0).unwrap();
    assert_eq!(t.state().dealer_total, 25);
    assert_eq!(outcomes(&t), vec![Outcome::Win]);
    assert_eq!(t.bankroll(), units(1010));
}

#[test]
fn dealer_stands_on_soft_17() {
    let mut t = table();
    deal(&mut t, 10, "10s Ac 8h 6d");
    t.decide(Decision::Stand, 0).unwrap();
    assert_eq!(t.state().dealer_cards.len(), 2);
    assert_eq!(outcomes(&t), vec![Outcome::Win]);
}

#[test]
fn double_down_takes_one_card_and_doubles_the_stake() {
    let mut t = table();
    deal(&mut t, 10, "5s 9c 6h 7d 10c 8h");
    let r = t.decide(Decision::Double, 0).unwrap();
    assert_eq!(r.hand_total, 21);
    assert!(r.round_over);
    let hand = &t.player_hands()[0];
    assert!(hand.doubled());
    assert_eq!(hand.cards().len(), 3);
    assert_eq!(hand.effective_stake(), units(20));
    assert_eq!(hand.outcome(), Some(Outcome::Win));
    assert_eq!(t.bankroll(), units(1020));
}

#[test]
fn doubled_push_refunds_both_stakes() {
    let mut t = table();
    deal(&mut t, 10, "5s 10c 6h 9d 8c");
    t.decide(Decision::Double, 0).unwrap();
    assert_eq!(outcomes(&t), vec![Outcome::Push]);
    assert_eq!(t.bankroll(), units(1000));
}

#[test]
fn surrender_returns_half_the_bet() {
    let mut t = table();
    deal(&mut t, 10, "10s 10c 6h 9d");
    let r = t.decide(Decision::Surrender, 0).unwrap();
    assert!(r.round_over);
    assert_eq!(outcomes(&t), vec![Outcome::Surrender]);
    assert_eq!(t.bankroll(), units(995));
}

#[test]
fn surrender_of_an_odd_bet_rounds_down() {
    let mut t = table();
    let shoe = Shoe::stacked(parse_cards("10s 10c 6h 9d").unwrap());
    t.start_round_with_shoe(Money::from_cents(1001), shoe).unwrap();
    t.decide(Decision::Surrender, 0).unwrap();
    // 10.01 staked, 5.00 back.
    assert_eq!(t.bankroll(), Money::from_cents(99_499));
}

#[test]
fn rejected_bets() {
    let mut t = table();
    assert_eq!(
        t.start_round(units(9)),
        Err(RoundError::InvalidBet(BetError::BelowMinimum { min: units(10), got: units(9) }))
    );
    assert_eq!(
        t.start_round(units(2000)),
        Err(RoundError::InvalidBet(BetError::ExceedsBankroll {
            bankroll: units(1000),
            got: units(2000)
        }))
    );
    assert_eq!(
        t.start_round_str("abc"),
        Err(RoundError::InvalidBet(BetError::NotANumber("abc".into())))
    );
    assert_eq!(
        t.start_round_str("  "),
        Err(RoundError::InvalidBet(BetError::NotANumber(String::new())))
    );
    assert!(matches!(t.start_round_str("-5"), Err(RoundError::InvalidBet(BetError::NotANumber(_)))));
    assert_eq!(t.phase(), Phase::AwaitingBet);
    assert_eq!(t.bankroll(), units(1000));
}

#[test]
fn typed_bet_with_currency_sign() {
    let mut t = table();
    t.start_round_str("€12.50").unwrap();
    let view = t.state();
    assert_eq!(view.current_bet, Money::from_cents(1250));
}

#[test]
fn whole_bankroll_can_be_bet() {
    let mut t = table();
    deal(&mut t, 1000, "10s 10c 7h 9d");
    assert_eq!(t.bankroll(), Money::ZERO);
    t.decide(Decision::Stand, 0).unwrap();
    assert!(t.needs_cash_in());
}

#[test]
fn bet_rejected_mid_round() {
    let mut t = table();
    deal(&mut t, 10, "10s 10c 7h 9d");
    assert_eq!(t.start_round(units(10)), Err(RoundError::InvalidBet(BetError::RoundInProgress)));
    assert_eq!(t.bankroll(), units(990));
}

#[test]
fn decisions_need_a_round() {
    let mut t = table();
    assert_eq!(
        t.decide(Decision::Hit, 0),
        Err(RoundError::InvalidAction(ActionError::WrongPhase { phase: Phase::AwaitingBet }))
    );
    assert!(t.legal_decisions().is_empty());
}

#[test]
fn double_after_hit_rejected_without_state_change() {
    let mut t = table();
    deal(&mut t, 10, "2s 10c 3h 7d 4c");
    t.decide(Decision::Hit, 0).unwrap();
    let before = t.state();
    assert_eq!(
        t.decide(Decision::Double, 0),
        Err(RoundError::InvalidAction(ActionError::NotAllowed { decision: Decision::Double }))
    );
    let after = t.state();
    assert_eq!(before.bankroll, after.bankroll);
    assert_eq!(before.player_hands[0].cards(), after.player_hands[0].cards());
    assert_eq!(t.legal_decisions(), vec![Decision::Hit, Decision::Stand, Decision::Surrender]);
}

#[test]
fn split_of_unpaired_hand_rejected() {
    let mut t = table();
    deal(&mut t, 10, "9s 10c 10h 7d");
    assert!(!t.legal_decisions().contains(&Decision::Split));
    assert_eq!(
        t.decide(Decision::Split, 0),
        Err(RoundError::InvalidAction(ActionError::NotAllowed { decision: Decision::Split }))
    );
    assert_eq!(t.player().hands().len(), 1);
}

#[test]
fn fresh_hand_offers_every_decision() {
    let mut t = table();
    deal(&mut t, 10, "8s 10c 8h 7d");
    assert_eq!(
        t.legal_decisions(),
        vec![Decision::Hit, Decision::Stand, Decision::Surrender, Decision::Double, Decision::Split]
    );
}

#[test]
fn hole_card_hidden_until_reveal() {
    let mut t = table();
    deal(&mut t, 10, "10s Kc 7h 6d 9h");
    let view = t.state();
    assert!(view.dealer_hole_hidden);
    assert_eq!(view.dealer_cards.len(), 2);
    assert!(view.dealer_cards[0].is_none());
    assert_eq!(view.dealer_total, 6);
    assert_eq!(view.active_hand, Some(0));

    t.decide(Decision::Stand, 0).unwrap();
    let view = t.state();
    assert!(!view.dealer_hole_hidden);
    assert!(view.dealer_cards.iter().all(Option::is_some));
    assert_eq!(view.dealer_total, 25);
    assert_eq!(view.active_hand, None);
}

#[test]
fn exhausted_shoe_refunds_the_doubled_stake() {
    let mut t = table();
    deal(&mut t, 10, "5s 9c 6h 7d 10c");
    assert_eq!(t.decide(Decision::Double, 0), Err(RoundError::ShoeExhausted));
    assert_eq!(t.phase(), Phase::Done);
    assert_eq!(t.bankroll(), units(1000));
    let last = t.last_round().unwrap();
    assert!(last.aborted);
    assert_eq!(last.net(), Money::ZERO);
    assert_eq!(t.history_recent(1)[0].verb, HistoryVerb::Refund);
}

#[test]
fn next_round_clears_the_previous_one() {
    let mut t = table();
    deal(&mut t, 10, "10s 10c 7h 9d");
    t.decide(Decision::Stand, 0).unwrap();
    assert!(t.history_len() > 0);

    deal(&mut t, 20, "10s 10c 9h 8d");
    assert!(t.last_round().is_none());
    assert_eq!(t.player().hands().len(), 1);
    assert_eq!(t.history_recent(100)[0].verb, HistoryVerb::Bet);
    assert_eq!(t.rounds_played(), 1);
    t.decide(Decision::Stand, 0).unwrap();
    assert_eq!(t.bankroll(), units(1010));
    assert_eq!(t.rounds_played(), 2);
}

#[test]
fn history_hides_the_hole_card_until_reveal() {
    let mut t = table();
    deal(&mut t, 10, "10s Kc 7h 9d");
    let deals: Vec<_> = t
        .history_recent(100)
        .into_iter()
        .filter(|e| e.verb == HistoryVerb::Deal)
        .collect();
    assert_eq!(deals.len(), 4);
    assert!(deals[1].card.is_none());
    assert!(deals[3].card.is_some());
    t.decide(Decision::Stand, 0).unwrap();
    assert!(t
        .history_recent(100)
        .iter()
        .any(|e| e.verb == HistoryVerb::Reveal && e.card == parse_cards("Kc").ok().map(|c| c[0])));
}

#[test]
fn shuffled_rounds_keep_the_books_balanced() {
    let mut t = Table::with_seed(TableConfig::default(), 99);
    for _ in 0..50 {
        if t.needs_cash_in() {
            t.cash_in().unwrap();
        }
        let before = t.bankroll();
        t.start_round(units(10)).unwrap();
        if t.insurance_offered() {
            t.take_insurance(false).unwrap();
        }
        while let Some(active) = t.active_hand() {
            let decision = if t.player().hands()[active].value() < 17 {
                Decision::Hit
            } else {
                Decision::Stand
            };
            t.decide(decision, active).unwrap();
        }
        assert_eq!(t.phase(), Phase::Done);
        let last = t.last_round().unwrap();
        assert_eq!(t.bankroll(), before + last.net());
        assert!(!t.bankroll().is_negative());
    }
}

#[test]
fn cash_in_restores_the_starting_bankroll() {
    let cfg = TableConfig { starting_bankroll: units(20), min_bet: units(10) };
    let mut t = Table::with_seed(cfg, 0);
    deal(&mut t, 20, "10s 10c 7h 9d");
    assert!(matches!(
        t.cash_in(),
        Err(RoundError::InvalidAction(ActionError::WrongPhase { phase: Phase::PlayerDecision }))
    ));
    t.decide(Decision::Stand, 0).unwrap();
    assert_eq!(t.bankroll(), Money::ZERO);
    assert!(matches!(
        t.start_round(units(10)),
        Err(RoundError::InvalidBet(BetError::ExceedsBankroll { .. }))
    ));
    assert_eq!(t.cash_in(), Ok(units(20)));
    assert!(!t.needs_cash_in());
}
