//! Pure payout rules. Stakes are deducted when placed, so every credit here is
//! the gross amount returned to the bankroll (stake plus any profit).

use crate::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Outcome {
    Win,
    Lose,
    Push,
    Bust,
    /// Natural on the initial two cards, paid 3:2.
    Blackjack,
    Surrender,
}

impl Outcome {
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Win => "Win",
            Outcome::Lose => "Lose",
            Outcome::Push => "Push",
            Outcome::Bust => "Bust",
            Outcome::Blackjack => "Blackjack",
            Outcome::Surrender => "Surrender",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    pub outcome: Outcome,
    pub credit: Money,
}

/// Compare a finished hand against the dealer's final total.
///
/// ```
/// use blackjack_rs::money::Money;
/// use blackjack_rs::settlement::{settle, Outcome};
///
/// let s = settle(20, 18, Money::from_units(10), false);
/// assert_eq!(s.outcome, Outcome::Win);
/// assert_eq!(s.credit, Money::from_units(20));
/// ```
pub fn settle(player_total: u8, dealer_total: u8, bet: Money, doubled: bool) -> Settlement {
    let stake = if doubled { bet.times(2) } else { bet };
    let (outcome, credit) = if player_total > 21 {
        (Outcome::Bust, Money::ZERO)
    } else if dealer_total > 21 || player_total > dealer_total {
        (Outcome::Win, stake.times(2))
    } else if player_total < dealer_total {
        (Outcome::Lose, Money::ZERO)
    } else {
        (Outcome::Push, stake)
    };
    Settlement { outcome, credit }
}

/// Natural blackjack: stake back plus 3:2 profit.
pub fn natural_payout(bet: Money) -> Settlement {
    Settlement { outcome: Outcome::Blackjack, credit: bet + bet.three_halves() }
}

/// Surrender returns half the original bet.
pub fn surrender_refund(bet: Money) -> Settlement {
    Settlement { outcome: Outcome::Surrender, credit: bet.half() }
}

/// Insurance pays 2:1: the stake comes back with twice the stake as profit.
pub fn insurance_payout(insurance_stake: Money) -> Money {
    insurance_stake.times(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ten() -> Money {
        Money::from_units(10)
    }

    #[test]
    fn win_pays_even_money() {
        assert_eq!(settle(20, 18, ten(), false).credit, Money::from_units(20));
        assert_eq!(settle(20, 18, ten(), true).credit, Money::from_units(40));
    }

    #[test]
    fn dealer_bust_pays_any_live_hand() {
        let s = settle(12, 22, ten(), false);
        assert_eq!(s.outcome, Outcome::Win);
        assert_eq!(s.credit, Money::from_units(20));
    }

    #[test]
    fn player_bust_loses_even_if_dealer_busts() {
        let s = settle(22, 25, ten(), false);
        assert_eq!(s.outcome, Outcome::Bust);
        assert_eq!(s.credit, Money::ZERO);
    }

    #[test]
    fn push_refunds_effective_stake() {
        assert_eq!(settle(19, 19, ten(), false), Settlement { outcome: Outcome::Push, credit: ten() });
        assert_eq!(settle(19, 19, ten(), true).credit, Money::from_units(20));
    }

    #[test]
    fn lower_total_loses() {
        assert_eq!(settle(17, 20, ten(), true).outcome, Outcome::Lose);
        assert_eq!(settle(17, 20, ten(), true).credit, Money::ZERO);
    }

    #[test]
    fn side_payouts() {
        assert_eq!(natural_payout(ten()).credit, Money::from_units(25));
        assert_eq!(surrender_refund(ten()).credit, Money::from_units(5));
        assert_eq!(insurance_payout(Money::from_units(5)), Money::from_units(15));
    }
}
