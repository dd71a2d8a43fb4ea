use crate::money::{Money, MoneyParseError};

pub const ENV_BANKROLL: &str = "BLACKJACK_BANKROLL";
pub const ENV_MIN_BET: &str = "BLACKJACK_MIN_BET";

/// Table stakes. Rules themselves are fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableConfig {
    pub starting_bankroll: Money,
    pub min_bet: Money,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self { starting_bankroll: Money::from_units(1000), min_bet: Money::from_units(10) }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("minimum bet must be positive")]
    ZeroMinimum,
    #[error("starting bankroll {bankroll} is below the minimum bet {min}")]
    BankrollBelowMinimum { bankroll: Money, min: Money },
    #[error("starting bankroll {bankroll} exceeds the table limit {max}")]
    BankrollTooLarge { bankroll: Money, max: Money },
    #[error("invalid value for {var}: {source}")]
    Env { var: &'static str, source: MoneyParseError },
}

impl TableConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_bet <= Money::ZERO {
            return Err(ConfigError::ZeroMinimum);
        }
        if self.starting_bankroll < self.min_bet {
            return Err(ConfigError::BankrollBelowMinimum {
                bankroll: self.starting_bankroll,
                min: self.min_bet,
            });
        }
        if self.starting_bankroll > Money::MAX {
            return Err(ConfigError::BankrollTooLarge {
                bankroll: self.starting_bankroll,
                max: Money::MAX,
            });
        }
        Ok(())
    }

    /// Defaults overlaid with `BLACKJACK_BANKROLL` / `BLACKJACK_MIN_BET`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(v) = lookup(ENV_BANKROLL) {
            cfg.starting_bankroll =
                v.parse().map_err(|source| ConfigError::Env { var: ENV_BANKROLL, source })?;
        }
        if let Some(v) = lookup(ENV_MIN_BET) {
            cfg.min_bet = v.parse().map_err(|source| ConfigError::Env { var: ENV_MIN_BET, source })?;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_house_stakes() {
        let cfg = TableConfig::default();
        assert_eq!(cfg.starting_bankroll, Money::from_units(1000));
        assert_eq!(cfg.min_bet, Money::from_units(10));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_stakes() {
        let zero = TableConfig { min_bet: Money::ZERO, ..TableConfig::default() };
        assert_eq!(zero.validate(), Err(ConfigError::ZeroMinimum));
        let poor = TableConfig { starting_bankroll: Money::from_units(5), ..TableConfig::default() };
        assert!(matches!(poor.validate(), Err(ConfigError::BankrollBelowMinimum { .. })));
    }

    #[test]
    fn bankroll_is_capped() {
        let at_cap = TableConfig { starting_bankroll: Money::MAX, ..TableConfig::default() };
        assert!(at_cap.validate().is_ok());
        let over = TableConfig {
            starting_bankroll: Money::MAX + Money::from_cents(1),
            ..TableConfig::default()
        };
        assert!(matches!(over.validate(), Err(ConfigError::BankrollTooLarge { .. })));

        let err = TableConfig::from_lookup(|var| {
            (var == ENV_BANKROLL).then(|| "90000000000000000".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::Env { var: ENV_BANKROLL, .. }));
    }

    #[test]
    fn env_overlay() {
        let cfg = TableConfig::from_lookup(|var| match var {
            ENV_BANKROLL => Some("250.50".into()),
            ENV_MIN_BET => Some("5".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(cfg.starting_bankroll, Money::from_cents(25050));
        assert_eq!(cfg.min_bet, Money::from_units(5));

        let err = TableConfig::from_lookup(|var| (var == ENV_MIN_BET).then(|| "ten".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Env { var: ENV_MIN_BET, .. }));
    }
}
