use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;
use thiserror::Error;

/// The price categories an `Event` can be offered in.
///
/// Regular and special are independent attendee categories. Each of them
/// can have an early bird variant and a board add-on, the latter never
/// being affected by the early bird deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceTier {
    Regular,
    RegularEarly,
    RegularBoard,
    Special,
    SpecialEarly,
    SpecialBoard,
}

impl PriceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::RegularEarly => "regular_early",
            Self::RegularBoard => "regular_board",
            Self::Special => "special",
            Self::SpecialEarly => "special_early",
            Self::SpecialBoard => "special_board",
        }
    }
}

impl Display for PriceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum PriceError {
    #[error("The {0} price must be >= 0.00, got: {1}")]
    Negative(PriceTier, Decimal),
}

/// Configured prices of an `Event`.
///
/// `None` means the tier was never configured, `Some(0)` means the tier
/// is explicitly free of charge. Only configured tiers count as "set".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventPrices {
    regular: Option<Decimal>,
    regular_early: Option<Decimal>,
    regular_board: Option<Decimal>,
    special: Option<Decimal>,
    special_early: Option<Decimal>,
    special_board: Option<Decimal>,
}

/// The prices that apply at a given time, keyed by tier
pub type AvailablePrices = BTreeMap<PriceTier, Decimal>;

impl EventPrices {
    pub fn get(&self, tier: PriceTier) -> Option<Decimal> {
        match tier {
            PriceTier::Regular => self.regular,
            PriceTier::RegularEarly => self.regular_early,
            PriceTier::RegularBoard => self.regular_board,
            PriceTier::Special => self.special,
            PriceTier::SpecialEarly => self.special_early,
            PriceTier::SpecialBoard => self.special_board,
        }
    }

    pub fn set(&mut self, tier: PriceTier, price: Option<Decimal>) -> Result<(), PriceError> {
        if let Some(amount) = price {
            if amount.is_sign_negative() && !amount.is_zero() {
                return Err(PriceError::Negative(tier, amount));
            }
        }

        let slot = match tier {
            PriceTier::Regular => &mut self.regular,
            PriceTier::RegularEarly => &mut self.regular_early,
            PriceTier::RegularBoard => &mut self.regular_board,
            PriceTier::Special => &mut self.special,
            PriceTier::SpecialEarly => &mut self.special_early,
            PriceTier::SpecialBoard => &mut self.special_board,
        };
        *slot = price;
        Ok(())
    }

    /// Builder style variant of `set`
    pub fn with(mut self, tier: PriceTier, price: Decimal) -> Result<Self, PriceError> {
        self.set(tier, Some(price))?;
        Ok(self)
    }

    pub fn has(&self, tier: PriceTier) -> bool {
        self.get(tier).is_some()
    }

    pub fn has_any_price(&self) -> bool {
        [
            PriceTier::Regular,
            PriceTier::RegularEarly,
            PriceTier::RegularBoard,
            PriceTier::Special,
            PriceTier::SpecialEarly,
            PriceTier::SpecialBoard,
        ]
        .iter()
        .any(|tier| self.has(*tier))
    }

    fn has_regular_early_bird_price(&self) -> bool {
        self.has(PriceTier::Regular) && self.has(PriceTier::RegularEarly)
    }

    fn has_special_early_bird_price(&self) -> bool {
        self.has(PriceTier::Special) && self.has(PriceTier::SpecialEarly)
    }

    /// Whether an early bird price is configured for at least one category.
    /// Without a deadline there is no early bird price at all.
    pub fn has_early_bird_price(&self, early_bird_deadline: Option<i64>) -> bool {
        early_bird_deadline.is_some()
            && (self.has_regular_early_bird_price() || self.has_special_early_bird_price())
    }

    /// A missing deadline counts as already passed
    pub fn is_early_bird_deadline_over(early_bird_deadline: Option<i64>, now: i64) -> bool {
        match early_bird_deadline {
            Some(deadline) => now >= deadline,
            None => true,
        }
    }

    pub fn early_bird_applies(&self, early_bird_deadline: Option<i64>, now: i64) -> bool {
        self.has_early_bird_price(early_bird_deadline)
            && !Self::is_early_bird_deadline_over(early_bird_deadline, now)
    }

    /// The prices an attendee can choose from at `now`.
    ///
    /// Always contains either `regular` or `regular_early`.
    pub fn available_prices(&self, early_bird_deadline: Option<i64>, now: i64) -> AvailablePrices {
        let mut prices = AvailablePrices::new();
        let regular = self.regular.unwrap_or(Decimal::ZERO);

        if self.early_bird_applies(early_bird_deadline, now) {
            match self.regular_early {
                Some(early) if self.has(PriceTier::Regular) => {
                    prices.insert(PriceTier::RegularEarly, early);
                }
                _ => {
                    prices.insert(PriceTier::Regular, regular);
                }
            }
            if let Some(special) = self.special {
                match self.special_early {
                    Some(early) => prices.insert(PriceTier::SpecialEarly, early),
                    None => prices.insert(PriceTier::Special, special),
                };
            }
        } else {
            prices.insert(PriceTier::Regular, regular);
            if let Some(special) = self.special {
                prices.insert(PriceTier::Special, special);
            }
        }

        if let Some(board) = self.regular_board {
            prices.insert(PriceTier::RegularBoard, board);
        }
        if let Some(board) = self.special_board {
            prices.insert(PriceTier::SpecialBoard, board);
        }

        prices
    }
}
