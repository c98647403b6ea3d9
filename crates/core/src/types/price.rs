//! Type-safe price representation using decimal arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., rupiah, dollars).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Format for display (e.g., `Rp1.250.000`, `$19.99`).
    #[must_use]
    pub fn display(&self) -> String {
        let places = self.currency_code.minor_units();
        let rounded = self.amount.round_dp(places).abs();
        let text = format!("{rounded:.prec$}", prec = places as usize);

        let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));
        let (group_sep, decimal_sep) = self.currency_code.separators();

        let mut out = String::new();
        if self.amount.is_sign_negative() && !rounded.is_zero() {
            out.push('-');
        }
        out.push_str(self.currency_code.symbol());
        out.push_str(&group_thousands(whole, group_sep));
        if !fraction.is_empty() {
            out.push(decimal_sep);
            out.push_str(fraction);
        }
        out
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    IDR,
    USD,
}

impl CurrencyCode {
    /// Display symbol.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::IDR => "Rp",
            Self::USD => "$",
        }
    }

    /// Decimal places shown for this currency.
    #[must_use]
    pub const fn minor_units(&self) -> u32 {
        match self {
            Self::IDR => 0,
            Self::USD => 2,
        }
    }

    const fn separators(self) -> (char, char) {
        match self {
            Self::IDR => ('.', ','),
            Self::USD => (',', '.'),
        }
    }
}

fn group_thousands(digits: &str, sep: char) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(c);
    }
    out
}
