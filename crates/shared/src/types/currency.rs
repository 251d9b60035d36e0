//! ISO 4217 currency codes and their display scales.

use serde::{Deserialize, Serialize};

/// ISO 4217 currency codes supported by the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US Dollar
    Usd,
    /// Euro
    Eur,
    /// British Pound
    Gbp,
    /// Australian Dollar
    Aud,
    /// Japanese Yen (no minor unit)
    Jpy,
    /// Bahraini Dinar (three minor-unit digits)
    Bhd,
}

impl Currency {
    /// Number of fractional digits conventionally shown for this currency.
    #[must_use]
    pub const fn minor_units(self) -> u32 {
        match self {
            Self::Jpy => 0,
            Self::Bhd => 3,
            Self::Usd | Self::Eur | Self::Gbp | Self::Aud => 2,
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Usd => write!(f, "USD"),
            Self::Eur => write!(f, "EUR"),
            Self::Gbp => write!(f, "GBP"),
            Self::Aud => write!(f, "AUD"),
            Self::Jpy => write!(f, "JPY"),
            Self::Bhd => write!(f, "BHD"),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            "GBP" => Ok(Self::Gbp),
            "AUD" => Ok(Self::Aud),
            "JPY" => Ok(Self::Jpy),
            "BHD" => Ok(Self::Bhd),
            _ => Err(format!("Unknown currency: {s}")),
        }
    }
}
