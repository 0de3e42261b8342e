use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Fixed wire vocabularies accepted by the order API.
///
/// `code()` is the exact string the remote API expects; `Display` and
/// `FromStr` use the same code.
pub trait WireCode: Sized + Copy + 'static {
    const ALL: &'static [Self];

    fn code(&self) -> &'static str;

    fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.code() == code)
    }

    /// Allowed codes, used in validation messages.
    fn allowed_codes() -> Vec<&'static str> {
        Self::ALL.iter().map(|v| v.code()).collect()
    }
}

/// Error returned when a string is not part of a wire vocabulary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown code '{code}', expected one of {allowed:?}")]
pub struct UnknownCode {
    pub code: String,
    pub allowed: Vec<&'static str>,
}

macro_rules! wire_enum {
    ($name:ident { $($variant:ident => $code:literal),+ $(,)? }) => {
        impl WireCode for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn code(&self) -> &'static str {
                match self {
                    $($name::$variant => $code),+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownCode;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_code(s).ok_or_else(|| UnknownCode {
                    code: s.to_string(),
                    allowed: Self::allowed_codes(),
                })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.code())
            }
        }
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderSide {
    Buy,
    Sell,
}

wire_enum!(OrderSide { Buy => "B", Sell => "S" });

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderType {
    Market,
    Limit,
    StopLimit,
}

wire_enum!(OrderType {
    Market => "Market",
    Limit => "Limit",
    StopLimit => "Stop limit",
});

impl OrderType {
    pub fn requires_price(&self) -> bool {
        matches!(self, OrderType::Limit | OrderType::StopLimit)
    }

    pub fn requires_stop_price(&self) -> bool {
        matches!(self, OrderType::StopLimit)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeInForce {
    /// Valid for the whole trading session, not for auctions.
    Day,
    /// Good till cancelled.
    GTC,
    /// Opening auction only.
    MOP,
    /// Immediate or cancel: fill what is available, cancel the rest.
    IOC,
    /// Fill or kill.
    FOK,
    /// Good till a given date.
    GTD,
    /// Closing auction only.
    MOC,
    /// Good for auction (opening and intraday auctions).
    MOA,
}

wire_enum!(TimeInForce {
    Day => "Day",
    GTC => "GTC",
    MOP => "MOP",
    IOC => "IOC",
    FOK => "FOK",
    GTD => "GTD",
    MOC => "MOC",
    MOA => "MOA",
});

/// Direct market access flag. The API carries it as the strings `"true"`/`"false"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DmaFlag {
    Enabled,
    Disabled,
}

wire_enum!(DmaFlag { Enabled => "true", Disabled => "false" });
