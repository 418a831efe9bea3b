use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Exchange a code trades on, inferred from the code prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Exchange {
    Shanghai,
    Shenzhen,
}

impl Exchange {
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Shanghai => "SH",
            Self::Shenzhen => "SZ",
        }
    }

    /// Lowercase market prefix used by the Sina and Tencent wire formats.
    pub const fn wire_prefix(self) -> &'static str {
        match self {
            Self::Shanghai => "sh",
            Self::Shenzhen => "sz",
        }
    }

    /// Numeric market id used by the Eastmoney secid scheme.
    pub const fn secid_market(self) -> u8 {
        match self {
            Self::Shanghai => 1,
            Self::Shenzhen => 0,
        }
    }
}

/// Normalized A-share symbol: a six-digit code plus its exchange.
///
/// Accepts `600519`, `600519.SH`, or `sh600519` on input; the exchange is
/// inferred from the code prefix when no suffix is given (`6xxxxx` Shanghai,
/// `0xxxxx`/`3xxxxx` Shenzhen) and must agree with an explicit suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol {
    code: String,
    exchange: Exchange,
}

impl Symbol {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }

        let (code, suffix) = split_code(trimmed)?;
        validate_code(code)?;

        let inferred = infer_exchange(code)?;
        let exchange = match suffix {
            Some(suffix) => {
                let explicit = parse_suffix(suffix)?;
                if explicit != inferred {
                    return Err(ValidationError::InvalidExchangeSuffix {
                        value: suffix.to_owned(),
                    });
                }
                explicit
            }
            None => inferred,
        };

        Ok(Self {
            code: code.to_owned(),
            exchange,
        })
    }

    /// The bare six-digit code, e.g. `600519`.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub const fn exchange(&self) -> Exchange {
        self.exchange
    }

    /// Canonical rendering, e.g. `600519.SH`.
    pub fn canonical(&self) -> String {
        format!("{}.{}", self.code, self.exchange.suffix())
    }

    /// Sina/Tencent wire encoding, e.g. `sh600519`.
    pub fn wire_code(&self) -> String {
        format!("{}{}", self.exchange.wire_prefix(), self.code)
    }

    /// Eastmoney secid encoding, e.g. `1.600519`.
    pub fn secid(&self) -> String {
        format!("{}.{}", self.exchange.secid_market(), self.code)
    }
}

fn split_code(input: &str) -> Result<(&str, Option<&str>), ValidationError> {
    if let Some((code, suffix)) = input.split_once('.') {
        return Ok((code, Some(suffix)));
    }

    let lower = input.to_ascii_lowercase();
    if lower.starts_with("sh") || lower.starts_with("sz") {
        let (prefix, code) = input.split_at(2);
        return Ok((code, Some(prefix)));
    }

    Ok((input, None))
}

fn validate_code(code: &str) -> Result<(), ValidationError> {
    let valid = code.len() == 6 && code.chars().all(|ch| ch.is_ascii_digit());
    if !valid {
        return Err(ValidationError::InvalidSymbolCode {
            value: code.to_owned(),
        });
    }
    Ok(())
}

fn infer_exchange(code: &str) -> Result<Exchange, ValidationError> {
    match code.chars().next() {
        Some('6') => Ok(Exchange::Shanghai),
        Some('0') | Some('3') => Ok(Exchange::Shenzhen),
        Some(prefix) => Err(ValidationError::UnsupportedCodePrefix { prefix }),
        None => Err(ValidationError::EmptySymbol),
    }
}

fn parse_suffix(suffix: &str) -> Result<Exchange, ValidationError> {
    match suffix.to_ascii_uppercase().as_str() {
        "SH" => Ok(Exchange::Shanghai),
        "SZ" => Ok(Exchange::Shenzhen),
        other => Err(ValidationError::InvalidExchangeSuffix {
            value: other.to_owned(),
        }),
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.canonical())
    }
}

impl FromStr for Symbol {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl TryFrom<String> for Symbol {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Symbol {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.canonical()
    }
}
