use crate::core::calendar::{self, DateKey, DATE_FORMAT};
use crate::core::client::ClientId;
use crate::core::currency::CurrencyCode;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Direction of a trade instruction, from the client's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Decode a wire side code. "B" in any case means Buy; every other
    /// code is taken as Sell. Upstream feeds use more codes than "S"
    /// for sells, so unrecognized values fall through rather than fail.
    pub fn from_code(code: &str) -> Self {
        if code.trim().eq_ignore_ascii_case("B") {
            Side::Buy
        } else {
            Side::Sell
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Side::Buy => "Buy",
            Side::Sell => "Sell",
        })
    }
}

/// Errors arising from parsing a raw eight-field instruction.
#[derive(Debug, Error)]
pub enum MalformedTransaction {
    #[error("expected 8 instruction fields, got {got}")]
    FieldCount { got: usize },
    #[error("entity field must not be empty")]
    EmptyEntity,
    #[error("invalid {field}: {value:?} is not a number")]
    InvalidNumber { field: &'static str, value: String },
    #[error("invalid {field}: {value:?} (expected \"dd Mon yyyy\")")]
    InvalidDate { field: &'static str, value: String },
}

/// A single parsed trade instruction.
///
/// Immutable once constructed. The USD trade amount and the adjusted
/// settlement date are derived from the stored fields on access, so
/// they can never drift out of sync with them.
#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
    entity: ClientId,
    side: Side,
    agreed_fx: Decimal,
    currency: CurrencyCode,
    instruction_date: NaiveDate,
    settlement_date: NaiveDate,
    units: u32,
    price_per_unit: Decimal,
}

impl Transaction {
    /// Construct from already-typed fields.
    ///
    /// # Panics
    ///
    /// Panics if `entity` is empty.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        entity: ClientId,
        side: Side,
        agreed_fx: Decimal,
        currency: CurrencyCode,
        instruction_date: NaiveDate,
        settlement_date: NaiveDate,
        units: u32,
        price_per_unit: Decimal,
    ) -> Self {
        assert!(!entity.as_str().is_empty(), "entity must not be empty");
        Self {
            entity,
            side,
            agreed_fx,
            currency,
            instruction_date,
            settlement_date,
            units,
            price_per_unit,
        }
    }

    /// Parse the raw eight-field wire form, in strict order: entity,
    /// side code, agreed FX, currency, instruction date, settlement
    /// date, units, price per unit.
    ///
    /// Dates use the [`DATE_FORMAT`] form, e.g. `"01 Jan 2016"`.
    pub fn parse<S: AsRef<str>>(fields: &[S]) -> Result<Self, MalformedTransaction> {
        if fields.len() != 8 {
            return Err(MalformedTransaction::FieldCount { got: fields.len() });
        }
        let entity = fields[0].as_ref();
        if entity.is_empty() {
            return Err(MalformedTransaction::EmptyEntity);
        }
        let side = Side::from_code(fields[1].as_ref());
        let agreed_fx = parse_decimal("agreed FX", fields[2].as_ref())?;
        let currency = CurrencyCode::new(fields[3].as_ref());
        let instruction_date = parse_date("instruction date", fields[4].as_ref())?;
        let settlement_date = parse_date("settlement date", fields[5].as_ref())?;
        let units = fields[6]
            .as_ref()
            .trim()
            .parse::<u32>()
            .map_err(|_| MalformedTransaction::InvalidNumber {
                field: "units",
                value: fields[6].as_ref().to_string(),
            })?;
        let price_per_unit = parse_decimal("price per unit", fields[7].as_ref())?;

        Ok(Self::new(
            ClientId::new(entity),
            side,
            agreed_fx,
            currency,
            instruction_date,
            settlement_date,
            units,
            price_per_unit,
        ))
    }

    // --- Accessors ---

    pub fn entity(&self) -> &ClientId {
        &self.entity
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn agreed_fx(&self) -> Decimal {
        self.agreed_fx
    }

    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    pub fn instruction_date(&self) -> NaiveDate {
        self.instruction_date
    }

    /// The settlement date exactly as instructed, before adjustment.
    pub fn settlement_date(&self) -> NaiveDate {
        self.settlement_date
    }

    pub fn units(&self) -> u32 {
        self.units
    }

    pub fn price_per_unit(&self) -> Decimal {
        self.price_per_unit
    }

    /// USD value of the trade: `price_per_unit * units * agreed_fx`,
    /// exact decimal arithmetic with no rounding.
    pub fn trade_amount_usd(&self) -> Decimal {
        self.price_per_unit * Decimal::from(self.units) * self.agreed_fx
    }

    /// The instructed settlement date rolled forward to an open day
    /// for this instruction's market.
    pub fn adjusted_settlement_date(&self) -> NaiveDate {
        calendar::adjust(self.settlement_date, &self.currency)
    }

    /// Rendered form of the adjusted settlement date, the grouping key
    /// for date-based aggregation.
    pub fn settlement_date_key(&self) -> DateKey {
        DateKey::from_date(self.adjusted_settlement_date())
    }
}

fn parse_decimal(field: &'static str, value: &str) -> Result<Decimal, MalformedTransaction> {
    value
        .trim()
        .parse()
        .map_err(|_| MalformedTransaction::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, MalformedTransaction> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        MalformedTransaction::InvalidDate {
            field,
            value: value.to_string(),
        }
    })
}
