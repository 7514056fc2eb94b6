use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeAction {
    Buy,
    Sell,
}

/// One row of an already-parsed trade log.
///
/// The CSV header is `date,action,symbol,quantity,price,notes`; parsing the
/// file itself happens upstream, the core only consumes rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TradeRecord {
    pub date: NaiveDate,
    pub action: TradeAction,
    pub symbol: String,
    pub quantity: u32,
    pub price: Decimal,
    pub notes: String,
}

impl TradeRecord {
    /// Check the row-level constraints: positive quantity and price.
    pub fn validate(&self) -> Result<(), String> {
        if self.quantity == 0 {
            return Err(format!("{} {}: quantity must be > 0", self.date, self.symbol));
        }
        if self.price <= Decimal::ZERO {
            return Err(format!(
                "{} {}: price must be positive, got {}",
                self.date, self.symbol, self.price
            ));
        }
        Ok(())
    }
}
