//! Enumerations shared by the stock and schema models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a stock line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    #[default]
    Available,
    Pending,
    Shipped,
    Missing,
    Contaminated,
}

impl StockStatus {
    pub const ALL: [StockStatus; 5] = [
        StockStatus::Available,
        StockStatus::Pending,
        StockStatus::Shipped,
        StockStatus::Missing,
        StockStatus::Contaminated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::Available => "available",
            StockStatus::Pending => "pending",
            StockStatus::Shipped => "shipped",
            StockStatus::Missing => "missing",
            StockStatus::Contaminated => "contaminated",
        }
    }

    /// Badge tone used when rendering the status in tables
    pub fn tone(&self) -> &'static str {
        match self {
            StockStatus::Available => "green",
            StockStatus::Pending => "yellow",
            StockStatus::Shipped => "blue",
            StockStatus::Missing => "red",
            StockStatus::Contaminated => "orange",
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StockStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "available" => Ok(StockStatus::Available),
            "pending" => Ok(StockStatus::Pending),
            "shipped" => Ok(StockStatus::Shipped),
            "missing" => Ok(StockStatus::Missing),
            "contaminated" => Ok(StockStatus::Contaminated),
            _ => Err(format!("Invalid stock status: {}", s)),
        }
    }
}

/// Column types offered by the schema designer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FieldType {
    Uuid,
    Text,
    Varchar,
    Integer,
    Bigint,
    Numeric,
    Real,
    Boolean,
    Date,
    Timestamp,
    Timestamptz,
    Jsonb,
}

impl FieldType {
    pub const ALL: [FieldType; 12] = [
        FieldType::Uuid,
        FieldType::Text,
        FieldType::Varchar,
        FieldType::Integer,
        FieldType::Bigint,
        FieldType::Numeric,
        FieldType::Real,
        FieldType::Boolean,
        FieldType::Date,
        FieldType::Timestamp,
        FieldType::Timestamptz,
        FieldType::Jsonb,
    ];

    /// SQL spelling emitted by the generator
    pub fn as_sql(&self) -> &'static str {
        match self {
            FieldType::Uuid => "UUID",
            FieldType::Text => "TEXT",
            FieldType::Varchar => "VARCHAR(255)",
            FieldType::Integer => "INTEGER",
            FieldType::Bigint => "BIGINT",
            FieldType::Numeric => "NUMERIC",
            FieldType::Real => "REAL",
            FieldType::Boolean => "BOOLEAN",
            FieldType::Date => "DATE",
            FieldType::Timestamp => "TIMESTAMP",
            FieldType::Timestamptz => "TIMESTAMPTZ",
            FieldType::Jsonb => "JSONB",
        }
    }

    /// Classify a raw SQL type token by substring.
    ///
    /// Checks run in a fixed order, so `BIGINT` and even `POINT` land on
    /// `Integer` because they contain `INT`. Anything unrecognised falls back
    /// to `Text`.
    pub fn classify(raw: &str) -> FieldType {
        let upper = raw.to_uppercase();
        if upper.contains("UUID") {
            FieldType::Uuid
        } else if upper.contains("INT") {
            FieldType::Integer
        } else if upper.contains("CHAR") {
            FieldType::Varchar
        } else if upper.contains("TEXT") {
            FieldType::Text
        } else if upper.contains("BOOL") {
            FieldType::Boolean
        } else if upper.contains("TIMESTAMPTZ") {
            FieldType::Timestamptz
        } else if upper.contains("TIMESTAMP") {
            FieldType::Timestamp
        } else if upper.contains("DATE") {
            FieldType::Date
        } else if upper.contains("JSON") {
            FieldType::Jsonb
        } else if upper.contains("NUMERIC") || upper.contains("DECIMAL") {
            FieldType::Numeric
        } else if upper.contains("REAL") || upper.contains("FLOAT") || upper.contains("DOUBLE")
        {
            FieldType::Real
        } else {
            FieldType::Text
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Stock level bucket derived from a quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuantityLevel {
    /// Nothing left (quantity 0)
    OutOfStock,
    /// 1 to 9 units
    Low,
    /// 10 units or more
    Normal,
}

impl QuantityLevel {
    pub const LOW_STOCK_THRESHOLD: u32 = 10;

    pub fn classify(quantity: u32) -> QuantityLevel {
        if quantity == 0 {
            QuantityLevel::OutOfStock
        } else if quantity < Self::LOW_STOCK_THRESHOLD {
            QuantityLevel::Low
        } else {
            QuantityLevel::Normal
        }
    }

    /// Badge variant name used by the tables
    pub fn badge(&self) -> &'static str {
        match self {
            QuantityLevel::OutOfStock => "destructive",
            QuantityLevel::Low => "secondary",
            QuantityLevel::Normal => "default",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_boundaries() {
        assert_eq!(QuantityLevel::classify(0), QuantityLevel::OutOfStock);
        assert_eq!(QuantityLevel::classify(1), QuantityLevel::Low);
        assert_eq!(QuantityLevel::classify(9), QuantityLevel::Low);
        assert_eq!(QuantityLevel::classify(10), QuantityLevel::Normal);
    }

    #[test]
    fn test_classify_field_type() {
        assert_eq!(FieldType::classify("int"), FieldType::Integer);
        assert_eq!(FieldType::classify("BIGINT"), FieldType::Integer);
        assert_eq!(FieldType::classify("VARCHAR(255)"), FieldType::Varchar);
        assert_eq!(FieldType::classify("timestamptz"), FieldType::Timestamptz);
        assert_eq!(FieldType::classify("TIMESTAMP"), FieldType::Timestamp);
        assert_eq!(FieldType::classify("geometry"), FieldType::Text);
    }

    #[test]
    fn test_status_round_trips_through_str() {
        for status in StockStatus::ALL {
            assert_eq!(status.as_str().parse::<StockStatus>(), Ok(status));
        }
        assert!("lost".parse::<StockStatus>().is_err());
    }

    #[test]
    fn test_status_tones() {
        assert_eq!(StockStatus::default().tone(), "green");
        assert_eq!(StockStatus::Missing.tone(), "red");
    }
}
