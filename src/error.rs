// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// A write rejected before it reached the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("quantity must be positive, got {0}")]
    NonPositiveQuantity(i64),
    #[error("unit price must not be negative, got {0}")]
    NegativePrice(Decimal),
    #[error("unknown transaction type '{0}' (use sale|purchase)")]
    UnknownTransactionType(String),
    #[error("item '{0}' is not in the catalog")]
    UnknownItem(String),
    #[error("item name must not be blank")]
    BlankItem,
    #[error("ledger already holds {0} transactions; refusing to seed again")]
    AlreadySeeded(i64),
    #[error("{quantity} x {unit_price} is too large to record")]
    AmountOverflow { quantity: i64, unit_price: Decimal },
    #[error("date {0} is outside years 1-9999")]
    DateOutOfRange(NaiveDate),
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),
    #[error("storage failure: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("corrupt ledger value in {column}: '{value}'")]
    Corrupt { column: &'static str, value: String },
    #[error("running total of {0} overflowed")]
    Overflow(&'static str),
}

impl LedgerError {
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, LedgerError::InvalidInput(_))
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
