// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod delivery;
pub mod desk;
pub mod error;
pub mod ledger;
pub mod models;
pub mod quotes;
pub mod report;
pub mod scenario;
pub mod utils;

pub use error::{InvalidInput, LedgerError, LedgerResult};
