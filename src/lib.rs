// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod commands;
pub mod db;
pub mod error;
pub mod ledger;
pub mod models;
pub mod recent;
pub mod stats;
pub mod utils;

pub use error::FinboardError;
pub use models::{MonthKey, NewTransaction, Transaction, TransactionType};
pub use recent::recent;
pub use stats::{compute_stats, Stats};
