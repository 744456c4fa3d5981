// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Transaction;

pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// First `limit` transactions of a list the store already ordered
/// most-recent-first. No sorting happens here.
pub fn recent(transactions: &[Transaction], limit: usize) -> &[Transaction] {
    &transactions[..limit.min(transactions.len())]
}
