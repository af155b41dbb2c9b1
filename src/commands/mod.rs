// Copyright (c) 2025 WealthTrack.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod accounts;
pub mod categories;
pub mod deposits;
pub mod exporter;
pub mod ledger;
pub mod reports;
pub mod stocks;
pub mod sync;
