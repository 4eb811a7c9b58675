// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod accounts;
pub mod budgets;
pub mod categories;
pub mod debts;
pub mod doctor;
pub mod exporter;
pub mod goals;
pub mod reports;
pub mod transactions;
pub mod transfers;
