// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod analytics;
pub mod catalog;
pub mod cli;
pub mod db;
pub mod ledger;
pub mod models;
pub mod transfer;
pub mod utils;
pub mod commands;
