// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Category reconciliation: merges stored category rows, the debt list and
//! the reserved synthetic groups into one taxonomy. The result drives both
//! the `category list` view and every aggregation's bucket definitions.

use crate::models::{
    CategoryGroup, CategoryKind, CategoryRow, Debt, GROUP_DEBT_PAYMENT, GROUP_TRANSFER,
    SUB_ALLOCATE, SUB_WITHDRAW,
};

/// Build the unified category taxonomy.
///
/// Stored rows whose group is "Mutasi" or "Bayar Hutang" are skipped: those
/// groups are reserved and synthesized here. "Mutasi" always exists with its
/// two fixed sub-categories; "Bayar Hutang" exists only while at least one
/// debt is recorded, and its sub-categories are the debt names in debt-list
/// order. The output is sorted by group name and is deterministic for the
/// same inputs. Duplicate sub-categories within a group are kept as-is;
/// insert paths are responsible for avoiding them.
pub fn reconcile(raw: &[CategoryRow], debts: &[Debt]) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();
    for row in raw {
        if row.category == GROUP_TRANSFER || row.category == GROUP_DEBT_PAYMENT {
            continue;
        }
        match groups.iter_mut().find(|g| g.name == row.category) {
            Some(g) => g.subcategories.push(row.sub_category.clone()),
            None => groups.push(CategoryGroup {
                name: row.category.clone(),
                kind: CategoryKind::classify(&row.category),
                subcategories: vec![row.sub_category.clone()],
            }),
        }
    }

    groups.push(CategoryGroup {
        name: GROUP_TRANSFER.to_string(),
        kind: CategoryKind::Transfer,
        subcategories: vec![SUB_ALLOCATE.to_string(), SUB_WITHDRAW.to_string()],
    });

    if !debts.is_empty() {
        groups.push(CategoryGroup {
            name: GROUP_DEBT_PAYMENT.to_string(),
            kind: CategoryKind::Expense,
            subcategories: debts.iter().map(|d| d.name.clone()).collect(),
        });
    }

    groups.sort_by(|a, b| a.name.cmp(&b.name));
    groups
}

/// Look up the kind a transaction entered under `group` should be treated as.
/// Unknown groups fall back to expense.
pub fn kind_for_group(groups: &[CategoryGroup], group: &str) -> CategoryKind {
    groups
        .iter()
        .find(|g| g.name == group)
        .map(|g| g.kind)
        .unwrap_or_else(|| CategoryKind::classify(group))
}
