// Copyright (c) 2025 Coinflow Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The aggregation engine: pure computations that turn a stream of dated,
//! categorized money movements into budget, goal, and report figures.
//! Everything here recomputes from the current records on each call; no
//! running counters are maintained. The only write in the whole module is
//! the goal-completion latch, which goes through [`crate::store`].

pub mod aggregate;
pub mod budget;
pub mod goal;
pub mod recurrence;
pub mod report;

pub use aggregate::{aggregate, DateRange, Summary};
pub use budget::{evaluate_budget, BudgetStatus};
pub use goal::{evaluate_goal, latch_goal, GoalProgress};
pub use recurrence::project;
pub use report::{compose, Report};
