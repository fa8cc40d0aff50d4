// Copyright (c) 2025 Coinflow Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Frequency;
use chrono::{Days, Months, NaiveDate};

/// Next occurrence of a recurring transaction: one unit of `frequency` past
/// `date`. Month and year steps use calendar arithmetic, so month-end dates
/// clamp (2024-01-31 + monthly = 2024-02-29, 2024-02-29 + yearly =
/// 2025-02-28). This only advances a pointer; it never inserts rows.
pub fn project(date: NaiveDate, frequency: Frequency) -> NaiveDate {
    let next = match frequency {
        Frequency::Daily => date.checked_add_days(Days::new(1)),
        Frequency::Weekly => date.checked_add_days(Days::new(7)),
        Frequency::Monthly => date.checked_add_months(Months::new(1)),
        Frequency::Yearly => date.checked_add_months(Months::new(12)),
    };
    // Out of range only at the edge of chrono's representable years.
    next.unwrap_or(date)
}
