// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bloc_planning_domain::{LeaveType, StaffId};
use serde::{Deserialize, Serialize};

/// Days of one leave type held by one staff member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaBalance {
    /// The staff member.
    pub staff_id: StaffId,
    /// The leave type.
    pub leave_type: LeaveType,
    /// Days granted for the period.
    #[serde(default)]
    pub allotted: f64,
    /// Days already taken.
    #[serde(default)]
    pub used: f64,
    /// Days received from other leave types.
    #[serde(default)]
    pub transferred_in: f64,
    /// Days given to other leave types.
    #[serde(default)]
    pub transferred_out: f64,
}

impl QuotaBalance {
    /// Creates a balance with `allotted` days and no movement.
    #[must_use]
    pub const fn new(staff_id: StaffId, leave_type: LeaveType, allotted: f64) -> Self {
        Self {
            staff_id,
            leave_type,
            allotted,
            used: 0.0,
            transferred_in: 0.0,
            transferred_out: 0.0,
        }
    }

    /// Days still available.
    #[must_use]
    pub const fn remaining(&self) -> f64 {
        self.allotted + self.transferred_in - self.transferred_out - self.used
    }

    /// Whether this balance belongs to (`staff_id`, `leave_type`).
    #[must_use]
    pub fn is_for(&self, staff_id: &StaffId, leave_type: LeaveType) -> bool {
        &self.staff_id == staff_id && self.leave_type == leave_type
    }
}
