//! List sort: a stable sort over one of four fields, direction toggle,
//! fixed field rotation, with sort/toggle/toggle round-trips covered in tests.

use ghmirror_core::Issue;
use ghmirror_config::SortField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub field: SortField,
    pub descending: bool,
}

impl Default for SortState {
    fn default() -> Self {
        Self { field: SortField::Updated, descending: true }
    }
}

impl SortState {
    /// `s` -- cycles the field through the fixed rotation.
    pub fn cycle_field(&mut self) {
        self.field = self.field.next();
    }

    /// `S` -- toggles direction.
    pub fn toggle_direction(&mut self) {
        self.descending = !self.descending;
    }

    /// Returns issues from `issues` in this sort's display order. Uses
    /// `Vec::sort_by`, which is stable -- ties preserve their prior relative
    /// order.
    pub fn apply(&self, mut issues: Vec<Issue>) -> Vec<Issue> {
        issues.sort_by(|a, b| {
            let ord = match self.field {
                SortField::Updated => a.updated_at.cmp(&b.updated_at),
                SortField::Created => a.created_at.cmp(&b.created_at),
                SortField::Number => a.number.cmp(&b.number),
                SortField::Comments => a.comment_count.cmp(&b.comment_count),
            };
            if self.descending {
                ord.reverse()
            } else {
                ord
            }
        });
        issues
    }
}
