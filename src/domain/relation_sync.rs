use std::collections::HashSet;

/// Join-table changes needed to turn the current technology set into the target one.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncPlan {
    pub to_add: Vec<i64>,
    pub to_remove: Vec<i64>,
}

impl SyncPlan {
    /// `to_add = target - current`, `to_remove = current - target`.
    /// Ids present on both sides are left alone.
    pub fn between(current: &[i64], target: &[i64]) -> Self {
        let current_set: HashSet<i64> = current.iter().copied().collect();
        let target_set: HashSet<i64> = target.iter().copied().collect();

        let mut to_add: Vec<i64> = target_set.difference(&current_set).copied().collect();
        let mut to_remove: Vec<i64> = current_set.difference(&target_set).copied().collect();
        to_add.sort_unstable();
        to_remove.sort_unstable();

        SyncPlan { to_add, to_remove }
    }

    pub fn is_noop(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adds_and_removes_only_the_difference() {
        let plan = SyncPlan::between(&[1, 2, 3], &[2, 3, 4, 5]);
        assert_eq!(plan.to_add, vec![4, 5]);
        assert_eq!(plan.to_remove, vec![1]);
    }

    #[test]
    fn same_set_is_a_noop() {
        assert!(SyncPlan::between(&[2, 1], &[1, 2, 2]).is_noop());
    }

    #[test]
    fn empty_target_detaches_everything() {
        let plan = SyncPlan::between(&[7, 3], &[]);
        assert!(plan.to_add.is_empty());
        assert_eq!(plan.to_remove, vec![3, 7]);
    }

    #[test]
    fn empty_on_both_sides_does_nothing() {
        assert!(SyncPlan::between(&[], &[]).is_noop());
    }
}
