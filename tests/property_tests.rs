//! Property-based tests for salary adjustments
//!
//! These tests verify, across random salaries and percentages, that:
//! - A single adjustment scales only the targeted salary
//! - A general adjustment scales every salary by the same factor
//! - A rejected adjustment changes nothing

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use staffdb::confirm::ScriptedConfirmation;
    use staffdb::employee::EmployeeDraft;
    use staffdb::records::{pay_multiplier, EmployeeStore};
    use tempfile::TempDir;

    // Test infrastructure

    /// Creates a store over a temporary database seeded with the given salaries
    fn seeded_store(salaries: &[f64]) -> (TempDir, EmployeeStore) {
        let dir = TempDir::new().unwrap();
        let store = EmployeeStore::open(dir.path().join("staff.db"));
        store.create_table_if_not_exists().unwrap();

        for (i, salary) in salaries.iter().enumerate() {
            let draft = EmployeeDraft::new(
                "Mx",
                format!("Forename{}", i),
                format!("Surname{}", i),
                format!("person{}@example.com", i),
                *salary,
            );
            assert!(store.insert(&draft, &mut ScriptedConfirmation::approve()));
        }
        (dir, store)
    }

    fn arb_salaries() -> impl Strategy<Value = Vec<f64>> {
        prop::collection::vec(0.0f64..500_000.0, 1..6)
    }

    fn arb_percent() -> impl Strategy<Value = f64> {
        -99.0f64..200.0
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * b.abs().max(1.0)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_adjust_pay_scales_only_target(
            salaries in arb_salaries(),
            pick in any::<prop::sample::Index>(),
            percent in arb_percent(),
        ) {
            let (_dir, store) = seeded_store(&salaries);
            let before = store.list_all();
            let target = before[pick.index(before.len())].id();

            prop_assert!(store.adjust_pay(target, percent, &mut ScriptedConfirmation::approve()));

            let after = store.list_all();
            prop_assert_eq!(after.len(), before.len());
            for (old, new) in before.iter().zip(after.iter()) {
                if old.id() == target {
                    prop_assert!(close(new.salary, old.salary * pay_multiplier(percent)));
                } else {
                    prop_assert_eq!(new.salary, old.salary);
                }
            }
        }

        #[test]
        fn prop_adjust_pay_all_scales_everyone(
            salaries in arb_salaries(),
            percent in arb_percent(),
        ) {
            let (_dir, store) = seeded_store(&salaries);
            let before = store.list_all();

            prop_assert!(store.adjust_pay_all(percent, &mut ScriptedConfirmation::approve()));

            let after = store.list_all();
            for (old, new) in before.iter().zip(after.iter()) {
                prop_assert!(close(new.salary, old.salary * pay_multiplier(percent)));
            }
        }

        #[test]
        fn prop_rejected_adjustment_changes_nothing(
            salaries in arb_salaries(),
            percent in arb_percent(),
        ) {
            let (_dir, store) = seeded_store(&salaries);
            let before = store.list_all();

            prop_assert!(!store.adjust_pay_all(percent, &mut ScriptedConfirmation::reject()));
            prop_assert_eq!(store.list_all(), before);
        }
    }
}
