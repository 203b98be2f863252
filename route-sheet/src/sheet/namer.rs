//! Collision-free sheet names.

use super::workbook::{Workbook, WorkbookError};

/// First name derived from `base` that `exists` reports as free.
///
/// Returns `base` itself when unused, then tries `base (2)`, `base (3)`, ...
pub fn unique_name(base: &str, exists: impl Fn(&str) -> bool) -> String {
    let mut name = base.to_string();
    let mut counter = 1;
    while exists(&name) {
        counter += 1;
        name = format!("{base} ({counter})");
    }
    name
}

/// Create a sheet named after `base`, suffixed if needed.
///
/// Names are checked against the workbook at call time. Callers sharing a
/// workbook must hold their lock across this call.
pub fn create_unique_sheet<W: Workbook + ?Sized>(
    workbook: &mut W,
    base: &str,
) -> Result<String, WorkbookError> {
    let names = workbook.sheet_names();
    let name = unique_name(base, |candidate| names.iter().any(|n| n == candidate));
    workbook.create_sheet(&name)?;
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::MemoryWorkbook;
    use std::collections::HashSet;

    fn taken(names: &[&str]) -> HashSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn unused_base_is_returned() {
        let existing = taken(&["Input"]);
        assert_eq!(unique_name("X", |n| existing.contains(n)), "X");
    }

    #[test]
    fn first_suffix_is_two() {
        let existing = taken(&["X"]);
        assert_eq!(unique_name("X", |n| existing.contains(n)), "X (2)");
    }

    #[test]
    fn skips_taken_suffixes() {
        let existing = taken(&["X", "X (2)", "X (3)"]);
        assert_eq!(unique_name("X", |n| existing.contains(n)), "X (4)");
    }

    #[test]
    fn stops_at_first_free_suffix() {
        let existing = taken(&["X", "X (3)"]);
        assert_eq!(unique_name("X", |n| existing.contains(n)), "X (2)");
    }

    #[test]
    fn create_unique_sheet_increments() {
        let mut wb = MemoryWorkbook::new();

        assert_eq!(create_unique_sheet(&mut wb, "Tokyo to Shinjuku").unwrap(), "Tokyo to Shinjuku");
        assert_eq!(
            create_unique_sheet(&mut wb, "Tokyo to Shinjuku").unwrap(),
            "Tokyo to Shinjuku (2)"
        );
        assert_eq!(
            create_unique_sheet(&mut wb, "Tokyo to Shinjuku").unwrap(),
            "Tokyo to Shinjuku (3)"
        );
        assert_eq!(wb.sheet_names().len(), 3);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    proptest! {
        /// With base plus suffixes 2..=k taken, the result is always "base (k+1)".
        #[test]
        fn monotonic_without_gaps(base in "[A-Za-z ]{1,12}", k in 1usize..20) {
            let mut existing: HashSet<String> = HashSet::new();
            existing.insert(base.clone());
            for i in 2..=k {
                existing.insert(format!("{base} ({i})"));
            }

            let name = unique_name(&base, |n| existing.contains(n));
            prop_assert_eq!(name, format!("{base} ({})", k + 1));
        }

        /// The result is never an existing name, and is deterministic.
        #[test]
        fn never_collides(
            base in "[a-z]{1,6}",
            others in proptest::collection::hash_set("[a-z]{1,6}( \\([2-9]\\))?", 0..20),
        ) {
            let name = unique_name(&base, |n| others.contains(n));
            prop_assert!(!others.contains(&name));
            prop_assert_eq!(name.clone(), unique_name(&base, |n| others.contains(n)));
        }
    }
}
