// Copyright (c) 2025 - Cowboy AI, Inc.
//! Identity Generator
//!
//! Produces the opaque names used whenever a parameter is built without an
//! explicit name or id. Names are random UUIDs rendered as 32 lowercase hex
//! characters, so collisions within a process run are negligible and the
//! generator holds no shared state.

use tracing::trace;
use uuid::Uuid;

/// Length of every generated name
pub const NAME_LENGTH: usize = 32;

/// Generate a fresh opaque name
pub fn generate() -> String {
    let name = Uuid::new_v4().simple().to_string();
    trace!(name = %name, "generated parameter name");
    name
}

/// Check whether `name` has the shape of a generated name
pub fn is_generated(name: &str) -> bool {
    name.len() == NAME_LENGTH
        && name
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_names_are_well_formed() {
        let name = generate();
        assert_eq!(name.len(), NAME_LENGTH);
        assert!(is_generated(&name));
    }

    #[test]
    fn test_generated_names_are_unique() {
        let names: HashSet<String> = (0..10_000).map(|_| generate()).collect();
        assert_eq!(names.len(), 10_000);
    }

    #[test]
    fn test_is_generated_rejects_other_shapes() {
        assert!(!is_generated("d0"));
        assert!(!is_generated("ABCDEF0123456789ABCDEF0123456789"));
        assert!(!is_generated("01934f4a-0001-7000-8000-000000000001"));
    }

    #[test]
    fn test_generate_from_many_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| (0..1_000).map(|_| generate()).collect::<Vec<_>>()))
            .collect();

        let mut all = HashSet::new();
        for handle in handles {
            all.extend(handle.join().unwrap());
        }
        assert_eq!(all.len(), 4_000);
    }
}
