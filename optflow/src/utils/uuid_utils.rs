//! Run identifier generation.

use uuid::Uuid;

/// Generates a time-ordered identifier for a pipeline run.
///
/// V7 UUIDs sort by creation time, which keeps run logs and report files
/// naturally ordered on disk.
#[must_use]
pub fn generate_run_id() -> Uuid {
    Uuid::now_v7()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_ids_are_unique() {
        let a = generate_run_id();
        let b = generate_run_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_run_ids_are_time_ordered() {
        let a = generate_run_id();
        let b = generate_run_id();
        assert!(a.to_string() <= b.to_string());
    }
}
