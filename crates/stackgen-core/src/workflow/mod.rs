//! CI/CD workflow primitives: the job-graph model, condition predicates,
//! and ephemeral stage naming.

pub mod model;

pub use model::{
    AccessLevel, Job, OrderedMap, Permissions, PullRequestTrigger, PushTrigger, Step, Triggers,
    Workflow,
};

/// Inclusive lower bound of the random suffix of an ephemeral stage name.
/// The generated workflow mints the name at CI run time (the `shuf` step)
/// so concurrent runs never collide on stage names.
pub const STAGE_ID_MIN: u32 = 10_000;

/// Inclusive upper bound of the random suffix of an ephemeral stage name.
pub const STAGE_ID_MAX: u32 = 99_999;

/// Prefix of every ephemeral stage name.
pub const STAGE_ID_PREFIX: &str = "test-";

/// Condition predicates attached to jobs and steps. They are evaluated by
/// the CI runner; this crate only attaches the text unmodified.
pub mod guards {
    /// Run even when earlier steps in the same job failed.
    pub const ALWAYS: &str = "always()";

    /// Run only for pull request events.
    pub const ON_PULL_REQUEST: &str = "github.event_name == 'pull_request'";

    /// Run only for pushes to the given branch. Mutually exclusive with
    /// [`ON_PULL_REQUEST`] under any single triggering event.
    pub fn on_push_to(branch: &str) -> String {
        format!("github.ref == 'refs/heads/{branch}' && github.event_name == 'push'")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_id_bounds_span_five_digit_suffixes() {
        assert!(STAGE_ID_MIN < STAGE_ID_MAX);
        assert_eq!(STAGE_ID_MIN.to_string().len(), 5);
        assert_eq!(STAGE_ID_MAX.to_string().len(), 5);
        assert!(STAGE_ID_PREFIX.ends_with('-'));
    }

    #[test]
    fn test_guards_are_mutually_exclusive_per_event() {
        // A single triggering event has exactly one event_name; the two
        // deploy guards require different ones.
        assert!(guards::ON_PULL_REQUEST.contains("event_name == 'pull_request'"));
        assert!(guards::on_push_to("main").contains("event_name == 'push'"));
        assert!(guards::on_push_to("main").contains("refs/heads/main"));
    }
}
