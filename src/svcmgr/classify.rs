//! Interpretation of `systemctl` output.
//!
//! `systemctl` reports most conditions only as human readable text, so this is
//! the one place that knows which substrings and exit codes mean what.

use super::exec::Invocation;

/// Printed by `systemctl status` for units that have no definition loaded.
pub const NOT_FOUND_MARKER: &str = "could not be found";

/// Printed when polkit wants to prompt for a password.
pub const INTERACTIVE_AUTH_MARKER: &str = "Interactive authentication required";

/// Parts of the `Loaded:` status line, e.g. `(/etc/systemd/system/x.service; enabled; preset: enabled)`.
pub const ENABLEMENT_MARKERS: [&str; 2] = ["disabled;", "enabled;"];

/// Exit code of `systemctl status` for units that are inactive or unknown.
pub const INACTIVE_EXIT_CODE: i32 = 3;

/// What `systemctl status <unit>` told us about a unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitStatus {
    /// No unit by that name.
    Missing,

    /// The unit is known. `enablement` is whether the status line carries an
    /// enabled/disabled marker.
    Loaded { enablement: bool },

    /// The query failed for another reason. Holds the raw output.
    Failed(String),
}

pub fn classify_status(status: &Invocation) -> UnitStatus {
    let failed = status
        .failure()
        .is_some_and(|failure| failure.code() != Some(INACTIVE_EXIT_CODE));

    if failed {
        if is_not_found(&status.output) {
            UnitStatus::Missing
        } else {
            UnitStatus::Failed(status.output.clone())
        }
    } else {
        UnitStatus::Loaded {
            enablement: has_enablement_marker(&status.output),
        }
    }
}

pub fn is_not_found(output: &str) -> bool {
    output.contains(NOT_FOUND_MARKER)
}

pub fn needs_interactive_auth(output: &str) -> bool {
    output.contains(INTERACTIVE_AUTH_MARKER)
}

pub fn has_enablement_marker(output: &str) -> bool {
    ENABLEMENT_MARKERS
        .iter()
        .any(|marker| output.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENABLED: &str = "● x.service - x\n     Loaded: loaded (/etc/systemd/system/x.service; enabled; preset: enabled)\n     Active: active (running)\n";
    const DISABLED: &str = "○ x.service - x\n     Loaded: loaded (/etc/systemd/system/x.service; disabled; preset: enabled)\n     Active: inactive (dead)\n";
    const MISSING: &str = "Unit x.service could not be found.\n";

    #[test]
    fn missing_unit() {
        assert_eq!(classify_status(&Invocation::new(Some(4), MISSING)), UnitStatus::Missing);
    }

    #[test]
    fn other_failure_keeps_output() {
        assert_eq!(
            classify_status(&Invocation::new(Some(1), "Failed to connect to bus")),
            UnitStatus::Failed("Failed to connect to bus".into())
        );
        assert_eq!(
            classify_status(&Invocation::new(None, "")),
            UnitStatus::Failed(String::new())
        );
    }

    #[test]
    fn inactive_exit_code_is_not_a_failure() {
        assert_eq!(
            classify_status(&Invocation::new(Some(3), DISABLED)),
            UnitStatus::Loaded { enablement: true }
        );
        assert_eq!(
            classify_status(&Invocation::new(Some(3), "Active: inactive (dead)")),
            UnitStatus::Loaded { enablement: false }
        );
    }

    #[test]
    fn inactive_exit_code_with_not_found_text() {
        // Code 3 short-circuits the not-found check.
        assert_eq!(
            classify_status(&Invocation::new(Some(3), MISSING)),
            UnitStatus::Loaded { enablement: false }
        );
    }

    #[test]
    fn running_unit() {
        assert_eq!(
            classify_status(&Invocation::new(Some(0), ENABLED)),
            UnitStatus::Loaded { enablement: true }
        );
        assert_eq!(
            classify_status(&Invocation::new(Some(0), "Loaded: loaded (/run/x.service; static)")),
            UnitStatus::Loaded { enablement: false }
        );
    }

    #[test]
    fn interactive_auth() {
        assert!(needs_interactive_auth(
            "Failed to enable unit: Interactive authentication required.\n"
        ));
        assert!(!needs_interactive_auth("Access denied"));
    }
}
