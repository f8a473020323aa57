use serde::{Deserialize, Serialize};

/// Outcome of the MFA policy for a single account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ComplianceVerdict {
    /// Console user with MFA enrolled
    Pass,
    /// Console user without any MFA device
    Fail,
    /// No console access, MFA not applicable
    Info,
}

impl ComplianceVerdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplianceVerdict::Pass => "PASS",
            ComplianceVerdict::Fail => "FAIL",
            ComplianceVerdict::Info => "INFO",
        }
    }

    /// Human-readable explanation shown next to the verdict label.
    pub fn message(&self) -> &'static str {
        match self {
            ComplianceVerdict::Pass => "MFA enabled for console user.",
            ComplianceVerdict::Fail => "Console access WITHOUT MFA!",
            ComplianceVerdict::Info => "No console access (MFA not required).",
        }
    }
}

impl std::fmt::Display for ComplianceVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classify an account from its console capability and enrolled MFA device count.
///
/// This is the only place the MFA policy is decided; tallies, labels and
/// exported status strings all derive from the returned verdict.
pub fn classify(has_console_access: bool, mfa_device_count: usize) -> ComplianceVerdict {
    match (has_console_access, mfa_device_count > 0) {
        (true, true) => ComplianceVerdict::Pass,
        (true, false) => ComplianceVerdict::Fail,
        (false, _) => ComplianceVerdict::Info,
    }
}
