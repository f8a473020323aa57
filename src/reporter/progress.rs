//! Live account counter drawn on stderr while lookups are in flight.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::audit::{AuditRecord, ComplianceVerdict};

/// Small account lists finish before a bar is worth drawing.
const MIN_ACCOUNTS_FOR_PROGRESS: usize = 10;

const PROGRESS_TEMPLATE: &str = "Auditing {bar:40} {pos:>4}/{len:4} users [{elapsed_precise}] {wide_msg}";

pub struct AuditProgress {
    bar: Option<ProgressBar>,
    without_mfa: AtomicUsize,
}

impl AuditProgress {
    /// Draws only for an interactive, non-CI stderr and a large enough listing.
    pub fn for_accounts(total_accounts: usize, stderr_is_tty: bool, ci: bool) -> Self {
        let bar = if draws_progress(total_accounts, stderr_is_tty, ci) {
            create_progress_bar(total_accounts)
        } else {
            None
        };
        Self {
            bar,
            without_mfa: AtomicUsize::new(0),
        }
    }

    pub fn hidden() -> Self {
        Self {
            bar: None,
            without_mfa: AtomicUsize::new(0),
        }
    }

    /// Advance past one classified account.
    pub fn record(&self, record: &AuditRecord) {
        let without_mfa = if record.verdict == ComplianceVerdict::Fail {
            self.without_mfa.fetch_add(1, Ordering::Relaxed) + 1
        } else {
            self.without_mfa.load(Ordering::Relaxed)
        };

        if let Some(bar) = &self.bar {
            bar.set_message(progress_message(&record.account_name, without_mfa));
            bar.inc(1);
        }
    }

    /// Console users without MFA seen so far.
    pub fn without_mfa(&self) -> usize {
        self.without_mfa.load(Ordering::Relaxed)
    }

    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

fn draws_progress(total_accounts: usize, stderr_is_tty: bool, ci: bool) -> bool {
    total_accounts >= MIN_ACCOUNTS_FOR_PROGRESS && stderr_is_tty && !ci
}

fn progress_message(last_account: &str, without_mfa: usize) -> String {
    match without_mfa {
        0 => format!("last: {last_account}"),
        n => format!("last: {last_account}, {n} without MFA"),
    }
}

fn create_progress_bar(total: usize) -> Option<ProgressBar> {
    let style = ProgressStyle::with_template(PROGRESS_TEMPLATE)
        .ok()?
        .progress_chars("⣿⣀ ");
    let pb = ProgressBar::with_draw_target(Some(total as u64), ProgressDrawTarget::stderr());
    pb.set_style(style);
    Some(pb)
}
