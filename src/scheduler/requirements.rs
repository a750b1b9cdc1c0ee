use crate::types::CreditHours;

/// Counts of sessions to place for one course, derived from its credit
/// tuple (§4.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionRequirement {
    pub lectures: u32,
    pub tutorials: u32,
    pub labs: u32,
    pub self_study: u32,
}

impl SessionRequirement {
    pub fn total(&self) -> u32 {
        self.lectures + self.tutorials + self.labs + self.self_study
    }
}

/// Translate a credit tuple into session counts.
///
/// A course with only self-study credit produces no sessions at all — it is
/// assessed outside the weekly grid.
pub fn derive_requirement(credits: &CreditHours) -> SessionRequirement {
    let CreditHours {
        lecture,
        tutorial,
        lab,
        self_study,
    } = *credits;

    if self_study > 0 && lecture == 0.0 && tutorial == 0 && lab == 0 {
        return SessionRequirement::default();
    }

    let lectures = if lecture > 0.0 {
        (lecture * 2.0 / 3.0).round().max(1.0) as u32
    } else {
        0
    };
    let tutorials = tutorial;
    let labs = lab / 2;
    let any_contact = lecture > 0.0 || tutorial > 0 || lab > 0;
    let self_study = if any_contact { self_study / 4 } else { 0 };

    SessionRequirement {
        lectures,
        tutorials,
        labs,
        self_study,
    }
}
