//! Preference validation and loading.
//!
//! Preferences arrive from a wizard, a file or CLI flags; this module checks
//! them against the ranges the generator relies on.

use crate::{Error, Result, UserPreferences};
use std::path::Path;

pub const MIN_AGE: u8 = 13;
pub const MAX_AGE: u8 = 100;
pub const MIN_DAYS_PER_WEEK: u8 = 1;
pub const MAX_DAYS_PER_WEEK: u8 = 7;

/// Whether muscle-count minimums for high frequencies are checked here
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FrequencyPolicy {
    /// Leave frequency minimums to the caller
    #[default]
    CallerEnforced,
    /// Reject too few target muscles for the requested frequency
    EnforceMinimums,
}

/// Fewest target muscle groups accepted for a weekly frequency under
/// `FrequencyPolicy::EnforceMinimums`
pub fn minimum_muscles_for(days_per_week: u8) -> usize {
    match days_per_week {
        5.. => 4,
        3 | 4 => 2,
        _ => 1,
    }
}

impl UserPreferences {
    /// Check the preference ranges
    ///
    /// Returns `Error::InvalidPreference` naming the first violated rule.
    pub fn validate(&self, policy: FrequencyPolicy) -> Result<()> {
        if !(MIN_DAYS_PER_WEEK..=MAX_DAYS_PER_WEEK).contains(&self.days_per_week) {
            return Err(Error::InvalidPreference(format!(
                "days per week must be between {} and {}, got {}",
                MIN_DAYS_PER_WEEK, MAX_DAYS_PER_WEEK, self.days_per_week
            )));
        }
        if !(MIN_AGE..=MAX_AGE).contains(&self.age) {
            return Err(Error::InvalidPreference(format!(
                "age must be between {} and {}, got {}",
                MIN_AGE, MAX_AGE, self.age
            )));
        }
        if self.equipment.is_empty() {
            return Err(Error::InvalidPreference(
                "at least one equipment option is required".into(),
            ));
        }
        if self.target_muscles.is_empty() {
            return Err(Error::InvalidPreference(
                "at least one target muscle group is required".into(),
            ));
        }

        if policy == FrequencyPolicy::EnforceMinimums {
            let minimum = minimum_muscles_for(self.days_per_week);
            if self.target_muscles.len() < minimum {
                return Err(Error::InvalidPreference(format!(
                    "{} days per week requires at least {} muscle groups, got {}",
                    self.days_per_week,
                    minimum,
                    self.target_muscles.len()
                )));
            }
        }

        Ok(())
    }
}

/// Load preferences from a TOML or JSON file (chosen by extension)
///
/// Parsing only; callers validate before generating.
pub fn load_preferences(path: &Path) -> Result<UserPreferences> {
    let contents = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let preferences: UserPreferences = if is_json {
        serde_json::from_str(&contents)?
    } else {
        toml::from_str(&contents)?
    };

    tracing::debug!("Loaded preferences from {:?}", path);
    Ok(preferences)
}
