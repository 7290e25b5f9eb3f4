//! XP, levels, daily streaks and quiz rewards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::session::Profile;

/// XP needed to move past `level` (level 1 ends at 100, level 2 at 200, ...).
pub fn level_threshold(level: u32) -> u32 {
    level.saturating_mul(100)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XpAward {
    pub xp: u32,
    pub level: u32,
    pub streak_days: u32,
    pub last_activity_date: NaiveDate,
    pub leveled_up: bool,
}

impl XpAward {
    pub fn apply(&self, profile: &mut Profile) {
        profile.xp = self.xp;
        profile.level = self.level;
        profile.streak_days = self.streak_days;
        profile.last_activity_date = Some(self.last_activity_date);
    }
}

pub fn next_streak(current: u32, last_activity: Option<NaiveDate>, today: NaiveDate) -> u32 {
    let Some(last) = last_activity else {
        return 1;
    };
    match (today - last).num_days() {
        1 => current.saturating_add(1),
        days if days > 1 => 1,
        // Same day, or a clock that went backwards.
        _ => current,
    }
}

/// Compute the profile totals after earning `amount` XP on `today`.
pub fn award_xp(profile: &Profile, amount: u32, today: NaiveDate) -> XpAward {
    let xp = profile.xp.saturating_add(amount);
    let current_level = profile.level.max(1);

    // Lowest level whose threshold is still above `xp`.
    let level = current_level.max(xp / 100 + 1);
    let leveled_up = level > current_level;
    if leveled_up {
        info!(level, xp, "Level up");
    }

    XpAward {
        xp,
        level,
        streak_days: next_streak(profile.streak_days, profile.last_activity_date, today),
        last_activity_date: today,
        leveled_up,
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

pub const DEFAULT_QUIZ_XP_REWARD: u32 = 10;

/// XP a quiz of this difficulty is worth when every answer is right.
pub fn quiz_xp_reward(difficulty: Difficulty) -> u32 {
    match difficulty {
        Difficulty::Easy => 10,
        Difficulty::Medium => 30,
        Difficulty::Hard => 50,
    }
}

/// `reward` scaled by the share of correct answers, rounded half up.
/// A zero reward falls back to [`DEFAULT_QUIZ_XP_REWARD`]; a quiz without
/// questions is scored against one.
pub fn quiz_xp_earned(score: u32, total: u32, reward: u32) -> u32 {
    let total = u64::from(total.max(1));
    let reward = if reward == 0 { DEFAULT_QUIZ_XP_REWARD } else { reward };
    let scaled = u64::from(score) * u64::from(reward);
    let earned = (2 * scaled + total) / (2 * total);
    u32::try_from(earned).unwrap_or(u32::MAX)
}
