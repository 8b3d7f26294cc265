use chrono::NaiveDate;

use crate::config::XP_PER_SUBMISSION;

/// Gamification counters as stored on a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub xp: i64,
    pub streak: i32,
    pub last_practice_on: Option<NaiveDate>,
}

/// Experience earned for one graded submission: a flat award plus a tenth
/// of the score. Negative scores earn only the flat award.
pub fn xp_for_score(score: f64) -> i64 {
    XP_PER_SUBMISSION.saturating_add((score.max(0.0) / 10.0).round() as i64)
}

/// Applies one graded submission made on `today`.
///
/// Streak rules:
/// * already practised today: unchanged
/// * last practice was yesterday: +1
/// * otherwise: restarts at 1
pub fn award(current: Progress, score: f64, today: NaiveDate) -> Progress {
    let streak = match current.last_practice_on {
        Some(last) if last == today => current.streak.max(1),
        Some(last) if today.pred_opt() == Some(last) => current.streak.saturating_add(1),
        _ => 1,
    };

    Progress {
        xp: current.xp.saturating_add(xp_for_score(score)),
        streak,
        last_practice_on: Some(today),
    }
}
