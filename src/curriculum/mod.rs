//! Static worksheet curriculum.
//!
//! Each [`Track`] is an ordered list of [`WorksheetStep`]s built once on
//! first use. Worksheet ids are unique across all tracks, so a submission's
//! `worksheet_id` identifies both the step and its track.

mod glyphs;

use std::{collections::BTreeSet, fmt, str::FromStr, sync::LazyLock};

use serde::{Deserialize, Serialize};

use crate::models::submission::Submission;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Track {
    Lowercase,
    MagicC,
    Numbers,
    Uppercase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// One worksheet in a track.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorksheetStep {
    pub id: String,
    pub title: String,
    /// Friendlier copy shown in kids mode.
    pub kid_title: String,
    pub description: String,
    pub kid_description: String,
    pub difficulty: Difficulty,
    /// Printable worksheet, relative to the site root.
    pub worksheet_url: String,
    pub skills: Vec<String>,
    pub estimated_minutes: u32,
    pub color: String,
    pub emoji: String,
}

static LOWERCASE: LazyLock<Vec<WorksheetStep>> = LazyLock::new(|| glyphs::build(Track::Lowercase));
static MAGIC_C: LazyLock<Vec<WorksheetStep>> = LazyLock::new(|| glyphs::build(Track::MagicC));
static NUMBERS: LazyLock<Vec<WorksheetStep>> = LazyLock::new(|| glyphs::build(Track::Numbers));
static UPPERCASE: LazyLock<Vec<WorksheetStep>> = LazyLock::new(|| glyphs::build(Track::Uppercase));

impl Track {
    pub const ALL: [Track; 4] = [Track::Lowercase, Track::MagicC, Track::Numbers, Track::Uppercase];

    pub fn slug(self) -> &'static str {
        match self {
            Track::Lowercase => "lowercase",
            Track::MagicC => "magic-c",
            Track::Numbers => "numbers",
            Track::Uppercase => "uppercase",
        }
    }

    /// Ordered steps of this track.
    pub fn steps(self) -> &'static [WorksheetStep] {
        match self {
            Track::Lowercase => &LOWERCASE,
            Track::MagicC => &MAGIC_C,
            Track::Numbers => &NUMBERS,
            Track::Uppercase => &UPPERCASE,
        }
    }

    pub fn worksheet_ids(self) -> Vec<String> {
        self.steps().iter().map(|s| s.id.clone()).collect()
    }

    pub fn contains(self, worksheet_id: &str) -> bool {
        self.steps().iter().any(|s| s.id == worksheet_id)
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Track {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Track::ALL
            .into_iter()
            .find(|t| t.slug() == s)
            .ok_or_else(|| format!("Unknown track '{}'", s))
    }
}

/// Looks a worksheet up across every track.
pub fn find_step(worksheet_id: &str) -> Option<(Track, &'static WorksheetStep)> {
    Track::ALL.into_iter().find_map(|track| {
        track
            .steps()
            .iter()
            .find(|s| s.id == worksheet_id)
            .map(|s| (track, s))
    })
}

/// Distinct worksheet ids among `submissions` that belong to `track`.
pub fn completed_worksheets(track: Track, submissions: &[Submission]) -> BTreeSet<String> {
    submissions
        .iter()
        .filter(|s| track.contains(&s.worksheet_id))
        .map(|s| s.worksheet_id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn submission(id: &str, worksheet_id: &str) -> Submission {
        Submission {
            id: uuid::Uuid::new_v4(),
            user_id: uuid::Uuid::nil(),
            worksheet_id: worksheet_id.to_string(),
            score: 80.0,
            steadiness: 70.0,
            accuracy: 90.0,
            feedback: Some(id.to_string()),
            image_path: format!("u/{worksheet_id}/{id}.png"),
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn track_sizes() {
        assert_eq!(Track::Lowercase.steps().len(), 26);
        assert_eq!(Track::MagicC.steps().len(), 6);
        assert_eq!(Track::Numbers.steps().len(), 10);
        assert_eq!(Track::Uppercase.steps().len(), 26);
    }

    #[test]
    fn worksheet_ids_are_unique_across_tracks() {
        let mut seen = HashSet::new();
        for track in Track::ALL {
            for step in track.steps() {
                assert!(seen.insert(step.id.clone()), "duplicate id {}", step.id);
            }
        }
    }

    #[test]
    fn lowercase_starts_with_letter_a() {
        let first = &Track::Lowercase.steps()[0];
        assert_eq!(first.id, "letter-a");
        assert_eq!(first.title, "Lowercase a");
        assert_eq!(first.kid_title, "a is for apple");
        assert_eq!(first.worksheet_url, "/worksheets/lowercase/letter-a.pdf");
    }

    #[test]
    fn magic_c_opens_with_c() {
        let ids = Track::MagicC.worksheet_ids();
        assert_eq!(ids, ["magic-c-c", "magic-c-a", "magic-c-d", "magic-c-g", "magic-c-o", "magic-c-q"]);
        assert!(Track::MagicC.steps().iter().all(|s| s.skills.contains(&"magic-c".to_string())));
    }

    #[test]
    fn uppercase_titles_use_capitals() {
        let b = &Track::Uppercase.steps()[1];
        assert_eq!(b.id, "uppercase-b");
        assert_eq!(b.title, "Uppercase B");
    }

    #[test]
    fn slugs_round_trip() {
        for track in Track::ALL {
            assert_eq!(track.slug().parse::<Track>().unwrap(), track);
        }
        assert!("cursive".parse::<Track>().is_err());
    }

    #[test]
    fn find_step_reports_track() {
        let (track, step) = find_step("number-7").unwrap();
        assert_eq!(track, Track::Numbers);
        assert_eq!(step.title, "Number 7");
        assert!(find_step("letter-?").is_none());
    }

    #[test]
    fn completed_set_is_derived_from_submissions() {
        let subs = vec![
            submission("s1", "letter-a"),
            submission("s2", "letter-b"),
            submission("s3", "letter-a"),
            submission("s4", "number-1"),
        ];
        let completed = completed_worksheets(Track::Lowercase, &subs);
        assert_eq!(
            completed,
            BTreeSet::from(["letter-a".to_string(), "letter-b".to_string()])
        );
    }
}
