use anyhow::{bail, Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::contest::{sort_submissions, ContestWindow, ParticipantId, ProblemId, Submission};
use crate::standings::Roster;

/// Judge account behind a participant id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub username: String,
    pub nickname: String,
}

/// Raw layout of a VJudge `contest/rank/single/{id}` response.
#[derive(Debug, Deserialize)]
struct RankDocument {
    id: u64,
    title: String,
    /// Milliseconds since the epoch
    begin: i64,
    /// Milliseconds
    length: i64,
    #[serde(default)]
    participants: BTreeMap<u64, Vec<Value>>,
    #[serde(default)]
    submissions: Vec<Vec<Value>>,
}

/// A contest as loaded from a cached rank document, submissions sorted by offset.
#[derive(Debug, Clone)]
pub struct ContestDocument {
    pub id: u64,
    pub title: String,
    pub window: ContestWindow,
    pub participants: BTreeMap<ParticipantId, Account>,
    pub submissions: Vec<Submission>,
}

impl ContestDocument {
    /// Load a rank document from disk.
    pub fn load(path: &Path, upsolve_expiration: Duration) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open contest file at {}", path.display()))?;
        let raw: RankDocument = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse contest file {}", path.display()))?;
        Self::from_raw(raw, upsolve_expiration)
    }

    pub fn parse(json: &str, upsolve_expiration: Duration) -> Result<Self> {
        let raw: RankDocument = serde_json::from_str(json).context("Failed to parse rank document")?;
        Self::from_raw(raw, upsolve_expiration)
    }

    fn from_raw(raw: RankDocument, upsolve_expiration: Duration) -> Result<Self> {
        let Some(begin) = DateTime::<Utc>::from_timestamp_millis(raw.begin) else {
            bail!("Contest {}: begin timestamp {} is out of range", raw.id, raw.begin);
        };
        let Some(length) = Duration::try_milliseconds(raw.length) else {
            bail!("Contest {}: length {}ms is out of range", raw.id, raw.length);
        };
        let window = ContestWindow::new(begin, length, upsolve_expiration)
            .with_context(|| format!("Contest {} has an invalid window", raw.id))?;

        let mut participants = BTreeMap::new();
        for (id, fields) in raw.participants {
            let username = fields.first().and_then(Value::as_str).unwrap_or_default();
            let nickname = fields.get(1).and_then(Value::as_str).unwrap_or_default();
            participants.insert(
                ParticipantId(id),
                Account {
                    username: username.to_string(),
                    nickname: nickname.to_string(),
                },
            );
        }

        let mut submissions = Vec::with_capacity(raw.submissions.len());
        for (i, entry) in raw.submissions.iter().enumerate() {
            let submission = parse_submission(entry)
                .with_context(|| format!("Contest {}: malformed submission #{}", raw.id, i))?;
            if submission.offset < Duration::zero() {
                tracing::warn!(
                    contest = raw.id,
                    participant = %submission.participant,
                    offset_secs = submission.offset.num_seconds(),
                    "dropping submission made before the contest began"
                );
                continue;
            }
            if !participants.contains_key(&submission.participant) {
                tracing::debug!(
                    contest = raw.id,
                    participant = %submission.participant,
                    "submission from participant missing in the participant list"
                );
            }
            submissions.push(submission);
        }
        sort_submissions(&mut submissions);

        tracing::debug!(
            contest = raw.id,
            participants = participants.len(),
            submissions = submissions.len(),
            "loaded rank document"
        );

        Ok(Self {
            id: raw.id,
            title: raw.title,
            window,
            participants,
            submissions,
        })
    }

    pub fn account(&self, participant: ParticipantId) -> Option<&Account> {
        self.participants.get(&participant)
    }

    /// Username for display, falling back to the numeric id.
    pub fn display_name(&self, participant: ParticipantId) -> String {
        match self.account(participant) {
            Some(account) if !account.username.is_empty() => account.username.clone(),
            _ => participant.to_string(),
        }
    }

    /// Roster of participants whose username appears in `usernames` (case-insensitive).
    pub fn roster(&self, usernames: &[String]) -> Roster {
        self.participants
            .iter()
            .filter(|(_, account)| {
                usernames
                    .iter()
                    .any(|name| name.eq_ignore_ascii_case(&account.username))
            })
            .map(|(id, _)| *id)
            .collect()
    }
}

/// `[participantId, problemIndex, accepted, seconds]`
fn parse_submission(entry: &[Value]) -> Result<Submission> {
    if entry.len() < 4 {
        bail!("expected 4 fields, got {}", entry.len());
    }
    let participant = entry[0]
        .as_u64()
        .context("participant id is not an unsigned integer")?;
    let problem = entry[1]
        .as_u64()
        .and_then(|p| u32::try_from(p).ok())
        .context("problem index is not a small unsigned integer")?;
    let accepted = match &entry[2] {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_i64().context("accepted flag is not an integer")? != 0,
        other => bail!("accepted flag has unexpected type: {}", other),
    };
    let seconds = entry[3].as_i64().context("offset is not an integer")?;
    let offset = Duration::try_seconds(seconds)
        .with_context(|| format!("offset {}s is out of range", seconds))?;

    Ok(Submission::new(
        ParticipantId(participant),
        ProblemId(problem),
        accepted,
        offset,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    const SAMPLE: &str = r#"{
        "id": 587010,
        "title": "Weekly Training #3",
        "isReplay": false,
        "begin": 1696161600000,
        "length": 10800000,
        "participants": {
            "101": ["alice", "Alice L", "avatar.png"],
            "102": ["bob", "Bobby"],
            "103": ["carol", "C"]
        },
        "submissions": [
            [102, 0, 1, 1500],
            [101, 0, 0, 600],
            [101, 0, 1, 2400],
            [103, 1, 1, 11400],
            [101, 1, true, 900]
        ]
    }"#;

    fn expiration() -> Duration {
        Duration::days(7)
    }

    #[test]
    fn test_parse_sample_document() {
        let doc = ContestDocument::parse(SAMPLE, expiration()).unwrap();
        assert_eq!(doc.id, 587010);
        assert_eq!(doc.title, "Weekly Training #3");
        assert_eq!(doc.window.length(), Duration::hours(3));
        assert_eq!(doc.window.begin().timestamp(), 1696161600);
        assert_eq!(doc.participants.len(), 3);
        assert_eq!(
            doc.account(ParticipantId(101)),
            Some(&Account {
                username: "alice".to_string(),
                nickname: "Alice L".to_string()
            })
        );

        let offsets: Vec<i64> = doc.submissions.iter().map(|s| s.offset.num_seconds()).collect();
        assert_eq!(offsets, vec![600, 900, 1500, 2400, 11400]);
        assert!(doc.submissions[1].accepted);
        assert!(!doc.submissions[0].accepted);
    }

    #[test]
    fn test_roster_matches_usernames() {
        let doc = ContestDocument::parse(SAMPLE, expiration()).unwrap();
        let roster = doc.roster(&["ALICE".to_string(), "carol".to_string(), "dave".to_string()]);
        assert_eq!(roster.len(), 2);
        assert!(roster.is_enrolled(ParticipantId(101)));
        assert!(roster.is_enrolled(ParticipantId(103)));
        assert!(!roster.is_enrolled(ParticipantId(102)));
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let doc = ContestDocument::parse(SAMPLE, expiration()).unwrap();
        assert_eq!(doc.display_name(ParticipantId(102)), "bob");
        assert_eq!(doc.display_name(ParticipantId(999)), "999");
    }

    #[test]
    fn test_negative_offsets_are_dropped() {
        let json = r#"{"id": 1, "title": "t", "begin": 0, "length": 3600000,
            "participants": {"1": ["u", "n"]},
            "submissions": [[1, 0, 1, -30], [1, 0, 1, 60]]}"#;
        let doc = ContestDocument::parse(json, expiration()).unwrap();
        assert_eq!(doc.submissions.len(), 1);
        assert_eq!(doc.submissions[0].offset, Duration::seconds(60));
    }

    #[test]
    fn test_malformed_submission() {
        let json = r#"{"id": 1, "title": "t", "begin": 0, "length": 3600000,
            "submissions": [[1, 0, 1]]}"#;
        let err = ContestDocument::parse(json, expiration()).unwrap_err();
        assert!(format!("{:#}", err).contains("malformed submission #0"));
    }

    #[test]
    fn test_zero_length_contest_rejected() {
        let json = r#"{"id": 5, "title": "t", "begin": 0, "length": 0}"#;
        assert!(ContestDocument::parse(json, expiration()).is_err());
    }

    #[test]
    fn test_out_of_range_offset_rejected() {
        let json = r#"{"id": 6, "title": "t", "begin": 0, "length": 3600000,
            "submissions": [[1, 0, 1, 100000000000000000]]}"#;
        let err = ContestDocument::parse(json, expiration()).unwrap_err();
        assert!(format!("{:#}", err).contains("out of range"));
    }

    #[test]
    fn test_out_of_range_length_rejected() {
        let json = r#"{"id": 7, "title": "t", "begin": 0, "length": 9000000000000000000}"#;
        let err = ContestDocument::parse(json, expiration()).unwrap_err();
        assert!(format!("{:#}", err).contains("invalid window"));
    }

    #[test]
    fn test_deadline_past_calendar_range_rejected() {
        // a valid length whose upsolve deadline lands past the last representable date
        let json = r#"{"id": 8, "title": "t", "begin": 8210266876799000, "length": 3600000}"#;
        assert!(ContestDocument::parse(json, Duration::days(7)).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let temp_path = env::temp_dir().join("acm_standings_test_rank_document.json");
        std::fs::write(&temp_path, SAMPLE).unwrap();

        let doc = ContestDocument::load(&temp_path, expiration()).unwrap();
        assert_eq!(doc.submissions.len(), 5);

        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_path = env::temp_dir().join("acm_standings_test_missing_rank.json");
        let _ = std::fs::remove_file(&temp_path);
        assert!(ContestDocument::load(&temp_path, expiration()).is_err());
    }
}
