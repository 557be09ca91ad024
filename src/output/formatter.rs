use std::io::IsTerminal;
use chrono::{DateTime, Duration, Utc};
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::contest::ContestWindow;
use crate::standings::{StandingRow, SummaryRow};

/// A board row with the name to show for it
pub struct NamedRow<'a> {
    pub row: &'a StandingRow,
    pub name: &'a str,
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a penalty as H:MM:SS
pub fn format_penalty(penalty: Duration) -> String {
    let total = penalty.num_seconds().max(0);
    format!("{}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}

/// Format a remaining duration compactly
/// "2h" for hours, "3d" for days, "1w" for weeks
pub fn format_remaining(duration: Duration) -> String {
    let hours = duration.num_hours();
    let days = duration.num_days();
    let weeks = days / 7;

    if weeks >= 1 {
        format!("{}w", weeks)
    } else if days >= 1 {
        format!("{}d", days)
    } else if hours >= 1 {
        format!("{}h", hours)
    } else {
        let minutes = duration.num_minutes();
        if minutes >= 1 {
            format!("{}m", minutes)
        } else {
            "<1m".to_string()
        }
    }
}

/// One line telling whether upsolving is still open at `now`
pub fn format_upsolve_deadline(window: &ContestWindow, now: DateTime<Utc>, use_colors: bool) -> String {
    let deadline = window.upsolve_deadline();
    let stamp = deadline.format("%Y-%m-%d %H:%M UTC");
    if window.is_upsolve_open(now) {
        let left = format_remaining(deadline - now);
        if use_colors {
            format!("Upsolve open until {} ({} left)", stamp, left.green())
        } else {
            format!("Upsolve open until {} ({} left)", stamp, left)
        }
    } else if use_colors {
        format!("Upsolve closed on {}", stamp.red())
    } else {
        format!("Upsolve closed on {}", stamp)
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn fit_name(name: &str, fixed_width: usize, term_width: Option<usize>) -> String {
    match term_width {
        Some(width) if width > fixed_width + 10 => truncate_name(name, width - fixed_width),
        // Very narrow terminal
        Some(_) => truncate_name(name, 20),
        None => name.to_string(),
    }
}

/// Format a board as a table: Rank, Score, Solved, Upsolved, Penalty, Name
/// Unranked rows show "-" in the rank column
pub fn format_board(rows: &[NamedRow], use_colors: bool) -> String {
    if rows.is_empty() {
        return "No participants found.".to_string();
    }

    let term_width = get_terminal_width();
    let separator = "  ";
    // rank 4, score 3, solved 3, upsolved 4, penalty 9
    let fixed_width = 4 + 3 + 3 + 4 + 9 + separator.len() * 5;

    let header = format!(
        "{:>4}{sep}{:>3}{sep}{:>3}{sep}{:>4}{sep}{:>9}{sep}{}",
        "#", "Pts", "AC", "Up", "Penalty", "Name",
        sep = separator
    );
    let header = if use_colors {
        header.dimmed().to_string()
    } else {
        header
    };

    let lines = rows.iter().map(|named| {
        let record = &named.row.record;
        let rank = record
            .competition_rank
            .map(|r| format!("{}.", r))
            .unwrap_or_else(|| "-".to_string());
        let upsolved = if record.upsolved > 0 {
            format!("+{}", record.upsolved)
        } else {
            String::new()
        };
        let name = fit_name(named.name, fixed_width, term_width);

        let rank = format!("{:>4}", rank);
        let score = format!("{:>3}", named.row.score.score);
        let solved = format!("{:>3}", record.solved);
        let upsolved = format!("{:>4}", upsolved);
        let penalty = format!("{:>9}", format_penalty(record.total_penalty));

        if use_colors {
            format!(
                "{}{sep}{}{sep}{}{sep}{}{sep}{}{sep}{}",
                rank.dimmed(),
                score.bold(),
                solved,
                upsolved.cyan(),
                penalty,
                name.yellow(),
                sep = separator
            )
        } else {
            format!(
                "{}{sep}{}{sep}{}{sep}{}{sep}{}{sep}{}",
                rank, score, solved, upsolved, penalty, name,
                sep = separator
            )
        }
    });

    std::iter::once(header)
        .chain(lines)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a board as tab-separated values for scripting
/// Columns: rank, name, score, solved, upsolved, penalty_seconds (no headers, no colors)
pub fn format_tsv(rows: &[NamedRow]) -> String {
    rows.iter()
        .map(|named| {
            let record = &named.row.record;
            format!(
                "{}\t{}\t{}\t{}\t{}\t{}",
                record
                    .competition_rank
                    .map(|r| r.to_string())
                    .unwrap_or_default(),
                named.name,
                named.row.score.score,
                record.solved,
                record.upsolved,
                record.total_penalty.num_seconds()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format cumulative results: Index, Score, Contests, Solved, Upsolved, Penalty, Account
pub fn format_summary_table(rows: &[&SummaryRow], use_colors: bool) -> String {
    if rows.is_empty() {
        return "No participants found.".to_string();
    }

    let term_width = get_terminal_width();
    let separator = "  ";
    let fixed_width = 4 + 5 + 3 + 4 + 4 + 10 + separator.len() * 6;

    rows.iter()
        .enumerate()
        .map(|(idx, row)| {
            let index = format!("{:>3}.", idx + 1);
            let score = format!("{:>5}", row.score);
            let name = fit_name(&row.account, fixed_width, term_width);
            let rest = format!(
                "{:>3}{sep}{:>4}{sep}{:>4}{sep}{:>10}",
                row.contests,
                row.solved,
                format!("+{}", row.upsolved),
                format_penalty(row.penalty),
                sep = separator
            );

            if use_colors {
                format!(
                    "{}{sep}{}{sep}{}{sep}{}",
                    index.dimmed(),
                    score.bold(),
                    rest,
                    name.yellow(),
                    sep = separator
                )
            } else {
                format!("{}{sep}{}{sep}{}{sep}{}", index, score, rest, name, sep = separator)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contest::{ParticipantId, ProblemId, Submission};
    use crate::scoring::ScoringConfig;
    use crate::standings::Standings;
    use chrono::TimeZone;

    fn window() -> ContestWindow {
        ContestWindow::new(
            Utc.with_ymd_and_hms(2023, 10, 1, 12, 0, 0).unwrap(),
            Duration::hours(3),
            Duration::days(7),
        )
        .unwrap()
    }

    fn sample_standings() -> Standings {
        let subs = vec![
            Submission::new(ParticipantId(1), ProblemId(0), false, Duration::minutes(10)),
            Submission::new(ParticipantId(1), ProblemId(0), true, Duration::minutes(30)),
            Submission::new(ParticipantId(2), ProblemId(0), true, Duration::minutes(60)),
            Submission::new(ParticipantId(3), ProblemId(1), true, Duration::hours(5)),
        ];
        Standings::compute(&window(), &subs, |_| true, &ScoringConfig::default()).unwrap()
    }

    fn named<'a>(standings: &'a Standings, names: &'a [&'a str]) -> Vec<NamedRow<'a>> {
        standings
            .ordered_rows(false)
            .into_iter()
            .zip(names.iter())
            .map(|(row, name)| NamedRow { row, name })
            .collect()
    }

    #[test]
    fn test_format_penalty() {
        assert_eq!(format_penalty(Duration::zero()), "0:00:00");
        assert_eq!(format_penalty(Duration::minutes(50)), "0:50:00");
        assert_eq!(format_penalty(Duration::seconds(3 * 3600 + 61)), "3:01:01");
        assert_eq!(format_penalty(Duration::hours(27)), "27:00:00");
    }

    #[test]
    fn test_format_remaining() {
        assert_eq!(format_remaining(Duration::weeks(2)), "2w");
        assert_eq!(format_remaining(Duration::days(3)), "3d");
        assert_eq!(format_remaining(Duration::hours(5)), "5h");
        assert_eq!(format_remaining(Duration::minutes(30)), "30m");
        assert_eq!(format_remaining(Duration::seconds(30)), "<1m");
    }

    #[test]
    fn test_format_upsolve_deadline_open() {
        let now = Utc.with_ymd_and_hms(2023, 10, 5, 15, 0, 0).unwrap();
        let line = format_upsolve_deadline(&window(), now, false);
        assert_eq!(line, "Upsolve open until 2023-10-08 15:00 UTC (3d left)");
    }

    #[test]
    fn test_format_upsolve_deadline_closed() {
        let now = Utc.with_ymd_and_hms(2023, 11, 1, 0, 0, 0).unwrap();
        let line = format_upsolve_deadline(&window(), now, false);
        assert_eq!(line, "Upsolve closed on 2023-10-08 15:00 UTC");
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("alice", 20), "alice");
        assert_eq!(truncate_name("a very long nickname", 10), "a very ...");
        assert_eq!(truncate_name("abcdef", 3), "abc");
    }

    #[test]
    fn test_format_board_empty() {
        assert_eq!(format_board(&[], false), "No participants found.");
    }

    #[test]
    fn test_format_board_rows() {
        let standings = sample_standings();
        let rows = named(&standings, &["alice", "bob", "carol"]);
        let result = format_board(&rows, false);
        let lines: Vec<&str> = result.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("Penalty"));
        assert!(lines[1].trim_start().starts_with("1."));
        assert!(lines[1].contains("0:50:00"));
        assert!(lines[1].contains("alice"));
        assert!(lines[2].trim_start().starts_with("2."));
        assert!(lines[3].trim_start().starts_with('-'));
        assert!(lines[3].contains("+1"));
        assert!(lines[3].contains("carol"));
    }

    #[test]
    fn test_format_tsv() {
        let standings = sample_standings();
        let rows = named(&standings, &["alice", "bob", "carol"]);
        let result = format_tsv(&rows);
        let lines: Vec<&str> = result.lines().collect();
        // rank 1 of 2 -> 80, rank 2 of 2 -> 60, upsolve only -> 6
        assert_eq!(lines[0], "1\talice\t80\t1\t0\t3000");
        assert_eq!(lines[1], "2\tbob\t60\t1\t0\t3600");
        assert_eq!(lines[2], "\tcarol\t6\t0\t1\t0");
    }

    #[test]
    fn test_format_tsv_empty() {
        assert_eq!(format_tsv(&[]), "");
    }

    #[test]
    fn test_format_summary_table() {
        let row = SummaryRow {
            account: "dave".to_string(),
            contests: 2,
            score: 146,
            solved: 3,
            upsolved: 1,
            penalty: Duration::minutes(75),
        };
        let result = format_summary_table(&[&row], false);
        assert!(result.starts_with("  1."));
        assert!(result.contains("146"));
        assert!(result.contains("+1"));
        assert!(result.contains("1:15:00"));
        assert!(result.ends_with("dave"));
    }
}
