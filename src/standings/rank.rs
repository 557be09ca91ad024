use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::record::ParticipantRecord;
use crate::contest::{ContestWindow, ParticipantId};

/// ICPC order: more solved first, then less penalty, then lower participant id.
pub fn competition_order(a: &ParticipantRecord, b: &ParticipantRecord) -> Ordering {
    b.solved
        .cmp(&a.solved)
        .then_with(|| a.total_penalty.cmp(&b.total_penalty))
        .then_with(|| a.participant.cmp(&b.participant))
}

/// Assign 1-based competition ranks to every record that attempted a problem during the
/// contest. All other records get `None`. Returns the number of ranked records.
pub fn assign_competition_ranks(
    records: &mut BTreeMap<ParticipantId, ParticipantRecord>,
    window: &ContestWindow,
) -> usize {
    let mut ranked: Vec<&mut ParticipantRecord> = Vec::with_capacity(records.len());
    for record in records.values_mut() {
        if record.competed(window) {
            ranked.push(record);
        } else {
            record.competition_rank = None;
        }
    }

    ranked.sort_by(|a, b| competition_order(a, b));
    for (idx, record) in ranked.iter_mut().enumerate() {
        record.competition_rank = Some(idx + 1);
    }
    ranked.len()
}

/// Order for printing a whole view: ranked participants by rank, then those who only
/// upsolved by upsolve count (descending) and id.
pub fn display_order(a: &ParticipantRecord, b: &ParticipantRecord) -> Ordering {
    match (a.competition_rank, b.competition_rank) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b
            .upsolved
            .cmp(&a.upsolved)
            .then_with(|| a.participant.cmp(&b.participant)),
    }
}
