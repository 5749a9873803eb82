use std::cmp::Ordering;

use crate::types::PlayerProgressRecord;

/// Order records for display and assign ranks to finishers.
///
/// Sort order: stage descending, question descending, then completion time
/// ascending; at equal progress a record with a completion time sorts ahead
/// of one without. Remaining ties keep input order (the sort is stable), so
/// on identical timestamps the first-sorted record wins the better rank.
///
/// Ranks 1..N are assigned in sorted order to full completions only; every
/// other record is left unranked and appears in the order purely for
/// relative display.
pub fn rank_players(mut records: Vec<PlayerProgressRecord>) -> Vec<PlayerProgressRecord> {
    records.sort_by(compare_progress);
    let mut next_rank = 1;
    for record in records.iter_mut() {
        if record.is_completed() {
            record.rank = Some(next_rank);
            next_rank += 1;
        } else {
            record.rank = None;
        }
    }
    records
}

fn compare_progress(a: &PlayerProgressRecord, b: &PlayerProgressRecord) -> Ordering {
    b.stage
        .cmp(&a.stage)
        .then_with(|| b.question.cmp(&a.question))
        .then_with(|| match (a.completion_time, b.completion_time) {
            (Some(a_time), Some(b_time)) => a_time.cmp(&b_time),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        id: &str,
        stage: u8,
        question: u8,
        completion_time: Option<u32>,
    ) -> PlayerProgressRecord {
        PlayerProgressRecord {
            id: id.into(),
            basename: format!("{id}.base.eth"),
            stage,
            question,
            completion_time,
            rank: None,
        }
    }

    #[test]
    fn finishers_rank_by_completion_time_and_stragglers_follow() {
        let ranked = rank_players(vec![
            record("slow", 3, 5, Some(120)),
            record("fast", 3, 5, Some(90)),
            record("mid", 2, 3, None),
        ]);
        let ids: Vec<&str> = ranked.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["fast", "slow", "mid"]);
        assert_eq!(ranked[0].rank, Some(1));
        assert_eq!(ranked[1].rank, Some(2));
        assert_eq!(ranked[2].rank, None);
    }

    #[test]
    fn deeper_progress_sorts_first() {
        let ranked = rank_players(vec![
            record("a", 1, 4, None),
            record("b", 3, 0, None),
            record("c", 2, 5, None),
            record("d", 3, 2, None),
        ]);
        let ids: Vec<&str> = ranked.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["d", "b", "c", "a"]);
        assert!(ranked.iter().all(|r| r.rank.is_none()));
    }

    #[test]
    fn timed_record_beats_untimed_at_equal_progress() {
        let ranked = rank_players(vec![
            record("untimed", 3, 5, None),
            record("timed", 3, 5, Some(300)),
        ]);
        assert_eq!(ranked[0].id, "timed");
        assert_eq!(ranked[0].rank, Some(1));
        // Both are completions, so both earn a rank; the untimed one later.
        assert_eq!(ranked[1].id, "untimed");
        assert_eq!(ranked[1].rank, Some(2));
    }

    #[test]
    fn identical_timestamps_keep_input_order() {
        let ranked = rank_players(vec![
            record("first", 3, 5, Some(100)),
            record("second", 3, 5, Some(100)),
        ]);
        assert_eq!(ranked[0].id, "first");
        assert_eq!(ranked[0].rank, Some(1));
        assert_eq!(ranked[1].rank, Some(2));
    }

    #[test]
    fn near_finishers_get_no_rank() {
        let ranked = rank_players(vec![record("almost", 3, 4, None)]);
        assert_eq!(ranked[0].rank, None);
    }

    #[test]
    fn stale_input_ranks_are_recomputed() {
        let mut stale = record("only", 2, 1, None);
        stale.rank = Some(1);
        let ranked = rank_players(vec![stale]);
        assert_eq!(ranked[0].rank, None);
    }
}
