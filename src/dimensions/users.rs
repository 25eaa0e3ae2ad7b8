use crate::models::{PlayEvent, UserRecord};
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Build the users dimension: one row per `user_id`, taken from that user's
/// most recent play.
///
/// The per-worker partial maps are merged with [`supersedes`], which is a
/// strict total order over events, so the result does not depend on how
/// rayon splits the input. Rows are returned sorted by `user_id`.
pub fn extract_users(events: &[PlayEvent]) -> Vec<UserRecord> {
    let latest = events
        .par_iter()
        .fold(HashMap::new, |mut acc: HashMap<i32, &PlayEvent>, event| {
            keep_latest(&mut acc, event);
            acc
        })
        .reduce(HashMap::new, |mut left, right| {
            for event in right.into_values() {
                keep_latest(&mut left, event);
            }
            left
        });

    let mut users: Vec<UserRecord> = latest.into_values().map(UserRecord::from).collect();
    users.sort_unstable_by_key(|user| user.user_id);
    users
}

fn keep_latest<'a>(latest: &mut HashMap<i32, &'a PlayEvent>, event: &'a PlayEvent) {
    latest
        .entry(event.user_id)
        .and_modify(|current| {
            if supersedes(event, current) {
                *current = event;
            }
        })
        .or_insert(event);
}

/// Later timestamp wins. On equal timestamps the record that comes first in
/// the input wins.
fn supersedes(candidate: &PlayEvent, current: &PlayEvent) -> bool {
    match candidate.ts.cmp(&current.ts) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => candidate.order < current.order,
    }
}
