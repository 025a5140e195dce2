use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{MILLIS_PER_DAY, TimeRange};

use super::axis_label_format::{TickLabelFormatterFn, format_tick_label, local_datetime};
use super::TimeAxisLabelConfig;

/// Tick category, ordered by thinning precedence (`Day` is dropped first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TickKind {
    Day,
    Month,
    Year,
    Now,
}

/// Labeled mark on the time axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tick {
    pub label: String,
    #[serde(rename = "type")]
    pub kind: TickKind,
    pub value: i64,
}

const EDGE_INSET_RATIO_DENOMINATOR: i64 = 20;
const NOW_CLEARANCE_RATIO_DENOMINATOR: i64 = 10;
// Windows longer than this always carry month boundaries, so day candidates
// can be skipped once they could not survive thinning anyway.
const MIN_DAYS_FOR_MONTH_WALK: i64 = 93;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Candidate {
    kind: TickKind,
    value: i64,
}

/// Produces the axis ticks for `visible` with built-in locale labels.
///
/// Deterministic for identical inputs; never returns more than `max(max_ticks, 1)` ticks.
#[must_use]
pub fn generate_ticks(
    visible: TimeRange,
    max_ticks: usize,
    now: i64,
    label_config: TimeAxisLabelConfig,
) -> Vec<Tick> {
    generate_ticks_with_formatter(visible, max_ticks, now, label_config, None)
}

/// Same as [`generate_ticks`] with an optional label override.
#[must_use]
pub fn generate_ticks_with_formatter(
    visible: TimeRange,
    max_ticks: usize,
    now: i64,
    label_config: TimeAxisLabelConfig,
    formatter: Option<&TickLabelFormatterFn>,
) -> Vec<Tick> {
    let mut candidates = collect_candidates(visible, max_ticks, now, label_config);
    let candidate_count = candidates.len();
    candidates = thin_to_budget(candidates, max_ticks);
    candidates.sort_by_key(|candidate| candidate.value);
    trace!(
        candidate_count,
        tick_count = candidates.len(),
        max_ticks,
        "generated axis ticks"
    );

    candidates
        .into_iter()
        .map(|candidate| Tick {
            label: match formatter {
                Some(formatter) => formatter(candidate.kind, candidate.value),
                None => format_tick_label(candidate.kind, candidate.value, label_config),
            },
            kind: candidate.kind,
            value: candidate.value,
        })
        .collect()
}

fn collect_candidates(
    visible: TimeRange,
    max_ticks: usize,
    now: i64,
    label_config: TimeAxisLabelConfig,
) -> Vec<Candidate> {
    let duration = visible.duration();
    if duration <= 0 {
        return Vec::new();
    }

    let edge_inset = duration / EDGE_INSET_RATIO_DENOMINATOR;
    let inset = TimeRange::new(
        visible.start.saturating_add(edge_inset),
        visible.end.saturating_sub(edge_inset),
    );
    let now_clearance = duration / NOW_CLEARANCE_RATIO_DENOMINATOR;

    let mut candidates = Vec::new();
    let now_tick = inset.contains(now);
    if now_tick {
        candidates.push(Candidate {
            kind: TickKind::Now,
            value: now,
        });
    }

    let inset_days = inset.duration() / MILLIS_PER_DAY;
    let emit_days = inset_days < MIN_DAYS_FOR_MONTH_WALK
        || inset_days <= (max_ticks as i64).saturating_mul(2);

    let offset_millis = i64::from(label_config.timezone.fixed_offset().local_minus_utc()) * 1_000;
    let Some(first_local) = local_datetime(inset.start, label_config) else {
        return candidates;
    };
    let mut day = first_local.date_naive();
    if local_midnight_millis(day, offset_millis) < inset.start {
        let Some(next) = day.succ_opt() else {
            return candidates;
        };
        day = next;
    }

    loop {
        let value = local_midnight_millis(day, offset_millis);
        if value > inset.end {
            break;
        }

        let kind = classify_day(day);
        let clear_of_now = !now_tick || value.abs_diff(now) >= now_clearance.unsigned_abs();
        if clear_of_now && (emit_days || kind != TickKind::Day) {
            candidates.push(Candidate { kind, value });
        }

        let next = if emit_days {
            day.succ_opt()
        } else {
            first_of_next_month(day)
        };
        match next {
            Some(next) => day = next,
            None => break,
        }
    }

    candidates
}

fn local_midnight_millis(day: NaiveDate, offset_millis: i64) -> i64 {
    day.and_time(NaiveTime::MIN)
        .and_utc()
        .timestamp_millis()
        .saturating_sub(offset_millis)
}

fn classify_day(day: NaiveDate) -> TickKind {
    let Some(previous) = day.pred_opt() else {
        return TickKind::Year;
    };
    if previous.year() != day.year() {
        TickKind::Year
    } else if previous.month() != day.month() {
        TickKind::Month
    } else {
        TickKind::Day
    }
}

fn first_of_next_month(day: NaiveDate) -> Option<NaiveDate> {
    if day.month() == 12 {
        NaiveDate::from_ymd_opt(day.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(day.year(), day.month() + 1, 1)
    }
}

/// Drops ticks until at most `max_ticks` remain.
///
/// While a higher tier is present the lowest tier goes entirely (`Day`, then
/// `Month`, then `Year`; `Now` always stays). A lone remaining tier keeps every
/// other tick until it fits.
fn thin_to_budget(mut ticks: Vec<Candidate>, max_ticks: usize) -> Vec<Candidate> {
    let max_ticks = max_ticks.max(1);
    while ticks.len() > max_ticks {
        let Some(lowest) = ticks.iter().map(|tick| tick.kind).min() else {
            break;
        };

        if ticks.iter().any(|tick| tick.kind > lowest) {
            ticks.retain(|tick| tick.kind != lowest);
            continue;
        }

        let before = ticks.len();
        let mut index = 0_usize;
        ticks.retain(|_| {
            let keep = index % 2 == 0;
            index += 1;
            keep
        });
        if ticks.len() == before {
            break;
        }
    }
    ticks
}
