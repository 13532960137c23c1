// Pure aggregation over loaded samples: totals and hourly buckets.

use chrono::{NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use std::collections::BTreeMap;

use crate::models::{HourlyBucket, Sample};

/// Sum of in_count and out_count over all samples.
pub fn sum_counts(samples: &[Sample]) -> (u64, u64) {
    samples.iter().fold((0, 0), |(i, o), s| {
        (i.saturating_add(s.in_count), o.saturating_add(s.out_count))
    })
}

/// Start of the hour containing `ts`.
pub fn floor_to_hour(ts: NaiveDateTime) -> NaiveDateTime {
    ts.date().and_time(NaiveTime::MIN) + TimeDelta::hours(i64::from(ts.hour()))
}

/// Groups samples by hour and sums their counts. Input order does not matter;
/// output is ascending by hour and contains only hours that had samples.
pub fn resample_hourly(samples: &[Sample]) -> Vec<HourlyBucket> {
    let mut by_hour: BTreeMap<NaiveDateTime, (u64, u64)> = BTreeMap::new();
    for s in samples {
        let entry = by_hour.entry(floor_to_hour(s.timestamp)).or_default();
        entry.0 = entry.0.saturating_add(s.in_count);
        entry.1 = entry.1.saturating_add(s.out_count);
    }
    by_hour
        .into_iter()
        .map(|(hour, (sum_in, sum_out))| HourlyBucket {
            hour,
            sum_in,
            sum_out,
        })
        .collect()
}
