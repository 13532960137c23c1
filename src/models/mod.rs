// Domain models

mod host;
mod machine;

pub use host::{CpuStats, HostMetrics, PartitionStat, RamStats};
pub use machine::{
    EntityHistory, EntityLatestState, HourlyBucket, Sample, StatusLight, TIMESTAMP_FORMAT,
};
