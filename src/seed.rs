// Synthetic daily files for local runs (debug environment only).
// Existing files are never overwritten.

use chrono::{Days, NaiveDate, NaiveTime, TimeDelta};
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};
use serde::Serialize;
use std::path::Path;
use tracing::info;

use crate::models::{StatusLight, TIMESTAMP_FORMAT};
use crate::state_store::daily_file;

const MINUTES_PER_DAY: i64 = 24 * 60;
const LIGHTS: [StatusLight; 3] = [StatusLight::Green, StatusLight::Yellow, StatusLight::Red];
const LIGHT_WEIGHTS: [u32; 3] = [80, 15, 5];

#[derive(Serialize)]
struct SeedRow {
    timestamp: String,
    in_count: u64,
    out_count: u64,
    status_light: &'static str,
    entrance_status: &'static str,
    processing_status: &'static str,
    exit_status: &'static str,
    error_code: String,
}

/// Writes `days` daily files ending at `today` for every machine.
/// Returns the number of files written.
pub fn seed_machines(
    root: &Path,
    machines: &[String],
    days: u32,
    today: NaiveDate,
) -> anyhow::Result<usize> {
    let mut rng = rand::thread_rng();
    let mut written = 0;
    for machine in machines {
        written += seed_machine(root, machine, days, today, &mut rng)?;
    }
    info!(root = %root.display(), machines = machines.len(), files_written = written, "seed data checked");
    Ok(written)
}

/// Seeds one machine with the given random source.
pub fn seed_machine<R: Rng>(
    root: &Path,
    machine_id: &str,
    days: u32,
    today: NaiveDate,
    rng: &mut R,
) -> anyhow::Result<usize> {
    anyhow::ensure!(
        crate::state_store::is_valid_entity_id(machine_id),
        "invalid machine id: {:?}",
        machine_id
    );
    let dir = root.join(machine_id).join("csv");
    std::fs::create_dir_all(&dir)?;

    let mut written = 0;
    for offset in 0..u64::from(days) {
        let Some(date) = today.checked_sub_days(Days::new(offset)) else {
            break;
        };
        let path = dir.join(daily_file::file_name_for(date));
        if path.exists() {
            continue;
        }
        write_day(&path, date, rng)?;
        written += 1;
    }
    Ok(written)
}

fn write_day<R: Rng>(path: &Path, date: NaiveDate, rng: &mut R) -> anyhow::Result<()> {
    let lights = WeightedIndex::new(LIGHT_WEIGHTS)?;
    let start = date.and_time(NaiveTime::MIN);
    let mut wtr = csv::Writer::from_path(path)?;
    for minute in 0..MINUTES_PER_DAY {
        let light = LIGHTS[lights.sample(rng)];
        let ts = start + TimeDelta::minutes(minute);
        wtr.serialize(SeedRow {
            timestamp: ts.format(TIMESTAMP_FORMAT).to_string(),
            in_count: rng.gen_range(0..5),
            out_count: rng.gen_range(0..5),
            status_light: light.as_str(),
            entrance_status: if light == StatusLight::Red { "error" } else { "ok" },
            processing_status: if light == StatusLight::Green {
                "running"
            } else {
                "idle"
            },
            exit_status: "ok",
            error_code: if light == StatusLight::Red {
                format!("E-{}", rng.gen_range(100..105))
            } else {
                "0".into()
            },
        })?;
    }
    wtr.flush()?;
    Ok(())
}
