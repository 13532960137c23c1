// Shared test helpers: daily state file fixtures

#![allow(dead_code)]

use chrono::NaiveDate;
use std::path::{Path, PathBuf};

pub const HEADER: &str =
    "timestamp,in_count,out_count,status_light,entrance_status,processing_status,exit_status,error_code";

pub struct Row<'a> {
    pub time: &'a str,
    pub in_count: u64,
    pub out_count: u64,
    pub light: &'a str,
    pub error_code: &'a str,
}

pub fn row(time: &str, in_count: u64, out_count: u64) -> Row<'_> {
    Row {
        time,
        in_count,
        out_count,
        light: "green",
        error_code: "0",
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn state_path(root: &Path, machine_id: &str, day: NaiveDate) -> PathBuf {
    root.join(machine_id)
        .join("csv")
        .join(format!("state_{}.txt", day.format("%y%m%d")))
}

/// Writes raw file content for `machine_id` on `day`.
pub fn write_raw(root: &Path, machine_id: &str, day: NaiveDate, content: &str) -> PathBuf {
    let path = state_path(root, machine_id, day);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, content).unwrap();
    path
}

/// Writes a daily file with the given rows; times are `HH:MM:SS` on `day`.
pub fn write_day(root: &Path, machine_id: &str, day: NaiveDate, rows: &[Row]) -> PathBuf {
    let mut content = String::from(HEADER);
    content.push('\n');
    for r in rows {
        content.push_str(&format!(
            "{} {},{},{},{},ok,running,ok,{}\n",
            day.format("%Y-%m-%d"),
            r.time,
            r.in_count,
            r.out_count,
            r.light,
            r.error_code
        ));
    }
    write_raw(root, machine_id, day, &content)
}
