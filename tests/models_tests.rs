// Model serialization tests (JSON camelCase, CSV header names)

use chrono::NaiveDateTime;
use machine_dashboard::models::*;

fn sample() -> Sample {
    Sample {
        timestamp: NaiveDateTime::parse_from_str("2025-03-07 10:15:00", TIMESTAMP_FORMAT).unwrap(),
        in_count: 3,
        out_count: 2,
        status_light: StatusLight::Yellow,
        entrance_status: "ok".into(),
        processing_status: "idle".into(),
        exit_status: "ok".into(),
        error_code: "0".into(),
    }
}

#[test]
fn test_sample_serializes_camel_case_with_plain_timestamp() {
    let json = serde_json::to_value(sample()).unwrap();
    assert_eq!(json["timestamp"], "2025-03-07 10:15:00");
    assert_eq!(json["inCount"], 3);
    assert_eq!(json["statusLight"], "yellow");
    assert_eq!(json["processingStatus"], "idle");
}

#[test]
fn test_sample_deserializes_from_file_header_names() {
    let data = "timestamp,in_count,out_count,status_light,entrance_status,processing_status,exit_status,error_code\n\
                2025-03-07 10:15:00,3,2,yellow,ok,idle,ok,0\n";
    let mut rdr = csv::Reader::from_reader(data.as_bytes());
    let rows: Vec<Sample> = rdr.deserialize().collect::<Result<_, _>>().unwrap();
    assert_eq!(rows, vec![sample()]);
}

#[test]
fn test_latest_state_flattens_sample() {
    let latest = EntityLatestState {
        sample: sample(),
        hourly_in: 30,
        hourly_out: 20,
    };
    let json = serde_json::to_value(&latest).unwrap();
    assert_eq!(json["hourlyIn"], 30);
    assert_eq!(json["hourlyOut"], 20);
    assert_eq!(json["errorCode"], "0");
    assert!(json.get("sample").is_none());
}

#[test]
fn test_error_code_zero_means_no_error() {
    let mut s = sample();
    assert!(!s.has_error());
    s.error_code = "E-103".into();
    assert!(s.has_error());
}

#[test]
fn test_status_light_unknown_values() {
    let light: StatusLight = serde_json::from_str("\"purple\"").unwrap();
    assert_eq!(light, StatusLight::Unknown);
    assert_eq!(StatusLight::Red.as_str(), "red");
}

#[test]
fn test_history_json_variants() {
    assert_eq!(
        serde_json::to_value(EntityHistory::Empty).unwrap(),
        serde_json::json!({ "status": "empty" })
    );
    let history = EntityHistory::Hourly {
        buckets: vec![HourlyBucket {
            hour: NaiveDateTime::parse_from_str("2025-03-07 10:00:00", TIMESTAMP_FORMAT).unwrap(),
            sum_in: 5,
            sum_out: 4,
        }],
    };
    assert_eq!(
        serde_json::to_value(&history).unwrap(),
        serde_json::json!({
            "status": "hourly",
            "buckets": [{ "hour": "2025-03-07 10:00:00", "sumIn": 5, "sumOut": 4 }]
        })
    );
    assert_eq!(history.buckets().len(), 1);
    assert!(EntityHistory::Empty.buckets().is_empty());
}

#[test]
fn test_host_metrics_json_roundtrip() {
    let metrics = HostMetrics {
        collected_at: "2025-03-07 10:15:00".into(),
        cpu: CpuStats {
            model: "test".into(),
            logical_cores: 8,
            usage_percent: 12.5,
        },
        ram: RamStats {
            total: 1024,
            used: 512,
            available: 512,
            usage_percent: 50.0,
        },
        partitions: vec![PartitionStat {
            device: "/dev/sda1".into(),
            mount: "/".into(),
            total_space: 100,
            used_space: 40,
            available_space: 60,
            usage_percent: 40.0,
        }],
    };
    let json = serde_json::to_string(&metrics).unwrap();
    assert!(json.contains("\"usagePercent\""));
    assert!(json.contains("\"availableSpace\""));
    let back: HostMetrics = serde_json::from_str(&json).unwrap();
    assert_eq!(back.partitions[0].mount, "/");
    assert_eq!(back.ram.used, 512);
}
