// HTML fragments swapped into pages on every refresh tick.

use std::fmt::Write;

use super::{alert, escape, svg};
use crate::models::{
    EntityHistory, EntityLatestState, HostMetrics, PartitionStat, StatusLight, TIMESTAMP_FORMAT,
};
use crate::state_store::StoreError;

const GB: f64 = 1024.0 * 1024.0 * 1024.0;

fn light_color(light: StatusLight) -> &'static str {
    match light {
        StatusLight::Green => "success",
        StatusLight::Yellow => "warning",
        StatusLight::Red => "danger",
        StatusLight::Unknown => "secondary",
    }
}

/// Three round lights; the active one is coloured, the others dimmed.
pub fn status_lights(light: StatusLight) -> String {
    let active = light_color(light);
    let mut html = String::from(r#"<div class="status-lights">"#);
    for color in ["success", "warning", "danger"] {
        let on = color == active;
        let _ = write!(
            html,
            r#"<span class="badge rounded-pill me-1 bg-{}" style="width:20px;height:20px;opacity:{}">&nbsp;</span>"#,
            if on { color } else { "secondary" },
            if on { "1.0" } else { "0.2" }
        );
    }
    html.push_str("</div>");
    html
}

fn error_badge(error_code: &str, has_error: bool) -> String {
    format!(
        r#"<span class="badge bg-{}">{}</span>"#,
        if has_error { "danger" } else { "secondary" },
        escape(error_code)
    )
}

fn row(label: &str, value: &str) -> String {
    format!(
        r#"<div class="row"><div class="col-6">{}</div><div class="col-6">{}</div></div>"#,
        escape(label),
        value
    )
}

/// Overview card for one machine, linking to its detail page.
pub fn machine_card(machine_id: &str, state: &Result<EntityLatestState, StoreError>) -> String {
    let id = escape(machine_id);
    let state = match state {
        Ok(state) => state,
        Err(e) => {
            return format!(
                r#"<div class="col-lg-4 col-md-6 col-sm-12"><div class="card mb-4"><div class="card-header">Machine: {}</div><div class="card-body">{}</div></div></div>"#,
                id,
                alert(&e.to_string(), "danger")
            );
        }
    };
    let sample = &state.sample;
    let border = match sample.status_light {
        StatusLight::Unknown => "border-secondary".to_string(),
        light => format!("border-{}", light_color(light)),
    };

    let mut body = String::new();
    let _ = write!(
        body,
        r#"<div class="row mb-2 align-items-center"><div class="col-4 fw-bold">Status:</div><div class="col-8">{}</div></div>"#,
        status_lights(sample.status_light)
    );
    let _ = write!(
        body,
        r#"<div class="row"><div class="col-6 fw-bold">In / out:</div><div class="col-6">{} / {}</div></div><hr class="my-2">"#,
        state.hourly_in, state.hourly_out
    );
    body.push_str(&row("Entrance:", &escape(&sample.entrance_status)));
    body.push_str(&row("Processing:", &escape(&sample.processing_status)));
    body.push_str(&row("Exit:", &escape(&sample.exit_status)));
    body.push_str(&row(
        "Error code:",
        &error_badge(&sample.error_code, sample.has_error()),
    ));

    let href = escape(&urlencoding::encode(machine_id));
    format!(
        r#"<div class="col-lg-4 col-md-6 col-sm-12"><a href="/{href}" style="text-decoration:none;color:inherit"><div class="card mb-4 shadow-sm border-3 {border}"><div class="card-header fw-bold">Machine: {id}</div><div class="card-body">{body}</div></div></a></div>"#
    )
}

/// All overview cards, or an alert when there are no machines.
pub fn machine_cards(cards: &[(String, Result<EntityLatestState, StoreError>)]) -> String {
    if cards.is_empty() {
        return alert("No machine data found.", "danger");
    }
    let mut html = String::from(r#"<div class="row">"#);
    for (id, state) in cards {
        html.push_str(&machine_card(id, state));
    }
    html.push_str("</div>");
    html
}

/// Body of the latest-status card on a detail page.
pub fn detail_status(state: &Result<EntityLatestState, StoreError>) -> String {
    let state = match state {
        Ok(state) => state,
        Err(e) => return format!(r#"<div class="card-body">{}</div>"#, alert(&e.to_string(), "danger")),
    };
    let s = &state.sample;
    format!(
        r#"<div class="card-body"><div class="row"><div class="col-md-4">Entrance: {}</div><div class="col-md-4">Processing: {}</div><div class="col-md-4">Exit: {}</div></div><hr><div class="row"><div class="col-md-4">Error code: {}</div><div class="col-md-4">Sample time: {}</div><div class="col-md-4">In / out: {} / {}</div></div></div>"#,
        escape(&s.entrance_status),
        escape(&s.processing_status),
        escape(&s.exit_status),
        escape(&s.error_code),
        s.timestamp.format(TIMESTAMP_FORMAT),
        state.hourly_in,
        state.hourly_out
    )
}

/// Hourly production chart, or a "no data" placeholder.
pub fn production_chart(machine_id: &str, window_days: u32, history: &EntityHistory) -> String {
    match history {
        EntityHistory::Empty => format!(
            r#"<div class="text-center text-muted py-5"><h5>No production data for {} in the last {} day(s)</h5><p>No data to display</p></div>"#,
            escape(machine_id),
            window_days
        ),
        EntityHistory::Hourly { buckets } => format!(
            r#"<h6>Hourly in/out over the last {} day(s)</h6>{}"#,
            window_days,
            svg::hourly_bar_chart(buckets)
        ),
    }
}

/// Disk usage table, sizes in GB.
pub fn disk_table(partitions: &[PartitionStat]) -> String {
    let mut html = String::from(
        r#"<table class="table table-striped table-bordered table-hover"><thead><tr><th>Device</th><th>Mount point</th><th>Total (GB)</th><th>Used (GB)</th><th>Free (GB)</th><th>Usage (%)</th></tr></thead><tbody>"#,
    );
    for p in partitions {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{:.2}</td><td>{:.2}</td><td>{:.2}</td><td>{:.1}</td></tr>",
            escape(&p.device),
            escape(&p.mount),
            p.total_space as f64 / GB,
            p.used_space as f64 / GB,
            p.available_space as f64 / GB,
            p.usage_percent
        );
    }
    html.push_str("</tbody></table>");
    html
}

/// CPU and memory gauges, the disk table and the update time.
pub fn host_panel(metrics: &HostMetrics) -> String {
    format!(
        r#"<div class="row mb-4"><div class="col-6"><div class="card"><div class="card-header">CPU usage</div><div class="card-body">{}</div></div></div><div class="col-6"><div class="card"><div class="card-header">Memory usage</div><div class="card-body">{}</div></div></div></div><div class="row"><div class="col-12"><div class="card"><div class="card-header">Disk usage</div><div class="card-body">{}</div></div></div></div><p class="text-muted text-center mt-4">Last updated: {}</p>"#,
        svg::gauge("CPU %", metrics.cpu.usage_percent),
        svg::gauge("Memory %", metrics.ram.usage_percent),
        disk_table(&metrics.partitions),
        escape(&metrics.collected_at)
    )
}
