// Full pages. Each page loads once and then polls its fragments on a timer.

use super::escape;

const BOOTSTRAP_CSS: &str = "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css";

/// Fetches a fragment into an element; `poll` repeats it every `ms`.
const POLL_JS: &str = r#"
function refresh(id, url) {
  fetch(url, { cache: "no-store" })
    .then(function (r) { return r.text(); })
    .then(function (html) { document.getElementById(id).innerHTML = html; })
    .catch(function (e) {
      document.getElementById(id).innerHTML =
        '<div class="alert alert-danger">Refresh failed: ' + e + '</div>';
    });
}
function poll(id, url, ms) {
  var next = typeof url === "function" ? url : function () { return url; };
  refresh(id, next());
  return setInterval(function () { refresh(id, next()); }, ms);
}
"#;

const DETAIL_JS: &str = r#"
function selectedDays() {
  var d = document.querySelector('input[name="days"]:checked');
  return d ? d.value : "1";
}
function chartUrl() {
  return "/fragments/" + encodeURIComponent(MACHINE) + "/chart?days=" + selectedDays();
}
poll("status", "/fragments/" + encodeURIComponent(MACHINE) + "/status", INTERVAL);
poll("chart", chartUrl, INTERVAL);
document.querySelectorAll('input[name="days"]').forEach(function (el) {
  el.addEventListener("change", function () { refresh("chart", chartUrl()); });
});
"#;

/// Selectable chart windows: (label, days).
pub const WINDOWS: [(&str, u32); 3] = [("Day", 1), ("Week", 7), ("Month", 30)];

fn layout(title: &str, body: &str, script: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html lang="en"><head><meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1"><title>{title}</title><link rel="stylesheet" href="{css}"></head><body><div class="container-fluid">{body}</div><script>{poll}{script}</script></body></html>"#,
        title = escape(title),
        css = BOOTSTRAP_CSS,
        poll = POLL_JS,
    )
}

/// JSON string literal safe to embed inside a script element.
fn js_string(s: &str) -> String {
    serde_json::Value::from(s)
        .to_string()
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
}

pub fn home(refresh_ms: u64) -> String {
    layout(
        "Machine overview",
        r#"<h1 class="my-4 text-center">Machine overview</h1><nav class="text-end mb-3"><a class="btn btn-outline-secondary btn-sm" href="/host">Host metrics</a></nav><div id="cards"><div class="text-center text-muted">Loading...</div></div>"#,
        &format!(r#"poll("cards", "/fragments/cards", {});"#, refresh_ms),
    )
}

pub fn detail(machine_id: &str, refresh_ms: u64) -> String {
    let mut radios = String::new();
    for (i, (label, days)) in WINDOWS.iter().enumerate() {
        radios.push_str(&format!(
            r#"<div class="form-check form-check-inline"><input class="form-check-input" type="radio" name="days" id="days-{days}" value="{days}"{checked}><label class="form-check-label" for="days-{days}">{label}</label></div>"#,
            checked = if i == 0 { " checked" } else { "" },
        ));
    }
    let title = format!("Machine {} details", machine_id);
    let body = format!(
        r#"<div class="row align-items-center my-4"><div class="col-10"><h1>{title}</h1></div><div class="col-2 text-end"><a class="btn btn-secondary" href="/">Back to overview</a></div></div><div class="card mb-4" id="status"></div><div class="card"><div class="card-header">Production</div><div class="card-body"><div class="mb-3">{radios}</div><div id="chart"></div></div></div>"#,
        title = escape(&title),
    );
    let script = format!(
        "var MACHINE = {};\nvar INTERVAL = {};\n{}",
        js_string(machine_id),
        refresh_ms,
        DETAIL_JS
    );
    layout(&title, &body, &script)
}

pub fn host(refresh_ms: u64) -> String {
    layout(
        "Host metrics",
        r#"<div class="row my-4"><div class="col-10"><h1 class="text-primary">Host metrics</h1></div><div class="col-2 text-end"><a class="btn btn-secondary" href="/">Machines</a></div></div><div id="host"><div class="text-center text-muted">Loading...</div></div>"#,
        &format!(r#"poll("host", "/fragments/host", {});"#, refresh_ms),
    )
}

pub fn not_found(path: &str) -> String {
    layout(
        "404: Not found",
        &format!(
            r#"<div class="p-3 bg-light rounded-3"><h1 class="display-3">404: Not found</h1><p class="lead">The path {} was not found.</p><a class="btn btn-primary" href="/">Back to overview</a></div>"#,
            escape(path)
        ),
        "",
    )
}
