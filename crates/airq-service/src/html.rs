//! HTML table page.
//!
//! A single static document: a sortable DataTables table with one row per
//! reading. All dynamic text is escaped.

use std::fmt::Write;

use airq_types::Reading;

use crate::config::DisplayConfig;

const DATATABLES_CSS: &str = "//cdn.datatables.net/1.10.19/css/jquery.dataTables.css";
const DATATABLES_JS: &str = "//cdn.datatables.net/1.10.19/js/jquery.dataTables.js";
const JQUERY_JS: &str = "https://code.jquery.com/jquery-3.3.1.js";

/// Table element id targeted by the DataTables initializer.
pub const TABLE_ID: &str = "air-table";

/// Placeholder for a missing measurement.
const MISSING: &str = "-";

/// Render the full page for already ordered and truncated readings.
pub fn page(readings: &[Reading], display: &DisplayConfig) -> String {
    let locale = display.locale;
    let title = escape(&display.title);

    let mut options = String::new();
    if let Some(url) = locale.datatables_language_url() {
        let _ = write!(options, r#""language": {{"url": "{}"}}, "#, url);
    }
    options.push_str(r#""order": [[5, "desc"]]"#);

    let mut out = String::with_capacity(1024 + readings.len() * 160);
    out.push_str("<!DOCTYPE html>\n<html><head>");
    let _ = write!(out, "<title>{}</title>", title);
    out.push_str(r#"<meta http-equiv="Content-type" content="text/html; charset=utf-8">"#);
    out.push_str(r#"<meta name="viewport" content="width=device-width,initial-scale=1">"#);
    let _ = write!(
        out,
        r#"<link rel="stylesheet" type="text/css" href="{}">"#,
        DATATABLES_CSS
    );
    let _ = write!(out, r#"<script type="text/javascript" src="{}"></script>"#, JQUERY_JS);
    let _ = write!(
        out,
        r#"<script type="text/javascript" charset="utf8" src="{}"></script>"#,
        DATATABLES_JS
    );
    let _ = write!(
        out,
        r#"<script type="text/javascript">$(document).ready(function() {{$('#{}').DataTable({{{}}});}});</script>"#,
        TABLE_ID, options
    );
    out.push_str("</head><body>");
    let _ = write!(
        out,
        r#"<h1 style="text-align: center">{}</h1>"#,
        escape(&display.heading)
    );
    let _ = write!(out, r#"<h3 style="text-align: center"><b>{}</b></h3>"#, title);
    let _ = write!(
        out,
        r#"<table id="{}" class="display" style="width:100%;">"#,
        TABLE_ID
    );

    out.push_str("<thead><tr>");
    for header in locale.table_headers() {
        let _ = write!(out, "<th>{}</th>", header);
    }
    out.push_str("</tr></thead><tbody>");

    for reading in readings {
        push_row(&mut out, reading);
    }

    out.push_str("</tbody></table></body></html>\n");
    out
}

fn push_row(out: &mut String, reading: &Reading) {
    let time = reading
        .display_time()
        .unwrap_or_else(|_| reading.timestamp.to_string());

    out.push_str("<tr>");
    let _ = write!(out, "<td>{}</td>", escape(&reading.device));
    for value in [
        reading.temperature,
        reading.humidity,
        reading.pm10,
        reading.pm25,
    ] {
        match value {
            Some(v) => {
                let _ = write!(out, "<td>{}</td>", v);
            }
            None => {
                let _ = write!(out, "<td>{}</td>", MISSING);
            }
        }
    }
    let _ = write!(out, "<td>{}</td>", time);
    out.push_str("</tr>");
}

/// Escape text for element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
