use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use serde_json::Value;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct ResponseOutput<'a> {
    nodes: &'a [String],
    payload_size: usize,
    payload: String,
}

/// Print a raw response payload received from a member.
///
/// Payloads are BSON, so everything except `Raw` shows a hex preview
/// rather than the bytes themselves.
pub fn print_response(payload: &[u8], nodes: &[String], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = ResponseOutput {
                nodes,
                payload_size: payload.len(),
                payload: hex_preview(payload),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["NODES", "SIZE", "PAYLOAD"])
                .add_row(vec![
                    nodes.join(","),
                    payload.len().to_string(),
                    hex_preview(payload),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "nodes={} size={} payload={}",
                nodes.join(","),
                payload.len(),
                hex_preview(payload)
            );
        }
        OutputFormat::Raw => {
            print_raw(payload);
        }
    }
}

#[derive(Serialize)]
struct PingOutput<'a> {
    nodes: &'a [String],
    payload_size: usize,
    latency_ms: f64,
}

/// Print the outcome of a ping exchange.
pub fn print_ping(nodes: &[String], payload_size: usize, latency_ms: f64, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = PingOutput {
                nodes,
                payload_size,
                latency_ms,
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["NODES", "SIZE", "LATENCY_MS"])
                .add_row(vec![
                    nodes.join(","),
                    payload_size.to_string(),
                    format!("{latency_ms:.2}"),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty | OutputFormat::Raw => {
            println!(
                "nodes={} size={payload_size} latency_ms={latency_ms:.2}",
                nodes.join(",")
            );
        }
    }
}

/// Print a parsed `rs.status()` document.
pub fn print_status(status: &Value, format: OutputFormat) {
    match format {
        OutputFormat::Json | OutputFormat::Raw => {
            println!("{status}");
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["MEMBER", "STATE", "HEALTH"]);

            if let Some(members) = status["members"].as_array() {
                for member in members {
                    table.add_row(vec![
                        field_or_dash(&member["name"]),
                        field_or_dash(&member["stateStr"]),
                        field_or_dash(&member["health"]),
                    ]);
                }
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            let member_count = status["members"]
                .as_array()
                .map(Vec::len)
                .unwrap_or_default();
            println!(
                "set={} ok={} members={member_count}",
                field_or_dash(&status["set"]),
                field_or_dash(&status["ok"]),
            );
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn field_or_dash(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn hex_preview(payload: &[u8]) -> String {
    const MAX_PREVIEW: usize = 64;

    let shown = &payload[..payload.len().min(MAX_PREVIEW)];
    let hex: String = shown.iter().map(|byte| format!("{byte:02x}")).collect();
    if payload.len() > MAX_PREVIEW {
        format!("{hex}.. ({} bytes)", payload.len())
    } else {
        hex
    }
}
