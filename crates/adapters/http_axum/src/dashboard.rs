//! Server-side rendered dashboard page (no JavaScript).
//!
//! One complete HTML document per request, with a `<meta http-equiv`
//! `="refresh">` tag for live updates. Render failures never reach the client
//! as raw errors: the page degrades to an empty table with an inline banner.

use std::fmt::Write as _;

use axum::extract::State;
use axum::response::Html;

use zigview_app::ports::DeviceStore;
use zigview_domain::device::Device;

use crate::state::AppState;

/// Auto-reload interval for the device table.
const REFRESH_SECONDS: u32 = 30;

/// `GET /` — the device list page.
pub async fn index<S>(State(state): State<AppState<S>>) -> Html<String>
where
    S: DeviceStore + Send + Sync + 'static,
{
    match state.cached_devices().await {
        Ok(devices) => Html(render_page(&devices, None)),
        Err(err) => {
            tracing::error!(error = %err, "failed to load devices for dashboard");
            Html(render_page(
                &[],
                Some("Failed to load device data. Please check your deCONZ installation."),
            ))
        }
    }
}

/// Render the full device list document.
pub fn render_page(devices: &[Device], error: Option<&str>) -> String {
    let mut page = String::with_capacity(2048);
    page.push_str(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n",
    );
    let _ = writeln!(
        page,
        "<meta http-equiv=\"refresh\" content=\"{REFRESH_SECONDS}\">"
    );
    page.push_str(
        "<title>Zigbee Device Viewer</title>\n\
         <style>\n\
         body { font-family: sans-serif; margin: 2rem; }\n\
         table { border-collapse: collapse; width: 100%; }\n\
         th, td { border: 1px solid #ccc; padding: 0.4rem 0.6rem; text-align: left; }\n\
         th { background: #f0f0f0; }\n\
         .error { color: #a00; border: 1px solid #a00; padding: 0.5rem; }\n\
         .empty { color: #666; }\n\
         </style>\n</head>\n<body>\n<h1>Zigbee Device Viewer</h1>\n",
    );

    if let Some(message) = error {
        let _ = writeln!(page, "<p class=\"error\">{}</p>", escape(message));
    }

    if devices.is_empty() {
        page.push_str("<p class=\"empty\">No devices found.</p>\n");
    } else {
        page.push_str(
            "<table>\n<tr><th>Name</th><th>Type</th><th>Manufacturer</th>\
             <th>Model</th><th>Firmware</th><th>Last seen</th><th>States</th></tr>\n",
        );
        for device in devices {
            render_device_row(&mut page, device);
        }
        page.push_str("</table>\n");
    }

    page.push_str("</body>\n</html>\n");
    page
}

fn render_device_row(page: &mut String, device: &Device) {
    let states = device
        .states
        .iter()
        .map(|(name, value)| format!("{}: {}", escape(name), escape(value)))
        .collect::<Vec<_>>()
        .join(", ");

    let _ = writeln!(
        page,
        "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
        escape(&device.name),
        escape(device.kind.as_deref().unwrap_or("-")),
        escape(device.manufacturer.as_deref().unwrap_or("-")),
        escape(device.model.as_deref().unwrap_or("-")),
        escape(device.software_version.as_deref().unwrap_or("-")),
        escape(device.last_seen.as_deref().unwrap_or("-")),
        states,
    );
}

/// Minimal HTML escaping for text nodes and attribute values.
fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
