use crate::cli::CliArgs;
use color_eyre::eyre::{eyre, Result};
use geofence_editor::api::HttpTransport;
use geofence_editor::config::EditorConfig;
use geofence_editor::domain::{Feature, Geometry, SearchFilters};
use geofence_editor::session::layers::popup_from_properties;
use geofence_editor::session::{execute, Completion, DrawEvent, Outcome, Session, Ticket};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Run a single request without the terminal UI and print what it did
pub async fn run_headless(cli: &CliArgs, config: &EditorConfig) -> Result<()> {
    let mut session = Session::new(config.ordering);
    let Some(ticket) = headless_ticket(cli, &mut session)? else {
        println!("{}", CliArgs::help_text());
        return Ok(());
    };

    let transport = HttpTransport::new(&config.server_url, config.request_timeout)?;
    info!(server = %transport.base_url(), request = ?ticket.request, "running headless request");

    let result = execute(&transport, ticket.request).await;
    let outcome = session.apply(Completion {
        token: ticket.token,
        result,
    });
    let report = HeadlessReport::build(&config.server_url, &outcome, &session);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_headless_report(&report);
    }

    match outcome {
        Outcome::Failed(error) => Err(error.into()),
        _ => Ok(()),
    }
}

fn headless_ticket(cli: &CliArgs, session: &mut Session) -> Result<Option<Ticket>> {
    if let Some(id) = cli.submit {
        let path = cli
            .geometry
            .as_deref()
            .ok_or_else(|| eyre!("--submit needs --geometry <FILE>"))?;
        session.on_draw(DrawEvent::Created(read_geometry(path)?));
        return Ok(Some(session.submit_polygon(&id.to_string())?));
    }

    if let Some(id) = cli.id {
        return Ok(Some(session.find_by_id(id)));
    }

    if cli.has_filters() {
        return Ok(Some(session.find(SearchFilters {
            store_id: cli.store_id.unwrap_or(0),
            metro_id: cli.metro_id.unwrap_or(0),
            zone_id: cli.zone_id.unwrap_or(0),
            city: cli.city.clone().unwrap_or_default(),
            state: cli.state.clone().unwrap_or_default(),
        })));
    }

    Ok(None)
}

/// Reads a GeoJSON geometry, or a Feature wrapping one.
fn read_geometry(path: &Path) -> Result<Geometry> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum GeometryFile {
        Geometry(Geometry),
        Feature(Feature),
    }

    let text = std::fs::read_to_string(path)
        .map_err(|e| eyre!("cannot read {}: {e}", path.display()))?;
    match serde_json::from_str(&text)? {
        GeometryFile::Geometry(geometry) => Ok(geometry),
        GeometryFile::Feature(feature) => feature
            .geometry
            .ok_or_else(|| eyre!("{} holds a feature without geometry", path.display())),
    }
}

#[derive(Debug, Serialize)]
struct HeadlessReport {
    server: String,
    outcome: String,
    current: Option<i64>,
    records: Vec<HeadlessRecord>,
}

#[derive(Debug, Serialize)]
struct HeadlessRecord {
    id: Option<i64>,
    summary: String,
    geometry: Option<&'static str>,
    area_km2: Option<f64>,
}

impl HeadlessReport {
    fn build(server: &str, outcome: &Outcome, session: &Session) -> Self {
        let records = session
            .store()
            .layers()
            .iter()
            .map(|layer| {
                let geometry = layer.feature.geometry.as_ref();
                HeadlessRecord {
                    id: layer.feature.record_id(),
                    summary: layer
                        .feature
                        .properties
                        .as_ref()
                        .map_or_else(|| layer.tooltip.clone(), popup_from_properties)
                        .replace('\n', " | "),
                    geometry: geometry.map(Geometry::type_name),
                    area_km2: geometry
                        .map(Geometry::area_km2)
                        .filter(|area| *area > 0.0),
                }
            })
            .collect();

        Self {
            server: server.to_string(),
            outcome: outcome.summary(),
            current: session.selection().current().map(|current| current.id),
            records,
        }
    }
}

fn render_headless_report(report: &HeadlessReport) {
    println!("\nGeofence Editor");
    println!("===============");
    println!("Server: {}", report.server);
    println!("Result: {}", report.outcome);

    if let Some(id) = report.current {
        println!("Current record: {id}");
    }

    if !report.records.is_empty() {
        println!("\nRecords:");
    }
    for record in &report.records {
        let kind = record.geometry.unwrap_or("no geometry");
        match record.area_km2 {
            Some(area) => println!("- {} [{kind}, {area:.3} km²]", record.summary),
            None => println!("- {} [{kind}]", record.summary),
        }
    }
}
