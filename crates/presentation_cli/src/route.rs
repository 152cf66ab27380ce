//! `route` command: one hospital selection against the configured providers

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, bail};
use application::ports::{DrawingSurfacePort, RouteProviderPort};
use application::{RoutePresentationService, TransitOutcome};
use domain::{Coordinate, Hospital, RoutePlan, RouteQuery, TravelMode, promote_hospital};
use infrastructure::{
    AppConfig, DrivingRouteAdapter, SurfaceSnapshot, TracingDrawingSurface, TransitRouteAdapter,
};
use tracing::info;

/// Label used when a destination is given as bare coordinates
const DEFAULT_LABEL: &str = "목적지";

/// Where the route should go
#[derive(Debug)]
pub enum Destination {
    /// Explicit coordinates with an optional label
    Point {
        /// Destination position
        position: Coordinate,
        /// Display name
        label: Option<String>,
    },
    /// A hospital picked from a search result file
    Hospital {
        /// Hospital search results
        hospitals: Vec<Hospital>,
        /// Name of the hospital to route to; the first one when absent
        pick: Option<String>,
    },
}

/// Outcome of a `route` run
#[derive(Debug)]
pub struct RouteReport {
    /// Hospital the route leads to, first in the promoted list
    pub hospital: Option<Hospital>,
    /// Status right after the driving result arrived
    pub driving_status: String,
    /// Status after the transit fetch and the requested mode switch
    pub final_status: String,
    /// Why the requested mode could not be shown
    pub switch_error: Option<String>,
    /// Transit fetch outcome
    pub transit: TransitOutcome,
    /// Route currently shown
    pub shown: Option<RoutePlan>,
    /// Surface contents at the end
    pub surface: SurfaceSnapshot,
}

/// Read hospital search results from a JSON file
pub fn read_hospitals(path: &Path) -> anyhow::Result<Vec<Hospital>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let hospitals: Vec<Hospital> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid hospital list in {}", path.display()))?;
    Ok(hospitals)
}

fn resolve(
    origin: Coordinate,
    destination: Destination,
) -> anyhow::Result<(RouteQuery, Option<Hospital>)> {
    match destination {
        Destination::Point { position, label } => Ok((
            RouteQuery::new(origin, position, label.unwrap_or_else(|| DEFAULT_LABEL.to_string())),
            None,
        )),
        Destination::Hospital {
            mut hospitals,
            pick,
        } => {
            if let Some(name) = pick.as_deref() {
                if !hospitals.iter().any(|h| h.place_name == name) {
                    bail!("No hospital named {name:?} in the list");
                }
                promote_hospital(&mut hospitals, name);
            }
            let Some(hospital) = hospitals.into_iter().next() else {
                bail!("Hospital list is empty");
            };
            let query = hospital.route_query_from(origin)?;
            Ok((query, Some(hospital)))
        },
    }
}

/// Select the destination, wait for both providers, and show `mode`
pub async fn run(
    config: &AppConfig,
    origin: Coordinate,
    destination: Destination,
    mode: TravelMode,
) -> anyhow::Result<RouteReport> {
    let (query, hospital) = resolve(origin, destination)?;

    let surface = Arc::new(TracingDrawingSurface::new());
    let driving: Arc<dyn RouteProviderPort> = Arc::new(DrivingRouteAdapter::from_config(
        &config.driving.to_driving_config(),
    ));
    let transit: Arc<dyn RouteProviderPort> = Arc::new(TransitRouteAdapter::from_config(
        &config.transit.to_transit_config(),
        config.walking_policy(),
    ));
    let service = RoutePresentationService::new(
        driving,
        transit,
        Arc::clone(&surface) as Arc<dyn DrawingSurfacePort>,
        config.presentation_config(),
    );

    info!(destination = %query.destination_label, %mode, "Routing");
    let pending = service.select(query).await;
    let driving_status = service.status_line();
    let transit = pending.wait().await;

    let switch_error = service.switch_mode(mode).err().map(|e| e.to_string());

    let state = service.snapshot();
    Ok(RouteReport {
        hospital,
        driving_status,
        final_status: service.status_line(),
        switch_error,
        transit,
        shown: state.plan(state.active_mode).cloned(),
        surface: surface.snapshot(),
    })
}

impl fmt::Display for RouteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(hospital) = &self.hospital {
            writeln!(f, "🏥 {} ({})", hospital.place_name, hospital.address_name)?;
            if let Some(phone) = &hospital.phone {
                writeln!(f, "   ☎ {phone}")?;
            }
            for line in hospital.opening_hours_lines() {
                writeln!(f, "   {line}")?;
            }
        }

        writeln!(f, "{}", self.driving_status)?;
        if let Some(error) = &self.switch_error {
            writeln!(f, "⚠️  {error}")?;
        }
        if self.final_status != self.driving_status {
            writeln!(f, "{}", self.final_status)?;
        }

        if let Some(plan) = &self.shown {
            for (index, leg) in plan.legs.iter().enumerate() {
                match &leg.vehicle_info {
                    Some(info) => writeln!(
                        f,
                        "  {}. {} {} {} → {} ({}개 정거장)",
                        index + 1,
                        info.mode.emoji(),
                        info.display_line_name(),
                        info.departure_stop.name,
                        info.arrival_stop.name,
                        info.stop_count
                    )?,
                    None if leg.is_walk() => {
                        writeln!(f, "  {}. 🚶 도보 ({} points)", index + 1, leg.geometry.len())?;
                    },
                    None => writeln!(f, "  {}. 경로 ({} points)", index + 1, leg.geometry.len())?,
                }
            }
        }

        write!(
            f,
            "🗺️  {} polylines ({} visible), {} markers ({} visible)",
            self.surface.polylines.len(),
            self.surface.visible_polylines().count(),
            self.surface.markers.len(),
            self.surface.visible_markers().count()
        )
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const DRIVING_JSON: &str = r#"{ "routes": [{ "result_code": 0, "sections": [{
        "distance": 6200, "duration": 720,
        "roads": [{ "vertexes": [126.978, 37.5665, 127.03, 37.5] }]
    }] }] }"#;

    fn hospital(name: &str, x: f64, y: f64) -> Hospital {
        Hospital {
            place_name: name.to_string(),
            address_name: "서울 강남구".to_string(),
            phone: None,
            opening_hours: None,
            x,
            y,
            distance: None,
        }
    }

    fn origin() -> Coordinate {
        Coordinate::new(37.5665, 126.978).unwrap()
    }

    fn config_for(driving: &MockServer, transit: &MockServer) -> AppConfig {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            "[driving]\nbase_url = \"{}\"\napi_key = \"k\"\n\n\
             [transit]\nbase_url = \"{}\"\napi_key = \"g\"\n\n\
             [presentation]\ntransit_delay_ms = 0\n",
            driving.uri(),
            transit.uri()
        )
        .unwrap();
        AppConfig::load_from(Some(file.path())).unwrap()
    }

    #[test]
    fn resolve_point_uses_default_label() {
        let (query, hospital) = resolve(
            origin(),
            Destination::Point {
                position: Coordinate::new(37.5, 127.03).unwrap(),
                label: None,
            },
        )
        .unwrap();
        assert_eq!(query.destination_label, DEFAULT_LABEL);
        assert!(hospital.is_none());
    }

    #[test]
    fn resolve_promotes_picked_hospital() {
        let hospitals = vec![
            hospital("서울병원", 127.0, 37.5),
            hospital("강남병원", 127.03, 37.49),
        ];
        let (query, picked) = resolve(
            origin(),
            Destination::Hospital {
                hospitals,
                pick: Some("강남병원".to_string()),
            },
        )
        .unwrap();
        assert_eq!(query.destination_label, "강남병원");
        assert!((query.destination.latitude() - 37.49).abs() < 1e-9);
        assert_eq!(picked.unwrap().place_name, "강남병원");
    }

    #[test]
    fn resolve_rejects_unknown_or_empty() {
        let unknown = Destination::Hospital {
            hospitals: vec![hospital("서울병원", 127.0, 37.5)],
            pick: Some("없는병원".to_string()),
        };
        assert!(resolve(origin(), unknown).is_err());

        let empty = Destination::Hospital {
            hospitals: Vec::new(),
            pick: None,
        };
        assert!(resolve(origin(), empty).is_err());
    }

    #[test]
    fn read_hospitals_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            r#"[{ "placeName": "서울병원", "addressName": "중구", "x": "126.97", "y": "37.56" }]"#
                .as_bytes(),
        )
        .unwrap();
        let hospitals = read_hospitals(file.path()).unwrap();
        assert_eq!(hospitals.len(), 1);
        assert!((hospitals[0].x - 126.97).abs() < 1e-9);

        assert!(read_hospitals(Path::new("/nonexistent/hospitals.json")).is_err());
    }

    #[tokio::test]
    async fn run_reports_transit_unavailable() {
        let driving = MockServer::start().await;
        let transit = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/directions"))
            .respond_with(ResponseTemplate::new(200).set_body_string(DRIVING_JSON))
            .mount(&driving)
            .await;
        Mock::given(method("POST"))
            .and(path("/directions/v2:computeRoutes"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .mount(&transit)
            .await;

        let report = run(
            &config_for(&driving, &transit),
            origin(),
            Destination::Point {
                position: Coordinate::new(37.5, 127.03).unwrap(),
                label: Some("강남병원".to_string()),
            },
            TravelMode::Transit,
        )
        .await
        .unwrap();

        assert_eq!(report.driving_status, "🚗 6.2km / 약 12분");
        assert_eq!(report.transit, TransitOutcome::Applied);
        assert!(report.switch_error.is_some());
        assert_eq!(report.final_status, report.driving_status);
        assert_eq!(report.shown.as_ref().unwrap().legs.len(), 1);
        assert_eq!(report.surface.visible_polylines().count(), 1);

        let text = report.to_string();
        assert!(text.contains("6.2km"));
        assert!(text.contains("1 polylines (1 visible)"));
    }
}
