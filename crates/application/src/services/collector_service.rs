//! Collector service
//!
//! Runs one collection cycle: looks up car and transit durations from the
//! origin to every destination and hands the resulting report to a sink.

use std::{fmt, sync::Arc};

use chrono::Utc;
use domain::{CollectionReport, Location, RouteResult};
use tracing::{error, info, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{DrivingPort, ReportSink, TransitPort},
};

/// Collects travel times from one origin to a fixed set of destinations
pub struct CollectorService {
    origin: Location,
    destinations: Vec<Location>,
    driving: Arc<dyn DrivingPort>,
    transit: Arc<dyn TransitPort>,
    sink: Arc<dyn ReportSink>,
}

impl fmt::Debug for CollectorService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectorService")
            .field("origin", &self.origin.name)
            .field("destinations", &self.destinations.len())
            .finish_non_exhaustive()
    }
}

impl CollectorService {
    /// Create a new collector service
    pub fn new(
        origin: Location,
        destinations: Vec<Location>,
        driving: Arc<dyn DrivingPort>,
        transit: Arc<dyn TransitPort>,
        sink: Arc<dyn ReportSink>,
    ) -> Self {
        Self {
            origin,
            destinations,
            driving,
            transit,
            sink,
        }
    }

    /// The configured origin
    #[must_use]
    pub const fn origin(&self) -> &Location {
        &self.origin
    }

    /// The configured destinations, in emission order
    #[must_use]
    pub fn destinations(&self) -> &[Location] {
        &self.destinations
    }

    /// Look up both durations for every destination
    ///
    /// Destinations are visited in configured order and lookups run one
    /// after another. A failed lookup leaves that value absent and never
    /// stops the others.
    #[instrument(skip(self), fields(origin = %self.origin.name))]
    pub async fn collect_routes(&self) -> Vec<RouteResult> {
        let mut routes = Vec::with_capacity(self.destinations.len());

        for destination in &self.destinations {
            let car = self
                .driving
                .driving_duration_secs(&self.origin.position, &destination.position)
                .await
                .map_err(|e| log_lookup_failure("driving", &destination.name, &e))
                .ok();

            let transit = self
                .transit
                .transit_duration_secs(&self.origin.position, &destination.position)
                .await
                .map_err(|e| log_lookup_failure("transit", &destination.name, &e))
                .ok();

            routes.push(RouteResult::new(destination.name.clone(), car, transit));
        }

        routes
    }

    /// Collect all routes into a report stamped with the current time
    pub async fn collect_report(&self) -> CollectionReport {
        let routes = self.collect_routes().await;
        CollectionReport::new(self.origin.name.clone(), routes, Utc::now())
    }

    /// Run one full cycle: collect, then emit the report
    ///
    /// # Errors
    ///
    /// Returns an error only if the report cannot be emitted; lookup
    /// failures are already folded into the report as absent values.
    #[instrument(skip(self))]
    pub async fn run_once(&self) -> Result<CollectionReport, ApplicationError> {
        let report = self.collect_report().await;

        let car_count = report
            .routes
            .iter()
            .filter(|r| r.car_duration_sec.is_some())
            .count();
        let transit_count = report
            .routes
            .iter()
            .filter(|r| r.transit_duration_sec.is_some())
            .count();
        let empty_count = report.routes.iter().filter(|r| r.is_empty()).count();

        self.sink.emit(&report)?;

        info!(
            collect_time = %report.collect_time_iso,
            routes = report.routes.len(),
            car_durations = car_count,
            transit_durations = transit_count,
            empty_routes = empty_count,
            "Collection cycle emitted"
        );

        Ok(report)
    }
}

fn log_lookup_failure(kind: &str, destination: &str, err: &ApplicationError) {
    if err.is_lookup_failure() {
        warn!(kind, destination, error = %err, "Duration lookup failed");
    } else {
        error!(kind, destination, error = %err, "Duration lookup failed unexpectedly");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use domain::GeoLocation;

    use super::*;
    use crate::ports::{MockDrivingPort, MockReportSink, MockTransitPort};

    fn origin() -> Location {
        Location::new("본사", GeoLocation::from_xy(127.0276, 37.4979))
    }

    fn destinations() -> Vec<Location> {
        vec![
            Location::new("서울역", GeoLocation::from_xy(126.9707, 37.5547)),
            Location::new("판교", GeoLocation::from_xy(127.1112, 37.3947)),
        ]
    }

    fn is_seoul_station(to: &GeoLocation) -> bool {
        (to.longitude() - 126.9707).abs() < 1e-9
    }

    fn service(
        driving: MockDrivingPort,
        transit: MockTransitPort,
        sink: MockReportSink,
    ) -> CollectorService {
        CollectorService::new(
            origin(),
            destinations(),
            Arc::new(driving),
            Arc::new(transit),
            Arc::new(sink),
        )
    }

    #[tokio::test]
    async fn collects_in_configured_order() {
        let mut driving = MockDrivingPort::new();
        driving
            .expect_driving_duration_secs()
            .times(2)
            .returning(|_, to| Ok(if is_seoul_station(to) { 930 } else { 1500 }));

        let mut transit = MockTransitPort::new();
        transit
            .expect_transit_duration_secs()
            .times(2)
            .returning(|_, to| Ok(if is_seoul_station(to) { 2700 } else { 3420 }));

        let service = service(driving, transit, MockReportSink::new());
        let routes = service.collect_routes().await;

        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].destination, "서울역");
        assert_eq!(routes[0].car_duration_sec, Some(930));
        assert_eq!(routes[0].car_duration_min, Some(16));
        assert_eq!(routes[0].transit_duration_min, Some(45));
        assert_eq!(routes[1].destination, "판교");
        assert_eq!(routes[1].car_duration_min, Some(25));
        assert_eq!(routes[1].transit_duration_sec, Some(3420));
        assert_eq!(routes[1].transit_duration_min, Some(57));
    }

    #[tokio::test]
    async fn failed_lookup_leaves_value_absent() {
        let mut driving = MockDrivingPort::new();
        driving
            .expect_driving_duration_secs()
            .returning(|_, _| Err(ApplicationError::ExternalService("timeout".to_string())));

        let mut transit = MockTransitPort::new();
        transit
            .expect_transit_duration_secs()
            .returning(|_, to| {
                if is_seoul_station(to) {
                    Ok(2280)
                } else {
                    Err(ApplicationError::Configuration("missing key".to_string()))
                }
            });

        let service = service(driving, transit, MockReportSink::new());
        let routes = service.collect_routes().await;

        assert_eq!(routes.len(), 2);
        assert!(routes.iter().all(|r| r.car_duration_sec.is_none()));
        assert!(routes.iter().all(|r| r.car_duration_min.is_none()));
        assert_eq!(routes[0].transit_duration_sec, Some(2280));
        assert!(routes[1].transit_duration_sec.is_none());
    }

    #[tokio::test]
    async fn run_once_emits_report() {
        let mut driving = MockDrivingPort::new();
        driving
            .expect_driving_duration_secs()
            .returning(|_, _| Ok(600));
        let mut transit = MockTransitPort::new();
        transit
            .expect_transit_duration_secs()
            .returning(|_, _| Ok(1200));

        let mut sink = MockReportSink::new();
        sink.expect_emit()
            .withf(|report| report.origin == "본사" && report.routes.len() == 2)
            .times(1)
            .returning(|_| Ok(()));

        let report = service(driving, transit, sink).run_once().await.unwrap();

        assert_eq!(report.service, domain::SERVICE_NAME);
        assert!(report.collect_time_iso.ends_with("+00:00"));
    }

    #[tokio::test]
    async fn sink_failure_fails_cycle() {
        let mut driving = MockDrivingPort::new();
        driving
            .expect_driving_duration_secs()
            .returning(|_, _| Ok(600));
        let mut transit = MockTransitPort::new();
        transit
            .expect_transit_duration_secs()
            .returning(|_, _| Ok(1200));

        let mut sink = MockReportSink::new();
        sink.expect_emit()
            .returning(|_| Err(ApplicationError::Output("broken pipe".to_string())));

        let result = service(driving, transit, sink).run_once().await;
        assert!(matches!(result, Err(ApplicationError::Output(_))));
    }

    #[tokio::test]
    async fn identical_responses_give_identical_routes() {
        let mut driving = MockDrivingPort::new();
        driving
            .expect_driving_duration_secs()
            .returning(|_, _| Ok(930));
        let mut transit = MockTransitPort::new();
        transit
            .expect_transit_duration_secs()
            .returning(|_, _| Ok(2700));

        let emitted = Arc::new(Mutex::new(Vec::new()));
        let captured = Arc::clone(&emitted);
        let mut sink = MockReportSink::new();
        sink.expect_emit().times(2).returning(move |report| {
            captured.lock().unwrap().push(report.clone());
            Ok(())
        });

        let service = service(driving, transit, sink);
        service.run_once().await.unwrap();
        service.run_once().await.unwrap();

        let emitted = emitted.lock().unwrap();
        assert_eq!(emitted.len(), 2);
        assert_eq!(emitted[0].routes, emitted[1].routes);
        assert_eq!(emitted[0].origin, emitted[1].origin);
    }

    #[tokio::test]
    async fn no_destinations_emits_empty_routes() {
        let mut sink = MockReportSink::new();
        sink.expect_emit()
            .withf(|report| report.routes.is_empty())
            .times(1)
            .returning(|_| Ok(()));

        let service = CollectorService::new(
            origin(),
            Vec::new(),
            Arc::new(MockDrivingPort::new()),
            Arc::new(MockTransitPort::new()),
            Arc::new(sink),
        );

        let report = service.run_once().await.unwrap();
        assert!(report.routes.is_empty());
    }

    #[test]
    fn debug_output() {
        let service = service(
            MockDrivingPort::new(),
            MockTransitPort::new(),
            MockReportSink::new(),
        );
        let debug = format!("{service:?}");
        assert!(debug.contains("CollectorService"));
        assert!(debug.contains("본사"));
    }
}
