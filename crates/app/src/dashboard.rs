//! The dashboard: session-gated composition of router and panel providers.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use gridwatch_core::{DomainError, DomainResult, RecordId};
use gridwatch_panels::{
    BookingRequest, BookingStatus, EmergencyAlert, PanelProvider, PanelRecord, SignalStatus,
    SignalTiming, TrafficSignal, Vehicle, VehicleStatus,
};
use gridwatch_router::{ActiveView, NavigationPolicy, ViewRouter, ViewToken};
use gridwatch_session::{Authenticator, Identity, SessionStore, StorageVault};

use crate::activity::{ActivityKind, ActivityLog};
use crate::command::{Command, Outcome};
use crate::degraded::{DegradedMode, Resource};
use crate::export;
use crate::map::{MapOverlays, MapScene};
use crate::summary::TrafficSummary;

/// Planned signal timings captured while a panel was active.
///
/// Produced by [`Dashboard::begin_optimize`]; applied later only if the view
/// token is still current. This is what keeps a slow optimization from
/// mutating a panel the user has already left.
#[derive(Debug, Clone)]
pub struct OptimizeJob {
    token: ViewToken,
    plan: Vec<(RecordId, SignalTiming)>,
}

/// Result of applying an optimization job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptimizeOutcome {
    Applied { changed: usize },
    /// The user navigated away while the job was in flight; nothing changed.
    Discarded,
}

/// The traffic dashboard core.
///
/// Explicitly constructed: vault and authenticator are injected, nothing is
/// ambient. The session store gates every command: until authenticated, only
/// `login`/`signup` do anything.
pub struct Dashboard {
    session: SessionStore,
    router: ViewRouter,
    bookings: PanelProvider<BookingRequest>,
    signals: PanelProvider<TrafficSignal>,
    alerts: PanelProvider<EmergencyAlert>,
    vehicles: PanelProvider<Vehicle>,
    activity: ActivityLog,
    degraded: DegradedMode,
    optimize_delay: Duration,
}

impl Dashboard {
    /// The observed optimization latency in the source UI.
    const DEFAULT_OPTIMIZE_DELAY: Duration = Duration::from_secs(3);

    pub fn new(
        vault: Arc<dyn StorageVault>,
        authenticator: Arc<dyn Authenticator>,
        policy: NavigationPolicy,
    ) -> Self {
        Self {
            session: SessionStore::new(vault, authenticator),
            router: ViewRouter::new(policy),
            bookings: PanelProvider::new(),
            signals: PanelProvider::new(),
            alerts: PanelProvider::new(),
            vehicles: PanelProvider::new(),
            activity: ActivityLog::new(),
            degraded: DegradedMode::new(),
            optimize_delay: Self::DEFAULT_OPTIMIZE_DELAY,
        }
    }

    /// Override the simulated optimization latency (tests use zero).
    pub fn with_optimize_delay(mut self, delay: Duration) -> Self {
        self.optimize_delay = delay;
        self
    }

    // ── session ──────────────────────────────────────────────────────────

    pub async fn login(&mut self, email: &str, password: &str) -> DomainResult<Identity> {
        let identity = self.session.login(email, password).await?;
        self.activity.record(
            ActivityKind::Login,
            "Logged into system",
            identity.email.clone(),
            Utc::now(),
        );
        Ok(identity)
    }

    pub async fn signup(&mut self, email: &str, password: &str, name: &str) -> DomainResult<Identity> {
        let identity = self.session.signup(email, password, name).await?;
        self.activity.record(
            ActivityKind::Login,
            "Created account",
            identity.email.clone(),
            Utc::now(),
        );
        Ok(identity)
    }

    /// End the session and return the router to the default view.
    ///
    /// Idempotent. A vault failure degrades the session-vault resource
    /// instead of erroring: the in-memory session is gone either way.
    pub fn logout(&mut self) {
        if let Err(e) = self.session.logout() {
            tracing::warn!(error = %e, "session vault failed during logout");
            self.degraded.mark_degraded(Resource::SessionVault);
        }
        self.router.reset_on_logout();
    }

    pub fn current_identity(&self) -> Option<Identity> {
        self.session.current_identity()
    }

    fn require_session(&self) -> DomainResult<Identity> {
        self.session
            .current_identity()
            .ok_or(DomainError::Unauthorized)
    }

    // ── command dispatch ─────────────────────────────────────────────────

    /// Consume one user intent.
    ///
    /// Everything here is session-gated; an unauthenticated dispatch fails
    /// `Unauthorized` without touching any panel.
    pub fn dispatch(&mut self, command: Command, now: DateTime<Utc>) -> DomainResult<Outcome> {
        self.require_session()?;
        let name = command.name();
        tracing::debug!(command = name, "dispatch");

        match command {
            Command::Navigate { view } => {
                let view = self.router.navigate(&view)?;
                Ok(Outcome::Navigated(view))
            }

            Command::CreateBooking(input) => {
                let booking = self.bookings.create(input, now)?.clone();
                self.activity.record(
                    ActivityKind::Booking,
                    "Created booking request",
                    format!("{} -> {}", booking.pickup.address, booking.destination.address),
                    now,
                );
                Ok(Outcome::BookingCreated(booking))
            }

            Command::UpdateBookingStatus { id, status } => {
                let booking = self.bookings.update_status(id, status)?.clone();
                self.activity.record(
                    ActivityKind::Update,
                    "Updated booking status",
                    format!("{id}: {status}"),
                    now,
                );
                Ok(Outcome::BookingUpdated(booking))
            }

            Command::CancelBooking { id } => {
                let booking = self
                    .bookings
                    .update_status(id, BookingStatus::Cancelled)?
                    .clone();
                self.activity.record(
                    ActivityKind::Update,
                    "Cancelled booking",
                    id.to_string(),
                    now,
                );
                Ok(Outcome::BookingUpdated(booking))
            }

            Command::AssignVehicle { booking, vehicle } => {
                let assigned = self.assign_vehicle(booking, vehicle)?;
                self.activity.record(
                    ActivityKind::Update,
                    "Assigned vehicle to booking",
                    format!("{booking}: {vehicle}"),
                    now,
                );
                Ok(Outcome::BookingUpdated(assigned))
            }

            Command::ReportEmergency(input) => {
                let alert = self.alerts.create(input, now)?.clone();
                self.activity.record(
                    ActivityKind::Emergency,
                    "Reported emergency",
                    alert.location.clone(),
                    now,
                );
                Ok(Outcome::AlertRaised(alert))
            }

            Command::UpdateAlertStatus { id, status } => {
                let alert = self.alerts.update_status(id, status)?.clone();
                self.activity.record(
                    ActivityKind::Emergency,
                    "Updated emergency alert",
                    format!("{id}: {status}"),
                    now,
                );
                Ok(Outcome::AlertUpdated(alert))
            }

            Command::InstallSignal(input) => {
                let signal = self.signals.create(input, now)?.clone();
                self.activity.record(
                    ActivityKind::Settings,
                    "Installed traffic signal",
                    signal.intersection.clone(),
                    now,
                );
                Ok(Outcome::SignalInstalled(signal))
            }

            Command::ConfigureSignal { id, timing } => {
                timing.validate()?;
                let signal = self
                    .signals
                    .update_with(id, |signal| signal.timing = timing)?
                    .clone();
                self.activity.record(
                    ActivityKind::Update,
                    "Updated traffic signal timing",
                    signal.intersection.clone(),
                    now,
                );
                Ok(Outcome::SignalUpdated(signal))
            }

            Command::SetSignalStatus { id, status } => {
                let signal = self.signals.update_status(id, status)?.clone();
                self.activity.record(
                    ActivityKind::Update,
                    "Changed signal status",
                    format!("{}: {status}", signal.intersection),
                    now,
                );
                Ok(Outcome::SignalUpdated(signal))
            }

            Command::RegisterVehicle(input) => {
                let vehicle = self.vehicles.create(input, now)?.clone();
                self.activity.record(
                    ActivityKind::Update,
                    "Registered vehicle",
                    vehicle.driver.clone(),
                    now,
                );
                Ok(Outcome::VehicleRegistered(vehicle))
            }

            Command::UpdateVehicleStatus { id, status } => {
                let vehicle = self.vehicles.update_status(id, status)?.clone();
                self.activity.record(
                    ActivityKind::Update,
                    "Updated vehicle status",
                    format!("{id}: {status}"),
                    now,
                );
                Ok(Outcome::VehicleUpdated(vehicle))
            }
        }
    }

    /// Booking/vehicle link with referential checking.
    ///
    /// The providers stay isolated from each other; this is the one place
    /// that sees both, so the existence and availability checks live here.
    fn assign_vehicle(&mut self, booking: RecordId, vehicle: RecordId) -> DomainResult<BookingRequest> {
        let vehicle_status = self
            .vehicles
            .get(vehicle)
            .ok_or_else(|| DomainError::not_found(vehicle))?
            .status;
        if vehicle_status != VehicleStatus::Available {
            return Err(DomainError::validation(
                "vehicle",
                format!("vehicle {vehicle} is {vehicle_status}, not available"),
            ));
        }

        // Transition check happens before the soft link is written.
        self.bookings.update_status(booking, BookingStatus::Assigned)?;
        let assigned = self
            .bookings
            .update_with(booking, |b| b.assigned_vehicle = Some(vehicle.to_string()))?
            .clone();
        self.vehicles.update_status(vehicle, VehicleStatus::Busy)?;
        Ok(assigned)
    }

    // ── signal optimization (cancellable) ────────────────────────────────

    /// Capture the optimization plan and the view it belongs to.
    pub fn begin_optimize(&self) -> DomainResult<OptimizeJob> {
        self.require_session()?;
        let plan = self
            .signals
            .list()
            .iter()
            .filter(|s| s.status == SignalStatus::Active)
            .map(|s| (s.id(), s.timing.rebalanced()))
            .collect();
        Ok(OptimizeJob {
            token: self.router.token(),
            plan,
        })
    }

    /// Apply a finished job, unless its panel is no longer active.
    pub fn apply_optimize(&mut self, job: OptimizeJob, now: DateTime<Utc>) -> DomainResult<OptimizeOutcome> {
        if !self.router.is_current(&job.token) {
            tracing::debug!("optimization result discarded: view changed while in flight");
            return Ok(OptimizeOutcome::Discarded);
        }

        let mut changed = 0;
        for (id, timing) in job.plan {
            if self.signals.update_with(id, |s| s.timing = timing).is_ok() {
                changed += 1;
            }
        }
        self.activity.record(
            ActivityKind::Optimization,
            "Optimized all traffic signals",
            format!("{changed} signals rebalanced"),
            now,
        );
        Ok(OptimizeOutcome::Applied { changed })
    }

    /// Full optimize flow with the simulated processing delay.
    pub async fn optimize_signals(&mut self) -> DomainResult<OptimizeOutcome> {
        let job = self.begin_optimize()?;
        tokio::time::sleep(self.optimize_delay).await;
        self.apply_optimize(job, Utc::now())
    }

    // ── reads ────────────────────────────────────────────────────────────

    pub fn current_view(&self) -> ActiveView {
        self.router.current_view()
    }

    pub fn bookings(&self) -> &PanelProvider<BookingRequest> {
        &self.bookings
    }

    pub fn signals(&self) -> &PanelProvider<TrafficSignal> {
        &self.signals
    }

    pub fn alerts(&self) -> &PanelProvider<EmergencyAlert> {
        &self.alerts
    }

    pub fn vehicles(&self) -> &PanelProvider<Vehicle> {
        &self.vehicles
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    pub fn degraded(&self) -> &DegradedMode {
        &self.degraded
    }

    pub fn degraded_mut(&mut self) -> &mut DegradedMode {
        &mut self.degraded
    }

    pub fn summary(&self) -> TrafficSummary {
        TrafficSummary::derive(&self.vehicles, &self.signals, &self.alerts)
    }

    pub fn map_scene(&self, overlays: MapOverlays) -> MapScene {
        MapScene::from_panels(&self.signals, &self.vehicles, overlays)
    }

    pub fn export_activity_csv(&self) -> String {
        export::activity_csv(self.activity.entries())
    }

    /// Signal inventory CSV. Generating the report is itself a logged
    /// activity.
    pub fn export_signals_csv(&mut self) -> String {
        let csv = export::signals_csv(self.signals.list());
        self.activity.record(
            ActivityKind::Report,
            "Generated signal report",
            format!("{} signals", self.signals.len()),
            Utc::now(),
        );
        csv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridwatch_core::GeoPoint;
    use gridwatch_panels::{
        BookingInput, SignalInput, Stop, Urgency, VehicleClass, VehicleInput, VehicleKind,
    };
    use gridwatch_session::{MemoryVault, StubAuthenticator};

    fn dashboard() -> Dashboard {
        Dashboard::new(
            Arc::new(MemoryVault::new()),
            Arc::new(StubAuthenticator::with_latency(Duration::ZERO)),
            NavigationPolicy::Strict,
        )
        .with_optimize_delay(Duration::ZERO)
    }

    async fn signed_in() -> Dashboard {
        let mut dash = dashboard();
        dash.login("op@example.com", "secret").await.unwrap();
        dash
    }

    fn booking_input() -> BookingInput {
        BookingInput {
            requested_by: None,
            vehicle_class: VehicleClass::Emergency,
            pickup: Stop::new(GeoPoint::new(28.6139, 77.2090), "Hospital District"),
            destination: Stop::new(GeoPoint::new(28.6129, 77.2295), "City Center"),
            urgency: Urgency::Critical,
        }
    }

    fn signal_input(intersection: &str) -> SignalInput {
        SignalInput {
            intersection: intersection.to_string(),
            timing: SignalTiming::new(60, 5, 45).unwrap(),
            location: GeoPoint::new(28.6139, 77.2090),
        }
    }

    fn vehicle_input(driver: &str) -> VehicleInput {
        VehicleInput {
            kind: VehicleKind::Ambulance,
            location: GeoPoint::new(28.6139, 77.2090),
            driver: driver.to_string(),
        }
    }

    #[tokio::test]
    async fn unauthenticated_dispatch_is_rejected() {
        let mut dash = dashboard();
        let err = dash
            .dispatch(Command::CreateBooking(booking_input()), Utc::now())
            .unwrap_err();
        assert_eq!(err, DomainError::Unauthorized);
        assert!(dash.bookings().is_empty());
    }

    #[tokio::test]
    async fn logout_returns_next_login_to_overview() {
        let mut dash = signed_in().await;
        dash.dispatch(
            Command::Navigate {
                view: "analytics".to_string(),
            },
            Utc::now(),
        )
        .unwrap();
        assert_eq!(dash.current_view(), ActiveView::Analytics);

        dash.logout();
        dash.login("op@example.com", "secret").await.unwrap();
        assert_eq!(dash.current_view(), ActiveView::Overview);
    }

    #[tokio::test]
    async fn logout_is_idempotent() {
        let mut dash = signed_in().await;
        dash.logout();
        dash.logout();
        assert!(dash.current_identity().is_none());
        assert_eq!(dash.current_view(), ActiveView::Overview);
    }

    #[tokio::test]
    async fn booking_flow_derives_fare_and_logs_activity() {
        let mut dash = signed_in().await;
        let outcome = dash
            .dispatch(Command::CreateBooking(booking_input()), Utc::now())
            .unwrap();
        let Outcome::BookingCreated(booking) = outcome else {
            panic!("expected BookingCreated");
        };
        assert_eq!(booking.amount, 300);
        assert!(dash
            .activity()
            .entries()
            .iter()
            .any(|e| e.kind == ActivityKind::Booking));
    }

    #[tokio::test]
    async fn assign_vehicle_enforces_referential_integrity() {
        let mut dash = signed_in().await;
        let Outcome::BookingCreated(booking) = dash
            .dispatch(Command::CreateBooking(booking_input()), Utc::now())
            .unwrap()
        else {
            panic!("expected BookingCreated");
        };

        // Unknown vehicle id is rejected.
        let ghost = RecordId::new();
        let err = dash
            .dispatch(
                Command::AssignVehicle {
                    booking: booking.id,
                    vehicle: ghost,
                },
                Utc::now(),
            )
            .unwrap_err();
        assert_eq!(err, DomainError::not_found(ghost));

        // A real, available vehicle works and goes busy.
        let Outcome::VehicleRegistered(vehicle) = dash
            .dispatch(Command::RegisterVehicle(vehicle_input("Dr. Smith")), Utc::now())
            .unwrap()
        else {
            panic!("expected VehicleRegistered");
        };
        let Outcome::BookingUpdated(assigned) = dash
            .dispatch(
                Command::AssignVehicle {
                    booking: booking.id,
                    vehicle: vehicle.id,
                },
                Utc::now(),
            )
            .unwrap()
        else {
            panic!("expected BookingUpdated");
        };
        assert_eq!(assigned.status, BookingStatus::Assigned);
        assert_eq!(assigned.assigned_vehicle, Some(vehicle.id.to_string()));
        assert_eq!(
            dash.vehicles().get(vehicle.id).unwrap().status,
            VehicleStatus::Busy
        );

        // A busy vehicle cannot be assigned again.
        let Outcome::BookingCreated(second) = dash
            .dispatch(Command::CreateBooking(booking_input()), Utc::now())
            .unwrap()
        else {
            panic!("expected BookingCreated");
        };
        let err = dash
            .dispatch(
                Command::AssignVehicle {
                    booking: second.id,
                    vehicle: vehicle.id,
                },
                Utc::now(),
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
        assert_eq!(
            dash.bookings().get(second.id).unwrap().status,
            BookingStatus::Pending
        );
    }

    #[tokio::test]
    async fn optimize_result_lands_only_on_the_panel_it_started_on() {
        let mut dash = signed_in().await;
        dash.dispatch(Command::InstallSignal(signal_input("Main St & 1st Ave")), Utc::now())
            .unwrap();
        dash.dispatch(
            Command::Navigate {
                view: "traffic-signals".to_string(),
            },
            Utc::now(),
        )
        .unwrap();

        let before = dash.signals().list()[0].timing;
        let job = dash.begin_optimize().unwrap();

        // User navigates away while the optimization is in flight.
        dash.dispatch(
            Command::Navigate {
                view: "overview".to_string(),
            },
            Utc::now(),
        )
        .unwrap();

        let outcome = dash.apply_optimize(job, Utc::now()).unwrap();
        assert_eq!(outcome, OptimizeOutcome::Discarded);
        assert_eq!(dash.signals().list()[0].timing, before);
    }

    #[tokio::test]
    async fn optimize_applies_when_the_panel_stays_active() {
        let mut dash = signed_in().await;
        dash.dispatch(Command::InstallSignal(signal_input("Main St & 1st Ave")), Utc::now())
            .unwrap();
        dash.dispatch(Command::InstallSignal(signal_input("Broadway & 42nd St")), Utc::now())
            .unwrap();

        let outcome = dash.optimize_signals().await.unwrap();
        assert_eq!(outcome, OptimizeOutcome::Applied { changed: 2 });
        let timing = dash.signals().list()[0].timing;
        assert_eq!(timing, SignalTiming::new(60, 5, 45).unwrap().rebalanced());
    }

    #[tokio::test]
    async fn configure_signal_validates_before_mutating() {
        let mut dash = signed_in().await;
        let Outcome::SignalInstalled(signal) = dash
            .dispatch(Command::InstallSignal(signal_input("Main St & 1st Ave")), Utc::now())
            .unwrap()
        else {
            panic!("expected SignalInstalled");
        };

        let err = dash
            .dispatch(
                Command::ConfigureSignal {
                    id: signal.id,
                    timing: SignalTiming { red: 0, yellow: 5, green: 45 },
                },
                Utc::now(),
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
        assert_eq!(dash.signals().get(signal.id).unwrap().timing, signal.timing);
    }

    #[tokio::test]
    async fn exports_round_trip_panel_and_activity_state() {
        let mut dash = signed_in().await;
        dash.dispatch(Command::InstallSignal(signal_input("Main St & 1st Ave")), Utc::now())
            .unwrap();
        let signals_csv = dash.export_signals_csv();
        assert!(signals_csv.starts_with("Intersection,Status,Latitude,Longitude\n"));
        assert!(signals_csv.contains("Main St & 1st Ave,active"));

        let activity_csv = dash.export_activity_csv();
        assert!(activity_csv.starts_with("Timestamp,Action,Type,Details,Duration\n"));
        assert!(activity_csv.contains("Logged into system"));
        // The signal export above is itself on the activity record.
        assert!(activity_csv.contains("Generated signal report"));
        assert!(dash
            .activity()
            .entries()
            .iter()
            .any(|e| e.kind == ActivityKind::Report));
    }
}
