//! Builders selecting Diesel-backed services or fixtures for HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::info;

use medcheck::domain::ports::{
    FixtureInteractionOracle, FixturePatientRegistration, FixturePatientsQuery,
    FixturePrescriptionCheckCommand, InteractionOracle, PatientRegistration, PatientsQuery,
    PrescriptionCheckCommand,
};
use medcheck::domain::{InteractionResolver, PatientsService, PrescriptionCheckService};
use medcheck::inbound::http::state::HttpState;
use medcheck::outbound::persistence::{
    DbPool, DieselPatientRepository, DieselPrescriptionStagingRepository,
    DieselReferenceInteractionRepository, DieselSavedInteractionRepository,
};

use super::ServerConfig;

/// Use the real service when a pool is available, otherwise the fixture.
fn select_service<Pool, Port, MakeService>(
    pool: Option<&Pool>,
    make_service: MakeService,
    fixture: Arc<Port>,
) -> Arc<Port>
where
    Port: ?Sized,
    MakeService: FnOnce(&Pool) -> Arc<Port>,
{
    pool.map_or(fixture, make_service)
}

fn build_patient_ports<Pool, Service>(
    pool: Option<&Pool>,
    make_service: impl FnOnce(&Pool) -> Service,
) -> (Arc<dyn PatientsQuery>, Arc<dyn PatientRegistration>)
where
    Service: PatientsQuery + PatientRegistration + 'static,
{
    match pool {
        Some(pool) => {
            let service = Arc::new(make_service(pool));
            let patients: Arc<dyn PatientsQuery> = service.clone();
            (patients, service)
        }
        None => (
            Arc::new(FixturePatientsQuery),
            Arc::new(FixturePatientRegistration),
        ),
    }
}

fn diesel_prescription_service(
    pool: &DbPool,
    oracle: Arc<dyn InteractionOracle>,
    clock: Arc<dyn Clock>,
) -> Arc<dyn PrescriptionCheckCommand> {
    let resolver = InteractionResolver::new(
        Arc::new(DieselSavedInteractionRepository::new(pool.clone())),
        Arc::new(DieselReferenceInteractionRepository::new(pool.clone())),
        oracle,
        clock,
    );
    Arc::new(PrescriptionCheckService::new(
        Arc::new(DieselPatientRepository::new(pool.clone())),
        Arc::new(DieselPrescriptionStagingRepository::new(pool.clone())),
        resolver,
    ))
}

/// Assemble handler state from the server configuration.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let pool = config.db_pool.as_ref();
    if pool.is_none() {
        info!("no database configured; serving fixture adapters");
    }
    let oracle = config
        .oracle
        .clone()
        .unwrap_or_else(|| Arc::new(FixtureInteractionOracle));

    let (patients, registration) = build_patient_ports(pool, |pool| {
        PatientsService::new(Arc::new(DieselPatientRepository::new(pool.clone())))
    });
    let prescriptions = select_service(
        pool,
        |pool| diesel_prescription_service(pool, oracle, Arc::new(DefaultClock)),
        Arc::new(FixturePrescriptionCheckCommand) as Arc<dyn PrescriptionCheckCommand>,
    );

    web::Data::new(HttpState::new(patients, registration, prescriptions))
}
