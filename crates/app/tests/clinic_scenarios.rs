//! End-to-end scenarios through `ClinicContext`, backed by real JSON files.

use std::sync::{Arc, Barrier};
use std::thread;

use chrono::{Duration, NaiveDate, NaiveDateTime};

use clinic_app::{ClinicConfig, ClinicContext, ClinicError};
use clinic_auth::AuthError;
use clinic_core::{Entity, FixedClock, SoftDeletable};
use clinic_scheduling::{Appointment, AppointmentStatus};
use clinic_users::{Doctor, Patient, Specialty, SpecialtyName, UserKind, UserProfile};

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2030, 3, 15)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

fn open(dir: &tempfile::TempDir) -> ClinicContext {
    clinic_observability::init_for_tests();
    ClinicContext::open_with_clock(&ClinicConfig::json(dir.path()), Arc::new(FixedClock(now())))
        .unwrap()
}

fn specialty(ctx: &ClinicContext, name: SpecialtyName) -> Specialty {
    ctx.specialties.register(name).unwrap()
}

fn doctor(username: &str, specialty: &Specialty) -> Doctor {
    Doctor::new(
        UserProfile::new(username, "3101234567", "house-md", "Gregory House", "900"),
        specialty.clone(),
    )
}

fn patient(username: &str, document: &str) -> Patient {
    Patient::new(
        UserProfile::new(username, "+573001234567", "secret", "Lucia Perez", document),
        NaiveDate::from_ymd_opt(1992, 11, 3).unwrap(),
    )
}

struct Booked {
    patient: Patient,
    doctor: Doctor,
}

fn booked(ctx: &ClinicContext) -> Booked {
    let neuro = specialty(ctx, SpecialtyName::Neurology);
    let d = doctor("drHouse", &neuro);
    let p = patient("lucia", "1001");
    ctx.doctors.register(d.clone()).unwrap();
    ctx.patients.add(p.clone()).unwrap();
    Booked {
        patient: p,
        doctor: d,
    }
}

#[test]
fn username_is_unique_across_doctors_and_patients() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = open(&dir);
    let s = specialty(&ctx, SpecialtyName::Cardiology);
    ctx.doctors.register(doctor("u", &s)).unwrap();

    let err = ctx.patients.add(patient("u", "42")).unwrap_err();

    assert!(matches!(err, ClinicError::Conflict(_)));
    assert!(ctx.patients.list_all().is_empty());
}

#[test]
fn patient_username_blocks_doctor_registration() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = open(&dir);
    let s = specialty(&ctx, SpecialtyName::Cardiology);
    ctx.patients.add(patient("u", "42")).unwrap();

    let err = ctx.doctors.register(doctor("u", &s)).unwrap_err();

    assert!(matches!(err, ClinicError::Conflict(_)));
    assert!(ctx.doctors.list_all().is_empty());
}

#[test]
fn concurrent_registrations_claim_a_username_once() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = open(&dir);
    let s = specialty(&ctx, SpecialtyName::Pediatrics);

    for round in 0..50 {
        let username = format!("same{round}");
        let barrier = Barrier::new(3);
        let outcomes: Vec<bool> = thread::scope(|scope| {
            let handles = vec![
                scope.spawn(|| {
                    barrier.wait();
                    ctx.patients.add(patient(&username, &format!("{round}1"))).is_ok()
                }),
                scope.spawn(|| {
                    barrier.wait();
                    ctx.patients.add(patient(&username, &format!("{round}2"))).is_ok()
                }),
                scope.spawn(|| {
                    barrier.wait();
                    ctx.doctors.register(doctor(&username, &s)).is_ok()
                }),
            ];
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let holders = ctx
            .patients
            .list_all()
            .iter()
            .filter(|p| p.profile.username == username)
            .count()
            + ctx
                .doctors
                .list_all()
                .iter()
                .filter(|d| d.profile.username == username)
                .count();
        assert_eq!(outcomes.iter().filter(|ok| **ok).count(), 1, "round {round}");
        assert_eq!(holders, 1, "round {round}");
    }
}

#[test]
fn validator_excludes_the_owner_on_update() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = open(&dir);
    let s = specialty(&ctx, SpecialtyName::Neurology);
    let d = doctor("drHouse", &s);
    let id = *d.profile.id();
    ctx.doctors.register(d.clone()).unwrap();

    assert!(ctx.usernames.username_exists("drHouse", None));
    assert!(!ctx.usernames.username_exists("drHouse", Some(id)));

    let mut renamed = d;
    renamed.profile.full_name = "Dr. Gregory House".to_string();
    ctx.doctors.update(renamed).unwrap();
}

#[test]
fn scheduling_rejects_duplicates_and_past_times() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = open(&dir);
    let b = booked(&ctx);
    let (patient_id, doctor_id) = (*b.patient.profile.id(), *b.doctor.profile.id());

    let tomorrow = Appointment::new(
        now() + Duration::days(1),
        Duration::minutes(30),
        patient_id,
        doctor_id,
    );
    ctx.appointments.schedule(tomorrow.clone()).unwrap();

    let err = ctx.appointments.schedule(tomorrow).unwrap_err();
    assert!(matches!(err, ClinicError::Conflict(_)));

    let yesterday = Appointment::new(
        now() - Duration::days(1),
        Duration::minutes(30),
        patient_id,
        doctor_id,
    );
    let err = ctx.appointments.schedule(yesterday).unwrap_err();
    assert!(matches!(err, ClinicError::Validation(_)));

    assert_eq!(ctx.appointments.list_all().len(), 1);
}

#[test]
fn one_consultation_per_appointment() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = open(&dir);
    let b = booked(&ctx);
    let a = Appointment::new(
        now() + Duration::hours(2),
        Duration::minutes(45),
        *b.patient.profile.id(),
        *b.doctor.profile.id(),
    );
    ctx.appointments.schedule(a.clone()).unwrap();

    ctx.consultations.create(a.id(), "Migraine", "Rest").unwrap();
    let err = ctx
        .consultations
        .create(a.id(), "Second opinion", "None")
        .unwrap_err();

    assert!(matches!(err, ClinicError::Conflict(_)));
    assert_eq!(ctx.consultations.list_all().len(), 1);
}

#[test]
fn state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let (appointment, patient_id) = {
        let ctx = open(&dir);
        let b = booked(&ctx);
        let a = Appointment::new(
            now() + Duration::days(2),
            Duration::minutes(90),
            *b.patient.profile.id(),
            *b.doctor.profile.id(),
        );
        ctx.appointments.schedule(a.clone()).unwrap();
        ctx.appointments
            .update_status(a.id(), AppointmentStatus::Completed)
            .unwrap();
        ctx.consultations.create(a.id(), "Flu", "Fluids").unwrap();
        (a, *b.patient.profile.id())
    };

    let ctx = open(&dir);
    let summary = ctx.summary();
    assert_eq!(summary.doctors, 1);
    assert_eq!(summary.patients, 1);
    assert_eq!(summary.specialties, 1);

    let stored = ctx.appointments.find(appointment.id()).unwrap();
    assert_eq!(stored.duration, Duration::minutes(90));
    assert_eq!(stored.scheduled_at, appointment.scheduled_at);
    assert_eq!(stored.status(), AppointmentStatus::Completed);

    let history = ctx.consultations.history_for_patient(&patient_id);
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].registered_at(), now());

    let raw = std::fs::read_to_string(dir.path().join("appointments.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json[0]["duration"], "PT1H30M");
    assert_eq!(json[0]["status"], "COMPLETED");
}

#[test]
fn removed_patient_is_hidden_but_addressable() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = open(&dir);
    let b = booked(&ctx);
    let id = *b.patient.profile.id();

    ctx.patients.remove(&id).unwrap();

    assert!(ctx.patients.list_all().is_empty());
    let stored = ctx.patients.find(&id).unwrap();
    assert!(!stored.is_active());
    assert!(matches!(
        ctx.auth.login("lucia", "secret"),
        Err(AuthError::InvalidCredentials)
    ));
    // The username is free again.
    assert!(!ctx.usernames.username_exists("lucia", None));
}

#[test]
fn login_and_logout() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = open(&dir);
    let b = booked(&ctx);

    assert_eq!(
        ctx.auth.login("", "secret"),
        Err(AuthError::MissingCredentials)
    );
    assert_eq!(
        ctx.auth.login("drHouse", "wrong"),
        Err(AuthError::InvalidCredentials)
    );

    let principal = ctx.auth.login("drHouse", "house-md").unwrap();
    assert_eq!(principal.user_id, *b.doctor.id());
    assert_eq!(principal.kind, UserKind::Doctor);
    assert_eq!(ctx.auth.current_user(), Some(principal));

    ctx.auth.logout();
    assert!(ctx.auth.current_user().is_none());
}

#[test]
fn missing_data_directory_opens_empty() {
    let dir = tempfile::tempdir().unwrap();
    let config = ClinicConfig::json(dir.path().join("not-created-yet"));

    let ctx = ClinicContext::open(&config).unwrap();

    assert_eq!(ctx.summary().appointments, 0);
    assert!(ctx.doctors.list_all().is_empty());
}

#[test]
fn malformed_collection_fails_to_open() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("patients.json"), "[{").unwrap();

    let err = ClinicContext::open(&ClinicConfig::json(dir.path())).err().unwrap();

    assert!(matches!(err, ClinicError::Persistence(_)));
}
