//! Tests for least-loaded-qualified technician selection.

use std::sync::Arc;

use crate::category::ServiceCategory;
use crate::client::domain::ClientId;
use crate::contact::EmailAddress;
use crate::technician::{
    adapters::memory::InMemoryTechnicianRepository,
    domain::{Technician, TechnicianStatus},
    ports::TechnicianRepository,
};
use crate::ticket::{
    adapters::memory::InMemoryTicketRepository,
    domain::Ticket,
    ports::TicketRepository,
    services::AssignmentSelector,
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestSelector = AssignmentSelector<InMemoryTechnicianRepository, InMemoryTicketRepository>;

struct Harness {
    selector: TestSelector,
    technicians: Arc<InMemoryTechnicianRepository>,
    tickets: Arc<InMemoryTicketRepository>,
}

#[fixture]
fn harness() -> Harness {
    let technicians = Arc::new(InMemoryTechnicianRepository::new());
    let tickets = Arc::new(InMemoryTicketRepository::new());
    let selector = AssignmentSelector::new(Arc::clone(&technicians), Arc::clone(&tickets));
    Harness {
        selector,
        technicians,
        tickets,
    }
}

async fn seed_technician(
    harness: &Harness,
    name: &str,
    skills: impl IntoIterator<Item = ServiceCategory>,
) -> Technician {
    let email = EmailAddress::new(format!("{}-{}@example.com", name, uuid::Uuid::new_v4()))
        .expect("valid email");
    let technician = Technician::new(name, email, skills, &DefaultClock).expect("valid technician");
    harness
        .technicians
        .insert(&technician)
        .await
        .expect("technician seed should succeed");
    technician
}

async fn seed_open_tickets(harness: &Harness, technician: &Technician, count: usize) {
    for index in 0..count {
        let mut ticket = Ticket::new(
            ClientId::new(),
            ServiceCategory::Hardware,
            format!("Open ticket {index}"),
            &DefaultClock,
        )
        .expect("valid ticket");
        ticket
            .assign(technician.id(), &DefaultClock)
            .expect("assignment should succeed");
        harness
            .tickets
            .insert(&ticket)
            .await
            .expect("ticket seed should succeed");
    }
}

async fn deactivate(harness: &Harness, technician: &Technician) {
    let mut copy = technician.clone();
    copy.transition_to(TechnicianStatus::Inactive, &DefaultClock)
        .expect("deactivation should be allowed");
    harness
        .technicians
        .update_if_unchanged(technician, &copy)
        .await
        .expect("update should succeed");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn selection_prefers_least_loaded_then_degrades_then_empties(harness: Harness) {
    let heavy = seed_technician(&harness, "heavy", [ServiceCategory::Hardware]).await;
    let light = seed_technician(&harness, "light", [ServiceCategory::Hardware]).await;
    let unqualified = seed_technician(&harness, "other", [ServiceCategory::Software]).await;
    seed_open_tickets(&harness, &heavy, 3).await;
    seed_open_tickets(&harness, &light, 1).await;

    let best = harness
        .selector
        .find_best_technician_for_category(ServiceCategory::Hardware)
        .await
        .expect("pool scan should succeed");
    assert_eq!(best.map(|technician| technician.id()), Some(light.id()));

    deactivate(&harness, &light).await;
    let best = harness
        .selector
        .find_best_technician_for_category(ServiceCategory::Hardware)
        .await
        .expect("pool scan should succeed");
    assert_eq!(best.map(|technician| technician.id()), Some(heavy.id()));

    deactivate(&harness, &heavy).await;
    let best = harness
        .selector
        .find_best_technician_for_category(ServiceCategory::Hardware)
        .await
        .expect("pool scan should succeed");
    assert!(best.is_none(), "unqualified {} must never win", unqualified.id());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn equal_load_ties_break_by_technician_id_ascending(harness: Harness) {
    let first = seed_technician(&harness, "first", [ServiceCategory::Network]).await;
    let second = seed_technician(&harness, "second", [ServiceCategory::Network]).await;
    let expected = if first.id() < second.id() {
        first.id()
    } else {
        second.id()
    };

    for _ in 0..3 {
        let best = harness
            .selector
            .find_best_technician_for_category(ServiceCategory::Network)
            .await
            .expect("pool scan should succeed");
        assert_eq!(best.map(|technician| technician.id()), Some(expected));
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn closed_tickets_do_not_count_toward_load(harness: Harness) {
    let busy = seed_technician(&harness, "busy", [ServiceCategory::Hardware]).await;
    let idle = seed_technician(&harness, "idle", [ServiceCategory::Hardware]).await;
    seed_open_tickets(&harness, &idle, 1).await;

    // Two tickets that were assigned to `busy` but already closed.
    for index in 0..2 {
        let mut ticket = Ticket::new(
            ClientId::new(),
            ServiceCategory::Hardware,
            format!("Closed ticket {index}"),
            &DefaultClock,
        )
        .expect("valid ticket");
        ticket
            .assign(busy.id(), &DefaultClock)
            .expect("assignment should succeed");
        ticket.close(&DefaultClock).expect("closure should succeed");
        harness
            .tickets
            .insert(&ticket)
            .await
            .expect("ticket seed should succeed");
    }

    let best = harness
        .selector
        .find_best_technician_for_category(ServiceCategory::Hardware)
        .await
        .expect("pool scan should succeed");
    assert_eq!(best.map(|technician| technician.id()), Some(busy.id()));
}
