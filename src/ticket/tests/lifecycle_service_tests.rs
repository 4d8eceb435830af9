//! Service orchestration tests for the ticket lifecycle and audit trail.

use std::sync::Arc;

use crate::category::ServiceCategory;
use crate::client::{
    adapters::memory::InMemoryClientRepository,
    domain::{Client, ClientStatus},
    ports::ClientRepository,
};
use crate::contact::EmailAddress;
use crate::technician::{
    adapters::memory::InMemoryTechnicianRepository,
    domain::{Technician, TechnicianStatus},
    ports::TechnicianRepository,
};
use crate::ticket::{
    adapters::memory::{InMemoryTicketHistoryRepository, InMemoryTicketRepository},
    domain::{Actor, TicketDomainError, TicketStatus},
    services::{CreateTicketRequest, TicketLifecycleError, TicketLifecycleService},
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService = TicketLifecycleService<
    InMemoryTicketRepository,
    InMemoryTicketHistoryRepository,
    InMemoryTechnicianRepository,
    InMemoryClientRepository,
    DefaultClock,
>;

struct Harness {
    service: TestService,
    clients: Arc<InMemoryClientRepository>,
    technicians: Arc<InMemoryTechnicianRepository>,
}

#[fixture]
fn harness() -> Harness {
    let tickets = Arc::new(InMemoryTicketRepository::new());
    let history = Arc::new(InMemoryTicketHistoryRepository::new());
    let technicians = Arc::new(InMemoryTechnicianRepository::new());
    let clients = Arc::new(InMemoryClientRepository::new());
    let service = TicketLifecycleService::new(
        Arc::clone(&tickets),
        history,
        Arc::clone(&technicians),
        Arc::clone(&clients),
        Arc::new(DefaultClock),
    );
    Harness {
        service,
        clients,
        technicians,
    }
}

async fn seed_client(harness: &Harness, status: ClientStatus) -> Client {
    let email = EmailAddress::new(format!("client-{}@example.com", uuid::Uuid::new_v4()))
        .expect("valid email");
    let mut client = Client::new("Test Client", email, &DefaultClock).expect("valid client");
    if status != ClientStatus::Active {
        client
            .transition_to(status, &DefaultClock)
            .expect("seed transition should be allowed");
    }
    harness
        .clients
        .insert(&client)
        .await
        .expect("client seed should succeed");
    client
}

async fn seed_technician(
    harness: &Harness,
    skills: impl IntoIterator<Item = ServiceCategory>,
    status: TechnicianStatus,
) -> Technician {
    let email = EmailAddress::new(format!("tech-{}@example.com", uuid::Uuid::new_v4()))
        .expect("valid email");
    let mut technician =
        Technician::new("Test Technician", email, skills, &DefaultClock).expect("valid technician");
    if status != TechnicianStatus::Active {
        technician
            .transition_to(status, &DefaultClock)
            .expect("seed transition should be allowed");
    }
    harness
        .technicians
        .insert(&technician)
        .await
        .expect("technician seed should succeed");
    technician
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_ticket_fixes_due_timestamp_and_records_creation(harness: Harness) {
    let client = seed_client(&harness, ClientStatus::Active).await;

    let ticket = harness
        .service
        .create_ticket(CreateTicketRequest::new(
            client.id(),
            ServiceCategory::Hardware,
            "Laptop will not power on",
        ))
        .await
        .expect("creation should succeed");

    assert_eq!(ticket.status(), TicketStatus::Open);
    assert_eq!(
        ticket.due_at(),
        ticket.created_at() + chrono::Duration::hours(24)
    );

    let history = harness
        .service
        .history(ticket.id())
        .await
        .expect("history lookup should succeed");
    assert_eq!(history.len(), 1);
    let entry = history.first().expect("one entry");
    assert_eq!(entry.status(), TicketStatus::Open);
    assert_eq!(entry.actor(), &Actor::system());
    assert!(entry.description().contains("hardware"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_ticket_rejects_missing_client(harness: Harness) {
    let result = harness
        .service
        .create_ticket(CreateTicketRequest::new(
            crate::client::domain::ClientId::new(),
            ServiceCategory::Software,
            "Install fails",
        ))
        .await;

    assert!(matches!(
        result,
        Err(TicketLifecycleError::ClientNotFound(_))
    ));
}

#[rstest]
#[case(ClientStatus::Inactive)]
#[case(ClientStatus::Suspended)]
#[tokio::test(flavor = "multi_thread")]
async fn create_ticket_rejects_non_active_client(
    harness: Harness,
    #[case] status: ClientStatus,
) {
    let client = seed_client(&harness, status).await;

    let result = harness
        .service
        .create_ticket(CreateTicketRequest::new(
            client.id(),
            ServiceCategory::Software,
            "Install fails",
        ))
        .await;

    assert!(matches!(
        result,
        Err(TicketLifecycleError::ClientNotActive { .. })
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assign_requires_active_qualified_technician(harness: Harness) {
    let client = seed_client(&harness, ClientStatus::Active).await;
    let ticket = harness
        .service
        .create_ticket(CreateTicketRequest::new(
            client.id(),
            ServiceCategory::Hardware,
            "Fan noise",
        ))
        .await
        .expect("creation should succeed");

    let unqualified =
        seed_technician(&harness, [ServiceCategory::Software], TechnicianStatus::Active).await;
    let result = harness
        .service
        .assign_technician(ticket.id(), unqualified.id(), Actor::new("dispatcher"))
        .await;
    assert!(matches!(
        result,
        Err(TicketLifecycleError::TechnicianNotQualified { .. })
    ));

    let off_duty =
        seed_technician(&harness, [ServiceCategory::Hardware], TechnicianStatus::OnVacation).await;
    let result = harness
        .service
        .assign_technician(ticket.id(), off_duty.id(), Actor::new("dispatcher"))
        .await;
    assert!(matches!(
        result,
        Err(TicketLifecycleError::TechnicianNotActive { .. })
    ));

    let qualified =
        seed_technician(&harness, [ServiceCategory::Hardware], TechnicianStatus::Active).await;
    let assigned = harness
        .service
        .assign_technician(ticket.id(), qualified.id(), Actor::new("dispatcher"))
        .await
        .expect("qualified active technician should be assignable");
    assert_eq!(assigned.assigned_technician(), Some(qualified.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unassign_records_prior_technician_and_reason(harness: Harness) {
    let client = seed_client(&harness, ClientStatus::Active).await;
    let technician =
        seed_technician(&harness, [ServiceCategory::Network], TechnicianStatus::Active).await;
    let ticket = harness
        .service
        .create_ticket(CreateTicketRequest::new(
            client.id(),
            ServiceCategory::Network,
            "VPN drops hourly",
        ))
        .await
        .expect("creation should succeed");
    harness
        .service
        .assign_technician(ticket.id(), technician.id(), Actor::new("dispatcher"))
        .await
        .expect("assignment should succeed");

    let unassigned = harness
        .service
        .unassign_technician(ticket.id(), "shift change", Actor::new("dispatcher"))
        .await
        .expect("unassignment should succeed");
    assert_eq!(unassigned.assigned_technician(), None);

    let history = harness
        .service
        .history(ticket.id())
        .await
        .expect("history lookup should succeed");
    let last = history.last().expect("unassignment entry");
    assert!(last.description().contains(technician.name()));
    assert!(last.description().contains("shift change"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unassign_without_assignment_is_rejected(harness: Harness) {
    let client = seed_client(&harness, ClientStatus::Active).await;
    let ticket = harness
        .service
        .create_ticket(CreateTicketRequest::new(
            client.id(),
            ServiceCategory::Software,
            "License expired",
        ))
        .await
        .expect("creation should succeed");

    let result = harness
        .service
        .unassign_technician(ticket.id(), "cleanup", Actor::new("dispatcher"))
        .await;

    assert!(matches!(
        result,
        Err(TicketLifecycleError::Domain(
            TicketDomainError::NoAssignedTechnician(_)
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn closed_ticket_rejects_status_updates_and_assignment(harness: Harness) {
    let client = seed_client(&harness, ClientStatus::Active).await;
    let technician =
        seed_technician(&harness, [ServiceCategory::Hardware], TechnicianStatus::Active).await;
    let ticket = harness
        .service
        .create_ticket(CreateTicketRequest::new(
            client.id(),
            ServiceCategory::Hardware,
            "Dead pixel cluster",
        ))
        .await
        .expect("creation should succeed");
    harness
        .service
        .close_ticket(ticket.id(), "Panel replaced", Actor::new("agent"))
        .await
        .expect("closure should succeed");

    let reassign = harness
        .service
        .assign_technician(ticket.id(), technician.id(), Actor::new("dispatcher"))
        .await;
    assert!(matches!(
        reassign,
        Err(TicketLifecycleError::Domain(
            TicketDomainError::TicketClosed(_)
        ))
    ));

    let reopen = harness
        .service
        .update_status(ticket.id(), TicketStatus::Open, "reopen", Actor::new("agent"))
        .await;
    assert!(matches!(
        reopen,
        Err(TicketLifecycleError::Domain(
            TicketDomainError::TicketClosed(_)
        ))
    ));

    let reclose = harness
        .service
        .close_ticket(ticket.id(), "again", Actor::new("agent"))
        .await;
    assert!(matches!(
        reclose,
        Err(TicketLifecycleError::Domain(
            TicketDomainError::TicketClosed(_)
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn audit_trail_covers_create_assign_unassign_close(harness: Harness) {
    let client = seed_client(&harness, ClientStatus::Active).await;
    let technician =
        seed_technician(&harness, [ServiceCategory::Hardware], TechnicianStatus::Active).await;
    let ticket = harness
        .service
        .create_ticket(CreateTicketRequest::new(
            client.id(),
            ServiceCategory::Hardware,
            "Keyboard unresponsive",
        ))
        .await
        .expect("creation should succeed");

    harness
        .service
        .assign_technician(ticket.id(), technician.id(), Actor::new("dispatcher"))
        .await
        .expect("assignment should succeed");
    harness
        .service
        .unassign_technician(ticket.id(), "reprioritized", Actor::new("dispatcher"))
        .await
        .expect("unassignment should succeed");
    harness
        .service
        .close_ticket(ticket.id(), "Replaced keyboard", Actor::new("agent"))
        .await
        .expect("closure should succeed");

    let history = harness
        .service
        .history(ticket.id())
        .await
        .expect("history lookup should succeed");

    let statuses: Vec<TicketStatus> = history.iter().map(|entry| entry.status()).collect();
    assert_eq!(
        statuses,
        vec![
            TicketStatus::Open,
            TicketStatus::Open,
            TicketStatus::Open,
            TicketStatus::Closed,
        ]
    );
    assert!(history.iter().all(|entry| !entry.description().is_empty()));
    assert!(
        history
            .windows(2)
            .all(|pair| pair.first().map(|entry| entry.recorded_at())
                <= pair.last().map(|entry| entry.recorded_at())),
        "entries should be chronological"
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_closures_admit_exactly_one(harness: Harness) {
    let client = seed_client(&harness, ClientStatus::Active).await;
    let ticket = harness
        .service
        .create_ticket(CreateTicketRequest::new(
            client.id(),
            ServiceCategory::Hardware,
            "Intermittent shutdowns",
        ))
        .await
        .expect("creation should succeed");

    let first = harness
        .service
        .close_ticket(ticket.id(), "Resolved on call", Actor::new("agent-a"));
    let second = harness
        .service
        .close_ticket(ticket.id(), "Duplicate closure", Actor::new("agent-b"));
    let (first, second) = tokio::join!(first, second);

    let successes = usize::from(first.is_ok()) + usize::from(second.is_ok());
    assert_eq!(successes, 1, "one closure wins, the other sees a closed ticket");
    let rejected = [first, second]
        .into_iter()
        .find(|result| result.is_err())
        .expect("one closure must fail");
    assert!(matches!(
        rejected,
        Err(TicketLifecycleError::Domain(
            TicketDomainError::TicketClosed(_)
        ))
    ));

    let history = harness
        .service
        .history(ticket.id())
        .await
        .expect("history lookup should succeed");
    let statuses: Vec<TicketStatus> = history.iter().map(|entry| entry.status()).collect();
    assert_eq!(
        statuses,
        vec![TicketStatus::Open, TicketStatus::Closed],
        "exactly one closure entry follows the creation entry"
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_assignments_serialize_and_audit_both(harness: Harness) {
    let client = seed_client(&harness, ClientStatus::Active).await;
    let first_technician =
        seed_technician(&harness, [ServiceCategory::Hardware], TechnicianStatus::Active).await;
    let second_technician =
        seed_technician(&harness, [ServiceCategory::Hardware], TechnicianStatus::Active).await;
    let ticket = harness
        .service
        .create_ticket(CreateTicketRequest::new(
            client.id(),
            ServiceCategory::Hardware,
            "No video output",
        ))
        .await
        .expect("creation should succeed");

    let first = harness.service.assign_technician(
        ticket.id(),
        first_technician.id(),
        Actor::new("dispatcher-a"),
    );
    let second = harness.service.assign_technician(
        ticket.id(),
        second_technician.id(),
        Actor::new("dispatcher-b"),
    );
    let (first, second) = tokio::join!(first, second);
    let first_write = first.expect("reassignment is allowed while the ticket is open");
    let second_write = second.expect("reassignment is allowed while the ticket is open");

    let stored = harness
        .service
        .find_by_id(ticket.id())
        .await
        .expect("lookup should succeed")
        .expect("ticket should be stored");
    let assigned = stored
        .assigned_technician()
        .expect("a technician stays assigned");
    assert!([first_technician.id(), second_technician.id()].contains(&assigned));
    assert!(
        stored == first_write || stored == second_write,
        "the stored ticket is the later of the two serialized writes"
    );

    let history = harness
        .service
        .history(ticket.id())
        .await
        .expect("history lookup should succeed");
    assert_eq!(history.len(), 3, "creation plus one entry per assignment");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn racing_assignment_never_reopens_a_closing_ticket(harness: Harness) {
    let client = seed_client(&harness, ClientStatus::Active).await;
    let technician =
        seed_technician(&harness, [ServiceCategory::Hardware], TechnicianStatus::Active).await;
    let ticket = harness
        .service
        .create_ticket(CreateTicketRequest::new(
            client.id(),
            ServiceCategory::Hardware,
            "Battery swelling",
        ))
        .await
        .expect("creation should succeed");

    let assign = harness.service.assign_technician(
        ticket.id(),
        technician.id(),
        Actor::new("dispatcher"),
    );
    let close = harness
        .service
        .close_ticket(ticket.id(), "Unit recalled", Actor::new("agent"));
    let (assign, close) = tokio::join!(assign, close);

    close.expect("closure should succeed whichever write lands first");
    let stored = harness
        .service
        .find_by_id(ticket.id())
        .await
        .expect("lookup should succeed")
        .expect("ticket should be stored");
    assert_eq!(
        stored.status(),
        TicketStatus::Closed,
        "the closure is never overwritten by a stale assignment"
    );
    match assign {
        Ok(assigned) => assert_eq!(assigned.status(), TicketStatus::Open),
        Err(error) => assert!(matches!(
            error,
            TicketLifecycleError::Domain(TicketDomainError::TicketClosed(_))
        )),
    }
}
