//! Behavioural integration tests for the full support-desk workflow.
//!
//! These tests wire the directory, lifecycle, and assignment services
//! together over the in-memory adapters and walk realistic dispatch
//! scenarios from client registration through ticket closure.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use std::sync::Arc;

use chrono::Duration;
use mockable::DefaultClock;
use opsdesk::category::ServiceCategory;
use opsdesk::client::{
    adapters::memory::InMemoryClientRepository, services::ClientDirectoryService,
};
use opsdesk::technician::{
    adapters::memory::InMemoryTechnicianRepository,
    domain::Technician,
    services::{RegisterTechnicianRequest, TechnicianDirectoryError, TechnicianDirectoryService},
};
use opsdesk::ticket::{
    adapters::memory::{InMemoryTicketHistoryRepository, InMemoryTicketRepository},
    domain::{Actor, TicketStatus},
    services::{
        AssignmentSelector, CreateTicketRequest, TicketLifecycleError, TicketLifecycleService,
    },
};

struct Desk {
    clients: ClientDirectoryService<InMemoryClientRepository, DefaultClock>,
    technicians:
        TechnicianDirectoryService<InMemoryTechnicianRepository, InMemoryTicketRepository, DefaultClock>,
    tickets: TicketLifecycleService<
        InMemoryTicketRepository,
        InMemoryTicketHistoryRepository,
        InMemoryTechnicianRepository,
        InMemoryClientRepository,
        DefaultClock,
    >,
    selector: AssignmentSelector<InMemoryTechnicianRepository, InMemoryTicketRepository>,
}

fn desk() -> Desk {
    let client_repo = Arc::new(InMemoryClientRepository::new());
    let technician_repo = Arc::new(InMemoryTechnicianRepository::new());
    let ticket_repo = Arc::new(InMemoryTicketRepository::new());
    let history_repo = Arc::new(InMemoryTicketHistoryRepository::new());
    let clock = Arc::new(DefaultClock);

    Desk {
        clients: ClientDirectoryService::new(Arc::clone(&client_repo), Arc::clone(&clock)),
        technicians: TechnicianDirectoryService::new(
            Arc::clone(&technician_repo),
            Arc::clone(&ticket_repo),
            Arc::clone(&clock),
        ),
        tickets: TicketLifecycleService::new(
            Arc::clone(&ticket_repo),
            history_repo,
            Arc::clone(&technician_repo),
            client_repo,
            clock,
        ),
        selector: AssignmentSelector::new(technician_repo, ticket_repo),
    }
}

async fn register_technician(
    desk: &Desk,
    name: &str,
    skills: impl IntoIterator<Item = ServiceCategory>,
) -> Technician {
    desk.technicians
        .register(
            RegisterTechnicianRequest::new(
                name,
                format!("{}-{}@example.com", name.to_lowercase(), uuid::Uuid::new_v4()),
            )
            .with_skills(skills),
        )
        .await
        .expect("registration should succeed")
}

#[tokio::test(flavor = "multi_thread")]
async fn hardware_ticket_runs_from_intake_to_closure() {
    let desk = desk();
    let client = desk
        .clients
        .register("Acme Retail", "support@acme-retail.example.com")
        .await
        .expect("client registration should succeed");
    let technician =
        register_technician(&desk, "Priya", [ServiceCategory::Hardware]).await;

    let ticket = desk
        .tickets
        .create_ticket(CreateTicketRequest::new(
            client.id(),
            ServiceCategory::Hardware,
            "Point-of-sale terminal rebooting",
        ))
        .await
        .expect("ticket creation should succeed");
    assert_eq!(ticket.status(), TicketStatus::Open);
    assert_eq!(ticket.due_at() - ticket.created_at(), Duration::hours(24));

    let best = desk
        .selector
        .find_best_technician_for_category(ServiceCategory::Hardware)
        .await
        .expect("pool scan should succeed")
        .expect("a qualified technician is on duty");
    assert_eq!(best.id(), technician.id());

    desk.tickets
        .assign_technician(ticket.id(), best.id(), Actor::new("dispatcher"))
        .await
        .expect("assignment should succeed");

    let unqualified = register_technician(&desk, "Sam", [ServiceCategory::Software]).await;
    let rejected = desk
        .tickets
        .assign_technician(ticket.id(), unqualified.id(), Actor::new("dispatcher"))
        .await;
    assert!(matches!(
        rejected,
        Err(TicketLifecycleError::TechnicianNotQualified { .. })
    ));

    let closed = desk
        .tickets
        .close_ticket(ticket.id(), "Swapped the power supply", Actor::new("priya"))
        .await
        .expect("closure should succeed");
    assert_eq!(closed.status(), TicketStatus::Closed);

    let history = desk
        .tickets
        .history(ticket.id())
        .await
        .expect("history lookup should succeed");
    assert_eq!(history.len(), 3);
    assert!(
        history
            .last()
            .expect("closure entry")
            .description()
            .contains("Swapped the power supply")
    );

    let reassign = desk
        .tickets
        .assign_technician(ticket.id(), technician.id(), Actor::new("dispatcher"))
        .await;
    assert!(matches!(reassign, Err(TicketLifecycleError::Domain(_))));
}

#[tokio::test(flavor = "multi_thread")]
async fn software_tickets_get_forty_eight_hour_window() {
    let desk = desk();
    let client = desk
        .clients
        .register("Northwind", "it@northwind.example.com")
        .await
        .expect("client registration should succeed");

    let ticket = desk
        .tickets
        .create_ticket(CreateTicketRequest::new(
            client.id(),
            ServiceCategory::Software,
            "Payroll export corrupts totals",
        ))
        .await
        .expect("ticket creation should succeed");

    assert_eq!(ticket.due_at() - ticket.created_at(), Duration::hours(48));
}

#[tokio::test(flavor = "multi_thread")]
async fn dispatcher_spreads_load_across_qualified_pool() {
    let desk = desk();
    let client = desk
        .clients
        .register("Contoso", "helpdesk@contoso.example.com")
        .await
        .expect("client registration should succeed");
    let first = register_technician(&desk, "Ana", [ServiceCategory::Network]).await;
    let second = register_technician(&desk, "Bram", [ServiceCategory::Network]).await;

    let mut assigned = Vec::new();
    for description in ["Core switch flapping", "Guest Wi-Fi down", "VPN latency"] {
        let ticket = desk
            .tickets
            .create_ticket(CreateTicketRequest::new(
                client.id(),
                ServiceCategory::Network,
                description,
            ))
            .await
            .expect("ticket creation should succeed");
        let best = desk
            .selector
            .find_best_technician_for_category(ServiceCategory::Network)
            .await
            .expect("pool scan should succeed")
            .expect("qualified technicians are on duty");
        desk.tickets
            .assign_technician(ticket.id(), best.id(), Actor::new("dispatcher"))
            .await
            .expect("assignment should succeed");
        assigned.push(best.id());
    }

    let first_load = assigned.iter().filter(|id| **id == first.id()).count();
    let second_load = assigned.iter().filter(|id| **id == second.id()).count();
    assert_eq!(first_load + second_load, 3);
    assert_eq!(
        first_load.abs_diff(second_load),
        1,
        "three tickets over two equally qualified technicians must split 2/1"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn selector_ignores_unqualified_and_off_duty_technicians() {
    let desk = desk();
    let software_only = register_technician(&desk, "Chen", [ServiceCategory::Software]).await;
    let resting = register_technician(&desk, "Dara", [ServiceCategory::Hardware]).await;
    desk.technicians
        .start_vacation(resting.id())
        .await
        .expect("vacation transition should succeed");

    let best = desk
        .selector
        .find_best_technician_for_category(ServiceCategory::Hardware)
        .await
        .expect("pool scan should succeed");
    assert!(best.is_none(), "nobody qualified is on duty");

    desk.technicians
        .add_skill(software_only.id(), ServiceCategory::Hardware)
        .await
        .expect("skill grant should succeed");
    let best = desk
        .selector
        .find_best_technician_for_category(ServiceCategory::Hardware)
        .await
        .expect("pool scan should succeed")
        .expect("newly qualified technician should be picked");
    assert_eq!(best.id(), software_only.id());
}

#[tokio::test(flavor = "multi_thread")]
async fn technician_removal_waits_for_open_tickets() {
    let desk = desk();
    let client = desk
        .clients
        .register("Fabrikam", "desk@fabrikam.example.com")
        .await
        .expect("client registration should succeed");
    let technician = register_technician(&desk, "Eli", [ServiceCategory::Software]).await;
    let ticket = desk
        .tickets
        .create_ticket(CreateTicketRequest::new(
            client.id(),
            ServiceCategory::Software,
            "Login loop after update",
        ))
        .await
        .expect("ticket creation should succeed");
    desk.tickets
        .assign_technician(ticket.id(), technician.id(), Actor::new("dispatcher"))
        .await
        .expect("assignment should succeed");

    desk.technicians
        .terminate(technician.id())
        .await
        .expect("termination transition should succeed");
    let blocked = desk.technicians.remove(technician.id()).await;
    assert!(matches!(
        blocked,
        Err(TechnicianDirectoryError::OpenTicketsRemain { open_tickets: 1, .. })
    ));

    desk.tickets
        .close_ticket(ticket.id(), "Rolled the update back", Actor::new("eli"))
        .await
        .expect("closure should succeed");
    desk.technicians
        .remove(technician.id())
        .await
        .expect("removal should succeed once the ticket is closed");
}
