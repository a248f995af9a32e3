mod support;

use serde_json::{Value, json};
use sickleave_core::application::{
    ApplicationError,
    audit::RequestMeta,
    commands::sick_leaves::{
        CancelSickLeaveCommand, CreateSickLeaveCommand, UpdateSickLeaveCommand,
    },
    queries::sick_leaves::{GetSickLeaveQuery, ListSickLeavesQuery},
};
use sickleave_core::domain::{
    audit::{AuditAction, AuditActor, AuditTable},
    sick_leave::{SickLeaveId, SickLeaveStatus},
    user::UserId,
};
use support::*;
use uuid::Uuid;

fn values(raw: &Option<String>) -> Value {
    serde_json::from_str(raw.as_deref().expect("values present")).unwrap()
}

fn create(input: sickleave_core::application::validation::SickLeaveInput) -> CreateSickLeaveCommand {
    CreateSickLeaveCommand { input, meta: None }
}

#[tokio::test]
async fn create_stores_active_record_and_audits_insert() {
    let app = test_app();
    let employee = app.store.seed_employee(EmployeeBuilder::new("P1001").build());

    let mut input = sick_leave_input(employee, "2025-03-01", "2025-03-05");
    input.notes = Some("  flu  ".into());
    input.doctor_visit_date = Some("2025-03-02".into());
    let meta = RequestMeta {
        user_agent: Some("integration".into()),
        ip_address: Some("203.0.113.9".into()),
    };

    let created = app
        .services
        .sick_leave_commands
        .create_sick_leave(&staff(), CreateSickLeaveCommand {
            input,
            meta: Some(meta),
        })
        .await
        .unwrap();

    assert_eq!(created.message, "sick leave created");
    let dto = created.sick_leave;
    assert_eq!(dto.status, "active");
    assert_eq!(dto.days, 5);
    assert_eq!(dto.notes.as_deref(), Some("flu"));
    assert_eq!(dto.created_by_id, STAFF_ID);
    assert_eq!(dto.employee.as_ref().unwrap().employee_number, "P1001");
    assert_eq!(dto.created_by.as_ref().unwrap().email, "staff@example.com");
    assert!(dto.updated_by.is_none());

    let audit = app.store.audit_for(dto.id);
    assert_eq!(audit.len(), 1);
    let entry = &audit[0];
    assert_eq!(entry.table_name, AuditTable::SickLeave);
    assert_eq!(entry.action, AuditAction::Insert);
    assert_eq!(entry.actor, AuditActor::User(UserId(STAFF_ID)));
    assert!(entry.old_values.is_none());
    assert_eq!(entry.ip_address.as_deref(), Some("203.0.113.9"));
    assert_eq!(entry.user_agent.as_deref(), Some("integration"));

    let new_values = values(&entry.new_values);
    assert_eq!(new_values["startDate"], "2025-03-01");
    assert_eq!(new_values["doctorVisitDate"], "2025-03-02");
    assert_eq!(new_values["status"], "active");
}

#[tokio::test]
async fn create_collects_field_errors_before_touching_storage() {
    let app = test_app();
    let employee = app.store.seed_employee(EmployeeBuilder::new("P1001").build());

    let err = app
        .services
        .sick_leave_commands
        .create_sick_leave(&staff(), create(sick_leave_input(employee, "2025-03-05", "2025-03-01")))
        .await
        .unwrap_err();

    match err {
        ApplicationError::FieldErrors(errors) => assert!(errors.contains("endDate")),
        other => panic!("expected field errors, got {other:?}"),
    }
    assert_eq!(app.store.sick_leave_count(), 0);
    assert!(app.store.audit_entries().is_empty());
}

#[tokio::test]
async fn create_for_unknown_employee_is_not_found() {
    let app = test_app();
    let missing = sickleave_core::domain::employee::EmployeeId(Uuid::new_v4());

    let err = app
        .services
        .sick_leave_commands
        .create_sick_leave(&staff(), create(sick_leave_input(missing, "2025-03-01", "2025-03-02")))
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::NotFound(_)));
    assert!(app.store.audit_entries().is_empty());
}

#[tokio::test]
async fn only_seeding_callers_create_non_active_records() {
    let app = test_app();
    let employee = app.store.seed_employee(EmployeeBuilder::new("P1001").build());
    let mut input = sick_leave_input(employee, "2025-01-10", "2025-01-12");
    input.status = Some("completed".into());

    let err = app
        .services
        .sick_leave_commands
        .create_sick_leave(&staff(), create(input.clone()))
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Forbidden(_)));

    let seeded = app
        .services
        .sick_leave_commands
        .create_sick_leave(&admin(), create(input))
        .await
        .unwrap();
    assert_eq!(seeded.sick_leave.status, "completed");
}

#[tokio::test]
async fn completing_a_record_reports_the_new_status() {
    let app = test_app();
    let employee = app.store.seed_employee(EmployeeBuilder::new("P1001").build());
    let id = app
        .store
        .seed_sick_leave(SickLeaveBuilder::new(employee, "2025-02-20", "2025-02-25").build());

    let mut input = sick_leave_input(employee, "2025-02-20", "2025-02-26");
    input.status = Some("completed".into());
    let updated = app
        .services
        .sick_leave_commands
        .update_sick_leave(&staff(), UpdateSickLeaveCommand {
            id: id.0,
            input,
            meta: None,
        })
        .await
        .unwrap();

    assert_eq!(updated.message, "sick leave updated (status: completed)");
    assert_eq!(updated.sick_leave.end_date, date("2025-02-26"));
    assert_eq!(updated.sick_leave.updated_by_id, Some(STAFF_ID));
    assert_eq!(updated.sick_leave.updated_at, Some(*FIXED_NOW));

    let audit = app.store.audit_for(id.0);
    assert_eq!(audit.len(), 1);
    assert_eq!(audit[0].action, AuditAction::Update);
    assert_eq!(values(&audit[0].old_values)["status"], "active");
    assert_eq!(values(&audit[0].old_values)["endDate"], "2025-02-25");
    assert_eq!(values(&audit[0].new_values)["status"], "completed");
}

#[tokio::test]
async fn same_status_edit_uses_plain_message() {
    let app = test_app();
    let employee = app.store.seed_employee(EmployeeBuilder::new("P1001").build());
    let id = app
        .store
        .seed_sick_leave(SickLeaveBuilder::new(employee, "2025-03-01", "2025-03-04").build());

    let mut input = sick_leave_input(employee, "2025-03-01", "2025-03-06");
    input.status = Some("active".into());
    input.notes = Some("extended".into());
    let updated = app
        .services
        .sick_leave_commands
        .update_sick_leave(&staff(), UpdateSickLeaveCommand {
            id: id.0,
            input,
            meta: None,
        })
        .await
        .unwrap();

    assert_eq!(updated.message, "sick leave updated");
    assert_eq!(updated.sick_leave.notes.as_deref(), Some("extended"));
}

#[tokio::test]
async fn completed_records_are_never_reopened() {
    let app = test_app();
    let employee = app.store.seed_employee(EmployeeBuilder::new("P1001").build());
    let id = app.store.seed_sick_leave(
        SickLeaveBuilder::new(employee, "2025-02-01", "2025-02-03")
            .status(SickLeaveStatus::Completed)
            .build(),
    );

    let mut input = sick_leave_input(employee, "2025-02-01", "2025-02-03");
    input.status = Some("active".into());
    let err = app
        .services
        .sick_leave_commands
        .update_sick_leave(&staff(), UpdateSickLeaveCommand {
            id: id.0,
            input,
            meta: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::Conflict { .. }));
    assert_eq!(app.store.sick_leave(id).unwrap().status, SickLeaveStatus::Completed);
    assert!(app.store.audit_for(id.0).is_empty());
}

#[tokio::test]
async fn cancellation_is_not_an_edit() {
    let app = test_app();
    let employee = app.store.seed_employee(EmployeeBuilder::new("P1001").build());
    let id = app
        .store
        .seed_sick_leave(SickLeaveBuilder::new(employee, "2025-03-01", "2025-03-04").build());

    let mut input = sick_leave_input(employee, "2025-03-01", "2025-03-04");
    input.status = Some("cancelled".into());
    let err = app
        .services
        .sick_leave_commands
        .update_sick_leave(&admin(), UpdateSickLeaveCommand {
            id: id.0,
            input,
            meta: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::Validation(_)));
    assert_eq!(app.store.sick_leave(id).unwrap().status, SickLeaveStatus::Active);
}

#[tokio::test]
async fn update_with_reversed_dates_changes_nothing() {
    let app = test_app();
    let employee = app.store.seed_employee(EmployeeBuilder::new("P1001").build());
    let id = app
        .store
        .seed_sick_leave(SickLeaveBuilder::new(employee, "2025-03-01", "2025-03-04").build());

    let mut input = sick_leave_input(employee, "2025-03-06", "2025-03-02");
    input.status = Some("active".into());
    let err = app
        .services
        .sick_leave_commands
        .update_sick_leave(&staff(), UpdateSickLeaveCommand {
            id: id.0,
            input,
            meta: None,
        })
        .await
        .unwrap_err();

    let ApplicationError::FieldErrors(errors) = err else {
        panic!("expected field errors");
    };
    assert!(errors.contains("endDate"));
    let stored = app.store.sick_leave(id).unwrap();
    assert_eq!(stored.period.start(), date("2025-03-01"));
    assert_eq!(stored.period.end(), date("2025-03-04"));
    assert!(app.store.audit_for(id.0).is_empty());
}

#[tokio::test]
async fn update_rejects_doctor_visit_outside_the_period() {
    let app = test_app();
    let employee = app.store.seed_employee(EmployeeBuilder::new("P1001").build());
    let id = app
        .store
        .seed_sick_leave(SickLeaveBuilder::new(employee, "2025-03-01", "2025-03-04").build());

    let mut input = sick_leave_input(employee, "2025-03-01", "2025-03-04");
    input.status = Some("active".into());
    input.doctor_visit_date = Some("2025-02-28".into());
    let err = app
        .services
        .sick_leave_commands
        .update_sick_leave(&staff(), UpdateSickLeaveCommand {
            id: id.0,
            input,
            meta: None,
        })
        .await
        .unwrap_err();

    let ApplicationError::FieldErrors(errors) = err else {
        panic!("expected field errors");
    };
    assert!(errors.contains("doctorVisitDate"));
    assert!(app.store.sick_leave(id).unwrap().period.doctor_visit().is_none());
    assert!(app.store.audit_for(id.0).is_empty());
}

#[tokio::test]
async fn update_keeps_the_record_with_its_employee() {
    let app = test_app();
    let owner = app.store.seed_employee(EmployeeBuilder::new("P1001").build());
    let other = app.store.seed_employee(EmployeeBuilder::new("P1002").build());
    let id = app
        .store
        .seed_sick_leave(SickLeaveBuilder::new(owner, "2025-03-01", "2025-03-04").build());

    let mut input = sick_leave_input(other, "2025-03-01", "2025-03-04");
    input.status = Some("active".into());
    let err = app
        .services
        .sick_leave_commands
        .update_sick_leave(&staff(), UpdateSickLeaveCommand {
            id: id.0,
            input,
            meta: None,
        })
        .await
        .unwrap_err();

    let ApplicationError::FieldErrors(errors) = err else {
        panic!("expected field errors");
    };
    assert!(errors.contains("employeeId"));
    assert_eq!(app.store.sick_leave(id).unwrap().employee_id, owner);
    assert!(app.store.audit_for(id.0).is_empty());
}

#[tokio::test]
async fn cancel_requires_elevated_role_and_keeps_dates() {
    let app = test_app();
    let employee = app.store.seed_employee(EmployeeBuilder::new("P1001").build());
    let id = app.store.seed_sick_leave(
        SickLeaveBuilder::new(employee, "2025-03-01", "2025-03-04")
            .notes("flu")
            .build(),
    );

    let err = app
        .services
        .sick_leave_commands
        .cancel_sick_leave(&staff(), CancelSickLeaveCommand {
            id: id.0,
            meta: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Forbidden(_)));

    let cancelled = app
        .services
        .sick_leave_commands
        .cancel_sick_leave(&admin(), CancelSickLeaveCommand {
            id: id.0,
            meta: None,
        })
        .await
        .unwrap();

    assert_eq!(cancelled.message, "sick leave cancelled");
    assert_eq!(cancelled.sick_leave.status, "cancelled");
    assert_eq!(cancelled.sick_leave.start_date, date("2025-03-01"));
    assert_eq!(cancelled.sick_leave.end_date, date("2025-03-04"));
    assert_eq!(cancelled.sick_leave.notes.as_deref(), Some("flu"));

    let audit = app.store.audit_for(id.0);
    assert_eq!(audit.len(), 1);
    assert_eq!(audit[0].action, AuditAction::Delete);
    assert_eq!(values(&audit[0].old_values), json!({"status": "active"}));
    assert_eq!(values(&audit[0].new_values), json!({"status": "cancelled"}));
}

#[tokio::test]
async fn cancelling_twice_appends_another_entry() {
    let app = test_app();
    let employee = app.store.seed_employee(EmployeeBuilder::new("P1001").build());
    let id = app
        .store
        .seed_sick_leave(SickLeaveBuilder::new(employee, "2025-03-01", "2025-03-04").build());

    for _ in 0..2 {
        app.services
            .sick_leave_commands
            .cancel_sick_leave(&admin(), CancelSickLeaveCommand {
                id: id.0,
                meta: None,
            })
            .await
            .unwrap();
    }

    let audit = app.store.audit_for(id.0);
    assert_eq!(audit.len(), 2);
    assert_eq!(values(&audit[1].old_values), json!({"status": "cancelled"}));
}

#[tokio::test]
async fn cancelled_records_reject_edits() {
    let app = test_app();
    let employee = app.store.seed_employee(EmployeeBuilder::new("P1001").build());
    let id = app.store.seed_sick_leave(
        SickLeaveBuilder::new(employee, "2025-03-01", "2025-03-04")
            .status(SickLeaveStatus::Cancelled)
            .build(),
    );

    let mut input = sick_leave_input(employee, "2025-03-01", "2025-03-09");
    input.status = Some("cancelled".into());
    let err = app
        .services
        .sick_leave_commands
        .update_sick_leave(&admin(), UpdateSickLeaveCommand {
            id: id.0,
            input,
            meta: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::Conflict { .. }));
    assert_eq!(app.store.sick_leave(id).unwrap().period.end(), date("2025-03-04"));
}

#[tokio::test]
async fn failed_audit_write_rolls_the_mutation_back() {
    let app = test_app();
    let employee = app.store.seed_employee(EmployeeBuilder::new("P1001").build());
    let existing = app
        .store
        .seed_sick_leave(SickLeaveBuilder::new(employee, "2025-03-01", "2025-03-04").build());
    app.store.fail_audit_in_transactions(true);

    let err = app
        .services
        .sick_leave_commands
        .create_sick_leave(&staff(), create(sick_leave_input(employee, "2025-03-02", "2025-03-03")))
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Infrastructure(_)));
    assert_eq!(app.store.sick_leave_count(), 1);

    let mut input = sick_leave_input(employee, "2025-03-01", "2025-03-08");
    input.status = Some("completed".into());
    let err = app
        .services
        .sick_leave_commands
        .update_sick_leave(&staff(), UpdateSickLeaveCommand {
            id: existing.0,
            input,
            meta: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Infrastructure(_)));
    let stored = app.store.sick_leave(existing).unwrap();
    assert_eq!(stored.period.end(), date("2025-03-04"));
    assert_eq!(stored.status, SickLeaveStatus::Active);

    let err = app
        .services
        .sick_leave_commands
        .cancel_sick_leave(&admin(), CancelSickLeaveCommand {
            id: existing.0,
            meta: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Infrastructure(_)));
    assert_eq!(
        app.store.sick_leave(existing).unwrap().status,
        SickLeaveStatus::Active
    );
    assert!(app.store.audit_entries().is_empty());
}

#[tokio::test]
async fn get_resolves_people_and_reports_missing_ids() {
    let app = test_app();
    let employee = app
        .store
        .seed_employee(EmployeeBuilder::new("P1001").name("Jonas", "Weber").build());
    let id = app
        .store
        .seed_sick_leave(SickLeaveBuilder::new(employee, "2025-03-01", "2025-03-04").build());

    let dto = app
        .services
        .sick_leave_queries
        .get_sick_leave(&staff(), GetSickLeaveQuery { id: id.0 })
        .await
        .unwrap();
    assert_eq!(dto.employee.unwrap().last_name, "Weber");
    assert_eq!(dto.created_by.unwrap().id, ADMIN_ID);

    let err = app
        .services
        .sick_leave_queries
        .get_sick_leave(&staff(), GetSickLeaveQuery { id: Uuid::new_v4() })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound(_)));
}

#[tokio::test]
async fn list_filters_while_counts_stay_global() {
    let app = test_app();
    let anna = app
        .store
        .seed_employee(EmployeeBuilder::new("P1001").name("Anna", "Schmidt").build());
    let jonas = app
        .store
        .seed_employee(EmployeeBuilder::new("P1002").name("Jonas", "Weber").build());

    // Today is 2025-03-03.
    let current = app
        .store
        .seed_sick_leave(SickLeaveBuilder::new(anna, "2025-03-01", "2025-03-05").build());
    app.store.seed_sick_leave(
        SickLeaveBuilder::new(anna, "2025-01-10", "2025-01-12")
            .status(SickLeaveStatus::Completed)
            .build(),
    );
    let future = app
        .store
        .seed_sick_leave(SickLeaveBuilder::new(jonas, "2025-03-10", "2025-03-11").build());
    app.store.seed_sick_leave(
        SickLeaveBuilder::new(jonas, "2025-02-01", "2025-02-02")
            .status(SickLeaveStatus::Cancelled)
            .notes("entered twice")
            .build(),
    );

    let queries = &app.services.sick_leave_queries;

    let all = queries
        .list_sick_leaves(&staff(), ListSickLeavesQuery::default())
        .await
        .unwrap();
    assert_eq!(all.meta.total, 4);
    assert_eq!(all.items[0].id, future.0, "newest start date first");
    assert_eq!(
        (all.counts.active, all.counts.completed, all.counts.cancelled, all.counts.total),
        (2, 1, 1, 4)
    );

    let active = queries
        .list_sick_leaves(&staff(), ListSickLeavesQuery {
            status: Some("active".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(active.meta.total, 2);
    assert_eq!(active.counts.total, 4);
    assert_eq!(active.meta.filter.status.as_deref(), Some("active"));

    let now = queries
        .list_sick_leaves(&staff(), ListSickLeavesQuery {
            period: Some("current".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(now.items.len(), 1);
    assert_eq!(now.items[0].id, current.0);

    let upcoming = queries
        .list_sick_leaves(&staff(), ListSickLeavesQuery {
            period: Some("future".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(upcoming.items.len(), 1);
    assert_eq!(upcoming.items[0].id, future.0);

    let by_name = queries
        .list_sick_leaves(&staff(), ListSickLeavesQuery {
            search: Some("WEBER".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_name.meta.total, 2);

    let by_notes = queries
        .list_sick_leaves(&staff(), ListSickLeavesQuery {
            search: Some("twice".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_notes.meta.total, 1);

    let limited = queries
        .list_sick_leaves(&staff(), ListSickLeavesQuery {
            employee_id: Some(anna.to_string()),
            limit: Some(1),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(limited.meta.total, 2);
    assert_eq!(limited.meta.count, 1);
    assert_eq!(limited.items[0].id, current.0);
}

#[tokio::test]
async fn explicit_date_bounds_are_inclusive() {
    let app = test_app();
    let employee = app.store.seed_employee(EmployeeBuilder::new("P1001").build());
    app.store
        .seed_sick_leave(SickLeaveBuilder::new(employee, "2025-02-01", "2025-02-05").build());
    app.store
        .seed_sick_leave(SickLeaveBuilder::new(employee, "2025-02-10", "2025-02-14").build());

    let list = app
        .services
        .sick_leave_queries
        .list_sick_leaves(&staff(), ListSickLeavesQuery {
            start_date: Some("2025-02-01".into()),
            end_date: Some("2025-02-05".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(list.items.len(), 1);
    assert_eq!(list.items[0].end_date, date("2025-02-05"));
}

#[tokio::test]
async fn malformed_list_filters_are_field_errors() {
    let app = test_app();
    let err = app
        .services
        .sick_leave_queries
        .list_sick_leaves(&staff(), ListSickLeavesQuery {
            status: Some("open".into()),
            period: Some("tomorrow".into()),
            start_date: Some("01.02.2025".into()),
            ..Default::default()
        })
        .await
        .unwrap_err();

    match err {
        ApplicationError::FieldErrors(errors) => {
            for field in ["status", "period", "startDate"] {
                assert!(errors.contains(field), "{field}");
            }
        }
        other => panic!("expected field errors, got {other:?}"),
    }
}

#[tokio::test]
async fn legacy_status_names_filter_too() {
    let app = test_app();
    let employee = app.store.seed_employee(EmployeeBuilder::new("P1001").build());
    let id: SickLeaveId = app.store.seed_sick_leave(
        SickLeaveBuilder::new(employee, "2025-02-01", "2025-02-05")
            .status(SickLeaveStatus::Cancelled)
            .build(),
    );

    let list = app
        .services
        .sick_leave_queries
        .list_sick_leaves(&staff(), ListSickLeavesQuery {
            status: Some("storniert".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(list.items.len(), 1);
    assert_eq!(list.items[0].id, id.0);
}
