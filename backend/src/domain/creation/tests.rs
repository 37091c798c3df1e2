//! Tests for the probe-then-persist gate.

use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ExistenceOutcome;
use crate::domain::ProbeCancelled;
use crate::domain::ports::MockExistenceProbe;
use rstest::rstest;

fn gate_with(parent: ParentKind, outcome: Result<ExistenceOutcome, ProbeCancelled>) -> CreationGate<MockExistenceProbe> {
    let mut probe = MockExistenceProbe::new();
    probe.expect_parent().return_const(parent);
    probe
        .expect_probe()
        .times(1)
        .return_once(move |_, _| outcome);
    CreationGate::new(Arc::new(probe))
}

async fn run(gate: &CreationGate<MockExistenceProbe>, calls: &AtomicUsize) -> Result<i32, CreationError> {
    gate.create(5, &CancellationToken::new(), || async {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(42)
    })
    .await
}

#[tokio::test]
async fn confirmed_parent_persists_once() {
    let gate = gate_with(ParentKind::User, Ok(ExistenceOutcome::Confirmed));
    let calls = AtomicUsize::new(0);

    let created = run(&gate, &calls).await.expect("creation proceeds");

    assert_eq!(created, 42);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[rstest]
#[case::not_found(
    Ok(ExistenceOutcome::NotFound),
    CreationError::ParentNotFound { parent: ParentKind::Project, parent_id: 5 }
)]
#[case::timed_out(
    Ok(ExistenceOutcome::Unavailable(Unavailability::TimedOut)),
    CreationError::ParentUnavailable {
        parent: ParentKind::Project,
        parent_id: 5,
        reason: Unavailability::TimedOut,
    }
)]
#[case::server_error(
    Ok(ExistenceOutcome::Unavailable(Unavailability::UnexpectedStatus(500))),
    CreationError::ParentUnavailable {
        parent: ParentKind::Project,
        parent_id: 5,
        reason: Unavailability::UnexpectedStatus(500),
    }
)]
#[case::cancelled(Err(ProbeCancelled), CreationError::Cancelled { parent: ParentKind::Project })]
#[tokio::test]
async fn rejections_never_persist(
    #[case] outcome: Result<ExistenceOutcome, ProbeCancelled>,
    #[case] expected: CreationError,
) {
    let gate = gate_with(ParentKind::Project, outcome);
    let calls = AtomicUsize::new(0);

    let err = run(&gate, &calls).await.expect_err("creation is rejected");

    assert_eq!(err, expected);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn store_failures_surface_as_persistence_errors() {
    let gate = gate_with(ParentKind::User, Ok(ExistenceOutcome::Confirmed));

    let err = gate
        .create(1, &CancellationToken::new(), || async {
            Err::<(), _>(RecordStoreError::query("insert failed"))
        })
        .await
        .expect_err("store failure propagates");

    assert_eq!(
        err,
        CreationError::Persistence(RecordStoreError::query("insert failed"))
    );
}

#[rstest]
fn not_found_maps_to_invalid_request_with_field_details() {
    let err: Error = CreationError::ParentNotFound {
        parent: ParentKind::User,
        parent_id: 999,
    }
    .into();

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), "Owner user does not exist.");
    assert_eq!(
        err.details(),
        Some(&json!({
            "field": "ownerUserId",
            "code": "parent_not_found",
            "parentId": 999,
        }))
    );
}

#[rstest]
#[case(Unavailability::TimedOut, 408, "timeout")]
#[case(Unavailability::UnexpectedStatus(500), 500, "unexpected_status")]
#[case(Unavailability::Transport("connection refused".to_owned()), 503, "transport")]
fn unavailable_maps_to_service_unavailable(
    #[case] reason: Unavailability,
    #[case] status: u16,
    #[case] code: &str,
) {
    let err: Error = CreationError::ParentUnavailable {
        parent: ParentKind::Project,
        parent_id: 3,
        reason,
    }
    .into();

    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    assert_eq!(
        err.message(),
        format!("Project service returned {status} while validating projectId.")
    );
    assert_eq!(
        err.details(),
        Some(&json!({ "upstreamStatus": status, "reason": code }))
    );
}

#[rstest]
#[case(CreationError::Cancelled { parent: ParentKind::User }, ErrorCode::ServiceUnavailable)]
#[case(
    CreationError::Persistence(RecordStoreError::connection("pool exhausted")),
    ErrorCode::InternalError
)]
fn remaining_failures_map_to_codes(#[case] err: CreationError, #[case] expected: ErrorCode) {
    assert_eq!(Error::from(err).code(), expected);
}
