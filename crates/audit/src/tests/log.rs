// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Action, Actor, ActorKind, AuditLog, Cause, StateSnapshot};
use bloc_planning_domain::StaffId;
use serde_json::json;

fn record_transfer(log: &mut AuditLog, subject: &str) -> u64 {
    log.record(
        subject,
        Actor::staff(&StaffId::new("dupont")),
        Cause::new(String::from("req-1"), String::from("Transfer request")),
        Action::new(String::from("ExecuteTransfer"), None),
        StateSnapshot::new(json!({ "remaining": 10 })),
        StateSnapshot::new(json!({ "remaining": 7 })),
    )
}

#[test]
fn test_staff_actor_uses_staff_id() {
    let actor: Actor = Actor::staff(&StaffId::new(" dupont "));

    assert_eq!(actor.id, "dupont");
    assert_eq!(actor.kind, ActorKind::Staff);
    assert_eq!(Actor::system().kind.as_str(), "SYSTEM");
}

#[test]
fn test_sequence_numbers_start_at_one_and_increase() {
    let mut log: AuditLog = AuditLog::new();

    assert!(log.is_empty());
    assert_eq!(record_transfer(&mut log, "t-1"), 1);
    assert_eq!(record_transfer(&mut log, "t-2"), 2);
    assert_eq!(log.len(), 2);
}

#[test]
fn test_for_subject_filters_in_order() {
    let mut log: AuditLog = AuditLog::new();
    record_transfer(&mut log, "t-1");
    record_transfer(&mut log, "t-2");
    record_transfer(&mut log, "t-1");

    let sequences: Vec<u64> = log.for_subject("t-1").map(|e| e.sequence).collect();

    assert_eq!(sequences, vec![1, 3]);
}

#[test]
fn test_capture_serializes_state() {
    #[derive(serde::Serialize)]
    struct Balance {
        remaining: u32,
    }

    let snapshot: StateSnapshot = StateSnapshot::capture(&Balance { remaining: 4 }).unwrap();

    assert_eq!(snapshot.data, json!({ "remaining": 4 }));
}

#[test]
fn test_event_json_shape() {
    let mut log: AuditLog = AuditLog::new();
    record_transfer(&mut log, "t-1");

    let json: serde_json::Value = serde_json::to_value(&log.events()[0]).unwrap();

    assert_eq!(json["sequence"], 1);
    assert_eq!(json["actor"]["kind"], "STAFF");
    assert_eq!(json["action"]["name"], "ExecuteTransfer");
    assert!(json["action"].get("details").is_none());
    assert_eq!(json["before"]["remaining"], 10);
    assert_eq!(json["after"]["remaining"], 7);
}
