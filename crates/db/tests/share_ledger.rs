//! Integration tests for `ShareRepo`: atomic fan-out, offer
//! idempotency, acceptance transitions, and the adoption join.

use bigrocks_core::objective::ObjectiveKind;
use bigrocks_core::share::Acceptance;
use bigrocks_core::types::DbId;
use bigrocks_db::models::objective::CreateObjective;
use bigrocks_db::models::user::CreateUser;
use bigrocks_db::repositories::{ObjectiveRepo, ShareRepo, UserRepo};
use sqlx::PgPool;

fn new_user(name: &str, level: i32, manager_id: Option<DbId>) -> CreateUser {
    CreateUser {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        password_hash: "x".to_string(),
        title: None,
        level,
        manager_id,
        admin: false,
        verification_token_hash: None,
    }
}

fn new_objective(owner: DbId, name: &str, kind: ObjectiveKind) -> CreateObjective {
    CreateObjective {
        name: name.to_string(),
        kind,
        description: None,
        metric: None,
        strategic_priority_id: None,
        parent_id: None,
        owner_user_id: owner,
        received_from_user_id: None,
        approved: false,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_fan_out_creates_event_and_recipients(pool: PgPool) {
    let sender = UserRepo::create(&pool, &new_user("sender", 2, None)).await.unwrap();
    let a = UserRepo::create(&pool, &new_user("a", 3, Some(sender.id))).await.unwrap();
    let b = UserRepo::create(&pool, &new_user("b", 3, Some(sender.id))).await.unwrap();
    let objective = ObjectiveRepo::create(
        &pool,
        &new_objective(sender.id, "Rock", ObjectiveKind::BigRock),
    )
    .await
    .unwrap();

    let (event, recipients) =
        ShareRepo::create_event_with_recipients(&pool, objective.id, sender.id, &[a.id, b.id])
            .await
            .unwrap()
            .expect("new recipients should be covered");

    assert_eq!(event.objective_id, objective.id);
    assert_eq!(recipients.len(), 2);
    assert!(recipients.iter().all(|r| r.acceptance() == Acceptance::Pending));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_offer_rolls_back_without_orphan_event(pool: PgPool) {
    let sender = UserRepo::create(&pool, &new_user("sender", 2, None)).await.unwrap();
    let a = UserRepo::create(&pool, &new_user("a", 3, Some(sender.id))).await.unwrap();
    let objective = ObjectiveRepo::create(
        &pool,
        &new_objective(sender.id, "Rock", ObjectiveKind::BigRock),
    )
    .await
    .unwrap();

    ShareRepo::create_event_with_recipients(&pool, objective.id, sender.id, &[a.id])
        .await
        .unwrap()
        .unwrap();

    // Second offer to the same recipient: nothing new, no event left behind.
    let second =
        ShareRepo::create_event_with_recipients(&pool, objective.id, sender.id, &[a.id])
            .await
            .unwrap();
    assert!(second.is_none());

    let events: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM share_events")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(events.0, 1);
    let rows: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM share_recipients")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows.0, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_partial_overlap_only_covers_new_recipients(pool: PgPool) {
    let sender = UserRepo::create(&pool, &new_user("sender", 2, None)).await.unwrap();
    let a = UserRepo::create(&pool, &new_user("a", 2, None)).await.unwrap();
    let b = UserRepo::create(&pool, &new_user("b", 2, None)).await.unwrap();
    let c = UserRepo::create(&pool, &new_user("c", 2, None)).await.unwrap();
    let objective = ObjectiveRepo::create(
        &pool,
        &new_objective(sender.id, "Rock", ObjectiveKind::BigRock),
    )
    .await
    .unwrap();

    ShareRepo::create_event_with_recipients(&pool, objective.id, sender.id, &[a.id, b.id])
        .await
        .unwrap()
        .unwrap();
    let (_, second) =
        ShareRepo::create_event_with_recipients(&pool, objective.id, sender.id, &[b.id, c.id])
            .await
            .unwrap()
            .unwrap();

    // B was already covered; only C lands the second time.
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].to_user_id, c.id);

    let mut offered = ShareRepo::recipients_already_offered(&pool, objective.id, sender.id)
        .await
        .unwrap();
    offered.sort();
    let mut expected = vec![a.id, b.id, c.id];
    expected.sort();
    assert_eq!(offered, expected);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_acceptance_is_terminal(pool: PgPool) {
    let sender = UserRepo::create(&pool, &new_user("sender", 2, None)).await.unwrap();
    let a = UserRepo::create(&pool, &new_user("a", 3, Some(sender.id))).await.unwrap();
    let objective = ObjectiveRepo::create(
        &pool,
        &new_objective(sender.id, "Rock", ObjectiveKind::BigRock),
    )
    .await
    .unwrap();
    let (_, recipients) =
        ShareRepo::create_event_with_recipients(&pool, objective.id, sender.id, &[a.id])
            .await
            .unwrap()
            .unwrap();
    let recipient_id = recipients[0].id;

    assert!(ShareRepo::set_acceptance(&pool, recipient_id, Acceptance::Accepted)
        .await
        .unwrap());
    // Re-asserting the same terminal state is a no-op success.
    assert!(ShareRepo::set_acceptance(&pool, recipient_id, Acceptance::Accepted)
        .await
        .unwrap());
    // Flipping to the other terminal state does not match.
    assert!(!ShareRepo::set_acceptance(&pool, recipient_id, Acceptance::Ignored)
        .await
        .unwrap());

    let row = ShareRepo::find_recipient(&pool, recipient_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.acceptance(), Acceptance::Accepted);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_event_join_carries_parent_priority(pool: PgPool) {
    let sender = UserRepo::create(&pool, &new_user("sender", 2, None)).await.unwrap();
    let a = UserRepo::create(&pool, &new_user("a", 3, Some(sender.id))).await.unwrap();

    let parent_priority: (DbId,) = sqlx::query_as(
        "INSERT INTO strategic_priorities (name) VALUES ('Growth') RETURNING id",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    let own_priority: (DbId,) = sqlx::query_as(
        "INSERT INTO strategic_priorities (name) VALUES ('Quality') RETURNING id",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    let mut rock = new_objective(sender.id, "Rock", ObjectiveKind::BigRock);
    rock.strategic_priority_id = Some(parent_priority.0);
    let rock = ObjectiveRepo::create(&pool, &rock).await.unwrap();

    let mut init = new_objective(sender.id, "Init", ObjectiveKind::RiskCriticalInitiative);
    init.parent_id = Some(rock.id);
    init.strategic_priority_id = Some(own_priority.0);
    let init = ObjectiveRepo::create(&pool, &init).await.unwrap();

    let (event, _) =
        ShareRepo::create_event_with_recipients(&pool, init.id, sender.id, &[a.id])
            .await
            .unwrap()
            .unwrap();

    let joined = ShareRepo::find_event_with_objective(&pool, event.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(joined.objective_kind, "risk_critical_initiative");
    assert_eq!(joined.objective_strategic_priority_id, Some(own_priority.0));
    assert_eq!(joined.parent_strategic_priority_id, Some(parent_priority.0));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_incoming_and_outgoing_views(pool: PgPool) {
    let sender = UserRepo::create(&pool, &new_user("sender", 2, None)).await.unwrap();
    let peer = UserRepo::create(&pool, &new_user("peer", 2, None)).await.unwrap();
    let objective = ObjectiveRepo::create(
        &pool,
        &new_objective(sender.id, "Rock", ObjectiveKind::BigRock),
    )
    .await
    .unwrap();
    let (_, recipients) =
        ShareRepo::create_event_with_recipients(&pool, objective.id, sender.id, &[peer.id])
            .await
            .unwrap()
            .unwrap();

    let incoming = ShareRepo::list_incoming(&pool, peer.id, &[]).await.unwrap();
    assert_eq!(incoming.len(), 1);
    assert_eq!(incoming[0].objective_name, "Rock");
    assert_eq!(incoming[0].from_user_name, "sender");

    // Excluding the sender hides their offers.
    assert!(ShareRepo::list_incoming(&pool, peer.id, &[sender.id])
        .await
        .unwrap()
        .is_empty());

    ShareRepo::set_acceptance(&pool, recipients[0].id, Acceptance::Ignored)
        .await
        .unwrap();
    // A decided offer drops out of the pending view.
    assert!(ShareRepo::list_incoming(&pool, peer.id, &[]).await.unwrap().is_empty());

    let outgoing = ShareRepo::list_outgoing(&pool, sender.id).await.unwrap();
    assert_eq!(outgoing.len(), 1);
    assert_eq!(outgoing[0].to_user_name, "peer");
    assert_eq!(outgoing[0].accepted, "ignored");
}
