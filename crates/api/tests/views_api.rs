//! HTTP-level integration tests for the grouped read views and the
//! strategic priority taxonomy.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_user, delete_auth, get_auth, post_json_auth, put_json_auth, token_for};
use sqlx::PgPool;

async fn create_objective(
    pool: &PgPool,
    token: &str,
    name: &str,
    kind: &str,
    parent_id: Option<i64>,
) -> i64 {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/objectives",
        token,
        serde_json::json!({ "name": name, "type": kind, "parent_id": parent_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

/// /health is public and reports database reachability.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_health_endpoint(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
    assert!(json["version"].is_string());
}

// ---------------------------------------------------------------------------
// Own objectives view
// ---------------------------------------------------------------------------

/// /objectives groups child initiatives under their Big Rock, leaves
/// unattached initiatives in orphans, and lists outgoing shares.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_objectives_view_shape(pool: PgPool) {
    let owner = create_user(&pool, "Owner", 2, None, false).await;
    let peer = create_user(&pool, "Peer", 2, None, false).await;
    let token = token_for(&owner);

    let rock = create_objective(&pool, &token, "Rock", "big_rock", None).await;
    let child =
        create_objective(&pool, &token, "Child", "risk_critical_initiative", Some(rock)).await;
    let stray =
        create_objective(&pool, &token, "Stray", "risk_critical_initiative", None).await;

    let app = common::build_test_app(pool.clone());
    let share = post_json_auth(
        app,
        &format!("/api/v1/objectives/{rock}/share"),
        &token,
        serde_json::json!({ "recipient_ids": [peer.id] }),
    )
    .await;
    assert_eq!(share.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/objectives", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    let view = &json["data"];
    assert_eq!(view["objectives"]["groups"].as_array().unwrap().len(), 1);
    assert_eq!(view["objectives"]["groups"][0]["root"]["id"], rock);
    assert_eq!(view["objectives"]["groups"][0]["children"][0]["id"], child);
    assert_eq!(view["objectives"]["orphans"][0]["id"], stray);

    let outgoing = view["outgoing_shares"].as_array().unwrap();
    assert_eq!(outgoing.len(), 1);
    assert_eq!(outgoing[0]["to_user_name"], "Peer");
    assert_eq!(outgoing[0]["accepted"], "pending");
}

// ---------------------------------------------------------------------------
// Team rollup
// ---------------------------------------------------------------------------

/// /team covers transitive reports, keeps hierarchies owner-scoped, and
/// excludes the viewer's own objectives.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_team_rollup(pool: PgPool) {
    let mgr = create_user(&pool, "Mgr", 1, None, false).await;
    let report = create_user(&pool, "Report", 2, Some(mgr.id), false).await;
    let sub_report = create_user(&pool, "Sub Report", 3, Some(report.id), false).await;
    let mgr_token = token_for(&mgr);

    create_objective(&pool, &mgr_token, "Own Rock", "big_rock", None).await;
    let report_rock =
        create_objective(&pool, &token_for(&report), "Report Rock", "big_rock", None).await;
    // The sub-report's initiative points at the report's rock; different
    // owner, so it must not attach in the rollup.
    create_objective(
        &pool,
        &token_for(&sub_report),
        "Sub Init",
        "risk_critical_initiative",
        Some(report_rock),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/team", &mgr_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    let groups = json["data"]["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 1, "only the report's rock is a root");
    assert_eq!(groups[0]["root"]["owner_name"], "Report");
    assert!(groups[0]["children"].as_array().unwrap().is_empty());
    assert_eq!(json["data"]["orphans"][0]["owner_name"], "Sub Report");

    // A leaf employee has no team.
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/team", &token_for(&sub_report)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Share views
// ---------------------------------------------------------------------------

/// /shares/incoming shows only pending offers; a decision removes the
/// row from the view.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_incoming_shows_pending_only(pool: PgPool) {
    let owner = create_user(&pool, "Owner", 2, None, false).await;
    let peer = create_user(&pool, "Peer", 2, None, false).await;
    let token = token_for(&owner);
    let rock = create_objective(&pool, &token, "Rock", "big_rock", None).await;

    let app = common::build_test_app(pool.clone());
    post_json_auth(
        app,
        &format!("/api/v1/objectives/{rock}/share"),
        &token,
        serde_json::json!({ "recipient_ids": [peer.id] }),
    )
    .await;

    let peer_token = token_for(&peer);
    let app = common::build_test_app(pool.clone());
    let before = get_auth(app, "/api/v1/shares/incoming", &peer_token).await;
    let json = body_json(before).await;
    let recipient_id = json["data"]["groups"][0]["root"]["recipient_id"].as_i64().unwrap();
    assert_eq!(json["data"]["groups"][0]["root"]["from_user_name"], "Owner");

    let app = common::build_test_app(pool.clone());
    let ignore = post_json_auth(
        app,
        &format!("/api/v1/shares/{recipient_id}/ignore"),
        &peer_token,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(ignore.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool.clone());
    let after = get_auth(app, "/api/v1/shares/incoming", &peer_token).await;
    let json = body_json(after).await;
    assert!(json["data"]["groups"].as_array().unwrap().is_empty());

    // The owner's outgoing list keeps the decided row.
    let app = common::build_test_app(pool);
    let own = get_auth(app, "/api/v1/objectives", &token).await;
    let json = body_json(own).await;
    assert_eq!(json["data"]["outgoing_shares"][0]["accepted"], "ignored");
}

/// /shares/from-manager requires a manager and keeps decided offers
/// visible.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_from_manager_view(pool: PgPool) {
    let mgr = create_user(&pool, "Mgr", 2, None, false).await;
    let report = create_user(&pool, "Report", 3, Some(mgr.id), false).await;
    let mgr_token = token_for(&mgr);
    create_objective(&pool, &mgr_token, "Rock", "big_rock", None).await;

    // No manager: nothing to browse.
    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/shares/from-manager", &mgr_token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool.clone());
    let publish =
        post_json_auth(app, "/api/v1/objectives/publish", &mgr_token, serde_json::json!({})).await;
    assert_eq!(publish.status(), StatusCode::CREATED);

    let report_token = token_for(&report);
    let app = common::build_test_app(pool.clone());
    let cascade = get_auth(app, "/api/v1/shares/from-manager", &report_token).await;
    let json = body_json(cascade).await;
    let recipient_id = json["data"]["groups"][0]["root"]["recipient_id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let adopt = post_json_auth(
        app,
        &format!("/api/v1/shares/{recipient_id}/adopt"),
        &report_token,
        serde_json::json!({ "type": "big_rock" }),
    )
    .await;
    assert_eq!(adopt.status(), StatusCode::CREATED);

    // Still visible after adoption, now marked accepted.
    let app = common::build_test_app(pool);
    let cascade = get_auth(app, "/api/v1/shares/from-manager", &report_token).await;
    let json = body_json(cascade).await;
    assert_eq!(json["data"]["groups"][0]["root"]["accepted"], "accepted");
}

/// Hierarchy traffic stays out of the peer view: an approval request
/// lands in /approvals, a manager's cascade in /shares/from-manager,
/// and neither surfaces in /shares/incoming.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_incoming_excludes_hierarchy_senders(pool: PgPool) {
    let mgr = create_user(&pool, "Mgr", 2, None, false).await;
    let report = create_user(&pool, "Report", 3, Some(mgr.id), false).await;
    let peer = create_user(&pool, "Peer", 2, None, false).await;
    let mgr_token = token_for(&mgr);
    let report_token = token_for(&report);

    create_objective(&pool, &mgr_token, "Mgr Rock", "big_rock", None).await;
    create_objective(&pool, &report_token, "Report Rock", "big_rock", None).await;

    let app = common::build_test_app(pool.clone());
    let request = post_json_auth(
        app,
        "/api/v1/objectives/request-approval",
        &report_token,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(request.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool.clone());
    let publish =
        post_json_auth(app, "/api/v1/objectives/publish", &mgr_token, serde_json::json!({})).await;
    assert_eq!(publish.status(), StatusCode::CREATED);

    // The report's request is not an adoptable peer share for the manager.
    let app = common::build_test_app(pool.clone());
    let json = body_json(get_auth(app, "/api/v1/shares/incoming", &mgr_token).await).await;
    assert!(json["data"]["groups"].as_array().unwrap().is_empty());
    assert!(json["data"]["orphans"].as_array().unwrap().is_empty());

    // Nor is the manager's cascade one for the report.
    let app = common::build_test_app(pool.clone());
    let json = body_json(get_auth(app, "/api/v1/shares/incoming", &report_token).await).await;
    assert!(json["data"]["groups"].as_array().unwrap().is_empty());
    assert!(json["data"]["orphans"].as_array().unwrap().is_empty());

    // Both offers live in their own views.
    let app = common::build_test_app(pool.clone());
    let json = body_json(get_auth(app, "/api/v1/approvals", &mgr_token).await).await;
    assert_eq!(json["data"]["groups"].as_array().unwrap().len(), 1);
    let app = common::build_test_app(pool.clone());
    let json = body_json(get_auth(app, "/api/v1/shares/from-manager", &report_token).await).await;
    assert_eq!(json["data"]["groups"].as_array().unwrap().len(), 1);

    // A genuine peer offer still comes through.
    let peer_token = token_for(&peer);
    let peer_rock = create_objective(&pool, &peer_token, "Peer Rock", "big_rock", None).await;
    let app = common::build_test_app(pool.clone());
    let share = post_json_auth(
        app,
        &format!("/api/v1/objectives/{peer_rock}/share"),
        &peer_token,
        serde_json::json!({ "recipient_ids": [mgr.id] }),
    )
    .await;
    assert_eq!(share.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool);
    let json = body_json(get_auth(app, "/api/v1/shares/incoming", &mgr_token).await).await;
    let groups = json["data"]["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["root"]["from_user_name"], "Peer");
}

// ---------------------------------------------------------------------------
// Strategic priorities
// ---------------------------------------------------------------------------

/// Priority reads are open to everyone; writes are admin-only.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_strategic_priority_crud(pool: PgPool) {
    let admin = create_user(&pool, "Admin", 1, None, true).await;
    let user = create_user(&pool, "Plain", 3, None, false).await;
    let admin_token = token_for(&admin);
    let user_token = token_for(&user);

    let app = common::build_test_app(pool.clone());
    let denied = post_json_auth(
        app,
        "/api/v1/strategic-priorities",
        &user_token,
        serde_json::json!({ "name": "Nope" }),
    )
    .await;
    assert_eq!(denied.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool.clone());
    let created = post_json_auth(
        app,
        "/api/v1/strategic-priorities",
        &admin_token,
        serde_json::json!({ "name": "Growth", "description": "Expand the base" }),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let id = body_json(created).await["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let listed = get_auth(app, "/api/v1/strategic-priorities", &user_token).await;
    assert_eq!(listed.status(), StatusCode::OK);
    let json = body_json(listed).await;
    assert_eq!(json["data"][0]["name"], "Growth");

    let app = common::build_test_app(pool.clone());
    let updated = put_json_auth(
        app,
        &format!("/api/v1/strategic-priorities/{id}"),
        &admin_token,
        serde_json::json!({ "name": "Sustainable Growth" }),
    )
    .await;
    assert_eq!(updated.status(), StatusCode::OK);
    assert_eq!(body_json(updated).await["data"]["name"], "Sustainable Growth");

    let app = common::build_test_app(pool.clone());
    let deleted =
        delete_auth(app, &format!("/api/v1/strategic-priorities/{id}"), &admin_token).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let missing = put_json_auth(
        app,
        &format!("/api/v1/strategic-priorities/{id}"),
        &admin_token,
        serde_json::json!({ "name": "Ghost" }),
    )
    .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

/// An empty priority name is rejected.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_strategic_priority_requires_name(pool: PgPool) {
    let admin = create_user(&pool, "Admin", 1, None, true).await;
    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/strategic-priorities",
        &token_for(&admin),
        serde_json::json!({ "name": "   " }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// A duplicate priority name trips the unique constraint and surfaces
/// as a conflict, not a server error.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_strategic_priority_duplicate_name_conflicts(pool: PgPool) {
    let admin = create_user(&pool, "Admin", 1, None, true).await;
    let token = token_for(&admin);

    let app = common::build_test_app(pool.clone());
    let first = post_json_auth(
        app,
        "/api/v1/strategic-priorities",
        &token,
        serde_json::json!({ "name": "Growth" }),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool);
    let second = post_json_auth(
        app,
        "/api/v1/strategic-priorities",
        &token,
        serde_json::json!({ "name": "Growth" }),
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let json = body_json(second).await;
    assert_eq!(json["code"], "CONFLICT");
}
