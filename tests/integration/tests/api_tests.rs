//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variable: DATABASE_URL
//!
//! Run with: cargo test -p integration-tests --test api_tests

use duck_core::DuckId;
use duck_service::RunOutcome;
use futures_util::future::join_all;
use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, lock_ranks, TestServer,
};
use reqwest::StatusCode;

async fn create_duck(server: &TestServer, token: &str) -> DuckBody {
    let response = server
        .post_auth("/api/duck", token, &CreateDuckPayload::unique())
        .await
        .expect("Request failed");
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

fn reaction_path(duck_id: i64, kind: &str) -> String {
    format!("/api/duck/{duck_id}/reaction/{kind}")
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"]["database"], "healthy");
}

// ============================================================================
// Duck Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_list_ducks() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = server.create_user().await.unwrap();

    let payload = CreateDuckPayload::unique();
    let response = server
        .post_auth("/api/duck", &owner.token, &payload)
        .await
        .unwrap();
    let duck: DuckBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(duck.name, payload.name);
    assert_eq!(duck.image, payload.image);
    assert_eq!(duck.owner_id, owner.id.into_inner());
    assert_eq!((duck.likes_count, duck.dislikes_count, duck.rank), (0, 0, 0));
    let owner_body = duck.owner.as_ref().expect("owner embedded");
    assert_eq!(owner_body.id, owner.id.into_inner());
    assert_eq!(owner_body.display_name.as_deref(), Some(owner.display_name.as_str()));

    let response = server.get("/api/ducks").await.unwrap();
    let all: Vec<DuckBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(all.iter().any(|d| d.id == duck.id));

    let second = create_duck(&server, &owner.token).await;
    let response = server
        .get(&format!("/api/user/{}/ducks", owner.id))
        .await
        .unwrap();
    let mine: Vec<DuckBody> = assert_json(response, StatusCode::OK).await.unwrap();
    let ids: Vec<i64> = mine.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![second.id, duck.id], "newest first");

    server.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_create_duck_requires_auth() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .post("/api/duck", &CreateDuckPayload::unique())
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "MISSING_AUTHORIZATION");
}

#[tokio::test]
async fn test_remove_duck() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = server.create_user().await.unwrap();
    let stranger = server.create_user().await.unwrap();
    let duck = create_duck(&server, &owner.token).await;
    let path = format!("/api/duck/{}", duck.id);

    // Someone else's duck looks like a missing one
    let response = server.delete_auth(&path, &stranger.token).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(body.error.code, "UNKNOWN_DUCK");

    let response = server.delete_auth(&path, &owner.token).await.unwrap();
    let body: MessageBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.message, "Duck removed");

    let response = server.get("/api/ducks").await.unwrap();
    let all: Vec<DuckBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(all.iter().all(|d| d.id != duck.id));

    // Removed ducks can no longer collect reactions
    let response = server
        .put_auth(&reaction_path(duck.id, "like"), &stranger.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    server.cleanup().await.unwrap();
}

// ============================================================================
// Reaction Tests
// ============================================================================

#[tokio::test]
async fn test_reaction_toggle() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = server.create_user().await.unwrap();
    let voter = server.create_user().await.unwrap();
    let duck = create_duck(&server, &owner.token).await;

    let response = server
        .put_auth(&reaction_path(duck.id, "like"), &voter.token)
        .await
        .unwrap();
    let liked: ReactionBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(liked.duck_id, duck.id);
    assert_eq!(liked.user_id, voter.id.into_inner());
    assert_eq!(liked.reaction, "like");
    assert_eq!((liked.duck.likes_count, liked.duck.dislikes_count), (1, 0));

    let response = server
        .put_auth(&reaction_path(duck.id, "dislike"), &voter.token)
        .await
        .unwrap();
    let disliked: ReactionBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(disliked.reaction, "dislike");
    assert_eq!((disliked.duck.likes_count, disliked.duck.dislikes_count), (0, 1));

    let response = server
        .put_auth(&reaction_path(duck.id, "dislike"), &voter.token)
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(body.error.code, "ALREADY_REACTED");

    let reactions: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM duck_reactions WHERE duck_id = $1")
            .bind(duck.id)
            .fetch_one(&server.pool)
            .await
            .unwrap();
    assert_eq!(reactions, 1);

    server.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_reaction_errors() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let voter = server.create_user().await.unwrap();

    let response = server
        .put_auth(&reaction_path(i64::from(i32::MAX), "like"), &voter.token)
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(body.error.code, "UNKNOWN_DUCK");

    let response = server
        .put_auth(&reaction_path(1, "love"), &voter.token)
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "INVALID_REACTION");

    server.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_concurrent_reactions_keep_counters_consistent() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = server.create_user().await.unwrap();
    let duck = create_duck(&server, &owner.token).await;

    let mut voters = Vec::new();
    for _ in 0..10 {
        voters.push(server.create_user().await.unwrap());
    }

    let like_path = reaction_path(duck.id, "like");
    let likes = join_all(
        voters
            .iter()
            .map(|v| server.put_auth(&like_path, &v.token)),
    )
    .await;
    for response in likes {
        assert_status(response.unwrap(), StatusCode::OK).await.unwrap();
    }

    // Every voter switches at the same time
    let dislike_path = reaction_path(duck.id, "dislike");
    let dislikes = join_all(
        voters
            .iter()
            .map(|v| server.put_auth(&dislike_path, &v.token)),
    )
    .await;
    for response in dislikes {
        assert_status(response.unwrap(), StatusCode::OK).await.unwrap();
    }

    let (likes, dislikes): (i64, i64) =
        sqlx::query_as("SELECT likes_count, dislikes_count FROM ducks WHERE id = $1")
            .bind(duck.id)
            .fetch_one(&server.pool)
            .await
            .unwrap();
    assert_eq!((likes, dislikes), (0, 10));

    server.cleanup().await.unwrap();
}

// ============================================================================
// Leaderboard Tests
// ============================================================================

#[tokio::test]
async fn test_leaderboard_after_reconciliation() {
    if !check_test_env() {
        return;
    }

    let _ranks = lock_ranks().await;
    let server = TestServer::start().await.expect("Failed to start server");
    let owner = server.create_user().await.unwrap();

    let a = create_duck(&server, &owner.token).await;
    let b = create_duck(&server, &owner.token).await;
    let c = create_duck(&server, &owner.token).await;
    let d = create_duck(&server, &owner.token).await;

    // B beats A on dislikes; D ties A and loses on id
    server.set_counters(DuckId::new(a.id), 10, 2).await.unwrap();
    server.set_counters(DuckId::new(b.id), 10, 1).await.unwrap();
    server.set_counters(DuckId::new(c.id), 3, 0).await.unwrap();
    server.set_counters(DuckId::new(d.id), 10, 2).await.unwrap();

    let outcome = server.reconcile().await;
    assert!(matches!(outcome, RunOutcome::Updated(_)), "{outcome:?}");

    let response = server
        .get(&format!("/api/user/{}/ducks", owner.id))
        .await
        .unwrap();
    let mine: Vec<DuckBody> = assert_json(response, StatusCode::OK).await.unwrap();
    let rank_of = |id: i64| {
        mine.iter()
            .find(|duck| duck.id == id)
            .map(|duck| duck.rank)
            .expect("duck listed")
    };

    assert!(rank_of(b.id) > 0);
    assert!(rank_of(b.id) < rank_of(a.id));
    assert!(rank_of(a.id) < rank_of(d.id));
    assert!(rank_of(d.id) < rank_of(c.id));

    let response = server.get("/api/leaderboard").await.unwrap();
    let board: Vec<DuckBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(board.len() <= 100);
    assert!(board.iter().all(|duck| duck.rank > 0));
    assert!(board.windows(2).all(|pair| pair[0].rank < pair[1].rank));

    server.cleanup().await.unwrap();
}

// ============================================================================
// Profile Tests
// ============================================================================

#[tokio::test]
async fn test_profile_and_rename() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = server.create_user().await.unwrap();
    let duck = create_duck(&server, &user.token).await;

    let response = server.get_auth("/api/user", &user.token).await.unwrap();
    let profile: UserBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(profile.id, user.id.into_inner());
    assert_eq!(profile.display_name.as_deref(), Some(user.display_name.as_str()));

    let rename = UpdateNamePayload {
        name: "  Daisy  ".to_string(),
    };
    let response = server
        .put_auth_json("/api/user/name", &user.token, &rename)
        .await
        .unwrap();
    let renamed: UserBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(renamed.display_name.as_deref(), Some("Daisy"));

    // Ducks show the new owner name
    let response = server
        .get(&format!("/api/user/{}/ducks", user.id))
        .await
        .unwrap();
    let mine: Vec<DuckBody> = assert_json(response, StatusCode::OK).await.unwrap();
    let listed = mine.iter().find(|d| d.id == duck.id).expect("duck listed");
    assert_eq!(
        listed.owner.as_ref().and_then(|o| o.display_name.as_deref()),
        Some("Daisy")
    );

    let blank = UpdateNamePayload {
        name: "   ".to_string(),
    };
    let response = server
        .put_auth_json("/api/user/name", &user.token, &blank)
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "VALIDATION_ERROR");

    server.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_profile_of_deleted_account() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = server.create_user().await.unwrap();

    sqlx::query("UPDATE users SET deleted_at = NOW() WHERE id = $1")
        .bind(user.id.into_inner())
        .execute(&server.pool)
        .await
        .unwrap();

    // The token is still valid but the account is gone
    let response = server.get_auth("/api/user", &user.token).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(body.error.code, "UNKNOWN_USER");

    server.cleanup().await.unwrap();
}
