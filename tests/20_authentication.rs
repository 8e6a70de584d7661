mod common;

use anyhow::Result;
use axum::http::{header, StatusCode};
use base64::{engine::general_purpose::STANDARD, Engine as _};

use common::basic;

#[tokio::test]
async fn valid_credentials_resolve_the_user() -> Result<()> {
    let app = common::spawn_app()?;
    let id = app.seed_user("Alice", "alice@example.com", "pw:123").await?;

    let res = app
        .get("/api/users", Some(&basic("alice@example.com", "pw:123")))
        .await?;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["id"], id);
    assert_eq!(res.body["data"]["firstName"], "Alice");
    assert_eq!(res.body["data"]["email"], "alice@example.com");
    assert!(res.body["data"].get("password").is_none());
    assert!(res.body["data"].get("passwordHash").is_none());
    Ok(())
}

#[tokio::test]
async fn missing_header_is_rejected_with_challenge() -> Result<()> {
    let app = common::spawn_app()?;

    let res = app.get("/api/users", None).await?;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body["message"], "Access Denied");
    assert_eq!(
        res.headers.get(header::WWW_AUTHENTICATE).unwrap(),
        "Basic realm=\"courses\", charset=\"UTF-8\""
    );
    Ok(())
}

#[tokio::test]
async fn every_failure_looks_the_same() -> Result<()> {
    let app = common::spawn_app()?;
    app.seed_user("Alice", "alice@example.com", "pw123").await?;

    let missing = app.get("/api/users", None).await?;

    let not_base64 = "Basic not-base64!!".to_string();
    let no_colon = format!("Basic {}", STANDARD.encode("alice@example.com"));
    let wrong_scheme = format!("Bearer {}", STANDARD.encode("alice@example.com:pw123"));
    let unknown_user = basic("bob@example.com", "pw123");
    let wrong_secret = basic("alice@example.com", "pw124");
    let wrong_case = basic("ALICE@example.com", "pw123");

    for attempt in [not_base64, no_colon, wrong_scheme, unknown_user, wrong_secret, wrong_case] {
        let res = app.get("/api/users", Some(&attempt)).await?;
        assert_eq!(res.status, StatusCode::UNAUTHORIZED, "attempt: {}", attempt);
        assert_eq!(res.body, missing.body, "attempt: {}", attempt);
        assert_eq!(
            res.headers.get(header::WWW_AUTHENTICATE),
            missing.headers.get(header::WWW_AUTHENTICATE)
        );
    }
    Ok(())
}

#[tokio::test]
async fn credentials_are_checked_on_every_request() -> Result<()> {
    let app = common::spawn_app()?;
    app.seed_user("Alice", "alice@example.com", "pw123").await?;

    let ok = app.get("/api/users", Some(&basic("alice@example.com", "pw123"))).await?;
    assert_eq!(ok.status, StatusCode::OK);

    // A prior success grants nothing to a later request
    let res = app.get("/api/users", None).await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn public_reads_ignore_bad_credentials() -> Result<()> {
    let app = common::spawn_app()?;

    let res = app.get("/api/courses", Some("Basic not-base64!!")).await?;

    assert_eq!(res.status, StatusCode::OK);
    Ok(())
}
