mod common;

use anyhow::Result;
use axum::http::{header, Method, StatusCode};
use serde_json::json;

use course_api::database::UserStore;

use common::basic;

#[tokio::test]
async fn sign_up_then_authenticate() -> Result<()> {
    let app = common::spawn_app()?;
    let body = json!({
        "firstName": "Joe",
        "lastName": "Smith",
        "email": "joe@smith.com",
        "password": "joepassword"
    });

    let res = app.request(Method::POST, "/api/users", None, Some(body)).await?;

    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.headers.get(header::LOCATION).unwrap(), "/");
    assert_eq!(res.body["data"]["message"], "Account successfully created!");

    let me = app.get("/api/users", Some(&basic("joe@smith.com", "joepassword"))).await?;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["data"]["lastName"], "Smith");
    Ok(())
}

#[tokio::test]
async fn password_is_stored_hashed() -> Result<()> {
    let app = common::spawn_app()?;
    let body = json!({
        "firstName": "Joe",
        "lastName": "Smith",
        "email": "joe@smith.com",
        "password": "joepassword"
    });

    app.request(Method::POST, "/api/users", None, Some(body)).await?;

    let stored = app.store.find_user_by_email("joe@smith.com").await?.unwrap();
    assert!(stored.password_hash.starts_with("$argon2id$"));
    assert!(!stored.password_hash.contains("joepassword"));
    Ok(())
}

#[tokio::test]
async fn duplicate_email_is_rejected() -> Result<()> {
    let app = common::spawn_app()?;
    app.seed_user("Joe", "joe@smith.com", "first").await?;
    let body = json!({
        "firstName": "Other",
        "lastName": "Joe",
        "email": "joe@smith.com",
        "password": "second"
    });

    let res = app.request(Method::POST, "/api/users", None, Some(body)).await?;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["field_errors"]["email"], "The email you entered already exists");

    // The first account is untouched
    let me = app.get("/api/users", Some(&basic("joe@smith.com", "first"))).await?;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["data"]["firstName"], "Joe");
    Ok(())
}

#[tokio::test]
async fn missing_fields_are_listed() -> Result<()> {
    let app = common::spawn_app()?;

    let res = app
        .request(Method::POST, "/api/users", None, Some(json!({ "firstName": "Joe", "password": "" })))
        .await?;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    let fields = res.body["field_errors"].as_object().unwrap();
    assert!(!fields.contains_key("firstName"));
    assert!(fields.contains_key("lastName"));
    assert!(fields.contains_key("email"));
    assert_eq!(fields["password"], "A password is required");
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_rejected() -> Result<()> {
    let app = common::spawn_app()?;

    let res = app
        .request(Method::POST, "/api/users", None, Some(json!(["not", "an", "object"])))
        .await?;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["code"], "INVALID_JSON");
    Ok(())
}
