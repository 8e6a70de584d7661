mod common;

use anyhow::Result;
use axum::http::StatusCode;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let app = common::spawn_app()?;

    let res = app.get("/health", None).await?;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["success"], true);
    assert_eq!(res.body["data"]["database"], "ok");
    Ok(())
}

#[tokio::test]
async fn root_describes_service() -> Result<()> {
    let app = common::spawn_app()?;

    let res = app.get("/", None).await?;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["name"], "Course API");
    Ok(())
}

#[tokio::test]
async fn unknown_route_is_404() -> Result<()> {
    let app = common::spawn_app()?;

    let res = app.get("/api/nothing-here", None).await?;

    assert_eq!(res.status, StatusCode::NOT_FOUND);
    Ok(())
}
