use anyhow::Result;
use http::StatusCode;
use log::warn;
use s3put_aws_v4::{Config, StaticCredentialProvider, Uploader};
use s3put_core::{Context, ErrorKind};
use s3put_http_send_reqwest::ReqwestHttpSend;
use std::env;

/// Build an uploader against a real bucket.
///
/// Returns `None` unless `S3PUT_AWS_V4_TEST` is `on`.
fn init_live_uploader() -> Option<(Uploader, Config)> {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = dotenv::dotenv();

    if env::var("S3PUT_AWS_V4_TEST").unwrap_or_default() != "on" {
        return None;
    }

    let config = Config {
        bucket: Some(env::var("S3PUT_AWS_V4_BUCKET").expect("S3PUT_AWS_V4_BUCKET must be set")),
        region: Some(env::var("S3PUT_AWS_V4_REGION").expect("S3PUT_AWS_V4_REGION must be set")),
        ..Default::default()
    };
    let access_key =
        env::var("S3PUT_AWS_V4_ACCESS_KEY").expect("S3PUT_AWS_V4_ACCESS_KEY must be set");
    let secret_key =
        env::var("S3PUT_AWS_V4_SECRET_KEY").expect("S3PUT_AWS_V4_SECRET_KEY must be set");

    let ctx = Context::new().with_http_send(ReqwestHttpSend::default());
    let uploader = Uploader::new(
        ctx,
        &config,
        StaticCredentialProvider::new(&access_key, &secret_key),
    )
    .expect("config must be valid");

    Some((uploader, config))
}

#[tokio::test]
async fn test_live_put_object() -> Result<()> {
    let Some((uploader, config)) = init_live_uploader() else {
        warn!("S3PUT_AWS_V4_TEST is not set, skipped");
        return Ok(());
    };

    let key = format!("s3put-test/{}.txt", chrono::Utc::now().timestamp_millis());
    let output = uploader
        .put_object(&key, "Hello, World!", Some("text/plain"))
        .await?;

    assert_eq!(output.status, StatusCode::OK);
    assert!(output.url.starts_with(&format!("https://{}", config.host()?)));
    Ok(())
}

#[tokio::test]
async fn test_live_put_object_with_wrong_secret() -> Result<()> {
    let Some((_, config)) = init_live_uploader() else {
        warn!("S3PUT_AWS_V4_TEST is not set, skipped");
        return Ok(());
    };

    let ctx = Context::new().with_http_send(ReqwestHttpSend::default());
    let uploader = Uploader::new(
        ctx,
        &config,
        StaticCredentialProvider::new("AKIAEXAMPLE", "definitely-not-the-secret"),
    )?;

    let err = uploader
        .put_object("s3put-test/rejected.txt", "nope", None)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::UploadRejected);
    assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
    Ok(())
}
