use anyhow::{Context as _, Result};
use s3put_aws_v4::{
    Config, ConfigCredentialProvider, EnvCredentialProvider, ProvideCredentialChain, Uploader,
};
use s3put_core::{Context, OsEnv};
use s3put_http_send_reqwest::ReqwestHttpSend;
use std::env;

/// Upload a local file to the bucket configured in the environment.
///
/// ```shell
/// export S3PUT_BUCKET=my-bucket
/// export AWS_REGION=us-east-1
/// export AWS_ACCESS_KEY_ID=...
/// export AWS_SECRET_ACCESS_KEY=...
/// cargo run --example put_file -- ./cat.jpg images/cat.jpg image/jpeg
/// ```
#[tokio::main]
async fn main() -> Result<()> {
    let _ = env_logger::builder().try_init();
    let _ = dotenv::dotenv();

    let mut args = env::args().skip(1);
    let path = args.next().context("usage: put_file <path> <key> [content-type]")?;
    let key = args.next().context("usage: put_file <path> <key> [content-type]")?;
    let content_type = args.next();

    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);
    let config = Config::default().from_env(&ctx);

    let loader = ProvideCredentialChain::new()
        .push(EnvCredentialProvider::new())
        .push(ConfigCredentialProvider::new(config.clone()));
    let uploader = Uploader::new(ctx, &config, loader)?;

    let payload = tokio::fs::read(&path)
        .await
        .with_context(|| format!("failed to read {path}"))?;
    let output = uploader
        .put_object(&key, payload, content_type.as_deref())
        .await?;

    println!("uploaded {path} to {}", output.url);
    Ok(())
}
