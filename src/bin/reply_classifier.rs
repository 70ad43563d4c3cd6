use decision_mail::channels::S3Store;
use decision_mail::config::ReplyConfig;
use decision_mail::pipeline::{StorageEvent, handle_reply_event};
use decision_mail::telemetry;
use lambda_runtime::{Error, LambdaEvent, run, service_fn};

#[tokio::main]
async fn main() -> Result<(), Error> {
    telemetry::init()?;

    let config = ReplyConfig::from_env()?;
    tracing::info!(preview_bytes = config.preview_bytes, "Reply classifier starting");

    // One client per process, shared by every invocation.
    let store = S3Store::from_env().await;
    let store = &store;
    let config = &config;

    run(service_fn(move |event: LambdaEvent<StorageEvent>| async move {
        Ok::<_, Error>(handle_reply_event(store, &event.payload, config).await)
    }))
    .await
}
