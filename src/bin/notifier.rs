use decision_mail::channels::SesSender;
use decision_mail::config::NotifierConfig;
use decision_mail::pipeline::handle_notify;
use decision_mail::telemetry;
use lambda_runtime::{Error, LambdaEvent, run, service_fn};

#[tokio::main]
async fn main() -> Result<(), Error> {
    telemetry::init()?;

    let config = NotifierConfig::from_env();
    tracing::info!(
        sender = %config.sender,
        recipient = %config.recipient,
        reply_address = %config.reply_address,
        "Decision notifier starting"
    );

    // One client per process, shared by every invocation.
    let sender = SesSender::from_env().await;
    let sender = &sender;
    let config = &config;

    // The payload is ignored; every invocation sends the same request.
    run(service_fn(
        move |_event: LambdaEvent<serde_json::Value>| async move {
            Ok::<_, Error>(handle_notify(sender, config).await)
        },
    ))
    .await
}
