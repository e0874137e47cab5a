//! Lambda entry point for the artifact sync hook (`Custom::StaticCopy`).

use lambda_runtime::{service_fn, Error, LambdaEvent};
use static_site_hooks::cfn::{CustomResourceEvent, HttpResponder};
use static_site_hooks::store::S3Store;
use static_site_hooks::{runtime, sync};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Error> {
    runtime::init_telemetry();

    let sdk_config = runtime::load_sdk_config().await;
    let store = Arc::new(S3Store::new(&sdk_config));
    let responder = Arc::new(HttpResponder::new()?);

    lambda_runtime::run(service_fn(
        move |event: LambdaEvent<CustomResourceEvent>| {
            let store = Arc::clone(&store);
            let responder = Arc::clone(&responder);
            async move {
                sync::handle_event(&event.payload, store.as_ref(), responder.as_ref()).await?;
                Ok::<(), Error>(())
            }
        },
    ))
    .await
}
