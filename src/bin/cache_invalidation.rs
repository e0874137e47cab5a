//! Lambda entry point for the cache invalidation hook
//! (`Custom::CloudFrontInvalidationFunction`).

use lambda_runtime::{service_fn, Error, LambdaEvent};
use static_site_hooks::cdn::CloudFrontCdn;
use static_site_hooks::cfn::{CustomResourceEvent, HttpResponder};
use static_site_hooks::{invalidation, runtime};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Error> {
    runtime::init_telemetry();

    let sdk_config = runtime::load_sdk_config().await;
    let cdn = Arc::new(CloudFrontCdn::new(&sdk_config));
    let responder = Arc::new(HttpResponder::new()?);

    lambda_runtime::run(service_fn(
        move |event: LambdaEvent<CustomResourceEvent>| {
            let cdn = Arc::clone(&cdn);
            let responder = Arc::clone(&responder);
            async move {
                invalidation::handle_event(&event.payload, cdn.as_ref(), responder.as_ref())
                    .await?;
                Ok::<(), Error>(())
            }
        },
    ))
    .await
}
