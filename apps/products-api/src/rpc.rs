//! NATS request/reply listener for the product message patterns

use async_nats::Client;
use axum_helpers::ShutdownCoordinator;
use core_config::rpc::RpcConfig;
use domain_products::{ProductMessageHandler, ProductStore};
use eyre::{Result, WrapErr};
use futures::{Stream, StreamExt};
use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

/// Connect to NATS with the service name as the client name.
pub async fn connect(config: &RpcConfig, name: &str) -> Result<Client> {
    async_nats::ConnectOptions::new()
        .name(name)
        .connect(config.url.as_str())
        .await
        .wrap_err_with(|| format!("Failed to connect to NATS at {}", config.url))
}

/// Pattern to dispatch for `subject`. A subject outside the prefix is passed
/// through whole, so the handler answers it with its unknown-pattern reply.
fn pattern_for(config: &RpcConfig, subject: &str) -> String {
    match config.pattern_of(subject) {
        Some(pattern) => pattern.to_owned(),
        None => {
            debug!(subject, "Subject carries no message pattern");
            subject.to_owned()
        }
    }
}

/// Spawn a task per message until shutdown or end of stream, then wait for
/// every task still in flight.
async fn dispatch_until_shutdown<M, H, Fut>(
    messages: &mut M,
    shutdown: &ShutdownCoordinator,
    mut handle: H,
) where
    M: Stream + Unpin,
    H: FnMut(M::Item) -> Option<Fut>,
    Fut: Future<Output = ()> + Send + 'static,
{
    let mut in_flight = JoinSet::new();

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            message = messages.next() => {
                let Some(message) = message else {
                    warn!("RPC subscription closed");
                    break;
                };
                if let Some(task) = handle(message) {
                    in_flight.spawn(task);
                }
            }
            Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                if let Err(e) = joined {
                    error!(error = %e, "RPC request task failed");
                }
            }
        }
    }

    if !in_flight.is_empty() {
        info!(pending = in_flight.len(), "Waiting for in-flight RPC requests");
    }
    while let Some(joined) = in_flight.join_next().await {
        if let Err(e) = joined {
            error!(error = %e, "RPC request task failed");
        }
    }
}

/// Serve every `<prefix>.<pattern>` request until shutdown.
///
/// Instances share a queue group, so each request is answered once. Returns
/// only after every accepted request has been answered and flushed.
pub async fn run<S: ProductStore + 'static>(
    client: Client,
    config: RpcConfig,
    handler: Arc<ProductMessageHandler<S>>,
    shutdown: ShutdownCoordinator,
) -> Result<()> {
    let subject = config.wildcard_subject();
    let mut subscriber = client
        .queue_subscribe(subject.clone(), config.subject_prefix.clone())
        .await
        .wrap_err_with(|| format!("Failed to subscribe to {}", subject))?;

    info!(subject = %subject, "RPC listener started");

    dispatch_until_shutdown(&mut subscriber, &shutdown, |message| {
        let Some(reply) = message.reply.clone() else {
            debug!(subject = %message.subject, "Dropping message without reply subject");
            return None;
        };
        let pattern = pattern_for(&config, &message.subject);
        let client = client.clone();
        let handler = Arc::clone(&handler);

        Some(async move {
            let body = handler.handle(&pattern, &message.payload).await;
            if let Err(e) = client.publish(reply, body.into()).await {
                error!(pattern = %pattern, error = %e, "Failed to publish RPC reply");
            }
        })
    })
    .await;

    subscriber
        .unsubscribe()
        .await
        .wrap_err("Failed to unsubscribe RPC listener")?;
    client.flush().await.wrap_err("Failed to flush NATS client")?;

    info!("RPC listener stopped");
    Ok(())
}
