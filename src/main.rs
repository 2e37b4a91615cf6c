use std::sync::Arc;
use anyhow::{bail, Context};
use cloudhub_transfer::config::DEFAULT_CONFIG_FILE;
use cloudhub_transfer::{request_download, Config, OwnerType, Session, StorageObjectRef, TracingNotifier};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [owner_type, owner_id, storage_id] = args.as_slice() else {
        bail!("usage: cloudhub-transfer <ownerType> <ownerId> <storageId>");
    };

    let storage = StorageObjectRef::file(
        storage_id.parse().context("storageId must be a number")?,
        owner_type.parse::<OwnerType>()?,
        owner_id.parse().context("ownerId must be a number")?,
    );

    let config = Config::load(DEFAULT_CONFIG_FILE)
        .with_context(|| format!("Can't load {}", DEFAULT_CONFIG_FILE))?;
    let session = Session::start(&config, Arc::new(TracingNotifier))?;

    match request_download(session.client(), &storage).await {
        Ok(Some(ticket)) => println!("{}", ticket.retrieval_url),
        Ok(None) => {}
        Err(err) => {
            session.handle_error(&err).await;
            return Err(err.into());
        }
    }

    session.end().await;
    Ok(())
}
