use super::*;
use anyhow::Context;
use std::sync::Arc;
use tokio_postgres::Client;

/// Connect to the database at `url`, run migrations, and return the client.
pub async fn db(url: &str) -> anyhow::Result<Arc<Client>> {
    log::info!("connecting to database");
    let tls = tokio_postgres::tls::NoTls;
    let (client, connection) = tokio_postgres::connect(url, tls)
        .await
        .context("database connection failed")?;
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            log::error!("database connection error: {}", e);
        }
    });
    client
        .execute("SET client_min_messages TO WARNING", &[])
        .await
        .context("set client_min_messages")?;
    for (name, sql) in [
        (Cards::name(), Cards::creates()),
        (Players::name(), Players::creates()),
    ] {
        client
            .batch_execute(sql)
            .await
            .with_context(|| format!("creating table {}", name))?;
    }
    Ok(Arc::new(client))
}
