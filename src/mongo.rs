//! # MongoDB Connection
//!
//! Builds a [`mongodb::Client`] from the `store` configuration and verifies
//! the server answers before handing it to a store.
use mongodb::{bson::doc, options::ClientOptions, Client};
use tracing::info;

use crate::{config, Result};

/// Connects to MongoDB and pings the configured database.
///
/// # Errors
///
/// Returns [`crate::Error::Store`] when the URI does not parse, the client
/// cannot be built or the ping fails.
pub async fn connect(config: &config::MongoDb) -> Result<Client> {
    let mut client_options = ClientOptions::parse_async(&config.uri).await?;
    let client_options = merge_config_with_client(&mut client_options, config);

    let client = Client::with_options(client_options)?;

    // Ping the Database to make sure a connection has been made
    client
        .database(&config.db_name)
        .run_command(doc! { "ping": 1 }, None)
        .await?;

    info!(db_name = %config.db_name, collection = %config.collection, "connected to mongodb");
    Ok(client)
}

/// Options set in configuration win over the ones parsed from the URI.
fn merge_config_with_client(co: &mut ClientOptions, config: &config::MongoDb) -> ClientOptions {
    match config.client_options.clone() {
        None => co.clone(),
        Some(client_options) => {
            co.app_name = client_options.app_name.or(co.app_name.clone());
            co.compressors = client_options.compressors.or(co.compressors.clone());
            co.connect_timeout = client_options.connect_timeout.or(co.connect_timeout);
            co.credential = client_options.credential.or(co.credential.clone());
            co.direct_connection = client_options.direct_connection.or(co.direct_connection);
            co.heartbeat_freq = client_options.heartbeat_freq.or(co.heartbeat_freq);
            co.load_balanced = client_options.load_balanced.or(co.load_balanced);
            co.local_threshold = client_options.local_threshold.or(co.local_threshold);
            co.max_idle_time = client_options.max_idle_time.or(co.max_idle_time);
            co.max_pool_size = client_options.max_pool_size.or(co.max_pool_size);
            co.min_pool_size = client_options.min_pool_size.or(co.min_pool_size);
            co.max_connecting = client_options.max_connecting.or(co.max_connecting);
            co.read_concern = client_options.read_concern.or(co.read_concern.clone());
            co.repl_set_name = client_options.repl_set_name.or(co.repl_set_name.clone());
            co.retry_reads = client_options.retry_reads.or(co.retry_reads);
            co.retry_writes = client_options.retry_writes.or(co.retry_writes);
            co.selection_criteria = client_options
                .selection_criteria
                .or(co.selection_criteria.clone());
            co.server_api = client_options.server_api.or(co.server_api.clone());
            co.server_selection_timeout = client_options
                .server_selection_timeout
                .or(co.server_selection_timeout);
            co.default_database = client_options
                .default_database
                .or(co.default_database.clone());
            co.tls = client_options.tls.or(co.tls.clone());
            co.write_concern = client_options.write_concern.or(co.write_concern.clone());

            co.clone()
        }
    }
}
