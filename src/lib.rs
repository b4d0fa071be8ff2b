//! Transformer specification storage.
//!
//! Persists the preprocessing steps of a machine-learning experiment run,
//! together with their hyperparameters, in PostgreSQL, and reconstructs
//! them on read.
//!
//! ## Domain Types
//!
//! - [`TransformerSpec`] — A preprocessing step and its hyperparameters
//! - [`Hyperparameter`] — A named, typed, bounded configuration value
//! - [`SpecRecord`] — A stored `transformerspec` row
//! - [`HyperparameterRecord`] — A stored `hyperparameter` row
//! - [`ID`] — Store-assigned primary key, typed by the row it names
//!
//! ## Execution Contexts
//!
//! - [`Source`] — Read queries against the store
//! - [`Sink`] — Insert queries against the store
//! - [`Memory`] — In-process context with the same semantics as PostgreSQL
//!
//! Both traits are implemented for [`tokio_postgres::Client`] and
//! [`tokio_postgres::Transaction`]. Failures surface as [`StoreError`].
//!
//! ## Operations
//!
//! - [`SpecRepository`] — `store`, `read_spec`, `read_hyperparameters`
//! - [`Schema`] / [`migrate`] — Table definitions
//!
//! ## Binary
//!
//! The `server` feature builds the `specstore` CLI, configured through
//! `DB_URL`.
mod error;
mod hyperparameter;
mod id;
mod memory;
mod record;
mod repository;
mod schema;
mod sink;
mod source;
mod spec;

pub use error::*;
pub use hyperparameter::*;
pub use id::*;
pub use memory::*;
pub use record::*;
pub use repository::*;
pub use schema::*;
pub use sink::*;
pub use source::*;
pub use spec::*;

#[cfg(feature = "server")]
mod cli;
#[cfg(feature = "server")]
pub use cli::*;

use tokio_postgres::Client;

/// Identifier of the experiment run owning a spec.
/// Runs live outside this crate; only their key is recorded.
pub type Run = i32;

/// PostgreSQL error type alias.
pub type PgErr = tokio_postgres::Error;

/// Table for transformer specifications.
#[rustfmt::skip]
pub const TRANSFORMERSPEC: &str = "transformerspec";
/// Table for hyperparameters of transformer specifications.
#[rustfmt::skip]
pub const HYPERPARAMETER:  &str = "hyperparameter";

/// Establishes a database connection.
///
/// The connection task is spawned onto the current tokio runtime, so this
/// must be called from within one.
pub async fn db(url: &str) -> Result<Client, PgErr> {
    log::info!("connecting to database");
    let tls = tokio_postgres::tls::NoTls;
    let (client, connection) = tokio_postgres::connect(url, tls).await?;
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            log::error!("database connection closed: {}", e);
        }
    });
    client
        .execute("SET client_min_messages TO WARNING", &[])
        .await?;
    Ok(client)
}

/// Logs to stderr at `level` and to `logs/specstore-<unix secs>.log` at DEBUG.
#[cfg(feature = "server")]
pub fn log(level: log::LevelFilter) -> anyhow::Result<()> {
    std::fs::create_dir_all("logs")?;
    let config = simplelog::ConfigBuilder::new()
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)?
        .as_secs();
    let path = format!("logs/specstore-{}.log", secs);
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug.max(level),
        config.clone(),
        std::fs::File::create(path)?,
    );
    let term = simplelog::TermLogger::new(
        level,
        config,
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file])?;
    Ok(())
}
