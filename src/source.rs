use super::*;
use const_format::concatcp;
use tokio_postgres::GenericClient;
use tokio_postgres::Transaction;

/// Source defines the read interface between domain types and the store.
/// All SELECT queries are consolidated here.
#[async_trait::async_trait]
pub trait Source: Send + Sync {
    /// Spec row registered under a caller's external identifier.
    async fn lookup(&self, external: i32) -> Result<Option<SpecRecord>, StoreError>;
    /// Spec row by store-assigned key.
    async fn spec(&self, id: ID<SpecRecord>) -> Result<Option<SpecRecord>, StoreError>;
    /// Hyperparameter rows of a spec, in stored position order.
    async fn hyperparameters(
        &self,
        id: ID<SpecRecord>,
    ) -> Result<Vec<HyperparameterRecord>, StoreError>;
}

#[rustfmt::skip]
const SPEC_COLUMNS: &str = "id, external, experimentrun, tag, transformertype";
#[rustfmt::skip]
const HYPERPARAMETER_COLUMNS: &str = "id, spec, experimentrun, position, paramname, paramtype, paramvalue, paramminvalue, parammaxvalue";

#[rustfmt::skip]
async fn lookup<C>(client: &C, external: i32) -> Result<Option<SpecRecord>, PgErr>
where
    C: GenericClient + Sync,
{
    const SQL: &str = concatcp!(
        "SELECT ", SPEC_COLUMNS, " ",
        "FROM   ", TRANSFORMERSPEC, " ",
        "WHERE  external = $1"
    );
    client
        .query_opt(SQL, &[&external])
        .await?
        .as_ref()
        .map(SpecRecord::try_from)
        .transpose()
}

#[rustfmt::skip]
async fn spec<C>(client: &C, id: ID<SpecRecord>) -> Result<Option<SpecRecord>, PgErr>
where
    C: GenericClient + Sync,
{
    const SQL: &str = concatcp!(
        "SELECT ", SPEC_COLUMNS, " ",
        "FROM   ", TRANSFORMERSPEC, " ",
        "WHERE  id = $1"
    );
    client
        .query_opt(SQL, &[&id.inner()])
        .await?
        .as_ref()
        .map(SpecRecord::try_from)
        .transpose()
}

#[rustfmt::skip]
async fn hyperparameters<C>(client: &C, id: ID<SpecRecord>) -> Result<Vec<HyperparameterRecord>, PgErr>
where
    C: GenericClient + Sync,
{
    const SQL: &str = concatcp!(
        "SELECT   ", HYPERPARAMETER_COLUMNS, " ",
        "FROM     ", HYPERPARAMETER, " ",
        "WHERE    spec = $1 ",
        "ORDER BY position, id"
    );
    client
        .query(SQL, &[&id.inner()])
        .await?
        .iter()
        .map(HyperparameterRecord::try_from)
        .collect()
}

#[async_trait::async_trait]
impl Source for Client {
    async fn lookup(&self, external: i32) -> Result<Option<SpecRecord>, StoreError> {
        Ok(lookup(self, external).await?)
    }
    async fn spec(&self, id: ID<SpecRecord>) -> Result<Option<SpecRecord>, StoreError> {
        Ok(spec(self, id).await?)
    }
    async fn hyperparameters(
        &self,
        id: ID<SpecRecord>,
    ) -> Result<Vec<HyperparameterRecord>, StoreError> {
        Ok(hyperparameters(self, id).await?)
    }
}

#[async_trait::async_trait]
impl Source for Transaction<'_> {
    async fn lookup(&self, external: i32) -> Result<Option<SpecRecord>, StoreError> {
        Ok(lookup(self, external).await?)
    }
    async fn spec(&self, id: ID<SpecRecord>) -> Result<Option<SpecRecord>, StoreError> {
        Ok(spec(self, id).await?)
    }
    async fn hyperparameters(
        &self,
        id: ID<SpecRecord>,
    ) -> Result<Vec<HyperparameterRecord>, StoreError> {
        Ok(hyperparameters(self, id).await?)
    }
}
