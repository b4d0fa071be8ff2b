use super::*;
use const_format::concatcp;
use tokio_postgres::GenericClient;
use tokio_postgres::Transaction;

/// Sink defines the write interface between domain types and the store.
/// All INSERT queries are consolidated here; rows are never updated.
#[async_trait::async_trait]
pub trait Sink: Send + Sync {
    /// Inserts a spec row under its external identifier.
    /// Yields `None` when a row with that identifier already exists.
    async fn claim(
        &self,
        spec: &TransformerSpec,
        run: Run,
    ) -> Result<Option<SpecRecord>, StoreError>;
    /// Inserts one hyperparameter row under an existing spec row.
    async fn attach(
        &self,
        spec: ID<SpecRecord>,
        run: Run,
        position: i32,
        param: &Hyperparameter,
    ) -> Result<ID<HyperparameterRecord>, StoreError>;
}

#[rustfmt::skip]
async fn claim<C>(client: &C, spec: &TransformerSpec, run: Run) -> Result<Option<SpecRecord>, PgErr>
where
    C: GenericClient + Sync,
{
    const SQL: &str = concatcp!(
        "INSERT INTO ", TRANSFORMERSPEC, " (external, experimentrun, tag, transformertype) ",
        "VALUES                            ($1,       $2,            $3,  $4) ",
        "ON CONFLICT (external) DO NOTHING ",
        "RETURNING id, external, experimentrun, tag, transformertype"
    );
    client
        .query_opt(SQL, &[&spec.id(), &run, &spec.tag(), &spec.transformer_type()])
        .await?
        .as_ref()
        .map(SpecRecord::try_from)
        .transpose()
}

#[rustfmt::skip]
async fn attach<C>(client: &C, spec: ID<SpecRecord>, run: Run, position: i32, param: &Hyperparameter) -> Result<ID<HyperparameterRecord>, PgErr>
where
    C: GenericClient + Sync,
{
    const SQL: &str = concatcp!(
        "INSERT INTO ", HYPERPARAMETER, " (spec, experimentrun, position, paramname, paramtype, paramvalue, paramminvalue, parammaxvalue) ",
        "VALUES                           ($1,   $2,            $3,       $4,        $5,        $6,         $7,            $8) ",
        "RETURNING id"
    );
    client
        .query_one(
            SQL,
            &[
                &spec.inner(),
                &run,
                &position,
                &param.name(),
                &param.kind(),
                &param.value(),
                &narrow(param.min()),
                &narrow(param.max()),
            ],
        )
        .await?
        .try_get::<_, i32>(0)
        .map(ID::from)
}

#[async_trait::async_trait]
impl Sink for Client {
    async fn claim(
        &self,
        spec: &TransformerSpec,
        run: Run,
    ) -> Result<Option<SpecRecord>, StoreError> {
        Ok(claim(self, spec, run).await?)
    }
    async fn attach(
        &self,
        spec: ID<SpecRecord>,
        run: Run,
        position: i32,
        param: &Hyperparameter,
    ) -> Result<ID<HyperparameterRecord>, StoreError> {
        Ok(attach(self, spec, run, position, param).await?)
    }
}

#[async_trait::async_trait]
impl Sink for Transaction<'_> {
    async fn claim(
        &self,
        spec: &TransformerSpec,
        run: Run,
    ) -> Result<Option<SpecRecord>, StoreError> {
        Ok(claim(self, spec, run).await?)
    }
    async fn attach(
        &self,
        spec: ID<SpecRecord>,
        run: Run,
        position: i32,
        param: &Hyperparameter,
    ) -> Result<ID<HyperparameterRecord>, StoreError> {
        Ok(attach(self, spec, run, position, param).await?)
    }
}
