use super::*;
use tokio::sync::Mutex;

/// In-process execution context.
///
/// Mirrors the PostgreSQL tables row for row: serial keys starting at 1,
/// a unique external identifier per spec, and hyperparameters ordered by
/// position. Hyperparameter inserts are refused the way the table
/// constraints refuse them: the owning spec row must exist, and names are
/// unique within a spec. Every call holds the table lock for its whole duration, so
/// each call is atomic with respect to the others.
#[derive(Debug, Default)]
pub struct Memory {
    tables: Mutex<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    specs: Vec<SpecRecord>,
    hyperparameters: Vec<HyperparameterRecord>,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }
    #[cfg(test)]
    pub(crate) async fn count(&self) -> usize {
        self.tables.lock().await.specs.len()
    }
}

#[async_trait::async_trait]
impl Source for Memory {
    async fn lookup(&self, external: i32) -> Result<Option<SpecRecord>, StoreError> {
        Ok(self
            .tables
            .lock()
            .await
            .specs
            .iter()
            .find(|s| s.external() == external)
            .cloned())
    }
    async fn spec(&self, id: ID<SpecRecord>) -> Result<Option<SpecRecord>, StoreError> {
        Ok(self
            .tables
            .lock()
            .await
            .specs
            .iter()
            .find(|s| s.id() == id)
            .cloned())
    }
    async fn hyperparameters(
        &self,
        id: ID<SpecRecord>,
    ) -> Result<Vec<HyperparameterRecord>, StoreError> {
        let mut rows = self
            .tables
            .lock()
            .await
            .hyperparameters
            .iter()
            .filter(|h| h.spec() == id)
            .cloned()
            .collect::<Vec<_>>();
        rows.sort_by_key(|h| (h.position(), h.id()));
        Ok(rows)
    }
}

#[async_trait::async_trait]
impl Sink for Memory {
    async fn claim(
        &self,
        spec: &TransformerSpec,
        run: Run,
    ) -> Result<Option<SpecRecord>, StoreError> {
        let mut tables = self.tables.lock().await;
        if tables.specs.iter().any(|s| s.external() == spec.id()) {
            return Ok(None);
        }
        let id = ID::from(tables.specs.len() as i32 + 1);
        let record = SpecRecord::new(id, spec.id(), run, spec.tag(), spec.transformer_type());
        tables.specs.push(record.clone());
        Ok(Some(record))
    }
    async fn attach(
        &self,
        spec: ID<SpecRecord>,
        run: Run,
        position: i32,
        param: &Hyperparameter,
    ) -> Result<ID<HyperparameterRecord>, StoreError> {
        let mut tables = self.tables.lock().await;
        if !tables.specs.iter().any(|s| s.id() == spec) {
            return Err(StoreError::Orphan(spec));
        }
        if tables
            .hyperparameters
            .iter()
            .any(|h| h.spec() == spec && h.name() == param.name())
        {
            return Err(StoreError::Duplicate {
                spec,
                name: param.name().to_string(),
            });
        }
        let id = ID::from(tables.hyperparameters.len() as i32 + 1);
        let record = HyperparameterRecord::new(id, spec, run, position, param);
        tables.hyperparameters.push(record);
        Ok(id)
    }
}
