use super::*;

/// Repository operations over any execution context that can both read
/// and write the spec tables.
///
/// No transaction is opened here. Run [`store`](SpecRepository::store)
/// against a [`tokio_postgres::Transaction`] to make a spec and its
/// hyperparameters land together or not at all.
#[async_trait::async_trait]
pub trait SpecRepository: Source + Sink {
    /// Persists a spec and its hyperparameters, unless a spec with the same
    /// external identifier is already stored, in which case the existing
    /// row is returned untouched and the given hyperparameters are ignored.
    async fn store(&self, spec: &TransformerSpec, run: Run) -> Result<SpecRecord, SpecError> {
        loop {
            if let Some(existing) = self.lookup(spec.id()).await? {
                log::debug!("spec {} already stored as {}", spec.id(), existing.id());
                return Ok(existing);
            }
            // a refused claim means a concurrent writer committed this
            // external id after our lookup, so the next lookup sees it
            if let Some(record) = self.claim(spec, run).await? {
                for (position, param) in spec.hyperparameters().iter().enumerate() {
                    self.attach(record.id(), run, position as i32, param).await?;
                }
                log::info!(
                    "stored spec {} as {} with {} hyperparameters",
                    spec.id(),
                    record.id(),
                    spec.hyperparameters().len()
                );
                return Ok(record);
            }
        }
    }

    /// Reconstructs a spec and its hyperparameters from its stored key.
    async fn read_spec(&self, id: ID<SpecRecord>) -> Result<TransformerSpec, SpecError> {
        let record = self.spec(id).await?.ok_or(SpecError::NotFound(id))?;
        let hyperparameters = self
            .read_hyperparameters(id)
            .await?
            .into_iter()
            .map(Hyperparameter::from)
            .collect();
        log::debug!("read spec {}", id);
        Ok(TransformerSpec::new(
            record.id().inner(),
            record.transformer_type(),
            record.tag(),
            hyperparameters,
        ))
    }

    /// Hyperparameter rows of a stored spec. Empty, not an error, when the
    /// spec has none or does not exist.
    async fn read_hyperparameters(
        &self,
        id: ID<SpecRecord>,
    ) -> Result<Vec<HyperparameterRecord>, SpecError> {
        Ok(self.hyperparameters(id).await?)
    }
}

impl<T> SpecRepository for T where T: Source + Sink {}

#[cfg(test)]
mod tests {
    use super::*;

    fn scaler(external: i32) -> TransformerSpec {
        TransformerSpec::new(
            external,
            "StandardScaler",
            "norm",
            vec![Hyperparameter::new("mean", "float", "0.0", -1.0, 1.0)],
        )
    }

    #[tokio::test]
    async fn store_then_read_round_trips() {
        let memory = Memory::new();
        let stored = memory.store(&scaler(7), 3).await.unwrap();
        let spec = memory.read_spec(stored.id()).await.unwrap();
        assert_eq!(spec.id(), stored.id().inner());
        assert_eq!(spec.transformer_type(), "StandardScaler");
        assert_eq!(spec.tag(), "norm");
        assert_eq!(spec.hyperparameters().len(), 1);
        let mean = &spec.hyperparameters()[0];
        assert_eq!(mean.name(), "mean");
        assert_eq!(mean.kind(), "float");
        assert_eq!(mean.value(), "0.0");
        assert_eq!(mean.min(), -1.0);
        assert_eq!(mean.max(), 1.0);
    }

    #[tokio::test]
    async fn store_records_run_and_external_id() {
        let memory = Memory::new();
        let stored = memory.store(&scaler(7), 3).await.unwrap();
        assert_eq!(stored.external(), 7);
        assert_eq!(stored.run(), 3);
        assert_eq!(stored.tag(), "norm");
        assert_eq!(stored.transformer_type(), "StandardScaler");
    }

    #[tokio::test]
    async fn stored_key_is_not_external_id() {
        let memory = Memory::new();
        let stored = memory.store(&scaler(7), 3).await.unwrap();
        assert_ne!(stored.id().inner(), 7);
        assert!(matches!(
            memory.read_spec(ID::from(7)).await,
            Err(SpecError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn repeated_store_keeps_first_write() {
        let memory = Memory::new();
        let first = memory.store(&scaler(7), 3).await.unwrap();
        let other = TransformerSpec::new(
            7,
            "MinMaxScaler",
            "other",
            vec![
                Hyperparameter::new("lo", "float", "0", 0.0, 0.0),
                Hyperparameter::new("hi", "float", "1", 1.0, 1.0),
            ],
        );
        let second = memory.store(&other, 4).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(memory.count().await, 1);
        let spec = memory.read_spec(first.id()).await.unwrap();
        assert_eq!(spec.transformer_type(), "StandardScaler");
        assert_eq!(spec.hyperparameters().len(), 1);
        assert_eq!(spec.hyperparameters()[0].name(), "mean");
    }

    #[tokio::test]
    async fn read_spec_of_unknown_key_is_not_found() {
        let memory = Memory::new();
        match memory.read_spec(ID::from(99)).await {
            Err(SpecError::NotFound(id)) => assert_eq!(id, ID::from(99)),
            other => panic!("expected not found, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn hyperparameters_reference_their_spec() {
        let memory = Memory::new();
        let a = memory.store(&scaler(1), 3).await.unwrap();
        let b = memory.store(&scaler(2), 3).await.unwrap();
        let rows = memory.read_hyperparameters(b.id()).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows.iter().all(|h| h.spec() == b.id()));
        assert!(rows.iter().all(|h| h.spec() != a.id()));
        assert!(rows.iter().all(|h| h.run() == 3));
    }

    #[tokio::test]
    async fn spec_without_hyperparameters_reads_empty() {
        let memory = Memory::new();
        let bare = TransformerSpec::new(5, "Identity", "", vec![]);
        let stored = memory.store(&bare, 1).await.unwrap();
        assert!(memory.read_hyperparameters(stored.id()).await.unwrap().is_empty());
        assert!(memory.read_spec(stored.id()).await.unwrap().hyperparameters().is_empty());
    }

    #[tokio::test]
    async fn hyperparameters_of_unknown_key_read_empty() {
        let memory = Memory::new();
        assert!(memory.read_hyperparameters(ID::from(42)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn bounds_come_back_at_single_precision() {
        let memory = Memory::new();
        let spec = TransformerSpec::new(
            1,
            "PCA",
            "",
            vec![Hyperparameter::new("tol", "float", "0.1", 0.123456789, 9.87654321)],
        );
        let stored = memory.store(&spec, 1).await.unwrap();
        let back = memory.read_spec(stored.id()).await.unwrap();
        let tol = &back.hyperparameters()[0];
        assert_eq!(tol.min(), f64::from(0.123456789_f32));
        assert_eq!(tol.max(), f64::from(9.87654321_f32));
        assert_ne!(tol.min(), 0.123456789);
    }

    #[tokio::test]
    async fn hyperparameter_order_survives_round_trip() {
        let memory = Memory::new();
        let names = ["zeta", "alpha", "mu", "beta"];
        let params = names
            .iter()
            .map(|n| Hyperparameter::new(*n, "int", "1", 0.0, 10.0))
            .collect();
        let stored = memory
            .store(&TransformerSpec::new(1, "Binner", "", params), 1)
            .await
            .unwrap();
        let back = memory.read_spec(stored.id()).await.unwrap();
        let read = back
            .hyperparameters()
            .iter()
            .map(|h| h.name())
            .collect::<Vec<_>>();
        assert_eq!(read, names);
        let positions = memory
            .read_hyperparameters(stored.id())
            .await
            .unwrap()
            .iter()
            .map(|h| h.position())
            .collect::<Vec<_>>();
        assert_eq!(positions, vec![0, 1, 2, 3]);
    }

    #[tokio::test]
    async fn concurrent_stores_of_one_id_persist_once() {
        let memory = std::sync::Arc::new(Memory::new());
        let handles = (0..8)
            .map(|run| {
                let memory = memory.clone();
                tokio::spawn(async move { memory.store(&scaler(7), run).await.unwrap() })
            })
            .collect::<Vec<_>>();
        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().id());
        }
        assert!(ids.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(memory.count().await, 1);
        assert_eq!(memory.read_hyperparameters(ids[0]).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failed_hyperparameter_insert_aborts_store() {
        let memory = Memory::new();
        let spec = TransformerSpec::new(
            7,
            "StandardScaler",
            "norm",
            vec![
                Hyperparameter::new("mean", "float", "0.0", -1.0, 1.0),
                Hyperparameter::new("mean", "float", "0.5", -1.0, 1.0),
                Hyperparameter::new("std", "float", "1.0", 0.0, 2.0),
            ],
        );
        match memory.store(&spec, 3).await {
            Err(SpecError::Storage(StoreError::Duplicate { name, .. })) => {
                assert_eq!(name, "mean")
            }
            other => panic!("expected storage failure, got {:?}", other),
        }
        let stored = memory.lookup(7).await.unwrap().unwrap();
        let rows = memory.read_hyperparameters(stored.id()).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].value(), "0.0");
        assert!(rows.iter().all(|h| h.name() != "std"));
    }
}
