//! Round trips against a live PostgreSQL instance.
//!
//! Run with `DB_URL=postgres://... cargo test -- --ignored`. Each test works
//! inside a transaction that is rolled back, so the database is left as found.
use specstore::*;

async fn client() -> tokio_postgres::Client {
    let url = std::env::var("DB_URL").expect("DB_URL must be set");
    let client = db(&url).await.expect("database connection failed");
    migrate(&client).await.expect("migrate");
    client
}

fn scaler(external: i32) -> TransformerSpec {
    TransformerSpec::new(
        external,
        "StandardScaler",
        "norm",
        vec![
            Hyperparameter::new("mean", "float", "0.0", -1.0, 1.0),
            Hyperparameter::new("std", "float", "1.0", 0.123456789, 2.0),
        ],
    )
}

#[tokio::test]
#[ignore = "requires DB_URL"]
async fn store_and_read_inside_transaction() {
    let mut client = client().await;
    let tx = client.transaction().await.unwrap();
    let external = i32::MAX - 7;
    let stored = tx.store(&scaler(external), 3).await.unwrap();
    assert_eq!(stored.external(), external);
    let spec = tx.read_spec(stored.id()).await.unwrap();
    assert_eq!(spec.transformer_type(), "StandardScaler");
    assert_eq!(spec.tag(), "norm");
    let names = spec
        .hyperparameters()
        .iter()
        .map(|h| h.name())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["mean", "std"]);
    assert_eq!(spec.hyperparameters()[1].min(), f64::from(0.123456789_f32));
    let again = tx.store(&TransformerSpec::new(external, "Other", "x", vec![]), 4).await.unwrap();
    assert_eq!(again, stored);
    assert_eq!(tx.read_hyperparameters(stored.id()).await.unwrap().len(), 2);
    tx.rollback().await.unwrap();
}

#[tokio::test]
#[ignore = "requires DB_URL"]
async fn unknown_key_is_not_found() {
    let client = client().await;
    assert!(matches!(
        client.read_spec(ID::from(-1)).await,
        Err(SpecError::NotFound(_))
    ));
    assert!(client.read_hyperparameters(ID::from(-1)).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires DB_URL"]
async fn repeated_name_fails_as_driver_error() {
    let mut client = client().await;
    let tx = client.transaction().await.unwrap();
    let mean = Hyperparameter::new("mean", "float", "0.0", -1.0, 1.0);
    let spec = TransformerSpec::new(i32::MAX - 8, "StandardScaler", "norm", vec![mean.clone(), mean]);
    assert!(matches!(
        tx.store(&spec, 3).await,
        Err(SpecError::Storage(StoreError::Postgres(_)))
    ));
    tx.rollback().await.unwrap();
}
