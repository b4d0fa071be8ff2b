use super::*;
use serde::Serialize;
use tokio_postgres::Row;

/// Stored `transformerspec` row.
/// Keeps the store-assigned key and the caller's external id side by side.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecRecord {
    id: ID<Self>,
    external: i32,
    run: Run,
    tag: String,
    transformer_type: String,
}

impl SpecRecord {
    pub fn new(
        id: ID<Self>,
        external: i32,
        run: Run,
        tag: impl Into<String>,
        transformer_type: impl Into<String>,
    ) -> Self {
        Self {
            id,
            external,
            run,
            tag: tag.into(),
            transformer_type: transformer_type.into(),
        }
    }
    pub fn external(&self) -> i32 {
        self.external
    }
    pub fn run(&self) -> Run {
        self.run
    }
    pub fn tag(&self) -> &str {
        &self.tag
    }
    pub fn transformer_type(&self) -> &str {
        &self.transformer_type
    }
}

impl Unique for SpecRecord {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

/// Column order: id, external, experimentrun, tag, transformertype
impl TryFrom<&Row> for SpecRecord {
    type Error = PgErr;
    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ID::from(row.try_get::<_, i32>(0)?),
            external: row.try_get::<_, i32>(1)?,
            run: row.try_get::<_, i32>(2)?,
            tag: row.try_get::<_, String>(3)?,
            transformer_type: row.try_get::<_, String>(4)?,
        })
    }
}

/// Stored `hyperparameter` row.
/// Bounds are held exactly as the `REAL` columns hold them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HyperparameterRecord {
    id: ID<Self>,
    spec: ID<SpecRecord>,
    run: Run,
    position: i32,
    name: String,
    #[serde(rename = "type")]
    kind: String,
    value: String,
    min: f32,
    max: f32,
}

impl HyperparameterRecord {
    pub fn new(
        id: ID<Self>,
        spec: ID<SpecRecord>,
        run: Run,
        position: i32,
        param: &Hyperparameter,
    ) -> Self {
        Self {
            id,
            spec,
            run,
            position,
            name: param.name().to_string(),
            kind: param.kind().to_string(),
            value: param.value().to_string(),
            min: narrow(param.min()),
            max: narrow(param.max()),
        }
    }
    /// Key of the owning spec row.
    pub fn spec(&self) -> ID<SpecRecord> {
        self.spec
    }
    pub fn run(&self) -> Run {
        self.run
    }
    /// Zero-based index within the owning spec's hyperparameter sequence.
    pub fn position(&self) -> i32 {
        self.position
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn kind(&self) -> &str {
        &self.kind
    }
    pub fn value(&self) -> &str {
        &self.value
    }
    pub fn min(&self) -> f32 {
        self.min
    }
    pub fn max(&self) -> f32 {
        self.max
    }
}

impl Unique for HyperparameterRecord {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

impl From<HyperparameterRecord> for Hyperparameter {
    fn from(record: HyperparameterRecord) -> Self {
        Hyperparameter::new(
            record.name,
            record.kind,
            record.value,
            f64::from(record.min),
            f64::from(record.max),
        )
    }
}

/// Column order: id, spec, experimentrun, position, paramname, paramtype,
/// paramvalue, paramminvalue, parammaxvalue
impl TryFrom<&Row> for HyperparameterRecord {
    type Error = PgErr;
    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ID::from(row.try_get::<_, i32>(0)?),
            spec: ID::from(row.try_get::<_, i32>(1)?),
            run: row.try_get::<_, i32>(2)?,
            position: row.try_get::<_, i32>(3)?,
            name: row.try_get::<_, String>(4)?,
            kind: row.try_get::<_, String>(5)?,
            value: row.try_get::<_, String>(6)?,
            min: row.try_get::<_, f32>(7)?,
            max: row.try_get::<_, f32>(8)?,
        })
    }
}
