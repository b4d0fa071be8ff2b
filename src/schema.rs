use super::*;

/// Schema metadata for PostgreSQL tables.
///
/// Provides compile-time SQL generation for table creation and indexing.
/// All methods return `&'static str` built with [`const_format::concatcp!`].
/// This trait contains no I/O; [`migrate`] applies it.
pub trait Schema {
    /// Returns the table name in the database.
    fn name() -> &'static str;
    /// Returns `CREATE TABLE IF NOT EXISTS` DDL statement.
    fn creates() -> &'static str;
    /// Returns `CREATE INDEX IF NOT EXISTS` statements for all indices.
    fn indices() -> &'static str;
}

impl Schema for SpecRecord {
    fn name() -> &'static str {
        TRANSFORMERSPEC
    }
    fn creates() -> &'static str {
        const_format::concatcp!(
            "CREATE TABLE IF NOT EXISTS ",
            TRANSFORMERSPEC,
            " (
                id              SERIAL PRIMARY KEY,
                external        INTEGER NOT NULL UNIQUE,
                experimentrun   INTEGER NOT NULL,
                tag             TEXT NOT NULL,
                transformertype TEXT NOT NULL
            );"
        )
    }
    fn indices() -> &'static str {
        const_format::concatcp!(
            "CREATE INDEX IF NOT EXISTS idx_",
            TRANSFORMERSPEC,
            "_run ON ",
            TRANSFORMERSPEC,
            " (experimentrun);"
        )
    }
}

impl Schema for HyperparameterRecord {
    fn name() -> &'static str {
        HYPERPARAMETER
    }
    fn creates() -> &'static str {
        const_format::concatcp!(
            "CREATE TABLE IF NOT EXISTS ",
            HYPERPARAMETER,
            " (
                id              SERIAL PRIMARY KEY,
                spec            INTEGER NOT NULL REFERENCES ",
            TRANSFORMERSPEC,
            "(id),
                experimentrun   INTEGER NOT NULL,
                position        INTEGER NOT NULL,
                paramname       TEXT NOT NULL,
                paramtype       TEXT NOT NULL,
                paramvalue      TEXT NOT NULL,
                paramminvalue   REAL NOT NULL,
                parammaxvalue   REAL NOT NULL,
                UNIQUE (spec, paramname)
            );"
        )
    }
    fn indices() -> &'static str {
        const_format::concatcp!(
            "CREATE INDEX IF NOT EXISTS idx_",
            HYPERPARAMETER,
            "_spec ON ",
            HYPERPARAMETER,
            " (spec, position);"
        )
    }
}

/// Creates both tables and their indices, parents before children.
pub async fn migrate(client: &Client) -> Result<(), PgErr> {
    log::info!("creating table ({})", <SpecRecord as Schema>::name());
    client.batch_execute(SpecRecord::creates()).await?;
    client.batch_execute(SpecRecord::indices()).await?;
    log::info!("creating table ({})", <HyperparameterRecord as Schema>::name());
    client.batch_execute(HyperparameterRecord::creates()).await?;
    client.batch_execute(HyperparameterRecord::indices()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn tables_are_named_after_their_records() {
        assert_eq!(<SpecRecord as Schema>::name(), "transformerspec");
        assert_eq!(<HyperparameterRecord as Schema>::name(), "hyperparameter");
    }
    #[test]
    fn external_id_is_unique() {
        assert!(SpecRecord::creates().contains("external        INTEGER NOT NULL UNIQUE"));
    }
    #[test]
    fn hyperparameters_reference_specs() {
        assert!(HyperparameterRecord::creates().contains("REFERENCES transformerspec(id)"));
        assert!(HyperparameterRecord::creates().contains("UNIQUE (spec, paramname)"));
    }
    #[test]
    fn bounds_are_single_precision() {
        assert!(HyperparameterRecord::creates().contains("paramminvalue   REAL"));
        assert!(HyperparameterRecord::creates().contains("parammaxvalue   REAL"));
    }
}
