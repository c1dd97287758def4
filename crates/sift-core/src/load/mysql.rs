use sqlx::mysql::{MySql, MySqlConnectOptions, MySqlConnection};
use sqlx::{Connection, QueryBuilder};

use super::{frame_rows, RecordStore, SqlValue, TableBatch};
use crate::config::DatabaseConfig;
use crate::{LoadError, SiftResult};

/// Upper bound on bind parameters in one MySQL prepared statement.
pub const MAX_PLACEHOLDERS: usize = 65_535;

/// Opens one connection per `upsert` call and closes it afterwards.
#[derive(Debug, Clone)]
pub struct MySqlStore {
    config: DatabaseConfig,
}

impl MySqlStore {
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }

    fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.config.host)
            .port(self.config.port)
            .username(&self.config.user)
            .password(&self.config.password)
            .database(&self.config.database)
    }
}

impl RecordStore for MySqlStore {
    fn upsert(&mut self, batches: &[TableBatch]) -> SiftResult<Vec<u64>> {
        let mut prepared = Vec::with_capacity(batches.len());
        for batch in batches {
            prepared.push((batch, frame_rows(&batch.frame)?));
        }
        let options = self.connect_options();

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| Box::new(LoadError(format!("load runtime init failed: {err}"))))?;
        let affected = runtime
            .block_on(async move {
                let mut conn = MySqlConnection::connect_with(&options).await?;
                let mut tx = conn.begin().await?;
                let mut affected = Vec::with_capacity(prepared.len());
                for (batch, rows) in &prepared {
                    let columns = batch.columns();
                    let update_columns = batch.update_columns();
                    let mut total = 0u64;
                    for chunk in rows.chunks(rows_per_statement(columns.len())) {
                        tracing::debug!(table = %batch.table, rows = chunk.len(), "upsert chunk");
                        let mut builder =
                            upsert_query(&batch.table, &columns, &update_columns, chunk);
                        total += builder.build().execute(&mut *tx).await?.rows_affected();
                    }
                    affected.push(total);
                }
                tx.commit().await?;
                conn.close().await?;
                Ok::<Vec<u64>, sqlx::Error>(affected)
            })
            .map_err(|err| Box::new(LoadError(format!("upsert failed: {err}"))))?;

        for (batch, rows) in batches.iter().zip(affected.iter()) {
            tracing::info!(table = %batch.table, records = batch.frame.height(), rows_affected = rows, "loaded table");
        }
        Ok(affected)
    }
}

fn rows_per_statement(column_count: usize) -> usize {
    (MAX_PLACEHOLDERS / column_count.max(1)).max(1)
}

fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Multi-row `INSERT ... ON DUPLICATE KEY UPDATE` for `rows`.
///
/// `update_columns` are overwritten on conflict; when it is empty the first
/// column is reassigned to itself so the conflict is absorbed.
pub fn upsert_query<'args>(
    table: &str,
    columns: &[String],
    update_columns: &[String],
    rows: &[Vec<SqlValue>],
) -> QueryBuilder<'args, MySql> {
    let column_list = columns
        .iter()
        .map(|name| quote_ident(name))
        .collect::<Vec<_>>()
        .join(", ");
    let mut builder = QueryBuilder::new(format!(
        "INSERT INTO {} ({column_list}) ",
        quote_ident(table)
    ));
    builder.push_values(rows, |mut row_builder, row| {
        for value in row {
            match value {
                SqlValue::Null => row_builder.push_bind(None::<String>),
                SqlValue::Bool(v) => row_builder.push_bind(*v),
                SqlValue::Int(v) => row_builder.push_bind(*v),
                SqlValue::Float(v) => row_builder.push_bind(*v),
                SqlValue::Text(v) => row_builder.push_bind(v.clone()),
            };
        }
    });

    let assignments = if update_columns.is_empty() {
        columns
            .first()
            .map(|name| format!("{0} = {0}", quote_ident(name)))
            .unwrap_or_default()
    } else {
        update_columns
            .iter()
            .map(|name| format!("{0} = VALUES({0})", quote_ident(name)))
            .collect::<Vec<_>>()
            .join(", ")
    };
    builder.push(" ON DUPLICATE KEY UPDATE ");
    builder.push(assignments);
    builder
}
