//! State store operations on the single aggregate record.
//!
//! Every operation is at most one read followed by one write. Replaces are
//! deliberately not serialized: concurrent callers race last-write-wins, and
//! this layer adds no locking or versioning on top of SQLite's single-row
//! write atomicity.

use chrono::Utc;
use serde_json::Value;
use sqlx::{Row, SqlitePool};

use crate::defaults;
use crate::errors::AppError;
use crate::models::OrgChartState;

/// Well-known key of the single aggregate record.
const STATE_SLOT_ID: i64 = 1;

/// Database repository for the org-chart state.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Fetch the aggregate record if it exists.
    async fn find_state(&self) -> Result<Option<OrgChartState>, AppError> {
        let row = sqlx::query(
            "SELECT employees, custom_training_topics, available_training_topics, last_updated \
             FROM org_chart_state WHERE id = ?",
        )
        .bind(STATE_SLOT_ID)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| state_from_row(&row)).transpose()
    }

    /// Return the current state, seeding the default dataset if none exists.
    ///
    /// Seeding is an atomic create-if-absent on the slot key, so two
    /// concurrent first reads cannot produce two records; the loser of the
    /// insert simply reads back the winner's row.
    pub async fn get_or_seed_state(&self) -> Result<OrgChartState, AppError> {
        if let Some(state) = self.find_state().await? {
            return Ok(state);
        }

        let seed = defaults::default_state();
        sqlx::query(
            "INSERT OR IGNORE INTO org_chart_state \
             (id, employees, custom_training_topics, available_training_topics) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(STATE_SLOT_ID)
        .bind(serde_json::to_string(&seed.employees)?)
        .bind(serde_json::to_string(&seed.custom_training_topics)?)
        .bind(serde_json::to_string(&seed.available_training_topics)?)
        .execute(&self.pool)
        .await?;

        tracing::info!("No org-chart state found, seeded default dataset");

        self.find_state()
            .await?
            .ok_or_else(|| AppError::Database("State slot missing after seed".to_string()))
    }

    /// Replace the whole aggregate record with `new_state`.
    ///
    /// The caller has already shape-checked `employees`. If the record exists
    /// its list fields are overwritten and `last_updated` is set to now; if
    /// not, the payload is inserted verbatim and `last_updated` takes the
    /// column default. Read-then-write on purpose: concurrent replaces are
    /// last-write-wins with no conflict detection.
    pub async fn replace_state(&self, new_state: &OrgChartState) -> Result<(), AppError> {
        let employees_json = serde_json::to_string(&new_state.employees)?;
        let custom_json = serde_json::to_string(&new_state.custom_training_topics)?;
        let available_json = serde_json::to_string(&new_state.available_training_topics)?;

        let existing = self.find_state().await?;

        if existing.is_some() {
            let now = Utc::now().to_rfc3339();
            sqlx::query(
                "UPDATE org_chart_state SET employees = ?, custom_training_topics = ?, \
                 available_training_topics = ?, last_updated = ? WHERE id = ?",
            )
            .bind(&employees_json)
            .bind(&custom_json)
            .bind(&available_json)
            .bind(&now)
            .bind(STATE_SLOT_ID)
            .execute(&self.pool)
            .await?;
        } else {
            sqlx::query(
                "INSERT INTO org_chart_state \
                 (id, employees, custom_training_topics, available_training_topics) \
                 VALUES (?, ?, ?, ?)",
            )
            .bind(STATE_SLOT_ID)
            .bind(&employees_json)
            .bind(&custom_json)
            .bind(&available_json)
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }

    /// Set the photo reference of a single employee within the aggregate record.
    ///
    /// First employee whose `id` matches wins; id uniqueness is the client's
    /// contract. The stored list is untouched when no match is found.
    pub async fn set_employee_photo(
        &self,
        employee_id: i64,
        stored_path: &str,
    ) -> Result<(), AppError> {
        let Some(mut state) = self.find_state().await? else {
            return Err(AppError::NotFound(format!(
                "Employee {} not found",
                employee_id
            )));
        };

        let matched = state.employees.iter_mut().find(|employee| {
            employee
                .as_object()
                .and_then(|fields| fields.get("id"))
                .and_then(Value::as_i64)
                == Some(employee_id)
        });

        let Some(Value::Object(fields)) = matched else {
            return Err(AppError::NotFound(format!(
                "Employee {} not found",
                employee_id
            )));
        };

        let now = Utc::now().to_rfc3339();
        fields.insert("photo".to_string(), Value::String(stored_path.to_string()));
        fields.insert("lastUpdated".to_string(), Value::String(now));

        // Only the employee's own lastUpdated changes; the record-level
        // timestamp tracks full replaces.
        sqlx::query("UPDATE org_chart_state SET employees = ? WHERE id = ?")
            .bind(serde_json::to_string(&state.employees)?)
            .bind(STATE_SLOT_ID)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

fn state_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<OrgChartState, AppError> {
    let employees: String = row.get("employees");
    let custom: String = row.get("custom_training_topics");
    let available: String = row.get("available_training_topics");

    Ok(OrgChartState {
        employees: serde_json::from_str(&employees)?,
        custom_training_topics: serde_json::from_str(&custom)?,
        available_training_topics: serde_json::from_str(&available)?,
        last_updated: row.get("last_updated"),
    })
}
