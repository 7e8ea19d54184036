use std::collections::HashMap;
use std::str::FromStr;

use anyhow::anyhow;
use bigdecimal::BigDecimal;
use serde::de::DeserializeOwned;
use tracing::instrument;

use jobly_core::AppError;
use jobly_db::{DataStore, Row, SqlParam, sql_for_partial_update};
use jobly_models::{Company, Job, JobDetail, JobListing, JobSearchParams, NewJobDto, UpdateJobDto};

const JOB_COLUMNS: &str =
    r#"id, title, salary, equity::text AS equity, company_handle AS "companyHandle""#;

pub struct JobService;

impl JobService {
    #[instrument(skip(store))]
    pub async fn create(store: &dyn DataStore, dto: NewJobDto) -> Result<Job, AppError> {
        let query = format!(
            "INSERT INTO jobs (title, salary, equity, company_handle)
             VALUES ($1, $2, $3, $4)
             RETURNING {}",
            JOB_COLUMNS
        );

        let params = vec![
            SqlParam::from(dto.title),
            SqlParam::from(dto.salary),
            SqlParam::from(parse_equity(dto.equity.as_deref())?),
            SqlParam::from(dto.company_handle),
        ];

        let rows = store.execute(&query, params).await?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| AppError::internal_error("Insert returned no row"))?;

        from_row(row)
    }

    /// Lists jobs ordered by title, narrowed by whichever filters are set.
    #[instrument(skip(store))]
    pub async fn find_all(
        store: &dyn DataStore,
        filters: JobSearchParams,
    ) -> Result<Vec<JobListing>, AppError> {
        let mut query = String::from(
            r#"SELECT j.id, j.title, j.salary, j.equity::text AS equity,
                      j.company_handle AS "companyHandle", c.name AS "companyName"
               FROM jobs j
               LEFT JOIN companies AS c ON c.handle = j.company_handle"#,
        );
        let mut where_expressions: Vec<String> = Vec::new();
        let mut params: Vec<SqlParam> = Vec::new();

        if let Some(min_salary) = filters.min_salary {
            params.push(min_salary.into());
            where_expressions.push(format!("j.salary >= ${}", params.len()));
        }

        if filters.has_equity {
            where_expressions.push("j.equity > 0".to_string());
        }

        if let Some(title) = filters.title {
            params.push(format!("%{}%", title).into());
            where_expressions.push(format!("j.title ILIKE ${}", params.len()));
        }

        if !where_expressions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&where_expressions.join(" AND "));
        }

        let rows = store.execute_ordered(&query, params, "title").await?;
        rows.into_iter().map(from_row).collect()
    }

    #[instrument(skip(store))]
    pub async fn get(store: &dyn DataStore, id: i32) -> Result<JobDetail, AppError> {
        let query = format!("SELECT {} FROM jobs WHERE id = $1", JOB_COLUMNS);
        let job: Job = match store.execute(&query, vec![id.into()]).await?.into_iter().next() {
            Some(row) => from_row(row)?,
            None => return Err(no_job(id)),
        };

        let company: Option<Company> = store
            .execute(
                r#"SELECT handle, name, description,
                          num_employees AS "numEmployees", logo_url AS "logoUrl"
                   FROM companies
                   WHERE handle = $1"#,
                vec![job.company_handle.as_str().into()],
            )
            .await?
            .into_iter()
            .next()
            .map(from_row)
            .transpose()?;

        Ok(JobDetail::from_job(job, company))
    }

    /// Applies the fields present in `dto`. The company a job belongs to
    /// cannot change.
    #[instrument(skip(store))]
    pub async fn update(
        store: &dyn DataStore,
        id: i32,
        dto: UpdateJobDto,
    ) -> Result<Job, AppError> {
        let mut fields: Vec<(&str, SqlParam)> = Vec::new();
        if let Some(title) = dto.title {
            fields.push(("title", title.into()));
        }
        if let Some(salary) = dto.salary {
            fields.push(("salary", salary.into()));
        }
        if let Some(equity) = dto.equity.as_deref() {
            fields.push(("equity", parse_equity(Some(equity))?.into()));
        }

        let update = sql_for_partial_update(fields, &HashMap::new())?;
        let query = format!(
            "UPDATE jobs SET {} WHERE id = {} RETURNING {}",
            update.set_cols,
            update.next_placeholder(),
            JOB_COLUMNS
        );

        let mut params = update.into_values();
        params.push(id.into());

        match store.execute(&query, params).await?.into_iter().next() {
            Some(row) => from_row(row),
            None => Err(no_job(id)),
        }
    }

    #[instrument(skip(store))]
    pub async fn remove(store: &dyn DataStore, id: i32) -> Result<(), AppError> {
        let rows = store
            .execute("DELETE FROM jobs WHERE id = $1 RETURNING id", vec![id.into()])
            .await?;

        if rows.is_empty() {
            return Err(no_job(id));
        }

        Ok(())
    }
}

fn no_job(id: i32) -> AppError {
    AppError::not_found(anyhow!("No job: {}", id))
}

fn parse_equity(equity: Option<&str>) -> Result<Option<BigDecimal>, AppError> {
    equity
        .map(|e| {
            BigDecimal::from_str(e)
                .map_err(|_| AppError::bad_request(anyhow!("equity must be a decimal between 0 and 1")))
        })
        .transpose()
}

fn from_row<T: DeserializeOwned>(row: Row) -> Result<T, AppError> {
    serde_json::from_value(row).map_err(AppError::internal)
}
