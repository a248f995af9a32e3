use super::{like_pattern, map_sqlx};
use crate::domain::employee::{
    Employee, EmployeeId, EmployeeListCriteria, EmployeeListing, EmployeeNumber,
    EmployeeReadRepository, PersonName, Position,
};
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

pub(super) const EMPLOYEE_COLUMNS: &str =
    "id, employee_number, first_name, last_name, position, is_active, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresEmployeeRepository {
    pool: PgPool,
}

impl PostgresEmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
pub(super) struct EmployeeRow {
    id: Uuid,
    employee_number: String,
    first_name: String,
    last_name: String,
    position: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = DomainError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        Ok(Employee {
            id: EmployeeId(row.id),
            employee_number: EmployeeNumber::new(row.employee_number)?,
            first_name: PersonName::new(row.first_name)?,
            last_name: PersonName::new(row.last_name)?,
            position: Position::parse(row.position),
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct ListedEmployeeRow {
    #[sqlx(flatten)]
    employee: EmployeeRow,
    filtered_total: i64,
}

#[async_trait]
impl EmployeeReadRepository for PostgresEmployeeRepository {
    async fn find_by_id(&self, id: EmployeeId) -> DomainResult<Option<Employee>> {
        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = $1"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Employee::try_from).transpose()
    }

    async fn find_by_employee_number(
        &self,
        number: &EmployeeNumber,
    ) -> DomainResult<Option<Employee>> {
        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE employee_number = $1"
        ))
        .bind(number.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Employee::try_from).transpose()
    }

    async fn list(&self, criteria: &EmployeeListCriteria) -> DomainResult<EmployeeListing> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {EMPLOYEE_COLUMNS}, COUNT(*) OVER () AS filtered_total FROM employees WHERE is_active = "
        ));
        builder.push_bind(criteria.active);

        if let Some(search) = &criteria.search {
            let pattern = like_pattern(search);
            builder.push(" AND (first_name ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR last_name ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR employee_number ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR position ILIKE ");
            builder.push_bind(pattern);
            builder.push(")");
        }

        builder.push(" ORDER BY last_name ASC, first_name ASC, id ASC");
        if let Some(limit) = criteria.limit {
            builder.push(" LIMIT ");
            builder.push_bind(i64::from(limit));
        }

        let rows = builder
            .build_query_as::<ListedEmployeeRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let total = rows.first().map_or(0, |row| row.filtered_total as u64);
        let items = rows
            .into_iter()
            .map(|row| Employee::try_from(row.employee))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(EmployeeListing { items, total })
    }
}
