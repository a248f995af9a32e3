use super::{postgres_audit_log::bind_entry, map_sqlx};
use crate::domain::audit::NewAuditEntry;
use crate::domain::employee::{Employee, NewEmployee};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::sick_leave::{NewSickLeave, SickLeave};
use crate::domain::transaction::{TransactionManager, WriteTransaction};
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

#[derive(Clone)]
pub struct PostgresTransactionManager {
    pool: PgPool,
}

impl PostgresTransactionManager {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionManager for PostgresTransactionManager {
    async fn begin(&self) -> DomainResult<Box<dyn WriteTransaction>> {
        let tx = self.pool.begin().await.map_err(map_sqlx)?;
        Ok(Box::new(PostgresWriteTransaction { tx }))
    }
}

/// Rolls back on drop unless committed.
pub struct PostgresWriteTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl WriteTransaction for PostgresWriteTransaction {
    async fn insert_sick_leave(&mut self, record: &NewSickLeave) -> DomainResult<()> {
        sqlx::query(
            "INSERT INTO sick_leaves (id, employee_id, start_date, end_date, doctor_visit_date, \
             notes, status, created_by, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(record.id.0)
        .bind(record.employee_id.0)
        .bind(record.period.start())
        .bind(record.period.end())
        .bind(record.period.doctor_visit())
        .bind(record.notes.as_ref().map(|n| n.as_str().to_string()))
        .bind(record.status.as_str())
        .bind(i64::from(record.created_by))
        .bind(record.created_at)
        .execute(&mut *self.tx)
        .await
        .map_err(map_sqlx)?;
        Ok(())
    }

    async fn update_sick_leave(&mut self, record: &SickLeave) -> DomainResult<()> {
        let result = sqlx::query(
            "UPDATE sick_leaves SET employee_id = $2, start_date = $3, end_date = $4, \
             doctor_visit_date = $5, notes = $6, status = $7, updated_by = $8, updated_at = $9 \
             WHERE id = $1",
        )
        .bind(record.id.0)
        .bind(record.employee_id.0)
        .bind(record.period.start())
        .bind(record.period.end())
        .bind(record.period.doctor_visit())
        .bind(record.notes.as_ref().map(|n| n.as_str().to_string()))
        .bind(record.status.as_str())
        .bind(record.updated_by.map(i64::from))
        .bind(record.updated_at)
        .execute(&mut *self.tx)
        .await
        .map_err(map_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("sick leave not found".into()));
        }
        Ok(())
    }

    async fn insert_employee(&mut self, employee: &NewEmployee) -> DomainResult<()> {
        sqlx::query(
            "INSERT INTO employees (id, employee_number, first_name, last_name, position, \
             is_active, created_at) VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(employee.id.0)
        .bind(employee.employee_number.as_str())
        .bind(employee.first_name.as_str())
        .bind(employee.last_name.as_str())
        .bind(employee.position.as_ref().map(|p| p.as_str().to_string()))
        .bind(employee.is_active)
        .bind(employee.created_at)
        .execute(&mut *self.tx)
        .await
        .map_err(map_sqlx)?;
        Ok(())
    }

    async fn update_employee(&mut self, employee: &Employee) -> DomainResult<()> {
        let result = sqlx::query(
            "UPDATE employees SET employee_number = $2, first_name = $3, last_name = $4, \
             position = $5, is_active = $6, updated_at = $7 WHERE id = $1",
        )
        .bind(employee.id.0)
        .bind(employee.employee_number.as_str())
        .bind(employee.first_name.as_str())
        .bind(employee.last_name.as_str())
        .bind(employee.position.as_ref().map(|p| p.as_str().to_string()))
        .bind(employee.is_active)
        .bind(employee.updated_at)
        .execute(&mut *self.tx)
        .await
        .map_err(map_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("employee not found".into()));
        }
        Ok(())
    }

    async fn insert_audit_entry(&mut self, entry: NewAuditEntry) -> DomainResult<()> {
        bind_entry(entry)
            .execute(&mut *self.tx)
            .await
            .map_err(map_sqlx)?;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> DomainResult<()> {
        self.tx.commit().await.map_err(map_sqlx)
    }
}
