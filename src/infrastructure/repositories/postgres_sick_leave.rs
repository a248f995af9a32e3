use super::{like_pattern, map_sqlx};
use crate::domain::employee::{EmployeeId, EmployeeSummary};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::sick_leave::{
    LeavePeriod, Notes, SickLeave, SickLeaveDetails, SickLeaveId, SickLeaveListCriteria,
    SickLeaveListing, SickLeaveReadRepository, StatusCounts,
};
use crate::domain::user::{UserId, UserSummary};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

/// Record columns plus the resolved employee, creator and updater display fields.
const DETAILS_SELECT: &str = "SELECT s.id, s.employee_id, s.start_date, s.end_date, \
     s.doctor_visit_date, s.notes, s.status, s.created_by, s.created_at, s.updated_by, s.updated_at, \
     e.employee_number, e.first_name AS employee_first_name, e.last_name AS employee_last_name, \
     e.position AS employee_position, e.is_active AS employee_is_active, \
     cu.email AS creator_email, cu.first_name AS creator_first_name, cu.last_name AS creator_last_name, \
     uu.email AS updater_email, uu.first_name AS updater_first_name, uu.last_name AS updater_last_name";

const DETAILS_FROM: &str = " FROM sick_leaves s \
     JOIN employees e ON e.id = s.employee_id \
     LEFT JOIN users cu ON cu.id = s.created_by \
     LEFT JOIN users uu ON uu.id = s.updated_by";

const NEWEST_FIRST: &str = " ORDER BY s.start_date DESC, s.created_at DESC, s.id DESC";

const COUNTS_SELECT: &str = "SELECT \
     COUNT(*) FILTER (WHERE status = 'active') AS active_count, \
     COUNT(*) FILTER (WHERE status = 'completed') AS completed_count, \
     COUNT(*) FILTER (WHERE status = 'cancelled') AS cancelled_count, \
     COUNT(*) AS all_count \
     FROM sick_leaves";

#[derive(Clone)]
pub struct PostgresSickLeaveRepository {
    pool: PgPool,
}

impl PostgresSickLeaveRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SickLeaveDetailsRow {
    id: Uuid,
    employee_id: Uuid,
    start_date: NaiveDate,
    end_date: NaiveDate,
    doctor_visit_date: Option<NaiveDate>,
    notes: Option<String>,
    status: String,
    created_by: i64,
    created_at: DateTime<Utc>,
    updated_by: Option<i64>,
    updated_at: Option<DateTime<Utc>>,
    employee_number: String,
    employee_first_name: String,
    employee_last_name: String,
    employee_position: Option<String>,
    employee_is_active: bool,
    creator_email: Option<String>,
    creator_first_name: Option<String>,
    creator_last_name: Option<String>,
    updater_email: Option<String>,
    updater_first_name: Option<String>,
    updater_last_name: Option<String>,
}

fn user_summary(
    id: UserId,
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
) -> Option<UserSummary> {
    email.map(|email| UserSummary {
        id,
        email,
        first_name,
        last_name,
    })
}

impl TryFrom<SickLeaveDetailsRow> for SickLeaveDetails {
    type Error = DomainError;

    fn try_from(row: SickLeaveDetailsRow) -> Result<Self, Self::Error> {
        let created_by = UserId::new(row.created_by)?;
        let updated_by = row.updated_by.map(UserId::new).transpose()?;
        let employee_id = EmployeeId(row.employee_id);

        let record = SickLeave {
            id: SickLeaveId(row.id),
            employee_id,
            period: LeavePeriod::new(row.start_date, row.end_date, row.doctor_visit_date)?,
            notes: Notes::parse(row.notes)?,
            status: row.status.parse()?,
            created_by,
            created_at: row.created_at,
            updated_by,
            updated_at: row.updated_at,
        };

        Ok(SickLeaveDetails {
            record,
            employee: Some(EmployeeSummary {
                id: employee_id,
                employee_number: row.employee_number,
                first_name: row.employee_first_name,
                last_name: row.employee_last_name,
                position: row.employee_position,
                is_active: row.employee_is_active,
            }),
            created_by: user_summary(
                created_by,
                row.creator_email,
                row.creator_first_name,
                row.creator_last_name,
            ),
            updated_by: updated_by.and_then(|id| {
                user_summary(
                    id,
                    row.updater_email,
                    row.updater_first_name,
                    row.updater_last_name,
                )
            }),
        })
    }
}

#[derive(Debug, FromRow)]
struct ListedSickLeaveRow {
    #[sqlx(flatten)]
    details: SickLeaveDetailsRow,
    #[sqlx(flatten)]
    counts: CountsRow,
    filtered_total: i64,
}

#[derive(Debug, Clone, Copy, FromRow)]
struct CountsRow {
    active_count: i64,
    completed_count: i64,
    cancelled_count: i64,
    all_count: i64,
}

impl From<CountsRow> for StatusCounts {
    fn from(row: CountsRow) -> Self {
        Self {
            active: row.active_count as u64,
            completed: row.completed_count as u64,
            cancelled: row.cancelled_count as u64,
            total: row.all_count as u64,
        }
    }
}

impl PostgresSickLeaveRepository {
    fn apply_conditions<'a>(
        builder: &mut QueryBuilder<'a, Postgres>,
        criteria: &'a SickLeaveListCriteria,
    ) {
        builder.push(" WHERE TRUE");
        if let Some(employee_id) = criteria.employee_id {
            builder.push(" AND s.employee_id = ");
            builder.push_bind(employee_id.0);
        }
        if let Some(status) = criteria.status {
            builder.push(" AND s.status = ");
            builder.push_bind(status.as_str());
        }
        if let Some(min) = criteria.start.min {
            builder.push(" AND s.start_date >= ");
            builder.push_bind(min);
        }
        if let Some(max) = criteria.start.max {
            builder.push(" AND s.start_date <= ");
            builder.push_bind(max);
        }
        if let Some(min) = criteria.end.min {
            builder.push(" AND s.end_date >= ");
            builder.push_bind(min);
        }
        if let Some(max) = criteria.end.max {
            builder.push(" AND s.end_date <= ");
            builder.push_bind(max);
        }
        if let Some(search) = &criteria.search {
            let pattern = like_pattern(search);
            builder.push(" AND (s.notes ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR e.first_name ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR e.last_name ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR e.employee_number ILIKE ");
            builder.push_bind(pattern);
            builder.push(")");
        }
    }

    async fn fetch_details(
        &self,
        mut builder: QueryBuilder<'_, Postgres>,
    ) -> DomainResult<Vec<SickLeaveDetails>> {
        let rows = builder
            .build_query_as::<SickLeaveDetailsRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        rows.into_iter().map(SickLeaveDetails::try_from).collect()
    }
}

#[async_trait]
impl SickLeaveReadRepository for PostgresSickLeaveRepository {
    async fn find_by_id(&self, id: SickLeaveId) -> DomainResult<Option<SickLeaveDetails>> {
        let row = sqlx::query_as::<_, SickLeaveDetailsRow>(&format!(
            "{DETAILS_SELECT}{DETAILS_FROM} WHERE s.id = $1"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(SickLeaveDetails::try_from).transpose()
    }

    async fn list(&self, criteria: &SickLeaveListCriteria) -> DomainResult<SickLeaveListing> {
        // Page, filtered total and global counts come back in one statement.
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "WITH counts AS ({COUNTS_SELECT}) \
             {DETAILS_SELECT}, COUNT(*) OVER () AS filtered_total, \
             counts.active_count, counts.completed_count, counts.cancelled_count, counts.all_count\
             {DETAILS_FROM} CROSS JOIN counts"
        ));
        Self::apply_conditions(&mut builder, criteria);
        builder.push(NEWEST_FIRST);
        if let Some(limit) = criteria.limit {
            builder.push(" LIMIT ");
            builder.push_bind(i64::from(limit));
        }

        let rows = builder
            .build_query_as::<ListedSickLeaveRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let Some(first) = rows.first() else {
            let counts = sqlx::query_as::<_, CountsRow>(COUNTS_SELECT)
                .fetch_one(&self.pool)
                .await
                .map_err(map_sqlx)?;
            return Ok(SickLeaveListing {
                items: Vec::new(),
                total: 0,
                counts: counts.into(),
            });
        };

        let total = first.filtered_total as u64;
        let counts = StatusCounts::from(first.counts);
        let items = rows
            .into_iter()
            .map(|row| SickLeaveDetails::try_from(row.details))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SickLeaveListing {
            items,
            total,
            counts,
        })
    }

    async fn list_by_employee(
        &self,
        employee_id: EmployeeId,
    ) -> DomainResult<Vec<SickLeaveDetails>> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("{DETAILS_SELECT}{DETAILS_FROM} WHERE s.employee_id = "));
        builder.push_bind(employee_id.0);
        builder.push(NEWEST_FIRST);
        self.fetch_details(builder).await
    }

    async fn list_active_by_employees(
        &self,
        employee_ids: &[EmployeeId],
    ) -> DomainResult<Vec<SickLeaveDetails>> {
        if employee_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = employee_ids.iter().map(|id| id.0).collect();
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "{DETAILS_SELECT}{DETAILS_FROM} WHERE s.status = 'active' AND s.employee_id = ANY("
        ));
        builder.push_bind(ids);
        builder.push(")");
        builder.push(NEWEST_FIRST);
        self.fetch_details(builder).await
    }
}
