use super::SickLeaveQueryService;
use crate::{
    application::{
        dto::{
            AuthenticatedUser, SickLeaveDto, SickLeaveFilterView, SickLeaveListDto,
            SickLeaveListMeta, StatusCountsDto,
        },
        error::{ApplicationError, ApplicationResult, FieldErrors},
        ports::cache::keys,
        queries::{cached::cached, ensure_read_capability, normalize_limit},
        validation::DATE_FORMAT,
    },
    domain::{
        employee::EmployeeId,
        sick_leave::{DateBounds, RelativePeriod, SickLeaveListCriteria, SickLeaveStatus},
    },
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Raw list filter as received.
///
/// `start_date` is a lower bound on the start date and `end_date` an upper bound on the end
/// date. A `period` bucket replaces whichever of the two it constrains.
#[derive(Debug, Clone, Default)]
pub struct ListSickLeavesQuery {
    pub employee_id: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub period: Option<String>,
    pub search: Option<String>,
    pub limit: Option<u32>,
}

/// The part of a list response that depends only on the resolved criteria. Requests sharing
/// an entry still echo their own filter.
#[derive(Serialize, Deserialize)]
struct CachedPage {
    total: u64,
    items: Vec<SickLeaveDto>,
    counts: StatusCountsDto,
}

impl SickLeaveQueryService {
    pub async fn list_sick_leaves(
        &self,
        actor: &AuthenticatedUser,
        query: ListSickLeavesQuery,
    ) -> ApplicationResult<SickLeaveListDto> {
        ensure_read_capability(actor, "sick_leaves")?;
        let (criteria, filter) = self.resolve_criteria(query)?;
        let key = keys::sick_leave_list(&criteria.cache_key());

        let page = cached(self.cache.as_ref(), &key, self.ttls.list, || async {
            let listing = self.repo.list(&criteria).await?;
            Ok(CachedPage {
                total: listing.total,
                items: listing.items.into_iter().map(Into::into).collect(),
                counts: listing.counts.into(),
            })
        })
        .await?;

        Ok(SickLeaveListDto {
            meta: SickLeaveListMeta {
                total: page.total,
                count: page.items.len(),
                filter,
            },
            items: page.items,
            counts: page.counts,
        })
    }

    fn resolve_criteria(
        &self,
        query: ListSickLeavesQuery,
    ) -> ApplicationResult<(SickLeaveListCriteria, SickLeaveFilterView)> {
        let mut errors = FieldErrors::new();

        let employee_id = parse_field::<EmployeeId>(&mut errors, "employeeId", query.employee_id);
        let status = parse_field::<SickLeaveStatus>(&mut errors, "status", query.status);
        let period = parse_field::<RelativePeriod>(&mut errors, "period", query.period);
        let start_date = parse_date(&mut errors, "startDate", query.start_date);
        let end_date = parse_date(&mut errors, "endDate", query.end_date);
        let search = query
            .search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let limit = normalize_limit(query.limit);

        if !errors.is_empty() {
            return Err(ApplicationError::FieldErrors(errors));
        }

        let mut start = DateBounds {
            min: start_date,
            max: None,
        };
        let mut end = DateBounds {
            min: None,
            max: end_date,
        };
        if let Some(period) = period {
            period.apply(self.clock.today(), &mut start, &mut end);
        }

        let filter = SickLeaveFilterView {
            employee_id: employee_id.map(Into::into),
            status: status.map(|s| s.as_str().to_string()),
            start_date,
            end_date,
            period: period.map(|p| p.as_str().to_string()),
            search: search.clone(),
            limit,
        };
        let criteria = SickLeaveListCriteria {
            employee_id,
            status,
            start,
            end,
            search,
            limit,
        };
        Ok((criteria, filter))
    }
}

fn parse_field<T: std::str::FromStr>(
    errors: &mut FieldErrors,
    field: &str,
    raw: Option<String>,
) -> Option<T> {
    let raw = raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())?;
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            errors.add(field, format!("invalid value '{raw}'"));
            None
        }
    }
}

fn parse_date(errors: &mut FieldErrors, field: &str, raw: Option<String>) -> Option<NaiveDate> {
    let raw = raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())?;
    match NaiveDate::parse_from_str(&raw, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.add(field, "must be a valid date in YYYY-MM-DD format");
            None
        }
    }
}
