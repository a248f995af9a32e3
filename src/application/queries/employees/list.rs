use std::collections::HashMap;

use super::EmployeeQueryService;
use crate::{
    application::{
        dto::{
            AuthenticatedUser, EmployeeDto, EmployeeListDto, EmployeeListFilterView,
            EmployeeListMeta, SickLeaveDto,
        },
        error::ApplicationResult,
        ports::cache::keys,
        queries::{cached::cached, ensure_read_capability, normalize_limit},
    },
    domain::employee::{EmployeeId, EmployeeListCriteria},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct ListEmployeesQuery {
    /// Defaults to `true`: only active employees.
    pub active: Option<bool>,
    pub search: Option<String>,
    /// Embeds each employee's `active` sick leaves.
    pub include_sick_leaves: bool,
    pub limit: Option<u32>,
}

/// Cached independently of the filter echo, which differs between equivalent requests.
#[derive(Serialize, Deserialize)]
struct CachedPage {
    total: u64,
    items: Vec<EmployeeDto>,
}

impl EmployeeQueryService {
    pub async fn list_employees(
        &self,
        actor: &AuthenticatedUser,
        query: ListEmployeesQuery,
    ) -> ApplicationResult<EmployeeListDto> {
        ensure_read_capability(actor, "employees")?;
        let filter = EmployeeListFilterView {
            active: query.active.unwrap_or(true),
            search: query
                .search
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            include_sick_leaves: query.include_sick_leaves,
            limit: normalize_limit(query.limit),
        };
        let key = keys::employee_list(&cache_key(&filter));

        let page = cached(self.cache.as_ref(), &key, self.ttls.list, || async {
            let criteria = EmployeeListCriteria {
                active: filter.active,
                search: filter.search.clone(),
                limit: filter.limit,
            };
            let listing = self.employees.list(&criteria).await?;

            let mut embedded = if filter.include_sick_leaves {
                let ids: Vec<EmployeeId> = listing.items.iter().map(|e| e.id).collect();
                group_by_employee(self.sick_leaves.list_active_by_employees(&ids).await?)
            } else {
                HashMap::new()
            };

            let items: Vec<EmployeeDto> = listing
                .items
                .into_iter()
                .map(|employee| {
                    let id: Uuid = employee.id.into();
                    let dto = EmployeeDto::from(employee);
                    if filter.include_sick_leaves {
                        dto.with_sick_leaves(embedded.remove(&id).unwrap_or_default())
                    } else {
                        dto
                    }
                })
                .collect();

            Ok(CachedPage {
                total: listing.total,
                items,
            })
        })
        .await?;

        Ok(EmployeeListDto {
            meta: EmployeeListMeta {
                total: page.total,
                count: page.items.len(),
                filter,
            },
            items: page.items,
        })
    }
}

fn group_by_employee(
    records: Vec<crate::domain::sick_leave::SickLeaveDetails>,
) -> HashMap<Uuid, Vec<SickLeaveDto>> {
    let mut grouped: HashMap<Uuid, Vec<SickLeaveDto>> = HashMap::new();
    for details in records {
        let dto = SickLeaveDto::from(details);
        grouped.entry(dto.employee_id).or_default().push(dto);
    }
    grouped
}

fn cache_key(filter: &EmployeeListFilterView) -> String {
    let mut params = vec![
        format!("active={}", filter.active),
        format!("includeSickLeaves={}", filter.include_sick_leaves),
    ];
    if let Some(limit) = filter.limit {
        params.push(format!("limit={limit}"));
    }
    if let Some(search) = &filter.search {
        params.push(format!("search={}", search.to_lowercase()));
    }
    params.sort();
    params.join("&")
}
