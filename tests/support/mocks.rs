// tests/support/mocks.rs
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use once_cell::sync::Lazy;
use uuid::Uuid;

use sickleave_core::application::dto::{AuthTokenDto, AuthenticatedUser, TokenSubject};
use sickleave_core::application::error::{ApplicationError, ApplicationResult};
use sickleave_core::application::ports::{
    ids::IdGenerator,
    security::{PasswordHasher, TokenManager},
    time::Clock,
};
use sickleave_core::domain::audit::{
    AuditEntry, AuditLogCursor, AuditLogFilter, AuditLogRepository, NewAuditEntry,
};
use sickleave_core::domain::employee::{
    Employee, EmployeeId, EmployeeListCriteria, EmployeeListing, EmployeeNumber,
    EmployeeReadRepository, NewEmployee,
};
use sickleave_core::domain::errors::{DomainError, DomainResult};
use sickleave_core::domain::sick_leave::{
    NewSickLeave, SickLeave, SickLeaveDetails, SickLeaveId, SickLeaveListCriteria,
    SickLeaveListing, SickLeaveReadRepository, SickLeaveStatus, StatusCounts,
};
use sickleave_core::domain::transaction::{TransactionManager, WriteTransaction};
use sickleave_core::domain::user::{
    Email, NewUser, PasswordHash, Role, User, UserId, UserRepository,
};

/// Wall-clock instant every test runs at. Today is 2025-03-03.
pub static FIXED_NOW: Lazy<DateTime<Utc>> =
    Lazy::new(|| Utc.with_ymd_and_hms(2025, 3, 3, 9, 0, 0).unwrap());

pub const ADMIN_TOKEN: &str = "admin-token";
pub const STAFF_TOKEN: &str = "staff-token";
pub const ADMIN_ID: i64 = 1;
pub const STAFF_ID: i64 = 2;
pub const SEED_PASSWORD: &str = "Correct-Horse-42";

#[derive(Default)]
pub struct StoreState {
    pub users: Vec<User>,
    pub employees: HashMap<Uuid, Employee>,
    pub sick_leaves: HashMap<Uuid, SickLeave>,
    pub audit: Vec<AuditEntry>,
}

/// One in-memory database behind every repository port and the transaction manager.
///
/// Transactions stage their writes and apply them on commit; dropping one discards them.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<StoreState>>,
    fail_tx_audit: Arc<AtomicBool>,
    fail_standalone_audit: Arc<AtomicBool>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with the admin (id 1) and staff (id 2) accounts.
    pub fn with_default_users() -> Self {
        let store = Self::new();
        store.add_user(user(ADMIN_ID, "admin@example.com", Role::Admin));
        store.add_user(user(STAFF_ID, "staff@example.com", Role::Staff));
        store
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap()
    }

    pub fn add_user(&self, user: User) {
        self.lock().users.push(user);
    }

    pub fn seed_employee(&self, employee: Employee) -> EmployeeId {
        let id = employee.id;
        self.lock().employees.insert(id.0, employee);
        id
    }

    pub fn seed_sick_leave(&self, record: SickLeave) -> SickLeaveId {
        let id = record.id;
        self.lock().sick_leaves.insert(id.0, record);
        id
    }

    pub fn employee(&self, id: EmployeeId) -> Option<Employee> {
        self.lock().employees.get(&id.0).cloned()
    }

    pub fn sick_leave(&self, id: SickLeaveId) -> Option<SickLeave> {
        self.lock().sick_leaves.get(&id.0).cloned()
    }

    pub fn employee_count(&self) -> usize {
        self.lock().employees.len()
    }

    pub fn sick_leave_count(&self) -> usize {
        self.lock().sick_leaves.len()
    }

    pub fn audit_entries(&self) -> Vec<AuditEntry> {
        self.lock().audit.clone()
    }

    pub fn audit_for(&self, record_id: Uuid) -> Vec<AuditEntry> {
        self.lock()
            .audit
            .iter()
            .filter(|e| e.record_id == record_id)
            .cloned()
            .collect()
    }

    /// Makes every audit write inside a transaction fail.
    pub fn fail_audit_in_transactions(&self, fail: bool) {
        self.fail_tx_audit.store(fail, Ordering::SeqCst);
    }

    /// Makes standalone audit appends fail.
    pub fn fail_standalone_audit(&self, fail: bool) {
        self.fail_standalone_audit.store(fail, Ordering::SeqCst);
    }
}

pub fn user(id: i64, email: &str, role: Role) -> User {
    User {
        id: UserId(id),
        email: Email::new(email).unwrap(),
        password_hash: PasswordHash::new(format!("plain:{SEED_PASSWORD}")).unwrap(),
        first_name: Some("Test".into()),
        last_name: Some(role.as_str().into()),
        role,
        is_active: true,
        created_at: *FIXED_NOW - Duration::days(30),
    }
}

fn details(state: &StoreState, record: &SickLeave) -> SickLeaveDetails {
    let find_user = |id: UserId| {
        state
            .users
            .iter()
            .find(|u| u.id == id)
            .map(User::summary)
    };
    SickLeaveDetails {
        record: record.clone(),
        employee: state
            .employees
            .get(&record.employee_id.0)
            .map(Employee::summary),
        created_by: find_user(record.created_by),
        updated_by: record.updated_by.and_then(find_user),
    }
}

fn newest_first(items: &mut [SickLeaveDetails]) {
    items.sort_by(|a, b| {
        b.record
            .period
            .start()
            .cmp(&a.record.period.start())
            .then(b.record.created_at.cmp(&a.record.created_at))
    });
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn matches_criteria(details: &SickLeaveDetails, criteria: &SickLeaveListCriteria) -> bool {
    let record = &details.record;
    if criteria.employee_id.is_some_and(|id| id != record.employee_id) {
        return false;
    }
    if criteria.status.is_some_and(|s| s != record.status) {
        return false;
    }
    if !criteria.start.contains(record.period.start()) || !criteria.end.contains(record.period.end())
    {
        return false;
    }
    match &criteria.search {
        None => true,
        Some(term) => {
            record
                .notes
                .as_ref()
                .is_some_and(|n| contains_ci(n.as_str(), term))
                || details.employee.as_ref().is_some_and(|e| {
                    contains_ci(&e.first_name, term)
                        || contains_ci(&e.last_name, term)
                        || contains_ci(&e.employee_number, term)
                })
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn count(&self) -> DomainResult<u64> {
        Ok(self.lock().users.len() as u64)
    }

    async fn insert(&self, new_user: NewUser) -> DomainResult<User> {
        let mut state = self.lock();
        if state.users.iter().any(|u| u.email == new_user.email) {
            return Err(DomainError::conflict("email already registered"));
        }
        let user = User {
            id: UserId(state.users.len() as i64 + 1),
            email: new_user.email,
            password_hash: new_user.password_hash,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            role: new_user.role,
            is_active: new_user.is_active,
            created_at: new_user.created_at,
        };
        state.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<User>> {
        Ok(self.lock().users.iter().find(|u| &u.email == email).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        Ok(self.lock().users.iter().find(|u| u.id == id).cloned())
    }
}

#[async_trait]
impl EmployeeReadRepository for InMemoryStore {
    async fn find_by_id(&self, id: EmployeeId) -> DomainResult<Option<Employee>> {
        Ok(self.employee(id))
    }

    async fn find_by_employee_number(
        &self,
        number: &EmployeeNumber,
    ) -> DomainResult<Option<Employee>> {
        Ok(self
            .lock()
            .employees
            .values()
            .find(|e| &e.employee_number == number)
            .cloned())
    }

    async fn list(&self, criteria: &EmployeeListCriteria) -> DomainResult<EmployeeListing> {
        let state = self.lock();
        let mut items: Vec<Employee> = state
            .employees
            .values()
            .filter(|e| e.is_active == criteria.active)
            .filter(|e| match &criteria.search {
                None => true,
                Some(term) => {
                    contains_ci(e.first_name.as_str(), term)
                        || contains_ci(e.last_name.as_str(), term)
                        || contains_ci(e.employee_number.as_str(), term)
                        || e.position
                            .as_ref()
                            .is_some_and(|p| contains_ci(p.as_str(), term))
                }
            })
            .cloned()
            .collect();
        items.sort_by(|a, b| {
            (a.last_name.as_str(), a.first_name.as_str())
                .cmp(&(b.last_name.as_str(), b.first_name.as_str()))
        });
        let total = items.len() as u64;
        if let Some(limit) = criteria.limit {
            items.truncate(limit as usize);
        }
        Ok(EmployeeListing { items, total })
    }
}

#[async_trait]
impl SickLeaveReadRepository for InMemoryStore {
    async fn find_by_id(&self, id: SickLeaveId) -> DomainResult<Option<SickLeaveDetails>> {
        let state = self.lock();
        Ok(state.sick_leaves.get(&id.0).map(|r| details(&state, r)))
    }

    async fn list(&self, criteria: &SickLeaveListCriteria) -> DomainResult<SickLeaveListing> {
        let state = self.lock();
        let mut counts = StatusCounts::default();
        for record in state.sick_leaves.values() {
            match record.status {
                SickLeaveStatus::Active => counts.active += 1,
                SickLeaveStatus::Completed => counts.completed += 1,
                SickLeaveStatus::Cancelled => counts.cancelled += 1,
            }
            counts.total += 1;
        }

        let mut items: Vec<SickLeaveDetails> = state
            .sick_leaves
            .values()
            .map(|r| details(&state, r))
            .filter(|d| matches_criteria(d, criteria))
            .collect();
        newest_first(&mut items);
        let total = items.len() as u64;
        if let Some(limit) = criteria.limit {
            items.truncate(limit as usize);
        }
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
        let state = self.lock();
        let mut items: Vec<SickLeaveDetails> = state
            .sick_leaves
            .values()
            .filter(|r| r.employee_id == employee_id)
            .map(|r| details(&state, r))
            .collect();
        newest_first(&mut items);
        Ok(items)
    }

    async fn list_active_by_employees(
        &self,
        employee_ids: &[EmployeeId],
    ) -> DomainResult<Vec<SickLeaveDetails>> {
        let state = self.lock();
        let mut items: Vec<SickLeaveDetails> = state
            .sick_leaves
            .values()
            .filter(|r| r.status == SickLeaveStatus::Active && employee_ids.contains(&r.employee_id))
            .map(|r| details(&state, r))
            .collect();
        newest_first(&mut items);
        Ok(items)
    }
}

#[async_trait]
impl AuditLogRepository for InMemoryStore {
    async fn insert(&self, entry: NewAuditEntry) -> DomainResult<()> {
        if self.fail_standalone_audit.load(Ordering::SeqCst) {
            return Err(DomainError::Persistence("audit table unavailable".into()));
        }
        self.lock().audit.push(entry.into());
        Ok(())
    }

    async fn list(
        &self,
        filter: &AuditLogFilter,
        cursor: Option<AuditLogCursor>,
        limit: u32,
    ) -> DomainResult<Vec<AuditEntry>> {
        let mut entries: Vec<AuditEntry> = self
            .lock()
            .audit
            .iter()
            .filter(|e| filter.table_name.is_none_or(|t| t == e.table_name))
            .filter(|e| filter.record_id.is_none_or(|id| id == e.record_id))
            .filter(|e| {
                cursor
                    .as_ref()
                    .is_none_or(|c| c.precedes(e.created_at, e.id.0))
            })
            .cloned()
            .collect();
        entries.sort_by(|a, b| (b.created_at, b.id.0).cmp(&(a.created_at, a.id.0)));
        entries.truncate(limit as usize);
        Ok(entries)
    }
}

enum StagedWrite {
    SickLeave(SickLeave),
    Employee(Employee),
    Audit(AuditEntry),
}

pub struct InMemoryTransaction {
    store: InMemoryStore,
    staged: Vec<StagedWrite>,
}

#[async_trait]
impl WriteTransaction for InMemoryTransaction {
    async fn insert_sick_leave(&mut self, record: &NewSickLeave) -> DomainResult<()> {
        if self.store.employee(record.employee_id).is_none() {
            return Err(DomainError::not_found("referenced employee does not exist"));
        }
        self.staged.push(StagedWrite::SickLeave(SickLeave {
            id: record.id,
            employee_id: record.employee_id,
            period: record.period,
            notes: record.notes.clone(),
            status: record.status,
            created_by: record.created_by,
            created_at: record.created_at,
            updated_by: None,
            updated_at: None,
        }));
        Ok(())
    }

    async fn update_sick_leave(&mut self, record: &SickLeave) -> DomainResult<()> {
        if self.store.sick_leave(record.id).is_none() {
            return Err(DomainError::not_found("sick leave not found"));
        }
        self.staged.push(StagedWrite::SickLeave(record.clone()));
        Ok(())
    }

    async fn insert_employee(&mut self, employee: &NewEmployee) -> DomainResult<()> {
        let taken = self
            .store
            .lock()
            .employees
            .values()
            .any(|e| e.employee_number == employee.employee_number);
        if taken {
            return Err(DomainError::conflict("employee number already exists"));
        }
        self.staged
            .push(StagedWrite::Employee(Employee::from(employee.clone())));
        Ok(())
    }

    async fn update_employee(&mut self, employee: &Employee) -> DomainResult<()> {
        if self.store.employee(employee.id).is_none() {
            return Err(DomainError::not_found("employee not found"));
        }
        self.staged.push(StagedWrite::Employee(employee.clone()));
        Ok(())
    }

    async fn insert_audit_entry(&mut self, entry: NewAuditEntry) -> DomainResult<()> {
        if self.store.fail_tx_audit.load(Ordering::SeqCst) {
            return Err(DomainError::Persistence("audit insert failed".into()));
        }
        self.staged.push(StagedWrite::Audit(entry.into()));
        Ok(())
    }

    async fn commit(self: Box<Self>) -> DomainResult<()> {
        let mut state = self.store.lock();
        for write in self.staged {
            match write {
                StagedWrite::SickLeave(record) => {
                    state.sick_leaves.insert(record.id.0, record);
                }
                StagedWrite::Employee(employee) => {
                    state.employees.insert(employee.id.0, employee);
                }
                StagedWrite::Audit(entry) => state.audit.push(entry),
            }
        }
        Ok(())
    }
}

#[async_trait]
impl TransactionManager for InMemoryStore {
    async fn begin(&self) -> DomainResult<Box<dyn WriteTransaction>> {
        Ok(Box::new(InMemoryTransaction {
            store: self.clone(),
            staged: Vec::new(),
        }))
    }
}

/// Starts at [`FIXED_NOW`] and only moves when told to.
pub struct ManualClock(Mutex<DateTime<Utc>>);

impl Default for ManualClock {
    fn default() -> Self {
        Self(Mutex::new(*FIXED_NOW))
    }
}

impl ManualClock {
    pub fn advance(&self, by: Duration) {
        let mut now = self.0.lock().unwrap();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

/// Ids `00000000-0000-0000-0000-000000000001`, `...02`, and so on.
#[derive(Default)]
pub struct SequentialIds(AtomicU64);

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> Uuid {
        Uuid::from_u128(u128::from(self.0.fetch_add(1, Ordering::SeqCst) + 1))
    }
}

/// Stores passwords as `plain:<password>`.
pub struct PlainPasswordHasher;

#[async_trait]
impl PasswordHasher for PlainPasswordHasher {
    async fn hash(&self, password: &str) -> ApplicationResult<String> {
        Ok(format!("plain:{password}"))
    }

    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()> {
        if expected_hash == format!("plain:{password}") {
            Ok(())
        } else {
            Err(ApplicationError::unauthorized("invalid credentials"))
        }
    }
}

pub fn authenticated(id: i64, email: &str, role: Role) -> AuthenticatedUser {
    AuthenticatedUser {
        id: UserId(id),
        email: email.into(),
        role,
        capabilities: role.default_capabilities(),
        issued_at: *FIXED_NOW,
        expires_at: *FIXED_NOW + Duration::hours(1),
    }
}

/// Accepts exactly [`ADMIN_TOKEN`] and [`STAFF_TOKEN`] and issues them by role.
pub struct DummyTokenManager;

#[async_trait]
impl TokenManager for DummyTokenManager {
    async fn issue(&self, subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        let token = match subject.role {
            Role::Admin => ADMIN_TOKEN,
            Role::Staff => STAFF_TOKEN,
        };
        Ok(AuthTokenDto {
            token: token.into(),
            issued_at: *FIXED_NOW,
            expires_at: *FIXED_NOW + Duration::hours(1),
            expires_in: 3600,
        })
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        match token {
            ADMIN_TOKEN => Ok(authenticated(ADMIN_ID, "admin@example.com", Role::Admin)),
            STAFF_TOKEN => Ok(authenticated(STAFF_ID, "staff@example.com", Role::Staff)),
            _ => Err(ApplicationError::unauthorized("invalid token")),
        }
    }
}
