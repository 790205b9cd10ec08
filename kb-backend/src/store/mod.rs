//! Knowledge store — accounts and Q&A entries kept in memory and mirrored
//! to JSON array files under the data directory.

pub mod file_ops;
pub mod json_store;
pub mod search;
pub mod seed;

use kb_types::{Account, NewAccount, NewQuery, Query};

pub use json_store::JsonFileStore;
pub use search::SearchFilter;

/// Storage contract used by the HTTP handlers
pub trait KnowledgeStore: Send + Sync {
    fn account_count(&self) -> usize;
    fn query_count(&self) -> usize;

    fn get_account_by_id(&self, id: i64) -> Option<Account>;
    fn get_account_by_employee_id(&self, employee_id: &str) -> Option<Account>;
    /// Assign the next id, append and persist
    fn create_account(&self, new_account: NewAccount) -> Account;

    /// All entries, newest first
    fn get_all_queries(&self) -> Vec<Query>;
    fn get_query_by_id(&self, id: i64) -> Option<Query>;
    /// Assign the next id and the current time, append and persist
    fn create_query(&self, new_query: NewQuery) -> Query;
    fn search_queries(&self, filter: &SearchFilter) -> Vec<Query>;

    /// Distinct authors across all entries, most recently active first
    fn list_employee_ids(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.get_all_queries()
            .into_iter()
            .filter_map(|q| seen.insert(q.employee_id.clone()).then_some(q.employee_id))
            .collect()
    }
}
