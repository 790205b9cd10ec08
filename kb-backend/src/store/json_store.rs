//! JsonFileStore — whole-collection JSON persistence
//!
//! Both collections are loaded into memory at startup. Every create appends
//! in memory and rewrites the full file while the collection's write lock is
//! held. Load failures degrade to an empty collection; save failures are
//! logged and the in-memory state still advances.

use chrono::{Local, Utc};
use kb_types::{Account, NewAccount, NewQuery, Query};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::{file_ops, search, seed, KnowledgeStore, SearchFilter};
use crate::config::Config;

trait Record {
    fn id(&self) -> i64;
}

impl Record for Account {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for Query {
    fn id(&self) -> i64 {
        self.id
    }
}

struct Collection<T> {
    items: Vec<T>,
    next_id: i64,
}

impl<T: Record> Collection<T> {
    fn new(items: Vec<T>) -> Self {
        let next_id = items.iter().map(Record::id).max().map_or(1, |max| max + 1);
        Self { items, next_id }
    }

    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

fn persist<T: Serialize>(path: &Path, label: &str, items: &[T]) {
    match file_ops::write_collection(path, items) {
        Ok(()) => log::debug!("[STORE] Saved {} {} to {:?}", items.len(), label, path),
        Err(e) => log::error!("[STORE] Error saving {}: {}", label, e),
    }
}

fn load_collection<T, F>(path: &Path, label: &str, seed: F) -> Collection<T>
where
    T: Record + Serialize + DeserializeOwned,
    F: FnOnce() -> Vec<T>,
{
    match file_ops::read_collection::<T>(path) {
        Ok(items) if items.is_empty() => {
            let seeded = seed();
            log::info!("[STORE] No {} found, seeding {} sample records", label, seeded.len());
            persist(path, label, &seeded);
            Collection::new(seeded)
        }
        Ok(items) => {
            log::info!("[STORE] Loaded {} {} from {:?}", items.len(), label, path);
            Collection::new(items)
        }
        Err(e) => {
            log::error!("[STORE] Error loading {}: {} (starting with an empty collection)", label, e);
            Collection::new(Vec::new())
        }
    }
}

pub struct JsonFileStore {
    users_path: PathBuf,
    queries_path: PathBuf,
    accounts: RwLock<Collection<Account>>,
    queries: RwLock<Collection<Query>>,
}

impl JsonFileStore {
    /// Open (or initialize) the store under `config.data_dir`
    pub fn open(config: &Config) -> Self {
        let users_path = config.users_path();
        let queries_path = config.queries_path();

        for path in [&users_path, &queries_path] {
            match file_ops::ensure_collection_file(path) {
                Ok(true) => log::info!("[STORE] Created empty collection file {:?}", path),
                Ok(false) => {}
                Err(e) => log::error!("[STORE] Could not prepare {:?}: {}", path, e),
            }
        }

        let accounts = load_collection(&users_path, "users", seed::seed_accounts);
        let queries = load_collection(&queries_path, "queries", || seed::seed_queries(Utc::now()));

        Self {
            users_path,
            queries_path,
            accounts: RwLock::new(accounts),
            queries: RwLock::new(queries),
        }
    }
}

impl KnowledgeStore for JsonFileStore {
    fn account_count(&self) -> usize {
        self.accounts.read().items.len()
    }

    fn query_count(&self) -> usize {
        self.queries.read().items.len()
    }

    fn get_account_by_id(&self, id: i64) -> Option<Account> {
        self.accounts.read().items.iter().find(|a| a.id == id).cloned()
    }

    fn get_account_by_employee_id(&self, employee_id: &str) -> Option<Account> {
        self.accounts
            .read()
            .items
            .iter()
            .find(|a| a.employee_id == employee_id)
            .cloned()
    }

    fn create_account(&self, new_account: NewAccount) -> Account {
        let mut accounts = self.accounts.write();
        let account = Account {
            id: accounts.allocate_id(),
            employee_id: new_account.employee_id,
            password: new_account.password,
        };
        accounts.items.push(account.clone());
        persist(&self.users_path, "users", &accounts.items);
        account
    }

    fn get_all_queries(&self) -> Vec<Query> {
        let mut all = self.queries.read().items.clone();
        search::sort_newest_first(&mut all);
        all
    }

    fn get_query_by_id(&self, id: i64) -> Option<Query> {
        self.queries.read().items.iter().find(|q| q.id == id).cloned()
    }

    fn create_query(&self, new_query: NewQuery) -> Query {
        let mut queries = self.queries.write();
        let query = Query {
            id: queries.allocate_id(),
            title: new_query.title,
            details: new_query.details,
            answer: new_query.answer,
            topic: new_query.topic,
            employee_id: new_query.employee_id,
            date: Utc::now(),
        };
        queries.items.push(query.clone());
        persist(&self.queries_path, "queries", &queries.items);
        log::info!("[STORE] Created query {} by {}", query.id, query.employee_id);
        query
    }

    fn search_queries(&self, filter: &SearchFilter) -> Vec<Query> {
        let queries = self.queries.read();
        search::apply(&queries.items, filter, &Local::now())
    }
}
