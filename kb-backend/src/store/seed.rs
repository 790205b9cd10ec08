//! Sample records written into empty collections on first start

use chrono::{DateTime, Months, Utc};
use kb_types::{Account, Query, Topic};

pub const SEED_PASSWORD: &str = "password123";

pub fn seed_accounts() -> Vec<Account> {
    ["EMP10254", "EMP10842", "EMP10468"]
        .iter()
        .zip(1..)
        .map(|(employee_id, id)| Account {
            id,
            employee_id: employee_id.to_string(),
            password: SEED_PASSWORD.to_string(),
        })
        .collect()
}

/// Two entries: one dated a calendar month before `now`, one dated `now`
pub fn seed_queries(now: DateTime<Utc>) -> Vec<Query> {
    let last_month = now.checked_sub_months(Months::new(1)).unwrap_or(now);

    vec![
        Query {
            id: 1,
            title: "How to configure the project deployment settings?".to_string(),
            details: "I'm trying to set up the deployment pipeline but can't find the right settings in the project configuration.".to_string(),
            answer: "Go to Project Settings > Deployment > Configuration. There you'll find all the necessary settings. Make sure to set the environment variables and deployment targets correctly.".to_string(),
            topic: Topic::Technical,
            employee_id: "EMP10254".to_string(),
            date: last_month,
        },
        Query {
            id: 2,
            title: "What's the process for requesting time off?".to_string(),
            details: "I need to take some vacation days next month but I'm not sure about the correct procedure.".to_string(),
            answer: "Submit your request through the HR portal at least 2 weeks in advance. Navigate to My Profile > Time Off > Request Time Off. Your manager will receive an automatic notification to approve your request.".to_string(),
            topic: Topic::Hr,
            employee_id: "EMP10842".to_string(),
            date: now,
        },
    ]
}
