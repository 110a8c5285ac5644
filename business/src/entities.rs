//! Row types shown by the dashboard tables.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::format::parse_date;

pub type RowId = String;

/// Anything the generic table can display. The id must be unique and stable across refetches.
pub trait Row {
    fn row_id(&self) -> RowId;
}

/// An invoice line from the billing view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub due_date: DateTime<Utc>,
    pub amount: f64,
    pub status: String,
}

impl Row for Person {
    fn row_id(&self) -> RowId {
        self.id.clone()
    }
}

/// User as served by dummyjson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maiden_name: Option<String>,
    #[serde(default)]
    pub age: u32,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Users without an explicit status are treated as active.
    pub fn status_or_default(&self) -> &str {
        self.status.as_deref().unwrap_or("active")
    }
}

impl Row for User {
    fn row_id(&self) -> RowId {
        self.id.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: String,
    pub name: String,
    pub permissions: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Row for Role {
    fn row_id(&self) -> RowId {
        self.id.clone()
    }
}

/// One page of `GET /users` or `GET /users/search`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub users: Vec<User>,
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
}

/// Static billing rows used by the invoices tab.
pub fn sample_persons() -> Vec<Person> {
    let rows = [
        (
            "62447",
            "Francis Sanford MD",
            "https://randomuser.me/api/portraits/women/8.jpg",
            "Marya.Barrow@yahoo.com",
            "2023-10-18T13:24:00.760Z",
            544.0,
            "pending",
        ),
        (
            "86740",
            "Lucia Kshlerin",
            "https://randomuser.me/api/portraits/women/2.jpg",
            "Mason_Davis4@yahoo.com",
            "2023-07-18T01:06:16.095Z",
            560.0,
            "pending",
        ),
        (
            "42548",
            "Byron Hoppe III",
            "https://randomuser.me/api/portraits/men/75.jpg",
            "Jayda_Schill35@yahoo.com",
            "2024-12-18T15:32:21.317Z",
            249.0,
            "pending",
        ),
        (
            "97024",
            "Camille Jenkins",
            "https://randomuser.me/api/portraits/men/9.jpg",
            "Retha.Lehne47@hotmail.com",
            "2024-06-30T19:06:03.018Z",
            255.0,
            "overdue",
        ),
    ];

    rows.into_iter()
        .filter_map(|(id, name, avatar, email, due, amount, status)| {
            Some(Person {
                id: id.to_owned(),
                name: name.to_owned(),
                email: email.to_owned(),
                avatar: avatar.to_owned(),
                due_date: parse_date(due)?,
                amount,
                status: status.to_owned(),
            })
        })
        .collect()
}

/// Static rows for the roles tab.
pub fn sample_roles() -> Vec<Role> {
    let rows: [(&str, &str, &[&str], &str, &str); 3] = [
        (
            "1",
            "Admin",
            &["users:read", "users:write", "billing:read"],
            "2023-01-10T09:00:00.000Z",
            "2024-03-02T16:45:00.000Z",
        ),
        (
            "2",
            "Accountant",
            &["billing:read", "billing:write"],
            "2023-04-21T11:30:00.000Z",
            "2023-11-08T08:15:00.000Z",
        ),
        (
            "3",
            "Viewer",
            &["users:read"],
            "2023-06-05T14:00:00.000Z",
            "2023-06-05T14:00:00.000Z",
        ),
    ];

    rows.into_iter()
        .filter_map(|(id, name, permissions, created, updated)| {
            Some(Role {
                id: id.to_owned(),
                name: name.to_owned(),
                permissions: permissions.iter().map(|p| (*p).to_owned()).collect(),
                created_at: parse_date(created)?,
                updated_at: parse_date(updated)?,
            })
        })
        .collect()
}
