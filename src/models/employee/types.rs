use serde::{Deserialize, Serialize};

use crate::models::{flexible_id, nullable_string};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(default, alias = "_id", deserialize_with = "flexible_id")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub email: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub phone: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub department: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub designation: String,
    #[serde(default)]
    pub salary: Option<f64>,
    #[serde(default, deserialize_with = "nullable_string")]
    pub status: String,
    #[serde(default)]
    pub photo: Option<String>,
}

/// Full-replace body for `PUT /api/{role}/employees/{id}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeUpdate {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub designation: String,
    pub salary: f64,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default, alias = "_id", deserialize_with = "flexible_id")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub email: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub phone: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub position: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub status: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub applied_on: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub created_at: String,
}

impl Candidate {
    /// Application date, falling back to the record's creation date.
    pub fn applied_date(&self) -> &str {
        let raw = if self.applied_on.is_empty() { &self.created_at } else { &self.applied_on };
        raw.get(..10).unwrap_or(raw)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(default, alias = "_id", deserialize_with = "flexible_id")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub payee: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default, deserialize_with = "nullable_string")]
    pub status: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub method: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub paid_on: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub reference: String,
}

/// Login payload data; the identity the backend vouches for.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeData {
    #[serde(default, alias = "_id", deserialize_with = "flexible_id")]
    pub id: String,
    /// Human-facing code such as `EMP-7`, when the backend issues one.
    #[serde(default, deserialize_with = "nullable_string")]
    pub employee_id: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub email: String,
    pub role: crate::auth::session::Role,
    #[serde(default, deserialize_with = "nullable_string")]
    pub department: String,
}

impl EmployeeData {
    /// The session identity for this login. The human-facing code is
    /// preferred over the database id when present.
    pub fn into_identity(self) -> crate::auth::session::SessionContext {
        let employee_id = if self.employee_id.is_empty() { self.id } else { self.employee_id };
        crate::auth::session::SessionContext {
            employee_id,
            name: self.name,
            email: self.email,
            role: self.role,
            department: self.department,
        }
    }
}

/// Sum of amounts by status, for the CEO payments page.
pub fn payment_totals(payments: &[Payment]) -> (f64, f64) {
    payments.iter().fold((0.0, 0.0), |(paid, pending), p| {
        if p.status.eq_ignore_ascii_case("paid") || p.status.eq_ignore_ascii_case("completed") {
            (paid + p.amount, pending)
        } else {
            (paid, pending + p.amount)
        }
    })
}
