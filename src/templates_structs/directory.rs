use askama::Template;

use super::PageContext;
use crate::models::employee::{Candidate, Employee, Payment};

#[derive(Template)]
#[template(path = "directory/employees.html")]
pub struct EmployeeListTemplate {
    pub ctx: PageContext,
    pub employees: Vec<Employee>,
    pub query: String,
    pub load_error: Option<String>,
}

#[derive(Template)]
#[template(path = "directory/employee_form.html")]
pub struct EmployeeFormTemplate {
    pub ctx: PageContext,
    pub id: String,
    pub form: crate::handlers::directory_handlers::EmployeeForm,
    pub errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "directory/candidates.html")]
pub struct CandidatesTemplate {
    pub ctx: PageContext,
    pub candidates: Vec<Candidate>,
    pub load_error: Option<String>,
}

#[derive(Template)]
#[template(path = "directory/payments.html")]
pub struct PaymentsTemplate {
    pub ctx: PageContext,
    pub payments: Vec<Payment>,
    pub total_paid: String,
    pub total_pending: String,
    pub load_error: Option<String>,
}
