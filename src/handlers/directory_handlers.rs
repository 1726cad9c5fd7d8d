use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use super::{backend_failure, flash_outcome, list_or_notice};
use crate::auth::csrf;
use crate::auth::session::{Role, SessionContext, backend_cookie, require_role};
use crate::backend::{BackendClient, BackendError};
use crate::errors::{AppError, render};
use crate::models::employee::{self, Employee, EmployeeUpdate, payment_totals};
use crate::templates_structs::{
    CandidatesTemplate, EmployeeFormTemplate, EmployeeListTemplate, PageContext, PaymentsTemplate,
};
use crate::upload::{self, Uploader};
use crate::validate;

pub const EMPLOYEE_STATUSES: [&str; 3] = ["active", "on-leave", "inactive"];

#[derive(Deserialize)]
pub struct EmployeeQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeForm {
    #[serde(default)]
    pub csrf_token: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub designation: String,
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub status: String,
    /// Current photo URL. Never read from the request: on update it comes
    /// from the stored record or a fresh upload.
    #[serde(skip_deserializing)]
    pub photo: String,
    /// A newly picked photo as a data URL.
    #[serde(default)]
    pub photo_data: String,
}

impl EmployeeForm {
    pub fn from_employee(e: &Employee) -> Self {
        Self {
            name: e.name.clone(),
            email: e.email.clone(),
            phone: e.phone.clone(),
            department: e.department.clone(),
            designation: e.designation.clone(),
            salary: e.salary.map(|s| s.to_string()).unwrap_or_default(),
            status: e.status.clone(),
            photo: e.photo.clone().unwrap_or_default(),
            ..Self::default()
        }
    }

    /// Every field is sent: the backend replaces the whole record.
    pub fn to_update(&self) -> Result<EmployeeUpdate, Vec<String>> {
        let mut errors = Vec::new();
        errors.extend(validate::validate_required(&self.name, "Name", 100));
        errors.extend(validate::validate_email(&self.email));
        errors.extend(validate::validate_digits(&self.phone, "Phone", 10));
        errors.extend(validate::validate_required(&self.department, "Department", 100));
        errors.extend(validate::validate_required(&self.designation, "Designation", 100));
        errors.extend(validate::validate_positive_number(&self.salary, "Salary"));
        if !EMPLOYEE_STATUSES.contains(&self.status.as_str()) {
            errors.push("Please choose a valid status".to_string());
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(EmployeeUpdate {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            department: self.department.trim().to_string(),
            designation: self.designation.trim().to_string(),
            salary: self.salary.trim().parse().unwrap_or_default(),
            status: self.status.clone(),
            photo: Some(self.photo.trim().to_string()).filter(|p| !p.is_empty()),
        })
    }
}

fn require_editor(session: &Session) -> Result<SessionContext, AppError> {
    require_role(session, &[Role::Ceo, Role::Hr])
}

fn matches_query(e: &Employee, q: &str) -> bool {
    let q = q.to_lowercase();
    [&e.name, &e.email, &e.department, &e.designation]
        .iter()
        .any(|field| field.to_lowercase().contains(&q))
}

/// GET /employees?q=...
pub async fn list(
    client: web::Data<BackendClient>,
    session: Session,
    query: web::Query<EmployeeQuery>,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, "/employees")?;
    let cookie = backend_cookie(&session);
    let result = employee::list(&client, ctx.identity.role, cookie.as_deref()).await;
    let (mut employees, load_error) = list_or_notice(&session, "employees", result)?;

    let q = query.q.trim();
    if !q.is_empty() {
        employees.retain(|e| matches_query(e, q));
    }
    employees.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

    render(EmployeeListTemplate {
        ctx,
        employees,
        query: q.to_string(),
        load_error,
    })
}

fn form_page(session: &Session, id: String, form: EmployeeForm, errors: Vec<String>) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(session, "/employees")?;
    render(EmployeeFormTemplate { ctx, id, form, errors })
}

/// GET /employees/{id}/edit
pub async fn edit_form(
    client: web::Data<BackendClient>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let identity = require_editor(&session)?;
    let id = path.into_inner();
    let cookie = backend_cookie(&session);
    let found = employee::find(&client, identity.role, cookie.as_deref(), &id)
        .await
        .map_err(|e| backend_failure(&session, e))?;
    form_page(&session, id, EmployeeForm::from_employee(&found), Vec::new())
}

/// POST /employees/{id}
pub async fn update(
    client: web::Data<BackendClient>,
    uploader: web::Data<dyn Uploader>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<EmployeeForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let identity = require_editor(&session)?;
    let id = path.into_inner();
    let mut form = form.into_inner();
    let cookie = backend_cookie(&session);

    if form.photo_data.trim().is_empty() {
        let stored = employee::find(&client, identity.role, cookie.as_deref(), &id)
            .await
            .map_err(|e| backend_failure(&session, e))?;
        form.photo = stored.photo.unwrap_or_default();
    } else {
        match upload::upload_data_url(&**uploader, &form.photo_data).await {
            Ok(url) => form.photo = url,
            Err(e) => {
                log::warn!("Employee photo upload failed: {e}");
                form.photo_data.clear();
                return form_page(&session, id, form, vec![e.user_message()]);
            }
        }
        form.photo_data.clear();
    }

    let update = match form.to_update() {
        Ok(u) => u,
        Err(errors) => return form_page(&session, id, form, errors),
    };

    match employee::replace(&client, identity.role, cookie.as_deref(), &id, &update).await {
        Err(e @ BackendError::Unauthorized) => Err(backend_failure(&session, e)),
        Err(e @ BackendError::Status { status: 400..=499, .. }) | Err(e @ BackendError::Rejected(_)) => {
            log::warn!("Employee {id} update rejected: {e}");
            form_page(&session, id, form, vec![e.user_message()])
        }
        result => flash_outcome(&session, result, "Employee updated", "/employees"),
    }
}

/// GET /candidates
pub async fn candidates(
    client: web::Data<BackendClient>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    require_editor(&session)?;
    let ctx = PageContext::build(&session, "/candidates")?;
    let cookie = backend_cookie(&session);
    let result = employee::candidates(&client, cookie.as_deref()).await;
    let (candidates, load_error) = list_or_notice(&session, "candidates", result)?;
    render(CandidatesTemplate {
        ctx,
        candidates,
        load_error,
    })
}

/// GET /payments
pub async fn payments(
    client: web::Data<BackendClient>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    require_role(&session, &[Role::Ceo])?;
    let ctx = PageContext::build(&session, "/payments")?;
    let cookie = backend_cookie(&session);
    let result = employee::payments(&client, cookie.as_deref()).await;
    let (payments, load_error) = list_or_notice(&session, "payments", result)?;
    let (paid, pending) = payment_totals(&payments);
    render(PaymentsTemplate {
        ctx,
        payments,
        total_paid: format!("{paid:.2}"),
        total_pending: format!("{pending:.2}"),
        load_error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> EmployeeForm {
        EmployeeForm {
            name: "Asha Rao".into(),
            email: "asha@example.com".into(),
            phone: "9876543210".into(),
            department: "Sales".into(),
            designation: "Sales Executive".into(),
            salary: "42000".into(),
            status: "active".into(),
            ..EmployeeForm::default()
        }
    }

    #[test]
    fn test_to_update_sends_every_field() {
        let update = form().to_update().unwrap();
        assert_eq!(update.salary, 42000.0);
        assert_eq!(update.photo, None);
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["designation"], "Sales Executive");
    }

    #[test]
    fn test_to_update_collects_errors() {
        let bad = EmployeeForm {
            phone: "12345".into(),
            salary: "0".into(),
            status: "retired".into(),
            ..form()
        };
        let errors = bad.to_update().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&"Salary must be greater than 0".to_string()));
    }

    #[test]
    fn test_photo_url_is_not_taken_from_the_request() {
        let posted: EmployeeForm =
            serde_urlencoded::from_str("name=Asha&photo=https%3A%2F%2Fevil.example%2Fx.png&photo_data=").unwrap();
        assert_eq!(posted.name, "Asha");
        assert!(posted.photo.is_empty());
    }

    #[test]
    fn test_matches_query() {
        let e = Employee {
            name: "Asha Rao".into(),
            department: "Sales".into(),
            ..Employee::default()
        };
        assert!(matches_query(&e, "sales"));
        assert!(matches_query(&e, "RAO"));
        assert!(!matches_query(&e, "hr"));
    }
}
