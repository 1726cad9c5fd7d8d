use crate::auth::session::Role;

pub const LOGIN: &str = "/api/auth/login";
pub const LOGOUT: &str = "/api/auth/logout";
pub const CANDIDATES: &str = "/api/hr/candidates";
pub const PAYMENTS: &str = "/api/ceo/payments";

pub fn meetings(role: Role) -> String {
    format!("/api/{}/meetings", role.api_segment())
}

pub fn meeting(role: Role, id: &str) -> String {
    format!("/api/{}/meetings/{}", role.api_segment(), id)
}

pub fn tasks(role: Role) -> String {
    format!("/api/{}/tasks", role.api_segment())
}

pub fn task(role: Role, id: &str) -> String {
    format!("/api/{}/tasks/{}", role.api_segment(), id)
}

pub fn forward_task(role: Role, id: &str) -> String {
    format!("/api/{}/tasks/{}/forward", role.api_segment(), id)
}

pub fn employees(role: Role) -> String {
    format!("/api/{}/employees", role.api_segment())
}

pub fn employee(role: Role, id: &str) -> String {
    format!("/api/{}/employees/{}", role.api_segment(), id)
}

pub fn hire(slug: &str) -> String {
    format!("/api/hr/hire/{slug}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_scoped_paths() {
        assert_eq!(meetings(Role::Hr), "/api/hr/meetings");
        assert_eq!(meeting(Role::TeamLeader, "m1"), "/api/tl/meetings/m1");
        assert_eq!(forward_task(Role::ProjectManager, "t9"), "/api/project-manager/tasks/t9/forward");
        assert_eq!(employees(Role::Ceo), "/api/ceo/employees");
        assert_eq!(hire("telecaller"), "/api/hr/hire/telecaller");
    }
}
