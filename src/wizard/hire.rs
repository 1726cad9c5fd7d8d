//! "Hire X" wizard definitions. Each hire type is a schema; the engine is
//! shared.

use std::sync::LazyLock;

use super::schema::{FieldSpec, InputKind, Rule, StepSpec, WizardSchema};
use crate::backend::endpoints;

const GENDERS: &[&str] = &["Male", "Female", "Other"];
const HR_DESIGNATIONS: &[&str] = &["HR Executive", "HR Manager", "Recruiter", "HR Generalist"];
const SHIFTS: &[&str] = &["Morning", "Evening", "Night"];
const SALES_DESIGNATIONS: &[&str] = &["Sales Executive", "Senior Sales Executive", "Sales Manager"];
const DEV_LEVELS: &[&str] = &["Intern", "Junior Developer", "Developer", "Senior Developer"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HireKind {
    Hr,
    SalesEmployee,
    Telecaller,
    Developer,
}

impl HireKind {
    pub const ALL: [HireKind; 4] = [
        HireKind::Hr,
        HireKind::SalesEmployee,
        HireKind::Telecaller,
        HireKind::Developer,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            HireKind::Hr => "hr",
            HireKind::SalesEmployee => "sales-employee",
            HireKind::Telecaller => "telecaller",
            HireKind::Developer => "developer",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.slug() == slug)
    }

    pub fn schema(self) -> &'static WizardSchema {
        match self {
            HireKind::Hr => &*HR,
            HireKind::SalesEmployee => &*SALES,
            HireKind::Telecaller => &*TELECALLER,
            HireKind::Developer => &*DEVELOPER,
        }
    }
}

static HR: LazyLock<WizardSchema> = LazyLock::new(|| WizardSchema {
    slug: HireKind::Hr.slug(),
    title: "Hire HR",
    endpoint: endpoints::hire(HireKind::Hr.slug()),
    steps: vec![
        personal_step(),
        identity_step(),
        StepSpec {
            title: "Employment",
            fields: vec![
                FieldSpec::new("designation", "Designation", InputKind::Select(HR_DESIGNATIONS)).required(),
                FieldSpec::new("experienceYears", "Experience (years)", InputKind::Number),
                salary_field(),
                FieldSpec::new("joiningDate", "Joining date", InputKind::Date).required(),
            ],
        },
    ],
});

static SALES: LazyLock<WizardSchema> = LazyLock::new(|| WizardSchema {
    slug: HireKind::SalesEmployee.slug(),
    title: "Hire Sales Employee",
    endpoint: endpoints::hire(HireKind::SalesEmployee.slug()),
    steps: vec![
        personal_step(),
        identity_step(),
        StepSpec {
            title: "Employment",
            fields: vec![
                FieldSpec::new("designation", "Designation", InputKind::Select(SALES_DESIGNATIONS)).required(),
                FieldSpec::new("territory", "Territory", InputKind::Text).required(),
                FieldSpec::new("salesTarget", "Monthly target", InputKind::Number)
                    .required()
                    .rule(Rule::PositiveNumber),
                salary_field(),
                FieldSpec::new("joiningDate", "Joining date", InputKind::Date).required(),
            ],
        },
        emergency_step(),
    ],
});

static TELECALLER: LazyLock<WizardSchema> = LazyLock::new(|| WizardSchema {
    slug: HireKind::Telecaller.slug(),
    title: "Hire Telecaller",
    endpoint: endpoints::hire(HireKind::Telecaller.slug()),
    steps: vec![
        personal_step(),
        identity_step(),
        StepSpec {
            title: "Employment",
            fields: vec![
                FieldSpec::new("languages", "Languages spoken", InputKind::Text).required(),
                FieldSpec::new("shift", "Shift", InputKind::Select(SHIFTS)).required(),
                salary_field(),
                FieldSpec::new("joiningDate", "Joining date", InputKind::Date).required(),
            ],
        },
    ],
});

static DEVELOPER: LazyLock<WizardSchema> = LazyLock::new(|| WizardSchema {
    slug: HireKind::Developer.slug(),
    title: "Hire Developer",
    endpoint: endpoints::hire(HireKind::Developer.slug()),
    steps: vec![
        personal_step(),
        identity_step(),
        StepSpec {
            title: "Employment",
            fields: vec![
                FieldSpec::new("designation", "Level", InputKind::Select(DEV_LEVELS)).required(),
                FieldSpec::new("skills", "Skills", InputKind::TextArea)
                    .required()
                    .rule(Rule::MinLength(2))
                    .rule(Rule::MaxLength(500)),
                FieldSpec::new("githubProfile", "GitHub profile", InputKind::Text).rule(Rule::Url),
                salary_field(),
                FieldSpec::new("joiningDate", "Joining date", InputKind::Date).required(),
            ],
        },
        emergency_step(),
    ],
});

fn personal_step() -> StepSpec {
    StepSpec {
        title: "Personal details",
        fields: vec![
            FieldSpec::new("fullName", "Full name", InputKind::Text)
                .required()
                .rule(Rule::MinLength(2))
                .rule(Rule::MaxLength(100)),
            FieldSpec::new("email", "Email", InputKind::Email).required(),
            FieldSpec::new("phone", "Phone", InputKind::Tel)
                .required()
                .rule(Rule::Digits(10)),
            FieldSpec::new("dateOfBirth", "Date of birth", InputKind::Date).required(),
            FieldSpec::new("gender", "Gender", InputKind::Select(GENDERS)).required(),
            FieldSpec::new("address", "Address", InputKind::TextArea)
                .required()
                .rule(Rule::MaxLength(300)),
            FieldSpec::new("pincode", "Pincode", InputKind::Text)
                .required()
                .rule(Rule::Digits(6)),
            FieldSpec::new("photo", "Photo", InputKind::Photo),
        ],
    }
}

fn identity_step() -> StepSpec {
    StepSpec {
        title: "Identity & bank",
        fields: vec![
            FieldSpec::new("aadharNumber", "Aadhar number", InputKind::Text)
                .required()
                .rule(Rule::Digits(12)),
            FieldSpec::new("panNumber", "PAN", InputKind::Text)
                .required()
                .rule(Rule::Pan),
            FieldSpec::new("bankAccountNumber", "Bank account number", InputKind::Text)
                .required()
                .rule(Rule::DigitsBetween(9, 18)),
            FieldSpec::new("ifscCode", "IFSC", InputKind::Text)
                .required()
                .rule(Rule::Ifsc),
        ],
    }
}

fn emergency_step() -> StepSpec {
    StepSpec {
        title: "Emergency contact",
        fields: vec![
            FieldSpec::new("emergencyContactName", "Contact name", InputKind::Text).required(),
            FieldSpec::new("emergencyContactPhone", "Contact phone", InputKind::Tel)
                .required()
                .rule(Rule::Digits(10)),
        ],
    }
}

fn salary_field() -> FieldSpec {
    FieldSpec::new("salary", "Salary", InputKind::Number)
        .required()
        .rule(Rule::PositiveNumber)
}
