use crate::validate;

/// One validation rule. Rules other than `Required` are skipped for empty
/// values, so optional fields only validate what was entered.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    Required,
    Email,
    /// Exactly N digits (phone 10, Aadhar 12, pincode 6).
    Digits(usize),
    /// Between min and max digits inclusive (bank account numbers).
    DigitsBetween(usize, usize),
    Pan,
    Ifsc,
    PositiveNumber,
    MinLength(usize),
    MaxLength(usize),
    OneOf(&'static [&'static str]),
    Date,
    Url,
}

impl Rule {
    fn check(&self, value: &str, label: &str) -> Option<String> {
        let trimmed = value.trim();
        match self {
            Rule::Required => {
                if trimmed.is_empty() {
                    Some(format!("{label} is required"))
                } else {
                    None
                }
            }
            _ if trimmed.is_empty() => None,
            Rule::Email => validate::validate_email(trimmed),
            Rule::Digits(n) => validate::validate_digits(trimmed, label, *n),
            Rule::DigitsBetween(min, max) => {
                let len = trimmed.len();
                if len < *min || len > *max || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
                    Some(format!("{label} must be {min} to {max} digits"))
                } else {
                    None
                }
            }
            Rule::Pan => validate::validate_pan(trimmed),
            Rule::Ifsc => validate::validate_ifsc(trimmed),
            Rule::PositiveNumber => validate::validate_positive_number(trimmed, label),
            Rule::MinLength(n) => {
                if trimmed.chars().count() < *n {
                    Some(format!("{label} must be at least {n} characters"))
                } else {
                    None
                }
            }
            Rule::MaxLength(n) => validate::validate_optional(trimmed, label, *n),
            Rule::OneOf(options) => {
                if options.iter().any(|o| *o == trimmed) {
                    None
                } else {
                    Some(format!("Please choose a valid {}", label.to_lowercase()))
                }
            }
            Rule::Date => validate::validate_date(trimmed, label),
            Rule::Url => validate::validate_url(trimmed, label),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputKind {
    Text,
    Email,
    Tel,
    Number,
    Date,
    Select(&'static [&'static str]),
    TextArea,
    /// Image picked in the browser; stored as the uploaded URL.
    Photo,
}

impl InputKind {
    /// HTML `<input type>` for simple inputs.
    pub fn html_type(self) -> &'static str {
        match self {
            InputKind::Email => "email",
            InputKind::Tel => "tel",
            InputKind::Number => "number",
            InputKind::Date => "date",
            InputKind::Photo => "file",
            _ => "text",
        }
    }
}

/// Uppercased before validation and storage.
const UPPERCASE_RULES: [&Rule; 2] = [&Rule::Pan, &Rule::Ifsc];

#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: InputKind,
    pub rules: Vec<Rule>,
}

impl FieldSpec {
    pub fn new(name: &'static str, label: &'static str, kind: InputKind) -> Self {
        let rules = match kind {
            InputKind::Email => vec![Rule::Email],
            InputKind::Date => vec![Rule::Date],
            InputKind::Select(options) => vec![Rule::OneOf(options)],
            _ => Vec::new(),
        };
        Self { name, label, kind, rules }
    }

    pub fn required(mut self) -> Self {
        self.rules.insert(0, Rule::Required);
        self
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn is_required(&self) -> bool {
        self.rules.contains(&Rule::Required)
    }

    /// First failing rule's message, if any.
    pub fn check(&self, value: &str) -> Option<String> {
        self.rules.iter().find_map(|r| r.check(value, self.label))
    }

    /// Trim, and uppercase codes such as PAN and IFSC.
    pub fn normalize(&self, value: &str) -> String {
        let trimmed = value.trim();
        if self.rules.iter().any(|r| UPPERCASE_RULES.contains(&r)) {
            trimmed.to_uppercase()
        } else {
            trimmed.to_string()
        }
    }
}

#[derive(Debug, Clone)]
pub struct StepSpec {
    pub title: &'static str,
    pub fields: Vec<FieldSpec>,
}

/// A wizard's full definition: its steps and where the result is posted.
#[derive(Debug, Clone)]
pub struct WizardSchema {
    pub slug: &'static str,
    pub title: &'static str,
    pub endpoint: String,
    pub steps: Vec<StepSpec>,
}

impl WizardSchema {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.steps
            .iter()
            .flat_map(|s| s.fields.iter())
            .find(|f| f.name == name)
    }

    pub fn last_step(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_skip_format_rules_when_empty() {
        let f = FieldSpec::new("altPhone", "Alternate phone", InputKind::Tel).rule(Rule::Digits(10));
        assert_eq!(f.check(""), None);
        assert_eq!(f.check("123").unwrap(), "Alternate phone must be exactly 10 digits");
    }

    #[test]
    fn test_required_runs_first() {
        let f = FieldSpec::new("email", "Email", InputKind::Email).required();
        assert_eq!(f.rules, vec![Rule::Required, Rule::Email]);
        assert_eq!(f.check("  ").unwrap(), "Email is required");
        assert_eq!(f.check("x@y").unwrap(), "Please enter a valid email address");
        assert!(f.is_required());
    }

    #[test]
    fn test_select_and_range_rules() {
        let f = FieldSpec::new("shift", "Shift", InputKind::Select(&["Morning", "Night"])).required();
        assert_eq!(f.check("Morning"), None);
        assert_eq!(f.check("Noon").unwrap(), "Please choose a valid shift");

        let acct = FieldSpec::new("acct", "Account number", InputKind::Text)
            .required()
            .rule(Rule::DigitsBetween(9, 18));
        assert_eq!(acct.check("123456789"), None);
        assert!(acct.check("12345678").is_some());
        assert!(acct.check("12345678901234567890").is_some());
    }

    #[test]
    fn test_normalize_uppercases_codes() {
        let pan = FieldSpec::new("pan", "PAN", InputKind::Text).required().rule(Rule::Pan);
        assert_eq!(pan.normalize(" abcde1234f "), "ABCDE1234F");
        let name = FieldSpec::new("name", "Name", InputKind::Text);
        assert_eq!(name.normalize(" Asha "), "Asha");
    }
}
