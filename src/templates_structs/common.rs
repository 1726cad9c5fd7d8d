use askama::Template;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub app_name: &'static str,
    pub csrf_token: String,
    pub email: String,
}

/// One `<option>` of a select input.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    pub fn list<'a, I>(options: I, current: &str) -> Vec<SelectOption>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        options
            .into_iter()
            .map(|(value, label)| SelectOption {
                value: value.to_string(),
                label: label.to_string(),
                selected: value == current,
            })
            .collect()
    }
}
