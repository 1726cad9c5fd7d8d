use askama::Template;

use super::{PageContext, SelectOption};
use crate::wizard::{HireKind, InputKind, Wizard};

pub struct HireCard {
    pub slug: &'static str,
    pub title: &'static str,
    pub steps: usize,
    pub in_progress: bool,
}

#[derive(Template)]
#[template(path = "hire/index.html")]
pub struct HireIndexTemplate {
    pub ctx: PageContext,
    pub cards: Vec<HireCard>,
}

impl HireCard {
    pub fn build(kind: HireKind, in_progress: bool) -> Self {
        let schema = kind.schema();
        Self {
            slug: schema.slug,
            title: schema.title,
            steps: schema.steps.len(),
            in_progress,
        }
    }
}

/// Header tab for one wizard step.
pub struct StepTab {
    pub number: usize,
    pub title: &'static str,
    /// `done`, `current` or `todo`.
    pub state: &'static str,
}

/// One input of the current step, ready to render.
pub struct FieldView {
    pub name: &'static str,
    pub label: &'static str,
    pub html_type: &'static str,
    pub is_select: bool,
    pub is_textarea: bool,
    pub is_photo: bool,
    pub required: bool,
    pub value: String,
    pub error: Option<String>,
    pub options: Vec<SelectOption>,
}

#[derive(Template)]
#[template(path = "hire/step.html")]
pub struct HireStepTemplate {
    pub ctx: PageContext,
    pub title: &'static str,
    pub slug: &'static str,
    pub step_number: usize,
    pub step_count: usize,
    pub step_title: &'static str,
    pub tabs: Vec<StepTab>,
    pub fields: Vec<FieldView>,
    pub is_first: bool,
    pub is_last: bool,
    pub message: Option<String>,
    pub uploads_enabled: bool,
}

impl HireStepTemplate {
    pub fn build(ctx: PageContext, wizard: &Wizard<'_>, uploads_enabled: bool) -> Self {
        let schema = wizard.schema();
        let current = wizard.current_step();
        let tabs = schema
            .steps
            .iter()
            .enumerate()
            .map(|(i, step)| StepTab {
                number: i + 1,
                title: step.title,
                state: match i.cmp(&current) {
                    std::cmp::Ordering::Less => "done",
                    std::cmp::Ordering::Equal => "current",
                    std::cmp::Ordering::Greater => "todo",
                },
            })
            .collect();

        let fields = wizard
            .current()
            .fields
            .iter()
            .map(|f| {
                let value = wizard.value(f.name).to_string();
                let options = match f.kind {
                    InputKind::Select(choices) => {
                        SelectOption::list(choices.iter().map(|c| (*c, *c)), &value)
                    }
                    _ => Vec::new(),
                };
                FieldView {
                    name: f.name,
                    label: f.label,
                    html_type: f.kind.html_type(),
                    is_select: matches!(f.kind, InputKind::Select(_)),
                    is_textarea: f.kind == InputKind::TextArea,
                    is_photo: f.kind == InputKind::Photo,
                    required: f.is_required(),
                    error: wizard.error(f.name).map(String::from),
                    value,
                    options,
                }
            })
            .collect();

        Self {
            ctx,
            title: schema.title,
            slug: schema.slug,
            step_number: current + 1,
            step_count: schema.steps.len(),
            step_title: wizard.current().title,
            tabs,
            fields,
            is_first: current == 0,
            is_last: wizard.is_last_step(),
            message: wizard.state().message.clone(),
            uploads_enabled,
        }
    }
}
