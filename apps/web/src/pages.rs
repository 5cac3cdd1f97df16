//! HTML rendering. One handlebars template; everything it shows is precomputed into view structs
//! so the template never has to reason about missing fields.

use handlebars::Handlebars;
use pathweaver_api::models::path::{LearningPath, LearningPathResponse, ResourceRef};
use serde::Serialize;
use thiserror::Error;

use crate::preferences::{
    ExperienceLevel, LearningStyle, Preferences, MAX_WEEKLY_HOURS, MIN_WEEKLY_HOURS,
};

const INDEX_TEMPLATE: &str = "index";
pub const FAILURE_NOTICE: &str = "Failed to generate learning path";
pub const EMPTY_GOAL_WARNING: &str = "Please enter a learning goal";

#[derive(Debug, Error)]
pub enum PageError {
    #[error("Template error: {0}")]
    Template(#[from] handlebars::TemplateError),
    #[error("Render error: {0}")]
    Render(#[from] handlebars::RenderError),
}

pub struct Pages {
    handlebars: Handlebars<'static>,
}

impl Pages {
    pub fn new() -> Result<Self, PageError> {
        let mut handlebars = Handlebars::new();
        handlebars
            .register_template_string(INDEX_TEMPLATE, include_str!("../templates/index.hbs"))?;
        Ok(Self { handlebars })
    }

    pub fn render(&self, view: &PageView) -> Result<String, PageError> {
        Ok(self.handlebars.render(INDEX_TEMPLATE, view)?)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// View models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct PageView {
    pub form: FormView,
    pub warning: Option<String>,
    pub failure: Option<FailureView>,
    pub path: Option<PathView>,
}

#[derive(Debug, Serialize)]
pub struct FormView {
    pub goal: String,
    pub levels: Vec<OptionView>,
    pub styles: Vec<CheckboxView>,
    pub hours: u8,
    pub min_hours: u8,
    pub max_hours: u8,
}

#[derive(Debug, Serialize)]
pub struct OptionView {
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Debug, Serialize)]
pub struct CheckboxView {
    pub label: &'static str,
    pub field: &'static str,
    pub checked: bool,
}

#[derive(Debug, Serialize)]
pub struct FailureView {
    pub message: &'static str,
    pub details: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PathView {
    pub prerequisites: Vec<String>,
    pub steps: Vec<StepView>,
}

#[derive(Debug, Serialize)]
pub struct StepView {
    pub number: usize,
    pub title: String,
    pub description: String,
    pub estimated_time: String,
    pub resources: Vec<ResourceView>,
}

#[derive(Debug, Serialize)]
pub struct ResourceView {
    pub label: String,
    /// Only set for http(s) links; anything else renders as plain text.
    pub href: Option<String>,
    pub description: Option<String>,
}

impl PageView {
    pub fn form(goal: &str, preferences: &Preferences) -> Self {
        Self {
            form: FormView::new(goal, preferences),
            warning: None,
            failure: None,
            path: None,
        }
    }

    pub fn with_warning(mut self, warning: &str) -> Self {
        self.warning = Some(warning.to_string());
        self
    }

    /// Shows a gateway response. Failure responses only ever produce the generic notice.
    pub fn with_response(mut self, response: &LearningPathResponse) -> Self {
        match response {
            LearningPathResponse::Failure { .. } => {
                self.failure = Some(FailureView {
                    message: FAILURE_NOTICE,
                    details: None,
                });
            }
            LearningPathResponse::Success(path) => self.path = Some(PathView::from(path)),
        }
        self
    }

    /// The gateway could not be reached or answered with something unreadable.
    pub fn with_transport_error(mut self, error: &str) -> Self {
        self.failure = Some(FailureView {
            message: FAILURE_NOTICE,
            details: Some(format!("Error generating path: {error}")),
        });
        self
    }
}

impl FormView {
    fn new(goal: &str, preferences: &Preferences) -> Self {
        Self {
            goal: goal.to_string(),
            levels: ExperienceLevel::ALL
                .into_iter()
                .map(|level| OptionView {
                    label: level.label(),
                    selected: level == preferences.experience,
                })
                .collect(),
            styles: LearningStyle::ALL
                .into_iter()
                .map(|style| CheckboxView {
                    label: style.label(),
                    field: style.field_name(),
                    checked: preferences.styles.contains(&style),
                })
                .collect(),
            hours: preferences.weekly_hours,
            min_hours: MIN_WEEKLY_HOURS,
            max_hours: MAX_WEEKLY_HOURS,
        }
    }
}

impl From<&LearningPath> for PathView {
    fn from(path: &LearningPath) -> Self {
        Self {
            prerequisites: path.prerequisites(),
            steps: path
                .steps()
                .into_iter()
                .enumerate()
                .map(|(i, step)| StepView {
                    number: i + 1,
                    resources: step.resources.iter().map(ResourceView::from).collect(),
                    title: step.title,
                    description: step.description,
                    estimated_time: step.estimated_time,
                })
                .collect(),
        }
    }
}

impl From<&ResourceRef> for ResourceView {
    fn from(resource: &ResourceRef) -> Self {
        let href = resource.url.as_deref().filter(|u| is_web_link(u));
        let label = resource
            .title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .or(resource.url.as_deref())
            .unwrap_or("Untitled resource");

        Self {
            label: label.to_string(),
            href: href.map(str::to_string),
            description: resource
                .description
                .clone()
                .filter(|d| !d.trim().is_empty()),
        }
    }
}

fn is_web_link(url: &str) -> bool {
    let lower = url.trim_start().to_ascii_lowercase();
    lower.starts_with("https://") || lower.starts_with("http://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn render(view: &PageView) -> String {
        Pages::new().unwrap().render(view).unwrap()
    }

    fn sample_body() -> Value {
        json!({
            "prerequisites": ["Python", "Linear algebra"],
            "steps": [
                {
                    "title": "Graph basics",
                    "description": "Nodes, edges, adjacency matrices",
                    "estimated_time": "4 hours",
                    "resources": [{
                        "title": "CS224W",
                        "url": "https://web.stanford.edu/class/cs224w/",
                        "description": "Stanford lectures"
                    }]
                },
                {"title": "Message passing"}
            ]
        })
    }

    fn sample_path() -> LearningPath {
        serde_json::from_value(sample_body()).unwrap()
    }

    #[test]
    fn test_form_renders_defaults() {
        let html = render(&PageView::form("", &Preferences::default()));
        assert!(html.contains(r#"<option value="Beginner" selected>"#));
        assert!(html.contains(r#"name="style_practical" checked"#));
        assert!(html.contains(r#"value="10""#));
        assert!(!html.contains(FAILURE_NOTICE));
    }

    #[test]
    fn test_success_renders_prerequisites_and_numbered_steps() {
        let response = LearningPathResponse::Success(sample_path());
        let html = render(&PageView::form("GNNs", &Preferences::default()).with_response(&response));

        assert!(html.contains("<li>Python</li>"));
        assert!(html.contains("Step 1: Graph basics"));
        assert!(html.contains("Step 2: Message passing"));
        assert!(html.find("Step 1").unwrap() < html.find("Step 2").unwrap());
        assert!(html.contains("Estimated time: 4 hours"));
        assert!(html.contains(r#"<a href="https://web.stanford.edu/class/cs224w/">CS224W</a>"#));
        assert!(html.contains("Stanford lectures"));
    }

    #[test]
    fn test_failure_renders_notice_only() {
        let response = LearningPathResponse::generation_failed("model said no");
        let html = render(&PageView::form("GNNs", &Preferences::default()).with_response(&response));
        assert!(html.contains(FAILURE_NOTICE));
        assert!(!html.contains("Prerequisites"));
    }

    #[test]
    fn test_transport_error_shows_details() {
        let html = render(
            &PageView::form("GNNs", &Preferences::default()).with_transport_error("connection refused"),
        );
        assert!(html.contains(FAILURE_NOTICE));
        assert!(html.contains("Error generating path: connection refused"));
    }

    #[test]
    fn test_warning_rendered() {
        let html = render(&PageView::form("", &Preferences::default()).with_warning(EMPTY_GOAL_WARNING));
        assert!(html.contains(EMPTY_GOAL_WARNING));
    }

    #[test]
    fn test_partial_resources_do_not_break_rendering() {
        let views: Vec<ResourceView> = [
            ResourceRef::default(),
            ResourceRef {
                url: Some("https://example.com".to_string()),
                ..Default::default()
            },
            ResourceRef {
                title: Some("Notes".to_string()),
                ..Default::default()
            },
        ]
        .iter()
        .map(ResourceView::from)
        .collect();

        assert_eq!(views[0].label, "Untitled resource");
        assert!(views[0].href.is_none());
        assert_eq!(views[1].label, "https://example.com");
        assert_eq!(views[1].href.as_deref(), Some("https://example.com"));
        assert_eq!(views[2].label, "Notes");
        assert!(views[2].description.is_none());
    }

    #[test]
    fn test_non_web_urls_are_not_linked() {
        let view = ResourceView::from(&ResourceRef {
            title: Some("click".to_string()),
            url: Some("javascript:alert(1)".to_string()),
            description: None,
        });
        assert!(view.href.is_none());
    }

    #[test]
    fn test_loosely_typed_step_fields_render() {
        let path: LearningPath = serde_json::from_value(json!({
            "steps": [{"title": "Ownership", "estimated_time": 3, "resources": null}]
        }))
        .unwrap();
        let html = render(
            &PageView::form("", &Preferences::default())
                .with_response(&LearningPathResponse::Success(path)),
        );
        assert!(html.contains("Step 1: Ownership"));
        assert!(html.contains("Estimated time: 3"));
    }

    #[test]
    fn test_model_text_is_escaped() {
        let mut body = sample_body();
        body["steps"][0]["title"] = json!("<script>alert(1)</script>");
        let path: LearningPath = serde_json::from_value(body).unwrap();
        let html = render(
            &PageView::form("", &Preferences::default())
                .with_response(&LearningPathResponse::Success(path)),
        );
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
