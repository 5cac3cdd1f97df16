//! Learner preferences collected by the form and folded into the query text.

use serde::Deserialize;

pub const MIN_WEEKLY_HOURS: u8 = 1;
pub const MAX_WEEKLY_HOURS: u8 = 40;
pub const DEFAULT_WEEKLY_HOURS: u8 = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExperienceLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];

    pub fn label(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.label() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LearningStyle {
    Theoretical,
    Practical,
    Visual,
    Interactive,
}

impl LearningStyle {
    pub const ALL: [LearningStyle; 4] = [
        Self::Theoretical,
        Self::Practical,
        Self::Visual,
        Self::Interactive,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Theoretical => "Theoretical",
            Self::Practical => "Practical",
            Self::Visual => "Visual",
            Self::Interactive => "Interactive",
        }
    }

    /// Checkbox name in the form.
    pub fn field_name(self) -> &'static str {
        match self {
            Self::Theoretical => "style_theoretical",
            Self::Practical => "style_practical",
            Self::Visual => "style_visual",
            Self::Interactive => "style_interactive",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    pub experience: ExperienceLevel,
    /// Kept in `LearningStyle::ALL` order.
    pub styles: Vec<LearningStyle>,
    pub weekly_hours: u8,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            experience: ExperienceLevel::default(),
            styles: vec![LearningStyle::Practical],
            weekly_hours: DEFAULT_WEEKLY_HOURS,
        }
    }
}

impl Preferences {
    /// The context block appended to the learner's goal.
    pub fn context(&self) -> String {
        let styles = self
            .styles
            .iter()
            .map(|s| s.label())
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "Experience: {}\nLearning Style: {}\nAvailable Time: {} hours/week",
            self.experience.label(),
            styles,
            self.weekly_hours
        )
    }
}

/// The query sent to the gateway: the goal as typed, followed by the preference context.
pub fn compose_query(goal: &str, preferences: &Preferences) -> String {
    format!("{goal}\n\nContext:\n{}", preferences.context())
}

/// Raw urlencoded form body. Unchecked checkboxes are simply absent.
#[derive(Debug, Default, Deserialize)]
pub struct PlanForm {
    #[serde(default)]
    pub goal: String,
    pub experience: Option<String>,
    pub style_theoretical: Option<String>,
    pub style_practical: Option<String>,
    pub style_visual: Option<String>,
    pub style_interactive: Option<String>,
    pub hours: Option<String>,
}

impl PlanForm {
    pub fn preferences(&self) -> Preferences {
        let experience = self
            .experience
            .as_deref()
            .and_then(ExperienceLevel::parse)
            .unwrap_or_default();

        let styles = LearningStyle::ALL
            .into_iter()
            .filter(|style| self.style_checked(*style))
            .collect();

        let weekly_hours = self
            .hours
            .as_deref()
            .and_then(|h| h.trim().parse::<i64>().ok())
            .map(|h| h.clamp(MIN_WEEKLY_HOURS as i64, MAX_WEEKLY_HOURS as i64) as u8)
            .unwrap_or(DEFAULT_WEEKLY_HOURS);

        Preferences {
            experience,
            styles,
            weekly_hours,
        }
    }

    fn style_checked(&self, style: LearningStyle) -> bool {
        let field = match style {
            LearningStyle::Theoretical => &self.style_theoretical,
            LearningStyle::Practical => &self.style_practical,
            LearningStyle::Visual => &self.style_visual,
            LearningStyle::Interactive => &self.style_interactive,
        };
        field.is_some()
    }
}
