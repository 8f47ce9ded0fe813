use serde::{Deserialize, Serialize};

/// Stage of the guided agent-building flow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WizardStep {
    #[default]
    DefineAgent,
    SpecifyTasks,
    SelectDomain,
    ConfigureTools,
    AddKnowledge,
    ReviewDeploy,
}

impl WizardStep {
    pub const LAST: WizardStep = WizardStep::ReviewDeploy;
    pub const COUNT: u8 = 6;

    pub fn number(&self) -> u8 {
        match self {
            WizardStep::DefineAgent => 1,
            WizardStep::SpecifyTasks => 2,
            WizardStep::SelectDomain => 3,
            WizardStep::ConfigureTools => 4,
            WizardStep::AddKnowledge => 5,
            WizardStep::ReviewDeploy => 6,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(WizardStep::DefineAgent),
            2 => Some(WizardStep::SpecifyTasks),
            3 => Some(WizardStep::SelectDomain),
            4 => Some(WizardStep::ConfigureTools),
            5 => Some(WizardStep::AddKnowledge),
            6 => Some(WizardStep::ReviewDeploy),
            _ => None,
        }
    }

    pub fn all() -> Vec<WizardStep> {
        (1..=Self::COUNT).filter_map(Self::from_number).collect()
    }

    /// Next stage, clamped at the terminal step
    pub fn advance(self) -> Self {
        Self::from_number(self.number() + 1).unwrap_or(Self::LAST)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            WizardStep::DefineAgent => "Define Agent",
            WizardStep::SpecifyTasks => "Specify Tasks",
            WizardStep::SelectDomain => "Select Domain",
            WizardStep::ConfigureTools => "Configure Tools",
            WizardStep::AddKnowledge => "Add Knowledge",
            WizardStep::ReviewDeploy => "Review & Deploy",
        }
    }

    /// Completion percentage shown next to the progress bar (0 at step 1, 100 at step 6)
    pub fn progress_percent(&self) -> u8 {
        let done = f64::from(self.number() - 1);
        let span = f64::from(Self::COUNT - 1);
        (done / span * 100.0).min(100.0).round() as u8
    }
}

/// Holds the active step. Only moves forward, one stage at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepController {
    current: WizardStep,
}

impl StepController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> WizardStep {
        self.current
    }

    /// Apply a completed exchange that started at `from`.
    ///
    /// Returns true when the visible step changed. A late completion for an
    /// older step never moves the controller backward.
    pub fn complete_exchange(&mut self, from: WizardStep) -> bool {
        let next = from.advance().max(self.current);
        let changed = next != self.current;
        self.current = next;
        changed
    }
}
