use crate::step::WizardStep;

/// Auxiliary panel shown under the chat for a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    None,
    ToolPicker,
    KnowledgeUploader,
    ReviewBundle,
}

pub fn panel_for(step: WizardStep) -> Panel {
    match step {
        WizardStep::ConfigureTools => Panel::ToolPicker,
        WizardStep::AddKnowledge => Panel::KnowledgeUploader,
        WizardStep::ReviewDeploy => Panel::ReviewBundle,
        WizardStep::DefineAgent | WizardStep::SpecifyTasks | WizardStep::SelectDomain => {
            Panel::None
        }
    }
}

/// One box in the workflow diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowStage {
    pub label: &'static str,
    pub detail: Option<&'static str>,
}

/// Execution flow of the generated agent, top to bottom. The middle row runs
/// side by side.
pub fn workflow() -> Vec<Vec<WorkflowStage>> {
    let stage = |label: &'static str, detail: Option<&'static str>| WorkflowStage { label, detail };
    vec![
        vec![stage("User Request", None)],
        vec![stage("Planner", Some("Analyzes request and plans execution steps"))],
        vec![
            stage("Search", None),
            stage("Knowledge", None),
            stage("Functions", None),
        ],
        vec![stage(
            "Generator",
            Some("Produces the final response based on tool outputs"),
        )],
        vec![stage("Agent Response", None)],
    ]
}
