/// Template shown on the review step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptKind {
    Planner,
    Generator,
}

impl PromptKind {
    pub fn all() -> Vec<PromptKind> {
        vec![PromptKind::Planner, PromptKind::Generator]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PromptKind::Planner => "Planner Prompt",
            PromptKind::Generator => "Generator Prompt",
        }
    }

    pub fn help(&self) -> &'static str {
        match self {
            PromptKind::Planner => "This prompt guides how your agent plans the steps to fulfill a request",
            PromptKind::Generator => "This prompt guides how your agent generates the final response",
        }
    }

    pub fn template(&self) -> &'static str {
        match self {
            PromptKind::Planner => PLANNER_PROMPT,
            PromptKind::Generator => GENERATOR_PROMPT,
        }
    }

    pub fn next(self) -> Self {
        match self {
            PromptKind::Planner => PromptKind::Generator,
            PromptKind::Generator => PromptKind::Planner,
        }
    }
}

pub const PLANNER_PROMPT: &str = "You are an expert planner for the AI agent. Your job is to:
1. Analyze the user's request carefully
2. Determine what tools and information are needed
3. Break down the request into a sequence of steps
4. Provide clear instructions for each step

FORMAT:
- UNDERSTANDING: [Restate the user's request in your own words]
- REQUIRED TOOLS: [List tools needed]
- KNOWLEDGE NEEDED: [What information is required]
- STEPS:
  1. [First step with instructions]
  2. [Second step with instructions]
  ...
- VALIDATION: [How to check if the response meets requirements]";

pub const GENERATOR_PROMPT: &str = "You are an expert response generator for the AI agent. Your job is to:
1. Take in the outputs from the planning stage and tools
2. Synthesize all information into a coherent, helpful response
3. Format the response appropriately for the user
4. Ensure the response fully addresses the original request

The response should be:
- Clear and concise
- Well-structured and readable
- Accurate based on the tools' outputs
- Complete, addressing all aspects of the request
- Natural and conversational in tone

If you don't have enough information, acknowledge limitations transparently.";
