//! Tool marketplace: the fixed catalog and the user's selection from it

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{BuilderError, Result};

/// Category tab that matches every tool
pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub popular: bool,
    pub selected: bool,
}

impl ToolDescriptor {
    fn new(id: &str, name: &str, description: &str, category: &str, popular: bool) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            popular,
            selected: false,
        }
    }

    /// Case-insensitive match on name or description
    fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }

    fn in_category(&self, category: &str) -> bool {
        category == ALL_CATEGORIES || self.category == category
    }
}

/// Integrations available in the marketplace
pub fn catalog() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new(
            "web-search",
            "Web Search",
            "Search the internet for real-time information and data.",
            "Data Retrieval",
            true,
        ),
        ToolDescriptor::new(
            "knowledge-base",
            "Knowledge Base",
            "Access and query your private document repository.",
            "Data Storage",
            true,
        ),
        ToolDescriptor::new(
            "ai-assistant",
            "AI Assistant",
            "Delegate complex reasoning tasks to a specialized AI model.",
            "AI & ML",
            true,
        ),
        ToolDescriptor::new(
            "function-call",
            "Function Calling",
            "Execute custom code or third-party API integrations.",
            "Integration",
            false,
        ),
    ]
}

/// Per-tool settings edited from the configure dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSettings {
    pub api_key: String,
    pub max_results: u32,
    pub timeout_secs: u32,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            max_results: 5,
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ToolSelection {
    tools: Vec<ToolDescriptor>,
    settings: HashMap<String, ToolSettings>,
}

impl ToolSelection {
    pub fn new() -> Self {
        Self::from_catalog(catalog())
    }

    pub fn from_catalog(tools: Vec<ToolDescriptor>) -> Self {
        Self {
            tools,
            settings: HashMap::new(),
        }
    }

    pub fn tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    pub fn get(&self, id: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|t| t.id == id)
    }

    /// Flip one tool's selected flag and report the new selection
    pub fn toggle(&mut self, id: &str) -> Result<Vec<String>> {
        let tool = self
            .tools
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| BuilderError::UnknownTool(id.to_string()))?;
        tool.selected = !tool.selected;
        tracing::debug!(tool = id, selected = tool.selected, "tool toggled");
        Ok(self.selected_ids())
    }

    /// Selected tool ids in catalog order
    pub fn selected_ids(&self) -> Vec<String> {
        self.tools
            .iter()
            .filter(|t| t.selected)
            .map(|t| t.id.clone())
            .collect()
    }

    /// "All" followed by each catalog category once, in catalog order
    pub fn categories(&self) -> Vec<String> {
        let mut categories = vec![ALL_CATEGORIES.to_string()];
        for tool in &self.tools {
            if !categories.contains(&tool.category) {
                categories.push(tool.category.clone());
            }
        }
        categories
    }

    pub fn filter(&self, query: &str, category: &str) -> Vec<&ToolDescriptor> {
        self.tools
            .iter()
            .filter(|t| t.matches_query(query) && t.in_category(category))
            .collect()
    }

    /// Current settings for a selected tool, defaults if never saved
    pub fn configure(&self, id: &str) -> Result<ToolSettings> {
        let tool = self
            .get(id)
            .ok_or_else(|| BuilderError::UnknownTool(id.to_string()))?;
        if !tool.selected {
            return Err(BuilderError::ToolNotSelected(id.to_string()));
        }
        Ok(self.settings.get(id).cloned().unwrap_or_default())
    }

    pub fn save_settings(&mut self, id: &str, settings: ToolSettings) -> Result<()> {
        self.configure(id)?;
        self.settings.insert(id.to_string(), settings);
        Ok(())
    }
}

impl Default for ToolSelection {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_toggle_restores_flag() {
        let mut tools = ToolSelection::new();
        let before = tools.get("web-search").unwrap().selected;

        tools.toggle("web-search").unwrap();
        assert_ne!(tools.get("web-search").unwrap().selected, before);

        tools.toggle("web-search").unwrap();
        assert_eq!(tools.get("web-search").unwrap().selected, before);
    }

    #[test]
    fn test_toggle_reports_selection_in_catalog_order() {
        let mut tools = ToolSelection::new();
        tools.toggle("function-call").unwrap();
        let selected = tools.toggle("web-search").unwrap();
        assert_eq!(selected, vec!["web-search", "function-call"]);
    }

    #[test]
    fn test_toggle_only_touches_one_tool() {
        let mut tools = ToolSelection::new();
        tools.toggle("ai-assistant").unwrap();
        let selected: Vec<&str> = tools
            .tools()
            .iter()
            .filter(|t| t.selected)
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(selected, vec!["ai-assistant"]);
    }

    #[test]
    fn test_toggle_unknown_tool() {
        let mut tools = ToolSelection::new();
        assert!(matches!(
            tools.toggle("nope"),
            Err(BuilderError::UnknownTool(id)) if id == "nope"
        ));
        assert!(tools.selected_ids().is_empty());
    }

    #[test]
    fn test_filter_search_all() {
        let tools = ToolSelection::new();
        let found = tools.filter("search", ALL_CATEGORIES);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Web Search");
    }

    #[test]
    fn test_filter_is_case_insensitive_and_matches_description() {
        let tools = ToolSelection::new();
        let found = tools.filter("REPOSITORY", ALL_CATEGORIES);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "knowledge-base");
    }

    #[test]
    fn test_filter_by_category() {
        let tools = ToolSelection::new();
        assert_eq!(tools.filter("", ALL_CATEGORIES).len(), 4);

        let found = tools.filter("", "Integration");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "function-call");

        assert!(tools.filter("search", "Integration").is_empty());
    }

    #[test]
    fn test_categories() {
        let tools = ToolSelection::new();
        assert_eq!(
            tools.categories(),
            vec!["All", "Data Retrieval", "Data Storage", "AI & ML", "Integration"]
        );
    }

    #[test]
    fn test_configure_requires_selection() {
        let mut tools = ToolSelection::new();
        assert!(matches!(
            tools.configure("web-search"),
            Err(BuilderError::ToolNotSelected(_))
        ));

        tools.toggle("web-search").unwrap();
        assert_eq!(tools.configure("web-search").unwrap(), ToolSettings::default());
    }

    #[test]
    fn test_save_settings() {
        let mut tools = ToolSelection::new();
        tools.toggle("web-search").unwrap();
        let settings = ToolSettings {
            api_key: "key".to_string(),
            max_results: 20,
            timeout_secs: 30,
        };
        tools.save_settings("web-search", settings.clone()).unwrap();
        assert_eq!(tools.configure("web-search").unwrap(), settings);

        assert!(tools.save_settings("ai-assistant", settings).is_err());
    }
}
