//! Render an aggregate manifest as agent prompt text

use std::fmt::Write;

use crate::models::Manifest;

const INTRO: &str = "You are an AI working in a terminal with access to the Grail toolbelt.";

const WHEN_TO_USE: [&str; 3] = [
    "Use web/search/docs commands to find and bundle official docs.",
    "Use sessions/watchers to run dev servers and tests in long-lived terminals.",
    "Use issue-tracker commands (e.g., linear/jira) to fetch issues and context.",
];

const CLOSING: &str =
    "Always prefer Grail for web docs retrieval, bundling, and long-running tasks.";

/// Prompt renderer
pub struct PromptRenderer;

impl PromptRenderer {
    /// Render `manifest` to prompt text
    ///
    /// Sections in order: intro, description, when-to-use, commands,
    /// examples, environment hints, closing line. Empty optional sections
    /// are omitted; `env` renders in map order.
    pub fn render(manifest: &Manifest) -> String {
        let mut out = String::new();

        // Writing into a String cannot fail
        let _ = Self::write_prompt(&mut out, manifest);
        out
    }

    fn write_prompt(out: &mut String, manifest: &Manifest) -> std::fmt::Result {
        writeln!(out, "{}", INTRO)?;
        if let Some(description) = manifest.description() {
            writeln!(out, "Grail: {}", description)?;
            writeln!(out)?;
        }

        writeln!(out, "When to use Grail:")?;
        for line in WHEN_TO_USE {
            writeln!(out, "- {}", line)?;
        }
        writeln!(out)?;

        if !manifest.commands.is_empty() {
            writeln!(out, "Commands:")?;
            for command in &manifest.commands {
                match (command.name(), command.desc()) {
                    (None, _) | (Some(""), _) => continue,
                    (Some(name), Some(desc)) if !desc.is_empty() => {
                        writeln!(out, "- {}: {}", name, desc)?
                    }
                    (Some(name), _) => writeln!(out, "- {}", name)?,
                }
            }
            writeln!(out)?;
        }

        if !manifest.examples.is_empty() {
            writeln!(out, "Examples:")?;
            for example in &manifest.examples {
                writeln!(out, "- {}", example)?;
            }
            writeln!(out)?;
        }

        if !manifest.env.is_empty() {
            writeln!(out, "Environment hints:")?;
            for (key, value) in &manifest.env {
                writeln!(out, "- {}: {}", key, value)?;
            }
            writeln!(out)?;
        }

        writeln!(out, "{}", CLOSING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: serde_json::Value) -> String {
        let manifest: Manifest = serde_json::from_value(value).unwrap();
        PromptRenderer::render(&manifest)
    }

    #[test]
    fn test_minimal_prompt_has_static_sections() {
        let text = render(json!({}));
        assert_eq!(
            text,
            "You are an AI working in a terminal with access to the Grail toolbelt.\n\
             When to use Grail:\n\
             - Use web/search/docs commands to find and bundle official docs.\n\
             - Use sessions/watchers to run dev servers and tests in long-lived terminals.\n\
             - Use issue-tracker commands (e.g., linear/jira) to fetch issues and context.\n\
             \n\
             Always prefer Grail for web docs retrieval, bundling, and long-running tasks.\n"
        );
    }

    #[test]
    fn test_description_line() {
        let text = render(json!({"description": "docs toolbelt"}));
        assert!(text.contains("toolbelt.\nGrail: docs toolbelt\n\nWhen to use Grail:\n"));

        let text = render(json!({"description": ""}));
        assert!(!text.contains("Grail: "));
    }

    #[test]
    fn test_commands_section() {
        let text = render(json!({"commands": [
            {"name": "web.search", "desc": "search docs"},
            {"name": "session.start"},
            {"desc": "nameless"},
            {"name": ""},
            {"name": "web.fetch", "desc": ""}
        ]}));
        assert!(text.contains(
            "Commands:\n- web.search: search docs\n- session.start\n- web.fetch\n\n"
        ));
        assert!(!text.contains("nameless"));
    }

    #[test]
    fn test_commands_header_even_when_all_nameless() {
        let text = render(json!({"commands": [{"desc": "x"}]}));
        assert!(text.contains("Commands:\n\n"));
    }

    #[test]
    fn test_sections_in_fixed_order() {
        let text = render(json!({
            "env": {"TOKEN": "set this", "BASE_URL": "api root"},
            "examples": ["grailx prompt"],
            "commands": [{"name": "web.search"}]
        }));
        let commands = text.find("Commands:").unwrap();
        let examples = text.find("Examples:\n- grailx prompt\n").unwrap();
        let env = text
            .find("Environment hints:\n- TOKEN: set this\n- BASE_URL: api root\n\n")
            .unwrap();
        let closing = text.find("Always prefer Grail").unwrap();
        assert!(commands < examples && examples < env && env < closing);
    }

    #[test]
    fn test_render_is_deterministic() {
        let value = json!({"env": {"B": "2", "A": "1", "C": "3"}});
        assert_eq!(render(value.clone()), render(value));
    }
}
