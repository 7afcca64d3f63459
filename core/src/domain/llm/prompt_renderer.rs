use std::{collections::HashMap, fs, path::Path};

use handlebars::{Handlebars, Template, handlebars_helper, no_escape};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::domain::{common::entities::app_errors::CoreError, llm::tasks::Task};

const BUILTIN_TEMPLATES: [(Task, u32, &str); 4] = [
    (
        Task::MealPlan,
        1,
        include_str!("../../../prompts/meal_plan/v1.txt"),
    ),
    (Task::Recipe, 1, include_str!("../../../prompts/recipe/v1.txt")),
    (
        Task::Grocery,
        1,
        include_str!("../../../prompts/grocery/v1.txt"),
    ),
    (
        Task::Prakriti,
        1,
        include_str!("../../../prompts/prakriti/v1.txt"),
    ),
];

handlebars_helper!(join: |items: array| {
    if items.is_empty() {
        "none".to_string()
    } else {
        items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                Value::Null => String::new(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
});

/// Versioned user-prompt templates addressed by `<task>/v<version>`.
///
/// Templates are Handlebars rendered in strict mode against the JSON
/// context, so a missing variable fails the render. Output is not
/// HTML-escaped. Lists go through `{{ join items }}`, which renders an
/// empty list as `none`.
#[derive(Debug, Clone)]
pub struct PromptRenderer {
    templates: HashMap<(Task, u32), String>,
    registry: Handlebars<'static>,
}

impl PromptRenderer {
    pub fn builtin() -> Self {
        let templates = BUILTIN_TEMPLATES
            .iter()
            .map(|(task, version, template)| ((*task, *version), template.to_string()))
            .collect();

        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(no_escape);
        registry.register_helper("join", Box::new(join));

        Self {
            templates,
            registry,
        }
    }

    /// Built-in templates overlaid with `<directory>/<task>/v<N>.txt` files.
    ///
    /// Override templates are compiled here so a syntax error fails startup.
    pub fn load(directory: Option<&Path>) -> Result<Self, CoreError> {
        let mut renderer = Self::builtin();

        let Some(directory) = directory else {
            return Ok(renderer);
        };

        for task in Task::ALL {
            let task_dir = directory.join(task.as_str());
            if !task_dir.is_dir() {
                continue;
            }

            let entries = fs::read_dir(&task_dir).map_err(|e| {
                CoreError::PromptRender(format!("failed to read {}: {}", task_dir.display(), e))
            })?;

            for entry in entries {
                let path = entry
                    .map_err(|e| {
                        CoreError::PromptRender(format!(
                            "failed to read {}: {}",
                            task_dir.display(),
                            e
                        ))
                    })?
                    .path();

                let Some(version) = parse_version(&path) else {
                    debug!("skipping non-template file {}", path.display());
                    continue;
                };

                let template = fs::read_to_string(&path).map_err(|e| {
                    CoreError::PromptRender(format!("failed to read {}: {}", path.display(), e))
                })?;

                Template::compile(&template).map_err(|e| {
                    CoreError::PromptRender(format!("invalid template {}: {}", path.display(), e))
                })?;

                info!(task = %task, version, "loaded prompt template {}", path.display());
                renderer.templates.insert((task, version), template);
            }
        }

        Ok(renderer)
    }

    pub fn template_name(task: Task, version: u32) -> String {
        format!("{}/v{}.txt", task.as_str(), version)
    }

    pub fn has_template(&self, task: Task, version: u32) -> bool {
        self.templates.contains_key(&(task, version))
    }

    pub fn render<T: Serialize>(
        &self,
        task: Task,
        version: u32,
        context: &T,
    ) -> Result<String, CoreError> {
        let template =
            self.templates
                .get(&(task, version))
                .ok_or_else(|| CoreError::TemplateNotFound {
                    task: task.as_str().to_string(),
                    version,
                })?;

        let context = serde_json::to_value(context)
            .map_err(|e| CoreError::PromptRender(format!("invalid prompt context: {}", e)))?;

        let rendered = self
            .registry
            .render_template(template, &context)
            .map_err(|e| {
                CoreError::PromptRender(format!(
                    "rendering {} failed: {}",
                    Self::template_name(task, version),
                    e
                ))
            })?;

        Ok(format!("{}\n", rendered.trim()))
    }
}

fn parse_version(path: &Path) -> Option<u32> {
    if path.extension()?.to_str()? != "txt" {
        return None;
    }

    path.file_stem()?.to_str()?.strip_prefix('v')?.parse().ok()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn renderer_with(task: Task, version: u32, template: &str) -> PromptRenderer {
        let mut renderer = PromptRenderer::builtin();
        renderer
            .templates
            .insert((task, version), template.to_string());
        renderer
    }

    #[test]
    fn test_render_substitutes_nested_values() {
        let renderer = renderer_with(
            Task::Recipe,
            7,
            "  Cook {{ dish }} for {{household.size}} ({{ join tags }}) & serve  \n\n",
        );

        let rendered = renderer
            .render(
                Task::Recipe,
                7,
                &json!({"dish": "Poha", "household": {"size": 4}, "tags": ["quick", "light"]}),
            )
            .unwrap();

        assert_eq!(rendered, "Cook Poha for 4 (quick, light) & serve\n");
    }

    #[test]
    fn test_empty_list_renders_as_none() {
        let renderer = renderer_with(Task::MealPlan, 9, "Avoid: {{ join avoid }}");
        let rendered = renderer
            .render(Task::MealPlan, 9, &json!({"avoid": []}))
            .unwrap();
        assert_eq!(rendered, "Avoid: none\n");
    }

    #[test]
    fn test_null_renders_empty() {
        let renderer = renderer_with(Task::Prakriti, 9, "Age: {{ age }}.");
        let rendered = renderer
            .render(Task::Prakriti, 9, &json!({"age": null}))
            .unwrap();
        assert_eq!(rendered, "Age: .\n");
    }

    #[test]
    fn test_missing_template_is_reported() {
        let error = PromptRenderer::builtin()
            .render(Task::Recipe, 42, &json!({}))
            .unwrap_err();

        assert!(matches!(
            error,
            CoreError::TemplateNotFound { ref task, version: 42 } if task == "recipe"
        ));
    }

    #[test]
    fn test_missing_value_is_render_error() {
        let renderer = renderer_with(Task::Recipe, 3, "{{ dish }}");
        let error = renderer.render(Task::Recipe, 3, &json!({})).unwrap_err();
        assert!(matches!(error, CoreError::PromptRender(_)));
    }

    #[test]
    fn test_missing_nested_value_is_render_error() {
        let renderer = renderer_with(Task::Grocery, 3, "{{ household.size }}");
        let error = renderer
            .render(Task::Grocery, 3, &json!({"household": {}}))
            .unwrap_err();
        assert!(matches!(error, CoreError::PromptRender(_)));
    }

    #[test]
    fn test_override_directory_takes_precedence() {
        let dir = std::env::temp_dir().join(format!("swasth-prompts-{}", std::process::id()));
        fs::create_dir_all(dir.join("recipe")).unwrap();
        fs::write(dir.join("recipe").join("v1.txt"), "Custom {{ dish }}").unwrap();

        let renderer = PromptRenderer::load(Some(&dir)).unwrap();
        let rendered = renderer.render(Task::Recipe, 1, &json!({"dish": "Upma"}));
        fs::remove_dir_all(&dir).unwrap();

        assert_eq!(rendered.unwrap(), "Custom Upma\n");
    }

    #[test]
    fn test_builtin_templates_render_with_full_context() {
        let rendered = PromptRenderer::builtin()
            .render(
                Task::Prakriti,
                1,
                &json!({
                    "profile": {"name": "Ravi", "age": null, "gender": null, "region": "Kerala"},
                    "questions": "none"
                }),
            )
            .unwrap();

        assert!(rendered.contains("Name: Ravi\nAge: \n"));
        assert!(rendered.contains("Region: Kerala"));
    }

    #[test]
    fn test_builtin_templates_cover_every_task() {
        let renderer = PromptRenderer::builtin();
        for task in Task::ALL {
            assert!(renderer.has_template(task, 1), "missing v1 for {}", task);
        }
    }

    #[test]
    fn test_template_name() {
        assert_eq!(
            PromptRenderer::template_name(Task::MealPlan, 2),
            "meal_plan/v2.txt"
        );
    }

    #[test]
    fn test_parse_version_from_file_name() {
        assert_eq!(parse_version(Path::new("/p/recipe/v12.txt")), Some(12));
        assert_eq!(parse_version(Path::new("/p/recipe/v1.j2")), None);
        assert_eq!(parse_version(Path::new("/p/recipe/notes.txt")), None);
    }
}
