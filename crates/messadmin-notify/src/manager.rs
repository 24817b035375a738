//! Notification manager implementation using minijinja.

use crate::engine::NoticeEngine;
use crate::error::{NoticeError, Result};
use serde::Serialize;
use std::path::PathBuf;

/// Templates compiled into the binary, keyed by name (without extension).
const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    ("action_in_flight", include_str!("../templates/action_in_flight.j2")),
    ("config_failed", include_str!("../templates/config_failed.j2")),
    ("config_ok", include_str!("../templates/config_ok.j2")),
    ("fetch_failed", include_str!("../templates/fetch_failed.j2")),
    ("fetch_ok", include_str!("../templates/fetch_ok.j2")),
    ("invalid_transition", include_str!("../templates/invalid_transition.j2")),
    ("login_ok", include_str!("../templates/login_ok.j2")),
    ("mess_detail", include_str!("../templates/mess_detail.j2")),
    ("mess_not_found", include_str!("../templates/mess_not_found.j2")),
    ("password_changed", include_str!("../templates/password_changed.j2")),
    ("register_ok", include_str!("../templates/register_ok.j2")),
    ("rejected", include_str!("../templates/rejected.j2")),
    ("request_failed", include_str!("../templates/request_failed.j2")),
    ("validation_failed", include_str!("../templates/validation_failed.j2")),
    ("verified", include_str!("../templates/verified.j2")),
    ("verify_failed", include_str!("../templates/verify_failed.j2")),
];

/// Manager for loading and rendering notification templates.
///
/// `NoticeManager` wraps a minijinja environment holding the built-in
/// templates. When constructed with an override directory, any `<name>.j2`
/// file found there replaces the built-in template of the same name, and
/// additional files become available by name.
///
/// # Examples
///
/// ```
/// use messadmin_notify::{NoticeContext, NoticeEngine, NoticeManager};
///
/// let manager = NoticeManager::builtin()?;
/// let text = manager.render("mess_not_found", &NoticeContext::for_mess("42", "Quick Bites"))?;
/// assert_eq!(text, "Mess 42 was not found.");
/// # Ok::<(), messadmin_notify::NoticeError>(())
/// ```
#[derive(Debug)]
pub struct NoticeManager {
    /// Optional directory containing override `.j2` templates.
    pub templates_dir: Option<PathBuf>,
    /// Minijinja environment for template rendering.
    env: minijinja::Environment<'static>,
}

impl NoticeManager {
    /// Creates a manager that only knows the built-in templates.
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in template fails to compile.
    pub fn builtin() -> Result<Self> {
        Self::build(None)
    }

    /// Creates a manager whose templates can be overridden from `templates_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory does not exist or is not a directory.
    pub fn new(templates_dir: PathBuf) -> Result<Self> {
        if !templates_dir.is_dir() {
            return Err(NoticeError::TemplateDirectoryNotFound(templates_dir));
        }
        Self::build(Some(templates_dir))
    }

    fn build(templates_dir: Option<PathBuf>) -> Result<Self> {
        let mut env = minijinja::Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);

        if let Some(dir) = &templates_dir {
            env.set_loader(minijinja::path_loader(dir));
        }

        for (name, source) in BUILTIN_TEMPLATES {
            // Explicitly added templates shadow the loader, so skip overridden ones.
            if let Some(dir) = &templates_dir
                && dir.join(format!("{name}.j2")).is_file()
            {
                continue;
            }
            env.add_template_owned(format!("{name}.j2"), *source)
                .map_err(|e| NoticeError::InvalidTemplate {
                    name: (*name).to_string(),
                    reason: e.to_string(),
                })?;
        }

        Ok(Self { templates_dir, env })
    }

    /// Loads a template by name (without the `.j2` extension).
    fn load_template(&self, name: &str) -> Result<minijinja::Template<'_, '_>> {
        let template_name = format!("{name}.j2");
        self.env
            .get_template(&template_name)
            .map_err(|e| NoticeError::TemplateNotFound(format!("{name}: {e}")))
    }
}

impl NoticeEngine for NoticeManager {
    fn render<T: Serialize>(&self, template: &str, ctx: &T) -> Result<String> {
        let tmpl = self.load_template(template)?;
        tmpl.render(ctx)
            .map_err(|e| NoticeError::TemplateRenderError(format!("{template}: {e}")))
    }

    fn list_templates(&self) -> Result<Vec<String>> {
        let mut templates: Vec<String> = BUILTIN_TEMPLATES
            .iter()
            .map(|(name, _)| (*name).to_string())
            .collect();

        if let Some(dir) = &self.templates_dir {
            let entries = std::fs::read_dir(dir).map_err(|source| NoticeError::TemplateListError {
                path: dir.clone(),
                source,
            })?;

            for entry in entries {
                let entry = entry.map_err(|source| NoticeError::TemplateListError {
                    path: dir.clone(),
                    source,
                })?;

                let path = entry.path();

                if path.is_file()
                    && let Some(ext) = path.extension()
                    && ext == "j2"
                    && let Some(name) = path.file_stem()
                    && let Some(name_str) = name.to_str()
                {
                    templates.push(name_str.to_string());
                }
            }
        }

        templates.sort();
        templates.dedup();
        Ok(templates)
    }
}
