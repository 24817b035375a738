//! Core notification engine trait definition.

use crate::error::Result;
use crate::notification::{NoticeLevel, Notification};
use serde::Serialize;

/// Trait for rendering notification templates with dynamic context.
///
/// Workflows never call this directly. They return plain values, and the
/// caller renders a notification afterwards, keeping mutation logic free of
/// presentation side effects.
pub trait NoticeEngine {
    /// Renders a template with the provided context.
    ///
    /// # Arguments
    ///
    /// * `template` - Name of the template to render (without extension)
    /// * `ctx` - Context data to use for rendering
    ///
    /// # Errors
    ///
    /// Returns an error if the template does not exist or rendering fails.
    fn render<T: Serialize>(&self, template: &str, ctx: &T) -> Result<String>;

    /// Renders a template into a [`Notification`] of the given level.
    ///
    /// # Errors
    ///
    /// Returns an error if the template does not exist or rendering fails.
    fn notify<T: Serialize>(
        &self,
        level: NoticeLevel,
        template: &str,
        ctx: &T,
    ) -> Result<Notification> {
        let message = self.render(template, ctx)?;
        Ok(Notification::new(level, message.trim().to_string()))
    }

    /// Lists all available template names, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the override directory cannot be read.
    fn list_templates(&self) -> Result<Vec<String>>;
}
