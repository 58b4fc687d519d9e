//! Template rendering.
//!
//! `TeraRenderer` parses every `*.html` file under the template directory
//! once and keeps the parsed set in memory. `reset_cache` throws the parsed
//! set away and reads the directory again.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::Serialize;
use tera::{Context, Tera};

use crate::config::TemplateConfig;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("template error: {0}")]
    Tera(#[from] tera::Error),

    #[error("template context must serialize to an object")]
    Context,
}

/// Renders named templates with a serializable context.
pub trait Renderer: Send + Sync {
    fn render(&self, template: &str, data: &serde_json::Value) -> Result<String, RenderError>;

    fn has_template(&self, template: &str) -> bool;

    /// Drop and rebuild any cached templates. Returns how many were loaded.
    fn reset_cache(&self) -> Result<usize, RenderError>;
}

pub struct TeraRenderer {
    tera: RwLock<Tera>,
    path: PathBuf,
    auto_reload: bool,
}

fn glob_for(dir: &Path) -> String {
    format!("{}/**/*.html", dir.display())
}

impl TeraRenderer {
    pub fn new(config: &TemplateConfig) -> Result<Self, RenderError> {
        let path = PathBuf::from(&config.path);
        let tera = Tera::new(&glob_for(&path))?;

        tracing::debug!(
            path = %path.display(),
            templates = tera.get_template_names().count(),
            "Templates loaded"
        );

        Ok(Self {
            tera: RwLock::new(tera),
            path,
            auto_reload: config.auto_reload,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Render with any serializable value as the context.
    pub fn render_with<T: Serialize>(&self, template: &str, data: &T) -> Result<String, RenderError> {
        let value = serde_json::to_value(data).map_err(|_| RenderError::Context)?;
        self.render(template, &value)
    }

    fn template_count(&self) -> usize {
        self.tera
            .read()
            .expect("template lock poisoned")
            .get_template_names()
            .count()
    }
}

impl Renderer for TeraRenderer {
    fn render(&self, template: &str, data: &serde_json::Value) -> Result<String, RenderError> {
        if self.auto_reload {
            self.reset_cache()?;
        }

        let context = match data {
            serde_json::Value::Null => Context::new(),
            serde_json::Value::Object(_) => Context::from_value(data.clone())?,
            _ => return Err(RenderError::Context),
        };

        let tera = self.tera.read().expect("template lock poisoned");
        Ok(tera.render(template, &context)?)
    }

    fn has_template(&self, template: &str) -> bool {
        if self.auto_reload {
            if let Err(e) = self.reset_cache() {
                tracing::warn!(error = %e, "Template reload failed");
            }
        }

        self.tera
            .read()
            .expect("template lock poisoned")
            .get_template_names()
            .any(|name| name == template)
    }

    fn reset_cache(&self) -> Result<usize, RenderError> {
        let fresh = Tera::new(&glob_for(&self.path))?;
        *self.tera.write().expect("template lock poisoned") = fresh;

        let count = self.template_count();
        tracing::debug!(path = %self.path.display(), templates = count, "Template cache reset");
        Ok(count)
    }
}
