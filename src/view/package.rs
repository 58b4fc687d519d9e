//! Single package views.

use std::sync::Arc;

use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::helper::PackageHelper;
use crate::model::{Package, PackageModel, Release, ReleaseModel};
use crate::renderer::Renderer;

async fn load(
    packages: &PackageModel,
    releases: &ReleaseModel,
    name: &str,
) -> AppResult<(Package, Vec<Release>)> {
    let package = packages
        .package(name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("package '{name}'")))?;
    let history = releases.package_history(package.id).await?;
    Ok((package, history))
}

pub struct PackageHtmlView {
    packages: Arc<PackageModel>,
    releases: Arc<ReleaseModel>,
    helper: Arc<PackageHelper>,
    renderer: Arc<dyn Renderer>,
    layout: String,
}

impl PackageHtmlView {
    pub fn new(
        packages: Arc<PackageModel>,
        releases: Arc<ReleaseModel>,
        helper: Arc<PackageHelper>,
        renderer: Arc<dyn Renderer>,
    ) -> Self {
        Self {
            packages,
            releases,
            helper,
            renderer,
            layout: "package.html".to_string(),
        }
    }

    pub fn set_layout(&mut self, layout: impl Into<String>) -> &mut Self {
        self.layout = layout.into();
        self
    }

    pub fn layout(&self) -> &str {
        &self.layout
    }

    pub async fn render(&self, name: &str) -> AppResult<String> {
        let (package, releases) = load(&self.packages, &self.releases, name).await?;

        let data = json!({
            "repository_url": self.helper.repository_url(&package.package),
            "package": package,
            "releases": releases,
        });
        Ok(self.renderer.render(&self.layout, &data)?)
    }
}

pub struct PackageJsonView {
    packages: Arc<PackageModel>,
    releases: Arc<ReleaseModel>,
}

impl PackageJsonView {
    pub fn new(packages: Arc<PackageModel>, releases: Arc<ReleaseModel>) -> Self {
        Self { packages, releases }
    }

    pub async fn render(&self, name: &str) -> AppResult<serde_json::Value> {
        let (package, releases) = load(&self.packages, &self.releases, name).await?;
        Ok(json!({
            "package": package,
            "releases": releases,
        }))
    }
}
