//! Factories for every shared service.
//!
//! Each factory reads only the services it is built from.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::analytics::Analytics;
use crate::cache::CachePool;
use crate::cli::commands::{
    HelpCommand, PackageSyncCommand, PackagistDownloadsCommand, PackagistSyncCommand,
    RouterCacheCommand, TemplateResetCacheCommand, UpdateCommand,
};
use crate::cli::{CliApplication, CliOptions, Console, ConsoleOutput};
use crate::config::WebsiteConfig;
use crate::controller::{
    Controllers, HomepageController, PackageController, PackageControllerGet, PageController,
    StatusController, StatusControllerGet, WrongCmsController,
};
use crate::helper::{PackageHelper, PackageRegistry, PackagistHelper};
use crate::model::{Database, PackageModel, ReleaseModel};
use crate::renderer::{Renderer, TeraRenderer};
use crate::routing::{compiled, Router};
use crate::services::{Container, ContainerError, ServiceProvider};
use crate::view::{PackageHtmlView, PackageJsonView, StatusHtmlView, StatusJsonView};
use crate::web::{DebugBar, WebApplication};

type Built<T> = Result<T, ContainerError>;

fn renderer(c: &Container) -> Result<Arc<dyn Renderer>, ContainerError> {
    Ok(c.get::<TeraRenderer>()?)
}

pub fn package_registry(c: &Container) -> Built<PackageRegistry> {
    let config = c.get::<WebsiteConfig>()?;
    PackageRegistry::load(Path::new(&config.packages.manifest))
        .map_err(ContainerError::construction::<PackageRegistry>)
}

pub fn package_helper(c: &Container) -> Built<PackageHelper> {
    let config = c.get::<WebsiteConfig>()?;
    Ok(PackageHelper::new(
        c.get::<PackageRegistry>()?,
        config.packages.repository_base.clone(),
    ))
}

pub fn http_client(c: &Container) -> Built<reqwest::Client> {
    let config = c.get::<WebsiteConfig>()?;
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.packagist.timeout_secs))
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(ContainerError::construction::<reqwest::Client>)
}

pub fn packagist_helper(c: &Container) -> Built<PackagistHelper> {
    let config = c.get::<WebsiteConfig>()?;
    let http = c.get::<reqwest::Client>()?;
    Ok(PackagistHelper::new(
        http.as_ref().clone(),
        c.get::<CachePool>()?,
        c.get::<PackageRegistry>()?,
        &config.packagist,
        config.packages.vendor.clone(),
    ))
}

pub fn analytics(c: &Container) -> Built<Analytics> {
    let config = c.get::<WebsiteConfig>()?;
    let http = c.get::<reqwest::Client>()?;
    Ok(Analytics::new(http.as_ref().clone(), config.analytics.clone()))
}

pub fn router_service(c: &Container) -> Built<Router> {
    let config = c.get::<WebsiteConfig>()?;
    compiled::load_or_build(Path::new(&config.router.compiled_path))
        .map_err(ContainerError::construction::<Router>)
}

pub fn database(c: &Container) -> Built<Database> {
    let config = c.get::<WebsiteConfig>()?;
    Database::connect_lazy(&config.database).map_err(ContainerError::construction::<Database>)
}

pub fn tera_renderer(c: &Container) -> Built<TeraRenderer> {
    let config = c.get::<WebsiteConfig>()?;
    TeraRenderer::new(&config.templates).map_err(ContainerError::construction::<TeraRenderer>)
}

pub fn web_application(c: &Container) -> Built<WebApplication> {
    let config = c.get::<WebsiteConfig>()?;
    let mut app = WebApplication::new(
        config.clone(),
        c.get::<Router>()?,
        c.get::<Controllers>()?,
        renderer(c)?,
    );

    if config.debug && c.has::<DebugBar>() {
        app.set_debug_bar(c.get::<DebugBar>()?);
    }
    Ok(app)
}

/// Registers the web and console object graphs.
#[derive(Debug, Default)]
pub struct ApplicationProvider;

impl ServiceProvider for ApplicationProvider {
    fn register(&self, container: &mut Container) {
        container
            .share(package_registry)
            .share(package_helper)
            .share(http_client)
            .share(|_| Ok(CachePool::new()))
            .share(packagist_helper)
            .share(analytics)
            .share(router_service)
            .share(database)
            .share(|c| Ok(PackageModel::new(c.get::<Database>()?.as_ref().clone())))
            .share(|c| Ok(ReleaseModel::new(c.get::<Database>()?.as_ref().clone())))
            .share(tera_renderer);

        // Views
        container
            .share(|c| {
                let mut view = PackageHtmlView::new(
                    c.get::<PackageModel>()?,
                    c.get::<ReleaseModel>()?,
                    c.get::<PackageHelper>()?,
                    renderer(c)?,
                );
                view.set_layout("package.html");
                Ok(view)
            })
            .share(|c| {
                Ok(PackageJsonView::new(
                    c.get::<PackageModel>()?,
                    c.get::<ReleaseModel>()?,
                ))
            })
            .share(|c| {
                let mut view = StatusHtmlView::new(
                    c.get::<PackageModel>()?,
                    c.get::<ReleaseModel>()?,
                    c.get::<PackagistHelper>()?,
                    renderer(c)?,
                );
                view.set_layout("status.html");
                Ok(view)
            })
            .share(|c| {
                Ok(StatusJsonView::new(
                    c.get::<PackageModel>()?,
                    c.get::<ReleaseModel>()?,
                ))
            });

        // Controllers
        container
            .share(|c| Ok(HomepageController::new(renderer(c)?)))
            .share(|c| Ok(PageController::new(renderer(c)?)))
            .share(|c| Ok(StatusController::new(c.get::<StatusHtmlView>()?)))
            .share(|c| Ok(PackageController::new(c.get::<PackageHtmlView>()?)))
            .share(|_| Ok(WrongCmsController::new()))
            .share(|c| {
                Ok(StatusControllerGet::new(
                    c.get::<StatusJsonView>()?,
                    c.get::<Analytics>()?,
                ))
            })
            .share(|c| {
                Ok(PackageControllerGet::new(
                    c.get::<PackageJsonView>()?,
                    c.get::<Analytics>()?,
                ))
            })
            .share(|c| {
                Ok(Controllers {
                    homepage: c.get()?,
                    page: c.get()?,
                    status: c.get()?,
                    package: c.get()?,
                    wrong_cms: c.get()?,
                    api_status: c.get()?,
                    api_package: c.get()?,
                })
            })
            .share(web_application);

        // Console
        container
            .share(|c| Ok(ConsoleOutput::stdout(c.get::<CliOptions>()?.no_colors)))
            .share(|_| Ok(HelpCommand::new()))
            .share(|c| {
                Ok(PackageSyncCommand::new(
                    c.get::<PackageRegistry>()?,
                    c.get::<PackageHelper>()?,
                    c.get::<PackageModel>()?,
                ))
            })
            .share(|c| {
                Ok(PackagistSyncCommand::new(
                    c.get::<PackageModel>()?,
                    c.get::<ReleaseModel>()?,
                    c.get::<PackagistHelper>()?,
                ))
            })
            .share(|c| Ok(PackagistDownloadsCommand::new(c.get::<PackagistHelper>()?)))
            .share(|c| {
                let config = c.get::<WebsiteConfig>()?;
                Ok(RouterCacheCommand::new(&config.router.compiled_path))
            })
            .share(|c| Ok(TemplateResetCacheCommand::new(renderer(c)?)))
            .share(|c| {
                Ok(UpdateCommand::new(
                    c.get::<PackageSyncCommand>()?,
                    c.get::<PackagistSyncCommand>()?,
                    c.get::<RouterCacheCommand>()?,
                    c.get::<TemplateResetCacheCommand>()?,
                ))
            })
            .share(|c| {
                Ok(Console {
                    help: c.get()?,
                    package_sync: c.get()?,
                    packagist_sync: c.get()?,
                    packagist_downloads: c.get()?,
                    router_cache: c.get()?,
                    template_reset_cache: c.get()?,
                    update: c.get()?,
                })
            })
            .share(|c| {
                Ok(CliApplication::new(
                    c.get::<Console>()?,
                    c.get::<ConsoleOutput>()?,
                    c.get::<WebsiteConfig>()?,
                ))
            });
    }
}

/// Registers the request debug bar.
#[derive(Debug, Default)]
pub struct DebugProvider;

impl ServiceProvider for DebugProvider {
    fn register(&self, container: &mut Container) {
        container.share(|c| {
            let config = c.get::<WebsiteConfig>()?;
            Ok(DebugBar::new(config.debug_bar.capacity))
        });
    }
}

/// Container holding `config` and every provider the binaries use.
pub fn bootstrap(config: WebsiteConfig) -> Container {
    let debug = config.debug;
    let mut container = Container::new();
    container.set(config);

    ApplicationProvider.register(&mut container);
    if debug {
        DebugProvider.register(&mut container);
    }
    container
}
