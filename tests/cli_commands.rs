//! Console commands run through the container, as `website-cli` does.

use std::path::{Path, PathBuf};

use framework_website::cli::{
    CapturedOutput, CliApplication, CliCommand, CliOptions, ConsoleOutput,
};
use framework_website::model::{PackageModel, ReleaseModel};
use framework_website::routing::{compiled, website_routes, Router};
use framework_website::Container;

mod common;

use common::TestSite;

async fn console(site: &TestSite) -> (Container, CapturedOutput) {
    let capture = CapturedOutput::new();
    let mut container = site.container().await;
    container.set(CliOptions {
        config_path: PathBuf::from("config.toml"),
        no_colors: true,
        command: None,
    });
    container.set(ConsoleOutput::new(Box::new(capture.clone()), true));
    (container, capture)
}

async fn run(container: &Container, command: CliCommand) {
    container
        .get::<CliApplication>()
        .unwrap()
        .run(Some(command))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_help_is_the_default() {
    let site = TestSite::new();
    let (container, capture) = console(&site).await;

    container.get::<CliApplication>().unwrap().run(None).await.unwrap();

    let text = capture.contents();
    assert!(text.contains("Available commands:"));
    assert!(text.contains("packagist:downloads"));
}

#[tokio::test]
async fn test_router_cache_feeds_the_router_service() {
    let site = TestSite::new();
    let (container, capture) = console(&site).await;
    let artifact = Path::new(&site.config.router.compiled_path);
    assert!(!artifact.exists());

    run(&container, CliCommand::RouterCache).await;

    assert!(artifact.exists());
    assert!(capture.contents().contains("12 routes written"));

    let fresh = site.container().await;
    let router = fresh.get::<Router>().unwrap();
    assert_eq!(*router, compiled::load(artifact).unwrap());
    assert_eq!(*router, website_routes().unwrap());
}

#[tokio::test]
async fn test_package_and_packagist_sync() {
    let packagist = common::packagist_server().await;
    let site = TestSite::new().packagist(&packagist);
    let (container, capture) = console(&site).await;

    run(&container, CliCommand::PackageSync).await;
    run(&container, CliCommand::PackageSync).await;
    run(&container, CliCommand::PackagistSync).await;
    run(&container, CliCommand::PackagistSync).await;

    let packages = container.get::<PackageModel>().unwrap().packages().await.unwrap();
    assert_eq!(packages.len(), 2);

    let releases = container.get::<ReleaseModel>().unwrap();
    for package in &packages {
        let history = releases.package_history(package.id).await.unwrap();
        let versions: Vec<_> = history.iter().map(|r| r.version.as_str()).collect();
        assert_eq!(versions, vec!["2.0.0", "1.0.0"]);
    }

    let text = capture.contents();
    assert!(text.contains("2 added, 0 updated, 0 unchanged"));
    assert!(text.contains("0 added, 0 updated, 2 unchanged"));
    assert!(text.contains("4 new releases, 0 packages failed"));
    assert!(text.contains("0 new releases, 0 packages failed"));
}

#[tokio::test]
async fn test_packagist_sync_skips_unreachable_packages() {
    let site = TestSite::new();
    let (container, capture) = console(&site).await;

    run(&container, CliCommand::PackageSync).await;
    run(&container, CliCommand::PackagistSync).await;

    assert!(capture.contents().contains("0 new releases, 2 packages failed"));
}

#[tokio::test]
async fn test_packagist_downloads() {
    let packagist = common::packagist_server().await;
    let site = TestSite::new().packagist(&packagist);
    let (container, capture) = console(&site).await;

    run(&container, CliCommand::PackagistDownloads).await;

    let text = capture.contents();
    assert!(text.contains("di     1500"));
    assert!(text.contains("http   500"));
    assert!(text.contains("total  2000"));
}

#[tokio::test]
async fn test_template_reset_cache() {
    let site = TestSite::new();
    let (container, capture) = console(&site).await;

    std::fs::write(site.dir.path().join("templates/pages/team.html"), "Team").unwrap();
    run(&container, CliCommand::TemplateResetCache).await;

    assert!(capture.contents().contains("7 templates parsed"));
}

#[tokio::test]
async fn test_update_runs_every_step() {
    let packagist = common::packagist_server().await;
    let site = TestSite::new().packagist(&packagist);
    let (container, capture) = console(&site).await;

    run(&container, CliCommand::Update).await;

    let text = capture.contents();
    let order: Vec<_> = [
        "Syncing packages",
        "Syncing Packagist releases",
        "Caching router",
        "Resetting template cache",
        "Update complete",
    ]
    .iter()
    .map(|step| text.find(step).unwrap_or_else(|| panic!("missing {step}")))
    .collect();
    assert!(order.windows(2).all(|w| w[0] < w[1]));
    assert!(Path::new(&site.config.router.compiled_path).exists());
}
