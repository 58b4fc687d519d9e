//! Controllers.
//!
//! # Data Flow
//! ```text
//! RouteMatch.handler (HandlerId)
//!     → Controllers::dispatch
//!     → the matching controller's execute(&Input)
//!     → Response, or AppError for the web layer to map
//! ```

pub mod api;
pub mod homepage;
pub mod package;
pub mod page;
pub mod status;
pub mod wrong_cms;

use std::sync::Arc;

use axum::response::Response;

pub use api::{PackageControllerGet, StatusControllerGet};
pub use homepage::HomepageController;
pub use package::PackageController;
pub use page::PageController;
pub use status::StatusController;
pub use wrong_cms::{WrongCmsController, WRONG_CMS_MESSAGE};

use crate::error::AppResult;
use crate::http::Input;
use crate::routing::HandlerId;

/// One instance of every controller, addressed by `HandlerId`.
pub struct Controllers {
    pub homepage: Arc<HomepageController>,
    pub page: Arc<PageController>,
    pub status: Arc<StatusController>,
    pub package: Arc<PackageController>,
    pub wrong_cms: Arc<WrongCmsController>,
    pub api_status: Arc<StatusControllerGet>,
    pub api_package: Arc<PackageControllerGet>,
}

impl Controllers {
    pub async fn dispatch(&self, handler: HandlerId, input: &Input) -> AppResult<Response> {
        match handler {
            HandlerId::Homepage => self.homepage.execute(input).await,
            HandlerId::Page => self.page.execute(input).await,
            HandlerId::Status => self.status.execute(input).await,
            HandlerId::Package => self.package.execute(input).await,
            HandlerId::WrongCms => self.wrong_cms.execute(input).await,
            HandlerId::ApiStatus => self.api_status.execute(input).await,
            HandlerId::ApiPackage => self.api_package.execute(input).await,
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use tera::{Context, Tera};

    use crate::renderer::{RenderError, Renderer};

    /// Renderer over templates held in memory.
    pub(crate) struct MemoryRenderer {
        tera: Tera,
    }

    impl MemoryRenderer {
        pub(crate) fn new<'a>(templates: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
            let mut tera = Tera::default();
            tera.add_raw_templates(templates).unwrap();
            Self { tera }
        }
    }

    impl Renderer for MemoryRenderer {
        fn render(&self, template: &str, data: &serde_json::Value) -> Result<String, RenderError> {
            let context = Context::from_value(data.clone())?;
            Ok(self.tera.render(template, &context)?)
        }

        fn has_template(&self, template: &str) -> bool {
            self.tera.get_template_names().any(|name| name == template)
        }

        fn reset_cache(&self) -> Result<usize, RenderError> {
            Ok(self.tera.get_template_names().count())
        }
    }
}
