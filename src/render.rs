use crate::error::{RenderSnafu, Result, TemplateSnafu};
use crate::gateway::ViewModel;
use handlebars::Handlebars;
use snafu::ResultExt;

/// Pages served by the web surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// Bucket console: buckets, the selected bucket's objects and every form.
    Console,
    /// Files of the single configured bucket.
    Files,
    Upload,
    Delete,
}

impl Page {
    fn template_name(self) -> &'static str {
        match self {
            Page::Console => "console",
            Page::Files => "files",
            Page::Upload => "upload",
            Page::Delete => "delete",
        }
    }

    fn title(self) -> &'static str {
        match self {
            Page::Console => "Storage Console",
            Page::Files => "Files",
            Page::Upload => "Upload File",
            Page::Delete => "Delete File",
        }
    }
}

/// Renders a [`ViewModel`] into HTML with the built-in templates.
pub struct Renderer {
    engine: Handlebars<'static>,
    default_region: String,
}

impl Renderer {
    pub fn new(default_region: impl Into<String>) -> Result<Self> {
        let mut engine = Handlebars::new();
        Self::register_templates(&mut engine)?;
        Ok(Self {
            engine,
            default_region: default_region.into(),
        })
    }

    fn register_templates(engine: &mut Handlebars<'static>) -> Result<()> {
        engine
            .register_partial("layout", include_str!("../templates/layout.hbs"))
            .map_err(Box::new)
            .context(TemplateSnafu { name: "layout" })?;

        for page in [Page::Console, Page::Files, Page::Upload, Page::Delete] {
            let source = match page {
                Page::Console => include_str!("../templates/console.hbs"),
                Page::Files => include_str!("../templates/files.hbs"),
                Page::Upload => include_str!("../templates/upload.hbs"),
                Page::Delete => include_str!("../templates/delete.hbs"),
            };
            engine
                .register_template_string(page.template_name(), source)
                .map_err(Box::new)
                .context(TemplateSnafu {
                    name: page.template_name(),
                })?;
        }
        Ok(())
    }

    pub fn render(&self, page: Page, view: &ViewModel) -> Result<String> {
        let data = serde_json::json!({
            "title": page.title(),
            "default_region": self.default_region,
            "view": view,
        });
        self.engine
            .render(page.template_name(), &data)
            .context(RenderSnafu {
                page: page.template_name(),
            })
    }
}
