use std::path::Path;

use minijinja::{Environment, UndefinedBehavior, context, path_loader};

use crate::config::Config;
use crate::episode::Episode;
use crate::error::RenderError;
use crate::feed::Podcast;
use crate::progress::{ProgressEvent, SharedProgressReporter};

const SITEMAP_TEMPLATE: &str = "sitemap.xml";
const FRONT_PAGE_TEMPLATE: &str = "frontpage.html";
const EPISODE_TEMPLATE: &str = "episode.html";

/// Renders pages from two template sources: a structural environment for
/// the sitemap and a theme environment for the visual pages.
///
/// Rendering always overwrites — unlike asset downloads, pages are
/// refreshed on every run. A missing template or a reference to an absent
/// context field is fatal.
pub struct Renderer {
    templates: Environment<'static>,
    theme: Environment<'static>,
}

impl Renderer {
    pub fn new(template_dir: &Path, theme_dir: &Path) -> Self {
        Self {
            templates: environment(template_dir),
            theme: environment(theme_dir),
        }
    }

    /// Render `sitemap.xml` into the output root
    pub fn render_sitemap(
        &self,
        config: &Config,
        episodes: &[Episode],
        output_dir: &Path,
        reporter: &SharedProgressReporter,
    ) -> Result<(), RenderError> {
        let template = self.templates.get_template(SITEMAP_TEMPLATE)?;
        let output = template.render(context! { config => config, episodes => episodes })?;

        let path = output_dir.join("sitemap.xml");
        write_page(&path, &output)?;
        reporter.report(ProgressEvent::PageRendered { path });
        Ok(())
    }

    /// Render the theme's front page into `index.html` at the output root
    pub fn render_front_page(
        &self,
        config: &Config,
        episodes: &[Episode],
        podcast: &Podcast,
        output_dir: &Path,
        reporter: &SharedProgressReporter,
    ) -> Result<(), RenderError> {
        let template = self.theme.get_template(FRONT_PAGE_TEMPLATE)?;
        let output = template.render(context! {
            config => config,
            episodes => episodes,
            podcast => podcast,
        })?;

        let path = output_dir.join("index.html");
        write_page(&path, &output)?;
        reporter.report(ProgressEvent::PageRendered { path });
        Ok(())
    }

    /// Render one page per episode under `episode/<slug>/index.html`.
    ///
    /// Returns the number of pages written.
    pub fn render_episodes(
        &self,
        config: &Config,
        episodes: &[Episode],
        podcast: &Podcast,
        output_dir: &Path,
        reporter: &SharedProgressReporter,
    ) -> Result<usize, RenderError> {
        let template = self.theme.get_template(EPISODE_TEMPLATE)?;

        for episode in episodes {
            let episode_dir = output_dir.join("episode").join(&episode.slug);
            std::fs::create_dir_all(&episode_dir).map_err(|e| {
                RenderError::CreateDirectoryFailed {
                    path: episode_dir.clone(),
                    source: e,
                }
            })?;

            let output = template.render(context! {
                config => config,
                episode => episode,
                podcast => podcast,
            })?;

            let path = episode_dir.join("index.html");
            write_page(&path, &output)?;
            reporter.report(ProgressEvent::PageRendered { path });
        }

        Ok(episodes.len())
    }
}

fn environment(dir: &Path) -> Environment<'static> {
    let mut env = Environment::new();
    // Referencing an absent context field must fail the run, not render
    // an empty string
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_loader(path_loader(dir));
    env
}

fn write_page(path: &Path, content: &str) -> Result<(), RenderError> {
    std::fs::write(path, content).map_err(|e| RenderError::WriteFailed {
        path: path.to_path_buf(),
        source: e,
    })
}
