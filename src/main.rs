use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use console::Emoji;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use podsite::{
    BuildOptions, ProgressEvent, ProgressReporter, ReqwestClient, SharedProgressReporter,
    build_site, load_config,
};

// Emoji with fallback for terminals without Unicode support
static MICROPHONE: Emoji<'_, '_> = Emoji("🎙️  ", "");
static SEARCH: Emoji<'_, '_> = Emoji("🔍 ", "[~] ");
static HEADPHONES: Emoji<'_, '_> = Emoji("🎧 ", "[i] ");
static DOWNLOAD: Emoji<'_, '_> = Emoji("📥 ", "[v] ");
static PICTURE: Emoji<'_, '_> = Emoji("🖼️  ", "[p] ");
static PAGE: Emoji<'_, '_> = Emoji("📄 ", "[w] ");
static PARTY: Emoji<'_, '_> = Emoji("🎉 ", "[*] ");
static FOLDER: Emoji<'_, '_> = Emoji("📁 ", "");

/// Turn a podcast RSS feed into a static website
#[derive(Parser, Debug)]
#[command(name = "podsite")]
#[command(about = "Turn a podcast RSS feed into a static website")]
#[command(version)]
struct Args {
    /// Path to the JSON config file
    config: PathBuf,

    /// Verbose mode - print every skipped file and rendered page
    #[arg(short, long)]
    verbose: bool,
}

/// Progress reporter using indicatif for terminal output
struct ConsoleReporter {
    multi: MultiProgress,
    main_bar: ProgressBar,
    download_bar: Mutex<Option<ProgressBar>>,
    verbose: bool,
}

impl ConsoleReporter {
    fn new(verbose: bool) -> Self {
        let multi = MultiProgress::new();

        let main_style = ProgressStyle::default_bar()
            .template("{spinner:.green} {wide_msg}")
            .unwrap();

        let main_bar = multi.add(ProgressBar::new_spinner());
        main_bar.set_style(main_style);
        main_bar.enable_steady_tick(std::time::Duration::from_millis(100));

        Self {
            multi,
            main_bar,
            download_bar: Mutex::new(None),
            verbose,
        }
    }

    fn println(&self, line: String) {
        let _ = self.multi.println(line);
    }
}

impl ProgressReporter for ConsoleReporter {
    fn report(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::FetchingFeed { url } => {
                self.main_bar
                    .set_message(format!("{SEARCH}Fetching feed: {}", url.cyan()));
            }

            ProgressEvent::FeedParsed {
                podcast_title,
                item_count,
                episode_count,
            } => {
                self.main_bar.set_message(format!(
                    "{HEADPHONES}{} • {} items, {} episodes",
                    podcast_title.bold().green(),
                    item_count.to_string().cyan(),
                    episode_count.to_string().cyan()
                ));
            }

            ProgressEvent::DownloadStarting {
                episode_title,
                episode_index,
                total_episodes,
                content_length,
            } => {
                let style = ProgressStyle::default_bar()
                    .template(&format!(
                        "  {DOWNLOAD}[{{bar:30.cyan/blue}}] {{bytes}}/{{total_bytes}} {{wide_msg}}"
                    ))
                    .unwrap()
                    .progress_chars("█▓░");

                let bar = self.multi.add(ProgressBar::new(content_length.unwrap_or(0)));
                bar.set_style(style);
                bar.set_message(format!(
                    "[{}/{}] {}",
                    (episode_index + 1).to_string().cyan(),
                    total_episodes.to_string().cyan(),
                    truncate_title(&episode_title, 40)
                ));

                *self.download_bar.lock().unwrap() = Some(bar);
            }

            ProgressEvent::DownloadProgress {
                bytes_downloaded,
                total_bytes,
            } => {
                if let Some(bar) = self.download_bar.lock().unwrap().as_ref() {
                    if let Some(total) = total_bytes {
                        bar.set_length(total);
                    }
                    bar.set_position(bytes_downloaded);
                }
            }

            ProgressEvent::DownloadCompleted {
                episode_title,
                bytes_downloaded: _,
            } => {
                if let Some(bar) = self.download_bar.lock().unwrap().take() {
                    bar.finish_and_clear();
                }
                if self.verbose {
                    self.println(format!(
                        "{DOWNLOAD}{}",
                        truncate_title(&episode_title, 40).green()
                    ));
                }
            }

            ProgressEvent::DownloadSkipped { file_name } => {
                if self.verbose {
                    self.println(format!(
                        "{DOWNLOAD}{} {}",
                        file_name.yellow(),
                        "already present, skipped".dimmed()
                    ));
                }
            }

            ProgressEvent::CoverArtSaved { width, height } => {
                if self.verbose {
                    self.println(format!(
                        "{PICTURE}Cover art saved, thumbnail {}x{}",
                        width.to_string().cyan(),
                        height.to_string().cyan()
                    ));
                }
            }

            ProgressEvent::CoverArtSkipped => {
                if self.verbose {
                    self.println(format!(
                        "{PICTURE}Cover art {}",
                        "already present, skipped".dimmed()
                    ));
                }
            }

            ProgressEvent::PageRendered { path } => {
                if self.verbose {
                    self.println(format!("{PAGE}{}", path.display().to_string().dimmed()));
                }
            }

            ProgressEvent::BuildCompleted { .. } => {
                self.main_bar.finish_and_clear();
            }
        }
    }
}

fn truncate_title(title: &str, max_len: usize) -> String {
    if title.len() <= max_len {
        title.to_string()
    } else {
        format!("{}...", &title[..max_len.saturating_sub(3)])
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    println!(
        "\n{}{} {}\n",
        MICROPHONE,
        "podsite".bold().magenta(),
        "- Podcast Site Generator".dimmed()
    );

    let config = load_config(&args.config)
        .with_context(|| format!("Failed to load config {}", args.config.display()))?;

    let client = ReqwestClient::new();
    let options = BuildOptions::default();
    let reporter: SharedProgressReporter = Arc::new(ConsoleReporter::new(args.verbose));

    let summary = build_site(&client, &config, &options, &reporter)
        .await
        .context("Failed to build site")?;

    println!(
        "\n{PARTY}{} {} episodes, {} downloaded, {} skipped, {} pages rendered",
        "Build complete:".bold().green(),
        summary.episode_count.to_string().cyan(),
        summary.downloaded.to_string().green().bold(),
        summary.skipped.to_string().yellow(),
        summary.pages_rendered.to_string().cyan()
    );

    println!(
        "\n{FOLDER}Output: {}\n",
        config.output_dir.display().to_string().cyan()
    );

    Ok(())
}
