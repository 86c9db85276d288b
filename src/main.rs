use std::io::{IsTerminal, Write};

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod classify;
mod cli;
mod ext;
mod github;
mod model;
mod render;
mod repo_filter;
mod scan;
mod stats;
mod util;
mod window;

use crate::classify::Classifier;
use crate::cli::{Cli, normalize};

fn init_tracing(quiet: bool) {
  let default = if quiet { "warn" } else { "info" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_ansi(std::io::stderr().is_terminal())
    .with_target(false)
    .without_time()
    .init();
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  if cli.gen_man {
    let page = util::render_man_page::<Cli>()?;
    print!("{}", page);
    return Ok(());
  }

  // Phase 1: validate configuration before touching the network
  let cfg = normalize(cli)?;
  init_tracing(cfg.quiet);
  let api = github::build_api(&cfg)?;

  // Phase 2: resolve the window
  let now = util::effective_now(cfg.now);
  let since = window::window_start(now, cfg.months);
  tracing::info!("counting activity of {} since {}", cfg.user, since.format("%Y-%m-%d"));

  // Phase 3: scan, then print only once everything succeeded
  let classifier = Classifier::new(&cfg.user, since, &cfg.approval_marker);
  let stats = scan::scan(api.as_ref(), &cfg.repositories, &classifier)?;
  if stats.is_empty() {
    tracing::info!("no activity found in the window");
  }

  let stdout = std::io::stdout();
  let mut out = stdout.lock();
  render::render_report(&mut out, &stats)?;
  out.flush()?;

  Ok(())
}
