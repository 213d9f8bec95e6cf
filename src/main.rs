use anyhow::Result;
use clap::Parser;

mod api;
mod cli;
mod draft;
mod engine;
mod export;
mod render;
mod report;
mod schema;
mod share;
mod state;
mod submit;
mod workflow;

use cli::{Command, RootArgs};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = RootArgs::parse();
    match args.command {
        Command::New(args) => workflow::run_new(args),
        Command::Edit(args) => workflow::run_edit(args),
        Command::Set(args) => workflow::run_set(args),
        Command::Toggle(args) => workflow::run_toggle(args),
        Command::Show(args) => workflow::run_show(args),
        Command::Submit(args) => workflow::run_submit(args),
        Command::Report(args) => workflow::run_report(args),
        Command::Export(args) => workflow::run_export(args),
        Command::Share(args) => workflow::run_share(args),
    }
}
