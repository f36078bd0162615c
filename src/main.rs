//! `putstuff` — render Put Stuff Here templates from the shell.
use anyhow::{Context as _, Result, bail};
use clap::{Args, Parser, Subcommand};
use put_stuff_here::{Context, Engine, EngineConfig, Value, context_from_toml};
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};
use tracing_subscriber::EnvFilter;

mod transaction;
mod util;

use transaction::Transaction;

#[derive(Parser)]
#[command(name = "putstuff", about = "Human-first HTML templating")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Render one template to stdout
    Render {
        template: PathBuf,
        #[command(flatten)]
        vars: VarArgs,
    },

    /// Render every `*.html` under DIR into OUT, replacing OUT atomically
    RenderDir {
        dir: PathBuf,
        out: PathBuf,
        #[command(flatten)]
        vars: VarArgs,
    },
}

#[derive(Args)]
struct VarArgs {
    /// TOML file whose top-level keys become template variables
    #[arg(long)]
    vars: Option<PathBuf>,

    /// Set a text variable, overriding --vars (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_assignment)]
    set: Vec<(String, String)>,

    /// Keep the outer <html>/<body> wrapper instead of extracting the body
    #[arg(long)]
    keep_wrapper: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Cmd::Render { template, vars } => {
            let engine = engine_for(&vars);
            let ctx = build_context(&vars)?;
            let id = template
                .to_str()
                .with_context(|| format!("non UTF-8 path {}", template.display()))?;
            let out = engine.render(id, &ctx).context("render template")?;
            io::stdout()
                .lock()
                .write_all(out.as_bytes())
                .context("write stdout")
        }

        Cmd::RenderDir { dir, out, vars } => {
            let engine = engine_for(&vars);
            let ctx = build_context(&vars)?;
            cmd_render_dir(&engine, &ctx, &dir, &out)
        }
    }
}

fn engine_for(vars: &VarArgs) -> Engine {
    Engine::new().config(EngineConfig {
        extract_body: !vars.keep_wrapper,
    })
}

/// Merge the `--vars` file and `--set` overrides into one context.
fn build_context(vars: &VarArgs) -> Result<Context> {
    let mut ctx = match &vars.vars {
        Some(path) => {
            let src = fs::read_to_string(path)
                .with_context(|| format!("read {}", path.display()))?;
            context_from_toml(&src).with_context(|| format!("parse {}", path.display()))?
        }
        None => Context::new(),
    };

    ctx.extend(
        vars.set
            .iter()
            .map(|(k, v)| (k.clone(), Value::from(v.as_str()))),
    );
    Ok(ctx)
}

/// Stage → commit (atomic rename).
fn cmd_render_dir(engine: &Engine, ctx: &Context, dir: &Path, out: &Path) -> Result<()> {
    if !dir.is_dir() {
        bail!("templates directory not found: {}", dir.display());
    }

    let txn = Transaction::begin(out).context("begin transaction")?;

    for tpl in util::templates_in(dir) {
        let rel = tpl.strip_prefix(dir)?;
        let id = tpl
            .to_str()
            .with_context(|| format!("non UTF-8 path {}", tpl.display()))?;
        let rendered = engine
            .render(id, ctx)
            .with_context(|| format!("render {}", rel.display()))?;
        util::write_with_parents(&txn.stage().join(rel), &rendered)?;
    }

    txn.commit().context("commit transaction")
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((k, v)) if !k.trim().is_empty() => Ok((k.trim().to_owned(), v.to_owned())),
        _ => Err(format!("expected KEY=VALUE, got `{s}`")),
    }
}
