mod backend;
mod cli;
mod logging;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use engine_logging::engine_info;
use yamldoc_engine::{ConversionBackend, YamlDocs};

use crate::backend::CommandBackend;
use crate::cli::Cli;

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    logging::initialize(args.log);

    let backend = args
        .backend
        .as_deref()
        .map(CommandBackend::from_command_line)
        .transpose()?
        .map(|backend| Arc::new(backend) as Arc<dyn ConversionBackend>);
    if backend.is_none() {
        engine_info!("no --backend given; documents will not be converted");
    }

    let mut docs = YamlDocs::new(backend);
    if let Some(root) = &args.root {
        docs = docs.with_root(root);
    }
    docs.activate(args.passthrough.as_slice());

    let written = docs
        .build(&args.output)
        .with_context(|| format!("building documentation into {}", args.output.display()))?;
    for path in &written {
        println!("{}", path.display());
    }
    Ok(())
}
