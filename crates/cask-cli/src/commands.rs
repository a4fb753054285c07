use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context};
use colored::Colorize;

use cask_codec::{FileReader, FileWriter};
use cask_container::{BufferPool, ContainerFactory, Pipeline, WireFormat};
use cask_model::FileBuilder;
use cask_store::LocalStorage;
use cask_update::{UpdateOptions, UpdateOrchestrator};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Create(args) => cmd_create(args),
        Command::Inspect(args) => cmd_inspect(args),
        Command::Verify(args) => cmd_verify(args),
        Command::Update(args) => cmd_update(args),
    }
}

fn parse_pair(pair: &str) -> anyhow::Result<(&str, &str)> {
    match pair.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name, value)),
        _ => bail!("expected name=value, got '{pair}'"),
    }
}

fn cmd_create(args: CreateArgs) -> anyhow::Result<()> {
    let wire = if args.binary {
        WireFormat::Binary
    } else {
        WireFormat::Json
    };
    let mut builder = FileBuilder::new(&args.author, wire);
    for pair in &args.text {
        let (name, value) = parse_pair(pair)?;
        builder = builder.add_text(name, value, args.compress);
    }
    if let Some(label) = &args.version_label {
        let base_dir = Path::new(&args.path)
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("versions");
        builder = builder.declare_version(label, base_dir);
    }
    let model = builder.build().context("building file model")?;

    let storage = Arc::new(LocalStorage::new());
    FileWriter::new(storage)
        .write(&model, Path::new(&args.path))
        .context("writing cask file")?;

    println!(
        "{} Wrote {} ({} contents, {} wire)",
        "✓".green().bold(),
        args.path.bold(),
        model.contents().len(),
        model.metadata().wire
    );
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let storage = Arc::new(LocalStorage::new());
    let model = FileReader::new(storage)
        .read(Path::new(&args.path))
        .context("reading cask file")?;

    let metadata = model.metadata();
    println!("{}", args.path.bold());
    println!("  Format:   v{} ({} wire)", model.header().version(), metadata.wire);
    println!("  File id:  {}", metadata.file_id.to_string().cyan());
    println!("  Author:   {}", metadata.author);
    println!("  Created:  {}", metadata.created_at);
    println!("  Modified: {}", metadata.modified_at);
    if let Some(version) = model.current_version() {
        println!("  Version:  {} ({})", version.label().yellow(), version.date());
    }
    println!("  Contents: {}", model.contents().len());
    for container in model.contents() {
        println!(
            "    {} {} [{}] {} bytes, hash {}",
            "•".dimmed(),
            container.name().bold(),
            container.descriptor().kind,
            container.stored_len(),
            container.hash().short_hex().dimmed()
        );
    }
    Ok(())
}

fn cmd_verify(args: VerifyArgs) -> anyhow::Result<()> {
    let storage = Arc::new(LocalStorage::new());
    // A successful read has already passed the whole-file digest and the
    // header signature checks.
    let model = FileReader::new(storage)
        .read(Path::new(&args.path))
        .context("verification failed")?;

    if model.verify_content_hashes() {
        println!(
            "{} {}: whole-file digest, signature, and {} content hashes OK",
            "✓".green().bold(),
            args.path.bold(),
            model.contents().len()
        );
        Ok(())
    } else {
        bail!("content hash index out of sync with stored containers");
    }
}

fn cmd_update(args: UpdateArgs) -> anyhow::Result<()> {
    let storage = Arc::new(LocalStorage::new());
    let path = Path::new(&args.path);
    let mut model = FileReader::new(storage.clone())
        .read(path)
        .context("reading existing cask file")?;

    let factory = ContainerFactory::new(
        Pipeline::standard(model.metadata().wire),
        BufferPool::default(),
    );
    for pair in &args.text {
        let (name, value) = parse_pair(pair)?;
        let container = factory
            .from_text(name, value, args.compress)
            .with_context(|| format!("building content '{name}'"))?;
        model
            .add_content(container)
            .with_context(|| format!("adding content '{name}'"))?;
    }

    let mut orchestrator = UpdateOrchestrator::new(storage);
    let report = orchestrator
        .update(
            path,
            &model,
            &UpdateOptions {
                use_delta_encoding: args.delta,
            },
        )
        .context("updating cask file")?;

    let mode = if args.delta { "delta" } else { "full rewrite" };
    print!(
        "{} Updated {} ({} mode, {} bytes written",
        "✓".green().bold(),
        args.path.bold(),
        mode.yellow(),
        report.bytes_written
    );
    if let Some(delta_bytes) = report.delta_bytes {
        print!(", {delta_bytes} delta bytes");
    }
    println!(")");
    Ok(())
}
