mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, WorkflowAction};
use imgtools_core::decode::open_image;
use imgtools_core::encode::ContainerFormat;
use imgtools_core::pipeline::{
    self, format_file_size, load_workflow_or_default, save_workflow, PipelineEvent, Session, Step,
};
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "imgtools=debug,imgtools_core=debug".to_string()
        } else {
            "imgtools=info,imgtools_core=info".to_string()
        }
    });

    tracing_subscriber::fmt().with_env_filter(&env_filter).init();

    match cli.command {
        Commands::Run {
            input,
            workflow,
            rotate,
            frames,
            crop,
            compress,
            export,
            presets,
            output,
        } => {
            let order = load_workflow_or_default(&workflow);
            let session = build_session(order, rotate, frames, crop, compress, export);
            run_file(&input, &session, &presets, &output)
        }
        Commands::Workflow { file, action } => edit_workflow(&file, action),
        Commands::Size { file } => {
            let len = std::fs::metadata(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?
                .len();
            println!("{}", format_file_size(len));
            Ok(())
        }
    }
}

fn build_session(
    order: Vec<Step>,
    rotate: bool,
    frames: u32,
    crop: bool,
    compress: Option<u32>,
    export: Option<ContainerFormat>,
) -> Session {
    let mut session = Session::new();
    session.order = order;

    session.rotate.enabled = rotate;
    session.rotate.frame_count = frames;
    session.rotate.crop = crop;

    if let Some(budget_mb) = compress {
        session.compress.enabled = true;
        session.compress.budget_mb = budget_mb;
    }
    if let Some(format) = export {
        session.export.enabled = true;
        session.export.format = format;
    }

    session
}

fn run_file(input: &Path, session: &Session, presets: &Path, output_dir: &Path) -> Result<()> {
    session.validate().context("Invalid settings")?;

    let image = open_image(input).with_context(|| format!("Failed to open {}", input.display()))?;
    println!("Input: {} ({}x{})", input.display(), image.width, image.height);

    let output = pipeline::run_pipeline(&image, session).context("Processing failed")?;

    for event in &output.events {
        match event {
            PipelineEvent::StepSkipped(step) => println!("  {step}: skipped"),
            PipelineEvent::FramesRendered { count } => println!("  rotate: {count} frames"),
            PipelineEvent::FramesCompressed { kept, dropped } => {
                println!("  compress: {kept} frames kept, {dropped} dropped")
            }
            PipelineEvent::ImageCompressed {
                width,
                height,
                bytes,
                attempt,
            } => println!(
                "  compress: {width}x{height}, {} (attempt {attempt})",
                format_file_size(*bytes as u64)
            ),
            PipelineEvent::Exported { format, chars } => {
                println!("  export: {format} Base64, {chars} characters")
            }
        }
    }

    if let Some(export) = &output.export {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        let path = pipeline::write_base64_export(presets, &stem, export)
            .context("Failed to write Base64 export")?;
        println!("Export: {}", path.display());
    }

    let name = pipeline::default_output_name(&output.preview, &chrono::Local::now());
    let path = output_dir.join(name);
    pipeline::write_preview(&path, &output.preview)
        .with_context(|| format!("Failed to save {}", path.display()))?;

    let size = std::fs::metadata(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?
        .len();
    println!("Saved: {} ({})", path.display(), format_file_size(size));

    Ok(())
}

fn edit_workflow(file: &Path, action: WorkflowAction) -> Result<()> {
    let mut session = Session::new();
    session.order = load_workflow_or_default(file);

    match action {
        WorkflowAction::Show => {
            print_order(&session.order);
            return Ok(());
        }
        WorkflowAction::Save { steps } => session.order = steps,
        WorkflowAction::Up { index } => {
            check_index(index, &session.order)?;
            session.move_step_up(index);
        }
        WorkflowAction::Down { index } => {
            check_index(index, &session.order)?;
            session.move_step_down(index);
        }
    }

    save_workflow(file, &session.order)
        .with_context(|| format!("Failed to save workflow to {}", file.display()))?;
    print_order(&session.order);
    Ok(())
}

fn check_index(index: usize, order: &[Step]) -> Result<()> {
    if index >= order.len() {
        anyhow::bail!("Step index {} out of range (workflow has {} steps)", index, order.len());
    }
    Ok(())
}

fn print_order(order: &[Step]) {
    for (i, step) in order.iter().enumerate() {
        println!("{i}. {step}");
    }
}
