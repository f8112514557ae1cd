//! CLI tool for generating themed PowerPoint templates.

use anyhow::{bail, Context, Result};
use clap::Parser;
use deck_core::presets::{BODY_FONTS, TITLE_FONTS};
use deck_core::{
    find_preset, output_file_name, CanvasRatio, ImageAsset, LayoutKind, LayoutSlot,
    TemplateConfig, THEME_PRESETS,
};
use std::fs;
use std::path::{Path, PathBuf};

/// Generate a themed .pptx template from a configuration.
#[derive(Parser, Debug)]
#[command(name = "deck-gen")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON configuration file (missing keys keep their defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Theme preset to apply, e.g. "科技风格" (see --list-themes)
    #[arg(short, long)]
    theme: Option<String>,

    /// Canvas ratio: 16:9 or 4:3
    #[arg(short, long, value_parser = parse_ratio)]
    ratio: Option<CanvasRatio>,

    /// Template name, used for the title and the output file name
    #[arg(short, long)]
    name: Option<String>,

    /// Set a layout's page count, e.g. "kpi=2" (0 disables it). Repeatable.
    #[arg(short, long = "layout", value_parser = parse_layout)]
    layouts: Vec<(LayoutKind, u32)>,

    /// Logo image placed on every page
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Images for image-text pages, used in order
    #[arg(short, long = "image", num_args = 1..)]
    images: Vec<PathBuf>,

    /// Enable the watermark with this text
    #[arg(long)]
    watermark: Option<String>,

    /// Output file or existing directory (default: derived name in the current directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the effective configuration as JSON to this file
    #[arg(long)]
    export_config: Option<PathBuf>,

    /// List theme presets and fonts, then exit
    #[arg(long)]
    list_themes: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    if args.list_themes {
        print_themes();
        return Ok(());
    }

    let config = load_config(&args)?;

    if let Some(path) = &args.export_config {
        let json = config.to_json()?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        if args.verbose {
            eprintln!("Configuration written to: {}", path.display());
        }
    }

    if config.layouts.total_pages() == 0 {
        bail!("Nothing to build: select at least one layout with count > 0");
    }

    let logo = args
        .logo
        .as_ref()
        .map(|path| fs::read(path).with_context(|| format!("Failed to read logo {}", path.display())))
        .transpose()?;
    let images = read_images(&args.images)?;

    let built = deck_pptx::generate(&config.theme, &config.layouts, logo.as_deref(), &images)
        .context("Failed to generate deck")?;

    let output_path = resolve_output_path(args.output.as_deref(), &config.theme.template_name);
    fs::write(&output_path, &built.output)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    if args.verbose {
        report(&built.output, &built.kinds);
    }
    println!(
        "Wrote {} ({} pages, {} x {} in)",
        output_path.display(),
        built.page_count,
        built.canvas.width,
        built.canvas.height
    );
    Ok(())
}

/// Configuration file (or defaults) with command-line overrides applied.
fn load_config(args: &Args) -> Result<TemplateConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            TemplateConfig::from_json(&json)
                .with_context(|| format!("Invalid configuration in {}", path.display()))?
        }
        None => TemplateConfig::default(),
    };

    if let Some(name) = &args.theme {
        let Some(preset) = find_preset(name) else {
            let known: Vec<_> = THEME_PRESETS.iter().map(|p| p.name).collect();
            bail!("Unknown theme '{}'. Available: {}", name, known.join(", "));
        };
        config.theme.apply_preset(preset);
    }
    if let Some(ratio) = args.ratio {
        config.theme.ratio = ratio;
    }
    if let Some(name) = &args.name {
        config.theme.template_name = name.clone();
    }
    if let Some(text) = &args.watermark {
        config.theme.watermark.enabled = true;
        config.theme.watermark.text = text.clone();
    }
    for &(kind, count) in &args.layouts {
        config.layouts.set(kind, LayoutSlot::new(count > 0, count));
    }

    config.validate()?;
    Ok(config)
}

fn read_images(paths: &[PathBuf]) -> Result<Vec<ImageAsset>> {
    paths
        .iter()
        .map(|path| {
            let bytes = fs::read(path)
                .with_context(|| format!("Failed to read image {}", path.display()))?;
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("image");
            Ok(ImageAsset::new(name, bytes))
        })
        .collect()
}

/// Where to write the deck: an explicit file, a file inside an existing
/// directory, or the derived name in the current directory.
fn resolve_output_path(output: Option<&Path>, template_name: &str) -> PathBuf {
    let file_name = output_file_name(template_name);
    match output {
        Some(dir) if dir.is_dir() => dir.join(file_name),
        Some(file) => file.to_path_buf(),
        None => PathBuf::from(file_name),
    }
}

fn parse_ratio(label: &str) -> std::result::Result<CanvasRatio, String> {
    CanvasRatio::from_label(label).ok_or_else(|| format!("expected 16:9 or 4:3, got '{}'", label))
}

fn parse_layout(arg: &str) -> std::result::Result<(LayoutKind, u32), String> {
    let (key, count) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected KIND=COUNT, got '{}'", arg))?;
    let kind = LayoutKind::from_key(key.trim()).ok_or_else(|| {
        let keys: Vec<_> = LayoutKind::ALL.iter().map(|k| k.key()).collect();
        format!("unknown layout '{}'. Available: {}", key, keys.join(", "))
    })?;
    let count = count
        .trim()
        .parse()
        .map_err(|_| format!("invalid page count '{}'", count))?;
    Ok((kind, count))
}

fn print_themes() {
    for preset in THEME_PRESETS {
        println!(
            "{}  {} {} {} {}  {}",
            preset.name,
            preset.primary,
            preset.secondary,
            preset.accent,
            preset.background,
            preset.description
        );
    }
    println!();
    println!("Title fonts: {}", TITLE_FONTS.join(", "));
    println!("Body fonts: {}", BODY_FONTS.join(", "));
}

/// Per-slide summary of the written package, read back from its bytes.
fn report(bytes: &[u8], kinds: &[LayoutKind]) {
    match deck_pptx::inspect(bytes) {
        Ok(slides) => {
            for (slide, kind) in slides.iter().zip(kinds) {
                eprintln!(
                    "  Slide {:>2} [{}]: {} text boxes, {} pictures",
                    slide.number,
                    kind.info().name,
                    slide.texts.len(),
                    slide.picture_count
                );
            }
        }
        Err(e) => log::warn!("Could not read back the written deck: {}", e),
    }
}
