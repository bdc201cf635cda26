use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn, Level};

use creative_compositor::{
    assistant::{self, ComplianceAuditor},
    composition::{Color, Compositor},
    config::Config,
    export::{self, ExportFormat, ExportSettings},
    input,
    session::{SessionState, RESIZE_TOOL_BOUND},
    templates::{FormatPreset, TemplateRegistry, FORMAT_PRESETS, TAG_LINES, VALUE_TILES},
};

#[derive(Parser)]
#[command(
    name = "creative-compositor",
    version,
    about = "Build retail media creatives from a product photo",
    long_about = "Creative Compositor places a product photo on a template background, adds an offer badge and promotional copy, and exports the result as JPEG or PNG."
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compose a creative and export it
    Generate(GenerateArgs),

    /// List templates, value tiles, tag lines and formats
    Templates,

    /// Print design tips
    Tips,

    /// Placeholder color suggestions (produces nothing)
    SuggestColors,

    /// Placeholder campaign generation (produces nothing)
    Campaign,

    /// Write the default configuration to a TOML file
    InitConfig {
        /// Where to write the configuration
        #[arg(short, long, default_value = "creative.toml")]
        output: PathBuf,
    },
}

#[derive(Args)]
struct GenerateArgs {
    /// Product image (JPEG or PNG)
    #[arg(short, long)]
    image: PathBuf,

    /// Template to take the background from
    #[arg(short, long, default_value = "promotional-sale", conflicts_with = "background")]
    template: String,

    /// Background color as #RRGGBB, overrides the template
    #[arg(short, long)]
    background: Option<String>,

    #[arg(long)]
    headline: Option<String>,

    #[arg(long)]
    subhead: Option<String>,

    /// Retailer tag line
    #[arg(long)]
    tag: Option<String>,

    /// Value tile label
    #[arg(long)]
    value_tile: Option<String>,

    /// Canvas format preset (square, instagram-square, instagram-story, facebook-post, display-banner)
    #[arg(long)]
    format_preset: Option<String>,

    /// Shrink the product to 300x300 before composing
    #[arg(long)]
    resize: bool,

    /// Rotate the product a quarter turn counter-clockwise before composing
    #[arg(long)]
    rotate: bool,

    /// Run the placeholder background removal
    #[arg(long)]
    remove_background: bool,

    /// Also write a preview render next to the output
    #[arg(long)]
    preview: bool,

    /// Export format (jpeg, png)
    #[arg(short = 'f', long)]
    export_format: Option<ExportFormat>,

    /// JPEG quality (50-100)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(50..=100))]
    quality: Option<u8>,

    /// Output file (defaults to tesco_creative_YYYYMMDD.<ext>)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .init();

    match cli.command {
        Command::Generate(args) => generate(args),
        Command::Templates => {
            list_catalogue();
            Ok(())
        }
        Command::Tips => {
            for tip in assistant::design_tips() {
                println!("• {}", tip);
            }
            Ok(())
        }
        Command::SuggestColors => {
            assistant::suggest_colors(placeholder_latency());
            Ok(())
        }
        Command::Campaign => {
            assistant::generate_campaign(placeholder_latency());
            Ok(())
        }
        Command::InitConfig { output } => {
            Config::default().save_to_file(&output)?;
            info!("Default configuration written to {:?}", output);
            Ok(())
        }
    }
}

fn generate(args: GenerateArgs) -> Result<()> {
    info!("Starting Creative Compositor v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = match &args.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(config_path)?
        }
        None => {
            info!("Using default configuration");
            Config::default()
        }
    };
    config.validate()?;

    let latency = Duration::from_millis(config.assistant.simulated_latency_ms);
    let compositor = Compositor::from_config(&config);
    let registry = TemplateRegistry::new();
    let mut session = SessionState::new();
    session.canvas_size = config.canvas;

    let product = input::load_product(&args.image).map_err(|e| anyhow::anyhow!(e.user_message()))?;
    session.set_product(product);

    if args.rotate {
        session.rotate_product()?;
    }
    if args.resize {
        session.resize_product(RESIZE_TOOL_BOUND)?;
    }
    if args.remove_background {
        session.remove_background(latency)?;
    }

    match &args.background {
        Some(hex) => {
            let color: Color = hex.parse()?;
            session.set_background(color);
        }
        None => session
            .select_template(&registry, &args.template)
            .map_err(|e| anyhow::anyhow!(e.user_message()))?,
    }

    if let Some(headline) = args.headline {
        session.headline = headline;
    }
    if let Some(subhead) = args.subhead {
        session.subhead = subhead;
    }
    if let Some(tag) = args.tag {
        session.tag_line = tag;
    }
    if let Some(value_tile) = args.value_tile {
        session.value_tile = value_tile;
    }
    if let Some(slug) = &args.format_preset {
        let preset = FormatPreset::find(slug)
            .ok_or_else(|| anyhow::anyhow!("Unknown format preset: {}", slug))?;
        info!("Using format {}", preset.label);
        session.canvas_size = preset.size;
    }

    let mut auditor = ComplianceAuditor::new(latency);
    session.generate(&compositor, &config.profiles.final_render, &mut auditor)?;

    let settings = ExportSettings::new(
        args.export_format.unwrap_or(config.export.format),
        args.quality.unwrap_or(config.export.quality),
    );
    let encoded = session.export(settings)?;

    let output = args.output.unwrap_or_else(|| {
        let stem = export::default_file_stem(chrono::Local::now().date_naive());
        PathBuf::from(format!("{}.{}", stem, encoded.extension()))
    });
    std::fs::write(&output, &encoded.bytes)?;
    info!("Creative saved to {:?} ({})", output, encoded.mime_type());

    if encoded.within_limit(config.export.size_limit_kb) {
        info!("File size: {:.1}KB (under {}KB limit)", encoded.size_kb(), config.export.size_limit_kb);
    } else {
        warn!("File size: {:.1}KB (over {}KB limit)", encoded.size_kb(), config.export.size_limit_kb);
    }

    if args.preview {
        let preview = session.preview(&compositor, &config.profiles.preview)?;
        let preview_bytes = export::encode(&preview, settings)?;
        let preview_path = output.with_file_name(format!(
            "{}_preview.{}",
            output.file_stem().and_then(|s| s.to_str()).unwrap_or("creative"),
            preview_bytes.extension()
        ));
        std::fs::write(&preview_path, &preview_bytes.bytes)?;
        info!("Preview saved to {:?}", preview_path);
    }

    if let Some(report) = session.compliance() {
        info!("Compliance score (placeholder): {}%", report.score);
        for (check, passed) in &report.checks {
            info!("  {}: {}", check, if *passed { "Pass" } else { "Fail" });
        }
    }

    Ok(())
}

fn placeholder_latency() -> Duration {
    Duration::from_millis(Config::default().assistant.simulated_latency_ms)
}

fn list_catalogue() {
    let registry = TemplateRegistry::new();

    println!("Templates:");
    for template in registry.templates() {
        println!("  {:<20} {:<20} {}", template.slug, template.label, template.background);
    }

    println!("\nValue tiles:");
    for tile in VALUE_TILES {
        println!("  {}", tile);
    }

    println!("\nTag lines:");
    for tag in TAG_LINES {
        println!("  {}", tag);
    }

    println!("\nFormats:");
    for format in FORMAT_PRESETS {
        println!("  {:<20} {}", format.slug, format.label);
    }
}
