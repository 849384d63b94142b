use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use springforge::catalog;
use springforge::classify;
use springforge::export;
use springforge::{
    ApiClient, BuildTool, Config, ForgeError, GenerationSession, ImagePayload, OutputHandler,
    ProjectGenerator, ProjectMetadata, SchemaInput,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InputKind {
    /// Natural language description of the domain
    Text,
    /// SQL DDL schema
    Sql,
    /// ERD JSON
    Json,
    /// ER diagram image (png, jpeg, webp, gif)
    Image,
}

#[derive(Parser)]
#[command(name = "springforge")]
#[command(about = "Generate a Spring Boot starter project from a database schema with AI", long_about = None)]
struct Cli {
    /// Path to the schema input; text/sql/json inputs fall back to stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// How to interpret the input
    #[arg(short = 't', long, value_enum, default_value = "text")]
    input_type: InputKind,

    /// Project group id
    #[arg(long, default_value = "com.example")]
    group: String,

    /// Project display name; the artifact id is derived from it
    #[arg(long, default_value = "demo")]
    name: String,

    /// Artifact id override
    #[arg(long)]
    artifact: Option<String>,

    /// Project description
    #[arg(long, default_value = "Demo project for Spring Boot")]
    description: String,

    /// Base package override
    #[arg(long)]
    package_name: Option<String>,

    /// Build tool for the exported project
    #[arg(long, value_enum, default_value = "maven")]
    build_tool: BuildTool,

    /// Target Java version
    #[arg(long, default_value = "17")]
    java_version: String,

    /// Comma-separated dependency ids (see --list-deps)
    #[arg(long, value_delimiter = ',', default_value = "web,data-jpa,lombok,h2,mysql,postgresql")]
    deps: Vec<String>,

    /// Generate explicit accessors instead of Lombok annotations
    #[arg(long)]
    no_lombok: bool,

    /// Where to write the archive (defaults to <artifact>.zip)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print every generated file instead of only the default preview
    #[arg(long)]
    print: bool,

    /// List the dependency catalog and exit
    #[arg(long)]
    list_deps: bool,

    /// Enable debug diagnostics
    #[arg(short, long)]
    debug: bool,
}

fn media_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "image/png",
    }
}

fn read_text_input(path: &Option<PathBuf>) -> Result<String> {
    match path {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
        }
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("reading schema from stdin")?;
            Ok(buffer)
        }
    }
}

fn build_input(cli: &Cli) -> Result<SchemaInput> {
    let input = match cli.input_type {
        InputKind::Text => SchemaInput::FreeText(read_text_input(&cli.input)?),
        InputKind::Sql => SchemaInput::Sql(read_text_input(&cli.input)?),
        InputKind::Json => SchemaInput::Json(read_text_input(&cli.input)?),
        InputKind::Image => {
            let path = cli
                .input
                .as_ref()
                .ok_or_else(|| anyhow!("--input is required for image input"))?;
            let data =
                fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            SchemaInput::DiagramImage(ImagePayload {
                data,
                media_type: media_type_for(path).to_string(),
            })
        }
    };
    if input.is_empty() {
        return Err(anyhow!("Please provide an input schema or description."));
    }
    Ok(input)
}

fn build_metadata(cli: &Cli) -> ProjectMetadata {
    let mut meta = ProjectMetadata::default();
    meta.set_name(&cli.name);
    if let Some(artifact) = &cli.artifact {
        meta.set_artifact(artifact);
    }
    meta.set_group(&cli.group);
    meta.description = cli.description.clone();
    meta.build_tool = cli.build_tool;
    meta.java_version = cli.java_version.clone();
    meta.use_lombok = !cli.no_lombok;
    if let Some(package_name) = &cli.package_name {
        meta.package_name = package_name.clone();
    }
    meta
}

fn print_catalog() {
    for (category, deps) in catalog::by_category() {
        println!("{category}");
        for dep in deps {
            println!("  {:28} {}", dep.id, dep.name);
        }
        println!();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = OutputHandler::new().with_debug(cli.debug);

    if cli.list_deps {
        print_catalog();
        return Ok(());
    }

    output.print_banner();

    let input = build_input(&cli)?;
    let meta = build_metadata(&cli);
    let dependencies = catalog::resolve(&cli.deps);

    let config = Config::load_or_default();
    if !Config::config_path().exists() && config.save().is_ok() && cli.debug {
        output.print_system(&format!(
            "Wrote default config to {}",
            Config::config_path().display()
        ));
    }
    let client = match ApiClient::from_config(&config.ai) {
        Ok(client) => client,
        Err(err @ ForgeError::MissingCredential) => {
            output.print_error(&err.to_string());
            std::process::exit(1);
        }
        Err(err) => return Err(err.into()),
    };

    if cli.debug {
        output.print_system(&format!(
            "Using {} via {}",
            config.ai.model, config.ai.api_url
        ));
    }

    let generator = ProjectGenerator::new(client).with_debug(cli.debug);
    let mut session = GenerationSession::new();
    let token = session.begin_request();

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").expect("valid spinner template"),
    );
    spinner.set_message("Building your project...");
    spinner.enable_steady_tick(Duration::from_millis(120));

    let result = generator.generate(&input, &meta, &dependencies).await;
    spinner.finish_and_clear();

    let files = match result {
        Ok(batch) => batch,
        Err(err) => {
            output.print_error(&err.to_string());
            std::process::exit(1);
        }
    };
    session.complete(token, files);
    let files = session.files().expect("batch was just installed");

    output.print_category_count(files);
    output.print_file_tree(files);

    if cli.print {
        for file in files {
            output.print_highlighted(file);
        }
    } else if let Some(preview) = classify::default_preview(files) {
        output.print_highlighted(preview);
    }
    output.print_annotation_notes(files);

    let archive_path = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(export::archive_file_name(&meta)));
    let archive = fs::File::create(&archive_path)
        .with_context(|| format!("creating {}", archive_path.display()))?;
    export::write_archive(archive, &meta, &dependencies, files)?;
    output.print_success(&format!("Project archive written to {}", archive_path.display()));

    Ok(())
}
