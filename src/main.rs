use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use indexmap::IndexMap;

use stitchgrid::interchange::{self, ViewSettings};
use stitchgrid::storage::{PatternLibrary, PatternRecord};
use stitchgrid::symbol::StitchKind;

#[derive(Parser, Debug)]
#[command(author, version, about = "Inspect and convert crochet stitch chart files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a pattern JSON document and print a summary
    Info {
        /// Pattern JSON file
        #[arg(value_name = "PATTERN_FILE")]
        file: Utf8PathBuf,
    },
    /// Convert a pattern JSON document into a binary library record
    Pack {
        /// Pattern JSON file
        #[arg(value_name = "PATTERN_FILE")]
        file: Utf8PathBuf,
        /// Output record file (.stitch)
        #[arg(short, long)]
        out: Utf8PathBuf,
    },
    /// Convert a binary library record back into pattern JSON
    Unpack {
        /// Record file (.stitch)
        #[arg(value_name = "RECORD_FILE")]
        file: Utf8PathBuf,
        /// Output JSON file (stdout if omitted)
        #[arg(short, long)]
        out: Option<Utf8PathBuf>,
    },
    /// List the records in a pattern library directory
    List {
        /// Library directory
        #[arg(value_name = "LIBRARY_DIR")]
        library: Utf8PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Command::Info { file } => info(&file),
        Command::Pack { file, out } => pack(&file, &out),
        Command::Unpack { file, out } => unpack(&file, out.as_ref()),
        Command::List { library } => list(&library),
    }
}

fn read_pattern_file(path: &Utf8PathBuf) -> Result<interchange::PatternFile> {
    let input =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
    interchange::import_json(&input).with_context(|| format!("Failed to import {}", path))
}

fn info(path: &Utf8PathBuf) -> Result<()> {
    let file = read_pattern_file(path)?;
    println!("title:      {}", file.metadata.title);
    if let Some(description) = &file.metadata.description {
        println!("about:      {}", description);
    }
    println!("hook/yarn:  {} / {}", file.metadata.hook_size, file.metadata.yarn_weight);
    println!("difficulty: {}", file.metadata.difficulty);
    println!(
        "grid:       {} rows x {} cols (origin {})",
        file.pattern.rows, file.pattern.cols, file.pattern.start_col
    );

    let mut counts: IndexMap<StitchKind, usize> = IndexMap::new();
    for p in &file.pattern.symbols {
        *counts.entry(p.kind).or_insert(0) += 1;
    }
    println!("stitches:   {}", file.pattern.symbols.len());
    for (kind, count) in &counts {
        println!("  {:<8} {:>4}  ({})", kind.id(), count, kind.name());
    }
    Ok(())
}

fn pack(path: &Utf8PathBuf, out: &Utf8PathBuf) -> Result<()> {
    let file = read_pattern_file(path)?;
    let snapshot = file.snapshot();
    let meta = file.meta();
    let record = PatternRecord {
        id: None,
        title: meta.title,
        description: meta.description,
        hook_size: meta.hook_size,
        yarn_weight: meta.yarn_weight,
        difficulty: meta.difficulty,
        canvas_image: None,
        placements: snapshot.placements,
        rows: snapshot.rows,
        cols: snapshot.cols,
        grid_size: snapshot.cell_size,
        start_col: snapshot.column_origin,
        created_at: None,
        updated_at: None,
    };
    record
        .save_to_binary(out.as_std_path())
        .with_context(|| format!("Failed to write {}", out))?;
    println!("packed {} -> {}", path, out);
    Ok(())
}

fn unpack(path: &Utf8PathBuf, out: Option<&Utf8PathBuf>) -> Result<()> {
    let record = PatternRecord::load_from_binary(path.as_std_path())
        .with_context(|| format!("Failed to read {}", path))?;
    let meta = stitchgrid::model::PatternMeta {
        title: record.title.clone(),
        description: record.description.clone(),
        hook_size: record.hook_size.clone(),
        yarn_weight: record.yarn_weight.clone(),
        difficulty: record.difficulty,
        ..Default::default()
    };
    let file = interchange::build_file(&meta, &record.snapshot(), &ViewSettings::default(), None);
    let json = interchange::export_json(&file)?;
    match out {
        Some(out) => {
            std::fs::write(out, json).with_context(|| format!("Failed to write {}", out))?;
            println!("unpacked {} -> {}", path, out);
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn list(library: &Utf8PathBuf) -> Result<()> {
    let lib = PatternLibrary::open(library.clone())?;
    let records = lib.list_patterns()?;
    if records.is_empty() {
        println!("no patterns in {}", library);
        return Ok(());
    }
    for record in records {
        let updated = record
            .updated_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>4}  {:<32}  {:>3}x{:<3}  {:>4} sts  {}",
            record.id.unwrap_or(0),
            record.title,
            record.rows,
            record.cols,
            record.placements.len(),
            updated
        );
    }
    Ok(())
}
