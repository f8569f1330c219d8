// NoteDrop: drop a PDF, image, or plain-text file in, get a Markdown
// study-note document out (title, key takeaways, outline, key terms).
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use walkdir::WalkDir;

mod extract;
mod notes;

use notes::summary::{DEFAULT_TAKEAWAY_COUNT, DEFAULT_TERM_COUNT};
use notes::NotesDocument;

#[derive(Parser)]
#[command(
    name = "NoteDrop",
    about = "Turn PDFs, images, and text files into Markdown study notes"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build study notes for a single file
    Notes {
        #[arg(short, long)]
        file: PathBuf,
        /// Write the output here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Emit the notes document as JSON instead of Markdown
        #[arg(long)]
        json: bool,
        /// Print the extracted raw text instead of notes
        #[arg(long)]
        raw: bool,
        #[arg(short = 'n', long, default_value_t = DEFAULT_TAKEAWAY_COUNT)]
        takeaways: usize,
        #[arg(short = 'k', long, default_value_t = DEFAULT_TERM_COUNT)]
        terms: usize,
    },
    /// Build notes for every supported file under a directory
    Batch {
        #[arg(short, long)]
        dir: PathBuf,
        #[arg(short, long, default_value = "notes-out")]
        out: PathBuf,
        #[arg(short = 'n', long, default_value_t = DEFAULT_TAKEAWAY_COUNT)]
        takeaways: usize,
        #[arg(short = 'k', long, default_value_t = DEFAULT_TERM_COUNT)]
        terms: usize,
    },
}

// Stage messages go to stderr so piped stdout stays clean Markdown.
fn stage(msg: &str) {
    let mut stderr = StandardStream::stderr(ColorChoice::Auto);
    let _ = stderr.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true));
    let _ = write!(stderr, "==> ");
    let _ = stderr.reset();
    let _ = writeln!(stderr, "{}", msg);
}

fn run_notes(file: &Path, takeaways: usize, terms: usize, json: bool, raw: bool) -> Result<String> {
    stage(&format!("Extracting text from {}", file.display()));
    let text = extract::extract_text(file)?;
    if raw {
        return Ok(text);
    }

    stage("Building study notes");
    let doc = NotesDocument::build(&text, takeaways, terms);
    if json {
        Ok(serde_json::to_string_pretty(&doc)?)
    } else {
        Ok(doc.render())
    }
}

fn run_batch(dir: &Path, out: &Path, takeaways: usize, terms: usize) -> Result<usize> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|s| s.to_str())
                .map(extract::supported_extension)
                .unwrap_or(false)
        })
        .map(|e| e.path().to_path_buf())
        .collect();

    files.sort();
    fs::create_dir_all(out)?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] {wide_bar} {pos}/{len} {msg}",
        )?
        .progress_chars("=>-"),
    );

    // The pipeline is pure, so per-file parallelism needs no locking.
    let rendered: Vec<(PathBuf, Result<String>)> = files
        .par_iter()
        .map(|p| {
            let result = extract::extract_text(p)
                .map(|text| NotesDocument::build(&text, takeaways, terms).render());
            pb.inc(1);
            (p.clone(), result)
        })
        .collect();

    pb.finish_with_message("building notes");

    let mut written = 0;
    for (path, result) in rendered {
        match result {
            Ok(markdown) => {
                let stem = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or_else(|| String::from("notes"));
                fs::write(out.join(format!("{}.md", stem)), markdown)?;
                written += 1;
            }
            Err(e) => eprintln!("skipping {}: {}", path.display(), e),
        }
    }
    Ok(written)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Notes {
            file,
            out,
            json,
            raw,
            takeaways,
            terms,
        } => {
            let rendered = run_notes(&file, takeaways, terms, json, raw)?;
            match out {
                Some(path) => {
                    fs::write(&path, &rendered)?;
                    println!("Wrote notes to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }
        Commands::Batch {
            dir,
            out,
            takeaways,
            terms,
        } => {
            let count = run_batch(&dir, &out, takeaways, terms)?;
            println!("Wrote {} note files to {}", count, out.display());
        }
    }
    Ok(())
}
