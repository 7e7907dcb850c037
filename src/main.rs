use clap::Parser;
use std::path::{Path, PathBuf};

use mdpage::{Converter, DEFAULT_FILENAME, svg};

/// Convert Markdown into a paginated A4 PDF
#[derive(Parser, Debug)]
#[command(name = "mdpage")]
#[command(about = "Convert Markdown to a paginated PDF", long_about = None)]
struct Args {
    /// Input markdown file (use "-" for stdin)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output PDF path
    #[arg(short, long, value_name = "OUTPUT", default_value = DEFAULT_FILENAME)]
    output: PathBuf,

    /// Also write one preview image per page into this directory
    #[arg(long, value_name = "DIR")]
    preview_dir: Option<PathBuf>,

    /// Write previews as PNG instead of SVG
    #[arg(long, requires = "preview_dir")]
    png: bool,

    /// Raster scale multiplier for PNG previews (e.g. 2.0 for sharper output)
    #[arg(long, default_value_t = 1.0)]
    png_scale: f32,
}

fn main() -> Result<(), String> {
    env_logger::init();
    let args = Args::parse();

    let markdown = if args.input.to_str() == Some("-") {
        let mut buffer = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut buffer)
            .map_err(|e| format!("Failed to read from stdin: {}", e))?;
        buffer
    } else {
        std::fs::read_to_string(&args.input)
            .map_err(|e| format!("Failed to read input file: {}", e))?
    };

    let document = Converter::default()
        .render(&markdown)
        .map_err(|e| format!("Failed to render: {}", e))?;

    if document.is_empty() {
        return Err("Input is empty: nothing to convert".to_string());
    }

    document
        .save_as(&args.output)
        .map_err(|e| format!("Failed to write PDF: {}", e))?;
    eprintln!(
        "PDF saved to: {} ({} page(s))",
        args.output.display(),
        document.page_count()
    );

    if let Some(dir) = &args.preview_dir {
        write_previews(&document, dir, args.png, args.png_scale)?;
    }

    Ok(())
}

fn write_previews(
    document: &mdpage::Document,
    dir: &Path,
    png: bool,
    scale: f32,
) -> Result<(), String> {
    std::fs::create_dir_all(dir)
        .map_err(|e| format!("Failed to create preview directory: {}", e))?;

    for (idx, page_svg) in document.page_svgs().iter().enumerate() {
        let (path, data) = if png {
            let data = svg::rasterize_png(page_svg, scale).map_err(|e| e.to_string())?;
            (dir.join(format!("page-{}.png", idx + 1)), data)
        } else {
            (
                dir.join(format!("page-{}.svg", idx + 1)),
                page_svg.clone().into_bytes(),
            )
        };

        std::fs::write(&path, data)
            .map_err(|e| format!("Failed to write preview {}: {}", path.display(), e))?;
        log::info!("preview saved to {}", path.display());
    }

    eprintln!("Previews saved to: {}", dir.display());
    Ok(())
}
