use crate::config::{Config, load_config};
use crate::layout::{ApproxMeasure, Cloud, FontMeasure, compute_cloud};
use crate::render::{render_svg, write_output_svg};
use crate::tags::{Tag, build_tags};
use crate::tokenizer::count_words;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "tcloud", version, about = "Tag cloud renderer in Rust (spiral placement)")]
pub struct Args {
    /// Input text file or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Smallest font size; overrides the config file
    #[arg(long = "minFontSize")]
    pub min_font_size: Option<f32>,

    /// Largest font size; overrides the config file
    #[arg(long = "maxFontSize")]
    pub max_font_size: Option<f32>,

    /// Keep at most this many words (highest frequency first)
    #[arg(short = 'n', long = "maxWords")]
    pub max_words: Option<usize>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    if let Some(v) = args.min_font_size {
        config.cloud.min_font_size = v;
    }
    if let Some(v) = args.max_font_size {
        config.cloud.max_font_size = v;
    }

    let text = read_input(args.input.as_deref())?;
    let counts = count_words(&text, &config.tokenizer);
    let mut tags = build_tags(&counts);
    if let Some(limit) = args.max_words {
        tags.truncate(limit);
    }
    if tags.is_empty() {
        return Err(anyhow::anyhow!("No words to lay out in input"));
    }

    let cloud = build_cloud(&tags, &config)?;
    let svg = render_svg(&cloud, &config.theme, &config.cloud, &config.render);
    match args.output_format {
        OutputFormat::Svg => {
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            write_png(&svg, &output)?;
        }
    }
    Ok(())
}

fn build_cloud(tags: &[Tag], config: &Config) -> Result<Cloud> {
    let cloud = if config.cloud.fast_metrics {
        compute_cloud(tags, ApproxMeasure, &config.theme, &config.cloud)?
    } else {
        compute_cloud(tags, FontMeasure::default(), &config.theme, &config.cloud)?
    };
    Ok(cloud)
}

#[cfg(feature = "png")]
fn write_png(svg: &str, output: &Path) -> Result<()> {
    crate::render::write_output_png(svg, output)
}

#[cfg(not(feature = "png"))]
fn write_png(_svg: &str, _output: &Path) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the 'png' feature"))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path == Path::new("-") {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            return Ok(buf);
        }
        return Ok(std::fs::read_to_string(path)?);
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_output_requires_a_path() {
        assert!(ensure_output(&None, "png").is_err());
        let path = PathBuf::from("cloud.png");
        assert_eq!(ensure_output(&Some(path.clone()), "png").unwrap(), path);
    }

    #[test]
    fn args_parse_defaults() {
        let args = Args::parse_from(["tcloud"]);
        assert!(args.input.is_none());
        assert!(matches!(args.output_format, OutputFormat::Svg));
    }

    #[test]
    fn args_parse_overrides() {
        let args = Args::parse_from([
            "tcloud",
            "-i",
            "words.txt",
            "-e",
            "png",
            "--minFontSize",
            "8",
            "-n",
            "50",
        ]);
        assert!(matches!(args.output_format, OutputFormat::Png));
        assert_eq!(args.min_font_size, Some(8.0));
        assert_eq!(args.max_words, Some(50));
    }
}
