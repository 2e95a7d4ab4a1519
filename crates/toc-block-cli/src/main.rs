use anyhow::{Context, Result, anyhow, bail};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use toc_block_config::Config;
use toc_block_engine::{BlockId, BulletStyle, Document, DocumentHost};

const USAGE: &str = "Usage: toc-block <file.md> [--json] [--bullet-style none|disc|decimal]";

/// What to print for each table of contents block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Html,
    Json,
}

impl Output {
    fn extension(self) -> &'static str {
        match self {
            Output::Html => "toc.html",
            Output::Json => "toc.json",
        }
    }
}

struct Args {
    input: PathBuf,
    output: Output,
    /// Overrides the configured style of table of contents blocks
    bullet_style: Option<BulletStyle>,
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut input = None;
    let mut output = Output::Html;
    let mut bullet_style = None;

    let mut args = args.iter().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => output = Output::Json,
            "--bullet-style" => {
                let value = args.next().context("--bullet-style needs a value")?;
                bullet_style = Some(value.parse::<BulletStyle>()?);
            }
            flag if flag.starts_with("--") => bail!("Unknown option: {flag}"),
            path if input.is_none() => input = Some(PathBuf::from(path)),
            extra => bail!("Unexpected argument: {extra}"),
        }
    }

    Ok(Args {
        input: input.ok_or_else(|| anyhow!("Missing input file"))?,
        output,
        bullet_style,
    })
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let args = match parse_args(&args) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{USAGE}");
            process::exit(1);
        }
    };

    if let Err(e) = run(&args) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let mut config = match Config::load()? {
        Some(config) => {
            log::info!("Using config from {}", Config::config_path().display());
            config
        }
        None => Config::default(),
    };
    if let Some(style) = args.bullet_style {
        config.bullet_style = style;
    }

    let markdown = fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;

    let mut doc = Document::from_markdown_with_defaults(&markdown, config.toc_defaults())
        .with_class_name(config.class_name.clone());

    let mut toc_ids = doc.table_of_contents_ids();
    if toc_ids.is_empty() {
        log::info!("No [toc] marker found, adding a table of contents at the top");
        toc_ids.push(doc.insert_table_of_contents(0));
    }

    let rendered = toc_ids
        .iter()
        .map(|id| render(&doc, *id, args.output))
        .collect::<Result<Vec<_>>>()?
        .join("\n");

    match &config.output_dir {
        Some(dir) => {
            let path = output_path(dir, &args.input, args.output);
            fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
            fs::write(&path, rendered + "\n")
                .with_context(|| format!("writing {}", path.display()))?;
            log::info!("Wrote {}", path.display());
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

fn render(doc: &Document, id: BlockId, output: Output) -> Result<String> {
    match output {
        Output::Html => doc
            .save(id)
            .with_context(|| format!("table of contents {id} disappeared")),
        Output::Json => {
            let state = doc
                .toc_state(id)
                .with_context(|| format!("table of contents {id} disappeared"))?;
            Ok(state.to_json()?)
        }
    }
}

fn output_path(dir: &Path, input: &Path, output: Output) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    dir.join(format!("{stem}.{}", output.extension()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_input_and_json_flag() {
        let parsed = parse_args(&args(&["toc-block", "guide.md", "--json"])).unwrap();
        assert_eq!(parsed.input, PathBuf::from("guide.md"));
        assert_eq!(parsed.output, Output::Json);

        let parsed = parse_args(&args(&["toc-block", "guide.md"])).unwrap();
        assert_eq!(parsed.output, Output::Html);
        assert_eq!(parsed.bullet_style, None);
    }

    #[test]
    fn parses_bullet_style_override() {
        let parsed =
            parse_args(&args(&["toc-block", "--bullet-style", "decimal", "guide.md"])).unwrap();
        assert_eq!(parsed.input, PathBuf::from("guide.md"));
        assert_eq!(parsed.bullet_style, Some(BulletStyle::Decimal));
    }

    #[test]
    fn rejects_unknown_bullet_style() {
        let err = parse_args(&args(&["toc-block", "a.md", "--bullet-style", "square"]))
            .err()
            .unwrap();
        assert_eq!(err.to_string(), "Unknown bullet style: square");

        assert!(parse_args(&args(&["toc-block", "a.md", "--bullet-style"])).is_err());
    }

    #[test]
    fn rejects_missing_input_and_unknown_flags() {
        assert!(parse_args(&args(&["toc-block"])).is_err());
        assert!(parse_args(&args(&["toc-block", "a.md", "--yaml"])).is_err());
        assert!(parse_args(&args(&["toc-block", "a.md", "b.md"])).is_err());
    }

    #[test]
    fn output_file_is_named_after_input() {
        let path = output_path(Path::new("/out"), Path::new("docs/guide.md"), Output::Html);
        assert_eq!(path, PathBuf::from("/out/guide.toc.html"));

        let path = output_path(Path::new("/out"), Path::new("guide.md"), Output::Json);
        assert_eq!(path, PathBuf::from("/out/guide.toc.json"));
    }

    #[test]
    fn renders_json_state_for_document() {
        let mut doc = Document::from_markdown("# A {#a}\n");
        let id = doc.insert_table_of_contents(0);

        let json = render(&doc, id, Output::Json).unwrap();
        assert!(json.starts_with(r#"{"outline":[{"content":"A","anchor":"a","children":[]}]"#));
    }
}
