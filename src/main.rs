use anyhow::{Context, Result};
use clap::Parser;
use markup::{CloseTagEcho, ScanConfig, ScanResult, SupportedTags, TagScanner};
use serde::Serialize;
use std::io::{self, Read, Write};
use std::ops::Range;
use std::path::PathBuf;
use tools::utf8::slice_chars;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Strip markup from a file (or stdin) and print the plain text with the tag ranges found.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Input file; reads stdin when omitted.
    file: Option<PathBuf>,

    /// Comma-separated tag names to extract, e.g. `b,i,a,br`.
    #[arg(long, value_delimiter = ',')]
    tags: Vec<String>,

    /// Write unsupported closing tags back as `<name/>` instead of `</name>`.
    #[arg(long)]
    legacy_close_echo: bool,

    /// Also report hashtag ranges over the plain text.
    #[arg(long)]
    hashtags: bool,

    /// Also report mention ranges over the plain text.
    #[arg(long)]
    mentions: bool,

    /// Print JSON instead of the line format.
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    #[serde(flatten)]
    scan: &'a ScanResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    hashtags: Option<Vec<Range<usize>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mentions: Option<Vec<Range<usize>>>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let source = read_source(args.file.as_ref())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&args, &source, &mut out)
}

fn run(args: &Args, source: &str, out: &mut impl Write) -> Result<()> {
    let config = ScanConfig {
        close_tag_echo: if args.legacy_close_echo {
            CloseTagEcho::SelfClosing
        } else {
            CloseTagEcho::Literal
        },
    };
    let scanner = TagScanner::new(SupportedTags::new(&args.tags), config);
    let scan = scanner.scan(source);

    let report = Report {
        scan: &scan,
        hashtags: args.hashtags.then(|| detect::detect_hashtags(&scan.text)),
        mentions: args.mentions.then(|| detect::detect_mentions(&scan.text)),
    };

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &report).context("failed to write JSON")?;
        writeln!(out)?;
    } else {
        write_lines(out, &report)?;
    }
    Ok(())
}

fn read_source(file: Option<&PathBuf>) -> Result<String> {
    let mut bytes = Vec::new();
    match file {
        Some(path) => {
            bytes = std::fs::read(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
        }
        None => {
            io::stdin()
                .read_to_end(&mut bytes)
                .context("failed to read stdin")?;
        }
    }
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn write_lines(out: &mut impl Write, report: &Report<'_>) -> Result<()> {
    let scan = report.scan;
    writeln!(out, "{}", scan.text)?;
    writeln!(out, "---")?;
    for occurrence in &scan.occurrences {
        write!(
            out,
            "{} {}..{}",
            occurrence.tag.name(),
            occurrence.range.start,
            occurrence.range.end
        )?;
        for (key, value) in occurrence.tag.attributes() {
            write!(out, " {key}={value:?}")?;
        }
        writeln!(out, " {:?}", scan.slice(occurrence).unwrap_or_default())?;
    }
    for (label, ranges) in [("#", &report.hashtags), ("@", &report.mentions)] {
        let Some(ranges) = ranges else {
            continue;
        };
        for range in ranges {
            let covered = slice_chars(&scan.text, range.clone()).unwrap_or_default();
            writeln!(out, "{label} {}..{} {covered:?}", range.start, range.end)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_string(argv: &[&str], source: &str) -> String {
        let args = Args::try_parse_from(std::iter::once("tagscan").chain(argv.iter().copied()))
            .expect("arguments should parse");
        let mut out = Vec::new();
        run(&args, source, &mut out).expect("run should succeed");
        String::from_utf8(out).expect("output is UTF-8")
    }

    #[test]
    fn line_format_lists_occurrences_and_detections() {
        let out = run_to_string(
            &["--tags", "b,a", "--hashtags"],
            r#"<b>Hi</b> <a href="/x">#news</a>"#,
        );
        assert_eq!(
            out,
            "Hi #news\n---\nb 0..2 \"Hi\"\na 3..8 href=\"/x\" \"#news\"\n# 3..8 \"#news\"\n"
        );
    }

    #[test]
    fn legacy_close_echo_writes_self_closed_tags() {
        let out = run_to_string(&["--legacy-close-echo"], "<i>x</i>");
        assert_eq!(out, "<i>x<i/>\n---\n");
        let out = run_to_string(&[], "<i>x</i>");
        assert_eq!(out, "<i>x</i>\n---\n");
    }

    #[test]
    fn json_output_flattens_scan_and_omits_disabled_detections() {
        let out = run_to_string(&["--json", "--tags", "b", "--mentions"], "<b>@ann</b>");
        let value: serde_json::Value = serde_json::from_str(&out).expect("output is JSON");
        assert_eq!(value["text"], "@ann");
        let occurrences = value["occurrences"].as_array().expect("occurrences array");
        assert_eq!(occurrences.len(), 1);
        assert_eq!(occurrences[0]["tag"]["name"], "b");
        assert_eq!(occurrences[0]["range"]["start"], 0);
        assert_eq!(occurrences[0]["range"]["end"], 4);
        assert_eq!(value["mentions"][0]["end"], 4);
        assert!(value.get("hashtags").is_none(), "hashtags should be omitted: {out}");
    }
}
