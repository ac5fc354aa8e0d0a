//! Command-line front end
//!
//! Loads text from a file or stdin, replays a script of editing intents
//! against a [`TextArea`], and prints the resulting display lines.
//!
//! Script syntax: comma-separated steps.
//! - key strings: `right`, `shift+end`, `ctrl+z`, `enter`
//! - named intents: `undo`, `redo`, `select-all`, `copy`, `cut`, `paste`,
//!   `start-selection`, `cancel-selection`, `overwrite`
//! - `type:TEXT` types each char, `insert:TEXT` inserts in one step
//! - `click:X:Y` presses and releases the pointer, `drag:X:Y` moves it
//! - `wait:MS` advances the engine clock

use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::config::TextAreaConfig;
use crate::editable::{
    parse_keystroke, MouseMsg, SystemClipboard, TextArea, TextEditMsg,
};
use crate::layout::{FontdueMeasure, MonospaceMeasure, TextMeasure};

/// Frame time used between script steps
const FRAME: Duration = Duration::from_millis(16);

/// Wrap text and replay editing intents
#[derive(Parser, Debug)]
#[command(name = "textarea", version, about = "Wrap text and replay editing intents")]
pub struct CliArgs {
    /// File to load (reads stdin when omitted)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Wrap width in pixels (0 disables wrapping)
    #[arg(long, default_value_t = 0.0)]
    pub width: f32,

    /// Viewport height in pixels, used for paging and scrolling
    #[arg(long, default_value_t = 0.0)]
    pub height: f32,

    /// Advance of every char when no font is given
    #[arg(long, default_value_t = 8.0)]
    pub char_width: f32,

    /// Line height when no font is given
    #[arg(long, default_value_t = 16.0)]
    pub line_height: f32,

    /// TrueType/OpenType font to measure with
    #[arg(long, value_name = "FILE")]
    pub font: Option<PathBuf>,

    /// Font size in pixels (with --font)
    #[arg(long, default_value_t = 16.0)]
    pub font_size: f32,

    /// Editing script to replay before printing
    #[arg(long, short = 's')]
    pub script: Option<String>,

    /// Config file (defaults to the user config)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Use the OS clipboard for copy/cut/paste
    #[arg(long)]
    pub system_clipboard: bool,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// One step of an editing script
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptStep {
    Edit(TextEditMsg),
    Mouse(MouseMsg),
    Wait(Duration),
}

/// Parse a comma-separated editing script
pub fn parse_script(script: &str) -> Result<Vec<ScriptStep>> {
    let mut steps = Vec::new();
    for token in script.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        parse_step(token, &mut steps).with_context(|| format!("Invalid script step '{}'", token))?;
    }
    Ok(steps)
}

fn parse_step(token: &str, steps: &mut Vec<ScriptStep>) -> Result<()> {
    if let Some(text) = token.strip_prefix("type:") {
        steps.extend(text.chars().map(|c| ScriptStep::Edit(TextEditMsg::InsertChar(c))));
        return Ok(());
    }
    if let Some(text) = token.strip_prefix("insert:") {
        steps.push(ScriptStep::Edit(TextEditMsg::InsertText(text.to_string())));
        return Ok(());
    }
    if let Some(ms) = token.strip_prefix("wait:") {
        let ms: u64 = ms.parse().context("wait takes milliseconds")?;
        steps.push(ScriptStep::Wait(Duration::from_millis(ms)));
        return Ok(());
    }
    if let Some(point) = token.strip_prefix("click:") {
        let (x, y) = parse_point(point)?;
        steps.push(ScriptStep::Mouse(MouseMsg::Down { x, y, shift: false }));
        steps.push(ScriptStep::Mouse(MouseMsg::Up));
        return Ok(());
    }
    if let Some(point) = token.strip_prefix("drag:") {
        let (x, y) = parse_point(point)?;
        steps.push(ScriptStep::Mouse(MouseMsg::Move { x, y }));
        return Ok(());
    }

    let named = match token.to_lowercase().as_str() {
        "undo" => Some(TextEditMsg::Undo),
        "redo" => Some(TextEditMsg::Redo),
        "select-all" | "selectall" => Some(TextEditMsg::SelectAll),
        "copy" => Some(TextEditMsg::Copy),
        "cut" => Some(TextEditMsg::Cut),
        "paste" => Some(TextEditMsg::Paste),
        "start-selection" => Some(TextEditMsg::StartSelection),
        "cancel-selection" => Some(TextEditMsg::CancelSelection),
        "overwrite" => Some(TextEditMsg::ToggleOverwrite),
        _ => None,
    };
    let msg = match named {
        Some(msg) => msg,
        None => parse_keystroke(token)?
            .intent()
            .ok_or_else(|| anyhow!("key has no binding"))?,
    };
    steps.push(ScriptStep::Edit(msg));
    Ok(())
}

fn parse_point(s: &str) -> Result<(f32, f32)> {
    let (x, y) = s.split_once(':').context("expected X:Y")?;
    Ok((x.trim().parse()?, y.trim().parse()?))
}

#[derive(Debug, Serialize)]
struct LineReport<'a> {
    index: usize,
    start: usize,
    len: usize,
    ends_in_newline: bool,
    text: &'a str,
    width: f32,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    text: String,
    caret: usize,
    at_end_of_line: bool,
    selection: Option<[usize; 2]>,
    lines: Vec<LineReport<'a>>,
}

impl CliArgs {
    fn measure(&self) -> Result<Box<dyn TextMeasure>> {
        match &self.font {
            Some(path) => Ok(Box::new(FontdueMeasure::from_file(path, self.font_size)?)),
            None => {
                if self.char_width <= 0.0 || self.line_height <= 0.0 {
                    bail!("--char-width and --line-height must be positive");
                }
                Ok(Box::new(MonospaceMeasure::new(self.char_width, self.line_height)))
            }
        }
    }

    fn read_input(&self) -> Result<String> {
        match &self.path {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display())),
            None => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("Failed to read stdin")?;
                Ok(text)
            }
        }
    }
}

/// Build a text area for `text`, replay the script and render the result
pub fn run_with_text(args: &CliArgs, text: &str) -> Result<String> {
    let mut config = match &args.config {
        Some(path) => TextAreaConfig::load_from(path)?,
        None => TextAreaConfig::load(),
    };
    config.wrap = args.width > 0.0;

    let mut area = TextArea::with_text(text, args.measure()?, config)
        .with_viewport_size(args.width.max(0.0), args.height.max(0.0));
    if args.system_clipboard {
        area = area.with_clipboard(Box::new(SystemClipboard));
    }
    area.update(Duration::ZERO);

    if let Some(script) = &args.script {
        for step in parse_script(script)? {
            match step {
                ScriptStep::Edit(msg) => area.handle(msg),
                ScriptStep::Mouse(msg) => area.handle_mouse(msg),
                ScriptStep::Wait(dt) => {
                    area.update(dt);
                    continue;
                }
            }
            area.update(FRAME);
        }
    }

    render(&area, args.json)
}

pub fn run(args: &CliArgs) -> Result<String> {
    let text = args.read_input()?;
    run_with_text(args, &text)
}

fn render(area: &TextArea, json: bool) -> Result<String> {
    let caret = area.caret();
    let selection = area.selection().map(|s| [s.left().index, s.right().index]);

    if json {
        let report = Report {
            text: area.text(),
            caret: caret.index,
            at_end_of_line: caret.at_end_of_line,
            selection,
            lines: area
                .lines()
                .iter()
                .map(|line| LineReport {
                    index: line.index,
                    start: line.start,
                    len: line.len,
                    ends_in_newline: line.ends_in_newline,
                    text: line.content(),
                    width: line.pixel_width(),
                })
                .collect(),
        };
        return serde_json::to_string_pretty(&report).context("Failed to serialize report");
    }

    let mut out = String::new();
    for line in area.lines() {
        let marker = if line.ends_in_newline { "⏎" } else { "" };
        out.push_str(&format!(
            "{:>4} {:>6} |{}|{}\n",
            line.index,
            line.start,
            line.content(),
            marker
        ));
    }
    out.push_str(&format!(
        "caret {}{}",
        caret.index,
        if caret.at_end_of_line { " (end of line)" } else { "" }
    ));
    if let Some([left, right]) = selection {
        out.push_str(&format!(", selection {}..{}", left, right));
    }
    out.push('\n');
    Ok(out)
}
