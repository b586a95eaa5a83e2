use anyhow::{Context, Result, bail};
use notemark_config::Config;
use notemark_engine::{MarkdownParser, Parsed};
use std::{env, fs, path::Path, process};

const USAGE: &str = "Usage:
  notemark-cli parse <file>
  notemark-cli tasks <file>
  notemark-cli toggle <file> <task-index>";

enum Command<'a> {
    Parse(&'a Path),
    Tasks(&'a Path),
    Toggle(&'a Path, usize),
}

impl<'a> Command<'a> {
    fn from_args(args: &'a [String]) -> Result<Self> {
        match args {
            [cmd, file] if cmd == "parse" => Ok(Command::Parse(Path::new(file))),
            [cmd, file] if cmd == "tasks" => Ok(Command::Tasks(Path::new(file))),
            [cmd, file, index] if cmd == "toggle" => {
                let index = index
                    .parse::<usize>()
                    .with_context(|| format!("Invalid task index: {index}"))?;
                Ok(Command::Toggle(Path::new(file), index))
            }
            _ => bail!("Unrecognised arguments"),
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = match Command::from_args(&args) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {e:#}");
            eprintln!("{USAGE}");
            process::exit(2);
        }
    };

    let config = Config::load()
        .with_context(|| format!("Failed to load {}", Config::config_path().display()))?
        .unwrap_or_default();
    log::debug!("Using limits {:?}", config.limits);
    let parser = config.parser();

    match command {
        Command::Parse(file) => parse(&parser, file),
        Command::Tasks(file) => tasks(&parser, file),
        Command::Toggle(file, index) => toggle(&parser, file, index),
    }
}

fn read(file: &Path) -> Result<String> {
    fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))
}

fn parse(parser: &MarkdownParser, file: &Path) -> Result<()> {
    let parsed = parser.parse(&read(file)?);
    for element in parsed.elements.iter() {
        println!("{element:?}");
    }
    report(&parsed);
    Ok(())
}

fn tasks(parser: &MarkdownParser, file: &Path) -> Result<()> {
    for task in parser.tasks(&read(file)?) {
        let mark = if task.checked { 'x' } else { ' ' };
        let indent = "  ".repeat(task.level - 1);
        println!("{:>4} {indent}[{mark}] {}", task.index, task.text);
    }
    Ok(())
}

fn toggle(parser: &MarkdownParser, file: &Path, index: usize) -> Result<()> {
    let content = read(file)?;
    let tasks = parser.tasks(&content);
    let task = tasks
        .get(index)
        .with_context(|| format!("No task {index} in {} ({} tasks)", file.display(), tasks.len()))?;

    let patched = parser
        .try_toggle_task_state(&content, index, &task.text, task.checked)
        .with_context(|| format!("Failed to toggle task {index}"))?;
    fs::write(file, patched).with_context(|| format!("Failed to write {}", file.display()))?;

    let mark = if task.checked { ' ' } else { 'x' };
    println!("[{mark}] {}", task.text);
    Ok(())
}

fn report(parsed: &Parsed) {
    let diagnostics = &parsed.diagnostics;
    if let Some(degraded) = diagnostics.degraded {
        eprintln!("Degraded parse: {degraded:?}");
    }
    if let Some(last) = &diagnostics.last_error {
        eprintln!("{} recovered errors, last: {last}", diagnostics.error_count);
    }
}
