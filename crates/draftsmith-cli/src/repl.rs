//! Interactive drafting shell.
//!
//! A rustyline REPL over [`DraftService`]. Collaborator-bound commands run
//! as background tasks and report through an mpsc channel, so the prompt
//! never blocks on the Gemini API.

use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::Editor;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use tokio::sync::mpsc;

use draftsmith_application::DraftService;
use draftsmith_core::structure::StructureTemplate;
use draftsmith_core::{DraftError, EditorState, SummaryState};

const HELP: &str = "Commands:
  /add <text>              Add reference material (AI titles it)
  /refs                    List references
  /delref <n>              Remove reference n
  /outline                 Show the draft outline
  /show [n]                Show paragraph n, or the whole draft
  /select <n>              Select paragraph n for editing
  /edit <n> [text]         Replace paragraph n's content
  /new                     Append an empty paragraph
  /delete <n>              Delete paragraph n
  /rewrite <n> [how]       Ask the AI to rewrite paragraph n
  /structures              List article structures
  /generate <n|name>       Regenerate the draft with a structure
  /words <count>           Set the target word count (100-2000)
  /lang <language>         Set the output language (English, Chinese, or any other)
  /export [path]           Render the draft as Markdown
  /help                    Show this help
  quit                     Exit";

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        let commands = [
            "/add",
            "/refs",
            "/delref",
            "/outline",
            "/show",
            "/select",
            "/edit",
            "/new",
            "/delete",
            "/rewrite",
            "/structures",
            "/generate",
            "/words",
            "/lang",
            "/export",
            "/help",
        ];
        Self {
            commands: commands.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned(hint.bright_black().to_string())
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

/// One parsed REPL command. Indices are 1-based, as displayed.
#[derive(Debug, Clone, PartialEq)]
enum Command {
    AddReference(String),
    ListReferences,
    DeleteReference(usize),
    Outline,
    Show(Option<usize>),
    Select(usize),
    Edit(usize, String),
    NewParagraph,
    Delete(usize),
    Rewrite(usize, String),
    Structures,
    Generate(String),
    Words(u32),
    Language(String),
    Export(Option<PathBuf>),
    Help,
    Quit,
}

/// Output from background tasks, printed by the printer task.
enum UiEvent {
    Notice(String),
    Report(String),
    Failure(String),
}

/// Runs the REPL until quit or EOF.
pub async fn run(service: Arc<DraftService>) -> Result<()> {
    // ===== Printer Setup =====
    // Background settlements report here instead of printing directly, so
    // their output arrives whole even while the prompt is active.
    let (ui_tx, mut ui_rx) = mpsc::channel::<UiEvent>(32);
    let printer = tokio::spawn(async move {
        while let Some(event) = ui_rx.recv().await {
            match event {
                UiEvent::Notice(text) => println!("{}", text.bright_black()),
                UiEvent::Report(text) => println!("{text}"),
                UiEvent::Failure(text) => println!("{}", text.red()),
            }
        }
    });

    // ===== REPL Setup =====
    let helper = CliHelper::new();
    let mut rl: Editor<CliHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(helper));

    println!("{}", "=== Draftsmith ===".bright_magenta().bold());
    println!(
        "{}",
        "Paste source material with '/add <text>', then '/generate <structure>'. Type '/help' for all commands, 'quit' to exit."
            .bright_black()
    );
    println!();

    // ===== Main REPL Loop =====
    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();

                // Skip empty lines
                if trimmed.is_empty() {
                    continue;
                }

                // Add to history
                let _ = rl.add_history_entry(&line);

                let command = match parse_command(trimmed) {
                    Ok(command) => command,
                    Err(message) => {
                        println!("{}", message.red());
                        continue;
                    }
                };

                if command == Command::Quit {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }

                dispatch(command, &service, &ui_tx).await;
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {err:?}").red());
                break;
            }
        }
    }

    // Drop the channel to let the printer finish
    drop(ui_tx);
    let _ = printer.await;

    Ok(())
}

/// Executes one command. Collaborator-bound commands spawn and return
/// immediately; everything else completes inline.
async fn dispatch(command: Command, service: &Arc<DraftService>, ui: &mpsc::Sender<UiEvent>) {
    match command {
        Command::AddReference(text) => {
            println!("{}", "AI is summarizing...".yellow());
            let service = Arc::clone(service);
            let tx = ui.clone();
            tokio::spawn(async move {
                let event = match service.add_reference(&text).await {
                    Ok(Some(id)) => {
                        let state = service.snapshot().await;
                        match state.reference(&id).map(|r| r.summary.clone()) {
                            Some(SummaryState::Ready(title)) => UiEvent::Report(format!(
                                "{} {}",
                                "Reference added:".green(),
                                title.bright_blue()
                            )),
                            Some(_) => UiEvent::Notice("Reference added.".to_string()),
                            None => UiEvent::Notice(
                                "Reference was removed before its title arrived.".to_string(),
                            ),
                        }
                    }
                    Ok(None) => UiEvent::Notice("Nothing to add.".to_string()),
                    Err(err) => UiEvent::Failure(display_error(&err)),
                };
                let _ = tx.send(event).await;
            });
        }
        Command::ListReferences => {
            println!("{}", render_references(&service.snapshot().await));
        }
        Command::DeleteReference(number) => {
            let state = service.snapshot().await;
            match reference_id_at(&state, number) {
                Some(id) => match service.remove_reference(&id).await {
                    Ok(()) => println!("{}", format!("Removed reference {number}.").green()),
                    Err(err) => println!("{}", display_error(&err).red()),
                },
                None => println!("{}", format!("No reference numbered {number}.").red()),
            }
        }
        Command::Outline => {
            println!("{}", render_outline(&service.snapshot().await));
        }
        Command::Show(None) => {
            println!("{}", render_draft(&service.snapshot().await));
        }
        Command::Show(Some(number)) => {
            let state = service.snapshot().await;
            match render_paragraph(&state, number) {
                Some(text) => println!("{text}"),
                None => println!("{}", format!("No paragraph numbered {number}.").red()),
            }
        }
        Command::Select(number) => {
            let state = service.snapshot().await;
            match paragraph_id_at(&state, number) {
                Some(id) => match service.select_paragraph(Some(id.as_str())).await {
                    Ok(()) => {
                        let title = state.paragraph(&id).map(|p| p.title.as_str()).unwrap_or("");
                        println!("{}", format!("Selected paragraph {number}: {title}").green());
                    }
                    Err(err) => println!("{}", display_error(&err).red()),
                },
                None => println!("{}", format!("No paragraph numbered {number}.").red()),
            }
        }
        Command::Edit(number, text) => {
            let state = service.snapshot().await;
            match paragraph_id_at(&state, number) {
                Some(id) => match service.edit_paragraph(&id, &text).await {
                    Ok(()) => println!("{}", format!("Paragraph {number} updated.").green()),
                    Err(err) => println!("{}", display_error(&err).red()),
                },
                None => println!("{}", format!("No paragraph numbered {number}.").red()),
            }
        }
        Command::NewParagraph => {
            service.add_paragraph().await;
            let position = service.snapshot().await.paragraphs.len();
            println!("{}", format!("Added paragraph {position}.").green());
        }
        Command::Delete(number) => {
            let state = service.snapshot().await;
            match paragraph_id_at(&state, number) {
                Some(id) => match service.remove_paragraph(&id).await {
                    Ok(()) => println!("{}", format!("Deleted paragraph {number}.").green()),
                    Err(err) => println!("{}", display_error(&err).red()),
                },
                None => println!("{}", format!("No paragraph numbered {number}.").red()),
            }
        }
        Command::Rewrite(number, instruction) => {
            let state = service.snapshot().await;
            let Some(id) = paragraph_id_at(&state, number) else {
                println!("{}", format!("No paragraph numbered {number}.").red());
                return;
            };
            println!("{}", "Rewriting...".yellow());
            let service = Arc::clone(service);
            let tx = ui.clone();
            tokio::spawn(async move {
                let event = match service.rewrite(&id, &instruction).await {
                    Ok(()) => {
                        let state = service.snapshot().await;
                        match state.paragraph(&id) {
                            Some(paragraph) => UiEvent::Report(format!(
                                "{}\n{}",
                                format!("Paragraph {number} rewritten:").green(),
                                paragraph.content.bright_blue()
                            )),
                            None => UiEvent::Notice(
                                "Paragraph was deleted before the rewrite finished.".to_string(),
                            ),
                        }
                    }
                    Err(err) => UiEvent::Failure(display_error(&err)),
                };
                let _ = tx.send(event).await;
            });
        }
        Command::Structures => {
            println!("{}", render_structures(service.structures()));
        }
        Command::Generate(selector) => {
            let Some(name) = resolve_structure(service.structures(), &selector) else {
                println!(
                    "{}",
                    format!("No structure matches '{selector}'. Try /structures.").red()
                );
                return;
            };
            println!("{}", "AI is crafting the article...".yellow());
            let service = Arc::clone(service);
            let tx = ui.clone();
            tokio::spawn(async move {
                let event = match service.regenerate(&name).await {
                    Ok(()) => {
                        let state = service.snapshot().await;
                        UiEvent::Report(format!(
                            "{}\n{}",
                            "Draft regenerated.".green(),
                            render_outline(&state)
                        ))
                    }
                    Err(err) => UiEvent::Failure(display_error(&err)),
                };
                let _ = tx.send(event).await;
            });
        }
        Command::Words(words) => {
            let applied = service.set_word_count(words).await;
            println!("{}", format!("Target word count set to {applied}.").green());
        }
        Command::Language(language) => {
            service.set_language(&language).await;
            let settings = service.settings().await;
            println!(
                "{}",
                format!("Output language set to {}.", settings.language).green()
            );
        }
        Command::Export(None) => {
            println!("{}", service.export_markdown().await);
        }
        Command::Export(Some(path)) => {
            let markdown = service.export_markdown().await;
            match std::fs::write(&path, markdown) {
                Ok(()) => println!(
                    "{}",
                    format!("Draft exported to {}.", path.display()).green()
                ),
                Err(err) => println!(
                    "{}",
                    format!("Failed to write {}: {err}", path.display()).red()
                ),
            }
        }
        Command::Help => {
            println!("{}", HELP.bright_black());
        }
        Command::Quit => {}
    }
}

// ============================================================================
// Command parsing
// ============================================================================

fn parse_command(line: &str) -> std::result::Result<Command, String> {
    let trimmed = line.trim();
    if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
        return Ok(Command::Quit);
    }

    let Some(rest) = trimmed.strip_prefix('/') else {
        return Err("Commands start with '/'. Type /help to see them.".to_string());
    };
    let (name, args) = split_command(rest);

    match name {
        "add" => require_text(args, "/add <text>").map(Command::AddReference),
        "refs" => Ok(Command::ListReferences),
        "delref" => parse_number(args, "/delref <n>").map(Command::DeleteReference),
        "outline" => Ok(Command::Outline),
        "show" => match args {
            "" => Ok(Command::Show(None)),
            _ => parse_number(args, "/show [n]").map(|n| Command::Show(Some(n))),
        },
        "select" => parse_number(args, "/select <n>").map(Command::Select),
        "edit" => {
            let (number, text) = split_command(args);
            parse_number(number, "/edit <n> [text]").map(|n| Command::Edit(n, text.to_string()))
        }
        "new" => Ok(Command::NewParagraph),
        "delete" => parse_number(args, "/delete <n>").map(Command::Delete),
        "rewrite" => {
            let (number, instruction) = split_command(args);
            parse_number(number, "/rewrite <n> [instruction]")
                .map(|n| Command::Rewrite(n, instruction.to_string()))
        }
        "structures" => Ok(Command::Structures),
        "generate" => require_text(args, "/generate <n|name>").map(Command::Generate),
        "words" => args
            .parse::<u32>()
            .map(Command::Words)
            .map_err(|_| "Usage: /words <count>".to_string()),
        "lang" => require_text(args, "/lang <language>").map(Command::Language),
        "export" => Ok(Command::Export(if args.is_empty() {
            None
        } else {
            Some(PathBuf::from(args))
        })),
        "help" => Ok(Command::Help),
        other => Err(format!("Unknown command '/{other}'. Type /help to see them.")),
    }
}

fn split_command(rest: &str) -> (&str, &str) {
    match rest.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim()),
        None => (rest, ""),
    }
}

fn require_text(args: &str, usage: &str) -> std::result::Result<String, String> {
    if args.is_empty() {
        Err(format!("Usage: {usage}"))
    } else {
        Ok(args.to_string())
    }
}

fn parse_number(args: &str, usage: &str) -> std::result::Result<usize, String> {
    args.parse::<usize>()
        .ok()
        .filter(|n| *n >= 1)
        .ok_or_else(|| format!("Usage: {usage}"))
}

// ============================================================================
// Resolution and rendering
// ============================================================================

fn paragraph_id_at(state: &EditorState, number: usize) -> Option<String> {
    state
        .paragraphs
        .get(number.checked_sub(1)?)
        .map(|p| p.id.clone())
}

fn reference_id_at(state: &EditorState, number: usize) -> Option<String> {
    state
        .references
        .get(number.checked_sub(1)?)
        .map(|r| r.id.clone())
}

/// Matches a /generate selector against the catalog: a 1-based listing
/// number, a template name, or a display label.
fn resolve_structure(templates: &[StructureTemplate], selector: &str) -> Option<String> {
    if let Ok(number) = selector.parse::<usize>() {
        return templates
            .get(number.checked_sub(1)?)
            .map(|t| t.name.clone());
    }
    templates
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case(selector) || t.label.eq_ignore_ascii_case(selector))
        .map(|t| t.name.clone())
}

fn display_error(err: &DraftError) -> String {
    if err.is_backend() {
        err.user_message()
    } else {
        err.to_string()
    }
}

fn render_outline(state: &EditorState) -> String {
    if state.paragraphs.is_empty() {
        return "The draft is empty. Use /generate or /new to start."
            .bright_black()
            .to_string();
    }

    let mut lines = Vec::new();
    if state.is_regenerating() {
        lines.push("AI is crafting the article...".yellow().to_string());
    }
    if let Some(message) = state.regeneration.failure() {
        lines.push(message.red().to_string());
    }

    for (index, paragraph) in state.paragraphs.iter().enumerate() {
        let marker = if state.selected_paragraph_id.as_deref() == Some(paragraph.id.as_str()) {
            "*".yellow().to_string()
        } else {
            " ".to_string()
        };
        let mut line = format!("{marker}{:>2}. {}", index + 1, paragraph.title.bold());
        if state.is_rewriting(&paragraph.id) {
            line.push_str(&format!("  {}", "Rewriting...".yellow()));
        }
        if let Some(message) = state.rewrite_failure(&paragraph.id) {
            line.push_str(&format!("  {}", message.red()));
        }
        lines.push(line);
        lines.push(format!("     {}", paragraph.explanation.bright_black()));
    }
    lines.join("\n")
}

fn render_paragraph(state: &EditorState, number: usize) -> Option<String> {
    let paragraph = state.paragraphs.get(number.checked_sub(1)?)?;

    let mut lines = vec![format!("## {}", paragraph.title.bold())];
    lines.push(paragraph.explanation.bright_black().to_string());
    if state.is_rewriting(&paragraph.id) {
        lines.push("Rewriting...".yellow().to_string());
    }
    if let Some(message) = state.rewrite_failure(&paragraph.id) {
        lines.push(message.red().to_string());
    }
    if paragraph.is_empty() {
        lines.push("(no content yet)".bright_black().to_string());
    } else {
        lines.push(paragraph.content.clone());
    }
    Some(lines.join("\n"))
}

fn render_draft(state: &EditorState) -> String {
    if state.paragraphs.is_empty() {
        return "The draft is empty. Use /generate or /new to start."
            .bright_black()
            .to_string();
    }
    (1..=state.paragraphs.len())
        .filter_map(|number| render_paragraph(state, number))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_references(state: &EditorState) -> String {
    if state.references.is_empty() {
        return "No references yet. Paste source material with /add <text>."
            .bright_black()
            .to_string();
    }

    let mut lines = Vec::new();
    for (index, reference) in state.references.iter().enumerate() {
        let title = match &reference.summary {
            SummaryState::Pending => "AI is summarizing...".yellow().to_string(),
            SummaryState::Ready(title) => title.bright_blue().to_string(),
            SummaryState::Failed(message) => message.red().to_string(),
        };
        lines.push(format!("{:>2}. {title}", index + 1));
        lines.push(format!(
            "    {}",
            preview(&reference.original_content).bright_black()
        ));
    }
    lines.join("\n")
}

fn render_structures(templates: &[StructureTemplate]) -> String {
    templates
        .iter()
        .enumerate()
        .map(|(index, template)| {
            format!(
                "{:>2}. {} {}",
                index + 1,
                template.label.bold(),
                format!("({})", template.name).bright_black()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One flattened line of reference text, truncated for listings.
fn preview(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > 72 {
        let truncated: String = flat.chars().take(72).collect();
        format!("{truncated}...")
    } else {
        flat
    }
}
