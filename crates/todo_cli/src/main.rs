use clap::{CommandFactory, Parser};
use std::io::{self, BufRead};
use todo_cli::cli::{Cli, Command, collect_config_overrides, init_tracing};
use todo_cli::terminal::{TerminalTemplates, render_frame, render_task_details};
use todo_core::app::{Action, TodoApp};
use todo_core::config::{Config, Palette, load_config_with_fallback, merge_overrides, palette_for_theme};
use todo_core::error::AppError;
use todo_core::model::Task;
use todo_core::render::{Frame, RenderCoordinator};
use todo_core::route::fragment_for;
use todo_core::storage::JsonFileStore;
use todo_core::view::Filter;

struct Session {
    app: TodoApp,
    palette: Palette,
}

impl Session {
    fn open(config: &Config) -> Result<Self, AppError> {
        let store = JsonFileStore::open_default()?;
        let renderer = RenderCoordinator::new(
            Box::new(TerminalTemplates),
            Box::new(TerminalTemplates),
            Box::new(store),
            config.namespace(),
        );
        Ok(Self {
            app: TodoApp::open(renderer, &config.initial_route()),
            palette: palette_for_theme(config.theme.as_deref()),
        })
    }

    /// Accepts a full id or a 1-based position in the current view.
    fn resolve_id(&self, raw: &str) -> Result<Task, AppError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AppError::invalid_input("id is required"));
        }

        if let Some(task) = self.app.tasks().iter().find(|task| task.id == trimmed) {
            return Ok(task.clone());
        }

        if let Ok(position) = trimmed.parse::<usize>()
            && position > 0
            && let Some(task) = self.app.visible_tasks().get(position - 1)
        {
            return Ok((*task).clone());
        }

        Err(AppError::not_found(trimmed))
    }

    fn print_frame(&self, frame: &Frame, json: bool) -> Result<(), AppError> {
        if json {
            let rendered = serde_json::to_string(frame)
                .map_err(|err| AppError::invalid_data(err.to_string()))?;
            println!("{rendered}");
        } else {
            println!("{}", render_frame(frame, self.app.tasks(), &self.palette));
        }
        Ok(())
    }
}

fn print_task_json(task: &Task) -> Result<(), AppError> {
    let rendered =
        serde_json::to_string(task).map_err(|err| AppError::invalid_data(err.to_string()))?;
    println!("{rendered}");
    Ok(())
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
}

fn split_command_line(line: &str) -> Result<Vec<String>, AppError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escape = false;

    for ch in line.chars() {
        if escape {
            if ch != '"' && ch != '\\' {
                current.push('\\');
            }
            current.push(ch);
            escape = false;
            continue;
        }

        if in_quotes && ch == '\\' {
            escape = true;
            continue;
        }

        if ch == '"' {
            in_quotes = !in_quotes;
            continue;
        }

        if ch.is_whitespace() && !in_quotes {
            if !current.is_empty() {
                args.push(std::mem::take(&mut current));
            }
            continue;
        }

        current.push(ch);
    }

    if in_quotes {
        return Err(AppError::invalid_input("unterminated quote in command"));
    }

    if !current.is_empty() {
        args.push(current);
    }

    Ok(args)
}

fn print_help() {
    let mut cmd = Cli::command();
    let help = cmd.render_help();
    println!("{help}");
}

fn run_command(session: &mut Session, cli: Cli) -> Result<(), AppError> {
    if let Some(filter) = cli.filter.as_deref() {
        session.app.dispatch(Action::Route {
            fragment: fragment_for(Filter::from_name(filter)),
        });
    }

    match cli.command {
        Command::Add { title } => {
            let title = match title {
                Some(value) if !value.trim().is_empty() => value,
                _ => return Err(AppError::invalid_input("title is required")),
            };

            let frame = session.app.dispatch(Action::Create { title });
            let task = session
                .app
                .tasks()
                .last()
                .cloned()
                .ok_or_else(|| AppError::invalid_data("task was not stored"))?;
            if cli.json {
                session.print_frame(&frame, true)?;
            } else {
                println!("Added task: {} ({})", task.title, task.id);
            }
        }
        Command::Toggle { id } => {
            let task = session.resolve_id(&id)?;
            let frame = session.app.dispatch(Action::Toggle {
                id: task.id.clone(),
            });
            if cli.json {
                session.print_frame(&frame, true)?;
            } else if task.completed {
                println!("Reopened task: {} ({})", task.title, task.id);
            } else {
                println!("Completed task: {} ({})", task.title, task.id);
            }
        }
        Command::ToggleAll { clear } => {
            let frame = session.app.dispatch(Action::ToggleAll { completed: !clear });
            if cli.json {
                session.print_frame(&frame, true)?;
            } else if clear {
                println!("Marked all tasks active");
            } else {
                println!("Marked all tasks completed");
            }
        }
        Command::Edit { id, new_title } => {
            let task = session.resolve_id(&id)?;
            session.app.dispatch(Action::StartEdit {
                id: task.id.clone(),
            });
            let frame = session.app.dispatch(Action::CommitEdit {
                id: task.id.clone(),
                title: new_title,
            });
            if cli.json {
                session.print_frame(&frame, true)?;
            } else {
                match session.app.tasks().iter().find(|updated| updated.id == task.id) {
                    Some(updated) => println!("Updated task: {} ({})", updated.title, updated.id),
                    None => println!("Deleted task: {} ({})", task.title, task.id),
                }
            }
        }
        Command::Delete { id } => {
            let task = session.resolve_id(&id)?;
            let frame = session.app.dispatch(Action::Delete {
                id: task.id.clone(),
            });
            if cli.json {
                session.print_frame(&frame, true)?;
            } else {
                println!("Deleted task: {} ({})", task.title, task.id);
            }
        }
        Command::ClearCompleted => {
            let before = session.app.tasks().len();
            let frame = session.app.dispatch(Action::ClearCompleted);
            let removed = before - session.app.tasks().len();
            if cli.json {
                session.print_frame(&frame, true)?;
            } else {
                println!("Cleared {removed} completed task(s)");
            }
        }
        Command::List { filter } => {
            let frame = match filter {
                Some(name) => session.app.dispatch(Action::Route {
                    fragment: fragment_for(Filter::from_name(&name)),
                }),
                None => session.app.render(),
            };
            session.print_frame(&frame, cli.json)?;
        }
        Command::Show { id } => {
            let task = session.resolve_id(&id)?;
            if cli.json {
                print_task_json(&task)?;
            } else {
                println!("{}", render_task_details(&task));
            }
        }
    }

    Ok(())
}

fn run_interactive(session: &mut Session) -> Result<(), AppError> {
    let mut input = String::new();
    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();

    loop {
        input.clear();
        let bytes = stdin_lock
            .read_line(&mut input)
            .map_err(|err| AppError::io(err.to_string()))?;

        if bytes == 0 {
            break;
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        if line == "help" || line == "?" {
            print_help();
            continue;
        }

        let args = match split_command_line(line) {
            Ok(args) => args,
            Err(err) => {
                eprintln!("ERROR: {}", err);
                continue;
            }
        };

        if args.is_empty() {
            continue;
        }

        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push("todo".to_string());
        argv.extend(args);

        let cli = match Cli::try_parse_from(argv) {
            Ok(cli) => cli,
            Err(err) => {
                eprintln!("ERROR: {}", normalize_parse_error(err));
                continue;
            }
        };

        if let Err(err) = run_command(session, cli) {
            eprintln!("ERROR: {}", err);
        }
    }

    Ok(())
}

fn load_config(raw_overrides: &[String]) -> Result<Config, AppError> {
    let loaded = load_config_with_fallback();
    if let Some(err) = loaded.error.as_ref() {
        eprintln!("WARNING: {}", err);
    }
    let overrides = collect_config_overrides(raw_overrides)?;
    Ok(merge_overrides(&loaded.config, &overrides))
}

fn run() -> Result<(), AppError> {
    let mut args = std::env::args_os();
    args.next();
    if args.next().is_none() {
        init_tracing(0)?;
        let config = load_config(&[])?;
        let mut session = Session::open(&config)?;
        return run_interactive(&mut session);
    }

    let cli = Cli::try_parse().map_err(|err| {
        if matches!(
            err.kind(),
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
        ) {
            err.exit();
        }
        normalize_parse_error(err)
    })?;

    init_tracing(cli.verbose)?;
    let config = load_config(&cli.config_override)?;
    let mut session = Session::open(&config)?;
    run_command(&mut session, cli)
}

fn main() {
    if let Err(err) = run() {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}
