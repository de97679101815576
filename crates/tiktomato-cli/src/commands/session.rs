//! Interactive timer session.
//!
//! The host side of the controller: a one-second interval delivers ticks and
//! stdin delivers user commands. Both are awaited by a single `select!` on a
//! current-thread runtime, so each transition completes before the next one
//! starts. Events and snapshots are printed to stdout as JSON lines.

use std::path::PathBuf;
use std::time::Duration;

use tiktomato_core::{
    Config, CountdownFont, DisplayPort, Event, Mode, PomodoroController, SettingsStore,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;

use super::{open_store, print_json};
use crate::terminal::TerminalDisplay;

const HELP: &str = "commands: start | pause | toggle | reset | work | short | long | \
fs | exit | esc | focus | apply | set <key> <value> | font <name> | bg <index> | \
upload <path> | status | help | quit";

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Start,
    Pause,
    Toggle,
    Reset,
    Switch(Mode),
    Fullscreen,
    ExitFullscreen,
    Escape,
    Focus,
    Apply,
    Set { key: String, value: String },
    Font(CountdownFont),
    Background(usize),
    Upload(PathBuf),
    Status,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<SessionCommand>, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let mut arg = |name: &str| {
        words
            .next()
            .map(str::to_string)
            .ok_or_else(|| format!("{head}: missing {name}"))
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "start" => SessionCommand::Start,
        "pause" | "stop" => SessionCommand::Pause,
        "toggle" | "space" => SessionCommand::Toggle,
        "reset" => SessionCommand::Reset,
        "work" | "short" | "long" | "shortbreak" | "longbreak" => {
            SessionCommand::Switch(head.parse()?)
        }
        "fs" | "fullscreen" => SessionCommand::Fullscreen,
        "exit" => SessionCommand::ExitFullscreen,
        "esc" | "escape" => SessionCommand::Escape,
        "focus" => SessionCommand::Focus,
        "apply" => SessionCommand::Apply,
        "set" => {
            let key = arg("key")?;
            let value = arg("value")?;
            SessionCommand::Set { key, value }
        }
        "font" => SessionCommand::Font(
            arg("font")?
                .parse::<CountdownFont>()
                .map_err(|e| e.to_string())?,
        ),
        "bg" | "background" => {
            let raw = arg("index")?;
            let index = raw
                .parse::<usize>()
                .map_err(|_| format!("bg: '{raw}' is not an index"))?;
            SessionCommand::Background(index)
        }
        "upload" => SessionCommand::Upload(PathBuf::from(arg("path")?)),
        "status" => SessionCommand::Status,
        "help" | "?" => SessionCommand::Help,
        "quit" | "q" => SessionCommand::Quit,
        other => return Err(format!("unknown command: {other}")),
    };
    Ok(Some(command))
}

/// Apply a command and collect the events it produced.
pub fn execute<S: SettingsStore, D: DisplayPort>(
    controller: &mut PomodoroController<S, D>,
    command: SessionCommand,
) -> Result<Vec<Event>, Box<dyn std::error::Error>> {
    let events = match command {
        SessionCommand::Start => controller.start().into_iter().collect(),
        SessionCommand::Pause => controller.pause().into_iter().collect(),
        SessionCommand::Toggle => controller.toggle_running().into_iter().collect(),
        SessionCommand::Reset => vec![controller.reset()],
        SessionCommand::Switch(mode) => vec![controller.switch_mode(mode)],
        SessionCommand::Fullscreen => controller.toggle_fullscreen().into_iter().collect(),
        SessionCommand::ExitFullscreen => controller.exit_fullscreen().into_iter().collect(),
        SessionCommand::Escape => controller.handle_escape().into_iter().collect(),
        SessionCommand::Focus => {
            if !controller.can_enter_focus_mode() {
                return Err("apply settings before entering focus mode".into());
            }
            controller.enter_focus_mode()
        }
        SessionCommand::Apply => vec![controller.apply_draft()],
        SessionCommand::Set { key, value } => {
            let mut draft = controller.config().clone();
            draft.set(&key, &value)?;
            for mode in Mode::ALL {
                controller.set_minutes(mode, draft.minutes(mode))?;
            }
            if draft.background_image != controller.config().background_image {
                let reference = draft.background_or_default().to_string();
                controller.select_background(reference);
            }
            if draft.font != controller.config().font {
                controller.set_font(draft.font);
            }
            vec![controller.snapshot()]
        }
        SessionCommand::Font(font) => vec![controller.set_font(font)],
        SessionCommand::Background(index) => vec![controller.select_default_background(index)?],
        SessionCommand::Upload(path) => {
            let bytes = std::fs::read(&path)?;
            controller.upload_background_image(&bytes, None)?;
            vec![controller.snapshot()]
        }
        SessionCommand::Status => vec![controller.snapshot()],
        SessionCommand::Help => {
            eprintln!("{HELP}");
            Vec::new()
        }
        SessionCommand::Quit => Vec::new(),
    };
    Ok(events)
}

pub fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(config)?;
    let controller = PomodoroController::new(store, TerminalDisplay::new());
    let period = Duration::from_millis(config.tick_interval_ms.max(1));

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    rt.block_on(drive(controller, period))
}

async fn drive<S: SettingsStore, D: DisplayPort>(
    mut controller: PomodoroController<S, D>,
    period: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = session_loop(&mut controller, period).await;
    // Leave the alternate screen on every exit path, errors included.
    controller.exit_fullscreen();
    tracing::debug!("session ended");
    result
}

async fn session_loop<S: SettingsStore, D: DisplayPort>(
    controller: &mut PomodoroController<S, D>,
    period: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first interval tick completes immediately.
    ticker.tick().await;

    let mut input = BufReader::new(tokio::io::stdin());
    let mut buf = Vec::new();
    print_json(&controller.snapshot())?;
    tracing::debug!(?period, "session started");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Some(event) = controller.tick() {
                    print_json(&event)?;
                    print_json(&controller.snapshot())?;
                }
            }
            read = input.read_until(b'\n', &mut buf) => {
                let at_eof = read? == 0;
                if !buf.is_empty() {
                    let line = String::from_utf8_lossy(&buf).into_owned();
                    buf.clear();
                    if !handle_line(controller, &line)? {
                        break;
                    }
                }
                if at_eof {
                    break;
                }
            }
        }
    }
    Ok(())
}

/// Run one input line. Returns `false` once the user asked to quit.
fn handle_line<S: SettingsStore, D: DisplayPort>(
    controller: &mut PomodoroController<S, D>,
    line: &str,
) -> Result<bool, serde_json::Error> {
    match parse_command(line) {
        Ok(None) => {}
        Ok(Some(SessionCommand::Quit)) => return Ok(false),
        Ok(Some(command)) => match execute(controller, command) {
            Ok(events) => {
                for event in &events {
                    print_json(event)?;
                }
            }
            Err(e) => eprintln!("error: {e}"),
        },
        Err(e) => eprintln!("error: {e}"),
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiktomato_core::{HeadlessDisplay, MemoryStore};

    fn controller() -> PomodoroController<MemoryStore, HeadlessDisplay> {
        PomodoroController::new(MemoryStore::new(), HeadlessDisplay)
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse_command("  "), Ok(None));
        assert_eq!(parse_command("START"), Ok(Some(SessionCommand::Start)));
        assert_eq!(
            parse_command("short"),
            Ok(Some(SessionCommand::Switch(Mode::ShortBreak)))
        );
        assert_eq!(
            parse_command("set workTime 40"),
            Ok(Some(SessionCommand::Set {
                key: "workTime".into(),
                value: "40".into()
            }))
        );
        assert_eq!(
            parse_command("font cinzel"),
            Ok(Some(SessionCommand::Font(CountdownFont::Cinzel)))
        );
        assert_eq!(parse_command("bg 2"), Ok(Some(SessionCommand::Background(2))));
        assert!(parse_command("bg two").is_err());
        assert!(parse_command("set workTime").is_err());
        assert!(parse_command("dance").is_err());
    }

    #[test]
    fn set_updates_draft_without_touching_countdown() {
        let mut c = controller();
        execute(&mut c, SessionCommand::Start).unwrap();
        c.tick();
        execute(
            &mut c,
            SessionCommand::Set {
                key: "workTime".into(),
                value: "40".into(),
            },
        )
        .unwrap();
        assert_eq!(c.config().durations.work_minutes, 40);
        assert_eq!(c.remaining_secs(), 25 * 60 - 1);
        assert!(c.store().is_empty());

        assert!(execute(
            &mut c,
            SessionCommand::Set {
                key: "workTime".into(),
                value: "0".into(),
            },
        )
        .is_err());
        assert_eq!(c.config().durations.work_minutes, 40);
    }

    #[test]
    fn focus_requires_applied_settings() {
        let mut c = controller();
        assert!(execute(&mut c, SessionCommand::Focus).is_err());
        assert!(!c.is_fullscreen());

        execute(&mut c, SessionCommand::Apply).unwrap();
        let events = execute(&mut c, SessionCommand::Focus).unwrap();
        assert_eq!(events.len(), 2);
        assert!(c.is_fullscreen());

        execute(&mut c, SessionCommand::Escape).unwrap();
        assert!(!c.is_fullscreen());
    }

    #[test]
    fn garbled_line_is_reported_and_session_goes_on() {
        let mut c = controller();
        let line = String::from_utf8_lossy(b"\xff\xfe\n").into_owned();
        assert!(parse_command(&line).is_err());
        assert!(handle_line(&mut c, &line).unwrap());
        assert!(handle_line(&mut c, "start\n").unwrap());
        assert!(c.is_running());
        assert!(!handle_line(&mut c, "quit").unwrap());
    }

    #[test]
    fn toggle_and_no_op_commands_emit_nothing_extra() {
        let mut c = controller();
        assert!(execute(&mut c, SessionCommand::Pause).unwrap().is_empty());
        assert_eq!(execute(&mut c, SessionCommand::Toggle).unwrap().len(), 1);
        assert!(c.is_running());
        assert!(execute(&mut c, SessionCommand::Start).unwrap().is_empty());
        assert_eq!(execute(&mut c, SessionCommand::Toggle).unwrap().len(), 1);
        assert!(!c.is_running());
    }
}
