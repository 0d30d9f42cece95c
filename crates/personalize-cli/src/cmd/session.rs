use crate::output::{print_json, print_table};
use anyhow::Context;
use personalize_core::guard::{self, SubmitDecision};
use personalize_core::host::RecordingForm;
use personalize_core::mount::{Configurator, Listing, MountRegistry};
use personalize_core::wizard::{Action, Mode, Outcome};
use serde::Serialize;
use std::io::BufRead;
use std::path::{Path, PathBuf};

const MOUNT_POINT: &str = "product-form";

pub struct SessionArgs {
    pub title: String,
    pub items: Option<usize>,
    pub script: Option<PathBuf>,
    pub require_complete: bool,
}

/// One stdin line, parsed.
#[derive(Debug, PartialEq)]
enum Line {
    Act(Action),
    Submit,
    Show,
    Quit,
}

#[derive(Serialize)]
struct Step {
    action: Action,
    outcome: Outcome,
}

pub fn run(root: &Path, args: SessionArgs, json: bool) -> anyhow::Result<()> {
    let rules = super::load_rules(root)?;
    let form = RecordingForm::new();
    let mut registry = MountRegistry::new();
    let listing = Listing {
        title: args.title,
        item_count: args.items,
    };
    let configurator = registry
        .mount(MOUNT_POINT, listing, rules, form.clone())
        .context("failed to mount configurator")?;

    if !json {
        let detection = configurator.detection();
        println!(
            "Configuring {} item(s) for \"{}\" (source: {})",
            detection.count,
            configurator.listing().title,
            detection.source
        );
    }

    let mut steps = Vec::new();
    let decision = match &args.script {
        Some(path) => {
            let actions = load_script(path)?;
            for action in actions {
                let outcome = apply(configurator, action.clone(), json);
                steps.push(Step { action, outcome });
            }
            Some(configurator.attempt_submit())
        }
        None => read_lines(configurator, &mut steps, json)?,
    };
    let decision = decision.unwrap_or_else(|| guard::check(configurator.controller()));

    if json {
        print_json(&serde_json::json!({
            "instance": configurator.id(),
            "mounted_at": configurator.mounted_at(),
            "title": configurator.listing().title,
            "detection": configurator.detection(),
            "steps": steps,
            "state": configurator.state(),
            "complete": configurator.controller().is_complete(),
            "fields": configurator.fields(),
            "properties": configurator.fields().as_line_item_properties(),
            "decision": decision,
            "submissions": form.submissions(),
        }))?;
    } else {
        print_summary(configurator, &decision);
    }

    registry.dispose(MOUNT_POINT)?;

    if args.require_complete {
        if let SubmitDecision::Block { message, .. } = decision {
            anyhow::bail!("submission blocked: {message}");
        }
    }
    Ok(())
}

fn load_script(path: &Path) -> anyhow::Result<Vec<Action>> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_yaml::from_str(&data).with_context(|| format!("invalid action script {}", path.display()))
}

/// Drive the configurator from stdin until EOF or `quit`. Returns the
/// decision of the last `submit`, if any.
fn read_lines(
    configurator: &mut Configurator<RecordingForm>,
    steps: &mut Vec<Step>,
    json: bool,
) -> anyhow::Result<Option<SubmitDecision>> {
    let stdin = std::io::stdin();
    let mut last = None;
    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        let parsed = match parse_line(&line) {
            Ok(Some(parsed)) => parsed,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("warning: {e}");
                continue;
            }
        };
        match parsed {
            Line::Act(action) => {
                let outcome = apply(configurator, action.clone(), json);
                steps.push(Step { action, outcome });
            }
            Line::Submit => {
                let decision = configurator.attempt_submit();
                if !json {
                    print_decision(&decision);
                }
                last = Some(decision);
            }
            Line::Show => {
                if !json {
                    print_position(configurator);
                    super::preview::print_preview(&configurator.preview());
                }
            }
            Line::Quit => break,
        }
    }
    Ok(last)
}

fn parse_line(line: &str) -> anyhow::Result<Option<Line>> {
    let trimmed = line.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    let (cmd, rest) = match trimmed.split_once(' ') {
        Some((cmd, rest)) => (cmd, rest),
        None => (trimmed.trim_end(), ""),
    };
    let parsed = match cmd {
        "font" => Line::Act(Action::SetFont {
            key: rest.trim().to_string(),
        }),
        "color" => Line::Act(Action::SetColor {
            key: rest.trim().to_string(),
        }),
        // Text keeps its whitespace; the validator trims on save.
        "text" => Line::Act(Action::SetText {
            text: rest.to_string(),
        }),
        "next" | "save" => Line::Act(Action::SaveAndAdvance),
        "back" => Line::Act(Action::Back),
        "edit" => {
            let n: usize = rest
                .trim()
                .parse()
                .with_context(|| format!("edit expects an item number, got '{}'", rest.trim()))?;
            if n == 0 {
                anyhow::bail!("item numbers start at 1");
            }
            Line::Act(Action::EditExisting { index: n - 1 })
        }
        "submit" => Line::Submit,
        "show" => Line::Show,
        "quit" | "exit" => Line::Quit,
        other => anyhow::bail!("unknown command '{other}'"),
    };
    Ok(Some(parsed))
}

fn apply(configurator: &mut Configurator<RecordingForm>, action: Action, json: bool) -> Outcome {
    let outcome = configurator.dispatch(action);
    if !json {
        println!("{}", describe(&outcome, configurator));
    }
    outcome
}

fn describe(outcome: &Outcome, configurator: &Configurator<RecordingForm>) -> String {
    match outcome {
        Outcome::Updated => {
            let counter = configurator.preview().counter;
            format!("  updated ({counter})")
        }
        Outcome::Saved { index } => format!(
            "  saved item {}; now editing item {}",
            index + 1,
            configurator.state().current_index() + 1
        ),
        Outcome::Completed { index } => format!("  saved item {}; all items complete", index + 1),
        Outcome::Moved => format!(
            "  moved to item {}",
            configurator.state().current_index() + 1
        ),
        Outcome::Invalid { failure } => format!("  not saved: {failure} (field: {})", failure.field()),
        Outcome::Rejected { reason } => format!("  rejected: {reason}"),
    }
}

fn print_position(configurator: &Configurator<RecordingForm>) {
    let state = configurator.state();
    let item_label = &configurator.controller().rules().fields().item_label;
    match (state.mode(), state.progress_label(item_label)) {
        (Mode::AllComplete, _) => println!("All {} items complete", state.item_count()),
        (Mode::Editing, Some(label)) => println!("{label}"),
        (Mode::Editing, None) => {}
    }
}

fn print_decision(decision: &SubmitDecision) {
    match decision {
        SubmitDecision::Allow => println!("Submission: allowed"),
        SubmitDecision::Block { message, focus, .. } => {
            println!("Submission: blocked");
            println!("  {message}");
            if let Some(field) = focus {
                println!("  focus: {field}");
            }
        }
    }
}

fn print_summary(configurator: &Configurator<RecordingForm>, decision: &SubmitDecision) {
    let state = configurator.state();
    println!();
    println!(
        "Instance: {} (mounted {})",
        configurator.id(),
        configurator.mounted_at().to_rfc3339()
    );
    println!(
        "State: {} ({} of {} saved)",
        state.mode(),
        state.saved().len(),
        state.item_count()
    );

    let fields = configurator.fields();
    if fields.is_empty() {
        println!("Fields: (none)");
    } else {
        let rows = fields
            .iter()
            .map(|f| vec![f.name.clone(), f.value.clone()])
            .collect();
        print_table(&["FIELD", "VALUE"], rows);
    }
    print_decision(decision);
}
