use std::io::{BufRead, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use derma_core::constants::{AUTO_FILE_NO_ENV, FILE_NO_PREFIX_ENV, OUTPUT_FORMAT_ENV};
use derma_core::{FormStore, IntakeConfig, Update};

/// What the loop does after a line has been handled.
#[derive(Debug, PartialEq)]
enum Step {
    Continue,
    /// Print this text on stdout, then continue.
    Print(String),
    Quit,
}

/// Handle one input line.
///
/// Lines are either a control word (`submit`, `show`, `reset`, `quit`) or a JSON update
/// message such as `{"op": "set_field", "key": "name", "value": "Jane Roe"}`.
fn handle_line(store: &mut FormStore, config: &IntakeConfig, line: &str) -> anyhow::Result<Step> {
    let format = config.output_format();
    match line.trim() {
        "" => Ok(Step::Continue),
        "quit" | "exit" => Ok(Step::Quit),
        "show" => Ok(Step::Print(format.render(store.record())?)),
        "submit" => Ok(Step::Print(format.render(&store.submit())?)),
        "reset" => {
            store.reset(config)?;
            Ok(Step::Continue)
        }
        message => {
            let update: Update = serde_json::from_str(message)?;
            store.apply(&update)?;
            Ok(Step::Continue)
        }
    }
}

/// Feed every input line to the form until `quit` or end of input.
///
/// Lines that are not valid UTF-8 are decoded lossily, so they fail as updates and are
/// reported like any other bad line. Only I/O failures end the loop early.
fn run_events<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    store: &mut FormStore,
    config: &IntakeConfig,
) -> std::io::Result<()> {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }
        let line = String::from_utf8_lossy(&buf);
        match handle_line(store, config, &line) {
            Ok(Step::Continue) => {}
            Ok(Step::Print(text)) => {
                writeln!(output, "{text}")?;
                output.flush()?;
            }
            Ok(Step::Quit) => return Ok(()),
            Err(e) => eprintln!("Error: {e}"),
        }
    }
}

/// Entry point for the interactive intake form.
///
/// Reads one event per stdin line and applies it to a single in-memory form. A line that
/// fails to parse or apply is reported on stderr and the form is left as it was.
///
/// # Environment Variables
/// - `DERMA_FILE_NO_PREFIX`: prefix for generated file numbers (default: "PT")
/// - `DERMA_OUTPUT_FORMAT`: "yaml" or "json" (default: "yaml")
/// - `DERMA_AUTO_FILE_NO`: fill in a file number when a form opens (default: true)
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("derma=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = IntakeConfig::from_env_values(
        std::env::var(FILE_NO_PREFIX_ENV).ok(),
        std::env::var(OUTPUT_FORMAT_ENV).ok(),
        std::env::var(AUTO_FILE_NO_ENV).ok(),
    )?;
    let mut store = FormStore::open(&config)?;

    tracing::info!(
        file_no = store.record().text("fileNo"),
        format = %config.output_format(),
        "++ Intake form opened"
    );

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_events(stdin.lock(), stdout.lock(), &mut store, &config)?;

    tracing::info!(revision = store.revision(), "intake form closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use derma_core::OutputFormat;

    fn setup() -> (FormStore, IntakeConfig) {
        let config = IntakeConfig::new("PT".into(), OutputFormat::Json, false).expect("valid");
        let store = FormStore::open(&config).expect("opens");
        (store, config)
    }

    #[test]
    fn test_update_lines_are_applied() {
        let (mut store, config) = setup();
        let step = handle_line(
            &mut store,
            &config,
            r#"{"op": "set_field", "key": "name", "value": "Jane Roe"}"#,
        )
        .expect("valid line");
        assert_eq!(step, Step::Continue);
        assert_eq!(store.record().text("name"), "Jane Roe");
    }

    #[test]
    fn test_bad_line_leaves_form_unchanged() {
        let (mut store, config) = setup();
        let before = store.record().clone();
        assert!(handle_line(&mut store, &config, "{not json").is_err());
        assert!(handle_line(&mut store, &config, r#"{"op": "remove", "list": "nope", "index": 0}"#).is_err());
        assert_eq!(store.record(), &before);
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_control_words() {
        let (mut store, config) = setup();
        handle_line(&mut store, &config, r#"{"op": "set_field", "key": "phone", "value": "5550100"}"#)
            .expect("valid");

        match handle_line(&mut store, &config, "submit").expect("submits") {
            Step::Print(text) => assert!(text.contains("Missing Information"), "{text}"),
            other => panic!("unexpected step: {other:?}"),
        }
        match handle_line(&mut store, &config, " show ").expect("shows") {
            Step::Print(text) => assert!(text.contains("5550100"), "{text}"),
            other => panic!("unexpected step: {other:?}"),
        }

        assert_eq!(handle_line(&mut store, &config, "reset").expect("resets"), Step::Continue);
        assert_eq!(store.record().text("phone"), "");
        assert_eq!(handle_line(&mut store, &config, "quit").expect("quits"), Step::Quit);
    }

    #[test]
    fn test_invalid_utf8_line_is_skipped() {
        let (mut store, config) = setup();
        let mut input = Vec::new();
        input.extend_from_slice(b"{\"op\": \"set_field\", \"key\": \"name\", \"value\": \"A\"}\n");
        input.extend_from_slice(b"\xff\xfe\n");
        input.extend_from_slice(b"{\"op\": \"set_field\", \"key\": \"phone\", \"value\": \"5550100\"}\n");
        input.extend_from_slice(b"show\n");
        let mut output = Vec::new();

        run_events(input.as_slice(), &mut output, &mut store, &config).expect("loop runs");

        assert_eq!(store.record().text("name"), "A");
        assert_eq!(store.record().text("phone"), "5550100");
        assert_eq!(store.revision(), 2);
        let printed = String::from_utf8(output).expect("utf-8 output");
        assert!(printed.contains("5550100"), "{printed}");
    }

    #[test]
    fn test_loop_stops_at_quit() {
        let (mut store, config) = setup();
        let input = b"quit\n{\"op\": \"set_field\", \"key\": \"name\", \"value\": \"A\"}\n";
        let mut output = Vec::new();

        run_events(&input[..], &mut output, &mut store, &config).expect("loop runs");

        assert_eq!(store.revision(), 0);
        assert!(output.is_empty());
    }
}
