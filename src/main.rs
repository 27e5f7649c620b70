use std::io::{self, Read};

use layout_fixer::{
    config::{self, Config},
    correction::CorrectionEngine,
    domain::outcome::ActionOutcome,
    surface::{Page, StringSurface},
    util::tracing::init_tracing,
};

#[derive(Copy, Clone, Debug)]
enum Mode {
    Word,
    All,
}

fn parse_args() -> (Mode, Option<String>) {
    let mut args = std::env::args().skip(1).peekable();
    let mode = match args.peek().map(String::as_str) {
        Some("word") => {
            args.next();
            Mode::Word
        }
        Some("all") => {
            args.next();
            Mode::All
        }
        _ => Mode::All,
    };
    let rest: Vec<String> = args.collect();
    let text = (!rest.is_empty()).then(|| rest.join(" "));
    (mode, text)
}

fn main() -> io::Result<()> {
    init_tracing();

    let config = config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "config load failed, using defaults");
        Config::default()
    });

    let (mode, text) = parse_args();
    let text = match text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf.trim_end_matches(['\r', '\n']).to_owned()
        }
    };

    let mut engine = CorrectionEngine::new(&config);
    let mut page = Page::new();
    let id = page.bind(Box::new(StringSurface::plain(text)));
    page.focus(id);

    let skipped = match mode {
        Mode::Word => engine.fix_current_word(&mut page).skip_reason(),
        Mode::All => match engine.fix_all(&mut page) {
            ActionOutcome::Applied(fix) => {
                tracing::debug!(count = fix.count, confidence = fix.confidence, "shell fix all");
                None
            }
            ActionOutcome::Skipped(reason) => Some(reason),
        },
    };
    if let Some(reason) = skipped {
        eprintln!("unchanged: {reason}");
    }

    if let Some(surface) = page.get(id) {
        println!("{}", surface.text());
    }
    Ok(())
}
