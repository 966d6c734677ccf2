use anyhow::Context;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::{backend::CrosstermBackend, Terminal};
use skilltree::cli::{self, Command, Config};
use skilltree::input::{handle_tree_input, InputResult, TreeUiState};
use skilltree::logging;
use skilltree::skill_tree::{SkillTree, TreeLayout};
use skilltree::ui::{draw_ui, pulse::PulseTracker};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use tracing::{error, info};

/// Frame interval while idle; short enough for the click pulse to animate
const FRAME_POLL: Duration = Duration::from_millis(50);

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match cli::parse_args(&args) {
        Ok(Command::Run(config)) => config,
        Ok(Command::Version) => {
            println!("{}", cli::version_string());
            return Ok(());
        }
        Ok(Command::Help) => {
            println!("{}", cli::usage());
            return Ok(());
        }
        Ok(Command::DumpLayout) => {
            println!("{}", TreeLayout::default().to_json_pretty()?);
            return Ok(());
        }
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Run 'skilltree --help' for usage.");
            std::process::exit(1);
        }
    };

    // Logging is best effort; the tree works without it
    if let Err(e) = logging::init() {
        eprintln!("Warning: file logging disabled: {}", e);
    }

    let tree = build_tree(&config)?;
    info!(
        branches = tree.branches().len(),
        points = tree.initial_points(),
        "skill tree ready"
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, tree);

    // Restore terminal even if the loop failed
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        error!(error = %e, "skill tree exited with error");
    }
    result
}

fn build_tree(config: &Config) -> anyhow::Result<SkillTree> {
    let layout = config.load_layout().with_context(|| match &config.layout_path {
        Some(path) => format!("loading layout from {}", path.display()),
        None => "building the built-in layout".to_string(),
    })?;
    SkillTree::new(layout).context("layout rejected")
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    mut tree: SkillTree,
) -> anyhow::Result<()> {
    let mut ui = TreeUiState::new();
    let mut pulses = PulseTracker::new();
    let mut last_frame = Instant::now();

    loop {
        let now = Instant::now();
        pulses.update(now.duration_since(last_frame).as_secs_f64());
        last_frame = now;

        terminal.draw(|f| draw_ui(f, &tree, &ui, &pulses))?;

        if event::poll(FRAME_POLL)? {
            if let Event::Key(key_event) = event::read()? {
                // Windows reports key releases too
                if key_event.kind != KeyEventKind::Press {
                    continue;
                }
                match handle_tree_input(key_event, &mut tree, &mut ui, &mut pulses)? {
                    InputResult::Quit => break,
                    InputResult::Continue => {}
                }
            }
        }
    }

    info!(
        learned = tree.total_selected(),
        remaining = tree.remaining_points(),
        "session ended"
    );
    Ok(())
}
