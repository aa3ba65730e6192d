use std::io::{stdout, BufWriter, Write};

use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use log::{info, warn};

use simple_stg::config::{GameConfig, WINDOW_TITLE};
use simple_stg::display::TerminalCanvas;
use simple_stg::driver::{FrameDriver, FrameStatus};
use simple_stg::terminal_input::TerminalInput;

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    // The game owns the terminal; redirect stderr to read the log.
    env_logger::init();

    let config = GameConfig::from_env();
    info!("starting {} at {} fps", WINDOW_TITLE, config.fps);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(terminal::SetTitle(WINDOW_TITLE))?;

    // Key releases make held keys exact; without them input uses hold windows.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    if !keyboard_enhanced {
        warn!("no key-release events; falling back to hold-window input");
    }

    let result = run(&mut out, &config, keyboard_enhanced);

    // Restore the terminal whether or not the game loop failed.
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(out: &mut W, config: &GameConfig, keyboard_enhanced: bool) -> std::io::Result<()> {
    let mut input = TerminalInput::spawn(keyboard_enhanced, config.fps);
    let mut canvas = TerminalCanvas::new(out, config.field, config.frame_duration())?;
    let mut driver = FrameDriver::new(config);

    while !input.poll_should_close() {
        let snapshot = input.poll();
        if driver.frame(snapshot, &mut canvas)? == FrameStatus::Exit {
            break;
        }
    }

    info!("exiting after {} frames", driver.frame_count());
    Ok(())
}
