//! Marquee demo: a continuously-scrolling strip of labels.
//!
//! Hover (move the mouse onto the strip) pauses it, moving off resumes,
//! losing terminal focus pauses, arrow keys nudge the track. Press `q`
//! or Esc to quit.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEventKind};

use ui_carousel::{
    mount_carousel, AutoplayMode, AutoplayOptions, CarouselEvent, CarouselOptions, MountOutcome,
    TerminalSlide, TerminalTrack,
};

fn main() -> io::Result<()> {
    env_logger::init();

    let slides = vec![
        TerminalSlide::new("[ rust ]", 10),
        TerminalSlide::new("[ carousel ]", 14),
        TerminalSlide::new("[ marquee ]", 13),
        TerminalSlide::new("[ demo ]", 10),
    ];
    let width = crossterm::terminal::size().map(|(w, _)| w).unwrap_or(80);
    let track = TerminalTrack::new(slides, 2.0, width as f32, 2);

    let options = CarouselOptions {
        autoplay: AutoplayOptions {
            mode: AutoplayMode::Marquee,
            speed: 12.0,
            ..AutoplayOptions::enabled()
        },
        ..CarouselOptions::interactive()
    };

    let mut carousel = match mount_carousel(track, options) {
        MountOutcome::Mounted(carousel) => carousel,
        MountOutcome::Skipped { reason, .. } => {
            eprintln!("nothing to run: {reason}");
            return Ok(());
        }
    };

    TerminalTrack::enter()?;
    let epoch = Instant::now();
    let result = (|| loop {
        if let Some(event) = TerminalTrack::poll_event(Duration::from_millis(16))? {
            if let Event::Key(key) = &event {
                if key.kind == KeyEventKind::Press
                    && matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
                {
                    return Ok(());
                }
            }
            if let Some(converted) = carousel.host_mut().convert_event(&event) {
                carousel.dispatch(converted);
            }
        }
        carousel.tick(epoch.elapsed().as_millis() as u64);
        carousel.host().render()?;
    })();
    TerminalTrack::leave()?;
    result
}
