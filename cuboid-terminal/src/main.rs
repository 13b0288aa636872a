/// Cuboid Terminal Demo - Four-faced Cube Carousel
///
/// Swipe between the faces of a cube in the terminal.
/// Controls:
///   - Mouse drag left/right: Flip to the previous/next face
///   - Left/Right or H/L: Flip to the previous/next face
///   - Q/ESC: Quit

use std::io;
use cuboid_terminal::TerminalApp;

fn main() -> io::Result<()> {
    // Logs go to stderr; keep them quiet unless asked so the screen stays clean
    env_logger::builder()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    println!("Cuboid Terminal Carousel - Loading...");

    let mut app = TerminalApp::with_demo_faces()?;

    println!("Starting carousel (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    app.run()?;

    println!("Thank you for using Cuboid!");
    Ok(())
}
