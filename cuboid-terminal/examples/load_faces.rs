/// Example: Load a face sheet and flip through it in the terminal
///
/// Usage: cargo run --example load_faces -- path/to/faces.txt
///
/// A face sheet holds four `[face]` sections, each followed by the rows of
/// that face.

use std::env;
use std::fs;
use std::io;
use cuboid_core::sheet;
use cuboid_terminal::TerminalApp;

fn main() -> io::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <face-sheet>", args[0]);
        eprintln!("\nNo face sheet provided, using demo faces...");
        let mut app = TerminalApp::with_demo_faces()?;
        return app.run();
    }

    let sheet_path = &args[1];

    println!("Loading face sheet: {}", sheet_path);

    let text = fs::read_to_string(sheet_path)
        .map_err(|e| io::Error::new(e.kind(), format!("Failed to read face sheet: {}", e)))?;

    let faces = sheet::parse_face_sheet(&text)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("Failed to parse face sheet: {}", e)))?;

    println!(
        "Loaded {} faces ({}x{} cells)",
        faces.len(),
        faces[0].width(),
        faces[0].height()
    );
    println!("Starting carousel (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(faces)?;
    app.run()?;

    println!("Thank you for using Cuboid!");
    Ok(())
}
