//! Dry-run demo: decode an fSpy project and show what an import would do.
//!
//! Usage: `cargo run --example demo -- path/to/project.fspy`

use fspy_import::*;

fn main() -> Result<()> {
    init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "project.fspy".to_string());

    let mut scene = RecordingScene::new();
    let (project, result) = import_file(
        &mut scene,
        Conventions::y_up(),
        &path,
        &ImportOptions::default(),
    )?;

    println!("{}", ImportReport::from_project(&project, &result.pose));
    println!();
    println!("Scene calls:");
    for call in &scene.calls {
        println!("  {call:?}");
    }
    Ok(())
}
