use anyhow::Result;

mod app;
mod audio;
mod core;
mod error;
mod messaging;

fn main() -> Result<()> {
    env_logger::init();
    println!("keywave -- monophonic ADSR keyboard synthesizer");

    let mut app = app::SynthApp::new()?;
    app.run()
}
