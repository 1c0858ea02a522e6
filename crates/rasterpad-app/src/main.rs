//! Main application entry point.

fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Starting RasterPad");

    let config = rasterpad_app::AppConfig::from_args(std::env::args().skip(1))?;
    let report = rasterpad_app::App::run(&config)?;
    println!("{report}");
    Ok(())
}
