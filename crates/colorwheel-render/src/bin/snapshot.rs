//! Render the color wheel to a PNG and optionally sample a point (native).
//!
//! ```text
//! colorwheel-snapshot [--config options.json] [--pick X,Y] [output.png]
//! ```
//!
//! `--pick` takes coordinates relative to the wheel's top-left corner and
//! logs which wedge they fall in.

use colorwheel_core::{
    ClickOutcome, ColorWheelPicker, PickerOptions, PointerClick, RasterSurface, SelectorOptions, wedge_at,
};
use colorwheel_render::MemoryHost;
use kurbo::{Point, Rect};
use std::path::PathBuf;
use std::process::ExitCode;

struct Args {
    config: Option<PathBuf>,
    pick: Option<(f64, f64)>,
    output: PathBuf,
}

fn parse_args() -> Result<Args, String> {
    let mut config = None;
    let mut pick = None;
    let mut output = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().ok_or("--config needs a path")?;
                config = Some(PathBuf::from(path));
            }
            "--pick" => {
                let value = args.next().ok_or("--pick needs X,Y")?;
                let (x, y) = value.split_once(',').ok_or("--pick expects X,Y")?;
                let x = x.trim().parse::<f64>().map_err(|e| format!("Bad x: {}", e))?;
                let y = y.trim().parse::<f64>().map_err(|e| format!("Bad y: {}", e))?;
                pick = Some((x, y));
            }
            _ if output.is_none() => output = Some(PathBuf::from(arg)),
            _ => return Err(format!("Unexpected argument: {}", arg)),
        }
    }

    Ok(Args {
        config,
        pick,
        output: output.unwrap_or_else(|| PathBuf::from("colorwheel.png")),
    })
}

fn run(args: Args) -> Result<(), String> {
    let mut selector_options = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
            SelectorOptions::from_json(&json).map_err(|e| format!("Invalid config: {}", e))?
        }
        None => SelectorOptions::default(),
    };
    selector_options.parent.get_or_insert_with(|| "#swatch".to_string());
    selector_options.target.get_or_insert_with(|| "#preview".to_string());

    let mut host = MemoryHost::new();
    host.add_div("swatch", Rect::new(0.0, 0.0, 30.0, 30.0));
    host.add_div("preview", Rect::new(0.0, 40.0, 30.0, 70.0));

    let options: PickerOptions<MemoryHost> = selector_options.into_options();
    let mut picker = ColorWheelPicker::new(host, options).map_err(|e| e.to_string())?;

    picker.handle_click(&PointerClick::on_container(15.0, 15.0));
    let drawn = picker.flush_draws();
    log::info!("Drew {} wedges", drawn);

    let surface = picker.surface().ok_or("Wheel surface was not created")?;
    surface.save_png(&args.output).map_err(|e| e.to_string())?;
    log::info!("Wrote {}", args.output.display());

    if let Some((x, y)) = args.pick {
        if let Some(config) = picker.config() {
            match wedge_at(config.size, config.sections.len(), Point::new(x, y)) {
                Some(index) => log::info!("Picking wedge {} of {}", index, config.sections.len()),
                None => log::warn!("({}, {}) is outside the ring; the sample will be transparent", x, y),
            }
        }
        let origin = surface.bounds().origin();
        let click = PointerClick::on_surface(origin.x + x, origin.y + y);
        if let ClickOutcome::Picked(color) = picker.handle_click(&click) {
            println!("rgb: {}", color);
            println!("hex: {}", color.to_hex());
            if let Some(range) = picker.range(colorwheel_core::color::DEFAULT_RANGE_STEP) {
                println!("range: {}", range.join(" "));
            }
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let result = parse_args().and_then(run);
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("colorwheel-snapshot: {}", e);
            ExitCode::FAILURE
        }
    }
}
