use clap::{Args, Parser, Subcommand, ValueEnum};
use gpwheel::SOCKET_PATH;
use gpwheel::catalog::{BrushAsset, Catalog, Mode, PREFS_ORDER};
use gpwheel::geometry::{Insets, Point, Viewport};
use gpwheel::prefs::transfer::{export_settings, import_settings};
use gpwheel::prefs::{FileStore, Hotkey, Preferences, SettingsStore, guess_brush_tool};
use gpwheel::wheel::{self, Wheel};
use std::io::Write;
use std::os::unix::net::UnixStream;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "gpwheel", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Open the wheel at the pointer.
    Show,
    /// Close the wheel
    Hide,
    /// Tell the overlay which mode the host is in
    Mode { mode: Mode },
    /// Tell the overlay whether there is something to edit
    Subject { state: Toggle },
    /// Tell the overlay which brush the host has active
    Brush {
        library_type: String,
        library: String,
        path: String,
    },
    /// Print the wheel layout as JSON
    Layout(WheelArgs),
    /// Print what the wheel resolves at a pointer position, as JSON
    Hit {
        #[command(flatten)]
        wheel: WheelArgs,
        pointer_x: f64,
        pointer_y: f64,
    },
    /// Sketch where each mode appears in the wheel
    Preview,
    /// Inspect or change preferences
    Prefs {
        #[command(subcommand)]
        command: PrefsCommand,
    },
    /// Show or set the shortcut that opens the wheel
    Hotkey(HotkeyArgs),
}

#[derive(Subcommand, Debug, Clone)]
enum PrefsCommand {
    /// Print the preferences file location
    Path,
    /// Print modes, tools and settings
    Show,
    /// Write preferences to a JSON file
    Export { file: PathBuf },
    /// Replace preferences with a JSON file
    Import { file: PathBuf },
    /// Restore defaults
    Reset,
    Enable { mode: Mode, tool: usize },
    Disable { mode: Mode, tool: usize },
    /// Move a mode one place up or down the wheel order
    Move { mode: Mode, direction: Direction },
    /// Use a brush asset for one of the brush tools
    LinkBrush {
        mode: Mode,
        library_type: String,
        library: String,
        path: String,
        /// Tool index; guessed from the brush name when omitted
        #[arg(long)]
        tool: Option<usize>,
    },
    /// Show the hovered mode or tool name in the middle of the wheel
    Hints { state: Toggle },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Toggle {
    On,
    Off,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Direction {
    Up,
    Down,
}

#[derive(Args, Debug, Clone)]
struct WheelArgs {
    #[arg(long, default_value_t = 1920.0)]
    width: f64,
    #[arg(long, default_value_t = 1080.0)]
    height: f64,
    /// Wheel center; defaults to the middle of the viewport
    #[arg(short)]
    x: Option<f64>,
    #[arg(short)]
    y: Option<f64>,
    #[arg(long, default_value_t = 1.0)]
    scale: f64,
    /// Occluded margins as LEFT,RIGHT,TOP,BOTTOM
    #[arg(long, value_delimiter = ',', num_args = 4)]
    insets: Option<Vec<f64>>,
}

#[derive(Args, Debug, Clone)]
struct HotkeyArgs {
    /// Key name, e.g. F8 or W
    key: Option<String>,
    #[arg(long)]
    ctrl: bool,
    #[arg(long)]
    alt: bool,
    #[arg(long)]
    shift: bool,
    #[arg(long)]
    oskey: bool,
    /// Go back to the default shortcut
    #[arg(long, conflicts_with = "key")]
    reset: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let catalog = Arc::new(Catalog::builtin()?);

    match cli.command {
        Commands::Show => send_command("show"),
        Commands::Hide => send_command("hide"),
        Commands::Mode { mode } => send_command(&format!("mode {}", mode)),
        Commands::Subject { state } => send_command(match state {
            Toggle::On => "subject on",
            Toggle::Off => "subject off",
        }),
        Commands::Brush {
            library_type,
            library,
            path,
        } => {
            let library = if library.is_empty() { "-" } else { &library };
            send_command(&format!("brush {} {} {}", library_type, library, path))
        }
        Commands::Layout(args) => {
            let wheel = layout(&catalog, &args)?;
            println!("{}", serde_json::to_string_pretty(&wheel)?);
            Ok(())
        }
        Commands::Hit {
            wheel: args,
            pointer_x,
            pointer_y,
        } => {
            let wheel = layout(&catalog, &args)?;
            let hit = wheel.hit(Point::new(pointer_x, pointer_y));
            println!("{}", serde_json::to_string(&hit)?);
            Ok(())
        }
        Commands::Preview => {
            let prefs = FileStore::open_default(catalog.clone())?.load()?;
            print_preview(&prefs.active_modes(&catalog));
            Ok(())
        }
        Commands::Prefs { command } => prefs(catalog, command),
        Commands::Hotkey(args) => hotkey(catalog, args),
    }
}

fn layout(catalog: &Arc<Catalog>, args: &WheelArgs) -> anyhow::Result<Wheel> {
    let prefs = FileStore::open_default(catalog.clone())?.load()?;
    let insets = match args.insets.as_deref() {
        Some(&[left, right, top, bottom]) => Insets::new(left, right, top, bottom),
        Some(other) => anyhow::bail!("Expected 4 insets, got {}", other.len()),
        None => Insets::from_regions(&[]),
    };
    let viewport = Viewport::new(args.width, args.height, insets);
    let anchor = Point::new(
        args.x.unwrap_or(args.width / 2.0),
        args.y.unwrap_or(args.height / 2.0),
    );
    Ok(wheel::arrange(
        &prefs.active_modes(catalog),
        anchor,
        &viewport,
        args.scale,
    )?)
}

fn print_preview(active: &[wheel::ActiveMode]) {
    let grid = wheel::preview_grid(active);
    let width = grid
        .iter()
        .flatten()
        .map(|cell| cell.chars().count())
        .max()
        .unwrap_or(0);
    for row in grid {
        let line: Vec<_> = row
            .iter()
            .map(|cell| format!("{:^width$}", cell, width = width))
            .collect();
        println!("{}", line.join("  ").trim_end());
    }
}

fn prefs(catalog: Arc<Catalog>, command: PrefsCommand) -> anyhow::Result<()> {
    let store = FileStore::open_default(catalog.clone())?;

    match command {
        PrefsCommand::Path => println!("{}", store.path().display()),
        PrefsCommand::Show => print_prefs(&catalog, &store.load()?),
        PrefsCommand::Export { file } => export_settings(&store.load()?, &catalog, &file)?,
        PrefsCommand::Import { file } => store.save(&import_settings(&catalog, &file)?)?,
        PrefsCommand::Reset => {
            store.reset()?;
        }
        PrefsCommand::Enable { mode, tool } | PrefsCommand::Disable { mode, tool } => {
            let enabled = matches!(command, PrefsCommand::Enable { .. });
            let mut prefs = store.load()?;
            if catalog.tool(mode, tool).is_none() {
                anyhow::bail!("Mode '{}' has no tool {}", mode, tool);
            }
            prefs.set_enabled(mode, tool, enabled);
            store.save(&prefs)?;
        }
        PrefsCommand::Move { mode, direction } => {
            let mut prefs = store.load()?;
            let index = prefs
                .mode_order
                .iter()
                .position(|&m| m == mode)
                .ok_or_else(|| anyhow::anyhow!("Mode '{}' is not in the wheel order", mode))?;
            prefs.move_mode(index, matches!(direction, Direction::Up));
            store.save(&prefs)?;
            print_preview(&prefs.active_modes(&catalog));
        }
        PrefsCommand::LinkBrush {
            mode,
            library_type,
            library,
            path,
            tool,
        } => {
            let asset = BrushAsset::new(library_type, library, path);
            let tool = tool
                .or_else(|| guess_brush_tool(&catalog, mode, &asset))
                .ok_or_else(|| {
                    anyhow::anyhow!("Could not tell which tool '{}' belongs to", asset.path)
                })?;
            let mut prefs = store.load()?;
            prefs.link_brush(&catalog, mode, tool, asset)?;
            store.save(&prefs)?;
        }
        PrefsCommand::Hints { state } => {
            let mut prefs = store.load()?;
            prefs.show_hints = matches!(state, Toggle::On);
            store.save(&prefs)?;
        }
    }
    Ok(())
}

fn print_prefs(catalog: &Catalog, prefs: &Preferences) {
    let order: Vec<_> = prefs.mode_order.iter().map(|m| m.to_string()).collect();
    println!("Mode order: {}", order.join(", "));
    println!("Hints: {}", if prefs.show_hints { "on" } else { "off" });
    println!("Shortcut: {}", prefs.hotkey);

    for mode in PREFS_ORDER {
        let entry = catalog.mode(mode);
        println!("\n{}", entry.name);
        for &index in &entry.tool_order {
            let Some(tool) = catalog.tool(mode, index) else {
                continue;
            };
            let mark = if prefs.is_enabled(catalog, mode, index) {
                "x"
            } else {
                " "
            };
            match prefs
                .tool_asset(catalog, mode, index)
                .filter(|_| tool.is_asset_only())
            {
                Some(asset) => println!(
                    "  [{}] {:>2} {} ({})",
                    mark,
                    index,
                    tool.display_name(true),
                    asset.path.name()
                ),
                None => println!("  [{}] {:>2} {}", mark, index, tool.name),
            }
        }
    }
}

fn hotkey(catalog: Arc<Catalog>, args: HotkeyArgs) -> anyhow::Result<()> {
    let store = FileStore::open_default(catalog)?;
    let mut prefs = store.load()?;

    if args.reset {
        prefs.hotkey = Hotkey::default();
    } else if let Some(key) = args.key {
        prefs.hotkey = Hotkey {
            key,
            alt: args.alt,
            ctrl: args.ctrl,
            shift: args.shift,
            oskey: args.oskey,
            user_set: true,
        };
    } else {
        println!("{}", prefs.hotkey);
        return Ok(());
    }

    store.save(&prefs)?;
    println!("{}", prefs.hotkey);
    Ok(())
}

fn send_command(cmd: &str) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to the gpwheel overlay at {}: {}. Is gpwheel-overlay running?",
            SOCKET_PATH,
            e
        )
    })?;

    writeln!(stream, "{}", cmd)?;
    Ok(())
}
