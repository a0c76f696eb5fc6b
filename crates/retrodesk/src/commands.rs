use clap::ArgMatches;
use tracing::{error, info};

use retrodesk_config::{DesktopConfig, load_config};
use retrodesk_core::{
    Applet, Command, DesktopStore, Event, FileStorage, Store, Viewport, Window, WindowManager,
    WindowUpdate, log_desktop_error, register_builtin_applets,
};

use crate::table;

type CliResult = Result<(), Box<dyn std::error::Error>>;

pub fn run_command(matches: &ArgMatches) -> CliResult {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            log_desktop_error("cli.config_load_failed", &e, "Failed to load config");
            return Err(e.into());
        }
    };

    match matches.subcommand() {
        Some(("applets", _)) => {
            handle_applets_command();
            Ok(())
        }
        Some((name, sub_matches)) => {
            let mut store = open_store(&config);
            match name {
                "open" => handle_open_command(&mut store, sub_matches),
                "close" => handle_window_command(&mut store, sub_matches, |id| {
                    Command::CloseWindow { id }
                }),
                "focus" => handle_window_command(&mut store, sub_matches, |id| {
                    Command::FocusWindow { id }
                }),
                "minimize" => handle_window_command(&mut store, sub_matches, |id| {
                    Command::MinimizeWindow { id }
                }),
                "maximize" => handle_window_command(&mut store, sub_matches, |id| {
                    Command::MaximizeWindow { id }
                }),
                "move" => handle_move_command(&mut store, sub_matches),
                "resize" => handle_resize_command(&mut store, sub_matches),
                "rename" => handle_rename_command(&mut store, sub_matches),
                "list" => handle_list_command(&store, sub_matches),
                "reset" => {
                    report(apply(&mut store, Command::ClearState));
                    Ok(())
                }
                _ => {
                    error!(event = "cli.command_unknown", command = name);
                    Err("Unknown command".into())
                }
            }
        }
        None => {
            error!(event = "cli.command_missing");
            Err("No command given".into())
        }
    }
}

/// Build the file-backed desktop and restore whatever the last run saved.
fn open_store(config: &DesktopConfig) -> DesktopStore {
    let storage = FileStorage::from_config(&config.state);
    info!(
        event = "cli.store_opened",
        state_dir = %storage.dir().display()
    );

    let mut manager = WindowManager::new(storage).with_viewport(Viewport::from(&config.viewport));
    register_builtin_applets(&mut manager);

    let mut store = DesktopStore::new(manager);
    apply(&mut store, Command::RestoreState);
    store
}

fn apply(store: &mut DesktopStore, cmd: Command) -> Vec<Event> {
    match store.dispatch(cmd) {
        Ok(events) => events,
        Err(never) => match never {},
    }
}

fn report(events: Vec<Event>) {
    for event in events {
        println!("{}", event);
    }
}

fn required_id(matches: &ArgMatches) -> Result<String, Box<dyn std::error::Error>> {
    matches
        .get_one::<String>("id")
        .cloned()
        .ok_or_else(|| "Window id is required".into())
}

/// Run a command against one window, telling the user when the id matched
/// nothing.
fn dispatch_for_window(store: &mut DesktopStore, id: &str, cmd: Command) {
    let known = store.manager().window(id).is_some();
    let events = apply(store, cmd);

    if events.is_empty() {
        if known {
            println!("No change to '{}'.", id);
        } else {
            println!("No window with id '{}'.", id);
            info!(event = "cli.window_not_found", window_id = id);
        }
    }
    report(events);
}

fn handle_window_command(
    store: &mut DesktopStore,
    matches: &ArgMatches,
    build: impl FnOnce(String) -> Command,
) -> CliResult {
    let id = required_id(matches)?;
    dispatch_for_window(store, &id, build(id.clone()));
    Ok(())
}

fn handle_open_command(store: &mut DesktopStore, matches: &ArgMatches) -> CliResult {
    let name = matches
        .get_one::<String>("applet")
        .ok_or("Applet name is required")?;

    let applet: Applet = match name.parse() {
        Ok(applet) => applet,
        Err(e) => {
            eprintln!("{}", e);
            error!(event = "cli.open_failed", applet = %name, error = %e);
            return Err(e.into());
        }
    };

    info!(event = "cli.open_started", applet = %applet);
    report(apply(store, Command::OpenApplet(applet)));
    Ok(())
}

fn handle_move_command(store: &mut DesktopStore, matches: &ArgMatches) -> CliResult {
    let id = required_id(matches)?;
    let x = *matches.get_one::<i32>("x").ok_or("x is required")?;
    let y = *matches.get_one::<i32>("y").ok_or("y is required")?;

    dispatch_for_window(store, &id, Command::MoveWindow { id: id.clone(), x, y });
    Ok(())
}

fn handle_resize_command(store: &mut DesktopStore, matches: &ArgMatches) -> CliResult {
    let id = required_id(matches)?;
    let width = *matches.get_one::<u32>("width").ok_or("width is required")?;
    let height = *matches
        .get_one::<u32>("height")
        .ok_or("height is required")?;

    dispatch_for_window(
        store,
        &id,
        Command::ResizeWindow {
            id: id.clone(),
            width,
            height,
        },
    );
    Ok(())
}

fn handle_rename_command(store: &mut DesktopStore, matches: &ArgMatches) -> CliResult {
    let id = required_id(matches)?;
    let title = matches
        .get_one::<String>("title")
        .cloned()
        .ok_or("title is required")?;

    dispatch_for_window(
        store,
        &id,
        Command::UpdateWindow {
            id: id.clone(),
            update: WindowUpdate::title(title),
        },
    );
    Ok(())
}

fn handle_list_command(store: &DesktopStore, matches: &ArgMatches) -> CliResult {
    let json_output = matches.get_flag("json");
    let visible_only = matches.get_flag("visible");

    info!(
        event = "cli.list_started",
        json_output = json_output,
        visible_only = visible_only
    );

    let manager = store.manager();
    let windows: Vec<&Window> = if visible_only {
        manager.visible_windows()
    } else {
        manager.windows().iter().collect()
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&windows)?);
    } else if windows.is_empty() {
        println!("No open windows.");
    } else {
        table::print_windows_table(&windows, manager.active_window_id());
    }

    info!(event = "cli.list_completed", count = windows.len());
    Ok(())
}

fn handle_applets_command() {
    println!("Built-in applets:");
    table::print_applets_table(&Applet::ALL);
}
