use clap::{Arg, ArgAction, Command, value_parser};

fn id_arg() -> Arg {
    Arg::new("id")
        .help("Window id (see `retrodesk list`)")
        .required(true)
}

pub fn build_cli() -> Command {
    Command::new("retrodesk")
        .about("Drive the retrodesk window manager from a terminal")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("open")
                .about("Open a built-in applet, or focus it if already open")
                .arg(
                    Arg::new("applet")
                        .help("Applet id (see `retrodesk applets`)")
                        .required(true),
                ),
        )
        .subcommand(Command::new("close").about("Close a window").arg(id_arg()))
        .subcommand(
            Command::new("focus")
                .about("Bring a window to the front, un-minimizing it")
                .arg(id_arg()),
        )
        .subcommand(Command::new("minimize").about("Minimize a window").arg(id_arg()))
        .subcommand(
            Command::new("maximize")
                .about("Toggle a window between maximized and restored")
                .arg(id_arg()),
        )
        .subcommand(
            Command::new("move")
                .about("Move a window's top-left corner")
                .arg(id_arg())
                .arg(
                    Arg::new("x")
                        .required(true)
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(i32)),
                )
                .arg(
                    Arg::new("y")
                        .required(true)
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(i32)),
                ),
        )
        .subcommand(
            Command::new("resize")
                .about("Resize a window (minimum 200x100)")
                .arg(id_arg())
                .arg(
                    Arg::new("width")
                        .required(true)
                        .value_parser(value_parser!(u32)),
                )
                .arg(
                    Arg::new("height")
                        .required(true)
                        .value_parser(value_parser!(u32)),
                ),
        )
        .subcommand(
            Command::new("rename")
                .about("Change a window's title")
                .arg(id_arg())
                .arg(Arg::new("title").required(true)),
        )
        .subcommand(
            Command::new("list")
                .about("List open windows")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output as JSON")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("visible")
                        .long("visible")
                        .help("Only show windows that are not minimized")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("applets").about("List built-in applets"))
        .subcommand(Command::new("reset").about("Delete the saved window state"))
}
