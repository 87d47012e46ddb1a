use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};
use taskboard::model::{Column, Priority};
use taskboard::output::Format;

#[derive(Parser)]
#[command(
    name = "taskboard",
    version,
    about = "Kanban-style task board for the terminal"
)]
struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value = "json")]
    format: Format,
    /// Shorthand for --format pretty
    #[arg(long, global = true, hide = true)]
    pretty: bool,
    /// Log filter used when RUST_LOG is unset (e.g. "info", "taskboard=debug")
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new .taskboard/ directory here
    Init,
    /// Log in with the configured credential
    Login {
        /// Account email
        email: String,
        /// Account password; read from the first line of stdin when omitted
        #[arg(long)]
        password: Option<String>,
        /// Keep the session across reboots
        #[arg(long)]
        remember: bool,
    },
    /// End the current session
    Logout,
    /// Show the current session
    Whoami,
    /// Create a new task
    Add {
        /// Task title (at least 3 characters)
        title: String,
        /// Task description
        #[arg(long, short)]
        description: Option<String>,
        /// Task priority (default: medium)
        #[arg(long, value_enum, ignore_case = true)]
        priority: Option<Priority>,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<NaiveDate>,
        /// Tags to attach (comma-separated)
        #[arg(long, value_delimiter = ',')]
        tag: Vec<String>,
        /// Starting column (default: todo)
        #[arg(long, value_enum, ignore_case = true)]
        column: Option<Column>,
    },
    /// Edit task fields
    Edit {
        /// Task ID or unique prefix
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New description
        #[arg(long, short)]
        description: Option<String>,
        /// New priority
        #[arg(long, value_enum, ignore_case = true)]
        priority: Option<Priority>,
        /// New due date (YYYY-MM-DD)
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<NaiveDate>,
        /// Remove the due date
        #[arg(long)]
        clear_due: bool,
        /// Replace tags (comma-separated)
        #[arg(long, value_delimiter = ',')]
        tag: Option<Vec<String>>,
        /// New column
        #[arg(long, value_enum, ignore_case = true)]
        column: Option<Column>,
    },
    /// Delete a task
    Delete {
        /// Task ID or unique prefix
        id: String,
    },
    /// Move a task to another column
    Move {
        /// Task ID or unique prefix
        id: String,
        /// Target column
        #[arg(value_enum, ignore_case = true)]
        column: Column,
    },
    /// Drag a task over a column and drop it there
    Drag {
        /// Task ID or unique prefix
        id: String,
        /// Column to hover and drop onto
        #[arg(value_enum, ignore_case = true)]
        column: Column,
        /// Abandon the gesture instead of dropping
        #[arg(long)]
        cancel: bool,
    },
    /// Display a single task
    Show {
        /// Task ID or unique prefix
        id: String,
    },
    /// Show the board, or one column, filtered and sorted by due date
    List {
        /// Only this column
        #[arg(long, value_enum, ignore_case = true)]
        column: Option<Column>,
        /// Case-insensitive title search
        #[arg(long)]
        search: Option<String>,
        /// Filter by priority
        #[arg(long, value_enum, ignore_case = true)]
        priority: Option<Priority>,
    },
    /// Remove every task from the board
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
    /// Show or clear the activity log
    Activity {
        /// Show at most this many entries
        #[arg(long, conflicts_with = "clear")]
        limit: Option<usize>,
        /// Clear the activity log
        #[arg(long)]
        clear: bool,
    },
}

fn init_logging(level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter)
        .with_target(false)
        .init();
}

fn read_password_line() -> taskboard::error::Result<String> {
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn run(cli: Cli, format: Format) -> taskboard::error::Result<()> {
    if let Commands::Init = cli.command {
        let cwd = std::env::current_dir()?;
        return taskboard::commands::init::run(&cwd);
    }

    let root = taskboard::store::workspace::find_board_root()?;

    match cli.command {
        Commands::Init => unreachable!(),
        Commands::Login {
            email,
            password,
            remember,
        } => {
            let password = match password {
                Some(password) => password,
                None => read_password_line()?,
            };
            taskboard::commands::session::login(&root, &email, &password, remember, format)
        }
        Commands::Logout => taskboard::commands::session::logout(&root, format),
        Commands::Whoami => taskboard::commands::session::whoami(&root, format),
        Commands::Add {
            title,
            description,
            priority,
            due,
            tag,
            column,
        } => taskboard::commands::add::run(
            &root,
            title,
            description,
            priority,
            due,
            tag,
            column,
            format,
        ),
        Commands::Edit {
            id,
            title,
            description,
            priority,
            due,
            clear_due,
            tag,
            column,
        } => taskboard::commands::edit::run(
            &root,
            &id,
            title,
            description,
            priority,
            due,
            clear_due,
            tag,
            column,
            format,
        ),
        Commands::Delete { id } => taskboard::commands::delete::run(&root, &id, format),
        Commands::Move { id, column } => {
            taskboard::commands::column::move_to(&root, &id, column, format)
        }
        Commands::Drag { id, column, cancel } => {
            taskboard::commands::column::drag(&root, &id, column, cancel, format)
        }
        Commands::Show { id } => taskboard::commands::show::run(&root, &id, format),
        Commands::List {
            column,
            search,
            priority,
        } => taskboard::commands::list::run(&root, column, search, priority, format),
        Commands::Reset { yes } => {
            if !yes {
                Cli::command()
                    .error(
                        clap::error::ErrorKind::MissingRequiredArgument,
                        "reset removes every task; pass --yes to confirm",
                    )
                    .exit();
            }
            taskboard::commands::reset::run(&root, format)
        }
        Commands::Activity { limit, clear } => {
            if clear {
                taskboard::commands::activity::clear(&root, format)
            } else {
                taskboard::commands::activity::list(&root, limit, format)
            }
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let format = if cli.pretty {
        Format::Pretty
    } else {
        cli.format
    };
    init_logging(&cli.log_level);

    if let Err(e) = run(cli, format) {
        match format {
            Format::Json => {
                eprintln!(
                    "{}",
                    serde_json::json!({
                        "error": e.code(),
                        "message": e.to_string()
                    })
                );
            }
            _ => eprintln!("error: {e}"),
        }
        std::process::exit(1);
    }
}
