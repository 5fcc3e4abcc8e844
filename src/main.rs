//MIT License
use clap::{Args, Parser, Subcommand};
use simplelog::{ColorChoice, CombinedLogger, Config, LevelFilter, TermLogger, TerminalMode};
use std::path::PathBuf;
use std::process::ExitCode;
use symcalc::solver::dispatch::{dispatch, Operation, Request, Side};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ExprArgs {
    /// The expression, e.g. "x**2 + sin(x)"
    expression: String,

    /// The variable to operate on
    #[arg(short = 'x', long, default_value = "x")]
    variable: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Differentiate an expression
    Diff {
        #[command(flatten)]
        expr: ExprArgs,

        /// Derivative order (1 to 10)
        #[arg(short, long, default_value_t = 1)]
        order: usize,
    },
    /// Integrate an expression, symbolically or over an interval
    Integrate {
        #[command(flatten)]
        expr: ExprArgs,

        /// Lower bound of a definite integral
        #[arg(long, allow_negative_numbers = true, requires = "upper")]
        lower: Option<f64>,

        /// Upper bound of a definite integral
        #[arg(long, allow_negative_numbers = true, requires = "lower")]
        upper: Option<f64>,
    },
    /// Solve an equation such as "x**2 = 4" for its real roots
    Solve {
        #[command(flatten)]
        expr: ExprArgs,
    },
    /// Evaluate the limit of an expression at a point
    Limit {
        #[command(flatten)]
        expr: ExprArgs,

        /// Approach point ("0", "pi/2", "inf", "-oo", ...)
        #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
        point: String,

        /// Approach side: both, left or right
        #[arg(short, long, default_value_t = Side::Both)]
        side: Side,
    },
    /// Expand an expression into a Taylor series
    Series {
        #[command(flatten)]
        expr: ExprArgs,

        /// Expansion point
        #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
        point: String,

        /// Highest power to include
        #[arg(short, long, default_value_t = 5)]
        order: usize,
    },
    /// Plot an expression to a PNG file
    Plot {
        #[command(flatten)]
        expr: ExprArgs,

        /// Left edge of the plot range
        #[arg(long, default_value_t = -10.0, allow_negative_numbers = true)]
        from: f64,

        /// Right edge of the plot range
        #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
        to: f64,

        /// Output file
        #[arg(short, long, default_value = "plot.png")]
        output: PathBuf,
    },
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

fn build_request(command: Commands) -> Request {
    match command {
        Commands::Diff { expr, order } => {
            let mut request = Request::new(Operation::Diff, &expr.expression, &expr.variable);
            request.order = order;
            request
        }
        Commands::Integrate { expr, lower, upper } => {
            let mut request = Request::new(Operation::Integrate, &expr.expression, &expr.variable);
            request.lower = lower;
            request.upper = upper;
            request
        }
        Commands::Solve { expr } => Request::new(Operation::Solve, &expr.expression, &expr.variable),
        Commands::Limit { expr, point, side } => {
            let mut request = Request::new(Operation::Limit, &expr.expression, &expr.variable);
            request.point = Some(point);
            request.side = side;
            request
        }
        Commands::Series { expr, point, order } => {
            let mut request = Request::new(Operation::Series, &expr.expression, &expr.variable);
            request.point = Some(point);
            request.order = order;
            request
        }
        Commands::Plot {
            expr,
            from,
            to,
            output,
        } => {
            let mut request = Request::new(Operation::Plot, &expr.expression, &expr.variable);
            request.range = (from, to);
            request.output = output;
            request
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let request = build_request(cli.command);
    match dispatch(&request) {
        Ok(outcome) => {
            println!("{}", outcome);
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("error: {}", error);
            ExitCode::FAILURE
        }
    }
}
