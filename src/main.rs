use clap::{Parser as ClapParser, Subcommand};
use sqlpath::cli::{self, CliError, CompileOptions};
use sqlpath::dialect;
use sqlpath::{Dialect, GlobalNullMode};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "sqlpath")]
#[command(about = "Compiles JSON attribute key paths into dialect-correct SQL fragments")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a comparison (or assignment) into a SQL fragment
    Compile {
        /// The attribute key, e.g. gameData.passwords[0] or jsonAttribute.age::integer
        key: String,

        /// Comparison value as JSON (reads from stdin if not provided)
        #[arg(short, long)]
        value: Option<String>,

        /// Comparison operator: eq, ne, gt, gte, lt, lte, is, isnot, contains, keyexists
        #[arg(short, long)]
        op: Option<String>,

        /// Use the SQL NULL sentinel instead of a value
        #[arg(long)]
        sql_null: bool,

        /// Use the JSON null sentinel instead of a value
        #[arg(long)]
        json_null: bool,

        /// Target dialect: postgres, mysql, mariadb, sqlite, mssql
        #[arg(short, long, default_value = "postgres")]
        dialect: Dialect,

        /// Null stringification mode: sql or explicit
        #[arg(long, default_value = "sql")]
        null_mode: GlobalNullMode,

        /// Compile an assignment value expression instead of a predicate
        #[arg(long)]
        assign: bool,
    },

    /// Parse an attribute key and show its structure
    Check {
        /// The attribute key to parse
        key: String,
    },

    /// List supported dialects
    Dialects,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compile {
            key,
            value,
            op,
            sql_null,
            json_null,
            dialect,
            null_mode,
            assign,
        } => run_compile(CompileOptions {
            key,
            value,
            operator: op,
            sql_null,
            json_null,
            dialect,
            null_mode,
            assign,
        }),
        Commands::Check { key } => run_check(&key),
        Commands::Dialects => {
            for d in dialect::ALL {
                println!("{}", d);
            }
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_compile(mut options: CompileOptions) -> Result<(), CliError> {
    if options.value.is_none()
        && !options.sql_null
        && !options.json_null
        && !atty::is(atty::Stream::Stdin)
    {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(CliError::Io)?;
        options.value = Some(buffer);
    }

    let fragment = cli::execute_compile(&options)?;
    println!("{}", fragment.sql);
    println!("{}", serde_json::to_string(&fragment.params).map_err(CliError::Json)?);
    Ok(())
}

fn run_check(key: &str) -> Result<(), CliError> {
    let result = cli::execute_check(key)?;
    println!("column:    {}", result.column);
    for segment in &result.segments {
        println!("segment:   {}", segment);
    }
    if let Some(cast) = &result.cast {
        println!("cast:      {}", cast);
    }
    println!("unquote:   {}", result.unquote);
    println!("canonical: {}", result.canonical);
    Ok(())
}
