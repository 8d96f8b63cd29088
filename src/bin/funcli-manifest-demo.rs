//! # `funcli-manifest-demo`
//!
//! The same kind of program as `funcli-demo`, declared in a YAML manifest
//! (`demos/humans.yaml`) instead of code. Only the handlers live here. There
//! is no default subcommand, so running it bare asks for one.
//!
//! ```sh
//! funcli-manifest-demo hello --name Ada --age 36 --no-enjoy_funcli
//! ```
//!
//! Pass `--manifest <path>` as the first arguments to load another manifest
//! through the filesystem instead of the embedded one.

use anyhow::Result;
use funcli::system::RealSystem;
use funcli::{ArgError, CallArgs, FuncliError, Handlers, Manifest, Value};
use tracing::error;

const HUMANS: &str = include_str!("../../demos/humans.yaml");

fn hello(args: &CallArgs) -> Result<Value> {
    let lang = args.strs("lang")?;
    let score = args.ints("score")?;
    let status = args.list("status")?;
    if lang.len() != score.len() || lang.len() != status.len() {
        return Err(ArgError::new(
            "lang, score, status",
            "You're expected to provide complete informations for all lists",
        )
        .into());
    }

    match args.opt_str("nickname")? {
        Some(nickname) => println!("Hello {} ({nickname})", args.str("name")?),
        None => println!("Hello {}", args.str("name")?),
    }
    println!("So you're {}?", args.int("age")?);
    if args.flag("enjoy_funcli")? {
        println!("Glad you enjoy funcli");
    } else {
        println!("Oh, you don't enjoy funcli :-(");
    }
    println!("You like these programming languages?");
    for ((name, score), status) in lang.iter().zip(&score).zip(status) {
        println!("lang_name='{name}', lang_score={score}, lang_status={}", status.repr());
    }
    Ok(Value::None)
}

fn handlers() -> Handlers {
    Handlers::new().on("hello", hello).on("statuses", |_| {
        println!("active\ninactive");
        Ok(Value::None)
    })
}

fn load(argv: &mut Vec<String>) -> Result<Manifest> {
    if argv.get(1).map(String::as_str) == Some("--manifest") && argv.len() > 2 {
        let path = argv.remove(2);
        argv.remove(1);
        return Manifest::load_from_file(&RealSystem::new(), &path);
    }
    Manifest::from_yaml_str(HUMANS)
}

fn main() -> Result<()> {
    funcli::init_logging();

    let mut argv: Vec<String> = std::env::args().collect();
    let outcome = load(&mut argv)
        .and_then(|manifest| manifest.bind(handlers()))
        .and_then(|cli| cli.execute(argv));

    match outcome {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            error!("{:#}", err);
            std::process::exit(
                err.downcast_ref::<FuncliError>()
                    .map_or(1, FuncliError::exit_code),
            );
        }
    }
}
