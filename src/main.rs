//! # `funcli-demo`
//!
//! Demo program exposing a handful of functions through `funcli`. It covers
//! every parameter category: plain scalars, booleans, lists with and
//! without an element type, enumerations and lists of enumerations. The
//! integration tests drive it.
//!
//! ## Usage
//!
//! ```sh
//! funcli-demo                                   # runs the default, `simple`
//! funcli-demo an_int_list --a_list 11 --a_list 22
//! funcli-demo a_bool --no-a_bool
//! funcli-demo --full-help
//! ```
//!
//! Set `RUST_LOG=debug` to trace how every parameter became a flag.

use anyhow::Result;
use funcli::{AppInfo, ArgError, CallArgs, Cli, Enumeration, Function, FuncliError, Param, TypeSpec, Value};
use tracing::error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Value1,
    Value2,
}

impl Enumeration for Choice {
    const NAME: &'static str = "Choice";
    const MEMBERS: &'static [&'static str] = &["value1", "value2"];

    fn from_member(member: &str) -> Option<Self> {
        match member {
            "value1" => Some(Self::Value1),
            "value2" => Some(Self::Value2),
            _ => None,
        }
    }

    fn member(&self) -> &'static str {
        match *self {
            Self::Value1 => "value1",
            Self::Value2 => "value2",
        }
    }
}

/// Print and return a handler's result
fn report(result: Value) -> Result<Value> {
    println!("result={result}");
    Ok(result)
}

fn list_result(args: &CallArgs) -> Result<Value> {
    println!("result=a_list={}", args.get("a_list")?);
    Ok(Value::None)
}

fn functions() -> Vec<Function> {
    vec![
        Function::new("simple", |_| report(Value::from("ok")))
            .doc("simple function with no args"),
        Function::new("default_value", |args| {
            println!(
                "result=a_bool={}, a_int={}, a_str={}, a_list={}",
                args.flag("a_bool")?,
                args.int("a_int")?,
                args.get("a_str")?.repr(),
                args.get("a_list")?,
            );
            Ok(Value::None)
        })
        .doc(
            "function with default values for every args
            :param a_bool:
            :param a_int:
            :param a_str:
            :param a_list:",
        )
        .param(Param::new("a_bool").typed(TypeSpec::BOOL).default(true))
        .param(Param::new("a_int").typed(TypeSpec::INT).default(1))
        .param(Param::new("a_str").typed(TypeSpec::STR).default("string"))
        .param(
            Param::new("a_list")
                .typed(TypeSpec::list_of(TypeSpec::STR))
                .default(vec!["a", "b", "c"]),
        ),
        Function::new("an_unspecified_list", list_result)
            .doc("function with a list of unknown types\n:param a_list: elements are kept as text")
            .param(Param::new("a_list").typed(TypeSpec::LIST)),
        Function::new("an_int_list", list_result)
            .doc("function with a list of int")
            .param(Param::new("a_list").typed(TypeSpec::list_of(TypeSpec::INT))),
        Function::new("an_str_list", list_result)
            .doc("function with a list of str")
            .param(Param::new("a_list").typed(TypeSpec::list_of(TypeSpec::STR))),
        Function::new("a_bool", |args| report(Value::Bool(args.flag("a_bool")?)))
            .doc("function with a bool")
            .param(Param::new("a_bool").typed(TypeSpec::BOOL)),
        Function::new("an_int", |args| report(Value::Int(args.int("value")?)))
            .doc("function with an int\n:param value: any whole number")
            .param(Param::new("value").typed(TypeSpec::INT)),
        Function::new("a_float", |args| report(Value::Float(args.float("ratio")?)))
            .doc("function with a float")
            .param(Param::new("ratio").typed(TypeSpec::FLOAT).default(1.5)),
        Function::new("raise_error", |_| {
            Err(ArgError::new("test", "This arg value doesn't look right").into())
        })
        .doc("function that raise a funcli error"),
        Function::new("an_enum", |args| {
            let choice: Choice = args.enumeration("value")?;
            report(Value::from(choice.member()))
        })
        .doc("function with an enum\n:param value: one of the members")
        .param(Param::new("value").typed(TypeSpec::of::<Choice>())),
        Function::new("an_enum_list", |args| {
            let choices: Vec<Choice> = args.enumerations("a_list")?;
            let members: Vec<&str> = choices.iter().map(Enumeration::member).collect();
            report(Value::from(members))
        })
        .doc("function with a list of enum")
        .param(Param::new("a_list").typed(TypeSpec::list_of(TypeSpec::of::<Choice>()))),
    ]
}

fn main() -> Result<()> {
    funcli::init_logging();

    let cli = Cli::from_functions(
        AppInfo::new("Demo", "0.0.1", "gme"),
        functions(),
        Some("simple"),
    )?;

    match cli.run() {
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
