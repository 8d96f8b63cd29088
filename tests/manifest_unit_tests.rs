//! Unit tests for manifest loading and binding through the `System` abstraction

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "This is a test module")]
mod tests {

    use funcli::cli::Outcome;
    use funcli::system::MockSystem;
    use funcli::{CallArgs, FuncliError, Handlers, Manifest, Value};

    const MANIFEST: &str = r"
app:
  name: Shop
  version: 2.0.0
  author: team
default_subcommand: order
enums:
  - name: Size
    members: [small, large]
commands:
  - name: order
    doc: |
      Place an order
      :param size: cup size
      :param extras: toppings
    params:
      - name: size
        type: Size
        default: small
      - name: extras
        type: list
        default: []
      - name: count
        type: int
        default: 1
";

    fn handlers() -> Handlers {
        Handlers::new().on("order", |args: &CallArgs| {
            Ok(Value::from(format!(
                "{} x{} {}",
                args.get("size")?,
                args.int("count")?,
                args.get("extras")?
            )))
        })
    }

    fn result(outcome: Outcome) -> Value {
        match outcome {
            Outcome::Dispatched { result, .. } => result,
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn load_and_run_default_subcommand() {
        let system = MockSystem::new().with_file("/shop.yaml", MANIFEST).unwrap();
        let cli = Manifest::load_from_file(&system, "/shop.yaml")
            .unwrap()
            .bind(handlers())
            .unwrap();

        assert_eq!(result(cli.run_from(["shop"]).unwrap()), Value::from("small x1 []"));
        assert_eq!(
            result(
                cli.run_from(["shop", "--extras", "milk", "--extras", "foam", "--size", "large"])
                    .unwrap()
            ),
            Value::from("large x1 ['milk', 'foam']")
        );
    }

    #[test]
    fn metadata_comes_from_manifest() {
        let cli = Manifest::from_yaml_str(MANIFEST).unwrap().bind(handlers()).unwrap();
        assert_eq!(cli.version_line(), "Shop version:2.0.0 by team");
        assert_eq!(cli.registry().default_subcommand(), Some("order"));
        let help = cli.full_help();
        assert!(help.contains("[optional, Size, default:'Size.small']: cup size"));
        assert!(help.contains("[optional, list[str], default:[]]: toppings"));
    }

    #[test]
    fn invalid_choice_keeps_exit_code_two() {
        let cli = Manifest::from_yaml_str(MANIFEST).unwrap().bind(handlers()).unwrap();
        let err = cli.run_from(["shop", "order", "--size", "huge"]).unwrap_err();
        let err = err.downcast::<FuncliError>().unwrap();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn unknown_default_subcommand_is_rejected() {
        let text = MANIFEST.replace("default_subcommand: order", "default_subcommand: refund");
        let err = Manifest::from_yaml_str(&text).unwrap().bind(handlers()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FuncliError>(),
            Some(&FuncliError::UnknownSubcommand { ref name }) if name == "refund"
        ));
    }

    #[test]
    fn load_nonexistent_file() {
        let system = MockSystem::new();
        let err = Manifest::load_from_file(&system, "/nonexistent/file.yaml").unwrap_err();
        assert!(err.to_string().contains("Manifest file not found"));
    }
}
