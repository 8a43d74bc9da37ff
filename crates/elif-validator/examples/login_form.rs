//! Login form validation demo
//!
//! Run with `RUST_LOG=elif_validator=trace` to see the engine's logging.

use elif_validator::{document, Factory, Password, RuleSet, RuleSpec, ValidatorConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("🦀 elif-validator Demo");
    println!("======================\n");

    let mut factory = Factory::with_config(ValidatorConfig::from_env()?)?;

    // Demo 1: Submitted form, as decoded key/value pairs
    println!("📝 Demo 1: Login form");
    println!("---------------------");
    let submitted = document::from_pairs([("username", "admin"), ("password", "")]);
    let rules = RuleSet::new()
        .field("username", "required|email|max:100")
        .field("password", "required|min:6|max:20");

    match factory.make(&submitted, rules.clone())?.validate() {
        Ok(valid) => println!("  ✅ Valid: {}", valid),
        Err(exception) => {
            println!("  ❌ Rejected with status {}", exception.status());
            println!("{}", exception.errors.to_json_pretty());
        }
    }

    // Demo 2: Same form, Indonesian messages
    println!("\n🌏 Demo 2: Localized messages");
    println!("-----------------------------");
    factory.set_locale("id");
    let errors = factory.make(&submitted, rules)?.errors();
    for (field, messages) in errors.iter() {
        for message in messages {
            println!("  {}: {}", field, message);
        }
    }
    factory.set_locale("en");

    // Demo 3: Registration with a password policy and a cross-check
    println!("\n🔐 Demo 3: Registration");
    println!("-----------------------");
    let registration = document::from_pairs([
        ("username", "wahyudi@email.id"),
        ("password", "wahyudi@email.id"),
        ("profile[name]", "Wahyudi"),
        ("tags[]", "admin"),
        ("tags[]", "editor"),
    ]);
    let rules = RuleSet::new()
        .field("username", "required|email")
        .field(
            "password",
            RuleSpec::new()
                .push("required")
                .push(Password::min(8).letters().numbers().symbols()),
        )
        .field("profile.name", "required|alpha|max:50")
        .field("tags", "sometimes|min:1");

    let validator = factory.make(&registration, rules)?.after(|data, errors| {
        if data["username"] == data["password"] {
            errors.add("password", "The password must not be the same as the username.");
        }
    });

    let result = validator.run();
    if result.passed {
        println!("  ✅ Registration accepted");
    } else {
        println!("  ❌ {}", result.errors);
    }

    println!("\n✅ All validation demos completed!");
    Ok(())
}
