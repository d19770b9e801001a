//! Rules command handler

use revmark_core::style_rules::RuleRegistry;

/// Print every built-in rule
pub fn handle_rules() {
    let registry = RuleRegistry::builtin();

    println!("Style Rules");
    println!("===========");
    for rule in registry.rules() {
        println!(
            "  {:<22} {:<15} {}",
            rule.id,
            rule.category.to_string(),
            rule.description
        );
    }
    println!();
    println!("{} rules", registry.rules().len());
}
