//! Prints every theme token name and its resolved value.

use anyhow::Result;
use prodtrack::theme::TokenValue;
use prodtrack::SchemaConfig;

fn main() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => SchemaConfig::from_file(&path)?,
        None => SchemaConfig::default(),
    };
    let theme = config.theme()?;

    for name in theme.token_names() {
        let rendered = match theme.get(&name) {
            Some(TokenValue::Color(c)) => format!("light={} dark={}", c.light, c.dark),
            Some(TokenValue::Plain(v)) => v.to_string(),
            Some(TokenValue::Animation(a)) => format!(
                "{} {} ({} keyframes)",
                a.duration,
                a.easing,
                a.keyframes.len()
            ),
            None => continue,
        };
        println!("{:<32} {}", name, rendered);
    }
    Ok(())
}
