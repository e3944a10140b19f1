//! Demonstrate error reporting and lenient mode for invalid input.

use component_markup::{TokenizeOptions, tokenize, tokenize_with};

fn main() {
    // Malformed bare literal
    match tokenize("<toggle enabled=trueish>") {
        Ok(_) => println!("Lexed OK (unexpected)"),
        Err(e) => {
            println!("Lex error: {e}");
            println!("  Kind: {}", e.kind.code());
            println!("  Position: {}", e.position);
        }
    }

    println!();

    // The valid prefix survives an error
    let result = tokenize_with("<p>Hello {{ name", &TokenizeOptions::default());
    println!("Tokens before the error: {}", result.tokens.len());
    if let Some(e) = result.error {
        println!("Lex error: {e}");
    }

    println!();

    // Lenient mode tolerates an unescaped closing curly bracket
    let strict = tokenize_with("a } b", &TokenizeOptions::new());
    let lenient = tokenize_with("a } b", &TokenizeOptions::new().lenient(true));
    println!("strict ok: {}, lenient ok: {}", strict.is_ok(), lenient.is_ok());
}
