//! Tokenize a ComponentMarkup snippet and print its highlight styles.

use component_markup::{StyleKey, TokenizeOptions, highlight, tokenize};

fn main() {
    let input = "<ul>\n\t<li *for-item=\"items\">{{ item.name }}</li>\n</ul>\n";

    let tokens = tokenize(input).expect("valid markup");
    for token in &tokens {
        println!(
            "{:>3}..{:<3} {:?} {:?}",
            token.span.start, token.span.end, token.kind, token.text
        );
    }

    println!();

    let highlighted = highlight(input, &TokenizeOptions::default());
    for range in &highlighted.ranges {
        println!(
            "{:>3}..{:<3} {}",
            range.span.start,
            range.span.end,
            range.style.map_or("(none)", StyleKey::class)
        );
    }
}
