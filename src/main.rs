// src/main.rs
use keyhash::lexer::cpu::lex;

fn main() {
    // A tiny sample covering keywords, identifiers, numbers, comments, and symbols.
    let src = r#"
        def fib(n) // naive
            if n < 2 then n else fib(n - 1) + fib(n - 2);
        extern sin(x);
        let While = 1.5; // not a keyword: case matters
    "#;

    println!("TOKENS:");
    for t in lex(src) {
        println!("{:?}  {:?}", t.kind, t.lexeme(src));
    }
}
