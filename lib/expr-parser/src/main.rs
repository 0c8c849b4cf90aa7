use itertools::Itertools;
use log::LevelFilter;
use simplelog::*;

use expr_parser::lexer::{tokenize, LexOptions};
use expr_parser::parser::parse_expr;

fn main() {
    TermLogger::init(LevelFilter::Debug, Config::default(), TerminalMode::Mixed, ColorChoice::Auto).unwrap();

    let s = std::env::args().nth(1).unwrap_or_else(|| "(p v q) -> ~r & s".to_string());
    println!("Input: {:?}", s);
    match tokenize(&s, LexOptions::default()) {
        Ok(tokens) => println!("Tokens: {}", tokens.iter().map(|t| format!("{:#}", t)).join(" ")),
        Err(e) => println!("Lex error: {}", e),
    }
    let expr = parse_expr(&s);
    println!("Parsed: {:?}", expr);
    if let Ok(expr) = expr {
        println!("Parsed: {}", expr);
    }
}
