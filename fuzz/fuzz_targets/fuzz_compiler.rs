// Crux - A teaching compiler translating Crux programs into MIPS assembly
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Fuzz target for the complete Crux compiler pipeline.
//!
//! Besides raw input, the fuzzer builds well-formed expression programs so
//! the code generator sees deep trees. A program without diagnostics must
//! always lower.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_compiler
//!
//! Run for a specific duration:
//!   cargo +nightly fuzz run fuzz_compiler -- -max_total_time=60

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum Expr {
    Int(u16),
    Bool(bool),
    Add(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Less(Box<Expr>, Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Not(Box<Expr>),
}

impl Expr {
    fn render(&self, out: &mut String) {
        match self {
            Expr::Int(value) => out.push_str(&value.to_string()),
            Expr::Bool(value) => out.push_str(if *value { "true" } else { "false" }),
            Expr::Add(l, r) => binary(out, l, "+", r),
            Expr::Mul(l, r) => binary(out, l, "*", r),
            Expr::Less(l, r) => binary(out, l, "<", r),
            Expr::And(l, r) => binary(out, l, "and", r),
            Expr::Not(e) => {
                out.push_str("not (");
                e.render(out);
                out.push(')');
            }
        }
    }
}

fn binary(out: &mut String, left: &Expr, op: &str, right: &Expr) {
    out.push('(');
    left.render(out);
    out.push_str(&format!(" {} ", op));
    right.render(out);
    out.push(')');
}

#[derive(Arbitrary, Debug)]
enum Input<'a> {
    Raw(&'a str),
    Expression(Expr),
}

fuzz_target!(|input: Input<'_>| {
    let source = match input {
        Input::Raw(source) => source.to_string(),
        Input::Expression(expr) => {
            let mut rendered = String::new();
            expr.render(&mut rendered);
            format!("func main(): void {{ ::printInt({}); }}", rendered)
        }
    };
    let compilation = cruxc::compile(&source).expect("checked programs always lower");
    if let Some(program) = compilation.program {
        assert!(program.to_string().starts_with(".data\n"));
    }
});
