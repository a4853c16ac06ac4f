//! Case-insensitive `LIKE` helpers with escaped metacharacters.

use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};

/// Escape character paired with every pattern built here.
pub const LIKE_ESCAPE: char = '!';

pub fn like_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '%' | '_' | LIKE_ESCAPE => {
                out.push(LIKE_ESCAPE);
                out.push(ch);
            }
            c => out.push(c),
        }
    }
    out
}

pub fn like_contains(s: &str) -> String {
    format!("%{}%", like_escape(s))
}

/// `LOWER(expr) LIKE '%needle%' ESCAPE '!'`, with `needle` lower-cased.
pub fn contains_ignore_case(expr: impl Into<SimpleExpr>, needle: &str) -> SimpleExpr {
    Expr::expr(Func::lower(expr.into()))
        .like(LikeExpr::new(like_contains(&needle.to_lowercase())).escape(LIKE_ESCAPE))
}
