pub mod expr;
pub mod literal;
pub mod normal;
pub mod normalize;
pub mod trace;
pub mod var;

pub use expr::Expr;
pub use literal::Literal;
pub use normal::{Clause, Form, NormalForm};
pub use var::Var;
