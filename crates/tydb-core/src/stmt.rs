mod expr;
pub use expr::Expr;

mod expr_binary_op;
pub use expr_binary_op::ExprBinaryOp;

mod expr_column;
pub use expr_column::ExprColumn;

mod expr_in_list;
pub use expr_in_list::ExprInList;

mod expr_is_null;
pub use expr_is_null::ExprIsNull;

mod expr_like;
pub use expr_like::ExprLike;

mod expr_logic;
pub use expr_logic::{ExprAnd, ExprNot, ExprOr};

mod expr_neg;
pub use expr_neg::ExprNeg;

mod op_binary;
pub use op_binary::BinaryOp;

mod operand;
pub use operand::Operand;

mod value;
pub use value::Value;
