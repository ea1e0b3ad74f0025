//! Recursive-descent parser for nc.
//!
//! Grammar (`{}` repetition, `[]` optional):
//!
//! ```text
//! program : { stmnt (EOL | ';') }
//! stmnt   : 'for' IDENT 'in' expr [EOL] stmnt
//!         | COMMAND { expr }
//!         | expr ['if' expr]
//! expr    : disj
//! disj    : conj { ('|' | 'or') conj }
//! conj    : comp { ('&' | 'and') comp }
//! comp    : range { ('<'|'>'|'<='|'>='|'=='|'!=') range }
//! range   : sum [ '..' sum [ '..' ['+'] sum ] ]
//! sum     : term { ('+'|'-') term }
//! term    : factor { ('*'|'/'|'%') factor }
//! factor  : ('-'|'#'|'!'|'not') factor | atom ['^' factor]
//! atom    : INT | FLOAT | STRING | 'Inf' | '(' expr ')'
//!         | '[' items ']' | '{' block '}' | ident_tail
//! ident_tail : IDENT [ '=' expr
//!                    | '(' items ')' [ '=' expr ]
//!                    | '[' expr ']' [ '=' expr ] ]
//! items   : [ expr { ',' expr } ]
//! block   : { stmnt (EOL | ';') } '}'
//! ```
//!
//! In the third range operand a leading `+` selects a count
//! (`a..b..+n`), otherwise it is a step (`a..b..s`). A block whose first
//! statement is a case parses as a case chain.

mod error;
mod parser;

pub use error::ParseError;
pub use parser::{parse, Parser};
