//! Wire protocol opcodes.
//!
//! Modern servers speak OP_MSG for all commands; the legacy opcodes are kept
//! as named constants for header diagnostics.

/// Legacy reply to OP_QUERY.
pub const OP_REPLY: i32 = 1;

/// Legacy document update.
pub const OP_UPDATE: i32 = 2001;

/// Legacy document insert.
pub const OP_INSERT: i32 = 2002;

/// Legacy query.
pub const OP_QUERY: i32 = 2004;

/// Legacy cursor continuation.
pub const OP_GET_MORE: i32 = 2005;

/// Legacy document delete.
pub const OP_DELETE: i32 = 2006;

/// Legacy cursor cleanup.
pub const OP_KILL_CURSORS: i32 = 2007;

/// Intermediate command protocol (removed from modern servers).
pub const OP_COMMAND: i32 = 2010;

/// Reply to OP_COMMAND.
pub const OP_COMMAND_REPLY: i32 = 2011;

/// Section-based command message. Everything this client sends uses it.
pub const OP_MSG: i32 = 2013;

/// Returns a human-readable name for an opcode.
pub fn op_name(op_code: i32) -> &'static str {
    match op_code {
        OP_REPLY => "OP_REPLY",
        OP_UPDATE => "OP_UPDATE",
        OP_INSERT => "OP_INSERT",
        OP_QUERY => "OP_QUERY",
        OP_GET_MORE => "OP_GET_MORE",
        OP_DELETE => "OP_DELETE",
        OP_KILL_CURSORS => "OP_KILL_CURSORS",
        OP_COMMAND => "OP_COMMAND",
        OP_COMMAND_REPLY => "OP_COMMAND_REPLY",
        OP_MSG => "OP_MSG",
        _ => "UNKNOWN",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_known_opcodes() {
        assert_eq!(op_name(OP_MSG), "OP_MSG");
        assert_eq!(op_name(OP_QUERY), "OP_QUERY");
        assert_eq!(op_name(OP_REPLY), "OP_REPLY");
    }

    #[test]
    fn unknown_opcode_is_named_unknown() {
        assert_eq!(op_name(0), "UNKNOWN");
        assert_eq!(op_name(9999), "UNKNOWN");
    }
}
