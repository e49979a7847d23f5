//! Bootstrap code generation for VM initialization.
//!
//! Generates the bootstrap code that initializes SP, assigns sentinel frame
//! pointers, and calls Sys.init. Only emitted when explicitly requested
//! (`-b`); single-file test programs that never call Sys.init skip it.

/// Generate VM bootstrap code.
///
/// The bootstrap code:
/// 1. Sets SP = 256.
/// 2. Assigns sentinel values directly to LCL/ARG/THIS/THAT. No real caller
///    frame exists yet, so these are assigned rather than pushed.
/// 3. Calls Sys.init with 0 arguments via the normal call protocol.
pub fn generate_bootstrap() -> String {
    let mut buf = String::with_capacity(512);

    // SP = 256
    buf.push_str("@256\nD=A\n@SP\nM=D\n");

    // Sentinel frame pointers
    buf.push_str("@1\nD=-A\n@LCL\nM=D\n");
    buf.push_str("@2\nD=-A\n@ARG\nM=D\n");
    buf.push_str("@3\nD=-A\n@THIS\nM=D\n");
    buf.push_str("@4\nD=-A\n@THAT\nM=D\n");

    // call Sys.init 0
    // Push return address
    buf.push_str("@Sys.init$ret.BOOTSTRAP\nD=A\n@SP\nA=M\nM=D\n@SP\nM=M+1\n");

    // Push LCL
    buf.push_str("@LCL\nD=M\n@SP\nA=M\nM=D\n@SP\nM=M+1\n");

    // Push ARG
    buf.push_str("@ARG\nD=M\n@SP\nA=M\nM=D\n@SP\nM=M+1\n");

    // Push THIS
    buf.push_str("@THIS\nD=M\n@SP\nA=M\nM=D\n@SP\nM=M+1\n");

    // Push THAT
    buf.push_str("@THAT\nD=M\n@SP\nA=M\nM=D\n@SP\nM=M+1\n");

    // ARG = SP - 0 - 5 = SP - 5
    buf.push_str("@SP\nD=M\n@5\nD=D-A\n@ARG\nM=D\n");

    // LCL = SP
    buf.push_str("@SP\nD=M\n@LCL\nM=D\n");

    // goto Sys.init
    buf.push_str("@Sys.init\n0;JMP\n");

    // Return label (never reached by a well-formed program)
    buf.push_str("(Sys.init$ret.BOOTSTRAP)\n");

    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_sets_sp() {
        let code = generate_bootstrap();
        assert!(code.contains("@256"));
        assert!(code.contains("@SP\nM=D"));
    }

    #[test]
    fn test_bootstrap_assigns_sentinel_frame() {
        let code = generate_bootstrap();
        assert!(code.contains("@1\nD=-A\n@LCL\nM=D"));
        assert!(code.contains("@2\nD=-A\n@ARG\nM=D"));
        assert!(code.contains("@3\nD=-A\n@THIS\nM=D"));
        assert!(code.contains("@4\nD=-A\n@THAT\nM=D"));
    }

    #[test]
    fn test_bootstrap_does_not_push_frame_before_sentinels() {
        let code = generate_bootstrap();
        let sentinel_pos = code.find("@LCL\nM=D").unwrap();
        let push_frame_pos = code.find("@LCL\nD=M").unwrap();
        assert!(sentinel_pos < push_frame_pos);
    }

    #[test]
    fn test_bootstrap_calls_sys_init() {
        let code = generate_bootstrap();
        assert!(code.contains("@Sys.init\n0;JMP"));
    }

    #[test]
    fn test_bootstrap_pushes_frame() {
        let code = generate_bootstrap();
        assert!(code.contains("@LCL\nD=M"));
        assert!(code.contains("@ARG\nD=M"));
        assert!(code.contains("@THIS\nD=M"));
        assert!(code.contains("@THAT\nD=M"));
    }

    #[test]
    fn test_bootstrap_has_return_label() {
        let code = generate_bootstrap();
        assert!(code.contains("(Sys.init$ret.BOOTSTRAP)"));
    }
}
