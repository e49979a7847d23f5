//! Integration tests exercising `assemble` end-to-end on self-contained programs.

use hack_assembler::assemble;

#[test]
fn test_add_two_constants() {
    // Equivalent to the classic Add.asm: D = 2 + 3; M[0] = D.
    let source = "\
@2
D=A
@3
D=D+A
@0
M=D";

    let result = assemble(source).unwrap();
    let lines: Vec<&str> = result.lines().collect();

    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "0000000000000010");
    assert_eq!(lines[1], "1110110000010000");
    assert_eq!(lines[2], "0000000000000011");
    assert_eq!(lines[3], "1110000010010000");
    assert_eq!(lines[4], "0000000000000000");
    assert_eq!(lines[5], "1110001100001000");
}

#[test]
fn test_max_of_two_with_branching() {
    // Equivalent to the classic Max.asm: M[2] = max(M[0], M[1]).
    let source = "\
@0
D=M
@1
D=D-M
@OUTPUT_FIRST
D;JGT
@1
D=M
@OUTPUT_D
0;JMP
(OUTPUT_FIRST)
@0
D=M
(OUTPUT_D)
@2
M=D
(INFINITE_LOOP)
@INFINITE_LOOP
0;JMP";

    let result = assemble(source).unwrap();
    // 13 real instructions, 3 labels consume no lines.
    assert_eq!(result.lines().count(), 13);
}

#[test]
fn test_literal_a_command() {
    let result = assemble("@5").unwrap();
    assert_eq!(result, "0000000000000101");
}

#[test]
fn test_predefined_symbol_screen() {
    let result = assemble("@SCREEN").unwrap();
    assert_eq!(result, "0100000000000000");
}

#[test]
fn test_forward_label_reference() {
    let result = assemble("@LOOP\n0;JMP\n(LOOP)").unwrap();
    let lines: Vec<&str> = result.lines().collect();
    assert_eq!(lines[0], "0000000000000001");
    assert_eq!(lines[1], "1110101010000111");
}

#[test]
fn test_variable_allocation_order() {
    let result = assemble("@i\n@j\n@i").unwrap();
    let lines: Vec<&str> = result.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "0000000000010000"); // i -> 16
    assert_eq!(lines[1], "0000000000010001"); // j -> 17
    assert_eq!(lines[2], "0000000000010000"); // i -> 16 again
}

#[test]
fn test_rerunning_is_deterministic() {
    let source = "@i\nM=1\n@LOOP\n(LOOP)\n@i\nM=M+1\n@LOOP\n0;JMP";
    let first = assemble(source).unwrap();
    let second = assemble(source).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_every_real_instruction_is_sixteen_bits() {
    let source = "@1\n@2\n@3\nD=D+A\n(LBL)\n@LBL\n0;JMP";
    let result = assemble(source).unwrap();
    for line in result.lines() {
        assert_eq!(line.len(), 16);
        assert!(line.chars().all(|c| c == '0' || c == '1'));
    }
}
